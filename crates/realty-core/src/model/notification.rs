// ── In-app notification domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Notification category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    NewDeal,
    TaskAssigned,
    ClientMessage,
    SystemUpdate,
}

impl NotificationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::NewDeal => "New Deal",
            Self::TaskAssigned => "Task Assigned",
            Self::ClientMessage => "Client Message",
            Self::SystemUpdate => "System Update",
        }
    }
}

/// An in-app notification shown on the notifications screen.
///
/// Named `AppNotification` to keep it distinct from the transient status
/// toasts the UI raises for its own feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppNotification {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    /// Relative display timestamp as the backend would render it ("5m ago").
    pub timestamp: String,
    pub read: bool,
    /// The person the notification is about, when there is one.
    pub related_user: Option<String>,
}
