//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use realty_core::{
    AccentColor, AppNotification, AppearancePreferences, BaseTheme, Client, DashboardFeed, Deal,
    Employee, FontFamily, FontSize, MobileNavLayout, NavLayout, NavLinkId, Site,
};

use crate::screen::ScreenId;

/// Direction for keyboard reorder operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Notification severity level.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

#[allow(dead_code)]
impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Data Events (from the data bridge) ────────────────────────
    SitesUpdated(Arc<Vec<Arc<Site>>>),
    ClientsUpdated(Arc<Vec<Arc<Client>>>),
    DealsUpdated(Arc<Vec<Arc<Deal>>>),
    EmployeesUpdated(Arc<Vec<Arc<Employee>>>),
    NotificationsUpdated(Arc<Vec<Arc<AppNotification>>>),
    DashboardUpdated(Arc<DashboardFeed>),

    // ── Appearance ────────────────────────────────────────────────
    /// The preference store changed, on this or another handle.
    PrefsUpdated(AppearancePreferences),
    SetBaseTheme(BaseTheme),
    SetAccentColor(AccentColor),
    SetNavLayout(NavLayout),
    SetMobileNavLayout(MobileNavLayout),
    SetFontFamily(FontFamily),
    SetFontSize(FontSize),
    ToggleSidebar,
    ResetAppearance,

    // ── Nav Reordering ────────────────────────────────────────────
    /// Persist a full navigation order, e.g. after a drop commit.
    SetNavOrder(Vec<NavLinkId>),
    /// Move one link a single step via the keyboard.
    MoveNavLink(NavLinkId, Direction),

    // ── Notifications Screen ──────────────────────────────────────
    MarkNotificationRead(String),
    MarkAllNotificationsRead,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Toasts ────────────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
