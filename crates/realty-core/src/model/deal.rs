// ── Deal domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle status of a deal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DealStatus {
    InProgress,
    Completed,
    Cancelled,
}

impl DealStatus {
    pub const ALL: [Self; 3] = [Self::InProgress, Self::Completed, Self::Cancelled];

    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// A sale or lease deal tying a client to a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub title: String,
    pub client_id: String,
    /// Denormalized client display name for list rendering.
    pub client_name: String,
    pub property_title: String,
    /// Deal value in whole currency units.
    pub value: u64,
    pub status: DealStatus,
    pub close_date: NaiveDate,
}
