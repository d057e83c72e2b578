// ── CRM client domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Pipeline status of a CRM client.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ClientStatus {
    NewLead,
    Contacted,
    SiteVisit,
    Negotiating,
    Closed,
    Lost,
}

impl ClientStatus {
    pub const ALL: [Self; 6] = [
        Self::NewLead,
        Self::Contacted,
        Self::SiteVisit,
        Self::Negotiating,
        Self::Closed,
        Self::Lost,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::NewLead => "New Lead",
            Self::Contacted => "Contacted",
            Self::SiteVisit => "Site Visit",
            Self::Negotiating => "Negotiating",
            Self::Closed => "Closed",
            Self::Lost => "Lost",
        }
    }
}

/// A CRM client (a lead or customer, not a network client).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: ClientStatus,
    /// Display name of the agent working this client.
    pub assigned_agent: String,
    pub last_contact: NaiveDate,
    /// Acquisition channel (free-form: "Referral", "Website", ...).
    pub source: String,
}
