// ── Viewer role ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Session role of the signed-in viewer.
///
/// There is no authentication in this application; the role comes from
/// configuration or the CLI and gates which navigation links are shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Agent,
    CompanyAdmin,
    Employee,
    Client,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::Admin,
        Self::Agent,
        Self::CompanyAdmin,
        Self::Employee,
        Self::Client,
    ];

    /// Human display label (e.g. "Company Admin").
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Agent => "Agent",
            Self::CompanyAdmin => "Company Admin",
            Self::Employee => "Employee",
            Self::Client => "Client",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_kebab_case_ids() {
        assert_eq!(Role::from_str("company-admin").unwrap(), Role::CompanyAdmin);
        assert_eq!(Role::from_str("agent").unwrap(), Role::Agent);
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn display_round_trips() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
    }
}
