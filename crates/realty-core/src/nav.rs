//! Navigation catalog — the fixed set of destinations, per-role visibility,
//! and the rule that merges a user's saved ordering against the catalog.
//!
//! Membership is compiled in: which links exist can only change in code.
//! Order is the one thing the user controls, and saved orders must survive
//! catalog evolution — links added after the user saved are appended in
//! catalog order, links removed from the catalog vanish from the saved order.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::Role;

/// Stable identifier of a navigation link.
///
/// The kebab-case string form ("my-interests") is the persisted id; it must
/// never change once shipped or saved orders stop matching.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NavLinkId {
    Properties,
    MyInterests,
    MySchedule,
    Clients,
    Deals,
    Employees,
    Attendance,
    Calendar,
    Reports,
}

impl NavLinkId {
    /// Catalog entry for this id.
    pub fn link(self) -> &'static NavLink {
        CATALOG
            .iter()
            .find(|l| l.id == self)
            .map_or(&CATALOG[0], |l| l)
    }
}

/// One navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub id: NavLinkId,
    pub label: &'static str,
    /// Opaque routing target; the view layer maps it to a screen.
    pub destination: &'static str,
    /// Single-cell glyph for collapsed rails and bottom bars.
    pub icon: &'static str,
    pub allowed_roles: &'static [Role],
    /// Visible to an unauthenticated viewer.
    pub is_public: bool,
}

/// The canonical catalog, in canonical order.
pub const CATALOG: [NavLink; 9] = [
    NavLink {
        id: NavLinkId::Properties,
        label: "Properties",
        destination: "/properties",
        icon: "󰋜",
        allowed_roles: &[Role::Admin, Role::Agent, Role::CompanyAdmin, Role::Client],
        is_public: true,
    },
    NavLink {
        id: NavLinkId::MyInterests,
        label: "My Interests",
        destination: "/my-interests",
        icon: "󰋑",
        allowed_roles: &[Role::Client],
        is_public: false,
    },
    NavLink {
        id: NavLinkId::MySchedule,
        label: "My Schedule",
        destination: "/my-schedule",
        icon: "󰥔",
        allowed_roles: &[Role::Client],
        is_public: false,
    },
    NavLink {
        id: NavLinkId::Clients,
        label: "Clients (CRM)",
        destination: "/clients",
        icon: "󰀎",
        allowed_roles: &[Role::Admin, Role::Agent, Role::CompanyAdmin],
        is_public: false,
    },
    NavLink {
        id: NavLinkId::Deals,
        label: "Deals",
        destination: "/deals",
        icon: "󰠜",
        allowed_roles: &[Role::Admin, Role::Agent, Role::CompanyAdmin],
        is_public: false,
    },
    NavLink {
        id: NavLinkId::Employees,
        label: "Employees",
        destination: "/employees",
        icon: "󰢚",
        allowed_roles: &[Role::Admin, Role::CompanyAdmin],
        is_public: false,
    },
    NavLink {
        id: NavLinkId::Attendance,
        label: "Attendance",
        destination: "/attendance",
        icon: "󰄬",
        allowed_roles: &[Role::Admin, Role::CompanyAdmin, Role::Employee],
        is_public: false,
    },
    NavLink {
        id: NavLinkId::Calendar,
        label: "Calendar",
        destination: "/calendar",
        icon: "󰃭",
        allowed_roles: &[Role::Admin, Role::Agent, Role::CompanyAdmin, Role::Employee],
        is_public: false,
    },
    NavLink {
        id: NavLinkId::Reports,
        label: "Reports",
        destination: "/reports",
        icon: "󰄨",
        allowed_roles: &[Role::Admin, Role::CompanyAdmin],
        is_public: false,
    },
];

/// The catalog order as an id list — the default `nav_order`.
pub fn canonical_order() -> Vec<NavLinkId> {
    CATALOG.iter().map(|l| l.id).collect()
}

/// Merge a saved order against the catalog.
///
/// Ids present in both keep the saved relative order; catalog ids missing
/// from the saved list are appended in canonical order; duplicates collapse
/// to their first occurrence. Unknown id *strings* are dropped earlier, at
/// parse time, so by the time ids reach this function they are all valid.
///
/// An empty saved order therefore yields the full canonical order.
pub fn reconcile(saved: &[NavLinkId]) -> Vec<NavLinkId> {
    let mut order = Vec::with_capacity(CATALOG.len());
    for id in saved {
        if !order.contains(id) {
            order.push(*id);
        }
    }
    for link in &CATALOG {
        if !order.contains(&link.id) {
            order.push(link.id);
        }
    }
    order
}

/// Filter an ordered id list down to the links a viewer may see, preserving
/// the given order. `None` means unauthenticated: public links only.
pub fn links_for_viewer(order: &[NavLinkId], viewer: Option<Role>) -> Vec<&'static NavLink> {
    order
        .iter()
        .map(|id| id.link())
        .filter(|l| match viewer {
            Some(role) => l.allowed_roles.contains(&role),
            None => l.is_public,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn link_lookup_matches_id() {
        for link in &CATALOG {
            assert_eq!(link.id.link().id, link.id);
        }
    }

    #[test]
    fn id_strings_round_trip() {
        assert_eq!(NavLinkId::MyInterests.to_string(), "my-interests");
        for link in &CATALOG {
            assert_eq!(NavLinkId::from_str(&link.id.to_string()).unwrap(), link.id);
        }
        assert!(NavLinkId::from_str("settings").is_err());
    }

    #[test]
    fn reconcile_of_empty_is_canonical() {
        assert_eq!(reconcile(&[]), canonical_order());
    }

    #[test]
    fn reconcile_keeps_saved_prefix_then_appends_canonical() {
        let saved = [NavLinkId::Deals, NavLinkId::Clients];
        let merged = reconcile(&saved);

        assert_eq!(merged[..2], saved);
        // The remainder is the canonical order minus the saved ids.
        let rest: Vec<_> = canonical_order()
            .into_iter()
            .filter(|id| !saved.contains(id))
            .collect();
        assert_eq!(merged[2..], rest);
    }

    #[test]
    fn reconcile_is_a_permutation_of_the_catalog() {
        let saved = [
            NavLinkId::Reports,
            NavLinkId::Properties,
            NavLinkId::Attendance,
        ];
        let merged = reconcile(&saved);

        assert_eq!(merged.len(), CATALOG.len());
        for link in &CATALOG {
            assert!(merged.contains(&link.id));
        }
    }

    #[test]
    fn reconcile_collapses_duplicates() {
        let saved = [NavLinkId::Deals, NavLinkId::Deals, NavLinkId::Clients];
        let merged = reconcile(&saved);

        assert_eq!(merged.len(), CATALOG.len());
        assert_eq!(merged[..2], [NavLinkId::Deals, NavLinkId::Clients]);
    }

    #[test]
    fn reconcile_of_full_order_is_idempotent() {
        let merged = reconcile(&canonical_order());
        assert_eq!(reconcile(&merged), merged);
    }

    #[test]
    fn admin_sees_staff_links_in_order() {
        let links = links_for_viewer(&canonical_order(), Some(Role::Admin));
        let ids: Vec<_> = links.iter().map(|l| l.id).collect();
        assert_eq!(
            ids,
            vec![
                NavLinkId::Properties,
                NavLinkId::Clients,
                NavLinkId::Deals,
                NavLinkId::Employees,
                NavLinkId::Attendance,
                NavLinkId::Calendar,
                NavLinkId::Reports,
            ]
        );
    }

    #[test]
    fn client_sees_only_client_links() {
        let links = links_for_viewer(&canonical_order(), Some(Role::Client));
        let ids: Vec<_> = links.iter().map(|l| l.id).collect();
        assert_eq!(
            ids,
            vec![
                NavLinkId::Properties,
                NavLinkId::MyInterests,
                NavLinkId::MySchedule,
            ]
        );
    }

    #[test]
    fn employee_sees_attendance_and_calendar() {
        let links = links_for_viewer(&canonical_order(), Some(Role::Employee));
        let ids: Vec<_> = links.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![NavLinkId::Attendance, NavLinkId::Calendar]);
    }

    #[test]
    fn unauthenticated_sees_public_links_only() {
        let links = links_for_viewer(&canonical_order(), None);
        let ids: Vec<_> = links.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![NavLinkId::Properties]);
    }

    #[test]
    fn filtering_respects_user_order() {
        let order = [
            NavLinkId::Reports,
            NavLinkId::Deals,
            NavLinkId::MyInterests,
            NavLinkId::Properties,
        ];
        let links = links_for_viewer(&order, Some(Role::Agent));
        let ids: Vec<_> = links.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![NavLinkId::Deals, NavLinkId::Properties]);
    }
}
