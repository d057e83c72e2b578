//! Screen identifier enum.

use std::fmt;

use realty_core::NavLinkId;

/// Identifies each TUI screen.
///
/// Most screens are navigation destinations; which of those are reachable,
/// and in what order, depends on the viewer's role and saved link order, so
/// number-key mapping is positional and handled by the app. Notifications
/// and Settings are chrome destinations with dedicated keys instead of
/// navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard,
    Properties,
    Clients,
    Deals,
    Employees,
    Reports,
    Attendance,
    Calendar,
    MyInterests,
    MySchedule,
    Notifications,
    Settings,
}

impl ScreenId {
    /// Every screen the app mounts a component for.
    pub const ALL: [ScreenId; 12] = [
        Self::Dashboard,
        Self::Properties,
        Self::Clients,
        Self::Deals,
        Self::Employees,
        Self::Reports,
        Self::Attendance,
        Self::Calendar,
        Self::MyInterests,
        Self::MySchedule,
        Self::Notifications,
        Self::Settings,
    ];

    /// The screen a navigation link leads to.
    pub fn from_nav_link(link: NavLinkId) -> Self {
        match link {
            NavLinkId::Properties => Self::Properties,
            NavLinkId::Clients => Self::Clients,
            NavLinkId::Deals => Self::Deals,
            NavLinkId::Employees => Self::Employees,
            NavLinkId::Reports => Self::Reports,
            NavLinkId::Attendance => Self::Attendance,
            NavLinkId::Calendar => Self::Calendar,
            NavLinkId::MyInterests => Self::MyInterests,
            NavLinkId::MySchedule => Self::MySchedule,
        }
    }

    /// The navigation link that highlights when this screen is active.
    /// Dashboard is the brand destination and chrome screens have their own
    /// keys, so none of those highlight a link.
    pub fn nav_link(self) -> Option<NavLinkId> {
        match self {
            Self::Properties => Some(NavLinkId::Properties),
            Self::Clients => Some(NavLinkId::Clients),
            Self::Deals => Some(NavLinkId::Deals),
            Self::Employees => Some(NavLinkId::Employees),
            Self::Reports => Some(NavLinkId::Reports),
            Self::Attendance => Some(NavLinkId::Attendance),
            Self::Calendar => Some(NavLinkId::Calendar),
            Self::MyInterests => Some(NavLinkId::MyInterests),
            Self::MySchedule => Some(NavLinkId::MySchedule),
            Self::Dashboard | Self::Notifications | Self::Settings => None,
        }
    }

    /// Title shown in the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Properties => "Properties",
            Self::Clients => "Clients",
            Self::Deals => "Deals",
            Self::Employees => "Employees",
            Self::Reports => "Reports",
            Self::Attendance => "Attendance",
            Self::Calendar => "Calendar",
            Self::MyInterests => "My Interests",
            Self::MySchedule => "My Schedule",
            Self::Notifications => "Notifications",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn nav_links_round_trip_through_screens() {
        for link in realty_core::nav::canonical_order() {
            let screen = ScreenId::from_nav_link(link);
            assert_eq!(screen.nav_link(), Some(link));
        }
    }

    #[test]
    fn chrome_screens_highlight_no_link() {
        assert_eq!(ScreenId::Dashboard.nav_link(), None);
        assert_eq!(ScreenId::Notifications.nav_link(), None);
        assert_eq!(ScreenId::Settings.nav_link(), None);
    }
}
