//! Screen implementations. Each screen is a top-level Component.

pub mod clients;
pub mod dashboard;
pub mod deals;
pub mod employees;
pub mod notifications;
pub mod placeholder;
pub mod properties;
pub mod settings;

use realty_core::Role;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create one component per screen the app can show.
///
/// Role-gated screens are still constructed; the navigation surfaces decide
/// which are reachable for the current viewer. The exhaustive match keeps a
/// new `ScreenId` from shipping without a component behind it.
pub fn create_screens(role: Role) -> Vec<(ScreenId, Box<dyn Component>)> {
    ScreenId::ALL
        .into_iter()
        .map(|id| (id, create_screen(id, role)))
        .collect()
}

fn create_screen(id: ScreenId, role: Role) -> Box<dyn Component> {
    match id {
        ScreenId::Dashboard => Box::new(dashboard::DashboardScreen::new()),
        ScreenId::Properties => Box::new(properties::PropertiesScreen::new()),
        ScreenId::Clients => Box::new(clients::ClientsScreen::new()),
        ScreenId::Deals => Box::new(deals::DealsScreen::new()),
        ScreenId::Employees => Box::new(employees::EmployeesScreen::new()),
        ScreenId::Notifications => Box::new(notifications::NotificationsScreen::new()),
        ScreenId::Settings => Box::new(settings::SettingsScreen::new(role)),
        ScreenId::Reports
        | ScreenId::Attendance
        | ScreenId::Calendar
        | ScreenId::MyInterests
        | ScreenId::MySchedule => Box::new(placeholder::PlaceholderScreen::new(id)),
    }
}
