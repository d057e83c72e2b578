// ── Mock data service ──
//
// Stands in for the backend during development: every fetch waits the
// configured latency, then returns a deterministic fixture dataset.

use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::sleep;

use crate::model::{
    AppNotification, Building, ChangeDirection, Client, ClientStatus, DashboardFeed, Deal,
    DealStatus, Employee, EmployeeRole, EmployeeStatus, Kpi, NotificationKind, PipelineStage,
    RecentActivity, SalesPoint, Site, Unit, UnitStatus, UnitType,
};

/// Simulated backend API with a fixed per-request latency.
#[derive(Debug, Clone)]
pub struct MockApi {
    latency: Duration,
}

impl MockApi {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }

    pub async fn fetch_clients(&self) -> Vec<Client> {
        self.delay().await;
        clients()
    }

    pub async fn fetch_sites(&self) -> Vec<Site> {
        self.delay().await;
        sites()
    }

    pub async fn fetch_deals(&self) -> Vec<Deal> {
        self.delay().await;
        deals()
    }

    pub async fn fetch_employees(&self) -> Vec<Employee> {
        self.delay().await;
        employees()
    }

    pub async fn fetch_notifications(&self) -> Vec<AppNotification> {
        self.delay().await;
        notifications()
    }

    pub async fn fetch_dashboard(&self) -> DashboardFeed {
        self.delay().await;
        dashboard()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn clients() -> Vec<Client> {
    vec![
        Client {
            id: "C001".into(),
            name: "John Doe".into(),
            email: "john.doe@example.com".into(),
            phone: "555-0101".into(),
            status: ClientStatus::Negotiating,
            assigned_agent: "Alice Johnson".into(),
            last_contact: date(2024, 7, 20),
            source: "Referral".into(),
        },
        Client {
            id: "C002".into(),
            name: "Jane Smith".into(),
            email: "jane.smith@example.com".into(),
            phone: "555-0102".into(),
            status: ClientStatus::NewLead,
            assigned_agent: "Bob Williams".into(),
            last_contact: date(2024, 7, 22),
            source: "Website".into(),
        },
        Client {
            id: "C003".into(),
            name: "Michael Brown".into(),
            email: "michael.b@example.com".into(),
            phone: "555-0103".into(),
            status: ClientStatus::SiteVisit,
            assigned_agent: "Alice Johnson".into(),
            last_contact: date(2024, 7, 18),
            source: "Social Media".into(),
        },
        Client {
            id: "C004".into(),
            name: "Emily Davis".into(),
            email: "emily.d@example.com".into(),
            phone: "555-0104".into(),
            status: ClientStatus::Closed,
            assigned_agent: "Charlie Brown".into(),
            last_contact: date(2024, 6, 30),
            source: "Walk-in".into(),
        },
        Client {
            id: "C005".into(),
            name: "David Wilson".into(),
            email: "david.w@example.com".into(),
            phone: "555-0105".into(),
            status: ClientStatus::Contacted,
            assigned_agent: "Bob Williams".into(),
            last_contact: date(2024, 7, 21),
            source: "Referral".into(),
        },
    ]
}

fn sites() -> Vec<Site> {
    vec![
        Site {
            id: "site_1".into(),
            name: "Sunset Villas".into(),
            location: "Addis Ababa, Bole".into(),
            address: "123 Sunshine Avenue".into(),
            buildings: vec![
                Building {
                    id: "bld_1_1".into(),
                    name: "Tower A".into(),
                    floors: 12,
                    units: vec![
                        Unit {
                            id: "unit_1_1_1".into(),
                            name: "Apartment 101".into(),
                            unit_type: UnitType::TwoBedroom,
                            price: 250_000,
                            status: UnitStatus::Available,
                            floor: 1,
                            area_sqm: 120,
                            bedrooms: 2,
                            bathrooms: 2,
                        },
                        Unit {
                            id: "unit_1_1_2".into(),
                            name: "Apartment 102".into(),
                            unit_type: UnitType::Studio,
                            price: 180_000,
                            status: UnitStatus::Rented,
                            floor: 1,
                            area_sqm: 75,
                            bedrooms: 1,
                            bathrooms: 1,
                        },
                        Unit {
                            id: "unit_1_1_3".into(),
                            name: "Penthouse 1201".into(),
                            unit_type: UnitType::Penthouse,
                            price: 750_000,
                            status: UnitStatus::Sold,
                            floor: 12,
                            area_sqm: 350,
                            bedrooms: 4,
                            bathrooms: 5,
                        },
                    ],
                },
                Building {
                    id: "bld_1_2".into(),
                    name: "Tower B".into(),
                    floors: 10,
                    units: vec![
                        Unit {
                            id: "unit_1_2_1".into(),
                            name: "Apartment B-101".into(),
                            unit_type: UnitType::ThreeBedroomPlus,
                            price: 320_000,
                            status: UnitStatus::Available,
                            floor: 1,
                            area_sqm: 150,
                            bedrooms: 3,
                            bathrooms: 2,
                        },
                        Unit {
                            id: "unit_1_2_2".into(),
                            name: "Apartment B-102".into(),
                            unit_type: UnitType::OneBedroom,
                            price: 210_000,
                            status: UnitStatus::UnderMaintenance,
                            floor: 1,
                            area_sqm: 85,
                            bedrooms: 1,
                            bathrooms: 1,
                        },
                    ],
                },
            ],
        },
        Site {
            id: "site_2".into(),
            name: "Bole Commercial Hub".into(),
            location: "Addis Ababa, CMC".into(),
            address: "456 Business Road".into(),
            buildings: vec![Building {
                id: "bld_2_1".into(),
                name: "Main Complex".into(),
                floors: 5,
                units: vec![
                    Unit {
                        id: "unit_2_1_1".into(),
                        name: "Office Suite 205".into(),
                        unit_type: UnitType::Office,
                        price: 50_000,
                        status: UnitStatus::Available,
                        floor: 2,
                        area_sqm: 200,
                        bedrooms: 0,
                        bathrooms: 2,
                    },
                    Unit {
                        id: "unit_2_1_2".into(),
                        name: "Retail Space G-02".into(),
                        unit_type: UnitType::Shop,
                        price: 35_000,
                        status: UnitStatus::Rented,
                        floor: 0,
                        area_sqm: 100,
                        bedrooms: 0,
                        bathrooms: 1,
                    },
                ],
            }],
        },
        // Undeveloped land: no buildings listed yet.
        Site {
            id: "site_3".into(),
            name: "Lakeside Residences".into(),
            location: "Bishoftu".into(),
            address: "789 Waterfront Drive".into(),
            buildings: Vec::new(),
        },
    ]
}

fn deals() -> Vec<Deal> {
    vec![
        Deal {
            id: "D001".into(),
            title: "Downtown Apt Sale".into(),
            client_id: "C001".into(),
            client_name: "John Doe".into(),
            property_title: "Modern Downtown Apartment".into(),
            value: 245_000,
            status: DealStatus::InProgress,
            close_date: date(2024, 8, 15),
        },
        Deal {
            id: "D002".into(),
            title: "High Street Shop Lease".into(),
            client_id: "C004".into(),
            client_name: "Emily Davis".into(),
            property_title: "Retail Shop on High Street".into(),
            value: 36_000,
            status: DealStatus::Completed,
            close_date: date(2024, 7, 1),
        },
        Deal {
            id: "D003".into(),
            title: "Villa Purchase".into(),
            client_id: "C003".into(),
            client_name: "Michael Brown".into(),
            property_title: "Luxury Family Villa".into(),
            value: 730_000,
            status: DealStatus::InProgress,
            close_date: date(2024, 9, 1),
        },
    ]
}

fn employees() -> Vec<Employee> {
    vec![
        Employee {
            id: "E001".into(),
            name: "Alice Johnson".into(),
            role: EmployeeRole::SalesSenior,
            email: "alice.j@recrm.com".into(),
            phone: "555-0201".into(),
            status: EmployeeStatus::Active,
            deals_closed: 12,
            hire_date: date(2020, 3, 15),
        },
        Employee {
            id: "E002".into(),
            name: "Bob Williams".into(),
            role: EmployeeRole::SalesJunior,
            email: "bob.w@recrm.com".into(),
            phone: "555-0202".into(),
            status: EmployeeStatus::Active,
            deals_closed: 5,
            hire_date: date(2022, 8, 1),
        },
        Employee {
            id: "E003".into(),
            name: "Charlie Brown".into(),
            role: EmployeeRole::Manager,
            email: "charlie.b@recrm.com".into(),
            phone: "555-0203".into(),
            status: EmployeeStatus::Active,
            deals_closed: 25,
            hire_date: date(2018, 1, 20),
        },
        Employee {
            id: "E004".into(),
            name: "Diana Prince".into(),
            role: EmployeeRole::Accountant,
            email: "diana.p@recrm.com".into(),
            phone: "555-0204".into(),
            status: EmployeeStatus::OnLeave,
            deals_closed: 0,
            hire_date: date(2021, 5, 10),
        },
        Employee {
            id: "E005".into(),
            name: "Ethan Hunt".into(),
            role: EmployeeRole::It,
            email: "ethan.h@recrm.com".into(),
            phone: "555-0205".into(),
            status: EmployeeStatus::Active,
            deals_closed: 0,
            hire_date: date(2023, 2, 28),
        },
    ]
}

fn notifications() -> Vec<AppNotification> {
    vec![
        AppNotification {
            id: "N001".into(),
            kind: NotificationKind::ClientMessage,
            message: "sent you a message regarding \"Modern Downtown Apartment\".".into(),
            timestamp: "5m ago".into(),
            read: false,
            related_user: Some("John Doe".into()),
        },
        AppNotification {
            id: "N002".into(),
            kind: NotificationKind::NewDeal,
            message: "A new deal \"Villa Purchase\" has been initiated.".into(),
            timestamp: "30m ago".into(),
            read: false,
            related_user: Some("Alice Johnson".into()),
        },
        AppNotification {
            id: "N003".into(),
            kind: NotificationKind::TaskAssigned,
            message: "assigned you a task: \"Follow up with Jane Smith\".".into(),
            timestamp: "2h ago".into(),
            read: false,
            related_user: Some("Charlie Brown".into()),
        },
        AppNotification {
            id: "N004".into(),
            kind: NotificationKind::SystemUpdate,
            message: "The reporting module has been updated with new analytics features.".into(),
            timestamp: "1d ago".into(),
            read: true,
            related_user: None,
        },
        AppNotification {
            id: "N005".into(),
            kind: NotificationKind::TaskAssigned,
            message: "assigned you a task: \"Prepare documents for C004\".".into(),
            timestamp: "2d ago".into(),
            read: true,
            related_user: Some("Charlie Brown".into()),
        },
        AppNotification {
            id: "N006".into(),
            kind: NotificationKind::NewDeal,
            message: "A new deal \"Downtown Apt Sale\" has been initiated.".into(),
            timestamp: "3d ago".into(),
            read: true,
            related_user: Some("Bob Williams".into()),
        },
    ]
}

fn dashboard() -> DashboardFeed {
    DashboardFeed {
        kpis: vec![
            Kpi {
                title: "Total Clients".into(),
                value: "1,286".into(),
                change: Some("+15%".into()),
                direction: Some(ChangeDirection::Increase),
            },
            Kpi {
                title: "New Leads (7 days)".into(),
                value: "84".into(),
                change: Some("+2.1%".into()),
                direction: Some(ChangeDirection::Increase),
            },
            Kpi {
                title: "Deals Closed (30 days)".into(),
                value: "22".into(),
                change: Some("-3.2%".into()),
                direction: Some(ChangeDirection::Decrease),
            },
            Kpi {
                title: "Attendance %".into(),
                value: "98.5%".into(),
                change: None,
                direction: None,
            },
        ],
        activities: vec![
            RecentActivity {
                id: "A001".into(),
                kind: "New Client".into(),
                description: "Jane Smith signed up via Website.".into(),
                timestamp: "2 mins ago".into(),
                user: "System".into(),
            },
            RecentActivity {
                id: "A002".into(),
                kind: "Deal Update".into(),
                description: "Deal for \"Luxury Villa\" moved to Negotiating.".into(),
                timestamp: "15 mins ago".into(),
                user: "Alice Johnson".into(),
            },
            RecentActivity {
                id: "A003".into(),
                kind: "Site Visit".into(),
                description: "Scheduled a visit for Michael Brown.".into(),
                timestamp: "1 hour ago".into(),
                user: "Alice Johnson".into(),
            },
            RecentActivity {
                id: "A004".into(),
                kind: "Task Assigned".into(),
                description: "Follow up with David Wilson assigned to Bob.".into(),
                timestamp: "3 hours ago".into(),
                user: "Charlie Brown".into(),
            },
            RecentActivity {
                id: "A005".into(),
                kind: "New Client".into(),
                description: "Mark Evans added from Referral.".into(),
                timestamp: "8 hours ago".into(),
                user: "Bob Williams".into(),
            },
        ],
        monthly_sales: vec![
            SalesPoint { month: "Jan".into(), sales: 4000 },
            SalesPoint { month: "Feb".into(), sales: 3000 },
            SalesPoint { month: "Mar".into(), sales: 5000 },
            SalesPoint { month: "Apr".into(), sales: 4500 },
            SalesPoint { month: "May".into(), sales: 6000 },
            SalesPoint { month: "Jun".into(), sales: 5500 },
            SalesPoint { month: "Jul".into(), sales: 7000 },
        ],
        pipeline: vec![
            PipelineStage { stage: "Leads".into(), count: 120 },
            PipelineStage { stage: "Contacted".into(), count: 95 },
            PipelineStage { stage: "Site Visit".into(), count: 60 },
            PipelineStage { stage: "Negotiating".into(), count: 45 },
            PipelineStage { stage: "Closed".into(), count: 22 },
        ],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn client_fixture_has_expected_shape() {
        let clients = clients();
        assert_eq!(clients.len(), 5);

        let ids: HashSet<&str> = clients.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(clients[0].status, ClientStatus::Negotiating);
        assert_eq!(clients[1].source, "Website");
    }

    #[test]
    fn site_fixture_spans_developed_and_empty_sites() {
        let sites = sites();
        assert_eq!(sites.len(), 3);

        let total_units: usize = sites.iter().map(Site::unit_count).sum();
        assert_eq!(total_units, 7);

        // Lakeside Residences has no buildings yet.
        assert!(sites[2].buildings.is_empty());
        assert_eq!(sites[2].unit_count(), 0);
    }

    #[test]
    fn deals_reference_fixture_clients() {
        let client_ids: HashSet<String> = clients().into_iter().map(|c| c.id).collect();
        for deal in deals() {
            assert!(client_ids.contains(&deal.client_id), "{}", deal.id);
        }
    }

    #[test]
    fn notification_fixture_has_three_unread() {
        let notifications = notifications();
        assert_eq!(notifications.len(), 6);
        assert_eq!(notifications.iter().filter(|n| !n.read).count(), 3);
        assert!(notifications[3].related_user.is_none());
    }

    #[test]
    fn dashboard_fixture_has_expected_shape() {
        let feed = dashboard();
        assert_eq!(feed.kpis.len(), 4);
        assert_eq!(feed.activities.len(), 5);
        assert_eq!(feed.monthly_sales.len(), 7);
        assert_eq!(feed.pipeline.len(), 5);

        // The attendance KPI carries no trend.
        assert!(feed.kpis[3].change.is_none());
        assert!(feed.kpis[3].direction.is_none());
    }

    #[test]
    fn fetches_resolve_with_zero_latency() {
        let api = MockApi::new(std::time::Duration::ZERO);
        let employees = tokio_test::block_on(api.fetch_employees());
        assert_eq!(employees.len(), 5);
        assert_eq!(employees[4].role.label(), "IT");
    }
}
