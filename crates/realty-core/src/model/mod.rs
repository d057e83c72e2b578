// ── Domain model ──

pub mod client;
pub mod dashboard;
pub mod deal;
pub mod employee;
pub mod notification;
pub mod property;
pub mod role;

pub use client::{Client, ClientStatus};
pub use dashboard::{ChangeDirection, DashboardFeed, Kpi, PipelineStage, RecentActivity, SalesPoint};
pub use deal::{Deal, DealStatus};
pub use employee::{Employee, EmployeeRole, EmployeeStatus};
pub use notification::{AppNotification, NotificationKind};
pub use property::{Building, Site, Unit, UnitStatus, UnitType};
pub use role::Role;
