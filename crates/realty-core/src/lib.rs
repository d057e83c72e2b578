//! Domain model and mock data services for the realty terminal dashboard.
//!
//! This crate owns everything the UI consumes that is not presentation:
//!
//! - **Domain model** ([`model`]) — CRM entities (`Client`, `Site`, `Deal`,
//!   `Employee`, `AppNotification`, dashboard aggregates) with the enumerated
//!   statuses the original product defines.
//!
//! - **Navigation catalog** ([`nav`]) — the fixed set of navigation links with
//!   stable ids, role visibility, and the order-reconciliation rule that merges
//!   a user's saved ordering against the compiled-in catalog.
//!
//! - **Appearance model** ([`appearance`]) — the enumerated domains of every
//!   appearance preference (base theme, accent, layout, font, size) and the
//!   record grouping them with their defaults.
//!
//! - **[`Directory`]** — reactive storage built on `Collection<T>`
//!   (`DashMap` + `tokio::sync::watch` channels). Populated from [`MockApi`]
//!   fetches; exposes per-dataset subscriptions and the notification
//!   read-state mutations.
//!
//! - **[`MockApi`]** — the simulated backend: every fetch sleeps for a
//!   configurable latency and returns a static dataset.

pub mod appearance;
pub mod mock;
pub mod model;
pub mod nav;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use appearance::{
    AccentColor, AppearancePreferences, BaseTheme, FontFamily, FontSize, MobileNavLayout,
    NavLayout,
};
pub use mock::MockApi;
pub use nav::{NavLink, NavLinkId};
pub use store::Directory;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AppNotification,
    Building,
    ChangeDirection,
    Client,
    ClientStatus,
    DashboardFeed,
    Deal,
    DealStatus,
    Employee,
    EmployeeRole,
    EmployeeStatus,
    Kpi,
    NotificationKind,
    PipelineStage,
    RecentActivity,
    Role,
    SalesPoint,
    Site,
    Unit,
    UnitStatus,
    UnitType,
};
