// ── Dashboard aggregate types ──

use serde::{Deserialize, Serialize};

/// Direction of a KPI period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeDirection {
    Increase,
    Decrease,
}

/// A headline metric card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpi {
    pub title: String,
    /// Pre-formatted display value ("1,286", "98.5%").
    pub value: String,
    /// Pre-formatted change ("+15%"), absent when the metric has no trend.
    pub change: Option<String>,
    pub direction: Option<ChangeDirection>,
}

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentActivity {
    pub id: String,
    /// Event category ("New Client", "Deal Update", ...).
    pub kind: String,
    pub description: String,
    /// Relative display timestamp ("2 mins ago").
    pub timestamp: String,
    pub user: String,
}

/// Monthly sales figure for the sales chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesPoint {
    pub month: String,
    pub sales: u64,
}

/// One stage of the deal pipeline funnel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStage {
    pub stage: String,
    pub count: u32,
}

/// Everything the dashboard screen consumes, delivered as one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardFeed {
    pub kpis: Vec<Kpi>,
    pub activities: Vec<RecentActivity>,
    pub monthly_sales: Vec<SalesPoint>,
    pub pipeline: Vec<PipelineStage>,
}
