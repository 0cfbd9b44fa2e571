//! Marketing performance reporting — headline aggregation, executive KPIs,
//! funnels and per-date/per-post/per-channel breakdowns.

pub mod aggregator;
pub mod breakdown;
pub mod dashboard;
pub mod filter;
pub mod format;
pub mod funnel;
pub mod kpi;

pub use aggregator::{
    compute_click_through_rate, compute_cost_per_click, compute_cost_per_lead, sum_field,
    summarize, AggregateSummary,
};
pub use dashboard::{DashboardDataset, DashboardOverview};
pub use filter::InsightFilter;
pub use kpi::{executive_kpis, ExecutiveKpis};
