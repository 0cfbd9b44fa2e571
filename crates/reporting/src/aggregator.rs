//! Headline metrics aggregation for the dashboard header cards.
//!
//! All functions are pure: no shared state, no I/O, and the same input
//! always renders the same strings. Counts are unsigned so they cannot go
//! negative; spend is taken as given, including negative amounts.

use crate::format;
use insights_core::types::{CampaignRecord, DailyRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use tracing::debug;

pub const CTR_ZERO: &str = "0.0%";
pub const CPL_ZERO: &str = "$0.00";
pub const CPC_ZERO: &str = "0";

/// Totals and derived ratios for one reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub total_reach: u64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub total_visits: u64,
    pub total_spend: Decimal,
    pub total_leads: u64,
    pub click_through_rate: String,
    pub cost_per_lead: String,
    pub cost_per_click: String,
}

impl AggregateSummary {
    /// Spend as shown on the investment card, e.g. `$364.00`.
    pub fn spend_display(&self) -> String {
        format::currency(self.total_spend)
    }
}

/// Sum a field across `records`. An empty slice sums to the zero of `N`.
pub fn sum_field<T, N, F>(records: &[T], selector: F) -> N
where
    F: Fn(&T) -> N,
    N: Sum<N>,
{
    records.iter().map(selector).sum()
}

/// Clicks over impressions as a percentage with one decimal, e.g. `2.4%`.
pub fn compute_click_through_rate(total_clicks: u64, total_impressions: u64) -> String {
    format::percent(
        Decimal::from(total_clicks),
        Decimal::from(total_impressions),
        1,
    )
    .unwrap_or_else(|| CTR_ZERO.to_string())
}

/// Spend per lead in dollars with two decimals, e.g. `$3.70`.
pub fn compute_cost_per_lead(total_spend: Decimal, total_leads: u64) -> String {
    if total_leads == 0 {
        return CPL_ZERO.to_string();
    }
    format::currency(total_spend / Decimal::from(total_leads))
}

/// Spend per click in dollars with two decimals. Zero clicks render as a bare `0`.
pub fn compute_cost_per_click(total_spend: Decimal, total_clicks: u64) -> String {
    if total_clicks == 0 {
        return CPC_ZERO.to_string();
    }
    format::currency(total_spend / Decimal::from(total_clicks))
}

pub fn summarize(daily: &[DailyRecord], campaigns: &[CampaignRecord]) -> AggregateSummary {
    let total_reach = sum_field(daily, |d| d.reach);
    let total_impressions = sum_field(daily, |d| d.impressions);
    let total_clicks = sum_field(daily, |d| d.clicks);
    let total_visits = sum_field(daily, |d| d.visits);
    let total_spend = sum_field(daily, |d| d.spend);
    let total_leads = sum_field(campaigns, |c| c.leads);

    debug!(
        days = daily.len(),
        campaigns = campaigns.len(),
        total_impressions,
        total_leads,
        "Aggregated dashboard totals"
    );

    AggregateSummary {
        total_reach,
        total_impressions,
        total_clicks,
        total_visits,
        total_spend,
        total_leads,
        click_through_rate: compute_click_through_rate(total_clicks, total_impressions),
        cost_per_lead: compute_cost_per_lead(total_spend, total_leads),
        cost_per_click: compute_cost_per_click(total_spend, total_clicks),
    }
}
