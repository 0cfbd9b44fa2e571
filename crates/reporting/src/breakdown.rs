//! Per-date, per-post and per-channel breakdowns for the dashboard charts.

use crate::aggregator::{compute_cost_per_lead, sum_field};
use crate::format;
use chrono::NaiveDate;
use insights_core::types::{ChannelBreakdown, InsightMetric, InsightRow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostTotal {
    pub post_id: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelShare {
    pub name: String,
    pub leads: u64,
    /// Share of all leads, e.g. `44.1%`.
    pub share: String,
    pub cost_per_lead: String,
    pub color: String,
}

/// Metric summed per date, oldest first. Undated rows are skipped.
pub fn time_series(rows: &[InsightRow], metric: InsightMetric) -> Vec<TimeSeriesPoint> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in rows {
        if let Some(date) = row.date {
            *by_date.entry(date).or_insert(0.0) += metric.value(row);
        }
    }
    by_date
        .into_iter()
        .map(|(date, value)| TimeSeriesPoint { date, value })
        .collect()
}

/// Posts ranked by the summed metric, highest first, at most `limit` entries.
pub fn top_posts(rows: &[InsightRow], metric: InsightMetric, limit: usize) -> Vec<PostTotal> {
    let mut by_post: HashMap<&str, f64> = HashMap::new();
    for row in rows {
        if let Some(post_id) = row.post_id.as_deref() {
            *by_post.entry(post_id).or_insert(0.0) += metric.value(row);
        }
    }
    let mut totals: Vec<PostTotal> = by_post
        .into_iter()
        .map(|(post_id, value)| PostTotal {
            post_id: post_id.to_string(),
            value,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.post_id.cmp(&b.post_id))
    });
    totals.truncate(limit);
    totals
}

/// Each channel's share of total leads and its own cost per lead.
pub fn channel_share(channels: &[ChannelBreakdown]) -> Vec<ChannelShare> {
    let total_leads = sum_field(channels, |c| c.leads);
    channels
        .iter()
        .map(|c| ChannelShare {
            name: c.name.clone(),
            leads: c.leads,
            share: format::percent(Decimal::from(c.leads), Decimal::from(total_leads), 1)
                .unwrap_or_else(|| "0.0%".to_string()),
            cost_per_lead: compute_cost_per_lead(c.spend, c.leads),
            color: c.color.clone(),
        })
        .collect()
}
