use crate::error::{InsightsError, InsightsResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One calendar day of paid-media activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Unique people reached.
    pub reach: u64,
    pub impressions: u64,
    pub clicks: u64,
    pub visits: u64,
    pub spend: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignStatus {
    Active,
    Completed,
}

impl CampaignStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, CampaignStatus::Active)
    }

    /// Badge label shown next to the campaign on the dashboard.
    pub fn display_label(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Ativa",
            CampaignStatus::Completed => "Concluída",
        }
    }
}

/// One campaign line item for the reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub name: String,
    pub objective: String,
    pub status: CampaignStatus,
    pub spend: Decimal,
    pub leads: u64,
}

/// Leads and spend attributed to a single acquisition channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelBreakdown {
    pub name: String,
    pub leads: u64,
    pub spend: Decimal,
    /// Hex color used by the chart legend.
    pub color: String,
}

/// Summed engagement counts for one unified row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightCounts {
    pub reach: u64,
    pub impressions: u64,
    pub link_clicks: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub engagements: u64,
    pub views: u64,
    pub visits: u64,
    pub call_clicks: u64,
}

impl InsightCounts {
    pub fn add(&mut self, other: &InsightCounts) {
        self.reach += other.reach;
        self.impressions += other.impressions;
        self.link_clicks += other.link_clicks;
        self.likes += other.likes;
        self.comments += other.comments;
        self.shares += other.shares;
        self.engagements += other.engagements;
        self.views += other.views;
        self.visits += other.visits;
        self.call_clicks += other.call_clicks;
    }
}

/// A row of the unified insights dataset, keyed by date and optionally by post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRow {
    pub date: Option<NaiveDate>,
    pub post_id: Option<String>,
    pub counts: InsightCounts,
    pub ctr: f64,
    pub engagement_rate: f64,
    pub visits_per_click: f64,
    pub calls_per_click: f64,
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

impl InsightRow {
    /// Build a row and derive its ratios. Zero denominators yield 0.0.
    pub fn new(date: Option<NaiveDate>, post_id: Option<String>, counts: InsightCounts) -> Self {
        Self {
            date,
            post_id,
            ctr: ratio(counts.link_clicks, counts.impressions),
            engagement_rate: ratio(counts.engagements, counts.reach),
            visits_per_click: ratio(counts.visits, counts.link_clicks),
            calls_per_click: ratio(counts.call_clicks, counts.link_clicks),
            counts,
        }
    }
}

/// Metrics selectable for time series and top-post breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightMetric {
    Impressions,
    Reach,
    LinkClicks,
    Engagements,
    Views,
    Visits,
    Ctr,
    EngagementRate,
    VisitsPerClick,
}

impl InsightMetric {
    pub const ALL: [InsightMetric; 9] = [
        InsightMetric::Impressions,
        InsightMetric::Reach,
        InsightMetric::LinkClicks,
        InsightMetric::Engagements,
        InsightMetric::Views,
        InsightMetric::Visits,
        InsightMetric::Ctr,
        InsightMetric::EngagementRate,
        InsightMetric::VisitsPerClick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightMetric::Impressions => "impressions",
            InsightMetric::Reach => "reach",
            InsightMetric::LinkClicks => "link_clicks",
            InsightMetric::Engagements => "engagements",
            InsightMetric::Views => "views",
            InsightMetric::Visits => "visits",
            InsightMetric::Ctr => "ctr",
            InsightMetric::EngagementRate => "engagement_rate",
            InsightMetric::VisitsPerClick => "visits_per_click",
        }
    }

    pub fn value(&self, row: &InsightRow) -> f64 {
        match self {
            InsightMetric::Impressions => row.counts.impressions as f64,
            InsightMetric::Reach => row.counts.reach as f64,
            InsightMetric::LinkClicks => row.counts.link_clicks as f64,
            InsightMetric::Engagements => row.counts.engagements as f64,
            InsightMetric::Views => row.counts.views as f64,
            InsightMetric::Visits => row.counts.visits as f64,
            InsightMetric::Ctr => row.ctr,
            InsightMetric::EngagementRate => row.engagement_rate,
            InsightMetric::VisitsPerClick => row.visits_per_click,
        }
    }
}

impl fmt::Display for InsightMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightMetric {
    type Err = InsightsError;

    fn from_str(s: &str) -> InsightsResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        InsightMetric::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| InsightsError::Validation(format!("unknown metric: {s}")))
    }
}
