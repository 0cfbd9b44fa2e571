//! Campaign performance dashboard — the input dataset and the view built from it.

use crate::aggregator::{summarize, AggregateSummary};
use crate::breakdown::{channel_share, ChannelShare};
use crate::format;
use chrono::{DateTime, NaiveDate, Utc};
use insights_core::error::InsightsResult;
use insights_core::types::{CampaignRecord, CampaignStatus, ChannelBreakdown, DailyRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything the dashboard renders for one reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDataset {
    pub daily: Vec<DailyRecord>,
    #[serde(default)]
    pub campaigns: Vec<CampaignRecord>,
    #[serde(default)]
    pub channels: Vec<ChannelBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCard {
    pub name: String,
    pub objective: String,
    pub status: CampaignStatus,
    pub status_label: String,
    /// Whole-dollar spend, e.g. `$68`.
    pub spend: String,
    pub leads: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub summary: AggregateSummary,
    pub channel_breakdown: Vec<ChannelShare>,
    pub campaigns: Vec<CampaignCard>,
    pub generated_at: DateTime<Utc>,
}

impl DashboardDataset {
    pub fn from_json(json: &str) -> InsightsResult<Self> {
        let dataset: DashboardDataset = serde_json::from_str(json)?;
        info!(
            days = dataset.daily.len(),
            campaigns = dataset.campaigns.len(),
            channels = dataset.channels.len(),
            "Loaded dashboard dataset"
        );
        Ok(dataset)
    }

    pub fn summary(&self) -> AggregateSummary {
        summarize(&self.daily, &self.campaigns)
    }

    pub fn overview(&self) -> DashboardOverview {
        DashboardOverview {
            summary: self.summary(),
            channel_breakdown: channel_share(&self.channels),
            campaigns: self.campaigns.iter().map(CampaignCard::from).collect(),
            generated_at: Utc::now(),
        }
    }

    /// First week of January 2025 for the real-estate account.
    pub fn sample() -> Self {
        let daily = [
            (1, 3200, 5100, 120, 85, dec!(42)),
            (2, 3600, 5600, 132, 96, dec!(47)),
            (3, 3800, 5900, 140, 103, dec!(51)),
            (4, 4100, 6300, 155, 110, dec!(55)),
            (5, 3950, 6100, 147, 101, dec!(52)),
            (6, 4250, 6500, 161, 118, dec!(57)),
            (7, 4450, 6800, 173, 124, dec!(60)),
        ]
        .into_iter()
        .filter_map(|(day, reach, impressions, clicks, visits, spend)| {
            Some(DailyRecord {
                date: NaiveDate::from_ymd_opt(2025, 1, day)?,
                reach,
                impressions,
                clicks,
                visits,
                spend,
            })
        })
        .collect();

        let channels = [
            ("Facebook", 52, dec!(230), "#3b82f6"),
            ("Instagram", 37, dec!(180), "#ec4899"),
            ("WhatsApp", 29, dec!(90), "#10b981"),
        ]
        .into_iter()
        .map(|(name, leads, spend, color)| ChannelBreakdown {
            name: name.to_string(),
            leads,
            spend,
            color: color.to_string(),
        })
        .collect();

        let campaigns = [
            ("T2 Mao Tse Tung", "Leads", CampaignStatus::Active, dec!(68), 19),
            ("T2 Polana Cimento", "Messages", CampaignStatus::Completed, dec!(54), 14),
            ("Flat TP2 Central", "Traffic", CampaignStatus::Completed, dec!(48), 11),
            ("T3 Kings Village", "Leads", CampaignStatus::Completed, dec!(32), 9),
        ]
        .into_iter()
        .map(|(name, objective, status, spend, leads)| CampaignRecord {
            name: name.to_string(),
            objective: objective.to_string(),
            status,
            spend,
            leads,
        })
        .collect();

        Self {
            daily,
            campaigns,
            channels,
        }
    }
}

impl From<&CampaignRecord> for CampaignCard {
    fn from(campaign: &CampaignRecord) -> Self {
        Self {
            name: campaign.name.clone(),
            objective: campaign.objective.clone(),
            status: campaign.status,
            status_label: campaign.status.display_label().to_string(),
            spend: format!("${}", format::fixed(campaign.spend, 0)),
            leads: campaign.leads,
        }
    }
}

/// Total spend across campaigns, for reconciling against daily spend.
pub fn campaign_spend(campaigns: &[CampaignRecord]) -> Decimal {
    crate::aggregator::sum_field(campaigns, |c| c.spend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_summary() {
        let summary = DashboardDataset::sample().summary();
        assert_eq!(summary.total_reach, 27_350);
        assert_eq!(summary.total_impressions, 42_300);
        assert_eq!(summary.total_clicks, 1_028);
        assert_eq!(summary.total_visits, 737);
        assert_eq!(summary.total_spend, dec!(364));
        assert_eq!(summary.total_leads, 53);
        assert_eq!(summary.click_through_rate, "2.4%");
        assert_eq!(summary.cost_per_lead, "$6.87");
        assert_eq!(summary.cost_per_click, "$0.35");
        assert_eq!(summary.spend_display(), "$364.00");
    }

    #[test]
    fn test_campaign_cards() {
        let overview = DashboardDataset::sample().overview();
        assert_eq!(overview.campaigns.len(), 4);
        let first = &overview.campaigns[0];
        assert_eq!(first.status_label, "Ativa");
        assert_eq!(first.spend, "$68");
        assert_eq!(overview.campaigns[1].status_label, "Concluída");
        assert_eq!(overview.channel_breakdown.len(), 3);
    }

    #[test]
    fn test_campaign_spend() {
        assert_eq!(campaign_spend(&DashboardDataset::sample().campaigns), dec!(202));
    }

    #[test]
    fn test_from_json_defaults_missing_sections() {
        let json = r#"{"daily": [{"date": "2025-01-01", "reach": 10, "impressions": 20,
            "clicks": 1, "visits": 1, "spend": "2.50"}]}"#;
        let dataset = DashboardDataset::from_json(json).unwrap();
        assert_eq!(dataset.daily.len(), 1);
        assert!(dataset.campaigns.is_empty());
        let summary = dataset.summary();
        assert_eq!(summary.click_through_rate, "5.0%");
        assert_eq!(summary.cost_per_lead, "$0.00");
        assert_eq!(summary.cost_per_click, "$2.50");
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(DashboardDataset::from_json("{\"daily\": 3}").is_err());
    }
}
