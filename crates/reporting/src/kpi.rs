//! Executive KPI strip for the unified insights dataset.

use crate::aggregator::sum_field;
use crate::format;
use insights_core::types::InsightRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveKpis {
    pub reach: u64,
    pub impressions: u64,
    pub link_clicks: u64,
    pub engagements: u64,
    /// Mean of the per-row CTR, as a percentage.
    pub avg_ctr: f64,
    /// Mean of the per-row engagement rate, as a percentage.
    pub avg_engagement_rate: f64,
}

/// A labelled KPI value ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

pub fn executive_kpis(rows: &[InsightRow]) -> ExecutiveKpis {
    ExecutiveKpis {
        reach: sum_field(rows, |r| r.counts.reach),
        impressions: sum_field(rows, |r| r.counts.impressions),
        link_clicks: sum_field(rows, |r| r.counts.link_clicks),
        engagements: sum_field(rows, |r| r.counts.engagements),
        avg_ctr: mean(rows.iter().map(|r| r.ctr)) * 100.0,
        avg_engagement_rate: mean(rows.iter().map(|r| r.engagement_rate)) * 100.0,
    }
}

impl ExecutiveKpis {
    pub fn cards(&self) -> Vec<KpiCard> {
        let count = |label: &str, value: u64| KpiCard {
            label: label.to_string(),
            value: format::with_thousands(value),
        };
        let pct = |label: &str, value: f64| KpiCard {
            label: label.to_string(),
            value: format!("{}%", format::with_thousands_f64(value, 2)),
        };
        vec![
            count("Reach", self.reach),
            count("Impressions", self.impressions),
            count("Link Clicks", self.link_clicks),
            count("Engagements", self.engagements),
            pct("Avg CTR", self.avg_ctr),
            pct("Avg Engagement Rate", self.avg_engagement_rate),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::types::InsightCounts;

    fn row(reach: u64, impressions: u64, clicks: u64, engagements: u64) -> InsightRow {
        InsightRow::new(
            None,
            None,
            InsightCounts {
                reach,
                impressions,
                link_clicks: clicks,
                engagements,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_kpis_average_row_ratios() {
        // ctr 0.02 and 0.04, engagement rate 0.1 and 0.3
        let rows = vec![row(1000, 5000, 100, 100), row(500, 2500, 100, 150)];
        let kpis = executive_kpis(&rows);
        assert_eq!(kpis.reach, 1500);
        assert_eq!(kpis.impressions, 7500);
        assert_eq!(kpis.link_clicks, 200);
        assert_eq!(kpis.engagements, 250);
        assert!((kpis.avg_ctr - 3.0).abs() < 1e-9);
        assert!((kpis.avg_engagement_rate - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_kpis_are_zero() {
        let kpis = executive_kpis(&[]);
        assert_eq!(kpis.reach, 0);
        assert_eq!(kpis.avg_ctr, 0.0);
        let cards = kpis.cards();
        assert_eq!(cards[0].value, "0");
        assert_eq!(cards[4].value, "0.00%");
    }

    #[test]
    fn test_cards_are_formatted() {
        let kpis = executive_kpis(&[row(27350, 42300, 1028, 0)]);
        let cards = kpis.cards();
        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0].label, "Reach");
        assert_eq!(cards[0].value, "27,350");
        assert_eq!(cards[1].value, "42,300");
        assert_eq!(cards[4].label, "Avg CTR");
        assert_eq!(cards[4].value, "2.43%");
    }
}
