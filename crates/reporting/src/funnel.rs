//! Funnel summary — reach through to site visits.

use crate::aggregator::sum_field;
use insights_core::types::InsightRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    pub value: u64,
}

/// Reach, Impressions, Link Clicks and Visits, in that order.
pub fn funnel_summary(rows: &[InsightRow]) -> Vec<FunnelStage> {
    let stages: [(&str, fn(&InsightRow) -> u64); 4] = [
        ("Reach", |r| r.counts.reach),
        ("Impressions", |r| r.counts.impressions),
        ("Link Clicks", |r| r.counts.link_clicks),
        ("Visits", |r| r.counts.visits),
    ];
    stages
        .into_iter()
        .map(|(stage, selector)| FunnelStage {
            stage: stage.to_string(),
            value: sum_field(rows, selector),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::types::InsightCounts;

    #[test]
    fn test_funnel_order_and_sums() {
        let counts = InsightCounts {
            reach: 100,
            impressions: 250,
            link_clicks: 12,
            visits: 7,
            ..Default::default()
        };
        let rows = vec![
            InsightRow::new(None, None, counts),
            InsightRow::new(None, None, counts),
        ];
        let funnel = funnel_summary(&rows);
        let names: Vec<_> = funnel.iter().map(|s| s.stage.as_str()).collect();
        assert_eq!(names, vec!["Reach", "Impressions", "Link Clicks", "Visits"]);
        let values: Vec<_> = funnel.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![200, 500, 24, 14]);
    }

    #[test]
    fn test_empty_funnel_is_all_zero() {
        let funnel = funnel_summary(&[]);
        assert_eq!(funnel.len(), 4);
        assert!(funnel.iter().all(|s| s.value == 0));
    }
}
