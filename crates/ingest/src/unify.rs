//! Grouping raw rows into the unified insights dataset.

use crate::reader::RawInsight;
use chrono::NaiveDate;
use insights_core::types::{InsightCounts, InsightRow};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Sum raw rows per `(date, post_id)`, or per date when no row carries a
/// post id. Undated rows are dropped; rows without a post id keep a `None`
/// key when grouping by post. Output is sorted by key.
pub fn build_unified(raw: &[RawInsight]) -> Vec<InsightRow> {
    let by_post = raw.iter().any(|r| r.post_id.is_some());

    let mut groups: BTreeMap<(NaiveDate, Option<String>), InsightCounts> = BTreeMap::new();
    let mut undated = 0usize;
    for row in raw {
        let Some(date) = row.date else {
            undated += 1;
            continue;
        };
        let post_id = if by_post { row.post_id.clone() } else { None };
        groups
            .entry((date, post_id))
            .or_default()
            .add(&row.counts);
    }

    if undated > 0 {
        warn!(undated, "Dropped rows without a parseable date");
    }

    let rows: Vec<InsightRow> = groups
        .into_iter()
        .map(|((date, post_id), counts)| InsightRow::new(Some(date), post_id, counts))
        .collect();
    info!(input = raw.len(), output = rows.len(), by_post, "Built unified dataset");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(day: Option<u32>, post: Option<&str>, impressions: u64, clicks: u64) -> RawInsight {
        RawInsight {
            date: day.and_then(|d| NaiveDate::from_ymd_opt(2025, 1, d)),
            post_id: post.map(String::from),
            counts: InsightCounts {
                impressions,
                link_clicks: clicks,
                ..Default::default()
            },
            source_file: "test.csv".into(),
        }
    }

    #[test]
    fn test_groups_by_date_and_post() {
        let rows = build_unified(&[
            raw(Some(2), Some("b"), 100, 5),
            raw(Some(1), Some("a"), 200, 4),
            raw(Some(2), Some("b"), 300, 15),
            raw(Some(2), Some("a"), 50, 0),
        ]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].post_id.as_deref(), Some("a"));
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 1, 1));
        let merged = &rows[2];
        assert_eq!(merged.post_id.as_deref(), Some("b"));
        assert_eq!(merged.counts.impressions, 400);
        assert_eq!(merged.counts.link_clicks, 20);
        assert!((merged.ctr - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_groups_by_date_without_post_ids() {
        let rows = build_unified(&[
            raw(Some(1), None, 10, 1),
            raw(Some(1), None, 30, 1),
            raw(Some(3), None, 5, 0),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].counts.impressions, 40);
        assert_eq!(rows[0].post_id, None);
    }

    #[test]
    fn test_drops_undated_rows() {
        let rows = build_unified(&[raw(None, None, 10, 1), raw(Some(1), None, 5, 0)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].counts.impressions, 5);
    }

    #[test]
    fn test_post_grouping_keeps_rows_without_post_id() {
        let rows = build_unified(&[
            raw(Some(1), Some("a"), 10, 1),
            raw(Some(1), None, 30, 2),
            raw(Some(1), None, 5, 0),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].post_id, None);
        assert_eq!(rows[0].counts.impressions, 35);
        assert_eq!(rows[1].post_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_unified(&[]).is_empty());
    }
}
