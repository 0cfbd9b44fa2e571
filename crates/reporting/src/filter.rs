//! Row selection applied before any aggregation.

use chrono::NaiveDate;
use insights_core::error::{InsightsError, InsightsResult};
use insights_core::types::InsightRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightFilter {
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub to: Option<NaiveDate>,
    pub post_id: Option<String>,
}

impl InsightFilter {
    pub fn new(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        post_id: Option<String>,
    ) -> InsightsResult<Self> {
        if let (Some(start), Some(end)) = (from, to) {
            if start > end {
                return Err(InsightsError::Validation(format!(
                    "date range start {start} is after end {end}"
                )));
            }
        }
        let post_id = post_id
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        Ok(Self { from, to, post_id })
    }

    pub fn has_date_range(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn matches(&self, row: &InsightRow) -> bool {
        if self.has_date_range() {
            let Some(date) = row.date else {
                return false;
            };
            if self.from.is_some_and(|start| date < start) {
                return false;
            }
            if self.to.is_some_and(|end| date > end) {
                return false;
            }
        }
        if let Some(needle) = &self.post_id {
            match &row.post_id {
                Some(post) if post.contains(needle.as_str()) => {}
                _ => return false,
            }
        }
        true
    }

    pub fn apply(&self, rows: &[InsightRow]) -> Vec<InsightRow> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
