//! Quick shape profile of raw CSV exports, used before running the ETL.

use crate::reader::decode;
use insights_core::error::InsightsResult;
use serde::Serialize;
use std::path::Path;

const SAMPLE_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameProfile {
    pub file_name: String,
    pub rows: usize,
    pub columns: usize,
    pub headers: Vec<String>,
    pub sample: Vec<Vec<String>>,
}

pub fn profile_text(text: &str, file_name: &str) -> InsightsResult<FrameProfile> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = 0usize;
    let mut sample = Vec::new();
    for record in reader.records() {
        let record = record?;
        if sample.len() < SAMPLE_ROWS {
            sample.push(record.iter().map(String::from).collect());
        }
        rows += 1;
    }

    Ok(FrameProfile {
        file_name: file_name.to_string(),
        rows,
        columns: headers.len(),
        headers,
        sample,
    })
}

pub fn profile(path: &Path) -> InsightsResult<FrameProfile> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    profile_text(&decode(&bytes), &file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_counts_rows_and_samples() {
        let csv = "a,b,c\n1,2,3\n4,5,6\n7,8,9\n10,11,12\n";
        let profile = profile_text(csv, "x.csv").unwrap();
        assert_eq!(profile.rows, 4);
        assert_eq!(profile.columns, 3);
        assert_eq!(profile.headers, vec!["a", "b", "c"]);
        assert_eq!(profile.sample.len(), 3);
        assert_eq!(profile.sample[2], vec!["7", "8", "9"]);
    }

    #[test]
    fn test_profile_header_only() {
        let profile = profile_text("reach,impressions\n", "y.csv").unwrap();
        assert_eq!(profile.rows, 0);
        assert!(profile.sample.is_empty());
    }
}
