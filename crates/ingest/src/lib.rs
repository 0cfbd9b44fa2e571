//! ETL for Meta Business Suite CSV exports: read every export in a data
//! directory, map Portuguese/English headers onto one metric set, and
//! write the unified daily/per-post dataset the reports read.

pub mod normalize;
pub mod profile;
pub mod reader;
pub mod unify;

use insights_core::error::{InsightsError, InsightsResult};
use insights_core::types::InsightRow;
use std::path::{Path, PathBuf};
use tracing::info;

pub use profile::{profile, FrameProfile};
pub use reader::{read_frame, RawInsight};
pub use unify::build_unified;

const UNIFIED_HEADERS: [&str; 16] = [
    "date",
    "post_id",
    "reach",
    "impressions",
    "link_clicks",
    "likes",
    "comments",
    "shares",
    "engagements",
    "views",
    "visits",
    "call_clicks",
    "ctr",
    "engagement_rate",
    "visits_per_click",
    "calls_per_click",
];

/// `*.csv` files in `dir`, sorted by name, excluding `exclude` (the ETL output).
pub fn list_sources(dir: &Path, exclude: &str) -> InsightsResult<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .filter(|p| p.file_name().is_some_and(|n| n != exclude))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Read every source export in `dir`.
pub fn load_all(dir: &Path, exclude: &str) -> InsightsResult<Vec<RawInsight>> {
    let sources = list_sources(dir, exclude)?;
    if sources.is_empty() {
        return Err(InsightsError::NoData(format!(
            "no CSV exports found in {}",
            dir.display()
        )));
    }
    let mut raw = Vec::new();
    for path in &sources {
        raw.extend(read_frame(path)?);
    }
    info!(files = sources.len(), rows = raw.len(), "Loaded all CSV exports");
    Ok(raw)
}

pub fn write_unified<W: std::io::Write>(rows: &[InsightRow], out: W) -> InsightsResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(UNIFIED_HEADERS)?;
    for row in rows {
        let c = &row.counts;
        let mut record = vec![
            row.date.map(|d| d.to_string()).unwrap_or_default(),
            row.post_id.clone().unwrap_or_default(),
        ];
        record.extend(
            [
                c.reach,
                c.impressions,
                c.link_clicks,
                c.likes,
                c.comments,
                c.shares,
                c.engagements,
                c.views,
                c.visits,
                c.call_clicks,
            ]
            .iter()
            .map(u64::to_string),
        );
        record.extend(
            [
                row.ctr,
                row.engagement_rate,
                row.visits_per_click,
                row.calls_per_click,
            ]
            .iter()
            .map(f64::to_string),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a unified dataset back. Ratios are re-derived from the counts.
pub fn read_unified(path: &Path) -> InsightsResult<Vec<InsightRow>> {
    let rows: Vec<InsightRow> = read_frame(path)?
        .into_iter()
        .map(|r| InsightRow::new(r.date, r.post_id, r.counts))
        .collect();
    info!(path = %path.display(), rows = rows.len(), "Read unified dataset");
    Ok(rows)
}

/// Full ETL pass: load `dir`, unify, write to `dir/output_file`.
pub fn run_etl(dir: &Path, output_file: &str) -> InsightsResult<(PathBuf, usize)> {
    let raw = load_all(dir, output_file)?;
    let unified = build_unified(&raw);
    let out_path = dir.join(output_file);
    let file = std::fs::File::create(&out_path)?;
    write_unified(&unified, std::io::BufWriter::new(file))?;
    info!(path = %out_path.display(), rows = unified.len(), "Wrote unified dataset");
    Ok((out_path, unified.len()))
}
