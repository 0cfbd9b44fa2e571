//! CSV frame reader: decodes an export, maps its columns onto the unified
//! metric set and yields one raw row per CSV record.

use crate::normalize::{find_date_column, normalize_column_name, parse_count, parse_date};
use chrono::NaiveDate;
use insights_core::error::{InsightsError, InsightsResult};
use insights_core::types::InsightCounts;
use std::path::Path;
use tracing::{debug, info, warn};

const POST_ID_ALIASES: &[&str] = &[
    "post_id",
    "id",
    "publicacao",
    "publicacao_id",
    "publicacoe_id",
    "post",
    "postagem",
    "permalink",
    "link",
];

const REACH: &[&str] = &["reach", "alcance"];
const IMPRESSIONS: &[&str] = &[
    "impressions",
    "impressoes",
    "impressoes_totais",
    "impressoes_total",
    "impressoes_totais_de_conteudo",
];
const LINK_CLICKS: &[&str] = &[
    "link_clicks",
    "cliques_em_ligacoes",
    "cliques_no_link",
    "cliques_em_links",
];
const LIKES: &[&str] = &[
    "likes",
    "gostos",
    "curtidas",
    "reacoes",
    "reactions_total",
    "reactions",
];
const COMMENTS: &[&str] = &["comments", "comentarios"];
const SHARES: &[&str] = &["shares", "partilhas", "compartilhamentos"];
const ENGAGEMENTS: &[&str] = &[
    "engagement",
    "engagements",
    "interacoes",
    "interacao",
    "interacoes_totais",
];
const VIEWS: &[&str] = &[
    "views",
    "visualizacoes",
    "visualizacoes_de_video",
    "video_views",
    "visualizacoes_totais",
];
const VISITS: &[&str] = &[
    "visits",
    "visitas",
    "sessao",
    "sessoes",
    "sessions",
    "users",
    "utilizadores",
];
const CALL_CLICKS: &[&str] = &[
    "ligacoes_em_cliques",
    "cliques_em_ligacoes_para_chamada",
    "call_clicks",
];

/// One CSV record mapped onto the unified metric set.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInsight {
    pub date: Option<NaiveDate>,
    pub post_id: Option<String>,
    pub counts: InsightCounts,
    pub source_file: String,
}

/// Resolved column positions for one CSV header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub post_id: Option<usize>,
    pub reach: Option<usize>,
    pub impressions: Option<usize>,
    pub link_clicks: Option<usize>,
    pub likes: Option<usize>,
    pub comments: Option<usize>,
    pub shares: Option<usize>,
    pub engagements: Option<usize>,
    pub views: Option<usize>,
    pub visits: Option<usize>,
    pub call_clicks: Option<usize>,
}

fn pick(headers: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
}

impl ColumnMap {
    /// Resolve columns from normalized headers. The first alias present wins.
    pub fn resolve(headers: &[String]) -> Self {
        Self {
            date: find_date_column(headers),
            post_id: pick(headers, POST_ID_ALIASES),
            reach: pick(headers, REACH),
            impressions: pick(headers, IMPRESSIONS),
            link_clicks: pick(headers, LINK_CLICKS),
            likes: pick(headers, LIKES),
            comments: pick(headers, COMMENTS),
            shares: pick(headers, SHARES),
            engagements: pick(headers, ENGAGEMENTS),
            views: pick(headers, VIEWS),
            visits: pick(headers, VISITS),
            call_clicks: pick(headers, CALL_CLICKS),
        }
    }

    fn count(record: &csv::StringRecord, column: Option<usize>) -> u64 {
        column
            .and_then(|i| record.get(i))
            .map(parse_count)
            .unwrap_or(0)
    }

    fn counts(&self, record: &csv::StringRecord) -> InsightCounts {
        InsightCounts {
            reach: Self::count(record, self.reach),
            impressions: Self::count(record, self.impressions),
            link_clicks: Self::count(record, self.link_clicks),
            likes: Self::count(record, self.likes),
            comments: Self::count(record, self.comments),
            shares: Self::count(record, self.shares),
            engagements: Self::count(record, self.engagements),
            views: Self::count(record, self.views),
            visits: Self::count(record, self.visits),
            call_clicks: Self::count(record, self.call_clicks),
        }
    }
}

/// Decode raw bytes as UTF-8 (BOM stripped), or as Latin-1 when they are not valid UTF-8.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.trim_start_matches('\u{FEFF}').to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parse an already-decoded CSV export.
pub fn parse_frame(text: &str, source_file: &str) -> InsightsResult<Vec<RawInsight>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_column_name)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(InsightsError::Ingest(format!(
            "{source_file}: no usable header row"
        )));
    }

    let columns = ColumnMap::resolve(&headers);
    debug!(source_file, ?headers, ?columns, "Resolved CSV columns");
    if columns.date.is_none() {
        warn!(source_file, "No date column found, rows will be undated");
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(source_file, error = %e, "Skipping malformed CSV record");
                skipped += 1;
                continue;
            }
        };
        let date = columns.date.and_then(|i| record.get(i)).and_then(parse_date);
        let post_id = columns
            .post_id
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from);
        rows.push(RawInsight {
            date,
            post_id,
            counts: columns.counts(&record),
            source_file: source_file.to_string(),
        });
    }

    info!(source_file, rows = rows.len(), skipped, "Loaded CSV frame");
    Ok(rows)
}

/// Read and parse one CSV file.
pub fn read_frame(path: &Path) -> InsightsResult<Vec<RawInsight>> {
    let bytes = std::fs::read(path)?;
    let source_file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_frame(&decode(&bytes), &source_file)
}
