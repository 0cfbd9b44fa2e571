//! Header normalization and value coercion for Meta Business Suite exports.
//!
//! Exports arrive with Portuguese or English headers, accents, `%` signs
//! and mixed punctuation. Every header is reduced to a snake_case ASCII key
//! before lookup.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use deunicode::deunicode;

/// `"Impressões (%)"` → `"impressoes_pct"`.
pub fn normalize_column_name(raw: &str) -> String {
    // Drop combining marks so NFD input folds the same as NFC.
    let composed: String = raw
        .chars()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect();
    let folded = deunicode(&composed);
    let lowered = folded.trim().to_lowercase().replace('%', "pct");

    let mut out = String::with_capacity(lowered.len());
    let mut pending_sep = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

const DATE_KEYS: [&str; 5] = ["data", "date", "time", "dia", "created"];

/// Index of the first header that looks like a date column.
pub fn find_date_column(headers: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|h| DATE_KEYS.iter().any(|k| h.contains(k)))
}

/// Parse the date part of an export cell. Ambiguous slash dates are read
/// month-first, falling back to day-first when that is not a valid date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.date_naive());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Numeric cell with `,` thousands separators removed. Blank or garbage is 0.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Count cell, truncated toward zero and clamped at zero.
pub fn parse_count(raw: &str) -> u64 {
    let value = parse_number(raw);
    if value > 0.0 {
        value as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_portuguese_headers() {
        assert_eq!(normalize_column_name("Interação"), "interacao");
        assert_eq!(normalize_column_name("  Impressões totais "), "impressoes_totais");
        assert_eq!(normalize_column_name("Cliques em ligações"), "cliques_em_ligacoes");
        assert_eq!(normalize_column_name("CTR (%)"), "ctr_pct");
        assert_eq!(normalize_column_name("Data de início"), "data_de_inicio");
        assert_eq!(normalize_column_name("__Post--ID__"), "post_id");
        assert_eq!(normalize_column_name("???"), "");
    }

    #[test]
    fn test_normalize_decomposed_and_ordinal_headers() {
        // NFD: "o" followed by a combining tilde
        assert_eq!(normalize_column_name("Impresso\u{0303}es"), "impressoes");
        assert_eq!(normalize_column_name("Interac\u{0327}a\u{0303}o"), "interacao");
        assert_eq!(normalize_column_name("N.º cliques"), "n_o_cliques");
    }

    #[test]
    fn test_find_date_column() {
        let headers: Vec<String> = ["post_id", "alcance", "data", "date"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(find_date_column(&headers), Some(2));
        let none: Vec<String> = vec!["reach".into(), "impressions".into()];
        assert_eq!(find_date_column(&none), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let jan2 = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(parse_date("2025-01-02"), Some(jan2));
        assert_eq!(parse_date("2025/01/02"), Some(jan2));
        assert_eq!(parse_date("01/02/2025"), Some(jan2));
        assert_eq!(parse_date("2025-01-02T08:00:00+0000"), Some(jan2));
        assert_eq!(parse_date("2025-01-02T08:00:00Z"), Some(jan2));
        assert_eq!(parse_date("2025-01-02 08:00:00"), Some(jan2));
        assert_eq!(
            parse_date("25/01/2025"),
            NaiveDate::from_ymd_opt(2025, 1, 25)
        );
        assert_eq!(parse_date("01/02/2025 08:00"), Some(jan2));
        assert_eq!(parse_date("01/02/2025 08:00:30"), Some(jan2));
        assert_eq!(parse_date("1/2/2025"), Some(jan2));
        assert_eq!(
            parse_date("25/01/2025 17:45"),
            NaiveDate::from_ymd_opt(2025, 1, 25)
        );
        assert_eq!(
            parse_date("25/01/2025 17:45:10"),
            NaiveDate::from_ymd_opt(2025, 1, 25)
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("Lifetime"), None);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_number("1,234"), 1234.0);
        assert_eq!(parse_number(" 12.5 "), 12.5);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("n/a"), 0.0);
        assert_eq!(parse_count("12.9"), 12);
        assert_eq!(parse_count("-4"), 0);
        assert_eq!(parse_count("NaN"), 0);
    }
}
