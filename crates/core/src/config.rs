use crate::error::InsightsResult;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Root configuration. Loaded from an optional TOML file, then from
/// environment variables with the prefix `META_INSIGHTS__`.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_primary_metric")]
    pub primary_metric: String,
    #[serde(default = "default_top_posts_limit")]
    pub top_posts_limit: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_output_file() -> String {
    "final_insights.csv".to_string()
}
fn default_primary_metric() -> String {
    "impressions".to_string()
}
fn default_top_posts_limit() -> usize {
    15
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_file: default_output_file(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            primary_metric: default_primary_metric(),
            top_posts_limit: default_top_posts_limit(),
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl DataConfig {
    /// Path of the unified dataset written by the ETL step.
    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_file)
    }
}

impl InsightsConfig {
    /// Load configuration from an optional config file and the environment.
    /// Environment values win over the file.
    pub fn load(file: Option<&Path>) -> InsightsResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("META_INSIGHTS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Like [`InsightsConfig::load`], but an environment-only load that fails
    /// falls back to defaults. A file named explicitly must load.
    pub fn load_or_default(file: Option<&Path>) -> InsightsResult<Self> {
        match Self::load(file) {
            Ok(config) => Ok(config),
            Err(e) if file.is_none() => {
                warn!(error = %e, "Failed to load config, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InsightsConfig::default();
        assert_eq!(config.data.data_dir, PathBuf::from("data"));
        assert_eq!(config.report.primary_metric, "impressions");
        assert_eq!(config.report.top_posts_limit, 15);
        assert_eq!(
            config.data.output_path(),
            PathBuf::from("data").join("final_insights.csv")
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = std::env::temp_dir().join(format!("insights-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("insights.toml");
        std::fs::write(&path, "[report]\ntop_posts_limit = 5\n").unwrap();

        let config = InsightsConfig::load(Some(&path)).unwrap();
        assert_eq!(config.report.top_posts_limit, 5);
        assert_eq!(config.report.primary_metric, "impressions");
        assert_eq!(config.data.output_file, "final_insights.csv");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let path = std::env::temp_dir().join("insights-config-does-not-exist.toml");
        let err = InsightsConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, crate::InsightsError::Config(_)));
    }

    #[test]
    fn test_named_file_errors_are_not_swallowed() {
        let missing = std::env::temp_dir().join("insights-config-missing-named.toml");
        let err = InsightsConfig::load_or_default(Some(&missing)).unwrap_err();
        assert!(matches!(err, crate::InsightsError::Config(_)));

        let dir = std::env::temp_dir().join(format!(
            "insights-bad-config-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let malformed = dir.join("insights.toml");
        std::fs::write(&malformed, "[report\ntop_posts_limit = ").unwrap();
        assert!(InsightsConfig::load_or_default(Some(&malformed)).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_env_only_load_yields_config() {
        let config = InsightsConfig::load_or_default(None).unwrap();
        assert!(config.report.top_posts_limit > 0);
    }
}
