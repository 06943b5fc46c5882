use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Prefix for environment overrides, e.g. `SEGMENT_HIGHLIGHT_LOG_LEVEL=debug`
pub const ENV_PREFIX: &str = "SEGMENT_HIGHLIGHT";

/// Front-end settings. The highlight style is fixed and deliberately absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    /// Label file (one class name per line); COCO names when unset
    pub labels: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            labels: None,
        }
    }
}

impl Settings {
    /// Layer an optional TOML file and environment variables over the defaults.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));

        let settings = builder.build()?.try_deserialize::<Settings>()?;
        Ok(settings)
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
