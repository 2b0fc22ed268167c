// src/config/file.rs
//! Optional TOML config. Every key is optional; present keys override the
//! built-in defaults and are themselves overridden by command-line flags.
//!
//! ```toml
//! [scrape]
//! spots = [78625, 85532]
//! max_pages = 5
//! per_page_cap = 3
//! total_cap = 15
//! skip_failed_spots = true
//!
//! [export]
//! table = "goshuin/metadata.csv"
//! images = "goshuin/train"
//! ```
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::options::{AppOptions, ExportFormat, SpotErrorPolicy, SpotSelector};
use crate::error::{Result, ScrapeError};
use crate::types::SpotId;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub scrape: ScrapeSection,
    pub export: ExportSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeSection {
    pub spots: Option<Vec<SpotId>>,
    pub collection_url: Option<String>,
    pub spot_url_template: Option<String>,
    pub posts_url_template: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
    pub retry_backoff_ms: Option<u64>,
    pub pause_ms: Option<u64>,
    /// 0 disables the page limit.
    pub max_pages: Option<u32>,
    pub per_page_cap: Option<usize>,
    pub total_cap: Option<usize>,
    pub skip_failed_spots: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSection {
    /// "csv" or "tsv"
    pub format: Option<String>,
    pub table: Option<PathBuf>,
    pub images: Option<PathBuf>,
    pub prefix_spot_id: Option<bool>,
    pub verify_images: Option<bool>,
    pub conversations: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ScrapeError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&text).map_err(|e| match e {
            ScrapeError::Config(message) => ScrapeError::ConfigFile { path: path.to_path_buf(), message },
            other => other,
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ScrapeError::Config(e.to_string()))
    }

    pub fn apply(self, opts: &mut AppOptions) -> Result<()> {
        let s = self.scrape;
        let scrape = &mut opts.scrape;

        if let Some(ids) = s.spots { scrape.spots = SpotSelector::Ids(ids); }
        if let Some(v) = s.collection_url { scrape.collection_url = v; }
        if let Some(v) = s.spot_url_template { scrape.spot_url_template = v; }
        if let Some(v) = s.posts_url_template { scrape.posts_url_template = v; }
        if let Some(v) = s.user_agent { scrape.user_agent = v; }
        if let Some(v) = s.referer { scrape.referer = v; }
        if let Some(v) = s.timeout_secs { scrape.timeout = Duration::from_secs(v); }
        if let Some(v) = s.retries { scrape.retries = v; }
        if let Some(v) = s.retry_backoff_ms { scrape.retry_backoff = Duration::from_millis(v); }
        if let Some(v) = s.pause_ms { scrape.pause = Duration::from_millis(v); }
        if let Some(v) = s.max_pages { scrape.max_pages = (v > 0).then_some(v); }
        if let Some(v) = s.per_page_cap { scrape.per_page_cap = v; }
        if let Some(v) = s.total_cap { scrape.total_cap = v; }
        if let Some(skip) = s.skip_failed_spots {
            scrape.on_spot_error = if skip { SpotErrorPolicy::Skip } else { SpotErrorPolicy::Abort };
        }

        let e = self.export;
        let export = &mut opts.export;

        if let Some(f) = e.format { export.format = parse_format(&f)?; }
        if let Some(v) = e.table { export.table_path = v; }
        if let Some(v) = e.images { export.image_dir = v; }
        if let Some(v) = e.prefix_spot_id { export.prefix_spot_id = v; }
        if let Some(v) = e.verify_images { export.verify_images = v; }
        if let Some(v) = e.conversations { export.conversations = Some(v); }

        Ok(())
    }
}

pub fn parse_format(s: &str) -> Result<ExportFormat> {
    match s.to_ascii_lowercase().as_str() {
        "csv" => Ok(ExportFormat::Csv),
        "tsv" => Ok(ExportFormat::Tsv),
        other => Err(ScrapeError::Config(format!("unknown format: {other}"))),
    }
}
