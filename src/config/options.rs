// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use super::consts::*;
use crate::error::{Result, ScrapeError};
use crate::types::SpotId;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    pub fn validate(&self) -> Result<()> {
        self.scrape.validate()
    }
}

/// Where the list of spots comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpotSelector {
    /// Enumerate the listing page at `ScrapeOptions::collection_url`.
    Collection,
    Ids(Vec<SpotId>),
}

/// What to do when a spot's page can't be fetched or parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpotErrorPolicy {
    Abort,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub spots: SpotSelector,
    pub collection_url: String,
    pub spot_url_template: String,
    pub posts_url_template: String,

    pub user_agent: String,
    pub referer: String,
    pub timeout: Duration,
    pub retries: u32,
    pub retry_backoff: Duration,
    pub pause: Duration,

    /// `None` walks the feed until it runs dry.
    pub max_pages: Option<u32>,
    pub per_page_cap: usize,
    pub total_cap: usize,

    pub on_spot_error: SpotErrorPolicy,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            spots: SpotSelector::Collection,
            collection_url: s!(COLLECTION_URL),
            spot_url_template: s!(SPOT_URL_TEMPLATE),
            posts_url_template: s!(POSTS_URL_TEMPLATE),
            user_agent: s!(USER_AGENT),
            referer: s!(REFERER),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            retries: RETRIES,
            retry_backoff: Duration::from_millis(RETRY_BACKOFF_MS),
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
            max_pages: Some(MAX_PAGES),
            per_page_cap: PER_PAGE_CAP,
            total_cap: TOTAL_CAP,
            on_spot_error: SpotErrorPolicy::Abort,
        }
    }
}

impl ScrapeOptions {
    pub fn spot_url(&self, id: &SpotId) -> String {
        self.spot_url_template.replace("{spot_id}", &id.to_string())
    }

    pub fn posts_url(&self, id: &SpotId, page: u32) -> String {
        self.posts_url_template
            .replace("{spot_id}", &id.to_string())
            .replace("{page}", &page.to_string())
    }

    pub fn validate(&self) -> Result<()> {
        if self.per_page_cap == 0 {
            return Err(ScrapeError::Config(s!("per-page cap must be at least 1")));
        }
        if self.total_cap == 0 {
            return Err(ScrapeError::Config(s!("total cap must be at least 1")));
        }
        if self.max_pages == Some(0) {
            return Err(ScrapeError::Config(s!("max pages must be at least 1")));
        }
        if !self.spot_url_template.contains("{spot_id}") {
            return Err(ScrapeError::Config(s!("spot URL template needs {spot_id}")));
        }
        for needle in ["{spot_id}", "{page}"] {
            if !self.posts_url_template.contains(needle) {
                return Err(ScrapeError::Config(format!("posts URL template needs {needle}")));
            }
        }

        let probe = SpotId::Numeric(1);
        check_url(&self.spot_url(&probe))?;
        check_url(&self.posts_url(&probe, 1))?;
        if self.spots == SpotSelector::Collection {
            check_url(&self.collection_url)?;
        }
        if let SpotSelector::Ids(ids) = &self.spots {
            if ids.is_empty() {
                return Err(ScrapeError::Config(s!("spot list is empty")));
            }
        }
        Ok(())
    }
}

fn check_url(raw: &str) -> Result<()> {
    Url::parse(raw)
        .map(|_| ())
        .map_err(|source| ScrapeError::InvalidUrl { url: s!(raw), source })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Table file, or a directory hint (trailing separator) to place `metadata.<ext>` in.
    pub table_path: PathBuf,
    pub image_dir: PathBuf,
    /// Prefix image files with `<spot_id>_<index>_`.
    pub prefix_spot_id: bool,
    /// Skip bodies that don't sniff as an image instead of saving them.
    pub verify_images: bool,
    /// Optional JSONL file of chat-style fine-tuning samples.
    pub conversations: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            table_path: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_TABLE_FILE),
            image_dir: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_IMAGES_SUBDIR),
            prefix_spot_id: true,
            verify_images: false,
            conversations: None,
        }
    }
}
