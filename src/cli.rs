// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::config::{AppOptions, ConfigFile, SpotErrorPolicy, SpotSelector};
use crate::config::file::parse_format;
use crate::core::HttpClient;
use crate::log::{self, BarWriter, Verbosity};
use crate::progress::Progress;
use crate::runner;
use crate::types::SpotId;

#[derive(Parser, Debug)]
#[command(author, version, about = "Collect goshuin images and spot metadata into a fine-tuning dataset", long_about = None)]
pub struct Args {
    /// TOML file with defaults; flags override it
    #[arg(short, long, env = "GOSHUIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listing page to enumerate spot ids from
    #[arg(long, env = "GOSHUIN_COLLECTION_URL")]
    pub collection_url: Option<String>,

    /// Process these spot ids instead of the listing (repeatable)
    #[arg(short, long = "spot", value_name = "ID", value_parser = parse_spot_id)]
    pub spots: Vec<SpotId>,

    /// Print the enumerated spot ids and exit
    #[arg(long)]
    pub list_spots: bool,

    /// Stop after this many feed pages per spot
    #[arg(long, conflicts_with = "no_page_limit")]
    pub max_pages: Option<u32>,

    /// Walk each feed until it runs dry
    #[arg(long)]
    pub no_page_limit: bool,

    /// Images taken from a single feed page
    #[arg(long = "per-page", value_name = "N")]
    pub per_page_cap: Option<usize>,

    /// Images taken per spot in total
    #[arg(long = "max-posts", value_name = "N")]
    pub total_cap: Option<usize>,

    /// Dataset table path (a trailing '/' means "directory")
    #[arg(short, long, env = "GOSHUIN_OUT")]
    pub out: Option<PathBuf>,

    /// Image directory
    #[arg(long, env = "GOSHUIN_IMAGES")]
    pub images: Option<PathBuf>,

    /// Table format: csv or tsv
    #[arg(long)]
    pub format: Option<String>,

    /// Don't prefix image files with <spot_id>_<index>_
    #[arg(long)]
    pub no_prefix: bool,

    /// Log and skip spots whose page can't be read instead of aborting
    #[arg(long)]
    pub skip_failed_spots: bool,

    /// Skip downloads whose bytes aren't a recognised image format
    #[arg(long)]
    pub verify_images: bool,

    /// Also write chat-style fine-tuning samples (JSON Lines)
    #[arg(long, value_name = "PATH")]
    pub conversations: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Extra attempts for a feed page after a network error, 429 or 5xx
    #[arg(long)]
    pub retries: Option<u32>,

    /// Pause before every request, in milliseconds
    #[arg(long, value_name = "MS")]
    pub pause_ms: Option<u64>,

    #[arg(long, env = "GOSHUIN_USER_AGENT")]
    pub user_agent: Option<String>,

    #[arg(long, env = "GOSHUIN_REFERER")]
    pub referer: Option<String>,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_spot_id(s: &str) -> std::result::Result<SpotId, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(s!("spot id can't be empty"));
    }
    Ok(SpotId::parse(s))
}

impl Args {
    /// Layer flags over `opts` (defaults, possibly already merged with a config file).
    pub fn apply(&self, opts: &mut AppOptions) -> crate::error::Result<()> {
        let scrape = &mut opts.scrape;
        if !self.spots.is_empty() { scrape.spots = SpotSelector::Ids(self.spots.clone()); }
        if let Some(v) = &self.collection_url {
            scrape.collection_url = v.clone();
            if self.spots.is_empty() { scrape.spots = SpotSelector::Collection; }
        }
        if self.no_page_limit { scrape.max_pages = None; }
        if let Some(v) = self.max_pages { scrape.max_pages = Some(v); }
        if let Some(v) = self.per_page_cap { scrape.per_page_cap = v; }
        if let Some(v) = self.total_cap { scrape.total_cap = v; }
        if self.skip_failed_spots { scrape.on_spot_error = SpotErrorPolicy::Skip; }
        if let Some(v) = self.timeout { scrape.timeout = Duration::from_secs(v); }
        if let Some(v) = self.retries { scrape.retries = v; }
        if let Some(v) = self.pause_ms { scrape.pause = Duration::from_millis(v); }
        if let Some(v) = &self.user_agent { scrape.user_agent = v.clone(); }
        if let Some(v) = &self.referer { scrape.referer = v.clone(); }

        let export = &mut opts.export;
        if let Some(v) = &self.out { export.table_path = v.clone(); }
        if let Some(v) = &self.images { export.image_dir = v.clone(); }
        if let Some(v) = &self.format { export.format = parse_format(v)?; }
        if self.no_prefix { export.prefix_spot_id = false; }
        if self.verify_images { export.verify_images = true; }
        if let Some(v) = &self.conversations { export.conversations = Some(v.clone()); }
        Ok(())
    }

    /// Defaults → config file → flags.
    pub fn options(&self) -> crate::error::Result<AppOptions> {
        let mut opts = AppOptions::default();
        if let Some(path) = &self.config {
            ConfigFile::load(path)?.apply(&mut opts)?;
        }
        self.apply(&mut opts)?;
        opts.validate()?;
        Ok(opts)
    }
}

/// Progress bar on stderr, one tick per spot. Hidden until `begin`.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::hidden();
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} spots {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }

    /// Handle for [`BarWriter`]; log lines printed through it don't tear the bar.
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn begin(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
    }

    fn log(&mut self, msg: &str) {
        self.bar.println(msg);
    }

    fn item_done(&mut self, id: &SpotId, images: usize) {
        self.bar.set_message(format!("{id}: {images} images"));
        self.bar.inc(1);
    }

    fn item_failed(&mut self, id: &SpotId, reason: &str) {
        self.bar.println(format!("spot {id} skipped: {reason}"));
        self.bar.inc(1);
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut progress = BarProgress::new();
    log::init(
        Verbosity::from_flags(args.verbose, args.quiet),
        BarWriter::stderr(progress.bar()),
    );

    let opts = args.options().wrap_err("invalid options")?;
    let client = HttpClient::new(&opts.scrape)?;

    if args.list_spots {
        for id in runner::resolve_spots(&opts, &client)? {
            println!("{id}");
        }
        return Ok(());
    }

    let summary = runner::run(&opts, &client, Some(&mut progress))?;

    println!(
        "{} rows, {}/{} images, {} of {} spots skipped",
        summary.rows_written,
        summary.images_written,
        summary.images_found,
        summary.spots_skipped,
        summary.spots_seen
    );
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportFormat;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("goshuin_scrape").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_without_flags() {
        let opts = parse(&[]).options().unwrap();
        assert_eq!(opts, AppOptions::default());
    }

    #[test]
    fn explicit_spots_and_caps() {
        let opts = parse(&["--spot", "78625", "-s", "kannon", "--per-page", "2", "--max-posts", "4", "--no-page-limit"])
            .options()
            .unwrap();
        assert_eq!(
            opts.scrape.spots,
            SpotSelector::Ids(vec![SpotId::Numeric(78625), SpotId::Named(s!("kannon"))])
        );
        assert_eq!(opts.scrape.per_page_cap, 2);
        assert_eq!(opts.scrape.total_cap, 4);
        assert_eq!(opts.scrape.max_pages, None);
    }

    #[test]
    fn export_flags() {
        let opts = parse(&["--out", "data/", "--format", "tsv", "--no-prefix", "--verify-images", "--skip-failed-spots"])
            .options()
            .unwrap();
        assert_eq!(opts.export.table_path, PathBuf::from("data/"));
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert!(!opts.export.prefix_spot_id);
        assert!(opts.export.verify_images);
        assert_eq!(opts.scrape.on_spot_error, SpotErrorPolicy::Skip);
    }

    #[test]
    fn log_writer_shares_the_progress_bar() {
        let mut progress = BarProgress::new();
        let handle = progress.bar();
        progress.begin(4);
        progress.item_done(&SpotId::Numeric(78625), 3);
        assert_eq!(handle.length(), Some(4));
        assert_eq!(handle.position(), 1);
        progress.finish();
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(parse(&["--per-page", "0"]).options().is_err());
        assert!(parse(&["--format", "xml"]).options().is_err());
        assert!(Args::try_parse_from(["goshuin_scrape", "--spot", " "]).is_err());
        assert!(Args::try_parse_from(["goshuin_scrape", "--max-pages", "3", "--no-page-limit"]).is_err());
    }
}
