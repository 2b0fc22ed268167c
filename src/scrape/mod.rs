// src/scrape/mod.rs
pub mod download;
pub mod paginate;

pub use download::{derive_filename, Downloader};
pub use paginate::{EndReason, Harvest, PageOutcome, Paginator, StopReason};
