// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod csv;
pub mod dataset;
pub mod error;
pub mod file;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod specs;
pub mod types;

pub use error::{Result, ScrapeError};
pub use types::{DownloadedImage, Post, Spot, SpotId};
