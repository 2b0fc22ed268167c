// src/config/mod.rs

pub mod consts;
pub mod file;
pub mod options;

pub use file::ConfigFile;
pub use options::{AppOptions, ExportFormat, ExportOptions, ScrapeOptions, SpotErrorPolicy, SpotSelector};
