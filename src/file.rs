// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::ExportOptions;
use crate::config::consts::DEFAULT_TABLE_FILE;
use crate::error::{Result, ScrapeError};

/// Resolve where the dataset table goes. A directory (existing, or hinted
/// with a trailing separator) gets `metadata.<ext>` inside it.
pub fn resolve_table_path(export: &ExportOptions) -> PathBuf {
    let p = &export.table_path;
    if looks_like_dir_hint(p) || p.is_dir() {
        let stem = Path::new(DEFAULT_TABLE_FILE)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| s!("metadata"));
        p.join(join!(&stem, ".", export.format.ext()))
    } else {
        p.clone()
    }
}

/// Create the parent directory of `path`, if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Io(std::io::Error::other(format!(
            "path exists but is not a directory: {}",
            dir.display()
        ))));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
