// src/types.rs
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Spot identifier as found on the site: numeric when the text is all ASCII
/// digits, otherwise kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpotId {
    Numeric(u64),
    Named(String),
}

impl SpotId {
    pub fn parse(raw: &str) -> Self {
        let all_digits = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());
        match all_digits.then(|| raw.parse::<u64>().ok()).flatten() {
            Some(n) => SpotId::Numeric(n),
            None => SpotId::Named(raw.to_string()),
        }
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotId::Numeric(n) => write!(f, "{n}"),
            SpotId::Named(s) => f.write_str(s),
        }
    }
}

/// Metadata read from one spot page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spot {
    pub id: SpotId,
    pub name: String,
    pub kana: String,
    pub area: String,
    pub description: String,
}

/// One image-bearing post from a spot's feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    /// `created_at`, else `visited_date`, else missing.
    pub date: Option<String>,
    pub image_url: String,
}

/// A post image that made it to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedImage {
    /// 1-based position of the post in the harvest, also used in the filename.
    pub index: usize,
    pub path: PathBuf,
    pub date: Option<String>,
    pub source_url: String,
}

impl DownloadedImage {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_id_numeric_vs_named() {
        assert_eq!(SpotId::parse("78625"), SpotId::Numeric(78625));
        assert_eq!(SpotId::parse("bando-1"), SpotId::Named(s!("bando-1")));
        assert_eq!(SpotId::parse(""), SpotId::Named(s!()));
        // sign and whitespace are not "purely numeric"
        assert_eq!(SpotId::parse("-3"), SpotId::Named(s!("-3")));
        assert_eq!(SpotId::parse(" 3"), SpotId::Named(s!(" 3")));
        // too large for u64 stays as text
        let huge = "99999999999999999999999";
        assert_eq!(SpotId::parse(huge), SpotId::Named(s!(huge)));
    }

    #[test]
    fn spot_id_display_is_raw_text() {
        assert_eq!(SpotId::Numeric(85532).to_string(), "85532");
        assert_eq!(SpotId::Named(s!("top")).to_string(), "top");
    }

    #[test]
    fn downloaded_image_file_name() {
        let img = DownloadedImage {
            index: 2,
            path: PathBuf::from("goshuin/train/7_2_a.jpg"),
            date: None,
            source_url: s!("https://x/a.jpg"),
        };
        assert_eq!(img.file_name(), "7_2_a.jpg");
    }
}
