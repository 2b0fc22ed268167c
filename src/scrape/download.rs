// src/scrape/download.rs
use std::fs;
use std::path::Path;

use url::Url;

use crate::core::net::{self, Fetch};
use crate::core::sanitize::sanitize_file_component;
use crate::error::{Result, ScrapeError};
use crate::file::ensure_directory;
use crate::types::{DownloadedImage, Post, SpotId};

/// Filename for the `index`-th (1-based) image: the URL path's basename, or
/// `image_<index>.jpg` when that is empty, prefixed `<spot>_<index>_` when a
/// spot is given.
pub fn derive_filename(url: &str, index: usize, spot: Option<&SpotId>) -> String {
    let base = url_basename(url);
    let base = if base.is_empty() {
        format!("image_{index}.jpg")
    } else {
        sanitize_file_component(&base)
    };

    match spot {
        Some(id) => format!("{}_{index}_{base}", sanitize_file_component(&id.to_string())),
        None => base,
    }
}

fn url_basename(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(u) => u.path().to_string(),
        // not absolute; treat the text up to any query/fragment as the path
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    path.rsplit('/').next().unwrap_or_default().to_string()
}

pub struct Downloader<'a> {
    fetch: &'a dyn Fetch,
    verify_images: bool,
}

impl<'a> Downloader<'a> {
    pub fn new(fetch: &'a dyn Fetch, verify_images: bool) -> Self {
        Self { fetch, verify_images }
    }

    /// Download every post's image into `dest`, overwriting same-named files.
    /// A failed image is logged and skipped; the returned list keeps input
    /// order. Only failing to create `dest` is an error.
    pub fn download_all(
        &self,
        posts: &[Post],
        dest: &Path,
        spot: Option<&SpotId>,
    ) -> Result<Vec<DownloadedImage>> {
        ensure_directory(dest)?;

        let mut written = Vec::with_capacity(posts.len());
        for (i, post) in posts.iter().enumerate() {
            let index = i + 1;
            match self.download_one(post, index, dest, spot) {
                Ok(image) => written.push(image),
                Err(e) => loge!("skipping image {index} ({}): {e}", post.image_url),
            }
        }

        if written.len() < posts.len() {
            logw!("{} of {} images failed", posts.len() - written.len(), posts.len());
        }
        Ok(written)
    }

    pub fn download_one(
        &self,
        post: &Post,
        index: usize,
        dest: &Path,
        spot: Option<&SpotId>,
    ) -> Result<DownloadedImage> {
        let url = post.image_url.as_str();
        let resp = net::get_ok(self.fetch, url)?;

        if self.verify_images {
            match image::guess_format(&resp.body) {
                Ok(format) => logd!("{url}: {format:?}"),
                Err(_) => return Err(ScrapeError::NotAnImage { url: s!(url) }),
            }
        }

        let path = dest.join(derive_filename(url, index, spot));
        logd!("Downloading {url} -> {}", path.display());
        fs::write(&path, &resp.body)?;

        Ok(DownloadedImage {
            index,
            path,
            date: post.date.clone(),
            source_url: s!(url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_of_url_path() {
        assert_eq!(derive_filename("https://img.omairi.club/a/b/c.jpg", 1, None), "c.jpg");
        assert_eq!(derive_filename("https://img.omairi.club/a/b/c.jpg?w=800#x", 4, None), "c.jpg");
    }

    #[test]
    fn empty_path_synthesizes_name() {
        assert_eq!(derive_filename("https://img.omairi.club", 3, None), "image_3.jpg");
        assert_eq!(derive_filename("https://img.omairi.club/", 3, None), "image_3.jpg");
        assert_eq!(derive_filename("https://img.omairi.club/dir/", 7, None), "image_7.jpg");
    }

    #[test]
    fn spot_prefix() {
        let id = SpotId::Numeric(78625);
        assert_eq!(
            derive_filename("https://img.omairi.club/a/b/c.jpg", 2, Some(&id)),
            "78625_2_c.jpg"
        );
        assert_eq!(
            derive_filename("https://img.omairi.club/", 5, Some(&id)),
            "78625_5_image_5.jpg"
        );
    }

    #[test]
    fn named_spot_prefix_is_sanitized() {
        let id = SpotId::Named(s!("a/b"));
        assert_eq!(derive_filename("https://x/c.png", 1, Some(&id)), "a_b_1_c.png");
    }

    #[test]
    fn relative_urls_still_get_a_basename() {
        assert_eq!(derive_filename("uploads/x/y.webp?v=2", 1, None), "y.webp");
        assert_eq!(derive_filename("", 9, None), "image_9.jpg");
    }
}
