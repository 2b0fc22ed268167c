// src/scrape/paginate.rs
//! Walks a spot's goshuin feed page by page.
//!
//! ```text
//! FETCHING_PAGE(1) ──non-2xx / page limit / retries spent──▶ STOPPED
//!        │ posts
//!        ▼
//!   COLLECTING ──empty page / per-page or total cap──▶ STOPPED (total)
//!        │                                          or next page (per-page)
//!        └──────────────▶ FETCHING_PAGE(page + 1)
//! ```
//!
//! The per-page cap and the total cap are independent: hitting the per-page
//! cap only ends the current page.

use std::thread;

use serde_json::Value;

use crate::config::ScrapeOptions;
use crate::core::net::Fetch;
use crate::error::{is_retryable_status, Result, ScrapeError};
use crate::specs::posts;
use crate::types::{Post, SpotId};

/// Result of asking for one page.
#[derive(Debug)]
pub enum PageOutcome {
    Posts(Vec<Value>),
    EndOfFeed(EndReason),
    Transient(ScrapeError),
    Fatal(ScrapeError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// Server answered with something other than 200 that isn't worth retrying.
    Status(u16),
    /// Normalized post list was empty.
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    PageLimit,
    EndOfFeed(EndReason),
    TotalCap,
    /// Transient failures outlasted the retry budget; treated as end of feed.
    RetriesExhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Harvest {
    pub posts: Vec<Post>,
    /// Pages actually requested (retries not counted).
    pub pages_fetched: u32,
    pub stop: StopReason,
}

impl Harvest {
    pub fn dates(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.posts.iter().map(|p| p.date.as_deref())
    }

    pub fn image_urls(&self) -> impl Iterator<Item = &str> + '_ {
        self.posts.iter().map(|p| p.image_url.as_str())
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Classify one GET of a feed page.
pub fn fetch_page(fetch: &dyn Fetch, url: &str) -> PageOutcome {
    let resp = match fetch.get(url) {
        Ok(r) => r,
        Err(e) if e.is_transient() => return PageOutcome::Transient(e),
        Err(e) => return PageOutcome::Fatal(e),
    };

    if is_retryable_status(resp.status) {
        return PageOutcome::Transient(ScrapeError::Status { url: s!(url), status: resp.status });
    }
    // Only a 200 carries a page; 204 and friends end the feed like a 404.
    if resp.status != 200 {
        return PageOutcome::EndOfFeed(EndReason::Status(resp.status));
    }
    if resp.body.iter().all(u8::is_ascii_whitespace) {
        return PageOutcome::EndOfFeed(EndReason::Empty);
    }

    let body: Value = match serde_json::from_slice(&resp.body) {
        Ok(v) => v,
        Err(source) => return PageOutcome::Fatal(ScrapeError::Json { url: s!(url), source }),
    };

    let items = posts::normalize(body);
    if items.is_empty() {
        PageOutcome::EndOfFeed(EndReason::Empty)
    } else {
        PageOutcome::Posts(items)
    }
}

pub struct Paginator<'a> {
    fetch: &'a dyn Fetch,
    opts: &'a ScrapeOptions,
}

impl<'a> Paginator<'a> {
    pub fn new(fetch: &'a dyn Fetch, opts: &'a ScrapeOptions) -> Self {
        Self { fetch, opts }
    }

    pub fn harvest(&self, spot: &SpotId) -> Result<Harvest> {
        let per_page = self.opts.per_page_cap;
        let total = self.opts.total_cap;

        let mut harvested: Vec<Post> = Vec::new();
        let mut page: u32 = 1;
        let mut pages_fetched: u32 = 0;

        let stop = loop {
            if self.opts.max_pages.is_some_and(|max| page > max) {
                break StopReason::PageLimit;
            }

            let url = self.opts.posts_url(spot, page);
            pages_fetched += 1;
            let items = match self.fetch_with_retries(&url)? {
                Ok(items) => items,
                Err(reason) => break reason,
            };

            let mut taken = 0usize;
            for raw in &items {
                if let Some(post) = posts::to_post(raw) {
                    harvested.push(post);
                    taken += 1;
                    if taken >= per_page {
                        break;
                    }
                }
                if harvested.len() >= total {
                    break;
                }
            }
            logd!("spot {spot} page {page}: {taken} of {} posts taken", items.len());

            if harvested.len() >= total {
                break StopReason::TotalCap;
            }
            page += 1;
        };

        logf!("spot {spot}: {} images over {pages_fetched} page(s), stopped: {stop:?}", harvested.len());

        Ok(Harvest { posts: harvested, pages_fetched, stop })
    }

    /// `Ok(Ok(items))` for a page with posts, `Ok(Err(stop))` when the feed is
    /// over, `Err` for a failure that should fail the spot.
    fn fetch_with_retries(&self, url: &str) -> Result<std::result::Result<Vec<Value>, StopReason>> {
        let mut attempt = 0u32;
        loop {
            match fetch_page(self.fetch, url) {
                PageOutcome::Posts(items) => return Ok(Ok(items)),
                PageOutcome::EndOfFeed(reason) => {
                    logd!("end of feed at {url}: {reason:?}");
                    return Ok(Err(StopReason::EndOfFeed(reason)));
                }
                PageOutcome::Fatal(e) => return Err(e),
                PageOutcome::Transient(e) => {
                    if attempt >= self.opts.retries {
                        logw!("giving up on {url} after {} attempt(s): {e}", attempt + 1);
                        return Ok(Err(StopReason::RetriesExhausted));
                    }
                    attempt += 1;
                    logw!("retry {attempt}/{} for {url}: {e}", self.opts.retries);
                    if !self.opts.retry_backoff.is_zero() {
                        thread::sleep(self.opts.retry_backoff * attempt);
                    }
                }
            }
        }
    }
}
