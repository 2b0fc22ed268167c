// src/specs/collection.rs
//! Scraping *spec* for a collection listing (e.g. `/collections/bando33`).
//!
//! Every `<a name="…">` inside the first `div.collection_items_inner` names
//! one spot. Order is document order; duplicates are kept.

use scraper::Html;

use crate::core::html::{find_in_doc, selector};
use crate::core::net::{self, Fetch};
use crate::error::{Result, ScrapeError};
use crate::types::SpotId;

const CONTAINER: &str = "div.collection_items_inner";
const ANCHOR: &str = "a[name]";

pub fn fetch(fetch: &dyn Fetch, listing_url: &str) -> Result<Vec<SpotId>> {
    let doc = net::get_text(fetch, listing_url)?;
    let ids = parse_doc(&doc)?;
    logf!("{} spots listed at {listing_url}", ids.len());
    Ok(ids)
}

pub fn parse_doc(doc: &str) -> Result<Vec<SpotId>> {
    let html = Html::parse_document(doc);
    let container = find_in_doc(&html, CONTAINER)?.ok_or_else(|| ScrapeError::MissingElement {
        what: CONTAINER,
        context: s!("collection page"),
    })?;

    let anchors = selector(ANCHOR)?;
    Ok(container
        .select(&anchors)
        .filter_map(|a| a.value().attr("name"))
        .map(SpotId::parse)
        .collect())
}
