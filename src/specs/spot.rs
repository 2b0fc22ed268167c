// src/specs/spot.rs
//! Scraping *spec* for a spot page (`/spots/<id>`).
//!
//! Layout relied on:
//! - `div.spot_name` title block holding `h1` (name), `p.spot_name_kana`
//!   and `p.spot_title_area`.
//! - `div.spot_desc_all` for the description; some pages only carry
//!   `div.spot_attr_inner.main`, which is used instead.
//!
//! A missing title block or sub-element fails the whole spot; there is no
//! partial metadata.

use scraper::Html;

use crate::config::ScrapeOptions;
use crate::core::html::{find_in, find_in_doc, stripped_text};
use crate::core::net::{self, Fetch};
use crate::error::{Result, ScrapeError};
use crate::types::{Spot, SpotId};

const TITLE_BLOCK: &str = "div.spot_name";
const NAME: &str = "h1";
const KANA: &str = "p.spot_name_kana";
const AREA: &str = "p.spot_title_area";
const DESCRIPTION: &str = "div.spot_desc_all";
const DESCRIPTION_FALLBACK: &str = "div.spot_attr_inner.main";

pub fn fetch(fetch: &dyn Fetch, opts: &ScrapeOptions, id: &SpotId) -> Result<Spot> {
    let url = opts.spot_url(id);
    let doc = net::get_text(fetch, &url)?;
    parse_doc(id.clone(), &doc)
}

/// Split out for unit tests.
pub fn parse_doc(id: SpotId, doc: &str) -> Result<Spot> {
    let html = Html::parse_document(doc);
    let missing = |what: &'static str| ScrapeError::MissingElement {
        what,
        context: format!("spot {id}"),
    };

    let title = find_in_doc(&html, TITLE_BLOCK)?.ok_or_else(|| missing(TITLE_BLOCK))?;
    let name = find_in(title, NAME)?.ok_or_else(|| missing(NAME))?;
    let kana = find_in(title, KANA)?.ok_or_else(|| missing(KANA))?;
    let area = find_in(title, AREA)?.ok_or_else(|| missing(AREA))?;

    let description = match find_in_doc(&html, DESCRIPTION)? {
        Some(el) => el,
        None => {
            logd!("spot {id}: no {DESCRIPTION}, trying {DESCRIPTION_FALLBACK}");
            find_in_doc(&html, DESCRIPTION_FALLBACK)?.ok_or_else(|| missing(DESCRIPTION))?
        }
    };

    Ok(Spot {
        name: stripped_text(name),
        kana: stripped_text(kana),
        area: stripped_text(area),
        description: stripped_text(description),
        id,
    })
}
