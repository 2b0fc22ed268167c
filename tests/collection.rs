// tests/collection.rs
mod common;

use common::*;
use goshuin_scrape::specs::{collection, spot};
use goshuin_scrape::config::ScrapeOptions;
use goshuin_scrape::{ScrapeError, SpotId};

const LISTING: &str = "https://omairi.club/collections/bando33";

#[test]
fn listing_yields_ids_in_order() {
    let doc = r#"<html><body>
        <div class="collection_items_inner">
          <div class="item"><a name="78625" href="/spots/78625">杉本寺</a></div>
          <div class="item"><a name="82856" href="/spots/82856">岩殿寺</a></div>
          <div class="item"><a name="nonnumeric">番外</a></div>
        </div>
        <div class="collection_items_inner"><a name="999">second list</a></div>
    </body></html>"#;
    let server = ScriptedFetch::new().on(LISTING, Reply::ok(doc));

    let ids = collection::fetch(&server, LISTING).unwrap();
    assert_eq!(
        ids,
        vec![
            SpotId::Numeric(78625),
            SpotId::Numeric(82856),
            SpotId::Named("nonnumeric".to_string()),
        ]
    );
}

#[test]
fn listing_error_status_is_an_error() {
    let server = ScriptedFetch::new().on(LISTING, Reply::status(503));
    let err = collection::fetch(&server, LISTING).unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 503, .. }));
}

#[test]
fn spot_page_is_fetched_from_template() {
    let server = ScriptedFetch::new().on(&spot_url(78625), spot_page("杉本寺"));
    let opts = ScrapeOptions::default();

    let s = spot::fetch(&server, &opts, &SpotId::Numeric(78625)).unwrap();
    assert_eq!(s.name, "杉本寺");
    assert_eq!(s.kana, "かな");
    assert_eq!(s.area, "神奈川県");
    assert_eq!(s.description, "由緒");
    assert_eq!(server.requested(), vec![spot_url(78625)]);
}
