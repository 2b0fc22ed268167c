//! # Scraping "specs" module
//!
//! Page-specific knowledge of the site lives here: where the ground truth
//! sits in each HTML page or JSON payload, and how to pull it out.
//!
//! ## What lives here
//! - **Pure parsing** of fetched documents (`parse_doc`, `FeedShape::decode`),
//!   testable offline against inline fixtures.
//! - Thin `fetch` wrappers that GET one page through [`crate::core::net`] and
//!   hand the body to the parser.
//!
//! ## What does **not** live here
//! - Pagination, caps and retry policy (`scrape::paginate`).
//! - Writing anything to disk (`scrape::download`, `csv`, `conversation`).
//!
//! ## Current specs
//! - `collection` – spot ids from a collection listing page.
//! - `spot` – name / kana / area / description from a spot page.
//! - `posts` – the goshuin feed JSON: envelope shapes and per-post fields.
pub mod collection;
pub mod posts;
pub mod spot;
