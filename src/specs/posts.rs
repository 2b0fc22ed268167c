// src/specs/posts.rs
//! Scraping *spec* for the goshuin feed (`/api/spots/<id>/goshuin?page=N`).
//!
//! The endpoint has answered with more than one envelope over time:
//! - a bare list of posts
//! - `{"data": {"posts": [...]}}`
//! - `{"posts": [...]}`
//!
//! Anything else reads as an empty page, which ends pagination.

use serde::Deserialize;
use serde_json::Value;

use crate::types::Post;

pub const IMAGE_FIELD: &str = "post_picture_800";

#[derive(Clone, Debug, PartialEq)]
pub enum FeedShape {
    List(Vec<Value>),
    Envelope(Vec<Value>),
    Unrecognized,
}

impl FeedShape {
    /// `data.posts` wins over a top-level `posts` when both are present.
    pub fn decode(body: Value) -> Self {
        match body {
            Value::Array(items) => FeedShape::List(items),
            Value::Object(mut map) => {
                if let Some(Value::Object(data)) = map.get_mut("data") {
                    if let Some(posts) = data.remove("posts") {
                        return Self::envelope(posts);
                    }
                }
                match map.remove("posts") {
                    Some(posts) => Self::envelope(posts),
                    None => FeedShape::Unrecognized,
                }
            }
            _ => FeedShape::Unrecognized,
        }
    }

    fn envelope(posts: Value) -> Self {
        match posts {
            Value::Array(items) => FeedShape::Envelope(items),
            _ => FeedShape::Unrecognized,
        }
    }

    pub fn into_posts(self) -> Vec<Value> {
        match self {
            FeedShape::List(items) | FeedShape::Envelope(items) => items,
            FeedShape::Unrecognized => Vec::new(),
        }
    }
}

/// Shorthand for `FeedShape::decode(body).into_posts()`.
pub fn normalize(body: Value) -> Vec<Value> {
    FeedShape::decode(body).into_posts()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPost {
    created_at: Value,
    visited_date: Value,
    post_picture_800: Value,
}

/// A feed entry only becomes a `Post` when it carries a non-empty image URL.
pub fn to_post(raw: &Value) -> Option<Post> {
    let raw = RawPost::deserialize(raw).ok()?;
    let image_url = match raw.post_picture_800 {
        Value::String(s) if !s.is_empty() => s,
        _ => return None,
    };
    let date = field_text(&raw.created_at).or_else(|| field_text(&raw.visited_date));
    Some(Post { date, image_url })
}

/// Empty strings, zero, null and non-scalars count as absent.
fn field_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_list() {
        let posts = normalize(json!([{ "id": 1 }, { "id": 2 }]));
        assert_eq!(posts.len(), 2);
        assert!(matches!(FeedShape::decode(json!([])), FeedShape::List(v) if v.is_empty()));
    }

    #[test]
    fn data_posts_envelope() {
        let body = json!({ "data": { "posts": [{ "id": 1 }] }, "meta": { "page": 1 } });
        assert!(matches!(FeedShape::decode(body.clone()), FeedShape::Envelope(_)));
        assert_eq!(normalize(body), vec![json!({ "id": 1 })]);
    }

    #[test]
    fn top_level_posts_envelope() {
        assert_eq!(normalize(json!({ "posts": [{ "id": 3 }] })), vec![json!({ "id": 3 })]);
    }

    #[test]
    fn nested_posts_take_precedence() {
        let body = json!({ "data": { "posts": [{ "id": "inner" }] }, "posts": [{ "id": "outer" }] });
        assert_eq!(normalize(body), vec![json!({ "id": "inner" })]);
    }

    #[test]
    fn data_without_posts_falls_back_to_top_level() {
        let body = json!({ "data": { "total": 0 }, "posts": [{ "id": 7 }] });
        assert_eq!(normalize(body), vec![json!({ "id": 7 })]);
    }

    #[test]
    fn unrecognized_shapes_are_empty() {
        for body in [
            json!({ "items": [1, 2] }),
            json!({ "data": [1, 2] }),
            json!({ "posts": null }),
            json!({ "posts": { "0": {} } }),
            json!("posts"),
            json!(42),
            json!(null),
        ] {
            assert_eq!(FeedShape::decode(body.clone()), FeedShape::Unrecognized, "{body}");
            assert!(normalize(body).is_empty());
        }
    }

    #[test]
    fn post_prefers_created_at() {
        let p = to_post(&json!({
            "created_at": "2024-05-01T10:00:00+09:00",
            "visited_date": "2024-04-30",
            "post_picture_800": "https://img.omairi.club/a/b/c.jpg"
        }))
        .unwrap();
        assert_eq!(p.date.as_deref(), Some("2024-05-01T10:00:00+09:00"));
        assert_eq!(p.image_url, "https://img.omairi.club/a/b/c.jpg");
    }

    #[test]
    fn post_falls_back_to_visited_date() {
        let p = to_post(&json!({ "created_at": "", "visited_date": "2024-04-30", IMAGE_FIELD: "u" })).unwrap();
        assert_eq!(p.date.as_deref(), Some("2024-04-30"));

        let p = to_post(&json!({ "created_at": null, "visited_date": 20240430, IMAGE_FIELD: "u" })).unwrap();
        assert_eq!(p.date.as_deref(), Some("20240430"));
    }

    #[test]
    fn post_without_dates_has_missing_date() {
        let p = to_post(&json!({ IMAGE_FIELD: "u" })).unwrap();
        assert_eq!(p.date, None);
    }

    #[test]
    fn posts_without_image_are_dropped() {
        assert!(to_post(&json!({ "created_at": "2024-01-01" })).is_none());
        assert!(to_post(&json!({ IMAGE_FIELD: "" })).is_none());
        assert!(to_post(&json!({ IMAGE_FIELD: null })).is_none());
        assert!(to_post(&json!("not an object")).is_none());
    }
}
