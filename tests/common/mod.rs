// tests/common/mod.rs
//
// Scripted in-memory Fetch: canned replies per URL, plus a request log.
//
#![allow(dead_code)]
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::PathBuf;

use goshuin_scrape::core::{Fetch, HttpResponse};
use goshuin_scrape::{Result, ScrapeError};

#[derive(Clone)]
pub enum Reply {
    Status(u16, Vec<u8>),
    Down,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Reply::Status(200, body.into())
    }
    pub fn status(code: u16) -> Self {
        Reply::Status(code, Vec::new())
    }
}

#[derive(Default)]
pub struct ScriptedFetch {
    /// Replies are consumed in order; the last one repeats.
    routes: RefCell<HashMap<String, VecDeque<Reply>>>,
    pub requests: RefCell<Vec<String>>,
}

impl ScriptedFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, url: &str, reply: Reply) -> Self {
        self.routes
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Drop whatever was scripted for `url` and answer with `reply` only.
    pub fn set(self, url: &str, reply: Reply) -> Self {
        self.routes.borrow_mut().insert(url.to_string(), VecDeque::from([reply]));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| *u == url).count()
    }
}

impl Fetch for ScriptedFetch {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(url.to_string());
        let mut routes = self.routes.borrow_mut();
        let reply = match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match reply {
            Some(Reply::Status(status, body)) => Ok(HttpResponse { status, body }),
            Some(Reply::Down) => Err(ScrapeError::Transport {
                url: url.to_string(),
                message: "connection reset".to_string(),
            }),
            None => Ok(HttpResponse { status: 404, body: Vec::new() }),
        }
    }
}

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("goshuin_it_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

pub fn feed_url(spot: u64, page: u32) -> String {
    format!("https://omairi.club/api/spots/{spot}/goshuin?page={page}")
}

pub fn spot_url(spot: u64) -> String {
    format!("https://omairi.club/spots/{spot}")
}

/// JSON post with an image and a created_at date.
pub fn post(img: &str, date: &str) -> serde_json::Value {
    serde_json::json!({ "created_at": date, "post_picture_800": img })
}

pub fn page(posts: &[serde_json::Value]) -> Reply {
    Reply::ok(serde_json::to_vec(&serde_json::json!({ "data": { "posts": posts } })).unwrap())
}

pub fn spot_page(name: &str) -> Reply {
    Reply::ok(format!(
        r#"<html><body>
            <div class="spot_name">
              <h1>{name}</h1>
              <p class="spot_name_kana">かな</p>
              <p class="spot_title_area">神奈川県</p>
            </div>
            <div class="spot_desc_all"><p>由緒</p></div>
        </body></html>"#
    ))
}

// 1x1 PNG
pub const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];
