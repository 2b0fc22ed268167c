// src/core/net.rs
//! Blocking HTTP GET with the site's fixed header set.
//!
//! Everything above this module talks to the [`Fetch`] trait, so tests can
//! script responses without a network.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};

use crate::config::ScrapeOptions;
use crate::error::{Result, ScrapeError};

/// Status and full body of one GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One request in flight at a time. `Err` means the exchange itself failed
/// (connect, TLS, timeout, body read); any status code is an `Ok`.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

pub struct HttpClient {
    client: Client,
    pause: Duration,
}

impl HttpClient {
    pub fn new(opts: &ScrapeOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let referer = HeaderValue::from_str(&opts.referer)
            .map_err(|e| ScrapeError::Config(format!("bad referer header: {e}")))?;
        headers.insert(REFERER, referer);

        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .default_headers(headers)
            .timeout(opts.timeout)
            .build()
            .map_err(|e| ScrapeError::Config(format!("could not build HTTP client: {e}")))?;

        Ok(Self { client, pause: opts.pause })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        if !self.pause.is_zero() {
            thread::sleep(self.pause); // be polite
        }
        logd!("GET {url}");

        let transport = |e: reqwest::Error| ScrapeError::Transport {
            url: s!(url),
            message: e.to_string(),
        };
        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().map_err(transport)?.to_vec();

        logd!("{status} {url} ({} bytes)", body.len());
        Ok(HttpResponse { status, body })
    }
}

/// GET that must succeed: non-2xx becomes `ScrapeError::Status`.
pub fn get_ok(fetch: &dyn Fetch, url: &str) -> Result<HttpResponse> {
    let resp = fetch.get(url)?;
    if !resp.is_success() {
        return Err(ScrapeError::Status { url: s!(url), status: resp.status });
    }
    Ok(resp)
}

/// Like [`get_ok`] but decodes the body as (lossy) UTF-8 text.
pub fn get_text(fetch: &dyn Fetch, url: &str) -> Result<String> {
    get_ok(fetch, url).map(|r| r.text())
}
