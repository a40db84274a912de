// src/harvest/sources.rs
//
// Network side of the two sources. Adapters in `specs` stay pure; these fetch.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{OVERPASS_TIMEOUT_SECS, OVERPASS_URL};
use crate::core::net::{self, NetError};
use crate::core::{content_blocks, ContentBlock};
use crate::geo::BoundingBox;
use crate::specs::overpass::{build_query, Element, OverpassResponse};

/// Anything that can turn a page URL into content blocks.
pub trait MarkupSource {
    fn fetch(&self, url: &str) -> Result<Vec<ContentBlock>, NetError>;
}

/// Anything that can list geodata elements inside a bounding box.
pub trait GeodataService {
    fn query_by_bbox(&self, tag_filter: &str, bbox: &BoundingBox) -> Result<Vec<Element>, NetError>;
}

pub struct HttpMarkup {
    http: Client,
}

impl HttpMarkup {
    pub fn new() -> Result<Self, NetError> {
        Ok(Self { http: net::client()? })
    }
}

impl MarkupSource for HttpMarkup {
    fn fetch(&self, url: &str) -> Result<Vec<ContentBlock>, NetError> {
        logf!("Fetching {url}…");
        let doc = net::get_text(&self.http, url)?;
        Ok(content_blocks(&doc))
    }
}

pub struct OverpassClient {
    http: Client,
    url: String,
}

impl OverpassClient {
    pub fn new(url: impl Into<String>) -> Result<Self, NetError> {
        Ok(Self {
            http: net::client_with_timeout(Duration::from_secs(OVERPASS_TIMEOUT_SECS))?,
            url: url.into(),
        })
    }

    pub fn public() -> Result<Self, NetError> {
        Self::new(OVERPASS_URL)
    }
}

impl GeodataService for OverpassClient {
    fn query_by_bbox(&self, tag_filter: &str, bbox: &BoundingBox) -> Result<Vec<Element>, NetError> {
        let query = build_query(tag_filter, bbox);
        logd!("Overpass query:\n{query}");
        let req = self.http.post(&self.url).form(&[("data", query.as_str())]);
        let resp: OverpassResponse = net::read_json(&self.url, net::send(&self.url, req)?)?;
        Ok(resp.elements)
    }
}
