// src/core/net.rs
// Blocking HTTP helpers shared by the geocoder, the Overpass client,
// the markup source and the Supabase store.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};

#[derive(Debug, Error)]
pub enum NetError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Client with the crate's user agent and the provider request timeout.
pub fn client() -> Result<Client, NetError> {
    client_with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
}

pub fn client_with_timeout(timeout: Duration) -> Result<Client, NetError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(NetError::Client)
}

/// Send, then reject anything but 2xx.
pub fn send(url: &str, req: RequestBuilder) -> Result<Response, NetError> {
    let resp = req.send().map_err(|source| NetError::Request { url: s!(url), source })?;
    let status = resp.status();
    if !status.is_success() {
        return Err(NetError::Status { url: s!(url), status: status.as_u16() });
    }
    Ok(resp)
}

pub fn get_text(http: &Client, url: &str) -> Result<String, NetError> {
    send(url, http.get(url))?
        .text()
        .map_err(|e| NetError::Decode { url: s!(url), reason: e.to_string() })
}

pub fn read_json<T: DeserializeOwned>(url: &str, resp: Response) -> Result<T, NetError> {
    resp.json::<T>()
        .map_err(|e| NetError::Decode { url: s!(url), reason: e.to_string() })
}
