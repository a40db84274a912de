// src/geo/nominatim.rs
use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{AddressComponents, BoundingBox, Coordinate, GeocodeError, Geocoder, Pacer};
use crate::config::consts::{GEOCODE_MIN_GAP_MS, NOMINATIM_URL};
use crate::core::net::{self, NetError};

/// OpenStreetMap Nominatim over HTTPS. Every request waits on the pacer first.
pub struct Nominatim {
    http: Client,
    base_url: String,
    pacer: Pacer,
}

#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    boundingbox: Vec<String>,
}

#[derive(Deserialize)]
struct ReverseHit {
    #[serde(default)]
    address: BTreeMap<String, serde_json::Value>,
    error: Option<String>,
}

impl Nominatim {
    pub fn new(base_url: impl Into<String>, gap: Duration) -> Result<Self, NetError> {
        Ok(Self {
            http: net::client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            pacer: Pacer::new(gap),
        })
    }

    /// Public instance at the usage-policy rate.
    pub fn public() -> Result<Self, NetError> {
        Self::new(NOMINATIM_URL, Duration::from_millis(GEOCODE_MIN_GAP_MS))
    }

    fn search(&self, query: &str) -> Result<SearchHit, GeocodeError> {
        let url = join!(&self.base_url, "/search");
        self.pacer.wait();
        logd!("Geocode: search {query:?}");

        let req = self.http.get(&url).query(&[("q", query), ("format", "json"), ("limit", "1")]);
        let hits: Vec<SearchHit> = net::send(&url, req)
            .and_then(|resp| net::read_json(&url, resp))
            .map_err(provider)?;
        hits.into_iter().next().ok_or(GeocodeError::NotFound)
    }
}

impl Geocoder for Nominatim {
    fn forward(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let hit = self.search(query)?;
        match (hit.lat.parse::<f64>(), hit.lon.parse::<f64>()) {
            (Ok(lat), Ok(lng)) => Ok(Coordinate::new(lat, lng)),
            _ => Err(GeocodeError::Provider(format!("unparseable coordinate {},{}", hit.lat, hit.lon))),
        }
    }

    fn reverse(&self, at: Coordinate) -> Result<AddressComponents, GeocodeError> {
        let url = join!(&self.base_url, "/reverse");
        self.pacer.wait();
        logd!("Geocode: reverse {}", at.label());

        let (lat, lon) = (at.lat.to_string(), at.lng.to_string());
        let req = self.http.get(&url).query(&[
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("format", "json"),
        ]);
        let hit: ReverseHit = net::send(&url, req)
            .and_then(|resp| net::read_json(&url, resp))
            .map_err(provider)?;

        if let Some(reason) = hit.error {
            logd!("Geocode: reverse miss at {}: {reason}", at.label());
            return Err(GeocodeError::NotFound);
        }
        let address: AddressComponents = hit
            .address
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect();
        if address.is_empty() {
            return Err(GeocodeError::NotFound);
        }
        Ok(address)
    }

    fn bounding_box(&self, query: &str) -> Result<BoundingBox, GeocodeError> {
        let hit = self.search(query)?;
        BoundingBox::from_nominatim(&hit.boundingbox).ok_or(GeocodeError::NotFound)
    }
}

fn provider(err: NetError) -> GeocodeError {
    logw!("Geocode: {err}");
    GeocodeError::Provider(err.to_string())
}
