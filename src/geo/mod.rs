// src/geo/mod.rs
//! Geocode gateway.
//!
//! [`Geocoder`] is the seam between the resolver and whatever answers
//! forward / reverse / bounding-box lookups. A miss is an ordinary value
//! ([`GeocodeError`]), never a panic; callers fall through to their next
//! strategy. The live implementation is [`Nominatim`], which paces itself
//! with a [`Pacer`] so callers cannot exceed the provider's usage policy.

mod nominatim;
mod pacer;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use nominatim::Nominatim;
pub use pacer::Pacer;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `"30.2618, -97.7176"`: the address of last resort.
    pub fn label(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Nominatim sends `["min_lat", "max_lat", "min_lon", "max_lon"]` as strings.
    pub fn from_nominatim(raw: &[String]) -> Option<Self> {
        let v: Vec<f64> = raw.iter().map(|s| s.trim().parse().ok()).collect::<Option<_>>()?;
        match v.as_slice() {
            &[min_lat, max_lat, min_lon, max_lon] => Some(Self { min_lat, min_lon, max_lat, max_lon }),
            _ => None,
        }
    }
}

/// Place-type keys scanned, in order, when naming a site from a reverse lookup.
pub const SITE_NAME_KEYS: [&str; 16] = [
    "leisure",
    "park",
    "recreation_ground",
    "pitch",
    "sport_centre",
    "community_centre",
    "stadium",
    "building",
    "amenity",
    "resort",
    "centre",
    "school",
    "university",
    "college",
    "hamlet",
    "village",
];

/// Structured address breakdown from a reverse lookup (Nominatim's `address` object).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressComponents {
    fields: BTreeMap<String, String>,
}

impl AddressComponents {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Non-blank value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        present!(self.fields.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }

    pub fn house_number(&self) -> Option<&str> {
        self.get("house_number")
    }

    pub fn road(&self) -> Option<&str> {
        self.get("road")
    }

    pub fn city(&self) -> Option<&str> {
        self.get("city").or_else(|| self.get("town")).or_else(|| self.get("village"))
    }

    pub fn state(&self) -> Option<&str> {
        self.get("state")
    }

    /// First named place among [`SITE_NAME_KEYS`].
    pub fn site_name(&self) -> Option<&str> {
        SITE_NAME_KEYS.iter().find_map(|k| self.get(k))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AddressComponents {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("no result")]
    NotFound,
    #[error("geocoding provider error: {0}")]
    Provider(String),
}

pub trait Geocoder {
    fn forward(&self, query: &str) -> Result<Coordinate, GeocodeError>;
    fn reverse(&self, at: Coordinate) -> Result<AddressComponents, GeocodeError>;
    fn bounding_box(&self, query: &str) -> Result<BoundingBox, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn forward(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        (**self).forward(query)
    }
    fn reverse(&self, at: Coordinate) -> Result<AddressComponents, GeocodeError> {
        (**self).reverse(at)
    }
    fn bounding_box(&self, query: &str) -> Result<BoundingBox, GeocodeError> {
        (**self).bounding_box(query)
    }
}
