// src/specs/overpass.rs
//
// OpenStreetMap via the Overpass API. Elements arrive as nodes (lat/lon) or as
// ways/relations (center, thanks to `out center;`), each with a free-form tag map.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::candidate::{FeatureHint, RawCandidate};
use crate::geo::{BoundingBox, Coordinate};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Element {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Element {
    /// Direct point first, then the centroid.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some(Coordinate::new(lat, lon)),
            (_, _, Some(c)) => Some(Coordinate::new(c.lat, c.lon)),
            _ => None,
        }
    }

    fn tag(&self, key: &str) -> Option<&str> {
        present!(self.tags.get(key))
    }

    fn tag_is(&self, key: &str, value: &str) -> bool {
        self.tag(key).is_some_and(|v| v.eq_ignore_ascii_case(value))
    }
}

/// Overpass QL: every node, way and relation matching `tag_filter` inside `bbox`.
pub fn build_query(tag_filter: &str, bbox: &BoundingBox) -> String {
    let area = format!("({},{},{},{})", bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon);
    let mut q = s!("[out:json][timeout:25];\n(\n");
    for kind in ["node", "way", "relation"] {
        q.push_str(&format!("  {kind}{tag_filter}{area};\n"));
    }
    q.push_str(");\nout center;\n");
    q
}

/// `None` when the element has neither a point nor a center.
pub fn to_candidate(el: &Element) -> Option<RawCandidate> {
    let coordinate = el.coordinate()?;
    let mut raw = RawCandidate::new(el.id.to_string(), coordinate);

    // Verbatim; blank names are the resolver's call.
    raw.name = el.tags.get("name").cloned();
    raw.address_fragments = ["addr:housenumber", "addr:street", "addr:city"]
        .iter()
        .filter_map(|k| el.tag(k).map(String::from))
        .collect();
    raw.region_hint = el.tag("addr:state").map(String::from);

    if el.tag_is("lit", "yes") {
        raw.feature_hints.insert(FeatureHint::Lighted);
    }
    if el.tag_is("access", "private") {
        raw.feature_hints.insert(FeatureHint::Private);
    }
    if el.tag_is("indoor", "yes") {
        raw.feature_hints.insert(FeatureHint::Indoor);
    }

    raw.tags = el.tags.clone();
    raw.scraped = serde_json::to_value(&el.tags).unwrap_or_default();
    Some(raw)
}

/// Candidates in element order, plus how many elements had no usable position.
pub fn extract_candidates(elements: &[Element]) -> (Vec<RawCandidate>, usize) {
    let mut dropped = 0usize;
    let candidates = elements
        .iter()
        .filter_map(|el| {
            let c = to_candidate(el);
            if c.is_none() {
                logd!("Overpass: {} {} has no position, dropped", el.kind, el.id);
                dropped += 1;
            }
            c
        })
        .collect();
    (candidates, dropped)
}
