// src/candidate.rs
use std::collections::{BTreeMap, BTreeSet};

use crate::geo::Coordinate;

/// Boolean facility traits a source may signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureHint {
    Lighted,
    Indoor,
    Private,
}

impl FeatureHint {
    pub fn label(self) -> &'static str {
        match self {
            FeatureHint::Lighted => "Lighted",
            FeatureHint::Indoor => "Indoor",
            FeatureHint::Private => "Private",
        }
    }
}

/// One harvested item before resolution: whatever the source gave us, unjudged.
#[derive(Clone, Debug, PartialEq)]
pub struct RawCandidate {
    /// Source-scoped identifier.
    pub external_id: String,
    pub name: Option<String>,
    /// Most specific first: house number, street, city.
    pub address_fragments: Vec<String>,
    /// Source vocabulary (`operator`, `access`, `surface`, `addr:city`, ...).
    pub tags: BTreeMap<String, String>,
    pub coordinate: Coordinate,
    pub region_hint: Option<String>,
    pub feature_hints: BTreeSet<FeatureHint>,
    pub court_count: Option<u32>,
    /// Untouched source payload, stored for audit.
    pub scraped: serde_json::Value,
}

impl RawCandidate {
    pub fn new(external_id: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            external_id: external_id.into(),
            name: None,
            address_fragments: Vec::new(),
            tags: BTreeMap::new(),
            coordinate,
            region_hint: None,
            feature_hints: BTreeSet::new(),
            court_count: None,
            scraped: serde_json::Value::Null,
        }
    }

    /// Non-blank tag value.
    pub fn tag(&self, key: &str) -> Option<&str> {
        present!(self.tags.get(key))
    }

    pub fn has(&self, hint: FeatureHint) -> bool {
        self.feature_hints.contains(&hint)
    }
}
