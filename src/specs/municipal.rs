// src/specs/municipal.rs
//
// City parks page: each facility is a paragraph that opens with a bold name and
// continues with the street address, optionally followed by a bullet list of
// features ("3 Dedicated Outdoor Courts", "Lights", ...).

use std::sync::OnceLock;

use regex::Regex;
use serde_json::json;

use crate::candidate::{FeatureHint, RawCandidate};
use crate::config::consts::MIN_ADDRESS_LEN;
use crate::core::sanitize::normalize_ws;
use crate::core::ContentBlock;
use crate::geo::Coordinate;
use crate::resolve::scope_region;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    pub name: String,
    /// Paragraph text with the name removed; used as-is and as the geocode query.
    pub address: String,
    pub features: Vec<String>,
    pub court_count: u32,
    pub indoor: bool,
}

impl Listing {
    /// Attach the located coordinate. The page carries no ids, so the name is the external id.
    pub fn into_candidate(self, coordinate: Coordinate, scope: Option<&str>) -> RawCandidate {
        let mut raw = RawCandidate::new(self.name.clone(), coordinate);
        raw.scraped = json!({ "features": self.features, "raw_address": self.address });
        raw.name = Some(self.name);
        raw.address_fragments = vec![self.address];
        raw.region_hint = scope.and_then(scope_region);
        raw.court_count = Some(self.court_count);
        if self.indoor {
            raw.feature_hints.insert(FeatureHint::Indoor);
        }
        raw
    }
}

fn court_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s+(Dedicated|Multi-purpose|Outdoor|Indoor)")
            .expect("court count pattern is valid")
    })
}

/// Last feature line with a count wins; 1 when none has one.
pub fn court_count(features: &[String]) -> u32 {
    features
        .iter()
        .filter_map(|line| court_count_re().captures(line))
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .last()
        .unwrap_or(1)
}

pub fn extract_listings(blocks: &[ContentBlock]) -> Vec<Listing> {
    let mut out = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        let ContentBlock::Paragraph { lead: Some(name), text } = block else { continue };

        let address = normalize_ws(&text.replace(name.as_str(), ""));
        if address.chars().count() < MIN_ADDRESS_LEN {
            logd!("Municipal: skip {name:?}, address too short ({address:?})");
            continue;
        }

        let features = feature_list(&blocks[i + 1..]);
        let court_count = court_count(&features);
        let indoor = features.iter().any(|f| f.contains("Indoor"));

        logd!("Municipal: found {name} | {address}");
        out.push(Listing { name: name.clone(), address, features, court_count, indoor });
    }

    out
}

/// Items of the first list after a facility paragraph, stopping at the next facility.
fn feature_list(rest: &[ContentBlock]) -> Vec<String> {
    for block in rest {
        match block {
            ContentBlock::List { items } => return items.clone(),
            ContentBlock::Paragraph { lead: Some(_), .. } => break,
            ContentBlock::Paragraph { .. } => {}
        }
    }
    Vec::new()
}
