// src/normalize.rs
use serde::{Deserialize, Serialize};

use crate::candidate::RawCandidate;
use crate::config::consts::DEFAULT_COUNTRY;
use crate::config::options::SourceProfile;
use crate::resolve::{AccessType, IndoorOutdoor, ResolvedFields};

/// Final shape handed to the store. Field names follow the `courts` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub source_id: String,
    pub external_id: String,
    pub name: String,
    #[serde(rename = "address1")]
    pub address: String,
    pub city: Option<String>,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub court_count: u32,
    pub indoor_outdoor: IndoorOutdoor,
    pub surface: String,
    pub access_type: AccessType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    pub is_claimed: bool,
    pub confidence_score: u8,
    pub scraped_data: serde_json::Value,
}

/// Combine resolved fields with the source's registration and trust level.
pub fn normalize(
    profile: &SourceProfile,
    source_id: &str,
    raw: RawCandidate,
    fields: ResolvedFields,
) -> CanonicalRecord {
    CanonicalRecord {
        source_id: s!(source_id),
        external_id: raw.external_id,
        name: fields.name,
        address: fields.address,
        city: fields.city,
        region: fields.region,
        country: s!(DEFAULT_COUNTRY),
        latitude: fields.coordinate.lat,
        longitude: fields.coordinate.lng,
        court_count: fields.court_count,
        indoor_outdoor: fields.indoor_outdoor,
        surface: fields.surface,
        access_type: fields.access_type,
        features: fields.features.into_iter().collect(),
        is_claimed: false,
        confidence_score: profile.base_confidence.min(100),
        scraped_data: raw.scraped,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::json;

    use super::*;
    use crate::geo::Coordinate;

    fn fields() -> ResolvedFields {
        ResolvedFields {
            name: s!("Pan Am Park"),
            address: s!("2100 E 3rd St, Austin, TX"),
            city: Some(s!("Austin")),
            region: s!("TX"),
            coordinate: Coordinate::new(30.2618, -97.7176),
            indoor_outdoor: IndoorOutdoor::Outdoor,
            access_type: AccessType::Public,
            surface: s!("Hard"),
            court_count: 3,
            features: BTreeSet::new(),
        }
    }

    #[test]
    fn confidence_comes_from_profile() {
        let raw = RawCandidate::new("Pan Am Park", Coordinate::new(30.2618, -97.7176));
        let rec = normalize(&SourceProfile::municipal("Austin Parks & Rec", "https://example.org", "Austin, TX"), "src-1", raw.clone(), fields());
        assert_eq!(rec.confidence_score, 90);
        let rec = normalize(&SourceProfile::openstreetmap("Austin, TX"), "src-2", raw, fields());
        assert_eq!(rec.confidence_score, 80);
        assert_eq!(rec.source_id, "src-2");
    }

    #[test]
    fn confidence_is_clamped() {
        let mut profile = SourceProfile::openstreetmap("Austin, TX");
        profile.base_confidence = 250;
        let raw = RawCandidate::new("x", Coordinate::new(0.0, 0.0));
        assert_eq!(normalize(&profile, "s", raw, fields()).confidence_score, 100);
    }

    #[test]
    fn serializes_with_store_column_names() {
        let mut raw = RawCandidate::new("123", Coordinate::new(30.2618, -97.7176));
        raw.scraped = json!({ "sport": "pickleball" });
        let rec = normalize(&SourceProfile::openstreetmap("Austin, TX"), "osm", raw, fields());
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["address1"], "2100 E 3rd St, Austin, TX");
        assert_eq!(v["indoor_outdoor"], "outdoor");
        assert_eq!(v["access_type"], "public");
        assert_eq!(v["latitude"], 30.2618);
        assert_eq!(v["country"], "USA");
        assert_eq!(v["is_claimed"], false);
        assert_eq!(v["scraped_data"]["sport"], "pickleball");
        assert!(v.get("features").is_none());
    }
}
