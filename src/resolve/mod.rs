// src/resolve/mod.rs
//! Field resolution: turn a [`RawCandidate`] into [`ResolvedFields`].
//!
//! Every canonical field has its own ordered chain of [`Strategy`]s
//! (see [`chains`]). Reverse geocoding is shared between chains through one
//! [`EnrichmentCache`] per record, so a record costs at most one reverse call
//! no matter how many chains fall through to it.

mod cache;
pub mod chains;
mod locate;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::candidate::{FeatureHint, RawCandidate};
use crate::config::consts::{DEFAULT_SURFACE, PLACEHOLDER_NAME, UNKNOWN_REGION};
use crate::geo::{Coordinate, Geocoder};

pub use cache::EnrichmentCache;
pub use chains::{first_success, scope_city, scope_region, Strategy};
pub use locate::locate;

use chains::{ExplicitRegion, ReverseState, ScopeCity, ScopeRegion, TaggedCity, ADDRESS_CHAIN, NAME_CHAIN};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndoorOutdoor {
    Indoor,
    Outdoor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Public,
    Private,
    Membership,
}

impl AccessType {
    /// Total over every input. Missing, permissive-ish and unknown values are public.
    pub fn normalize(raw: Option<&str>) -> Self {
        let v = raw.map(|s| s.trim().to_ascii_lowercase()).unwrap_or_default();
        match v.as_str() {
            "private" => AccessType::Private,
            "membership" => AccessType::Membership,
            // "public", "yes", "permissive", "customers", "" and anything else
            _ => AccessType::Public,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessType::Public => "public",
            AccessType::Private => "private",
            AccessType::Membership => "membership",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedFields {
    /// Never empty.
    pub name: String,
    /// Never empty.
    pub address: String,
    pub city: Option<String>,
    /// "Unknown" when nothing resolves.
    pub region: String,
    pub coordinate: Coordinate,
    pub indoor_outdoor: IndoorOutdoor,
    pub access_type: AccessType,
    pub surface: String,
    pub court_count: u32,
    pub features: BTreeSet<String>,
}

/// Stateless across records; all per-record state lives in the cache it builds.
pub struct Resolver<'g> {
    geocoder: &'g dyn Geocoder,
    scope: Option<String>,
}

impl<'g> Resolver<'g> {
    pub fn new(geocoder: &'g dyn Geocoder, scope: Option<&str>) -> Self {
        Self { geocoder, scope: present!(scope).map(String::from) }
    }

    pub fn resolve(&self, raw: &RawCandidate) -> ResolvedFields {
        let mut cache = EnrichmentCache::new(self.geocoder, raw.coordinate);
        self.resolve_with(raw, &mut cache)
    }

    pub fn resolve_with(&self, raw: &RawCandidate, cache: &mut EnrichmentCache<'_>) -> ResolvedFields {
        let scope = self.scope.as_deref();

        let name = first_success(NAME_CHAIN, raw, cache).unwrap_or_else(|| {
            logw!(
                "Resolve: no name for {} at {} (tags: {:?})",
                raw.external_id,
                raw.coordinate.label(),
                raw.tags
            );
            s!(PLACEHOLDER_NAME)
        });

        let address = first_success(ADDRESS_CHAIN, raw, cache)
            .unwrap_or_else(|| raw.coordinate.label());

        let region_chain: [&dyn Strategy<String>; 3] = [&ExplicitRegion, &ReverseState, &ScopeRegion(scope)];
        let region = first_success(&region_chain, raw, cache)
            .unwrap_or_else(|| s!(UNKNOWN_REGION));

        let city_chain: [&dyn Strategy<String>; 2] = [&TaggedCity, &ScopeCity(scope)];
        let city = first_success(&city_chain, raw, cache);

        let indoor_outdoor = if raw.has(FeatureHint::Indoor) {
            IndoorOutdoor::Indoor
        } else {
            IndoorOutdoor::Outdoor
        };

        ResolvedFields {
            name,
            address,
            city,
            region,
            coordinate: raw.coordinate,
            indoor_outdoor,
            access_type: AccessType::normalize(raw.tag("access")),
            surface: raw.tag("surface").map_or_else(|| s!(DEFAULT_SURFACE), String::from),
            court_count: raw.court_count.unwrap_or(1),
            features: raw.feature_hints.iter().map(|h| s!(h.label())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::geo::{AddressComponents, BoundingBox, GeocodeError};

    /// Answers every reverse lookup with the same address and counts calls.
    struct CountingGeocoder {
        reverse: Option<AddressComponents>,
        calls: Cell<usize>,
    }

    impl CountingGeocoder {
        fn answering(pairs: &[(&str, &str)]) -> Self {
            Self { reverse: Some(pairs.iter().copied().collect()), calls: Cell::new(0) }
        }
        fn silent() -> Self {
            Self { reverse: None, calls: Cell::new(0) }
        }
    }

    impl Geocoder for CountingGeocoder {
        fn forward(&self, _: &str) -> Result<Coordinate, GeocodeError> {
            Err(GeocodeError::NotFound)
        }
        fn reverse(&self, _: Coordinate) -> Result<AddressComponents, GeocodeError> {
            self.calls.set(self.calls.get() + 1);
            self.reverse.clone().ok_or(GeocodeError::NotFound)
        }
        fn bounding_box(&self, _: &str) -> Result<BoundingBox, GeocodeError> {
            Err(GeocodeError::NotFound)
        }
    }

    fn bare() -> RawCandidate {
        RawCandidate::new("42", Coordinate::new(30.26181, -97.71759))
    }

    fn tagged(pairs: &[(&str, &str)]) -> RawCandidate {
        let mut raw = bare();
        raw.tags = pairs.iter().map(|(k, v)| (s!(*k), s!(*v))).collect();
        raw
    }

    #[test]
    fn explicit_name_short_circuits_everything() {
        let geo = CountingGeocoder::answering(&[("park", "Zilker Park")]);
        let mut raw = tagged(&[("operator", "Parks Dept")]);
        raw.name = Some(s!("  Mueller Courts "));
        raw.address_fragments = vec![s!("4730 Mueller Blvd")];
        raw.region_hint = Some(s!("TX"));

        let got = Resolver::new(&geo, None).resolve(&raw);
        assert_eq!(got.name, "  Mueller Courts ");
        assert_eq!(geo.calls.get(), 0);
    }

    #[test]
    fn operator_name_beats_reverse_lookup() {
        let geo = CountingGeocoder::answering(&[("park", "Zilker Park")]);
        let raw = tagged(&[("sport", "pickleball"), ("operator", "Parks Dept")]);
        let got = Resolver::new(&geo, Some("Austin, TX")).resolve(&raw);
        assert_eq!(got.name, "Parks Dept Pickleball Courts");
    }

    #[test]
    fn site_name_gets_suffix_once() {
        let geo = CountingGeocoder::answering(&[("park", "Riverside Park")]);
        assert_eq!(Resolver::new(&geo, None).resolve(&bare()).name, "Riverside Park Pickleball Courts");

        let geo = CountingGeocoder::answering(&[("park", "Riverside Pickleball Park")]);
        assert_eq!(Resolver::new(&geo, None).resolve(&bare()).name, "Riverside Pickleball Park");
    }

    #[test]
    fn road_then_placeholder() {
        let geo = CountingGeocoder::answering(&[("road", "Barton Springs Rd")]);
        assert_eq!(Resolver::new(&geo, None).resolve(&bare()).name, "Courts at Barton Springs Rd");

        let geo = CountingGeocoder::silent();
        assert_eq!(Resolver::new(&geo, None).resolve(&bare()).name, PLACEHOLDER_NAME);
    }

    #[test]
    fn reverse_called_once_across_all_chains() {
        let geo = CountingGeocoder::answering(&[
            ("road", "E 3rd St"),
            ("house_number", "2100"),
            ("city", "Austin"),
            ("state", "Texas"),
        ]);
        let got = Resolver::new(&geo, None).resolve(&bare());
        assert_eq!(got.name, "Courts at E 3rd St");
        assert_eq!(got.address, "2100, E 3rd St, Austin");
        assert_eq!(got.region, "Texas");
        assert_eq!(geo.calls.get(), 1);
    }

    #[test]
    fn failed_reverse_is_memoized_too() {
        let geo = CountingGeocoder::silent();
        let got = Resolver::new(&geo, None).resolve(&bare());
        assert_eq!(geo.calls.get(), 1);
        assert_eq!(got.address, "30.2618, -97.7176");
        assert_eq!(got.region, UNKNOWN_REGION);
        assert_eq!(got.city, None);
    }

    #[test]
    fn shared_cache_is_only_filled_on_demand() {
        let geo = CountingGeocoder::answering(&[("state", "Texas")]);
        let resolver = Resolver::new(&geo, Some("Austin, TX"));

        let mut raw = bare();
        raw.name = Some(s!("Pan Am Park"));
        raw.address_fragments = vec![s!("2100 E 3rd St")];
        raw.region_hint = Some(s!("TX"));
        let mut cache = EnrichmentCache::new(&geo, raw.coordinate);
        resolver.resolve_with(&raw, &mut cache);
        assert!(!cache.is_populated());

        raw.region_hint = None;
        let got = resolver.resolve_with(&raw, &mut cache);
        assert!(cache.is_populated());
        assert_eq!(got.region, "Texas");
        assert_eq!(geo.calls.get(), 1);
    }

    #[test]
    fn cache_is_per_record() {
        let geo = CountingGeocoder::silent();
        let resolver = Resolver::new(&geo, None);
        resolver.resolve(&bare());
        resolver.resolve(&bare());
        assert_eq!(geo.calls.get(), 2);
    }

    #[test]
    fn tagged_address_wins_and_skips_reverse() {
        let geo = CountingGeocoder::answering(&[("road", "Elsewhere")]);
        let mut raw = tagged(&[("name", "Austin High"), ("addr:city", "Austin")]);
        raw.name = Some(s!("Austin High"));
        raw.address_fragments = vec![s!("1715"), s!("W Cesar Chavez St"), s!("Austin")];
        raw.region_hint = Some(s!("TX"));

        let got = Resolver::new(&geo, Some("Denver, CO")).resolve(&raw);
        assert_eq!(got.address, "1715, W Cesar Chavez St, Austin");
        assert_eq!(got.region, "TX");
        assert_eq!(got.city.as_deref(), Some("Austin"));
        assert_eq!(geo.calls.get(), 0);
    }

    #[test]
    fn region_falls_back_to_scope() {
        let geo = CountingGeocoder::answering(&[("park", "Cheesman Park")]);
        let got = Resolver::new(&geo, Some("Denver, CO")).resolve(&bare());
        assert_eq!(got.region, "CO");
        assert_eq!(got.city.as_deref(), Some("Denver"));

        let got = Resolver::new(&geo, Some("Denver")).resolve(&bare());
        assert_eq!(got.region, UNKNOWN_REGION);
    }

    #[test]
    fn access_mapping() {
        assert_eq!(AccessType::normalize(Some("customers")), AccessType::Public);
        assert_eq!(AccessType::normalize(Some("yes")), AccessType::Public);
        assert_eq!(AccessType::normalize(Some("permissive")), AccessType::Public);
        assert_eq!(AccessType::normalize(Some(" Private ")), AccessType::Private);
        assert_eq!(AccessType::normalize(Some("membership")), AccessType::Membership);
        assert_eq!(AccessType::normalize(Some("no")), AccessType::Public);
        assert_eq!(AccessType::normalize(None), AccessType::Public);
    }

    #[test]
    fn defaults_and_features() {
        let geo = CountingGeocoder::silent();
        let mut raw = tagged(&[("access", "customers"), ("name", "Club")]);
        raw.name = Some(s!("Club"));
        raw.feature_hints.insert(FeatureHint::Lighted);
        raw.feature_hints.insert(FeatureHint::Indoor);

        let got = Resolver::new(&geo, None).resolve(&raw);
        assert_eq!(got.access_type, AccessType::Public);
        assert_eq!(got.surface, "Hard");
        assert_eq!(got.court_count, 1);
        assert_eq!(got.indoor_outdoor, IndoorOutdoor::Indoor);
        assert_eq!(got.features.into_iter().collect::<Vec<_>>(), vec!["Indoor", "Lighted"]);
    }
}
