// tests/resolution_properties.rs
//
// Properties of field resolution that must hold for any input.
//
use proptest::prelude::*;

use court_harvest::geo::{AddressComponents, BoundingBox, Coordinate, GeocodeError, Geocoder};
use court_harvest::resolve::{AccessType, Resolver};
use court_harvest::RawCandidate;

/// Knows nothing, like a provider outage.
struct Blank;

impl Geocoder for Blank {
    fn forward(&self, _: &str) -> Result<Coordinate, GeocodeError> {
        Err(GeocodeError::NotFound)
    }
    fn reverse(&self, _: Coordinate) -> Result<AddressComponents, GeocodeError> {
        Err(GeocodeError::Provider("timeout".into()))
    }
    fn bounding_box(&self, _: &str) -> Result<BoundingBox, GeocodeError> {
        Err(GeocodeError::NotFound)
    }
}

fn at() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..90.0, -180.0f64..180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

proptest! {
    #[test]
    fn access_is_total(raw in proptest::option::of(".*")) {
        let got = AccessType::normalize(raw.as_deref());
        prop_assert!(matches!(got, AccessType::Public | AccessType::Private | AccessType::Membership));
    }

    #[test]
    fn unknown_access_is_public(raw in "[a-z]{1,12}") {
        prop_assume!(raw != "private" && raw != "membership");
        prop_assert_eq!(AccessType::normalize(Some(&raw)), AccessType::Public);
    }

    #[test]
    fn name_and_address_never_empty(coordinate in at(), name in proptest::option::of("[ \t]*")) {
        let mut raw = RawCandidate::new("x", coordinate);
        raw.name = name;
        let got = Resolver::new(&Blank, None).resolve(&raw);

        prop_assert_eq!(got.name, "Unnamed Pickleball Court");
        prop_assert_eq!(got.address, format!("{:.4}, {:.4}", coordinate.lat, coordinate.lng));
        prop_assert_eq!(got.region, "Unknown");
    }

    #[test]
    fn explicit_name_passes_through(coordinate in at(), name in "[A-Za-z0-9 ]*[A-Za-z0-9][A-Za-z0-9 ]*") {
        let mut raw = RawCandidate::new("x", coordinate);
        raw.name = Some(name.clone());
        let got = Resolver::new(&Blank, Some("Denver, CO")).resolve(&raw);

        prop_assert_eq!(got.name, name);
        prop_assert_eq!(got.region, "CO");
        prop_assert_eq!(got.city.as_deref(), Some("Denver"));
    }
}
