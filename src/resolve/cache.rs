// src/resolve/cache.rs
use crate::geo::{AddressComponents, Coordinate, GeocodeError, Geocoder};

/// Reverse-geocode memo for exactly one record.
///
/// Empty until a strategy asks for it; the first ask makes the one and only
/// `reverse()` call, and every later ask (hit or miss) reads the memo.
pub struct EnrichmentCache<'g> {
    geocoder: &'g dyn Geocoder,
    at: Coordinate,
    lookup: Option<Option<AddressComponents>>,
}

impl<'g> EnrichmentCache<'g> {
    pub fn new(geocoder: &'g dyn Geocoder, at: Coordinate) -> Self {
        Self { geocoder, at, lookup: None }
    }

    /// Whether the reverse lookup has been attempted.
    pub fn is_populated(&self) -> bool {
        self.lookup.is_some()
    }

    pub fn address(&mut self) -> Option<&AddressComponents> {
        let (geocoder, at) = (self.geocoder, self.at);
        self.lookup
            .get_or_insert_with(|| match geocoder.reverse(at) {
                Ok(addr) if !addr.is_empty() => Some(addr),
                Ok(_) | Err(GeocodeError::NotFound) => {
                    logd!("Resolve: no reverse address for {}", at.label());
                    None
                }
                Err(e) => {
                    logw!("Resolve: reverse lookup failed for {}: {e}", at.label());
                    None
                }
            })
            .as_ref()
    }
}
