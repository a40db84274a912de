// src/resolve/chains.rs
//
// Fallback chains, one strategy per rung. Each chain is an ordered slice and the
// first strategy that returns Some wins.

use crate::candidate::RawCandidate;
use crate::config::consts::NAME_SUFFIX;

use super::EnrichmentCache;

pub trait Strategy<T> {
    fn attempt(&self, raw: &RawCandidate, cache: &mut EnrichmentCache<'_>) -> Option<T>;
}

pub fn first_success<T>(
    chain: &[&dyn Strategy<T>],
    raw: &RawCandidate,
    cache: &mut EnrichmentCache<'_>,
) -> Option<T> {
    chain.iter().find_map(|s| s.attempt(raw, cache))
}

/* ---------- name ---------- */

/// The source's own name, verbatim.
pub struct ExplicitName;
/// `"{operator} Pickleball Courts"`.
pub struct OperatorName;
/// Nearest named place from the reverse lookup.
pub struct SiteName;
/// `"Courts at {road}"`.
pub struct RoadName;

pub const NAME_CHAIN: &[&dyn Strategy<String>] = &[&ExplicitName, &OperatorName, &SiteName, &RoadName];

impl Strategy<String> for ExplicitName {
    fn attempt(&self, raw: &RawCandidate, _: &mut EnrichmentCache<'_>) -> Option<String> {
        raw.name.as_ref().filter(|n| !n.trim().is_empty()).cloned()
    }
}

impl Strategy<String> for OperatorName {
    fn attempt(&self, raw: &RawCandidate, _: &mut EnrichmentCache<'_>) -> Option<String> {
        raw.tag("operator").map(|op| join!(op, NAME_SUFFIX))
    }
}

impl Strategy<String> for SiteName {
    fn attempt(&self, _: &RawCandidate, cache: &mut EnrichmentCache<'_>) -> Option<String> {
        let site = cache.address()?.site_name()?;
        if site.to_lowercase().contains("pickleball") {
            Some(s!(site))
        } else {
            Some(join!(site, NAME_SUFFIX))
        }
    }
}

impl Strategy<String> for RoadName {
    fn attempt(&self, _: &RawCandidate, cache: &mut EnrichmentCache<'_>) -> Option<String> {
        cache.address()?.road().map(|road| join!("Courts at ", road))
    }
}

/* ---------- address ---------- */

/// Source fragments, most specific first.
pub struct TaggedAddress;
/// House number, road, city from the reverse lookup.
pub struct ReverseAddress;

pub const ADDRESS_CHAIN: &[&dyn Strategy<String>] = &[&TaggedAddress, &ReverseAddress];

impl Strategy<String> for TaggedAddress {
    fn attempt(&self, raw: &RawCandidate, _: &mut EnrichmentCache<'_>) -> Option<String> {
        join_parts(raw.address_fragments.iter().map(String::as_str))
    }
}

impl Strategy<String> for ReverseAddress {
    fn attempt(&self, _: &RawCandidate, cache: &mut EnrichmentCache<'_>) -> Option<String> {
        let addr = cache.address()?;
        join_parts([addr.house_number(), addr.road(), addr.city()].into_iter().flatten())
    }
}

fn join_parts<'a>(parts: impl Iterator<Item = &'a str>) -> Option<String> {
    let parts: Vec<&str> = parts.map(str::trim).filter(|p| !p.is_empty()).collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/* ---------- region ---------- */

/// `addr:state` or the source's own region.
pub struct ExplicitRegion;
/// `state` from the reverse lookup.
pub struct ReverseState;
/// Trailing segment of the search scope ("Denver, CO" → "CO").
pub struct ScopeRegion<'a>(pub Option<&'a str>);

impl Strategy<String> for ExplicitRegion {
    fn attempt(&self, raw: &RawCandidate, _: &mut EnrichmentCache<'_>) -> Option<String> {
        present!(raw.region_hint.as_deref()).map(String::from)
    }
}

impl Strategy<String> for ReverseState {
    fn attempt(&self, _: &RawCandidate, cache: &mut EnrichmentCache<'_>) -> Option<String> {
        cache.address()?.state().map(String::from)
    }
}

impl Strategy<String> for ScopeRegion<'_> {
    fn attempt(&self, _: &RawCandidate, _: &mut EnrichmentCache<'_>) -> Option<String> {
        self.0.and_then(scope_region)
    }
}

/* ---------- city ---------- */

pub struct TaggedCity;
/// Leading segment of the search scope ("Denver, CO" → "Denver").
pub struct ScopeCity<'a>(pub Option<&'a str>);

impl Strategy<String> for TaggedCity {
    fn attempt(&self, raw: &RawCandidate, _: &mut EnrichmentCache<'_>) -> Option<String> {
        raw.tag("addr:city").map(String::from)
    }
}

impl Strategy<String> for ScopeCity<'_> {
    fn attempt(&self, _: &RawCandidate, _: &mut EnrichmentCache<'_>) -> Option<String> {
        self.0.and_then(scope_city)
    }
}

/// Only a scope with a comma names a region.
pub fn scope_region(scope: &str) -> Option<String> {
    let mut parts = scope.split(',');
    let _first = parts.next();
    parts.last().map(str::trim).filter(|p| !p.is_empty()).map(String::from)
}

pub fn scope_city(scope: &str) -> Option<String> {
    present!(scope.split(',').next()).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_segments() {
        assert_eq!(scope_region("Denver, CO").as_deref(), Some("CO"));
        assert_eq!(scope_region("Portland, Multnomah County, OR").as_deref(), Some("OR"));
        assert_eq!(scope_region("Austin"), None);
        assert_eq!(scope_region("Austin, "), None);
        assert_eq!(scope_city("Denver, CO").as_deref(), Some("Denver"));
        assert_eq!(scope_city("Austin").as_deref(), Some("Austin"));
        assert_eq!(scope_city(" , TX"), None);
    }

    #[test]
    fn join_parts_skips_blanks() {
        assert_eq!(join_parts(["12", " ", "Main St"].into_iter()).as_deref(), Some("12, Main St"));
        assert_eq!(join_parts(["", "  "].into_iter()), None);
    }
}
