// src/harvest/run.rs
//
// One harvest = read a source, register it, then push every candidate through
// resolve → normalize → store. Only source-level failures abort; everything
// per-record ends up in the report counters.

use crate::candidate::RawCandidate;
use crate::config::consts::PICKLEBALL_FILTER;
use crate::config::options::SourceProfile;
use crate::error::HarvestError;
use crate::geo::Geocoder;
use crate::normalize::normalize;
use crate::progress::Progress;
use crate::resolve::{locate, Resolver};
use crate::specs::{municipal, overpass};
use crate::store::{SourceId, Store};

use super::sources::{GeodataService, MarkupSource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Items the adapter yielded: every geodata element, or every municipal
    /// listing with a usable address (shorter ones never count).
    pub found: usize,
    pub imported: usize,
    /// Items that could not be placed on the map.
    pub skipped: usize,
    /// Items the store refused (or could not be sent at all).
    pub errors: usize,
}

/// Municipal listing page: fetch, extract, forward-geocode each listing, store.
pub fn harvest_municipal(
    markup: &dyn MarkupSource,
    geocoder: &dyn Geocoder,
    store: &mut dyn Store,
    profile: &SourceProfile,
    progress: Option<&mut dyn Progress>,
) -> Result<HarvestReport, HarvestError> {
    let mut sink = Sink(progress);
    let url = profile
        .base_url
        .as_deref()
        .ok_or_else(|| HarvestError::Configuration(format!("source {:?} has no page URL", profile.name)))?;

    sink.log(&format!("Fetching {url}…"));
    let blocks = markup
        .fetch(url)
        .map_err(|e| HarvestError::unavailable(&profile.name, e))?;

    let listings = municipal::extract_listings(&blocks);
    let mut report = HarvestReport { found: listings.len(), ..Default::default() };
    logf!("{}: {} listings", profile.name, report.found);
    sink.begin(report.found);

    let Some(source_id) = register(store, profile, &mut report, &mut sink) else {
        return Ok(report);
    };

    let scope = profile.scope();
    let resolver = Resolver::new(geocoder, scope);
    for listing in listings {
        let Some(at) = locate(geocoder, &listing.name, &listing.address, scope) else {
            logw!("{}: could not place {:?} ({})", profile.name, listing.name, listing.address);
            report.skipped += 1;
            sink.skipped(&listing.name, "not geocodable");
            continue;
        };
        let raw = listing.into_candidate(at, scope);
        submit(store, profile, &source_id, &resolver, raw, &mut report, &mut sink);
    }

    sink.finish(&report);
    Ok(report)
}

/// Geodata service: bound the scope, query tagged features, store each one.
pub fn harvest_geodata(
    service: &dyn GeodataService,
    geocoder: &dyn Geocoder,
    store: &mut dyn Store,
    profile: &SourceProfile,
    progress: Option<&mut dyn Progress>,
) -> Result<HarvestReport, HarvestError> {
    let mut sink = Sink(progress);
    let scope = profile
        .scope()
        .ok_or_else(|| HarvestError::Configuration(format!("source {:?} has no scope", profile.name)))?;

    sink.log(&format!("Bounding {scope}…"));
    let bbox = geocoder
        .bounding_box(scope)
        .map_err(|e| HarvestError::unavailable(&profile.name, format!("no bounding box for {scope:?}: {e}")))?;

    sink.log("Querying geodata…");
    let elements = service
        .query_by_bbox(PICKLEBALL_FILTER, &bbox)
        .map_err(|e| HarvestError::unavailable(&profile.name, e))?;

    let (candidates, dropped) = overpass::extract_candidates(&elements);
    let mut report = HarvestReport { found: elements.len(), skipped: dropped, ..Default::default() };
    logf!("{}: {} elements, {} without position", profile.name, report.found, dropped);
    sink.begin(report.found);

    let Some(source_id) = register(store, profile, &mut report, &mut sink) else {
        return Ok(report);
    };

    let resolver = Resolver::new(geocoder, Some(scope));
    for raw in candidates {
        submit(store, profile, &source_id, &resolver, raw, &mut report, &mut sink);
    }

    sink.finish(&report);
    Ok(report)
}

/// A failed registration leaves nothing to attribute records to, so every
/// remaining item counts as an error.
fn register(
    store: &mut dyn Store,
    profile: &SourceProfile,
    report: &mut HarvestReport,
    sink: &mut Sink<'_>,
) -> Option<SourceId> {
    match store.ensure_source(&profile.name, &profile.source_type, profile.base_url.as_deref()) {
        Ok(id) => Some(id),
        Err(e) => {
            loge!("{}: source registration failed: {e}", profile.name);
            report.errors += report.found - report.skipped;
            sink.log(&format!("Source registration failed: {e}"));
            sink.finish(report);
            None
        }
    }
}

fn submit(
    store: &mut dyn Store,
    profile: &SourceProfile,
    source_id: &str,
    resolver: &Resolver<'_>,
    raw: RawCandidate,
    report: &mut HarvestReport,
    sink: &mut Sink<'_>,
) {
    let fields = resolver.resolve(&raw);
    let record = normalize(profile, source_id, raw, fields);

    match store.upsert_canonical_record(&record) {
        Ok(id) => {
            report.imported += 1;
            logd!("Stored {:?} as {id}", record.name);
            sink.done(&record.name);
            if report.imported % 10 == 0 {
                logf!("{}: {} imported so far", profile.name, report.imported);
            }
        }
        Err(e) => {
            report.errors += 1;
            loge!("Store rejected {:?} ({}): {e}", record.name, record.external_id);
            sink.skipped(&record.name, &e.to_string());
        }
    }
}

struct Sink<'p>(Option<&'p mut dyn Progress>);

impl Sink<'_> {
    fn log(&mut self, msg: &str) {
        if let Some(p) = self.0.as_deref_mut() {
            p.log(msg);
        }
    }

    fn begin(&mut self, total: usize) {
        if let Some(p) = self.0.as_deref_mut() {
            p.begin(total);
        }
    }

    fn done(&mut self, name: &str) {
        if let Some(p) = self.0.as_deref_mut() {
            p.item_done(name);
        }
    }

    fn skipped(&mut self, name: &str, reason: &str) {
        if let Some(p) = self.0.as_deref_mut() {
            p.item_skipped(name, reason);
        }
    }

    fn finish(&mut self, report: &HarvestReport) {
        if let Some(p) = self.0.as_deref_mut() {
            p.finish(report);
        }
    }
}
