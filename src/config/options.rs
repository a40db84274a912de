// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::resolve::scope_city;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// City parks page, one `<p><strong>` block per facility.
    Municipal,
    /// Overpass API query over the scope's bounding box.
    OpenStreetMap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// JSON lines under a local directory.
    File,
    /// Supabase REST + `upsert_court_from_scrape` RPC.
    Supabase,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarvestOptions {
    pub source: SourceKind,
    /// Search scope, e.g. "Denver, CO".
    pub scope: String,
    /// Page URL override for the municipal source.
    pub url: Option<String>,
    /// Registered source name override. Municipal sources otherwise take
    /// their name from the scope's city.
    pub source_name: Option<String>,
    pub store: StoreKind,
    pub store_dir: PathBuf,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            source: SourceKind::OpenStreetMap,
            scope: s!(DEFAULT_SCOPE),
            url: None,
            source_name: None,
            store: StoreKind::File,
            store_dir: PathBuf::from(STORE_DIR),
        }
    }
}

impl HarvestOptions {
    pub fn profile(&self) -> SourceProfile {
        let mut profile = match self.source {
            SourceKind::Municipal => {
                let url = self.url.clone().unwrap_or_else(|| s!(MUNICIPAL_URL));
                SourceProfile::municipal(&self.municipal_name(), url, &self.scope)
            }
            SourceKind::OpenStreetMap => SourceProfile::openstreetmap(&self.scope),
        };
        if let Some(name) = present!(self.source_name.as_deref()) {
            profile.name = s!(name);
        }
        profile
    }

    /// Listing pages carry no ids, so records are keyed by facility name and
    /// each city needs a source of its own.
    fn municipal_name(&self) -> String {
        if self.scope.trim() == DEFAULT_SCOPE {
            return s!(MUNICIPAL_SOURCE_NAME);
        }
        match scope_city(&self.scope) {
            Some(city) => join!(&city, MUNICIPAL_NAME_SUFFIX),
            None => s!(MUNICIPAL_SOURCE_NAME),
        }
    }
}

/// Per-source registration and trust settings handed to the normalizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceProfile {
    pub name: String,
    pub source_type: String,
    pub base_url: Option<String>,
    /// 0..=100, copied onto every record from this source.
    pub base_confidence: u8,
    pub scope: Option<String>,
}

impl SourceProfile {
    pub fn municipal(name: &str, url: impl Into<String>, scope: &str) -> Self {
        Self {
            name: s!(name),
            source_type: s!("municipal"),
            base_url: Some(url.into()),
            base_confidence: MUNICIPAL_CONFIDENCE,
            scope: present!(Some(scope)).map(String::from),
        }
    }

    pub fn openstreetmap(scope: &str) -> Self {
        Self {
            name: s!(OSM_SOURCE_NAME),
            source_type: s!("aggregation"),
            base_url: Some(s!(OSM_URL)),
            base_confidence: OSM_CONFIDENCE,
            scope: present!(Some(scope)).map(String::from),
        }
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}
