// src/specs/mod.rs
//! # Source adapters
//!
//! One module per external source. Each one knows *where the signals live* in
//! that source's payload and turns them into [`RawCandidate`]s, nothing more.
//!
//! ## What lives here
//! - **Pure extraction** from already-fetched payloads: content blocks for the
//!   municipal page, decoded Overpass elements for OpenStreetMap.
//! - **Source heuristics**: the bold-label-plus-address shape of a facility
//!   paragraph, the court-count pattern in feature lists, which OSM tags matter.
//! - Small **query builders** for the source (Overpass QL).
//!
//! ## What does **not** live here
//! - **Network I/O**: fetching pages and running queries is `harvest::sources`.
//! - **Fallback policy**: deciding a name, address or region when the source is
//!   silent is `resolve`.
//! - **Storage**: `store`.
//!
//! ## Typical call chain
//! ```text
//! harvest::run → sources::fetch → specs::<source>::extract_*
//!                              ↘  RawCandidate → resolve → normalize → store
//! ```
//!
//! ## Conventions
//! - Adapters never geocode. A municipal [`municipal::Listing`] has no coordinate
//!   until the runner locates it.
//! - Items an adapter cannot use are dropped here and counted by the caller.
//! - Tests run offline against inline fixtures.
//!
//! [`RawCandidate`]: crate::candidate::RawCandidate
pub mod municipal;
pub mod overpass;
