// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod candidate;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod geo;
pub mod harvest;
pub mod normalize;
pub mod progress;
pub mod resolve;
pub mod specs;
pub mod store;

pub use candidate::{FeatureHint, RawCandidate};
pub use error::HarvestError;
pub use harvest::{harvest_geodata, harvest_municipal, HarvestReport};
pub use normalize::{normalize, CanonicalRecord};
pub use resolve::{ResolvedFields, Resolver};
pub use store::{Store, StoreError};
