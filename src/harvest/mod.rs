// src/harvest/mod.rs
mod run;
mod sources;

pub use run::{harvest_geodata, harvest_municipal, HarvestReport};
pub use sources::{GeodataService, HttpMarkup, MarkupSource, OverpassClient};
