// src/cli.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::config::options::{HarvestOptions, SourceKind, StoreKind};
use crate::core::net::NetError;
use crate::error::HarvestError;
use crate::geo::Nominatim;
use crate::harvest::{harvest_geodata, harvest_municipal, HarvestReport, HttpMarkup, OverpassClient};
use crate::progress::Progress;
use crate::store::{FileStore, Store, StoreError, SupabaseStore};

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Harvest(HarvestOptions),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("unknown {what}: {value}")]
    UnknownValue { what: &'static str, value: String },
    #[error("unknown arg: {0}")]
    UnknownArg(String),
    #[error(transparent)]
    Harvest(#[from] HarvestError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Net(#[from] NetError),
}

pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = HarvestOptions::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--source" => {
                let v = args.next().ok_or(CliError::MissingValue("--source"))?;
                opts.source = match v.to_ascii_lowercase().as_str() {
                    "osm" | "openstreetmap" => SourceKind::OpenStreetMap,
                    "municipal" | "city" => SourceKind::Municipal,
                    _ => return Err(CliError::UnknownValue { what: "source", value: v }),
                };
            }
            "--scope" => opts.scope = args.next().ok_or(CliError::MissingValue("--scope"))?,
            "--url" => opts.url = Some(args.next().ok_or(CliError::MissingValue("--url"))?),
            "--source-name" => {
                opts.source_name = Some(args.next().ok_or(CliError::MissingValue("--source-name"))?);
            }
            "--store" => {
                let v = args.next().ok_or(CliError::MissingValue("--store"))?;
                opts.store = match v.to_ascii_lowercase().as_str() {
                    "file" => StoreKind::File,
                    "supabase" => StoreKind::Supabase,
                    _ => return Err(CliError::UnknownValue { what: "store", value: v }),
                };
            }
            "--store-dir" => {
                opts.store_dir = PathBuf::from(args.next().ok_or(CliError::MissingValue("--store-dir"))?);
            }
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(CliError::UnknownArg(a)),
        }
    }

    Ok(Command::Harvest(opts))
}

pub fn run(opts: &HarvestOptions) -> Result<HarvestReport, CliError> {
    let profile = opts.profile();
    let geocoder = Nominatim::public()?;
    let mut store: Box<dyn Store> = match opts.store {
        StoreKind::File => Box::new(FileStore::new(&opts.store_dir)),
        StoreKind::Supabase => Box::new(SupabaseStore::from_env()?),
    };
    let mut progress = ConsoleProgress::default();

    logf!("Harvesting {} for {:?}", profile.name, opts.scope);
    let report = match opts.source {
        SourceKind::Municipal => {
            let markup = HttpMarkup::new()?;
            harvest_municipal(&markup, &geocoder, store.as_mut(), &profile, Some(&mut progress))?
        }
        SourceKind::OpenStreetMap => {
            let service = OverpassClient::public()?;
            harvest_geodata(&service, &geocoder, store.as_mut(), &profile, Some(&mut progress))?
        }
    };

    println!(
        "{}: found {}, imported {}, skipped {}, errors {}",
        profile.name, report.found, report.imported, report.skipped, report.errors
    );
    Ok(report)
}

/// Human-facing progress on stderr; detail goes to the log.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    seen: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("{total} items to process");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, name: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] ✓ {name}", self.seen, self.total);
    }

    fn item_skipped(&mut self, name: &str, reason: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] ✗ {name}: {reason}", self.seen, self.total);
    }

    fn finish(&mut self, report: &HarvestReport) {
        if report.errors > 0 {
            eprintln!("{} items failed to store; see the log for details", report.errors);
        }
    }
}
