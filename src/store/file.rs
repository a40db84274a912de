// src/store/file.rs
//
// Local store for dry runs and offline work:
//   <dir>/sources.json  registry of harvested sources
//   <dir>/courts.jsonl  one canonical record per line
// Records are keyed by (source_id, external_id); no cross-source matching.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{RecordId, SourceId, Store, StoreError};
use crate::config::consts::{RECORDS_FILE, SOURCES_FILE};
use crate::core::sanitize::slug;
use crate::normalize::CanonicalRecord;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
struct SourceEntry {
    id: SourceId,
    name: String,
    source_type: String,
    base_url: Option<String>,
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Everything stored so far, in file order.
    pub fn records(&self) -> Result<Vec<CanonicalRecord>, StoreError> {
        let Some(text) = read_optional(&self.dir.join(RECORDS_FILE))? else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            out.push(serde_json::from_str(line)?);
        }
        Ok(out)
    }

    fn sources(&self) -> Result<Vec<SourceEntry>, StoreError> {
        match read_optional(&self.dir.join(SOURCES_FILE))? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_sources(&self, sources: &[SourceEntry]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(SOURCES_FILE), serde_json::to_string_pretty(sources)?)?;
        Ok(())
    }

    fn save_records(&self, records: &[CanonicalRecord]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let file = fs::File::create(self.dir.join(RECORDS_FILE))?;
        let mut writer = BufWriter::new(file);
        for rec in records {
            serde_json::to_writer(&mut writer, rec)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Store for FileStore {
    fn ensure_source(&mut self, name: &str, source_type: &str, base_url: Option<&str>) -> Result<SourceId, StoreError> {
        let mut sources = self.sources()?;
        if let Some(existing) = sources.iter().find(|s| s.name == name) {
            return Ok(existing.id.clone());
        }

        let base = slug(name);
        let mut id = base.clone();
        let mut n = 2;
        while sources.iter().any(|s| s.id == id) {
            id = format!("{base}_{n}");
            n += 1;
        }

        sources.push(SourceEntry {
            id: id.clone(),
            name: s!(name),
            source_type: s!(source_type),
            base_url: base_url.map(String::from),
        });
        self.save_sources(&sources)?;
        logf!("Store: registered source {name:?} as {id}");
        Ok(id)
    }

    fn upsert_canonical_record(&mut self, record: &CanonicalRecord) -> Result<RecordId, StoreError> {
        let mut records = self.records()?;
        let same = |r: &CanonicalRecord| r.source_id == record.source_id && r.external_id == record.external_id;

        match records.iter_mut().find(|r| same(r)) {
            Some(slot) => *slot = record.clone(),
            None => records.push(record.clone()),
        }
        self.save_records(&records)?;
        Ok(format!("{}:{}", record.source_id, record.external_id))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
