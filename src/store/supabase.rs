// src/store/supabase.rs
//
// Supabase (PostgREST) backend. Source registration goes through the `sources`
// table; records go through the `upsert_court_from_scrape` RPC, which owns
// dedup/merge.

use std::env;
use std::path::PathBuf;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{RecordId, SourceId, Store, StoreError};
use crate::core::net;
use crate::normalize::CanonicalRecord;

const URL_VARS: [&str; 2] = ["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];
const KEY_VARS: [&str; 2] = ["SUPABASE_SERVICE_KEY", "SUPABASE_SERVICE_ROLE_KEY"];
const UPSERT_RPC: &str = "upsert_court_from_scrape";

pub struct SupabaseStore {
    http: Client,
    url: String,
    key: String,
}

#[derive(Deserialize)]
struct IdRow {
    id: Value,
}

impl SupabaseStore {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self {
            http: net::client()?,
            url: url.into().trim_end_matches('/').to_string(),
            key: key.into(),
        })
    }

    /// Credentials from the environment, after loading `.env.local` then `.env` if present.
    pub fn from_env() -> Result<Self, StoreError> {
        for (file, loaded) in [(".env.local", dotenvy::from_filename(".env.local")), (".env", dotenvy::dotenv())] {
            if let Some(problem) = env_file_problem(loaded) {
                logw!("Store: ignoring {file}: {problem}");
            }
        }

        let url = first_var(&URL_VARS)
            .ok_or_else(|| StoreError::Config(format!("missing {}", URL_VARS.join(" or "))))?;
        let key = first_var(&KEY_VARS)
            .ok_or_else(|| StoreError::Config(format!("missing {}", KEY_VARS.join(" or "))))?;
        Self::new(url, key)
    }

    fn rest(&self, path: &str) -> String {
        join!(&self.url, "/rest/v1/", path)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.key).bearer_auth(&self.key)
    }
}

impl Store for SupabaseStore {
    fn ensure_source(&mut self, name: &str, source_type: &str, base_url: Option<&str>) -> Result<SourceId, StoreError> {
        let url = self.rest("sources");

        let filter = join!("eq.", name);
        let req = self.authed(self.http.get(&url)).query(&[("select", "id"), ("name", filter.as_str())]);
        let found: Vec<IdRow> = net::read_json(&url, net::send(&url, req)?)?;
        if let Some(row) = found.into_iter().next() {
            return Ok(id_string(row.id));
        }

        let payload = json!({ "name": name, "source_type": source_type, "base_url": base_url });
        let req = self
            .authed(self.http.post(&url))
            .header("Prefer", "return=representation")
            .json(&payload);
        let created: Vec<IdRow> = net::read_json(&url, net::send(&url, req)?)?;
        let row = created.into_iter().next().ok_or_else(|| StoreError::Rejected {
            what: format!("source {name:?}"),
            reason: s!("insert returned no row"),
        })?;
        logf!("Store: registered source {name:?}");
        Ok(id_string(row.id))
    }

    fn upsert_canonical_record(&mut self, record: &CanonicalRecord) -> Result<RecordId, StoreError> {
        let url = self.rest(&join!("rpc/", UPSERT_RPC));
        let req = self.authed(self.http.post(&url)).json(&json!({ "p": record }));
        let id: Value = net::read_json(&url, net::send(&url, req)?)?;

        match id {
            Value::Null => Err(StoreError::Rejected {
                what: format!("court {:?}", record.name),
                reason: s!("upsert returned null"),
            }),
            other => Ok(id_string(other)),
        }
    }
}

/// A missing env file is normal; anything else (bad syntax, unreadable) is worth a warning.
fn env_file_problem(loaded: dotenvy::Result<PathBuf>) -> Option<dotenvy::Error> {
    match loaded {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(e),
    }
}

fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|n| env::var(n).ok())
        .find(|v| !v.trim().is_empty())
}

fn id_string(v: Value) -> String {
    match v {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn missing_env_file_is_quiet() {
        let missing = dotenvy::Error::Io(io::Error::new(io::ErrorKind::NotFound, "no .env.local"));
        assert!(env_file_problem(Err(missing)).is_none());
        assert!(env_file_problem(Ok(PathBuf::from(".env"))).is_none());
    }

    #[test]
    fn malformed_env_file_is_reported() {
        let bad = dotenvy::Error::LineParse(s!("SUPABASE_URL=\"unterminated"), 13);
        assert!(matches!(env_file_problem(Err(bad)), Some(dotenvy::Error::LineParse(..))));

        let denied = dotenvy::Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(env_file_problem(Err(denied)).is_some());
    }

    #[test]
    fn unset_vars_yield_nothing() {
        assert_eq!(first_var(&["COURT_HARVEST_SURELY_UNSET_VAR"]), None);
    }
}
