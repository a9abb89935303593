//! JSON renderer.

use super::Render;
use crate::error::Result;
use crate::whois::{WhoisInfo, WhoisResult};
use serde::Serialize;
use std::io::Write;

/// One array element: `domain`, `query_time`, then `error` or `data`.
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    domain: &'a str,
    query_time: String,
    #[serde(flatten)]
    outcome: Outcome<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome<'a> {
    Error(String),
    /// `null` when parsing was skipped or silently failed.
    Data(Option<&'a WhoisInfo>),
}

impl<'a> From<&'a WhoisResult> for JsonEntry<'a> {
    fn from(result: &'a WhoisResult) -> Self {
        let outcome = match &result.error {
            Some(err) => Outcome::Error(err.to_string()),
            None => Outcome::Data(result.parsed.as_ref()),
        };
        Self {
            domain: &result.domain,
            query_time: result.query_time_display(),
            outcome,
        }
    }
}

/// Writes all results as a single pretty-printed JSON array.
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Render for JsonRenderer {
    fn render(&self, results: &[WhoisResult], out: &mut dyn Write) -> Result<()> {
        let entries: Vec<JsonEntry<'_>> = results.iter().map(JsonEntry::from).collect();
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
        Ok(())
    }
}
