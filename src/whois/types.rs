//! WHOIS types and data structures.
//!
//! This module provides the structured WHOIS record produced by a parser
//! and the per-domain lookup result produced by the coordinator.

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Structured WHOIS record.
///
/// Every field is optional: absence means the registry response did not
/// contain it, not that anything went wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisInfo {
    /// Domain registration details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainRecord>,
    /// Sponsoring registrar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<Contact>,
    /// Registrant contact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrant: Option<Contact>,
    /// Administrative contact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative: Option<Contact>,
    /// Technical contact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical: Option<Contact>,
}

impl WhoisInfo {
    /// Registrar name, if present and non-empty.
    #[must_use]
    pub fn registrar_name(&self) -> Option<&str> {
        self.registrar
            .as_ref()
            .and_then(|r| r.name.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// Raw expiration date string, if present and non-empty.
    #[must_use]
    pub fn expiration_date(&self) -> Option<&str> {
        self.domain
            .as_ref()
            .and_then(|d| d.expiration_date.as_deref())
            .filter(|d| !d.is_empty())
    }

    /// First reported domain status.
    #[must_use]
    pub fn first_status(&self) -> Option<&str> {
        self.domain
            .as_ref()
            .and_then(|d| d.status.first())
            .map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.domain.is_none()
            && self.registrar.is_none()
            && self.registrant.is_none()
            && self.administrative.is_none()
            && self.technical.is_none()
    }
}

/// Domain sub-record of a WHOIS response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Registry object id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Domain name as reported by the registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Top-level extension (e.g. "com")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Registrar WHOIS server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whois_server: Option<String>,
    /// EPP status codes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
    /// Delegated nameservers, in registry order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_servers: Vec<String>,
    /// Whether the delegation is DNSSEC-signed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dnssec: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date_in_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date_in_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date_in_time: Option<DateTime<Utc>>,
}

/// Contact sub-record (registrar, registrant, admin, tech).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Registrar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_url: Option<String>,
}

impl Contact {
    /// Check whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_none()
            && self.organization.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.country.is_none()
            && self.referral_url.is_none()
    }
}

/// Outcome of looking up a single domain.
///
/// Created exactly once by [`Lookup`](crate::whois::Lookup) and read-only
/// afterwards. Either `error` carries a network/timeout failure and
/// `raw_text` is empty, or `raw_text` holds the server's answer.
#[derive(Debug)]
pub struct WhoisResult {
    /// Domain as given on the command line
    pub domain: String,
    /// Verbatim WHOIS response (empty if the query failed)
    pub raw_text: String,
    /// Structured record, when parsing ran and succeeded
    pub parsed: Option<WhoisInfo>,
    /// Wall-clock time of the client call
    pub query_time: Duration,
    /// Network/timeout error, or a parse error in debug mode
    pub error: Option<Error>,
}

impl WhoisResult {
    /// Create a result for a failed query.
    pub fn failure(domain: impl Into<String>, error: Error, query_time: Duration) -> Self {
        Self {
            domain: domain.into(),
            raw_text: String::new(),
            parsed: None,
            query_time,
            error: Some(error),
        }
    }

    /// Create a result for a successful query, before parsing.
    pub fn fetched(domain: impl Into<String>, raw_text: String, query_time: Duration) -> Self {
        Self {
            domain: domain.into(),
            raw_text,
            parsed: None,
            query_time,
            error: None,
        }
    }

    /// Check if the lookup (or, in debug mode, the parse) failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Human-readable query time, e.g. `152.3ms`.
    #[must_use]
    pub fn query_time_display(&self) -> String {
        format_duration(self.query_time)
    }
}

/// Format a duration with millisecond precision below one second and
/// two decimals above it.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs >= 1.0 {
        format!("{:.2}s", secs)
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", secs * 1000.0)
    } else {
        format!("{}µs", d.as_micros())
    }
}
