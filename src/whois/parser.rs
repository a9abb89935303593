//! WHOIS text parser.
//!
//! Defines the [`WhoisParser`] seam and [`TextParser`], a pattern-driven
//! parser for the "Key: value" layout most registries and registrars use.
//! Block layouts (label on its own line, indented values below, as Nominet
//! answers) and bracketed labels (`[Domain Name]  EXAMPLE.JP`, as JPRS
//! answers) are rewritten into that layout before matching.

use crate::error::{Error, Result};
use crate::whois::types::{Contact, DomainRecord, WhoisInfo};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Turns raw WHOIS text into a [`WhoisInfo`].
///
/// Parsing is synchronous and free of side effects.
pub trait WhoisParser: Send + Sync + 'static {
    /// Parse a raw response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the text holds no usable record.
    fn parse(&self, raw: &str) -> Result<WhoisInfo>;
}

/// Build a line-anchored, case-insensitive `Label: value` pattern.
fn field(labels: &str) -> Regex {
    Regex::new(&format!(
        r"(?im)^[ \t]*(?:{labels})[ \t]*:[ \t]*(.*?)[ \t\r]*$"
    ))
    .unwrap()
}

static DOMAIN_NAME: Lazy<Regex> = Lazy::new(|| field("Domain Name|Domain"));
static DOMAIN_ID: Lazy<Regex> = Lazy::new(|| field("Registry Domain ID"));
static WHOIS_SERVER: Lazy<Regex> = Lazy::new(|| field("Registrar WHOIS Server"));
static STATUS: Lazy<Regex> = Lazy::new(|| field("Domain Status|Status|state"));
static NAME_SERVER: Lazy<Regex> =
    Lazy::new(|| field("Name Servers?|Nameservers?|nserver"));
static DNSSEC: Lazy<Regex> = Lazy::new(|| field("DNSSEC"));

static CREATED: Lazy<Regex> = Lazy::new(|| {
    field("Creation Date|Created Date|Created On|Created|Registration Time|Registered On")
});
static UPDATED: Lazy<Regex> = Lazy::new(|| {
    field("Updated Date|Last Updated On|Last Updated|Last Modified|Last Update|Modified|changed")
});
static EXPIRES: Lazy<Regex> = Lazy::new(|| {
    field(
        "Registry Expiry Date|Registrar Registration Expiration Date|Expiration Date|\
         Expiry Date|Expires On|Expires|Expiration Time|paid-till",
    )
});

static REGISTRAR_NAME: Lazy<Regex> = Lazy::new(|| field("Registrar|Registrar Name|Sponsoring Registrar"));
static REGISTRAR_ID: Lazy<Regex> = Lazy::new(|| field("Registrar IANA ID"));
static REGISTRAR_EMAIL: Lazy<Regex> = Lazy::new(|| field("Registrar Abuse Contact Email"));
static REGISTRAR_PHONE: Lazy<Regex> = Lazy::new(|| field("Registrar Abuse Contact Phone"));
static REGISTRAR_URL: Lazy<Regex> = Lazy::new(|| field("Registrar URL|Referral URL"));

/// Field patterns for one contact role.
struct ContactPatterns {
    id: Regex,
    name: Regex,
    organization: Regex,
    email: Regex,
    phone: Regex,
    country: Regex,
}

impl ContactPatterns {
    fn for_role(role: &str) -> Self {
        Self {
            id: field(&format!("Registry {role} ID")),
            name: field(&format!("{role} Name")),
            organization: field(&format!("{role} Organi[sz]ation|{role} Org")),
            email: field(&format!("{role} Email|{role} E-mail")),
            phone: field(&format!("{role} Phone")),
            country: field(&format!("{role} Country|{role} Country Code")),
        }
    }

    fn extract(&self, text: &str) -> Option<Contact> {
        let contact = Contact {
            id: first(&self.id, text),
            name: first(&self.name, text),
            organization: first(&self.organization, text),
            email: first(&self.email, text),
            phone: first(&self.phone, text),
            country: first(&self.country, text),
            referral_url: None,
        };
        (!contact.is_empty()).then_some(contact)
    }
}

/// `[Label]   value`, optionally behind a `a. ` item marker.
static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[a-z]\.[ \t]*)?\[([^\]]+)\][ \t]*(.*)$").unwrap());

/// A line that already reads `Label: value`.
static KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9 ._/()-]*:(?:[ \t]|$)").unwrap());

static REGISTRANT: Lazy<ContactPatterns> = Lazy::new(|| ContactPatterns::for_role("Registrant"));
static ADMIN: Lazy<ContactPatterns> = Lazy::new(|| ContactPatterns::for_role("Admin"));
static TECH: Lazy<ContactPatterns> = Lazy::new(|| ContactPatterns::for_role("Tech"));

/// Phrases registries use when the domain does not exist.
const NOT_FOUND: &[&str] = &[
    "no match",
    "not found",
    "no data found",
    "no entries found",
    "status: free",
    "status: available",
    "no object found",
];

/// Phrases registries use when the client is throttled.
const LIMIT_EXCEEDED: &[&str] = &[
    "limit exceeded",
    "query rate",
    "too many requests",
    "exceeded the maximum",
];

/// Pattern-driven WHOIS parser.
///
/// # Example
///
/// ```ignore
/// let info = TextParser.parse(&raw)?;
/// println!("{:?}", info.registrar_name());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl TextParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl WhoisParser for TextParser {
    fn parse(&self, raw: &str) -> Result<WhoisInfo> {
        let text = normalize_layout(raw);
        let info = WhoisInfo {
            domain: extract_domain(&text),
            registrar: extract_registrar(&text),
            registrant: REGISTRANT.extract(&text),
            administrative: ADMIN.extract(&text),
            technical: TECH.extract(&text),
        };

        let has_name = info
            .domain
            .as_ref()
            .is_some_and(|d| d.domain.is_some());
        if has_name || info.registrar_name().is_some() {
            return Ok(info);
        }

        let lower = raw.to_lowercase();
        if NOT_FOUND.iter().any(|p| lower.contains(p)) {
            Err(Error::parse("domain is not found"))
        } else if LIMIT_EXCEEDED.iter().any(|p| lower.contains(p)) {
            Err(Error::parse("domain query limit exceeded"))
        } else {
            Err(Error::parse("domain whois data is invalid"))
        }
    }
}

/// Rewrite block and bracketed layouts into `Label: value` lines.
///
/// A line ending in a bare `Label:` opens a block; every following line
/// indented deeper than the label becomes `Label: line`, unless it already
/// carries its own label. A blank or shallower line closes the block.
fn normalize_layout(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut block: Option<(&str, usize)> = None;

    for line in raw.lines() {
        let line = line.trim_end();
        let content = line.trim_start();
        let indent = line.len() - content.len();

        if let Some((label, depth)) = block {
            if !content.is_empty() && indent > depth {
                if !KEY_VALUE.is_match(content) {
                    out.push_str(label);
                    out.push_str(": ");
                }
                out.push_str(content);
                out.push('\n');
                continue;
            }
            block = None;
        }

        if let Some(caps) = BRACKETED.captures(content) {
            out.push_str(caps[1].trim());
            out.push_str(": ");
            out.push_str(&caps[2]);
            out.push('\n');
            continue;
        }

        if let Some(label) = content
            .strip_suffix(':')
            .filter(|l| !l.is_empty() && !l.contains(':'))
        {
            block = Some((label, indent));
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}

fn extract_domain(text: &str) -> Option<DomainRecord> {
    let name = first(&DOMAIN_NAME, text).map(|n| n.to_lowercase());
    let extension = name
        .as_deref()
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_string());

    let created_date = first(&CREATED, text);
    let updated_date = first(&UPDATED, text);
    let expiration_date = first(&EXPIRES, text);

    let record = DomainRecord {
        id: first(&DOMAIN_ID, text),
        domain: name,
        extension,
        whois_server: first(&WHOIS_SERVER, text),
        status: all(&STATUS, text, |v| {
            v.split_whitespace().next().map(str::to_string)
        }),
        name_servers: all(&NAME_SERVER, text, |v| {
            v.split_whitespace()
                .next()
                .map(|ns| ns.trim_end_matches('.').to_lowercase())
        }),
        dnssec: first(&DNSSEC, text).is_some_and(|v| is_signed(&v)),
        created_date_in_time: created_date.as_deref().and_then(parse_date),
        updated_date_in_time: updated_date.as_deref().and_then(parse_date),
        expiration_date_in_time: expiration_date.as_deref().and_then(parse_date),
        created_date,
        updated_date,
        expiration_date,
    };

    (record != DomainRecord::default()).then_some(record)
}

fn extract_registrar(text: &str) -> Option<Contact> {
    let contact = Contact {
        id: first(&REGISTRAR_ID, text),
        name: first(&REGISTRAR_NAME, text),
        email: first(&REGISTRAR_EMAIL, text),
        phone: first(&REGISTRAR_PHONE, text),
        referral_url: first(&REGISTRAR_URL, text),
        ..Contact::default()
    };
    (!contact.is_empty()).then_some(contact)
}

fn is_signed(value: &str) -> bool {
    let lower = value.to_lowercase();
    (lower.contains("signed") && !lower.contains("unsigned")) || lower == "yes"
}

/// First non-empty value for a field.
fn first(re: &Regex, text: &str) -> Option<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|v| {
            !v.is_empty() && !v.eq_ignore_ascii_case("redacted") && !v.eq_ignore_ascii_case("n/a")
        })
        .map(str::to_string)
}

/// Every distinct value for a repeated field, in order of appearance.
fn all(re: &Regex, text: &str, normalize: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for caps in re.captures_iter(text) {
        let Some(value) = caps.get(1).and_then(|m| normalize(m.as_str().trim())) else {
            continue;
        };
        if !value.is_empty() && !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

/// Parse the date layouts registries commonly emit.
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%d-%b-%Y",
        "%d-%B-%Y",
        "%Y.%m.%d",
        "%Y/%m/%d",
        "%d.%m.%Y",
        "%d/%m/%Y",
        "%b %d %Y",
    ];

    let cleaned = date_str
        .trim()
        .replace(" (UTC)", "")
        .replace(" UTC", "")
        .replace(" +0000", "");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Some(dt.and_utc());
        }
        if let Ok(d) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
