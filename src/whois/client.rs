//! WHOIS network client.
//!
//! Defines the [`WhoisSource`] seam the lookup coordinator talks to, and
//! [`TcpWhoisClient`], the default implementation speaking plain WHOIS
//! over TCP port 43.

#![allow(clippy::missing_errors_doc)]

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::future::Future;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, instrument};

/// Standard WHOIS port, used when a server name carries none.
const WHOIS_PORT: u16 = 43;

/// Root server used to discover the registry server of a TLD.
const IANA_SERVER: &str = "whois.iana.org";

/// Upper bound on a single server response.
const MAX_RESPONSE_SIZE: usize = 1024 * 1024;

/// Registry plus at most two registrar hops.
const MAX_REFERRAL_DEPTH: u8 = 3;

static IANA_REFER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*(?:refer|whois):[ \t]*([^\s/]+)").unwrap());

static REGISTRAR_REFER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:Registrar WHOIS Server|ReferralServer):[ \t]*(?:r?whois://)?([^\s/]+)")
        .unwrap()
});

/// Source of raw WHOIS text for a domain.
///
/// Implementations perform the network round trip; the coordinator applies
/// the per-query timeout around [`fetch`](Self::fetch).
pub trait WhoisSource: Send + Sync + 'static {
    /// Fetch the raw WHOIS response for `domain`.
    fn fetch(&self, domain: &str) -> impl Future<Output = Result<String>> + Send;
}

/// WHOIS client over TCP.
///
/// Resolves the registry server through IANA, queries it, then follows a
/// registrar referral when the registry hands one out. The registrar's
/// answer is appended to the registry's.
///
/// # Example
///
/// ```ignore
/// let client = TcpWhoisClient::new();
/// let raw = client.fetch("example.com").await?;
/// ```
#[derive(Debug, Clone)]
pub struct TcpWhoisClient {
    root: String,
}

impl Default for TcpWhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TcpWhoisClient {
    /// Create a client rooted at the IANA WHOIS server.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(IANA_SERVER)
    }

    /// Create a client that discovers registry servers through `root`.
    ///
    /// `root` is a host name, optionally followed by `:port`.
    #[must_use]
    pub fn with_root(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Find the registry WHOIS server for a domain's TLD.
    async fn registry_server(&self, domain: &str) -> Result<String> {
        let tld = domain
            .rsplit('.')
            .next()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::InvalidDomain(domain.to_string()))?;

        let response = query_server(&self.root, tld).await?;
        extract_capture(&IANA_REFER, &response)
            .ok_or_else(|| Error::network(format!("no WHOIS server known for .{tld}")))
    }

    async fn lookup(&self, domain: &str) -> Result<String> {
        let domain = normalize_domain(domain)?;
        let mut server = self.registry_server(&domain).await?;
        let mut visited = HashSet::new();
        let mut combined = String::new();

        for depth in 0..MAX_REFERRAL_DEPTH {
            visited.insert(server.to_lowercase());
            debug!(server = %server, depth, "Querying WHOIS server");

            let response = match query_server(&server, &domain).await {
                Ok(text) => text,
                // A dead registrar server still leaves us the registry answer.
                Err(e) if depth > 0 => {
                    debug!(server = %server, error = %e, "Registrar referral failed");
                    break;
                }
                Err(e) => return Err(e),
            };

            if !combined.is_empty() {
                combined.push('\n');
            }
            combined.push_str(&response);

            match extract_capture(&REGISTRAR_REFER, &response) {
                Some(next) if !visited.contains(&next.to_lowercase()) => server = next,
                _ => break,
            }
        }

        Ok(combined)
    }
}

impl WhoisSource for TcpWhoisClient {
    #[instrument(skip(self))]
    async fn fetch(&self, domain: &str) -> Result<String> {
        self.lookup(domain).await
    }
}

/// Append the standard port unless the server name carries one.
fn server_addr(server: &str) -> String {
    if server.contains(':') {
        server.to_string()
    } else {
        format!("{server}:{WHOIS_PORT}")
    }
}

/// Send a single query to a WHOIS server and read the full answer.
async fn query_server(server: &str, query: &str) -> Result<String> {
    let mut stream = TcpStream::connect(server_addr(server))
        .await
        .map_err(|e| Error::network(format!("failed to connect to {server}: {e}")))?;

    stream
        .write_all(format!("{query}\r\n").as_bytes())
        .await
        .map_err(|e| Error::network(format!("failed to send query to {server}: {e}")))?;

    let mut response = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream
            .read(&mut buf)
            .await
            .map_err(|e| Error::network(format!("failed to read from {server}: {e}")))?;
        if n == 0 {
            break;
        }
        response.extend_from_slice(&buf[..n]);
        if response.len() > MAX_RESPONSE_SIZE {
            return Err(Error::network(format!("response from {server} too large")));
        }
    }

    Ok(decode(response))
}

/// UTF-8 with a Latin-1 fallback.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

fn extract_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_lowercase())
        .filter(|s| s.contains('.'))
}

/// Normalize user input into a queryable domain name.
///
/// Strips scheme, path and a trailing dot, and lowercases.
pub fn normalize_domain(domain: &str) -> Result<String> {
    let lowered = domain.trim().to_lowercase();
    let stripped = lowered
        .strip_prefix("http://")
        .or_else(|| lowered.strip_prefix("https://"))
        .unwrap_or(&lowered);
    let host = stripped
        .split('/')
        .next()
        .unwrap_or(stripped)
        .trim_end_matches('.');

    let valid = !host.is_empty()
        && host.contains('.')
        && !host.starts_with('.')
        && host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
    if !valid {
        return Err(Error::InvalidDomain(domain.trim().to_string()));
    }

    Ok(host.to_string())
}
