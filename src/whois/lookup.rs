//! Concurrent lookup coordinator.
//!
//! Fans out one task per domain and fans the results back in, in the
//! order the domains were given.

use crate::config::QueryConfig;
use crate::error::{Error, Result};
use crate::whois::client::WhoisSource;
use crate::whois::parser::WhoisParser;
use crate::whois::types::WhoisResult;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Lookup coordinator.
///
/// Drives a [`WhoisSource`] and a [`WhoisParser`] for every configured
/// domain. A failure on one domain is recorded on that domain's result
/// and never affects the others.
///
/// # Example
///
/// ```ignore
/// let lookup = Lookup::new(config, TcpWhoisClient::new(), TextParser::new());
/// let results = lookup.lookup_all().await?;
/// ```
pub struct Lookup<C, P> {
    config: Arc<QueryConfig>,
    client: Arc<C>,
    parser: Arc<P>,
}

impl<C: WhoisSource, P: WhoisParser> Lookup<C, P> {
    /// Create a coordinator for a validated configuration.
    pub fn new(config: QueryConfig, client: C, parser: P) -> Self {
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
            parser: Arc::new(parser),
        }
    }

    /// Look up every configured domain concurrently.
    ///
    /// Returns one result per domain, in input order, once every lookup
    /// has finished.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if there are no domains to query.
    pub async fn lookup_all(&self) -> Result<Vec<WhoisResult>> {
        if self.config.domains.is_empty() {
            return Err(Error::config("no domains specified"));
        }

        tracing::debug!(
            domains = self.config.domains.len(),
            timeout_secs = self.config.timeout_secs,
            "Starting WHOIS lookups"
        );

        // One task per domain; the handle vector keeps each task's slot.
        let handles: Vec<_> = self
            .config
            .domains
            .iter()
            .cloned()
            .map(|domain| {
                let config = Arc::clone(&self.config);
                let client = Arc::clone(&self.client);
                let parser = Arc::clone(&self.parser);
                tokio::spawn(async move {
                    lookup_one(&config, client.as_ref(), parser.as_ref(), domain).await
                })
            })
            .collect();

        let joined = futures::future::join_all(handles).await;

        let results = joined
            .into_iter()
            .zip(&self.config.domains)
            .map(|(joined, domain)| {
                joined.unwrap_or_else(|e| {
                    tracing::warn!(domain = %domain, "Lookup task failed: {e}");
                    WhoisResult::failure(domain.clone(), Error::from(e), Duration::ZERO)
                })
            })
            .collect();

        Ok(results)
    }
}

/// Query and (unless in raw mode) parse a single domain.
async fn lookup_one<C: WhoisSource, P: WhoisParser>(
    config: &QueryConfig,
    client: &C,
    parser: &P,
    domain: String,
) -> WhoisResult {
    let start = Instant::now();
    let fetched = timeout(config.timeout(), client.fetch(&domain)).await;
    let query_time = start.elapsed();

    let raw_text = match fetched {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::debug!(domain = %domain, "WHOIS query failed: {e}");
            return WhoisResult::failure(domain, e, query_time);
        }
        Err(_) => {
            tracing::debug!(domain = %domain, "WHOIS query timed out");
            return WhoisResult::failure(domain, Error::Timeout(config.timeout_secs), query_time);
        }
    };

    tracing::debug!(domain = %domain, bytes = raw_text.len(), ?query_time, "WHOIS response received");

    let mut result = WhoisResult::fetched(domain, raw_text, query_time);
    if config.is_raw() {
        return result;
    }

    match parser.parse(&result.raw_text) {
        Ok(info) => result.parsed = Some(info),
        // Parse failures only surface in debug mode; otherwise the result
        // just carries no structured data.
        Err(e) if config.debug => result.error = Some(e),
        Err(e) => tracing::debug!(domain = %result.domain, "Ignoring parse failure: {e}"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::whois::types::{DomainRecord, WhoisInfo};
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Client that answers after a per-domain delay.
    struct MockClient {
        delays_ms: Vec<(&'static str, u64)>,
    }

    impl WhoisSource for MockClient {
        fn fetch(&self, domain: &str) -> impl Future<Output = Result<String>> + Send {
            let delay = self
                .delays_ms
                .iter()
                .find(|(d, _)| *d == domain)
                .map_or(0, |(_, ms)| *ms);
            let domain = domain.to_string();
            async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                if domain.starts_with("fail") {
                    return Err(Error::network("no such host"));
                }
                Ok(format!("Domain Name: {domain}\n"))
            }
        }
    }

    /// Parser that counts calls and rejects texts mentioning "garbage".
    #[derive(Default)]
    struct MockParser {
        calls: AtomicUsize,
    }

    impl WhoisParser for MockParser {
        fn parse(&self, raw: &str) -> Result<WhoisInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if raw.contains("garbage") {
                return Err(Error::parse("domain whois data is invalid"));
            }
            Ok(WhoisInfo {
                domain: Some(DomainRecord {
                    domain: Some(raw.trim().trim_start_matches("Domain Name: ").to_string()),
                    ..DomainRecord::default()
                }),
                ..WhoisInfo::default()
            })
        }
    }

    fn config(domains: &[&str], format: OutputFormat, debug: bool) -> QueryConfig {
        QueryConfig::new(
            domains.iter().map(|d| (*d).to_string()).collect(),
            format,
            1,
            debug,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_results_keep_input_order() {
        // Later domains finish first.
        let client = MockClient {
            delays_ms: vec![("a.com", 120), ("b.com", 60), ("c.com", 0)],
        };
        let lookup = Lookup::new(
            config(&["a.com", "b.com", "c.com"], OutputFormat::Terminal, false),
            client,
            MockParser::default(),
        );

        let results = lookup.lookup_all().await.unwrap();
        let domains: Vec<_> = results.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, vec!["a.com", "b.com", "c.com"]);
        assert!(results.iter().all(|r| r.parsed.is_some() && r.error.is_none()));
    }

    #[tokio::test]
    async fn test_timeout_is_isolated() {
        let client = MockClient {
            delays_ms: vec![("slow.com", 5_000)],
        };
        let lookup = Lookup::new(
            config(&["slow.com", "fast.com"], OutputFormat::Terminal, false),
            client,
            MockParser::default(),
        );

        let results = lookup.lookup_all().await.unwrap();
        let slow = &results[0];
        assert!(slow.error.as_ref().is_some_and(Error::is_timeout));
        assert!(slow.raw_text.is_empty());
        assert!(slow.parsed.is_none());
        assert!(slow.query_time < Duration::from_secs(3));

        let fast = &results[1];
        assert!(fast.error.is_none());
        assert!(fast.parsed.is_some());
    }

    #[tokio::test]
    async fn test_network_error_is_recorded() {
        let client = MockClient { delays_ms: vec![] };
        let lookup = Lookup::new(
            config(&["fail.com", "ok.com"], OutputFormat::Short, false),
            client,
            MockParser::default(),
        );

        let results = lookup.lookup_all().await.unwrap();
        assert!(matches!(results[0].error, Some(Error::Network(_))));
        assert!(results[0].raw_text.is_empty());
        assert!(results[1].parsed.is_some());
    }

    /// Log output collected by a test subscriber.
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_domains_stay_quiet_at_warn_level() {
        let logs = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&logs);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || LogSink(Arc::clone(&sink)))
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let lookup = Lookup::new(
            config(&["fail.com", "slow.com"], OutputFormat::Terminal, false),
            MockClient {
                delays_ms: vec![("slow.com", 5_000)],
            },
            MockParser::default(),
        );
        let results = lookup.lookup_all().await.unwrap();

        assert!(matches!(results[0].error, Some(Error::Network(_))));
        assert!(matches!(results[1].error, Some(Error::Timeout(1))));
        assert!(logs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_gated_by_debug() {
        let quiet = Lookup::new(
            config(&["garbage.com"], OutputFormat::Terminal, false),
            MockClient { delays_ms: vec![] },
            MockParser::default(),
        );
        let result = &quiet.lookup_all().await.unwrap()[0];
        assert!(result.error.is_none());
        assert!(result.parsed.is_none());
        assert!(!result.raw_text.is_empty());

        let verbose = Lookup::new(
            config(&["garbage.com"], OutputFormat::Terminal, true),
            MockClient { delays_ms: vec![] },
            MockParser::default(),
        );
        let result = &verbose.lookup_all().await.unwrap()[0];
        assert!(matches!(result.error, Some(Error::Parse(_))));
        assert!(result.parsed.is_none());
        assert!(!result.raw_text.is_empty());
    }

    #[tokio::test]
    async fn test_raw_mode_never_parses() {
        let lookup = Lookup::new(
            config(&["a.com", "b.com"], OutputFormat::Raw, false),
            MockClient { delays_ms: vec![] },
            MockParser::default(),
        );

        let results = lookup.lookup_all().await.unwrap();
        assert!(results.iter().all(|r| r.parsed.is_none() && !r.raw_text.is_empty()));
        assert_eq!(lookup.parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_domains_rejected_before_lookup() {
        let config = QueryConfig {
            domains: vec![],
            format: OutputFormat::Terminal,
            timeout_secs: 30,
            debug: false,
        };
        let lookup = Lookup::new(config, MockClient { delays_ms: vec![] }, MockParser::default());

        let err = lookup.lookup_all().await.unwrap_err();
        assert!(err.is_config());
        assert_eq!(lookup.parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookup_then_render_terminal() {
        use crate::output::{Render, TreeRenderer};

        let lookup = Lookup::new(
            config(&["example.com"], OutputFormat::Terminal, false),
            MockClient { delays_ms: vec![] },
            MockParser::default(),
        );
        let results = lookup.lookup_all().await.unwrap();

        let mut out = Vec::new();
        TreeRenderer::new(false).render(&results, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.starts_with("DOMAIN INFORMATION\n└─ Name: example.com\n"));
        assert!(output.contains("\nQuery time: "));
    }
}
