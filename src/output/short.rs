//! Short (tabular) renderer.

use super::Render;
use crate::error::Result;
use crate::whois::WhoisResult;
use std::io::Write;

const HEADER: [&str; 4] = ["DOMAIN", "REGISTRAR", "EXPIRES", "STATUS"];

/// Spaces between the widest cell of a column and the next column.
const PADDING: usize = 2;

/// One row per domain: domain, registrar, expiry and first status.
#[derive(Debug, Default)]
pub struct ShortRenderer;

impl ShortRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn row(result: &WhoisResult) -> [String; 4] {
    let domain = result.domain.clone();

    if let Some(err) = &result.error {
        return [domain, "ERROR".into(), "-".into(), err.to_string()];
    }

    let Some(info) = &result.parsed else {
        return [domain, "N/A".into(), "-".into(), "Parse failed".into()];
    };

    [
        domain,
        info.registrar_name().unwrap_or("N/A").to_string(),
        info.expiration_date().unwrap_or("N/A").to_string(),
        info.first_status().unwrap_or("N/A").to_string(),
    ]
}

impl Render for ShortRenderer {
    fn render(&self, results: &[WhoisResult], out: &mut dyn Write) -> Result<()> {
        let mut rows = vec![HEADER.map(String::from)];
        rows.extend(results.iter().map(row));

        let mut widths = [0usize; 4];
        for cells in &rows {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for cells in &rows {
            let mut line = String::new();
            for (i, cell) in cells.iter().enumerate() {
                if i == cells.len() - 1 {
                    line.push_str(cell);
                } else {
                    let pad = widths[i] + PADDING - cell.chars().count();
                    line.push_str(cell);
                    line.push_str(&" ".repeat(pad));
                }
            }
            writeln!(out, "{line}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::whois::{Contact, DomainRecord, WhoisInfo};
    use std::time::Duration;

    fn render(results: &[WhoisResult]) -> String {
        let mut out = Vec::new();
        ShortRenderer::new().render(results, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_one_failing_one_succeeding() {
        let failed = WhoisResult::failure(
            "nxdomain.test",
            Error::network("lookup failed"),
            Duration::from_millis(1),
        );
        let mut ok = WhoisResult::fetched("example.com", "raw".into(), Duration::from_millis(1));
        ok.parsed = Some(WhoisInfo {
            domain: Some(DomainRecord {
                status: vec!["clientDeleteProhibited".into(), "ok".into()],
                expiration_date: Some("2025-08-13T04:00:00Z".into()),
                ..DomainRecord::default()
            }),
            registrar: Some(Contact {
                name: Some("IANA".into()),
                ..Contact::default()
            }),
            ..WhoisInfo::default()
        });

        let expected = "\
DOMAIN         REGISTRAR  EXPIRES               STATUS
nxdomain.test  ERROR      -                     Network error: lookup failed
example.com    IANA       2025-08-13T04:00:00Z  clientDeleteProhibited
";
        assert_eq!(render(&[failed, ok]), expected);
    }

    #[test]
    fn test_missing_fields() {
        let unparsed = WhoisResult::fetched("odd.com", "???".into(), Duration::ZERO);
        let mut sparse = WhoisResult::fetched("bare.com", "raw".into(), Duration::ZERO);
        sparse.parsed = Some(WhoisInfo::default());

        let expected = "\
DOMAIN    REGISTRAR  EXPIRES  STATUS
odd.com   N/A        -        Parse failed
bare.com  N/A        N/A      N/A
";
        assert_eq!(render(&[unparsed, sparse]), expected);
    }
}
