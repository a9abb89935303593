//! Raw renderer: the verbatim WHOIS text of every domain.

use super::style::Palette;
use super::Render;
use crate::error::Result;
use crate::whois::WhoisResult;
use std::io::Write;

const RULE_WIDTH: usize = 80;

pub struct RawRenderer {
    palette: Palette,
}

impl RawRenderer {
    #[must_use]
    pub fn new(use_colors: bool) -> Self {
        Self {
            palette: Palette::new(use_colors),
        }
    }
}

impl Render for RawRenderer {
    fn render(&self, results: &[WhoisResult], out: &mut dyn Write) -> Result<()> {
        for (i, result) in results.iter().enumerate() {
            if i > 0 {
                writeln!(out, "\n{}\n", "-".repeat(RULE_WIDTH))?;
            }

            writeln!(out, "{} {}", self.palette.label("Domain:"), result.domain)?;
            writeln!(out)?;

            match &result.error {
                Some(err) => writeln!(out, "{} {err}", self.palette.error("ERROR:"))?,
                None => writeln!(out, "{}", result.raw_text)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::time::Duration;

    #[test]
    fn test_raw_output() {
        let ok = WhoisResult::fetched(
            "example.com",
            "Domain Name: EXAMPLE.COM\nRegistrar: IANA".into(),
            Duration::ZERO,
        );
        let failed = WhoisResult::failure("down.com", Error::Timeout(2), Duration::ZERO);

        let mut out = Vec::new();
        RawRenderer::new(false).render(&[ok, failed], &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        let expected = format!(
            "Domain: example.com\n\nDomain Name: EXAMPLE.COM\nRegistrar: IANA\n\n{}\n\nDomain: down.com\n\nERROR: WHOIS query timed out after 2s\n",
            "-".repeat(80)
        );
        assert_eq!(output, expected);
    }
}
