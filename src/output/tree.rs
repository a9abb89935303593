//! Colorized tree renderer (default terminal output).

use super::style::Palette;
use super::Render;
use crate::error::Result;
use crate::whois::{DomainRecord, WhoisInfo, WhoisResult};
use chrono::{DateTime, Utc};
use std::io::Write;

/// One line of a tree section; `label` is `None` for bare entries.
struct TreeItem {
    label: Option<&'static str>,
    value: String,
}

/// Items of one section, rendered with `├─` / `└─` prefixes.
#[derive(Default)]
struct TreeSection {
    items: Vec<TreeItem>,
}

impl TreeSection {
    /// Add a labelled field; empty values are skipped.
    fn add(&mut self, label: &'static str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.items.push(TreeItem {
                label: Some(label),
                value: value.to_string(),
            });
        }
    }

    fn add_plain(&mut self, value: &str) {
        if !value.is_empty() {
            self.items.push(TreeItem {
                label: None,
                value: value.to_string(),
            });
        }
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn write_to(&self, out: &mut dyn Write, palette: Palette) -> Result<()> {
        let last = self.items.len().saturating_sub(1);
        for (i, item) in self.items.iter().enumerate() {
            let prefix = if i == last { "└─" } else { "├─" };
            match item.label {
                Some(label) => writeln!(out, "{prefix} {}: {}", palette.label(label), item.value)?,
                None => writeln!(out, "{prefix} {}", item.value)?,
            }
        }
        Ok(())
    }
}

/// Renders each result as titled tree sections.
pub struct TreeRenderer {
    palette: Palette,
}

impl TreeRenderer {
    #[must_use]
    pub fn new(use_colors: bool) -> Self {
        Self {
            palette: Palette::new(use_colors),
        }
    }

    fn write_section(
        &self,
        out: &mut dyn Write,
        title: &str,
        section: &TreeSection,
        leading_blank: bool,
    ) -> Result<()> {
        if section.is_empty() {
            return Ok(());
        }
        if leading_blank {
            writeln!(out)?;
        }
        writeln!(out, "{}", self.palette.header(title))?;
        section.write_to(out, self.palette)
    }

    fn render_info(&self, out: &mut dyn Write, info: &WhoisInfo, now: DateTime<Utc>) -> Result<()> {
        let mut printed = false;

        if let Some(domain) = &info.domain {
            let section = self.domain_section(domain, now);
            self.write_section(out, "DOMAIN INFORMATION", &section, printed)?;
            printed |= !section.is_empty();
        }

        if let Some(registrar) = info.registrar.as_ref().filter(|_| info.registrar_name().is_some()) {
            let mut section = TreeSection::default();
            section.add("Name", registrar.name.as_deref());
            section.add("Email", registrar.email.as_deref());
            section.add("WHOIS Server", registrar.referral_url.as_deref());
            self.write_section(out, "REGISTRAR", &section, printed)?;
            printed |= !section.is_empty();
        }

        if let Some(domain) = &info.domain {
            let mut section = TreeSection::default();
            for ns in &domain.name_servers {
                section.add_plain(ns);
            }
            self.write_section(out, "NAMESERVERS", &section, printed)?;
            printed |= !section.is_empty();
        }

        if let Some(registrant) = &info.registrant {
            let mut section = TreeSection::default();
            section.add("Name", registrant.name.as_deref());
            section.add("Organization", registrant.organization.as_deref());
            section.add("Email", registrant.email.as_deref());
            self.write_section(out, "REGISTRANT", &section, printed)?;
        }

        Ok(())
    }

    fn domain_section(&self, domain: &DomainRecord, now: DateTime<Utc>) -> TreeSection {
        let mut section = TreeSection::default();
        section.add("Name", domain.domain.as_deref());

        if !domain.status.is_empty() {
            section.add("Status", Some(domain.status.join(", ").as_str()));
        }

        if let Some(created) = domain.created_date.as_deref() {
            let annotated = match domain.created_date_in_time.and_then(|t| years_ago(t, now)) {
                Some(years) => format!("{created} ({years} years ago)"),
                None => created.to_string(),
            };
            section.add("Created", Some(annotated.as_str()));
        }

        section.add("Updated", domain.updated_date.as_deref());

        if let Some(expires) = domain.expiration_date.as_deref() {
            let annotated = match domain.expiration_date_in_time.map(|t| expiry(t, now)) {
                Some(Expiry::InDays(days)) => format!("{expires} (in {days} days)"),
                Some(Expiry::Expired) => format!("{expires} ({})", self.palette.error("EXPIRED")),
                Some(Expiry::Imminent) | None => expires.to_string(),
            };
            section.add("Expires", Some(annotated.as_str()));
        }

        section
    }
}

impl Render for TreeRenderer {
    fn render(&self, results: &[WhoisResult], out: &mut dyn Write) -> Result<()> {
        let now = Utc::now();

        for (i, result) in results.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }

            if let Some(err) = &result.error {
                writeln!(out, "{} {err}", self.palette.error("ERROR:"))?;
                continue;
            }

            let Some(info) = &result.parsed else {
                writeln!(
                    out,
                    "{} No parsed data available for {}",
                    self.palette.warning("WARNING:"),
                    result.domain
                )?;
                continue;
            };

            self.render_info(out, info, now)?;

            writeln!(out)?;
            writeln!(
                out,
                "{} {}",
                self.palette.header("Query time:"),
                result.query_time_display()
            )?;
        }

        Ok(())
    }
}

/// Whole years elapsed since `created`, when positive.
fn years_ago(created: DateTime<Utc>, now: DateTime<Utc>) -> Option<i64> {
    let years = (now - created).num_days() / 365;
    (years > 0).then_some(years)
}

#[derive(Debug, PartialEq, Eq)]
enum Expiry {
    /// Expires after at least one whole day.
    InDays(i64),
    /// Expires within the next day.
    Imminent,
    Expired,
}

fn expiry(expires: DateTime<Utc>, now: DateTime<Utc>) -> Expiry {
    if expires < now {
        return Expiry::Expired;
    }
    match (expires - now).num_days() {
        0 => Expiry::Imminent,
        days => Expiry::InDays(days),
    }
}
