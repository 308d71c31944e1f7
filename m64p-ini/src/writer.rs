//! Catalog writer.
//!
//! Output layout:
//! ```text
//! ; Mupen64Plus Rom Catalog
//! ; Generated by mupen64plus-ini-creator
//! ; Script coded by: narann
//! ;
//! ; Total Rom Count: 2
//! ; Mon, 19 Oct 26 14:03:12 +0200
//!
//! [MD5]
//! GoodName=...
//! CRC=...
//! ...
//! ```
//!
//! Entries are sorted by `GoodName` (byte order, stable for equal names).

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset, Local};

use crate::entry::{CatalogEntry, Field};
use crate::error::IniError;

const TIMESTAMP_FORMAT: &str = "; %a, %d %b %y %H:%M:%S %z";

/// The three free-text lines at the top of a written catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub product: String,
    pub generator: String,
    pub author: String,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            product: "Mupen64Plus Rom Catalog".to_string(),
            generator: "Generated by mupen64plus-ini-creator".to_string(),
            author: "Script coded by: narann".to_string(),
        }
    }
}

/// Serializes catalog entries.
#[derive(Debug, Clone, Default)]
pub struct CatalogWriter {
    banner: Banner,
    timestamp: Option<DateTime<FixedOffset>>,
}

impl CatalogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner(mut self, banner: Banner) -> Self {
        self.banner = banner;
        self
    }

    /// Use a fixed generation time instead of the current local time.
    pub fn timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Render `entries` as catalog text.
    ///
    /// Fails with [`IniError::DuplicateKey`] if two entries share an MD5, and
    /// with [`IniError::MultilineValue`] if a value contains `\n` or `\r`.
    pub fn render(&self, entries: &[CatalogEntry]) -> Result<String, IniError> {
        check_unique(entries)?;
        check_single_line(entries)?;

        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Local::now().fixed_offset());

        let mut lines = vec![
            format!("; {}", self.banner.product),
            format!("; {}", self.banner.generator),
            format!("; {}", self.banner.author),
            ";".to_string(),
            format!("; Total Rom Count: {}", entries.len()),
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
            String::new(),
        ];

        let mut sorted: Vec<&CatalogEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| a.good_name.cmp(&b.good_name));

        for entry in sorted {
            lines.push(format!("[{}]", entry.md5));
            for field in Field::ALL {
                if let Some(value) = entry.written_value(field) {
                    lines.push(format!("{}={}", field.key(), value));
                }
            }
            lines.push(String::new());
        }

        Ok(lines.join("\n"))
    }

    /// Render `entries` into `out`. Nothing is written if rendering fails.
    pub fn write<W: Write>(&self, entries: &[CatalogEntry], mut out: W) -> Result<(), IniError> {
        let text = self.render(entries)?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Render `entries` into a new file at `path`, replacing any existing file.
    pub fn write_file(&self, entries: &[CatalogEntry], path: &Path) -> Result<(), IniError> {
        let text = self.render(entries)?;
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Write `entries` with the default banner and the current time.
pub fn write_catalog<W: Write>(entries: &[CatalogEntry], out: W) -> Result<(), IniError> {
    CatalogWriter::new().write(entries, out)
}

fn check_unique(entries: &[CatalogEntry]) -> Result<(), IniError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.md5.as_str()) {
            return Err(IniError::DuplicateKey(entry.md5.to_string()));
        }
    }
    Ok(())
}

fn check_single_line(entries: &[CatalogEntry]) -> Result<(), IniError> {
    for entry in entries {
        for field in Field::ALL {
            let Some(value) = entry.written_value(field) else {
                continue;
            };
            if value.contains(['\n', '\r']) {
                return Err(IniError::MultilineValue {
                    md5: entry.md5.to_string(),
                    key: field.key().to_string(),
                    value,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
