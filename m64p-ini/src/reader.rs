//! Line-oriented catalog reader.
//!
//! Entries have no explicit terminator: a `[MD5]` header opens an entry and
//! every following `Key=Value` line belongs to it until the next header or
//! the end of input. The reader is a two-state machine, either before the
//! first header or inside an entry, and yields an entry once the next header
//! (or end of input) closes it.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::entry::{CatalogEntry, Field, Md5Key};
use crate::error::IniError;

/// A non-fatal problem found while reading. The offending line is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A `Key=Value` line with a key that is not part of the format
    UnknownKey { key: String, value: String },
    /// A line that is neither a section header nor a `Key=Value` pair
    UnparsableLine(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownKey { key, value } => {
                write!(f, "line {}: unknown key/value '{key}'/{value}", self.line)
            }
            DiagnosticKind::UnparsableLine(text) => {
                write!(f, "line {}: can't parse line \"{text}\"", self.line)
            }
        }
    }
}

enum State {
    NoCurrentEntry,
    InEntry(CatalogEntry),
}

/// Iterator over the entries of a catalog, in file order.
///
/// After the first error the iterator is exhausted. Warnings collected so
/// far remain available through [`CatalogReader::diagnostics`].
pub struct CatalogReader<R> {
    lines: Lines<R>,
    line_no: usize,
    state: State,
    seen: HashSet<Md5Key>,
    diagnostics: Vec<Diagnostic>,
    /// Error to report on the call after the entry it closed was yielded.
    pending_error: Option<IniError>,
    finished: bool,
}

impl<R: BufRead> CatalogReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            state: State::NoCurrentEntry,
            seen: HashSet::new(),
            diagnostics: Vec::new(),
            pending_error: None,
            finished: false,
        }
    }

    /// Warnings reported so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Handle one line. Returns an entry when the line closes one.
    fn process_line(&mut self, line: &str) -> Result<Option<CatalogEntry>, IniError> {
        if line.is_empty() || line.starts_with(';') {
            return Ok(None);
        }

        if let Some(md5) = parse_section_header(line) {
            let duplicate = !self.seen.insert(md5.clone());
            let closed = match std::mem::replace(&mut self.state, State::NoCurrentEntry) {
                State::InEntry(entry) => Some(entry),
                State::NoCurrentEntry => None,
            };

            if duplicate {
                let err = IniError::DuplicateKey(md5.to_string());
                return match closed {
                    Some(entry) => {
                        self.pending_error = Some(err);
                        Ok(Some(entry))
                    }
                    None => Err(err),
                };
            }

            self.state = State::InEntry(CatalogEntry::new(md5));
            return Ok(closed);
        }

        if let Some((key, value)) = split_key_value(line) {
            let State::InEntry(entry) = &mut self.state else {
                return Err(IniError::protocol(
                    self.line_no,
                    format!("'{key}' appears before any [MD5] section"),
                ));
            };

            match Field::from_key(key) {
                Some(field) => {
                    entry
                        .set(field, value)
                        .map_err(|_| IniError::InvalidField {
                            line: self.line_no,
                            key: key.to_string(),
                            value: value.to_string(),
                        })?;
                }
                None => self.warn(DiagnosticKind::UnknownKey {
                    key: key.to_string(),
                    value: value.to_string(),
                }),
            }
            return Ok(None);
        }

        self.warn(DiagnosticKind::UnparsableLine(line.to_string()));
        Ok(None)
    }

    fn warn(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            line: self.line_no,
            kind,
        };
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

impl CatalogReader<BufReader<File>> {
    /// Open a catalog file for reading.
    pub fn open(path: &Path) -> Result<Self, IniError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for CatalogReader<R> {
    type Item = Result<CatalogEntry, IniError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending_error.take() {
            self.finished = true;
            return Some(Err(err));
        }

        while !self.finished {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
                None => {
                    // End of input closes the last entry.
                    self.finished = true;
                    return match std::mem::replace(&mut self.state, State::NoCurrentEntry) {
                        State::InEntry(entry) => Some(Ok(entry)),
                        State::NoCurrentEntry => None,
                    };
                }
            };
            self.line_no += 1;

            match self.process_line(&line) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }

        None
    }
}

/// A fully read catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read every entry of a catalog, collecting warnings alongside.
pub fn read_catalog<R: BufRead>(reader: R) -> Result<Catalog, IniError> {
    let mut reader = CatalogReader::new(reader);
    let entries = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
    Ok(Catalog {
        entries,
        diagnostics: reader.into_diagnostics(),
    })
}

/// Read every entry of the catalog file at `path`.
pub fn read_catalog_file(path: &Path) -> Result<Catalog, IniError> {
    let file = File::open(path)?;
    read_catalog(BufReader::new(file))
}

/// Match `[` + 32 uppercase hex digits + `]`.
fn parse_section_header(line: &str) -> Option<Md5Key> {
    line.strip_prefix('[')?
        .strip_suffix(']')
        .and_then(Md5Key::parse)
}

/// Split `Key=Value` on the first `=`. Both sides must be non-empty.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
mod tests;
