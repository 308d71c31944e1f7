//! No-Intro (Logiqx XML) datafile reader.
//!
//! ```text
//! <datafile>
//!     <header>...</header>
//!     <game name="Super Plumber 64 (Europe) (En,Fr,De)">
//!         <description>Super Plumber 64 (Europe) (En,Fr,De)</description>
//!         <release name="Super Plumber 64 (Europe) (En,Fr,De)" region="EUR"/>
//!         <rom name="Super Plumber 64 (Europe) (En,Fr,De).z64" size="8388608" crc="..." md5="..." sha1="..." status="verified" serial="NO6D"/>
//!     </game>
//! </datafile>
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::error::DatError;
use crate::xml::{Element, Records, rom_name_and_size};

/// Dump verification status of a ROM (`status` attribute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpStatus {
    Verified,
    BadDump,
    NoDump,
    /// Any other value, kept verbatim.
    Other(String),
}

impl DumpStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "verified" => Self::Verified,
            "baddump" => Self::BadDump,
            "nodump" => Self::NoDump,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Verified => "verified",
            Self::BadDump => "baddump",
            Self::NoDump => "nodump",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for DumpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DumpStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The ROM of a datafile game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreservationRom {
    pub name: String,
    pub size: u64,
    pub crc: Option<String>,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    /// `None` when the datafile gives no status
    pub status: Option<DumpStatus>,
    /// Serial number, if present
    pub serial: Option<String>,
}

/// A single `<game>` entry of a datafile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreservationGame {
    pub name: String,
    pub description: String,
    /// From the `<release>` element, if any
    pub release_name: Option<String>,
    /// Region code from the `<release>` element (e.g. `"EUR"`)
    pub region: Option<String>,
    pub rom: PreservationRom,
}

/// Iterator over the `<game>` entries of a datafile.
///
/// After the first error the iterator is exhausted.
pub struct DatafileReader<R> {
    records: Records<R, PreservationGame>,
}

impl<R: BufRead> DatafileReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            records: Records::new(reader, "game", parse_game),
        }
    }
}

impl DatafileReader<BufReader<File>> {
    /// Open a datafile for reading.
    pub fn open(path: &Path) -> Result<Self, DatError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for DatafileReader<R> {
    type Item = Result<PreservationGame, DatError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next()
    }
}

/// Parse a whole datafile into memory.
pub fn parse_datafile<R: BufRead>(reader: R) -> Result<Vec<PreservationGame>, DatError> {
    DatafileReader::new(reader).collect()
}

fn parse_game(game: &Element) -> Result<PreservationGame, DatError> {
    let name = game
        .attr("name")
        .ok_or_else(|| DatError::malformed_record("<game>", "missing name attribute"))?
        .to_string();

    let description = game
        .child("description")
        .map(|d| d.text.clone())
        .ok_or_else(|| DatError::malformed_record(&name, "missing description"))?;

    let release = game.child("release");

    let mut roms = game.children_named("rom");
    let rom_element = roms
        .next()
        .ok_or_else(|| DatError::malformed_record(&name, "missing rom"))?;
    if roms.next().is_some() {
        log::debug!("'{name}' has more than one rom, using the first");
    }
    let rom = parse_rom(&name, rom_element)?;

    Ok(PreservationGame {
        description,
        release_name: release.and_then(|r| r.attr("name")).map(str::to_string),
        region: release.and_then(|r| r.attr("region")).map(str::to_string),
        name,
        rom,
    })
}

fn parse_rom(game: &str, rom: &Element) -> Result<PreservationRom, DatError> {
    let (name, size) = rom_name_and_size(game, rom)?;

    let owned = |key: &str| rom.attr(key).map(str::to_string);

    Ok(PreservationRom {
        name,
        size,
        crc: owned("crc"),
        md5: owned("md5"),
        sha1: owned("sha1"),
        status: rom.attr("status").map(DumpStatus::parse),
        serial: owned("serial"),
    })
}

#[cfg(test)]
#[path = "tests/nointro_tests.rs"]
mod tests;
