//! MAME software list reader.
//!
//! Format (abridged):
//! ```text
//! <softwarelist name="n64">
//!     <software name="spl64" cloneof="spl64u">
//!         <description>Super Plumber 64 (Europe) (En,Fr,De)</description>
//!         <year>1997</year>
//!         <publisher>Plumber Co.</publisher>
//!         <info name="serial" value="NOS-NGEP-AOS, NOS-NGEP-EOR"/>
//!         <info name="release" value="19980807"/>
//!         <part name="cart" interface="n64_cart">
//!             <dataarea name="rom" size="12582912">
//!                 <rom name="nos-ngep-0.o1" size="12582912" crc="7425be2d" sha1="..." offset="000000"/>
//!             </dataarea>
//!         </part>
//!     </software>
//! </softwarelist>
//! ```
//!
//! `description`, `year` and `publisher` are read from attributes of the same
//! name when present, otherwise from the child elements shown above.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::DatError;
use crate::xml::{Element, Records, rom_name_and_size};

const ROM_PATH: [&str; 3] = ["part", "dataarea", "rom"];

/// Separator between serials in a single `serial` info value.
const SERIAL_SEPARATOR: &str = ", ";

/// The ROM image of a software list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcadeRom {
    pub name: String,
    pub size: u64,
    /// CRC32 as written in the list (absent for undumped ROMs)
    pub crc: Option<String>,
    /// SHA1 as written in the list (absent for undumped ROMs)
    pub sha1: Option<String>,
}

/// A single `<software>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcadeGame {
    /// Short name, e.g. `"spl64"`
    pub name: String,
    /// Short name of the parent entry this one is a clone of.
    pub clone_of: Option<String>,
    pub description: String,
    pub year: String,
    pub publisher: String,
    /// Serials from `<info name="serial">`, split on `", "`
    pub serial: Option<Vec<String>>,
    /// Release date from `<info name="release">`, e.g. `"19980807"`
    pub release: Option<String>,
    /// Alternate title from `<info name="alt_title">`
    pub alt_title: Option<String>,
    pub rom: ArcadeRom,
}

/// Iterator over the `<software>` entries of a MAME software list.
///
/// Entries are parsed on demand. After the first error the iterator is
/// exhausted.
pub struct SoftwareListReader<R> {
    records: Records<R, ArcadeGame>,
}

impl<R: BufRead> SoftwareListReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            records: Records::new(reader, "software", parse_software),
        }
    }
}

impl SoftwareListReader<BufReader<File>> {
    /// Open a software list file for reading.
    pub fn open(path: &Path) -> Result<Self, DatError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for SoftwareListReader<R> {
    type Item = Result<ArcadeGame, DatError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next()
    }
}

/// Parse a whole software list into memory.
pub fn parse_software_list<R: BufRead>(reader: R) -> Result<Vec<ArcadeGame>, DatError> {
    SoftwareListReader::new(reader).collect()
}

fn parse_software(sw: &Element) -> Result<ArcadeGame, DatError> {
    let name = sw
        .attr("name")
        .ok_or_else(|| DatError::malformed_record("<software>", "missing name attribute"))?
        .to_string();

    let required = |key: &str| {
        sw.attr_or_child_text(key)
            .map(str::to_string)
            .ok_or_else(|| DatError::malformed_record(&name, format!("missing {key}")))
    };
    let description = required("description")?;
    let year = required("year")?;
    let publisher = required("publisher")?;

    let mut serial = None;
    let mut release = None;
    let mut alt_title = None;

    for info in sw.children_named("info") {
        let Some(info_name) = info.attr("name") else {
            log::debug!("Ignoring info without a name on '{name}'");
            continue;
        };
        let Some(value) = info.attr("value") else {
            log::debug!("Ignoring info '{info_name}' without a value on '{name}'");
            continue;
        };
        match info_name {
            "serial" => {
                serial = Some(value.split(SERIAL_SEPARATOR).map(str::to_string).collect());
            }
            "release" => release = Some(value.to_string()),
            "alt_title" => alt_title = Some(value.to_string()),
            other => log::debug!("Ignoring info '{other}' on '{name}'"),
        }
    }

    let rom_element = sw
        .find(&ROM_PATH)
        .ok_or_else(|| DatError::malformed_record(&name, "missing part/dataarea/rom"))?;
    let rom = parse_rom(&name, rom_element)?;

    Ok(ArcadeGame {
        clone_of: sw.attr("cloneof").map(str::to_string),
        name,
        description,
        year,
        publisher,
        serial,
        release,
        alt_title,
        rom,
    })
}

fn parse_rom(game: &str, rom: &Element) -> Result<ArcadeRom, DatError> {
    let (name, size) = rom_name_and_size(game, rom)?;

    Ok(ArcadeRom {
        name,
        size,
        crc: rom.attr("crc").map(str::to_string),
        sha1: rom.attr("sha1").map(str::to_string),
    })
}

#[cfg(test)]
#[path = "tests/mame_tests.rs"]
mod tests;
