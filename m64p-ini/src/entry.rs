//! Catalog entry model.

use std::fmt;
use std::num::ParseIntError;

use serde::Serialize;

/// Uppercase hex MD5 of a ROM image; the section key of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Md5Key(String);

impl Md5Key {
    pub const LEN: usize = 32;

    /// Accepts exactly 32 characters of `0-9` / `A-F`.
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == Self::LEN
            && s.bytes()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
        valid.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Md5Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A recognized catalog key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    GoodName,
    Crc,
    Status,
    Rumble,
    CountPerOp,
    Players,
    Mempak,
    RefMd5,
    SaveType,
    Transferpak,
    DisableExtraMem,
    Biopak,
    SiDmaDuration,
    Cheat0,
}

impl Field {
    /// Every field, in the order they are written.
    pub const ALL: [Field; 14] = [
        Field::GoodName,
        Field::Crc,
        Field::Status,
        Field::Rumble,
        Field::CountPerOp,
        Field::Players,
        Field::Mempak,
        Field::RefMd5,
        Field::SaveType,
        Field::Transferpak,
        Field::DisableExtraMem,
        Field::Biopak,
        Field::SiDmaDuration,
        Field::Cheat0,
    ];

    /// The key as it appears in the file.
    pub fn key(self) -> &'static str {
        match self {
            Field::GoodName => "GoodName",
            Field::Crc => "CRC",
            Field::Status => "Status",
            Field::Rumble => "Rumble",
            Field::CountPerOp => "CountPerOp",
            Field::Players => "Players",
            Field::Mempak => "Mempak",
            Field::RefMd5 => "RefMD5",
            Field::SaveType => "SaveType",
            Field::Transferpak => "Transferpak",
            Field::DisableExtraMem => "DisableExtraMem",
            Field::Biopak => "Biopak",
            Field::SiDmaDuration => "SiDmaDuration",
            Field::Cheat0 => "Cheat0",
        }
    }

    /// Look up a field by its exact (case-sensitive) key.
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// One ROM in the catalog.
///
/// Optional fields are `None` until set. When written, a field that is set
/// but falsy (`Some(0)` or `Some("")`) is omitted just like an unset one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub md5: Md5Key,
    pub good_name: String,
    /// The two header CRC words, e.g. `"3B941695 F90A5EEB"`
    pub crc: String,
    /// Compatibility rating
    pub status: Option<i64>,
    pub rumble: Option<String>,
    pub count_per_op: Option<i64>,
    pub players: Option<i64>,
    pub mempak: Option<String>,
    /// MD5 of another entry whose settings this one shares. Not resolved.
    pub ref_md5: Option<String>,
    pub save_type: Option<String>,
    pub transferpak: Option<String>,
    pub disable_extra_mem: Option<i64>,
    pub biopak: Option<String>,
    pub si_dma_duration: Option<i64>,
    pub cheat0: Option<String>,
}

impl CatalogEntry {
    /// An entry with empty name and CRC and no optional fields.
    pub fn new(md5: Md5Key) -> Self {
        Self {
            md5,
            good_name: String::new(),
            crc: String::new(),
            status: None,
            rumble: None,
            count_per_op: None,
            players: None,
            mempak: None,
            ref_md5: None,
            save_type: None,
            transferpak: None,
            disable_extra_mem: None,
            biopak: None,
            si_dma_duration: None,
            cheat0: None,
        }
    }

    /// Set `field` from its textual value.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), ParseIntError> {
        let text = || Some(value.to_string());
        match field {
            Field::GoodName => self.good_name = value.to_string(),
            Field::Crc => self.crc = value.to_string(),
            Field::Status => self.status = Some(value.parse()?),
            Field::Rumble => self.rumble = text(),
            Field::CountPerOp => self.count_per_op = Some(value.parse()?),
            Field::Players => self.players = Some(value.parse()?),
            Field::Mempak => self.mempak = text(),
            Field::RefMd5 => self.ref_md5 = text(),
            Field::SaveType => self.save_type = text(),
            Field::Transferpak => self.transferpak = text(),
            Field::DisableExtraMem => self.disable_extra_mem = Some(value.parse()?),
            Field::Biopak => self.biopak = text(),
            Field::SiDmaDuration => self.si_dma_duration = Some(value.parse()?),
            Field::Cheat0 => self.cheat0 = text(),
        }
        Ok(())
    }

    /// The value written for `field`, or `None` if the line is omitted.
    ///
    /// `GoodName` and `CRC` are always written. Other fields are written
    /// only when set to a non-empty string or a non-zero number.
    pub fn written_value(&self, field: Field) -> Option<String> {
        fn text(v: &Option<String>) -> Option<String> {
            v.as_ref().filter(|s| !s.is_empty()).cloned()
        }
        fn number(v: Option<i64>) -> Option<String> {
            v.filter(|&n| n != 0).map(|n| n.to_string())
        }

        match field {
            Field::GoodName => Some(self.good_name.clone()),
            Field::Crc => Some(self.crc.clone()),
            Field::Status => number(self.status),
            Field::Rumble => text(&self.rumble),
            Field::CountPerOp => number(self.count_per_op),
            Field::Players => number(self.players),
            Field::Mempak => text(&self.mempak),
            Field::RefMd5 => text(&self.ref_md5),
            Field::SaveType => text(&self.save_type),
            Field::Transferpak => text(&self.transferpak),
            Field::DisableExtraMem => number(self.disable_extra_mem),
            Field::Biopak => text(&self.biopak),
            Field::SiDmaDuration => number(self.si_dma_duration),
            Field::Cheat0 => text(&self.cheat0),
        }
    }
}

#[cfg(test)]
#[path = "tests/entry_tests.rs"]
mod tests;
