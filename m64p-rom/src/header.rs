//! N64 cartridge header decoder.
//!
//! The header occupies the first 0x40 bytes of a big-endian ROM image:
//!
//! ```text
//! 0x00  u8      PI_BSB_DOM1_LAT_REG
//! 0x01  u8      PI_BSB_DOM1_PGS_REG
//! 0x02  u8      (unused)
//! 0x03  u8      PI_BSB_DOM1_PWD_REG / PI_BSB_DOM1_PGS_REG2
//! 0x04  u32     clock rate
//! 0x08  u32     program counter (boot address)
//! 0x0C  u32     release
//! 0x10  u32     CRC1
//! 0x14  u32     CRC2
//! 0x18  u32 x2  (unused)
//! 0x20  [u8;20] image name
//! 0x34  u32     (unused)
//! 0x38  u32     manufacturer ID
//! 0x3C  u16     cartridge ID
//! 0x3E  u16     country code
//! ```

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error::HeaderError;

/// Size of the cartridge header in bytes.
pub const HEADER_SIZE: usize = 0x40;

const TITLE_START: usize = 0x20;
const TITLE_END: usize = 0x34;

/// A decoded N64 cartridge header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartridgeHeader {
    pub dom1_latency: u8,
    pub dom1_page_size: u8,
    pub dom1_pulse_width: u8,
    /// Duplicates `dom1_pulse_width`: both are read from byte 0x03.
    pub dom1_page_size2: u8,
    pub clock_rate: u32,
    pub program_counter: u32,
    pub release: u32,
    pub crc1: u32,
    pub crc2: u32,
    /// Image name with trailing padding removed.
    pub title: String,
    pub manufacturer_id: u32,
    pub cartridge_id: u16,
    pub country_code: u16,
}

impl CartridgeHeader {
    /// Decode a header from a buffer of at least [`HEADER_SIZE`] bytes.
    ///
    /// Bytes past the header are ignored.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, HeaderError> {
        if buf.len() < HEADER_SIZE {
            return Err(HeaderError::Truncated {
                expected: HEADER_SIZE,
                actual: buf.len(),
            });
        }

        Ok(Self {
            dom1_latency: buf[0x00],
            dom1_page_size: buf[0x01],
            dom1_pulse_width: buf[0x03],
            dom1_page_size2: buf[0x03],
            clock_rate: be_u32(buf, 0x04),
            program_counter: be_u32(buf, 0x08),
            release: be_u32(buf, 0x0C),
            crc1: be_u32(buf, 0x10),
            crc2: be_u32(buf, 0x14),
            title: decode_title(&buf[TITLE_START..TITLE_END]),
            manufacturer_id: be_u32(buf, 0x38),
            cartridge_id: be_u16(buf, 0x3C),
            country_code: be_u16(buf, 0x3E),
        })
    }

    /// The header CRC pair in the form used by catalog `CRC=` lines,
    /// e.g. `"3B941695 F90A5EEB"`.
    pub fn crc_pair(&self) -> String {
        format!("{:08X} {:08X}", self.crc1, self.crc2)
    }
}

/// Read and decode the header from the start of `reader`.
///
/// Exactly [`HEADER_SIZE`] bytes are consumed. A short read yields
/// [`HeaderError::Truncated`] with the number of bytes actually available.
pub fn read_header<R: Read>(reader: R) -> Result<CartridgeHeader, HeaderError> {
    let mut buf = Vec::with_capacity(HEADER_SIZE);
    reader.take(HEADER_SIZE as u64).read_to_end(&mut buf)?;
    CartridgeHeader::from_bytes(&buf)
}

/// Read and decode the header of the ROM file at `path`.
pub fn read_header_file(path: &Path) -> Result<CartridgeHeader, HeaderError> {
    let file = std::fs::File::open(path)?;
    read_header(file)
}

fn be_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

fn be_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buf[offset], buf[offset + 1]])
}

/// Decode the fixed-width title field, stripping trailing NUL and space padding.
fn decode_title(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_end_matches(|c: char| c.is_control() || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
#[path = "tests/header_tests.rs"]
mod tests;
