//! Nintendo 64 cartridge header decoding.
//!
//! Reads the fixed 64-byte header at the start of a big-endian (`.z64`) ROM
//! image into a [`CartridgeHeader`], and locates such images in a directory.

pub mod error;
pub mod header;
pub mod scan;

pub use error::HeaderError;
pub use header::{CartridgeHeader, HEADER_SIZE, read_header, read_header_file};
pub use scan::find_rom_files;
