//! Mupen64Plus ROM catalog (`mupen64plus.ini`) reading and writing.
//!
//! The catalog is a sectioned key/value text file. Each section header is
//! the uppercase MD5 of a ROM image, and the `Key=Value` lines that follow
//! describe that ROM until the next header:
//!
//! ```text
//! [34AB1DEA3111A233A8B5C5679DE22E83]
//! GoodName=Super Plumber 64 (Europe) (En,Fr,De)
//! CRC=3B941695 F90A5EEB
//! Status=1
//! Players=4
//! ```

pub mod entry;
pub mod error;
pub mod reader;
pub mod writer;

pub use entry::{CatalogEntry, Field, Md5Key};
pub use error::IniError;
pub use reader::{
    Catalog, CatalogReader, Diagnostic, DiagnosticKind, read_catalog, read_catalog_file,
};
pub use writer::{Banner, CatalogWriter, write_catalog};
