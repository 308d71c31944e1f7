//! Streaming readers for N64 game databases.
//!
//! - [`mame`]: MAME software lists (`n64.xml`)
//! - [`nointro`]: No-Intro Logiqx datafiles
//!
//! Both readers are iterators that parse one game at a time, so only the
//! current game's element tree is held in memory.

pub mod error;
pub mod mame;
pub mod nointro;
mod xml;

pub use error::DatError;
pub use mame::{ArcadeGame, ArcadeRom, SoftwareListReader, parse_software_list};
pub use nointro::{DatafileReader, DumpStatus, PreservationGame, PreservationRom, parse_datafile};
