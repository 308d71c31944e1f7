//! ROM file discovery.

use std::path::{Path, PathBuf};

/// File extension of big-endian N64 ROM images.
const ROM_EXTENSION: &str = "z64";

/// List the `.z64` files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. Symlinks to regular files count as files.
pub fn find_rom_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_rom = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ROM_EXTENSION));
        if !is_rom {
            log::debug!("Skipping non-ROM file {}", path.display());
            continue;
        }

        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
