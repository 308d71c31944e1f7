use std::io;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use m64p_ini::{CatalogWriter, read_catalog_file};

use crate::error::CliError;
use crate::settings::Settings;

/// Parse a catalog and report how many entries and warnings it has.
pub(crate) fn run_ini_check(path: &Path) -> Result<(), CliError> {
    let catalog = read_catalog_file(path)?;

    let warnings = catalog.diagnostics.len();
    log::info!(
        "{}: {} entries, {}",
        path.display().if_supports_color(Stdout, |t| t.bold()),
        catalog.entries.len(),
        if warnings == 0 {
            "no warnings".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            format!("{warnings} warning(s)")
                .if_supports_color(Stdout, |t| t.yellow())
                .to_string()
        }
    );
    Ok(())
}

/// Re-write a catalog in canonical form, to `output` or stdout.
pub(crate) fn run_ini_normalize(
    path: &Path,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<(), CliError> {
    let catalog = read_catalog_file(path)?;
    let writer = CatalogWriter::new().banner(settings.banner());

    match output {
        Some(out) => {
            writer.write_file(&catalog.entries, out)?;
            log::info!(
                "Wrote {} entries to {}",
                catalog.entries.len(),
                out.display()
            );
        }
        // The catalog itself goes to stdout, so nothing else is printed at info level.
        None => {
            writer.write(&catalog.entries, io::stdout().lock())?;
            log::debug!("Wrote {} entries to stdout", catalog.entries.len());
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/ini_tests.rs"]
mod tests;
