use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use m64p_rom::{CartridgeHeader, find_rom_files, read_header_file};

use crate::error::CliError;

/// Header of one ROM file plus its catalog key.
#[derive(Serialize)]
struct RomReport {
    path: PathBuf,
    /// Uppercase MD5 of the whole file, as used for catalog sections
    md5: String,
    header: CartridgeHeader,
}

/// Print the header of each ROM. Directories are expanded to their `.z64` files.
pub(crate) fn run_header(paths: &[PathBuf], json: bool) -> Result<(), CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = find_rom_files(path)?;
            log::debug!("{} ROM(s) in {}", found.len(), path.display());
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    let mut reports = Vec::new();
    let mut failures = 0usize;

    for file in files {
        match report_rom(&file) {
            Ok(report) => {
                if !json {
                    print_report(&report);
                }
                reports.push(report);
            }
            Err(e) => {
                log::warn!("{}: {e}", file.display());
                failures += 1;
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if failures > 0 {
        return Err(CliError::other(format!(
            "{failures} file(s) could not be read"
        )));
    }
    Ok(())
}

fn report_rom(path: &Path) -> Result<RomReport, CliError> {
    let header = read_header_file(path)?;
    let md5 = file_md5(path)?;
    Ok(RomReport {
        path: path.to_path_buf(),
        md5,
        header,
    })
}

/// Uppercase hex MD5 of the file contents.
fn file_md5(path: &Path) -> std::io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut ctx = md5::Context::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        ctx.consume(&buf[..n]);
    }
    Ok(format!("{:x}", ctx.compute()).to_uppercase())
}

fn print_report(report: &RomReport) {
    let h = &report.header;
    log::info!(
        "{}",
        report
            .path
            .display()
            .if_supports_color(Stdout, |t| t.bold())
    );
    log::info!(
        "  Title:          {}",
        h.title.if_supports_color(Stdout, |t| t.cyan())
    );
    log::info!("  MD5:            {}", report.md5);
    log::info!("  CRC:            {}", h.crc_pair());
    log::info!(
        "  DOM1:           LAT={} PGS={} PWD={} PGS2={}",
        h.dom1_latency,
        h.dom1_page_size,
        h.dom1_pulse_width,
        h.dom1_page_size2
    );
    log::info!("  Clock rate:     {}", h.clock_rate);
    log::info!("  PC:             0x{:08X}", h.program_counter);
    log::info!("  Release:        {}", h.release);
    log::info!("  Manufacturer:   {}", h.manufacturer_id);
    log::info!("  Cartridge ID:   {}", h.cartridge_id);
    log::info!("  Country code:   {}", h.country_code);
}

#[cfg(test)]
#[path = "../tests/header_tests.rs"]
mod tests;
