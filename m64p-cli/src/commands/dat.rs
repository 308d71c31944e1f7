use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use m64p_dat::{ArcadeGame, DatafileReader, PreservationGame, SoftwareListReader};

use crate::error::CliError;

/// List the entries of a MAME software list.
pub(crate) fn run_mame(path: &Path, json: bool) -> Result<(), CliError> {
    let reader = SoftwareListReader::open(path)?;

    if json {
        let games = reader.collect::<Result<Vec<_>, _>>()?;
        println!("{}", serde_json::to_string_pretty(&games)?);
        return Ok(());
    }

    let mut count = 0usize;
    for game in reader {
        print_arcade_game(&game?);
        count += 1;
    }
    log::info!("");
    log::info!("{count} entries");
    Ok(())
}

/// List the entries of a No-Intro datafile.
pub(crate) fn run_nointro(path: &Path, json: bool) -> Result<(), CliError> {
    let reader = DatafileReader::open(path)?;

    if json {
        let games = reader.collect::<Result<Vec<_>, _>>()?;
        println!("{}", serde_json::to_string_pretty(&games)?);
        return Ok(());
    }

    let mut count = 0usize;
    for game in reader {
        print_preservation_game(&game?);
        count += 1;
    }
    log::info!("");
    log::info!("{count} entries");
    Ok(())
}

fn print_arcade_game(game: &ArcadeGame) {
    let clone = game
        .clone_of
        .as_deref()
        .map(|p| format!(" (clone of {p})"))
        .unwrap_or_default();
    log::info!(
        "{} {}{}",
        game.name.if_supports_color(Stdout, |t| t.bold()),
        game.description,
        clone.if_supports_color(Stdout, |t| t.dimmed())
    );
    log::info!("    {} / {}", game.year, game.publisher);
    if let Some(serials) = &game.serial {
        log::info!("    Serial: {}", serials.join(", "));
    }
    log::info!(
        "    ROM: {} ({} bytes, crc {})",
        game.rom.name,
        game.rom.size,
        game.rom.crc.as_deref().unwrap_or("-")
    );
}

fn print_preservation_game(game: &PreservationGame) {
    let status = game
        .rom
        .status
        .as_ref()
        .map(|s| format!(" [{s}]"))
        .unwrap_or_default();
    log::info!(
        "{}{}",
        game.name.if_supports_color(Stdout, |t| t.bold()),
        status.if_supports_color(Stdout, |t| t.green())
    );
    if let Some(serial) = &game.rom.serial {
        log::info!("    Serial: {serial}");
    }
    log::info!(
        "    ROM: {} ({} bytes, md5 {})",
        game.rom.name,
        game.rom.size,
        game.rom.md5.as_deref().unwrap_or("-")
    );
}
