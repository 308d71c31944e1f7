use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::settings::load_settings;

/// Print the settings file path.
pub(crate) fn run_config_path(path: &Path) {
    log::info!("{}", path.display());
}

/// Print the effective settings.
pub(crate) fn run_config_show(path: &Path) -> Result<(), CliError> {
    let settings = load_settings(path)?;
    let banner = settings.banner();

    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    log::info!(
        "{} {}",
        "Settings:".if_supports_color(Stdout, |t| t.bold()),
        source
    );
    log::info!("");
    log::info!("{}", "[banner]".if_supports_color(Stdout, |t| t.cyan()));
    log::info!("  product   = {}", banner.product);
    log::info!("  generator = {}", banner.generator);
    log::info!("  author    = {}", banner.author);
    Ok(())
}
