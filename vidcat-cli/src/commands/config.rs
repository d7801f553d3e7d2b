use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{Settings, settings_path};

/// Show the effective settings and the file they come from.
pub(crate) fn run_config_show(settings: &Settings, db_path: &Path) -> Result<(), CliError> {
    log::info!("{}", "vidcat Configuration".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();

    match settings_path() {
        Some(p) if p.exists() => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Settings file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    log::info!("  database.path:        {}", db_path.display());
    log::info!("  import.error_preview: {}", settings.import.error_preview);
    log::info!("  export.separator:     {:?}", settings.export.separator);

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = settings_path()
        .ok_or_else(|| CliError::config("Could not determine the settings directory"))?;
    println!("{}", path.display());
    Ok(())
}
