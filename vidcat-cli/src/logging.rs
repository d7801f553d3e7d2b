//! Logger setup: `env_logger` writing to stdout, optionally teed to a file.
//!
//! Normal output goes through `log::info!` so that `--quiet` silences it and
//! `--logfile` captures it. The logfile copy has ANSI color codes removed.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Writes to stdout and, when configured, to a logfile without colors.
struct LogSink {
    file: Option<File>,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Install the global logger.
///
/// `quiet` keeps warnings and errors only; `verbose` adds debug messages and
/// timestamps. `RUST_LOG` can still refine per-module levels.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = match logfile {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Some(
                File::options()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        CliError::config(format!("Cannot open logfile {}: {}", path.display(), e))
                    })?,
            )
        }
        None => None,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Pipe(Box::new(LogSink { file })))
        .format(move |buf, record| {
            let prefix = match record.level() {
                log::Level::Error => Some(
                    "error:"
                        .if_supports_color(Stdout, |t| t.red())
                        .to_string(),
                ),
                log::Level::Warn => Some(
                    "warning:"
                        .if_supports_color(Stdout, |t| t.yellow())
                        .to_string(),
                ),
                _ => None,
            };

            if verbose {
                let now = chrono::Local::now().format("%H:%M:%S%.3f");
                write!(
                    buf,
                    "{} {:<5} ",
                    now.if_supports_color(Stdout, |t| t.dimmed()),
                    record.level()
                )?;
            }
            match prefix {
                Some(prefix) => writeln!(buf, "{} {}", prefix, record.args()),
                None => writeln!(buf, "{}", record.args()),
            }
        })
        .try_init()
        .map_err(|e| CliError::other(format!("Failed to initialize logger: {}", e)))
}
