//! Export catalog records as CSV that the importer reads back.
//!
//! Every exported row carries the `UPDATE` action so that editing the file
//! and re-importing it updates the same records in place.

use thiserror::Error;
use vidcat_catalog::csv_line::{UTF8_BOM, is_supported_separator, join_multi_value};
use vidcat_catalog::types::*;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Separator must be ',' or ';', got '{0}'")]
    InvalidSeparator(char),
}

fn writer(separator: char) -> Result<csv::Writer<Vec<u8>>, ExportError> {
    if !is_supported_separator(separator) {
        return Err(ExportError::InvalidSeparator(separator));
    }
    Ok(csv::WriterBuilder::new()
        .delimiter(separator as u8)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.as_bytes().to_vec()))
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Render videos in the import layout, one line per entry, in input order.
pub fn export_videos(entries: &[VideoEntry], separator: char) -> Result<String, ExportError> {
    let mut wtr = writer(separator)?;
    wtr.write_record(VIDEO_CSV_HEADER)?;

    for entry in entries {
        let categories = join_multi_value(&entry.categories);
        wtr.write_record([
            entry.video.id.as_str(),
            entry.video.title.as_str(),
            entry.video.url.as_str(),
            entry.series.as_deref().unwrap_or(""),
            entry.video.author.as_str(),
            categories.as_str(),
            ImportAction::Update.as_str(),
        ])?;
    }

    finish(wtr)
}

/// Render users in the import layout, one line per user, in input order.
pub fn export_users(users: &[User], separator: char) -> Result<String, ExportError> {
    let mut wtr = writer(separator)?;
    wtr.write_record(USER_CSV_HEADER)?;

    for user in users {
        wtr.write_record([
            user.email.as_str(),
            user.client_name.as_str(),
            user.role.as_str(),
            ImportAction::Update.as_str(),
        ])?;
    }

    finish(wtr)
}
