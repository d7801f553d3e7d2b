//! Line-level CSV codec used by the import/export round-trip.
//!
//! Files exported by the admin tools follow RFC 4180-style quoting with a
//! comma or semicolon separator, a pipe for multi-valued subfields, and a
//! leading UTF-8 byte-order mark. Parsing here is deliberately lenient:
//! fields are trimmed and an unterminated quote is not an error.

use std::borrow::Borrow;

/// Byte-order mark prepended to exported files so spreadsheets detect UTF-8.
pub const UTF8_BOM: &str = "\u{FEFF}";

/// Separator for multi-valued fields such as category lists.
pub const MULTI_VALUE_SEPARATOR: char = '|';

/// Whether files written with `separator` can be read back.
///
/// Only the two separators [`detect_separator`] recognizes qualify.
pub fn is_supported_separator(separator: char) -> bool {
    matches!(separator, ',' | ';')
}

/// Pick the field separator for a file by inspecting its header line.
///
/// A semicolon anywhere in the header selects `;`, otherwise `,`.
pub fn detect_separator(header: &str) -> char {
    if header.contains(';') { ';' } else { ',' }
}

/// Split one line into trimmed fields.
///
/// # Examples
///
/// ```
/// use vidcat_catalog::csv_line::parse_line;
///
/// assert_eq!(parse_line(r#"a,"b,c",d"#, ','), vec!["a", "b,c", "d"]);
/// assert_eq!(parse_line(r#"a,"b""c",d"#, ','), vec!["a", "b\"c", "d"]);
/// assert_eq!(parse_line(",,", ','), vec!["", "", ""]);
/// ```
pub fn parse_line(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if ch == separator && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// One logical record of a CSV file and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRecord<'a> {
    /// 1-based physical line number of the record's first line.
    pub line: usize,
    /// Raw record text without its terminator.
    pub text: &'a str,
}

/// Split file contents into records, honoring quotes.
///
/// A newline inside a quoted field belongs to the field, so such a record
/// spans several physical lines. A quote only opens a quoted field at the
/// start of a field (after `,`, `;`, or a line break, ignoring whitespace);
/// elsewhere it is plain data. A quoted field still open at end of input
/// does not swallow the rest of the file: its first physical line becomes a
/// record of its own and splitting resumes on the next line.
///
/// A leading byte-order mark is dropped, both `\n` and `\r\n` terminate
/// records, and records that are blank after trimming are skipped (their
/// lines still count toward numbering).
pub fn split_records(text: &str) -> Vec<SourceRecord<'_>> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut records = Vec::new();
    let mut pos = 0;
    let mut line = 1;

    while let Some((open_at, open_line)) = scan_records(text, pos, line, &mut records) {
        let end = text[open_at..]
            .find('\n')
            .map_or(text.len(), |n| open_at + n);
        push_record(&mut records, &text[open_at..end], open_line);
        if end >= text.len() {
            break;
        }
        pos = end + 1;
        line = open_line + 1;
    }

    records
}

/// Push every record of `text[pos..]`, the first starting on `line`.
///
/// Returns the offset and line of the last record instead of pushing it when
/// input ends inside a quoted field.
fn scan_records<'a>(
    text: &'a str,
    pos: usize,
    mut line: usize,
    records: &mut Vec<SourceRecord<'a>>,
) -> Option<(usize, usize)> {
    let mut in_quotes = false;
    let mut field_start = true;
    let mut start = pos;
    let mut start_line = line;
    let mut chars = text[pos..].char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if chars.peek().is_some_and(|&(_, next)| next == '"') {
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else if field_start {
                    in_quotes = true;
                }
                field_start = false;
            }
            '\n' => {
                if !in_quotes {
                    let i = pos + offset;
                    push_record(records, &text[start..i], start_line);
                    start = i + 1;
                    start_line = line + 1;
                    field_start = true;
                }
                line += 1;
            }
            ',' | ';' => {
                if !in_quotes {
                    field_start = true;
                }
            }
            c if c.is_whitespace() => {}
            _ => field_start = false,
        }
    }

    if in_quotes {
        return Some((start, start_line));
    }
    if start < text.len() {
        push_record(records, &text[start..], start_line);
    }
    None
}

fn push_record<'a>(records: &mut Vec<SourceRecord<'a>>, raw: &'a str, line: usize) {
    let text = raw.strip_suffix('\r').unwrap_or(raw);
    if !text.trim().is_empty() {
        records.push(SourceRecord { line, text });
    }
}

/// Split a multi-valued field on `|`, trimming entries and dropping empties
/// and repeats while keeping first-seen order.
pub fn split_multi_value(field: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for part in field.split(MULTI_VALUE_SEPARATOR) {
        let part = part.trim();
        if !part.is_empty() && !values.iter().any(|v| v == part) {
            values.push(part.to_string());
        }
    }
    values
}

/// Join values into a multi-valued field.
pub fn join_multi_value<S: Borrow<str>>(values: &[S]) -> String {
    let mut buf = [0; 4];
    values.join(&*MULTI_VALUE_SEPARATOR.encode_utf8(&mut buf))
}
