//! Character-level decoder for collector result tables.
//!
//! The input is comma separated. A quoted field may contain commas and
//! newlines, and a doubled quote decodes to one `"`. An unquoted newline ends
//! a row. The first completed row is the header; data rows shorter than the
//! header are dropped.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::error::DecodeError;
use super::record::ResultRecord;

const BOM: char = '\u{feff}';

/// What to do with a trailing row that has no terminating newline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flush {
    /// The writer is done: flush the in-progress row like a newline would.
    AtEof,
    /// The writer may still be appending: hold the in-progress row back.
    Deferred,
}

/// Result of decoding a whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// The table's own first row, if one was completed
    pub header: Option<Vec<String>>,
    pub records: Vec<ResultRecord>,
    /// Data rows dropped for having fewer fields than the header
    pub dropped: usize,
}

/// Decoder state for one pass over the input.
struct RowDecoder<'a> {
    /// Keys records instead of the table's own header when set
    known_header: Option<&'a [String]>,
    header: Option<Vec<String>>,
    records: Vec<ResultRecord>,
    dropped: usize,
    row: Vec<String>,
    field: String,
    in_quotes: bool,
}

impl<'a> RowDecoder<'a> {
    fn new(known_header: Option<&'a [String]>) -> Self {
        Self {
            known_header,
            header: None,
            records: Vec::new(),
            dropped: 0,
            row: Vec::new(),
            field: String::new(),
            in_quotes: false,
        }
    }

    fn run(mut self, text: &str, flush: Flush) -> Decoded {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        self.field.push('"');
                        chars.next();
                    } else {
                        self.in_quotes = !self.in_quotes;
                    }
                }
                ',' if !self.in_quotes => self.close_field(),
                '\n' if !self.in_quotes => self.close_row(),
                _ => self.field.push(c),
            }
        }

        if flush == Flush::AtEof && (!self.field.is_empty() || !self.row.is_empty()) {
            self.close_row();
        }

        Decoded {
            header: self.header,
            records: self.records,
            dropped: self.dropped,
        }
    }

    fn close_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    fn close_row(&mut self) {
        self.close_field();
        let row = std::mem::take(&mut self.row);

        if self.header.is_none() {
            self.header = Some(row);
            return;
        }

        let header = match (self.known_header, &self.header) {
            (Some(known), _) => known,
            (None, Some(own)) => own.as_slice(),
            (None, None) => return,
        };

        if row.len() >= header.len() {
            self.records.push(ResultRecord::from_row(header, row));
        } else {
            debug!(
                fields = row.len(),
                expected = header.len(),
                "dropping short row"
            );
            self.dropped += 1;
        }
    }
}

/// Decode a whole table held in memory.
///
/// `known_header` is a header captured on an earlier pass; when given,
/// records are keyed by it rather than by the table's own first row.
pub fn decode_str(text: &str, known_header: Option<&[String]>, flush: Flush) -> Decoded {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let text = text.replace("\r\n", "\n");
    RowDecoder::new(known_header).run(&text, flush)
}

/// Re-read and decode the entire file at `path`.
///
/// Invalid UTF-8 is replaced rather than rejected, since the file may be
/// read while a multi-byte character is half written.
pub fn decode_file(
    path: &Path,
    known_header: Option<&[String]>,
    flush: Flush,
) -> Result<Decoded, DecodeError> {
    let bytes = fs::read(path).map_err(|e| DecodeError::from_io(path.to_path_buf(), e))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(decode_str(&text, known_header, flush))
}
