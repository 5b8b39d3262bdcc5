//! Delimited-text reader for source export files.
//!
//! Rows come back exactly as tokenized, header included. Record kinds have
//! different header shapes, so skipping it is left to the normalizers.

use std::path::Path;

use juicescout_shared::{MigrationError, Result};
use tracing::{debug, info};

/// A raw export row: one string per field, in column order.
pub type Row = Vec<String>;

/// Read and tokenize an export file.
///
/// Fails with [`MigrationError::Io`] when the file cannot be read and with
/// [`MigrationError::Format`] when its content is not valid comma-separated text.
pub fn read_records(path: &Path) -> Result<Vec<Row>> {
    let content = std::fs::read(path).map_err(|e| MigrationError::io(path, e))?;

    let rows = tokenize(&content)
        .map_err(|e| MigrationError::format(format!("{}: {e}", path.display())))?;

    info!(path = %path.display(), rows = rows.len(), "parsed export file");
    Ok(rows)
}

/// Tokenize in-memory export content.
pub fn parse_records(content: &[u8]) -> Result<Vec<Row>> {
    tokenize(content).map_err(|e| MigrationError::format(e.to_string()))
}

fn tokenize(content: &[u8]) -> std::result::Result<Vec<Row>, String> {
    check_quotes(content)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(content);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(String::from).collect());
    }

    debug!(rows = rows.len(), "tokenized delimited text");
    Ok(rows)
}

/// Reject quoting the `csv` reader tolerates: a `"` inside an unquoted field,
/// text after a closing quote, or a quoted field still open at end of input.
fn check_quotes(content: &[u8]) -> std::result::Result<(), String> {
    let mut line = 1usize;
    let mut opened_on = 0usize;
    let mut field_start = true;
    let mut in_quotes = false;
    let mut i = 0;

    while i < content.len() {
        let byte = content[i];

        if in_quotes {
            match byte {
                b'"' if content.get(i + 1) == Some(&b'"') => i += 1,
                b'"' => {
                    in_quotes = false;
                    if !matches!(content.get(i + 1), None | Some(b',' | b'\n' | b'\r')) {
                        return Err(format!("line {line}: extraneous text after closing quote"));
                    }
                }
                b'\n' => line += 1,
                _ => {}
            }
        } else {
            match byte {
                b'"' if field_start => {
                    in_quotes = true;
                    opened_on = line;
                }
                b'"' => return Err(format!("line {line}: bare \" in unquoted field")),
                b',' | b'\n' => {
                    if byte == b'\n' {
                        line += 1;
                    }
                    field_start = true;
                    i += 1;
                    continue;
                }
                _ => {}
            }
            field_start = false;
        }

        i += 1;
    }

    if in_quotes {
        return Err(format!("line {opened_on}: quoted field is never closed"));
    }
    Ok(())
}
