//! Loading translation tables from comma-separated files.
//!
//! Standard CSV rules apply: double-quoted fields, doubled quotes as escape.
//! Rows may have any number of fields; the parser decides what is valid.
//!
//! The whole file must be UTF-8; a bad byte in any column is a decode error,
//! not a validation error. Blank lines are skipped by the CSV reader and never
//! count as rows, so `"a,1\n\nb,2\n"` is a two-row table.

use crate::dictionary::Dictionary;
use crate::error::{LoadError, Result};
use crate::parser;
use csv::{ErrorKind, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io;
use std::path::Path;

/// Open a CSV file and build a dictionary from it.
pub fn load_file(path: impl AsRef<Path>) -> Result<Dictionary> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| {
        tracing::error!(path = %path.display(), "could not open file: {}", source);
        LoadError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let dictionary = load_reader(file)?;
    tracing::info!(path = %path.display(), rows = dictionary.len(), "dictionary loaded");
    Ok(dictionary)
}

/// Build a dictionary from any CSV source.
pub fn load_reader<R: io::Read>(reader: R) -> Result<Dictionary> {
    let rows = read_rows(reader)?;
    tracing::debug!(rows = rows.len(), "read rows: {:?}", rows);
    Ok(parser::parse(&rows)?)
}

/// Read every record as text without interpreting it.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(read_error)
}

fn read_error(error: csv::Error) -> LoadError {
    if let ErrorKind::Utf8 { pos, .. } = error.kind() {
        let line = pos.as_ref().map_or(0, |pos| pos.line());
        tracing::error!(line, "file is not valid UTF-8: {}", error);
        return LoadError::Decode {
            line,
            source: error,
        };
    }

    tracing::error!("could not read file: {}", error);
    LoadError::Read(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_simple_table() {
        let dictionary = load_reader("dog,chien\ncat,chat\n".as_bytes()).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.row(1).unwrap().source, "cat");
        assert_eq!(dictionary.row(1).unwrap().target, "chat");
    }

    #[test]
    fn quoted_fields() {
        let input = "\"hello, world\",\"say \"\"hi\"\"\"\nb,2\n";
        let dictionary = load_reader(input.as_bytes()).unwrap();
        let row = dictionary.row(0).unwrap();
        assert_eq!(row.source, "hello, world");
        assert_eq!(row.target, "say \"hi\"");
    }

    #[test]
    fn whitespace_is_preserved() {
        let dictionary = load_reader(" a ,1\nb, 2\n".as_bytes()).unwrap();
        assert_eq!(dictionary.row(0).unwrap().source, " a ");
        assert_eq!(dictionary.row(1).unwrap().target, " 2");
    }

    #[test]
    fn ragged_rows_reach_validation() {
        let result = load_reader("x,y\na\n".as_bytes());
        assert!(matches!(
            result,
            Err(LoadError::Validation(ValidationError::MissingTranslationField { row: 2 }))
        ));
    }

    #[test]
    fn single_row_rejected() {
        let result = load_reader("x,y\n".as_bytes());
        assert!(matches!(
            result,
            Err(LoadError::Validation(ValidationError::TooFewRows { found: 1 }))
        ));
    }

    #[test]
    fn invalid_utf8_is_decode_error() {
        let input: &[u8] = b"x,y\na,\xff\xfe\n";
        match load_reader(input) {
            Err(error @ LoadError::Decode { .. }) => assert!(error.is_file_error()),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_utf8_in_extra_column_is_decode_error() {
        let input: &[u8] = b"x,y,\xff\na,b\n";
        match load_reader(input) {
            Err(error @ LoadError::Decode { .. }) => assert!(error.is_file_error()),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn blank_lines_skipped() {
        let dictionary = load_reader("a,1\n\nb,2\n\n".as_bytes()).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.row(1).unwrap().source, "b");
        assert_eq!(dictionary.row(1).unwrap().line_number, 2);
    }

    #[test]
    fn missing_file_is_open_error() {
        let result = load_file("this/file/does/not/exist.csv");
        match result {
            Err(error @ LoadError::Open { .. }) => assert!(error.is_file_error()),
            other => panic!("expected open error, got {:?}", other),
        }
    }

    #[test]
    fn load_from_disk() {
        let path = std::env::temp_dir().join(format!("vocab-core-load-{}.csv", std::process::id()));
        std::fs::write(&path, "dog,chien\ncat,chat\n").unwrap();
        let dictionary = load_file(&path);
        std::fs::remove_file(&path).ok();

        let dictionary = dictionary.unwrap();
        assert_eq!(dictionary.language_a().len(), 2);
    }
}
