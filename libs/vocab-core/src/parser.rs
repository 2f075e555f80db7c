//! Validation of raw translation tables.
//!
//! A table is accepted only when:
//! - it has at least 2 rows (no header row is assumed or skipped),
//! - every row has at least 2 fields,
//! - fields 0 and 1 of every row are valid UTF-8.
//!
//! Further columns are ignored. Nothing is built unless every row passes.

use crate::dictionary::Dictionary;
use crate::error::ValidationError;
use crate::types::Row;

/// Minimum number of rows in a table.
pub const MIN_ROWS: usize = 2;

/// Validate raw rows and build a dictionary from them in order.
pub fn parse<I, R, F>(rows: I) -> Result<Dictionary, ValidationError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let validated = validate(rows)?;
    let dictionary = Dictionary::from_rows(validated);

    tracing::info!(
        rows = dictionary.len(),
        words_a = dictionary.language_a().len(),
        words_b = dictionary.language_b().len(),
        "dictionary built"
    );
    tracing::debug!("dictionary:\n{}", dictionary);

    Ok(dictionary)
}

/// Check the structural rules and return the text pairs.
pub fn validate<I, R, F>(rows: I) -> Result<Vec<Row>, ValidationError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let rows: Vec<R> = rows.into_iter().collect();

    if rows.len() < MIN_ROWS {
        tracing::error!(found = rows.len(), "file contains less than 2 rows");
        return Err(ValidationError::TooFewRows { found: rows.len() });
    }

    let mut validated = Vec::with_capacity(rows.len());

    for (idx, row) in rows.into_iter().enumerate() {
        let line_num = idx + 1;
        let mut fields = row.into_iter();

        let (Some(source), Some(target)) = (fields.next(), fields.next()) else {
            tracing::error!(row = line_num, "file contains words without translations");
            return Err(ValidationError::MissingTranslationField { row: line_num });
        };

        let source = field_text(source.as_ref(), line_num, 0)?;
        let target = field_text(target.as_ref(), line_num, 1)?;
        validated.push(Row::new(source, target, line_num));
    }

    Ok(validated)
}

fn field_text(bytes: &[u8], row: usize, column: usize) -> Result<&str, ValidationError> {
    std::str::from_utf8(bytes).map_err(|_| {
        tracing::error!(row, column, "field cannot be parsed as text");
        ValidationError::UnparsableField { row, column }
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn table(min_rows: usize) -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[a-c]{1,2}", "[x-z]{1,2}"), min_rows..40)
    }

    fn fields(pairs: &[(String, String)]) -> Vec<Vec<&str>> {
        pairs
            .iter()
            .map(|(a, b)| vec![a.as_str(), b.as_str()])
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_every_row_round_trips(pairs in table(MIN_ROWS)) {
            let dictionary = parse(fields(&pairs)).unwrap();
            prop_assert_eq!(dictionary.len(), pairs.len());

            for (i, (a, b)) in pairs.iter().enumerate() {
                let row = dictionary.row(i).unwrap();
                prop_assert_eq!(&row.source, a);
                prop_assert_eq!(&row.target, b);

                let word_a = dictionary.language_a().get(a).unwrap();
                let word_b = dictionary.language_b().get(b).unwrap();
                prop_assert!(word_a.has_translation(word_b.id()));
                prop_assert!(word_b.has_translation(word_a.id()));
            }
        }

        #[test]
        fn prop_short_tables_rejected(pairs in prop::collection::vec(("[a-c]", "[x-z]"), 0..MIN_ROWS)) {
            prop_assert_eq!(
                parse(fields(&pairs)).unwrap_err(),
                ValidationError::TooFewRows { found: pairs.len() }
            );
        }

        #[test]
        fn prop_row_without_translation_rejected(
            pairs in table(MIN_ROWS),
            short in any::<prop::sample::Index>(),
        ) {
            let mut rows = fields(&pairs);
            let i = short.index(rows.len());
            rows[i].truncate(1);

            prop_assert_eq!(
                parse(rows).unwrap_err(),
                ValidationError::MissingTranslationField { row: i + 1 }
            );
        }
    }
}
