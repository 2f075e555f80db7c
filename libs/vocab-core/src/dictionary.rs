//! Bilingual dictionary model.
//!
//! Words are owned by their [`Language`] and addressed by [`WordId`]. A
//! translation link is a `WordId` into the *other* language of the same
//! [`Dictionary`], so the symmetric word graph carries no reference cycles.

use crate::types::Row;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Default name of the first (source) language.
pub const LANGUAGE_A: &str = "Language A";
/// Default name of the second (target) language.
pub const LANGUAGE_B: &str = "Language B";

/// Position of a word inside its language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(usize);

impl WordId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A text token in one language and its links into the other language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    id: WordId,
    text: String,
    translations: BTreeSet<WordId>,
}

impl Word {
    fn new(id: WordId, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            translations: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> WordId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Ids of the translations, in the other language of the dictionary.
    pub fn translations(&self) -> impl Iterator<Item = WordId> + '_ {
        self.translations.iter().copied()
    }

    pub fn translation_count(&self) -> usize {
        self.translations.len()
    }

    pub fn has_translation(&self, id: WordId) -> bool {
        self.translations.contains(&id)
    }
}

/// One side of a dictionary: unique words in first-seen order.
#[derive(Debug, Clone)]
pub struct Language {
    name: String,
    words: Vec<Word>,
    index: HashMap<String, WordId>,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            words: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Return the word with this exact text, appending a new one if absent.
    pub fn get_or_create(&mut self, text: &str) -> WordId {
        if let Some(&id) = self.index.get(text) {
            return id;
        }

        let id = WordId(self.words.len());
        self.words.push(Word::new(id, text));
        self.index.insert(text.to_string(), id);
        id
    }

    /// Membership by exact text.
    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    /// Membership by identity: true only for a word owned by this language.
    pub fn contains_word(&self, word: &Word) -> bool {
        self.words
            .get(word.id.0)
            .is_some_and(|own| std::ptr::eq(own, word))
    }

    pub fn get(&self, text: &str) -> Option<&Word> {
        self.index.get(text).map(|id| &self.words[id.0])
    }

    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(id.0)
    }

    /// Words in insertion order.
    pub fn words(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    fn link(&mut self, id: WordId, translation: WordId) {
        self.words[id.0].translations.insert(translation);
    }
}

/// Which language of a dictionary a word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Two languages linked by translations, plus the rows they were built from.
///
/// There are no mutating methods: a reload builds a new dictionary.
#[derive(Debug, Clone)]
pub struct Dictionary {
    language_a: Language,
    language_b: Language,
    rows: Vec<Row>,
}

impl Dictionary {
    /// Build a dictionary from rows in order, linking each row's pair both ways.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut language_a = Language::new(LANGUAGE_A);
        let mut language_b = Language::new(LANGUAGE_B);

        for row in &rows {
            let word_a = language_a.get_or_create(&row.source);
            let word_b = language_b.get_or_create(&row.target);
            language_a.link(word_a, word_b);
            language_b.link(word_b, word_a);
        }

        Self {
            language_a,
            language_b,
            rows,
        }
    }

    pub fn language_a(&self) -> &Language {
        &self.language_a
    }

    pub fn language_b(&self) -> &Language {
        &self.language_b
    }

    pub fn language(&self, side: Side) -> &Language {
        match side {
            Side::A => &self.language_a,
            Side::B => &self.language_b,
        }
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Texts of the translations of `text` on `side`, or None if the word is unknown.
    pub fn translations_of(&self, side: Side, text: &str) -> Option<Vec<&str>> {
        let word = self.language(side).get(text)?;
        let other = self.language(side.other());
        Some(
            word.translations()
                .filter_map(|id| other.word(id))
                .map(Word::text)
                .collect(),
        )
    }

    fn fmt_language(&self, f: &mut fmt::Formatter<'_>, side: Side) -> fmt::Result {
        let language = self.language(side);
        let other = self.language(side.other());

        writeln!(f, "{}:", language.name())?;
        for word in language.words() {
            let translations = word
                .translations()
                .filter_map(|id| other.word(id))
                .map(|t| format!("'{}'", t.text()))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "Word '{}' has translations: {}", word.text(), translations)?;
        }
        Ok(())
    }
}

impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_language(f, Side::A)?;
        self.fmt_language(f, Side::B)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Tiny alphabets so generated tables are full of repeats and synonyms.
    fn table() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[a-c]{1,2}", "[x-z]{1,2}"), 0..40)
    }

    fn build(pairs: &[(String, String)]) -> Dictionary {
        Dictionary::from_rows(
            pairs
                .iter()
                .enumerate()
                .map(|(i, (a, b))| Row::new(a.as_str(), b.as_str(), i + 1))
                .collect(),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_get_or_create_idempotent(
            texts in prop::collection::vec("[a-d]{1,3}", 0..30),
            text in "[a-d]{1,3}",
        ) {
            let mut language = Language::new("test");
            for t in &texts {
                language.get_or_create(t);
            }
            let before = language.len();
            let existed = language.contains(&text);

            let first = language.get_or_create(&text);
            let second = language.get_or_create(&text);

            prop_assert_eq!(first, second);
            prop_assert_eq!(language.len(), before + usize::from(!existed));
            prop_assert_eq!(language.word(first).map(Word::text), Some(text.as_str()));
        }

        #[test]
        fn prop_words_in_first_seen_order(texts in prop::collection::vec("[a-d]{1,2}", 0..30)) {
            let mut language = Language::new("test");
            let mut expected: Vec<&str> = Vec::new();
            for t in &texts {
                language.get_or_create(t);
                if !expected.contains(&t.as_str()) {
                    expected.push(t);
                }
            }
            let actual: Vec<&str> = language.words().map(Word::text).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_translations_symmetric(pairs in table()) {
            let dictionary = build(&pairs);
            for word_a in dictionary.language_a().words() {
                for word_b in dictionary.language_b().words() {
                    prop_assert_eq!(
                        word_a.has_translation(word_b.id()),
                        word_b.has_translation(word_a.id())
                    );
                }
            }
        }

        #[test]
        fn prop_every_word_translated(pairs in table()) {
            let dictionary = build(&pairs);
            let all_words = dictionary
                .language_a()
                .words()
                .chain(dictionary.language_b().words());
            for word in all_words {
                prop_assert!(word.translation_count() > 0, "{} has no translation", word.text());
            }
        }

        #[test]
        fn prop_links_are_exactly_the_rows(pairs in table()) {
            let dictionary = build(&pairs);
            for word_a in dictionary.language_a().words() {
                for word_b in dictionary.language_b().words() {
                    let in_rows = pairs
                        .iter()
                        .any(|(a, b)| a == word_a.text() && b == word_b.text());
                    prop_assert_eq!(word_a.has_translation(word_b.id()), in_rows);
                }
            }
        }
    }
}
