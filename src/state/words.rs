//! Word bank.
//!
//! The bank is an ordered list of unique [`Word`]s persisted as a JSON array
//! under a single storage key. Every mutation is written through before it is
//! committed in memory, so a failed write leaves the bank as it was.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::HangmanError;
use super::storage::{KeyValueStore, StorageError};

/// Terms the bank starts with when nothing usable is persisted.
pub const DEFAULT_WORDS: [&str; 20] = [
    "DEVOPS",
    "AGILE",
    "VERSION",
    "BRANCH",
    "GITHUB",
    "CHANGES",
    "FEATURES",
    "HOTFIX",
    "CONTINUOUS",
    "INTEGRATION",
    "DEPLOYMENT",
    "TESTING",
    "COMMIT",
    "SNAPSHOT",
    "CULTURE",
    "PIPELINE",
    "DOCKER",
    "SCRUM",
    "KANBAN",
    "MERGE",
];

/// Trim and uppercase raw user input.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A playable word: non-empty, uppercase A-Z only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Normalize and validate raw input.
    pub fn parse(raw: &str) -> Result<Self, HangmanError> {
        let word = normalize(raw);
        if word.is_empty() {
            return Err(HangmanError::EmptyWord);
        }
        Self::check_letters(word)
    }

    fn check_letters(word: String) -> Result<Self, HangmanError> {
        if word.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Self(word))
        } else {
            Err(HangmanError::InvalidCharacters(word))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Letters in order, with repeats.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for Word {
    type Error = HangmanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn default_words() -> Vec<Word> {
    DEFAULT_WORDS.iter().map(|w| Word(w.to_string())).collect()
}

/// Persisted, ordered, duplicate-free word bank.
#[derive(Debug, Clone)]
pub struct WordStore<S> {
    store: S,
    key: String,
    words: Vec<Word>,
}

impl<S: KeyValueStore> WordStore<S> {
    /// Load the bank from `store`, falling back to [`DEFAULT_WORDS`].
    ///
    /// Never fails. Entries that are not valid words, or repeat an earlier
    /// entry, are dropped. If nothing usable remains the defaults are used
    /// and persisted.
    pub fn load(store: S, key: &str) -> Self {
        let mut bank = Self {
            store,
            key: key.to_string(),
            words: Vec::new(),
        };

        let raw = bank.store.get(key);
        let (words, dirty) = match raw.as_deref().map(|json| serde_json::from_str::<Vec<String>>(json)) {
            Some(Ok(entries)) => {
                let mut dirty = false;
                let mut words: Vec<Word> = Vec::with_capacity(entries.len());
                for entry in entries {
                    let parsed = Word::parse(&entry);
                    // Anything other than an exact, first-seen word is rewritten
                    dirty |= !matches!(&parsed, Ok(word) if word.as_str() == entry && !words.contains(word));
                    match parsed {
                        Ok(word) if !words.contains(&word) => words.push(word),
                        Ok(word) => warn!(%word, "dropping duplicate persisted word"),
                        Err(err) => warn!(entry = %entry, error = %err, "dropping invalid persisted word"),
                    }
                }
                (words, dirty)
            }
            Some(Err(err)) => {
                warn!(key, error = %err, "persisted word bank is corrupt");
                (Vec::new(), true)
            }
            None => (Vec::new(), true),
        };

        if words.is_empty() {
            info!(key, "using default word bank");
            bank.words = default_words();
        } else {
            bank.words = words;
        }

        if dirty {
            let words = bank.words.clone();
            if let Err(err) = bank.persist(&words) {
                warn!(key, error = %err, "could not persist word bank on load");
            }
        }

        debug!(key, count = bank.words.len(), "word bank loaded");
        bank
    }

    /// Add a word at the end of the bank.
    pub fn add(&mut self, raw: &str) -> Result<&Word, HangmanError> {
        let word = self.validate(raw, None)?;

        let mut next = self.words.clone();
        next.push(word);
        self.commit(next)?;

        info!(count = self.words.len(), "word added");
        Ok(&self.words[self.words.len() - 1])
    }

    /// Replace the word at `index`.
    pub fn edit(&mut self, index: usize, raw: &str) -> Result<&Word, HangmanError> {
        self.check_index(index)?;
        let word = self.validate(raw, Some(index))?;

        let mut next = self.words.clone();
        next[index] = word;
        self.commit(next)?;

        info!(index, "word edited");
        Ok(&self.words[index])
    }

    /// Remove the word at `index`, returning it.
    pub fn delete(&mut self, index: usize) -> Result<Word, HangmanError> {
        self.check_index(index)?;

        let mut next = self.words.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(index, word = %removed, "word deleted");
        Ok(removed)
    }

    /// Normalize and validate `raw`, ignoring the entry at `except` for the
    /// duplicate check.
    fn validate(&self, raw: &str, except: Option<usize>) -> Result<Word, HangmanError> {
        let word = normalize(raw);
        if word.is_empty() {
            return Err(HangmanError::EmptyWord);
        }

        let duplicate = self
            .words
            .iter()
            .enumerate()
            .any(|(i, w)| Some(i) != except && w.as_str() == word);
        if duplicate {
            return Err(HangmanError::DuplicateWord(word));
        }

        Word::check_letters(word)
    }

    fn check_index(&self, index: usize) -> Result<(), HangmanError> {
        if index < self.words.len() {
            Ok(())
        } else {
            Err(HangmanError::IndexOutOfRange {
                index,
                len: self.words.len(),
            })
        }
    }

    fn commit(&mut self, next: Vec<Word>) -> Result<(), HangmanError> {
        self.persist(&next)?;
        self.words = next;
        Ok(())
    }

    fn persist(&mut self, words: &[Word]) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(words).map_err(|e| StorageError::new(&self.key, e.to_string()))?;
        self.store.set(&self.key, &json)
    }
}

impl<S> WordStore<S> {
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check if a word is in the bank (input is normalized first).
    pub fn contains(&self, raw: &str) -> bool {
        self.position(raw).is_some()
    }

    pub fn position(&self, raw: &str) -> Option<usize> {
        let word = normalize(raw);
        self.words.iter().position(|w| w.as_str() == word)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.store
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "words": self.words,
            "count": self.words.len()
        })
    }
}
