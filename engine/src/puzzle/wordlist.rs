// engine/src/puzzle/wordlist.rs
#![forbid(unsafe_code)]

use thiserror::Error;

use crate::layout::WordEntry;

/// Smallest word list a creator may submit.
pub const MIN_WORDS: usize = 5;

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("need at least {required} words with both an answer and a clue, found {found}")]
    TooFewWords { found: usize, required: usize },
    #[error("invalid word list JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Creator input after filtering out incomplete rows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WordList {
    entries: Vec<WordEntry>,
    skipped: usize,
}

impl WordList {
    /// Keeps entries whose answer and clue are both non-blank; requires [`MIN_WORDS`] of them.
    pub fn from_entries(entries: Vec<WordEntry>) -> Result<Self, WordListError> {
        let total = entries.len();
        let entries: Vec<WordEntry> = entries
            .into_iter()
            .filter(|e| !e.answer.trim().is_empty() && !e.clue.trim().is_empty())
            .collect();

        if entries.len() < MIN_WORDS {
            return Err(WordListError::TooFewWords {
                found: entries.len(),
                required: MIN_WORDS,
            });
        }

        let skipped = total - entries.len();
        Ok(Self { entries, skipped })
    }

    /// Parses a JSON array of `{"answer": ..., "clue": ...}` objects.
    pub fn from_json(json: &str) -> Result<Self, WordListError> {
        let entries: Vec<WordEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows dropped for a blank answer or clue.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn into_entries(self) -> Vec<WordEntry> {
        self.entries
    }
}
