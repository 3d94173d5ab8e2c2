// engine/src/layout/word.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Orientation of a word on the grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    #[inline]
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// (d_row, d_col) of one step along this axis.
    #[inline]
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    /// Coordinate of letter `i` for a word anchored at `(row, col)`.
    #[inline]
    pub fn cell(self, row: i32, col: i32, i: usize) -> (i32, i32) {
        let (dr, dc) = self.step();
        let i = i as i32;
        (row + dr * i, col + dc * i)
    }
}

/// One `(answer, clue)` pair as supplied by the creator.
///
/// The clue is opaque to the engine and passed through unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    pub answer: String,
    pub clue: String,
}

impl WordEntry {
    pub fn new(answer: impl Into<String>, clue: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            clue: clue.into(),
        }
    }

    /// Copy with the answer uppercased and all whitespace removed.
    pub fn normalized(&self) -> Self {
        Self {
            answer: normalize_answer(&self.answer),
            clue: self.clue.clone(),
        }
    }
}

/// Uppercase and strip whitespace anywhere in the answer ("ice cream" -> "ICECREAM").
pub fn normalize_answer(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A word committed to the final, margin-normalized layout.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub answer: String,
    pub clue: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl PlacedWord {
    /// Length in letters (not bytes).
    pub fn len(&self) -> usize {
        self.answer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    /// Iterates `(row, col, letter)` over the word's span.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        let (dr, dc) = self.direction.step();
        self.answer.chars().enumerate().map(move |(i, ch)| {
            (
                self.row + dr as usize * i,
                self.col + dc as usize * i,
                ch,
            )
        })
    }

    /// Coordinate of the last letter.
    pub fn end(&self) -> (usize, usize) {
        let last = self.len().saturating_sub(1);
        match self.direction {
            Direction::Across => (self.row, self.col + last),
            Direction::Down => (self.row + last, self.col),
        }
    }
}
