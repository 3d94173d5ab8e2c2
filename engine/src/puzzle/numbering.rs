// engine/src/puzzle/numbering.rs
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layout::{Direction, Layout};
use crate::puzzle::difficulty::Difficulty;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NumberedWord {
    pub number: u32,
    pub answer: String,
    pub clue: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

/// A layout ready to persist or render: words carry clue numbers and the grid a label.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NumberedPuzzle {
    pub width: usize,
    pub height: usize,
    pub difficulty: Difficulty,
    /// Same order as `Layout::placed`.
    pub entries: Vec<NumberedWord>,
}

impl NumberedPuzzle {
    pub fn across(&self) -> Vec<&NumberedWord> {
        self.by_direction(Direction::Across)
    }

    pub fn down(&self) -> Vec<&NumberedWord> {
        self.by_direction(Direction::Down)
    }

    fn by_direction(&self, dir: Direction) -> Vec<&NumberedWord> {
        let mut out: Vec<&NumberedWord> =
            self.entries.iter().filter(|e| e.direction == dir).collect();
        out.sort_by_key(|e| e.number);
        out
    }

    /// Clue number printed in the cell at `(row, col)`, if a word starts there.
    pub fn number_at(&self, row: usize, col: usize) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.row == row && e.col == col)
            .map(|e| e.number)
    }
}

/// Numbers distinct start cells 1, 2, 3, ... in (row, col) order.
/// Words that start on the same cell share its number.
pub fn number_layout(layout: &Layout) -> NumberedPuzzle {
    let mut starts: BTreeMap<(usize, usize), u32> = BTreeMap::new();
    for p in &layout.placed {
        starts.insert((p.row, p.col), 0);
    }
    for (n, number) in starts.values_mut().enumerate() {
        *number = n as u32 + 1;
    }

    let entries = layout
        .placed
        .iter()
        .map(|p| NumberedWord {
            number: starts[&(p.row, p.col)],
            answer: p.answer.clone(),
            clue: p.clue.clone(),
            row: p.row,
            col: p.col,
            direction: p.direction,
        })
        .collect();

    NumberedPuzzle {
        width: layout.width,
        height: layout.height,
        difficulty: Difficulty::assess(layout.placed.len(), layout.width, layout.height),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PlacedWord;

    fn word(answer: &str, row: usize, col: usize, direction: Direction) -> PlacedWord {
        PlacedWord {
            answer: answer.into(),
            clue: format!("clue for {answer}"),
            row,
            col,
            direction,
        }
    }

    #[test]
    fn numbers_follow_row_then_column() {
        // BOA starts on an earlier row than the anchor, so it takes number 1.
        let layout = Layout {
            placed: vec![
                word("CAT", 2, 1, Direction::Across),
                word("CAR", 2, 1, Direction::Down),
                word("TAR", 2, 3, Direction::Down),
                word("BOA", 1, 4, Direction::Down),
            ],
            width: 7,
            height: 6,
            dropped: vec![],
            attempt: 0,
        };

        let numbered = number_layout(&layout);
        let numbers: Vec<u32> = numbered.entries.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![2, 2, 3, 1]);

        let across: Vec<&str> = numbered.across().iter().map(|e| e.answer.as_str()).collect();
        let down: Vec<&str> = numbered.down().iter().map(|e| e.answer.as_str()).collect();
        assert_eq!(across, vec!["CAT"]);
        assert_eq!(down, vec!["BOA", "CAR", "TAR"]);
        assert_eq!(numbered.number_at(2, 3), Some(3));
        assert_eq!(numbered.number_at(0, 0), None);
    }

    #[test]
    fn difficulty_is_attached() {
        let layout = Layout {
            placed: vec![word("CAT", 1, 1, Direction::Across)],
            width: 5,
            height: 3,
            dropped: vec![],
            attempt: 0,
        };
        assert_eq!(number_layout(&layout).difficulty, Difficulty::Easy);
    }
}
