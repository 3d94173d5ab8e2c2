// engine/src/puzzle/difficulty.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Coarse label from word count and grid area.
    ///
    /// - Easy:   at most 6 words on at most 100 cells.
    /// - Hard:   12+ words, or 400+ cells.
    /// - Medium: everything else.
    pub fn assess(placed: usize, width: usize, height: usize) -> Self {
        let area = width * height;
        if placed >= 12 || area >= 400 {
            Difficulty::Hard
        } else if placed <= 6 && area <= 100 {
            Difficulty::Easy
        } else {
            Difficulty::Medium
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(Difficulty::assess(5, 10, 10), Difficulty::Easy);
        assert_eq!(Difficulty::assess(6, 11, 10), Difficulty::Medium);
        assert_eq!(Difficulty::assess(7, 8, 8), Difficulty::Medium);
        assert_eq!(Difficulty::assess(12, 8, 8), Difficulty::Hard);
        assert_eq!(Difficulty::assess(3, 20, 20), Difficulty::Hard);
    }
}
