// engine/src/puzzle/mod.rs
#![forbid(unsafe_code)]

mod check;
mod difficulty;
mod numbering;
mod render;
mod runs;
mod wordlist;

/**
 * Creator/player-side helpers built on top of the layout engine output.
 *
 * None of these change how words are placed; they validate input, number clues,
 * label, render and re-check finished layouts.
 */
pub use check::{LayoutViolation, check_layout};
pub use difficulty::Difficulty;
pub use numbering::{NumberedPuzzle, NumberedWord, number_layout};
pub use render::{render_ascii, render_clues, solution_cells};
pub use runs::best_of_runs;
pub use wordlist::{MIN_WORDS, WordList, WordListError};
