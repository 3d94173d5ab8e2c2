// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod layout;
pub mod puzzle;

// Re-export the bits the CLI and integration tests need:
pub use layout::{
    DEFAULT_ATTEMPTS, DEFAULT_MARGIN, Direction, Layout, LayoutConfig, MAX_MARGIN,
    OrderingStrategy, PlacedWord, WordEntry, generate_layout, generate_layout_seeded,
    generate_layout_with, normalize_answer,
};
pub use puzzle::{
    Difficulty, LayoutViolation, MIN_WORDS, NumberedPuzzle, NumberedWord, WordList,
    WordListError, best_of_runs, check_layout, number_layout, render_ascii, render_clues,
    solution_cells,
};
