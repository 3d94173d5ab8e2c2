// engine/src/layout/mod.rs
#![forbid(unsafe_code)]

mod generator;
mod word;

/**
 * Curated layout public API.
 *
 * The attempt loop and the per-attempt grid are internal; callers hand in a word list and
 * get back the best `Layout` (or `None` when no answer is usable).
 */
pub use generator::{
    DEFAULT_ATTEMPTS, DEFAULT_MARGIN, Layout, LayoutConfig, MAX_MARGIN, OrderingStrategy,
    generate_layout, generate_layout_seeded, generate_layout_with,
};
pub use word::{Direction, PlacedWord, WordEntry, normalize_answer};
