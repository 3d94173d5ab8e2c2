// engine/src/layout/generator.rs
#![forbid(unsafe_code)]

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use rand::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::layout::word::{Direction, PlacedWord, WordEntry};

/// Independent placement attempts per call.
pub const DEFAULT_ATTEMPTS: usize = 100;

/// Empty border (in cells) around the bounding box of the final layout.
pub const DEFAULT_MARGIN: usize = 1;

/// Largest accepted margin; larger requests are clamped.
pub const MAX_MARGIN: usize = 1 << 16;

/**
 * Tuning knobs for one `generate_layout_with` call.
 *
 * - `attempts`: clamped to at least 1 so the canonical attempt always runs.
 * - `margin`: border added on every side after normalization, at most `MAX_MARGIN`.
 * - `deadline`: wall-clock budget for the whole attempt loop. Checked before each attempt
 *   after the first; on expiry the best layout found so far is returned.
 */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LayoutConfig {
    pub attempts: usize,
    pub margin: usize,
    pub deadline: Option<Duration>,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            margin: DEFAULT_MARGIN,
            deadline: None,
        }
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin.min(MAX_MARGIN);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How an attempt orders the normalized word list before placing it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderingStrategy {
    /// Longest answer first, ties in input order.
    Canonical,
    /// Uniform random permutation of the canonical list.
    Shuffled,
}

impl OrderingStrategy {
    #[inline]
    pub fn for_attempt(attempt: usize) -> Self {
        if attempt == 0 {
            OrderingStrategy::Canonical
        } else {
            OrderingStrategy::Shuffled
        }
    }

    /// Reorders `items` (already in canonical order) in place.
    pub fn apply<T, R: Rng + ?Sized>(self, items: &mut [T], rng: &mut R) {
        if self == OrderingStrategy::Shuffled {
            items.shuffle(rng);
        }
    }
}

/// Best layout found by one engine call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub placed: Vec<PlacedWord>,
    pub width: usize,
    pub height: usize,
    /// Normalized entries the winning attempt could not place, in that attempt's order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<WordEntry>,
    /// Index of the winning attempt (0 = canonical ordering).
    #[serde(default)]
    pub attempt: usize,
}

impl Layout {
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Keep-best rule: strictly more placed words; ties keep the incumbent.
    pub fn improves_on(&self, incumbent: Option<&Layout>) -> bool {
        beats(self.placed.len(), incumbent)
    }
}

#[inline]
fn beats(placed: usize, incumbent: Option<&Layout>) -> bool {
    incumbent.is_none_or(|b| placed > b.placed.len())
}

#[derive(Clone, Copy, Debug)]
struct Cell {
    letter: char,
    across: bool,
    down: bool,
}

/// Sparse letter map for one attempt. Signed coordinates: words may extend above or left
/// of the anchor at (0, 0) until the layout is normalized.
#[derive(Default)]
struct Grid {
    cells: FxHashMap<(i32, i32), Cell>,
}

impl Grid {
    #[inline]
    fn is_occupied(&self, at: (i32, i32)) -> bool {
        self.cells.contains_key(&at)
    }

    fn place(&mut self, letters: &[char], slot: Slot) {
        for (i, &letter) in letters.iter().enumerate() {
            let cell = self
                .cells
                .entry(slot.direction.cell(slot.row, slot.col, i))
                .or_insert(Cell {
                    letter,
                    across: false,
                    down: false,
                });
            match slot.direction {
                Direction::Across => cell.across = true,
                Direction::Down => cell.down = true,
            }
        }
    }

    /// Rules:
    /// - The cells just before the first letter and just after the last letter are empty.
    /// - An occupied cell is only reusable as a crossing: same letter, and no word already
    ///   runs through it along the new word's axis.
    /// - An empty cell has no occupied orthogonal neighbour, except the word's own
    ///   predecessor/successor positions along its axis.
    fn is_cell_valid(&self, letters: &[char], slot: Slot) -> bool {
        let Slot {
            row,
            col,
            direction: dir,
        } = slot;
        let (dr, dc) = dir.step();
        let n = letters.len() as i32;
        if letters.is_empty()
            || self.is_occupied((row - dr, col - dc))
            || self.is_occupied((row + dr * n, col + dc * n))
        {
            return false;
        }

        for (i, &letter) in letters.iter().enumerate() {
            let (r, c) = dir.cell(row, col, i);

            if let Some(existing) = self.cells.get(&(r, c)) {
                let same_axis = match dir {
                    Direction::Across => existing.across,
                    Direction::Down => existing.down,
                };
                if existing.letter != letter || same_axis {
                    return false;
                }
                continue;
            }

            let own = [(r - dr, c - dc), (r + dr, c + dc)];
            let touching = [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)]
                .into_iter()
                .any(|nb| !own.contains(&nb) && self.is_occupied(nb));
            if touching {
                return false;
            }
        }

        true
    }
}

/// Anchor (first letter) and orientation of a word within one attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Slot {
    row: i32,
    col: i32,
    direction: Direction,
}

const ANCHOR: Slot = Slot {
    row: 0,
    col: 0,
    direction: Direction::Across,
};

/// First-match intersection search: placed words in placement order, then letter index
/// in the placed word, then letter index in the candidate. No backtracking.
fn find_placement(grid: &Grid, placed: &[(&[char], Slot)], candidate: &[char]) -> Option<Slot> {
    for &(word, slot) in placed {
        let direction = slot.direction.perpendicular();
        for (j, &pl) in word.iter().enumerate() {
            for (k, &cl) in candidate.iter().enumerate() {
                if pl != cl {
                    continue;
                }
                let (j, k) = (j as i32, k as i32);
                let (row, col) = match direction {
                    Direction::Across => (slot.row + j, slot.col - k),
                    Direction::Down => (slot.row - k, slot.col + j),
                };
                let found = Slot {
                    row,
                    col,
                    direction,
                };
                if grid.is_cell_valid(candidate, found) {
                    return Some(found);
                }
            }
        }
    }
    None
}

/// Normalizes every answer and stable-sorts by answer length, descending.
fn canonical_order(words: &[WordEntry]) -> Vec<WordEntry> {
    let mut out: Vec<WordEntry> = words.iter().map(WordEntry::normalized).collect();
    out.sort_by_key(|w| Reverse(w.answer.chars().count()));
    out
}

struct Prepared {
    entry: WordEntry,
    letters: Vec<char>,
}

struct Attempt {
    slots: Vec<(usize, Slot)>,
    dropped: Vec<usize>,
}

/// Lays out `words` with the default config (100 attempts, margin 1, no deadline).
///
/// Returns `None` only when no entry has a non-empty answer.
pub fn generate_layout<R: Rng + ?Sized>(words: &[WordEntry], rng: &mut R) -> Option<Layout> {
    generate_layout_with(words, rng, &LayoutConfig::default())
}

/// Reproducible variant: same `(words, seed)` always yields the same layout.
pub fn generate_layout_seeded(words: &[WordEntry], seed: u64) -> Option<Layout> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_layout(words, &mut rng)
}

pub fn generate_layout_with<R: Rng + ?Sized>(
    words: &[WordEntry],
    rng: &mut R,
    config: &LayoutConfig,
) -> Option<Layout> {
    let (usable, empty): (Vec<Prepared>, Vec<Prepared>) = canonical_order(words)
        .into_iter()
        .map(|entry| Prepared {
            letters: entry.answer.chars().collect(),
            entry,
        })
        .partition(|p| !p.letters.is_empty());

    if usable.is_empty() {
        return None;
    }

    let margin = config.margin.min(MAX_MARGIN);
    let started = Instant::now();
    let mut best: Option<Layout> = None;

    for attempt in 0..config.attempts.max(1) {
        if attempt > 0 && config.deadline.is_some_and(|d| started.elapsed() >= d) {
            debug!(attempt, "layout deadline reached; keeping best so far");
            break;
        }

        let result = run_attempt(&usable, OrderingStrategy::for_attempt(attempt), rng);
        let count = result.slots.len();

        if beats(count, best.as_ref()) {
            debug!(attempt, placed = count, total = usable.len(), "new best layout");
            best = Some(into_layout(&usable, &empty, result, attempt, margin));
        }

        // Nothing can strictly beat a layout that placed every word.
        if count == usable.len() {
            break;
        }
    }

    best
}

fn run_attempt<R: Rng + ?Sized>(
    words: &[Prepared],
    strategy: OrderingStrategy,
    rng: &mut R,
) -> Attempt {
    let mut order: Vec<usize> = (0..words.len()).collect();
    strategy.apply(&mut order, rng);

    let mut grid = Grid::default();
    let mut placed: Vec<(&[char], Slot)> = Vec::with_capacity(order.len());
    let mut slots: Vec<(usize, Slot)> = Vec::with_capacity(order.len());
    let mut dropped = Vec::new();

    for (n, idx) in order.into_iter().enumerate() {
        let letters = words[idx].letters.as_slice();
        let slot = if n == 0 {
            Some(ANCHOR)
        } else {
            find_placement(&grid, &placed, letters)
        };

        match slot {
            Some(slot) => {
                grid.place(letters, slot);
                placed.push((letters, slot));
                slots.push((idx, slot));
            }
            None => {
                trace!(answer = %words[idx].entry.answer, "no valid crossing; word dropped");
                dropped.push(idx);
            }
        }
    }

    Attempt { slots, dropped }
}

/// Shifts the attempt so the bounding box starts at `margin` and sizes the grid to match.
fn into_layout(
    words: &[Prepared],
    empty: &[Prepared],
    attempt: Attempt,
    index: usize,
    margin: usize,
) -> Layout {
    let (mut min_r, mut min_c, mut max_r, mut max_c) = (0i32, 0i32, 0i32, 0i32);
    for &(i, slot) in &attempt.slots {
        let last = words[i].letters.len() - 1;
        let (end_r, end_c) = slot.direction.cell(slot.row, slot.col, last);
        min_r = min_r.min(slot.row);
        min_c = min_c.min(slot.col);
        max_r = max_r.max(end_r);
        max_c = max_c.max(end_c);
    }

    // Offsets from the bounding-box corner are never negative.
    let offset = |v: i32, min: i32| (v - min).unsigned_abs() as usize + margin;

    let placed = attempt
        .slots
        .iter()
        .map(|&(i, slot)| PlacedWord {
            answer: words[i].entry.answer.clone(),
            clue: words[i].entry.clue.clone(),
            row: offset(slot.row, min_r),
            col: offset(slot.col, min_c),
            direction: slot.direction,
        })
        .collect();

    let dropped = attempt
        .dropped
        .iter()
        .map(|&i| &words[i])
        .chain(empty)
        .map(|p| p.entry.clone())
        .collect();

    Layout {
        placed,
        width: offset(max_c, min_c) + 1 + margin,
        height: offset(max_r, min_r) + 1 + margin,
        dropped,
        attempt: index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(answers: &[&str]) -> Vec<WordEntry> {
        answers.iter().map(|a| WordEntry::new(*a, "clue")).collect()
    }

    fn letters(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn slot(row: i32, col: i32, direction: Direction) -> Slot {
        Slot {
            row,
            col,
            direction,
        }
    }

    fn grid_with_cat() -> Grid {
        let mut g = Grid::default();
        g.place(&letters("CAT"), ANCHOR);
        g
    }

    // ---------------- grid validity ----------------

    #[test]
    fn crossing_on_matching_letter_is_valid() {
        let g = grid_with_cat();
        // "ART" down through the A of CAT, "BAT" down with its A on CAT's A.
        assert!(g.is_cell_valid(&letters("ART"), slot(0, 1, Direction::Down)));
        assert!(g.is_cell_valid(&letters("BAT"), slot(-1, 1, Direction::Down)));
        assert!(!g.is_cell_valid(&letters("ORE"), slot(0, 1, Direction::Down)));
    }

    #[test]
    fn running_alongside_a_word_is_rejected() {
        let g = grid_with_cat();
        assert!(!g.is_cell_valid(&letters("DOG"), slot(1, 0, Direction::Across)));
        assert!(!g.is_cell_valid(&letters("OX"), slot(0, 3, Direction::Down)));
    }

    #[test]
    fn extending_a_word_is_rejected() {
        let g = grid_with_cat();
        assert!(!g.is_cell_valid(&letters("SO"), slot(0, 3, Direction::Across)));
        assert!(!g.is_cell_valid(&letters("NO"), slot(0, -2, Direction::Across)));
    }

    #[test]
    fn collinear_overlap_is_rejected_even_when_letters_match() {
        let mut g = grid_with_cat();
        g.place(&letters("TOE"), slot(0, 2, Direction::Down));
        assert!(!g.is_cell_valid(&letters("CATS"), ANCHOR));
    }

    #[test]
    fn crossing_cell_cannot_be_reused_a_third_time() {
        let mut g = grid_with_cat();
        g.place(&letters("ART"), slot(0, 1, Direction::Down));
        assert!(!g.is_cell_valid(&letters("A"), slot(0, 1, Direction::Down)));
        assert!(!g.is_cell_valid(&letters("A"), slot(0, 1, Direction::Across)));
    }

    // ---------------- search & ordering ----------------

    #[test]
    fn first_matching_letter_wins() {
        let cat = letters("CAT");
        let g = grid_with_cat();
        // "TAR": C has no match; A(j=1) matches A(k=1) first.
        let found = find_placement(&g, &[(cat.as_slice(), ANCHOR)], &letters("TAR"));
        assert_eq!(found, Some(slot(-1, 1, Direction::Down)));
        assert_eq!(find_placement(&g, &[(cat.as_slice(), ANCHOR)], &letters("XYZ")), None);
    }

    #[test]
    fn crossing_a_down_word_places_across() {
        let (cat, art) = (letters("CAT"), letters("ART"));
        let art_slot = slot(0, 1, Direction::Down);
        let mut g = grid_with_cat();
        g.place(&art, art_slot);

        // Nothing fits on CAT (every crossing touches ART), so the search moves on to ART.
        let placed = [(cat.as_slice(), ANCHOR), (art.as_slice(), art_slot)];
        let found = find_placement(&g, &placed, &letters("OTTO"));
        assert_eq!(found, Some(slot(2, 0, Direction::Across)));
    }

    #[test]
    fn canonical_is_longest_first_and_stable() {
        let words = vec![
            WordEntry::new("cat", "pet"),
            WordEntry::new("ice cream", "dessert"),
            WordEntry::new("dog", "pet"),
            WordEntry::new("zebra", "stripes"),
        ];
        let c = canonical_order(&words);
        let answers: Vec<&str> = c.iter().map(|w| w.answer.as_str()).collect();
        assert_eq!(answers, vec!["ICECREAM", "ZEBRA", "CAT", "DOG"]);
        assert_eq!(c[0].clue, "dessert");
    }

    #[test]
    fn strategy_is_canonical_only_for_first_attempt() {
        assert_eq!(OrderingStrategy::for_attempt(0), OrderingStrategy::Canonical);
        assert_eq!(OrderingStrategy::for_attempt(1), OrderingStrategy::Shuffled);

        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<usize> = (0..10).collect();
        OrderingStrategy::Canonical.apply(&mut items, &mut rng);
        assert_eq!(items, (0..10).collect::<Vec<_>>());
        assert_eq!(rng.next_u64(), StdRng::seed_from_u64(7).next_u64());

        OrderingStrategy::Shuffled.apply(&mut items, &mut rng);
        items.sort_unstable();
        assert_eq!(items, (0..10).collect::<Vec<_>>());
    }

    // ---------------- attempt loop ----------------

    #[test]
    fn empty_input_yields_none() {
        assert!(generate_layout_seeded(&[], 1).is_none());
        assert!(generate_layout_seeded(&entries(&["  ", ""]), 1).is_none());
    }

    #[test]
    fn blank_answers_are_reported_as_dropped() {
        let layout = generate_layout_seeded(&entries(&["cat", " "]), 3).unwrap();
        assert_eq!(layout.placed_count(), 1);
        assert_eq!(layout.dropped.len(), 1);
        assert!(!layout.is_complete());
    }

    #[test]
    fn single_attempt_is_canonical_longest_first() {
        let cfg = LayoutConfig::new().with_attempts(1);
        let mut rng = StdRng::seed_from_u64(0);
        let layout = generate_layout_with(&entries(&["ab", "abcde"]), &mut rng, &cfg).unwrap();

        let anchor = &layout.placed[0];
        assert_eq!(anchor.answer, "ABCDE");
        assert_eq!((anchor.row, anchor.col), (1, 1));
        assert_eq!(anchor.direction, Direction::Across);
        assert_eq!(layout.attempt, 0);
    }

    #[test]
    fn custom_margin_is_applied_on_every_side() {
        let cfg = LayoutConfig::new().with_margin(3);
        let mut rng = StdRng::seed_from_u64(5);
        let layout = generate_layout_with(&entries(&["word"]), &mut rng, &cfg).unwrap();
        assert_eq!((layout.placed[0].row, layout.placed[0].col), (3, 3));
        assert_eq!((layout.width, layout.height), (4 + 6, 1 + 6));
    }

    #[test]
    fn oversized_margin_is_clamped() {
        let cfg = LayoutConfig::new().with_margin(usize::MAX);
        assert_eq!(cfg.margin, MAX_MARGIN);

        // A margin set directly on the struct is clamped the same way.
        let raw = LayoutConfig {
            margin: usize::MAX,
            ..LayoutConfig::new()
        };
        for cfg in [cfg, raw] {
            let mut rng = StdRng::seed_from_u64(5);
            let layout = generate_layout_with(&entries(&["word"]), &mut rng, &cfg).unwrap();
            assert_eq!((layout.placed[0].row, layout.placed[0].col), (MAX_MARGIN, MAX_MARGIN));
            assert_eq!(layout.width, 4 + 2 * MAX_MARGIN);
            assert_eq!(layout.height, 1 + 2 * MAX_MARGIN);
        }
    }

    #[test]
    fn zero_deadline_still_runs_canonical_attempt() {
        let cfg = LayoutConfig::new().with_deadline(Duration::ZERO);
        let mut rng = StdRng::seed_from_u64(9);
        let layout =
            generate_layout_with(&entries(&["cat", "car", "xyz"]), &mut rng, &cfg).unwrap();
        assert_eq!(layout.attempt, 0);
        assert!(layout.placed_count() >= 1);
    }

    #[test]
    fn improves_on_requires_strictly_more_words() {
        let a = generate_layout_seeded(&entries(&["cat", "art"]), 1).unwrap();
        let b = generate_layout_seeded(&entries(&["cat", "xyz"]), 1).unwrap();
        assert!(a.improves_on(None));
        assert!(a.improves_on(Some(&b)));
        assert!(!b.improves_on(Some(&a)));
        assert!(!a.improves_on(Some(&a)));
    }
}
