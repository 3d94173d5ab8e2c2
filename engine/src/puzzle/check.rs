// engine/src/puzzle/check.rs
#![forbid(unsafe_code)]

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::layout::{Direction, Layout};

/// Structural defect found in a layout (e.g. one loaded back from storage).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LayoutViolation {
    #[error("layout places no words")]
    Empty,
    #[error("word {answer:?} leaves the {width}x{height} grid or its margin")]
    OutOfBounds {
        answer: String,
        width: usize,
        height: usize,
    },
    #[error("cell ({row}, {col}) holds both {first:?} and {second:?}")]
    LetterConflict {
        row: usize,
        col: usize,
        first: char,
        second: char,
    },
    #[error("cell ({row}, {col}) is shared by two {direction:?} words")]
    ParallelOverlap {
        row: usize,
        col: usize,
        direction: Direction,
    },
    #[error("word {answer:?} touches another word at its start or end")]
    Extended { answer: String },
    #[error("word {answer:?} runs alongside a word it does not cross at ({row}, {col})")]
    Touching {
        answer: String,
        row: usize,
        col: usize,
    },
    #[error("{width}x{height} grid does not frame the words with a margin of {margin}")]
    Misframed {
        width: usize,
        height: usize,
        margin: usize,
    },
}

#[derive(Clone, Copy)]
struct Cell {
    letter: char,
    across: Option<usize>,
    down: Option<usize>,
}

impl Cell {
    fn word(&self, dir: Direction) -> Option<usize> {
        match dir {
            Direction::Across => self.across,
            Direction::Down => self.down,
        }
    }
}

/**
 * Verifies the structural invariants every engine layout satisfies:
 *
 * - at least one word, and the grid frames the words' bounding box with exactly `margin`
 *   empty cells on every side;
 * - shared cells carry the same letter and are shared by exactly one ACROSS and one DOWN word;
 * - the cells just before and just after each word (along its axis) are empty;
 * - a letter's neighbours across its word's axis belong to the word crossing it, if any.
 */
pub fn check_layout(layout: &Layout, margin: usize) -> Result<(), LayoutViolation> {
    if layout.placed.is_empty() {
        return Err(LayoutViolation::Empty);
    }

    let mut cells: FxHashMap<(usize, usize), Cell> = FxHashMap::default();
    let (mut min_r, mut min_c, mut max_r, mut max_c) = (usize::MAX, usize::MAX, 0, 0);

    for (idx, p) in layout.placed.iter().enumerate() {
        let (end_r, end_c) = p.end();
        if p.is_empty()
            || p.row < margin
            || p.col < margin
            || end_r + margin >= layout.height
            || end_c + margin >= layout.width
        {
            return Err(LayoutViolation::OutOfBounds {
                answer: p.answer.clone(),
                width: layout.width,
                height: layout.height,
            });
        }
        min_r = min_r.min(p.row);
        min_c = min_c.min(p.col);
        max_r = max_r.max(end_r);
        max_c = max_c.max(end_c);

        for (row, col, ch) in p.cells() {
            let cell = cells.entry((row, col)).or_insert(Cell {
                letter: ch,
                across: None,
                down: None,
            });
            if cell.letter != ch {
                return Err(LayoutViolation::LetterConflict {
                    row,
                    col,
                    first: cell.letter,
                    second: ch,
                });
            }
            let taken = match p.direction {
                Direction::Across => &mut cell.across,
                Direction::Down => &mut cell.down,
            };
            if taken.is_some() {
                return Err(LayoutViolation::ParallelOverlap {
                    row,
                    col,
                    direction: p.direction,
                });
            }
            *taken = Some(idx);
        }
    }

    if min_r != margin
        || min_c != margin
        || layout.height != max_r + 1 + margin
        || layout.width != max_c + 1 + margin
    {
        return Err(LayoutViolation::Misframed {
            width: layout.width,
            height: layout.height,
            margin,
        });
    }

    for p in &layout.placed {
        let (end_r, end_c) = p.end();
        // With a zero margin a word may start on row/col 0; nothing lies before it then.
        let (before, after) = match p.direction {
            Direction::Across => (p.col.checked_sub(1).map(|c| (p.row, c)), (end_r, end_c + 1)),
            Direction::Down => (p.row.checked_sub(1).map(|r| (r, p.col)), (end_r + 1, end_c)),
        };
        if before.is_some_and(|b| cells.contains_key(&b)) || cells.contains_key(&after) {
            return Err(LayoutViolation::Extended {
                answer: p.answer.clone(),
            });
        }
    }

    for p in &layout.placed {
        let cross = p.direction.perpendicular();
        for (row, col, _) in p.cells() {
            let crossing = cells.get(&(row, col)).and_then(|c| c.word(cross));
            let sides = match p.direction {
                Direction::Across => [row.checked_sub(1).map(|r| (r, col)), Some((row + 1, col))],
                Direction::Down => [col.checked_sub(1).map(|c| (row, c)), Some((row, col + 1))],
            };
            for (r, c) in sides.into_iter().flatten() {
                let Some(side) = cells.get(&(r, c)) else {
                    continue;
                };
                if crossing.is_none() || side.word(cross) != crossing {
                    return Err(LayoutViolation::Touching {
                        answer: p.answer.clone(),
                        row: r,
                        col: c,
                    });
                }
            }
        }
    }

    Ok(())
}
