// engine/src/puzzle/render.rs
#![forbid(unsafe_code)]

use crate::layout::Layout;
use crate::puzzle::numbering::NumberedPuzzle;

/// Dense `height x width` solution grid: `Some(letter)` for white cells, `None` for blocks.
///
/// Words are written in placement order; on a conflicting cell the later word wins
/// (valid layouts never conflict).
pub fn solution_cells(layout: &Layout) -> Vec<Vec<Option<char>>> {
    let mut cells = vec![vec![None; layout.width]; layout.height];
    for p in &layout.placed {
        for (r, c, ch) in p.cells() {
            if let Some(slot) = cells.get_mut(r).and_then(|row| row.get_mut(c)) {
                *slot = Some(ch);
            }
        }
    }
    cells
}

/// Bordered ASCII solution grid, `.` for blocks.
pub fn render_ascii(layout: &Layout) -> String {
    let border = format!("+{}+\n", "-".repeat(layout.width * 2));
    let mut s = String::new();
    s.push_str(&border);
    for row in solution_cells(layout) {
        s.push('|');
        for cell in row {
            s.push(cell.unwrap_or('.'));
            s.push(' ');
        }
        s.push_str("|\n");
    }
    s.push_str(&border);
    s.push_str(&format!(
        "size={}x{} placed={} dropped={} attempt={}\n",
        layout.width,
        layout.height,
        layout.placed.len(),
        layout.dropped.len(),
        layout.attempt
    ));
    s
}

/// Across/Down clue listing, numbers in ascending order.
pub fn render_clues(puzzle: &NumberedPuzzle) -> String {
    let mut s = String::new();
    for (title, words) in [("ACROSS", puzzle.across()), ("DOWN", puzzle.down())] {
        if words.is_empty() {
            continue;
        }
        s.push_str(title);
        s.push('\n');
        for w in words {
            s.push_str(&format!(
                "{:>3}. {} ({})\n",
                w.number,
                w.clue,
                w.answer.chars().count()
            ));
        }
    }
    s
}
