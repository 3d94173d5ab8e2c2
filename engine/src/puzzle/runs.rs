// engine/src/puzzle/runs.rs
#![forbid(unsafe_code)]

use rand::Rng;
use tracing::debug;

use crate::layout::{Layout, LayoutConfig, WordEntry, generate_layout_with};

/// Calls the engine `runs` times (at least once) and keeps the layout with the most placed
/// words; ties keep the earlier run. Stops early once a run places every word.
///
/// `on_run` sees every layout as it is produced, before the keep-best comparison.
pub fn best_of_runs<R, F>(
    words: &[WordEntry],
    runs: usize,
    rng: &mut R,
    config: &LayoutConfig,
    mut on_run: F,
) -> Option<Layout>
where
    R: Rng + ?Sized,
    F: FnMut(&Layout),
{
    let mut best: Option<Layout> = None;

    for run in 0..runs.max(1) {
        let Some(layout) = generate_layout_with(words, rng, config) else {
            // Empty input is empty for every run.
            return None;
        };
        on_run(&layout);

        let complete = layout.is_complete();
        if layout.improves_on(best.as_ref()) {
            debug!(run, placed = layout.placed_count(), "new best run");
            best = Some(layout);
        }
        if complete {
            debug!(run, "every word placed; stopping early");
            break;
        }
    }

    best
}
