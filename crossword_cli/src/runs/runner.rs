// crossword_cli/src/runs/runner.rs
#![forbid(unsafe_code)]

use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crossword_engine::{Layout, LayoutConfig, WordEntry, best_of_runs};

use super::stats::{FinalReport, RunStats};

/// Fixed internal cadence for progress-bar live message updates.
const LIVE_EVERY: u64 = 10;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- search ----------------
    /// External engine calls; the best layout across them is kept.
    pub runs: u64,
    /// Seed for the single RNG stream shared by all runs.
    pub seed: u64,
    pub layout: LayoutConfig,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    pub verbosity: u8,
}

pub struct Runner {
    cfg: RunnerConfig,
}

impl Runner {
    pub fn new(cfg: RunnerConfig) -> Self {
        Self { cfg }
    }

    /// Returns the best layout (None only for an empty word list) and the run summary.
    pub fn run(&self, words: &[WordEntry]) -> (Option<Layout>, FinalReport) {
        let cfg = &self.cfg;
        let runs = cfg.runs.max(1);

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 && runs > 1 {
            let pb = ProgressBar::new(runs);
            // Template is a literal; fall back to the default style rather than abort.
            let style = ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos:>6}/{len:<6}  {percent:>3}%  {elapsed_precise}  {msg}",
            )
            .map(|s| s.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(style);
            Some(pb)
        } else {
            None
        };

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut stats = RunStats::new(words.len());
        let runs = usize::try_from(runs).unwrap_or(usize::MAX);

        let best = best_of_runs(words, runs, &mut rng, &cfg.layout, |layout| {
            stats.on_run(layout);
            if let Some(ref pb) = pb {
                pb.inc(1);
                if stats.runs_done % LIVE_EVERY == 0 {
                    pb.set_message(stats.live_msg());
                }
            }
        });

        if let Some(ref layout) = best {
            info!(
                runs_done = stats.runs_done,
                placed = layout.placed_count(),
                attempt = layout.attempt,
                "best layout selected"
            );
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        (best, stats.final_report(cfg.seed, cfg.layout.attempts))
    }
}
