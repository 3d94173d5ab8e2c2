// crossword_cli/src/main.rs
#![forbid(unsafe_code)]

mod runs;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::runs::{Runner, RunnerConfig};
use crossword_engine::{
    DEFAULT_ATTEMPTS, DEFAULT_MARGIN, LayoutConfig, WordList, check_layout, number_layout,
    render_ascii, render_clues,
};

#[derive(Parser, Debug)]
#[command(name = "crossword_cli", about = "Arrange (answer, clue) pairs into a crossword grid")]
struct Args {
    // ---------------- input ----------------
    /// JSON array of {"answer": ..., "clue": ...} objects; `-` reads stdin.
    #[arg(long, value_name = "PATH")]
    words: PathBuf,

    // ---------------- search ----------------
    /// RNG seed. If omitted, a random seed is drawn and logged so the run can be replayed.
    #[arg(long)]
    seed: Option<u64>,

    /// Independent placement attempts inside each engine call.
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
    attempts: usize,

    /**
     * External engine calls; the layout placing the most words wins (ties keep the earlier).
     * Stops early once a run places every word.
     */
    #[arg(long, default_value_t = 1)]
    runs: u64,

    /// Wall-clock budget per engine call in ms. The first attempt always completes.
    #[arg(long, value_name = "ms")]
    deadline_ms: Option<u64>,

    /// Empty border around the grid, in cells.
    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    margin: usize,

    // ---------------- output ----------------
    /// Write the numbered puzzle as JSON to this path.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Skip printing the ASCII grid and clue list.
    #[arg(long)]
    no_render: bool,

    /// Verbosity: 0=final summary only, 1=progress bar for --runs > 1.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Log detail on stderr: -v debug, -vv trace. RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // stderr keeps stdout clean for the grid and the DONE line.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read word list from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input = read_input(&args.words)?;
    let list = WordList::from_json(&input).context("invalid word list")?;
    if list.skipped() > 0 {
        warn!(skipped = list.skipped(), "ignoring rows with a blank answer or clue");
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, words = list.len(), attempts = args.attempts, runs = args.runs, "generating layout");

    let mut layout_cfg = LayoutConfig::new()
        .with_attempts(args.attempts)
        .with_margin(args.margin);
    if let Some(ms) = args.deadline_ms {
        layout_cfg = layout_cfg.with_deadline(Duration::from_millis(ms));
    }

    let runner = Runner::new(RunnerConfig {
        runs: args.runs,
        seed,
        layout: layout_cfg,
        verbosity: args.verbosity,
    });
    let (best, report) = runner.run(list.entries());

    let layout = best.context("no layout could be generated")?;
    check_layout(&layout, layout_cfg.margin)
        .context("generated layout failed its consistency check")?;

    if !layout.dropped.is_empty() {
        let dropped: Vec<&str> = layout.dropped.iter().map(|w| w.answer.as_str()).collect();
        warn!(?dropped, "some words found no valid crossing and were left out");
    }

    let puzzle = number_layout(&layout);

    if !args.no_render {
        print!("{}", render_ascii(&layout));
        print!("{}", render_clues(&puzzle));
    }

    if let Some(path) = &args.out {
        let json = serde_json::to_string_pretty(&puzzle).context("failed to encode puzzle")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "puzzle written");
    }

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: seed={} attempts={} runs_done={} elapsed={:.3}s runs/s={:.1} placed={}/{} size={}x{} difficulty={} avg_placed={:.2} avg_area={:.1} complete_runs={}",
        report.seed,
        report.attempts,
        report.runs_done,
        report.elapsed_s,
        report.runs_per_s,
        layout.placed_count(),
        report.words_total,
        layout.width,
        layout.height,
        puzzle.difficulty.as_str(),
        report.avg_placed,
        report.avg_area,
        report.complete_runs,
    );

    Ok(())
}
