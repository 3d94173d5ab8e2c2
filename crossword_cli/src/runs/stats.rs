// crossword_cli/src/runs/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use crossword_engine::Layout;

#[derive(Clone, Debug)]
pub struct RunStats {
    pub runs_done: u64,
    pub words_total: usize,

    // placement aggregates
    pub sum_placed: u64,
    pub best_placed: usize,
    pub complete_runs: u64,

    // grid aggregates
    pub sum_area: u64,
    pub best_area: usize,

    t0: Instant,
}

impl RunStats {
    pub fn new(words_total: usize) -> Self {
        Self {
            runs_done: 0,
            words_total,
            sum_placed: 0,
            best_placed: 0,
            complete_runs: 0,
            sum_area: 0,
            best_area: 0,
            t0: Instant::now(),
        }
    }

    /// Call once per engine call.
    pub fn on_run(&mut self, layout: &Layout) {
        self.runs_done += 1;
        self.sum_placed += layout.placed_count() as u64;
        self.sum_area += layout.area() as u64;
        if layout.is_complete() {
            self.complete_runs += 1;
        }
        if layout.placed_count() > self.best_placed {
            self.best_placed = layout.placed_count();
            self.best_area = layout.area();
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn runs_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.runs_done as f64 / dt
        } else {
            0.0
        }
    }

    pub fn avg_placed(&self) -> f64 {
        if self.runs_done > 0 {
            self.sum_placed as f64 / self.runs_done as f64
        } else {
            0.0
        }
    }

    pub fn avg_area(&self) -> f64 {
        if self.runs_done > 0 {
            self.sum_area as f64 / self.runs_done as f64
        } else {
            0.0
        }
    }

    pub fn live_msg(&self) -> String {
        format!(
            "best={}/{} avg_placed={:.2} complete={} avg_area={:.1} runs/s={:.1}",
            self.best_placed,
            self.words_total,
            self.avg_placed(),
            self.complete_runs,
            self.avg_area(),
            self.runs_per_sec(),
        )
    }

    pub fn final_report(&self, seed: u64, attempts: usize) -> FinalReport {
        FinalReport {
            seed,
            attempts,
            runs_done: self.runs_done,
            elapsed_s: self.elapsed_secs(),
            runs_per_s: self.runs_per_sec(),
            words_total: self.words_total,
            best_placed: self.best_placed,
            best_area: self.best_area,
            avg_placed: self.avg_placed(),
            avg_area: self.avg_area(),
            complete_runs: self.complete_runs,
        }
    }
}

#[allow(dead_code)]
#[derive(Clone, Debug)]
pub struct FinalReport {
    pub seed: u64,
    pub attempts: usize,

    pub runs_done: u64,
    pub elapsed_s: f64,
    pub runs_per_s: f64,

    pub words_total: usize,
    pub best_placed: usize,
    pub best_area: usize,
    pub avg_placed: f64,
    pub avg_area: f64,
    pub complete_runs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossword_engine::{WordEntry, generate_layout_seeded};

    #[test]
    fn aggregates_track_best_and_averages() {
        let full = generate_layout_seeded(&[WordEntry::new("cat", "pet")], 1).unwrap();
        let partial = generate_layout_seeded(
            &[WordEntry::new("abc", "a"), WordEntry::new("xyz", "b")],
            1,
        )
        .unwrap();

        let mut stats = RunStats::new(2);
        stats.on_run(&partial);
        stats.on_run(&full);

        assert_eq!(stats.runs_done, 2);
        assert_eq!(stats.best_placed, 1);
        assert_eq!(stats.complete_runs, 1);
        assert!((stats.avg_placed() - 1.0).abs() < 1e-9);
        assert!((stats.avg_area() - 15.0).abs() < 1e-9);

        let report = stats.final_report(7, 100);
        assert_eq!(report.seed, 7);
        assert_eq!(report.best_area, 15);
    }
}
