//! Progress reporting for the download and extraction stages.
//!
//! The library never prints. Each stage hands `Progress` snapshots to a
//! caller-supplied `ProgressReporter`, thinned out by a modulo `Throttle`.

/// Which step of the pipeline a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Download,
    Extract,
}

/// Snapshot of one stage's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes processed so far.
    pub done: u64,
    /// Declared total in bytes, if known.
    pub total: Option<u64>,
}

impl Progress {
    pub fn new(done: u64, total: Option<u64>) -> Self {
        Self { done, total }
    }

    /// Fraction complete in [0.0, 1.0] (None without a total).
    pub fn fraction(&self) -> Option<f64> {
        let total = self.total?;
        if total == 0 {
            return Some(1.0);
        }
        Some((self.done as f64 / total as f64).min(1.0))
    }

    /// Percentage complete, clamped to 100.
    pub fn percent(&self) -> Option<f64> {
        self.fraction().map(|f| f * 100.0)
    }
}

/// Fires on every `every`-th tick.
#[derive(Debug, Clone)]
pub struct Throttle {
    every: u32,
    count: u32,
}

impl Throttle {
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            count: 0,
        }
    }

    /// Count one event; true when this event should be reported.
    pub fn tick(&mut self) -> bool {
        self.count = self.count.wrapping_add(1);
        self.count % self.every == 0
    }
}

/// Receiver of pipeline progress.
pub trait ProgressReporter {
    fn stage_started(&mut self, _stage: Stage) {}
    fn download(&mut self, progress: Progress);
    fn extract(&mut self, progress: Progress);
    fn stage_finished(&mut self, _stage: Stage) {}
}

impl<F> ProgressReporter for F
where
    F: FnMut(Stage, Progress),
{
    fn download(&mut self, progress: Progress) {
        self(Stage::Download, progress)
    }

    fn extract(&mut self, progress: Progress) {
        self(Stage::Extract, progress)
    }
}

/// Reporter that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ProgressReporter for Silent {
    fn download(&mut self, _progress: Progress) {}
    fn extract(&mut self, _progress: Progress) {}
}
