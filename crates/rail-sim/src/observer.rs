//! Simulation observer trait for progress reporting and snapshot output.

use rail_core::{LineId, Tick, TrainId};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The core never prints: snapshot lines
/// and diagnostics leave the simulation exclusively through this trait.
///
/// # Example — stdout snapshot printer
///
/// ```rust,ignore
/// struct Stdout;
///
/// impl SimObserver for Stdout {
///     fn on_snapshot(&mut self, _tick: Tick, line: &str) {
///         println!("{line}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before spawning.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per newly spawned train, before the stepping phase.
    fn on_train_spawned(&mut self, _tick: Tick, _train: TrainId, _line: LineId) {}

    /// Called with the rendered position line for each tick inside the
    /// snapshot window (the final `config.snapshot_tail` ticks).
    fn on_snapshot(&mut self, _tick: Tick, _line: &str) {}

    /// Called at the end of each tick.  `live_trains` is the total number
    /// of trains in service across all lines.
    fn on_tick_end(&mut self, _tick: Tick, _live_trains: usize) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// A [`SimObserver`] that collects snapshot lines into a `Vec`.
///
/// Handy in tests (assert on exact output) and for callers that want the
/// whole snapshot block after the run instead of a line at a time.
#[derive(Default)]
pub struct SnapshotCollector {
    pub lines: Vec<String>,
}

impl SnapshotCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimObserver for SnapshotCollector {
    fn on_snapshot(&mut self, _tick: Tick, line: &str) {
        self.lines.push(line.to_owned());
    }
}
