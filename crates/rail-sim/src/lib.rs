//! `rail-sim` — train state machine, spawner, and tick loop for the
//! railsim workspace.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Spawn — per line, toward the line's live-train target
//!             (pairs at both termini while ≥2 short, else one at the start).
//!   ② Step  — every train once, in ascending creation id:
//!               InPlatform            → OpeningDoor
//!               OpeningDoor           → LoadingPassengers (dwell armed + advanced)
//!               LoadingPassengers     → advance dwell; done → claim link or wait
//!               WaitingForLink        → poll link; free → claim it
//!               WaitingForAnotherTick → release platform (FIFO promote), enter link
//!               Transitioning         → advance transit; done → arrive, maybe turn
//!   ③ Snap  — final `snapshot_tail` ticks: render one position line.
//! ```
//!
//! # Contention
//!
//! Platforms promote FIFO from their holding area in the same tick they
//! are released.  Links have no queue — waiting trains poll, ties break by
//! creation order, and starvation is possible by design.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rail_core::SimConfig;
//! use rail_network::{Line, TopologyBuilder};
//! use rail_sim::{SimBuilder, SnapshotCollector};
//!
//! let mut sim = SimBuilder::new(config, topology)
//!     .line(green_line, 4)
//!     .build()?;
//! let mut out = SnapshotCollector::new();
//! sim.run(&mut out)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod train;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, SnapshotCollector};
pub use sim::{LineService, Sim};
pub use train::{Train, TrainState};
