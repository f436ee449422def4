//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter; dwell and transit
//! durations are measured in whole ticks.  There is deliberately no mapping
//! to wall-clock time — the simulation is a pure discrete-time state
//! machine, and any wall-clock reporting belongs to the binary driving it.
//!
//! [`Countdown`] is the reusable decrementing counter behind both dwell
//! time (armed from a station's popularity) and transit time (armed from a
//! link's distance).  Its contract is strict: once armed with `n`, exactly
//! `n` calls to [`advance`](Countdown::advance) reach
//! [`is_done`](Countdown::is_done), and advancing past zero is a fatal
//! internal-consistency error, not something to recover from.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`; at one tick per simulated unit of time a u64 outlasts
/// any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Advance to the next tick in place.
    #[inline]
    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Countdown ─────────────────────────────────────────────────────────────────

/// A reusable "ticks remaining" counter.
///
/// Invariant: once armed, every [`advance`](Self::advance) brings the value
/// toward zero; it reads done exactly when the value reaches zero and can
/// never go below.  A countdown armed with `0` is immediately done with no
/// ticks consumed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// A countdown that is already done.
    pub const DONE: Countdown = Countdown { remaining: 0 };

    /// Construct a countdown armed with `n` ticks remaining.
    #[inline]
    pub fn armed(n: u32) -> Self {
        Countdown { remaining: n }
    }

    /// Re-arm with `n` ticks remaining, discarding any previous value.
    #[inline]
    pub fn arm(&mut self, n: u32) {
        self.remaining = n;
    }

    /// Consume one tick.
    ///
    /// # Panics
    ///
    /// Panics if the countdown is already done.  The calling discipline of
    /// the train state machine guarantees this never happens; hitting it
    /// means a state-machine bug, which must not be papered over.
    #[inline]
    pub fn advance(&mut self) {
        assert!(
            self.remaining > 0,
            "countdown advanced past zero (state-machine bug)"
        );
        self.remaining -= 1;
    }

    /// Whether the countdown has reached zero.
    #[inline]
    pub fn is_done(self) -> bool {
        self.remaining == 0
    }

    /// Ticks left until done.
    #[inline]
    pub fn remaining(self) -> u32 {
        self.remaining
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} left", self.remaining)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically produced by the scenario loader and passed to the simulation
/// builder; tests construct it by hand.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// A snapshot line is emitted for each of the final `snapshot_tail`
    /// ticks of the run.  `0` disables snapshots entirely.
    pub snapshot_tail: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// First tick for which a snapshot is emitted.
    #[inline]
    pub fn first_snapshot_tick(&self) -> Tick {
        Tick(self.total_ticks.saturating_sub(self.snapshot_tail))
    }
}
