//! Per-train state.
//!
//! # Design
//!
//! A train's status is a tagged variant ([`TrainState`]) where each state
//! carries exactly the data meaningful to it: `Transitioning` is the only
//! state whose location is a link rather than a platform, and the dwell
//! and transit countdowns live inside the states that consume them.
//! Accessing a field that is invalid for the current status is therefore a
//! compile-time impossibility, not a convention.
//!
//! The step semantics (who moves where, and when) live in
//! [`Sim`](crate::Sim) — stepping a train mutates shared topology
//! resources, and promotion out of a holding area mutates *other* trains,
//! so the transition logic needs the whole simulation context.

use rail_core::{Countdown, Direction, LineId, LinkId, PlatformId, StationId, TrainId};

/// The status of a train, including the resource handle and countdown the
/// status needs.
///
/// All static states reference the platform the train occupies (or, for
/// `QueueingForPlatform`, waits for); `Transitioning` references the link
/// being crossed.  `Initial` exists only between construction and spawn
/// placement.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TrainState {
    /// Constructed but not yet placed.  Stepping this is a no-op; a train
    /// leaves `Initial` only at spawn time.
    Initial { station: StationId },

    /// Occupying `platform`; the door opens on the next step.
    InPlatform { platform: PlatformId },

    /// Waiting in `platform`'s holding area.  Stepping is a no-op; the
    /// train is released only externally, when the occupant leaves and the
    /// holding area promotes it.
    QueueingForPlatform { platform: PlatformId },

    /// One-tick state: the door is open, passengers board next.
    OpeningDoor { platform: PlatformId },

    /// Dwelling at `platform` while the dwell countdown runs.
    LoadingPassengers { platform: PlatformId, dwell: Countdown },

    /// Dwell finished but the link ahead is busy.  Polls the link each
    /// tick; there is no queue for links, so waiting time is unbounded.
    WaitingForLink { platform: PlatformId },

    /// Link claimed, transit countdown armed; one more tick passes before
    /// travel time starts being consumed.  Still occupies `platform` until
    /// this state's step releases it.
    WaitingForAnotherTick {
        platform: PlatformId,
        link: LinkId,
        transit: Countdown,
    },

    /// Crossing `link`.  The only state located on a link.
    Transitioning { link: LinkId, transit: Countdown },
}

impl TrainState {
    /// The platform this state references, if any (including the one a
    /// queued train is waiting for).
    pub fn platform(&self) -> Option<PlatformId> {
        match *self {
            TrainState::InPlatform { platform }
            | TrainState::QueueingForPlatform { platform }
            | TrainState::OpeningDoor { platform }
            | TrainState::LoadingPassengers { platform, .. }
            | TrainState::WaitingForLink { platform }
            | TrainState::WaitingForAnotherTick { platform, .. } => Some(platform),
            TrainState::Initial { .. } | TrainState::Transitioning { .. } => None,
        }
    }

    /// The platform this state *occupies* exclusively.  Unlike
    /// [`platform`](Self::platform) this excludes `QueueingForPlatform`,
    /// where the train merely waits and holds nothing.
    pub fn held_platform(&self) -> Option<PlatformId> {
        match *self {
            TrainState::QueueingForPlatform { .. } => None,
            _ => self.platform(),
        }
    }

    /// The link this state holds exclusively.  A link is held from the
    /// moment it is claimed (`WaitingForAnotherTick`) until arrival.
    pub fn held_link(&self) -> Option<LinkId> {
        match *self {
            TrainState::WaitingForAnotherTick { link, .. }
            | TrainState::Transitioning { link, .. } => Some(link),
            _ => None,
        }
    }
}

/// One train: identity, line membership, travel direction, and status.
///
/// Trains are created by the spawner and never destroyed within a run —
/// they keep cycling their line, reversing direction at the termini.
pub struct Train {
    /// Creation-order identity; doubles as the index into the simulation's
    /// train arena and as the deterministic stepping order.
    pub id: TrainId,
    pub line: LineId,
    pub direction: Direction,
    pub state: TrainState,
}

impl Train {
    /// A freshly constructed, not-yet-placed train.
    pub fn new(id: TrainId, line: LineId, station: StationId, direction: Direction) -> Self {
        Train {
            id,
            line,
            direction,
            state: TrainState::Initial { station },
        }
    }
}
