//! The `Sim` struct and its tick loop.
//!
//! # Tick anatomy
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Spawn — per line in declaration order, bring the live-train count
//!             toward the line's target (pairs at both termini, then a
//!             single at the start).
//!   ② Step  — every live train, in ascending creation id. This fixed
//!             order is the tie-break rule for contested resources within
//!             a tick.
//!   ③ Snap  — during the final `snapshot_tail` ticks, render one
//!             position line and hand it to the observer.
//! ```
//!
//! # Determinism
//!
//! The loop is single-threaded and the stepping order is fixed, so no two
//! trains ever observe a resource's occupancy concurrently — claims and
//! releases interleave in exactly one order for a given input.  Identical
//! input therefore produces byte-identical snapshot output.

use rail_core::{Countdown, Direction, LineId, LinkId, PlatformId, SimConfig, Tick, TrainId};
use rail_network::{Line, PlatformAccess, Topology};

use crate::observer::SimObserver;
use crate::train::{Train, TrainState};
use crate::SimResult;

// ── LineService ───────────────────────────────────────────────────────────────

/// One line under service: its route, its live-train target, and the
/// roster of trains spawned onto it (in spawn order — snapshot lines group
/// trains by roster, line after line).
pub struct LineService {
    pub route: Line,
    /// Desired number of live trains on this line.
    pub target: u32,
    /// Creation IDs of all trains spawned onto this line, oldest first.
    pub roster: Vec<TrainId>,
}

/// Where on its line a new train enters service.
#[derive(Copy, Clone)]
enum SpawnSite {
    /// The line's starting station, heading forward.
    Start,
    /// The line's terminal station, heading backward.
    Terminal,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation context: topology, lines, trains, and the tick counter.
///
/// Owns all shared state for the run's lifetime; trains reference
/// platforms and links by ID only.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run length and snapshot window.
    pub config: SimConfig,

    /// Stations, links, platforms, and their contention state.
    pub topology: Topology,

    /// Lines in declaration order (`LineId` is the index).
    pub lines: Vec<LineService>,

    /// Train arena, indexed by `TrainId` (creation order).
    pub trains: Vec<Train>,

    /// The current tick.
    pub now: Tick,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`, calling observer
    /// hooks at every tick boundary.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.now < self.config.end_tick() {
            self.process_tick(observer)?;
        }
        observer.on_sim_end(self.now);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `end_tick`).  Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.process_tick(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.now;
        observer.on_tick_start(now);

        // ── Phase 1: spawn toward each line's target ──────────────────────
        self.spawn_phase(observer)?;

        // ── Phase 2: step every train in creation order ───────────────────
        for idx in 0..self.trains.len() {
            self.step_train(idx)?;
        }

        // ── Phase 3: snapshot during the final window ─────────────────────
        if self.config.snapshot_tail > 0 && now >= self.config.first_snapshot_tick() {
            let line = self.render_snapshot();
            observer.on_snapshot(now, &line);
        }

        observer.on_tick_end(now, self.trains.len());
        self.now.advance();
        Ok(())
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// For every line independently: spawn a pair (one per terminus) while
    /// at least two more trains are needed, or a single train at the start
    /// if exactly one more is needed.
    fn spawn_phase<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        for li in 0..self.lines.len() {
            let live = self.lines[li].roster.len() as u32;
            let target = self.lines[li].target;

            if live + 2 <= target {
                self.spawn(li, SpawnSite::Start, observer)?;
                self.spawn(li, SpawnSite::Terminal, observer)?;
            } else if live + 1 <= target {
                self.spawn(li, SpawnSite::Start, observer)?;
            }
        }
        Ok(())
    }

    /// Create one train and place it directly into the platform toward its
    /// first destination — `InPlatform` if that platform is free, else
    /// `QueueingForPlatform`.
    fn spawn<O: SimObserver>(
        &mut self,
        li: usize,
        site: SpawnSite,
        observer: &mut O,
    ) -> SimResult<TrainId> {
        let route = &self.lines[li].route;
        let (station, direction) = match site {
            SpawnSite::Start => (route.start(), Direction::Forward),
            SpawnSite::Terminal => (route.terminal(), Direction::Backward),
        };
        let next = route.next_in_direction(station, direction);

        let id = TrainId(self.trains.len() as u32);
        let line = LineId(li as u16);
        let mut train = Train::new(id, line, station, direction);

        let platform = self.topology.platform_to(station, next)?;
        train.state = match self.topology.request_platform(platform, id) {
            PlatformAccess::Entered => TrainState::InPlatform { platform },
            PlatformAccess::Queued => TrainState::QueueingForPlatform { platform },
        };

        self.trains.push(train);
        self.lines[li].roster.push(id);
        observer.on_train_spawned(self.now, id, line);
        Ok(id)
    }

    // ── Per-train stepping ────────────────────────────────────────────────

    /// Advance one train's state machine by one tick.
    fn step_train(&mut self, idx: usize) -> SimResult<()> {
        match self.trains[idx].state {
            // Leaves this state only at spawn placement.
            TrainState::Initial { .. } => {}

            // Released only externally, by platform promotion.
            TrainState::QueueingForPlatform { .. } => {}

            TrainState::InPlatform { platform } => {
                self.trains[idx].state = TrainState::OpeningDoor { platform };
            }

            TrainState::OpeningDoor { platform } => {
                // Door-open is instantaneous: arm the dwell countdown from
                // the station's popularity and start loading this tick.
                let station = self.topology.platform(platform).station;
                let dwell = Countdown::armed(self.topology.station(station).popularity);
                self.load_passengers(idx, platform, dwell)?;
            }

            TrainState::LoadingPassengers { platform, dwell } => {
                self.load_passengers(idx, platform, dwell)?;
            }

            TrainState::WaitingForLink { platform } => {
                // Poll the link ahead; first train to see it free on its
                // tick wins.  No queue, no fairness.
                let (link, distance) = self.link_ahead(idx, platform)?;
                if self.topology.try_claim_link(link) {
                    self.trains[idx].state = TrainState::WaitingForAnotherTick {
                        platform,
                        link,
                        transit: Countdown::armed(distance),
                    };
                }
            }

            TrainState::WaitingForAnotherTick { platform, link, transit } => {
                // Leave the platform (promoting any queued train in the
                // same tick) and enter the already-claimed link.
                self.vacate_platform(platform);
                self.trains[idx].state = TrainState::Transitioning { link, transit };
            }

            TrainState::Transitioning { link, mut transit } => {
                if !transit.is_done() {
                    transit.advance();
                }
                if transit.is_done() {
                    self.arrive(idx, link)?;
                } else {
                    self.trains[idx].state = TrainState::Transitioning { link, transit };
                }
            }
        }
        Ok(())
    }

    /// Advance the dwell countdown; once it is done, decide between the
    /// link ahead (claim it now, consume travel time starting next tick)
    /// and waiting for it.
    fn load_passengers(
        &mut self,
        idx: usize,
        platform: PlatformId,
        mut dwell: Countdown,
    ) -> SimResult<()> {
        if !dwell.is_done() {
            dwell.advance();
        }
        if !dwell.is_done() {
            self.trains[idx].state = TrainState::LoadingPassengers { platform, dwell };
            return Ok(());
        }

        let (link, distance) = self.link_ahead(idx, platform)?;
        self.trains[idx].state = if self.topology.try_claim_link(link) {
            TrainState::WaitingForAnotherTick {
                platform,
                link,
                transit: Countdown::armed(distance),
            }
        } else {
            TrainState::WaitingForLink { platform }
        };
        Ok(())
    }

    /// The link leaving `platform`'s station toward the next station in
    /// the train's current direction, plus its distance.
    fn link_ahead(&self, idx: usize, platform: PlatformId) -> SimResult<(LinkId, u32)> {
        let train = &self.trains[idx];
        let station = self.topology.platform(platform).station;
        let next = self.lines[train.line.index()]
            .route
            .next_in_direction(station, train.direction);
        let link = self.topology.link_to(station, next)?;
        Ok((link, self.topology.link(link).distance))
    }

    /// Release `platform`; if a queued train is promoted, move it into
    /// `InPlatform` immediately (it opens its door on its own next step —
    /// which may still happen this tick if it steps after the releaser).
    fn vacate_platform(&mut self, platform: PlatformId) {
        if let Some(next) = self.topology.release_platform(platform) {
            self.trains[next.index()].state = TrainState::InPlatform { platform };
        }
    }

    /// Complete a link crossing: flip direction when continuing would run
    /// off the line, release the link, and enter (or queue for) the
    /// platform toward the next station.
    fn arrive(&mut self, idx: usize, link: LinkId) -> SimResult<()> {
        let dst = self.topology.link(link).to;
        let train = &self.trains[idx];
        let route = &self.lines[train.line.index()].route;

        // Turn around exactly at a terminus, never mid-link.
        let off_the_end = match train.direction {
            Direction::Forward => route.is_terminal(dst),
            Direction::Backward => route.is_start(dst),
        };
        let direction = if off_the_end {
            train.direction.flipped()
        } else {
            train.direction
        };

        let next = route.next_in_direction(dst, direction);
        let platform = self.topology.platform_to(dst, next)?;
        let id = train.id;

        self.topology.release_link(link);
        let state = match self.topology.request_platform(platform, id) {
            // The door opens the instant the train arrives, not one tick
            // later: arrival collapses `InPlatform → OpeningDoor`.
            PlatformAccess::Entered => TrainState::OpeningDoor { platform },
            PlatformAccess::Queued => TrainState::QueueingForPlatform { platform },
        };

        let train = &mut self.trains[idx];
        train.direction = direction;
        train.state = state;
        Ok(())
    }

    // ── Snapshot rendering ────────────────────────────────────────────────

    /// Render the per-tick position line: `"<tick>: <t1> <t2> …"`, trains
    /// grouped line by line in declaration order, each group in spawn
    /// order.  With no trains in service the line is just `"<tick>:"`.
    pub fn render_snapshot(&self) -> String {
        let mut out = format!("{}:", self.now.0);
        for service in &self.lines {
            for &id in &service.roster {
                out.push(' ');
                out.push_str(&self.train_label(id));
            }
        }
        out
    }

    /// One train's textual position: `<prefix><id>-<station>`, or
    /// `<prefix><id>-<src>-><dst>` while crossing a link.
    pub fn train_label(&self, id: TrainId) -> String {
        let train = &self.trains[id.index()];
        let prefix = self.lines[train.line.index()].route.prefix;

        match train.state {
            TrainState::Transitioning { link, .. } => {
                let l = self.topology.link(link);
                format!(
                    "{prefix}{}-{}->{}",
                    train.id.0,
                    self.topology.station(l.from).name,
                    self.topology.station(l.to).name
                )
            }
            TrainState::Initial { station } => {
                format!("{prefix}{}-{}", train.id.0, self.topology.station(station).name)
            }
            // Every remaining state references a platform; render the
            // station that platform belongs to.
            TrainState::InPlatform { platform }
            | TrainState::QueueingForPlatform { platform }
            | TrainState::OpeningDoor { platform }
            | TrainState::LoadingPassengers { platform, .. }
            | TrainState::WaitingForLink { platform }
            | TrainState::WaitingForAnotherTick { platform, .. } => {
                let station = self.topology.platform(platform).station;
                format!("{prefix}{}-{}", train.id.0, self.topology.station(station).name)
            }
        }
    }
}
