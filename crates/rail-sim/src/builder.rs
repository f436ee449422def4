//! Fluent builder for constructing a [`Sim`].

use rail_core::{SimConfig, Tick};
use rail_network::{Line, Topology};

use crate::sim::LineService;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks and snapshot window.
/// - [`Topology`] — the station/link/platform arena.
/// - At least one [`line`](Self::line) with its live-train target.
///
/// # Validation
///
/// `build()` checks that every line's consecutive station pairs are linked
/// in **both** directions (trains run the route both ways), so a topology
/// inconsistent with a line definition fails at construction instead of
/// mid-run.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, topology)
///     .line(green, 4)
///     .line(yellow, 2)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    topology: Topology,
    lines: Vec<(Line, u32)>,
}

impl SimBuilder {
    /// Create a builder for the given config and topology.
    pub fn new(config: SimConfig, topology: Topology) -> Self {
        Self {
            config,
            topology,
            lines: Vec::new(),
        }
    }

    /// Add a line with its live-train target, in declaration order.
    pub fn line(mut self, route: Line, target: u32) -> Self {
        self.lines.push((route, target));
        self
    }

    /// Validate the line/topology pairing and return a ready-to-run
    /// [`Sim`] positioned at tick 0.
    pub fn build(self) -> SimResult<Sim> {
        if self.lines.is_empty() {
            return Err(SimError::Config("a simulation needs at least one line".into()));
        }

        // Every hop of every route must exist in the topology, both ways.
        for (route, _) in &self.lines {
            let stations = route.stations();
            for pair in stations.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                self.topology.link_to(a, b)?;
                self.topology.link_to(b, a)?;
                self.topology.platform_to(a, b)?;
                self.topology.platform_to(b, a)?;
            }
        }

        let lines = self
            .lines
            .into_iter()
            .map(|(route, target)| LineService {
                route,
                target,
                roster: Vec::new(),
            })
            .collect();

        Ok(Sim {
            config: self.config,
            topology: self.topology,
            lines,
            trains: Vec::new(),
            now: Tick::ZERO,
        })
    }
}
