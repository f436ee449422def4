//! Topology arena: stations, links, platforms, and the contention API.
//!
//! # Construction
//!
//! Use [`TopologyBuilder`]: add every station first, then one
//! [`link`](TopologyBuilder::link) call per directed edge with nonzero
//! distance.  Each `link` call also creates the platform at the source
//! station that faces the destination — one platform per
//! (station, outgoing-direction) pair.
//!
//! # Contention model
//!
//! - **Platforms** have a FIFO holding area.  A train denied entry is
//!   pushed to the back; when the occupant releases, the front entry is
//!   popped and the occupancy flag is transferred to it within the same
//!   call, so a queued train can never be silently stuck as long as
//!   releases keep happening.
//! - **Links** have no queue.  Contention is resolved by polling: the
//!   first train to observe "free" on its tick wins, and because trains
//!   are stepped in a fixed creation order each tick, ties break by that
//!   order rather than by wait time.  A perpetually busy link can
//!   therefore starve a waiting train — preserved, documented behavior.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use rail_core::{LinkId, PlatformId, RailError, RailResult, StationId, TrainId};

// ── Entities ──────────────────────────────────────────────────────────────────

/// A station: a name, a popularity value, and the outgoing links/platforms
/// keyed by destination station.
///
/// `popularity` is the dwell-duration factor: a train loading passengers
/// here occupies its platform for exactly `popularity` ticks.
pub struct Station {
    pub name: String,
    pub popularity: u32,
    /// Destination station → (link, platform) for that direction.
    out: FxHashMap<StationId, OutEdge>,
}

#[derive(Copy, Clone)]
struct OutEdge {
    link: LinkId,
    platform: PlatformId,
}

impl Station {
    /// Number of outgoing directions (links and platforms) at this station.
    pub fn out_degree(&self) -> usize {
        self.out.len()
    }
}

/// A directed single-track segment between two stations.
pub struct Link {
    pub from: StationId,
    pub to: StationId,
    /// Ticks required to traverse.  Always positive: zero-distance entries
    /// in an adjacency description mean "no edge" and never become links.
    pub distance: u32,
    occupied: bool,
}

impl Link {
    /// Whether a train currently holds this link.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }
}

/// A platform at `station`, facing trains toward `heads_to`.
pub struct Platform {
    pub station: StationId,
    pub heads_to: StationId,
    occupied: bool,
    /// FIFO holding area of trains waiting for this platform.
    holding: VecDeque<TrainId>,
}

impl Platform {
    /// Whether a train currently occupies this platform.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Number of trains waiting in the holding area.
    #[inline]
    pub fn queue_len(&self) -> usize {
        self.holding.len()
    }
}

/// Result of asking for platform entry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PlatformAccess {
    /// The platform was free; the requesting train now occupies it.
    Entered,
    /// The platform was busy; the train was appended to the holding area.
    Queued,
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// The full rail topology: arenas of stations, links, and platforms.
///
/// Static structure (names, distances, adjacency) is immutable after
/// [`TopologyBuilder::build`]; only the contention state (occupancy flags
/// and holding areas) changes during a run, and only through the
/// capability methods below.
pub struct Topology {
    stations: Vec<Station>,
    links: Vec<Link>,
    platforms: Vec<Platform>,
}

impl Topology {
    // ── Arena access ──────────────────────────────────────────────────────

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    #[inline]
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    #[inline]
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.index()]
    }

    #[inline]
    pub fn platform(&self, id: PlatformId) -> &Platform {
        &self.platforms[id.index()]
    }

    // ── Adjacency lookup ──────────────────────────────────────────────────

    /// The link leaving `src` toward `dst`.
    ///
    /// A missing edge is a configuration error (the topology is
    /// inconsistent with a line definition) and aborts the run.
    pub fn link_to(&self, src: StationId, dst: StationId) -> RailResult<LinkId> {
        self.stations[src.index()]
            .out
            .get(&dst)
            .map(|e| e.link)
            .ok_or(RailError::MissingLink { from: src, to: dst })
    }

    /// The platform at `src` facing `dst`.
    pub fn platform_to(&self, src: StationId, dst: StationId) -> RailResult<PlatformId> {
        self.stations[src.index()]
            .out
            .get(&dst)
            .map(|e| e.platform)
            .ok_or(RailError::MissingPlatform { from: src, to: dst })
    }

    // ── Platform contention ───────────────────────────────────────────────

    /// Ask for entry to `platform` on behalf of `train`.
    ///
    /// Free platform: the train becomes the occupant and `Entered` is
    /// returned.  Busy platform: the train joins the back of the FIFO
    /// holding area and `Queued` is returned.
    pub fn request_platform(&mut self, platform: PlatformId, train: TrainId) -> PlatformAccess {
        let plt = &mut self.platforms[platform.index()];
        if plt.occupied {
            plt.holding.push_back(train);
            PlatformAccess::Queued
        } else {
            plt.occupied = true;
            PlatformAccess::Entered
        }
    }

    /// Release `platform` on behalf of its current occupant.
    ///
    /// If the holding area is non-empty, its front entry is promoted: the
    /// occupancy flag transfers to it within this call and its ID is
    /// returned so the caller can move that train into the platform state.
    /// Returns `None` if nothing was waiting and the platform is now free.
    pub fn release_platform(&mut self, platform: PlatformId) -> Option<TrainId> {
        let plt = &mut self.platforms[platform.index()];
        debug_assert!(plt.occupied, "released a platform that was not occupied");
        plt.occupied = false;

        let next = plt.holding.pop_front()?;
        plt.occupied = true;
        Some(next)
    }

    // ── Link contention ───────────────────────────────────────────────────

    /// Claim `link` if it is free.  Returns whether the claim succeeded.
    pub fn try_claim_link(&mut self, link: LinkId) -> bool {
        let lnk = &mut self.links[link.index()];
        if lnk.occupied {
            false
        } else {
            lnk.occupied = true;
            true
        }
    }

    /// Release `link` on behalf of its current holder.
    pub fn release_link(&mut self, link: LinkId) {
        let lnk = &mut self.links[link.index()];
        debug_assert!(lnk.occupied, "released a link that was not occupied");
        lnk.occupied = false;
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`Topology`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rail_network::TopologyBuilder;
///
/// let mut b = TopologyBuilder::new();
/// let a = b.add_station("alpha", 2);
/// let c = b.add_station("gamma", 3);
/// b.link(a, c, 5);
/// b.link(c, a, 5);
/// let topo = b.build();
/// assert_eq!(topo.station_count(), 2);
/// assert_eq!(topo.link_count(), 2);
/// assert_eq!(topo.platform_count(), 2); // one per directed edge
/// ```
pub struct TopologyBuilder {
    stations: Vec<Station>,
    links: Vec<Link>,
    platforms: Vec<Platform>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self {
            stations: Vec::new(),
            links: Vec::new(),
            platforms: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of stations and directed edges.
    pub fn with_capacity(stations: usize, links: usize) -> Self {
        Self {
            stations: Vec::with_capacity(stations),
            links: Vec::with_capacity(links),
            platforms: Vec::with_capacity(links),
        }
    }

    /// Add a station and return its `StationId` (sequential from 0).
    pub fn add_station(&mut self, name: impl Into<String>, popularity: u32) -> StationId {
        let id = StationId(self.stations.len() as u32);
        self.stations.push(Station {
            name: name.into(),
            popularity,
            out: FxHashMap::default(),
        });
        id
    }

    /// Add a **directed** link from `from` to `to` and the platform at
    /// `from` that faces it.  Returns the new `LinkId`.
    ///
    /// # Panics
    ///
    /// Panics if `distance` is zero (zero means "no edge" in the adjacency
    /// description and must be filtered by the caller) or if the ordered
    /// pair already has a link.
    pub fn link(&mut self, from: StationId, to: StationId, distance: u32) -> LinkId {
        assert!(distance > 0, "links require a positive distance");

        let link = LinkId(self.links.len() as u32);
        let platform = PlatformId(self.platforms.len() as u32);

        self.links.push(Link {
            from,
            to,
            distance,
            occupied: false,
        });
        self.platforms.push(Platform {
            station: from,
            heads_to: to,
            occupied: false,
            holding: VecDeque::new(),
        });

        let prev = self.stations[from.index()]
            .out
            .insert(to, OutEdge { link, platform });
        assert!(prev.is_none(), "duplicate link for an ordered station pair");

        link
    }

    /// Consume the builder and produce a [`Topology`].
    pub fn build(self) -> Topology {
        Topology {
            stations: self.stations,
            links: self.links,
            platforms: self.platforms,
        }
    }
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
