//! `rail-network` — the static rail topology and its contention state.
//!
//! # Data layout
//!
//! The topology is an arena: one flat `Vec` per entity type (stations,
//! links, platforms), cross-referenced by the typed IDs from `rail-core`.
//! Trains hold IDs into these arenas, never references — "relation, not
//! ownership".
//!
//! # Contention
//!
//! Platforms and links are binary exclusive resources.  All occupancy
//! mutation goes through the capability API on [`Topology`]
//! ([`request_platform`](Topology::request_platform),
//! [`release_platform`](Topology::release_platform),
//! [`try_claim_link`](Topology::try_claim_link),
//! [`release_link`](Topology::release_link)) — callers never reach into a
//! platform's holding area directly.

pub mod error;
pub mod line;
pub mod topology;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::NetworkError;
pub use line::Line;
pub use topology::{Link, Platform, PlatformAccess, Station, Topology, TopologyBuilder};
