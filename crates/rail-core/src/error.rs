//! Workspace error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `RailError` via `From` impls or wrap `RailError` as one variant.  Both
//! patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::StationId;

/// The topology-consistency error shared by the other `rail-*` crates.
///
/// Both variants signal a topology that is inconsistent with the line
/// definitions — a configuration error that aborts the run, not a runtime
/// condition to recover from.  Parse and I/O failures belong to the
/// crates that read input, not here.
#[derive(Debug, Error)]
pub enum RailError {
    #[error("no link from station {from} to station {to}")]
    MissingLink { from: StationId, to: StationId },

    #[error("no platform at station {from} toward station {to}")]
    MissingPlatform { from: StationId, to: StationId },
}

/// Shorthand result type for all `rail-*` crates.
pub type RailResult<T> = Result<T, RailError>;
