//! `rail-core` — foundational types for the railsim workspace.
//!
//! This crate is a dependency of every other `rail-*` crate.  It
//! intentionally has no `rail-*` dependencies and minimal external ones
//! (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`ids`]       | `StationId`, `LinkId`, `PlatformId`, `TrainId`, `LineId` |
//! | [`time`]      | `Tick`, `Countdown`, `SimConfig`                    |
//! | [`direction`] | `Direction` (forward/backward along a line)         |
//! | [`error`]     | `RailError`, `RailResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod direction;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{RailError, RailResult};
pub use ids::{LineId, LinkId, PlatformId, StationId, TrainId};
pub use time::{Countdown, SimConfig, Tick};
