//! `rail-scenario` — text scenario loader for the railsim workspace.
//!
//! # Input format
//!
//! A whitespace-separated text description, in order:
//!
//! ```text
//! S                         station count
//! <S station names>
//! <S popularity integers>   aligned with the names by position
//! <S×S distance matrix>     0 = no link; >0 = link of that many ticks
//! <route of line g>         station names, one text line
//! <route of line y>         station names, one text line
//! <route of line b>         station names, one text line
//! N                         total ticks to simulate
//! <3 per-line train targets>
//! T                         number of final ticks to snapshot
//! ```
//!
//! Scalar sections are free-form whitespace (tokens may span text lines),
//! but each line route must occupy exactly one text line — route lengths
//! are not declared up front, so the line break is the delimiter.

pub mod error;
pub mod scenario;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::ScenarioError;
pub use scenario::{Scenario, LINE_PREFIXES};
