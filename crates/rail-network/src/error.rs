use rail_core::{RailError, StationId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("line '{prefix}' has {len} station(s); a line needs at least 2")]
    LineTooShort { prefix: char, len: usize },

    #[error("line '{prefix}' visits station {station} more than once")]
    RepeatedStation { prefix: char, station: StationId },

    #[error(transparent)]
    Rail(#[from] RailError),
}
