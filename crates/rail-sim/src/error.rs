use rail_core::RailError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Rail(#[from] RailError),
}

pub type SimResult<T> = Result<T, SimError>;
