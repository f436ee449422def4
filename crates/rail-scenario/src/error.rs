use rail_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario input ended while reading {expected}")]
    Truncated { expected: &'static str },

    #[error("invalid {what}: '{text}'")]
    BadNumber { what: &'static str, text: String },

    #[error("route for line '{prefix}' names unknown station '{name}'")]
    UnknownStation { prefix: char, name: String },

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
