use crate::core::bus::DispatchError;

/// Errors returned by the simulation runner
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
    #[error("event dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}
