use thiserror::Error;

use ua_brain::BrainError;
use ua_core::BrainId;

#[derive(Debug, Error)]
pub enum SchedError {
    /// The scheduler has no agent under this id (never spawned, or already
    /// despawned).
    #[error("unknown brain: {0}")]
    UnknownBrain(BrainId),

    #[error(transparent)]
    Brain(#[from] BrainError),
}

pub type SchedResult<T> = Result<T, SchedError>;
