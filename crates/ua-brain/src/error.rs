use thiserror::Error;
use ua_graph::GraphError;

#[derive(Debug, Error)]
pub enum BrainError {
    /// The template failed integrity checks while compiling per-decision
    /// blocks.  Fatal: the brain refuses to enter the running state.
    #[error("template compilation failed: {0}")]
    Compile(#[from] GraphError),
}

pub type BrainResult<T> = Result<T, BrainError>;
