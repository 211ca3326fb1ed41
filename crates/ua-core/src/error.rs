//! Framework error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `BrainError`,
//! `SchedError`) and either convert into `UaError` via `From` impls or wrap
//! it as one variant.  Both patterns are acceptable; prefer whichever keeps
//! error sites clean.

use thiserror::Error;

use crate::{BrainId, NodeId};

/// The top-level error type for `ua-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum UaError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("brain {0} not found")]
    BrainNotFound(BrainId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ua-*` crates.
pub type UaResult<T> = Result<T, UaError>;
