use thiserror::Error;

use ua_core::{NodeId, ValueKind};

/// A template integrity error.
///
/// These are fatal configuration errors: they surface once, when a template
/// is built or when a brain compiles its per-decision blocks, and are never
/// retried per tick.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("duplicate node id {0} in template")]
    DuplicateId(NodeId),

    #[error("connection {connection} references missing node {id}")]
    Dangling { connection: usize, id: NodeId },

    #[error("conditional connection {connection} names no condition")]
    MissingCondition { connection: usize },

    #[error(
        "condition {condition} compares {expected} values but observer {observer} outputs {got}"
    )]
    KindMismatch {
        condition: NodeId,
        observer:  NodeId,
        expected:  ValueKind,
        got:       ValueKind,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;
