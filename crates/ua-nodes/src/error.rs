use thiserror::Error;

/// An error raised by a node callback.
///
/// Node failures are contained at the callback boundary: the brain logs them
/// and continues with the remaining nodes, so returning an `Err` never stops
/// the tick.  An observer that errors keeps its previous value for the tick;
/// an action that errors is treated as still `Running` and retried.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<String> for NodeError {
    fn from(msg: String) -> Self {
        NodeError::Message(msg)
    }
}

impl From<&str> for NodeError {
    fn from(msg: &str) -> Self {
        NodeError::Message(msg.to_owned())
    }
}

pub type NodeResult<T> = Result<T, NodeError>;
