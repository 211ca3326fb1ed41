//! Directed edges between template nodes.

use ua_core::NodeId;

/// The flavor of a connection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionKind {
    /// Decision → Action.  Carries a priority that orders the decision's
    /// actions; weight is unused.
    Simple,
    /// Observer → Decision through a condition.  Carries the weight the
    /// condition's result contributes to the decision's score.
    Conditional,
}

/// A directed edge between two node ids.
///
/// Weights of all conditional connections sharing a target decision
/// conceptually sum to ≤ 1, but this is an authoring convention, not a
/// runtime rule: scoring just sums contributions, so a violated convention
/// shifts relative scores without breaking anything.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub kind:      ConnectionKind,
    pub source:    NodeId,
    pub target:    NodeId,
    /// The condition evaluated along this edge; `None` for simple edges.
    pub condition: Option<NodeId>,
    /// Run order among a decision's actions (lower runs first, ties keep
    /// authoring order).  Meaningful on simple edges only.
    pub priority:  i32,
    /// Score contribution multiplier.  Meaningful on conditional edges only.
    pub weight:    f64,
}

impl Connection {
    /// A Decision → Action edge.
    pub fn simple(decision: NodeId, action: NodeId, priority: i32) -> Self {
        Self {
            kind:      ConnectionKind::Simple,
            source:    decision,
            target:    action,
            condition: None,
            priority,
            weight:    0.0,
        }
    }

    /// An Observer → Decision edge evaluated through `condition`.
    pub fn conditional(observer: NodeId, condition: NodeId, decision: NodeId, weight: f64) -> Self {
        Self {
            kind:      ConnectionKind::Conditional,
            source:    observer,
            target:    decision,
            condition: Some(condition),
            priority:  0,
            weight,
        }
    }
}
