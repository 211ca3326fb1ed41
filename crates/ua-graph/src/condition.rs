//! Condition definitions — pure mappings from an observed value to a weight.

use ua_core::{NodeId, Value, ValueKind};

// ── CompareOp ─────────────────────────────────────────────────────────────────

/// Comparison operator for ordered value kinds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    GreaterThan,
    LessThan,
    Equals,
    NotEquals,
}

impl CompareOp {
    fn eval<T: PartialOrd>(self, observed: &T, reference: &T) -> bool {
        match self {
            CompareOp::GreaterThan => observed > reference,
            CompareOp::LessThan    => observed < reference,
            CompareOp::Equals      => observed == reference,
            CompareOp::NotEquals   => observed != reference,
        }
    }
}

// ── Compare ───────────────────────────────────────────────────────────────────

/// A condition's configured comparison, keyed on the observer's value kind.
///
/// Binding a condition to an observer is checked once, when compiled blocks
/// are built: the variant's kind must match the observer's declared output
/// kind.  Evaluation is then a plain match — no runtime type probing.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compare {
    /// Weight 1 iff the observed bool equals `expect`.
    Bool { expect: bool },
    Int { op: CompareOp, value: i64 },
    Float { op: CompareOp, value: f64 },
    /// Text comparisons order lexicographically.
    Text { op: CompareOp, value: String },
}

impl Compare {
    /// The value kind this comparison applies to.
    pub fn kind(&self) -> ValueKind {
        match self {
            Compare::Bool { .. }  => ValueKind::Bool,
            Compare::Int { .. }   => ValueKind::Int,
            Compare::Float { .. } => ValueKind::Float,
            Compare::Text { .. }  => ValueKind::Text,
        }
    }

    /// Map an observed value to a weight in [0, 1].
    ///
    /// Deterministic and pure.  A kind mismatch yields 0.0; compiled-block
    /// binding rejects mismatched pairings up front, so that path is only
    /// reachable through hand-assembled templates that skipped validation.
    pub fn weight(&self, observed: &Value) -> f64 {
        let hit = match (self, observed) {
            (Compare::Bool { expect }, Value::Bool(v)) => v == expect,
            (Compare::Int { op, value }, Value::Int(v)) => op.eval(v, value),
            (Compare::Float { op, value }, Value::Float(v)) => op.eval(v, value),
            (Compare::Text { op, value }, Value::Text(v)) => op.eval(v, value),
            _ => false,
        };
        if hit { 1.0 } else { 0.0 }
    }
}

// ── ConditionDef ──────────────────────────────────────────────────────────────

/// Definition of one condition node.
///
/// A condition is bound at compile time to exactly one observer of a
/// compatible value kind (the observer at the source end of the conditional
/// connection that names this condition).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionDef {
    pub id:      NodeId,
    pub name:    String,
    pub notes:   String,
    pub compare: Compare,
}
