//! Decision definitions and run policies.

use ua_core::NodeId;

// ── RunPolicy ─────────────────────────────────────────────────────────────────

/// How a decision runs its connected actions while it is active.
///
/// These are three independent readings of "run several actions under one
/// decision", mirroring classic behavior-tree composites (sequence, random
/// selector, parallel) but flattened into a single non-recursive block —
/// actions cannot nest decisions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunPolicy {
    /// Run actions one by one in connection-priority order; a failure aborts
    /// the rest.
    #[default]
    Sequential,
    /// Pick one action at random and run only it.
    Random,
    /// Start every action at once; each ends on its own.
    Concurrent,
}

// ── DecisionSpec ──────────────────────────────────────────────────────────────

/// Tunable scoring parameters of a decision, used when authoring a template.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionSpec {
    /// Multiplier applied to the summed condition contributions.
    pub total_score: f64,
    /// May a higher-scoring candidate stop this decision mid-run?
    pub interruptible: bool,
    pub policy: RunPolicy,
    /// While this decision is active and its actions are running, add
    /// `focus_boost` to its score.  Dampens flapping between decisions that
    /// score identically.
    pub focus_when_selected: bool,
    pub focus_boost: f64,
}

impl Default for DecisionSpec {
    fn default() -> Self {
        Self {
            total_score:         1.0,
            interruptible:       true,
            policy:              RunPolicy::Sequential,
            focus_when_selected: false,
            focus_boost:         1.0,
        }
    }
}

// ── DecisionDef ───────────────────────────────────────────────────────────────

/// Definition of one decision node: header plus scoring parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionDef {
    pub id:      NodeId,
    pub name:    String,
    /// A disabled decision always scores zero (its contributions are summed
    /// and then multiplied by zero), so it is only ever selected when every
    /// decision scores zero.
    pub enabled: bool,
    pub notes:   String,
    pub total_score: f64,
    pub interruptible: bool,
    pub policy: RunPolicy,
    pub focus_when_selected: bool,
    pub focus_boost: f64,
}

impl DecisionDef {
    pub fn new(id: NodeId, name: String, spec: DecisionSpec) -> Self {
        Self {
            id,
            name,
            enabled: true,
            notes: String::new(),
            total_score: spec.total_score,
            interruptible: spec.interruptible,
            policy: spec.policy,
            focus_when_selected: spec.focus_when_selected,
            focus_boost: spec.focus_boost,
        }
    }

    /// The disabled placeholder used when a template defines no decisions, so
    /// the scorer never operates on an empty set.
    pub fn placeholder() -> Self {
        Self {
            id:                  NodeId::INVALID,
            name:                "placeholder".to_owned(),
            enabled:             false,
            notes:               String::new(),
            total_score:         0.0,
            interruptible:       true,
            policy:              RunPolicy::Sequential,
            focus_when_selected: false,
            focus_boost:         0.0,
        }
    }

    /// `true` for the synthetic placeholder decision.
    pub fn is_placeholder(&self) -> bool {
        self.id == NodeId::INVALID
    }
}
