//! Building per-decision compiled blocks from a template instance.
//!
//! Compilation happens once per brain start: a single pass over the
//! connection list joins each decision against its conditional inputs
//! (observer slot + condition index + edge weight) and its simple outputs
//! (actions, ordered by connection priority).  The tick loop then never
//! touches the connection list again.
//!
//! A dangling id is a fatal configuration error surfaced here, never
//! retried per tick.

use rustc_hash::FxHashMap;

use ua_core::NodeId;
use ua_graph::{ConnectionKind, DecisionDef, GraphError, GraphResult, TemplateInstance};

use crate::ActionBlock;

// ── Compiled shapes ───────────────────────────────────────────────────────────

/// One conditional input to a decision's score: which condition to evaluate,
/// which observer's cached value feeds it, and the edge weight.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ConditionBlock {
    /// Index into `TemplateInstance::conditions`.
    pub condition: usize,
    /// Index into `TemplateInstance::observers` (the cached-value slot).
    pub observer:  usize,
    /// The connection's weight multiplier.
    pub weight:    f64,
}

/// Everything the tick loop needs for one decision.
pub(crate) struct CompiledDecision {
    /// Index into `TemplateInstance::decisions`.
    pub decision: usize,
    /// Conditional inputs feeding this decision's score.
    pub blocks:   Vec<ConditionBlock>,
    /// The action block executing this decision's actions.
    pub actions:  ActionBlock,
}

// ── Placeholder ───────────────────────────────────────────────────────────────

/// Append a disabled, action-less placeholder decision if the instance has no
/// decisions at all, so the scorer never operates on an empty set.
pub(crate) fn ensure_placeholder<H>(instance: &mut TemplateInstance<H>) {
    if instance.decisions.is_empty() {
        instance.decisions.push(DecisionDef::placeholder());
    }
}

// ── Compilation ───────────────────────────────────────────────────────────────

/// Join the instance's connection list against its node collections,
/// producing one [`CompiledDecision`] per decision plus the id → slot map
/// used by score queries.
pub(crate) fn compile<H>(
    instance: &TemplateInstance<H>,
) -> GraphResult<(Vec<CompiledDecision>, FxHashMap<NodeId, usize>)> {
    // Id → index maps, also the duplicate-id check.
    let mut observer_slots = FxHashMap::default();
    for (i, obs) in instance.observers.iter().enumerate() {
        if observer_slots.insert(obs.id, i).is_some() {
            return Err(GraphError::DuplicateId(obs.id));
        }
    }
    let mut condition_slots = FxHashMap::default();
    for (i, cond) in instance.conditions.iter().enumerate() {
        if condition_slots.insert(cond.id, i).is_some() {
            return Err(GraphError::DuplicateId(cond.id));
        }
    }
    let mut action_slots = FxHashMap::default();
    for (i, act) in instance.actions.iter().enumerate() {
        if action_slots.insert(act.id, i).is_some() {
            return Err(GraphError::DuplicateId(act.id));
        }
    }
    let mut decision_slots = FxHashMap::default();
    for (i, dec) in instance.decisions.iter().enumerate() {
        if decision_slots.insert(dec.id, i).is_some() {
            return Err(GraphError::DuplicateId(dec.id));
        }
    }

    let mut compiled = Vec::with_capacity(instance.decisions.len());

    for (slot, decision) in instance.decisions.iter().enumerate() {
        let mut blocks = Vec::new();
        // (priority, authoring order, action slot) — sorted below.
        let mut action_list: Vec<(i32, usize, usize)> = Vec::new();

        for (i, con) in instance.connections.iter().enumerate() {
            match con.kind {
                ConnectionKind::Conditional if con.target == decision.id => {
                    let observer = *observer_slots
                        .get(&con.source)
                        .ok_or(GraphError::Dangling { connection: i, id: con.source })?;
                    let cond_id = con
                        .condition
                        .ok_or(GraphError::MissingCondition { connection: i })?;
                    let condition = *condition_slots
                        .get(&cond_id)
                        .ok_or(GraphError::Dangling { connection: i, id: cond_id })?;

                    // Bind-time kind check: condition variant vs declared
                    // observer output.
                    let expected = instance.conditions[condition].compare.kind();
                    let got = instance.observers[observer].kind;
                    if expected != got {
                        return Err(GraphError::KindMismatch {
                            condition: cond_id,
                            observer:  con.source,
                            expected,
                            got,
                        });
                    }

                    blocks.push(ConditionBlock { condition, observer, weight: con.weight });
                }
                ConnectionKind::Simple if con.source == decision.id => {
                    let action = *action_slots
                        .get(&con.target)
                        .ok_or(GraphError::Dangling { connection: i, id: con.target })?;
                    action_list.push((con.priority, i, action));
                }
                _ => {}
            }
        }

        // Priority order; ties keep authoring (connection) order.
        action_list.sort_by_key(|&(priority, order, _)| (priority, order));
        let actions = action_list.into_iter().map(|(_, _, slot)| slot).collect();

        compiled.push(CompiledDecision {
            decision: slot,
            blocks,
            actions: ActionBlock::new(actions, decision.policy),
        });
    }

    Ok((compiled, decision_slots))
}
