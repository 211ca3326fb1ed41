//! Observer, action, and variable definitions.
//!
//! Definitions pair a node header (id, name, enabled flag, notes) with a
//! *spawn* closure that produces a fresh trait-object instance.  Spawning —
//! rather than cloning — is what makes per-agent instantiation a true deep
//! copy: every brain gets node state that has never been touched by another
//! agent.

use ua_core::{NodeId, Value, ValueKind};
use ua_nodes::{Action, Observer};

pub(crate) type ObserverSpawn<H> = Box<dyn Fn() -> Box<dyn Observer<H>> + Send + Sync>;
pub(crate) type ActionSpawn<H> = Box<dyn Fn() -> Box<dyn Action<H>> + Send + Sync>;

// ── ObserverDef ───────────────────────────────────────────────────────────────

/// Definition of one observer node.
pub struct ObserverDef<H> {
    pub id:      NodeId,
    pub name:    String,
    /// Disabled observers are skipped by the observation step; their cached
    /// value stays at the kind's default.
    pub enabled: bool,
    /// Free-text authoring notes.  Cosmetic, never evaluated.
    pub notes:   String,
    /// Declared output kind.  Checked against attached conditions when
    /// compiled blocks are built.
    pub kind:    ValueKind,
    pub(crate) spawn: ObserverSpawn<H>,
}

impl<H> ObserverDef<H> {
    /// Spawn a fresh observer instance for one agent.
    pub(crate) fn spawn(&self) -> Box<dyn Observer<H>> {
        (self.spawn)()
    }
}

// ── ActionDef ─────────────────────────────────────────────────────────────────

/// Definition of one action node.
pub struct ActionDef<H> {
    pub id:      NodeId,
    pub name:    String,
    pub enabled: bool,
    pub notes:   String,
    pub(crate) spawn: ActionSpawn<H>,
}

impl<H> ActionDef<H> {
    /// Spawn a fresh action instance for one agent.
    pub(crate) fn spawn(&self) -> Box<dyn Action<H>> {
        (self.spawn)()
    }
}

// ── VariableDef ───────────────────────────────────────────────────────────────

/// Definition of one template-local variable and its initial value.
#[derive(Clone, Debug)]
pub struct VariableDef {
    pub name:  String,
    pub value: Value,
}
