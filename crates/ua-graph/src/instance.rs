//! Per-agent live copies of a template.
//!
//! `TemplateInstance` is the arena a brain runs against: observer and action
//! runtime wrappers carry the mutable per-agent state (cached observation
//! values, action lifecycle states) next to their immutable headers, indexed
//! positionally so compiled blocks can refer to nodes by slot.

use ua_core::{NodeId, Value, ValueKind};
use ua_nodes::{Action, ActionState, NodeCtx, NodeResult, Observer, Variables};

use crate::{ActionDef, ConditionDef, Connection, DecisionDef, ObserverDef};

// ── ObserverRt ────────────────────────────────────────────────────────────────

/// One live observer: header, spawned node state, and the latest value.
pub struct ObserverRt<H> {
    pub id:      NodeId,
    pub name:    String,
    pub enabled: bool,
    pub kind:    ValueKind,
    /// The most recent observation.  Starts at the kind's default and keeps
    /// its previous value across a failed `observe` call.
    pub value:   Value,
    node: Box<dyn Observer<H>>,
}

impl<H> ObserverRt<H> {
    pub(crate) fn from_def(def: &ObserverDef<H>) -> Self {
        Self {
            id:      def.id,
            name:    def.name.clone(),
            enabled: def.enabled,
            kind:    def.kind,
            value:   def.kind.default_value(),
            node:    def.spawn(),
        }
    }

    /// Run the observer and cache its new value.  On `Err` the cached value
    /// is left untouched.
    pub fn refresh(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.value = self.node.observe(ctx)?;
        Ok(())
    }

    pub fn on_start(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.node.on_start(ctx)
    }

    pub fn on_pause(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.node.on_pause(ctx)
    }

    pub fn on_resume(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.node.on_resume(ctx)
    }
}

// ── ActionRt ──────────────────────────────────────────────────────────────────

/// One live action: header, spawned node state, and lifecycle state.
///
/// State transitions only happen through these methods, driven by the owning
/// action block — an action never mutates its own recorded state.
pub struct ActionRt<H> {
    pub id:      NodeId,
    pub name:    String,
    pub enabled: bool,
    pub state:   ActionState,
    node: Box<dyn Action<H>>,
}

impl<H> ActionRt<H> {
    pub(crate) fn from_def(def: &ActionDef<H>) -> Self {
        Self {
            id:      def.id,
            name:    def.name.clone(),
            enabled: def.enabled,
            state:   ActionState::Pending,
            node:    def.spawn(),
        }
    }

    /// Mark the action running and fire its `on_action_start` callback.
    pub fn begin(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.state = ActionState::Running;
        self.node.on_action_start(ctx)
    }

    /// Run one update step, recording the returned state.
    ///
    /// On `Err` the recorded state is unchanged (still `Running`), so the
    /// action is retried next tick.
    pub fn update(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<ActionState> {
        let state = self.node.on_action_update(ctx)?;
        self.state = state;
        Ok(state)
    }

    /// End the action in `state` and fire its `on_action_end` callback.
    pub fn end(&mut self, state: ActionState, ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.state = state;
        self.node.on_action_end(state, ctx)
    }

    /// Return the recorded state to `Pending` without firing callbacks.
    pub fn reset_state(&mut self) {
        self.state = ActionState::Pending;
    }

    pub fn on_start(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.node.on_start(ctx)
    }

    pub fn on_pause(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.node.on_pause(ctx)
    }

    pub fn on_resume(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.node.on_resume(ctx)
    }
}

// ── TemplateInstance ──────────────────────────────────────────────────────────

/// A per-agent deep copy of a [`Template`](crate::Template).
///
/// Owned exclusively by one brain.  Decisions, conditions, and connections
/// are plain data copies; observers and actions are freshly spawned runtime
/// wrappers; `vars` is seeded from the template's variable definitions.
pub struct TemplateInstance<H> {
    pub name:        String,
    pub observers:   Vec<ObserverRt<H>>,
    pub decisions:   Vec<DecisionDef>,
    pub actions:     Vec<ActionRt<H>>,
    pub conditions:  Vec<ConditionDef>,
    pub connections: Vec<Connection>,
    pub vars:        Variables,
}

impl<H> TemplateInstance<H> {
    /// Position of an observer in the arena by id.
    pub fn observer_slot(&self, id: NodeId) -> Option<usize> {
        self.observers.iter().position(|o| o.id == id)
    }

    /// Position of an action in the arena by id.
    pub fn action_slot(&self, id: NodeId) -> Option<usize> {
        self.actions.iter().position(|a| a.id == id)
    }
}
