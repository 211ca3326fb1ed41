//! Fluent builder for authoring a [`Template`] in code.
//!
//! The builder assigns node ids sequentially, so uniqueness holds by
//! construction; [`build`](TemplateBuilder::build) still runs full
//! validation to catch connections that name ids from another template or
//! bind a condition to an observer of the wrong kind.

use ua_core::{NodeId, Value, ValueKind};
use ua_nodes::{Action, Observer};

use crate::{
    ActionDef, Compare, ConditionDef, Connection, DecisionDef, DecisionSpec, GraphResult,
    ObserverDef, Template, VariableDef,
};

/// Builder for [`Template<H>`].
///
/// # Example
///
/// ```rust,ignore
/// let mut b = TemplateBuilder::new("guard");
/// let dist   = b.observer("enemy-distance", ValueKind::Float, || Box::new(EnemyDistance));
/// let near   = b.condition("enemy-near", Compare::Float { op: CompareOp::LessThan, value: 5.0 });
/// let attack = b.decision("attack", DecisionSpec::default());
/// let swing  = b.action("swing", || Box::new(Swing::new()));
/// b.connect_conditional(dist, near, attack, 1.0);
/// b.connect_simple(attack, swing, 0);
/// let template = b.build()?;
/// ```
pub struct TemplateBuilder<H> {
    name:        String,
    next_id:     u32,
    observers:   Vec<ObserverDef<H>>,
    decisions:   Vec<DecisionDef>,
    actions:     Vec<ActionDef<H>>,
    conditions:  Vec<ConditionDef>,
    connections: Vec<Connection>,
    variables:   Vec<VariableDef>,
}

impl<H> TemplateBuilder<H> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:        name.into(),
            next_id:     1,
            observers:   Vec::new(),
            decisions:   Vec::new(),
            actions:     Vec::new(),
            conditions:  Vec::new(),
            connections: Vec::new(),
            variables:   Vec::new(),
        }
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    /// Add an observer with a declared output kind and a spawn closure
    /// producing fresh per-agent node state.
    pub fn observer(
        &mut self,
        name:  impl Into<String>,
        kind:  ValueKind,
        spawn: impl Fn() -> Box<dyn Observer<H>> + Send + Sync + 'static,
    ) -> NodeId {
        let id = self.alloc();
        self.observers.push(ObserverDef {
            id,
            name: name.into(),
            enabled: true,
            notes: String::new(),
            kind,
            spawn: Box::new(spawn),
        });
        id
    }

    /// Add a decision with the given scoring parameters.
    pub fn decision(&mut self, name: impl Into<String>, spec: DecisionSpec) -> NodeId {
        let id = self.alloc();
        self.decisions.push(DecisionDef::new(id, name.into(), spec));
        id
    }

    /// Add an action with a spawn closure producing fresh per-agent state.
    pub fn action(
        &mut self,
        name:  impl Into<String>,
        spawn: impl Fn() -> Box<dyn Action<H>> + Send + Sync + 'static,
    ) -> NodeId {
        let id = self.alloc();
        self.actions.push(ActionDef {
            id,
            name: name.into(),
            enabled: true,
            notes: String::new(),
            spawn: Box::new(spawn),
        });
        id
    }

    /// Add a condition.
    pub fn condition(&mut self, name: impl Into<String>, compare: Compare) -> NodeId {
        let id = self.alloc();
        self.conditions.push(ConditionDef {
            id,
            name: name.into(),
            notes: String::new(),
            compare,
        });
        id
    }

    /// Add a template-local variable with an initial value.
    pub fn variable(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.variables.push(VariableDef {
            name:  name.into(),
            value: value.into(),
        });
        self
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Wire `observer` → `decision` through `condition`, contributing
    /// `weight * condition_result` to the decision's score.
    pub fn connect_conditional(
        &mut self,
        observer:  NodeId,
        condition: NodeId,
        decision:  NodeId,
        weight:    f64,
    ) -> &mut Self {
        self.connections
            .push(Connection::conditional(observer, condition, decision, weight));
        self
    }

    /// Wire `decision` → `action`.  `priority` orders the decision's actions
    /// (lower first, ties keep authoring order).
    pub fn connect_simple(&mut self, decision: NodeId, action: NodeId, priority: i32) -> &mut Self {
        self.connections
            .push(Connection::simple(decision, action, priority));
        self
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Validate and produce the immutable template.
    pub fn build(self) -> GraphResult<Template<H>> {
        let template = Template {
            name:        self.name,
            observers:   self.observers,
            decisions:   self.decisions,
            actions:     self.actions,
            conditions:  self.conditions,
            connections: self.connections,
            variables:   self.variables,
        };
        template.validate()?;
        Ok(template)
    }

    /// Toggle the enabled flag on a previously added observer, decision, or
    /// action.  No-op for unknown ids.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> &mut Self {
        if let Some(o) = self.observers.iter_mut().find(|o| o.id == id) {
            o.enabled = enabled;
        } else if let Some(d) = self.decisions.iter_mut().find(|d| d.id == id) {
            d.enabled = enabled;
        } else if let Some(a) = self.actions.iter_mut().find(|a| a.id == id) {
            a.enabled = enabled;
        }
        self
    }

    /// Attach authoring notes to a previously added node.  No-op for unknown
    /// ids; notes are cosmetic and never evaluated.
    pub fn set_notes(&mut self, id: NodeId, notes: impl Into<String>) -> &mut Self {
        let notes = notes.into();
        if let Some(o) = self.observers.iter_mut().find(|o| o.id == id) {
            o.notes = notes;
        } else if let Some(d) = self.decisions.iter_mut().find(|d| d.id == id) {
            d.notes = notes;
        } else if let Some(a) = self.actions.iter_mut().find(|a| a.id == id) {
            a.notes = notes;
        } else if let Some(c) = self.conditions.iter_mut().find(|c| c.id == id) {
            c.notes = notes;
        }
        self
    }
}
