//! The immutable template catalog.

use std::collections::HashSet;

use ua_core::NodeId;
use ua_nodes::Variables;

use crate::connection::ConnectionKind;
use crate::instance::{ActionRt, ObserverRt, TemplateInstance};
use crate::{ActionDef, ConditionDef, Connection, DecisionDef, GraphError, GraphResult, ObserverDef, VariableDef};

/// A named catalog of node definitions: observers, decisions, actions,
/// conditions, connections, and variables.
///
/// Templates are immutable once built and shared between all agents that use
/// them (typically behind an `Arc`).  A brain never runs the template
/// directly — it runs a per-agent [`TemplateInstance`] produced by
/// [`instantiate`](Template::instantiate).
///
/// Node ids are unique within a template and preserved by instantiation.
pub struct Template<H> {
    pub name:        String,
    pub observers:   Vec<ObserverDef<H>>,
    pub decisions:   Vec<DecisionDef>,
    pub actions:     Vec<ActionDef<H>>,
    pub conditions:  Vec<ConditionDef>,
    pub connections: Vec<Connection>,
    pub variables:   Vec<VariableDef>,
}

impl<H> Template<H> {
    // ── Name lookups ──────────────────────────────────────────────────────

    /// Find an observer's id by name.
    pub fn observer_id(&self, name: &str) -> Option<NodeId> {
        self.observers.iter().find(|o| o.name == name).map(|o| o.id)
    }

    /// Find a decision's id by name.
    pub fn decision_id(&self, name: &str) -> Option<NodeId> {
        self.decisions.iter().find(|d| d.name == name).map(|d| d.id)
    }

    /// Find an action's id by name.
    pub fn action_id(&self, name: &str) -> Option<NodeId> {
        self.actions.iter().find(|a| a.name == name).map(|a| a.id)
    }

    /// Find a condition's id by name.
    pub fn condition_id(&self, name: &str) -> Option<NodeId> {
        self.conditions.iter().find(|c| c.name == name).map(|c| c.id)
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Check referential integrity: unique node ids, every connection
    /// endpoint resolvable to a node of the right category, and every
    /// condition kind-compatible with its source observer.
    ///
    /// [`TemplateBuilder::build`](crate::TemplateBuilder::build) runs this;
    /// hand-assembled templates should call it before first use.  Brains
    /// re-surface the same errors when compiling their per-decision blocks.
    pub fn validate(&self) -> GraphResult<()> {
        let mut seen = HashSet::new();
        let all_ids = self
            .observers.iter().map(|o| o.id)
            .chain(self.decisions.iter().map(|d| d.id))
            .chain(self.actions.iter().map(|a| a.id))
            .chain(self.conditions.iter().map(|c| c.id));
        for id in all_ids {
            if !seen.insert(id) {
                return Err(GraphError::DuplicateId(id));
            }
        }

        for (i, con) in self.connections.iter().enumerate() {
            match con.kind {
                ConnectionKind::Simple => {
                    self.decisions
                        .iter()
                        .find(|d| d.id == con.source)
                        .ok_or(GraphError::Dangling { connection: i, id: con.source })?;
                    self.actions
                        .iter()
                        .find(|a| a.id == con.target)
                        .ok_or(GraphError::Dangling { connection: i, id: con.target })?;
                }
                ConnectionKind::Conditional => {
                    let observer = self
                        .observers
                        .iter()
                        .find(|o| o.id == con.source)
                        .ok_or(GraphError::Dangling { connection: i, id: con.source })?;
                    self.decisions
                        .iter()
                        .find(|d| d.id == con.target)
                        .ok_or(GraphError::Dangling { connection: i, id: con.target })?;
                    let cond_id = con
                        .condition
                        .ok_or(GraphError::MissingCondition { connection: i })?;
                    let condition = self
                        .conditions
                        .iter()
                        .find(|c| c.id == cond_id)
                        .ok_or(GraphError::Dangling { connection: i, id: cond_id })?;
                    if condition.compare.kind() != observer.kind {
                        return Err(GraphError::KindMismatch {
                            condition: condition.id,
                            observer:  observer.id,
                            expected:  condition.compare.kind(),
                            got:       observer.kind,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    // ── Instantiation ─────────────────────────────────────────────────────

    /// Produce a fresh per-agent deep copy.
    ///
    /// Observer and action state is spawned anew; ids, decision parameters,
    /// conditions, and connections are copied verbatim; variables are seeded
    /// from their definitions.  Nothing in the returned instance aliases the
    /// shared blueprint.
    pub fn instantiate(&self) -> TemplateInstance<H> {
        let mut vars = Variables::new();
        for var in &self.variables {
            vars.set(var.name.clone(), var.value.clone());
        }

        TemplateInstance {
            name:        self.name.clone(),
            observers:   self.observers.iter().map(ObserverRt::from_def).collect(),
            decisions:   self.decisions.clone(),
            actions:     self.actions.iter().map(ActionRt::from_def).collect(),
            conditions:  self.conditions.clone(),
            connections: self.connections.clone(),
            vars,
        }
    }
}
