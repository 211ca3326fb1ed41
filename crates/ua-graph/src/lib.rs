//! `ua-graph` — the static behavior template and its per-agent copies.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`node`]       | `ObserverDef<H>`, `ActionDef<H>`, `VariableDef`              |
//! | [`decision`]   | `DecisionDef`, `DecisionSpec`, `RunPolicy`                   |
//! | [`condition`]  | `ConditionDef`, `Compare`, `CompareOp`                       |
//! | [`connection`] | `Connection`, `ConnectionKind`                               |
//! | [`template`]   | `Template<H>` — the immutable catalog + name lookups         |
//! | [`builder`]    | `TemplateBuilder<H>` — id assignment and validation          |
//! | [`instance`]   | `TemplateInstance<H>`, `ObserverRt<H>`, `ActionRt<H>`        |
//! | [`error`]      | `GraphError`, `GraphResult<T>`                               |
//!
//! # Lifecycle
//!
//! A [`Template`] is authored once (through [`TemplateBuilder`] or external
//! tooling), then *instantiated* per agent when a brain starts.
//! [`Template::instantiate`] produces a [`TemplateInstance`] with fresh node
//! state — observers, actions, and variables are spawned anew, while node
//! ids, decision parameters, conditions, and connections are copied verbatim.
//! Per-agent state therefore never aliases back into the shared blueprint.

pub mod builder;
pub mod condition;
pub mod connection;
pub mod decision;
pub mod error;
pub mod instance;
pub mod node;
pub mod template;


pub use builder::TemplateBuilder;
pub use condition::{Compare, CompareOp, ConditionDef};
pub use connection::{Connection, ConnectionKind};
pub use decision::{DecisionDef, DecisionSpec, RunPolicy};
pub use error::{GraphError, GraphResult};
pub use instance::{ActionRt, ObserverRt, TemplateInstance};
pub use node::{ActionDef, ObserverDef, VariableDef};
pub use template::Template;
