//! The context handed to every node callback.

use std::collections::HashMap;

use ua_core::Value;

// ── Variables ─────────────────────────────────────────────────────────────────

/// Named values local to one template instance.
///
/// Variables are seeded from the template's variable definitions when a brain
/// starts and live for the lifetime of the instance.  Nodes use them to share
/// scratch state (a chase target, a cooldown flag) without reaching into each
/// other.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    values: HashMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(Value::as_bool)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_int)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(Value::as_float)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_text)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ── NodeCtx ───────────────────────────────────────────────────────────────────

/// Mutable per-callback view of the agent.
///
/// `host` is the embedding application's agent object, passed through the
/// engine untouched.  `vars` is the instance-local variable store.  Both
/// borrows last for a single callback invocation; the engine never holds a
/// `NodeCtx` across ticks.
pub struct NodeCtx<'a, H> {
    pub host: &'a mut H,
    pub vars: &'a mut Variables,
}

impl<'a, H> NodeCtx<'a, H> {
    #[inline]
    pub fn new(host: &'a mut H, vars: &'a mut Variables) -> Self {
        Self { host, vars }
    }
}
