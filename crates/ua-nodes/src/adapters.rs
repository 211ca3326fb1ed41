//! Ready-made observer and action implementations.
//!
//! These cover the common cases — a fixed value, a closure over the host, a
//! task that takes a known number of ticks — so applications only write full
//! trait impls for nodes that carry real state.

use ua_core::Value;

use crate::{Action, ActionState, NodeCtx, NodeResult, Observer};

// ── ConstObserver ─────────────────────────────────────────────────────────────

/// An observer that reports the same value every tick.
pub struct ConstObserver {
    value: Value,
}

impl ConstObserver {
    pub fn new(value: impl Into<Value>) -> Self {
        Self { value: value.into() }
    }
}

impl<H> Observer<H> for ConstObserver {
    fn observe(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<Value> {
        Ok(self.value.clone())
    }
}

// ── FnObserver ────────────────────────────────────────────────────────────────

/// An observer backed by a closure over the node context.
///
/// ```rust,ignore
/// FnObserver::new(|ctx: &mut NodeCtx<'_, Guard>| Ok(Value::Float(ctx.host.health)))
/// ```
pub struct FnObserver<F> {
    f: F,
}

impl<F> FnObserver<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<H, F> Observer<H> for FnObserver<F>
where
    F: FnMut(&mut NodeCtx<'_, H>) -> NodeResult<Value> + Send,
{
    fn observe(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<Value> {
        (self.f)(ctx)
    }
}

// ── FnAction ──────────────────────────────────────────────────────────────────

/// An action backed by a closure; the closure is the update step.
pub struct FnAction<F> {
    f: F,
}

impl<F> FnAction<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<H, F> Action<H> for FnAction<F>
where
    F: FnMut(&mut NodeCtx<'_, H>) -> NodeResult<ActionState> + Send,
{
    fn on_action_update(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<ActionState> {
        (self.f)(ctx)
    }
}

// ── CountdownAction ───────────────────────────────────────────────────────────

/// An action that runs for a fixed number of update ticks, then succeeds.
///
/// A duration of `n` means the `n`-th update returns `Success`; `n = 1`
/// succeeds on its first update.  The countdown restarts every time the
/// block (re)starts the action.
pub struct CountdownAction {
    total:     u32,
    remaining: u32,
}

impl CountdownAction {
    pub fn new(ticks: u32) -> Self {
        Self { total: ticks, remaining: ticks }
    }
}

impl<H> Action<H> for CountdownAction {
    fn on_action_start(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        self.remaining = self.total;
        Ok(())
    }

    fn on_action_update(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<ActionState> {
        self.remaining = self.remaining.saturating_sub(1);
        Ok(if self.remaining == 0 {
            ActionState::Success
        } else {
            ActionState::Running
        })
    }
}
