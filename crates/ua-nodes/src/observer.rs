//! The `Observer` trait — the sensing side of an agent.

use ua_core::Value;

use crate::{NodeCtx, NodeResult};

/// A sensor producing one typed [`Value`] per tick.
///
/// The template declares the observer's output [`ValueKind`] up front; the
/// brain caches the latest observed value and conditions read the cache, so
/// `observe` is called exactly once per tick per enabled observer, before any
/// scoring happens.
///
/// Implementations hold their own mutable state — a fresh instance is spawned
/// for every agent, so state never leaks between brains.
///
/// # Example
///
/// ```rust,ignore
/// struct EnemyDistance;
///
/// impl Observer<Guard> for EnemyDistance {
///     fn observe(&mut self, ctx: &mut NodeCtx<'_, Guard>) -> NodeResult<Value> {
///         Ok(Value::Float(ctx.host.distance_to_enemy()))
///     }
/// }
/// ```
///
/// [`ValueKind`]: ua_core::ValueKind
pub trait Observer<H>: Send {
    /// Called once when the owning brain starts, after template instantiation.
    fn on_start(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        Ok(())
    }

    /// Produce this tick's value.  Must return a `Value` matching the kind
    /// declared in the template; an `Err` keeps the previous cached value.
    fn observe(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<Value>;

    /// Called when the owning brain is paused.
    fn on_pause(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        Ok(())
    }

    /// Called when the owning brain resumes from a pause.
    fn on_resume(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        Ok(())
    }
}
