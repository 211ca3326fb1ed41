//! The `Action` trait — a task executed while its owning decision is active.

use crate::{ActionState, NodeCtx, NodeResult};

/// A task with an explicit start/update/end lifecycle.
///
/// Actions are grouped per decision into an action block, which drives them
/// under the decision's run policy (sequential, random, or concurrent).  An
/// action runs until `on_action_update` returns [`ActionState::Success`] or
/// [`ActionState::Fail`]; returning [`ActionState::Running`] means "call me
/// again next tick".
///
/// `on_start` (brain start) and `on_action_start` (task begin) are distinct:
/// the former fires once per brain lifetime, the latter every time the block
/// (re)starts this action.
pub trait Action<H>: Send {
    /// Called once when the owning brain starts, after template instantiation.
    fn on_start(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        Ok(())
    }

    /// Called when the action block begins running this action.
    fn on_action_start(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        Ok(())
    }

    /// Called once per tick while the action is running.
    ///
    /// An `Err` is logged by the block and treated as [`ActionState::Running`]
    /// — the action is retried next tick.
    fn on_action_update(&mut self, ctx: &mut NodeCtx<'_, H>) -> NodeResult<ActionState>;

    /// Called when the action ends, with the state it ended in.
    ///
    /// `state` is whatever the block recorded: `Success`/`Fail` on natural
    /// completion, or the in-flight state (usually `Running`) when the block
    /// was stopped by an interruption.
    fn on_action_end(&mut self, _state: ActionState, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        Ok(())
    }

    /// Called when the owning brain is paused.
    fn on_pause(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        Ok(())
    }

    /// Called when the owning brain resumes from a pause.
    fn on_resume(&mut self, _ctx: &mut NodeCtx<'_, H>) -> NodeResult<()> {
        Ok(())
    }
}
