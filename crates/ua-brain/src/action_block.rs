//! The per-decision action block state machine.
//!
//! A block drives the actions wired to one decision under that decision's
//! run policy.  Actions live in the instance's shared arena and are referred
//! to by slot, so an action wired to several decisions is one piece of state
//! driven by whichever block is active.
//!
//! Callback failures are contained here: an `Err` from `on_action_update` is
//! logged and treated as `Running` (the action is retried next tick);
//! `Err`s from start/end callbacks are logged and the state transition
//! proceeds regardless.

use tracing::warn;

use ua_core::BrainRng;
use ua_graph::{ActionRt, RunPolicy};
use ua_nodes::{ActionState, NodeCtx, Variables};

/// Executes one decision's actions under its run policy.
///
/// Lifecycle: `reset` → `start` → `run` once per tick while running →
/// not-running again on natural completion or `stop`.
pub struct ActionBlock {
    /// Slots into the instance's action arena, in connection-priority order.
    actions: Vec<usize>,
    policy:  RunPolicy,
    /// Position in `actions` of the action currently being driven
    /// (`Sequential` walks it forward; `Random` parks it on the pick).
    cursor:  usize,
    running: bool,
}

impl ActionBlock {
    pub(crate) fn new(actions: Vec<usize>, policy: RunPolicy) -> Self {
        Self { actions, policy, cursor: 0, running: false }
    }

    /// Is the block currently executing its actions?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The action arena slots this block drives, in run order.
    pub(crate) fn action_slots(&self) -> &[usize] {
        &self.actions
    }

    /// Rewind the cursor and return every action to `Pending`.
    ///
    /// Pure state reset — no callbacks fire.
    pub(crate) fn reset<H>(&mut self, arena: &mut [ActionRt<H>]) {
        self.cursor = 0;
        self.running = false;
        for &slot in &self.actions {
            arena[slot].reset_state();
        }
    }

    /// Begin executing under the run policy.  No-op (block stays
    /// not-running) if the action list is empty.
    pub(crate) fn start<H>(
        &mut self,
        rng:   &mut BrainRng,
        arena: &mut [ActionRt<H>],
        host:  &mut H,
        vars:  &mut Variables,
    ) {
        if self.actions.is_empty() {
            self.running = false;
            return;
        }

        self.running = true;
        let mut ctx = NodeCtx::new(host, vars);

        match self.policy {
            RunPolicy::Sequential => {
                self.cursor = 0;
                begin_logged(&mut arena[self.actions[0]], &mut ctx);
            }
            RunPolicy::Random => {
                self.cursor = rng.pick_index(self.actions.len());
                begin_logged(&mut arena[self.actions[self.cursor]], &mut ctx);
            }
            RunPolicy::Concurrent => {
                for &slot in &self.actions {
                    begin_logged(&mut arena[slot], &mut ctx);
                }
            }
        }
    }

    /// Drive one tick of execution.  Called once per tick while running.
    pub(crate) fn run<H>(&mut self, arena: &mut [ActionRt<H>], host: &mut H, vars: &mut Variables) {
        if self.actions.is_empty() {
            self.running = false;
            return;
        }

        let mut ctx = NodeCtx::new(host, vars);

        match self.policy {
            RunPolicy::Sequential => {
                let slot = self.actions[self.cursor];
                match update_logged(&mut arena[slot], &mut ctx) {
                    ActionState::Success => {
                        end_logged(&mut arena[slot], ActionState::Success, &mut ctx);
                        self.cursor += 1;
                        if self.cursor < self.actions.len() {
                            begin_logged(&mut arena[self.actions[self.cursor]], &mut ctx);
                        } else {
                            self.running = false;
                        }
                    }
                    ActionState::Fail => {
                        // A sequential failure aborts the remaining actions.
                        end_logged(&mut arena[slot], ActionState::Fail, &mut ctx);
                        self.running = false;
                    }
                    _ => {}
                }
            }

            RunPolicy::Random => {
                let slot = self.actions[self.cursor];
                let state = update_logged(&mut arena[slot], &mut ctx);
                if state != ActionState::Running {
                    end_logged(&mut arena[slot], state, &mut ctx);
                    self.running = false;
                }
            }

            RunPolicy::Concurrent => {
                for &slot in &self.actions {
                    if arena[slot].state != ActionState::Running {
                        continue;
                    }
                    match update_logged(&mut arena[slot], &mut ctx) {
                        ActionState::Success => {
                            // Ends this action only; siblings keep running.
                            end_logged(&mut arena[slot], ActionState::Success, &mut ctx);
                        }
                        ActionState::Fail => {
                            // Marks the whole block not-running, but siblings
                            // still Running are not forcibly ended — the block
                            // simply stops driving them next tick.
                            end_logged(&mut arena[slot], ActionState::Fail, &mut ctx);
                            self.running = false;
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    /// Stop executing, ending actions with whatever state they are in.
    pub(crate) fn stop<H>(&mut self, arena: &mut [ActionRt<H>], host: &mut H, vars: &mut Variables) {
        self.running = false;
        if self.actions.is_empty() {
            return;
        }

        let mut ctx = NodeCtx::new(host, vars);
        if self.policy == RunPolicy::Concurrent {
            for &slot in &self.actions {
                let state = arena[slot].state;
                end_logged(&mut arena[slot], state, &mut ctx);
            }
        } else {
            let slot = self.actions[self.cursor];
            let state = arena[slot].state;
            end_logged(&mut arena[slot], state, &mut ctx);
        }
    }
}

// ── Logged callback wrappers ──────────────────────────────────────────────────

fn begin_logged<H>(action: &mut ActionRt<H>, ctx: &mut NodeCtx<'_, H>) {
    if let Err(e) = action.begin(ctx) {
        warn!(action = %action.id, name = %action.name, error = %e, "action start callback failed");
    }
}

fn update_logged<H>(action: &mut ActionRt<H>, ctx: &mut NodeCtx<'_, H>) -> ActionState {
    match action.update(ctx) {
        Ok(state) => state,
        Err(e) => {
            warn!(action = %action.id, name = %action.name, error = %e, "action update failed; treating as still running");
            ActionState::Running
        }
    }
}

fn end_logged<H>(action: &mut ActionRt<H>, state: ActionState, ctx: &mut NodeCtx<'_, H>) {
    if let Err(e) = action.end(state, ctx) {
        warn!(action = %action.id, name = %action.name, error = %e, "action end callback failed");
    }
}
