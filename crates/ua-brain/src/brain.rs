//! The per-agent orchestrator.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::warn;

use ua_core::{BrainRng, NodeId};
use ua_graph::{Template, TemplateInstance};
use ua_nodes::NodeCtx;

use crate::compile::{self, CompiledDecision};
use crate::score::{self, ScoreEntry};
use crate::BrainResult;

// ── RunningState ──────────────────────────────────────────────────────────────

/// The brain's lifecycle state.
///
/// ```text
/// NotInitialized --start--> Running <--pause/resume--> Paused
/// Running | Paused --stop--> Stopped --restart(=stop+start)--> Running
/// ```
///
/// Tick phases only execute in `Running`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunningState {
    /// Fresh brain; `start` has never succeeded.
    #[default]
    NotInitialized,
    Running,
    Paused,
    /// Ceased; the last template instance is kept for final reads until the
    /// brain is restarted or dropped.
    Stopped,
}

type DecisionHook = Box<dyn FnMut(NodeId) + Send>;

// ── Brain ─────────────────────────────────────────────────────────────────────

/// Drives one agent: owns a live copy of the template, the compiled
/// per-decision blocks, the per-brain RNG, and the currently active decision.
///
/// The tick is three phases in fixed order — observe, decide, act — each
/// independently callable and all guarded by [`RunningState::Running`].
/// Observers refresh before conditions read them; scoring finishes before
/// this tick's chosen actions execute.
pub struct Brain<H> {
    template: Arc<Template<H>>,
    rng:      BrainRng,
    status:   RunningState,

    instance: Option<TemplateInstance<H>>,
    pub(crate) compiled: Vec<CompiledDecision>,
    decision_slots: FxHashMap<NodeId, usize>,

    scores: Vec<ScoreEntry>,
    pub(crate) active: Option<usize>,
    hook: Option<DecisionHook>,
}

impl<H> Brain<H> {
    /// Create a brain over a shared template blueprint.  The brain stays
    /// [`RunningState::NotInitialized`] until [`start`](Brain::start).
    pub fn new(template: Arc<Template<H>>, seed: u64) -> Self {
        Self::with_rng(template, BrainRng::seeded(seed))
    }

    /// Create a brain with a pre-seeded generator (e.g.
    /// [`BrainRng::for_brain`] when a scheduler derives per-agent seeds from
    /// a run-wide one).
    pub fn with_rng(template: Arc<Template<H>>, rng: BrainRng) -> Self {
        Self {
            template,
            rng,
            status:         RunningState::default(),
            instance:       None,
            compiled:       Vec::new(),
            decision_slots: FxHashMap::default(),
            scores:         Vec::new(),
            active:         None,
            hook:           None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Instantiate the template, compile per-decision blocks, fire every
    /// node's `on_start`, and enter [`RunningState::Running`].
    ///
    /// A compilation error (dangling id, kind mismatch) is fatal: the brain
    /// keeps its previous state and refuses to run.
    pub fn start(&mut self, host: &mut H) -> BrainResult<()> {
        let mut instance = self.template.instantiate();
        compile::ensure_placeholder(&mut instance);
        let (compiled, decision_slots) = compile::compile(&instance)?;

        {
            let TemplateInstance { observers, actions, vars, .. } = &mut instance;
            let mut ctx = NodeCtx::new(host, vars);
            for obs in observers.iter_mut() {
                if let Err(e) = obs.on_start(&mut ctx) {
                    warn!(observer = %obs.id, name = %obs.name, error = %e, "observer on_start failed");
                }
            }
            for act in actions.iter_mut() {
                if let Err(e) = act.on_start(&mut ctx) {
                    warn!(action = %act.id, name = %act.name, error = %e, "action on_start failed");
                }
            }
        }

        self.instance = Some(instance);
        self.compiled = compiled;
        self.decision_slots = decision_slots;
        self.scores.clear();
        self.active = None;
        self.status = RunningState::Running;
        Ok(())
    }

    /// Cease running.  The instance is kept for a possible final read; a
    /// later `start` replaces it.
    pub fn stop(&mut self) {
        if self.status != RunningState::NotInitialized {
            self.status = RunningState::Stopped;
        }
    }

    /// `stop` followed by a fresh `start`.
    pub fn restart(&mut self, host: &mut H) -> BrainResult<()> {
        self.stop();
        self.start(host)
    }

    /// Pause the brain.  Node `on_pause` hooks fire; a hook failure is
    /// logged and never blocks the state transition.
    pub fn pause(&mut self, host: &mut H) {
        if self.status != RunningState::Running {
            return;
        }
        if let Some(instance) = self.instance.as_mut() {
            let TemplateInstance { observers, actions, vars, .. } = instance;
            let mut ctx = NodeCtx::new(host, vars);
            for obs in observers.iter_mut() {
                if let Err(e) = obs.on_pause(&mut ctx) {
                    warn!(observer = %obs.id, error = %e, "observer on_pause failed");
                }
            }
            for act in actions.iter_mut() {
                if let Err(e) = act.on_pause(&mut ctx) {
                    warn!(action = %act.id, error = %e, "action on_pause failed");
                }
            }
        }
        self.status = RunningState::Paused;
    }

    /// Resume from a pause.  Node `on_resume` hooks fire; failures are
    /// logged and never block the state transition.
    pub fn resume(&mut self, host: &mut H) {
        if self.status != RunningState::Paused {
            return;
        }
        if let Some(instance) = self.instance.as_mut() {
            let TemplateInstance { observers, actions, vars, .. } = instance;
            let mut ctx = NodeCtx::new(host, vars);
            for obs in observers.iter_mut() {
                if let Err(e) = obs.on_resume(&mut ctx) {
                    warn!(observer = %obs.id, error = %e, "observer on_resume failed");
                }
            }
            for act in actions.iter_mut() {
                if let Err(e) = act.on_resume(&mut ctx) {
                    warn!(action = %act.id, error = %e, "action on_resume failed");
                }
            }
        }
        self.status = RunningState::Running;
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Refresh every enabled observer's cached value.  An observer that
    /// errors keeps its previous value for this tick.
    pub fn observe_step(&mut self, host: &mut H) {
        if self.status != RunningState::Running {
            return;
        }
        let Some(instance) = self.instance.as_mut() else { return };
        let TemplateInstance { observers, vars, .. } = instance;
        let mut ctx = NodeCtx::new(host, vars);
        for obs in observers.iter_mut() {
            if !obs.enabled {
                continue;
            }
            if let Err(e) = obs.refresh(&mut ctx) {
                warn!(observer = %obs.id, name = %obs.name, error = %e, "observer update failed; keeping previous value");
            }
        }
    }

    /// Score all decisions, pick a candidate, and switch the active decision
    /// if the selection transition rule allows it.
    pub fn decide_step(&mut self, host: &mut H) {
        if self.status != RunningState::Running {
            return;
        }
        let Brain { instance, compiled, scores, active, rng, hook, .. } = self;
        let Some(instance) = instance.as_mut() else { return };

        let actions_running =
            matches!(*active, Some(slot) if compiled[slot].actions.is_running());
        score::score_all(compiled, instance, *active, actions_running, scores);
        let candidate = score::pick(scores, rng);

        match *active {
            // Nothing active yet: adopt whatever won.
            None => adopt(compiled, instance, rng, hook, active, candidate, host),

            Some(current) if current != candidate => {
                let running = compiled[current].actions.is_running();
                let interruptible =
                    instance.decisions[compiled[current].decision].interruptible;

                // A running, non-interruptible decision holds its ground; the
                // candidate is simply ignored this tick.
                if !running || interruptible {
                    if running {
                        let TemplateInstance { actions, vars, .. } = instance;
                        compiled[current].actions.stop(actions, host, vars);
                    }
                    adopt(compiled, instance, rng, hook, active, candidate, host);
                }
            }

            // Reselected: the active block simply keeps running.
            _ => {}
        }
    }

    /// Run the active decision's action block one step, if it is running.
    pub fn act_step(&mut self, host: &mut H) {
        if self.status != RunningState::Running {
            return;
        }
        let Brain { instance, compiled, active, .. } = self;
        let Some(instance) = instance.as_mut() else { return };
        let Some(slot) = *active else { return };
        if compiled[slot].actions.is_running() {
            let TemplateInstance { actions, vars, .. } = instance;
            compiled[slot].actions.run(actions, host, vars);
        }
    }

    /// One full tick: observe, decide, act — in that fixed order.
    pub fn tick(&mut self, host: &mut H) {
        self.observe_step(host);
        self.decide_step(host);
        self.act_step(host);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn status(&self) -> RunningState {
        self.status
    }

    /// The most recent score of a decision; 0.0 if the brain does not
    /// recognize the id (or has not scored yet).
    pub fn decision_score(&self, id: NodeId) -> f64 {
        let Some(&slot) = self.decision_slots.get(&id) else { return 0.0 };
        self.scores
            .iter()
            .find(|e| e.slot == slot)
            .map_or(0.0, |e| e.score)
    }

    /// The currently active decision, if any.  The synthetic placeholder
    /// used by empty templates is reported as `None`.
    pub fn active_decision(&self) -> Option<NodeId> {
        let slot = self.active?;
        let instance = self.instance.as_ref()?;
        let id = instance.decisions[self.compiled[slot].decision].id;
        (id != NodeId::INVALID).then_some(id)
    }

    /// Is the active decision's action block currently running?
    pub fn is_acting(&self) -> bool {
        matches!(self.active, Some(slot) if self.compiled[slot].actions.is_running())
    }

    /// The live per-agent template copy, if the brain has ever started.
    /// Remains readable after `stop`.
    pub fn instance(&self) -> Option<&TemplateInstance<H>> {
        self.instance.as_ref()
    }

    pub fn template(&self) -> &Template<H> {
        &self.template
    }

    /// Register a hook fired whenever the active decision changes (with the
    /// newly adopted decision's id).  Debug/visualization aid; not required
    /// for correctness.
    pub fn on_decision_selected(&mut self, hook: impl FnMut(NodeId) + Send + 'static) {
        self.hook = Some(Box::new(hook));
    }
}

// ── Selection transition helper ───────────────────────────────────────────────

/// Adopt `slot` as the active decision: reset and start its action block,
/// then notify the decision hook (placeholder adoptions are not reported).
fn adopt<H>(
    compiled: &mut [CompiledDecision],
    instance: &mut TemplateInstance<H>,
    rng:      &mut BrainRng,
    hook:     &mut Option<DecisionHook>,
    active:   &mut Option<usize>,
    slot:     usize,
    host:     &mut H,
) {
    *active = Some(slot);
    let decision_id = instance.decisions[compiled[slot].decision].id;

    {
        let TemplateInstance { actions, vars, .. } = instance;
        let block = &mut compiled[slot].actions;
        block.reset(actions);
        block.start(rng, actions, host, vars);
    }

    if decision_id != NodeId::INVALID {
        if let Some(hook) = hook.as_mut() {
            hook(decision_id);
        }
    }
}
