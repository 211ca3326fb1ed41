//! Batch scheduler: phase membership lists and pulse fan-out.
//!
//! The scheduler owns every agent (brain + host pair) and two membership
//! lists, one per automatic execution phase.  A host application calls
//! [`Scheduler::update`] from its regular frame pulse and
//! [`Scheduler::fixed_update`] from its fixed-rate pulse; each call ticks
//! exactly the brains registered for that phase, strictly sequentially.
//!
//! Membership changes (pause, stop, phase moves) edit the lists immediately,
//! so they take effect on the next pulse: a pulse already iterating is never
//! re-entered, since all mutation happens between pulses on the single
//! update thread.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, error};

use ua_brain::{Brain, RunningState};
use ua_core::{BrainId, BrainRng};
use ua_graph::Template;

use crate::{SchedError, SchedResult};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Which pulse drives an agent's brain.  An agent belongs to exactly one
/// phase at a time.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Ticked from the regular frame pulse ([`Scheduler::update`]).
    #[default]
    Update,
    /// Ticked from the fixed-rate pulse ([`Scheduler::fixed_update`]).
    Fixed,
    /// Never ticked automatically; the application calls
    /// [`Scheduler::tick`] itself.
    Manual,
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

struct Agent<H> {
    brain: Brain<H>,
    host:  H,
    phase: Phase,
}

/// Owns a population of agents and fans host update pulses out to them.
///
/// Construct one explicitly and pass it where it is needed; nothing here is
/// global. Per-brain RNG seeds derive from the scheduler's run-wide seed, so
/// a whole population replays deterministically from one number.
pub struct Scheduler<H> {
    seed:        u64,
    next_id:     u32,
    agents:      FxHashMap<BrainId, Agent<H>>,
    update_list: Vec<BrainId>,
    fixed_list:  Vec<BrainId>,
}

impl<H> Scheduler<H> {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            next_id:     1,
            agents:      FxHashMap::default(),
            update_list: Vec::new(),
            fixed_list:  Vec::new(),
        }
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Create an agent: build a brain over `template`, start it against
    /// `host`, and register it for `phase`.
    ///
    /// A start failure (template compilation error) is logged; the agent is
    /// still retained — its brain stays non-functional and unscheduled until
    /// a later [`start`](Scheduler::start) succeeds.
    pub fn spawn(&mut self, template: Arc<Template<H>>, host: H, phase: Phase) -> BrainId {
        let id = BrainId(self.next_id);
        self.next_id += 1;

        let mut agent = Agent {
            brain: Brain::with_rng(template, BrainRng::for_brain(self.seed, id)),
            host,
            phase,
        };
        match agent.brain.start(&mut agent.host) {
            Ok(()) => {
                debug!(brain = %id, ?phase, "agent spawned");
                self.agents.insert(id, agent);
                self.schedule(id);
            }
            Err(e) => {
                error!(brain = %id, error = %e, "brain failed to start; agent left unscheduled");
                self.agents.insert(id, agent);
            }
        }
        id
    }

    /// Remove an agent entirely, returning its host.  The brain is stopped
    /// first so a re-read of its instance is impossible afterwards.
    pub fn despawn(&mut self, id: BrainId) -> Option<H> {
        self.unschedule(id);
        self.agents.remove(&id).map(|mut agent| {
            agent.brain.stop();
            agent.host
        })
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Ids of every agent, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = BrainId> + '_ {
        self.agents.keys().copied()
    }

    // ── Pulses ────────────────────────────────────────────────────────────

    /// Tick every agent registered for [`Phase::Update`].
    pub fn update(&mut self) {
        for i in 0..self.update_list.len() {
            let id = self.update_list[i];
            if let Some(agent) = self.agents.get_mut(&id) {
                agent.brain.tick(&mut agent.host);
            }
        }
    }

    /// Tick every agent registered for [`Phase::Fixed`].
    pub fn fixed_update(&mut self) {
        for i in 0..self.fixed_list.len() {
            let id = self.fixed_list[i];
            if let Some(agent) = self.agents.get_mut(&id) {
                agent.brain.tick(&mut agent.host);
            }
        }
    }

    /// Tick one agent directly, regardless of its phase.  This is how
    /// [`Phase::Manual`] agents advance.
    pub fn tick(&mut self, id: BrainId) -> SchedResult<()> {
        let agent = self.agents.get_mut(&id).ok_or(SchedError::UnknownBrain(id))?;
        agent.brain.tick(&mut agent.host);
        Ok(())
    }

    // ── Lifecycle control ─────────────────────────────────────────────────

    /// (Re)start an agent's brain and register it for its phase.
    pub fn start(&mut self, id: BrainId) -> SchedResult<()> {
        let agent = self.agents.get_mut(&id).ok_or(SchedError::UnknownBrain(id))?;
        agent.brain.start(&mut agent.host)?;
        self.schedule(id);
        Ok(())
    }

    /// Stop an agent's brain and drop it from the pulse lists.  Its state
    /// stays readable until despawn or restart.
    pub fn stop(&mut self, id: BrainId) -> SchedResult<()> {
        let agent = self.agents.get_mut(&id).ok_or(SchedError::UnknownBrain(id))?;
        agent.brain.stop();
        self.unschedule(id);
        Ok(())
    }

    /// Stop-then-start.
    pub fn restart(&mut self, id: BrainId) -> SchedResult<()> {
        self.stop(id)?;
        self.start(id)
    }

    /// Pause an agent: node pause hooks fire and the agent leaves its pulse
    /// list until resumed.
    pub fn pause(&mut self, id: BrainId) -> SchedResult<()> {
        let agent = self.agents.get_mut(&id).ok_or(SchedError::UnknownBrain(id))?;
        agent.brain.pause(&mut agent.host);
        self.unschedule(id);
        Ok(())
    }

    /// Resume a paused agent and re-register it for its phase.
    pub fn resume(&mut self, id: BrainId) -> SchedResult<()> {
        let agent = self.agents.get_mut(&id).ok_or(SchedError::UnknownBrain(id))?;
        agent.brain.resume(&mut agent.host);
        if agent.brain.status() == RunningState::Running {
            self.schedule(id);
        }
        Ok(())
    }

    /// Move an agent to a different phase.  Takes effect on the next pulse.
    pub fn set_phase(&mut self, id: BrainId, phase: Phase) -> SchedResult<()> {
        let agent = self.agents.get_mut(&id).ok_or(SchedError::UnknownBrain(id))?;
        agent.phase = phase;
        let running = agent.brain.status() == RunningState::Running;
        self.unschedule(id);
        if running {
            self.schedule(id);
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn brain(&self, id: BrainId) -> Option<&Brain<H>> {
        self.agents.get(&id).map(|a| &a.brain)
    }

    pub fn brain_mut(&mut self, id: BrainId) -> Option<&mut Brain<H>> {
        self.agents.get_mut(&id).map(|a| &mut a.brain)
    }

    pub fn host(&self, id: BrainId) -> Option<&H> {
        self.agents.get(&id).map(|a| &a.host)
    }

    pub fn host_mut(&mut self, id: BrainId) -> Option<&mut H> {
        self.agents.get_mut(&id).map(|a| &mut a.host)
    }

    pub fn phase(&self, id: BrainId) -> Option<Phase> {
        self.agents.get(&id).map(|a| a.phase)
    }

    /// Is the agent currently on a pulse list?
    pub fn is_scheduled(&self, id: BrainId) -> bool {
        self.update_list.contains(&id) || self.fixed_list.contains(&id)
    }

    // ── List maintenance ──────────────────────────────────────────────────

    /// Unregister-then-register, so an agent appears in at most one list
    /// exactly once, matching its configured phase.  Idempotent.
    fn schedule(&mut self, id: BrainId) {
        self.unschedule(id);
        let Some(agent) = self.agents.get(&id) else { return };
        match agent.phase {
            Phase::Update => self.update_list.push(id),
            Phase::Fixed => self.fixed_list.push(id),
            Phase::Manual => {}
        }
    }

    /// Drop the agent from both lists.  Idempotent.
    fn unschedule(&mut self, id: BrainId) {
        self.update_list.retain(|&x| x != id);
        self.fixed_list.retain(|&x| x != id);
    }
}
