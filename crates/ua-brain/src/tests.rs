use std::sync::{Arc, Mutex};

use ua_core::{BrainRng, NodeId, Value, ValueKind};
use ua_graph::{Compare, CompareOp, DecisionSpec, RunPolicy, Template, TemplateBuilder};
use ua_nodes::{ActionState, ConstObserver, CountdownAction, FnAction, FnObserver, NodeCtx};

use crate::compile;
use crate::score::{self, ScoreEntry};
use crate::{Brain, RunningState};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Host {
    threat: f64,
}

fn brain_over(template: Template<Host>, seed: u64) -> Brain<Host> {
    Brain::new(Arc::new(template), seed)
}

/// Observer that reads `host.threat`.
fn threat_observer(b: &mut TemplateBuilder<Host>) -> NodeId {
    b.observer("threat", ValueKind::Float, || {
        Box::new(FnObserver::new(|ctx: &mut NodeCtx<'_, Host>| {
            Ok(Value::Float(ctx.host.threat))
        }))
    })
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[test]
fn score_is_weighted_condition_sum_times_total_score() {
    // Two passing conditions with weights 0.5 and 0.25 sum to 0.75; a
    // total_score of 2.0 scales that to 1.5.
    let mut b = TemplateBuilder::<Host>::new("t");
    let o = b.observer("o", ValueKind::Float, || Box::new(ConstObserver::new(5.0)));
    let c1 = b.condition("gt0", Compare::Float { op: CompareOp::GreaterThan, value: 0.0 });
    let c2 = b.condition("lt10", Compare::Float { op: CompareOp::LessThan, value: 10.0 });
    let d = b.decision("d", DecisionSpec { total_score: 2.0, ..Default::default() });
    b.connect_conditional(o, c1, d, 0.5);
    b.connect_conditional(o, c2, d, 0.25);

    let mut brain = brain_over(b.build().unwrap(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();
    brain.tick(&mut host);

    assert_eq!(brain.decision_score(d), 1.5);
    assert_eq!(brain.active_decision(), Some(d));
}

#[test]
fn disabled_decision_scores_zero_and_loses() {
    let mut b = TemplateBuilder::<Host>::new("t");
    let o = b.observer("o", ValueKind::Bool, || Box::new(ConstObserver::new(true)));
    let c = b.condition("is-true", Compare::Bool { expect: true });
    let strong = b.decision("strong", DecisionSpec { total_score: 10.0, ..Default::default() });
    let weak = b.decision("weak", DecisionSpec::default());
    b.connect_conditional(o, c, strong, 1.0);
    b.connect_conditional(o, c, weak, 0.5);
    b.set_enabled(strong, false);

    let mut brain = brain_over(b.build().unwrap(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();
    brain.tick(&mut host);

    assert_eq!(brain.decision_score(strong), 0.0);
    assert_eq!(brain.decision_score(weak), 0.5);
    assert_eq!(brain.active_decision(), Some(weak));
}

#[test]
fn unknown_decision_scores_zero() {
    let b = TemplateBuilder::<Host>::new("t");
    let mut brain = brain_over(b.build().unwrap(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();
    brain.tick(&mut host);
    assert_eq!(brain.decision_score(NodeId(999)), 0.0);
}

#[test]
fn tie_break_is_uniform_over_top_group() {
    // Scores [1, 1, 3, 3, 3]: the winner must always come from the three
    // maximal entries, and across seeds each of them must win at least once.
    let mut seen = [false; 5];
    for seed in 0..64 {
        let mut entries: Vec<ScoreEntry> = [1.0, 1.0, 3.0, 3.0, 3.0]
            .iter()
            .enumerate()
            .map(|(slot, &score)| ScoreEntry { slot, score })
            .collect();
        let mut rng = BrainRng::seeded(seed);
        let winner = score::pick(&mut entries, &mut rng);
        assert!(winner >= 2, "winner {winner} outside the top group");
        seen[winner] = true;
    }
    assert!(seen[2] && seen[3] && seen[4], "tie-break never reached some top entry");
}

#[test]
fn focus_boost_applies_while_selected_and_acting() {
    let mut b = TemplateBuilder::<Host>::new("t");
    let o = b.observer("o", ValueKind::Bool, || Box::new(ConstObserver::new(true)));
    let c = b.condition("is-true", Compare::Bool { expect: true });
    let d = b.decision(
        "d",
        DecisionSpec { focus_when_selected: true, focus_boost: 2.0, ..Default::default() },
    );
    let a = b.action("work", || Box::new(CountdownAction::new(5)));
    b.connect_conditional(o, c, d, 1.0);
    b.connect_simple(d, a, 0);

    let mut brain = brain_over(b.build().unwrap(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();

    // First tick scores before anything runs: no boost yet.
    brain.tick(&mut host);
    assert_eq!(brain.decision_score(d), 1.0);

    // Second tick: the block is running and the decision holds focus.
    brain.tick(&mut host);
    assert_eq!(brain.decision_score(d), 3.0);
}

// ── Selection transitions ─────────────────────────────────────────────────────

/// Two-decision template: `patrol` always scores 1; `attack` scores 5 once
/// `host.threat` exceeds 10.
fn patrol_attack(spec: DecisionSpec, attack_ticks: u32) -> (Template<Host>, NodeId, NodeId) {
    let mut b = TemplateBuilder::<Host>::new("t");
    let o = threat_observer(&mut b);
    let always = b.condition("always", Compare::Float { op: CompareOp::GreaterThan, value: -1.0 });
    let high = b.condition("high", Compare::Float { op: CompareOp::GreaterThan, value: 10.0 });
    let patrol = b.decision("patrol", spec);
    let attack = b.decision("attack", DecisionSpec { total_score: 5.0, ..Default::default() });
    let walk = b.action("walk", move || Box::new(CountdownAction::new(attack_ticks)));
    b.connect_conditional(o, always, patrol, 1.0);
    b.connect_conditional(o, high, attack, 1.0);
    b.connect_simple(patrol, walk, 0);
    (b.build().unwrap(), patrol, attack)
}

#[test]
fn non_interruptible_decision_holds_until_block_finishes() {
    let spec = DecisionSpec { interruptible: false, ..Default::default() };
    let (t, patrol, attack) = patrol_attack(spec, 3);
    let mut brain = brain_over(t, 7);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();

    brain.tick(&mut host);
    assert_eq!(brain.active_decision(), Some(patrol));

    // A stronger candidate appears, but the running block may not be cut.
    host.threat = 20.0;
    brain.tick(&mut host);
    assert_eq!(brain.active_decision(), Some(patrol));
    brain.tick(&mut host);
    assert_eq!(brain.active_decision(), Some(patrol));
    assert!(!brain.is_acting(), "countdown should have finished");

    // With the block done, the next decide phase is free to switch.
    brain.tick(&mut host);
    assert_eq!(brain.active_decision(), Some(attack));
}

#[test]
fn interruptible_decision_yields_immediately() {
    let (t, patrol, attack) = patrol_attack(DecisionSpec::default(), 10);
    let mut brain = brain_over(t, 7);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();

    brain.tick(&mut host);
    assert_eq!(brain.active_decision(), Some(patrol));
    assert!(brain.is_acting());

    host.threat = 20.0;
    brain.tick(&mut host);
    assert_eq!(brain.active_decision(), Some(attack));
    // The interrupted action was ended mid-run, not left running.
    let walk = &brain.instance().unwrap().actions[0];
    assert_eq!(walk.state, ActionState::Running); // ended with its last state
    assert!(!brain.compiled[0].actions.is_running());
}

#[test]
fn decision_hook_reports_adoptions() {
    let (t, patrol, attack) = patrol_attack(DecisionSpec::default(), 10);
    let mut brain = brain_over(t, 7);
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    brain.on_decision_selected(move |id| sink.lock().unwrap().push(id));

    let mut host = Host::default();
    brain.start(&mut host).unwrap();
    brain.tick(&mut host);
    host.threat = 20.0;
    brain.tick(&mut host);
    brain.tick(&mut host); // reselection, no new adoption

    assert_eq!(*log.lock().unwrap(), vec![patrol, attack]);
}

// ── Run policies ──────────────────────────────────────────────────────────────

/// Single always-on decision wired to the given actions under `policy`.
fn single_decision(policy: RunPolicy, b: &mut TemplateBuilder<Host>, actions: &[NodeId]) {
    let o = b.observer("on", ValueKind::Bool, || Box::new(ConstObserver::new(true)));
    let c = b.condition("is-true", Compare::Bool { expect: true });
    let d = b.decision("d", DecisionSpec { policy, ..Default::default() });
    b.connect_conditional(o, c, d, 1.0);
    for (i, &a) in actions.iter().enumerate() {
        b.connect_simple(d, a, i as i32);
    }
}

#[test]
fn sequential_block_advances_on_success_and_aborts_on_fail() {
    let mut b = TemplateBuilder::<Host>::new("t");
    let first = b.action("first", || Box::new(CountdownAction::new(1)));
    let second = b.action("second", || {
        Box::new(FnAction::new(|_ctx: &mut NodeCtx<'_, Host>| Ok(ActionState::Fail)))
    });
    let third = b.action("third", || Box::new(CountdownAction::new(1)));
    single_decision(RunPolicy::Sequential, &mut b, &[first, second, third]);

    let mut brain = brain_over(b.build().unwrap(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();

    // Tick 1: first succeeds, second begins.
    brain.tick(&mut host);
    let inst = brain.instance().unwrap();
    assert_eq!(inst.actions[0].state, ActionState::Success);
    assert_eq!(inst.actions[1].state, ActionState::Running);
    assert!(brain.is_acting());

    // Tick 2: second fails, the remainder is abandoned.  Reselecting the
    // same decision afterwards never restarts the block.
    brain.tick(&mut host);
    let inst = brain.instance().unwrap();
    assert_eq!(inst.actions[0].state, ActionState::Success);
    assert_eq!(inst.actions[1].state, ActionState::Fail);
    assert_eq!(inst.actions[2].state, ActionState::Pending);
    assert!(!brain.is_acting());

    brain.tick(&mut host);
    assert!(!brain.is_acting());
}

#[test]
fn sequential_fail_leaves_block_not_running() {
    let mut b = TemplateBuilder::<Host>::new("t");
    let bad = b.action("bad", || {
        Box::new(FnAction::new(|_ctx: &mut NodeCtx<'_, Host>| Ok(ActionState::Fail)))
    });
    let after = b.action("after", || Box::new(CountdownAction::new(1)));
    single_decision(RunPolicy::Sequential, &mut b, &[bad, after]);

    let mut brain = brain_over(b.build().unwrap(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();

    brain.observe_step(&mut host);
    brain.decide_step(&mut host);
    brain.act_step(&mut host);

    let inst = brain.instance().unwrap();
    assert_eq!(inst.actions[0].state, ActionState::Fail);
    // The failure aborted the walk before the second action ever began.
    assert_eq!(inst.actions[1].state, ActionState::Pending);
    assert!(!brain.is_acting());
}

#[test]
fn random_block_runs_exactly_one_action() {
    let mut b = TemplateBuilder::<Host>::new("t");
    let a1 = b.action("a1", || Box::new(CountdownAction::new(1)));
    let a2 = b.action("a2", || Box::new(CountdownAction::new(1)));
    let a3 = b.action("a3", || Box::new(CountdownAction::new(1)));
    single_decision(RunPolicy::Random, &mut b, &[a1, a2, a3]);

    let mut brain = brain_over(b.build().unwrap(), 42);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();
    brain.tick(&mut host);

    let inst = brain.instance().unwrap();
    let done = inst.actions.iter().filter(|a| a.state == ActionState::Success).count();
    let untouched = inst.actions.iter().filter(|a| a.state == ActionState::Pending).count();
    assert_eq!(done, 1);
    assert_eq!(untouched, 2);
    assert!(!brain.is_acting());
}

#[test]
fn concurrent_fail_stops_block_without_force_ending_siblings() {
    let mut b = TemplateBuilder::<Host>::new("t");
    let bad = b.action("bad", || {
        Box::new(FnAction::new(|_ctx: &mut NodeCtx<'_, Host>| Ok(ActionState::Fail)))
    });
    let slow = b.action("slow", || Box::new(CountdownAction::new(5)));
    single_decision(RunPolicy::Concurrent, &mut b, &[bad, slow]);

    let mut brain = brain_over(b.build().unwrap(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();

    brain.observe_step(&mut host);
    brain.decide_step(&mut host);
    brain.act_step(&mut host);

    let inst = brain.instance().unwrap();
    assert_eq!(inst.actions[0].state, ActionState::Fail);
    // The sibling is still mid-run; the block just stops driving it.
    assert_eq!(inst.actions[1].state, ActionState::Running);
    assert!(!brain.is_acting());
}

#[test]
fn block_reset_returns_every_action_to_pending() {
    let mut b = TemplateBuilder::<Host>::new("t");
    let a1 = b.action("a1", || Box::new(CountdownAction::new(1)));
    let a2 = b.action("a2", || Box::new(CountdownAction::new(5)));
    single_decision(RunPolicy::Sequential, &mut b, &[a1, a2]);
    let t = b.build().unwrap();

    let mut inst = t.instantiate();
    let (mut compiled, _) = compile::compile(&inst).unwrap();
    let block = &mut compiled[0].actions;
    let mut rng = BrainRng::seeded(3);
    let mut host = Host::default();

    // Run past the first action, then reset mid-flight.
    block.start(&mut rng, &mut inst.actions, &mut host, &mut inst.vars);
    block.run(&mut inst.actions, &mut host, &mut inst.vars);
    assert_eq!(inst.actions[0].state, ActionState::Success);
    assert_eq!(inst.actions[1].state, ActionState::Running);

    block.reset(&mut inst.actions);
    assert!(!block.is_running());
    assert!(inst.actions.iter().all(|a| a.state == ActionState::Pending));

    // A fresh start begins again from the front.
    block.start(&mut rng, &mut inst.actions, &mut host, &mut inst.vars);
    assert_eq!(inst.actions[0].state, ActionState::Running);
    assert_eq!(inst.actions[1].state, ActionState::Pending);
}

#[test]
fn four_tick_sequential_walkthrough() {
    // One observer (5.0), one GreaterThan-3 condition, one sequential
    // decision with two actions.  Each action spends one full tick Running
    // per pre-success update; the adoption tick's act phase already updates
    // the first action, while the second begins mid-run and gets its first
    // update the following tick.
    let mut b = TemplateBuilder::<Host>::new("t");
    let o = b.observer("o", ValueKind::Float, || Box::new(ConstObserver::new(5.0)));
    let c = b.condition("gt3", Compare::Float { op: CompareOp::GreaterThan, value: 3.0 });
    let d = b.decision("d", DecisionSpec::default());
    let quick = b.action("quick", || Box::new(CountdownAction::new(2)));
    let slow = b.action("slow", || Box::new(CountdownAction::new(2)));
    b.connect_conditional(o, c, d, 1.0);
    b.connect_simple(d, quick, 0);
    b.connect_simple(d, slow, 1);

    let mut brain = brain_over(b.build().unwrap(), 5);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();

    // Tick 1: decision selected, quick started and still running.
    brain.tick(&mut host);
    assert_eq!(brain.active_decision(), Some(d));
    assert_eq!(brain.decision_score(d), 1.0);
    let inst = brain.instance().unwrap();
    assert_eq!(inst.actions[0].state, ActionState::Running);
    assert_eq!(inst.actions[1].state, ActionState::Pending);

    // Tick 2: quick completes, slow starts.
    brain.tick(&mut host);
    let inst = brain.instance().unwrap();
    assert_eq!(inst.actions[0].state, ActionState::Success);
    assert_eq!(inst.actions[1].state, ActionState::Running);

    // Tick 3: slow still running.
    brain.tick(&mut host);
    assert_eq!(brain.instance().unwrap().actions[1].state, ActionState::Running);
    assert!(brain.is_acting());

    // Tick 4: slow completes, block not-running; reselecting the same
    // decision leaves the finished block alone.
    brain.tick(&mut host);
    assert_eq!(brain.active_decision(), Some(d));
    assert_eq!(brain.instance().unwrap().actions[1].state, ActionState::Success);
    assert!(!brain.is_acting());
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Observer counting its own calls; lets tests see whether a tick ran.
fn counting_template() -> Template<Host> {
    let mut b = TemplateBuilder::<Host>::new("t");
    b.observer("counter", ValueKind::Int, || {
        let mut count = 0i64;
        Box::new(FnObserver::new(move |_ctx: &mut NodeCtx<'_, Host>| {
            count += 1;
            Ok(Value::Int(count))
        }))
    });
    b.build().unwrap()
}

#[test]
fn ticks_are_gated_by_running_state() {
    let mut brain = brain_over(counting_template(), 1);
    let mut host = Host::default();

    assert_eq!(brain.status(), RunningState::NotInitialized);
    brain.tick(&mut host); // no-op before start
    assert!(brain.instance().is_none());

    brain.start(&mut host).unwrap();
    assert_eq!(brain.status(), RunningState::Running);
    brain.tick(&mut host);
    assert_eq!(brain.instance().unwrap().observers[0].value, Value::Int(1));

    brain.pause(&mut host);
    assert_eq!(brain.status(), RunningState::Paused);
    brain.tick(&mut host); // gated
    assert_eq!(brain.instance().unwrap().observers[0].value, Value::Int(1));

    brain.resume(&mut host);
    brain.tick(&mut host);
    assert_eq!(brain.instance().unwrap().observers[0].value, Value::Int(2));

    brain.stop();
    assert_eq!(brain.status(), RunningState::Stopped);
    brain.tick(&mut host); // gated
    // Stopped brains keep the instance readable.
    assert_eq!(brain.instance().unwrap().observers[0].value, Value::Int(2));
}

#[test]
fn resume_only_applies_to_paused_brains() {
    let mut brain = brain_over(counting_template(), 1);
    let mut host = Host::default();
    brain.resume(&mut host);
    assert_eq!(brain.status(), RunningState::NotInitialized);
    brain.start(&mut host).unwrap();
    brain.stop();
    brain.resume(&mut host);
    assert_eq!(brain.status(), RunningState::Stopped);
}

#[test]
fn restart_builds_a_fresh_instance() {
    let mut brain = brain_over(counting_template(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();
    brain.tick(&mut host);
    brain.tick(&mut host);
    assert_eq!(brain.instance().unwrap().observers[0].value, Value::Int(2));

    brain.restart(&mut host).unwrap();
    assert_eq!(brain.status(), RunningState::Running);
    brain.tick(&mut host);
    // A new spawn of the counter starts from scratch.
    assert_eq!(brain.instance().unwrap().observers[0].value, Value::Int(1));
}

#[test]
fn empty_template_runs_on_the_placeholder() {
    let t = TemplateBuilder::<Host>::new("empty").build().unwrap();
    let mut brain = brain_over(t, 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();
    brain.tick(&mut host);

    assert_eq!(brain.status(), RunningState::Running);
    assert_eq!(brain.active_decision(), None);
    assert!(!brain.is_acting());
    assert_eq!(brain.compiled.len(), 1);
}

// ── Error isolation ───────────────────────────────────────────────────────────

#[test]
fn failing_observer_keeps_its_previous_value() {
    let mut b = TemplateBuilder::<Host>::new("t");
    b.observer("flaky", ValueKind::Int, || {
        let mut calls = 0;
        Box::new(FnObserver::new(move |_ctx: &mut NodeCtx<'_, Host>| {
            calls += 1;
            if calls == 1 { Ok(Value::Int(7)) } else { Err("sensor offline".into()) }
        }))
    });
    let mut brain = brain_over(b.build().unwrap(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();

    brain.tick(&mut host);
    assert_eq!(brain.instance().unwrap().observers[0].value, Value::Int(7));
    brain.tick(&mut host);
    assert_eq!(brain.instance().unwrap().observers[0].value, Value::Int(7));
}

#[test]
fn failing_action_update_is_treated_as_running() {
    let mut b = TemplateBuilder::<Host>::new("t");
    let a = b.action("flaky", || {
        Box::new(FnAction::new(|_ctx: &mut NodeCtx<'_, Host>| Err("motor stalled".into())))
    });
    single_decision(RunPolicy::Sequential, &mut b, &[a]);

    let mut brain = brain_over(b.build().unwrap(), 1);
    let mut host = Host::default();
    brain.start(&mut host).unwrap();
    brain.tick(&mut host);
    brain.tick(&mut host);

    // Still being retried, never marked done.
    assert!(brain.is_acting());
    assert_eq!(brain.instance().unwrap().actions[0].state, ActionState::Running);
}

// ── Compilation ───────────────────────────────────────────────────────────────

#[test]
fn compile_orders_actions_by_priority_then_authoring() {
    let mut b = TemplateBuilder::<Host>::new("t");
    let d = b.decision("d", DecisionSpec::default());
    let late = b.action("late", || Box::new(CountdownAction::new(1)));
    let tie_a = b.action("tie-a", || Box::new(CountdownAction::new(1)));
    let tie_b = b.action("tie-b", || Box::new(CountdownAction::new(1)));
    b.connect_simple(d, late, 5);
    b.connect_simple(d, tie_a, 1);
    b.connect_simple(d, tie_b, 1);
    let t = b.build().unwrap();

    let inst = t.instantiate();
    let (compiled, slots) = compile::compile(&inst).unwrap();
    assert_eq!(slots.len(), 1);

    let order: Vec<NodeId> = compiled[0]
        .actions
        .action_slots()
        .iter()
        .map(|&s| inst.actions[s].id)
        .collect();
    assert_eq!(order, vec![tie_a, tie_b, late]);
}

#[test]
fn compile_is_deterministic_across_runs() {
    let (t, _, _) = patrol_attack(DecisionSpec::default(), 3);
    let inst = t.instantiate();
    let (first, _) = compile::compile(&inst).unwrap();
    let (second, _) = compile::compile(&inst).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.decision, b.decision);
        assert_eq!(a.blocks, b.blocks);
        assert_eq!(a.actions.action_slots(), b.actions.action_slots());
    }
}
