//! sentry — smallest end-to-end demo of the rust_ua behavior engine.
//!
//! Two sentries share one template with three decisions:
//!
//! - **patrol** — the low-score default; walks a fixed beat, slowly burning
//!   stamina.
//! - **chase**  — scores high while an intruder is near and the sentry still
//!   has stamina; closes the distance each tick.
//! - **rest**   — non-interruptible recovery once stamina runs low.
//!
//! The world loop below drives the scheduler's regular pulse and moves the
//! intruder around between pulses.  Run with `RUST_LOG=info` (the default
//! here) or `RUST_LOG=debug` to also see scheduler membership events.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use ua_core::{Value, ValueKind};
use ua_graph::{Compare, CompareOp, DecisionSpec, Template, TemplateBuilder};
use ua_nodes::{ActionState, CountdownAction, FnAction, FnObserver, NodeCtx};
use ua_sched::{Phase, Scheduler};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:   u64 = 42;
const PULSES: u32 = 30;

const CHASE_SPEED:    f64 = 4.0;
const CATCH_DISTANCE: f64 = 1.0;
const REST_THRESHOLD: f64 = 20.0;
const FULL_STAMINA:   f64 = 100.0;

// ── Host ──────────────────────────────────────────────────────────────────────

/// The world-side state one brain acts on.
struct Sentry {
    name:              &'static str,
    intruder_distance: f64,
    stamina:           f64,
}

impl Sentry {
    fn new(name: &'static str, intruder_distance: f64) -> Self {
        Self { name, intruder_distance, stamina: FULL_STAMINA }
    }
}

// ── Template ──────────────────────────────────────────────────────────────────

fn sentry_template() -> Result<Template<Sentry>> {
    let mut b = TemplateBuilder::new("sentry");

    let distance = b.observer("intruder-distance", ValueKind::Float, || {
        Box::new(FnObserver::new(|ctx: &mut NodeCtx<'_, Sentry>| {
            Ok(Value::Float(ctx.host.intruder_distance))
        }))
    });
    let stamina = b.observer("stamina", ValueKind::Float, || {
        Box::new(FnObserver::new(|ctx: &mut NodeCtx<'_, Sentry>| {
            Ok(Value::Float(ctx.host.stamina))
        }))
    });

    let near = b.condition(
        "intruder-near",
        Compare::Float { op: CompareOp::LessThan, value: 15.0 },
    );
    let rested = b.condition(
        "rested",
        Compare::Float { op: CompareOp::GreaterThan, value: REST_THRESHOLD },
    );
    let tired = b.condition(
        "tired",
        Compare::Float { op: CompareOp::LessThan, value: REST_THRESHOLD },
    );
    let any = b.condition(
        "any",
        Compare::Float { op: CompareOp::GreaterThan, value: -1.0 },
    );

    // patrol: the fallback — two walk legs, each costing a little stamina.
    let patrol = b.decision("patrol", DecisionSpec::default());
    let walk_out = b.action("walk-out", || Box::new(CountdownAction::new(3)));
    let walk_back = b.action("walk-back", || {
        Box::new(FnAction::new(|ctx: &mut NodeCtx<'_, Sentry>| {
            ctx.host.stamina -= 2.0;
            Ok(ActionState::Success)
        }))
    });
    b.connect_conditional(stamina, any, patrol, 1.0);
    b.connect_simple(patrol, walk_out, 0);
    b.connect_simple(patrol, walk_back, 1);

    // chase: dominant while the intruder is near and stamina holds out.  The
    // focus boost keeps the chase selected over a fresh tie.
    let chase = b.decision(
        "chase",
        DecisionSpec {
            total_score:         5.0,
            focus_when_selected: true,
            focus_boost:         1.0,
            ..Default::default()
        },
    );
    let pursue = b.action("pursue", || {
        Box::new(FnAction::new(|ctx: &mut NodeCtx<'_, Sentry>| {
            ctx.host.intruder_distance = (ctx.host.intruder_distance - CHASE_SPEED).max(0.0);
            ctx.host.stamina -= 8.0;
            Ok(if ctx.host.intruder_distance <= CATCH_DISTANCE {
                ActionState::Success
            } else {
                ActionState::Running
            })
        }))
    });
    b.connect_conditional(distance, near, chase, 0.8);
    b.connect_conditional(stamina, rested, chase, 0.2);
    b.connect_simple(chase, pursue, 0);

    // rest: once started it runs to completion, even mid-chase-opportunity.
    let rest = b.decision(
        "rest",
        DecisionSpec { total_score: 8.0, interruptible: false, ..Default::default() },
    );
    let recover = b.action("recover", || {
        Box::new(FnAction::new(|ctx: &mut NodeCtx<'_, Sentry>| {
            ctx.host.stamina = (ctx.host.stamina + 25.0).min(FULL_STAMINA);
            Ok(if ctx.host.stamina >= FULL_STAMINA {
                ActionState::Success
            } else {
                ActionState::Running
            })
        }))
    });
    b.connect_conditional(stamina, tired, rest, 1.0);
    b.connect_simple(rest, recover, 0);

    Ok(b.build()?)
}

// ── World loop ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let template = Arc::new(sentry_template()?);
    let mut sched = Scheduler::new(SEED);

    let gate = sched.spawn(
        Arc::clone(&template),
        Sentry::new("gate", 40.0),
        Phase::Update,
    );
    let wall = sched.spawn(template, Sentry::new("wall", 12.0), Phase::Update);

    for pulse in 0..PULSES {
        sched.update();

        // The intruder skulks closer to the gate sentry mid-run.
        if pulse == 8 {
            if let Some(host) = sched.host_mut(gate) {
                host.intruder_distance = 10.0;
                info!(pulse, "intruder spotted near the gate");
            }
        }

        for id in [gate, wall] {
            let brain = sched.brain(id).expect("agent spawned above");
            let host = sched.host(id).expect("agent spawned above");
            let active = brain
                .active_decision()
                .and_then(|d| {
                    brain.template().decisions.iter().find(|def| def.id == d)
                })
                .map_or("-", |def| def.name.as_str());
            info!(
                pulse,
                sentry   = host.name,
                active,
                distance = host.intruder_distance,
                stamina  = host.stamina,
                "tick"
            );
        }
    }

    Ok(())
}
