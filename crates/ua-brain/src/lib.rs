//! `ua-brain` — the per-agent runtime: scoring, selection, and action
//! execution.
//!
//! # Three-phase tick
//!
//! ```text
//! tick:
//!   ① Observe — refresh every enabled observer's cached value.
//!   ② Decide  — score every decision from its compiled condition blocks,
//!               pick a winner (uniform random among the top-scoring group),
//!               and switch the active decision if allowed.
//!   ③ Act     — run the active decision's action block one step.
//! ```
//!
//! The phases are independently callable but always guarded by
//! [`RunningState::Running`]; observers must refresh before conditions read
//! them, and scoring must finish before this tick's chosen actions execute.
//!
//! # Crate layout
//!
//! | Module           | Contents                                            |
//! |------------------|-----------------------------------------------------|
//! | [`compile`]      | Per-decision compiled condition/action blocks       |
//! | [`score`]        | Scoring formula and tie-break selection             |
//! | [`action_block`] | `ActionBlock` — run-policy state machine            |
//! | [`brain`]        | `Brain<H>` orchestrator, `RunningState`             |
//! | [`error`]        | `BrainError`, `BrainResult<T>`                      |

pub mod action_block;
pub mod brain;
pub mod compile;
pub mod error;
pub mod score;

#[cfg(test)]
mod tests;

pub use action_block::ActionBlock;
pub use brain::{Brain, RunningState};
pub use error::{BrainError, BrainResult};
