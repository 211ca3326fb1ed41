//! `ua-core` — foundational types for the `rust_ua` utility-AI behavior engine.
//!
//! This crate is a dependency of every other `ua-*` crate.  It intentionally
//! has no `ua-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                      |
//! |-----------|-----------------------------------------------|
//! | [`ids`]   | `NodeId`, `BrainId`                           |
//! | [`value`] | `Value` (tagged observation value), `ValueKind` |
//! | [`rng`]   | `BrainRng` (per-brain deterministic RNG)      |
//! | [`error`] | `UaError`, `UaResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod value;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{UaError, UaResult};
pub use ids::{BrainId, NodeId};
pub use rng::BrainRng;
pub use value::{Value, ValueKind};
