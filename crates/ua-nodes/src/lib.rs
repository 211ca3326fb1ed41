//! `ua-nodes` — the capability contracts that externally-authored gameplay
//! code plugs into.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`observer`] | `Observer<H>` trait — produces a typed [`Value`] each tick    |
//! | [`action`]   | `Action<H>` trait — start/update/end task lifecycle           |
//! | [`state`]    | `ActionState` (`Pending`/`Running`/`Success`/`Fail`)          |
//! | [`ctx`]      | `NodeCtx<H>` (host handle + variables), `Variables`           |
//! | [`adapters`] | `ConstObserver`, `FnObserver`, `FnAction`, `CountdownAction`  |
//! | [`error`]    | `NodeError`, `NodeResult<T>`                                  |
//!
//! # Design notes
//!
//! The engine never inspects node internals: observers and actions are the
//! only points where user code runs, and every callback goes through the same
//! contract.  Callbacks return `NodeResult` instead of panicking — the brain
//! logs an `Err` and carries on, so one bad node never halts the tick for its
//! siblings.
//!
//! The host parameter `H` is whatever the embedding application wants its
//! agents to be (an entity handle, a component bundle, a plain struct).  The
//! engine passes it through untouched.
//!
//! [`Value`]: ua_core::Value

pub mod action;
pub mod adapters;
pub mod ctx;
pub mod error;
pub mod observer;
pub mod state;


pub use action::Action;
pub use adapters::{ConstObserver, CountdownAction, FnAction, FnObserver};
pub use ctx::{NodeCtx, Variables};
pub use error::{NodeError, NodeResult};
pub use observer::Observer;
pub use state::ActionState;
