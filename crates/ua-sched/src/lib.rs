//! `ua-sched` — the batch scheduler driving many brains from host pulses.
//!
//! # Pulse model
//!
//! Two independent pulses exist: the regular frame pulse and a fixed-rate
//! pulse.  Each agent belongs to exactly one [`Phase`] at a time; per pulse,
//! the scheduler walks the matching membership list and runs each brain's
//! combined tick, strictly sequentially.  [`Phase::Manual`] agents are only
//! ticked when the application asks for them by id.
//!
//! ```rust,ignore
//! let mut sched = Scheduler::new(42);
//! let guard = sched.spawn(Arc::clone(&template), Guard::new(), Phase::Update);
//! loop {
//!     sched.update(); // once per frame
//! }
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                  |
//! |---------------|-------------------------------------------|
//! | [`scheduler`] | `Scheduler<H>`, `Phase`                   |
//! | [`error`]     | `SchedError`, `SchedResult<T>`            |

pub mod error;
pub mod scheduler;


pub use error::{SchedError, SchedResult};
pub use scheduler::{Phase, Scheduler};
