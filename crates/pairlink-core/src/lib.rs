//! # pairlink-core
//!
//! Reactive primitives and deferred timers shared by the PairLink crates.
//!
//! ## Modules
//!
//! - [`reactive`]: `Signal`, `Effect` and the post-render effect queue
//! - [`timers`]: the [`TimerScheduler`](timers::TimerScheduler) seam used for
//!   advisory deferred work, with wall-clock, virtual-clock and tokio
//!   implementations
//!
//! Everything here is single-threaded. Reactive nodes live in a thread-local
//! runtime, so handles are `!Send` and must stay on the thread that created them.

pub mod reactive;
pub mod timers;

pub use reactive::{Effect, Signal, flush_effects, pending_effects, untrack};
pub use timers::{ManualTimers, TimeoutHandle, TimerCallback, TimerScheduler, WallClockTimers};

#[cfg(feature = "tokio")]
pub use timers::TokioTimers;
