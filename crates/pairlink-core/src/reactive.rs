//! Fine-grained reactivity.
//!
//! A [`Signal`] holds a value and records every [`Effect`] that reads it. Writing
//! the signal does not run those effects re-entrantly: they are queued and run
//! by [`flush_effects`], which a host calls once the current render has been
//! committed. This gives the "post-render effect" timing that redirects and
//! other side effects rely on.
//!
//! ## Example
//!
//! ```
//! use pairlink_core::reactive::{Effect, Signal, flush_effects};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let count = Signal::new(1);
//! let seen = Rc::new(Cell::new(0));
//!
//! let _effect = Effect::new({
//!     let count = count.clone();
//!     let seen = Rc::clone(&seen);
//!     move || seen.set(count.get())
//! });
//! assert_eq!(seen.get(), 1);
//!
//! count.set(2);
//! // Queued, not yet run
//! assert_eq!(seen.get(), 1);
//! flush_effects();
//! assert_eq!(seen.get(), 2);
//! ```

mod effect;
mod runtime;
mod signal;

pub use effect::{Effect, EffectTiming};
pub use runtime::{NodeId, flush_effects, pending_effects, untrack};
pub use signal::Signal;
