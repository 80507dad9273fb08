//! Reactive runtime and timers module.
//!
//! This module provides access to `Signal`, `Effect`, the post-render effect
//! queue and the `TimerScheduler` implementations.
//!
//! # Examples
//!
//! ```rust
//! use pairlink::core::{Signal, flush_effects};
//!
//! let count = Signal::new(0);
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 1);
//! assert_eq!(flush_effects(), 0);
//! ```

pub use pairlink_core::*;
