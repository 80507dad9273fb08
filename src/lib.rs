//! # PairLink
//!
//! Client-side navigation core for the PairLink gift-exchange application.
//!
//! PairLink's pages (matching, pool registration, history, participant
//! removal) are views behind exact-path routes. This crate decides which one is
//! visible, records where the user has been and lets views move between
//! routes without a page reload.
//!
//! ## Feature Flags
//!
//! - `full` (default) - Everything below
//! - `core` - Reactive runtime (`Signal`, `Effect`) and timers
//! - `conf` - `NavigationSettings` loaded from TOML
//! - `pages` - View tree, router, navigator, guards, links and menu
//! - `tokio` - `TokioTimers`, a timer scheduler on a tokio `LocalSet`
//!
//! ## Example
//!
//! ```rust
//! use pairlink::prelude::*;
//!
//! let manifest = RouteManifest::default_pairing_manifest();
//! let registry = ViewRegistry::new()
//!     .register("home", |_| View::text("Home"))
//!     .register("match", |_| View::text("Match"))
//!     .register("register", |_| View::text("Register"))
//!     .register("history", |_| View::text("History"))
//!     .register("remove", |_| View::text("Remove"));
//!
//! let routes = manifest.into_route_table(&registry).unwrap();
//! let router = Router::new(routes);
//!
//! router.navigator().navigate("/history");
//! assert_eq!(router.commit().text_content(), "History");
//! ```
//!
//! ## Threading
//!
//! Navigation state is single-threaded. Routers, navigators and signals are
//! `!Send` and live on the thread that created them.

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "pages")]
pub mod pages;

#[cfg(feature = "conf")]
pub use pairlink_conf::{NavigationSettings, SettingsError};

#[cfg(feature = "core")]
pub use pairlink_core::{Effect, ManualTimers, Signal, TimerScheduler, WallClockTimers, flush_effects};

#[cfg(all(feature = "core", feature = "tokio"))]
pub use pairlink_core::TokioTimers;

#[cfg(feature = "pages")]
pub use pairlink_pages::router::{
	Link, Navigator, RouteDescriptor, RouteGuard, RouteManifest, RouteTable, Router, RouterError,
};

/// Commonly used types.
#[cfg(feature = "pages")]
pub mod prelude {
	pub use pairlink_pages::prelude::*;
}
