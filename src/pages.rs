//! View tree and client-side router
//!
//! This module provides access to pairlink-pages: the view types route views
//! return and the navigation state machine that picks which one is visible.
//!
//! ## Architecture
//!
//! - **Component System**: `View`, `ElementView` and the `Component` trait
//! - **Navigator**: current path, state, history and the navigating flag
//! - **Router**: exact-path matching, guards and the route outlet
//! - **Navigation components**: `Link`, `ConditionalRender`, `NavMenu`
//!
//! ## Example
//!
//! ```rust
//! use pairlink::pages::prelude::*;
//!
//! let router = Router::new(RouteTable::new(vec![
//!     RouteDescriptor::new("/", |_| View::text("Home")),
//!     RouteDescriptor::new("/match", |ctx| {
//!         let back = ctx.navigator().clone();
//!         View::element("button")
//!             .on(EventType::Click, move |_| {
//!                 back.go_back();
//!             })
//!             .child("Back")
//!             .into_view()
//!     }),
//! ]));
//!
//! router.navigator().navigate("/match");
//! let view = router.commit();
//! view.find_by_tag("button").unwrap().dispatch(&Event::click());
//! assert_eq!(router.navigator().current_path(), "/");
//! ```

// Re-export all pairlink-pages functionality
pub use pairlink_pages::*;
