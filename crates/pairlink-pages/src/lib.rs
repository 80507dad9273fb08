//! # pairlink-pages
//!
//! View tree and client-side navigation for PairLink.
//!
//! ## Architecture
//!
//! - [`component`]: `View`, `ElementView`, `IntoView` and the `Component` trait
//! - [`dom`]: the event type handed to view handlers
//! - [`router`]: route table, history stack, navigator, matcher, guards,
//!   links and the navigation menu
//!
//! Navigation state lives in `Rc`/`RefCell` cells on the reactive runtime of
//! the current thread, so routers and navigators are `!Send`.
//!
//! ## Example
//!
//! ```
//! use pairlink_pages::prelude::*;
//!
//! let routes = RouteTable::new(vec![
//!     RouteDescriptor::new("/", |_| View::text("Home")).title("Home"),
//!     RouteDescriptor::new("/history", |ctx| {
//!         View::text(format!("History of {}", ctx.path()))
//!     }),
//! ]);
//! let router = Router::new(routes);
//!
//! let link = Link::new(router.navigator(), "/history", "History");
//! let view = link.render();
//! view.find_by_tag("a").unwrap().dispatch(&Event::click());
//!
//! assert_eq!(router.commit().text_content(), "History of /history");
//! ```

pub mod component;
pub mod dom;
pub mod prelude;
pub mod router;

pub use component::{Component, ElementView, IntoView, View};
pub use dom::{Event, EventType};
pub use pairlink_conf::NavigationSettings;
pub use pairlink_core::{Effect, Signal, flush_effects};
pub use router::{
	ConditionalRender, HistoryEntry, HistoryStack, Link, MenuItem, NavMenu, Navigator,
	NavigatorBuilder, RouteDescriptor, RouteGuard, RouteManifest, RouteTable, Router, RouterError,
};
