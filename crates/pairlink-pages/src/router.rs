//! Client-Side Router.
//!
//! Decides which view is visible, records where the user has been and lets
//! views move between routes without a page reload.
//!
//! ## Pieces
//!
//! - [`RouteTable`] / [`RouteDescriptor`]: the immutable route configuration
//! - [`HistoryStack`]: chronological record of navigations
//! - [`Navigator`]: the shared navigation controller (`navigate`, `go_back`)
//! - [`RouteMatcher`]: exact-path matching with a built-in not-found view
//! - [`RouteGuard`]: predicate-gated content with a post-render redirect
//! - [`Link`], [`ConditionalRender`], [`NavMenu`]: declarative navigation components
//! - [`Router`]: wires the above together and drives render/commit
//!
//! ## Example
//!
//! ```
//! use pairlink_pages::component::View;
//! use pairlink_pages::router::{RouteDescriptor, RouteTable, Router};
//!
//! let routes = RouteTable::new(vec![
//!     RouteDescriptor::new("/", |_| View::text("Home")).title("Home"),
//!     RouteDescriptor::new("/match", |_| View::text("Match")).title("Start matching"),
//! ]);
//! let router = Router::new(routes);
//!
//! router.navigator().navigate("/match");
//! assert_eq!(router.navigator().current_path(), "/match");
//! assert_eq!(router.render().text_content(), "Match");
//!
//! router.navigator().go_back();
//! assert_eq!(router.navigator().current_path(), "/");
//! ```

mod components;
mod core;
mod document;
mod error;
mod guard;
mod history;
mod manifest;
mod matcher;
mod navigator;
mod route;

pub use components::{ConditionalRender, Link, MenuItem, NavMenu, PathSet, RouterOutlet};
pub use self::core::Router;
pub use document::{DocumentTitle, MemoryDocument};
pub use error::RouterError;
pub use guard::RouteGuard;
pub use history::{HistoryEntry, HistoryStack};
pub use manifest::{RouteEntry, RouteManifest, ViewRegistry};
pub use matcher::{RouteMatch, RouteMatcher};
pub use navigator::{Navigator, NavigatorBuilder};
pub use route::{GuardCondition, RouteContext, RouteDescriptor, RouteTable, ViewFactory};
