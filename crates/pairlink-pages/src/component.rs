//! Component System
//!
//! A small view tree used by route views and the router's own components.
//!
//! - **View**: element, text, fragment or empty node
//! - **IntoView**: conversion into a `View`
//! - **Component**: reusable unit that renders a `View`
//!
//! ## Usage
//!
//! ```
//! use pairlink_pages::component::{IntoView, View};
//!
//! let view = View::element("p")
//!     .attr("class", "greeting")
//!     .child("Hello")
//!     .into_view();
//! assert_eq!(view.render_to_string(), "<p class=\"greeting\">Hello</p>");
//! ```

mod into_view;
mod r#trait;

pub use into_view::{ElementView, IntoView, View, ViewEventHandler};
pub use r#trait::Component;
