//! Route matching.

use super::navigator::Navigator;
use super::route::{RouteContext, RouteDescriptor, RouteTable};
use crate::component::{IntoView, View};
use crate::dom::EventType;
use std::rc::Rc;

/// Result of matching a path against the route table.
#[derive(Debug, Clone, Copy)]
pub enum RouteMatch<'a> {
	/// The first route whose path equals the input.
	Found(&'a RouteDescriptor),
	/// No route matched.
	NotFound,
}

impl<'a> RouteMatch<'a> {
	/// Matched route, if any.
	pub fn route(&self) -> Option<&'a RouteDescriptor> {
		match self {
			RouteMatch::Found(route) => Some(route),
			RouteMatch::NotFound => None,
		}
	}

	/// Whether no route matched.
	pub fn is_not_found(&self) -> bool {
		matches!(self, RouteMatch::NotFound)
	}
}

/// Selects the view for the current path.
///
/// Matching is exact string equality in table order; there is no
/// normalisation of case or trailing slashes.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
	routes: Rc<RouteTable>,
}

impl RouteMatcher {
	/// Creates a matcher over `routes`.
	pub fn new(routes: Rc<RouteTable>) -> Self {
		Self { routes }
	}

	/// Matches `path`.
	pub fn match_path(&self, path: &str) -> RouteMatch<'_> {
		match self.routes.find(path) {
			Some(route) => RouteMatch::Found(route),
			None => RouteMatch::NotFound,
		}
	}

	/// Renders the view for the navigator's current path.
	pub fn render(&self, navigator: &Navigator) -> View {
		let path = navigator.current_path();
		match self.match_path(&path) {
			RouteMatch::Found(route) => {
				let ctx = RouteContext::new(
					path.as_str(),
					route.static_props(),
					navigator.current_state(),
					navigator.clone(),
				);
				route.render(&ctx)
			}
			RouteMatch::NotFound => {
				tracing::debug!(path = %path, "rendering not-found view");
				not_found_view(navigator, &path)
			}
		}
	}
}

/// Built-in view for unmatched paths.
///
/// Shows the path and one button that navigates to the configured recovery
/// path.
pub(super) fn not_found_view(navigator: &Navigator, path: &str) -> View {
	let target = navigator.settings().not_found_path().to_string();
	let nav = navigator.clone();

	View::element("div")
		.attr("class", "not-found")
		.child(View::element("h2").child("Page not found"))
		.child(View::element("p").child(format!("Path \"{path}\" does not exist")))
		.child(
			View::element("button")
				.attr("type", "button")
				.attr("data-action", "not-found-recover")
				.on(EventType::Click, move |_| nav.navigate(&target))
				.child("Go to home"),
		)
		.into_view()
}
