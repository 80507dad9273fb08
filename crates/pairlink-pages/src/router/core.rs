//! Router core.

use super::components::RouterOutlet;
use super::guard::RouteGuard;
use super::matcher::{RouteMatch, RouteMatcher, not_found_view};
use super::navigator::Navigator;
use super::route::{RouteContext, RouteTable};
use crate::component::View;
use core::cell::RefCell;
use pairlink_core::flush_effects;

// Upper bound on render/flush passes per commit; redirects chaining
// further than this are left for the next frame.
const MAX_COMMIT_PASSES: usize = 8;

/// Ties a [`Navigator`] to a [`RouteMatcher`] and mounts route guards.
///
/// The guard of a guarded route stays mounted while that route is current and
/// is dropped when the path changes.
pub struct Router {
	navigator: Navigator,
	matcher: RouteMatcher,
	outlet: RouterOutlet,
	active_guard: RefCell<Option<(String, RouteGuard)>>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("navigator", &self.navigator)
			.field(
				"active_guard",
				&self
					.active_guard
					.borrow()
					.as_ref()
					.map(|(path, _)| path.clone()),
			)
			.finish()
	}
}

impl Router {
	/// Creates a router with a default navigator.
	pub fn new(routes: RouteTable) -> Self {
		Self::with_navigator(Navigator::new(routes))
	}

	/// Creates a router over an existing navigator and its route table.
	pub fn with_navigator(navigator: Navigator) -> Self {
		let matcher = RouteMatcher::new(navigator.shared_routes());
		Self {
			navigator,
			matcher,
			outlet: RouterOutlet::new(),
			active_guard: RefCell::new(None),
		}
	}

	/// Replaces the outlet element settings.
	pub fn outlet(mut self, outlet: RouterOutlet) -> Self {
		self.outlet = outlet;
		self
	}

	/// Shared navigator.
	pub fn navigator(&self) -> &Navigator {
		&self.navigator
	}

	/// Matcher over the route table.
	pub fn matcher(&self) -> &RouteMatcher {
		&self.matcher
	}

	/// Renders the current route inside the outlet element.
	pub fn render(&self) -> View {
		self.outlet.wrap(self.render_current())
	}

	/// Renders the current route without the outlet element.
	pub fn render_current(&self) -> View {
		let path = self.navigator.current_path();
		let route = match self.matcher.match_path(&path) {
			RouteMatch::Found(route) => route,
			RouteMatch::NotFound => {
				self.active_guard.replace(None);
				tracing::debug!(path = %path, "rendering not-found view");
				return not_found_view(&self.navigator, &path);
			}
		};

		let ctx = RouteContext::new(
			path.as_str(),
			route.static_props(),
			self.navigator.current_state(),
			self.navigator.clone(),
		);

		let Some(condition) = route.guard() else {
			self.active_guard.replace(None);
			return route.render(&ctx);
		};

		let allowed = {
			let mut active = self.active_guard.borrow_mut();
			let mounted = matches!(active.as_ref(), Some((guarded, _)) if *guarded == path);
			if !mounted {
				// Drop the old guard before mounting the new one.
				*active = None;
				let guard = RouteGuard::from_condition(&self.navigator, condition, View::empty);
				*active = Some((path.clone(), guard));
			}
			active.as_ref().is_some_and(|(_, guard)| guard.is_allowed())
		};

		if allowed {
			route.render(&ctx)
		} else {
			View::Empty
		}
	}

	/// Fires due timers, renders, then flushes post-render effects.
	///
	/// When a flushed effect navigates (a guard redirect, say) the router
	/// renders again so the returned view reflects the final location.
	pub fn commit(&self) -> View {
		let fired = self.navigator.poll_timers();
		if fired > 0 {
			tracing::trace!(fired, "timers fired before commit");
		}
		let mut view = self.render();
		for _ in 0..MAX_COMMIT_PASSES {
			let revision = self.navigator.revision();
			let ran = flush_effects();
			tracing::debug!(effects = ran, "post-render effects flushed");
			if self.navigator.revision() == revision {
				return view;
			}
			view = self.render();
		}
		tracing::warn!(passes = MAX_COMMIT_PASSES, "commit stopped before navigation settled");
		view
	}
}
