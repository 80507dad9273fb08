//! Predicate-gated content.

use super::navigator::Navigator;
use super::route::GuardCondition;
use crate::component::{Component, View};
use pairlink_core::{Effect, untrack};
use std::rc::Rc;

/// Renders its content only while a predicate holds, and redirects when it
/// does not.
///
/// Mounting registers a deferred [`Effect`]. Its first run happens at the next
/// [`flush_effects`](pairlink_core::flush_effects), after the frame that
/// mounted the guard has rendered; a failing predicate then triggers one
/// `navigate(fallback_path)`. The effect runs again only when a signal the
/// predicate read changes. Dropping the guard unregisters it.
///
/// While the predicate is false the guard renders [`View::Empty`], including
/// the frame in which the redirect is still pending.
pub struct RouteGuard {
	condition: Rc<dyn Fn() -> bool + 'static>,
	fallback_path: String,
	content: Rc<dyn Fn() -> View + 'static>,
	effect: Effect,
}

impl RouteGuard {
	/// Mounts a guard.
	pub fn mount<C, V>(
		navigator: &Navigator,
		condition: C,
		fallback_path: impl Into<String>,
		content: V,
	) -> Self
	where
		C: Fn() -> bool + 'static,
		V: Fn() -> View + 'static,
	{
		Self::from_condition(
			navigator,
			&GuardCondition::new(condition, fallback_path),
			content,
		)
	}

	/// Mounts a guard from a route's [`GuardCondition`].
	pub fn from_condition<V>(navigator: &Navigator, guard: &GuardCondition, content: V) -> Self
	where
		V: Fn() -> View + 'static,
	{
		let condition = guard.condition();
		let fallback_path = guard.fallback_path().to_string();

		let effect = {
			let condition = Rc::clone(&condition);
			let fallback = fallback_path.clone();
			let navigator = navigator.clone();
			Effect::deferred(move || {
				if condition() {
					return;
				}
				tracing::debug!(fallback = %fallback, "guard condition failed; redirecting");
				untrack(|| navigator.navigate(&fallback));
			})
		};

		Self {
			condition,
			fallback_path,
			content: Rc::new(content),
			effect,
		}
	}

	/// Evaluates the predicate now.
	pub fn is_allowed(&self) -> bool {
		(self.condition)()
	}

	/// Redirect target.
	pub fn fallback_path(&self) -> &str {
		&self.fallback_path
	}
}

impl Component for RouteGuard {
	fn render(&self) -> View {
		if self.is_allowed() {
			(self.content)()
		} else {
			View::Empty
		}
	}

	fn name() -> &'static str {
		"RouteGuard"
	}
}

impl std::fmt::Debug for RouteGuard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteGuard")
			.field("fallback_path", &self.fallback_path)
			.field("effect", &self.effect)
			.finish()
	}
}
