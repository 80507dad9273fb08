//! Route configuration.

use super::navigator::Navigator;
use crate::component::View;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::rc::Rc;

/// Builds the view for a matched route.
pub type ViewFactory = Rc<dyn Fn(&RouteContext) -> View + 'static>;

/// What a matched route's view receives: its static props plus the
/// navigation primitives.
#[derive(Clone)]
pub struct RouteContext {
	path: String,
	props: Map<String, Value>,
	state: Option<Value>,
	navigator: Navigator,
}

impl RouteContext {
	pub(super) fn new(
		path: impl Into<String>,
		props: Option<&Map<String, Value>>,
		state: Option<Value>,
		navigator: Navigator,
	) -> Self {
		Self {
			path: path.into(),
			props: props.cloned().unwrap_or_default(),
			state,
			navigator,
		}
	}

	/// Path that was matched.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Static props declared on the route.
	pub fn props(&self) -> &Map<String, Value> {
		&self.props
	}

	/// Returns one static prop.
	pub fn prop(&self, key: &str) -> Option<&Value> {
		self.props.get(key)
	}

	/// State payload of the navigation that led here.
	pub fn state(&self) -> Option<&Value> {
		self.state.as_ref()
	}

	/// Shared navigator handle.
	pub fn navigator(&self) -> &Navigator {
		&self.navigator
	}

	/// Navigates to `path` without state.
	pub fn navigate(&self, path: &str) {
		self.navigator.navigate(path);
	}

	/// Navigates to `path` carrying `state`.
	pub fn navigate_with(&self, path: &str, state: Option<Value>) {
		self.navigator.navigate_with(path, state);
	}

	/// Returns to the previous history entry, if any.
	pub fn go_back(&self) -> bool {
		self.navigator.go_back()
	}
}

impl std::fmt::Debug for RouteContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteContext")
			.field("path", &self.path)
			.field("props", &self.props)
			.field("state", &self.state)
			.finish()
	}
}

/// Access check attached to a route.
///
/// The router mounts a [`RouteGuard`](super::RouteGuard) for the route while
/// it is current.
#[derive(Clone)]
pub struct GuardCondition {
	condition: Rc<dyn Fn() -> bool + 'static>,
	fallback_path: String,
}

impl GuardCondition {
	/// Creates a guard condition.
	pub fn new<F>(condition: F, fallback_path: impl Into<String>) -> Self
	where
		F: Fn() -> bool + 'static,
	{
		Self {
			condition: Rc::new(condition),
			fallback_path: fallback_path.into(),
		}
	}

	/// Shared predicate.
	pub fn condition(&self) -> Rc<dyn Fn() -> bool + 'static> {
		Rc::clone(&self.condition)
	}

	/// Where to redirect when the predicate fails.
	pub fn fallback_path(&self) -> &str {
		&self.fallback_path
	}
}

impl std::fmt::Debug for GuardCondition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GuardCondition")
			.field("fallback_path", &self.fallback_path)
			.finish()
	}
}

/// A single route definition.
#[derive(Clone)]
pub struct RouteDescriptor {
	path: String,
	view: ViewFactory,
	title: Option<String>,
	props: Option<Map<String, Value>>,
	guard: Option<GuardCondition>,
}

impl std::fmt::Debug for RouteDescriptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteDescriptor")
			.field("path", &self.path)
			.field("title", &self.title)
			.field("props", &self.props)
			.field("guard", &self.guard)
			.finish()
	}
}

impl RouteDescriptor {
	/// Creates a route for an exact path.
	pub fn new<F>(path: impl Into<String>, view: F) -> Self
	where
		F: Fn(&RouteContext) -> View + 'static,
	{
		Self::from_factory(path, Rc::new(view))
	}

	/// Creates a route from an already shared view factory.
	pub fn from_factory(path: impl Into<String>, view: ViewFactory) -> Self {
		Self {
			path: path.into(),
			view,
			title: None,
			props: None,
			guard: None,
		}
	}

	/// Sets the title shown in the document title while the route is current.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Replaces the static props.
	pub fn props(mut self, props: Map<String, Value>) -> Self {
		self.props = Some(props);
		self
	}

	/// Adds one static prop.
	pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.props
			.get_or_insert_with(Map::new)
			.insert(key.into(), value.into());
		self
	}

	/// Gates the route behind `condition`, redirecting to `fallback_path` when it fails.
	pub fn guarded<F>(mut self, condition: F, fallback_path: impl Into<String>) -> Self
	where
		F: Fn() -> bool + 'static,
	{
		self.guard = Some(GuardCondition::new(condition, fallback_path));
		self
	}

	/// Route path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Route title.
	pub fn route_title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	/// Static props, if any were declared.
	pub fn static_props(&self) -> Option<&Map<String, Value>> {
		self.props.as_ref()
	}

	/// Access check, if the route is guarded.
	pub fn guard(&self) -> Option<&GuardCondition> {
		self.guard.as_ref()
	}

	/// Renders the route's view.
	pub fn render(&self, ctx: &RouteContext) -> View {
		(self.view)(ctx)
	}
}

/// Ordered, immutable collection of routes.
///
/// Lookup is by exact path; when two descriptors share a path the first one in
/// table order wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	routes: Vec<RouteDescriptor>,
}

impl RouteTable {
	/// Creates a table from routes in priority order.
	pub fn new(routes: Vec<RouteDescriptor>) -> Self {
		let mut seen = HashSet::new();
		for route in &routes {
			if !seen.insert(route.path()) {
				tracing::warn!(path = route.path(), "duplicate route path; the earlier route wins");
			}
		}
		Self { routes }
	}

	/// Returns the first route whose path equals `path` exactly.
	pub fn find(&self, path: &str) -> Option<&RouteDescriptor> {
		self.routes.iter().find(|route| route.path == path)
	}

	/// Whether some route matches `path`.
	pub fn contains(&self, path: &str) -> bool {
		self.find(path).is_some()
	}

	/// Title of the route matching `path`.
	pub fn title_for(&self, path: &str) -> Option<&str> {
		self.find(path).and_then(RouteDescriptor::route_title)
	}

	/// Routes in table order.
	pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
		self.routes.iter()
	}

	/// Paths in table order.
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.routes.iter().map(RouteDescriptor::path)
	}

	/// Number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Whether the table has no routes.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

impl FromIterator<RouteDescriptor> for RouteTable {
	fn from_iter<I: IntoIterator<Item = RouteDescriptor>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}
