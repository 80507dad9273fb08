//! Navigation controller.
//!
//! A [`Navigator`] owns the current location, the history stack and the
//! transient `is_navigating` flag for one application subtree. Handles are
//! cheap to clone; every clone drives the same state.

use super::document::{DocumentTitle, MemoryDocument};
use super::history::{HistoryEntry, HistoryStack};
use super::route::RouteTable;
use core::cell::Cell;
use pairlink_conf::NavigationSettings;
use pairlink_core::{Signal, TimerScheduler, WallClockTimers};
use serde_json::Value;
use std::rc::Rc;

struct NavigatorInner {
	current_path: Signal<String>,
	current_state: Signal<Option<Value>>,
	is_navigating: Signal<bool>,
	history: Signal<HistoryStack>,
	routes: Rc<RouteTable>,
	settings: NavigationSettings,
	document: Rc<dyn DocumentTitle>,
	timers: Rc<dyn TimerScheduler>,
	revision: Cell<u64>,
}

/// Shared navigation controller.
///
/// `navigate` always commits: it pushes a history entry even when the target
/// equals the current path, and it is never blocked by `is_navigating`.
/// `go_back` at the initial entry does nothing.
///
/// # Example
///
/// ```
/// use pairlink_pages::component::View;
/// use pairlink_pages::router::{Navigator, RouteDescriptor, RouteTable};
///
/// let routes = RouteTable::new(vec![RouteDescriptor::new("/", |_| View::text("Home"))]);
/// let navigator = Navigator::new(routes);
///
/// navigator.navigate("/history");
/// navigator.navigate("/history");
/// assert_eq!(navigator.history_len(), 3);
///
/// assert!(navigator.go_back());
/// assert!(navigator.go_back());
/// assert!(!navigator.go_back());
/// assert_eq!(navigator.current_path(), "/");
/// ```
#[derive(Clone)]
pub struct Navigator {
	inner: Rc<NavigatorInner>,
}

impl Navigator {
	/// Creates a navigator with default settings, an in-memory document and
	/// wall-clock timers.
	pub fn new(routes: RouteTable) -> Self {
		NavigatorBuilder::new(routes).build()
	}

	/// Starts building a navigator.
	pub fn builder(routes: RouteTable) -> NavigatorBuilder {
		NavigatorBuilder::new(routes)
	}

	/// Navigates to `path` without state.
	pub fn navigate(&self, path: &str) {
		self.navigate_with(path, None);
	}

	/// Navigates to `path`, attaching `state` to the new history entry.
	///
	/// `Some(Value::Null)` is stored as no state.
	pub fn navigate_with(&self, path: &str, state: Option<Value>) {
		let inner = &self.inner;
		let state = state.filter(|value| !value.is_null());
		if !inner.routes.contains(path) {
			tracing::warn!(path, "no route matches path");
		}
		inner
			.history
			.update(|history| history.push(HistoryEntry::new(path, state.clone())));
		inner.current_path.set(path.to_string());
		inner.current_state.set(state);
		self.begin_transition();
		self.write_title(path);
		inner.revision.set(inner.revision.get() + 1);

		tracing::debug!(
			path,
			history_len = inner.history.with_untracked(HistoryStack::len),
			"navigated"
		);
	}

	/// Returns to the previous history entry.
	///
	/// Returns `false` and leaves every piece of state untouched when only the
	/// initial entry is left.
	pub fn go_back(&self) -> bool {
		let inner = &self.inner;
		if !inner.history.with_untracked(HistoryStack::can_pop) {
			tracing::debug!("go_back at initial entry ignored");
			return false;
		}

		let mut restored = None;
		inner.history.update(|history| {
			restored = history.pop().cloned();
		});
		let Some(entry) = restored else {
			return false;
		};

		inner.current_path.set(entry.path().to_string());
		inner.current_state.set(entry.state().cloned());
		self.write_title(entry.path());
		inner.revision.set(inner.revision.get() + 1);

		tracing::debug!(
			path = entry.path(),
			history_len = inner.history.with_untracked(HistoryStack::len),
			"went back"
		);
		true
	}

	/// Current path.
	pub fn current_path(&self) -> String {
		self.inner.current_path.get()
	}

	/// State attached to the current history entry.
	pub fn current_state(&self) -> Option<Value> {
		self.inner.current_state.get()
	}

	/// Whether a navigation happened within the last navigating delay.
	///
	/// Advisory only; nothing in the navigator consults it. Due timers are
	/// polled before the flag is read.
	pub fn is_navigating(&self) -> bool {
		self.poll_timers();
		self.inner.is_navigating.get()
	}

	/// Fires timeouts that are due on the navigator's scheduler.
	pub fn poll_timers(&self) -> usize {
		self.inner.timers.run_due()
	}

	/// Snapshot of the history stack.
	pub fn history(&self) -> HistoryStack {
		self.inner.history.get()
	}

	/// Number of history entries, initial entry included.
	pub fn history_len(&self) -> usize {
		self.inner.history.with(HistoryStack::len)
	}

	/// Whether `go_back` would move.
	pub fn can_go_back(&self) -> bool {
		self.inner.history.with(HistoryStack::can_pop)
	}

	/// Whether `path` is the current path.
	pub fn is_current(&self, path: &str) -> bool {
		self.inner.current_path.with(|current| current == path)
	}

	/// Signal holding the current path.
	pub fn current_path_signal(&self) -> Signal<String> {
		self.inner.current_path.clone()
	}

	/// Signal holding the current state.
	pub fn current_state_signal(&self) -> Signal<Option<Value>> {
		self.inner.current_state.clone()
	}

	/// Signal holding the navigating flag.
	pub fn is_navigating_signal(&self) -> Signal<bool> {
		self.inner.is_navigating.clone()
	}

	/// Signal holding the history stack.
	pub fn history_signal(&self) -> Signal<HistoryStack> {
		self.inner.history.clone()
	}

	/// Route table the navigator resolves titles against.
	pub fn routes(&self) -> &RouteTable {
		&self.inner.routes
	}

	pub(super) fn shared_routes(&self) -> Rc<RouteTable> {
		Rc::clone(&self.inner.routes)
	}

	/// Settings in effect.
	pub fn settings(&self) -> &NavigationSettings {
		&self.inner.settings
	}

	/// Counter bumped by every successful `navigate` or `go_back`.
	pub fn revision(&self) -> u64 {
		self.inner.revision.get()
	}

	/// Whether both handles drive the same state.
	pub fn ptr_eq(&self, other: &Navigator) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	fn begin_transition(&self) {
		let inner = &self.inner;
		inner.is_navigating.set(true);

		let flag = inner.is_navigating.clone();
		let handle = inner.timers.set_timeout(
			inner.settings.navigating_delay(),
			Box::new(move || {
				tracing::trace!("navigating flag cleared");
				flag.set(false);
			}),
		);
		tracing::trace!(timeout = handle.as_u64(), "navigating flag raised");
	}

	fn write_title(&self, path: &str) {
		if let Some(title) = self.inner.routes.title_for(path) {
			self.inner
				.document
				.set_title(&self.inner.settings.document_title(title));
		}
	}
}

impl std::fmt::Debug for Navigator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Navigator")
			.field("current_path", &self.inner.current_path.get_untracked())
			.field(
				"history_len",
				&self.inner.history.with_untracked(HistoryStack::len),
			)
			.field("is_navigating", &self.inner.is_navigating.get_untracked())
			.field("routes_count", &self.inner.routes.len())
			.finish()
	}
}

/// Builder for [`Navigator`].
pub struct NavigatorBuilder {
	routes: RouteTable,
	settings: NavigationSettings,
	initial_path: Option<String>,
	document: Option<Rc<dyn DocumentTitle>>,
	timers: Option<Rc<dyn TimerScheduler>>,
}

impl NavigatorBuilder {
	/// Starts from default settings.
	pub fn new(routes: RouteTable) -> Self {
		Self {
			routes,
			settings: NavigationSettings::default(),
			initial_path: None,
			document: None,
			timers: None,
		}
	}

	/// Uses `settings` for the delay, titles and not-found recovery.
	pub fn settings(mut self, settings: NavigationSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Overrides the initial path from the settings.
	pub fn initial_path(mut self, path: impl Into<String>) -> Self {
		self.initial_path = Some(path.into());
		self
	}

	/// Writes document titles to `document`.
	pub fn document<D>(mut self, document: D) -> Self
	where
		D: DocumentTitle + 'static,
	{
		self.document = Some(Rc::new(document));
		self
	}

	/// Schedules the navigating-flag reset on `timers`.
	pub fn timers<T>(mut self, timers: T) -> Self
	where
		T: TimerScheduler + 'static,
	{
		self.timers = Some(Rc::new(timers));
		self
	}

	/// Builds the navigator.
	pub fn build(self) -> Navigator {
		let initial_path = self
			.initial_path
			.unwrap_or_else(|| self.settings.initial_path().to_string());
		let document = self
			.document
			.unwrap_or_else(|| Rc::new(MemoryDocument::new()));
		let timers = self
			.timers
			.unwrap_or_else(|| Rc::new(WallClockTimers::new()));

		tracing::debug!(initial_path = %initial_path, routes = self.routes.len(), "navigator created");

		Navigator {
			inner: Rc::new(NavigatorInner {
				current_path: Signal::new(initial_path.clone()),
				current_state: Signal::new(None),
				is_navigating: Signal::new(false),
				history: Signal::new(HistoryStack::new(HistoryEntry::new(initial_path, None))),
				routes: Rc::new(self.routes),
				settings: self.settings,
				document,
				timers,
				revision: Cell::new(0),
			}),
		}
	}
}
