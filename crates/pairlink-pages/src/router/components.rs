//! Router Components for navigation.
//!
//! This module provides the declarative navigation pieces used inside view
//! trees: [`Link`], [`ConditionalRender`], [`NavMenu`] and the
//! [`RouterOutlet`] wrapper.

use super::navigator::Navigator;
use crate::component::{Component, ElementView, IntoView, View};
use crate::dom::{Event, EventType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;

type ClickCallback = Rc<dyn Fn(&Event) + 'static>;

/// A link that navigates without a full page reload.
///
/// Activation suppresses the default action of the event, runs the optional
/// `on_click` callback, then navigates to the target with the optional state.
///
/// # Example
///
/// ```
/// use pairlink_pages::dom::Event;
/// use pairlink_pages::router::{Link, Navigator, RouteTable};
///
/// let navigator = Navigator::new(RouteTable::default());
/// let link = Link::new(&navigator, "/history", "History").active_class("active");
/// assert!(!link.is_active());
///
/// let event = Event::click();
/// link.activate(&event);
/// assert!(event.is_default_prevented());
/// assert!(link.is_active());
/// assert_eq!(link.class_name(), "active");
/// ```
#[derive(Clone)]
pub struct Link {
	navigator: Navigator,
	to: String,
	content: View,
	state: Option<Value>,
	class: Option<String>,
	active_class: Option<String>,
	on_click: Option<ClickCallback>,
}

impl Link {
	/// Creates a link to `to`.
	pub fn new(navigator: &Navigator, to: impl Into<String>, content: impl IntoView) -> Self {
		Self {
			navigator: navigator.clone(),
			to: to.into(),
			content: content.into_view(),
			state: None,
			class: None,
			active_class: None,
			on_click: None,
		}
	}

	/// Attaches a state payload to the navigation.
	pub fn state(mut self, state: Value) -> Self {
		self.state = Some(state);
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Sets the class added while the link's target is the current path.
	pub fn active_class(mut self, class: impl Into<String>) -> Self {
		self.active_class = Some(class.into());
		self
	}

	/// Runs `callback` on activation, before navigating.
	pub fn on_click<F>(mut self, callback: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.on_click = Some(Rc::new(callback));
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Whether the target equals the current path exactly.
	pub fn is_active(&self) -> bool {
		self.navigator.is_current(&self.to)
	}

	/// Class attribute value for the current location.
	pub fn class_name(&self) -> String {
		let mut parts: Vec<&str> = Vec::new();
		if let Some(class) = self.class.as_deref() {
			parts.push(class);
		}
		if let Some(active) = self.active_class.as_deref() {
			if self.is_active() {
				parts.push(active);
			}
		}
		parts.join(" ").trim().to_string()
	}

	/// Handles an activation event.
	pub fn activate(&self, event: &Event) {
		event.prevent_default();
		if let Some(callback) = &self.on_click {
			callback(event);
		}
		self.navigator.navigate_with(&self.to, self.state.clone());
	}
}

impl Component for Link {
	fn render(&self) -> View {
		let mut el = ElementView::new("a").attr("href", self.to.clone());

		let class = self.class_name();
		if !class.is_empty() {
			el = el.attr("class", class);
		}

		let link = self.clone();
		el.attr("data-link", "true")
			.attr("data-active", if self.is_active() { "true" } else { "false" })
			.on(EventType::Click, move |event| link.activate(event))
			.child(self.content.clone())
			.into_view()
	}

	fn name() -> &'static str {
		"Link"
	}
}

impl std::fmt::Debug for Link {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Link")
			.field("to", &self.to)
			.field("state", &self.state)
			.field("class", &self.class)
			.field("active_class", &self.active_class)
			.field("has_on_click", &self.on_click.is_some())
			.finish()
	}
}

/// One path or a set of paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSet {
	/// A single path.
	One(String),
	/// Any of several paths.
	Many(Vec<String>),
}

impl PathSet {
	/// Whether `path` is a member, by exact equality.
	pub fn contains(&self, path: &str) -> bool {
		match self {
			PathSet::One(p) => p == path,
			PathSet::Many(paths) => paths.iter().any(|p| p == path),
		}
	}
}

impl From<&str> for PathSet {
	fn from(path: &str) -> Self {
		PathSet::One(path.to_string())
	}
}

impl From<String> for PathSet {
	fn from(path: String) -> Self {
		PathSet::One(path)
	}
}

impl From<Vec<String>> for PathSet {
	fn from(paths: Vec<String>) -> Self {
		PathSet::Many(paths)
	}
}

impl From<Vec<&str>> for PathSet {
	fn from(paths: Vec<&str>) -> Self {
		PathSet::Many(paths.into_iter().map(str::to_string).collect())
	}
}

impl<const N: usize> From<[&str; N]> for PathSet {
	fn from(paths: [&str; N]) -> Self {
		PathSet::Many(paths.into_iter().map(str::to_string).collect())
	}
}

/// Renders its children only on the listed paths.
#[derive(Clone)]
pub struct ConditionalRender {
	navigator: Navigator,
	when: PathSet,
	children: View,
}

impl ConditionalRender {
	/// Creates a conditional block.
	pub fn new(navigator: &Navigator, when: impl Into<PathSet>, children: impl IntoView) -> Self {
		Self {
			navigator: navigator.clone(),
			when: when.into(),
			children: children.into_view(),
		}
	}

	/// Whether the current path is one of the listed paths.
	pub fn should_render(&self) -> bool {
		self.when.contains(&self.navigator.current_path())
	}
}

impl Component for ConditionalRender {
	fn render(&self) -> View {
		if self.should_render() {
			self.children.clone()
		} else {
			View::Empty
		}
	}

	fn name() -> &'static str {
		"ConditionalRender"
	}
}

impl std::fmt::Debug for ConditionalRender {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConditionalRender")
			.field("when", &self.when)
			.finish()
	}
}

/// Entry of the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
	/// Target path.
	pub path: String,
	/// Visible label.
	pub label: String,
	/// Optional icon name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
}

impl MenuItem {
	/// Creates a menu item without an icon.
	pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			label: label.into(),
			icon: None,
		}
	}

	/// Sets the icon name.
	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}
}

/// Application navigation menu.
///
/// Renders a `<nav>` with one [`Link`] per item; the item whose path equals
/// the current path gets the `active` class.
#[derive(Debug, Clone)]
pub struct NavMenu {
	navigator: Navigator,
	items: Vec<MenuItem>,
}

impl NavMenu {
	/// Creates a menu.
	pub fn new(navigator: &Navigator, items: Vec<MenuItem>) -> Self {
		Self {
			navigator: navigator.clone(),
			items,
		}
	}

	/// Menu items in display order.
	pub fn items(&self) -> &[MenuItem] {
		&self.items
	}

	/// Item matching the current path, if any.
	pub fn active_item(&self) -> Option<&MenuItem> {
		self.items
			.iter()
			.find(|item| self.navigator.is_current(&item.path))
	}

	fn link(&self, item: &MenuItem) -> Link {
		let content = match &item.icon {
			Some(icon) => View::fragment(vec![
				View::element("span")
					.attr("class", "icon")
					.attr("data-icon", icon.clone())
					.into_view(),
				View::text(item.label.clone()),
			]),
			None => View::text(item.label.clone()),
		};
		Link::new(&self.navigator, item.path.clone(), content)
			.class("nav-item")
			.active_class("active")
	}
}

impl Component for NavMenu {
	fn render(&self) -> View {
		let links = self
			.items
			.iter()
			.map(|item| self.link(item).render())
			.collect::<Vec<_>>();
		View::element("nav")
			.attr("class", "nav-menu")
			.children(links)
			.into_view()
	}

	fn name() -> &'static str {
		"NavMenu"
	}
}

/// The element that holds the matched route's view.
#[derive(Debug, Clone, Default)]
pub struct RouterOutlet {
	id: Option<String>,
	class: Option<String>,
}

impl RouterOutlet {
	/// Creates a new router outlet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the ID attribute.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Wraps `content` in the outlet element.
	pub fn wrap(&self, content: impl IntoView) -> View {
		let mut el = ElementView::new("main").attr("data-router-outlet", "true");

		if let Some(ref id) = self.id {
			el = el.attr("id", id.clone());
		}

		if let Some(ref class) = self.class {
			el = el.attr("class", class.clone());
		}

		el.child(content).into_view()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::router::RouteTable;
	use core::cell::Cell;
	use rstest::rstest;
	use serde_json::json;

	fn navigator() -> Navigator {
		Navigator::new(RouteTable::default())
	}

	#[rstest]
	fn test_link_renders_anchor() {
		let nav = navigator();
		let view = Link::new(&nav, "/history", "History")
			.class("btn")
			.active_class("active")
			.render();

		assert_eq!(
			view.render_to_string(),
			"<a href=\"/history\" class=\"btn\" data-link=\"true\" data-active=\"false\">History</a>"
		);

		nav.navigate("/history");
		let view = Link::new(&nav, "/history", "History")
			.class("btn")
			.active_class("active")
			.render();
		let anchor = view.find_by_tag("a").unwrap();
		assert_eq!(anchor.get_attr("class"), Some("btn active"));
		assert_eq!(anchor.get_attr("data-active"), Some("true"));
	}

	#[rstest]
	fn test_link_activation_order() {
		let nav = navigator();
		let seen_path = Rc::new(Cell::new(false));
		let link = {
			let nav = nav.clone();
			let seen_path = Rc::clone(&seen_path);
			Link::new(&nav, "/history", "History")
				.state(json!({ "from": "menu" }))
				.on_click(move |event| {
					// Callback runs before the navigation
					assert!(event.is_default_prevented());
					seen_path.set(nav.current_path() == "/");
				})
		};

		let view = link.render();
		let anchor = view.find_by_tag("a").unwrap();
		let event = Event::click();
		assert_eq!(anchor.dispatch(&event), 1);

		assert!(seen_path.get());
		assert!(event.is_default_prevented());
		assert_eq!(nav.current_path(), "/history");
		assert_eq!(nav.current_state(), Some(json!({ "from": "menu" })));
	}

	#[rstest]
	fn test_link_active_is_exact() {
		let nav = navigator();
		nav.navigate("/history/");
		assert!(!Link::new(&nav, "/history", "History").is_active());
	}

	#[rstest]
	#[case(PathSet::from("/match"), true)]
	#[case(PathSet::from(["/", "/match"]), true)]
	#[case(PathSet::from(vec!["/history", "/remove"]), false)]
	#[case(PathSet::Many(Vec::new()), false)]
	fn test_conditional_render(#[case] when: PathSet, #[case] visible: bool) {
		let nav = navigator();
		nav.navigate("/match");
		let block = ConditionalRender::new(&nav, when, "Matching tips");
		assert_eq!(block.should_render(), visible);
		assert_eq!(!block.render().is_empty(), visible);
	}

	#[rstest]
	fn test_nav_menu_marks_active_item() {
		let nav = navigator();
		let menu = NavMenu::new(
			&nav,
			vec![
				MenuItem::new("/", "Home").icon("home"),
				MenuItem::new("/history", "History"),
			],
		);
		nav.navigate("/history");

		assert_eq!(menu.active_item().map(|item| item.label.as_str()), Some("History"));
		let view = menu.render();
		let active = view.find_by_attr("data-active", "true").unwrap();
		assert_eq!(active.get_attr("href"), Some("/history"));
		assert_eq!(active.get_attr("class"), Some("nav-item active"));
		assert!(view.find_by_attr("data-icon", "home").is_some());
		assert_eq!(view.text_content(), "HomeHistory");
	}

	#[rstest]
	fn test_outlet_wraps_content() {
		let view = RouterOutlet::new().id("app").wrap("Home");
		assert_eq!(
			view.render_to_string(),
			"<main data-router-outlet=\"true\" id=\"app\">Home</main>"
		);
	}

	#[rstest]
	fn test_menu_item_toml() {
		#[derive(Deserialize)]
		struct Menu {
			menu: Vec<MenuItem>,
		}
		let menu: Menu = toml::from_str(
			r#"
			[[menu]]
			path = "/match"
			label = "Match"
			icon = "gift"
			"#,
		)
		.unwrap();
		assert_eq!(menu.menu, vec![MenuItem::new("/match", "Match").icon("gift")]);
	}
}
