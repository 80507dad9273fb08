//! IntoView trait and View enum for component rendering.

use crate::dom::{Event, EventType};
use std::borrow::Cow;
use std::rc::Rc;

/// Type alias for event handler functions.
pub type ViewEventHandler = Rc<dyn Fn(&Event) + 'static>;

/// A unified representation of renderable content.
#[derive(Debug, Clone, Default)]
pub enum View {
	/// A DOM element.
	Element(ElementView),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple views (no wrapper element).
	Fragment(Vec<View>),
	/// An empty view (renders nothing).
	#[default]
	Empty,
}

/// Represents a DOM element in the view tree.
#[derive(Clone)]
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
	is_void: bool,
	event_handlers: Vec<(EventType, ViewEventHandler)>,
}

impl std::fmt::Debug for ElementView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ElementView")
			.field("tag", &self.tag)
			.field("attrs", &self.attrs)
			.field("children", &self.children)
			.field("is_void", &self.is_void)
			.field("event_handlers_count", &self.event_handlers.len())
			.finish()
	}
}

impl ElementView {
	/// Creates a new element view.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
			event_handlers: Vec::new(),
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_view()));
		self
	}

	/// Adds an event handler.
	pub fn on<F>(mut self, event_type: EventType, handler: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.event_handlers.push((event_type, Rc::new(handler)));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the value of the first attribute named `name`.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_ref())
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Returns the event handlers.
	pub fn event_handlers(&self) -> &[(EventType, ViewEventHandler)] {
		&self.event_handlers
	}

	/// Invokes every handler registered for the event's type.
	///
	/// Returns the number of handlers invoked.
	pub fn dispatch(&self, event: &Event) -> usize {
		let mut invoked = 0;
		for (event_type, handler) in &self.event_handlers {
			if *event_type == event.event_type() {
				handler(event);
				invoked += 1;
			}
		}
		invoked
	}
}

impl View {
	/// Creates an element view.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_view()).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Returns whether this view renders nothing at all.
	pub fn is_empty(&self) -> bool {
		match self {
			View::Empty => true,
			View::Fragment(children) => children.iter().all(View::is_empty),
			View::Text(_) | View::Element(_) => false,
		}
	}

	/// Renders the view to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		match self {
			View::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					for child in el.child_views() {
						child.render_to_string_inner(output);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			View::Text(text) => {
				output.push_str(&html_escape(text));
			}
			View::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output);
				}
			}
			View::Empty => {}
		}
	}

	/// Concatenates the text nodes of the tree, without markup or escaping.
	pub fn text_content(&self) -> String {
		let mut output = String::new();
		self.collect_text(&mut output);
		output
	}

	fn collect_text(&self, output: &mut String) {
		match self {
			View::Element(el) => el.child_views().iter().for_each(|c| c.collect_text(output)),
			View::Text(text) => output.push_str(text),
			View::Fragment(children) => children.iter().for_each(|c| c.collect_text(output)),
			View::Empty => {}
		}
	}

	/// Finds the first element (depth-first, document order) matching `predicate`.
	pub fn find_element<P>(&self, predicate: P) -> Option<&ElementView>
	where
		P: Fn(&ElementView) -> bool,
	{
		self.find_element_inner(&predicate)
	}

	fn find_element_inner<P>(&self, predicate: &P) -> Option<&ElementView>
	where
		P: Fn(&ElementView) -> bool,
	{
		match self {
			View::Element(el) => {
				if predicate(el) {
					return Some(el);
				}
				el.child_views()
					.iter()
					.find_map(|c| c.find_element_inner(predicate))
			}
			View::Fragment(children) => children.iter().find_map(|c| c.find_element_inner(predicate)),
			View::Text(_) | View::Empty => None,
		}
	}

	/// Finds the first element carrying attribute `name` with value `value`.
	pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&ElementView> {
		self.find_element(|el| el.get_attr(name) == Some(value))
	}

	/// Finds the first element with the given tag name.
	pub fn find_by_tag(&self, tag: &str) -> Option<&ElementView> {
		self.find_element(|el| el.tag_name() == tag)
	}
}

/// Trait for types that can be converted into a View.
pub trait IntoView {
	/// Converts self into a View.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoView> IntoView for Option<T> {
	fn into_view(self) -> View {
		match self {
			Some(v) => v.into_view(),
			None => View::Empty,
		}
	}
}

impl<T: IntoView> IntoView for Vec<T> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(|v| v.into_view()).collect())
	}
}

impl IntoView for () {
	fn into_view(self) -> View {
		View::Empty
	}
}

impl<A: IntoView, B: IntoView> IntoView for (A, B) {
	fn into_view(self) -> View {
		View::Fragment(vec![self.0.into_view(), self.1.into_view()])
	}
}

impl<A: IntoView, B: IntoView, C: IntoView> IntoView for (A, B, C) {
	fn into_view(self) -> View {
		View::Fragment(vec![
			self.0.into_view(),
			self.1.into_view(),
			self.2.into_view(),
		])
	}
}

/// Escapes HTML special characters.
fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use core::cell::Cell;
	use rstest::rstest;

	#[rstest]
	fn test_element_render() {
		let view = View::element("div")
			.attr("id", "main")
			.child("Hello")
			.into_view();
		assert_eq!(view.render_to_string(), "<div id=\"main\">Hello</div>");
	}

	#[rstest]
	fn test_void_element_render() {
		let view = View::element("meta").attr("charset", "utf-8").into_view();
		assert_eq!(view.render_to_string(), "<meta charset=\"utf-8\" />");
	}

	#[rstest]
	#[case("<script>", "&lt;script&gt;")]
	#[case("a & b", "a &amp; b")]
	#[case("\"/x\"", "&quot;/x&quot;")]
	#[case("plain", "plain")]
	fn test_text_is_escaped(#[case] input: &'static str, #[case] expected: &str) {
		assert_eq!(View::text(input).render_to_string(), expected);
	}

	#[rstest]
	fn test_fragment_and_empty() {
		let view = ("a", View::empty(), String::from("b")).into_view();
		assert_eq!(view.render_to_string(), "ab");
		assert!(View::fragment(vec![View::Empty, View::Empty]).is_empty());
		assert!(!view.is_empty());
	}

	#[rstest]
	fn test_text_content_skips_markup() {
		let view = View::element("p")
			.child(View::element("b").child("Path"))
			.child(" \"/x\"")
			.into_view();
		assert_eq!(view.text_content(), "Path \"/x\"");
	}

	#[rstest]
	fn test_find_and_dispatch() {
		let clicks = Rc::new(Cell::new(0));
		let view = View::element("div")
			.child(
				View::element("button")
					.attr("data-action", "go")
					.on(EventType::Click, {
						let clicks = Rc::clone(&clicks);
						move |_| clicks.set(clicks.get() + 1)
					}),
			)
			.into_view();

		let button = view.find_by_attr("data-action", "go").unwrap();
		assert_eq!(button.tag_name(), "button");
		assert_eq!(button.dispatch(&Event::click()), 1);
		assert_eq!(button.dispatch(&Event::new(EventType::Input)), 0);
		assert_eq!(clicks.get(), 1);
		assert!(view.find_by_tag("span").is_none());
	}
}
