//! Component trait definition.

use super::into_view::View;

/// Trait for reusable UI components.
///
/// # Example
///
/// ```
/// use pairlink_pages::component::{Component, IntoView, View};
///
/// struct Greeting {
///     name: String,
/// }
///
/// impl Component for Greeting {
///     fn render(&self) -> View {
///         View::element("div")
///             .attr("class", "greeting")
///             .child(format!("Hello, {}!", self.name))
///             .into_view()
///     }
///
///     fn name() -> &'static str {
///         "Greeting"
///     }
/// }
///
/// let html = Greeting { name: "Ada".into() }.render().render_to_string();
/// assert_eq!(html, "<div class=\"greeting\">Hello, Ada!</div>");
/// ```
pub trait Component: 'static {
	/// Renders the component to a View.
	fn render(&self) -> View;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;
}
