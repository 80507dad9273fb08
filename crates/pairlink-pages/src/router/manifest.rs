//! Declarative route configuration.
//!
//! A [`RouteManifest`] lists routes and menu items by name; a
//! [`ViewRegistry`] supplies the view factory for each name. Resolving the
//! two yields a [`RouteTable`].
//!
//! ```toml
//! [[routes]]
//! path = "/"
//! view = "home"
//! title = "Home"
//!
//! [[routes]]
//! path = "/history"
//! view = "history"
//! props = { page_size = 20 }
//!
//! [[menu]]
//! path = "/"
//! label = "Home"
//! icon = "home"
//! ```

use super::components::MenuItem;
use super::error::RouterError;
use super::route::{RouteContext, RouteDescriptor, RouteTable, ViewFactory};
use crate::component::View;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// A route declared in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
	/// Exact path.
	pub path: String,
	/// Name of the view in the [`ViewRegistry`].
	pub view: String,
	/// Optional document title.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Optional static props.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub props: Option<Map<String, Value>>,
}

impl RouteEntry {
	/// Creates an entry without title or props.
	pub fn new(path: impl Into<String>, view: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			view: view.into(),
			title: None,
			props: None,
		}
	}

	/// Sets the title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}
}

/// Routes and menu loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteManifest {
	/// Routes in priority order.
	#[serde(default)]
	pub routes: Vec<RouteEntry>,
	/// Navigation menu in display order.
	#[serde(default)]
	pub menu: Vec<MenuItem>,
}

impl RouteManifest {
	/// Parses a manifest from TOML.
	pub fn from_toml_str(source: &str) -> Result<Self, RouterError> {
		Ok(toml::from_str(source)?)
	}

	/// Routes and menu of the pairing application.
	pub fn default_pairing_manifest() -> Self {
		let pages = [
			("/", "home", "Home", "Home", "home"),
			("/match", "match", "Start matching", "Match", "target"),
			("/register", "register", "Create or join a pool", "Create/Join", "memo"),
			("/history", "history", "History", "History", "scroll"),
			("/remove", "remove", "Remove participant", "Remove", "trash"),
		];
		Self {
			routes: pages
				.iter()
				.map(|(path, view, title, _, _)| RouteEntry::new(*path, *view).title(*title))
				.collect(),
			menu: pages
				.iter()
				.map(|(path, _, _, label, icon)| MenuItem::new(*path, *label).icon(*icon))
				.collect(),
		}
	}

	/// Menu items in display order.
	pub fn menu(&self) -> &[MenuItem] {
		&self.menu
	}

	/// Resolves every entry against `registry`.
	///
	/// Fails on the first entry whose path is not absolute or whose view is
	/// not registered.
	pub fn into_route_table(&self, registry: &ViewRegistry) -> Result<RouteTable, RouterError> {
		let mut routes = Vec::with_capacity(self.routes.len());
		for entry in &self.routes {
			if !entry.path.starts_with('/') {
				return Err(RouterError::InvalidPath(entry.path.clone()));
			}
			let view = registry
				.get(&entry.view)
				.ok_or_else(|| RouterError::UnknownView {
					path: entry.path.clone(),
					view: entry.view.clone(),
				})?;

			let mut route = RouteDescriptor::from_factory(entry.path.clone(), view);
			if let Some(title) = &entry.title {
				route = route.title(title.clone());
			}
			if let Some(props) = &entry.props {
				route = route.props(props.clone());
			}
			routes.push(route);
		}
		tracing::debug!(routes = routes.len(), "route manifest resolved");
		Ok(RouteTable::new(routes))
	}
}

/// View factories by name.
#[derive(Clone, Default)]
pub struct ViewRegistry {
	views: HashMap<String, ViewFactory>,
}

impl ViewRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `view` under `name`, replacing any earlier registration.
	pub fn register<F>(mut self, name: impl Into<String>, view: F) -> Self
	where
		F: Fn(&RouteContext) -> View + 'static,
	{
		self.views.insert(name.into(), Rc::new(view));
		self
	}

	/// Factory registered under `name`.
	pub fn get(&self, name: &str) -> Option<ViewFactory> {
		self.views.get(name).map(Rc::clone)
	}

	/// Whether `name` is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.views.contains_key(name)
	}
}

impl std::fmt::Debug for ViewRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut names = self.views.keys().collect::<Vec<_>>();
		names.sort();
		f.debug_struct("ViewRegistry").field("views", &names).finish()
	}
}
