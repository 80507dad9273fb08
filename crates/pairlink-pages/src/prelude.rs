//! Common imports for applications.

pub use crate::component::{Component, ElementView, IntoView, View};
pub use crate::dom::{Event, EventType};
pub use crate::router::{
	ConditionalRender, DocumentTitle, GuardCondition, HistoryEntry, HistoryStack, Link,
	MemoryDocument, MenuItem, NavMenu, Navigator, NavigatorBuilder, PathSet, RouteContext,
	RouteDescriptor, RouteEntry, RouteGuard, RouteManifest, RouteMatch, RouteMatcher, RouteTable,
	Router, RouterError, RouterOutlet, ViewRegistry,
};
pub use pairlink_conf::NavigationSettings;
pub use pairlink_core::{
	Effect, ManualTimers, Signal, TimerScheduler, WallClockTimers, flush_effects, untrack,
};
