//! Host-independent DOM events.
//!
//! Views attach handlers for an [`EventType`]; the host translates its native
//! events into an [`Event`] and dispatches it through
//! [`ElementView::dispatch`](crate::component::ElementView::dispatch).

use core::cell::Cell;
use std::fmt;

/// Kinds of events a view can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
	/// Pointer click or keyboard activation.
	Click,
	/// Form submission.
	Submit,
	/// Value change on an input.
	Input,
}

impl EventType {
	/// Returns the DOM event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			EventType::Click => "click",
			EventType::Submit => "submit",
			EventType::Input => "input",
		}
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An event delivered to view handlers.
#[derive(Debug)]
pub struct Event {
	event_type: EventType,
	default_prevented: Cell<bool>,
}

impl Event {
	/// Creates an event of the given type.
	pub fn new(event_type: EventType) -> Self {
		Self {
			event_type,
			default_prevented: Cell::new(false),
		}
	}

	/// Creates a click event.
	pub fn click() -> Self {
		Self::new(EventType::Click)
	}

	/// Returns the event type.
	pub fn event_type(&self) -> EventType {
		self.event_type
	}

	/// Suppresses the host's default action (following a link, submitting a form).
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	/// Returns whether a handler suppressed the default action.
	pub fn is_default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}
