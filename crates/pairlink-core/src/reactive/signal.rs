//! Signal: a reactive value cell.
//!
//! `Signal<T>` shares its value through `Rc<RefCell<T>>`; every clone observes
//! the same value. Reads inside a running [`Effect`](super::Effect) register
//! the effect as a dependent, writes queue those dependents.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use super::runtime::{NodeId, try_with_runtime, with_runtime};

/// A reactive signal that holds a value and tracks dependencies.
#[derive(Clone)]
pub struct Signal<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<T>>,
}

impl<T: 'static> Signal<T> {
	/// Creates a new signal with the given initial value.
	pub fn new(value: T) -> Self {
		Self {
			id: NodeId::new(),
			value: Rc::new(RefCell::new(value)),
		}
	}

	/// Returns a clone of the current value, tracking the read.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	/// Returns a clone of the current value without tracking the read.
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Borrows the current value for the duration of `f`, tracking the read.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		with_runtime(|rt| rt.track_dependency(self.id));
		f(&self.value.borrow())
	}

	/// Borrows the current value for the duration of `f` without tracking.
	pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replaces the value and queues dependent effects.
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Mutates the value in place and queues dependent effects once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut self.value.borrow_mut());
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Returns the node id of this signal.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Drop for Signal<T> {
	fn drop(&mut self) {
		// Last clone going away
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &*self.value.borrow())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_signal_get_set() {
		let signal = Signal::new(0);
		assert_eq!(signal.get(), 0);
		signal.set(42);
		assert_eq!(signal.get(), 42);
	}

	#[rstest]
	fn test_signal_update() {
		let signal = Signal::new(vec![1, 2]);
		signal.update(|v| v.push(3));
		assert_eq!(signal.get_untracked(), vec![1, 2, 3]);
	}

	#[rstest]
	fn test_signal_clones_share_value() {
		let a = Signal::new(String::from("/"));
		let b = a.clone();
		b.set(String::from("/match"));
		assert_eq!(a.get(), "/match");
		assert_eq!(a.id(), b.id());
	}

	#[rstest]
	fn test_signal_with_borrows() {
		let signal = Signal::new(vec![1, 2, 3]);
		assert_eq!(signal.with(Vec::len), 3);
	}
}
