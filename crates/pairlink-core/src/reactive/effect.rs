//! Effect: a side effect that re-runs when the signals it read change.
//!
//! Re-runs are always queued and executed by
//! [`flush_effects`](super::flush_effects). The first run either happens
//! immediately ([`Effect::new`]) or is queued as well ([`Effect::deferred`]),
//! which is how work is scheduled to run strictly after a render commits.

use core::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::runtime::{NodeId, try_with_runtime, with_runtime};

type EffectFn = Rc<RefCell<dyn FnMut() + 'static>>;

thread_local! {
	static EFFECT_FUNCTIONS: RefCell<BTreeMap<NodeId, EffectFn>> = RefCell::new(BTreeMap::new());
}

/// When an effect runs for the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectTiming {
	/// Run synchronously inside the constructor.
	#[default]
	Immediate,
	/// Queue the first run for the next flush.
	PostRender,
}

/// A reactive effect.
///
/// Dropping the handle disposes the effect: it is removed from the dependency
/// graph and never runs again.
pub struct Effect {
	id: NodeId,
	disposed: Rc<Cell<bool>>,
}

impl Effect {
	/// Creates an effect and runs it once immediately.
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		Self::new_with_timing(f, EffectTiming::Immediate)
	}

	/// Creates an effect whose first run waits for the next flush.
	pub fn deferred<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		Self::new_with_timing(f, EffectTiming::PostRender)
	}

	/// Creates an effect with explicit first-run timing.
	pub fn new_with_timing<F>(mut f: F, timing: EffectTiming) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let disposed = Rc::new(Cell::new(false));

		let guard = Rc::clone(&disposed);
		let effect_fn: EffectFn = Rc::new(RefCell::new(move || {
			if !guard.get() {
				f();
			}
		}));
		EFFECT_FUNCTIONS.with(|storage| {
			storage.borrow_mut().insert(id, effect_fn);
		});

		match timing {
			EffectTiming::Immediate => execute_effect(id),
			EffectTiming::PostRender => with_runtime(|rt| rt.schedule(id)),
		}

		Self { id, disposed }
	}

	/// Returns the node id of this effect.
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Returns whether the effect has been disposed.
	pub fn is_disposed(&self) -> bool {
		self.disposed.get()
	}

	/// Stops the effect and releases its resources.
	pub fn dispose(&self) {
		if self.disposed.replace(true) {
			return;
		}
		let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		// The closure is dropped after the storage borrow ends; it may own
		// other effects whose own drop needs the storage again.
		let removed = EFFECT_FUNCTIONS
			.try_with(|storage| storage.borrow_mut().remove(&self.id))
			.ok()
			.flatten();
		drop(removed);
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl std::fmt::Debug for Effect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Effect")
			.field("id", &self.id)
			.field("disposed", &self.disposed.get())
			.finish()
	}
}

/// Runs one effect with dependency tracking.
///
/// The function is cloned out of storage before it runs so that the effect may
/// itself create or dispose effects.
pub(super) fn execute_effect(id: NodeId) {
	let Some(effect_fn) = EFFECT_FUNCTIONS.with(|storage| storage.borrow().get(&id).cloned()) else {
		return;
	};
	// An effect that is already running (it re-queued itself) runs again on
	// the next flush instead of re-entering.
	let Ok(mut run) = effect_fn.try_borrow_mut() else {
		with_runtime(|rt| rt.schedule(id));
		return;
	};

	with_runtime(|rt| {
		rt.clear_dependencies(id);
		rt.push_observer(id);
	});
	(&mut *run)();
	with_runtime(|rt| rt.pop_observer());
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::{Signal, flush_effects, pending_effects, untrack};
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[serial]
	fn test_effect_runs_immediately() {
		let runs = Rc::new(Cell::new(0));
		let _effect = Effect::new({
			let runs = Rc::clone(&runs);
			move || runs.set(runs.get() + 1)
		});
		assert_eq!(runs.get(), 1);
	}

	#[rstest]
	#[serial]
	fn test_deferred_effect_waits_for_flush() {
		let runs = Rc::new(Cell::new(0));
		let _effect = Effect::deferred({
			let runs = Rc::clone(&runs);
			move || runs.set(runs.get() + 1)
		});
		assert_eq!(runs.get(), 0);
		assert_eq!(pending_effects(), 1);

		assert_eq!(flush_effects(), 1);
		assert_eq!(runs.get(), 1);
	}

	#[rstest]
	#[serial]
	fn test_effect_reruns_only_after_dependency_change() {
		let count = Signal::new(0);
		let unrelated = Signal::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));

		let _effect = Effect::new({
			let count = count.clone();
			let seen = Rc::clone(&seen);
			move || seen.borrow_mut().push(count.get())
		});

		unrelated.set(5);
		flush_effects();
		assert_eq!(*seen.borrow(), vec![0]);

		count.set(1);
		count.set(2);
		// Both writes collapse into one queued run
		assert_eq!(flush_effects(), 1);
		assert_eq!(*seen.borrow(), vec![0, 2]);
	}

	#[rstest]
	#[serial]
	fn test_untracked_read_is_not_a_dependency() {
		let count = Signal::new(0);
		let runs = Rc::new(Cell::new(0));

		let _effect = Effect::new({
			let count = count.clone();
			let runs = Rc::clone(&runs);
			move || {
				untrack(|| count.get());
				runs.set(runs.get() + 1);
			}
		});

		count.set(1);
		flush_effects();
		assert_eq!(runs.get(), 1);
	}

	#[rstest]
	#[serial]
	fn test_dispose_stops_reruns() {
		let count = Signal::new(0);
		let runs = Rc::new(Cell::new(0));

		let effect = Effect::new({
			let count = count.clone();
			let runs = Rc::clone(&runs);
			move || {
				let _ = count.get();
				runs.set(runs.get() + 1);
			}
		});
		effect.dispose();
		assert!(effect.is_disposed());

		count.set(1);
		flush_effects();
		assert_eq!(runs.get(), 1);
	}

	#[rstest]
	#[serial]
	fn test_drop_removes_queued_run() {
		let runs = Rc::new(Cell::new(0));
		let effect = Effect::deferred({
			let runs = Rc::clone(&runs);
			move || runs.set(runs.get() + 1)
		});
		drop(effect);

		assert_eq!(flush_effects(), 0);
		assert_eq!(runs.get(), 0);
	}

	#[rstest]
	#[serial]
	fn test_effect_writing_other_signal_cascades() {
		let source = Signal::new(1);
		let doubled = Signal::new(0);

		let _effect = Effect::new({
			let source = source.clone();
			let doubled = doubled.clone();
			move || doubled.set(source.get() * 2)
		});
		assert_eq!(doubled.get(), 2);

		source.set(5);
		flush_effects();
		assert_eq!(doubled.get(), 10);
	}
}
