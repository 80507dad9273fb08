//! Thread-local reactive runtime.
//!
//! Tracks which effects read which signals and holds the queue of effects
//! waiting for the next [`flush_effects`] call.

use core::cell::RefCell;
use core::sync::atomic::{AtomicU64, Ordering};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Upper bound on effect runs in a single flush.
///
/// An effect that writes a signal it also reads re-queues itself; the bound
/// turns such a cycle into a logged warning instead of a hang.
const MAX_FLUSH_RUNS: usize = 10_000;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a node (signal or effect) in the reactive graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
	/// Allocates a fresh, process-unique id.
	pub fn new() -> Self {
		Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
	}

	/// Returns the raw id value.
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Debug, Default)]
pub(super) struct Runtime {
	/// Effects currently executing, innermost last.
	observers: Vec<NodeId>,
	/// Depth of nested `untrack` scopes.
	untracked: usize,
	/// signal -> effects that read it
	subscribers: BTreeMap<NodeId, BTreeSet<NodeId>>,
	/// effect -> signals it read during its last run
	sources: BTreeMap<NodeId, BTreeSet<NodeId>>,
	pending: VecDeque<NodeId>,
	queued: BTreeSet<NodeId>,
}

impl Runtime {
	pub(super) fn track_dependency(&mut self, signal: NodeId) {
		if self.untracked > 0 {
			return;
		}
		if let Some(&effect) = self.observers.last() {
			self.subscribers.entry(signal).or_default().insert(effect);
			self.sources.entry(effect).or_default().insert(signal);
		}
	}

	pub(super) fn notify_signal_change(&mut self, signal: NodeId) {
		let Some(effects) = self.subscribers.get(&signal) else {
			return;
		};
		let effects: Vec<NodeId> = effects.iter().copied().collect();
		for effect in effects {
			self.schedule(effect);
		}
	}

	pub(super) fn schedule(&mut self, effect: NodeId) {
		if self.queued.insert(effect) {
			self.pending.push_back(effect);
		}
	}

	pub(super) fn clear_dependencies(&mut self, effect: NodeId) {
		if let Some(signals) = self.sources.remove(&effect) {
			for signal in signals {
				if let Some(subs) = self.subscribers.get_mut(&signal) {
					subs.remove(&effect);
					if subs.is_empty() {
						self.subscribers.remove(&signal);
					}
				}
			}
		}
	}

	pub(super) fn push_observer(&mut self, effect: NodeId) {
		self.observers.push(effect);
	}

	pub(super) fn pop_observer(&mut self) {
		self.observers.pop();
	}

	pub(super) fn remove_node(&mut self, id: NodeId) {
		self.clear_dependencies(id);
		if let Some(subs) = self.subscribers.remove(&id) {
			for effect in subs {
				if let Some(signals) = self.sources.get_mut(&effect) {
					signals.remove(&id);
				}
			}
		}
		if self.queued.remove(&id) {
			self.pending.retain(|queued| *queued != id);
		}
	}

	fn next_pending(&mut self) -> Option<NodeId> {
		let next = self.pending.pop_front()?;
		self.queued.remove(&next);
		Some(next)
	}

	#[cfg(test)]
	pub(super) fn subscriber_count(&self, signal: NodeId) -> usize {
		self.subscribers.get(&signal).map_or(0, BTreeSet::len)
	}
}

thread_local! {
	static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

pub(super) fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
	RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Like [`with_runtime`], but tolerates a destroyed thread-local (drops
/// during thread teardown).
pub(super) fn try_with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> Option<R> {
	RUNTIME
		.try_with(|rt| rt.try_borrow_mut().ok().map(|mut rt| f(&mut rt)))
		.ok()
		.flatten()
}

/// Runs every queued effect, including effects queued by the effects themselves.
///
/// Returns the number of effect runs performed.
pub fn flush_effects() -> usize {
	let mut runs = 0;
	while let Some(effect) = with_runtime(Runtime::next_pending) {
		if runs == MAX_FLUSH_RUNS {
			tracing::warn!(
				limit = MAX_FLUSH_RUNS,
				"effect flush limit reached; remaining effects stay queued"
			);
			with_runtime(|rt| rt.schedule(effect));
			break;
		}
		super::effect::execute_effect(effect);
		runs += 1;
	}
	if runs > 0 {
		tracing::trace!(runs, "flushed effects");
	}
	runs
}

/// Returns how many effects are waiting for the next flush.
pub fn pending_effects() -> usize {
	with_runtime(|rt| rt.pending.len())
}

/// Runs `f` without recording signal reads as dependencies of the current effect.
pub fn untrack<R>(f: impl FnOnce() -> R) -> R {
	with_runtime(|rt| rt.untracked += 1);
	let result = f();
	with_runtime(|rt| rt.untracked -= 1);
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_node_ids_are_unique() {
		let a = NodeId::new();
		let b = NodeId::new();
		assert_ne!(a, b);
		assert!(b.as_u64() > a.as_u64());
	}

	#[rstest]
	fn test_schedule_deduplicates() {
		let mut rt = Runtime::default();
		let effect = NodeId::new();
		rt.schedule(effect);
		rt.schedule(effect);
		assert_eq!(rt.pending.len(), 1);
		assert_eq!(rt.next_pending(), Some(effect));
		assert_eq!(rt.next_pending(), None);
	}

	#[rstest]
	fn test_tracking_requires_observer() {
		let mut rt = Runtime::default();
		let signal = NodeId::new();
		rt.track_dependency(signal);
		assert_eq!(rt.subscriber_count(signal), 0);

		let effect = NodeId::new();
		rt.push_observer(effect);
		rt.track_dependency(signal);
		rt.pop_observer();
		assert_eq!(rt.subscriber_count(signal), 1);

		rt.clear_dependencies(effect);
		assert_eq!(rt.subscriber_count(signal), 0);
	}

	#[rstest]
	fn test_remove_node_drops_pending_entry() {
		let mut rt = Runtime::default();
		let effect = NodeId::new();
		rt.schedule(effect);
		rt.remove_node(effect);
		assert_eq!(rt.next_pending(), None);
	}
}
