//! Deferred callbacks.
//!
//! [`TimerScheduler`] is the seam for "run this later" work. The navigation
//! core uses it only for advisory state (clearing a transition flag), so a
//! scheduler never gates or orders other operations.
//!
//! - [`WallClockTimers`]: real deadlines, fired when the owner polls
//!   [`run_due`](TimerScheduler::run_due).
//! - [`ManualTimers`]: virtual clock advanced explicitly by the host or a test.
//! - [`TokioTimers`] (feature `tokio`): real timers on a tokio `LocalSet`.

use core::cell::RefCell;
use core::time::Duration;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

/// Callback run when a timeout elapses.
pub type TimerCallback = Box<dyn FnOnce() + 'static>;

/// Handle identifying a scheduled timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeoutHandle(u64);

impl TimeoutHandle {
	/// Returns the raw handle value.
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

/// Schedules callbacks to run after a delay on the current thread.
pub trait TimerScheduler {
	/// Runs `callback` once `delay` has elapsed.
	fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimeoutHandle;

	/// Cancels a pending timeout. Unknown or already fired handles are ignored.
	fn clear_timeout(&self, handle: TimeoutHandle);

	/// Fires callbacks that are due now and returns how many ran.
	///
	/// Schedulers driven by their own event loop leave this as a no-op.
	fn run_due(&self) -> usize {
		0
	}
}

impl<T: TimerScheduler + ?Sized> TimerScheduler for Rc<T> {
	fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimeoutHandle {
		(**self).set_timeout(delay, callback)
	}

	fn clear_timeout(&self, handle: TimeoutHandle) {
		(**self).clear_timeout(handle)
	}

	fn run_due(&self) -> usize {
		(**self).run_due()
	}
}

#[derive(Default)]
struct WallClockState {
	next_id: u64,
	queue: BTreeMap<(Instant, u64), TimerCallback>,
}

/// Timers measured against [`Instant::now`].
///
/// Nothing fires on its own: deadlines are checked whenever
/// [`run_due`](TimerScheduler::run_due) is called. The router polls it on
/// every commit, so no event loop is needed. Clones share the same queue.
#[derive(Clone, Default)]
pub struct WallClockTimers {
	state: Rc<RefCell<WallClockState>>,
}

impl WallClockTimers {
	/// Creates a scheduler with no pending timeouts.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of timeouts that have not fired yet.
	pub fn pending(&self) -> usize {
		self.state.borrow().queue.len()
	}
}

impl TimerScheduler for WallClockTimers {
	fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimeoutHandle {
		let mut state = self.state.borrow_mut();
		let id = state.next_id;
		state.next_id += 1;
		state.queue.insert((Instant::now() + delay, id), callback);
		TimeoutHandle(id)
	}

	fn clear_timeout(&self, handle: TimeoutHandle) {
		let mut state = self.state.borrow_mut();
		let key = state.queue.keys().find(|(_, id)| *id == handle.0).copied();
		if let Some(key) = key {
			state.queue.remove(&key);
		}
	}

	fn run_due(&self) -> usize {
		let now = Instant::now();
		let mut fired = 0;
		loop {
			let due = {
				let mut state = self.state.borrow_mut();
				match state.queue.keys().next().copied() {
					Some(key) if key.0 <= now => state.queue.remove(&key),
					_ => None,
				}
			};
			let Some(callback) = due else { break };
			callback();
			fired += 1;
		}
		if fired > 0 {
			tracing::trace!(fired, "wall clock timers fired");
		}
		fired
	}
}

impl std::fmt::Debug for WallClockTimers {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WallClockTimers")
			.field("pending", &self.state.borrow().queue.len())
			.finish()
	}
}

#[derive(Default)]
struct ManualState {
	now: Duration,
	next_id: u64,
	// Ordered by (deadline, insertion) so equal deadlines fire in FIFO order.
	queue: BTreeMap<(Duration, u64), TimerCallback>,
}

/// A virtual-clock scheduler.
///
/// Time only moves when [`advance`](Self::advance) is called. Clones share the
/// same clock and queue.
///
/// # Example
///
/// ```
/// use pairlink_core::timers::{ManualTimers, TimerScheduler};
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let timers = ManualTimers::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&fired);
/// timers.set_timeout(Duration::from_millis(100), Box::new(move || flag.set(true)));
///
/// timers.advance(Duration::from_millis(99));
/// assert!(!fired.get());
/// timers.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
#[derive(Clone, Default)]
pub struct ManualTimers {
	state: Rc<RefCell<ManualState>>,
}

impl ManualTimers {
	/// Creates a scheduler with its clock at zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current virtual time.
	pub fn now(&self) -> Duration {
		self.state.borrow().now
	}

	/// Returns the number of timeouts that have not fired yet.
	pub fn pending(&self) -> usize {
		self.state.borrow().queue.len()
	}

	/// Moves the clock forward by `by`, firing every timeout that comes due.
	///
	/// Callbacks run in deadline order with the clock set to their deadline;
	/// timeouts they schedule fire in the same call if they fall inside the
	/// window. Returns the number of callbacks run.
	pub fn advance(&self, by: Duration) -> usize {
		let target = self.now() + by;
		let mut fired = 0;
		loop {
			let due = {
				let mut state = self.state.borrow_mut();
				match state.queue.keys().next().copied() {
					Some(key) if key.0 <= target => {
						state.now = key.0;
						state.queue.remove(&key)
					}
					_ => None,
				}
			};
			let Some(callback) = due else { break };
			callback();
			fired += 1;
		}
		self.state.borrow_mut().now = target;
		if fired > 0 {
			tracing::trace!(fired, now = ?target, "manual timers fired");
		}
		fired
	}

	/// Advances the clock to the last pending deadline, firing everything.
	pub fn run_all(&self) -> usize {
		let last = self
			.state
			.borrow()
			.queue
			.keys()
			.next_back()
			.map(|(deadline, _)| *deadline);
		match last {
			Some(deadline) => {
				let now = self.now();
				self.advance(deadline.saturating_sub(now))
			}
			None => 0,
		}
	}
}

impl TimerScheduler for ManualTimers {
	fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimeoutHandle {
		let mut state = self.state.borrow_mut();
		let id = state.next_id;
		state.next_id += 1;
		let deadline = state.now + delay;
		state.queue.insert((deadline, id), callback);
		TimeoutHandle(id)
	}

	fn clear_timeout(&self, handle: TimeoutHandle) {
		let mut state = self.state.borrow_mut();
		let key = state.queue.keys().find(|(_, id)| *id == handle.0).copied();
		if let Some(key) = key {
			state.queue.remove(&key);
		}
	}

	fn run_due(&self) -> usize {
		self.advance(Duration::ZERO)
	}
}

impl std::fmt::Debug for ManualTimers {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("ManualTimers")
			.field("now", &state.now)
			.field("pending", &state.queue.len())
			.finish()
	}
}

#[cfg(feature = "tokio")]
mod tokio_timers {
	use super::{TimeoutHandle, TimerCallback, TimerScheduler};
	use core::cell::{Cell, RefCell};
	use core::time::Duration;
	use std::collections::HashMap;
	use std::rc::Rc;
	use tokio::task::JoinHandle;

	/// Timers backed by `tokio::time::sleep` on the current `LocalSet`.
	///
	/// Callbacks are not `Send`, so `set_timeout` must be called from inside a
	/// `tokio::task::LocalSet`.
	#[derive(Clone, Default)]
	pub struct TokioTimers {
		next_id: Rc<Cell<u64>>,
		tasks: Rc<RefCell<HashMap<u64, JoinHandle<()>>>>,
	}

	impl TokioTimers {
		/// Creates a scheduler with no pending timeouts.
		pub fn new() -> Self {
			Self::default()
		}

		/// Returns the number of timeouts that have not fired yet.
		pub fn pending(&self) -> usize {
			self.tasks.borrow().len()
		}
	}

	impl TimerScheduler for TokioTimers {
		fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimeoutHandle {
			let id = self.next_id.get();
			self.next_id.set(id + 1);

			let tasks = Rc::clone(&self.tasks);
			let handle = tokio::task::spawn_local(async move {
				tokio::time::sleep(delay).await;
				tasks.borrow_mut().remove(&id);
				callback();
			});
			self.tasks.borrow_mut().insert(id, handle);
			TimeoutHandle(id)
		}

		fn clear_timeout(&self, handle: TimeoutHandle) {
			if let Some(task) = self.tasks.borrow_mut().remove(&handle.0) {
				task.abort();
			}
		}
	}

	impl std::fmt::Debug for TokioTimers {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("TokioTimers")
				.field("pending", &self.tasks.borrow().len())
				.finish()
		}
	}
}

#[cfg(feature = "tokio")]
pub use tokio_timers::TokioTimers;

#[cfg(test)]
mod tests {
	use super::*;
	use core::cell::Cell;
	use rstest::rstest;

	fn record(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> TimerCallback {
		let log = Rc::clone(log);
		Box::new(move || log.borrow_mut().push(label))
	}

	#[rstest]
	fn test_fires_in_deadline_order() {
		let timers = ManualTimers::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		timers.set_timeout(Duration::from_millis(30), record(&log, "c"));
		timers.set_timeout(Duration::from_millis(10), record(&log, "a"));
		timers.set_timeout(Duration::from_millis(10), record(&log, "b"));

		assert_eq!(timers.advance(Duration::from_millis(50)), 3);
		assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
		assert_eq!(timers.now(), Duration::from_millis(50));
	}

	#[rstest]
	fn test_clear_timeout_cancels() {
		let timers = ManualTimers::new();
		let fired = Rc::new(Cell::new(false));
		let flag = Rc::clone(&fired);
		let handle = timers.set_timeout(Duration::from_millis(5), Box::new(move || flag.set(true)));

		timers.clear_timeout(handle);
		timers.advance(Duration::from_secs(1));
		assert!(!fired.get());
		assert_eq!(timers.pending(), 0);
	}

	#[rstest]
	fn test_callback_can_schedule_within_window() {
		let timers = ManualTimers::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		let inner = timers.clone();
		let nested_log = Rc::clone(&log);
		timers.set_timeout(
			Duration::from_millis(10),
			Box::new(move || {
				nested_log.borrow_mut().push("outer");
				inner.set_timeout(Duration::from_millis(10), record(&nested_log, "inner"));
			}),
		);

		assert_eq!(timers.advance(Duration::from_millis(25)), 2);
		assert_eq!(*log.borrow(), vec!["outer", "inner"]);
	}

	#[rstest]
	fn test_run_all_drains_queue() {
		let timers = ManualTimers::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		timers.set_timeout(Duration::from_millis(100), record(&log, "late"));
		timers.set_timeout(Duration::from_millis(1), record(&log, "early"));

		assert_eq!(timers.run_all(), 2);
		assert_eq!(timers.now(), Duration::from_millis(100));
		assert_eq!(timers.run_all(), 0);
	}

	#[rstest]
	fn test_wall_clock_fires_only_due_timeouts() {
		let timers = WallClockTimers::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		timers.set_timeout(Duration::ZERO, record(&log, "now"));
		timers.set_timeout(Duration::from_secs(3600), record(&log, "later"));

		assert_eq!(timers.run_due(), 1);
		assert_eq!(*log.borrow(), vec!["now"]);
		assert_eq!(timers.pending(), 1);
	}

	#[rstest]
	fn test_wall_clock_fires_after_sleep() {
		let timers = WallClockTimers::new();
		let fired = Rc::new(Cell::new(false));
		let flag = Rc::clone(&fired);
		timers.set_timeout(Duration::from_millis(20), Box::new(move || flag.set(true)));
		assert_eq!(timers.run_due(), 0);

		std::thread::sleep(Duration::from_millis(40));
		assert_eq!(timers.run_due(), 1);
		assert!(fired.get());
	}

	#[rstest]
	fn test_run_due_through_rc_dyn() {
		let timers = ManualTimers::new();
		let shared: Rc<dyn TimerScheduler> = Rc::new(timers.clone());
		let fired = Rc::new(Cell::new(false));
		let flag = Rc::clone(&fired);
		shared.set_timeout(Duration::ZERO, Box::new(move || flag.set(true)));

		assert_eq!(shared.run_due(), 1);
		assert!(fired.get());
		assert_eq!(timers.now(), Duration::ZERO);
	}

	#[cfg(feature = "tokio")]
	#[tokio::test(start_paused = true)]
	async fn test_tokio_timers_fire_after_delay() {
		let local = tokio::task::LocalSet::new();
		local
			.run_until(async {
				let timers = TokioTimers::new();
				let fired = Rc::new(Cell::new(false));
				let flag = Rc::clone(&fired);
				timers.set_timeout(Duration::from_millis(100), Box::new(move || flag.set(true)));
				assert_eq!(timers.pending(), 1);

				tokio::time::sleep(Duration::from_millis(150)).await;
				assert!(fired.get());
				assert_eq!(timers.pending(), 0);
			})
			.await;
	}

	#[cfg(feature = "tokio")]
	#[tokio::test(start_paused = true)]
	async fn test_tokio_timers_clear() {
		let local = tokio::task::LocalSet::new();
		local
			.run_until(async {
				let timers = TokioTimers::new();
				let fired = Rc::new(Cell::new(false));
				let flag = Rc::clone(&fired);
				let handle =
					timers.set_timeout(Duration::from_millis(100), Box::new(move || flag.set(true)));
				timers.clear_timeout(handle);

				tokio::time::sleep(Duration::from_millis(150)).await;
				assert!(!fired.get());
			})
			.await;
	}
}
