//! Navigation history.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One recorded navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
	path: String,
	state: Option<Value>,
}

impl HistoryEntry {
	/// Creates an entry.
	pub fn new(path: impl Into<String>, state: Option<Value>) -> Self {
		Self {
			path: path.into(),
			state,
		}
	}

	/// Path navigated to.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// State payload passed with the navigation.
	pub fn state(&self) -> Option<&Value> {
		self.state.as_ref()
	}
}

/// Chronological stack of navigations.
///
/// Never empty: the entry for the initial path is the floor and cannot be
/// popped. The top entry is the current location.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStack {
	entries: Vec<HistoryEntry>,
}

impl HistoryStack {
	/// Creates a stack holding only the initial entry.
	pub fn new(initial: HistoryEntry) -> Self {
		Self {
			entries: vec![initial],
		}
	}

	/// Appends an entry. Duplicates of the current top are kept.
	pub fn push(&mut self, entry: HistoryEntry) {
		self.entries.push(entry);
	}

	/// Removes the top entry and returns the new top.
	///
	/// Returns `None` without touching the stack when only the initial entry
	/// is left.
	pub fn pop(&mut self) -> Option<&HistoryEntry> {
		if self.entries.len() <= 1 {
			return None;
		}
		self.entries.pop();
		self.entries.last()
	}

	/// Current location.
	pub fn top(&self) -> &HistoryEntry {
		// len >= 1 is an invariant of every constructor and mutator
		&self.entries[self.entries.len() - 1]
	}

	/// Number of entries, initial entry included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Always `false`; present for API symmetry with `len`.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Whether a `pop` would succeed.
	pub fn can_pop(&self) -> bool {
		self.entries.len() > 1
	}

	/// Entries oldest first.
	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}

	/// Paths oldest first.
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(HistoryEntry::path)
	}
}
