//! Document title sink.

use core::cell::RefCell;
use std::rc::Rc;

/// Receives the document title after each navigation to a titled route.
///
/// Writes are best effort; implementations must not fail navigation.
pub trait DocumentTitle {
	/// Replaces the document title.
	fn set_title(&self, title: &str);
}

impl<T: DocumentTitle + ?Sized> DocumentTitle for Rc<T> {
	fn set_title(&self, title: &str) {
		(**self).set_title(title)
	}
}

/// In-memory document that records the last title written.
///
/// Clones share the same title.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
	title: Rc<RefCell<Option<String>>>,
}

impl MemoryDocument {
	/// Creates a document without a title.
	pub fn new() -> Self {
		Self::default()
	}

	/// Last title written, if any.
	pub fn title(&self) -> Option<String> {
		self.title.borrow().clone()
	}
}

impl DocumentTitle for MemoryDocument {
	fn set_title(&self, title: &str) {
		*self.title.borrow_mut() = Some(title.to_string());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_memory_document_shares_title() {
		let document = MemoryDocument::new();
		let sink: Rc<dyn DocumentTitle> = Rc::new(document.clone());
		assert!(document.title().is_none());

		sink.set_title("History - Christmas Link");
		assert_eq!(document.title().as_deref(), Some("History - Christmas Link"));
	}
}
