use super::backend::{BackendProvider, SnapshotBackend};
use super::StoreKind;
use crate::error::{Result, RolodexError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// In-memory snapshot backend for testing.
///
/// Clones share the same snapshot, so a test can keep a handle, drop the
/// store, and reopen a new one over what the first one persisted. Uses
/// `Rc`/`RefCell` since rolodex is single-threaded.
#[derive(Clone, Default)]
pub struct MemBackend {
    snapshot: Rc<RefCell<Option<String>>>,
    simulate_write_error: Rc<Cell<bool>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `contents`, as if a previous run wrote it.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.snapshot.borrow_mut() = Some(contents.into());
        backend
    }

    /// The raw snapshot as last saved.
    pub fn contents(&self) -> Option<String> {
        self.snapshot.borrow().clone()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl SnapshotBackend for MemBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, contents: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(RolodexError::Store("Simulated write error".to_string()));
        }
        *self.snapshot.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory://snapshot".to_string()
    }
}

/// One shared [`MemBackend`] per store kind.
#[derive(Clone, Default)]
pub struct MemProvider {
    pub contacts: MemBackend,
    pub tasks: MemBackend,
}

impl MemProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BackendProvider for MemProvider {
    type Backend = MemBackend;

    fn backend(&self, kind: StoreKind) -> Result<MemBackend> {
        Ok(match kind {
            StoreKind::Contacts => self.contacts.clone(),
            StoreKind::Tasks => self.tasks.clone(),
        })
    }
}
