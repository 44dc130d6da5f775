use super::StoreKind;
use crate::error::Result;

/// Abstract interface for raw snapshot I/O.
///
/// A backend only moves the serialized document around; parsing,
/// validation and the in-memory collection live in [`super::EntityStore`].
pub trait SnapshotBackend {
    /// Read the raw snapshot.
    /// Returns Ok(None) if no snapshot has been written yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the snapshot with `contents`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, contents: &str) -> Result<()>;

    /// Where the snapshot lives, for messages and logs.
    fn location(&self) -> String;
}

/// Hands out one backend per store kind.
pub trait BackendProvider {
    type Backend: SnapshotBackend;

    fn backend(&self, kind: StoreKind) -> Result<Self::Backend>;
}
