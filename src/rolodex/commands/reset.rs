use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{EntityStore, SnapshotBackend, StoreOptions};

/// Replace the snapshot behind `backend` with an empty one, without reading
/// it first. This is the way out of a `CorruptState` error.
pub fn run<R: Record, B: SnapshotBackend>(
    backend: B,
    options: StoreOptions,
) -> Result<(EntityStore<R, B>, CmdResult)> {
    let store = EntityStore::<R, B>::reset(backend, options)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} store reset: {}",
        R::KIND,
        store.location()
    )));
    Ok((store, result))
}
