use crate::commands::CmdResult;
use crate::config::CONFIG_FILENAME;
use crate::error::Result;
use crate::store::{BackendProvider, SnapshotBackend, StoreKind};
use std::path::Path;

/// Where each snapshot and the config file live, in that order.
pub fn run<P: BackendProvider>(provider: &P, config_dir: &Path) -> Result<CmdResult> {
    let mut locations = Vec::with_capacity(StoreKind::ALL.len() + 1);
    for kind in StoreKind::ALL {
        locations.push(provider.backend(kind)?.location());
    }
    locations.push(config_dir.join(CONFIG_FILENAME).display().to_string());
    Ok(CmdResult::default().with_locations(locations))
}
