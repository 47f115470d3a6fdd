//! Store connection utilities.

use std::path::Path;

use crate::{RecordStore, StoreError, memory::MemoryStore, snapshot::Snapshot};

/// Environment variable naming the JSON snapshot to seed the store from.
pub const SNAPSHOT_ENV_VAR: &str = "RIGHTS_MONITOR_SNAPSHOT";

/// Opens a store seeded from `snapshot`, or an empty store if `None`.
///
/// # Errors
///
/// Returns [`StoreError`] if the snapshot can't be read or parsed.
pub async fn open(snapshot: Option<&Path>) -> Result<MemoryStore, StoreError> {
    match snapshot {
        Some(path) => Ok(MemoryStore::from_snapshot(Snapshot::load(path).await?)),
        None => {
            log::info!("No snapshot configured, starting with an empty store");
            Ok(MemoryStore::new())
        }
    }
}

/// Creates the record store from the `RIGHTS_MONITOR_SNAPSHOT` environment
/// variable.
///
/// The returned handle is owned by the caller and should be created once at
/// startup and shared from there.
///
/// # Errors
///
/// Returns [`StoreError`] if a configured snapshot can't be loaded.
pub async fn connect_from_env() -> Result<Box<dyn RecordStore>, StoreError> {
    let path = std::env::var(SNAPSHOT_ENV_VAR).ok().filter(|p| !p.is_empty());
    let store = open(path.as_deref().map(Path::new)).await?;
    Ok(Box::new(store))
}
