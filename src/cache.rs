//! Client-local fallback cache for snapshot bundles.
//!
//! One JSON blob per snapshot id under the platform data directory, read
//! only when the live fetch fails and never treated as authoritative.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{AppError, Result};
use crate::models::snapshot::RosterSnapshot;

/// Narrow get/set/remove/clear interface over the blob store.
#[derive(Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    /// Cache rooted in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "rosterdesk")
            .ok_or_else(|| AppError::cache("No platform data directory available"))?;
        Self::open(dirs.data_dir().join("snapshots"))
    }

    /// Cache rooted at an explicit directory.
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        // Ids are server-issued; refuse anything that could escape the dir
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(AppError::cache(format!("Invalid snapshot id '{id}'")));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    /// Read the cached bundle for a snapshot id, if present.
    pub fn get(&self, id: &str) -> Result<Option<RosterSnapshot>> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Store the last successfully loaded bundle for a snapshot id.
    pub fn set(&self, snapshot: &RosterSnapshot) -> Result<()> {
        let path = self.path_for(&snapshot.id)?;
        fs::write(path, serde_json::to_string(snapshot)?)?;
        Ok(())
    }

    /// Drop one snapshot's cached bundle.
    pub fn remove(&self, id: &str) -> Result<()> {
        let path = self.path_for(id)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Drop every cached bundle.
    pub fn clear(&self) -> Result<()> {
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::note::NoteMap;
    use crate::models::status::StatusMap;
    use std::collections::BTreeMap;

    fn snapshot(id: &str) -> RosterSnapshot {
        let mut snap = RosterSnapshot::from_live("copy", 7, 2025, &BTreeMap::new(), &StatusMap::new(), &NoteMap::new());
        snap.id = id.to_string();
        snap
    }

    fn temp_cache() -> (tempfile::TempDir, SnapshotCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::open(dir.path().join("snapshots")).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_get_set_round_trip() {
        let (_dir, cache) = temp_cache();
        let snap = snapshot("snap-1");

        cache.set(&snap).unwrap();
        assert_eq!(cache.get("snap-1").unwrap(), Some(snap));
    }

    #[test]
    fn test_get_missing_is_none() {
        let (_dir, cache) = temp_cache();
        assert_eq!(cache.get("snap-9").unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let (_dir, cache) = temp_cache();
        cache.set(&snapshot("snap-1")).unwrap();

        cache.remove("snap-1").unwrap();
        assert_eq!(cache.get("snap-1").unwrap(), None);
    }

    #[test]
    fn test_clear_drops_everything() {
        let (_dir, cache) = temp_cache();
        cache.set(&snapshot("snap-1")).unwrap();
        cache.set(&snapshot("snap-2")).unwrap();

        cache.clear().unwrap();
        assert_eq!(cache.get("snap-1").unwrap(), None);
        assert_eq!(cache.get("snap-2").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_traversal_ids() {
        let (_dir, cache) = temp_cache();
        assert!(cache.get("../escape").is_err());
        assert!(cache.get("").is_err());
    }
}
