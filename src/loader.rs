//! Roster data loading orchestration.
//!
//! Produces the assignment and status maps for a month, either from the
//! live backend or from a snapshot bundle with cache/caller fallback.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::api::RosterApi;
use crate::cache::SnapshotCache;
use crate::error::Result;
use crate::models::note::NoteMap;
use crate::models::shift::GroupRoster;
use crate::models::snapshot::RosterSnapshot;
use crate::models::staff::Staff;
use crate::models::status::StatusMap;

/// Everything one roster view needs, plus non-fatal warnings gathered
/// while loading. The view renders whatever is here; warnings surface as
/// dismissible messages, never as blocking errors.
#[derive(Debug, Clone, Default)]
pub struct LoadedRoster {
    pub month: u32,
    pub year: i32,
    /// Set when this data came from a snapshot rather than the live month.
    pub snapshot_id: Option<String>,
    pub snapshot_name: Option<String>,
    pub groups: BTreeMap<String, GroupRoster>,
    pub statuses: StatusMap,
    pub notes: NoteMap,
    pub warnings: Vec<String>,
}

impl LoadedRoster {
    /// Unpack a snapshot bundle into view state.
    pub fn from_snapshot(snapshot: RosterSnapshot, warnings: Vec<String>) -> Self {
        Self {
            month: snapshot.month,
            year: snapshot.year,
            snapshot_id: Some(snapshot.id),
            snapshot_name: Some(snapshot.name),
            groups: snapshot.groups,
            statuses: snapshot.statuses,
            notes: snapshot.notes,
            warnings,
        }
    }
}

/// Loader service over the API client and the fallback cache.
#[derive(Clone)]
pub struct RosterLoader {
    api: RosterApi,
    cache: Option<SnapshotCache>,
}

impl RosterLoader {
    pub fn new(api: RosterApi, cache: Option<SnapshotCache>) -> Self {
        Self { api, cache }
    }

    /// Load live per-department shift data and daily statuses for a month.
    ///
    /// Departments present in the directory but missing a shift record get
    /// a default record created server-side, followed by a single refetch.
    /// A department still missing after the retry renders empty and is
    /// reported as a warning.
    pub async fn load_live(&self, month: u32, year: i32, directory: &[Staff]) -> Result<LoadedRoster> {
        let mut warnings = Vec::new();
        let mut groups = merge_groups(self.api.fetch_group_rosters(month, year).await?);

        let missing = missing_departments(directory, &groups);
        if !missing.is_empty() {
            info!("Creating default shift records for {} department(s)", missing.len());
            for department in &missing {
                let default = GroupRoster::default_for(department, directory);
                if let Err(e) = self.api.save_group_roster(month, year, &default).await {
                    warnings.push(format!("Could not create default record for {department}: {e}"));
                }
            }

            // Single retry after seeding defaults
            match self.api.fetch_group_rosters(month, year).await {
                Ok(fetched) => groups = merge_groups(fetched),
                Err(e) => warnings.push(format!("Refetch after creating defaults failed: {e}")),
            }

            for department in missing_departments(directory, &groups) {
                warnings.push(format!("Department '{department}' has no shift record and renders empty"));
            }
        }

        // Status fetch failure degrades to empty maps; the grid stays usable
        let (statuses, notes) = match self.api.fetch_month_status(month, year).await {
            Ok(maps) => maps,
            Err(e) => {
                warnings.push(format!("Daily statuses unavailable: {e}"));
                (StatusMap::new(), NoteMap::new())
            }
        };

        Ok(LoadedRoster {
            month,
            year,
            snapshot_id: None,
            snapshot_name: None,
            groups,
            statuses,
            notes,
            warnings,
        })
    }

    /// Load a snapshot bundle in one call, falling back to the local cache
    /// and then to caller-supplied data. Never blocks the view: whatever
    /// partial data is available gets rendered, with a warning attached.
    pub async fn load_snapshot(&self, id: &str, fallback: Option<RosterSnapshot>) -> LoadedRoster {
        match self.api.fetch_snapshot(id).await {
            Ok(snapshot) => {
                if let Some(cache) = &self.cache
                    && let Err(e) = cache.set(&snapshot)
                {
                    warn!("Failed to cache snapshot {id}: {e}");
                }
                LoadedRoster::from_snapshot(snapshot, Vec::new())
            }
            Err(fetch_err) => {
                warn!("Snapshot fetch failed for {id}: {fetch_err}");

                if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(id).ok().flatten()) {
                    return LoadedRoster::from_snapshot(
                        cached,
                        vec![format!("Backend unavailable; showing locally cached copy ({fetch_err})")],
                    );
                }

                if let Some(snapshot) = fallback {
                    return LoadedRoster::from_snapshot(
                        snapshot,
                        vec![format!("Backend unavailable; showing last known data ({fetch_err})")],
                    );
                }

                LoadedRoster {
                    snapshot_id: Some(id.to_string()),
                    warnings: vec![format!("Snapshot could not be loaded: {fetch_err}")],
                    ..Default::default()
                }
            }
        }
    }
}

/// Index fetched records by department. The backend should return one
/// record per department; on duplicates the last one wins.
fn merge_groups(fetched: Vec<GroupRoster>) -> BTreeMap<String, GroupRoster> {
    fetched.into_iter().map(|g| (g.department.clone(), g)).collect()
}

/// Directory departments with no shift record for the month.
fn missing_departments(directory: &[Staff], groups: &BTreeMap<String, GroupRoster>) -> Vec<String> {
    let known: BTreeSet<&str> = directory.iter().map(|s| s.department.as_str()).collect();
    known
        .into_iter()
        .filter(|d| !groups.contains_key(*d))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(id: &str, dept: &str) -> Staff {
        Staff {
            id: id.to_string(),
            username: id.to_string(),
            department: dept.to_string(),
        }
    }

    #[test]
    fn test_merge_groups_last_wins_on_duplicates() {
        let a = GroupRoster {
            department: "customer-service".to_string(),
            shifts: Vec::new(),
            waiting: vec!["u-1".to_string()],
        };
        let b = GroupRoster {
            department: "customer-service".to_string(),
            shifts: Vec::new(),
            waiting: vec!["u-2".to_string()],
        };

        let merged = merge_groups(vec![a, b]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["customer-service"].waiting, vec!["u-2".to_string()]);
    }

    #[test]
    fn test_missing_departments() {
        let directory = vec![staff("u-1", "customer-service"), staff("u-2", "import-export")];
        let mut groups = BTreeMap::new();
        groups.insert(
            "customer-service".to_string(),
            GroupRoster {
                department: "customer-service".to_string(),
                shifts: Vec::new(),
                waiting: Vec::new(),
            },
        );

        assert_eq!(missing_departments(&directory, &groups), vec!["import-export".to_string()]);
    }

    #[test]
    fn test_no_missing_departments_when_all_present() {
        let directory = vec![staff("u-1", "customer-service")];
        let mut groups = BTreeMap::new();
        groups.insert(
            "customer-service".to_string(),
            GroupRoster {
                department: "customer-service".to_string(),
                shifts: Vec::new(),
                waiting: Vec::new(),
            },
        );

        assert!(missing_departments(&directory, &groups).is_empty());
    }

    #[test]
    fn test_loaded_roster_from_snapshot() {
        let mut snapshot =
            RosterSnapshot::from_live("July copy", 7, 2025, &BTreeMap::new(), &StatusMap::new(), &NoteMap::new());
        snapshot.id = "snap-1".to_string();

        let loaded = LoadedRoster::from_snapshot(snapshot, vec!["warning".to_string()]);
        assert_eq!(loaded.month, 7);
        assert_eq!(loaded.year, 2025);
        assert_eq!(loaded.snapshot_id.as_deref(), Some("snap-1"));
        assert_eq!(loaded.snapshot_name.as_deref(), Some("July copy"));
        assert_eq!(loaded.warnings.len(), 1);
    }
}
