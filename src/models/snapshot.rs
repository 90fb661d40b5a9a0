//! Roster snapshots ("copies") and their navigation tabs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::note::NoteMap;
use crate::models::shift::GroupRoster;
use crate::models::status::StatusMap;

/// A named, immutable-by-convention bundle of one month's full roster
/// state, persisted under a server-issued identifier.
///
/// Created by duplicating a live month; mutated only through explicit
/// "save snapshot" actions, never auto-synced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterSnapshot {
    /// Server-issued identifier. Empty on the client only while a create
    /// request is in flight.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub month: u32,
    pub year: i32,
    /// Department -> shift record, including waiting pools.
    pub groups: BTreeMap<String, GroupRoster>,
    #[serde(default)]
    pub statuses: StatusMap,
    #[serde(default)]
    pub notes: NoteMap,
}

impl RosterSnapshot {
    /// Duplicate live month data into an unsaved snapshot bundle.
    pub fn from_live(
        name: impl Into<String>,
        month: u32,
        year: i32,
        groups: &BTreeMap<String, GroupRoster>,
        statuses: &StatusMap,
        notes: &NoteMap,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            month,
            year,
            groups: groups.clone(),
            statuses: statuses.clone(),
            notes: notes.clone(),
        }
    }
}

/// A UI tab record referencing a snapshot, used purely for navigation
/// bookkeeping. Deleting a snapshot cascades to its tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterTab {
    pub id: String,
    pub name: String,
    #[serde(rename = "snapshotId")]
    pub snapshot_id: String,
}
