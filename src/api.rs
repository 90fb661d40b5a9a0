//! Roster backend HTTP client.
//!
//! All persisted entities are owned by the backend; this client is the
//! only write path. Every staff reference coming off the wire is
//! normalized to a plain string id before it reaches local state.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::ServerConfig;
use crate::error::{AppError, Result};
use crate::models::note::NoteMap;
use crate::models::shift::{Assignment, GroupRoster, ShiftDef};
use crate::models::snapshot::{RosterSnapshot, RosterTab};
use crate::models::staff::{Staff, StaffRef};
use crate::models::status::{DayStatus, StatusMap};

/// JSON-over-HTTP client for the roster backend.
#[derive(Clone)]
pub struct RosterApi {
    client: Client,
    base_url: String,
}

/// Wire shape of one assignment; the user field may be a bare id or an
/// expanded sub-object.
#[derive(Debug, Serialize, Deserialize)]
struct AssignmentDto {
    #[serde(rename = "userId")]
    user: StaffRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

/// Wire shape of one shift definition.
#[derive(Debug, Serialize, Deserialize)]
struct ShiftDefDto {
    label: String,
    time: String,
    #[serde(default)]
    users: Vec<AssignmentDto>,
}

/// Wire shape of one per-department shift record.
#[derive(Debug, Serialize, Deserialize)]
struct GroupRosterDto {
    department: String,
    #[serde(default)]
    shifts: Vec<ShiftDefDto>,
    #[serde(default)]
    waiting: Vec<StaffRef>,
}

impl GroupRosterDto {
    /// Normalize all staff references to plain ids.
    fn into_model(self) -> GroupRoster {
        GroupRoster {
            department: self.department,
            shifts: self
                .shifts
                .into_iter()
                .map(|s| ShiftDef {
                    label: s.label,
                    time: s.time,
                    users: s
                        .users
                        .into_iter()
                        .map(|a| Assignment {
                            staff_id: a.user.into_id(),
                            note: a.note,
                        })
                        .collect(),
                })
                .collect(),
            waiting: self.waiting.into_iter().map(StaffRef::into_id).collect(),
        }
    }
}

/// Wire shape of the per-month status payload.
#[derive(Debug, Default, Serialize, Deserialize)]
struct MonthStatusDto {
    #[serde(default)]
    statuses: StatusMap,
    #[serde(default)]
    notes: NoteMap,
}

impl RosterApi {
    /// Create a new client for the configured backend.
    pub fn new(config: &ServerConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url)
    }

    /// Map non-success responses to an API error carrying the body.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Test connection to the backend.
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self.client.get(self.url("/api/staff")).send().await?;
        Ok(response.status().is_success())
    }

    /// Fetch the full staff directory.
    pub async fn fetch_staff(&self) -> Result<Vec<Staff>> {
        let response = self.client.get(self.url("/api/staff")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch every department's shift record for the month.
    pub async fn fetch_group_rosters(&self, month: u32, year: i32) -> Result<Vec<GroupRoster>> {
        let response = self
            .client
            .get(self.url(&format!("/api/shifts/{year}/{month}")))
            .send()
            .await?;
        let dtos: Vec<GroupRosterDto> = Self::check(response).await?.json().await?;
        Ok(dtos.into_iter().map(GroupRosterDto::into_model).collect())
    }

    /// Create or replace one department's shift record for the month.
    pub async fn save_group_roster(&self, month: u32, year: i32, roster: &GroupRoster) -> Result<()> {
        let response = self
            .client
            .post(self.url(&format!("/api/shifts/{year}/{month}")))
            .json(roster)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Fetch the sparse status and note maps for the month.
    pub async fn fetch_month_status(&self, month: u32, year: i32) -> Result<(StatusMap, NoteMap)> {
        let response = self
            .client
            .get(self.url(&format!("/api/status/{year}/{month}")))
            .send()
            .await?;
        let dto: MonthStatusDto = Self::check(response).await?.json().await?;
        Ok((dto.statuses, dto.notes))
    }

    /// Write one status cell; `None` clears it.
    pub async fn update_status(
        &self,
        month: u32,
        year: i32,
        staff_id: &str,
        day: u32,
        value: Option<&DayStatus>,
    ) -> Result<()> {
        let body = json!({
            "staffId": staff_id,
            "day": day,
            "value": value.map(DayStatus::code),
        });
        let response = self
            .client
            .put(self.url(&format!("/api/status/{year}/{month}")))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Write one note cell on the live month; `None` deletes it.
    pub async fn update_note(&self, month: u32, year: i32, staff_id: &str, day: u32, text: Option<&str>) -> Result<()> {
        let body = json!({
            "staffId": staff_id,
            "day": day,
            "text": text,
        });
        let response = self
            .client
            .put(self.url(&format!("/api/status/{year}/{month}/note")))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Fetch a snapshot bundle in one call.
    pub async fn fetch_snapshot(&self, id: &str) -> Result<RosterSnapshot> {
        let response = self.client.get(self.url(&format!("/api/snapshots/{id}"))).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Persist a new snapshot; the backend issues the identifier.
    pub async fn create_snapshot(&self, snapshot: &RosterSnapshot) -> Result<RosterSnapshot> {
        let response = self.client.post(self.url("/api/snapshots")).json(snapshot).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Save an edited snapshot under its existing identifier.
    pub async fn save_snapshot(&self, snapshot: &RosterSnapshot) -> Result<()> {
        if snapshot.id.is_empty() {
            return Err(AppError::validation("Snapshot has no identifier yet"));
        }
        let response = self
            .client
            .put(self.url(&format!("/api/snapshots/{id}", id = snapshot.id)))
            .json(snapshot)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Delete a snapshot bundle.
    pub async fn delete_snapshot(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/snapshots/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// List the navigation tabs referencing snapshots.
    pub async fn fetch_tabs(&self) -> Result<Vec<RosterTab>> {
        let response = self.client.get(self.url("/api/tabs")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Create a tab record referencing a snapshot.
    pub async fn create_tab(&self, name: &str, snapshot_id: &str) -> Result<RosterTab> {
        let body = json!({ "name": name, "snapshotId": snapshot_id });
        let response = self.client.post(self.url("/api/tabs")).json(&body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Delete a tab record.
    pub async fn delete_tab(&self, id: &str) -> Result<()> {
        let response = self.client.delete(self.url(&format!("/api/tabs/{id}"))).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
