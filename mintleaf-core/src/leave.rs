//! Staff leave requests, stored per unit.
//!
//! Each contiguous block of picked days becomes one request, kept as a JSON
//! file in `<unit>/requests/`.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::booking::validation::{Field, ValidationErrors};
use crate::date_range::{DateRangeBlock, DateSelection, DayIndex};
use crate::error::{MintleafError, MintleafResult};
use crate::store::local::slugify;

const REQUESTS_DIR: &str = "requests";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: String,
    pub requester: String,
    #[serde(flatten)]
    pub block: DateRangeBlock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: LeaveStatus,
    pub created_at: NaiveDateTime,
}

impl LeaveRequest {
    pub fn pending(
        requester: &str,
        block: DateRangeBlock,
        note: Option<&str>,
        created_at: NaiveDateTime,
    ) -> Self {
        let note = note.map(str::trim).filter(|n| !n.is_empty());
        LeaveRequest {
            id: uuid::Uuid::new_v4().simple().to_string(),
            requester: requester.trim().to_string(),
            block,
            note: note.map(String::from),
            status: LeaveStatus::Pending,
            created_at,
        }
    }

    /// Rejected requests no longer hold their days.
    pub fn is_active(&self) -> bool {
        self.status != LeaveStatus::Rejected
    }
}

#[derive(Debug, Clone)]
pub struct LeaveStore {
    dir: PathBuf,
}

impl LeaveStore {
    pub fn new(unit_dir: &Path) -> Self {
        LeaveStore {
            dir: unit_dir.join(REQUESTS_DIR),
        }
    }

    /// All readable requests, ordered by first day.
    pub fn requests(&self) -> MintleafResult<Vec<LeaveRequest>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut requests: Vec<LeaveRequest> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "json"))
            .filter_map(|path| match read_request(&path) {
                Ok(request) => Some(request),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable request");
                    None
                }
            })
            .collect();

        requests.sort_by_key(|r| (r.block.start_date, r.created_at));
        Ok(requests)
    }

    /// Per-day count of requests that still hold their days.
    pub fn day_index(&self) -> MintleafResult<DayIndex> {
        let requests = self.requests()?;
        Ok(DayIndex::from_blocks(
            requests.iter().filter(|r| r.is_active()).map(|r| &r.block),
        ))
    }

    /// Store one pending request per contiguous block of `selection`.
    pub fn submit(
        &self,
        requester: &str,
        selection: &DateSelection,
        note: Option<&str>,
        created_at: NaiveDateTime,
    ) -> MintleafResult<Vec<LeaveRequest>> {
        if requester.trim().is_empty() {
            return Err(MintleafError::Validation(ValidationErrors::single(
                Field::Name,
                "Enter the name of the person requesting leave",
            )));
        }
        let blocks = selection.to_blocks()?;

        std::fs::create_dir_all(&self.dir)?;
        let requests: Vec<LeaveRequest> = blocks
            .into_iter()
            .map(|block| LeaveRequest::pending(requester, block, note, created_at))
            .collect();

        for request in &requests {
            self.write(request)?;
        }
        tracing::info!(requester, count = requests.len(), "leave requested");
        Ok(requests)
    }

    fn write(&self, request: &LeaveRequest) -> MintleafResult<()> {
        let content = serde_json::to_string_pretty(request)
            .map_err(|e| MintleafError::Serialization(e.to_string()))?;
        let filename = format!(
            "{}__{}__{}.json",
            request.block.start_date.format("%Y-%m-%d"),
            slugify(&request.requester),
            &request.id[..8]
        );
        std::fs::write(self.dir.join(filename), content)?;
        Ok(())
    }
}

fn read_request(path: &Path) -> MintleafResult<LeaveRequest> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| MintleafError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn created() -> NaiveDateTime {
        ymd(1).and_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn one_request_per_block() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeaveStore::new(dir.path());
        let selection: DateSelection = [ymd(12), ymd(10), ymd(11), ymd(20)].into_iter().collect();

        let made = store
            .submit("Kiss Péter", &selection, Some("  family trip "), created())
            .unwrap();
        assert_eq!(made.len(), 2);
        assert_eq!(made[0].note.as_deref(), Some("family trip"));

        let stored = store.requests().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].block, DateRangeBlock::new(ymd(10), ymd(12)).unwrap());
        assert_eq!(stored[1].block, DateRangeBlock::single(ymd(20)));
        assert!(stored.iter().all(|r| r.status == LeaveStatus::Pending));
        assert_eq!(std::fs::read_dir(dir.path().join("requests")).unwrap().count(), 2);
    }

    #[test]
    fn index_counts_overlapping_requests() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeaveStore::new(dir.path());

        let first: DateSelection = [ymd(10), ymd(11)].into_iter().collect();
        let second: DateSelection = [ymd(11), ymd(12)].into_iter().collect();
        store.submit("Anna", &first, None, created()).unwrap();
        store.submit("Béla", &second, None, created()).unwrap();

        let index = store.day_index().unwrap();
        assert_eq!(index.count(ymd(10)), 1);
        assert_eq!(index.count(ymd(11)), 2);
        assert_eq!(index.count(ymd(13)), 0);
    }

    #[test]
    fn rejected_requests_free_their_days() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeaveStore::new(dir.path());
        let selection: DateSelection = [ymd(10)].into_iter().collect();
        let mut request = store.submit("Anna", &selection, None, created()).unwrap().remove(0);

        std::fs::remove_dir_all(dir.path().join("requests")).unwrap();
        std::fs::create_dir_all(dir.path().join("requests")).unwrap();
        request.status = LeaveStatus::Rejected;
        store.write(&request).unwrap();

        assert_eq!(store.requests().unwrap().len(), 1);
        assert_eq!(store.day_index().unwrap().count(ymd(10)), 0);
    }

    #[test]
    fn empty_selection_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeaveStore::new(dir.path());

        let err = store.submit("Anna", &DateSelection::new(), None, created()).unwrap_err();
        assert!(matches!(err, MintleafError::EmptySelection));
        assert!(store.requests().unwrap().is_empty());
    }

    #[test]
    fn request_needs_a_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeaveStore::new(dir.path());
        let selection: DateSelection = [ymd(10)].into_iter().collect();

        let err = store.submit("  ", &selection, None, created()).unwrap_err();
        assert!(matches!(err, MintleafError::Validation(ref e) if e.has(Field::Name)));
    }

    #[test]
    fn blank_note_is_dropped() {
        let request = LeaveRequest::pending("Anna", DateRangeBlock::single(ymd(3)), Some("   "), created());
        assert_eq!(request.note, None);
        assert!(request.is_active());
    }
}
