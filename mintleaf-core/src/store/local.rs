//! Bookings as JSON files in the unit directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::booking::BookingRecord;
use crate::error::{MintleafError, MintleafResult};
use crate::store::BookingStore;

const BOOKINGS_DIR: &str = "bookings";

/// One `<unit>/bookings/<YYYY-MM-DD>T<HHMM>__<name>__<ref>.json` per booking.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(unit_dir: &Path) -> Self {
        LocalStore {
            dir: unit_dir.join(BOOKINGS_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All readable bookings, ordered by start time. Files that fail to parse
    /// are skipped.
    pub fn bookings(&self) -> MintleafResult<Vec<BookingRecord>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut bookings: Vec<BookingRecord> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "json"))
            .filter_map(|path| match read_booking(&path) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable booking");
                    None
                }
            })
            .collect();

        bookings.sort_by_key(|b| b.start_time);
        Ok(bookings)
    }

    pub fn bookings_on(&self, day: NaiveDate) -> MintleafResult<Vec<BookingRecord>> {
        Ok(self
            .bookings()?
            .into_iter()
            .filter(|b| b.day() == day)
            .collect())
    }

    fn write(&self, record: &BookingRecord) -> MintleafResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let content = serde_json::to_string_pretty(record)
            .map_err(|e| MintleafError::Serialization(e.to_string()))?;
        let path = self.dir.join(filename_for(record, &self.dir)?);

        std::fs::write(&path, content)?;
        Ok(path)
    }
}

impl BookingStore for LocalStore {
    async fn create_booking(&self, record: &BookingRecord) -> MintleafResult<String> {
        let path = self
            .write(record)
            .map_err(|e| MintleafError::StorageWrite(e.to_string()))?;
        tracing::debug!(path = %path.display(), "wrote booking");
        Ok(record.reference_code.clone())
    }

    async fn booked_headcount(&self, day: NaiveDate) -> MintleafResult<u32> {
        Ok(self
            .bookings_on(day)?
            .iter()
            .filter(|b| b.is_active())
            .fold(0u32, |total, b| total.saturating_add(b.headcount)))
    }
}

fn read_booking(path: &Path) -> MintleafResult<BookingRecord> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| MintleafError::Serialization(e.to_string()))
}

// =============================================================================
// Filename generation
// =============================================================================

fn filename_for(record: &BookingRecord, dir: &Path) -> MintleafResult<String> {
    let stem = base_stem(record);
    let base = format!("{stem}.json");

    if !dir.join(&base).exists() {
        return Ok(base);
    }

    for n in 2..=100 {
        let suffixed = format!("{stem}-{n}.json");
        if !dir.join(&suffixed).exists() {
            return Ok(suffixed);
        }
    }

    Err(MintleafError::StorageWrite(format!(
        "Too many filename collisions for {base}"
    )))
}

fn base_stem(record: &BookingRecord) -> String {
    let start = record.start_time.format("%Y-%m-%dT%H%M");
    let slug = slugify(&record.name);
    let reference = record.reference_code.to_lowercase();

    if slug.is_empty() {
        format!("{start}__{reference}")
    } else {
        format!("{start}__{slug}__{reference}")
    }
}

pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(40)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;
    use crate::contact::Contact;

    fn record(name: &str, reference: &str, day: u32, hour: u32, headcount: u32) -> BookingRecord {
        let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        BookingRecord {
            reference_code: reference.into(),
            unit: "bistro".into(),
            name: name.into(),
            headcount,
            occasion: "Dinner".into(),
            source: None,
            contact: Contact {
                phone_e164: "+36301234567".into(),
                email: "guest@example.hu".into(),
            },
            start_time: date.and_hms_opt(hour, 0, 0).unwrap(),
            end_time: date.and_hms_opt(hour + 2, 0, 0).unwrap(),
            status: BookingStatus::Pending,
            created_at: date.and_hms_opt(9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn slugify_names() {
        assert_eq!(slugify("Kovács Anna"), "kovács-anna");
        assert_eq!(slugify("  O'Brien & co. "), "o-brien-co");
        assert_eq!(slugify("!!!"), "");
    }

    #[tokio::test]
    async fn writes_one_file_per_booking() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let code = store
            .create_booking(&record("Anna Nagy", "AB12CD34", 14, 19, 4))
            .await
            .unwrap();
        assert_eq!(code, "AB12CD34");

        let file = dir.path().join("bookings/2024-06-14T1900__anna-nagy__ab12cd34.json");
        assert!(file.exists());

        let bookings = store.bookings().unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].name, "Anna Nagy");
    }

    #[tokio::test]
    async fn same_stem_gets_a_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let booking = record("Anna", "SAME0000", 14, 19, 2);

        store.create_booking(&booking).await.unwrap();
        store.create_booking(&booking).await.unwrap();

        assert!(dir.path().join("bookings/2024-06-14T1900__anna__same0000-2.json").exists());
        assert_eq!(store.bookings().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn headcount_counts_active_bookings_on_the_day() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store.create_booking(&record("A", "AAAA0001", 14, 12, 4)).await.unwrap();
        store.create_booking(&record("B", "AAAA0002", 14, 19, 6)).await.unwrap();
        store.create_booking(&record("C", "AAAA0003", 15, 19, 8)).await.unwrap();
        let mut cancelled = record("D", "AAAA0004", 14, 20, 10);
        cancelled.status = BookingStatus::Cancelled;
        store.create_booking(&cancelled).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert_eq!(store.booked_headcount(day).await.unwrap(), 10);
        assert_eq!(store.bookings_on(day).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn headcount_total_saturates() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        // files written by hand or by an older version may hold any u32
        store.create_booking(&record("A", "BIG00001", 14, 12, 3_000_000_000)).await.unwrap();
        store.create_booking(&record("B", "BIG00002", 14, 19, 3_000_000_000)).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert_eq!(store.booked_headcount(day).await.unwrap(), u32::MAX);
    }

    #[tokio::test]
    async fn empty_store_has_no_bookings() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let day = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert!(store.bookings().unwrap().is_empty());
        assert_eq!(store.booked_headcount(day).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unwritable_directory_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        // a file where the bookings directory should be
        std::fs::write(dir.path().join("bookings"), "").unwrap();
        let store = LocalStore::new(dir.path());

        let err = store
            .create_booking(&record("A", "AAAA0001", 14, 12, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, MintleafError::StorageWrite(_)));
    }
}
