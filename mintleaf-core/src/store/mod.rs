//! Where bookings are persisted.
//!
//! The booking flow only needs two things from storage: write one record, and
//! read how many guests a day already holds. [`BookingStore`] is that seam;
//! [`local::LocalStore`] keeps JSON files in the unit directory and
//! [`remote::Remote`] forwards to an external provider executable.

pub mod local;
pub mod protocol;
pub mod provider;
pub mod remote;

use chrono::NaiveDate;

use crate::booking::BookingRecord;
use crate::error::MintleafResult;

#[allow(async_fn_in_trait)]
pub trait BookingStore {
    /// Persist `record` and return the reference code it is stored under.
    /// The store may assign its own code.
    async fn create_booking(&self, record: &BookingRecord) -> MintleafResult<String>;

    /// Total headcount of active bookings on `day`.
    async fn booked_headcount(&self, day: NaiveDate) -> MintleafResult<u32>;
}

/// The store configured for a unit.
#[derive(Debug, Clone)]
pub enum UnitStore {
    Local(local::LocalStore),
    Remote(remote::Remote),
}

impl BookingStore for UnitStore {
    async fn create_booking(&self, record: &BookingRecord) -> MintleafResult<String> {
        match self {
            UnitStore::Local(store) => store.create_booking(record).await,
            UnitStore::Remote(remote) => remote.create_booking(record).await,
        }
    }

    async fn booked_headcount(&self, day: NaiveDate) -> MintleafResult<u32> {
        match self {
            UnitStore::Local(store) => store.booked_headcount(day).await,
            UnitStore::Remote(remote) => remote.booked_headcount(day).await,
        }
    }
}
