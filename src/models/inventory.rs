//! Inventory units derived from successful donations

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::types::{BloodStatus, OrganStatus};
use crate::models::{DonationId, UnitId};

/// A unit of donated blood in storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodUnit {
    pub id: UnitId,
    /// Donation this unit came from (one-to-one)
    pub donation_id: DonationId,
    pub storage_location: String,
    pub status: BloodStatus,
    pub expiry_date: NaiveDate,
    pub collection_date: NaiveDate,
    /// Incremented on every status write
    pub version: i64,
}

impl BloodUnit {
    /// Whether the unit is past its expiry date at `date`
    #[must_use]
    pub fn is_past_expiry(&self, date: NaiveDate) -> bool {
        self.expiry_date < date
    }
}

/// A donated organ being tracked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganUnit {
    pub id: UnitId,
    pub donation_id: DonationId,
    /// Organ type or detail, e.g. "Kidney"
    pub organ_type: String,
    pub status: OrganStatus,
    /// Date and time of the donation event
    pub event_at: NaiveDateTime,
    pub collected_at: NaiveDateTime,
    pub version: i64,
}
