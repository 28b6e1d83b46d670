//! Donation events and the receipt returned when one is recorded

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::types::{DonationOutcome, DonationType, UnitKind};
use crate::models::{DonationId, DonorId, HospitalId, UnitId};

/// A single recorded act of giving blood or an organ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: DonationId,
    pub donor_id: DonorId,
    pub hospital_id: HospitalId,
    pub donation_type: DonationType,
    pub donated_at: NaiveDateTime,
    pub outcome: DonationOutcome,
}

/// Input of the donation workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub donor_id: DonorId,
    pub hospital_id: HospitalId,
    pub donation_type: DonationType,
    pub donated_at: NaiveDateTime,
    pub outcome: DonationOutcome,
    /// Collection date of the produced unit
    pub collection_date: NaiveDate,
    /// Storage location for blood; organ detail fallback for organs
    pub storage_or_detail: String,
    /// Organ type for organs. For blood, an optional blood group that must
    /// match the donor's; it is not stored on the unit.
    pub type_detail: String,
}

impl DonationRequest {
    /// Request with empty inventory details, collected on the donation day
    #[must_use]
    pub fn new(
        donor_id: DonorId,
        hospital_id: HospitalId,
        donation_type: DonationType,
        donated_at: NaiveDateTime,
        outcome: DonationOutcome,
    ) -> Self {
        Self {
            donor_id,
            hospital_id,
            donation_type,
            donated_at,
            outcome,
            collection_date: donated_at.date(),
            storage_or_detail: String::new(),
            type_detail: String::new(),
        }
    }

    /// Set the collection date
    #[must_use]
    pub fn collected_on(mut self, date: NaiveDate) -> Self {
        self.collection_date = date;
        self
    }

    /// Set the storage location or organ detail
    #[must_use]
    pub fn with_storage(mut self, storage_or_detail: impl Into<String>) -> Self {
        self.storage_or_detail = storage_or_detail.into();
        self
    }

    /// Set the type detail (organ type)
    #[must_use]
    pub fn with_detail(mut self, type_detail: impl Into<String>) -> Self {
        self.type_detail = type_detail.into();
        self
    }
}

/// Inventory unit created alongside a donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryRef {
    Blood(UnitId),
    Organ(UnitId),
}

impl InventoryRef {
    #[must_use]
    pub const fn kind(self) -> UnitKind {
        match self {
            Self::Blood(_) => UnitKind::Blood,
            Self::Organ(_) => UnitKind::Organ,
        }
    }

    #[must_use]
    pub const fn id(self) -> UnitId {
        match self {
            Self::Blood(id) | Self::Organ(id) => id,
        }
    }
}

/// Outcome of a recorded donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationReceipt {
    pub donation_id: DonationId,
    /// `None` for failed donations
    pub inventory: Option<InventoryRef>,
}
