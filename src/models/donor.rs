//! Donor entity model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::DonorId;
use crate::models::types::{BloodGroup, DonationType, Gender};

/// A registered donor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    /// Row identifier
    pub id: DonorId,
    pub first_name: String,
    /// Empty when the donor has no middle name
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub blood_group: BloodGroup,
    /// Donation type declared at registration
    pub donation_type: DonationType,
    /// Donation timestamp declared at registration
    pub declared_at: NaiveDateTime,
    /// Whether the donor is suitable for future donations. Not enforced by
    /// any workflow; staff toggle it.
    pub eligible: bool,
}

impl Donor {
    /// Name parts joined with single spaces, skipping an empty middle name
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.middle_name, &self.last_name)
    }
}

/// Fields captured when a donor is first registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDonor {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub blood_group: BloodGroup,
    pub donation_type: DonationType,
    pub declared_at: NaiveDateTime,
}

/// Editable donor fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorUpdate {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub blood_group: BloodGroup,
    pub eligible: bool,
}

impl From<&Donor> for DonorUpdate {
    fn from(donor: &Donor) -> Self {
        Self {
            first_name: donor.first_name.clone(),
            middle_name: donor.middle_name.clone(),
            last_name: donor.last_name.clone(),
            date_of_birth: donor.date_of_birth,
            gender: donor.gender,
            blood_group: donor.blood_group,
            eligible: donor.eligible,
        }
    }
}

pub(crate) fn join_name(first: &str, middle: &str, last: &str) -> String {
    [first, middle, last]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
