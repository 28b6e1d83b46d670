//! Patient entity model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::donor::join_name;
use crate::models::types::{BloodGroup, Gender, UrgencyLevel};
use crate::models::{HospitalId, PatientId};

/// A patient registered at a hospital
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    /// Hospital the patient is affiliated with
    pub hospital_id: HospitalId,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub urgency: UrgencyLevel,
    pub gender: Gender,
    pub blood_group: BloodGroup,
    /// Contact phone, if one was registered
    pub phone: Option<String>,
}

impl Patient {
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.middle_name, &self.last_name)
    }
}

/// Input of the patient registration workflow, the only way patients are created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRegistration {
    pub hospital_id: HospitalId,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub urgency: UrgencyLevel,
    pub gender: Gender,
    pub blood_group: BloodGroup,
    pub phone: String,
}
