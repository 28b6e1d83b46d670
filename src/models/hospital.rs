//! Hospital reference data

use serde::{Deserialize, Serialize};

use crate::models::HospitalId;

/// Postal address of a hospital
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalAddress {
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// A hospital in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub phone: Option<String>,
    /// Missing when no address row exists
    pub address: Option<HospitalAddress>,
}

/// Fields needed to add a hospital to the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHospital {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<HospitalAddress>,
}
