//! Domain models for the donation registry
//!
//! This module contains the entity models stored in the registry: donors,
//! patients, hospitals, donation events and the inventory units they produce.

pub mod donation;
pub mod donor;
pub mod hospital;
pub mod inventory;
pub mod patient;
pub mod types;

// Re-export commonly used types
pub use donation::{Donation, DonationReceipt, DonationRequest, InventoryRef};
pub use donor::{Donor, DonorUpdate, NewDonor};
pub use hospital::{Hospital, HospitalAddress, NewHospital};
pub use inventory::{BloodUnit, OrganUnit};
pub use patient::{Patient, PatientRegistration};
pub use types::{
    BloodGroup, BloodStatus, DonationOutcome, DonationType, Gender, OrganStatus, UnitKind,
    UnitStatus, UrgencyLevel,
};

/// Row identifier of a donor
pub type DonorId = i64;
/// Row identifier of a patient
pub type PatientId = i64;
/// Row identifier of a hospital
pub type HospitalId = i64;
/// Row identifier of a donation event
pub type DonationId = i64;
/// Row identifier of a blood or organ unit
pub type UnitId = i64;
