//! A Rust library for a blood and organ donation registry backed by SQLite,
//! with transactional donation recording, inventory status tracking and
//! tabular views for dashboards.

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod registry_manager;
pub mod repository;
pub mod schema;
pub mod store;
pub mod workflow;

// Re-export the most common types for easier use
// Core types
pub use config::{DonorDeletePolicy, RegistryConfig};
pub use error::{ErrorKind, RegistryError, Result};
pub use registry_manager::DonationRegistry;
pub use store::Store;

// Domain model
pub use models::{
    BloodGroup, BloodStatus, BloodUnit, Donation, DonationOutcome, DonationReceipt,
    DonationRequest, DonationType, Donor, DonorUpdate, Gender, Hospital, HospitalAddress,
    InventoryRef, NewDonor, NewHospital, OrganStatus, OrganUnit, Patient, PatientRegistration,
    UnitKind, UnitStatus, UrgencyLevel,
};

// Views
pub use gateway::{Dashboard, DashboardSummary, Table, View};
