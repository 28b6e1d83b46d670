//! Multi-statement workflows with business rules
//!
//! These carry the rules a database would otherwise hide in stored procedures
//! (`AddDonation`, `RegisterNewPatient`) plus the inventory status checks.
//! Each function expects to run inside one transaction opened by the caller.

pub mod donation;
pub mod registration;
pub mod status;

pub use donation::{InventoryPolicy, record_donation};
pub use registration::{register_patient, validate_phone};
pub use status::{StatusMachine, apply_status_change, validate_transition};
