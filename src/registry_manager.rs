//! Registry Manager for the donation registry
//!
//! This module provides the high-level interface used by data-entry and
//! dashboard front ends. Every method is one operation: it acquires the store
//! for its own scope, runs its statement or workflow, and commits or rolls
//! back before returning.

use chrono::{Local, NaiveDate};

use crate::config::{DonorDeletePolicy, RegistryConfig};
use crate::error::{RegistryError, Result};
use crate::gateway::{self, Dashboard, DashboardSummary, Table, View};
use crate::models::{
    BloodStatus, BloodUnit, Donation, DonationId, DonationReceipt, DonationRequest, Donor,
    DonorId, DonorUpdate, Hospital, HospitalId, NewDonor, NewHospital, OrganStatus, OrganUnit,
    Patient, PatientId, PatientRegistration, UnitId, UnitKind, UnitStatus,
};
use crate::repository::{donation, donor, hospital, inventory, patient};
use crate::store::Store;
use crate::workflow::{self, InventoryPolicy};

/// Manager for a donation registry database
#[derive(Debug)]
pub struct DonationRegistry {
    store: Store,
    config: RegistryConfig,
}

impl DonationRegistry {
    /// Open the registry described by the configuration
    ///
    /// Fails with a connectivity error when the database cannot be opened, in
    /// which case no registry exists and no operation can run.
    pub fn open(config: RegistryConfig) -> Result<Self> {
        let store = Store::open(&config)?;
        Ok(Self { store, config })
    }

    /// Open a private in-memory registry with default settings
    pub fn open_in_memory() -> Result<Self> {
        Self::open(RegistryConfig::default())
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    const fn inventory_policy(&self) -> InventoryPolicy {
        InventoryPolicy {
            blood_shelf_life_days: self.config.blood_shelf_life_days,
        }
    }

    // Hospitals

    /// Add a hospital to the directory
    pub fn add_hospital(&self, new_hospital: &NewHospital) -> Result<HospitalId> {
        self.store
            .write("add hospital", |tx| hospital::insert_hospital(tx, new_hospital))
    }

    pub fn hospital(&self, id: HospitalId) -> Result<Option<Hospital>> {
        self.store.read(|conn| hospital::get_hospital(conn, id))
    }

    pub fn hospitals(&self) -> Result<Vec<Hospital>> {
        self.store.read(hospital::list_hospitals)
    }

    // Donors

    /// Register a donor; new donors start out eligible
    pub fn add_donor(&self, new_donor: &NewDonor) -> Result<DonorId> {
        self.store
            .write("add donor", |tx| donor::insert_donor(tx, new_donor))
    }

    pub fn donor(&self, id: DonorId) -> Result<Option<Donor>> {
        self.store.read(|conn| donor::get_donor(conn, id))
    }

    pub fn donors(&self) -> Result<Vec<Donor>> {
        self.store.read(donor::list_donors)
    }

    /// Donors whose name or blood group contains `query`
    pub fn search_donors(&self, query: &str) -> Result<Vec<Donor>> {
        self.store.read(|conn| donor::search_donors(conn, query))
    }

    pub fn update_donor(&self, id: DonorId, update: &DonorUpdate) -> Result<()> {
        self.store
            .write("update donor", |tx| donor::update_donor(tx, id, update))
    }

    pub fn set_donor_eligibility(&self, id: DonorId, eligible: bool) -> Result<()> {
        self.store.write("set donor eligibility", |tx| {
            donor::set_eligibility(tx, id, eligible)
        })
    }

    pub fn add_donor_phone(&self, id: DonorId, phone: &str) -> Result<()> {
        workflow::validate_phone(phone)?;
        self.store
            .write("add donor phone", |tx| donor::insert_donor_phone(tx, id, phone))
    }

    pub fn donor_phones(&self, id: DonorId) -> Result<Vec<String>> {
        self.store.read(|conn| donor::donor_phones(conn, id))
    }

    /// Delete a donor using the configured [`DonorDeletePolicy`]
    pub fn delete_donor(&self, id: DonorId) -> Result<usize> {
        self.delete_donor_with(id, self.config.donor_delete_policy)
    }

    /// Delete a donor with an explicit policy; returns donations removed
    pub fn delete_donor_with(&self, id: DonorId, policy: DonorDeletePolicy) -> Result<usize> {
        self.store
            .write("delete donor", |tx| donor::delete_donor(tx, id, policy))
    }

    // Patients

    /// Register a patient, the only way a patient row is created
    pub fn register_patient(&self, registration: &PatientRegistration) -> Result<PatientId> {
        let today = Local::now().date_naive();
        self.store.write("register patient", |tx| {
            workflow::register_patient(tx, registration, today)
        })
    }

    pub fn patient(&self, id: PatientId) -> Result<Option<Patient>> {
        self.store.read(|conn| patient::get_patient(conn, id))
    }

    pub fn patients(&self) -> Result<Vec<Patient>> {
        self.store.read(patient::list_patients)
    }

    pub fn patients_at_hospital(&self, hospital_id: HospitalId) -> Result<Vec<Patient>> {
        self.store
            .read(|conn| patient::patients_by_hospital(conn, hospital_id))
    }

    // Donations

    /// Record a donation and its inventory unit atomically
    pub fn record_donation(&self, request: &DonationRequest) -> Result<DonationReceipt> {
        let policy = self.inventory_policy();
        self.store.write("record donation", |tx| {
            workflow::record_donation(tx, request, policy)
        })
    }

    pub fn donation(&self, id: DonationId) -> Result<Option<Donation>> {
        self.store.read(|conn| donation::get_donation(conn, id))
    }

    /// All donations, newest first
    pub fn donations(&self) -> Result<Vec<Donation>> {
        self.store.read(donation::list_donations)
    }

    pub fn donations_for_donor(&self, donor_id: DonorId) -> Result<Vec<Donation>> {
        self.store
            .read(|conn| donation::donations_for_donor(conn, donor_id))
    }

    // Inventory

    pub fn blood_unit(&self, id: UnitId) -> Result<Option<BloodUnit>> {
        self.store.read(|conn| inventory::get_blood_unit(conn, id))
    }

    pub fn organ_unit(&self, id: UnitId) -> Result<Option<OrganUnit>> {
        self.store.read(|conn| inventory::get_organ_unit(conn, id))
    }

    pub fn blood_unit_for_donation(&self, donation_id: DonationId) -> Result<Option<BloodUnit>> {
        self.store
            .read(|conn| inventory::blood_unit_for_donation(conn, donation_id))
    }

    pub fn organ_unit_for_donation(&self, donation_id: DonationId) -> Result<Option<OrganUnit>> {
        self.store
            .read(|conn| inventory::organ_unit_for_donation(conn, donation_id))
    }

    /// Blood units, optionally filtered by status
    pub fn blood_units(&self, status: Option<BloodStatus>) -> Result<Vec<BloodUnit>> {
        self.store
            .read(|conn| inventory::list_blood_units(conn, status))
    }

    /// Organ units, optionally filtered by status
    pub fn organ_units(&self, status: Option<OrganStatus>) -> Result<Vec<OrganUnit>> {
        self.store
            .read(|conn| inventory::list_organ_units(conn, status))
    }

    /// Change a unit's status, parsing the token for the unit kind
    ///
    /// The edge is checked against the transition table first; an invalid
    /// transition writes nothing.
    pub fn set_status(&self, kind: UnitKind, unit_id: UnitId, new_status: &str) -> Result<()> {
        let status = UnitStatus::parse(kind, new_status)?;
        self.set_unit_status(unit_id, status, None)
    }

    /// Change a unit's status only if its version still matches
    pub fn set_status_versioned(
        &self,
        kind: UnitKind,
        unit_id: UnitId,
        new_status: &str,
        expected_version: i64,
    ) -> Result<()> {
        let status = UnitStatus::parse(kind, new_status)?;
        self.set_unit_status(unit_id, status, Some(expected_version))
    }

    /// Change a unit's status from a typed status
    pub fn set_unit_status(
        &self,
        unit_id: UnitId,
        status: UnitStatus,
        expected_version: Option<i64>,
    ) -> Result<()> {
        self.store.write("set unit status", |tx| {
            workflow::apply_status_change(tx, unit_id, status, expected_version)
        })
    }

    /// Expire every available blood unit whose expiry date is before `as_of`
    pub fn expire_blood_units(&self, as_of: NaiveDate) -> Result<usize> {
        let expired = self.store.write("expire blood units", |tx| {
            inventory::expire_blood_units(tx, as_of)
        })?;
        log::info!("Expired {expired} blood unit(s) as of {as_of}");
        Ok(expired)
    }

    // Views

    /// Load a listing as a table
    pub fn view(&self, view: &View) -> Result<Table> {
        self.store.read(|conn| gateway::load_view(conn, view))
    }

    pub fn summary(&self) -> Result<DashboardSummary> {
        self.store.read(gateway::load_summary)
    }

    /// Dashboard counts and the configured number of recent donations
    pub fn dashboard(&self) -> Result<Dashboard> {
        let limit = self.config.recent_donations_limit;
        self.store
            .read(|conn| gateway::load_dashboard(conn, limit))
    }

    /// Fetch a donor that must exist
    pub fn require_donor(&self, id: DonorId) -> Result<Donor> {
        self.donor(id)?
            .ok_or(RegistryError::NotFound { entity: "Donor", id })
    }
}
