//! Donation recording
//!
//! A donation event and the inventory unit it produces are written together.
//! The caller supplies the transaction; if any step fails here, the error
//! propagates and the whole transaction is rolled back, so a donation row never
//! persists without its inventory counterpart (or the reverse).

use chrono::Days;

use crate::error::{RegistryError, Result};
use crate::models::{
    BloodGroup, BloodStatus, DonationOutcome, DonationReceipt, DonationRequest, DonationType,
    InventoryRef, OrganStatus, UnitKind,
};
use crate::repository::{donation, donor, hospital, inventory};
use crate::workflow::status::StatusMachine;

/// Rules for units created by the donation workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryPolicy {
    /// Days from collection to expiry for blood units
    pub blood_shelf_life_days: u32,
}

impl Default for InventoryPolicy {
    fn default() -> Self {
        Self {
            blood_shelf_life_days: 42,
        }
    }
}

/// Check a request before anything is written
///
/// Reference checks need the connection; field checks do not.
fn validate_request(conn: &rusqlite::Connection, request: &DonationRequest) -> Result<()> {
    let Some(donor) = donor::get_donor(conn, request.donor_id)? else {
        return Err(RegistryError::reference(format!(
            "donor {} does not exist",
            request.donor_id
        )));
    };
    if !hospital::hospital_exists(conn, request.hospital_id)? {
        return Err(RegistryError::reference(format!(
            "hospital {} does not exist",
            request.hospital_id
        )));
    }
    // For blood the detail field may carry the blood group, which must agree
    // with the donor record
    let detail = request.type_detail.trim();
    if request.donation_type == DonationType::Blood && !detail.is_empty() {
        let declared: BloodGroup = detail.parse()?;
        if declared != donor.blood_group {
            return Err(RegistryError::validation(format!(
                "blood group {declared} does not match donor {} ({})",
                donor.id, donor.blood_group
            )));
        }
    }
    if request.outcome == DonationOutcome::Success {
        match request.donation_type {
            DonationType::Blood if request.storage_or_detail.trim().is_empty() => {
                return Err(RegistryError::validation(
                    "a successful blood donation needs a storage location",
                ));
            }
            DonationType::Organ if organ_type(request).is_none() => {
                return Err(RegistryError::validation(
                    "a successful organ donation needs an organ type",
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Organ type from the type detail, falling back to the storage/detail field
fn organ_type(request: &DonationRequest) -> Option<&str> {
    [request.type_detail.trim(), request.storage_or_detail.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
}

/// Record a donation and, when it succeeded, its inventory unit
///
/// Must run inside a transaction.
pub fn record_donation(
    conn: &rusqlite::Connection,
    request: &DonationRequest,
    policy: InventoryPolicy,
) -> Result<DonationReceipt> {
    validate_request(conn, request)?;

    let donation_id = donation::insert_donation(
        conn,
        request.donor_id,
        request.hospital_id,
        request.donation_type,
        request.donated_at,
        request.outcome,
    )?;

    if request.outcome == DonationOutcome::Failed {
        log::info!(
            "Recorded failed {} donation {donation_id} for donor {}",
            request.donation_type,
            request.donor_id
        );
        return Ok(DonationReceipt {
            donation_id,
            inventory: None,
        });
    }

    let unit = match request.donation_type.unit_kind() {
        UnitKind::Blood => {
            let expiry_date = request
                .collection_date
                .checked_add_days(Days::new(u64::from(policy.blood_shelf_life_days)))
                .ok_or_else(|| RegistryError::validation("blood expiry date is out of range"))?;
            let id = inventory::insert_blood_unit(
                conn,
                donation_id,
                request.storage_or_detail.trim(),
                BloodStatus::INITIAL,
                expiry_date,
                request.collection_date,
            )?;
            InventoryRef::Blood(id)
        }
        UnitKind::Organ => {
            // validate_request guarantees an organ type on this path
            let organ_type = organ_type(request).unwrap_or_default();
            let collected_at = request
                .collection_date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| RegistryError::validation("collection date is out of range"))?;
            let id = inventory::insert_organ_unit(
                conn,
                donation_id,
                organ_type,
                OrganStatus::INITIAL,
                request.donated_at,
                collected_at,
            )?;
            InventoryRef::Organ(id)
        }
    };

    log::info!(
        "Recorded {} donation {donation_id} for donor {} with {} unit {}",
        request.donation_type,
        request.donor_id,
        unit.kind(),
        unit.id()
    );
    Ok(DonationReceipt {
        donation_id,
        inventory: Some(unit),
    })
}
