//! Inventory status machines
//!
//! Blood units:
//!
//! ```text
//! Available -> Issued
//! Available -> Expired
//! ```
//!
//! Organ units:
//!
//! ```text
//! Pending -> Healthy -> Used
//! Pending -> Rejected
//! Healthy -> Rejected
//! ```
//!
//! A status with no successors is terminal. Re-applying the current status is
//! an invalid transition like any other edge missing from the table.

use smallvec::{SmallVec, smallvec};

use crate::error::{RegistryError, Result};
use crate::models::{BloodStatus, OrganStatus, UnitId, UnitKind, UnitStatus};
use crate::repository::inventory;

/// A lifecycle with an explicit transition table
pub trait StatusMachine: Copy + Eq + std::fmt::Display {
    /// Inventory kind this machine governs
    const KIND: UnitKind;

    /// Status of a freshly created unit
    const INITIAL: Self;

    /// Statuses reachable in one step
    fn successors(self) -> SmallVec<[Self; 2]>;

    fn can_transition_to(self, next: Self) -> bool {
        self.successors().contains(&next)
    }

    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

impl StatusMachine for BloodStatus {
    const KIND: UnitKind = UnitKind::Blood;
    const INITIAL: Self = Self::Available;

    fn successors(self) -> SmallVec<[Self; 2]> {
        match self {
            Self::Available => smallvec![Self::Issued, Self::Expired],
            Self::Issued | Self::Expired => SmallVec::new(),
        }
    }
}

impl StatusMachine for OrganStatus {
    const KIND: UnitKind = UnitKind::Organ;
    // Organs wait for screening before they are declared healthy
    const INITIAL: Self = Self::Pending;

    fn successors(self) -> SmallVec<[Self; 2]> {
        match self {
            Self::Pending => smallvec![Self::Healthy, Self::Rejected],
            Self::Healthy => smallvec![Self::Used, Self::Rejected],
            Self::Used | Self::Rejected => SmallVec::new(),
        }
    }
}

/// Check one edge against the transition table
pub fn validate_transition<S: StatusMachine>(unit_id: UnitId, from: S, to: S) -> Result<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(RegistryError::InvalidTransitionError {
            kind: S::KIND,
            unit_id,
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Validate and write a status change
///
/// Runs inside the caller's transaction. The current status is read, the edge
/// checked, and the update is conditioned on the status (and version, when
/// given) still matching what was read; if it no longer matches the write is
/// reported as a conflict rather than applied.
pub fn apply_status_change(
    conn: &rusqlite::Connection,
    unit_id: UnitId,
    new_status: UnitStatus,
    expected_version: Option<i64>,
) -> Result<()> {
    match new_status {
        UnitStatus::Blood(to) => {
            let unit = inventory::get_blood_unit(conn, unit_id)?.ok_or(RegistryError::NotFound {
                entity: "Blood unit",
                id: unit_id,
            })?;
            check_version(UnitKind::Blood, unit_id, unit.version, expected_version)?;
            validate_transition(unit_id, unit.status, to)?;
            let changed =
                inventory::update_blood_status(conn, unit_id, unit.status, to, expected_version)?;
            finish_write(UnitKind::Blood, unit_id, changed)?;
            log::info!("Blood unit {unit_id}: {} -> {to}", unit.status);
        }
        UnitStatus::Organ(to) => {
            let unit = inventory::get_organ_unit(conn, unit_id)?.ok_or(RegistryError::NotFound {
                entity: "Organ unit",
                id: unit_id,
            })?;
            check_version(UnitKind::Organ, unit_id, unit.version, expected_version)?;
            validate_transition(unit_id, unit.status, to)?;
            let changed =
                inventory::update_organ_status(conn, unit_id, unit.status, to, expected_version)?;
            finish_write(UnitKind::Organ, unit_id, changed)?;
            log::info!("Organ unit {unit_id}: {} -> {to}", unit.status);
        }
    }
    Ok(())
}

fn check_version(kind: UnitKind, unit_id: UnitId, actual: i64, expected: Option<i64>) -> Result<()> {
    match expected {
        Some(expected) if expected != actual => Err(RegistryError::ConflictError(format!(
            "{kind} unit {unit_id} is at version {actual}, expected {expected}"
        ))),
        _ => Ok(()),
    }
}

fn finish_write(kind: UnitKind, unit_id: UnitId, changed: usize) -> Result<()> {
    if changed == 0 {
        return Err(RegistryError::ConflictError(format!(
            "{kind} unit {unit_id} was modified concurrently"
        )));
    }
    Ok(())
}
