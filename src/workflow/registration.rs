//! Patient registration, the single entry point for creating patients

use chrono::NaiveDate;

use crate::error::{RegistryError, Result};
use crate::models::{PatientId, PatientRegistration};
use crate::repository::{hospital, patient};

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Check that a phone number is 7 to 15 digits with an optional leading `+`
///
/// Spaces and hyphens between digit groups are accepted.
pub fn validate_phone(phone: &str) -> Result<()> {
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' => {}
            _ => {
                return Err(RegistryError::validation(format!(
                    "phone number '{phone}' contains '{c}'"
                )));
            }
        }
    }
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(RegistryError::validation(format!(
            "phone number '{phone}' must have {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"
        )));
    }
    Ok(())
}

fn validate_registration(registration: &PatientRegistration, today: NaiveDate) -> Result<()> {
    if registration.first_name.trim().is_empty() || registration.last_name.trim().is_empty() {
        return Err(RegistryError::validation(
            "first and last name must not be empty",
        ));
    }
    if registration.date_of_birth > today {
        return Err(RegistryError::validation(format!(
            "date of birth {} is in the future",
            registration.date_of_birth
        )));
    }
    validate_phone(&registration.phone)
}

/// Register a patient at a hospital
///
/// Must run inside a transaction. `today` bounds the date of birth.
pub fn register_patient(
    conn: &rusqlite::Connection,
    registration: &PatientRegistration,
    today: NaiveDate,
) -> Result<PatientId> {
    validate_registration(registration, today)?;
    if !hospital::hospital_exists(conn, registration.hospital_id)? {
        return Err(RegistryError::reference(format!(
            "hospital {} does not exist",
            registration.hospital_id
        )));
    }
    let id = patient::insert_patient(conn, registration)?;
    log::info!(
        "Registered patient {id} at hospital {} ({} urgency)",
        registration.hospital_id,
        registration.urgency
    );
    Ok(id)
}
