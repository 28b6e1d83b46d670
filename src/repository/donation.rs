//! Donation event statements

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::Result;
use crate::models::{Donation, DonationId, DonationOutcome, DonationType, DonorId, HospitalId};

const DONATION_COLUMNS: &str = "Do_id, D_id, H_id, Do_type, Do_DT, success_status";

fn donation_from_row(row: &Row<'_>) -> rusqlite::Result<Donation> {
    Ok(Donation {
        id: row.get("Do_id")?,
        donor_id: row.get("D_id")?,
        hospital_id: row.get("H_id")?,
        donation_type: row.get("Do_type")?,
        donated_at: row.get("Do_DT")?,
        outcome: row.get("success_status")?,
    })
}

pub(crate) fn insert_donation(
    conn: &Connection,
    donor_id: DonorId,
    hospital_id: HospitalId,
    donation_type: DonationType,
    donated_at: chrono::NaiveDateTime,
    outcome: DonationOutcome,
) -> Result<DonationId> {
    conn.execute(
        "INSERT INTO Donation (D_id, H_id, Do_type, Do_DT, success_status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![donor_id, hospital_id, donation_type, donated_at, outcome],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_donation(conn: &Connection, id: DonationId) -> Result<Option<Donation>> {
    Ok(conn
        .query_row(
            &format!("SELECT {DONATION_COLUMNS} FROM Donation WHERE Do_id = ?1"),
            [id],
            donation_from_row,
        )
        .optional()?)
}

/// All donations, newest first
pub fn list_donations(conn: &Connection) -> Result<Vec<Donation>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DONATION_COLUMNS} FROM Donation ORDER BY Do_DT DESC, Do_id DESC"
    ))?;
    let donations = stmt
        .query_map([], donation_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(donations)
}

pub fn donations_for_donor(conn: &Connection, donor_id: DonorId) -> Result<Vec<Donation>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DONATION_COLUMNS} FROM Donation WHERE D_id = ?1 ORDER BY Do_DT DESC, Do_id DESC"
    ))?;
    let donations = stmt
        .query_map([donor_id], donation_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(donations)
}
