//! Blood and organ unit statements

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::Result;
use crate::models::{BloodStatus, BloodUnit, DonationId, OrganStatus, OrganUnit, UnitId};
use crate::repository::count;

const BLOOD_COLUMNS: &str = "B_id, Do_id, stor_loc, B_status, Expiry_date, B_collection_date, version";
const ORGAN_COLUMNS: &str = "O_id, Do_id, O_type, O_DT, O_status, O_collection_DT, version";

fn blood_from_row(row: &Row<'_>) -> rusqlite::Result<BloodUnit> {
    Ok(BloodUnit {
        id: row.get("B_id")?,
        donation_id: row.get("Do_id")?,
        storage_location: row.get("stor_loc")?,
        status: row.get("B_status")?,
        expiry_date: row.get("Expiry_date")?,
        collection_date: row.get("B_collection_date")?,
        version: row.get("version")?,
    })
}

fn organ_from_row(row: &Row<'_>) -> rusqlite::Result<OrganUnit> {
    Ok(OrganUnit {
        id: row.get("O_id")?,
        donation_id: row.get("Do_id")?,
        organ_type: row.get("O_type")?,
        event_at: row.get("O_DT")?,
        status: row.get("O_status")?,
        collected_at: row.get("O_collection_DT")?,
        version: row.get("version")?,
    })
}

// Blood units

pub(crate) fn insert_blood_unit(
    conn: &Connection,
    donation_id: DonationId,
    storage_location: &str,
    status: BloodStatus,
    expiry_date: NaiveDate,
    collection_date: NaiveDate,
) -> Result<UnitId> {
    conn.execute(
        "INSERT INTO Blood (Do_id, stor_loc, B_status, Expiry_date, B_collection_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![donation_id, storage_location, status, expiry_date, collection_date],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_blood_unit(conn: &Connection, id: UnitId) -> Result<Option<BloodUnit>> {
    Ok(conn
        .query_row(
            &format!("SELECT {BLOOD_COLUMNS} FROM Blood WHERE B_id = ?1"),
            [id],
            blood_from_row,
        )
        .optional()?)
}

pub fn blood_unit_for_donation(
    conn: &Connection,
    donation_id: DonationId,
) -> Result<Option<BloodUnit>> {
    Ok(conn
        .query_row(
            &format!("SELECT {BLOOD_COLUMNS} FROM Blood WHERE Do_id = ?1"),
            [donation_id],
            blood_from_row,
        )
        .optional()?)
}

/// Blood units, optionally only those in `status`
pub fn list_blood_units(conn: &Connection, status: Option<BloodStatus>) -> Result<Vec<BloodUnit>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BLOOD_COLUMNS} FROM Blood WHERE ?1 IS NULL OR B_status = ?1 ORDER BY B_id"
    ))?;
    let units = stmt
        .query_map([status], blood_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(units)
}

/// Write a blood status if the row still holds `from` (and `expected_version`, if given)
///
/// Returns the number of rows changed: 0 means another writer got there first.
pub(crate) fn update_blood_status(
    conn: &Connection,
    id: UnitId,
    from: BloodStatus,
    to: BloodStatus,
    expected_version: Option<i64>,
) -> Result<usize> {
    Ok(conn.execute(
        "UPDATE Blood SET B_status = ?1, version = version + 1
         WHERE B_id = ?2 AND B_status = ?3 AND (?4 IS NULL OR version = ?4)",
        params![to, id, from, expected_version],
    )?)
}

/// Move every available unit whose expiry date is before `as_of` to expired
pub fn expire_blood_units(conn: &Connection, as_of: NaiveDate) -> Result<usize> {
    Ok(conn.execute(
        "UPDATE Blood SET B_status = ?1, version = version + 1
         WHERE B_status = ?2 AND Expiry_date < ?3",
        params![BloodStatus::Expired, BloodStatus::Available, as_of],
    )?)
}

pub fn count_blood_units(conn: &Connection, status: BloodStatus) -> Result<i64> {
    count(conn, "SELECT COUNT(*) FROM Blood WHERE B_status = ?1", [status])
}

// Organ units

pub(crate) fn insert_organ_unit(
    conn: &Connection,
    donation_id: DonationId,
    organ_type: &str,
    status: OrganStatus,
    event_at: NaiveDateTime,
    collected_at: NaiveDateTime,
) -> Result<UnitId> {
    conn.execute(
        "INSERT INTO Organ (Do_id, O_type, O_DT, O_status, O_collection_DT)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![donation_id, organ_type, event_at, status, collected_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_organ_unit(conn: &Connection, id: UnitId) -> Result<Option<OrganUnit>> {
    Ok(conn
        .query_row(
            &format!("SELECT {ORGAN_COLUMNS} FROM Organ WHERE O_id = ?1"),
            [id],
            organ_from_row,
        )
        .optional()?)
}

pub fn organ_unit_for_donation(
    conn: &Connection,
    donation_id: DonationId,
) -> Result<Option<OrganUnit>> {
    Ok(conn
        .query_row(
            &format!("SELECT {ORGAN_COLUMNS} FROM Organ WHERE Do_id = ?1"),
            [donation_id],
            organ_from_row,
        )
        .optional()?)
}

/// Organ units, optionally only those in `status`
pub fn list_organ_units(conn: &Connection, status: Option<OrganStatus>) -> Result<Vec<OrganUnit>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ORGAN_COLUMNS} FROM Organ WHERE ?1 IS NULL OR O_status = ?1 ORDER BY O_id"
    ))?;
    let units = stmt
        .query_map([status], organ_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(units)
}

pub(crate) fn update_organ_status(
    conn: &Connection,
    id: UnitId,
    from: OrganStatus,
    to: OrganStatus,
    expected_version: Option<i64>,
) -> Result<usize> {
    Ok(conn.execute(
        "UPDATE Organ SET O_status = ?1, version = version + 1
         WHERE O_id = ?2 AND O_status = ?3 AND (?4 IS NULL OR version = ?4)",
        params![to, id, from, expected_version],
    )?)
}
