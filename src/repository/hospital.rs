//! Hospital directory statements

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::{RegistryError, Result};
use crate::models::{Hospital, HospitalAddress, HospitalId, NewHospital};
use crate::repository::row_exists;

const HOSPITAL_SELECT: &str = "SELECT h.H_id, h.H_name, h.H_Ph_no, ha.city, ha.state, ha.pincode
     FROM Hospital h LEFT JOIN Hospital_address ha ON h.H_id = ha.H_id";

fn hospital_from_row(row: &Row<'_>) -> rusqlite::Result<Hospital> {
    let city: Option<String> = row.get("city")?;
    let address = match city {
        Some(city) => Some(HospitalAddress {
            city,
            state: row.get("state")?,
            postal_code: row.get("pincode")?,
        }),
        None => None,
    };
    Ok(Hospital {
        id: row.get("H_id")?,
        name: row.get("H_name")?,
        phone: row.get("H_Ph_no")?,
        address,
    })
}

/// Add a hospital and its address, if given
pub fn insert_hospital(conn: &Connection, hospital: &NewHospital) -> Result<HospitalId> {
    if hospital.name.trim().is_empty() {
        return Err(RegistryError::validation("hospital name must not be empty"));
    }
    conn.execute(
        "INSERT INTO Hospital (H_name, H_Ph_no) VALUES (?1, ?2)",
        params![hospital.name.trim(), hospital.phone],
    )?;
    let id = conn.last_insert_rowid();
    if let Some(address) = &hospital.address {
        conn.execute(
            "INSERT INTO Hospital_address (H_id, city, state, pincode) VALUES (?1, ?2, ?3, ?4)",
            params![id, address.city, address.state, address.postal_code],
        )?;
    }
    Ok(id)
}

pub fn get_hospital(conn: &Connection, id: HospitalId) -> Result<Option<Hospital>> {
    Ok(conn
        .query_row(
            &format!("{HOSPITAL_SELECT} WHERE h.H_id = ?1"),
            [id],
            hospital_from_row,
        )
        .optional()?)
}

pub fn list_hospitals(conn: &Connection) -> Result<Vec<Hospital>> {
    let mut stmt = conn.prepare(&format!("{HOSPITAL_SELECT} ORDER BY h.H_id"))?;
    let hospitals = stmt
        .query_map([], hospital_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(hospitals)
}

pub fn hospital_exists(conn: &Connection, id: HospitalId) -> Result<bool> {
    row_exists(conn, "Hospital", "H_id", id)
}
