//! Donor statements

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::config::DonorDeletePolicy;
use crate::error::{RegistryError, Result};
use crate::models::{Donor, DonorId, DonorUpdate, NewDonor};
use crate::repository::{count, like_pattern, row_exists};

const DONOR_COLUMNS: &str =
    "D_id, FN, MN, LN, DOB, Gender, B_grp, D_type, D_dateTime, Eligibility_status";

fn donor_from_row(row: &Row<'_>) -> rusqlite::Result<Donor> {
    Ok(Donor {
        id: row.get("D_id")?,
        first_name: row.get("FN")?,
        middle_name: row.get("MN")?,
        last_name: row.get("LN")?,
        date_of_birth: row.get("DOB")?,
        gender: row.get("Gender")?,
        blood_group: row.get("B_grp")?,
        donation_type: row.get("D_type")?,
        declared_at: row.get("D_dateTime")?,
        eligible: row.get("Eligibility_status")?,
    })
}

fn check_names(first: &str, last: &str) -> Result<()> {
    if first.trim().is_empty() || last.trim().is_empty() {
        return Err(RegistryError::validation(
            "first and last name must not be empty",
        ));
    }
    Ok(())
}

/// Insert a new donor, eligible by default
pub fn insert_donor(conn: &Connection, donor: &NewDonor) -> Result<DonorId> {
    check_names(&donor.first_name, &donor.last_name)?;
    conn.execute(
        "INSERT INTO Donor (FN, MN, LN, DOB, Gender, B_grp, D_type, D_dateTime, Eligibility_status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)",
        params![
            donor.first_name.trim(),
            donor.middle_name.trim(),
            donor.last_name.trim(),
            donor.date_of_birth,
            donor.gender,
            donor.blood_group,
            donor.donation_type,
            donor.declared_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_donor(conn: &Connection, id: DonorId) -> Result<Option<Donor>> {
    Ok(conn
        .query_row(
            &format!("SELECT {DONOR_COLUMNS} FROM Donor WHERE D_id = ?1"),
            [id],
            donor_from_row,
        )
        .optional()?)
}

pub fn list_donors(conn: &Connection) -> Result<Vec<Donor>> {
    let mut stmt = conn.prepare(&format!("SELECT {DONOR_COLUMNS} FROM Donor ORDER BY D_id"))?;
    let donors = stmt
        .query_map([], donor_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(donors)
}

/// Donors whose first, middle or last name or blood group contains `query`
pub fn search_donors(conn: &Connection, query: &str) -> Result<Vec<Donor>> {
    let pattern = like_pattern(query);
    let mut stmt = conn.prepare(&format!(
        "SELECT {DONOR_COLUMNS} FROM Donor
         WHERE FN LIKE ?1 ESCAPE '\\' OR MN LIKE ?1 ESCAPE '\\'
            OR LN LIKE ?1 ESCAPE '\\' OR B_grp LIKE ?1 ESCAPE '\\'
         ORDER BY D_id"
    ))?;
    let donors = stmt
        .query_map([pattern], donor_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(donors)
}

pub fn donor_exists(conn: &Connection, id: DonorId) -> Result<bool> {
    row_exists(conn, "Donor", "D_id", id)
}

/// Overwrite the editable fields of a donor
pub fn update_donor(conn: &Connection, id: DonorId, update: &DonorUpdate) -> Result<()> {
    check_names(&update.first_name, &update.last_name)?;
    let changed = conn.execute(
        "UPDATE Donor SET FN = ?1, MN = ?2, LN = ?3, DOB = ?4, Gender = ?5, B_grp = ?6,
                          Eligibility_status = ?7
         WHERE D_id = ?8",
        params![
            update.first_name.trim(),
            update.middle_name.trim(),
            update.last_name.trim(),
            update.date_of_birth,
            update.gender,
            update.blood_group,
            update.eligible,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(RegistryError::NotFound { entity: "Donor", id });
    }
    Ok(())
}

pub fn set_eligibility(conn: &Connection, id: DonorId, eligible: bool) -> Result<()> {
    let changed = conn.execute(
        "UPDATE Donor SET Eligibility_status = ?1 WHERE D_id = ?2",
        params![eligible, id],
    )?;
    if changed == 0 {
        return Err(RegistryError::NotFound { entity: "Donor", id });
    }
    Ok(())
}

pub fn insert_donor_phone(conn: &Connection, id: DonorId, phone: &str) -> Result<()> {
    if !donor_exists(conn, id)? {
        return Err(RegistryError::reference(format!("donor {id} does not exist")));
    }
    conn.execute(
        "INSERT OR IGNORE INTO Donor_phone (D_id, Ph_no) VALUES (?1, ?2)",
        params![id, phone.trim()],
    )?;
    Ok(())
}

pub fn donor_phones(conn: &Connection, id: DonorId) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT Ph_no FROM Donor_phone WHERE D_id = ?1 ORDER BY Ph_no")?;
    let phones = stmt
        .query_map([id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(phones)
}

/// Delete a donor under the given policy
///
/// Must run inside a transaction: the cascade path issues several statements.
/// Under [`DonorDeletePolicy::Restrict`] a donor with donations is refused with
/// a reference error. Under [`DonorDeletePolicy::Cascade`] the donor's blood
/// units, organ units and donations go first. Phone numbers cascade in the
/// schema either way. Returns the number of donations removed.
pub fn delete_donor(conn: &Connection, id: DonorId, policy: DonorDeletePolicy) -> Result<usize> {
    if !donor_exists(conn, id)? {
        return Err(RegistryError::NotFound { entity: "Donor", id });
    }

    let donations = count(conn, "SELECT COUNT(*) FROM Donation WHERE D_id = ?1", [id])?;
    let mut removed = 0;
    if donations > 0 {
        match policy {
            DonorDeletePolicy::Restrict => {
                return Err(RegistryError::reference(format!(
                    "donor {id} has {donations} donation(s) and cannot be deleted"
                )));
            }
            DonorDeletePolicy::Cascade => {
                conn.execute(
                    "DELETE FROM Blood WHERE Do_id IN (SELECT Do_id FROM Donation WHERE D_id = ?1)",
                    [id],
                )?;
                conn.execute(
                    "DELETE FROM Organ WHERE Do_id IN (SELECT Do_id FROM Donation WHERE D_id = ?1)",
                    [id],
                )?;
                removed = conn.execute("DELETE FROM Donation WHERE D_id = ?1", [id])?;
            }
        }
    }

    conn.execute("DELETE FROM Donor WHERE D_id = ?1", [id])?;
    Ok(removed)
}
