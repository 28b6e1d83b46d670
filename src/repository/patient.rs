//! Patient statements

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::Result;
use crate::models::{HospitalId, Patient, PatientId, PatientRegistration};

// A patient has at most one phone from registration; MIN picks it deterministically
const PATIENT_SELECT: &str = "SELECT p.P_id, p.H_id, p.FN, p.MN, p.LN, p.DOB, p.Urgency_level,
            p.Gender, p.B_grp,
            (SELECT MIN(pp.P_Ph_no) FROM Patient_phone pp WHERE pp.P_id = p.P_id) AS phone
     FROM Patient p";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get("P_id")?,
        hospital_id: row.get("H_id")?,
        first_name: row.get("FN")?,
        middle_name: row.get("MN")?,
        last_name: row.get("LN")?,
        date_of_birth: row.get("DOB")?,
        urgency: row.get("Urgency_level")?,
        gender: row.get("Gender")?,
        blood_group: row.get("B_grp")?,
        phone: row.get("phone")?,
    })
}

/// Insert a patient and their phone number
///
/// Only called by the registration workflow, after validation.
pub(crate) fn insert_patient(conn: &Connection, patient: &PatientRegistration) -> Result<PatientId> {
    conn.execute(
        "INSERT INTO Patient (H_id, FN, MN, LN, DOB, Urgency_level, Gender, B_grp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            patient.hospital_id,
            patient.first_name.trim(),
            patient.middle_name.trim(),
            patient.last_name.trim(),
            patient.date_of_birth,
            patient.urgency,
            patient.gender,
            patient.blood_group,
        ],
    )?;
    let id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO Patient_phone (P_id, P_Ph_no) VALUES (?1, ?2)",
        params![id, patient.phone.trim()],
    )?;
    Ok(id)
}

pub fn get_patient(conn: &Connection, id: PatientId) -> Result<Option<Patient>> {
    Ok(conn
        .query_row(
            &format!("{PATIENT_SELECT} WHERE p.P_id = ?1"),
            [id],
            patient_from_row,
        )
        .optional()?)
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>> {
    let mut stmt = conn.prepare(&format!("{PATIENT_SELECT} ORDER BY p.P_id"))?;
    let patients = stmt
        .query_map([], patient_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(patients)
}

/// Patients affiliated with a hospital
pub fn patients_by_hospital(conn: &Connection, hospital_id: HospitalId) -> Result<Vec<Patient>> {
    let mut stmt = conn.prepare(&format!("{PATIENT_SELECT} WHERE p.H_id = ?1 ORDER BY p.P_id"))?;
    let patients = stmt
        .query_map([hospital_id], patient_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(patients)
}
