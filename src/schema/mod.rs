//! Relational schema of the donation registry
//!
//! The DDL mirrors the entity models: one table per entity plus satellite
//! tables for phone numbers and hospital addresses. Enumerated columns carry
//! `CHECK` constraints matching the tokens in [`crate::models::types`], and two
//! triggers keep inventory rows tied to a successful donation of the matching
//! type.

use rusqlite::Connection;

use crate::error::Result;

/// Version written to `PRAGMA user_version` once the schema is in place
pub const SCHEMA_VERSION: i32 = 1;

/// Tables created by [`initialize`], in dependency order
pub const TABLES: &[&str] = &[
    "Hospital",
    "Hospital_address",
    "Donor",
    "Donor_phone",
    "Patient",
    "Patient_phone",
    "Donation",
    "Blood",
    "Organ",
];

const DDL: &str = r"
CREATE TABLE IF NOT EXISTS Hospital (
    H_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    H_name   TEXT NOT NULL,
    H_Ph_no  TEXT
);

CREATE TABLE IF NOT EXISTS Hospital_address (
    H_id     INTEGER PRIMARY KEY REFERENCES Hospital(H_id) ON DELETE CASCADE,
    city     TEXT NOT NULL,
    state    TEXT NOT NULL,
    pincode  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Donor (
    D_id                INTEGER PRIMARY KEY AUTOINCREMENT,
    FN                  TEXT NOT NULL,
    MN                  TEXT NOT NULL DEFAULT '',
    LN                  TEXT NOT NULL,
    DOB                 TEXT NOT NULL,
    Gender              TEXT NOT NULL CHECK (Gender IN ('M', 'F')),
    B_grp               TEXT NOT NULL
                        CHECK (B_grp IN ('A+', 'A-', 'B+', 'B-', 'AB+', 'AB-', 'O+', 'O-')),
    D_type              TEXT NOT NULL CHECK (D_type IN ('Blood', 'Organ')),
    D_dateTime          TEXT NOT NULL,
    Eligibility_status  INTEGER NOT NULL DEFAULT 1 CHECK (Eligibility_status IN (0, 1))
);

CREATE TABLE IF NOT EXISTS Donor_phone (
    D_id   INTEGER NOT NULL REFERENCES Donor(D_id) ON DELETE CASCADE,
    Ph_no  TEXT NOT NULL,
    PRIMARY KEY (D_id, Ph_no)
);

CREATE TABLE IF NOT EXISTS Patient (
    P_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    H_id           INTEGER NOT NULL REFERENCES Hospital(H_id),
    FN             TEXT NOT NULL,
    MN             TEXT NOT NULL DEFAULT '',
    LN             TEXT NOT NULL,
    DOB            TEXT NOT NULL,
    Urgency_level  TEXT NOT NULL CHECK (Urgency_level IN ('Critical', 'High', 'Medium', 'Low')),
    Gender         TEXT NOT NULL CHECK (Gender IN ('M', 'F')),
    B_grp          TEXT NOT NULL
                   CHECK (B_grp IN ('A+', 'A-', 'B+', 'B-', 'AB+', 'AB-', 'O+', 'O-'))
);

CREATE TABLE IF NOT EXISTS Patient_phone (
    P_id     INTEGER NOT NULL REFERENCES Patient(P_id) ON DELETE CASCADE,
    P_Ph_no  TEXT NOT NULL,
    PRIMARY KEY (P_id, P_Ph_no)
);

CREATE TABLE IF NOT EXISTS Donation (
    Do_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    D_id            INTEGER NOT NULL REFERENCES Donor(D_id),
    H_id            INTEGER NOT NULL REFERENCES Hospital(H_id),
    Do_type         TEXT NOT NULL CHECK (Do_type IN ('Blood', 'Organ')),
    Do_DT           TEXT NOT NULL,
    success_status  TEXT NOT NULL CHECK (success_status IN ('Success', 'Failed'))
);

CREATE INDEX IF NOT EXISTS idx_donation_donor ON Donation(D_id);
CREATE INDEX IF NOT EXISTS idx_donation_date ON Donation(Do_DT);

CREATE TABLE IF NOT EXISTS Blood (
    B_id               INTEGER PRIMARY KEY AUTOINCREMENT,
    Do_id              INTEGER NOT NULL UNIQUE REFERENCES Donation(Do_id),
    stor_loc           TEXT NOT NULL,
    B_status           TEXT NOT NULL CHECK (B_status IN ('Available', 'Issued', 'Expired')),
    Expiry_date        TEXT NOT NULL,
    B_collection_date  TEXT NOT NULL,
    version            INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS Organ (
    O_id             INTEGER PRIMARY KEY AUTOINCREMENT,
    Do_id            INTEGER NOT NULL UNIQUE REFERENCES Donation(Do_id),
    O_type           TEXT NOT NULL,
    O_DT             TEXT NOT NULL,
    O_status         TEXT NOT NULL CHECK (O_status IN ('Healthy', 'Rejected', 'Pending', 'Used')),
    O_collection_DT  TEXT NOT NULL,
    version          INTEGER NOT NULL DEFAULT 0
);

CREATE TRIGGER IF NOT EXISTS blood_requires_blood_donation
BEFORE INSERT ON Blood
WHEN NOT EXISTS (
    SELECT 1 FROM Donation
    WHERE Do_id = NEW.Do_id AND Do_type = 'Blood' AND success_status = 'Success'
)
BEGIN
    SELECT RAISE(ABORT, 'blood unit requires a successful blood donation');
END;

CREATE TRIGGER IF NOT EXISTS organ_requires_organ_donation
BEFORE INSERT ON Organ
WHEN NOT EXISTS (
    SELECT 1 FROM Donation
    WHERE Do_id = NEW.Do_id AND Do_type = 'Organ' AND success_status = 'Success'
)
BEGIN
    SELECT RAISE(ABORT, 'organ unit requires a successful organ donation');
END;
";

/// Enable foreign keys and create all tables, indexes and triggers
///
/// Safe to call on an already initialized database.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(DDL)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    log::debug!("Registry schema initialized (version {SCHEMA_VERSION})");
    Ok(())
}

/// Read the schema version stamped on the database
pub fn schema_version(conn: &Connection) -> Result<i32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
