//! Query gateway: listings and dashboard figures as uniform tables
//!
//! Each [`View`] is one parameterized statement. Views are what a dashboard
//! or data-entry screen displays; typed lookups live in
//! [`crate::repository`].

pub mod table;

pub use table::{Table, query_table};

use std::fmt;
use std::str::FromStr;

use rusqlite::Connection;
use serde::Serialize;

use crate::error::{RegistryError, Result};
use crate::models::{BloodStatus, DonorId};
use crate::repository::{count, like_pattern};

/// Rows shown in the recent donations list when no limit is given
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// A listing backed by one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// All donors by id
    Donors,
    /// Donors whose name parts or blood group contain the text
    DonorSearch(String),
    /// One donor row
    Donor(DonorId),
    Patients,
    /// All donations, newest first
    Donations,
    /// The newest donations, at most the given number
    RecentDonations(u32),
    BloodStock,
    OrganStock,
    /// Hospitals with their address, if any
    Hospitals,
}

impl View {
    /// Views that take no argument, by name
    pub const NAMED: &'static [(&'static str, View)] = &[
        ("donors", View::Donors),
        ("patients", View::Patients),
        ("donations", View::Donations),
        ("recent", View::RecentDonations(DEFAULT_RECENT_LIMIT)),
        ("blood", View::BloodStock),
        ("organs", View::OrganStock),
        ("hospitals", View::Hospitals),
    ];
}

impl FromStr for View {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, view)| view.clone())
            .ok_or_else(|| RegistryError::validation(format!("unknown view '{s}'")))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Donors => write!(f, "Donors"),
            Self::DonorSearch(q) => write!(f, "Donors matching '{q}'"),
            Self::Donor(id) => write!(f, "Donor {id}"),
            Self::Patients => write!(f, "Patients"),
            Self::Donations => write!(f, "Donations"),
            Self::RecentDonations(n) => write!(f, "Recent Donations ({n})"),
            Self::BloodStock => write!(f, "Blood Stock"),
            Self::OrganStock => write!(f, "Organ Stock"),
            Self::Hospitals => write!(f, "Hospitals"),
        }
    }
}

/// Run the statement behind a view
pub fn load_view(conn: &Connection, view: &View) -> Result<Table> {
    log::debug!("Loading view: {view}");
    match view {
        View::Donors => query_table(conn, "SELECT * FROM Donor ORDER BY D_id", []),
        View::DonorSearch(q) => query_table(
            conn,
            "SELECT * FROM Donor
             WHERE FN LIKE ?1 ESCAPE '\\' OR MN LIKE ?1 ESCAPE '\\'
                OR LN LIKE ?1 ESCAPE '\\' OR B_grp LIKE ?1 ESCAPE '\\'
             ORDER BY D_id",
            [like_pattern(q)],
        ),
        View::Donor(id) => query_table(conn, "SELECT * FROM Donor WHERE D_id = ?1", [*id]),
        View::Patients => query_table(
            conn,
            "SELECT p.P_id, p.H_id, p.FN, p.MN, p.LN, p.DOB, p.Urgency_level, p.Gender, p.B_grp
             FROM Patient p ORDER BY p.P_id",
            [],
        ),
        View::Donations => query_table(
            conn,
            "SELECT * FROM Donation ORDER BY Do_DT DESC, Do_id DESC",
            [],
        ),
        View::RecentDonations(limit) => query_table(
            conn,
            "SELECT Do_id, D_id, H_id, Do_type, Do_DT, success_status
             FROM Donation ORDER BY Do_DT DESC, Do_id DESC LIMIT ?1",
            [*limit],
        ),
        View::BloodStock => query_table(
            conn,
            "SELECT B_id, Do_id, stor_loc, B_status, Expiry_date, B_collection_date
             FROM Blood ORDER BY B_id",
            [],
        ),
        View::OrganStock => query_table(
            conn,
            "SELECT O_id, Do_id, O_type, O_DT, O_status, O_collection_DT
             FROM Organ ORDER BY O_id",
            [],
        ),
        View::Hospitals => query_table(
            conn,
            "SELECT h.H_id, h.H_name, h.H_Ph_no, ha.city, ha.state, ha.pincode
             FROM Hospital h LEFT JOIN Hospital_address ha ON h.H_id = ha.H_id
             ORDER BY h.H_id",
            [],
        ),
    }
}

/// Aggregate counts shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardSummary {
    pub donors: i64,
    pub patients: i64,
    pub donations: i64,
    pub available_blood_units: i64,
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Donors: {}", self.donors)?;
        writeln!(f, "Patients: {}", self.patients)?;
        writeln!(f, "Donations: {}", self.donations)?;
        write!(f, "Available Blood Units: {}", self.available_blood_units)
    }
}

/// Dashboard counts plus the recent donations list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub recent_donations: Table,
}

pub fn load_summary(conn: &Connection) -> Result<DashboardSummary> {
    Ok(DashboardSummary {
        donors: count(conn, "SELECT COUNT(*) FROM Donor", [])?,
        patients: count(conn, "SELECT COUNT(*) FROM Patient", [])?,
        donations: count(conn, "SELECT COUNT(*) FROM Donation", [])?,
        available_blood_units: count(
            conn,
            "SELECT COUNT(*) FROM Blood WHERE B_status = ?1",
            [BloodStatus::Available],
        )?,
    })
}

pub fn load_dashboard(conn: &Connection, recent_limit: u32) -> Result<Dashboard> {
    Ok(Dashboard {
        summary: load_summary(conn)?,
        recent_donations: load_view(conn, &View::RecentDonations(recent_limit))?,
    })
}
