//! Common domain type definitions
//!
//! This module contains the enumerated tokens stored in the registry tables.
//! Each type parses case-insensitively from its stored token, renders back to
//! that exact token, and binds directly as a SQLite parameter.

use itertools::Itertools;
use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Define an enum backed by a fixed set of stored string tokens
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $token:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $token)] $variant),+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The token stored in the database
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = RegistryError;

            fn from_str(s: &str) -> Result<Self> {
                let trimmed = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| {
                        RegistryError::validation(format!(
                            "invalid {} '{}' (expected one of: {})",
                            $label,
                            s,
                            Self::ALL.iter().map(|v| v.as_str()).join(", ")
                        ))
                    })
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e: RegistryError| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

token_enum! {
    /// Gender of a donor or patient
    Gender, "gender" {
        Male => "M",
        Female => "F",
    }
}

token_enum! {
    /// ABO/RhD blood group
    BloodGroup, "blood group" {
        APositive => "A+",
        ANegative => "A-",
        BPositive => "B+",
        BNegative => "B-",
        AbPositive => "AB+",
        AbNegative => "AB-",
        OPositive => "O+",
        ONegative => "O-",
    }
}

token_enum! {
    /// What a donor gives, and which inventory table a donation feeds
    DonationType, "donation type" {
        Blood => "Blood",
        Organ => "Organ",
    }
}

token_enum! {
    /// Outcome of a donation event
    DonationOutcome, "donation outcome" {
        Success => "Success",
        Failed => "Failed",
    }
}

token_enum! {
    /// Patient-side priority classification
    UrgencyLevel, "urgency level" {
        Critical => "Critical",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

token_enum! {
    /// Inventory table a unit lives in
    UnitKind, "unit kind" {
        Blood => "Blood",
        Organ => "Organ",
    }
}

token_enum! {
    /// Lifecycle state of a blood unit
    BloodStatus, "blood status" {
        Available => "Available",
        Issued => "Issued",
        Expired => "Expired",
    }
}

token_enum! {
    /// Lifecycle state of an organ unit
    OrganStatus, "organ status" {
        Healthy => "Healthy",
        Rejected => "Rejected",
        Pending => "Pending",
        Used => "Used",
    }
}

impl DonationType {
    /// Inventory kind produced by a successful donation of this type
    #[must_use]
    pub const fn unit_kind(self) -> UnitKind {
        match self {
            Self::Blood => UnitKind::Blood,
            Self::Organ => UnitKind::Organ,
        }
    }
}

/// A status token resolved against the unit kind it applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    Blood(BloodStatus),
    Organ(OrganStatus),
}

impl UnitStatus {
    /// Parse a status token for the given unit kind
    ///
    /// `"Issued"` is valid for blood only, `"Used"` for organs only, and so on;
    /// a token from the other machine is a validation error.
    pub fn parse(kind: UnitKind, token: &str) -> Result<Self> {
        match kind {
            UnitKind::Blood => token.parse().map(Self::Blood),
            UnitKind::Organ => token.parse().map(Self::Organ),
        }
    }

    /// Unit kind this status belongs to
    #[must_use]
    pub const fn kind(self) -> UnitKind {
        match self {
            Self::Blood(_) => UnitKind::Blood,
            Self::Organ(_) => UnitKind::Organ,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blood(status) => status.as_str(),
            Self::Organ(status) => status.as_str(),
        }
    }
}

impl From<BloodStatus> for UnitStatus {
    fn from(status: BloodStatus) -> Self {
        Self::Blood(status)
    }
}

impl From<OrganStatus> for UnitStatus {
    fn from(status: OrganStatus) -> Self {
        Self::Organ(status)
    }
}

impl std::fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
