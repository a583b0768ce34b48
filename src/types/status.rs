//! Active/inactive status shared by most back-office records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Whether a record is in use.
///
/// Records reach the client with many encodings of the same flag: the
/// current `"Ativo"`/`"Inativo"` labels, legacy upper-case or single-letter
/// codes, English words, booleans. All of them collapse onto this enum, and
/// every screen renders one of the two canonical [`labels`](Self::label).
///
/// ## Example
///
/// ```rust
/// use shopdesk::RecordStatus;
///
/// assert_eq!(RecordStatus::parse("ATIVO"), Some(RecordStatus::Active));
/// assert_eq!(RecordStatus::parse("A"), Some(RecordStatus::Active));
/// assert_eq!(RecordStatus::Active.label(), "Ativo");
/// assert_eq!(RecordStatus::parse("inactive"), Some(RecordStatus::Inactive));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordStatus {
    /// The record is in use.
    #[default]
    Active,
    /// The record was deactivated and is hidden from pickers.
    Inactive,
}

impl RecordStatus {
    /// Canonical label for [`RecordStatus::Active`].
    pub const ACTIVE_LABEL: &'static str = "Ativo";
    /// Canonical label for [`RecordStatus::Inactive`].
    pub const INACTIVE_LABEL: &'static str = "Inativo";

    /// Parses any known encoding of the status, ignoring case and padding.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ativo" | "ativa" | "a" | "s" | "sim" | "active" | "true" | "1" => {
                Some(RecordStatus::Active)
            }
            "inativo" | "inativa" | "i" | "n" | "nao" | "não" | "inactive" | "false" | "0" => {
                Some(RecordStatus::Inactive)
            }
            _ => None,
        }
    }

    /// Maps a boolean `active` flag.
    pub fn from_active(active: bool) -> Self {
        if active {
            RecordStatus::Active
        } else {
            RecordStatus::Inactive
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            RecordStatus::Active => Self::ACTIVE_LABEL,
            RecordStatus::Inactive => Self::INACTIVE_LABEL,
        }
    }

    /// Returns `true` for [`RecordStatus::Active`].
    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active)
    }

    /// Returns the opposite status.
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            RecordStatus::Active => RecordStatus::Inactive,
            RecordStatus::Inactive => RecordStatus::Active,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::invalid_argument(format!("unknown status: {:?}", s)))
    }
}

impl From<bool> for RecordStatus {
    fn from(active: bool) -> Self {
        Self::from_active(active)
    }
}

impl Serialize for RecordStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Code(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(active) => Ok(Self::from_active(active)),
            Raw::Code(code) => Ok(Self::from_active(code != 0)),
            Raw::Text(text) => Self::parse(&text)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown status: {:?}", text))),
        }
    }
}
