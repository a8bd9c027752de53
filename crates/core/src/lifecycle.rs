//! Entry/exit lifecycle vocabulary.
//!
//! The typed enums are used in request DTOs and validation; the database
//! stores their snake_case string form (TEXT columns with CHECK
//! constraints), so entity structs carry plain strings.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How an animal came into the shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Rescue,
    Confiscation,
    Surrender,
    Quitclaim,
    TemporarySurrender,
    Other,
}

impl EntryType {
    /// Database string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rescue => "rescue",
            Self::Confiscation => "confiscation",
            Self::Surrender => "surrender",
            Self::Quitclaim => "quitclaim",
            Self::TemporarySurrender => "temporary_surrender",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for EntryType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rescue" => Ok(Self::Rescue),
            "confiscation" => Ok(Self::Confiscation),
            "surrender" => Ok(Self::Surrender),
            "quitclaim" => Ok(Self::Quitclaim),
            "temporary_surrender" => Ok(Self::TemporarySurrender),
            "other" => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Unknown entry type '{other}'"
            ))),
        }
    }
}

/// The outcome event ending an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitType {
    Adoption,
    Death,
    ReturnToOwner,
    Disappearance,
    CustodyTransfer,
}

impl ExitType {
    /// Database string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adoption => "adoption",
            Self::Death => "death",
            Self::ReturnToOwner => "return_to_owner",
            Self::Disappearance => "disappearance",
            Self::CustodyTransfer => "custody_transfer",
        }
    }
}

impl std::str::FromStr for ExitType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adoption" => Ok(Self::Adoption),
            "death" => Ok(Self::Death),
            "return_to_owner" => Ok(Self::ReturnToOwner),
            "disappearance" => Ok(Self::Disappearance),
            "custody_transfer" => Ok(Self::CustodyTransfer),
            other => Err(CoreError::Validation(format!(
                "Unknown exit type '{other}'"
            ))),
        }
    }
}

/// Known event names for the append-only animal log.
pub mod log_events {
    pub const CREATE: &str = "create";
    pub const NEW_ENTRY: &str = "new-entry";
    pub const ENTRY_COMPLETE: &str = "entry-complete";
    pub const EXIT: &str = "exit";
    pub const DATA_UPDATE: &str = "data-update";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn entry_type_round_trips_through_str() {
        for ty in [
            EntryType::Rescue,
            EntryType::Confiscation,
            EntryType::Surrender,
            EntryType::Quitclaim,
            EntryType::TemporarySurrender,
            EntryType::Other,
        ] {
            assert_eq!(EntryType::from_str(ty.as_str()).unwrap(), ty);
        }
    }

    #[test]
    fn exit_type_round_trips_through_str() {
        for ty in [
            ExitType::Adoption,
            ExitType::Death,
            ExitType::ReturnToOwner,
            ExitType::Disappearance,
            ExitType::CustodyTransfer,
        ] {
            assert_eq!(ExitType::from_str(ty.as_str()).unwrap(), ty);
        }
    }

    #[test]
    fn unknown_entry_type_rejected() {
        assert!(EntryType::from_str("teleport").is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ExitType::ReturnToOwner).unwrap();
        assert_eq!(json, "\"return_to_owner\"");
    }
}
