//! Opaque record identifiers.
//!
//! Every stored record is keyed by a UUIDv7 rendered in hyphenated form.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh, time-ordered identifier.
    pub fn generate() -> Self {
        RecordId(Uuid::now_v7())
    }

    /// Parses the string form of an identifier.
    ///
    /// Fails with [`Error::InvalidIdentifier`] instead of letting a malformed
    /// reference silently match nothing.
    pub fn parse(value: &str) -> Result<Self> {
        Uuid::parse_str(value.trim())
            .map(RecordId)
            .map_err(|_| Error::InvalidIdentifier(value.to_string()))
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RecordId::parse(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Parses an optional reference, treating an empty string as absent.
pub fn parse_optional_id(value: Option<&str>) -> Result<Option<RecordId>> {
    match value {
        Some(raw) if !raw.is_empty() => RecordId::parse(raw).map(Some),
        _ => Ok(None),
    }
}
