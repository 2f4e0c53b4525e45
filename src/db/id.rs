//! Opaque record identifiers.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Store-assigned identifier of one document.
///
/// Any textual UUID form parses; the canonical form is hyphenated lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh identifier for an insert.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

/// The input did not match the identifier grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedId;

impl FromStr for RecordId {
    type Err = MalformedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| MalformedId)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
