//! Vital events
//!
//! The closed set of registrable events. Every field ID is scoped to one of
//! these, and every form schema describes exactly one of them.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A registrable vital event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    /// Birth declaration
    Birth,
    /// Death declaration
    Death,
    /// Marriage declaration
    Marriage,
}

impl Event {
    /// Wire name used as the first segment of a field ID
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Birth => "birth",
            Self::Death => "death",
            Self::Marriage => "marriage",
        }
    }

    /// All events, in declaration order
    #[inline]
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Birth, Self::Death, Self::Marriage]
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Event {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "birth" => Ok(Self::Birth),
            "death" => Ok(Self::Death),
            "marriage" => Ok(Self::Marriage),
            other => Err(EventError::Unknown(other.to_string())),
        }
    }
}

/// Errors parsing an event name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// Name is not one of the registrable events
    #[error("unknown event: '{0}'")]
    Unknown(String),
}
