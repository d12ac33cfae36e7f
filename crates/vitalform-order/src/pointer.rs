//! Neighbor pointers
//!
//! A [`Pointer`] is a field record's link to its neighbor: another field ID,
//! or one of the two list sentinels. The wire form is the dotted field ID
//! string, `"TOP"`, or `"BOTTOM"`.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use vitalform_schema::{FieldId, FieldIdError};

/// Link from one field record to a neighbor
///
/// `Top` only ever appears as a `preceding` link and `Bottom` only as a
/// `foregoing` link; [`SectionFieldMap::verify`] checks this along with the
/// rest of the list shape.
///
/// [`SectionFieldMap::verify`]: crate::SectionFieldMap::verify
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pointer {
    /// Head sentinel: nothing precedes this record
    Top,
    /// Tail sentinel: nothing follows this record
    Bottom,
    /// Link to another record in the same section
    Field(FieldId),
}

impl Pointer {
    /// The linked field ID, if this is not a sentinel
    #[inline]
    #[must_use]
    pub const fn field(&self) -> Option<&FieldId> {
        match self {
            Self::Field(id) => Some(id),
            Self::Top | Self::Bottom => None,
        }
    }

    /// Whether this is the head sentinel
    #[inline]
    #[must_use]
    pub const fn is_top(&self) -> bool {
        matches!(self, Self::Top)
    }

    /// Whether this is the tail sentinel
    #[inline]
    #[must_use]
    pub const fn is_bottom(&self) -> bool {
        matches!(self, Self::Bottom)
    }
}

impl From<FieldId> for Pointer {
    fn from(id: FieldId) -> Self {
        Self::Field(id)
    }
}

impl Display for Pointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("TOP"),
            Self::Bottom => f.write_str("BOTTOM"),
            Self::Field(id) => id.fmt(f),
        }
    }
}

impl FromStr for Pointer {
    type Err = FieldIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOP" => Ok(Self::Top),
            "BOTTOM" => Ok(Self::Bottom),
            other => other.parse::<FieldId>().map(Self::Field),
        }
    }
}

impl Serialize for Pointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
