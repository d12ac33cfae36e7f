//! Field ID codec
//!
//! Provides [`FieldId`] for addressing one form field as a stable dotted
//! string key: `event.section.group.fieldName`.

use crate::event::Event;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Stable key locating one field: `event.section.group.fieldName`
///
/// The dotted string form is the persistence and wire representation; the
/// parts are kept separate in memory so section/group lookups need no
/// re-parsing.
///
/// # Limitation
/// Parts are joined with `.` and no escaping is performed. A field name that
/// itself contains `.` produces a key that cannot be decoded. Authoring
/// tooling keeps names dot-free; this codec does not defend against it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    event: Event,
    section_id: String,
    group_id: String,
    field_name: String,
}

impl FieldId {
    /// Create a field ID from its four parts
    #[inline]
    #[must_use]
    pub fn new(
        event: Event,
        section_id: impl Into<String>,
        group_id: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            event,
            section_id: section_id.into(),
            group_id: group_id.into(),
            field_name: field_name.into(),
        }
    }

    /// Event scope
    #[inline]
    #[must_use]
    pub const fn event(&self) -> Event {
        self.event
    }

    /// Section the field belongs to
    #[inline]
    #[must_use]
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// Group within the section
    #[inline]
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Field name, unique within its section
    #[inline]
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Decode only the `(event, section)` prefix of a dotted key
    ///
    /// Takes the first two segments and ignores the rest, so it also accepts
    /// keys whose name segment contains stray dots.
    ///
    /// # Errors
    /// Returns [`FieldIdError`] if there are fewer than two segments or the
    /// event segment is unknown.
    pub fn decode_section(encoded: &str) -> Result<(Event, &str), FieldIdError> {
        let mut parts = encoded.splitn(3, '.');
        let event = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FieldIdError::segment_count(encoded, 0))?;
        let section = parts
            .next()
            .ok_or_else(|| FieldIdError::segment_count(encoded, 1))?;
        let event = event
            .parse::<Event>()
            .map_err(|_| FieldIdError::UnknownEvent {
                encoded: encoded.to_string(),
                event: event.to_string(),
            })?;
        Ok((event, section))
    }

    /// Same field, different name segment
    ///
    /// Used when an administrator renames a custom field; every other part of
    /// the key is preserved.
    #[inline]
    #[must_use]
    pub fn with_field_name(&self, field_name: impl Into<String>) -> Self {
        Self {
            event: self.event,
            section_id: self.section_id.clone(),
            group_id: self.group_id.clone(),
            field_name: field_name.into(),
        }
    }
}

impl Display for FieldId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.event, self.section_id, self.group_id, self.field_name
        )
    }
}

impl FromStr for FieldId {
    type Err = FieldIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return Err(FieldIdError::segment_count(s, parts.len()));
        }
        let event = parts[0]
            .parse::<Event>()
            .map_err(|_| FieldIdError::UnknownEvent {
                encoded: s.to_string(),
                event: parts[0].to_string(),
            })?;
        Ok(Self::new(event, parts[1], parts[2], parts[3]))
    }
}

impl Serialize for FieldId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Errors decoding a dotted field key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldIdError {
    /// Key did not split into the expected number of segments
    #[error("field id '{encoded}' has {found} segments, expected 4")]
    SegmentCount {
        /// The offending key
        encoded: String,
        /// Number of segments found
        found: usize,
    },

    /// First segment is not a registrable event
    #[error("field id '{encoded}' has unknown event segment '{event}'")]
    UnknownEvent {
        /// The offending key
        encoded: String,
        /// The unrecognized event segment
        event: String,
    },
}

impl FieldIdError {
    fn segment_count(encoded: &str, found: usize) -> Self {
        Self::SegmentCount {
            encoded: encoded.to_string(),
            found,
        }
    }
}
