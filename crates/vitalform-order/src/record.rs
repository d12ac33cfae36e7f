//! Field records
//!
//! The per-field configuration state held in a [`SectionFieldMap`]. A record
//! is either a positional handle onto a default-schema field or a full
//! administrator-authored custom field; the two cases are a tagged sum so
//! both are always handled.
//!
//! [`SectionFieldMap`]: crate::SectionFieldMap

use crate::pointer::Pointer;
use serde::{Deserialize, Serialize};
use vitalform_schema::{FieldDefinition, FieldId, FieldIdentifiers};

/// Soft-delete flag
///
/// Disabled fields are filtered out when the configured form is rendered but
/// stay in the map so the administrator can re-enable them. The legacy wire
/// form is the empty string for enabled and `"DISABLED"` for disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldStatus {
    /// Field renders normally
    #[default]
    #[serde(rename = "")]
    Enabled,
    /// Field is hidden from the rendered form but kept in configuration
    #[serde(rename = "DISABLED")]
    Disabled,
}

impl FieldStatus {
    /// Whether the field is soft-deleted
    #[inline]
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        matches!(self, Self::Disabled)
    }
}

/// What a record stands for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RecordKind {
    /// Handle onto a field of the default schema
    ///
    /// Carries only the positional address; the authoritative definition
    /// stays in the schema. The address never changes after creation.
    Default {
        /// Position of the field in the default schema
        identifiers: FieldIdentifiers,
    },
    /// Administrator-added field with no default-schema counterpart
    Custom {
        /// Full renderer definition
        definition: FieldDefinition,
    },
}

impl RecordKind {
    /// Whether this is a custom field
    #[inline]
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }
}

/// One form field's configuration state
///
/// # Invariants
/// - `field_id` never changes after creation
/// - `preceding` is never [`Pointer::Bottom`]; `foregoing` is never
///   [`Pointer::Top`]
/// - for [`RecordKind::Default`], `identifiers` is immutable; only the
///   pointers, `status`, and `required` carry administrator edits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Unique key, `event.section.group.fieldName`
    #[serde(rename = "fieldId")]
    pub field_id: FieldId,

    /// Link to the record before this one
    #[serde(rename = "precedingFieldId")]
    pub preceding: Pointer,

    /// Link to the record after this one
    #[serde(rename = "foregoingFieldId")]
    pub foregoing: Pointer,

    /// Soft-delete flag
    #[serde(default, rename = "enabled")]
    pub status: FieldStatus,

    /// Override of the default definition's required flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Default-field handle or custom definition
    #[serde(flatten)]
    pub kind: RecordKind,
}

impl FieldRecord {
    /// Record for a default-schema field at its factory position
    #[inline]
    #[must_use]
    pub const fn default_field(
        field_id: FieldId,
        preceding: Pointer,
        foregoing: Pointer,
        identifiers: FieldIdentifiers,
    ) -> Self {
        Self {
            field_id,
            preceding,
            foregoing,
            status: FieldStatus::Enabled,
            required: None,
            kind: RecordKind::Default { identifiers },
        }
    }

    /// Record for an administrator-added field
    #[inline]
    #[must_use]
    pub const fn custom_field(
        field_id: FieldId,
        preceding: Pointer,
        foregoing: Pointer,
        definition: FieldDefinition,
    ) -> Self {
        Self {
            field_id,
            preceding,
            foregoing,
            status: FieldStatus::Enabled,
            required: None,
            kind: RecordKind::Custom { definition },
        }
    }

    /// Whether this is a custom field
    #[inline]
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        self.kind.is_custom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalform_schema::Event;

    fn id(name: &str) -> FieldId {
        FieldId::new(Event::Birth, "child", "child-view-group", name)
    }

    #[test]
    fn status_wire_form_is_legacy_strings() {
        assert_eq!(serde_json::to_string(&FieldStatus::Enabled).unwrap(), "\"\"");
        assert_eq!(
            serde_json::to_string(&FieldStatus::Disabled).unwrap(),
            "\"DISABLED\""
        );
    }

    #[test]
    fn default_record_serializes_with_identifiers() {
        let rec = FieldRecord::default_field(
            id("firstName"),
            Pointer::Top,
            Pointer::Bottom,
            FieldIdentifiers::new(0, 0, 0),
        );
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["kind"], "default");
        assert_eq!(json["identifiers"]["fieldIndex"], 0);
        assert_eq!(json["precedingFieldId"], "TOP");
    }

    #[test]
    fn record_round_trips() {
        let rec = FieldRecord::custom_field(
            id("favouriteColour"),
            Pointer::Field(id("firstName")),
            Pointer::Bottom,
            FieldDefinition::new(
                "favouriteColour",
                vitalform_schema::FieldType::Text,
                "Favourite colour",
            ),
        );
        let json = serde_json::to_string(&rec).unwrap();
        let back: FieldRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }
}
