//! Stored override records
//!
//! The persistence format: a flat list of [`OverrideRecord`]s written back
//! wholesale on every edit. A record carries only a `preceding` link; the
//! forward links of the editable map are reconstructed during
//! materialization.

use serde::{Deserialize, Serialize};
use vitalform_order::{FieldStatus, Pointer, RecordKind};
use vitalform_schema::FieldId;

/// One stored delta against the default form
///
/// For [`RecordKind::Default`] the record is a positional/requiredness/
/// enabled delta against the schema field addressed by its identifiers. For
/// [`RecordKind::Custom`] it carries the full administrator-authored
/// definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRecord {
    /// Key of the field this delta configures
    #[serde(rename = "fieldId")]
    pub field_id: FieldId,

    /// The field this one follows: another field ID or `TOP`
    ///
    /// Never [`Pointer::Bottom`]; a field placed last simply follows the
    /// previous last field.
    #[serde(rename = "precedingFieldId")]
    pub preceding: Pointer,

    /// Soft-delete flag
    #[serde(default, rename = "enabled")]
    pub status: FieldStatus,

    /// Override of the default definition's required flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Default-field delta or custom definition
    #[serde(flatten)]
    pub kind: RecordKind,
}

impl OverrideRecord {
    /// Whether this is a custom-field override
    #[inline]
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        self.kind.is_custom()
    }

    /// Parse a stored override list from its JSON wire form
    ///
    /// # Errors
    /// Returns the underlying serde error if the JSON does not match the
    /// record shape.
    pub fn parse_list(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
