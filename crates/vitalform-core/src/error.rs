//! Transition errors
//!
//! Commands address fields and sections explicitly, so a dangling ID is a
//! caller error rather than a boundary condition; boundary shifts, by
//! contrast, are ordinary no-ops and never reach this type.

use vitalform_order::ListError;
use vitalform_schema::FieldId;

/// Why a command was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Command names a section the schema does not have
    #[error("unknown section: '{section_id}'")]
    UnknownSection {
        /// The unmatched section ID
        section_id: String,
    },

    /// Command names a field with no record
    #[error("unknown field: '{field_id}'")]
    UnknownField {
        /// The unmatched field ID
        field_id: FieldId,
    },

    /// Custom-field command aimed at a default field
    #[error("field '{field_id}' is not a custom field")]
    NotCustomField {
        /// The default field's ID
        field_id: FieldId,
    },

    /// Add or rename would collide with an existing field
    #[error("field '{field_id}' already exists")]
    DuplicateField {
        /// The colliding ID
        field_id: FieldId,
    },

    /// Section has no groups to place a custom field into
    #[error("section '{section_id}' has no groups")]
    EmptySection {
        /// The group-less section
        section_id: String,
    },

    /// A transition left a section chain broken
    #[error(transparent)]
    List(#[from] ListError),
}

impl TransitionError {
    /// Unknown-field error for an ID
    pub(crate) fn unknown_field(field_id: &FieldId) -> Self {
        Self::UnknownField {
            field_id: field_id.clone(),
        }
    }
}
