//! Administrator edit commands
//!
//! The closed set of edits the configuration UI can request. Commands are
//! plain data; all semantics live in [`ConfigState::apply`].
//!
//! [`ConfigState::apply`]: crate::ConfigState::apply

use serde::{Deserialize, Serialize};
use vitalform_order::FieldStatus;
use vitalform_schema::{FieldDefinition, FieldId};

/// One administrator edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    /// Add a custom field at the bottom of a section
    AddCustomField {
        /// Target section
        section_id: String,
        /// Full renderer definition; the name becomes the field ID's last segment
        definition: FieldDefinition,
    },

    /// Replace a custom field's definition
    ///
    /// A changed name re-keys the record and repoints both neighbors.
    ModifyCustomField {
        /// Field to modify
        field_id: FieldId,
        /// Replacement definition
        definition: FieldDefinition,
    },

    /// Remove a custom field, splicing its neighbors together
    RemoveCustomField {
        /// Field to remove
        field_id: FieldId,
    },

    /// Enable or soft-delete a field
    SetFieldStatus {
        /// Field to change
        field_id: FieldId,
        /// New status
        status: FieldStatus,
    },

    /// Override a default field's requiredness
    SetRequired {
        /// Field to change
        field_id: FieldId,
        /// New required flag
        required: bool,
    },

    /// Move a field one position toward the top of its section
    ShiftUp {
        /// Field to move
        field_id: FieldId,
    },

    /// Move a field one position toward the bottom of its section
    ShiftDown {
        /// Field to move
        field_id: FieldId,
    },
}

impl Command {
    /// Short name for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddCustomField { .. } => "add_custom_field",
            Self::ModifyCustomField { .. } => "modify_custom_field",
            Self::RemoveCustomField { .. } => "remove_custom_field",
            Self::SetFieldStatus { .. } => "set_field_status",
            Self::SetRequired { .. } => "set_required",
            Self::ShiftUp { .. } => "shift_up",
            Self::ShiftDown { .. } => "shift_down",
        }
    }
}
