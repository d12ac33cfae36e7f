//! Field definitions
//!
//! The renderer-facing description of one form field. The configuration
//! engine treats [`FieldType`] as opaque beyond identity; the closed set
//! mirrors what the form renderer understands.

use serde::{Deserialize, Serialize};

/// Renderer field kind
///
/// Closed set understood by the form renderer. Stored in SCREAMING_SNAKE
/// wire form alongside the rest of the field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// Single-line text input
    Text,
    /// Multi-line text input
    Textarea,
    /// Numeric input
    Number,
    /// Telephone number input
    Tel,
    /// Date picker
    Date,
    /// Dropdown with a fixed option list
    SelectWithOptions,
    /// Radio button group
    RadioGroup,
    /// Single checkbox
    Checkbox,
    /// Visual subsection divider
    Subsection,
    /// Static paragraph of text
    Paragraph,
    /// Document upload with a category option list
    DocumentUploaderWithOption,
}

impl FieldType {
    /// Whether the kind carries an option list
    #[inline]
    #[must_use]
    pub const fn has_options(self) -> bool {
        matches!(
            self,
            Self::SelectWithOptions | Self::RadioGroup | Self::DocumentUploaderWithOption
        )
    }
}

/// One entry in a select/radio option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value
    pub value: String,
    /// Display label
    pub label: String,
}

impl SelectOption {
    /// Create an option
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One renderer field, as carried by the default schema and by custom fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Name, unique within the field's section; last segment of the field ID
    pub name: String,

    /// Renderer kind
    #[serde(rename = "fieldType")]
    pub field_type: FieldType,

    /// Display label
    pub label: String,

    /// Whether the renderer requires a value
    #[serde(default)]
    pub required: bool,

    /// Option list for kinds that carry one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,

    /// Input placeholder text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Help tooltip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,

    /// Maximum input length for text kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl FieldDefinition {
    /// Create a minimal definition of the given kind
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: label.into(),
            required: false,
            options: Vec::new(),
            placeholder: None,
            tooltip: None,
            max_length: None,
        }
    }

    /// With required flag
    #[inline]
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// With option list
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }
}
