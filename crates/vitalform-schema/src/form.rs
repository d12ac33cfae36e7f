//! Default form schema
//!
//! The factory-default form shape: sections containing groups containing
//! fields. The configuration engine never edits this structure in place;
//! administrator overrides are applied to copies.

use crate::field::FieldDefinition;
use crate::field_id::FieldId;
use crate::Event;
use serde::{Deserialize, Serialize};

/// The factory-default form for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Sections in declaration order
    pub sections: Vec<Section>,
}

/// One form section (e.g. `child`, `mother`, `documents`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier, second segment of every contained field ID
    pub id: String,
    /// View groups in declaration order
    pub groups: Vec<Group>,
}

/// One view group within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group identifier, third segment of every contained field ID
    pub id: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDefinition>,
}

/// Positional address of a default field within its [`FormSchema`]
///
/// Immutable once assigned; overrides reference default fields through this
/// address rather than by copying the definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldIdentifiers {
    /// Index into [`FormSchema::sections`]
    #[serde(rename = "sectionIndex")]
    pub section_index: usize,
    /// Index into [`Section::groups`]
    #[serde(rename = "groupIndex")]
    pub group_index: usize,
    /// Index into [`Group::fields`]
    #[serde(rename = "fieldIndex")]
    pub field_index: usize,
}

impl FieldIdentifiers {
    /// Create an address from its three indices
    #[inline]
    #[must_use]
    pub const fn new(section_index: usize, group_index: usize, field_index: usize) -> Self {
        Self {
            section_index,
            group_index,
            field_index,
        }
    }
}

impl FormSchema {
    /// Parse a schema from its JSON wire form
    ///
    /// # Errors
    /// Returns the underlying serde error if the JSON does not match the
    /// schema shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a section by ID
    #[inline]
    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Resolve a positional address to its field definition
    #[must_use]
    pub fn definition(&self, identifiers: FieldIdentifiers) -> Option<&FieldDefinition> {
        self.sections
            .get(identifiers.section_index)?
            .groups
            .get(identifiers.group_index)?
            .fields
            .get(identifiers.field_index)
    }

    /// Field ID for the default field at a positional address
    #[must_use]
    pub fn field_id(&self, event: Event, identifiers: FieldIdentifiers) -> Option<FieldId> {
        let section = self.sections.get(identifiers.section_index)?;
        let group = section.groups.get(identifiers.group_index)?;
        let field = group.fields.get(identifiers.field_index)?;
        Some(FieldId::new(event, &section.id, &group.id, &field.name))
    }
}

impl Section {
    /// Look up a group by ID
    #[inline]
    #[must_use]
    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Total field count across all groups
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.groups.iter().map(|g| g.fields.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use pretty_assertions::assert_eq;

    fn schema() -> FormSchema {
        FormSchema {
            sections: vec![Section {
                id: "child".to_string(),
                groups: vec![Group {
                    id: "child-view-group".to_string(),
                    fields: vec![
                        FieldDefinition::new("firstName", FieldType::Text, "First name"),
                        FieldDefinition::new("birthDate", FieldType::Date, "Date of birth"),
                    ],
                }],
            }],
        }
    }

    #[test]
    fn definition_resolves_positional_address() {
        let schema = schema();
        let def = schema.definition(FieldIdentifiers::new(0, 0, 1)).unwrap();
        assert_eq!(def.name, "birthDate");
    }

    #[test]
    fn out_of_range_address_is_none() {
        assert!(schema().definition(FieldIdentifiers::new(0, 1, 0)).is_none());
        assert!(schema().definition(FieldIdentifiers::new(2, 0, 0)).is_none());
    }

    #[test]
    fn field_id_joins_schema_position() {
        let id = schema()
            .field_id(Event::Birth, FieldIdentifiers::new(0, 0, 0))
            .unwrap();
        assert_eq!(id.to_string(), "birth.child.child-view-group.firstName");
    }

    #[test]
    fn schema_round_trips_through_json() {
        let schema = schema();
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(FormSchema::from_json(&json).unwrap(), schema);
    }
}
