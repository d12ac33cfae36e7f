//! Configuration state and transitions
//!
//! [`ConfigState`] is an immutable snapshot of one event's form
//! configuration: the default schema plus the editable field map derived
//! from it and the stored overrides. [`ConfigState::apply`] is the only way
//! forward — (state, command) → new state, with the input left untouched.

use crate::command::Command;
use crate::error::TransitionError;
use serde::{Deserialize, Serialize};
use vitalform_merge::{configured_field_map, extract_overrides, merge_configuration, OverrideRecord};
use vitalform_order::{FieldMap, FieldRecord, Pointer, RecordKind, SectionFieldMap};
use vitalform_schema::{Event, FieldDefinition, FieldId, FormSchema};

/// One event's form configuration at a point in time
///
/// Derived fresh from (schema + overrides) on every load; the override list
/// is the only persisted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigState {
    event: Event,
    schema: FormSchema,
    sections: FieldMap,
}

impl ConfigState {
    /// Materialize the editable state from the schema and stored overrides
    #[must_use]
    pub fn load(event: Event, schema: FormSchema, overrides: &[OverrideRecord]) -> Self {
        let sections = configured_field_map(&schema, overrides, event);
        tracing::info!(
            event = %event,
            sections = sections.len(),
            overrides = overrides.len(),
            "loaded form configuration"
        );
        Self {
            event,
            schema,
            sections,
        }
    }

    /// Event this configuration belongs to
    #[inline]
    #[must_use]
    pub const fn event(&self) -> Event {
        self.event
    }

    /// The factory-default schema
    #[inline]
    #[must_use]
    pub const fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// The editable field map
    #[inline]
    #[must_use]
    pub const fn field_map(&self) -> &FieldMap {
        &self.sections
    }

    /// Flat delta list for persistence
    ///
    /// # Errors
    /// Returns [`TransitionError::List`] if any section chain is broken.
    pub fn overrides(&self) -> Result<Vec<OverrideRecord>, TransitionError> {
        Ok(extract_overrides(&self.sections, &self.schema, self.event)?)
    }

    /// Renderable form with every override applied and disabled fields dropped
    ///
    /// # Errors
    /// Returns [`TransitionError::List`] if any section chain is broken.
    pub fn configured_form(&self) -> Result<FormSchema, TransitionError> {
        let overrides = self.overrides()?;
        Ok(merge_configuration(&self.schema, &overrides, self.event))
    }

    /// Apply one command, producing the next state
    ///
    /// Boundary shifts are ordinary no-ops; every other way a command can
    /// miss is a typed error and leaves no partial edit behind.
    ///
    /// # Errors
    /// Returns [`TransitionError`] when the command addresses an unknown
    /// section or field, targets a default field with a custom-field
    /// command, or would collide with an existing field.
    pub fn apply(&self, command: Command) -> Result<Self, TransitionError> {
        tracing::debug!(command = command.name(), "applying command");
        let mut next = self.clone();
        match command {
            Command::AddCustomField {
                section_id,
                definition,
            } => next.add_custom_field(&section_id, definition)?,
            Command::ModifyCustomField {
                field_id,
                definition,
            } => next.modify_custom_field(&field_id, definition)?,
            Command::RemoveCustomField { field_id } => next.remove_custom_field(&field_id)?,
            Command::SetFieldStatus { field_id, status } => {
                let record = next.record_mut(&field_id)?;
                record.status = status;
            }
            Command::SetRequired { field_id, required } => {
                let record = next.record_mut(&field_id)?;
                record.required = Some(required);
            }
            Command::ShiftUp { field_id } => next.shift(&field_id, true)?,
            Command::ShiftDown { field_id } => next.shift(&field_id, false)?,
        }
        next.sections.verify()?;
        Ok(next)
    }

    fn section_mut(&mut self, section_id: &str) -> Result<&mut SectionFieldMap, TransitionError> {
        self.sections
            .section_mut(section_id)
            .ok_or_else(|| TransitionError::UnknownSection {
                section_id: section_id.to_string(),
            })
    }

    fn record_mut(&mut self, field_id: &FieldId) -> Result<&mut FieldRecord, TransitionError> {
        self.section_mut(field_id.section_id())?
            .get_mut(field_id)
            .ok_or_else(|| TransitionError::unknown_field(field_id))
    }

    /// Append a custom field at the bottom of a section's chain
    ///
    /// The field lands in the section's last group; its name must not clash
    /// with any field already in the section.
    fn add_custom_field(
        &mut self,
        section_id: &str,
        definition: FieldDefinition,
    ) -> Result<(), TransitionError> {
        let section =
            self.schema
                .section(section_id)
                .ok_or_else(|| TransitionError::UnknownSection {
                    section_id: section_id.to_string(),
                })?;
        let group_id = section
            .groups
            .last()
            .map(|g| g.id.clone())
            .ok_or_else(|| TransitionError::EmptySection {
                section_id: section_id.to_string(),
            })?;
        let field_id = FieldId::new(self.event, section_id, group_id, &definition.name);

        let map = self.section_mut(section_id)?;
        if map.iter().any(|r| r.field_id.field_name() == definition.name) {
            return Err(TransitionError::DuplicateField { field_id });
        }

        let tail = map
            .iter()
            .find(|r| r.foregoing.is_bottom())
            .map(|r| r.field_id.clone());
        let preceding = match tail {
            Some(tail_id) => {
                if let Some(record) = map.get_mut(&tail_id) {
                    record.foregoing = Pointer::Field(field_id.clone());
                }
                Pointer::Field(tail_id)
            }
            None => Pointer::Top,
        };
        tracing::info!(field_id = %field_id, "adding custom field");
        map.insert(FieldRecord::custom_field(
            field_id,
            preceding,
            Pointer::Bottom,
            definition,
        ));
        Ok(())
    }

    /// Replace a custom field's definition, re-keying on rename
    fn modify_custom_field(
        &mut self,
        field_id: &FieldId,
        definition: FieldDefinition,
    ) -> Result<(), TransitionError> {
        let map = self.section_mut(field_id.section_id())?;
        let record = map
            .get(field_id)
            .ok_or_else(|| TransitionError::unknown_field(field_id))?;
        if !record.is_custom() {
            return Err(TransitionError::NotCustomField {
                field_id: field_id.clone(),
            });
        }

        let new_id = field_id.with_field_name(&definition.name);
        if new_id == *field_id {
            if let Some(record) = map.get_mut(field_id) {
                record.kind = RecordKind::Custom { definition };
            }
            return Ok(());
        }

        // Renamed: the key changes, so splice out and re-insert in place.
        if map.iter().any(|r| r.field_id.field_name() == definition.name) {
            return Err(TransitionError::DuplicateField { field_id: new_id });
        }
        tracing::info!(old = %field_id, new = %new_id, "re-keying custom field");
        let Some(old) = map.remove(field_id) else {
            return Err(TransitionError::unknown_field(field_id));
        };
        if let Some(previous) = old.preceding.field() {
            if let Some(record) = map.get_mut(previous) {
                record.foregoing = Pointer::Field(new_id.clone());
            }
        }
        if let Some(next) = old.foregoing.field() {
            if let Some(record) = map.get_mut(next) {
                record.preceding = Pointer::Field(new_id.clone());
            }
        }
        map.insert(FieldRecord {
            field_id: new_id,
            preceding: old.preceding,
            foregoing: old.foregoing,
            status: old.status,
            required: old.required,
            kind: RecordKind::Custom { definition },
        });
        Ok(())
    }

    /// Splice a custom field out of its chain
    fn remove_custom_field(&mut self, field_id: &FieldId) -> Result<(), TransitionError> {
        let map = self.section_mut(field_id.section_id())?;
        let record = map
            .get(field_id)
            .ok_or_else(|| TransitionError::unknown_field(field_id))?;
        if !record.is_custom() {
            return Err(TransitionError::NotCustomField {
                field_id: field_id.clone(),
            });
        }
        tracing::info!(field_id = %field_id, "removing custom field");
        let Some(removed) = map.remove(field_id) else {
            return Err(TransitionError::unknown_field(field_id));
        };
        if let Some(previous) = removed.preceding.field() {
            if let Some(record) = map.get_mut(previous) {
                record.foregoing = removed.foregoing.clone();
            }
        }
        if let Some(next) = removed.foregoing.field() {
            if let Some(record) = map.get_mut(next) {
                record.preceding = removed.preceding.clone();
            }
        }
        Ok(())
    }

    /// Move a field one position, resolving neighbors by pointer
    fn shift(&mut self, field_id: &FieldId, up: bool) -> Result<(), TransitionError> {
        let section_id = field_id.section_id().to_string();
        let map = self.section_mut(&section_id)?;
        if !map.contains(field_id) {
            return Err(TransitionError::unknown_field(field_id));
        }
        let (previous, next) = map.neighbors(field_id);
        let shifted = if up {
            map.shift_up(field_id, previous.as_ref(), next.as_ref())
        } else {
            map.shift_down(field_id, previous.as_ref(), next.as_ref())
        };
        let shifted = shifted.into_owned();
        self.sections.insert_section(section_id, shifted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitalform_schema::{FieldType, Group, Section};

    fn schema() -> FormSchema {
        FormSchema {
            sections: vec![Section {
                id: "child".to_string(),
                groups: vec![Group {
                    id: "child-view-group".to_string(),
                    fields: vec![
                        FieldDefinition::new("firstName", FieldType::Text, "First name"),
                        FieldDefinition::new("familyName", FieldType::Text, "Family name"),
                    ],
                }],
            }],
        }
    }

    fn id(name: &str) -> FieldId {
        FieldId::new(Event::Birth, "child", "child-view-group", name)
    }

    fn state() -> ConfigState {
        ConfigState::load(Event::Birth, schema(), &[])
    }

    #[test]
    fn add_custom_field_lands_at_the_bottom() {
        let state = state()
            .apply(Command::AddCustomField {
                section_id: "child".to_string(),
                definition: FieldDefinition::new("motherTongue", FieldType::Text, "Mother tongue"),
            })
            .unwrap();
        let ordered = state
            .field_map()
            .section("child")
            .unwrap()
            .ordered_ids()
            .unwrap();
        assert_eq!(ordered.last().unwrap().field_name(), "motherTongue");
    }

    #[test]
    fn duplicate_custom_field_is_rejected() {
        let err = state()
            .apply(Command::AddCustomField {
                section_id: "child".to_string(),
                definition: FieldDefinition::new("firstName", FieldType::Text, "First name"),
            })
            .unwrap_err();
        assert!(matches!(err, TransitionError::DuplicateField { .. }));
    }

    #[test]
    fn remove_custom_field_splices_the_chain() {
        let custom = FieldDefinition::new("motherTongue", FieldType::Text, "Mother tongue");
        let state = state()
            .apply(Command::AddCustomField {
                section_id: "child".to_string(),
                definition: custom,
            })
            .unwrap();
        let custom_id = id("motherTongue");
        let state = state
            .apply(Command::RemoveCustomField {
                field_id: custom_id.clone(),
            })
            .unwrap();
        assert!(state.field_map().record(&custom_id).is_none());
        let tail = state
            .field_map()
            .section("child")
            .unwrap()
            .ordered_ids()
            .unwrap();
        assert_eq!(tail.last().unwrap().field_name(), "familyName");
    }

    #[test]
    fn default_field_cannot_be_removed() {
        let err = state()
            .apply(Command::RemoveCustomField {
                field_id: id("firstName"),
            })
            .unwrap_err();
        assert!(matches!(err, TransitionError::NotCustomField { .. }));
    }

    #[test]
    fn rename_rekeys_and_repoints_neighbors() {
        let state = state()
            .apply(Command::AddCustomField {
                section_id: "child".to_string(),
                definition: FieldDefinition::new("motherTongue", FieldType::Text, "Mother tongue"),
            })
            .unwrap();
        let state = state
            .apply(Command::ModifyCustomField {
                field_id: id("motherTongue"),
                definition: FieldDefinition::new("homeLanguage", FieldType::Text, "Home language"),
            })
            .unwrap();
        assert!(state.field_map().record(&id("motherTongue")).is_none());
        let renamed = state.field_map().record(&id("homeLanguage")).unwrap();
        assert_eq!(renamed.preceding, Pointer::Field(id("familyName")));
        let previous = state.field_map().record(&id("familyName")).unwrap();
        assert_eq!(previous.foregoing, Pointer::Field(id("homeLanguage")));
    }

    #[test]
    fn shift_commands_reorder_the_chain() {
        let state = state()
            .apply(Command::ShiftUp {
                field_id: id("familyName"),
            })
            .unwrap();
        let ordered = state
            .field_map()
            .section("child")
            .unwrap()
            .ordered_ids()
            .unwrap();
        let names: Vec<&str> = ordered.iter().map(FieldId::field_name).collect();
        assert_eq!(names, ["familyName", "firstName"]);
    }

    #[test]
    fn boundary_shift_is_a_noop_not_an_error() {
        let before = state();
        let after = before
            .apply(Command::ShiftUp {
                field_id: id("firstName"),
            })
            .unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn unknown_field_shift_is_an_error() {
        let err = state()
            .apply(Command::ShiftUp {
                field_id: id("noSuchField"),
            })
            .unwrap_err();
        assert!(matches!(err, TransitionError::UnknownField { .. }));
    }

    #[test]
    fn set_required_emits_an_override() {
        let state = state()
            .apply(Command::SetRequired {
                field_id: id("familyName"),
                required: true,
            })
            .unwrap();
        let overrides = state.overrides().unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].required, Some(true));
    }

    #[test]
    fn disabled_field_disappears_from_configured_form() {
        let state = state()
            .apply(Command::SetFieldStatus {
                field_id: id("familyName"),
                status: vitalform_order::FieldStatus::Disabled,
            })
            .unwrap();
        let form = state.configured_form().unwrap();
        let names: Vec<&str> = form.sections[0].groups[0]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["firstName"]);
    }
}
