//! Override extraction
//!
//! The inverse of materialization: walk an editable field map and produce
//! the flat override list worth persisting. Custom fields are always stored;
//! default fields only when the administrator actually changed something —
//! moved them, disabled them, or overrode their requiredness.

use crate::overrides::OverrideRecord;
use vitalform_order::{FieldMap, ListError, RecordKind};
use vitalform_schema::{Event, FormSchema};

/// Produce the persistable delta list for an edited field map
///
/// A default record counts as moved when its `preceding` link differs from
/// the pristine registry built off the schema; records that drift out of the
/// registry entirely (an identifiers mismatch) are stored too rather than
/// silently dropped.
///
/// # Errors
/// Returns [`ListError`] if any section of the map is not a well-formed
/// chain; deltas extracted from a broken chain would not merge back.
pub fn extract_overrides(
    map: &FieldMap,
    schema: &FormSchema,
    event: Event,
) -> Result<Vec<OverrideRecord>, ListError> {
    let pristine = FieldMap::from_schema(event, schema);
    let mut deltas = Vec::new();
    for (_, section) in map.iter() {
        for record in section.traverse()? {
            let store = match &record.kind {
                RecordKind::Custom { .. } => true,
                RecordKind::Default { .. } => {
                    let moved = pristine
                        .record(&record.field_id)
                        .map_or(true, |pristine_record| {
                            pristine_record.preceding != record.preceding
                        });
                    moved || record.required.is_some() || record.status.is_disabled()
                }
            };
            if store {
                deltas.push(OverrideRecord {
                    field_id: record.field_id.clone(),
                    preceding: record.preceding.clone(),
                    status: record.status,
                    required: record.required,
                    kind: record.kind.clone(),
                });
            }
        }
    }
    Ok(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::configured_field_map;
    use vitalform_order::{FieldStatus, Pointer};
    use vitalform_schema::{
        FieldDefinition, FieldId, FieldIdentifiers, FieldType, Group, Section,
    };

    fn schema() -> FormSchema {
        FormSchema {
            sections: vec![Section {
                id: "child".to_string(),
                groups: vec![Group {
                    id: "child-view-group".to_string(),
                    fields: vec![
                        FieldDefinition::new("firstName", FieldType::Text, "First name"),
                        FieldDefinition::new("familyName", FieldType::Text, "Family name"),
                        FieldDefinition::new("birthDate", FieldType::Date, "Date of birth"),
                    ],
                }],
            }],
        }
    }

    fn id(name: &str) -> FieldId {
        FieldId::new(Event::Birth, "child", "child-view-group", name)
    }

    #[test]
    fn pristine_map_extracts_no_deltas() {
        let schema = schema();
        let map = configured_field_map(&schema, &[], Event::Birth);
        assert!(extract_overrides(&map, &schema, Event::Birth)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn custom_field_is_always_stored() {
        let schema = schema();
        let overrides = vec![OverrideRecord {
            field_id: id("motherTongue"),
            preceding: Pointer::Field(id("birthDate")),
            status: FieldStatus::Enabled,
            required: None,
            kind: RecordKind::Custom {
                definition: FieldDefinition::new("motherTongue", FieldType::Text, "Mother tongue"),
            },
        }];
        let map = configured_field_map(&schema, &overrides, Event::Birth);
        let deltas = extract_overrides(&map, &schema, Event::Birth).unwrap();
        assert_eq!(deltas, overrides);
    }

    #[test]
    fn moved_default_field_round_trips() {
        let schema = schema();
        let overrides = vec![
            OverrideRecord {
                field_id: id("birthDate"),
                preceding: Pointer::Top,
                status: FieldStatus::Enabled,
                required: None,
                kind: RecordKind::Default {
                    identifiers: FieldIdentifiers::new(0, 0, 2),
                },
            },
            // firstName now follows birthDate instead of TOP.
            OverrideRecord {
                field_id: id("firstName"),
                preceding: Pointer::Field(id("birthDate")),
                status: FieldStatus::Enabled,
                required: None,
                kind: RecordKind::Default {
                    identifiers: FieldIdentifiers::new(0, 0, 0),
                },
            },
        ];
        let map = configured_field_map(&schema, &overrides, Event::Birth);
        map.verify().unwrap();
        let deltas = extract_overrides(&map, &schema, Event::Birth).unwrap();
        // Both records sit away from their pristine positions, so both persist.
        assert_eq!(deltas, overrides);

        // And the extracted deltas rebuild the same map.
        let rebuilt = configured_field_map(&schema, &deltas, Event::Birth);
        assert_eq!(rebuilt, map);
    }

    #[test]
    fn requiredness_only_change_is_stored() {
        let schema = schema();
        let mut map = configured_field_map(&schema, &[], Event::Birth);
        let section = map.section_mut("child").unwrap();
        let mut record = section.get(&id("familyName")).cloned().unwrap();
        record.required = Some(true);
        section.insert(record);
        let deltas = extract_overrides(&map, &schema, Event::Birth).unwrap();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].field_id, id("familyName"));
        assert_eq!(deltas[0].required, Some(true));
        // Unmoved, so the preceding link is the factory one.
        assert_eq!(deltas[0].preceding, Pointer::Field(id("firstName")));
    }

    #[test]
    fn broken_chain_is_an_error() {
        let schema = schema();
        let mut map = configured_field_map(&schema, &[], Event::Birth);
        if let Some(section) = map.section_mut("child") {
            if let Some(mut record) = section.get(&id("familyName")).cloned() {
                record.preceding = Pointer::Top; // second head
                section.insert(record);
            }
        }
        assert!(extract_overrides(&map, &schema, Event::Birth).is_err());
    }
}
