//! Configured-form derivation
//!
//! The two consumers of the materialized layout: the renderable form
//! (disabled fields dropped) and the editable field map (disabled fields
//! kept, pointers chained).

use crate::layout::materialize;
use crate::overrides::OverrideRecord;
use vitalform_order::{FieldMap, FieldRecord, FieldStatus, Pointer, SectionFieldMap};
use vitalform_schema::{Event, FormSchema, Group, Section};

/// Overlay overrides onto the default schema, producing the renderable form
///
/// Same shape as the default schema, suitable for the form renderer.
/// Disabled fields are filtered out last, after every run has been spliced
/// in, so a disabled field still holds its place for anchoring purposes
/// until then.
#[must_use]
pub fn merge_configuration(
    schema: &FormSchema,
    overrides: &[OverrideRecord],
    event: Event,
) -> FormSchema {
    let layout = materialize(schema, overrides, event);
    FormSchema {
        sections: layout
            .into_iter()
            .map(|section| Section {
                id: section.id,
                groups: section
                    .groups
                    .into_iter()
                    .map(|group| Group {
                        id: group.id,
                        fields: group
                            .fields
                            .into_iter()
                            .filter(|field| !field.disabled)
                            .map(|field| field.definition)
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Overlay overrides onto the default schema, producing the editable map
///
/// Unlike [`merge_configuration`] this keeps disabled records, since the
/// administrator edits them; the renderer-facing filter happens only on the
/// merged form. Records of one section are chained across group boundaries,
/// exactly like the registry built from a pristine schema.
#[must_use]
pub fn configured_field_map(
    schema: &FormSchema,
    overrides: &[OverrideRecord],
    event: Event,
) -> FieldMap {
    let layout = materialize(schema, overrides, event);
    let mut map = FieldMap::new();
    for section in layout {
        let mut section_map = SectionFieldMap::new();
        let ordered: Vec<_> = section
            .groups
            .into_iter()
            .flat_map(|group| group.fields)
            .collect();
        let last = ordered.len().checked_sub(1);
        for (index, field) in ordered.iter().enumerate() {
            let preceding = match index.checked_sub(1) {
                Some(i) => Pointer::Field(ordered[i].field_id.clone()),
                None => Pointer::Top,
            };
            let foregoing = if last == Some(index) {
                Pointer::Bottom
            } else {
                Pointer::Field(ordered[index + 1].field_id.clone())
            };
            section_map.insert(FieldRecord {
                field_id: field.field_id.clone(),
                preceding,
                foregoing,
                status: if field.disabled {
                    FieldStatus::Disabled
                } else {
                    FieldStatus::Enabled
                },
                required: field.required,
                kind: field.kind.clone(),
            });
        }
        map.insert_section(section.id, section_map);
    }
    map
}
