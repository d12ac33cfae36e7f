//! Layout materialization
//!
//! The shared core of the merger: applies the stored overrides to the
//! default schema and produces a per-group layout of materialized fields,
//! disabled ones included. [`merge_configuration`] flattens this into a
//! renderable form; [`configured_field_map`] chains it into an editable map.
//!
//! [`merge_configuration`]: crate::merge_configuration
//! [`configured_field_map`]: crate::configured_field_map

use crate::overrides::OverrideRecord;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use vitalform_order::{Pointer, RecordKind};
use vitalform_schema::{Event, FieldDefinition, FieldId, FormSchema};

/// One field as it will appear in the configured form
#[derive(Debug, Clone)]
pub(crate) struct MaterializedField {
    /// Key of the field
    pub(crate) field_id: FieldId,
    /// Resolved definition with the requiredness override applied
    pub(crate) definition: FieldDefinition,
    /// Soft-delete flag; disabled fields are dropped from the rendered form
    pub(crate) disabled: bool,
    /// Raw requiredness override, kept for the editable map
    pub(crate) required: Option<bool>,
    /// Default-schema handle or custom definition
    pub(crate) kind: RecordKind,
}

/// One group's ordered fields after the merge
#[derive(Debug, Clone)]
pub(crate) struct GroupLayout {
    pub(crate) id: String,
    pub(crate) fields: Vec<MaterializedField>,
}

/// One section's groups after the merge
#[derive(Debug, Clone)]
pub(crate) struct SectionLayout {
    pub(crate) id: String,
    pub(crate) groups: Vec<GroupLayout>,
}

/// Apply overrides to the default schema
///
/// 1. Default-field overrides are deleted from their factory positions,
///    group by group from merged index sets so earlier deletions never shift
///    later indices.
/// 2. Overrides are chained into maximal runs anchored at a field that is
///    not itself an override (or at `TOP`).
/// 3. Each run is spliced in after its anchor (or at the front of the
///    section's first group for `TOP` anchors).
///
/// Runs whose anchor cannot be found — an anchor deleted by another
/// override, or a chain that loops — are skipped with a warning; the source
/// data has no defined meaning for them.
pub(crate) fn materialize(
    schema: &FormSchema,
    overrides: &[OverrideRecord],
    event: Event,
) -> Vec<SectionLayout> {
    let overrides: Vec<&OverrideRecord> = overrides
        .iter()
        .filter(|o| o.field_id.event() == event)
        .collect();

    // Step 1: merged per-group deletion sets for default-field overrides.
    let mut removals: BTreeMap<(usize, usize), BTreeSet<usize>> = BTreeMap::new();
    for record in &overrides {
        if let RecordKind::Default { identifiers } = &record.kind {
            removals
                .entry((identifiers.section_index, identifiers.group_index))
                .or_default()
                .insert(identifiers.field_index);
        }
    }

    // Base layout: the default schema minus every overridden field.
    let mut layout: Vec<SectionLayout> = schema
        .sections
        .iter()
        .enumerate()
        .map(|(section_index, section)| SectionLayout {
            id: section.id.clone(),
            groups: section
                .groups
                .iter()
                .enumerate()
                .map(|(group_index, group)| {
                    let removed = removals.get(&(section_index, group_index));
                    GroupLayout {
                        id: group.id.clone(),
                        fields: group
                            .fields
                            .iter()
                            .enumerate()
                            .filter(|(field_index, _)| {
                                removed.map_or(true, |set| !set.contains(field_index))
                            })
                            .map(|(field_index, field)| MaterializedField {
                                field_id: FieldId::new(event, &section.id, &group.id, &field.name),
                                definition: field.clone(),
                                disabled: false,
                                required: None,
                                kind: RecordKind::Default {
                                    identifiers: vitalform_schema::FieldIdentifiers::new(
                                        section_index,
                                        group_index,
                                        field_index,
                                    ),
                                },
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();

    // Steps 2–3: chain overrides into runs and splice them in.
    for run in reconstruct_runs(&overrides) {
        splice_run(&mut layout, schema, &run);
    }

    layout
}

/// A maximal chain of overrides sharing one anchor
struct Run<'a> {
    anchor: &'a Pointer,
    records: Vec<&'a OverrideRecord>,
}

/// Partition overrides into anchor-rooted runs
///
/// A run starts at an override whose `preceding` is not itself an override,
/// and extends while some override's `preceding` names the previous link.
/// Each override joins at most one run, so cyclic chains terminate; whatever
/// a cycle leaves unreachable is reported and dropped.
fn reconstruct_runs<'a>(overrides: &[&'a OverrideRecord]) -> Vec<Run<'a>> {
    let ids: HashSet<&FieldId> = overrides.iter().map(|o| &o.field_id).collect();
    let mut successor: HashMap<&FieldId, &'a OverrideRecord> = HashMap::new();
    for record in overrides {
        if let Pointer::Field(preceding_id) = &record.preceding {
            if ids.contains(preceding_id) {
                successor.entry(preceding_id).or_insert(record);
            }
        }
    }

    let mut consumed: BTreeSet<&FieldId> = BTreeSet::new();
    let mut runs = Vec::new();
    for record in overrides {
        let anchored = match &record.preceding {
            Pointer::Top => true,
            Pointer::Field(id) => !ids.contains(id),
            Pointer::Bottom => false,
        };
        if !anchored || consumed.contains(&record.field_id) {
            continue;
        }
        let mut run = Run {
            anchor: &record.preceding,
            records: Vec::new(),
        };
        let mut link = Some(*record);
        while let Some(current) = link {
            if !consumed.insert(&current.field_id) {
                break;
            }
            run.records.push(current);
            link = successor.get(&current.field_id).copied();
        }
        runs.push(run);
    }

    for record in overrides {
        if !consumed.contains(&record.field_id) {
            tracing::warn!(
                field_id = %record.field_id,
                "override unreachable from any anchor, dropping"
            );
        }
    }
    runs
}

/// Splice one run's materialized fields in after its anchor
fn splice_run(layout: &mut [SectionLayout], schema: &FormSchema, run: &Run<'_>) {
    let Some(first) = run.records.first() else {
        return;
    };
    let section_id = first.field_id.section_id();
    let Some(section) = layout.iter_mut().find(|s| s.id == section_id) else {
        tracing::warn!(section = section_id, "override section not in schema, dropping run");
        return;
    };

    let position = match run.anchor {
        Pointer::Top => section.groups.first().map(|_| (0, 0)),
        Pointer::Field(anchor_id) => section.groups.iter().enumerate().find_map(|(gi, group)| {
            group
                .fields
                .iter()
                .position(|f| f.field_id == *anchor_id)
                .map(|fi| (gi, fi + 1))
        }),
        Pointer::Bottom => None,
    };
    let Some((group_index, field_index)) = position else {
        tracing::warn!(anchor = %run.anchor, "run anchor not found in configured form, dropping run");
        return;
    };

    let fields = &mut section.groups[group_index].fields;
    let mut at = field_index;
    for record in &run.records {
        let Some(materialized) = materialize_record(schema, record) else {
            continue;
        };
        fields.insert(at, materialized);
        at += 1;
    }
}

/// Resolve one override to its renderable field
fn materialize_record(schema: &FormSchema, record: &OverrideRecord) -> Option<MaterializedField> {
    let mut definition = match &record.kind {
        RecordKind::Default { identifiers } => match schema.definition(*identifiers) {
            Some(definition) => definition.clone(),
            None => {
                tracing::warn!(
                    field_id = %record.field_id,
                    "override identifiers point outside the schema, dropping field"
                );
                return None;
            }
        },
        RecordKind::Custom { definition } => definition.clone(),
    };
    if let Some(required) = record.required {
        definition.required = required;
    }
    Some(MaterializedField {
        field_id: record.field_id.clone(),
        definition,
        disabled: record.status.is_disabled(),
        required: record.required,
        kind: record.kind.clone(),
    })
}
