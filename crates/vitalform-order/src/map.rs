//! Field maps
//!
//! [`SectionFieldMap`] holds one section's records as a flat map keyed by
//! field ID; the logical order is the pointer chain, not the map order.
//! [`FieldMap`] groups the section maps of one event and knows how to build
//! them from a default schema.

use crate::pointer::Pointer;
use crate::record::{FieldRecord, RecordKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use vitalform_schema::{Event, FieldId, FieldIdentifiers, FormSchema};

/// Records of one (event, section), exactly one doubly-linked list
///
/// Map insertion order is schema order and is kept only for stable
/// serialization; ordering semantics come from the pointers alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionFieldMap {
    records: IndexMap<FieldId, FieldRecord>,
}

impl SectionFieldMap {
    /// Empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }

    /// Look up a record
    #[inline]
    #[must_use]
    pub fn get(&self, field_id: &FieldId) -> Option<&FieldRecord> {
        self.records.get(field_id)
    }

    /// Mutable record lookup
    ///
    /// Pointer edits through this are unchecked; callers re-establish the
    /// list shape and can confirm it with [`Self::verify`].
    #[inline]
    pub fn get_mut(&mut self, field_id: &FieldId) -> Option<&mut FieldRecord> {
        self.records.get_mut(field_id)
    }

    /// Insert a record keyed by its own field ID
    ///
    /// Returns the previous record under the same key, if any.
    pub fn insert(&mut self, record: FieldRecord) -> Option<FieldRecord> {
        self.records.insert(record.field_id.clone(), record)
    }

    /// Remove a record without touching its neighbors' pointers
    ///
    /// Callers splicing a record out of the chain must rewire the neighbors
    /// themselves; [`crate::SectionFieldMap::verify`] catches forgotten ends.
    pub fn remove(&mut self, field_id: &FieldId) -> Option<FieldRecord> {
        self.records.shift_remove(field_id)
    }

    /// Number of records, including disabled ones
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the map holds no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record exists for the ID
    #[inline]
    #[must_use]
    pub fn contains(&self, field_id: &FieldId) -> bool {
        self.records.contains_key(field_id)
    }

    /// Iterate records in map (schema/insertion) order
    pub fn iter(&self) -> impl Iterator<Item = &FieldRecord> {
        self.records.values()
    }

    /// The record whose `preceding` is [`Pointer::Top`], if exactly one exists
    #[must_use]
    pub fn head(&self) -> Option<&FieldRecord> {
        let mut heads = self.records.values().filter(|r| r.preceding.is_top());
        match (heads.next(), heads.next()) {
            (Some(head), None) => Some(head),
            _ => None,
        }
    }

    /// Immediate neighbors of a record, by pointer
    ///
    /// Returns `(preceding, foregoing)` as field IDs, each `None` at the
    /// respective sentinel or when the record is unknown.
    #[must_use]
    pub fn neighbors(&self, field_id: &FieldId) -> (Option<FieldId>, Option<FieldId>) {
        match self.records.get(field_id) {
            Some(record) => (
                record.preceding.field().cloned(),
                record.foregoing.field().cloned(),
            ),
            None => (None, None),
        }
    }

    /// Walk the chain from `TOP` to `BOTTOM`
    ///
    /// # Errors
    /// Returns [`ListError`] if the map has no unique head, a pointer leads
    /// to a missing record, the walk revisits a record, or the walk reaches
    /// `BOTTOM` before visiting every record.
    pub fn traverse(&self) -> Result<Vec<&FieldRecord>, ListError> {
        if self.records.is_empty() {
            return Ok(Vec::new());
        }
        let head_count = self
            .records
            .values()
            .filter(|r| r.preceding.is_top())
            .count();
        if head_count != 1 {
            return Err(ListError::NoHead { found: head_count });
        }

        let mut visited: HashSet<&FieldId> = HashSet::with_capacity(self.records.len());
        let mut order = Vec::with_capacity(self.records.len());
        let mut current = self
            .records
            .values()
            .find(|r| r.preceding.is_top())
            .ok_or(ListError::NoHead { found: 0 })?;
        loop {
            if !visited.insert(&current.field_id) {
                return Err(ListError::Cycle {
                    at: current.field_id.to_string(),
                });
            }
            order.push(current);
            match &current.foregoing {
                Pointer::Bottom => break,
                Pointer::Field(next_id) => {
                    current = self.records.get(next_id).ok_or_else(|| {
                        ListError::DanglingPointer {
                            from: current.field_id.to_string(),
                            to: next_id.to_string(),
                        }
                    })?;
                }
                Pointer::Top => {
                    return Err(ListError::DanglingPointer {
                        from: current.field_id.to_string(),
                        to: Pointer::Top.to_string(),
                    })
                }
            }
        }
        if order.len() != self.records.len() {
            return Err(ListError::Unvisited {
                visited: order.len(),
                total: self.records.len(),
            });
        }
        Ok(order)
    }

    /// Field IDs in chain order
    ///
    /// # Errors
    /// Same failure modes as [`Self::traverse`].
    pub fn ordered_ids(&self) -> Result<Vec<FieldId>, ListError> {
        Ok(self
            .traverse()?
            .into_iter()
            .map(|r| r.field_id.clone())
            .collect())
    }

    /// Check the list shape: one head, one tail, full traversal
    ///
    /// # Errors
    /// Returns the first [`ListError`] the chain exhibits.
    pub fn verify(&self) -> Result<(), ListError> {
        if self.records.is_empty() {
            return Ok(());
        }
        let tail_count = self
            .records
            .values()
            .filter(|r| r.foregoing.is_bottom())
            .count();
        if tail_count != 1 {
            return Err(ListError::NoTail { found: tail_count });
        }
        self.traverse().map(|_| ())
    }
}

impl<'a> IntoIterator for &'a SectionFieldMap {
    type Item = (&'a FieldId, &'a FieldRecord);
    type IntoIter = indexmap::map::Iter<'a, FieldId, FieldRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// All section maps of one event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    sections: IndexMap<String, SectionFieldMap>,
}

impl FieldMap {
    /// Empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: IndexMap::new(),
        }
    }

    /// Build the registry for a default schema
    ///
    /// Walks sections → groups → fields in schema order. Consecutive fields
    /// of one section are linked across group boundaries; the first record of
    /// a section gets `preceding = TOP` and every record starts with
    /// `foregoing = BOTTOM`, which stands until the next field of the section
    /// back-fills it.
    #[must_use]
    pub fn from_schema(event: Event, schema: &FormSchema) -> Self {
        let mut sections = IndexMap::with_capacity(schema.sections.len());
        for (section_index, section) in schema.sections.iter().enumerate() {
            let mut map = SectionFieldMap::new();
            let mut previous: Option<FieldId> = None;
            for (group_index, group) in section.groups.iter().enumerate() {
                for (field_index, field) in group.fields.iter().enumerate() {
                    let field_id = FieldId::new(event, &section.id, &group.id, &field.name);
                    let preceding = match previous.take() {
                        Some(prev_id) => {
                            if let Some(prev) = map.get_mut(&prev_id) {
                                prev.foregoing = Pointer::Field(field_id.clone());
                            }
                            Pointer::Field(prev_id)
                        }
                        None => Pointer::Top,
                    };
                    map.insert(FieldRecord::default_field(
                        field_id.clone(),
                        preceding,
                        Pointer::Bottom,
                        FieldIdentifiers::new(section_index, group_index, field_index),
                    ));
                    previous = Some(field_id);
                }
            }
            sections.insert(section.id.clone(), map);
        }
        Self { sections }
    }

    /// Look up one section's map
    #[inline]
    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&SectionFieldMap> {
        self.sections.get(section_id)
    }

    /// Mutable section lookup
    #[inline]
    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut SectionFieldMap> {
        self.sections.get_mut(section_id)
    }

    /// Insert or replace one section's map
    pub fn insert_section(&mut self, section_id: impl Into<String>, map: SectionFieldMap) {
        self.sections.insert(section_id.into(), map);
    }

    /// Iterate `(section_id, map)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionFieldMap)> {
        self.sections.iter().map(|(id, map)| (id.as_str(), map))
    }

    /// Number of sections
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Verify every section's list shape
    ///
    /// # Errors
    /// Returns the first [`ListError`] any section exhibits.
    pub fn verify(&self) -> Result<(), ListError> {
        for map in self.sections.values() {
            map.verify()?;
        }
        Ok(())
    }

    /// Find the record for an ID in its section
    #[must_use]
    pub fn record(&self, field_id: &FieldId) -> Option<&FieldRecord> {
        self.sections.get(field_id.section_id())?.get(field_id)
    }

    /// Positional address of a default record, if the ID names one
    #[must_use]
    pub fn identifiers(&self, field_id: &FieldId) -> Option<FieldIdentifiers> {
        match &self.record(field_id)?.kind {
            RecordKind::Default { identifiers } => Some(*identifiers),
            RecordKind::Custom { .. } => None,
        }
    }
}

/// Broken list shapes detected by traversal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// Not exactly one record with `preceding = TOP`
    #[error("expected exactly one head record, found {found}")]
    NoHead {
        /// Number of head records found
        found: usize,
    },

    /// Not exactly one record with `foregoing = BOTTOM`
    #[error("expected exactly one tail record, found {found}")]
    NoTail {
        /// Number of tail records found
        found: usize,
    },

    /// A pointer names a record that is not in the map
    #[error("pointer from '{from}' leads to missing record '{to}'")]
    DanglingPointer {
        /// Record holding the broken pointer
        from: String,
        /// The missing target
        to: String,
    },

    /// Traversal revisited a record
    #[error("cycle detected at '{at}'")]
    Cycle {
        /// First record seen twice
        at: String,
    },

    /// Traversal reached `BOTTOM` before visiting every record
    #[error("traversal visited {visited} of {total} records")]
    Unvisited {
        /// Records reached from the head
        visited: usize,
        /// Records in the map
        total: usize,
    },
}
