//! List mutators
//!
//! Pure splices that move one record up or down its section's chain. The
//! input map is never mutated; a patched copy is returned, or the borrowed
//! input when the move is a no-op.
//!
//! Callers supply the current record's neighbors explicitly (typically from
//! [`SectionFieldMap::neighbors`]). Neighbor identity is trusted, not
//! re-derived: passing a non-adjacent record produces a chain the caller has
//! to answer for, which [`SectionFieldMap::verify`] will flag.

use crate::map::SectionFieldMap;
use crate::pointer::Pointer;
use std::borrow::Cow;
use vitalform_schema::FieldId;

impl SectionFieldMap {
    /// Move a record one position toward `TOP`
    ///
    /// No-op when `current` is unknown or already at the head; the borrowed
    /// input is returned unchanged. With neighbors `X, previous, current,
    /// next`, the result chains `X, current, previous, next`:
    ///
    /// 1. `X`'s `foregoing` is repointed at `current` (when `X` is a field)
    /// 2. `current` takes `previous`'s old `preceding` and points its
    ///    `foregoing` at `previous`
    /// 3. `previous` takes `current` as `preceding` and inherits `current`'s
    ///    old `foregoing`
    /// 4. `next`'s `preceding` is repointed at `current`'s old `preceding`
    #[must_use]
    pub fn shift_up(
        &self,
        current: &FieldId,
        previous: Option<&FieldId>,
        next: Option<&FieldId>,
    ) -> Cow<'_, Self> {
        let Some(current_record) = self.get(current) else {
            return Cow::Borrowed(self);
        };
        if current_record.preceding.is_top() {
            return Cow::Borrowed(self);
        }
        let old_preceding = current_record.preceding.clone();
        let old_foregoing = current_record.foregoing.clone();

        let mut shifted = self.clone();
        if let Some(previous_record) = previous.and_then(|id| self.get(id)) {
            let previous_id = previous_record.field_id.clone();
            let previous_preceding = previous_record.preceding.clone();
            if let Pointer::Field(two_back) = &previous_preceding {
                if let Some(record) = shifted.get_mut(two_back) {
                    record.foregoing = Pointer::Field(current.clone());
                }
            }
            if let Some(record) = shifted.get_mut(current) {
                record.preceding = previous_preceding;
                record.foregoing = Pointer::Field(previous_id.clone());
            }
            if let Some(record) = shifted.get_mut(&previous_id) {
                record.preceding = Pointer::Field(current.clone());
                record.foregoing = old_foregoing;
            }
        }
        if let Some(record) = next.and_then(|id| shifted.get_mut(id)) {
            record.preceding = old_preceding;
        }
        Cow::Owned(shifted)
    }

    /// Move a record one position toward `BOTTOM`
    ///
    /// Mirror image of [`Self::shift_up`]: no-op when `current` is unknown or
    /// already at the tail, with the roles of `preceding`/`foregoing` and the
    /// two sentinels swapped.
    #[must_use]
    pub fn shift_down(
        &self,
        current: &FieldId,
        previous: Option<&FieldId>,
        next: Option<&FieldId>,
    ) -> Cow<'_, Self> {
        let Some(current_record) = self.get(current) else {
            return Cow::Borrowed(self);
        };
        if current_record.foregoing.is_bottom() {
            return Cow::Borrowed(self);
        }
        let old_preceding = current_record.preceding.clone();
        let old_foregoing = current_record.foregoing.clone();

        let mut shifted = self.clone();
        if let Some(next_record) = next.and_then(|id| self.get(id)) {
            let next_id = next_record.field_id.clone();
            let next_foregoing = next_record.foregoing.clone();
            if let Pointer::Field(two_ahead) = &next_foregoing {
                if let Some(record) = shifted.get_mut(two_ahead) {
                    record.preceding = Pointer::Field(current.clone());
                }
            }
            if let Some(record) = shifted.get_mut(current) {
                record.foregoing = next_foregoing;
                record.preceding = Pointer::Field(next_id.clone());
            }
            if let Some(record) = shifted.get_mut(&next_id) {
                record.foregoing = Pointer::Field(current.clone());
                record.preceding = old_preceding;
            }
        }
        if let Some(record) = previous.and_then(|id| shifted.get_mut(id)) {
            record.foregoing = old_foregoing;
        }
        Cow::Owned(shifted)
    }
}
