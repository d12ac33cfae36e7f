//! Vitalform Field Ordering
//!
//! String-keyed doubly-linked ordering of configured form fields.
//!
//! Every field record carries the IDs of its neighbors rather than
//! references; the records live in a flat map keyed by field ID. This is the
//! arena-and-index shape of a linked list: safe, serializable, and cheap to
//! copy-and-patch.
//!
//! # Core Concepts
//!
//! - [`Pointer`]: Neighbor link — another field ID or the `TOP`/`BOTTOM` sentinel
//! - [`FieldRecord`]: One field's configuration state, with a [`RecordKind`]
//!   tag separating default-field overrides from custom fields
//! - [`SectionFieldMap`]: One section's records; exactly one linked list
//! - [`FieldMap`]: All sections of one event, built from a [`FormSchema`]
//!
//! # Example
//!
//! ```rust,ignore
//! use vitalform_order::FieldMap;
//!
//! let map = FieldMap::from_schema(Event::Birth, &schema);
//! let section = map.section("child").unwrap();
//!
//! // Pure splice: the input map is untouched
//! let moved = section.shift_up(&field, prev.as_ref(), next.as_ref());
//! moved.verify()?;
//! ```
//!
//! [`FormSchema`]: vitalform_schema::FormSchema

#![warn(unreachable_pub)]

mod map;
mod motion;
mod pointer;
mod record;

pub use map::{FieldMap, ListError, SectionFieldMap};
pub use pointer::Pointer;
pub use record::{FieldRecord, FieldStatus, RecordKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
