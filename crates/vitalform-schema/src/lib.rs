//! Vitalform Schema Model
//!
//! Typed model of a civil-registration form and the field ID codec.
//!
//! # Core Concepts
//!
//! - [`Event`]: The vital event a form declares (birth, death, marriage)
//! - [`FieldId`]: Dotted `event.section.group.field` key addressing one field
//! - [`FormSchema`]: The factory-default form (sections → groups → fields)
//! - [`FieldDefinition`]: One renderer field with its label and constraints
//! - [`FieldIdentifiers`]: Positional address of a default field in the schema
//!
//! # Example
//!
//! ```rust
//! use vitalform_schema::{Event, FieldId};
//!
//! let id = FieldId::new(Event::Birth, "child", "child-view-group", "firstName");
//! assert_eq!(id.to_string(), "birth.child.child-view-group.firstName");
//!
//! let parsed: FieldId = "birth.child.child-view-group.firstName".parse().unwrap();
//! assert_eq!(parsed, id);
//! ```

#![warn(unreachable_pub)]

mod event;
mod field;
mod field_id;
mod form;

pub use event::{Event, EventError};
pub use field::{FieldDefinition, FieldType, SelectOption};
pub use field_id::{FieldId, FieldIdError};
pub use form::{FieldIdentifiers, FormSchema, Group, Section};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
