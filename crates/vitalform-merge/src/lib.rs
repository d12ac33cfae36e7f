//! Vitalform Customization Merger
//!
//! Overlays administrator-authored overrides onto the factory-default form
//! schema. The stored override list is the only persisted state; both the
//! rendered form and the editable field map are derived from
//! (default schema + overrides) on every load.
//!
//! # Core Concepts
//!
//! - [`OverrideRecord`]: One stored delta — a moved/disabled/requiredness
//!   change to a default field, or a full custom field definition
//! - [`merge_configuration`]: Default schema + overrides → renderable form
//! - [`configured_field_map`]: Default schema + overrides → editable
//!   [`FieldMap`](vitalform_order::FieldMap)
//! - [`extract_overrides`]: Editable field map → flat persistable delta list
//!
//! # Example
//!
//! ```rust,ignore
//! use vitalform_merge::{merge_configuration, OverrideRecord};
//!
//! let overrides: Vec<OverrideRecord> = serde_json::from_str(&stored)?;
//! let form = merge_configuration(&schema, &overrides, Event::Birth);
//! ```

#![warn(unreachable_pub)]

mod extract;
mod layout;
mod merge;
mod overrides;

pub use extract::extract_overrides;
pub use merge::{configured_field_map, merge_configuration};
pub use overrides::OverrideRecord;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
