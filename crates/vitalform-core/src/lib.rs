//! Vitalform Core
//!
//! The administrator-facing edit layer: a [`ConfigState`] snapshot plus
//! explicit state transitions. There is no store singleton; whoever owns the
//! state calls [`ConfigState::apply`] with a [`Command`] and keeps the
//! returned snapshot.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitalform_core::{Command, ConfigState};
//!
//! let state = ConfigState::load(Event::Birth, schema, &stored_overrides);
//! let state = state.apply(Command::ShiftUp { field_id })?;
//!
//! // Persist the flat delta list, render the merged form
//! let payload = state.overrides()?;
//! let form = state.configured_form()?;
//! ```

#![warn(unreachable_pub)]

mod command;
mod error;
mod state;

pub use command::Command;
pub use error::TransitionError;
pub use state::ConfigState;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
