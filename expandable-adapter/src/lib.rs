//! Adapter utilities for the `expandable` crate.
//!
//! The `expandable` crate is UI-agnostic and focuses on the core state and
//! index math of a two-level expandable list. This crate provides small,
//! framework-neutral helpers commonly needed by adapters:
//!
//! - The drag-reorder engine: a gesture-level session state machine that
//!   turns pointer positions into incremental group reorders and
//!   presentation effects
//! - Row geometry (row origins, pointer → row resolution) from row heights
//! - A fade helper for the grip/drop snapshot animations (adapter-driven)
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod drag;
mod fade;
mod geometry;


pub use drag::{DragController, DragEffect, DragPhase, DragSession, SNAPSHOT_FADE_MS};
pub use fade::{Easing, Fade};
pub use geometry::{row_at_point, row_origin};
