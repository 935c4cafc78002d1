//! A headless expandable list engine.
//!
//! For adapter-level utilities (drag reordering, row geometry, fades), see
//! the `expandable-adapter` crate.
//!
//! This crate focuses on the core logic of a two-level list control: rows
//! partitioned into groups, each group optionally expanded to reveal one
//! child-container row hosting its nested children. The engine keeps the
//! expansion-state vector, the visible row count, and the row ↔ group index
//! translation consistent under toggles, reloads, deletions, and moves.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the data collaborator hooks ([`ExpandableOptions`]): counts, cells,
//!   heights, affordances, and mutation commands for its backing store
//! - a rendering surface that applies the queued [`RowEdit`] commands
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod expansion;
mod fenwick;
mod list;
mod options;
mod translator;
mod types;

#[cfg(test)]
mod tests;

pub use expansion::ExpansionStates;
pub use list::ExpandableList;
pub use options::{
    ChildCommand, ChildHook, CountHook, ExpandableOptions, GroupCommand, GroupHook,
    MoveChildCommand, MoveGroupCommand, OnChangeCallback,
};
pub use translator::{address, group_for_row, is_child_row, row_for_group};
pub use types::{
    ChildListCell, DEFAULT_CHILD_ROW_HEIGHT, DEFAULT_GROUP_ROW_HEIGHT, DragShift, GroupRowCell,
    IndicatorPlacement, RowAddress, RowCell, RowEdit,
};
