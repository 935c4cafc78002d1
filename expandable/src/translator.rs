//! Row/group index translation.
//!
//! Pure lookups between a visible row position (what the rendering surface
//! displays, `0..visible_row_count`) and a logical address (group index plus
//! a child flag), given the current [`ExpansionStates`]. An expanded group
//! contributes two rows: its own row and one child-container row directly
//! after it.
//!
//! Out-of-range input is a contract violation on the caller's side and
//! panics; the rendering surface must never query rows it was not told
//! exist.

use crate::ExpansionStates;
use crate::types::RowAddress;

/// Returns the visible row of group `group_index`'s own row.
///
/// Every group before it contributes one row, plus one more if expanded.
///
/// # Panics
///
/// Panics when `group_index >= states.group_count()`.
pub fn row_for_group(states: &ExpansionStates, group_index: usize) -> usize {
    assert!(
        group_index < states.group_count(),
        "group index out of range (group_index={group_index}, group_count={})",
        states.group_count()
    );
    states.rows().prefix_sum(group_index) as usize
}

/// Returns the group owning visible row `row` — either the group's own row
/// or its child-container row.
///
/// # Panics
///
/// Panics when `row >= states.visible_row_count()`.
pub fn group_for_row(states: &ExpansionStates, row: usize) -> usize {
    assert!(
        row < states.visible_row_count(),
        "row out of range (row={row}, visible_row_count={})",
        states.visible_row_count()
    );
    let group = states.rows().lower_bound(row as u64);
    debug_assert!(group < states.group_count());
    group
}

/// A row is a child row exactly when it shares a group with its immediate
/// predecessor.
///
/// # Panics
///
/// Panics when `row >= states.visible_row_count()`.
pub fn is_child_row(states: &ExpansionStates, row: usize) -> bool {
    row > 0 && group_for_row(states, row) == group_for_row(states, row - 1)
}

/// Resolves a visible row to its logical address.
///
/// # Panics
///
/// Panics when `row >= states.visible_row_count()`.
pub fn address(states: &ExpansionStates, row: usize) -> RowAddress {
    RowAddress {
        group_index: group_for_row(states, row),
        is_child: is_child_row(states, row),
    }
}
