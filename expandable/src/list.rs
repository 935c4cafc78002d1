use alloc::vec::Vec;
use core::cell::Cell;

use crate::types::{
    ChildListCell, DEFAULT_CHILD_ROW_HEIGHT, DEFAULT_GROUP_ROW_HEIGHT, DragShift, GroupRowCell,
    RowAddress, RowCell, RowEdit,
};
use crate::{ExpandableOptions, ExpansionStates, translator};

/// A headless expandable list controller.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects. Cells are opaque `C` values produced
///   by the collaborator hooks in [`ExpandableOptions`].
/// - The rendering surface answers its row queries through this type, which
///   translates every visible row to a logical address first.
/// - Mutations queue [`RowEdit`] commands the host drains and applies to its
///   rendering surface, in order.
///
/// All mutation happens through `&mut self`: confine an instance to one
/// thread (or one event queue) and the run-to-completion model holds by
/// construction.
///
/// For drag-based group reordering, see the `expandable-adapter` crate.
#[derive(Clone, Debug)]
pub struct ExpandableList<C> {
    options: ExpandableOptions<C>,
    expansion: ExpansionStates,
    edits: Vec<RowEdit>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<C> ExpandableList<C> {
    /// Creates a list from collaborator options, reading the initial group
    /// count and starting every group collapsed.
    pub fn new(options: ExpandableOptions<C>) -> Self {
        let group_count = (options.group_count)();
        edebug!(group_count, "ExpandableList::new");
        Self {
            options,
            expansion: ExpansionStates::with_group_count(group_count),
            edits: Vec::new(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &ExpandableOptions<C> {
        &self.options
    }

    /// Replaces the collaborator and reconciles against its group count, as
    /// a full reload.
    pub fn set_options(&mut self, options: ExpandableOptions<C>) {
        self.options = options;
        self.reload();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ExpandableOptions<C>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn expansion(&self) -> &ExpansionStates {
        &self.expansion
    }

    // --- notification -----------------------------------------------------

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple mutations into a single `on_change` notification.
    ///
    /// Queued row edits are unaffected — they accumulate in order and are
    /// drained once, after the batch.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    // --- pending row edits ------------------------------------------------

    /// The queued visible-row commands, oldest first.
    pub fn pending_edits(&self) -> &[RowEdit] {
        &self.edits
    }

    /// Drains the queued visible-row commands in order, without allocating.
    pub fn drain_edits(&mut self, mut f: impl FnMut(RowEdit)) {
        for edit in self.edits.drain(..) {
            f(edit);
        }
    }

    fn queue(&mut self, edit: RowEdit) {
        etrace!(?edit, "queue row edit");
        self.edits.push(edit);
    }

    // --- row queries ------------------------------------------------------

    /// Number of visible rows: one per group plus one per expanded group.
    pub fn row_count(&self) -> usize {
        self.expansion.visible_row_count()
    }

    pub fn group_count(&self) -> usize {
        self.expansion.group_count()
    }

    pub fn child_count(&self, group_index: usize) -> usize {
        self.assert_group(group_index);
        (self.options.child_count)(group_index)
    }

    /// Resolves a visible row to its logical address.
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn address(&self, row: usize) -> RowAddress {
        translator::address(&self.expansion, row)
    }

    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn is_child_row(&self, row: usize) -> bool {
        translator::is_child_row(&self.expansion, row)
    }

    /// The visible row of a group's own row.
    ///
    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn row_for_group(&self, group_index: usize) -> usize {
        translator::row_for_group(&self.expansion, group_index)
    }

    /// The group owning a visible row.
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn group_for_row(&self, row: usize) -> usize {
        translator::group_for_row(&self.expansion, row)
    }

    /// Answers a row-content query from the rendering surface.
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn row_cell(&self, row: usize) -> RowCell<C> {
        let address = self.address(row);
        let group_index = address.group_index;
        if address.is_child {
            RowCell::ChildList(ChildListCell {
                group_index,
                child_count: (self.options.child_count)(group_index),
            })
        } else {
            RowCell::Group(GroupRowCell {
                group_index,
                cell: (self.options.group_cell)(group_index),
                expanded: self.expansion.is_expanded(group_index),
                expandable: self.group_expandable(group_index),
                indicator_placement: self.options.indicator_placement,
                indicator_glyph: self.options.indicator_glyph.as_ref().map(|f| f()),
                accessory: self
                    .options
                    .group_accessory
                    .as_ref()
                    .and_then(|f| f(group_index)),
            })
        }
    }

    /// Renderable cell for one child of a group.
    ///
    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn child_cell(&self, group_index: usize, child_index: usize) -> C {
        self.assert_group(group_index);
        (self.options.child_cell)(child_index, group_index)
    }

    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn child_accessory(&self, group_index: usize, child_index: usize) -> Option<C> {
        self.assert_group(group_index);
        self.options
            .child_accessory
            .as_ref()
            .and_then(|f| f(child_index, group_index))
    }

    /// Height of a visible row. A group row asks the collaborator (default
    /// 44); a child-container row is the sum of its child row heights.
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn row_height(&self, row: usize) -> u32 {
        let address = self.address(row);
        if address.is_child {
            let count = (self.options.child_count)(address.group_index);
            let mut height = 0u32;
            for child in 0..count {
                height = height.saturating_add(self.child_row_height(address.group_index, child));
            }
            height
        } else {
            match &self.options.group_row_height {
                Some(f) => f(address.group_index),
                None => DEFAULT_GROUP_ROW_HEIGHT,
            }
        }
    }

    /// Height of one child row (default 44).
    pub fn child_row_height(&self, group_index: usize, child_index: usize) -> u32 {
        match &self.options.child_row_height {
            Some(f) => f(child_index, group_index),
            None => DEFAULT_CHILD_ROW_HEIGHT,
        }
    }

    // --- edit affordances -------------------------------------------------

    /// Whether a row shows any edit affordance at all: true when the row's
    /// group is deletable, or when any child of the group is movable or
    /// deletable on its own.
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn can_edit_row(&self, row: usize) -> bool {
        let group_index = self.group_for_row(row);
        if self.can_delete_group(group_index) {
            return true;
        }
        let count = (self.options.child_count)(group_index);
        (0..count).any(|child| {
            self.can_move_child(group_index, child) || self.can_delete_child(group_index, child)
        })
    }

    /// Whether a row carries the delete affordance (its group is deletable).
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn can_delete_row(&self, row: usize) -> bool {
        self.can_delete_group(self.group_for_row(row))
    }

    /// Whether a row can be grabbed for reordering: its group must be
    /// movable and the row must be the group's own row, never the child
    /// container.
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn can_move_row(&self, row: usize) -> bool {
        self.can_move_group(self.group_for_row(row)) && !self.is_child_row(row)
    }

    /// Clamps a proposed move destination: child rows are not valid
    /// destinations, the move falls back to `source_row`.
    ///
    /// # Panics
    ///
    /// Panics when either row is out of range.
    pub fn target_row_for_move(&self, source_row: usize, proposed_row: usize) -> usize {
        if self.is_child_row(proposed_row) {
            source_row
        } else {
            proposed_row
        }
    }

    pub fn can_move_group(&self, group_index: usize) -> bool {
        self.assert_group(group_index);
        self.options
            .can_move_group
            .as_ref()
            .is_some_and(|f| f(group_index))
    }

    pub fn can_delete_group(&self, group_index: usize) -> bool {
        self.assert_group(group_index);
        self.options
            .can_delete_group
            .as_ref()
            .is_some_and(|f| f(group_index))
    }

    pub fn can_move_child(&self, group_index: usize, child_index: usize) -> bool {
        self.assert_group(group_index);
        self.options
            .can_move_child
            .as_ref()
            .is_some_and(|f| f(child_index, group_index))
    }

    pub fn can_delete_child(&self, group_index: usize, child_index: usize) -> bool {
        self.assert_group(group_index);
        self.options
            .can_delete_child
            .as_ref()
            .is_some_and(|f| f(child_index, group_index))
    }

    pub fn group_expandable(&self, group_index: usize) -> bool {
        self.assert_group(group_index);
        self.options
            .group_expandable
            .as_ref()
            .is_none_or(|f| f(group_index))
    }

    // --- mutations --------------------------------------------------------

    /// Toggles the group at a group row.
    ///
    /// Flips the expansion flag and queues the child-container row
    /// insert/delete plus the indicator update as one transaction: the
    /// host never observes row count and expansion flag disagreeing.
    ///
    /// # Panics
    ///
    /// Panics when `group_row` is out of range or addresses a child row.
    pub fn toggle_group(&mut self, group_row: usize) {
        self.assert_group_row(group_row);
        let group_index = self.group_for_row(group_row);
        let expanded = self.expansion.toggle(group_index);
        edebug!(group_index, group_row, expanded, "toggle_group");

        if expanded {
            self.queue(RowEdit::InsertRow {
                row: group_row + 1,
                animated: true,
            });
        } else {
            self.queue(RowEdit::DeleteRow {
                row: group_row + 1,
                animated: true,
            });
        }
        self.queue(RowEdit::UpdateIndicator {
            row: group_row,
            expanded,
            animated: true,
        });
        self.notify();
    }

    /// Collapses every expanded group, one toggle at a time.
    ///
    /// Deliberately not a single batched recompute: each toggle shifts the
    /// rows after it by one, so the next group's row is re-derived after
    /// every step.
    pub fn collapse_all(&mut self) {
        self.batch_update(|list| {
            for group_index in 0..list.group_count() {
                if list.expansion.is_expanded(group_index) {
                    let row = list.row_for_group(group_index);
                    list.toggle_group(row);
                }
            }
        });
    }

    /// Re-reads the group count from the collaborator, reconciles the
    /// expansion vector (tail-only), and queues a full re-render.
    pub fn reload(&mut self) {
        let group_count = (self.options.group_count)();
        edebug!(group_count, "reload");
        self.expansion.reconcile(group_count);
        self.queue(RowEdit::Reload { animated: false });
        self.notify();
    }

    /// Re-renders one group's nested child list. No-op when the group is
    /// collapsed.
    ///
    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn reload_child(&mut self, group_index: usize, animated: bool) {
        if !self.expansion.is_expanded(group_index) {
            return;
        }
        let row = self.row_for_group(group_index) + 1;
        self.queue(RowEdit::RedrawRow { row, animated });
        self.notify();
    }

    /// Deletes the group owning `row` after the host confirmed the
    /// deletion.
    ///
    /// The collaborator's delete command runs first, while the logical
    /// address is still valid; only then is the expansion entry removed.
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn delete_group(&mut self, row: usize) {
        let group_index = self.group_for_row(row);
        edebug!(group_index, row, "delete_group");
        if let Some(f) = &self.options.on_delete_group {
            f(group_index);
        }
        self.queue(RowEdit::Reload { animated: true });
        self.expansion.remove_at(group_index);
        self.notify();
    }

    /// Applies a host-initiated group move (native reorder path): swaps the
    /// two groups' expansion entries — expansion state travels with the row
    /// position, not the group identity — and notifies the collaborator.
    ///
    /// The host has already moved the visible row itself, so no row edit is
    /// queued.
    ///
    /// # Panics
    ///
    /// Panics when either row is out of range or addresses a child row.
    pub fn move_group(&mut self, source_row: usize, destination_row: usize) {
        self.assert_group_row(source_row);
        self.assert_group_row(destination_row);
        let source_group = self.group_for_row(source_row);
        let destination_group = self.group_for_row(destination_row);
        edebug!(source_group, destination_group, "move_group");

        self.expansion.swap(source_group, destination_group);
        if let Some(f) = &self.options.on_move_group {
            f(source_group, destination_group);
        }
        self.notify();
    }

    /// One incremental reorder step of an in-flight drag: the dragged
    /// group's row crossed onto another group's row.
    ///
    /// Computes the destination (one past the hover row when dragging
    /// downward onto an expanded group, whose child row shifts the
    /// insertion point), swaps the two groups' expansion entries, notifies
    /// the collaborator, and returns the visible-row moves for the host to
    /// apply — including the paired child-container move when the dragged
    /// group is expanded.
    ///
    /// Crossings already applied are never rolled back; a cancelled drag
    /// keeps the reorders performed so far.
    ///
    /// # Panics
    ///
    /// Panics when either row is out of range, either row addresses a child
    /// row, or `hover_row == source_row`.
    pub fn drag_shift(&mut self, source_row: usize, hover_row: usize) -> DragShift {
        self.assert_group_row(source_row);
        self.assert_group_row(hover_row);
        assert!(
            source_row != hover_row,
            "drag_shift requires distinct rows (row={source_row})"
        );

        let moving_down = source_row < hover_row;
        let destination_expanded = self.expansion.is_expanded(self.group_for_row(hover_row));
        let destination_row = if destination_expanded && moving_down {
            hover_row + 1
        } else {
            hover_row
        };

        let source_group = self.group_for_row(source_row);
        let destination_group = self.group_for_row(destination_row);
        let source_expanded = self.expansion.is_expanded(source_group);
        edebug!(
            source_group,
            destination_group,
            moving_down,
            source_expanded,
            "drag_shift"
        );

        self.expansion.swap(source_group, destination_group);
        if let Some(f) = &self.options.on_move_group {
            f(source_group, destination_group);
        }

        let group_move = (source_row, destination_row);
        let child_move = source_expanded.then(|| {
            if moving_down {
                // The child slid into the vacated row after the group move.
                (source_row, destination_row)
            } else {
                (source_row + 1, destination_row + 1)
            }
        });
        let new_source_row = if source_expanded && moving_down {
            destination_row - 1
        } else {
            destination_row
        };

        self.notify();
        DragShift {
            group_move,
            child_move,
            new_source_row,
        }
    }

    /// Reports a tap on a visible row. A group row notifies the
    /// collaborator and toggles the group (when expandable); taps on the
    /// child container are resolved by the nested list, which reports
    /// through [`Self::select_child`].
    ///
    /// # Panics
    ///
    /// Panics when `row` is out of range.
    pub fn select_row(&mut self, row: usize) {
        if self.is_child_row(row) {
            return;
        }
        let group_index = self.group_for_row(row);
        if let Some(f) = &self.options.on_select_group {
            f(group_index);
        }
        if self.group_expandable(group_index) {
            self.toggle_group(row);
        }
    }

    /// Reports a tap on one child of a group.
    ///
    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn select_child(&mut self, group_index: usize, child_index: usize) {
        self.assert_group(group_index);
        if let Some(f) = &self.options.on_select_child {
            f(child_index, group_index);
        }
    }

    /// Deletes one child: forwards to the collaborator and re-renders the
    /// group's child container when visible.
    ///
    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn delete_child(&mut self, group_index: usize, child_index: usize) {
        self.assert_group(group_index);
        edebug!(group_index, child_index, "delete_child");
        if let Some(f) = &self.options.on_delete_child {
            f(child_index, group_index);
        }
        if self.expansion.is_expanded(group_index) {
            let row = self.row_for_group(group_index) + 1;
            self.queue(RowEdit::RedrawRow {
                row,
                animated: true,
            });
        }
        self.notify();
    }

    /// Reorders one child inside its group (the nested list moved the row
    /// itself).
    ///
    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn move_child(&mut self, group_index: usize, source_child: usize, destination_child: usize) {
        self.assert_group(group_index);
        edebug!(group_index, source_child, destination_child, "move_child");
        if let Some(f) = &self.options.on_move_child {
            f(source_child, destination_child, group_index);
        }
        self.notify();
    }

    // --- preconditions ----------------------------------------------------

    fn assert_group(&self, group_index: usize) {
        assert!(
            group_index < self.group_count(),
            "group index out of range (group_index={group_index}, group_count={})",
            self.group_count()
        );
    }

    fn assert_group_row(&self, row: usize) {
        assert!(
            !self.is_child_row(row),
            "group-only operation on a child row (row={row})"
        );
    }
}
