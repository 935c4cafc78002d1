use alloc::vec::Vec;

use crate::fenwick::Fenwick;

/// The expansion-state vector: one flag per group, `true` when expanded.
///
/// Alongside the flags this keeps a Fenwick tree of rows-per-group (1 for a
/// collapsed group, 2 for an expanded one) in lockstep, so the row/group
/// translation in [`crate::translator`] stays `O(log groups)` on the hottest
/// path while the visible row count is a single cached sum.
#[derive(Clone, Debug)]
pub struct ExpansionStates {
    expanded: Vec<bool>,
    rows: Fenwick,
}

fn rows_for(expanded: bool) -> u64 {
    if expanded { 2 } else { 1 }
}

impl ExpansionStates {
    /// Creates the vector for `group_count` groups, all collapsed.
    pub fn with_group_count(group_count: usize) -> Self {
        let expanded = alloc::vec![false; group_count];
        let rows = Fenwick::from_values(&alloc::vec![1u64; group_count]);
        Self { expanded, rows }
    }

    /// Creates the vector from explicit per-group flags.
    pub fn from_expanded(expanded: &[bool]) -> Self {
        let values: Vec<u64> = expanded.iter().map(|&e| rows_for(e)).collect();
        Self {
            expanded: expanded.to_vec(),
            rows: Fenwick::from_values(&values),
        }
    }

    /// Reconciles the vector against a new group count after a full reload.
    ///
    /// Entries are appended (`false`) or removed at the tail only. Surviving
    /// groups are not correlated by identity: after a non-trailing insert or
    /// removal of groups, expansion state can land on a different logical
    /// group than before the reload. Accepted behavior, not detected.
    pub fn reconcile(&mut self, new_group_count: usize) {
        while new_group_count > self.expanded.len() {
            self.expanded.push(false);
            self.rows.push_value(1);
        }
        if new_group_count < self.expanded.len() {
            self.expanded.truncate(new_group_count);
            self.rows.truncate(new_group_count);
        }
    }

    pub fn group_count(&self) -> usize {
        self.expanded.len()
    }

    /// Total visible rows: one per group plus one per expanded group.
    pub fn visible_row_count(&self) -> usize {
        self.rows.total() as usize
    }

    pub fn expanded_count(&self) -> usize {
        self.visible_row_count() - self.group_count()
    }

    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn is_expanded(&self, group_index: usize) -> bool {
        assert!(
            group_index < self.expanded.len(),
            "group index out of range (group_index={group_index}, group_count={})",
            self.expanded.len()
        );
        self.expanded[group_index]
    }

    /// Flips one group's flag and returns the new state.
    ///
    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn toggle(&mut self, group_index: usize) -> bool {
        let now = !self.is_expanded(group_index);
        self.expanded[group_index] = now;
        self.rows.add(group_index, if now { 1 } else { -1 });
        now
    }

    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn set_expanded(&mut self, group_index: usize, expanded: bool) {
        if self.is_expanded(group_index) != expanded {
            self.toggle(group_index);
        }
    }

    /// Exchanges two groups' flags (expansion state travels with the row
    /// position during a group move).
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn swap(&mut self, group_a: usize, group_b: usize) {
        let a = self.is_expanded(group_a);
        let b = self.is_expanded(group_b);
        if a == b {
            return;
        }
        self.expanded.swap(group_a, group_b);
        self.rows.add(group_a, if b { 1 } else { -1 });
        self.rows.add(group_b, if a { 1 } else { -1 });
    }

    /// Removes one group's entry, collapsing the vector (used after a group
    /// deletion).
    ///
    /// # Panics
    ///
    /// Panics when `group_index` is out of range.
    pub fn remove_at(&mut self, group_index: usize) {
        assert!(
            group_index < self.expanded.len(),
            "group index out of range (group_index={group_index}, group_count={})",
            self.expanded.len()
        );
        self.expanded.remove(group_index);
        let values: Vec<u64> = self.expanded.iter().map(|&e| rows_for(e)).collect();
        self.rows = Fenwick::from_values(&values);
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.expanded
    }

    pub(crate) fn rows(&self) -> &Fenwick {
        &self.rows
    }
}
