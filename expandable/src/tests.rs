use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::{format, vec};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

// Naive walk over the expansion flags: one row per group, two per expanded
// group. The engine's prefix-sum lookups must agree with this exactly.
fn expected_row_for_group(expanded: &[bool], group_index: usize) -> usize {
    let mut row = 0;
    for g in 0..group_index {
        row += 1;
        if expanded[g] {
            row += 1;
        }
    }
    row
}

fn expected_group_for_row(expanded: &[bool], row: usize) -> usize {
    let mut consumed = 0;
    let mut group = 0;
    loop {
        let span = if expanded[group] { 2 } else { 1 };
        if consumed + span > row {
            return group;
        }
        consumed += span;
        group += 1;
    }
}

fn expected_visible_rows(expanded: &[bool]) -> usize {
    expanded.len() + expanded.iter().filter(|&&e| e).count()
}

fn assert_translation_matches_reference(states: &ExpansionStates) {
    let flags = states.as_slice().to_vec();
    assert_eq!(states.visible_row_count(), expected_visible_rows(&flags));
    for g in 0..flags.len() {
        assert_eq!(row_for_group(states, g), expected_row_for_group(&flags, g));
        // Inverse law, restricted to group-row positions.
        assert_eq!(group_for_row(states, row_for_group(states, g)), g);
    }
    for row in 0..states.visible_row_count() {
        assert_eq!(group_for_row(states, row), expected_group_for_row(&flags, row));
    }
}

// --- expansion vector + translator ---------------------------------------

#[test]
fn all_collapsed_three_groups() {
    let states = ExpansionStates::with_group_count(3);
    assert_eq!(states.visible_row_count(), 3);
    assert_eq!(row_for_group(&states, 2), 2);
    for row in 0..3 {
        assert!(!is_child_row(&states, row));
    }
}

#[test]
fn middle_group_expanded_shifts_later_rows() {
    let states = ExpansionStates::from_expanded(&[false, true, false]);
    assert_eq!(states.visible_row_count(), 4);
    assert_eq!(row_for_group(&states, 2), 3);
    assert_eq!(group_for_row(&states, 2), 1);
    assert!(is_child_row(&states, 2));
    assert_eq!(
        address(&states, 2),
        RowAddress {
            group_index: 1,
            is_child: true
        }
    );
}

#[test]
fn child_rows_follow_their_group_row() {
    let states = ExpansionStates::from_expanded(&[true, false, true]);
    for row in 0..states.visible_row_count() {
        if is_child_row(&states, row) {
            assert!(!is_child_row(&states, row - 1));
            assert_eq!(group_for_row(&states, row), group_for_row(&states, row - 1));
        }
    }
    assert_translation_matches_reference(&states);
}

#[test]
fn toggle_twice_restores_vector_and_row_count() {
    let mut states = ExpansionStates::from_expanded(&[false, true, false]);
    let before = states.as_slice().to_vec();
    let rows = states.visible_row_count();

    assert!(states.toggle(0));
    assert!(!states.toggle(0));
    assert_eq!(states.as_slice(), &before[..]);
    assert_eq!(states.visible_row_count(), rows);
}

#[test]
fn reconcile_appends_and_removes_at_tail_only() {
    let mut states = ExpansionStates::from_expanded(&[true, false]);
    states.reconcile(4);
    assert_eq!(states.as_slice(), &[true, false, false, false]);

    states.reconcile(1);
    assert_eq!(states.as_slice(), &[true]);
    assert_translation_matches_reference(&states);
}

#[test]
fn swap_moves_expansion_with_row_position() {
    let mut states = ExpansionStates::from_expanded(&[true, false, false]);
    states.swap(0, 2);
    assert_eq!(states.as_slice(), &[false, false, true]);
    assert_translation_matches_reference(&states);

    // Swapping equal flags is a no-op.
    states.swap(0, 1);
    assert_eq!(states.as_slice(), &[false, false, true]);
}

#[test]
fn remove_at_collapses_the_vector() {
    let mut states = ExpansionStates::from_expanded(&[true, true, false]);
    states.remove_at(1);
    assert_eq!(states.as_slice(), &[true, false]);
    assert_translation_matches_reference(&states);
}

#[test]
#[should_panic(expected = "row out of range")]
fn out_of_range_row_fails_loudly() {
    let states = ExpansionStates::with_group_count(3);
    let _ = group_for_row(&states, 3);
}

#[test]
#[should_panic(expected = "group index out of range")]
fn out_of_range_group_fails_loudly() {
    let states = ExpansionStates::with_group_count(3);
    let _ = row_for_group(&states, 3);
}

#[test]
fn random_mutation_sweep_matches_reference_walk() {
    let mut rng = Lcg::new(0x5eed);
    let mut states = ExpansionStates::with_group_count(8);
    let mut model = vec![false; 8];

    for _ in 0..500 {
        match rng.gen_range_usize(0, 4) {
            0 if !model.is_empty() => {
                let g = rng.gen_range_usize(0, model.len());
                states.toggle(g);
                model[g] = !model[g];
            }
            1 if model.len() >= 2 => {
                let a = rng.gen_range_usize(0, model.len());
                let b = rng.gen_range_usize(0, model.len());
                states.swap(a, b);
                model.swap(a, b);
            }
            2 => {
                let n = rng.gen_range_usize(0, 12);
                states.reconcile(n);
                while n > model.len() {
                    model.push(false);
                }
                model.truncate(n);
            }
            _ if !model.is_empty() && rng.gen_bool() => {
                let g = rng.gen_range_usize(0, model.len());
                states.remove_at(g);
                model.remove(g);
            }
            _ => {}
        }

        assert_eq!(states.as_slice(), &model[..]);
        assert_eq!(states.group_count(), model.len());
        assert_eq!(states.expanded_count(), model.iter().filter(|&&e| e).count());
        assert_translation_matches_reference(&states);
    }
}

// --- controller harness ---------------------------------------------------

type Data = Arc<Mutex<Vec<(String, Vec<String>)>>>;
type Events = Arc<Mutex<Vec<String>>>;

fn sample_data() -> Data {
    Arc::new(Mutex::new(vec![
        ("Group 1".to_string(), vec!["A".to_string(), "B".to_string()]),
        ("Group 2".to_string(), vec!["C".to_string(), "D".to_string()]),
        ("Group 3".to_string(), vec!["E".to_string(), "F".to_string()]),
    ]))
}

fn options_for(data: &Data, events: &Events) -> ExpandableOptions<String> {
    let (d1, d2, d3, d4) = (
        Arc::clone(data),
        Arc::clone(data),
        Arc::clone(data),
        Arc::clone(data),
    );
    let (e1, e2, e3, e4, e5, e6) = (
        Arc::clone(events),
        Arc::clone(events),
        Arc::clone(events),
        Arc::clone(events),
        Arc::clone(events),
        Arc::clone(events),
    );
    let (m1, m2) = (Arc::clone(data), Arc::clone(data));

    ExpandableOptions::new(
        move || d1.lock().unwrap().len(),
        move |g| d2.lock().unwrap()[g].1.len(),
        move |g| d3.lock().unwrap()[g].0.clone(),
        move |c, g| d4.lock().unwrap()[g].1[c].clone(),
    )
    .with_on_move_group(move |from, to| {
        let group = m1.lock().unwrap().remove(from);
        m1.lock().unwrap().insert(to, group);
        e1.lock().unwrap().push(format!("move_group({from},{to})"));
    })
    .with_on_delete_group(move |g| {
        m2.lock().unwrap().remove(g);
        e2.lock().unwrap().push(format!("delete_group({g})"));
    })
    .with_on_move_child(move |from, to, g| {
        e3.lock()
            .unwrap()
            .push(format!("move_child({from},{to},{g})"));
    })
    .with_on_delete_child(move |c, g| {
        e4.lock().unwrap().push(format!("delete_child({c},{g})"));
    })
    .with_on_select_group(move |g| {
        e5.lock().unwrap().push(format!("select_group({g})"));
    })
    .with_on_select_child(move |c, g| {
        e6.lock().unwrap().push(format!("select_child({c},{g})"));
    })
}

fn list_for(data: &Data, events: &Events) -> ExpandableList<String> {
    ExpandableList::new(options_for(data, events))
}

// --- controller -----------------------------------------------------------

#[test]
fn toggle_group_inserts_child_row_and_updates_indicator() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    assert_eq!(list.row_count(), 3);

    list.toggle_group(0);
    assert_eq!(list.expansion().as_slice(), &[true, false, false]);
    assert_eq!(list.row_count(), 4);
    assert_eq!(
        list.pending_edits(),
        &[
            RowEdit::InsertRow {
                row: 1,
                animated: true
            },
            RowEdit::UpdateIndicator {
                row: 0,
                expanded: true,
                animated: true
            },
        ]
    );
}

#[test]
fn toggle_group_back_deletes_child_row() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(1);
    list.drain_edits(|_| {});

    list.toggle_group(1);
    assert_eq!(list.row_count(), 3);
    assert_eq!(
        list.pending_edits(),
        &[
            RowEdit::DeleteRow {
                row: 2,
                animated: true
            },
            RowEdit::UpdateIndicator {
                row: 1,
                expanded: false,
                animated: true
            },
        ]
    );
}

#[test]
#[should_panic(expected = "group-only operation on a child row")]
fn toggle_group_rejects_child_rows() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(0);
    list.toggle_group(1); // row 1 is group 0's child container
}

#[test]
fn collapse_all_retoggles_one_group_at_a_time() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(0);
    list.toggle_group(list.row_for_group(2));
    list.drain_edits(|_| {});
    assert_eq!(list.row_count(), 5);

    list.collapse_all();
    assert_eq!(list.row_count(), 3);
    assert_eq!(list.expansion().as_slice(), &[false, false, false]);
    // Group 2's row is re-derived after group 0 collapsed (3, not 4).
    assert_eq!(
        list.pending_edits(),
        &[
            RowEdit::DeleteRow {
                row: 1,
                animated: true
            },
            RowEdit::UpdateIndicator {
                row: 0,
                expanded: false,
                animated: true
            },
            RowEdit::DeleteRow {
                row: 3,
                animated: true
            },
            RowEdit::UpdateIndicator {
                row: 2,
                expanded: false,
                animated: true
            },
        ]
    );
}

#[test]
fn on_change_fires_once_per_batch() {
    let (data, events) = (sample_data(), Events::default());
    let changes = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&changes);
    let options =
        options_for(&data, &events).with_on_change(move |_| *counter.lock().unwrap() += 1);
    let mut list = ExpandableList::new(options);

    list.toggle_group(0);
    assert_eq!(*changes.lock().unwrap(), 1);

    list.batch_update(|l| {
        l.toggle_group(0);
        l.toggle_group(0);
    });
    assert_eq!(*changes.lock().unwrap(), 2);
}

#[test]
fn reload_reconciles_vector_against_new_group_count() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(0);
    list.drain_edits(|_| {});

    data.lock()
        .unwrap()
        .push(("Group 4".to_string(), Vec::new()));
    list.reload();
    assert_eq!(list.group_count(), 4);
    assert_eq!(list.expansion().as_slice(), &[true, false, false, false]);
    assert_eq!(list.pending_edits(), &[RowEdit::Reload { animated: false }]);
}

#[test]
fn reload_child_is_a_noop_when_collapsed() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.reload_child(1, true);
    assert!(list.pending_edits().is_empty());
}

#[test]
fn reload_child_redraws_the_container_row() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(1);
    list.drain_edits(|_| {});

    list.reload_child(1, true);
    assert_eq!(
        list.pending_edits(),
        &[RowEdit::RedrawRow {
            row: 2,
            animated: true
        }]
    );
}

#[test]
fn delete_group_notifies_collaborator_before_dropping_state() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(1);
    list.drain_edits(|_| {});

    // Deleting via the child-container row resolves to the same group.
    list.delete_group(2);
    assert_eq!(events.lock().unwrap().as_slice(), &["delete_group(1)"]);
    assert_eq!(list.group_count(), 2);
    assert_eq!(list.expansion().as_slice(), &[false, false]);
    assert_eq!(list.pending_edits(), &[RowEdit::Reload { animated: true }]);
    assert_eq!(data.lock().unwrap().len(), 2);
}

#[test]
fn move_group_swaps_expansion_entries_and_notifies() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(0);
    list.drain_edits(|_| {});
    assert_eq!(list.expansion().as_slice(), &[true, false, false]);

    // Group 2 sits at row 3 while group 0 is expanded.
    list.move_group(0, 3);
    assert_eq!(list.expansion().as_slice(), &[false, false, true]);
    assert_eq!(events.lock().unwrap().as_slice(), &["move_group(0,2)"]);
    // Host-initiated move: no row edits queued.
    assert!(list.pending_edits().is_empty());
}

#[test]
fn row_cell_resolves_group_and_child_container() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(0);

    match list.row_cell(0) {
        RowCell::Group(cell) => {
            assert_eq!(cell.group_index, 0);
            assert_eq!(cell.cell, "Group 1");
            assert!(cell.expanded);
            assert!(cell.expandable);
            assert_eq!(cell.indicator_placement, IndicatorPlacement::Left);
            assert!(cell.indicator_glyph.is_none());
            assert!(cell.accessory.is_none());
        }
        RowCell::ChildList(_) => panic!("row 0 is a group row"),
    }
    match list.row_cell(1) {
        RowCell::ChildList(cell) => {
            assert_eq!(cell.group_index, 0);
            assert_eq!(cell.child_count, 2);
        }
        RowCell::Group(_) => panic!("row 1 is the child container"),
    }
    assert_eq!(list.child_cell(0, 1), "B");
}

#[test]
fn row_height_sums_child_heights_for_the_container() {
    let (data, events) = (sample_data(), Events::default());
    let options = options_for(&data, &events)
        .with_group_row_height(|_| 50)
        .with_child_row_height(|child, _| 10 + child as u32 * 10);
    let mut list = ExpandableList::new(options);
    list.toggle_group(0);

    assert_eq!(list.row_height(0), 50);
    assert_eq!(list.row_height(1), 10 + 20);
    assert_eq!(list.row_height(2), 50);
}

#[test]
fn row_height_defaults_to_44_units() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(0);
    assert_eq!(list.row_height(0), DEFAULT_GROUP_ROW_HEIGHT);
    assert_eq!(list.row_height(1), 2 * DEFAULT_CHILD_ROW_HEIGHT);
}

#[test]
fn can_edit_row_aggregates_group_and_child_affordances() {
    let (data, events) = (sample_data(), Events::default());
    let options = options_for(&data, &events)
        .with_can_delete_group(|g| g == 0)
        .with_can_move_child(|_, g| g == 1);
    let list = ExpandableList::new(options);

    assert!(list.can_edit_row(0)); // deletable group
    assert!(list.can_edit_row(1)); // movable children
    assert!(!list.can_edit_row(2)); // nothing editable
    assert!(list.can_delete_row(0));
    assert!(!list.can_delete_row(1));
}

#[test]
fn can_move_row_rejects_child_rows() {
    let (data, events) = (sample_data(), Events::default());
    let options = options_for(&data, &events).with_can_move_group(|_| true);
    let mut list = ExpandableList::new(options);
    list.toggle_group(0);

    assert!(list.can_move_row(0));
    assert!(!list.can_move_row(1)); // child container of group 0
    assert!(list.can_move_row(2));

    assert_eq!(list.target_row_for_move(0, 2), 2);
    assert_eq!(list.target_row_for_move(0, 1), 0); // child row: fall back
}

#[test]
fn select_row_toggles_only_expandable_groups() {
    let (data, events) = (sample_data(), Events::default());
    let options = options_for(&data, &events).with_group_expandable(|g| g != 2);
    let mut list = ExpandableList::new(options);

    list.select_row(0);
    assert_eq!(list.row_count(), 4);
    assert_eq!(events.lock().unwrap().as_slice(), &["select_group(0)"]);

    // Group 2 (row 3 now) reports the selection but stays collapsed.
    list.select_row(3);
    assert_eq!(list.row_count(), 4);
    assert_eq!(
        events.lock().unwrap().as_slice(),
        &["select_group(0)", "select_group(2)"]
    );

    // Taps on the child container resolve through the nested list instead.
    list.select_row(1);
    assert_eq!(events.lock().unwrap().len(), 2);

    list.select_child(0, 1);
    assert_eq!(events.lock().unwrap().last().unwrap(), "select_child(1,0)");
}

#[test]
fn delete_child_forwards_and_redraws_the_container() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(1);
    list.drain_edits(|_| {});

    list.delete_child(1, 0);
    assert_eq!(events.lock().unwrap().as_slice(), &["delete_child(0,1)"]);
    assert_eq!(
        list.pending_edits(),
        &[RowEdit::RedrawRow {
            row: 2,
            animated: true
        }]
    );

    list.drain_edits(|_| {});
    list.move_child(1, 1, 0);
    assert_eq!(events.lock().unwrap().last().unwrap(), "move_child(1,0,1)");
    assert!(list.pending_edits().is_empty());
}

#[test]
fn set_options_reloads_against_the_new_collaborator() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(0);
    list.drain_edits(|_| {});

    let smaller: Data = Arc::new(Mutex::new(vec![(
        "Only".to_string(),
        vec!["x".to_string()],
    )]));
    list.set_options(options_for(&smaller, &events));
    assert_eq!(list.group_count(), 1);
    assert_eq!(list.expansion().as_slice(), &[true]);
    assert_eq!(list.pending_edits(), &[RowEdit::Reload { animated: false }]);
}

// --- drag shifts ----------------------------------------------------------

#[test]
fn drag_shift_down_across_collapsed_groups() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);

    let shift = list.drag_shift(0, 1);
    assert_eq!(shift.group_move, (0, 1));
    assert_eq!(shift.child_move, None);
    assert_eq!(shift.new_source_row, 1);
    assert_eq!(events.lock().unwrap().as_slice(), &["move_group(0,1)"]);
}

#[test]
fn drag_shift_down_past_an_expanded_destination() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(1);
    list.drain_edits(|_| {});
    assert_eq!(list.expansion().as_slice(), &[false, true, false]);

    // Dragging group 0 down onto group 1's row: the destination group is
    // expanded, so the insertion point shifts one past its child row.
    let shift = list.drag_shift(0, 1);
    assert_eq!(shift.group_move, (0, 2));
    assert_eq!(shift.child_move, None);
    assert_eq!(shift.new_source_row, 2);
    assert_eq!(list.expansion().as_slice(), &[true, false, false]);
    assert_eq!(events.lock().unwrap().as_slice(), &["move_group(0,1)"]);
}

#[test]
fn drag_shift_down_carries_the_expanded_source_child() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(0);
    list.drain_edits(|_| {});

    // Rows: [G0, C0, G1, G2]; drag G0 down onto G1's row.
    let shift = list.drag_shift(0, 2);
    assert_eq!(shift.group_move, (0, 2));
    assert_eq!(shift.child_move, Some((0, 2)));
    assert_eq!(shift.new_source_row, 1);
    assert_eq!(list.expansion().as_slice(), &[false, true, false]);
    assert_eq!(events.lock().unwrap().as_slice(), &["move_group(0,1)"]);
}

#[test]
fn drag_shift_up_carries_the_expanded_source_child() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(list.row_for_group(2));
    list.drain_edits(|_| {});

    // Rows: [G0, G1, G2, C2]; drag G2 up onto G0's row.
    let shift = list.drag_shift(2, 0);
    assert_eq!(shift.group_move, (2, 0));
    assert_eq!(shift.child_move, Some((3, 1)));
    assert_eq!(shift.new_source_row, 0);
    assert_eq!(list.expansion().as_slice(), &[true, false, false]);
    assert_eq!(events.lock().unwrap().as_slice(), &["move_group(2,0)"]);
}

#[test]
fn drag_shift_keeps_translation_consistent() {
    let (data, events) = (sample_data(), Events::default());
    let mut list = list_for(&data, &events);
    list.toggle_group(0);
    list.drain_edits(|_| {});

    let shift = list.drag_shift(0, 2);
    let _ = shift;
    assert_translation_matches_reference(list.expansion());
    assert_eq!(list.row_count(), 4);
}
