use expandable::ExpandableList;

/// Start offset of a visible row in the list's main axis, as the running
/// sum of the row heights before it.
///
/// # Panics
///
/// Panics when `row` is out of range.
pub fn row_origin<C>(list: &ExpandableList<C>, row: usize) -> u64 {
    assert!(
        row < list.row_count(),
        "row out of range (row={row}, visible_row_count={})",
        list.row_count()
    );
    let mut origin = 0u64;
    for r in 0..row {
        origin = origin.saturating_add(list.row_height(r) as u64);
    }
    origin
}

/// Resolves a pointer position on the main axis to the visible row under
/// it.
///
/// Positions above the first row clamp to row 0; positions past the last
/// row's end resolve to `None` (no drop target there), as does an empty
/// list.
pub fn row_at_point<C>(list: &ExpandableList<C>, main: i64) -> Option<usize> {
    if list.row_count() == 0 {
        return None;
    }
    if main < 0 {
        return Some(0);
    }
    let main = main as u64;
    let mut end = 0u64;
    for row in 0..list.row_count() {
        end = end.saturating_add(list.row_height(row) as u64);
        if main < end {
            return Some(row);
        }
    }
    None
}
