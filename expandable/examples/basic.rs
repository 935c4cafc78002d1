// Example: minimal expandable list over in-memory data.
use std::sync::{Arc, Mutex};

use expandable::{ExpandableList, ExpandableOptions, RowCell};

fn main() {
    let data = Arc::new(Mutex::new(vec![
        ("Fruit".to_string(), vec!["Apple".to_string(), "Banana".to_string()]),
        ("Vegetables".to_string(), vec!["Carrot".to_string()]),
        ("Grains".to_string(), vec!["Rice".to_string(), "Oats".to_string()]),
    ]));

    let (d1, d2, d3, d4) = (data.clone(), data.clone(), data.clone(), data.clone());
    let options = ExpandableOptions::new(
        move || d1.lock().unwrap().len(),
        move |g| d2.lock().unwrap()[g].1.len(),
        move |g| d3.lock().unwrap()[g].0.clone(),
        move |c, g| d4.lock().unwrap()[g].1[c].clone(),
    );
    let mut list = ExpandableList::new(options);

    list.toggle_group(0);
    list.drain_edits(|edit| println!("edit: {edit:?}"));

    // Render the flat row sequence the way a host would.
    for row in 0..list.row_count() {
        match list.row_cell(row) {
            RowCell::Group(cell) => {
                let marker = if cell.expanded { "v" } else { ">" };
                println!("{row}: {marker} {}", cell.cell);
            }
            RowCell::ChildList(cell) => {
                for child in 0..cell.child_count {
                    println!("{row}:     - {}", list.child_cell(cell.group_index, child));
                }
            }
        }
    }
    println!("visible rows: {}", list.row_count());
}
