use std::sync::{Arc, Mutex};

use expandable_adapter::DragController;

fn main() {
    // Example: simulate a drag-reorder gesture on a three-group list.
    //
    // The adapter flow is typically:
    // 1) grip(row, pointer) when the reorder gesture starts on a group row
    // 2) drag_to(pointer) on every pointer move; drain the effects and
    //    apply them to your rendering surface
    // 3) release(now) on gesture end, then tick(now) each frame until the
    //    snapshot fade finishes
    let data = Arc::new(Mutex::new(vec![
        ("Group 1".to_string(), vec!["A".to_string()]),
        ("Group 2".to_string(), vec!["B".to_string()]),
        ("Group 3".to_string(), vec!["C".to_string()]),
    ]));

    let (d1, d2, d3, d4, d5) = (
        data.clone(),
        data.clone(),
        data.clone(),
        data.clone(),
        data.clone(),
    );
    let options = expandable::ExpandableOptions::new(
        move || d1.lock().unwrap().len(),
        move |g| d2.lock().unwrap()[g].1.len(),
        move |g| d3.lock().unwrap()[g].0.clone(),
        move |c, g| d4.lock().unwrap()[g].1[c].clone(),
    )
    .with_can_move_group(|_| true)
    .with_on_move_group(move |from, to| {
        let group = d5.lock().unwrap().remove(from);
        d5.lock().unwrap().insert(to, group);
    });

    let mut drag = DragController::new(options);

    drag.grip(0, 10);
    for pointer in [30, 60, 100, 150] {
        drag.drag_to(pointer);
    }
    drag.release(1000);
    drag.drain_effects(|effect| println!("effect: {effect:?}"));

    let mut now = 1000;
    while let Some(alpha) = drag.tick(now) {
        println!("snapshot alpha: {alpha:.2}");
        now += 25;
    }

    let order: Vec<String> = data.lock().unwrap().iter().map(|g| g.0.clone()).collect();
    println!("final order: {order:?}");
}
