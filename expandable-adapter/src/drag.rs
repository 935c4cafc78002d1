use alloc::vec::Vec;

use expandable::{ExpandableList, ExpandableOptions};

use crate::fade::{Easing, Fade};
use crate::geometry;

/// How long the row snapshot fades after a drop, in milliseconds.
pub const SNAPSHOT_FADE_MS: u64 = 100;

/// Where an active drag session currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragPhase {
    /// Gripped but the pointer has not crossed another group row yet.
    Gripped,
    /// The pointer is moving; crossings reorder as they happen.
    Dragging,
    /// Dropped; the snapshot is fading out.
    Settling,
}

/// State held only while a reorder gesture is active. Created on grip,
/// destroyed when the post-drop fade finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragSession {
    /// Current row of the dragged group (updated on every crossing).
    pub source_row: usize,
    /// Pointer distance from the gripped row's origin at grip time.
    pub grip_offset: i64,
    pub phase: DragPhase,
}

/// A presentation command queued for the host while a drag is in flight.
///
/// Apply in emission order, like the core crate's row edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragEffect {
    /// Capture one composite snapshot of the gripped group row (plus its
    /// child-container row when present), hide the live rows, and show the
    /// snapshot at `origin`. `height` is the composite height.
    Grip {
        group_row: usize,
        child_row: Option<usize>,
        origin: u64,
        height: u32,
    },
    /// Reposition the snapshot so its origin tracks the pointer.
    SnapshotMoved { origin: i64 },
    /// Apply the visible-row moves of one crossing. The expansion vector
    /// and the collaborator's backing store were already updated.
    RowsMoved {
        group: (usize, usize),
        child: Option<(usize, usize)>,
    },
    /// Un-hide the live rows and fade the snapshot out.
    Drop {
        group_row: usize,
        child_row: Option<usize>,
    },
}

/// The drag-reorder engine: a gesture-level state machine layered on an
/// [`ExpandableList`].
///
/// States: Idle → Gripped → Dragging → Settling → Idle. The host feeds it
/// pointer positions on the list's main axis and drains [`DragEffect`]s to
/// run its presentation; crossings mutate the list (expansion swap,
/// collaborator notification) through
/// [`ExpandableList::drag_shift`] as they happen, and are never rolled
/// back — a cancelled gesture keeps the reorders applied so far and ends
/// through the same drop path.
///
/// One engine instance per list instance: the session is an instance
/// field, so multiple expandable lists never share drag state.
#[derive(Clone, Debug)]
pub struct DragController<C> {
    list: ExpandableList<C>,
    session: Option<DragSession>,
    fade: Option<Fade>,
    effects: Vec<DragEffect>,
}

impl<C> DragController<C> {
    pub fn new(options: ExpandableOptions<C>) -> Self {
        Self::from_list(ExpandableList::new(options))
    }

    pub fn from_list(list: ExpandableList<C>) -> Self {
        Self {
            list,
            session: None,
            fade: None,
            effects: Vec::new(),
        }
    }

    pub fn list(&self) -> &ExpandableList<C> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ExpandableList<C> {
        &mut self.list
    }

    pub fn into_list(self) -> ExpandableList<C> {
        self.list
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    /// The queued presentation commands, oldest first.
    pub fn pending_effects(&self) -> &[DragEffect] {
        &self.effects
    }

    /// Drains the queued presentation commands in order, without
    /// allocating.
    pub fn drain_effects(&mut self, mut f: impl FnMut(DragEffect)) {
        for effect in self.effects.drain(..) {
            f(effect);
        }
    }

    /// Starts a drag at a group row: Idle → Gripped.
    ///
    /// Queues [`DragEffect::Grip`] with the composite snapshot extent (the
    /// child-container row travels with an expanded group) and remembers
    /// the pointer-to-row-origin offset.
    ///
    /// # Panics
    ///
    /// Panics when a session is already active, or when `row` is out of
    /// range, a child row, or not movable.
    pub fn grip(&mut self, row: usize, pointer_main: i64) {
        assert!(
            self.session.is_none(),
            "grip while a drag session is active"
        );
        assert!(
            self.list.can_move_row(row),
            "grip on an immovable row (row={row})"
        );

        let group_index = self.list.group_for_row(row);
        let child_row = self
            .list
            .expansion()
            .is_expanded(group_index)
            .then(|| row + 1);
        let origin = geometry::row_origin(&self.list, row);
        let mut height = self.list.row_height(row);
        if let Some(child) = child_row {
            height = height.saturating_add(self.list.row_height(child));
        }

        self.effects.push(DragEffect::Grip {
            group_row: row,
            child_row,
            origin,
            height,
        });
        self.session = Some(DragSession {
            source_row: row,
            grip_offset: pointer_main - origin as i64,
            phase: DragPhase::Gripped,
        });
    }

    /// Tracks pointer movement: repositions the snapshot and, when the
    /// pointer resolves to a *different group row* than the current
    /// source, applies one reorder crossing. Child rows are never drop
    /// targets; pointer positions past the last row move the snapshot but
    /// swap nothing.
    ///
    /// Ignored while Idle or Settling.
    pub fn drag_to(&mut self, pointer_main: i64) {
        let Some(session) = self.session else {
            return;
        };
        if session.phase == DragPhase::Settling {
            return;
        }

        self.effects.push(DragEffect::SnapshotMoved {
            origin: pointer_main - session.grip_offset,
        });

        let mut source_row = session.source_row;
        if let Some(hover) = geometry::row_at_point(&self.list, pointer_main) {
            if hover != source_row && !self.list.is_child_row(hover) {
                let shift = self.list.drag_shift(source_row, hover);
                self.effects.push(DragEffect::RowsMoved {
                    group: shift.group_move,
                    child: shift.child_move,
                });
                source_row = shift.new_source_row;
            }
        }

        self.session = Some(DragSession {
            source_row,
            grip_offset: session.grip_offset,
            phase: DragPhase::Dragging,
        });
    }

    /// Ends the gesture: queues [`DragEffect::Drop`] and starts the
    /// snapshot fade. A gesture that never found a drop row ends the same
    /// way — there is no abandoned-session state.
    ///
    /// Ignored while Idle or already Settling.
    pub fn release(&mut self, now_ms: u64) {
        let Some(session) = self.session else {
            return;
        };
        if session.phase == DragPhase::Settling {
            return;
        }

        let group_index = self.list.group_for_row(session.source_row);
        let child_row = self
            .list
            .expansion()
            .is_expanded(group_index)
            .then(|| session.source_row + 1);
        self.effects.push(DragEffect::Drop {
            group_row: session.source_row,
            child_row,
        });
        self.fade = Some(Fade::new(1.0, 0.0, now_ms, SNAPSHOT_FADE_MS, Easing::Linear));
        self.session = Some(DragSession {
            phase: DragPhase::Settling,
            ..session
        });
    }

    /// Advances the post-drop fade.
    ///
    /// Returns the snapshot alpha while settling; when the fade completes
    /// the whole session is discarded and later calls return `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let fade = self.fade?;
        let alpha = fade.sample(now_ms);
        if fade.is_done(now_ms) {
            self.fade = None;
            self.session = None;
        }
        Some(alpha)
    }
}
