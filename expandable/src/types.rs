/// Default height of a group row, in host units.
pub const DEFAULT_GROUP_ROW_HEIGHT: u32 = 44;
/// Default height of a single child row, in host units.
pub const DEFAULT_CHILD_ROW_HEIGHT: u32 = 44;

/// The logical address a visible row resolves to.
///
/// A child address implies the child-container row directly follows its
/// group's row in visible order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowAddress {
    pub group_index: usize,
    pub is_child: bool,
}

/// Which side of a group row the expand indicator sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndicatorPlacement {
    #[default]
    Left,
    Right,
}

/// A visible-row mutation command issued to the rendering surface.
///
/// Commands must be applied strictly in emission order. `MoveRow` means
/// remove-then-reinsert: indices in later commands are interpreted against
/// the row layout after every earlier command has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowEdit {
    InsertRow { row: usize, animated: bool },
    DeleteRow { row: usize, animated: bool },
    MoveRow { from: usize, to: usize },
    RedrawRow { row: usize, animated: bool },
    /// Update the expand/collapse indicator on a group row.
    UpdateIndicator {
        row: usize,
        expanded: bool,
        animated: bool,
    },
    /// Re-render every visible row.
    Reload { animated: bool },
}

/// Content of one visible row, as answered to the rendering surface.
#[derive(Clone, Debug)]
pub enum RowCell<C> {
    Group(GroupRowCell<C>),
    ChildList(ChildListCell),
}

/// A group row: the collaborator's cell plus everything the host needs to
/// dress it (indicator, accessory, expansion state).
#[derive(Clone, Debug)]
pub struct GroupRowCell<C> {
    pub group_index: usize,
    pub cell: C,
    pub expanded: bool,
    /// `false` hides the indicator; selection will not toggle this group.
    pub expandable: bool,
    pub indicator_placement: IndicatorPlacement,
    /// `None` means the host draws its built-in chevron glyph.
    pub indicator_glyph: Option<C>,
    pub accessory: Option<C>,
}

/// A child-container row. It hosts the group's nested child list; children
/// are queried individually via
/// [`crate::ExpandableList::child_cell`], never flattened into the outer
/// row space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildListCell {
    pub group_index: usize,
    pub child_count: usize,
}

/// The visible-row moves produced by one drag crossing.
///
/// `group_move` relocates the dragged group's row; `child_move` is present
/// when the source group is expanded and its child-container row travels
/// with it. Apply in order, `group_move` first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragShift {
    pub group_move: (usize, usize),
    pub child_move: Option<(usize, usize)>,
    /// Where the dragged group's row sits after the moves.
    pub new_source_row: usize,
}
