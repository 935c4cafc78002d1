use alloc::sync::Arc;

use crate::list::ExpandableList;
use crate::types::IndicatorPlacement;

/// A hook with no arguments (the group count query).
pub type CountHook = Arc<dyn Fn() -> usize + Send + Sync>;

/// A per-group hook: `f(group_index)`.
pub type GroupHook<T> = Arc<dyn Fn(usize) -> T + Send + Sync>;

/// A per-child hook: `f(child_index, group_index)`.
pub type ChildHook<T> = Arc<dyn Fn(usize, usize) -> T + Send + Sync>;

/// A group-level command: `f(group_index)`.
pub type GroupCommand = Arc<dyn Fn(usize) + Send + Sync>;

/// A child-level command: `f(child_index, group_index)`.
pub type ChildCommand = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// A group move command: `f(source_group, destination_group)`.
pub type MoveGroupCommand = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// A child move command: `f(source_child, destination_child, group_index)`.
pub type MoveChildCommand = Arc<dyn Fn(usize, usize, usize) + Send + Sync>;

/// A callback fired when the list's state changes.
pub type OnChangeCallback<C> = Arc<dyn Fn(&ExpandableList<C>) + Send + Sync>;

/// The data collaborator for [`ExpandableList`].
///
/// `C` is whatever the host renders a cell with (a widget handle, a view
/// model, a string). The four required hooks describe the two-level data;
/// every optional hook has a documented default, so a minimal collaborator
/// is just the constructor call.
///
/// This type is designed to be cheap to clone: hooks are stored in `Arc`s so
/// adapters can tweak a few fields and call
/// [`ExpandableList::set_options`] without reallocating closures.
pub struct ExpandableOptions<C> {
    /// Current number of groups. Must be stable between reloads.
    pub group_count: CountHook,
    /// Number of children in a group.
    pub child_count: GroupHook<usize>,
    /// Renderable cell for a group row.
    pub group_cell: GroupHook<C>,
    /// Renderable cell for one child: `f(child_index, group_index)`.
    pub child_cell: ChildHook<C>,

    /// Group row height. Default: [`crate::DEFAULT_GROUP_ROW_HEIGHT`].
    pub group_row_height: Option<GroupHook<u32>>,
    /// Single child row height. Default: [`crate::DEFAULT_CHILD_ROW_HEIGHT`].
    pub child_row_height: Option<ChildHook<u32>>,

    /// Whether a group can be reordered. Default: `false`.
    pub can_move_group: Option<GroupHook<bool>>,
    /// Whether a group can be deleted. Default: `false`.
    pub can_delete_group: Option<GroupHook<bool>>,
    /// Whether a child can be reordered inside its group. Default: `false`.
    pub can_move_child: Option<ChildHook<bool>>,
    /// Whether a child can be deleted. Default: `false`.
    pub can_delete_child: Option<ChildHook<bool>>,
    /// Whether a group expands at all. Default: `true`. A non-expandable
    /// group renders without an indicator and ignores selection toggles.
    pub group_expandable: Option<GroupHook<bool>>,

    /// Apply a group reorder to the backing store.
    pub on_move_group: Option<MoveGroupCommand>,
    /// Apply a group deletion to the backing store.
    pub on_delete_group: Option<GroupCommand>,
    /// Apply a child reorder to the backing store.
    pub on_move_child: Option<MoveChildCommand>,
    /// Apply a child deletion to the backing store.
    pub on_delete_child: Option<ChildCommand>,

    /// Notification: a group row was selected.
    pub on_select_group: Option<GroupCommand>,
    /// Notification: a child row was selected.
    pub on_select_child: Option<ChildCommand>,

    /// Which side group rows show the expand indicator on.
    pub indicator_placement: IndicatorPlacement,
    /// Custom indicator glyph cell. Default: the host's built-in chevron.
    pub indicator_glyph: Option<Arc<dyn Fn() -> C + Send + Sync>>,
    /// Accessory cell for a group row. Default: none.
    pub group_accessory: Option<GroupHook<Option<C>>>,
    /// Accessory cell for a child row. Default: none.
    pub child_accessory: Option<ChildHook<Option<C>>>,

    /// Optional callback fired (batched) after every state mutation.
    pub on_change: Option<OnChangeCallback<C>>,
}

impl<C> ExpandableOptions<C> {
    /// Creates options from the four required hooks; every optional hook
    /// starts at its documented default.
    pub fn new(
        group_count: impl Fn() -> usize + Send + Sync + 'static,
        child_count: impl Fn(usize) -> usize + Send + Sync + 'static,
        group_cell: impl Fn(usize) -> C + Send + Sync + 'static,
        child_cell: impl Fn(usize, usize) -> C + Send + Sync + 'static,
    ) -> Self {
        Self {
            group_count: Arc::new(group_count),
            child_count: Arc::new(child_count),
            group_cell: Arc::new(group_cell),
            child_cell: Arc::new(child_cell),
            group_row_height: None,
            child_row_height: None,
            can_move_group: None,
            can_delete_group: None,
            can_move_child: None,
            can_delete_child: None,
            group_expandable: None,
            on_move_group: None,
            on_delete_group: None,
            on_move_child: None,
            on_delete_child: None,
            on_select_group: None,
            on_select_child: None,
            indicator_placement: IndicatorPlacement::Left,
            indicator_glyph: None,
            group_accessory: None,
            child_accessory: None,
            on_change: None,
        }
    }

    pub fn with_group_row_height(
        mut self,
        f: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.group_row_height = Some(Arc::new(f));
        self
    }

    pub fn with_child_row_height(
        mut self,
        f: impl Fn(usize, usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.child_row_height = Some(Arc::new(f));
        self
    }

    pub fn with_can_move_group(
        mut self,
        f: impl Fn(usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.can_move_group = Some(Arc::new(f));
        self
    }

    pub fn with_can_delete_group(
        mut self,
        f: impl Fn(usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.can_delete_group = Some(Arc::new(f));
        self
    }

    pub fn with_can_move_child(
        mut self,
        f: impl Fn(usize, usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.can_move_child = Some(Arc::new(f));
        self
    }

    pub fn with_can_delete_child(
        mut self,
        f: impl Fn(usize, usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.can_delete_child = Some(Arc::new(f));
        self
    }

    pub fn with_group_expandable(
        mut self,
        f: impl Fn(usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.group_expandable = Some(Arc::new(f));
        self
    }

    pub fn with_on_move_group(
        mut self,
        f: impl Fn(usize, usize) + Send + Sync + 'static,
    ) -> Self {
        self.on_move_group = Some(Arc::new(f));
        self
    }

    pub fn with_on_delete_group(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_delete_group = Some(Arc::new(f));
        self
    }

    pub fn with_on_move_child(
        mut self,
        f: impl Fn(usize, usize, usize) + Send + Sync + 'static,
    ) -> Self {
        self.on_move_child = Some(Arc::new(f));
        self
    }

    pub fn with_on_delete_child(
        mut self,
        f: impl Fn(usize, usize) + Send + Sync + 'static,
    ) -> Self {
        self.on_delete_child = Some(Arc::new(f));
        self
    }

    pub fn with_on_select_group(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_select_group = Some(Arc::new(f));
        self
    }

    pub fn with_on_select_child(
        mut self,
        f: impl Fn(usize, usize) + Send + Sync + 'static,
    ) -> Self {
        self.on_select_child = Some(Arc::new(f));
        self
    }

    pub fn with_indicator_placement(mut self, placement: IndicatorPlacement) -> Self {
        self.indicator_placement = placement;
        self
    }

    pub fn with_indicator_glyph(mut self, f: impl Fn() -> C + Send + Sync + 'static) -> Self {
        self.indicator_glyph = Some(Arc::new(f));
        self
    }

    pub fn with_group_accessory(
        mut self,
        f: impl Fn(usize) -> Option<C> + Send + Sync + 'static,
    ) -> Self {
        self.group_accessory = Some(Arc::new(f));
        self
    }

    pub fn with_child_accessory(
        mut self,
        f: impl Fn(usize, usize) -> Option<C> + Send + Sync + 'static,
    ) -> Self {
        self.child_accessory = Some(Arc::new(f));
        self
    }

    pub fn with_on_change(
        mut self,
        f: impl Fn(&ExpandableList<C>) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }
}

impl<C> Clone for ExpandableOptions<C> {
    fn clone(&self) -> Self {
        Self {
            group_count: Arc::clone(&self.group_count),
            child_count: Arc::clone(&self.child_count),
            group_cell: Arc::clone(&self.group_cell),
            child_cell: Arc::clone(&self.child_cell),
            group_row_height: self.group_row_height.clone(),
            child_row_height: self.child_row_height.clone(),
            can_move_group: self.can_move_group.clone(),
            can_delete_group: self.can_delete_group.clone(),
            can_move_child: self.can_move_child.clone(),
            can_delete_child: self.can_delete_child.clone(),
            group_expandable: self.group_expandable.clone(),
            on_move_group: self.on_move_group.clone(),
            on_delete_group: self.on_delete_group.clone(),
            on_move_child: self.on_move_child.clone(),
            on_delete_child: self.on_delete_child.clone(),
            on_select_group: self.on_select_group.clone(),
            on_select_child: self.on_select_child.clone(),
            indicator_placement: self.indicator_placement,
            indicator_glyph: self.indicator_glyph.clone(),
            group_accessory: self.group_accessory.clone(),
            child_accessory: self.child_accessory.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<C> core::fmt::Debug for ExpandableOptions<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExpandableOptions")
            .field("indicator_placement", &self.indicator_placement)
            .field("has_on_move_group", &self.on_move_group.is_some())
            .field("has_on_delete_group", &self.on_delete_group.is_some())
            .field("has_on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}
