use std::fmt;

use serde::Serialize;

/// Caller-chosen identity of an item in the stack.
///
/// Keys are stable for the whole lifetime of an item, unlike
/// [`Item::index`] which shifts whenever an earlier item is removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Where an item currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ItemState {
    /// Occupies a row in the vertical stack.
    #[default]
    Shown,
    /// Pushed out of the stack into the overflow strip.
    Collapsed,
    /// Removed from both the stack and the strip by the user.
    Excluded,
}

/// Presentation payload carried by an item.
///
/// The engine never inspects it; icons are names resolved by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemContent {
    pub label: String,
    pub tooltip: Option<String>,
    pub large_icon: Option<String>,
    pub small_icon: Option<String>,
}

impl ItemContent {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn large_icon(mut self, icon: impl Into<String>) -> Self {
        self.large_icon = Some(icon.into());
        self
    }

    pub fn small_icon(mut self, icon: impl Into<String>) -> Self {
        self.small_icon = Some(icon.into());
        self
    }
}

/// One selectable entry of the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    key: ItemKey,
    index: usize,
    content: ItemContent,
    state: ItemState,
    selected: bool,
}

impl Item {
    pub(crate) fn new(
        key: ItemKey,
        index: usize,
        content: ItemContent,
    ) -> Self {
        Self {
            key,
            index,
            content,
            state: ItemState::Shown,
            selected: false,
        }
    }

    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Zero-based position in creation order, kept dense by the registry.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn content(&self) -> &ItemContent {
        &self.content
    }

    pub fn label(&self) -> &str {
        &self.content.label
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_shown(&self) -> bool {
        self.state == ItemState::Shown
    }

    pub fn is_collapsed(&self) -> bool {
        self.state == ItemState::Collapsed
    }

    pub fn is_excluded(&self) -> bool {
        self.state == ItemState::Excluded
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn set_state(&mut self, state: ItemState) {
        self.state = state;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
