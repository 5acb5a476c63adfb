//! Toolkit-neutral model of the overflow menu opened from the strip.

use crate::item::ItemKey;
use crate::settings::StackLabels;
use crate::transition::VisibilityEngine;

/// What picking a menu entry asks the stack to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Bring back the first collapsed item.
    ShowMore,
    /// Collapse the last shown item.
    ShowFewer,
    /// Flip the excluded state of one item.
    Toggle(ItemKey),
    /// Entry contributed by a menu listener; routed back to listeners.
    Custom(String),
}

/// One line of the "add or remove" checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub key: ItemKey,
    pub label: String,
    pub icon: Option<String>,
    /// `false` when the item is excluded.
    pub checked: bool,
}

impl ChecklistEntry {
    pub fn action(&self) -> MenuAction {
        MenuAction::Toggle(self.key.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Action { label: String, action: MenuAction },
    Separator,
    Checklist {
        label: String,
        entries: Vec<ChecklistEntry>,
    },
}

/// Entries of the overflow menu, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverflowMenu {
    entries: Vec<MenuEntry>,
}

impl OverflowMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    pub fn push_action(
        &mut self,
        label: impl Into<String>,
        action: MenuAction,
    ) {
        self.entries.push(MenuEntry::Action {
            label: label.into(),
            action,
        });
    }

    pub fn push_separator(&mut self) {
        self.entries.push(MenuEntry::Separator);
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the entries every overflow menu carries.
    pub(crate) fn push_builtin(
        &mut self,
        engine: &VisibilityEngine,
        labels: &StackLabels,
    ) {
        self.push_action(labels.show_more.clone(), MenuAction::ShowMore);
        self.push_action(labels.show_fewer.clone(), MenuAction::ShowFewer);
        self.push_separator();

        let entries = engine
            .registry()
            .iter()
            .map(|item| ChecklistEntry {
                key: item.key().clone(),
                label: item.label().to_string(),
                icon: item.content().small_icon.clone(),
                checked: !item.is_excluded(),
            })
            .collect();
        self.push(MenuEntry::Checklist {
            label: labels.add_or_remove.clone(),
            entries,
        });
    }
}
