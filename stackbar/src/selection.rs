use log::trace;

use crate::item::{ItemKey, ItemState};
use crate::registry::ItemRegistry;

/// Keeps at most one item selected across the stack and the strip.
///
/// Selection is independent of placement: a collapsed item stays selected
/// and is highlighted in the strip instead of the stack. Excluded items can
/// never hold the selection.
#[derive(Debug, Default)]
pub(crate) struct Selection {
    current: Option<ItemKey>,
}

impl Selection {
    pub(crate) fn current(&self) -> Option<&ItemKey> {
        self.current.as_ref()
    }

    /// Select `key`, clearing the previous selection first.
    ///
    /// Returns `true` when the selection changed.
    pub(crate) fn select(
        &mut self,
        registry: &mut ItemRegistry,
        key: &ItemKey,
    ) -> bool {
        let Some(position) = registry.position(key) else {
            return false;
        };
        if registry.at(position).map(|item| item.state())
            == Some(ItemState::Excluded)
        {
            return false;
        }
        if self.current.as_ref() == Some(key) {
            return false;
        }

        self.clear_flag(registry);
        registry.set_selected(position, true);
        self.current = Some(key.clone());
        trace!("selection -> {key}");
        true
    }

    /// Clear the selection. Returns `true` when something was selected.
    pub(crate) fn deselect_all(&mut self, registry: &mut ItemRegistry) -> bool {
        if self.current.is_none() {
            return false;
        }

        self.clear_flag(registry);
        trace!("selection cleared");
        true
    }

    /// Drop the selection if it is `key`.
    pub(crate) fn release(
        &mut self,
        registry: &mut ItemRegistry,
        key: &ItemKey,
    ) -> bool {
        if self.current.as_ref() != Some(key) {
            return false;
        }

        self.deselect_all(registry)
    }

    /// Forget the selection without touching the registry, for items that
    /// were already removed from it.
    pub(crate) fn forget(&mut self, key: &ItemKey) -> bool {
        if self.current.as_ref() != Some(key) {
            return false;
        }

        self.current = None;
        true
    }

    fn clear_flag(&mut self, registry: &mut ItemRegistry) {
        if let Some(previous) = self.current.take() {
            if let Some(position) = registry.position(&previous) {
                registry.set_selected(position, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::item::{ItemContent, ItemKey, ItemState};
    use crate::registry::ItemRegistry;

    fn registry_with(keys: &[&str]) -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        for key in keys {
            registry
                .add(ItemKey::from(*key), ItemContent::new(*key))
                .expect("fresh key should be accepted");
        }
        registry
    }

    fn selected_keys(registry: &ItemRegistry) -> Vec<&str> {
        registry
            .iter()
            .filter(|item| item.is_selected())
            .map(|item| item.key().as_str())
            .collect()
    }

    #[test]
    fn given_previous_selection_when_selecting_other_then_only_new_is_selected()
    {
        let mut registry = registry_with(&["a", "b", "c"]);
        let mut selection = Selection::default();

        assert!(selection.select(&mut registry, &ItemKey::from("a")));
        assert!(selection.select(&mut registry, &ItemKey::from("c")));

        assert_eq!(selected_keys(&registry), vec!["c"]);
        assert_eq!(selection.current().map(ItemKey::as_str), Some("c"));
    }

    #[test]
    fn given_selected_item_when_selected_again_then_nothing_changes() {
        let mut registry = registry_with(&["a"]);
        let mut selection = Selection::default();
        selection.select(&mut registry, &ItemKey::from("a"));

        assert!(!selection.select(&mut registry, &ItemKey::from("a")));
        assert_eq!(selected_keys(&registry), vec!["a"]);
    }

    #[test]
    fn given_collapsed_item_when_selected_then_selection_is_accepted() {
        let mut registry = registry_with(&["a", "b"]);
        registry.set_state(1, ItemState::Collapsed);
        let mut selection = Selection::default();

        assert!(selection.select(&mut registry, &ItemKey::from("b")));
        assert_eq!(selected_keys(&registry), vec!["b"]);
    }

    #[test]
    fn given_excluded_item_when_selected_then_selection_is_rejected() {
        let mut registry = registry_with(&["a", "b"]);
        registry.set_state(1, ItemState::Excluded);
        let mut selection = Selection::default();

        assert!(!selection.select(&mut registry, &ItemKey::from("b")));
        assert!(selection.current().is_none());
    }

    #[test]
    fn given_selection_when_released_for_other_key_then_it_is_kept() {
        let mut registry = registry_with(&["a", "b"]);
        let mut selection = Selection::default();
        selection.select(&mut registry, &ItemKey::from("a"));

        assert!(!selection.release(&mut registry, &ItemKey::from("b")));
        assert!(selection.release(&mut registry, &ItemKey::from("a")));
        assert!(selected_keys(&registry).is_empty());
    }

    #[test]
    fn given_no_selection_when_deselecting_then_reports_no_change() {
        let mut registry = registry_with(&["a"]);
        let mut selection = Selection::default();

        assert!(!selection.deselect_all(&mut registry));
    }
}
