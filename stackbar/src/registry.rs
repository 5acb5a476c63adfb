//! Ordered collection of stack items.

use std::slice;

use log::trace;

use crate::error::{Result, StackError};
use crate::item::{Item, ItemContent, ItemKey, ItemState};

/// Direction used when scanning the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Lowest index first.
    Forward,
    /// Highest index first.
    Backward,
}

/// Owner of the master item order.
///
/// Item indices always equal their position in the registry; they are
/// re-derived after every structural change.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
    shown: usize,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new item in the [`ItemState::Shown`] state.
    pub fn add(&mut self, key: ItemKey, content: ItemContent) -> Result<&Item> {
        if self.position(&key).is_some() {
            return Err(StackError::DuplicateItem(key));
        }

        trace!("registry add {key}");
        let index = self.items.len();
        self.items.push(Item::new(key, index, content));
        self.shown += 1;
        self.reindex();

        Ok(&self.items[index])
    }

    /// Remove an item regardless of its state and return it.
    pub fn remove(&mut self, key: &ItemKey) -> Result<Item> {
        let Some(position) = self.position(key) else {
            return Err(StackError::UnknownItem(key.clone()));
        };

        trace!("registry remove {key}");
        let item = self.items.remove(position);
        if item.is_shown() {
            self.shown -= 1;
        }
        self.reindex();

        Ok(item)
    }

    /// Remove every item, last one first.
    pub(crate) fn drain_back_to_front(&mut self) -> Vec<Item> {
        self.shown = 0;
        self.items.drain(..).rev().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items currently occupying a stack row.
    pub fn count_shown(&self) -> usize {
        self.shown
    }

    pub fn get(&self, key: &ItemKey) -> Option<&Item> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn at(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn position(&self, key: &ItemKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    /// Items in master order.
    pub fn iter(&self) -> slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Walk the items in the given direction.
    pub fn scan(&self, direction: ScanDirection) -> Scan<'_> {
        Scan {
            items: self.items.iter(),
            direction,
        }
    }

    /// Position of the first item in `state` met when scanning `direction`.
    pub fn find_first(
        &self,
        direction: ScanDirection,
        state: ItemState,
    ) -> Option<usize> {
        self.scan(direction)
            .find(|item| item.state() == state)
            .map(Item::index)
    }

    /// Move the item at `position` to `state`, returning the updated item.
    pub(crate) fn set_state(
        &mut self,
        position: usize,
        state: ItemState,
    ) -> Option<&Item> {
        let item = self.items.get_mut(position)?;
        let was_shown = item.is_shown();
        item.set_state(state);
        match (was_shown, item.is_shown()) {
            (true, false) => self.shown -= 1,
            (false, true) => self.shown += 1,
            _ => {},
        }
        Some(item)
    }

    pub(crate) fn set_selected(&mut self, position: usize, selected: bool) {
        if let Some(item) = self.items.get_mut(position) {
            item.set_selected(selected);
        }
    }

    fn reindex(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_index(index);
        }
    }
}

/// Directional iterator over registry items.
#[derive(Debug, Clone)]
pub struct Scan<'a> {
    items: slice::Iter<'a, Item>,
    direction: ScanDirection,
}

impl<'a> Iterator for Scan<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self.direction {
            ScanDirection::Forward => self.items.next(),
            ScanDirection::Backward => self.items.next_back(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemRegistry, ScanDirection};
    use crate::error::StackError;
    use crate::item::{ItemContent, ItemKey, ItemState};

    fn registry_with(keys: &[&str]) -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        for key in keys {
            registry
                .add(ItemKey::from(*key), ItemContent::new(*key))
                .expect("fresh key should be accepted");
        }
        registry
    }

    fn indices(registry: &ItemRegistry) -> Vec<(String, usize)> {
        registry
            .iter()
            .map(|item| (item.key().to_string(), item.index()))
            .collect()
    }

    #[test]
    fn given_added_items_when_listed_then_indices_match_positions() {
        let registry = registry_with(&["a", "b", "c"]);

        assert_eq!(
            indices(&registry),
            vec![
                (String::from("a"), 0),
                (String::from("b"), 1),
                (String::from("c"), 2)
            ]
        );
        assert_eq!(registry.count_shown(), 3);
    }

    #[test]
    fn given_duplicate_key_when_added_then_error_is_returned() {
        let mut registry = registry_with(&["a"]);

        let result = registry.add(ItemKey::from("a"), ItemContent::new("a"));

        assert!(matches!(result, Err(StackError::DuplicateItem(key)) if key.as_str() == "a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn given_middle_item_removed_when_listed_then_indices_are_dense_again() {
        let mut registry = registry_with(&["a", "b", "c", "d"]);

        let removed = registry
            .remove(&ItemKey::from("b"))
            .expect("registered key should be removable");

        assert_eq!(removed.key().as_str(), "b");
        assert_eq!(
            indices(&registry),
            vec![
                (String::from("a"), 0),
                (String::from("c"), 1),
                (String::from("d"), 2)
            ]
        );
        assert_eq!(registry.count_shown(), 3);
    }

    #[test]
    fn given_unknown_key_when_removed_then_error_is_returned() {
        let mut registry = registry_with(&["a"]);

        let result = registry.remove(&ItemKey::from("zzz"));

        assert!(matches!(result, Err(StackError::UnknownItem(_))));
    }

    #[test]
    fn given_state_changes_when_counted_then_shown_counter_follows() {
        let mut registry = registry_with(&["a", "b", "c"]);

        registry.set_state(1, ItemState::Collapsed);
        registry.set_state(2, ItemState::Excluded);
        assert_eq!(registry.count_shown(), 1);

        registry.set_state(2, ItemState::Collapsed);
        assert_eq!(registry.count_shown(), 1);

        registry.set_state(1, ItemState::Shown);
        assert_eq!(registry.count_shown(), 2);
    }

    #[test]
    fn given_collapsed_item_removed_when_counted_then_shown_counter_is_kept() {
        let mut registry = registry_with(&["a", "b"]);
        registry.set_state(0, ItemState::Collapsed);

        registry
            .remove(&ItemKey::from("a"))
            .expect("registered key should be removable");

        assert_eq!(registry.count_shown(), 1);
    }

    #[test]
    fn given_both_directions_when_scanned_then_orders_are_mirrored() {
        let registry = registry_with(&["a", "b", "c"]);

        let forward: Vec<&str> = registry
            .scan(ScanDirection::Forward)
            .map(|item| item.key().as_str())
            .collect();
        let backward: Vec<&str> = registry
            .scan(ScanDirection::Backward)
            .map(|item| item.key().as_str())
            .collect();

        assert_eq!(forward, vec!["a", "b", "c"]);
        assert_eq!(backward, vec!["c", "b", "a"]);
    }

    #[test]
    fn given_mixed_states_when_finding_first_then_direction_is_respected() {
        let mut registry = registry_with(&["a", "b", "c", "d"]);
        registry.set_state(1, ItemState::Collapsed);
        registry.set_state(3, ItemState::Collapsed);

        assert_eq!(
            registry.find_first(ScanDirection::Forward, ItemState::Collapsed),
            Some(1)
        );
        assert_eq!(
            registry.find_first(ScanDirection::Backward, ItemState::Collapsed),
            Some(3)
        );
        assert_eq!(
            registry.find_first(ScanDirection::Backward, ItemState::Excluded),
            None
        );
    }

    #[test]
    fn given_items_when_drained_then_last_item_comes_first() {
        let mut registry = registry_with(&["a", "b", "c"]);

        let drained: Vec<String> = registry
            .drain_back_to_front()
            .into_iter()
            .map(|item| item.key().to_string())
            .collect();

        assert_eq!(drained, vec!["c", "b", "a"]);
        assert!(registry.is_empty());
        assert_eq!(registry.count_shown(), 0);
    }
}
