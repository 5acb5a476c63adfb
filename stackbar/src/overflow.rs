//! Presentation-ordered set of collapsed items.

use crate::item::{Item, ItemKey};
use crate::registry::ItemRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StripEntry {
    key: ItemKey,
    index: usize,
}

/// Items pushed out of the stack, always ordered by ascending item index.
///
/// Membership is independent of the registry and kept in sync by the
/// visibility engine. Items may be collapsed in any order (back to front by
/// resize pressure, arbitrarily by explicit calls) but the strip always
/// reads in the order the items had in the stack.
#[derive(Debug, Default)]
pub struct OverflowStrip {
    entries: Vec<StripEntry>,
}

impl OverflowStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item` to the strip. Returns `false` when it is already a member.
    pub fn insert(&mut self, item: &Item) -> bool {
        if self.is_member(item.key()) {
            return false;
        }

        self.entries.push(StripEntry {
            key: item.key().clone(),
            index: item.index(),
        });
        self.order();
        true
    }

    /// Drop `key` from the strip. Returns `false` when it was not a member.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.key != key);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_member(&self, key: &ItemKey) -> bool {
        self.entries.iter().any(|entry| &entry.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Member keys, ascending by item index.
    pub fn members(
        &self,
    ) -> impl DoubleEndedIterator<Item = &ItemKey> + ExactSizeIterator + '_
    {
        self.entries.iter().map(|entry| &entry.key)
    }

    /// Refresh cached indices after the registry renumbered its items.
    ///
    /// Members no longer present in the registry are dropped.
    pub(crate) fn reindex(&mut self, registry: &ItemRegistry) {
        self.entries.retain_mut(|entry| match registry.position(&entry.key) {
            Some(position) => {
                entry.index = position;
                true
            },
            None => false,
        });
        self.order();
    }

    fn order(&mut self) {
        self.entries.sort_by_key(|entry| entry.index);
    }
}

#[cfg(test)]
mod tests {
    use super::OverflowStrip;
    use crate::item::{ItemContent, ItemKey};
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

    fn member_keys(strip: &OverflowStrip) -> Vec<&str> {
        strip.members().map(ItemKey::as_str).collect()
    }

    fn item<'a>(registry: &'a ItemRegistry, key: &str) -> &'a crate::Item {
        registry
            .get(&ItemKey::from(key))
            .expect("item should be registered")
    }

    #[test]
    fn given_out_of_order_inserts_when_listed_then_members_follow_item_order() {
        let registry = registry_with(&["a", "b", "c", "d", "e"]);
        let mut strip = OverflowStrip::new();

        strip.insert(item(&registry, "e"));
        strip.insert(item(&registry, "b"));
        strip.insert(item(&registry, "d"));

        assert_eq!(member_keys(&strip), vec!["b", "d", "e"]);
    }

    #[test]
    fn given_existing_member_when_inserted_again_then_it_is_kept_once() {
        let registry = registry_with(&["a", "b"]);
        let mut strip = OverflowStrip::new();

        assert!(strip.insert(item(&registry, "b")));
        assert!(!strip.insert(item(&registry, "b")));

        assert_eq!(strip.len(), 1);
    }

    #[test]
    fn given_non_member_when_removed_then_nothing_changes() {
        let registry = registry_with(&["a", "b"]);
        let mut strip = OverflowStrip::new();
        strip.insert(item(&registry, "a"));

        assert!(!strip.remove(&ItemKey::from("b")));
        assert!(strip.remove(&ItemKey::from("a")));
        assert!(strip.is_empty());
    }

    #[test]
    fn given_registry_renumbered_when_reindexed_then_order_and_membership_hold()
    {
        let mut registry = registry_with(&["a", "b", "c", "d"]);
        let mut strip = OverflowStrip::new();
        strip.insert(item(&registry, "d"));
        strip.insert(item(&registry, "b"));

        registry
            .remove(&ItemKey::from("b"))
            .expect("registered key should be removable");
        strip.reindex(&registry);

        assert_eq!(member_keys(&strip), vec!["d"]);
        assert!(!strip.is_member(&ItemKey::from("b")));
    }
}
