//! Visibility state machine for stack items.
//!
//! ```text
//! Shown <-> Collapsed
//! Shown | Collapsed -> Excluded -> Shown
//! ```
//!
//! Every operation is best effort: an item that is not in the required
//! source state, an unknown key, or disabled resizing turns the call into a
//! no-op that returns `false`.

use log::{trace, warn};

use crate::error::Result;
use crate::item::{Item, ItemContent, ItemKey, ItemState};
use crate::overflow::OverflowStrip;
use crate::registry::{ItemRegistry, ScanDirection};
use crate::selection::Selection;

/// Something that can grow or shrink its shown stack one item at a time.
///
/// Resize pressure and drag gestures are expressed against this seam so they
/// can be driven and tested independently of the full engine.
pub trait StepTarget {
    fn count_shown(&self) -> usize;

    /// Collapse the bottom-most shown item.
    fn hide_next(&mut self) -> bool;

    /// Bring back the top-most collapsed item.
    fn show_next(&mut self) -> bool;
}

/// Owner of the item registry, the overflow strip and the selection.
#[derive(Debug)]
pub struct VisibilityEngine {
    registry: ItemRegistry,
    strip: OverflowStrip,
    selection: Selection,
    resizing_enabled: bool,
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl VisibilityEngine {
    pub fn new(resizing_enabled: bool) -> Self {
        Self {
            registry: ItemRegistry::new(),
            strip: OverflowStrip::new(),
            selection: Selection::default(),
            resizing_enabled,
        }
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn strip(&self) -> &OverflowStrip {
        &self.strip
    }

    pub fn item(&self, key: &ItemKey) -> Option<&Item> {
        self.registry.get(key)
    }

    /// Collapsed items in strip order.
    pub fn strip_items(&self) -> Vec<&Item> {
        self.strip
            .members()
            .filter_map(|key| self.registry.get(key))
            .collect()
    }

    pub fn selected(&self) -> Option<&Item> {
        self.selection
            .current()
            .and_then(|key| self.registry.get(key))
    }

    pub fn resizing_enabled(&self) -> bool {
        self.resizing_enabled
    }

    pub fn set_resizing_enabled(&mut self, enabled: bool) {
        self.resizing_enabled = enabled;
    }

    pub fn add(&mut self, key: ItemKey, content: ItemContent) -> Result<&Item> {
        self.registry.add(key, content)
    }

    /// Remove an item, dropping it from the strip and the selection.
    pub fn remove(&mut self, key: &ItemKey) -> Result<Item> {
        let mut removed = self.registry.remove(key)?;
        self.strip.remove(key);
        self.strip.reindex(&self.registry);
        if self.selection.forget(key) {
            removed.set_selected(false);
        }
        Ok(removed)
    }

    /// Remove every item, last one first.
    pub fn remove_all(&mut self) -> Vec<Item> {
        let mut removed = self.registry.drain_back_to_front();
        self.strip.clear();
        if let Some(key) = self.selection.current().cloned() {
            self.selection.forget(&key);
            for item in removed.iter_mut().filter(|item| item.key() == &key) {
                item.set_selected(false);
            }
        }
        removed
    }

    /// Move a shown item into the overflow strip.
    ///
    /// A selected item keeps its selection while collapsed.
    pub fn hide(&mut self, key: &ItemKey) -> bool {
        if !self.resizing_enabled {
            return false;
        }
        let Some(position) = self.lookup(key, "hide") else {
            return false;
        };
        self.collapse_at(position)
    }

    /// Move a collapsed item back into the stack.
    pub fn show(&mut self, key: &ItemKey) -> bool {
        let Some(position) = self.lookup(key, "show") else {
            return false;
        };
        self.expand_at(position)
    }

    /// Hide an item from both the stack and the strip.
    pub fn exclude(&mut self, key: &ItemKey) -> bool {
        let Some(position) = self.lookup(key, "exclude") else {
            return false;
        };
        let state = match self.registry.at(position) {
            Some(item) => item.state(),
            None => return false,
        };

        match state {
            ItemState::Excluded => return false,
            ItemState::Collapsed => {
                self.strip.remove(key);
            },
            ItemState::Shown => {},
        }

        self.registry.set_state(position, ItemState::Excluded);
        self.selection.release(&mut self.registry, key);
        trace!("exclude {key} (was {state:?})");
        true
    }

    /// Return an excluded item to the stack as shown.
    pub fn include(&mut self, key: &ItemKey) -> bool {
        let Some(position) = self.lookup(key, "include") else {
            return false;
        };
        if !self.has_state(position, ItemState::Excluded) {
            return false;
        }

        self.registry.set_state(position, ItemState::Shown);
        trace!("include {key}");
        true
    }

    /// Collapse the shown item with the highest index.
    pub fn hide_next(&mut self) -> bool {
        if !self.resizing_enabled {
            return false;
        }
        match self
            .registry
            .find_first(ScanDirection::Backward, ItemState::Shown)
        {
            Some(position) => self.collapse_at(position),
            None => false,
        }
    }

    /// Expand the collapsed item with the lowest index.
    pub fn show_next(&mut self) -> bool {
        if !self.resizing_enabled {
            return false;
        }
        match self
            .registry
            .find_first(ScanDirection::Forward, ItemState::Collapsed)
        {
            Some(position) => self.expand_at(position),
            None => false,
        }
    }

    pub fn select(&mut self, key: &ItemKey) -> bool {
        self.selection.select(&mut self.registry, key)
    }

    pub fn deselect_all(&mut self) -> bool {
        self.selection.deselect_all(&mut self.registry)
    }

    fn lookup(&self, key: &ItemKey, operation: &str) -> Option<usize> {
        let position = self.registry.position(key);
        if position.is_none() {
            warn!("{operation} ignored for unknown item {key}");
        }
        position
    }

    fn has_state(&self, position: usize, state: ItemState) -> bool {
        self.registry
            .at(position)
            .is_some_and(|item| item.state() == state)
    }

    fn collapse_at(&mut self, position: usize) -> bool {
        if !self.has_state(position, ItemState::Shown) {
            return false;
        }

        if let Some(item) =
            self.registry.set_state(position, ItemState::Collapsed)
        {
            trace!("collapse {}", item.key());
            self.strip.insert(item);
        }
        true
    }

    fn expand_at(&mut self, position: usize) -> bool {
        if !self.has_state(position, ItemState::Collapsed) {
            return false;
        }

        if let Some(item) = self.registry.set_state(position, ItemState::Shown)
        {
            trace!("expand {}", item.key());
            self.strip.remove(item.key());
        }
        true
    }
}

impl StepTarget for VisibilityEngine {
    fn count_shown(&self) -> usize {
        self.registry.count_shown()
    }

    fn hide_next(&mut self) -> bool {
        VisibilityEngine::hide_next(self)
    }

    fn show_next(&mut self) -> bool {
        VisibilityEngine::show_next(self)
    }
}
