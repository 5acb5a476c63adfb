//! Observer registries for stack and menu notifications.

use std::fmt;

use crate::item::Item;
use crate::menu::OverflowMenu;

/// Receives pointer notifications about stack items.
///
/// Every method defaults to a no-op so observers implement only what they
/// need. Only explicit selection by click fires `item_clicked`; visibility
/// transitions never do.
pub trait StackListener {
    fn item_clicked(&mut self, _item: &Item) {}

    fn item_entered(&mut self, _item: &Item) {}

    fn item_exited(&mut self, _item: &Item) {}

    fn item_hovered(&mut self, _item: &Item) {}
}

/// Contributes entries around the built-in overflow menu items and handles
/// the custom actions it contributed.
pub trait MenuListener {
    fn before_items(&mut self, _menu: &mut OverflowMenu) {}

    fn after_items(&mut self, _menu: &mut OverflowMenu) {}

    fn custom_action(&mut self, _action: &str) {}
}

/// Handle returned on registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Observers kept in registration order.
pub(crate) struct Listeners<L: ?Sized> {
    entries: Vec<(ListenerId, Box<L>)>,
    next_id: u64,
}

impl<L: ?Sized> Default for Listeners<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<L: ?Sized> fmt::Debug for Listeners<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}

impl<L: ?Sized> Listeners<L> {
    pub(crate) fn add(&mut self, listener: Box<L>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn for_each(&mut self, mut notify: impl FnMut(&mut L)) {
        for (_, listener) in &mut self.entries {
            notify(listener.as_mut());
        }
    }
}
