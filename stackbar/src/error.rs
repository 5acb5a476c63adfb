use thiserror::Error;

use crate::item::ItemKey;

/// Errors surfaced by the stack engine.
///
/// Only structural misuse of the item registry and unreadable settings are
/// reported. Visibility transitions on items that are already in the target
/// state are silently ignored.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("item `{0}` is already registered")]
    DuplicateItem(ItemKey),

    #[error("item `{0}` is not registered")]
    UnknownItem(ItemKey),

    #[error("settings JSON failed: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
