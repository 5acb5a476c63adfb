//! Adaptive visibility engine for a collapsible button stack.
//!
//! Items live in a vertical stack. When the container gets too short they
//! collapse one at a time into a horizontal overflow strip, and come back in
//! their original order when space returns. Users can resize the stack by
//! dragging its handle and hide items entirely through the overflow menu
//! checklist.
//!
//! The crate is UI-agnostic:
//! - [`VisibilityEngine`] owns item state, the strip and the selection;
//! - [`PressureController`] and [`DragController`] turn resizes and drags
//!   into single steps;
//! - [`CollapsibleStack`] bundles them with settings, geometry, listeners
//!   and render invalidation for host adapters;
//! - [`reduce`] applies host input events to a stack.
//!
//! # Quick Example
//!
//! ```
//! use stackbar::{CollapsibleStack, ItemContent, ItemKey, ItemState};
//!
//! let mut stack = CollapsibleStack::default();
//! for name in ["Mail", "Calendar", "Contacts"] {
//!     stack.add_item(name, ItemContent::new(name)).unwrap();
//! }
//!
//! // Not enough room for every row: the bottom item collapses.
//! let needed = stack.needed_height();
//! stack.container_resized(needed - 1);
//!
//! let contacts = stack.item(&ItemKey::from("Contacts")).unwrap();
//! assert_eq!(contacts.state(), ItemState::Collapsed);
//! assert_eq!(stack.strip_members().len(), 1);
//! ```

mod drag;
mod error;
mod event;
mod geometry;
mod item;
mod listener;
mod menu;
mod overflow;
mod pressure;
mod reducer;
mod registry;
mod render;
mod selection;
mod settings;
mod stack;
mod transition;

pub use drag::{DragController, DragSample, DragStep};
pub use error::{Result, StackError};
pub use event::{CursorHint, StackEffect, StackEvent};
pub use geometry::{HitTarget, Metrics, Point, Rect, Slot, StackLayout};
pub use item::{Item, ItemContent, ItemKey, ItemState};
pub use listener::{ListenerId, MenuListener, StackListener};
pub use menu::{ChecklistEntry, MenuAction, MenuEntry, OverflowMenu};
pub use overflow::OverflowStrip;
pub use pressure::{PressureController, PressureOutcome};
pub use reducer::reduce;
pub use registry::{ItemRegistry, Scan, ScanDirection};
pub use render::{Invalidation, RenderHost};
pub use settings::{MAX_EXTENT, Skin, StackLabels, StackSettings};
pub use stack::CollapsibleStack;
pub use transition::{StepTarget, VisibilityEngine};
