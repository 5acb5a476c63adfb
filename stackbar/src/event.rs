use crate::item::ItemKey;
use crate::menu::{MenuAction, OverflowMenu};

/// Input events a host adapter feeds into the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    /// A stack row was clicked.
    Select(ItemKey),
    /// A strip icon was clicked.
    StripItemPressed(ItemKey),
    /// The resize handle was pressed at the last known pointer position.
    HandlePressed,
    /// Raw press in stack-local coordinates, resolved by hit testing.
    PointerPressed { x: i32, y: i32, screen_y: i32 },
    /// Pointer moved. `local_y` is relative to the top of the stack.
    PointerMoved { screen_y: i32, local_y: i32 },
    PointerReleased,
    PointerEntered(ItemKey),
    PointerExited(ItemKey),
    PointerHovered(ItemKey),
    /// The container now offers `available_height` pixels.
    ContainerResized { width: i32, available_height: i32 },
    /// The strip menu trigger was pressed.
    OpenMenu,
    /// An overflow menu entry was picked.
    Menu(MenuAction),
}

/// Work the host has to carry out after reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEffect {
    OpenMenu(OverflowMenu),
}

/// Mouse cursor the host should show over a part of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    ResizeVertical,
    Pointer,
}
