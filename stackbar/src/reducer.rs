use log::trace;

use crate::drag::DragSample;
use crate::event::{StackEffect, StackEvent};
use crate::stack::CollapsibleStack;

/// Reduce one input event into stack updates and host effects.
///
/// Render requests raised while reducing reach the host once, after the
/// event is fully applied.
pub fn reduce(
    stack: &mut CollapsibleStack,
    event: StackEvent,
) -> Option<StackEffect> {
    trace!("reduce {event:?}");
    stack.batch(|stack| match event {
        StackEvent::Select(key) | StackEvent::StripItemPressed(key) => {
            stack.select(&key);
            None
        },
        StackEvent::HandlePressed => {
            stack.handle_pressed();
            None
        },
        StackEvent::PointerPressed { x, y, screen_y } => {
            let target = stack.hit_test(x, y);
            stack.pointer_pressed(target.as_ref(), screen_y)
        },
        StackEvent::PointerMoved { screen_y, local_y } => {
            stack.pointer_moved(DragSample { screen_y, local_y });
            None
        },
        StackEvent::PointerReleased => {
            stack.pointer_released();
            None
        },
        StackEvent::PointerEntered(key) => {
            stack.pointer_entered(&key);
            None
        },
        StackEvent::PointerExited(key) => {
            stack.pointer_exited(&key);
            None
        },
        StackEvent::PointerHovered(key) => {
            stack.pointer_hovered(&key);
            None
        },
        StackEvent::ContainerResized {
            width,
            available_height,
        } => {
            stack.set_width(width);
            stack.container_resized(available_height);
            None
        },
        StackEvent::OpenMenu => {
            Some(StackEffect::OpenMenu(stack.build_overflow_menu()))
        },
        StackEvent::Menu(action) => {
            stack.apply_menu_action(&action);
            None
        },
    })
}
