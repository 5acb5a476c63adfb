//! Manual resize of the stack by dragging its handle.

use log::debug;

use crate::pressure::PressureController;
use crate::transition::StepTarget;

/// What a single pointer sample did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStep {
    Collapsed,
    Expanded,
    None,
}

/// Pointer position delivered while dragging.
///
/// `screen_y` is stable while the stack changes size and drives the step
/// threshold. `local_y` is relative to the top of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSample {
    pub screen_y: i32,
    pub local_y: i32,
}

/// Converts a continuous drag into whole-item steps.
///
/// Moving the pointer down by more than one item height collapses the
/// bottom shown item, moving it up by more than one item height brings back
/// the first collapsed one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragController {
    start_y: Option<i32>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, screen_y: i32) {
        debug!("drag begin at {screen_y}");
        self.start_y = Some(screen_y);
    }

    /// Finish the gesture. Steps already taken stay applied.
    pub fn end(&mut self) {
        if self.start_y.take().is_some() {
            debug!("drag end");
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.start_y.is_some()
    }

    /// Feed one pointer sample while the button is held.
    ///
    /// Any drag sample clears the pressure baseline: the size the user picks
    /// by hand becomes the reference for later automatic growth.
    pub fn on_move<T: StepTarget + ?Sized>(
        &mut self,
        target: &mut T,
        pressure: &mut PressureController,
        sample: DragSample,
        handle_top: i32,
        item_height: i32,
    ) -> DragStep {
        let Some(start_y) = self.start_y else {
            return DragStep::None;
        };

        pressure.clear_baseline();
        let delta = sample.screen_y.saturating_sub(start_y);

        if delta > item_height {
            // The handle must not travel above its own bar while shrinking.
            if sample.local_y < handle_top {
                return DragStep::None;
            }
            self.start_y = Some(sample.screen_y);
            return if target.hide_next() {
                DragStep::Collapsed
            } else {
                DragStep::None
            };
        }

        if delta.saturating_abs() > item_height {
            self.start_y = Some(sample.screen_y);
            return if target.show_next() {
                DragStep::Expanded
            } else {
                DragStep::None
            };
        }

        DragStep::None
    }
}
