//! Automatic collapse and re-expansion driven by container resizes.

use log::debug;

use crate::transition::StepTarget;

/// What a single resize notification did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureOutcome {
    Collapsed,
    Expanded,
    Unchanged,
}

/// Reacts to container resizes by collapsing or expanding one item.
///
/// The baseline is the shown count captured right before the first automatic
/// collapse. Automatic growth never expands past it; only a manual drag
/// clears it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PressureController {
    baseline: Option<usize>,
}

impl PressureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline(&self) -> Option<usize> {
        self.baseline
    }

    pub fn clear_baseline(&mut self) {
        if self.baseline.take().is_some() {
            debug!("pressure baseline cleared");
        }
    }

    /// Handle one resize notification.
    ///
    /// `needed` is the height the stack currently requires and `item_height`
    /// the height one more item would add.
    pub fn on_resize<T: StepTarget + ?Sized>(
        &mut self,
        target: &mut T,
        available: i32,
        needed: i32,
        item_height: i32,
    ) -> PressureOutcome {
        if available < needed {
            if self.baseline.is_none() {
                let shown = target.count_shown();
                debug!("pressure baseline recorded at {shown}");
                self.baseline = Some(shown);
            }
            return if target.hide_next() {
                debug!(
                    "pressure collapse: available={available} needed={needed}"
                );
                PressureOutcome::Collapsed
            } else {
                PressureOutcome::Unchanged
            };
        }

        let Some(baseline) = self.baseline else {
            return PressureOutcome::Unchanged;
        };

        if available.saturating_sub(item_height) > needed
            && target.count_shown() < baseline
            && target.show_next()
        {
            debug!("pressure expand: available={available} needed={needed}");
            return PressureOutcome::Expanded;
        }

        PressureOutcome::Unchanged
    }
}
