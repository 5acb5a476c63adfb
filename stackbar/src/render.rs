//! Coalesced redraw and relayout requests towards the host toolkit.

use std::fmt;

use bitflags::bitflags;
use log::trace;

bitflags! {
    /// Pending work for the rendering host.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        const NONE     = 0;
        const REDRAW   = 1;
        /// Size changed; implies a redraw.
        const RELAYOUT = 1 << 1;
    }
}

/// Receiver of render requests. The stack never draws by itself.
pub trait RenderHost {
    fn request_redraw(&mut self);

    fn request_relayout(&mut self);
}

/// Accumulates invalidations while a public call runs and delivers them to
/// the host once when the outermost call completes.
#[derive(Default)]
pub(crate) struct RenderQueue {
    pending: Invalidation,
    host: Option<Box<dyn RenderHost>>,
    holds: u32,
}

impl fmt::Debug for RenderQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderQueue")
            .field("pending", &self.pending)
            .field("has_host", &self.host.is_some())
            .field("holds", &self.holds)
            .finish()
    }
}

impl RenderQueue {
    pub(crate) fn set_host(&mut self, host: Option<Box<dyn RenderHost>>) {
        self.host = host;
    }

    pub(crate) fn has_host(&self) -> bool {
        self.host.is_some()
    }

    pub(crate) fn hold(&mut self) {
        self.holds += 1;
    }

    pub(crate) fn release(&mut self) {
        self.holds = self.holds.saturating_sub(1);
        if self.holds == 0 {
            self.flush();
        }
    }

    pub(crate) fn invalidate(&mut self, flags: Invalidation) {
        self.pending |= flags;
        if self.holds == 0 {
            self.flush();
        }
    }

    /// Pending flags not yet delivered to a host.
    pub(crate) fn take(&mut self) -> Invalidation {
        std::mem::take(&mut self.pending)
    }

    fn flush(&mut self) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }

        trace!("render flush {pending:?}");
        if pending.contains(Invalidation::RELAYOUT) {
            host.request_relayout();
        }
        host.request_redraw();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Invalidation, RenderHost, RenderQueue};

    /// Host that records every request it receives.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct RecordingHost {
        pub(crate) calls: Rc<RefCell<Vec<&'static str>>>,
    }

    impl RenderHost for RecordingHost {
        fn request_redraw(&mut self) {
            self.calls.borrow_mut().push("redraw");
        }

        fn request_relayout(&mut self) {
            self.calls.borrow_mut().push("relayout");
        }
    }

    #[test]
    fn given_held_queue_when_invalidated_repeatedly_then_host_is_called_once() {
        let host = RecordingHost::default();
        let mut queue = RenderQueue::default();
        queue.set_host(Some(Box::new(host.clone())));

        queue.hold();
        queue.invalidate(Invalidation::REDRAW);
        queue.invalidate(Invalidation::RELAYOUT);
        queue.invalidate(Invalidation::REDRAW);
        assert!(host.calls.borrow().is_empty());
        queue.release();

        assert_eq!(*host.calls.borrow(), vec!["relayout", "redraw"]);
    }

    #[test]
    fn given_nested_holds_when_inner_released_then_flush_waits_for_outer() {
        let host = RecordingHost::default();
        let mut queue = RenderQueue::default();
        queue.set_host(Some(Box::new(host.clone())));

        queue.hold();
        queue.hold();
        queue.invalidate(Invalidation::REDRAW);
        queue.release();
        assert!(host.calls.borrow().is_empty());
        queue.release();

        assert_eq!(*host.calls.borrow(), vec!["redraw"]);
    }

    #[test]
    fn given_no_host_when_invalidated_then_flags_are_kept_for_polling() {
        let mut queue = RenderQueue::default();

        queue.invalidate(Invalidation::REDRAW);
        queue.invalidate(Invalidation::RELAYOUT);

        assert_eq!(
            queue.take(),
            Invalidation::REDRAW | Invalidation::RELAYOUT
        );
        assert!(queue.take().is_empty());
    }
}
