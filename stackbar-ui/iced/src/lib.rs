//! [`iced`] rendering for a [`stackbar::CollapsibleStack`].
//!
//! The adapter never owns the stack. The application keeps it in its state,
//! renders it with [`StackView`] and feeds produced events back through
//! [`stackbar::reduce`]:
//! 1. wrap the window content in [`track_pointer`] so handle drags keep
//!    reporting moves outside the stack;
//! 2. forward window resizes as [`stackbar::StackEvent::ContainerResized`];
//! 3. show [`menu_view`] when reduction returns
//!    [`stackbar::StackEffect::OpenMenu`].
//!
//! See `examples/collapsible_stack.rs` for a complete runnable example.

mod view;

pub use view::{
    StackPalette, StackView, interaction, menu_view, pointer_moved,
    track_pointer,
};
