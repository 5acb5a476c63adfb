use iced::widget::{
    Column, Row, Space, button, container, mouse_area, text, tooltip,
};
use iced::{Border, Color, Element, Length, alignment, mouse};
use stackbar::{
    CollapsibleStack, CursorHint, HitTarget, Item, MenuAction, MenuEntry,
    OverflowMenu, StackEvent,
};

const DOT_SIZE: f32 = 2.0;
const DOT_GAP: f32 = 2.0;
const LABEL_SIZE: f32 = 13.0;
const ROW_ICON_SIZE: f32 = 18.0;
const TOOLTIP_GAP: f32 = 4.0;
const MENU_TRIGGER: &str = "»";
const MENU_SEPARATOR: Color = Color::from_rgb8(0x9a, 0x9a, 0x9a);
const MENU_BORDER: Color = Color::from_rgb8(0x65, 0x8a, 0xc4);
const MENU_HIGHLIGHT: Color = Color::from_rgb8(0xff, 0xe8, 0xa6);

type EventMapper<'a, Message> = dyn Fn(StackEvent) -> Message + 'a;

/// Colors used by [`StackView`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackPalette {
    pub background: Color,
    pub hovered: Color,
    pub selected: Color,
    pub text: Color,
    pub border: Color,
    pub grip: Color,
}

impl Default for StackPalette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(0xdd, 0xe7, 0xf5),
            hovered: Color::from_rgb8(0xff, 0xe8, 0xa6),
            selected: Color::from_rgb8(0xff, 0xc8, 0x5c),
            text: Color::from_rgb8(0x15, 0x42, 0x8b),
            border: Color::from_rgb8(0x65, 0x8a, 0xc4),
            grip: Color::from_rgb8(0x27, 0x4e, 0x8a),
        }
    }
}

/// Renders a [`CollapsibleStack`] and reports input as [`StackEvent`]s.
///
/// Drag moves and releases are delivered through [`track_pointer`], which
/// must wrap an area larger than the stack so the handle can be dragged
/// past its own bounds.
pub struct StackView<'a, Message: Clone + 'a> {
    stack: &'a CollapsibleStack,
    on_event: Box<EventMapper<'a, Message>>,
    palette: StackPalette,
}

impl<'a, Message> StackView<'a, Message>
where
    Message: Clone + 'a,
{
    pub fn new(
        stack: &'a CollapsibleStack,
        on_event: impl Fn(StackEvent) -> Message + 'a,
    ) -> Self {
        Self {
            stack,
            on_event: Box::new(on_event),
            palette: StackPalette::default(),
        }
    }

    pub fn palette(mut self, palette: StackPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Build the `Element` for the stack.
    pub fn view(self) -> Element<'a, Message> {
        let metrics = self.stack.metrics();
        let inset = if metrics.draw_border { 1.0 } else { 0.0 };

        let mut column = Column::new().push(self.handle());

        for item in self.stack.items().filter(|item| item.is_shown()) {
            column = column
                .push(self.row(item, metrics.button_height as f32))
                .push(self.separator());
        }

        if metrics.show_strip {
            column = column.push(self.strip());
        }

        let border = self.palette.border;
        container(column)
            .padding([0.0, inset])
            .width(Length::Fill)
            .style(move |_| container::Style {
                background: Some(border.into()),
                ..Default::default()
            })
            .into()
    }

    fn handle(&self) -> Element<'a, Message> {
        let metrics = self.stack.metrics();
        let grip = self.palette.grip;

        let mut dots = Row::new().spacing(DOT_GAP);
        for _ in 0..metrics.grip_dots {
            dots = dots.push(
                container(Space::new())
                    .width(Length::Fixed(DOT_SIZE))
                    .height(Length::Fixed(DOT_SIZE))
                    .style(move |_| container::Style {
                        background: Some(grip.into()),
                        ..Default::default()
                    }),
            );
        }

        let background = self.palette.background;
        let bar = container(dots)
            .width(Length::Fill)
            .height(Length::Fixed(metrics.handle_height as f32))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(move |_| container::Style {
                background: Some(background.into()),
                ..Default::default()
            });

        mouse_area(bar)
            .on_press((self.on_event)(StackEvent::HandlePressed))
            .interaction(interaction(
                self.stack.cursor_hint(Some(&HitTarget::Handle)),
            ))
            .into()
    }

    fn row(&self, item: &'a Item, height: f32) -> Element<'a, Message> {
        let key = item.key();
        let fill = self.fill_for(item);
        let text_color = self.palette.text;

        let mut label = Row::new()
            .spacing(8.0)
            .align_y(alignment::Vertical::Center);
        if let Some(icon) = item.content().large_icon.as_deref() {
            label = label.push(text(icon).size(ROW_ICON_SIZE));
        }
        label = label.push(text(item.label()).size(LABEL_SIZE));

        let content = container(label)
            .padding([0.0, 8.0])
            .height(Length::Fill)
            .align_y(alignment::Vertical::Center);

        let press = button(content)
            .on_press((self.on_event)(StackEvent::Select(key.clone())))
            .padding(0)
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .style(move |_, _| button::Style {
                background: Some(fill.into()),
                text_color,
                border: Border::default(),
                ..Default::default()
            });

        let press = self.with_tooltip(press.into(), item);
        self.hoverable(press, item)
    }

    fn separator(&self) -> Element<'a, Message> {
        let border = self.palette.border;
        container(Space::new())
            .width(Length::Fill)
            .height(Length::Fixed(1.0))
            .style(move |_| container::Style {
                background: Some(border.into()),
                ..Default::default()
            })
            .into()
    }

    fn strip(&self) -> Element<'a, Message> {
        let metrics = self.stack.metrics();
        let icon = metrics.strip_icon_size as f32;
        let text_color = self.palette.text;

        let mut icons = Row::new()
            .spacing(metrics.strip_spacing as f32)
            .align_y(alignment::Vertical::Center);
        for item in fitting_strip_items(self.stack) {
            let fill = self.fill_for(item);
            let glyph = button(
                container(text(strip_glyph(item)).size(icon * 0.75))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center),
            )
            .on_press((self.on_event)(StackEvent::StripItemPressed(
                item.key().clone(),
            )))
            .padding(0)
            .width(Length::Fixed(icon))
            .height(Length::Fixed(icon))
            .style(move |_, _| button::Style {
                background: Some(fill.into()),
                text_color,
                border: Border::default(),
                ..Default::default()
            });
            let glyph = self.with_tooltip(glyph.into(), item);
            icons = icons.push(self.hoverable(glyph, item));
        }

        let trigger = button(text(MENU_TRIGGER).size(LABEL_SIZE))
            .on_press((self.on_event)(StackEvent::OpenMenu))
            .padding(0)
            .width(Length::Fixed(icon))
            .height(Length::Fixed(icon))
            .style(move |_, _| button::Style {
                background: None,
                text_color,
                border: Border::default(),
                ..Default::default()
            });

        let gap = metrics.strip_spacing as f32;
        let strip = Row::new()
            .push(icons)
            .push(Space::new().width(Length::Fixed(gap)))
            .push(trigger)
            .align_y(alignment::Vertical::Center);

        let background = self.palette.background;
        container(strip)
            .width(Length::Fill)
            .height(Length::Fixed(metrics.button_height as f32))
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Center)
            .style(move |_| container::Style {
                background: Some(background.into()),
                ..Default::default()
            })
            .into()
    }

    fn hoverable(
        &self,
        content: Element<'a, Message>,
        item: &Item,
    ) -> Element<'a, Message> {
        let key = item.key();
        mouse_area(content)
            .on_enter((self.on_event)(StackEvent::PointerEntered(key.clone())))
            .on_exit((self.on_event)(StackEvent::PointerExited(key.clone())))
            .interaction(interaction(CursorHint::Pointer))
            .into()
    }

    fn with_tooltip(
        &self,
        content: Element<'a, Message>,
        item: &Item,
    ) -> Element<'a, Message> {
        let Some(tip) = tooltip_text(item) else {
            return content;
        };
        let background = self.palette.background;
        let border = self.palette.border;
        tooltip(
            content,
            container(text(tip.to_string()).size(LABEL_SIZE)).padding([2.0, 6.0]),
            tooltip::Position::Top,
        )
        .gap(TOOLTIP_GAP)
        .style(move |_| container::Style {
            background: Some(background.into()),
            border: Border {
                color: border,
                width: 1.0,
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
    }

    fn fill_for(&self, item: &Item) -> Color {
        let hovered = self
            .stack
            .hovered()
            .is_some_and(|hovered| hovered.key() == item.key());
        if item.is_selected() {
            self.palette.selected
        } else if hovered {
            self.palette.hovered
        } else {
            self.palette.background
        }
    }
}

/// Render an overflow menu as a column of buttons.
pub fn menu_view<'a, Message: Clone + 'a>(
    menu: &'a OverflowMenu,
    on_action: impl Fn(MenuAction) -> Message + 'a,
) -> Element<'a, Message> {
    let mut column = Column::new().spacing(2.0).padding(6.0);

    for entry in menu.entries() {
        match entry {
            MenuEntry::Action { label, action } => {
                column = column.push(menu_button(
                    label.clone(),
                    on_action(action.clone()),
                ));
            },
            MenuEntry::Separator => {
                column = column.push(
                    container(Space::new())
                        .width(Length::Fill)
                        .height(Length::Fixed(1.0))
                        .style(|_| container::Style {
                            background: Some(MENU_SEPARATOR.into()),
                            ..Default::default()
                        }),
                );
            },
            MenuEntry::Checklist { label, entries } => {
                column = column.push(text(label.as_str()).size(LABEL_SIZE));
                for entry in entries {
                    column = column.push(menu_button(
                        checklist_label(&entry.label, entry.checked),
                        on_action(entry.action()),
                    ));
                }
            },
        }
    }

    container(column)
        .width(Length::Fill)
        .style(|_| container::Style {
            background: Some(Color::WHITE.into()),
            border: Border {
                color: MENU_BORDER,
                width: 1.0,
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

/// Wrap `content` so pointer moves and releases anywhere inside it reach
/// the stack. `stack_top` is the window y of the stack's top edge.
pub fn track_pointer<'a, Message: Clone + 'a>(
    content: impl Into<Element<'a, Message>>,
    stack_top: f32,
    on_event: impl Fn(StackEvent) -> Message + 'a,
) -> Element<'a, Message> {
    let release = on_event(StackEvent::PointerReleased);
    mouse_area(content)
        .on_move(move |position| on_event(pointer_moved(position.y, stack_top)))
        .on_release(release)
        .into()
}

/// Move event for a pointer at window y `y`.
pub fn pointer_moved(y: f32, stack_top: f32) -> StackEvent {
    StackEvent::PointerMoved {
        screen_y: y.round() as i32,
        local_y: (y - stack_top).round() as i32,
    }
}

/// Cursor for a stack part.
pub fn interaction(hint: CursorHint) -> mouse::Interaction {
    match hint {
        CursorHint::ResizeVertical => mouse::Interaction::ResizingVertically,
        CursorHint::Pointer => mouse::Interaction::Pointer,
        CursorHint::Default => mouse::Interaction::Idle,
    }
}

/// Strip members that fit the strip at the stack's current width, in
/// ascending index order. The rest stay reachable through the menu.
fn fitting_strip_items(stack: &CollapsibleStack) -> Vec<&Item> {
    stack
        .layout()
        .strip_items
        .iter()
        .filter_map(|slot| stack.item(&slot.key))
        .collect()
}

fn tooltip_text(item: &Item) -> Option<&str> {
    item.content()
        .tooltip
        .as_deref()
        .map(str::trim)
        .filter(|tip| !tip.is_empty())
}

fn strip_glyph(item: &Item) -> String {
    match item.content().small_icon.as_deref() {
        Some(icon) => icon.to_string(),
        None => item.label().chars().take(1).collect(),
    }
}

fn checklist_label(label: &str, checked: bool) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    format!("{mark} {label}")
}

fn menu_button<'a, Message: Clone + 'a>(
    label: String,
    message: Message,
) -> Element<'a, Message> {
    button(text(label).size(LABEL_SIZE))
        .on_press(message)
        .padding([2.0, 8.0])
        .width(Length::Fill)
        .style(|_, status| {
            let background = match status {
                button::Status::Hovered | button::Status::Pressed => {
                    Some(MENU_HIGHLIGHT.into())
                },
                _ => None,
            };
            button::Style {
                background,
                text_color: Color::BLACK,
                border: Border::default(),
                ..Default::default()
            }
        })
        .into()
}

#[cfg(test)]
mod tests {
    use iced::{Element, mouse};
    use stackbar::{CollapsibleStack, CursorHint, ItemContent, StackEvent};

    use super::{
        StackView, checklist_label, fitting_strip_items, interaction,
        pointer_moved, strip_glyph, tooltip_text,
    };

    #[test]
    fn given_cursor_hints_when_mapped_then_iced_interactions_match() {
        assert_eq!(
            interaction(CursorHint::ResizeVertical),
            mouse::Interaction::ResizingVertically
        );
        assert_eq!(
            interaction(CursorHint::Pointer),
            mouse::Interaction::Pointer
        );
        assert_eq!(interaction(CursorHint::Default), mouse::Interaction::Idle);
    }

    #[test]
    fn given_window_position_when_converted_then_local_y_is_relative_to_stack()
    {
        assert_eq!(
            pointer_moved(412.4, 400.0),
            StackEvent::PointerMoved {
                screen_y: 412,
                local_y: 12,
            }
        );
        assert_eq!(
            pointer_moved(390.0, 400.0),
            StackEvent::PointerMoved {
                screen_y: 390,
                local_y: -10,
            }
        );
    }

    #[test]
    fn given_item_without_small_icon_when_rendered_in_strip_then_initial_is_used()
     {
        let mut stack = CollapsibleStack::default();
        stack
            .add_item("mail", ItemContent::new("Mail"))
            .expect("fresh key should be accepted");
        stack
            .add_item("tasks", ItemContent::new("Tasks").small_icon("✓"))
            .expect("fresh key should be accepted");
        let glyphs: Vec<String> = stack.items().map(strip_glyph).collect();

        assert_eq!(glyphs, vec!["M", "✓"]);
    }

    #[test]
    fn given_narrow_stack_when_rendering_strip_then_only_fitting_items_are_used()
    {
        let mut stack = CollapsibleStack::default();
        for key in ["a", "b", "c", "d", "e"] {
            stack
                .add_item(key, ItemContent::new(key))
                .expect("fresh key should be accepted");
        }
        for _ in 0..4 {
            stack.hide_next();
        }
        stack.set_width(70);

        let keys: Vec<&str> = fitting_strip_items(&stack)
            .into_iter()
            .map(|item| item.key().as_str())
            .collect();

        assert_eq!(stack.strip_members().len(), 4);
        assert_eq!(keys, vec!["d", "e"]);
    }

    #[test]
    fn given_items_with_tooltips_when_rendered_then_blank_tips_are_skipped() {
        let mut stack = CollapsibleStack::default();
        let contents = [
            ItemContent::new("Mail").tooltip("Open mail").large_icon("✉"),
            ItemContent::new("Notes").tooltip("  "),
            ItemContent::new("Tasks"),
        ];
        for content in contents {
            let key = content.label.clone();
            stack
                .add_item(key, content)
                .expect("fresh key should be accepted");
        }
        stack.hide_next();
        stack.set_width(200);

        let tips: Vec<Option<&str>> = stack.items().map(tooltip_text).collect();
        let _view: Element<'_, StackEvent> =
            StackView::new(&stack, |event| event).view();

        assert_eq!(tips, vec![Some("Open mail"), None, None]);
    }

    #[test]
    fn given_checklist_entry_when_labelled_then_mark_reflects_state() {
        assert_eq!(checklist_label("Mail", true), "[x] Mail");
        assert_eq!(checklist_label("Mail", false), "[ ] Mail");
    }
}
