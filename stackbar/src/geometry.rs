//! Pixel geometry of the stack: needed height, row and strip rectangles,
//! hit testing and the resize grip.
//!
//! ```text
//! +---------------------------+  handle (grip dots centred)
//! | row 0                     |  button_height
//! +---------------------------+  1px separator
//! | row 1                     |
//! +---------------------------+
//! | [b] [d] [e]           [>] |  strip, menu trigger flush right
//! +---------------------------+
//! ```

use crate::item::ItemKey;
use crate::settings::StackSettings;
use crate::transition::VisibilityEngine;

/// Axis aligned rectangle in stack-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Edges are inclusive on every side.
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Position of a single resize grip dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// What lies under a pointer position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Handle,
    Row(ItemKey),
    StripItem(ItemKey),
    StripMenu,
}

/// A keyed rectangle: a stack row or a strip icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub key: ItemKey,
    pub rect: Rect,
}

/// Rectangles of every visible part of the stack for one width.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackLayout {
    pub handle: Rect,
    /// Shown items in registry order.
    pub rows: Vec<Slot>,
    pub strip: Option<Rect>,
    pub strip_menu: Option<Rect>,
    /// Strip members that fit, in ascending index order.
    pub strip_items: Vec<Slot>,
}

impl StackLayout {
    /// Map a stack-local point to the part under it.
    ///
    /// The handle wins on its shared edge with the first row.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<HitTarget> {
        if self.handle.contains(x, y) {
            return Some(HitTarget::Handle);
        }
        let row = self.rows.iter().find(|row| row.rect.contains(x, y));
        if let Some(row) = row {
            return Some(HitTarget::Row(row.key.clone()));
        }
        if self.strip_menu.is_some_and(|menu| menu.contains(x, y)) {
            return Some(HitTarget::StripMenu);
        }
        self.strip_items
            .iter()
            .find(|slot| slot.rect.contains(x, y))
            .map(|slot| HitTarget::StripItem(slot.key.clone()))
    }

    /// Total height covered by the layout.
    pub fn height(&self) -> i32 {
        self.strip
            .map(|strip| strip.bottom())
            .or_else(|| {
                let row = self.rows.last()?;
                Some(row.rect.bottom().saturating_add(1))
            })
            .unwrap_or(self.handle.bottom())
    }
}

/// Pixel metrics derived from [`StackSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub button_height: i32,
    pub handle_height: i32,
    pub show_strip: bool,
    pub draw_border: bool,
    pub strip_spacing: i32,
    pub strip_icon_size: i32,
    pub grip_dots: usize,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::from_settings(&StackSettings::default())
    }
}

impl Metrics {
    pub fn from_settings(settings: &StackSettings) -> Self {
        let skin = settings.skin();
        Self {
            button_height: settings.button_height(),
            handle_height: skin.handle_height(),
            show_strip: settings.show_strip(),
            draw_border: settings.draw_border(),
            strip_spacing: settings.strip_spacing(),
            strip_icon_size: settings.strip_icon_size(),
            grip_dots: skin.grip_dots(),
        }
    }

    /// Vertical distance between two rows, separator included.
    pub fn row_pitch(&self) -> i32 {
        self.button_height.saturating_add(1)
    }

    pub fn strip_height(&self) -> i32 {
        if self.show_strip {
            self.button_height
        } else {
            0
        }
    }

    /// Height the stack requires with `shown` items in it.
    pub fn needed_height(&self, shown: usize) -> i32 {
        let shown = i32::try_from(shown).unwrap_or(i32::MAX);
        shown
            .saturating_mul(self.row_pitch())
            .saturating_add(self.strip_height())
            .saturating_add(self.handle_height)
    }

    pub fn layout(&self, engine: &VisibilityEngine, width: i32) -> StackLayout {
        let inset = if self.draw_border { 1 } else { 0 };
        let inner_width = (width - inset * 2).max(0);

        let handle = Rect::new(0, 0, width.max(0), self.handle_height);

        let mut y = self.handle_height;
        let mut rows = Vec::with_capacity(engine.registry().count_shown());
        for item in engine.registry().iter().filter(|item| item.is_shown()) {
            rows.push(Slot {
                key: item.key().clone(),
                rect: Rect::new(inset, y, inner_width, self.button_height),
            });
            y = y.saturating_add(self.row_pitch());
        }

        if !self.show_strip {
            return StackLayout {
                handle,
                rows,
                ..StackLayout::default()
            };
        }

        let strip = Rect::new(inset, y, inner_width, self.button_height);
        let icon = self.strip_icon_size;
        let icon_y = strip
            .y
            .saturating_add(strip.height / 2 - icon / 2)
            .saturating_add(1);
        let menu = Rect::new(strip.right() - icon, icon_y, icon, icon);

        // Placed right to left from the trigger, highest index first, so the
        // strip reads in ascending index order.
        let mut strip_items = Vec::new();
        let mut cursor = menu.x.saturating_sub(self.strip_spacing);
        for key in engine.strip().members().rev() {
            let x = cursor.saturating_sub(icon);
            if x < strip.x {
                break;
            }
            strip_items.push(Slot {
                key: key.clone(),
                rect: Rect::new(x, icon_y, icon, icon),
            });
            cursor = x.saturating_sub(self.strip_spacing);
        }
        strip_items.reverse();

        StackLayout {
            handle,
            rows,
            strip: Some(strip),
            strip_menu: Some(menu),
            strip_items,
        }
    }

    /// Dots of the resize grip, centred on a handle `width` pixels wide.
    pub fn grip_dots(&self, width: i32) -> Vec<Point> {
        let count = i32::try_from(self.grip_dots).unwrap_or(0);
        let start = width / 2 - count * 2;
        let y = (self.handle_height / 2 - 1).max(0);
        (0..count)
            .map(|dot| Point {
                x: start + dot * 4,
                y,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{HitTarget, Metrics, Point, Rect};
    use crate::item::{ItemContent, ItemKey};
    use crate::settings::{Skin, StackSettings};
    use crate::transition::VisibilityEngine;

    fn engine_with(keys: &[&str]) -> VisibilityEngine {
        let mut engine = VisibilityEngine::default();
        for key in keys {
            engine
                .add(ItemKey::from(*key), ItemContent::new(*key))
                .expect("fresh key should be accepted");
        }
        engine
    }

    fn keys(slots: &[super::Slot]) -> Vec<&str> {
        slots.iter().map(|slot| slot.key.as_str()).collect()
    }

    #[test]
    fn given_rect_when_testing_edges_then_they_are_inclusive() {
        let rect = Rect::new(10, 10, 5, 5);

        assert!(rect.contains(10, 10));
        assert!(rect.contains(15, 15));
        assert!(!rect.contains(16, 12));
        assert!(!rect.contains(9, 12));
    }

    #[test]
    fn given_default_metrics_when_measuring_then_needed_height_counts_all_parts() {
        let metrics = Metrics::default();

        assert_eq!(metrics.row_pitch(), 33);
        assert_eq!(metrics.needed_height(0), 32 + 7);
        assert_eq!(metrics.needed_height(3), 3 * 33 + 32 + 7);
    }

    #[test]
    fn given_strip_disabled_when_measuring_then_strip_is_not_counted() {
        let mut settings = StackSettings::default();
        settings.set_show_strip(false);
        settings.set_skin(Skin::Office2007);
        let metrics = Metrics::from_settings(&settings);

        assert_eq!(metrics.needed_height(2), 2 * 33 + 8);
    }

    #[test]
    fn given_huge_button_height_when_measured_then_heights_saturate() {
        let metrics = Metrics {
            button_height: i32::MAX,
            ..Metrics::default()
        };
        let engine = engine_with(&["a", "b"]);

        assert_eq!(metrics.row_pitch(), i32::MAX);
        assert_eq!(metrics.needed_height(2), i32::MAX);
        let layout = metrics.layout(&engine, 100);
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[1].rect.y, i32::MAX);
    }

    #[test]
    fn given_collapsed_items_when_laid_out_then_rows_and_strip_follow_order() {
        let mut engine = engine_with(&["a", "b", "c", "d", "e"]);
        engine.hide(&ItemKey::from("e"));
        engine.hide(&ItemKey::from("b"));
        let metrics = Metrics::default();

        let layout = metrics.layout(&engine, 200);

        assert_eq!(keys(&layout.rows), vec!["a", "c", "d"]);
        assert_eq!(layout.rows[0].rect, Rect::new(1, 7, 198, 32));
        assert_eq!(layout.rows[1].rect.y, 7 + 33);
        assert_eq!(keys(&layout.strip_items), vec!["b", "e"]);
        assert!(
            layout.strip_items[0].rect.x < layout.strip_items[1].rect.x,
            "strip must read in ascending index order"
        );
        assert_eq!(layout.height(), metrics.needed_height(3));
    }

    #[test]
    fn given_strip_when_laid_out_then_menu_trigger_is_flush_right() {
        let mut engine = engine_with(&["a", "b"]);
        engine.hide(&ItemKey::from("b"));
        let metrics = Metrics::default();

        let layout = metrics.layout(&engine, 100);
        let strip = layout.strip.expect("strip should be laid out");
        let menu = layout.strip_menu.expect("menu trigger should be laid out");
        let item = layout.strip_items[0].rect;

        assert_eq!(menu.right(), strip.right());
        assert_eq!(item.right(), menu.x - 6);
        assert_eq!(item.y, strip.y + 16 - 8 + 1);
    }

    #[test]
    fn given_narrow_strip_when_laid_out_then_only_fitting_items_are_placed() {
        let mut engine = engine_with(&["a", "b", "c", "d"]);
        engine.hide_next();
        engine.hide_next();
        engine.hide_next();
        let metrics = Metrics::default();

        let layout = metrics.layout(&engine, 70);

        assert_eq!(keys(&layout.strip_items), vec!["c", "d"]);
    }

    #[test]
    fn given_layout_when_hit_testing_then_points_map_to_parts() {
        let mut engine = engine_with(&["a", "b", "c"]);
        engine.hide(&ItemKey::from("c"));
        let layout = Metrics::default().layout(&engine, 120);
        let strip_item = layout.strip_items[0].rect;
        let menu = layout.strip_menu.expect("menu trigger should be laid out");

        assert_eq!(layout.hit_test(50, 3), Some(HitTarget::Handle));
        assert_eq!(
            layout.hit_test(50, 20),
            Some(HitTarget::Row(ItemKey::from("a")))
        );
        assert_eq!(
            layout.hit_test(50, 7 + 33 + 10),
            Some(HitTarget::Row(ItemKey::from("b")))
        );
        assert_eq!(
            layout.hit_test(strip_item.x, strip_item.y),
            Some(HitTarget::StripItem(ItemKey::from("c")))
        );
        assert_eq!(
            layout.hit_test(menu.x + 2, menu.y + 2),
            Some(HitTarget::StripMenu)
        );
        assert_eq!(layout.hit_test(500, 500), None);
    }

    #[test]
    fn given_handle_width_when_computing_grip_then_dots_are_centred() {
        let metrics = Metrics::default();

        let dots = metrics.grip_dots(100);

        assert_eq!(
            dots,
            vec![
                Point { x: 42, y: 2 },
                Point { x: 46, y: 2 },
                Point { x: 50, y: 2 },
                Point { x: 54, y: 2 },
            ]
        );
    }
}
