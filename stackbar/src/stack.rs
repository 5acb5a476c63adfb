//! The collapsible stack: visibility engine, resize controllers, settings,
//! listeners and render invalidation behind one API.

use log::{debug, trace, warn};

use crate::drag::{DragController, DragSample, DragStep};
use crate::error::Result;
use crate::event::{CursorHint, StackEffect};
use crate::geometry::{HitTarget, Metrics, Point, StackLayout};
use crate::item::{Item, ItemContent, ItemKey};
use crate::listener::{ListenerId, Listeners, MenuListener, StackListener};
use crate::menu::{MenuAction, OverflowMenu};
use crate::pressure::{PressureController, PressureOutcome};
use crate::render::{Invalidation, RenderHost, RenderQueue};
use crate::settings::StackSettings;
use crate::transition::{StepTarget, VisibilityEngine};

/// The handle is the topmost part of the stack.
const HANDLE_TOP: i32 = 0;

/// A vertical stack of selectable items that collapses into an overflow
/// strip when the container runs out of height.
///
/// All calls complete synchronously. Render requests produced by one call
/// reach the [`RenderHost`] at most once, after the call finished.
#[derive(Debug)]
pub struct CollapsibleStack {
    settings: StackSettings,
    metrics: Metrics,
    engine: VisibilityEngine,
    pressure: PressureController,
    drag: DragController,
    hovered: Option<ItemKey>,
    width: i32,
    pointer_y: Option<i32>,
    listeners: Listeners<dyn StackListener>,
    menu_listeners: Listeners<dyn MenuListener>,
    render: RenderQueue,
}

impl Default for CollapsibleStack {
    fn default() -> Self {
        Self::new(StackSettings::default())
    }
}

impl CollapsibleStack {
    pub fn new(settings: StackSettings) -> Self {
        Self {
            metrics: Metrics::from_settings(&settings),
            engine: VisibilityEngine::new(settings.allow_resizing()),
            settings,
            pressure: PressureController::new(),
            drag: DragController::new(),
            hovered: None,
            width: 0,
            pointer_y: None,
            listeners: Listeners::default(),
            menu_listeners: Listeners::default(),
            render: RenderQueue::default(),
        }
    }

    pub fn settings(&self) -> &StackSettings {
        &self.settings
    }

    /// Replace the settings. Disabling resizing aborts an active drag.
    pub fn set_settings(&mut self, settings: StackSettings) {
        if settings == self.settings {
            return;
        }

        self.metrics = Metrics::from_settings(&settings);
        self.engine.set_resizing_enabled(settings.allow_resizing());
        if !settings.allow_resizing() {
            self.drag.end();
        }
        self.settings = settings;
        self.render.invalidate(Invalidation::RELAYOUT);
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn engine(&self) -> &VisibilityEngine {
        &self.engine
    }

    /// Shown count remembered at the first automatic collapse.
    pub fn baseline(&self) -> Option<usize> {
        self.pressure.baseline()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn hovered(&self) -> Option<&Item> {
        self.hovered.as_ref().and_then(|key| self.engine.item(key))
    }

    pub fn item(&self, key: &ItemKey) -> Option<&Item> {
        self.engine.item(key)
    }

    /// Every item in creation order, whatever its state.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.engine.registry().iter()
    }

    pub fn len(&self) -> usize {
        self.engine.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.engine.registry().is_empty()
    }

    pub fn count_shown(&self) -> usize {
        self.engine.registry().count_shown()
    }

    /// Items shown in the overflow strip, left to right.
    pub fn strip_members(&self) -> Vec<&Item> {
        self.engine.strip_items()
    }

    pub fn selected(&self) -> Option<&Item> {
        self.engine.selected()
    }

    pub fn add_item(
        &mut self,
        key: impl Into<ItemKey>,
        content: ItemContent,
    ) -> Result<&Item> {
        let item = self.engine.add(key.into(), content)?;
        self.render.invalidate(Invalidation::RELAYOUT);
        Ok(item)
    }

    pub fn remove_item(&mut self, key: &ItemKey) -> Result<Item> {
        let removed = self.engine.remove(key)?;
        if self.hovered.as_ref() == Some(key) {
            self.hovered = None;
        }
        self.render.invalidate(Invalidation::RELAYOUT);
        Ok(removed)
    }

    /// Remove every item, last one first, with a single relayout.
    ///
    /// Registered listeners stay registered.
    pub fn remove_all(&mut self) -> Vec<Item> {
        self.render.hold();
        let removed = self.engine.remove_all();
        self.pressure.clear_baseline();
        self.drag.end();
        self.hovered = None;
        debug!("removed all {} items", removed.len());
        self.render.invalidate(Invalidation::RELAYOUT);
        self.render.release();
        removed
    }

    pub fn hide_item(&mut self, key: &ItemKey) -> bool {
        let changed = self.engine.hide(key);
        self.relayout_if(changed)
    }

    pub fn show_item(&mut self, key: &ItemKey) -> bool {
        let changed = self.engine.show(key);
        self.relayout_if(changed)
    }

    pub fn exclude_item(&mut self, key: &ItemKey) -> bool {
        let changed = self.engine.exclude(key);
        if changed && self.hovered.as_ref() == Some(key) {
            self.hovered = None;
        }
        self.relayout_if(changed)
    }

    pub fn include_item(&mut self, key: &ItemKey) -> bool {
        let changed = self.engine.include(key);
        self.relayout_if(changed)
    }

    pub fn hide_next(&mut self) -> bool {
        let changed = self.engine.hide_next();
        self.relayout_if(changed)
    }

    pub fn show_next(&mut self) -> bool {
        let changed = self.engine.show_next();
        self.relayout_if(changed)
    }

    /// Select `key` and notify listeners through `item_clicked`.
    ///
    /// Selecting the current selection again is a no-op and notifies no one.
    pub fn select(&mut self, key: &ItemKey) -> bool {
        if !self.engine.select(key) {
            return false;
        }

        if let Some(item) = self.engine.item(key) {
            self.listeners
                .for_each(|listener| listener.item_clicked(item));
        }
        self.render.invalidate(Invalidation::REDRAW);
        true
    }

    pub fn deselect_all(&mut self) -> bool {
        let changed = self.engine.deselect_all();
        if changed {
            self.render.invalidate(Invalidation::REDRAW);
        }
        changed
    }

    /// Height the stack requires in its current state.
    pub fn needed_height(&self) -> i32 {
        self.metrics.needed_height(self.count_shown())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn set_width(&mut self, width: i32) {
        if self.width != width {
            self.width = width;
            self.render.invalidate(Invalidation::REDRAW);
        }
    }

    /// Rectangles for the current state at the current width.
    pub fn layout(&self) -> StackLayout {
        self.metrics.layout(&self.engine, self.width)
    }

    pub fn hit_test(&self, x: i32, y: i32) -> Option<HitTarget> {
        self.layout().hit_test(x, y)
    }

    pub fn grip_dots(&self) -> Vec<Point> {
        self.metrics.grip_dots(self.width)
    }

    /// React to the container offering `available` pixels of height.
    ///
    /// At most one item collapses or expands per notification.
    pub fn container_resized(&mut self, available: i32) -> PressureOutcome {
        let needed = self.needed_height();
        let outcome = self.pressure.on_resize(
            &mut self.engine,
            available,
            needed,
            self.metrics.button_height,
        );
        if outcome != PressureOutcome::Unchanged {
            self.render.invalidate(Invalidation::RELAYOUT);
        }
        outcome
    }

    /// Press on a resolved part of the stack at `screen_y`.
    pub fn pointer_pressed(
        &mut self,
        target: Option<&HitTarget>,
        screen_y: i32,
    ) -> Option<StackEffect> {
        self.pointer_y = Some(screen_y);
        match target? {
            HitTarget::Handle => {
                if self.settings.allow_resizing() {
                    self.drag.begin(screen_y);
                }
                None
            },
            HitTarget::Row(key) | HitTarget::StripItem(key) => {
                self.select(key);
                None
            },
            HitTarget::StripMenu => {
                Some(StackEffect::OpenMenu(self.build_overflow_menu()))
            },
        }
    }

    /// Press on the handle at the last position reported by
    /// [`Self::pointer_moved`].
    pub fn handle_pressed(&mut self) {
        match self.pointer_y {
            Some(screen_y) => {
                self.pointer_pressed(Some(&HitTarget::Handle), screen_y);
            },
            None => debug!("handle press ignored without pointer position"),
        }
    }

    pub fn pointer_moved(&mut self, sample: DragSample) -> DragStep {
        self.pointer_y = Some(sample.screen_y);
        let step = self.drag.on_move(
            &mut self.engine,
            &mut self.pressure,
            sample,
            HANDLE_TOP,
            self.metrics.button_height,
        );
        if step != DragStep::None {
            trace!("drag step {step:?}, shown={}", self.engine.count_shown());
            self.render.invalidate(Invalidation::RELAYOUT);
        }
        step
    }

    /// End the drag gesture. Steps already taken stay applied.
    pub fn pointer_released(&mut self) {
        self.drag.end();
    }

    pub fn pointer_entered(&mut self, key: &ItemKey) {
        let Some(item) = self.engine.item(key) else {
            warn!("pointer entered unknown item {key}");
            return;
        };
        if self.hovered.as_ref() == Some(key) {
            return;
        }

        self.hovered = Some(key.clone());
        self.listeners
            .for_each(|listener| listener.item_entered(item));
        self.render.invalidate(Invalidation::REDRAW);
    }

    pub fn pointer_exited(&mut self, key: &ItemKey) {
        if self.hovered.as_ref() == Some(key) {
            self.hovered = None;
            self.render.invalidate(Invalidation::REDRAW);
        }
        if let Some(item) = self.engine.item(key) {
            self.listeners
                .for_each(|listener| listener.item_exited(item));
        }
    }

    pub fn pointer_hovered(&mut self, key: &ItemKey) {
        if let Some(item) = self.engine.item(key) {
            self.listeners
                .for_each(|listener| listener.item_hovered(item));
        }
    }

    pub fn cursor_hint(&self, target: Option<&HitTarget>) -> CursorHint {
        match target {
            Some(HitTarget::Handle) if self.settings.allow_resizing() => {
                CursorHint::ResizeVertical
            },
            Some(HitTarget::Row(_) | HitTarget::StripItem(_)) => {
                CursorHint::Pointer
            },
            _ => CursorHint::Default,
        }
    }

    pub fn add_listener(
        &mut self,
        listener: Box<dyn StackListener>,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn add_menu_listener(
        &mut self,
        listener: Box<dyn MenuListener>,
    ) -> ListenerId {
        self.menu_listeners.add(listener)
    }

    pub fn remove_menu_listener(&mut self, id: ListenerId) -> bool {
        self.menu_listeners.remove(id)
    }

    /// Assemble the overflow menu: listener entries, the built-in entries,
    /// then listener entries again.
    pub fn build_overflow_menu(&mut self) -> OverflowMenu {
        let mut menu = OverflowMenu::new();
        self.menu_listeners
            .for_each(|listener| listener.before_items(&mut menu));
        menu.push_builtin(&self.engine, self.settings.labels());
        self.menu_listeners
            .for_each(|listener| listener.after_items(&mut menu));
        menu
    }

    /// Carry out a picked menu entry. Returns `true` when the stack changed.
    pub fn apply_menu_action(&mut self, action: &MenuAction) -> bool {
        match action {
            MenuAction::ShowMore => self.show_next(),
            MenuAction::ShowFewer => self.hide_next(),
            MenuAction::Toggle(key) => {
                let excluded = self.engine.item(key).map(Item::is_excluded);
                match excluded {
                    Some(true) => self.include_item(key),
                    Some(false) => self.exclude_item(key),
                    None => {
                        warn!("menu toggle for unknown item {key}");
                        false
                    },
                }
            },
            MenuAction::Custom(id) => {
                self.menu_listeners
                    .for_each(|listener| listener.custom_action(id));
                false
            },
        }
    }

    /// Request a relayout without changing any state.
    pub fn force_layout(&mut self) {
        self.render.invalidate(Invalidation::RELAYOUT);
    }

    /// Install or drop the receiver of render requests.
    pub fn set_render_host(&mut self, host: Option<Box<dyn RenderHost>>) {
        self.render.set_host(host);
    }

    pub fn has_render_host(&self) -> bool {
        self.render.has_host()
    }

    /// Invalidations collected while no render host is installed.
    pub fn take_invalidation(&mut self) -> Invalidation {
        self.render.take()
    }

    /// Run `f` with render requests deferred until it returns.
    pub(crate) fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.render.hold();
        let result = f(self);
        self.render.release();
        result
    }

    fn relayout_if(&mut self, changed: bool) -> bool {
        if changed {
            self.render.invalidate(Invalidation::RELAYOUT);
        }
        changed
    }
}
