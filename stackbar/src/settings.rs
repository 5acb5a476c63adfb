use log::warn;
use serde::Serialize;

use crate::error::Result;

const DEFAULT_BUTTON_HEIGHT: i32 = 32;
const DEFAULT_STRIP_SPACING: i32 = 6;
const DEFAULT_STRIP_ICON_SIZE: i32 = 16;
/// Upper bound for every pixel extent read from settings.
pub const MAX_EXTENT: i32 = 1024;
const DEFAULT_SHOW_MORE: &str = "Show More Buttons";
const DEFAULT_SHOW_FEWER: &str = "Show Fewer Buttons";
const DEFAULT_ADD_OR_REMOVE: &str = "Add or Remove Buttons";

/// Visual family of the stack; drives the resize handle metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    #[default]
    Blue,
    Olive,
    Silver,
    Office2007,
}

impl Skin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "blue" => Some(Self::Blue),
            "olive" => Some(Self::Olive),
            "silver" => Some(Self::Silver),
            "office2007" | "office_2007" => Some(Self::Office2007),
            _ => None,
        }
    }

    /// Height of the drag handle bar.
    pub fn handle_height(self) -> i32 {
        match self {
            Self::Office2007 => 8,
            Self::Blue | Self::Olive | Self::Silver => 7,
        }
    }

    /// Number of grip dots painted on the handle.
    pub fn grip_dots(self) -> usize {
        match self {
            Self::Office2007 => 9,
            Self::Blue | Self::Olive | Self::Silver => 4,
        }
    }
}

/// Texts of the overflow menu entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackLabels {
    pub show_more: String,
    pub show_fewer: String,
    pub add_or_remove: String,
}

impl Default for StackLabels {
    fn default() -> Self {
        Self {
            show_more: String::from(DEFAULT_SHOW_MORE),
            show_fewer: String::from(DEFAULT_SHOW_FEWER),
            add_or_remove: String::from(DEFAULT_ADD_OR_REMOVE),
        }
    }
}

/// Configuration of a collapsible stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackSettings {
    allow_resizing: bool,
    show_strip: bool,
    button_height: i32,
    skin: Skin,
    draw_border: bool,
    strip_spacing: i32,
    strip_icon_size: i32,
    labels: StackLabels,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            allow_resizing: true,
            show_strip: true,
            button_height: DEFAULT_BUTTON_HEIGHT,
            skin: Skin::default(),
            draw_border: true,
            strip_spacing: DEFAULT_STRIP_SPACING,
            strip_icon_size: DEFAULT_STRIP_ICON_SIZE,
            labels: StackLabels::default(),
        }
    }
}

impl StackSettings {
    /// Whether hide-next/show-next and drag resizing are enabled.
    pub fn allow_resizing(&self) -> bool {
        self.allow_resizing
    }

    pub fn set_allow_resizing(&mut self, value: bool) {
        self.allow_resizing = value;
    }

    /// Whether the overflow strip takes space under the stack.
    pub fn show_strip(&self) -> bool {
        self.show_strip
    }

    pub fn set_show_strip(&mut self, value: bool) {
        self.show_strip = value;
    }

    pub fn button_height(&self) -> i32 {
        self.button_height
    }

    /// Heights outside `1..=MAX_EXTENT` are ignored.
    pub fn set_button_height(&mut self, value: i32) {
        if is_extent(value) {
            self.button_height = value;
        }
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    pub fn set_skin(&mut self, value: Skin) {
        self.skin = value;
    }

    pub fn draw_border(&self) -> bool {
        self.draw_border
    }

    pub fn set_draw_border(&mut self, value: bool) {
        self.draw_border = value;
    }

    pub fn strip_spacing(&self) -> i32 {
        self.strip_spacing
    }

    pub fn set_strip_spacing(&mut self, value: i32) {
        if is_spacing(value) {
            self.strip_spacing = value;
        }
    }

    pub fn strip_icon_size(&self) -> i32 {
        self.strip_icon_size
    }

    pub fn set_strip_icon_size(&mut self, value: i32) {
        if is_extent(value) {
            self.strip_icon_size = value;
        }
    }

    pub fn labels(&self) -> &StackLabels {
        &self.labels
    }

    pub fn set_labels(&mut self, value: StackLabels) {
        self.labels = value;
    }

    /// Parse settings text. Only malformed JSON is an error; invalid fields
    /// fall back to their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value = serde_json::from_str::<serde_json::Value>(text)?;
        Ok(Self::from_json(&value))
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut settings = StackSettings::default();

        if let Some(flag) = read_bool(value, "allow_resizing") {
            settings.allow_resizing = flag;
        }
        if let Some(flag) = read_bool(value, "show_strip") {
            settings.show_strip = flag;
        }
        if let Some(flag) = read_bool(value, "draw_border") {
            settings.draw_border = flag;
        }

        if let Some(height) = read_int(value, "button_height") {
            if is_extent(height) {
                settings.button_height = height;
            } else {
                warn!(
                    "settings button_height must be in 1..={MAX_EXTENT}, \
                     got {height}"
                );
            }
        }
        if let Some(spacing) = read_int(value, "strip_spacing") {
            if is_spacing(spacing) {
                settings.strip_spacing = spacing;
            } else {
                warn!(
                    "settings strip_spacing must be in 0..={MAX_EXTENT}, \
                     got {spacing}"
                );
            }
        }
        if let Some(size) = read_int(value, "strip_icon_size") {
            if is_extent(size) {
                settings.strip_icon_size = size;
            } else {
                warn!(
                    "settings strip_icon_size must be in 1..={MAX_EXTENT}, \
                     got {size}"
                );
            }
        }

        let skin = value.get("skin").and_then(serde_json::Value::as_str);
        if let Some(name) = skin {
            match Skin::from_name(name) {
                Some(skin) => settings.skin = skin,
                None => warn!("settings skin `{name}` is unknown"),
            }
        }

        if let Some(labels) = value.get("labels") {
            if let Some(text) = read_label(labels, "show_more") {
                settings.labels.show_more = text;
            }
            if let Some(text) = read_label(labels, "show_fewer") {
                settings.labels.show_fewer = text;
            }
            if let Some(text) = read_label(labels, "add_or_remove") {
                settings.labels.add_or_remove = text;
            }
        }

        settings
    }
}

fn is_extent(value: i32) -> bool {
    (1..=MAX_EXTENT).contains(&value)
}

fn is_spacing(value: i32) -> bool {
    (0..=MAX_EXTENT).contains(&value)
}

fn read_bool(value: &serde_json::Value, key: &str) -> Option<bool> {
    value.get(key).and_then(serde_json::Value::as_bool)
}

fn read_int(value: &serde_json::Value, key: &str) -> Option<i32> {
    value
        .get(key)
        .and_then(serde_json::Value::as_i64)
        .and_then(|raw| i32::try_from(raw).ok())
}

fn read_label(value: &serde_json::Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}
