//! Hover highlighting and the floating info label.
//!
//! A region shape and its bar share the region name, so highlighting is
//! keyed by name and applies to every element carrying it. Default strokes
//! live in a side table keyed by element identity; dehighlighting drops the
//! override and the element reads its registered default again.

use crate::config::StrokeStyle;
use std::collections::{BTreeMap, BTreeSet};

/// Horizontal gap between cursor and label.
const LABEL_OFFSET: f64 = 10.0;
/// How far above the cursor the label sits by default.
const LABEL_RISE: f64 = 75.0;
/// How far below the cursor the label sits when flipped down.
const LABEL_DROP: f64 = 25.0;
const EDGE_MARGIN: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Region(String),
    Bar(String),
}

impl ElementId {
    /// The shared region name.
    pub fn name(&self) -> &str {
        match self {
            ElementId::Region(name) | ElementId::Bar(name) => name,
        }
    }
}

/// CSS-safe class derived from a region name (`New York` → `New_York`).
pub fn class_name(region: &str) -> String {
    region
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Default strokes per element plus any active overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleTable {
    defaults: BTreeMap<ElementId, StrokeStyle>,
    overrides: BTreeMap<ElementId, StrokeStyle>,
}

impl StyleTable {
    pub fn register(&mut self, id: ElementId, default: StrokeStyle) {
        self.overrides.remove(&id);
        self.defaults.insert(id, default);
    }

    pub fn default_style(&self, id: &ElementId) -> Option<&StrokeStyle> {
        self.defaults.get(id)
    }

    /// The stroke an element should be drawn with right now.
    pub fn current(&self, id: &ElementId) -> Option<&StrokeStyle> {
        self.overrides.get(id).or_else(|| self.defaults.get(id))
    }

    /// Every registered element carrying `name`.
    pub fn members(&self, name: &str) -> Vec<ElementId> {
        self.defaults
            .keys()
            .filter(|id| id.name() == name)
            .cloned()
            .collect()
    }

    fn set(&mut self, id: ElementId, style: StrokeStyle) {
        self.overrides.insert(id, style);
    }

    fn restore(&mut self, id: &ElementId) {
        self.overrides.remove(id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState {
    Idle,
    Highlighted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPosition {
    pub left: f64,
    pub top: f64,
}

/// Floating label contents for one hovered region.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoLabel {
    /// DOM id, `<class>_label`.
    pub id: String,
    pub value: String,
    pub attribute: String,
    pub region: String,
    /// Unset until the first pointer move.
    pub position: Option<LabelPosition>,
}

impl InfoLabel {
    pub fn new(region: &str, value: Option<f64>, attribute: &str) -> Self {
        Self {
            id: format!("{}_label", class_name(region)),
            value: value.map(|v| v.to_string()).unwrap_or_else(|| "No data".to_string()),
            attribute: attribute.to_string(),
            region: region.to_string(),
            position: None,
        }
    }
}

/// Place the label near the pointer, flipping left when it would overflow
/// the right edge and below when the pointer is near the top.
pub fn place_label(client: [f64; 2], label_width: f64, viewport_width: f64) -> LabelPosition {
    let [x, y] = client;
    let left = if x > viewport_width - label_width - EDGE_MARGIN {
        x - label_width - LABEL_OFFSET
    } else {
        x + LABEL_OFFSET
    };
    let top = if y < LABEL_RISE {
        y + LABEL_DROP
    } else {
        y - LABEL_RISE
    };
    LabelPosition { left, top }
}

/// Per-region Idle/Highlighted state, the stroke side table and the label.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlighter {
    styles: StyleTable,
    highlight: StrokeStyle,
    highlighted: BTreeSet<String>,
    label: Option<InfoLabel>,
}

impl Highlighter {
    pub fn new(highlight: StrokeStyle) -> Self {
        Self {
            styles: StyleTable::default(),
            highlight,
            highlighted: BTreeSet::new(),
            label: None,
        }
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn register(&mut self, id: ElementId, default: StrokeStyle) {
        self.styles.register(id, default);
    }

    pub fn state(&self, name: &str) -> HoverState {
        if self.highlighted.contains(name) {
            HoverState::Highlighted
        } else {
            HoverState::Idle
        }
    }

    pub fn label(&self) -> Option<&InfoLabel> {
        self.label.as_ref()
    }

    /// Idle → Highlighted for every element named `label.region`.
    pub fn enter(&mut self, label: InfoLabel) {
        for id in self.styles.members(&label.region) {
            self.styles.set(id, self.highlight.clone());
        }
        self.highlighted.insert(label.region.clone());
        self.label = Some(label);
    }

    /// Highlighted → Idle: restore registered defaults and drop the label.
    pub fn leave(&mut self, name: &str) {
        for id in self.styles.members(name) {
            self.styles.restore(&id);
        }
        self.highlighted.remove(name);
        self.label = None;
    }

    /// Reposition the label; ignored while nothing is highlighted.
    pub fn move_label(&mut self, client: [f64; 2], label_width: f64, viewport_width: f64) {
        if let Some(label) = self.label.as_mut() {
            label.position = Some(place_label(client, label_width, viewport_width));
        }
    }
}
