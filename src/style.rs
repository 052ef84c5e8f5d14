use std::collections::BTreeSet;

use crate::core::ElementId;

/// Numeric style properties a tween can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProp {
    Opacity,
    Scale,
    TranslateX,
    TranslateY,
    WidthPct,
}

/// Evaluated presentation state of one element. This table is the engine's
/// stand-in for DOM style/class/text mutation: every effect lands here, and
/// hosts read it back to paint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleState {
    pub opacity: f64,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub width_pct: f64,
    pub visible: bool,
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub classes: BTreeSet<String>,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            width_pct: 0.0,
            visible: true,
            disabled: false,
            text: None,
            classes: BTreeSet::new(),
        }
    }
}

impl StyleState {
    pub fn get(&self, prop: StyleProp) -> f64 {
        match prop {
            StyleProp::Opacity => self.opacity,
            StyleProp::Scale => self.scale,
            StyleProp::TranslateX => self.translate_x,
            StyleProp::TranslateY => self.translate_y,
            StyleProp::WidthPct => self.width_pct,
        }
    }

    pub fn set(&mut self, prop: StyleProp, value: f64) {
        match prop {
            StyleProp::Opacity => self.opacity = value,
            StyleProp::Scale => self.scale = value,
            StyleProp::TranslateX => self.translate_x = value,
            StyleProp::TranslateY => self.translate_y = value,
            StyleProp::WidthPct => self.width_pct = value,
        }
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn toggle_class(&mut self, class: &str) {
        if !self.classes.remove(class) {
            self.classes.insert(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Owned style state for every page element, indexed by [`ElementId`].
/// Mutations within one event handler are applied in the order issued.
#[derive(Clone, Debug, serde::Serialize)]
pub struct StyleTable {
    states: Vec<StyleState>,
}

impl StyleTable {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![StyleState::default(); len],
        }
    }

    pub fn get(&self, id: ElementId) -> &StyleState {
        &self.states[id.0]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut StyleState {
        &mut self.states[id.0]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
