use crate::{
    core::{ElementId, Millis},
    ease::Ease,
    page::{Page, Role},
    style::{StyleProp, StyleTable},
    tween::{PropTrack, TweenSpec, Tweening},
};

/// Duration of the card show/hide tween.
const FILTER_TWEEN: Millis = Millis(500);
/// Scale a hidden card shrinks to while fading out.
const HIDDEN_SCALE: f64 = 0.8;

/// The single active card category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    Category(String),
}

impl Selection {
    /// Parse a filter button's `data-category`. Absent or "all" selects all.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim()).filter(|s| !s.is_empty()) {
            None => Self::All,
            Some(s) if s.eq_ignore_ascii_case("all") => Self::All,
            Some(s) => Self::Category(s.to_string()),
        }
    }

    pub fn matches(&self, card_category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Category(want) => card_category.is_some_and(|c| c == want),
        }
    }
}

/// The one mutable filter state: which category is active.
#[derive(Clone, Debug)]
pub struct FilterState {
    active: Selection,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active: Selection::All,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &Selection {
        &self.active
    }

    /// Apply a button click: deactivate every other button and mark the
    /// clicked one active synchronously, then animate each card toward its
    /// new visibility. There is never an intermediate state with zero or
    /// multiple active buttons.
    pub fn apply(
        &mut self,
        clicked: ElementId,
        selection: Selection,
        page: &Page,
        now: Millis,
        tweens: &mut dyn Tweening,
        styles: &mut StyleTable,
    ) {
        for button in page.by_role(Role::FilterButton) {
            if button == clicked {
                styles.get_mut(button).add_class("active");
            } else {
                styles.get_mut(button).remove_class("active");
            }
        }
        self.active = selection;

        for card in page.by_role(Role::Card) {
            let category = page.element(card).dataset.category.as_deref();
            if self.active.matches(category) {
                // Shown cards become visible up front so they paint while
                // fading in.
                styles.get_mut(card).visible = true;
                let tween = TweenSpec::new(card, FILTER_TWEEN, Ease::OutQuad)
                    .track(PropTrack::to(StyleProp::Opacity, 1.0))
                    .track(PropTrack::to(StyleProp::Scale, 1.0));
                tweens.animate(tween, now, styles);
            } else {
                let tween = TweenSpec::new(card, FILTER_TWEEN, Ease::OutQuad)
                    .track(PropTrack::to(StyleProp::Opacity, 0.0))
                    .track(PropTrack::to(StyleProp::Scale, HIDDEN_SCALE))
                    .end_visibility(false);
                tweens.animate(tween, now, styles);
            }
        }
    }
}
