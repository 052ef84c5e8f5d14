use crate::{
    core::Viewport,
    page::{Page, Role},
    style::StyleTable,
};

/// Per-index speed increment: the i-th floating element moves at
/// `(i+1) * 0.05` of the scroll offset.
pub const SPEED_STEP: f64 = 0.05;

/// Vertical offset of the `index`-th floating element for a scroll offset.
/// Pure function of its inputs; identical offsets yield identical results.
pub fn offset(scroll_y: f64, index: usize) -> f64 {
    scroll_y * (index as f64 + 1.0) * SPEED_STEP
}

/// Recompute every floating card's offset from the current scroll position.
/// No memory of previous state: always computed from scratch.
pub fn apply(page: &Page, viewport: &Viewport, styles: &mut StyleTable) {
    for (index, card) in page.by_role(Role::FloatingCard).enumerate() {
        styles.get_mut(card).translate_y = offset(viewport.scroll_y, index);
    }
}
