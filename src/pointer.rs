use crate::core::Vec2;

/// Fraction of the remaining distance the follower covers per frame.
pub const SMOOTHING: f64 = 0.1;
/// Cursor/follower scale while hovering an interactive element.
pub const HOVER_SCALE: f64 = 1.5;

/// Samples raw pointer positions from move events and drives the smoothed
/// follower on frame callbacks. The frame loop never terminates on its own;
/// it simply stops being driven at teardown.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    raw: Vec2,
    smoothed: Vec2,
    hovering: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer-move: the direct cursor indicator jumps to the raw position
    /// immediately; only the follower is smoothed.
    pub fn on_move(&mut self, x: f64, y: f64) {
        self.raw = Vec2::new(x, y);
    }

    /// One animation frame: the follower closes 10% of its remaining
    /// distance to the raw position. Geometric approach, never overshoots.
    pub fn frame(&mut self) {
        self.smoothed = self.smoothed.approach(self.raw, SMOOTHING);
    }

    pub fn hover_enter(&mut self) {
        self.hovering = true;
    }

    pub fn hover_leave(&mut self) {
        self.hovering = false;
    }

    /// Direct cursor indicator position (raw).
    pub fn cursor(&self) -> Vec2 {
        self.raw
    }

    /// Smoothed follower position.
    pub fn follower(&self) -> Vec2 {
        self.smoothed
    }

    /// Uniform scale applied to both cursor and follower.
    pub fn scale(&self) -> f64 {
        if self.hovering { HOVER_SCALE } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follower_monotonically_approaches_fixed_target() {
        let mut tracker = PointerTracker::new();
        tracker.on_move(400.0, 300.0);

        let target = Vec2::new(400.0, 300.0);
        let mut prev = tracker.follower().distance(target);
        for _ in 0..100 {
            tracker.frame();
            let d = tracker.follower().distance(target);
            assert!(d < prev, "distance must strictly decrease");
            assert!(tracker.follower().x <= 400.0);
            assert!(tracker.follower().y <= 300.0);
            prev = d;
        }
        assert!(prev < 1.0);
    }

    #[test]
    fn cursor_tracks_raw_instantly() {
        let mut tracker = PointerTracker::new();
        tracker.on_move(10.0, 20.0);
        assert_eq!(tracker.cursor(), Vec2::new(10.0, 20.0));
        // Follower has not moved yet.
        assert_eq!(tracker.follower(), Vec2::default());
    }

    #[test]
    fn hover_scales_and_reverts() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.scale(), 1.0);
        tracker.hover_enter();
        assert_eq!(tracker.scale(), HOVER_SCALE);
        tracker.hover_leave();
        assert_eq!(tracker.scale(), 1.0);
    }

    #[test]
    fn frame_loop_is_stable_at_target() {
        let mut tracker = PointerTracker::new();
        tracker.on_move(50.0, 50.0);
        for _ in 0..500 {
            tracker.frame();
        }
        let settled = tracker.follower();
        tracker.frame();
        assert!(settled.distance(tracker.follower()) < 1e-6);
    }
}
