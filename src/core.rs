/// Milliseconds on the engine's virtual clock. Used both as an absolute
/// timestamp (since engine construction) and as a duration.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    pub fn saturating_sub(self, rhs: Millis) -> Millis {
        Millis(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Millis {
    fn add_assign(&mut self, rhs: Millis) {
        *self = *self + rhs;
    }
}

/// Index of an element in the page's element list, assigned at load and
/// stable for the page's lifetime.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct ElementId(pub usize);

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Move a fixed fraction of the remaining distance toward `target`.
    /// With `factor` in (0,1] the result never overshoots the target.
    pub fn approach(self, target: Vec2, factor: f64) -> Vec2 {
        Vec2 {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
        }
    }

    pub fn distance(self, other: Vec2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Current scroll state of the host viewport.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub height: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            scroll_y: 0.0,
        }
    }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_add_saturates() {
        assert_eq!(Millis(u64::MAX) + Millis(1), Millis(u64::MAX));
        assert_eq!(Millis(3).saturating_sub(Millis(5)), Millis::ZERO);
    }

    #[test]
    fn approach_converges_without_overshoot() {
        let target = Vec2::new(100.0, 40.0);
        let mut p = Vec2::default();
        let mut prev = p.distance(target);
        for _ in 0..64 {
            p = p.approach(target, 0.1);
            let d = p.distance(target);
            assert!(d < prev);
            assert!(p.x <= target.x && p.y <= target.y);
            prev = d;
        }
        assert!(prev < 1.0);
    }
}
