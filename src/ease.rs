#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    OutQuad,
    /// Symmetric curve used for the smooth-scroll glide (native
    /// `behavior: 'smooth'` shape).
    InOutQuad,
    /// The default reveal curve ("power3.out" in the reference stylesheet).
    OutCubic,
    /// Decelerating with a small overshoot past the end value before
    /// settling. Output may exceed 1.0 mid-curve; endpoints are exact.
    OutBack,
}

/// Overshoot constant for [`Ease::OutBack`] (the classic 1.70158 tuned so the
/// curve peaks roughly 10% past the target).
const BACK_OVERSHOOT: f64 = 1.70158;

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::OutBack => {
                let c1 = BACK_OVERSHOOT;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
        }
    }
}
