use tracing::warn;

use crate::{
    core::{ElementId, Millis},
    ease::Ease,
    page::{Page, Role},
    style::{StyleProp, StyleTable},
    tween::{PropTrack, TweenSpec, Tweening},
};

/// Starting offsets a reveal animates away from. Rest state is always
/// opacity 1, no translation, scale 1.
#[derive(Clone, Copy, Debug)]
pub struct RevealFrom {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for RevealFrom {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            translate_x: 0.0,
            translate_y: 50.0,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RevealSpec {
    pub from: RevealFrom,
    pub duration: Millis,
    /// Base delay before the (first) tween starts.
    pub delay: Millis,
    /// Per-child start offset when the action animates a group.
    pub stagger: Millis,
    pub ease: Ease,
    /// Group members animated instead of the binding target when non-empty.
    pub children: Vec<ElementId>,
}

impl Default for RevealSpec {
    fn default() -> Self {
        Self {
            from: RevealFrom::default(),
            duration: Millis(800),
            delay: Millis::ZERO,
            stagger: Millis::ZERO,
            ease: Ease::OutCubic,
            children: Vec::new(),
        }
    }
}

/// What a trigger binding does when it fires. Counter and progress actions
/// operate on their whole role group, matching the reference page where one
/// zone crossing starts every stat counter / skill bar at once.
#[derive(Clone, Debug)]
pub enum EffectAction {
    Reveal(RevealSpec),
    CounterStart,
    ProgressFill { duration: Millis, ease: Ease },
}

/// Animate the binding target (or its group) from the declared offsets to
/// rest, staggering group members by index.
pub fn run_reveal(
    target: ElementId,
    spec: &RevealSpec,
    now: Millis,
    tweens: &mut dyn Tweening,
    styles: &mut StyleTable,
) {
    let singleton = [target];
    let members: &[ElementId] = if spec.children.is_empty() {
        &singleton
    } else {
        &spec.children
    };

    for (index, &member) in members.iter().enumerate() {
        let delay = Millis(spec.delay.0 + spec.stagger.0 * index as u64);
        let tween = TweenSpec::new(member, spec.duration, spec.ease)
            .track(PropTrack::from_to(StyleProp::Opacity, spec.from.opacity, 1.0))
            .track(PropTrack::from_to(
                StyleProp::TranslateX,
                spec.from.translate_x,
                0.0,
            ))
            .track(PropTrack::from_to(
                StyleProp::TranslateY,
                spec.from.translate_y,
                0.0,
            ))
            .track(PropTrack::from_to(StyleProp::Scale, spec.from.scale, 1.0))
            .delay(delay);
        tweens.animate(tween, now, styles);
    }
}

/// Fill every progress bar toward its declared percentage. A bar with a
/// missing or unparseable `data-progress` is skipped with a warning; the
/// others still animate.
pub fn run_progress_fill(
    page: &Page,
    duration: Millis,
    ease: Ease,
    now: Millis,
    tweens: &mut dyn Tweening,
    styles: &mut StyleTable,
) {
    for bar in page.by_role(Role::ProgressBar) {
        let el = page.element(bar);
        let target = match el
            .dataset
            .progress
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
        {
            Some(v) if v.is_finite() => v.clamp(0.0, 100.0),
            _ => {
                warn!(id = %el.id, "progress bar has no usable data-progress, skipping");
                continue;
            }
        };

        let tween = TweenSpec::new(bar, duration, ease)
            .track(PropTrack::to(StyleProp::WidthPct, target));
        tweens.animate(tween, now, styles);
    }
}
