use crate::{
    core::{ElementId, Millis, lerp},
    ease::Ease,
    style::{StyleProp, StyleTable},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenId(pub u64);

/// One animated property. `from: None` captures the element's current value
/// when the tween is submitted.
#[derive(Clone, Debug)]
pub struct PropTrack {
    pub prop: StyleProp,
    pub from: Option<f64>,
    pub to: f64,
}

impl PropTrack {
    pub fn to(prop: StyleProp, to: f64) -> Self {
        Self {
            prop,
            from: None,
            to,
        }
    }

    pub fn from_to(prop: StyleProp, from: f64, to: f64) -> Self {
        Self {
            prop,
            from: Some(from),
            to,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TweenSpec {
    pub target: ElementId,
    pub tracks: Vec<PropTrack>,
    pub duration: Millis,
    pub delay: Millis,
    pub ease: Ease,
    /// Visibility applied when the tween completes (the `display` toggle of a
    /// filter hide). Applied only at the end so content stays painted while
    /// fading out.
    pub end_visibility: Option<bool>,
}

impl TweenSpec {
    pub fn new(target: ElementId, duration: Millis, ease: Ease) -> Self {
        Self {
            target,
            tracks: Vec::new(),
            duration,
            delay: Millis::ZERO,
            ease,
            end_visibility: None,
        }
    }

    pub fn track(mut self, track: PropTrack) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn delay(mut self, delay: Millis) -> Self {
        self.delay = delay;
        self
    }

    pub fn end_visibility(mut self, visible: bool) -> Self {
        self.end_visibility = Some(visible);
        self
    }
}

/// The tweening capability: animate numeric style properties over a duration
/// with an easing curve. The engine talks only to this trait so it stays
/// testable (and degradable) without a live animation provider.
pub trait Tweening {
    fn animate(&mut self, spec: TweenSpec, now: Millis, styles: &mut StyleTable) -> TweenId;

    /// Advance all active tweens to `now`, writing interpolated values into
    /// the style table. Completed tweens land exactly on their end values.
    fn advance(&mut self, now: Millis, styles: &mut StyleTable);

    fn active_count(&self) -> usize;
}

#[derive(Debug)]
struct ActiveTween {
    id: TweenId,
    target: ElementId,
    tracks: Vec<(StyleProp, f64, f64)>, // (prop, from, to)
    start: Millis,
    duration: Millis,
    ease: Ease,
    end_visibility: Option<bool>,
}

/// The built-in time-based provider.
#[derive(Debug, Default)]
pub struct TweenRuntime {
    active: Vec<ActiveTween>,
    next_id: u64,
}

impl TweenRuntime {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tweening for TweenRuntime {
    fn animate(&mut self, spec: TweenSpec, now: Millis, styles: &mut StyleTable) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;

        // `from` values are captured at submission, not when the delay
        // elapses; overlapping tweens on the same property are last-writer-
        // wins per advance, matching issue order.
        let state = styles.get(spec.target);
        let tracks = spec
            .tracks
            .iter()
            .map(|t| (t.prop, t.from.unwrap_or_else(|| state.get(t.prop)), t.to))
            .collect();

        self.active.push(ActiveTween {
            id,
            target: spec.target,
            tracks,
            start: now + spec.delay,
            duration: spec.duration,
            ease: spec.ease,
            end_visibility: spec.end_visibility,
        });
        id
    }

    fn advance(&mut self, now: Millis, styles: &mut StyleTable) {
        self.active.retain_mut(|tw| {
            if now < tw.start {
                return true;
            }

            let elapsed = now.saturating_sub(tw.start).0;
            let done = elapsed >= tw.duration.0 || tw.duration.0 == 0;
            let state = styles.get_mut(tw.target);

            if done {
                for &(prop, _, to) in &tw.tracks {
                    state.set(prop, to);
                }
                if let Some(visible) = tw.end_visibility {
                    state.visible = visible;
                }
                return false;
            }

            let t = elapsed as f64 / tw.duration.0 as f64;
            let te = tw.ease.apply(t);
            for &(prop, from, to) in &tw.tracks {
                state.set(prop, lerp(from, to, te));
            }
            true
        });
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// Degraded provider used when the animation capability is unavailable:
/// content lands in its final state immediately, unanimated.
#[derive(Debug, Default)]
pub struct StaticTweening {
    next_id: u64,
}

impl StaticTweening {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tweening for StaticTweening {
    fn animate(&mut self, spec: TweenSpec, _now: Millis, styles: &mut StyleTable) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;

        let state = styles.get_mut(spec.target);
        for track in &spec.tracks {
            state.set(track.prop, track.to);
        }
        if let Some(visible) = spec.end_visibility {
            state.visible = visible;
        }
        id
    }

    fn advance(&mut self, _now: Millis, _styles: &mut StyleTable) {}

    fn active_count(&self) -> usize {
        0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TimelineDefaults {
    pub duration: Millis,
    pub ease: Ease,
}

/// Ordered sequence of tweens with a moving cursor. `then` appends after the
/// previous item; `overlap` starts an item a fixed time before the cursor,
/// reproducing the reference timeline's `"-=0.4"` positions.
#[derive(Debug)]
pub struct Timeline {
    defaults: TimelineDefaults,
    cursor: Millis,
    last_start: Millis,
    items: Vec<(Millis, TweenSpec)>,
}

impl Timeline {
    pub fn new(defaults: TimelineDefaults) -> Self {
        Self {
            defaults,
            cursor: Millis::ZERO,
            last_start: Millis::ZERO,
            items: Vec::new(),
        }
    }

    pub fn defaults(&self) -> TimelineDefaults {
        self.defaults
    }

    pub fn then(&mut self, spec: TweenSpec) -> &mut Self {
        self.push(self.cursor, spec);
        self
    }

    pub fn overlap(&mut self, spec: TweenSpec, back: Millis) -> &mut Self {
        let start = self.cursor.saturating_sub(back);
        self.push(start, spec);
        self
    }

    /// Start an item at the same position as the previous item.
    pub fn with_previous(&mut self, spec: TweenSpec) -> &mut Self {
        let start = self.last_start;
        self.push(start, spec);
        self
    }

    fn push(&mut self, start: Millis, spec: TweenSpec) {
        let end = start + spec.delay + spec.duration;
        if end > self.cursor {
            self.cursor = end;
        }
        self.last_start = start;
        self.items.push((start, spec));
    }

    /// Submit every item, offset from `now`.
    pub fn play(self, tweens: &mut dyn Tweening, now: Millis, styles: &mut StyleTable) {
        for (start, mut spec) in self.items {
            spec.delay += start;
            tweens.animate(spec, now, styles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StyleTable {
        StyleTable::new(3)
    }

    #[test]
    fn tween_interpolates_and_snaps_to_end() {
        let mut rt = TweenRuntime::new();
        let mut styles = table();

        let spec = TweenSpec::new(ElementId(0), Millis(100), Ease::Linear)
            .track(PropTrack::from_to(StyleProp::Opacity, 0.0, 1.0));
        rt.animate(spec, Millis::ZERO, &mut styles);

        rt.advance(Millis(50), &mut styles);
        assert!((styles.get(ElementId(0)).opacity - 0.5).abs() < 1e-9);

        rt.advance(Millis(100), &mut styles);
        assert_eq!(styles.get(ElementId(0)).opacity, 1.0);
        assert_eq!(rt.active_count(), 0);
    }

    #[test]
    fn delay_holds_start_value() {
        let mut rt = TweenRuntime::new();
        let mut styles = table();

        let spec = TweenSpec::new(ElementId(0), Millis(100), Ease::Linear)
            .track(PropTrack::from_to(StyleProp::TranslateY, 50.0, 0.0))
            .delay(Millis(200));
        rt.animate(spec, Millis::ZERO, &mut styles);

        rt.advance(Millis(100), &mut styles);
        assert_eq!(styles.get(ElementId(0)).translate_y, 0.0); // untouched
        rt.advance(Millis(250), &mut styles);
        assert!((styles.get(ElementId(0)).translate_y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn from_captures_current_value() {
        let mut rt = TweenRuntime::new();
        let mut styles = table();
        styles.get_mut(ElementId(1)).width_pct = 20.0;

        let spec = TweenSpec::new(ElementId(1), Millis(100), Ease::Linear)
            .track(PropTrack::to(StyleProp::WidthPct, 80.0));
        rt.animate(spec, Millis::ZERO, &mut styles);

        rt.advance(Millis(50), &mut styles);
        assert!((styles.get(ElementId(1)).width_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn end_visibility_applies_only_at_completion() {
        let mut rt = TweenRuntime::new();
        let mut styles = table();

        let spec = TweenSpec::new(ElementId(0), Millis(100), Ease::Linear)
            .track(PropTrack::to(StyleProp::Opacity, 0.0))
            .end_visibility(false);
        rt.animate(spec, Millis::ZERO, &mut styles);

        rt.advance(Millis(99), &mut styles);
        assert!(styles.get(ElementId(0)).visible);
        rt.advance(Millis(100), &mut styles);
        assert!(!styles.get(ElementId(0)).visible);
    }

    #[test]
    fn static_provider_lands_end_state_immediately() {
        let mut st = StaticTweening::new();
        let mut styles = table();

        let spec = TweenSpec::new(ElementId(2), Millis(1000), Ease::OutCubic)
            .track(PropTrack::from_to(StyleProp::Opacity, 0.0, 1.0))
            .track(PropTrack::to(StyleProp::WidthPct, 75.0));
        st.animate(spec, Millis::ZERO, &mut styles);

        assert_eq!(styles.get(ElementId(2)).opacity, 1.0);
        assert_eq!(styles.get(ElementId(2)).width_pct, 75.0);
    }

    #[test]
    fn timeline_overlap_moves_items_earlier() {
        let defaults = TimelineDefaults {
            duration: Millis(800),
            ease: Ease::OutCubic,
        };
        let mut tl = Timeline::new(defaults);
        tl.then(
            TweenSpec::new(ElementId(0), Millis(800), Ease::Linear)
                .track(PropTrack::from_to(StyleProp::Opacity, 0.0, 1.0)),
        );
        tl.overlap(
            TweenSpec::new(ElementId(1), Millis(800), Ease::Linear)
                .track(PropTrack::from_to(StyleProp::Opacity, 0.0, 1.0)),
            Millis(400),
        );

        let mut rt = TweenRuntime::new();
        let mut styles = table();
        tl.play(&mut rt, Millis::ZERO, &mut styles);

        // Second item starts at 400, so at 800 it is halfway.
        rt.advance(Millis(800), &mut styles);
        assert_eq!(styles.get(ElementId(0)).opacity, 1.0);
        assert!((styles.get(ElementId(1)).opacity - 0.5).abs() < 1e-9);
    }
}
