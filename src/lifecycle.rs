use crate::{
    core::Millis,
    ease::Ease,
    page::{Page, Role},
    style::StyleProp,
    tween::{PropTrack, Timeline, TimelineDefaults, TweenSpec},
};

/// Scroll offset past which the navbar takes its `scrolled` class.
pub const NAVBAR_SCROLLED_AT: f64 = 100.0;
/// Scroll offset past which the back-to-top control takes its `show` class.
pub const BACK_TO_TOP_AT: f64 = 500.0;
/// Fixed-header allowance subtracted from a nav target's document top.
pub const NAV_SCROLL_OFFSET: f64 = 80.0;
/// Duration of the smooth-scroll glide.
pub const GLIDE_DURATION: Millis = Millis(600);

pub const SENDING_TEXT: &str = "Sending...";
pub const SENT_TEXT: &str = "Message Sent!";
/// Delay before the simulated submission reports success.
pub const FORM_SEND_DELAY: Millis = Millis(2000);
/// How long the success state lingers before the button reverts.
pub const FORM_RESET_DELAY: Millis = Millis(3000);

/// Simulated contact-form submission. No network is involved; the phases are
/// driven purely by scheduled completions.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Sending,
    Sent,
}

#[derive(Clone, Debug, Default)]
pub struct FormState {
    phase: FormPhase,
    /// Button label to restore after the cycle completes.
    original_text: Option<String>,
}

impl FormState {
    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Begin a submission. Returns false (and changes nothing) when one is
    /// already in flight.
    pub fn submit(&mut self, current_text: Option<String>) -> bool {
        if self.phase != FormPhase::Idle {
            return false;
        }
        self.phase = FormPhase::Sending;
        self.original_text = current_text;
        true
    }

    pub fn sent(&mut self) {
        if self.phase == FormPhase::Sending {
            self.phase = FormPhase::Sent;
        }
    }

    /// Finish the cycle, yielding the text to restore.
    pub fn reset(&mut self) -> Option<String> {
        self.phase = FormPhase::Idle;
        self.original_text.take()
    }
}

/// Animated scroll offset for smooth scrolling, eased in and out like the
/// browser's native smooth scroll. Each sampled step feeds back through the
/// normal scroll path so scroll-linked effects stay consistent.
#[derive(Clone, Copy, Debug)]
pub struct ScrollGlide {
    pub from: f64,
    pub to: f64,
    pub start: Millis,
    pub duration: Millis,
    pub ease: Ease,
}

impl ScrollGlide {
    pub fn new(from: f64, to: f64, start: Millis) -> Self {
        Self {
            from,
            to,
            start,
            duration: GLIDE_DURATION,
            ease: Ease::InOutQuad,
        }
    }

    /// Scroll offset at `now`, plus whether the glide has finished.
    pub fn sample(&self, now: Millis) -> (f64, bool) {
        let elapsed = now.saturating_sub(self.start).0;
        if elapsed >= self.duration.0 || self.duration.0 == 0 {
            return (self.to, true);
        }
        let t = self.ease.apply(elapsed as f64 / self.duration.0 as f64);
        (crate::core::lerp(self.from, self.to, t), false)
    }
}

/// The page-load hero sequence: hero items rise in with overlapping starts,
/// then the floating cards pop in with a staggered overshoot.
pub fn hero_timeline(page: &Page) -> Timeline {
    let defaults = TimelineDefaults {
        duration: Millis(800),
        ease: Ease::OutCubic,
    };
    let mut tl = Timeline::new(defaults);

    for (index, item) in page.by_role(Role::HeroItem).enumerate() {
        let spec = TweenSpec::new(item, defaults.duration, defaults.ease)
            .track(PropTrack::from_to(StyleProp::Opacity, 0.0, 1.0))
            .track(PropTrack::from_to(StyleProp::TranslateY, 50.0, 0.0));
        if index == 0 {
            tl.then(spec);
        } else {
            tl.overlap(spec, Millis(400));
        }
    }

    // Floating cards share one timeline position; the stagger lives in their
    // per-card delay.
    for (index, card) in page.by_role(Role::FloatingCard).enumerate() {
        let spec = TweenSpec::new(card, Millis(1000), Ease::OutBack)
            .track(PropTrack::from_to(StyleProp::Opacity, 0.0, 1.0))
            .track(PropTrack::from_to(StyleProp::Scale, 0.0, 1.0))
            .delay(Millis(200 * index as u64));
        if index == 0 {
            tl.overlap(spec, Millis(600));
        } else {
            tl.with_previous(spec);
        }
    }

    tl
}
