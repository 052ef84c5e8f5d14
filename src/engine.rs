use std::collections::BTreeMap;

use tracing::{error, info, warn};

use crate::{
    clock::{Scheduler, TimerHandle, TimerTask},
    core::{ElementId, Millis, Viewport},
    counter::{self, CounterRamp},
    ease::Ease,
    effects::{self, EffectAction, RevealFrom, RevealSpec},
    error::ScrollwireResult,
    filter::{FilterState, Selection},
    lifecycle::{self, FormState, ScrollGlide},
    page::{Page, Role},
    parallax,
    particles::{self, ParticleField},
    pointer::PointerTracker,
    registry::{Binding, ReplayPolicy, TriggerRegistry},
    style::StyleTable,
    tween::{StaticTweening, TweenRuntime, Tweening},
    viewport::ViewportObserver,
};

/// A host signal delivered to the engine. Everything the page reacts to
/// arrives as one of these; there is no other input path.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Scroll { y: f64 },
    PointerMove { x: f64, y: f64 },
    HoverEnter { id: String },
    HoverLeave { id: String },
    Click { id: String },
    Submit,
    /// One animation-frame callback (drives the pointer follower).
    Frame,
}

struct CounterState {
    ramp: CounterRamp,
    timer: TimerHandle,
}

/// The page engine: owns the trigger registry, viewport observer, tween
/// provider, virtual clock, and all per-page UI state. Single-threaded; all
/// work happens inside [`Engine::handle`] and [`Engine::advance`].
pub struct Engine {
    page: Page,
    styles: StyleTable,
    viewport: Viewport,
    now: Millis,
    scheduler: Scheduler,
    tweens: Box<dyn Tweening>,
    registry: TriggerRegistry,
    observer: ViewportObserver,
    filter: FilterState,
    pointer: PointerTracker,
    particles: ParticleField,
    spawner: Option<TimerHandle>,
    counters: BTreeMap<usize, CounterState>,
    form: FormState,
    glide: Option<ScrollGlide>,
}

impl Engine {
    pub fn new(page: Page, seed: u64) -> ScrollwireResult<Self> {
        Self::with_provider(page, seed, Some(Box::new(TweenRuntime::new())))
    }

    /// Construct with an explicit tween provider. `None` means the animation
    /// capability is unavailable: this is fatal to all animation features, so
    /// it is diagnosed once here and every effect degrades to its static end
    /// state.
    pub fn with_provider(
        page: Page,
        seed: u64,
        provider: Option<Box<dyn Tweening>>,
    ) -> ScrollwireResult<Self> {
        page.validate()?;

        let tweens: Box<dyn Tweening> = match provider {
            Some(t) => t,
            None => {
                error!("animation provider unavailable; content will be static");
                Box::new(StaticTweening::new())
            }
        };

        let mut engine = Self {
            styles: StyleTable::new(page.len()),
            viewport: Viewport::new(page.viewport_height),
            now: Millis::ZERO,
            scheduler: Scheduler::new(),
            tweens,
            registry: TriggerRegistry::new(),
            observer: ViewportObserver::new(),
            filter: FilterState::new(),
            pointer: PointerTracker::new(),
            particles: ParticleField::new(seed),
            spawner: None,
            counters: BTreeMap::new(),
            form: FormState::default(),
            glide: None,
            page,
        };

        engine.register_bindings();
        engine.start_particles();
        engine.play_hero();
        engine.log_census();

        // Elements already inside their trigger zone at load fire now.
        let due = engine.observer.scan(&engine.page, &engine.viewport);
        engine.fire_bindings(due);

        Ok(engine)
    }

    /// Dispatch one host event. Synchronous: all style mutations it causes
    /// are applied, in issue order, before this returns.
    #[tracing::instrument(skip(self))]
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Scroll { y } => {
                // Manual scrolling takes over from any smooth-scroll glide.
                self.glide = None;
                self.set_scroll(y);
            }
            Event::PointerMove { x, y } => self.pointer.on_move(x, y),
            Event::HoverEnter { id } => {
                if let Some(el) = self.resolve(&id, "hover")
                    && self.page.element(el).role.is_interactive()
                {
                    self.pointer.hover_enter();
                }
            }
            Event::HoverLeave { id } => {
                if let Some(el) = self.resolve(&id, "hover")
                    && self.page.element(el).role.is_interactive()
                {
                    self.pointer.hover_leave();
                }
            }
            Event::Click { id } => {
                if let Some(el) = self.resolve(&id, "click") {
                    self.click(el);
                }
            }
            Event::Submit => self.submit(),
            Event::Frame => self.pointer.frame(),
        }
    }

    /// Advance the virtual clock by `ms`, resuming timers and tweens in
    /// strict timestamp order.
    pub fn advance(&mut self, ms: u64) {
        let end = self.now + Millis(ms);
        while let Some((due, task)) = self.scheduler.pop_due(end) {
            self.now = due;
            self.step_glide();
            self.tweens.advance(self.now, &mut self.styles);
            self.run_timer(task);
        }
        self.now = end;
        self.step_glide();
        self.tweens.advance(self.now, &mut self.styles);
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn style(&self, id: &str) -> Option<&crate::style::StyleState> {
        self.page.find(id).map(|el| self.styles.get(el))
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn form_phase(&self) -> &lifecycle::FormPhase {
        self.form.phase()
    }

    pub fn active_tweens(&self) -> usize {
        self.tweens.active_count()
    }

    /// Stop spawning background particles. Live particles still expire on
    /// their own schedule.
    pub fn stop_particles(&mut self) {
        if let Some(handle) = self.spawner.take() {
            self.scheduler.cancel(handle);
        }
    }

    // ---- wiring ----------------------------------------------------------

    /// Build the page's trigger bindings. All are registered `Once`: the
    /// reference page configures no reverse action, so its nominally
    /// replayable triggers are intentionally fire-once.
    fn register_bindings(&mut self) {
        let mut planned: Vec<Binding> = Vec::new();

        for header in self.page.by_role(Role::SectionHeader) {
            planned.push(Binding {
                target: header,
                threshold_pct: 80.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        translate_y: 30.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(800),
                    ..RevealSpec::default()
                }),
            });
        }

        for section in self.page.by_role(Role::Section) {
            planned.push(Binding {
                target: section,
                threshold_pct: 80.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    duration: Millis(1000),
                    ..RevealSpec::default()
                }),
            });
        }

        for image in self.page.by_role(Role::AboutImage) {
            planned.push(Binding {
                target: image,
                threshold_pct: 70.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        translate_x: -100.0,
                        translate_y: 0.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(1000),
                    ..RevealSpec::default()
                }),
            });
        }

        let about_text: Vec<ElementId> = self.page.by_role(Role::AboutText).collect();
        if let Some(&first) = about_text.first() {
            planned.push(Binding {
                target: first,
                threshold_pct: 70.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        translate_x: 100.0,
                        translate_y: 0.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(1000),
                    stagger: Millis(200),
                    children: about_text.clone(),
                    ..RevealSpec::default()
                }),
            });
        }

        for item in self.page.by_role(Role::TimelineItem).collect::<Vec<_>>() {
            // Items slide in from their own side of the timeline spine.
            let from_x = match self.page.element(item).dataset.side.as_deref() {
                Some("left") => -100.0,
                _ => 100.0,
            };
            planned.push(Binding {
                target: item,
                threshold_pct: 80.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        translate_x: from_x,
                        translate_y: 0.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(1000),
                    ..RevealSpec::default()
                }),
            });
        }

        for icon in self.page.by_role(Role::TimelineIcon) {
            planned.push(Binding {
                target: icon,
                threshold_pct: 80.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        scale: 0.0,
                        translate_y: 0.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(800),
                    ease: Ease::OutBack,
                    ..RevealSpec::default()
                }),
            });
        }

        for (index, card) in self.page.by_role(Role::Card).collect::<Vec<_>>().into_iter().enumerate() {
            planned.push(Binding {
                target: card,
                threshold_pct: 85.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    delay: Millis(100 * index as u64),
                    ..RevealSpec::default()
                }),
            });
        }

        let socials: Vec<ElementId> = self.page.by_role(Role::SocialLink).collect();
        match socials.first() {
            Some(&first) => planned.push(Binding {
                target: first,
                threshold_pct: 80.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        scale: 0.0,
                        translate_y: 0.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(500),
                    stagger: Millis(100),
                    ease: Ease::OutBack,
                    children: socials.clone(),
                    ..RevealSpec::default()
                }),
            }),
            None => warn!("no social links found for animation"),
        }

        for info in self.page.by_role(Role::ContactInfo) {
            planned.push(Binding {
                target: info,
                threshold_pct: 70.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        translate_x: -50.0,
                        translate_y: 0.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(1000),
                    ..RevealSpec::default()
                }),
            });
        }

        for wrapper in self.page.by_role(Role::ContactForm) {
            planned.push(Binding {
                target: wrapper,
                threshold_pct: 70.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        translate_x: 50.0,
                        translate_y: 0.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(1000),
                    ..RevealSpec::default()
                }),
            });
        }

        let methods: Vec<ElementId> = self.page.by_role(Role::ContactMethod).collect();
        if let Some(&first) = methods.first() {
            planned.push(Binding {
                target: first,
                threshold_pct: 80.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        translate_x: -30.0,
                        translate_y: 0.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(600),
                    stagger: Millis(200),
                    children: methods.clone(),
                    ..RevealSpec::default()
                }),
            });
        }

        let groups: Vec<ElementId> = self.page.by_role(Role::FormGroup).collect();
        if let Some(&first) = groups.first() {
            planned.push(Binding {
                target: first,
                threshold_pct: 80.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::Reveal(RevealSpec {
                    from: RevealFrom {
                        translate_y: 30.0,
                        ..RevealFrom::default()
                    },
                    duration: Millis(600),
                    stagger: Millis(150),
                    children: groups.clone(),
                    ..RevealSpec::default()
                }),
            });
        }

        if let Some(first) = self.page.by_role(Role::Counter).next() {
            planned.push(Binding {
                target: first,
                threshold_pct: 80.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::CounterStart,
            });
        }

        if let Some(first) = self.page.by_role(Role::ProgressBar).next() {
            planned.push(Binding {
                target: first,
                threshold_pct: 80.0,
                policy: ReplayPolicy::Once,
                action: EffectAction::ProgressFill {
                    duration: Millis(1500),
                    ease: Ease::OutQuad,
                },
            });
        }

        for binding in planned {
            let threshold = binding.threshold_pct;
            let target = binding.target;
            let handle = self.registry.register(binding);
            self.observer.watch(&self.page, target, threshold, handle);
        }
    }

    fn start_particles(&mut self) {
        if self.page.by_role(Role::Background).next().is_none() {
            warn!("no background container; particle spawner not started");
            return;
        }
        let handle = self.scheduler.schedule(
            self.now + particles::SPAWN_PERIOD,
            Some(particles::SPAWN_PERIOD),
            TimerTask::ParticleSpawn,
        );
        self.spawner = Some(handle);
    }

    fn play_hero(&mut self) {
        lifecycle::hero_timeline(&self.page).play(&mut *self.tweens, self.now, &mut self.styles);
    }

    fn log_census(&self) {
        info!(
            cards = self.page.by_role(Role::Card).count(),
            counters = self.page.by_role(Role::Counter).count(),
            progress_bars = self.page.by_role(Role::ProgressBar).count(),
            social_links = self.page.by_role(Role::SocialLink).count(),
            floating_cards = self.page.by_role(Role::FloatingCard).count(),
            "page loaded"
        );
    }

    // ---- event handling --------------------------------------------------

    fn resolve(&self, id: &str, what: &str) -> Option<ElementId> {
        let found = self.page.find(id);
        if found.is_none() {
            warn!(id, what, "event for unknown element, skipping");
        }
        found
    }

    fn set_scroll(&mut self, y: f64) {
        self.viewport.scroll_y = y.max(0.0);
        self.on_scroll();
    }

    fn on_scroll(&mut self) {
        let scrolled = self.viewport.scroll_y;

        for navbar in self.page.by_role(Role::Navbar) {
            let state = self.styles.get_mut(navbar);
            if scrolled > lifecycle::NAVBAR_SCROLLED_AT {
                state.add_class("scrolled");
            } else {
                state.remove_class("scrolled");
            }
        }

        for control in self.page.by_role(Role::BackToTop) {
            let state = self.styles.get_mut(control);
            if scrolled > lifecycle::BACK_TO_TOP_AT {
                state.add_class("show");
            } else {
                state.remove_class("show");
            }
        }

        parallax::apply(&self.page, &self.viewport, &mut self.styles);

        let due = self.observer.scan(&self.page, &self.viewport);
        self.fire_bindings(due);
    }

    fn click(&mut self, el: ElementId) {
        match self.page.element(el).role {
            Role::Hamburger => {
                self.styles.get_mut(el).toggle_class("active");
                for menu in self.page.by_role(Role::NavMenu) {
                    self.styles.get_mut(menu).toggle_class("active");
                }
            }
            Role::NavLink => {
                for burger in self.page.by_role(Role::Hamburger) {
                    self.styles.get_mut(burger).remove_class("active");
                }
                for menu in self.page.by_role(Role::NavMenu) {
                    self.styles.get_mut(menu).remove_class("active");
                }
                let href = self.page.element(el).dataset.href.clone();
                match href.as_deref().and_then(|h| self.page.find(h)) {
                    Some(section) => {
                        let to =
                            (self.page.element(section).top - lifecycle::NAV_SCROLL_OFFSET).max(0.0);
                        self.glide =
                            Some(ScrollGlide::new(self.viewport.scroll_y, to, self.now));
                    }
                    None => warn!(
                        id = %self.page.element(el).id,
                        "nav link without resolvable target"
                    ),
                }
            }
            Role::BackToTop => {
                self.glide = Some(ScrollGlide::new(self.viewport.scroll_y, 0.0, self.now));
            }
            Role::FilterButton => {
                let selection =
                    Selection::from_raw(self.page.element(el).dataset.category.as_deref());
                self.filter.apply(
                    el,
                    selection,
                    &self.page,
                    self.now,
                    &mut *self.tweens,
                    &mut self.styles,
                );
            }
            Role::SubmitButton => self.submit(),
            _ => {}
        }
    }

    fn submit(&mut self) {
        let Some(button) = self.page.by_role(Role::SubmitButton).next() else {
            warn!("submit without a submit button, skipping");
            return;
        };

        let current = self.styles.get(button).text.clone();
        if !self.form.submit(current) {
            return; // already in flight
        }

        let state = self.styles.get_mut(button);
        state.text = Some(lifecycle::SENDING_TEXT.to_string());
        state.disabled = true;
        self.scheduler.schedule(
            self.now + lifecycle::FORM_SEND_DELAY,
            None,
            TimerTask::FormSent,
        );
    }

    // ---- clock -----------------------------------------------------------

    fn step_glide(&mut self) {
        if let Some(glide) = self.glide.take() {
            let (y, done) = glide.sample(self.now);
            self.set_scroll(y);
            if !done {
                self.glide = Some(glide);
            }
        }
    }

    fn run_timer(&mut self, task: TimerTask) {
        match task {
            TimerTask::CounterTick { element } => {
                let Some(state) = self.counters.get_mut(&element.0) else {
                    return;
                };
                let display = state.ramp.tick();
                self.styles.get_mut(element).text = Some(display.text);
                if display.done {
                    let timer = state.timer;
                    self.counters.remove(&element.0);
                    self.scheduler.cancel(timer);
                }
            }
            TimerTask::ParticleSpawn => {
                let particle = self.particles.spawn();
                self.scheduler.schedule(
                    self.now + particles::LIFETIME,
                    None,
                    TimerTask::ParticleExpire { particle: particle.id },
                );
            }
            TimerTask::ParticleExpire { particle } => self.particles.expire(particle),
            TimerTask::FormSent => {
                self.form.sent();
                if let Some(button) = self.page.by_role(Role::SubmitButton).next() {
                    self.styles.get_mut(button).text = Some(lifecycle::SENT_TEXT.to_string());
                }
                self.scheduler.schedule(
                    self.now + lifecycle::FORM_RESET_DELAY,
                    None,
                    TimerTask::FormReset,
                );
            }
            TimerTask::FormReset => {
                let original = self.form.reset();
                if let Some(button) = self.page.by_role(Role::SubmitButton).next() {
                    let state = self.styles.get_mut(button);
                    state.text = original;
                    state.disabled = false;
                }
            }
        }
    }

    // ---- trigger firing --------------------------------------------------

    /// Fire a snapshot of due bindings. The snapshot is taken before any
    /// action runs, so actions never mutate the set being iterated.
    fn fire_bindings(&mut self, due: Vec<crate::registry::BindingHandle>) {
        for handle in due {
            let Some((target, action)) = self.registry.fire(handle) else {
                continue;
            };
            self.execute(target, action);
        }
    }

    fn execute(&mut self, target: ElementId, action: EffectAction) {
        match action {
            EffectAction::Reveal(spec) => {
                effects::run_reveal(target, &spec, self.now, &mut *self.tweens, &mut self.styles);
            }
            EffectAction::CounterStart => self.start_counters(),
            EffectAction::ProgressFill { duration, ease } => {
                effects::run_progress_fill(
                    &self.page,
                    duration,
                    ease,
                    self.now,
                    &mut *self.tweens,
                    &mut self.styles,
                );
            }
        }
    }

    /// Start a ramp for every counter element. Already-running or finished
    /// ramps are left alone.
    fn start_counters(&mut self) {
        let targets: Vec<ElementId> = self.page.by_role(Role::Counter).collect();
        for element in targets {
            if self.counters.contains_key(&element.0) {
                continue;
            }
            let el = self.page.element(element);
            let ramp = CounterRamp::from_raw(&el.id, el.dataset.target.as_deref());
            let timer = self.scheduler.schedule(
                self.now + counter::TICK_INTERVAL,
                Some(counter::TICK_INTERVAL),
                TimerTask::CounterTick { element },
            );
            self.counters.insert(element.0, CounterState { ramp, timer });
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("now", &self.now)
            .field("scroll_y", &self.viewport.scroll_y)
            .field("bindings", &self.registry.len())
            .field("watches", &self.observer.watch_count())
            .field("active_tweens", &self.tweens.active_count())
            .field("particles", &self.particles.len())
            .finish()
    }
}
