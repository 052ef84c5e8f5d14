//! Scrollwire is a deterministic scroll- and pointer-driven effect engine.
//!
//! It reimplements the trigger core of an animated portfolio page as a pure
//! state machine: which effects fire as the viewport scrolls, in what order,
//! once or repeatedly, and how competing effects (filtering, cursor scaling,
//! parallax) reconcile without glitches.
//!
//! # Pipeline overview
//!
//! 1. **Observe**: scroll events move the [`Viewport`]; the
//!    [`ViewportObserver`] reports trigger-zone crossings as binding handles.
//! 2. **Resolve**: the [`TriggerRegistry`] applies the binding's replay
//!    policy and armed state, yielding the action to run (or nothing).
//! 3. **Execute**: effect actions submit tweens to the [`Tweening`] provider
//!    or mutate the owned [`StyleTable`] directly.
//! 4. **Advance**: [`Engine::advance`] drives the virtual clock, resuming
//!    timers and tweens in strict timestamp order.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: no wall clock, no OS RNG; randomness is a
//!   seeded stream, time is a virtual `Millis` counter.
//! - **No DOM**: the host document is modeled as an immutable [`Page`] plus
//!   an owned [`StyleTable`] the host reads back to paint.
#![forbid(unsafe_code)]

pub mod clock;
pub mod core;
pub mod counter;
pub mod ease;
pub mod effects;
pub mod engine;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod page;
pub mod parallax;
pub mod particles;
pub mod pointer;
pub mod registry;
pub mod style;
pub mod tween;
pub mod viewport;

pub use clock::{Scheduler, TimerHandle, TimerTask};
pub use crate::core::{ElementId, Millis, Vec2, Viewport};
pub use counter::{CounterDisplay, CounterRamp};
pub use ease::Ease;
pub use effects::{EffectAction, RevealFrom, RevealSpec};
pub use engine::{Engine, Event};
pub use error::{ScrollwireError, ScrollwireResult};
pub use filter::{FilterState, Selection};
pub use lifecycle::{FormPhase, FormState, ScrollGlide};
pub use page::{Dataset, Page, PageElement, Role};
pub use particles::{Particle, ParticleField};
pub use pointer::PointerTracker;
pub use registry::{ArmedState, Binding, BindingHandle, ReplayPolicy, TriggerRegistry};
pub use style::{StyleProp, StyleState, StyleTable};
pub use tween::{
    PropTrack, StaticTweening, Timeline, TimelineDefaults, TweenId, TweenRuntime, TweenSpec,
    Tweening,
};
pub use viewport::ViewportObserver;
