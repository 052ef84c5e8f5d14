use tracing::warn;

use crate::{core::ElementId, effects::EffectAction};

/// Whether a bound action fires once ever or on every qualifying crossing.
///
/// The reference page configures no reverse/reset action, so its nominally
/// replayable triggers behave as fire-once; `Always` is still honored here as
/// re-fire-on-re-entry for callers that want it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayPolicy {
    Once,
    Always,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmedState {
    NotFired,
    Fired,
}

/// Element + trigger condition + action + replay policy. Immutable once
/// registered; destroyed only with the registry.
#[derive(Clone, Debug)]
pub struct Binding {
    pub target: ElementId,
    /// Trigger zone: viewport-height percentage handed to the observer.
    pub threshold_pct: f64,
    pub policy: ReplayPolicy,
    pub action: EffectAction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BindingHandle(pub usize);

/// The coordination core: owns every binding and its armed state, and decides
/// on each observer notification whether the bound action runs.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    bindings: Vec<(Binding, ArmedState)>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, binding: Binding) -> BindingHandle {
        let handle = BindingHandle(self.bindings.len());
        self.bindings.push((binding, ArmedState::NotFired));
        handle
    }

    /// Resolve a firing. Returns the target and a copy of the action to run,
    /// or `None` when the binding is suppressed (already fired under `Once`)
    /// or the handle is unknown. Returning a copy keeps callers free to
    /// execute actions without holding a borrow on the binding table, so a
    /// scan snapshot is never iterated while the table mutates.
    pub fn fire(&mut self, handle: BindingHandle) -> Option<(ElementId, EffectAction)> {
        let Some((binding, armed)) = self.bindings.get_mut(handle.0) else {
            warn!(handle = handle.0, "fire for unknown binding handle");
            return None;
        };

        if binding.policy == ReplayPolicy::Once && *armed == ArmedState::Fired {
            return None;
        }
        *armed = ArmedState::Fired;
        Some((binding.target, binding.action.clone()))
    }

    pub fn armed_state(&self, handle: BindingHandle) -> Option<ArmedState> {
        self.bindings.get(handle.0).map(|(_, armed)| *armed)
    }

    pub fn binding(&self, handle: BindingHandle) -> Option<&Binding> {
        self.bindings.get(handle.0).map(|(b, _)| b)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = BindingHandle> + '_ {
        (0..self.bindings.len()).map(BindingHandle)
    }
}
