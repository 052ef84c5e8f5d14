use tracing::warn;

use crate::core::Millis;

/// Tick interval for counter ramps (the reference uses a 30ms interval).
pub const TICK_INTERVAL: Millis = Millis(30);
/// Number of ticks a ramp nominally takes: increment is `target / 50`.
const RAMP_STEPS: f64 = 50.0;

/// Rising stat counter: adds `target/50` per tick, displays the floor of the
/// running value, then snaps to `"{target}+"` and stops.
#[derive(Clone, Debug)]
pub struct CounterRamp {
    target: i64,
    current: f64,
    increment: f64,
    done: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterDisplay {
    pub text: String,
    pub done: bool,
}

impl CounterRamp {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            current: 0.0,
            increment: target as f64 / RAMP_STEPS,
            done: false,
        }
    }

    /// Build from a raw `data-target` attribute. A missing or non-numeric
    /// value must not wedge the tick loop, so it degrades to 0 (which
    /// terminates on the first tick).
    pub fn from_raw(id: &str, raw: Option<&str>) -> Self {
        match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
            Some(target) => Self::new(target),
            None => {
                warn!(id, ?raw, "counter has no usable data-target, treating as 0");
                Self::new(0)
            }
        }
    }

    /// Advance one tick. A non-positive target fires the terminal state
    /// immediately; with increment 0 the running value would otherwise never
    /// reach it.
    pub fn tick(&mut self) -> CounterDisplay {
        if self.done {
            return self.terminal();
        }

        if self.target <= 0 {
            self.done = true;
            return self.terminal();
        }

        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.done = true;
            self.terminal()
        } else {
            CounterDisplay {
                text: format!("{}", self.current.floor() as i64),
                done: false,
            }
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn terminal(&self) -> CounterDisplay {
        CounterDisplay {
            text: format!("{}+", self.target),
            done: true,
        }
    }
}
