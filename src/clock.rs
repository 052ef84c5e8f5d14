use crate::core::{ElementId, Millis};

/// Work a timer can resume. Every deferred completion in the engine is one of
/// these explicit variants; there are no hidden closures behind the clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerTask {
    CounterTick { element: ElementId },
    ParticleSpawn,
    ParticleExpire { particle: u64 },
    FormSent,
    FormReset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Debug)]
struct TimerEntry {
    handle: TimerHandle,
    due: Millis,
    /// Re-arm interval for periodic timers.
    period: Option<Millis>,
    seq: u64,
    task: TimerTask,
}

/// Single-threaded timer wheel over the virtual clock. Entries fire in
/// `(due, seq)` order, so timers scheduled for the same instant resume in
/// the order they were registered.
#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<TimerEntry>,
    next_handle: u64,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Millis, period: Option<Millis>, task: TimerTask) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(TimerEntry {
            handle,
            due,
            period,
            seq,
            task,
        });
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Remove and return the earliest entry due at or before `until`.
    /// Periodic entries re-arm themselves one period later.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, TimerTask)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[idx];
        let fired = (entry.due, entry.task.clone());
        match entry.period {
            Some(period) => {
                entry.due += period;
                entry.seq = self.next_seq;
                self.next_seq += 1;
            }
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(fired)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}
