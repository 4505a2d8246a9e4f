//! Deferred effects on a virtual clock
//!
//! Tasks are keyed; scheduling under a key that is already pending replaces
//! the old task. The host advances the clock, and due tasks come out in
//! deadline order (insertion order for equal deadlines).

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::Duration;

type Slot = (Duration, u64);

#[derive(Debug, Clone)]
pub struct Scheduler<K, E> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<Slot, (K, E)>,
    slots: HashMap<K, Slot>,
}

impl<K, E> Scheduler<K, E>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
            slots: HashMap::new(),
        }
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `effect` after `delay`. Returns true if a pending task under the
    /// same key was cancelled.
    pub fn schedule(&mut self, key: K, delay: Duration, effect: E) -> bool {
        let replaced = self.cancel(key);

        let slot = (self.now + delay, self.next_seq);
        self.next_seq += 1;
        self.queue.insert(slot, (key, effect));
        self.slots.insert(key, slot);

        tracing::trace!(?key, ?delay, replaced, "Scheduled task");

        replaced
    }

    pub fn cancel(&mut self, key: K) -> bool {
        match self.slots.remove(&key) {
            Some(slot) => {
                self.queue.remove(&slot);
                tracing::trace!(?key, "Cancelled task");
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Time until the earliest pending task is due
    pub fn next_due_in(&self) -> Option<Duration> {
        self.queue
            .keys()
            .next()
            .map(|(deadline, _)| deadline.saturating_sub(self.now))
    }

    /// Pop the earliest task due at or before `target`, moving the clock to
    /// its deadline. Tasks scheduled while handling it are timed from there.
    pub fn pop_until(&mut self, target: Duration) -> Option<E> {
        let (&slot, _) = self.queue.iter().next()?;
        if slot.0 > target {
            return None;
        }

        let (key, effect) = self.queue.remove(&slot)?;
        self.slots.remove(&key);
        self.now = self.now.max(slot.0);

        Some(effect)
    }

    /// Move the clock forward to `target` without firing anything
    pub fn settle(&mut self, target: Duration) {
        self.now = self.now.max(target);
    }
}

impl<K, E> Default for Scheduler<K, E>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn run_for<K, E>(scheduler: &mut Scheduler<K, E>, elapsed: Duration) -> Vec<E>
    where
        K: Copy + Eq + Hash + std::fmt::Debug,
    {
        let target = scheduler.now() + elapsed;
        let mut due = Vec::new();
        while let Some(effect) = scheduler.pop_until(target) {
            due.push(effect);
        }
        scheduler.settle(target);
        due
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1, ms(300), "c");
        scheduler.schedule(2, ms(100), "a");
        scheduler.schedule(3, ms(200), "b");

        assert_eq!(run_for(&mut scheduler, ms(150)), vec!["a"]);
        assert_eq!(run_for(&mut scheduler, ms(500)), vec!["b", "c"]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), ms(650));
    }

    #[test]
    fn test_equal_deadlines_keep_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1, ms(100), "first");
        scheduler.schedule(2, ms(100), "second");
        assert_eq!(run_for(&mut scheduler, ms(100)), vec!["first", "second"]);
    }

    #[test]
    fn test_rescheduling_replaces_pending_task() {
        let mut scheduler = Scheduler::new();
        assert!(!scheduler.schedule(7, ms(1000), "old"));
        run_for(&mut scheduler, ms(600));
        assert!(scheduler.schedule(7, ms(1000), "new"));

        assert!(run_for(&mut scheduler, ms(500)).is_empty());
        assert_eq!(run_for(&mut scheduler, ms(500)), vec!["new"]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1, ms(10), "x");
        assert!(scheduler.is_pending(1));
        assert!(scheduler.cancel(1));
        assert!(!scheduler.cancel(1));
        assert!(!scheduler.is_pending(1));
        assert!(run_for(&mut scheduler, ms(100)).is_empty());
    }

    #[test]
    fn test_next_due_in() {
        let mut scheduler: Scheduler<u8, ()> = Scheduler::new();
        assert_eq!(scheduler.next_due_in(), None);
        scheduler.schedule(1, ms(400), ());
        run_for(&mut scheduler, ms(100));
        assert_eq!(scheduler.next_due_in(), Some(ms(300)));
    }

    #[test]
    fn test_pop_until_moves_clock_to_deadline() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1, ms(500), "voice");

        assert_eq!(scheduler.pop_until(ms(2000)), Some("voice"));
        assert_eq!(scheduler.now(), ms(500));

        scheduler.schedule(2, ms(1000), "load");
        assert_eq!(scheduler.pop_until(ms(2000)), Some("load"));
        assert_eq!(scheduler.now(), ms(1500));
        assert_eq!(scheduler.pop_until(ms(2000)), None);
    }
}
