//! Delayed one-shot tasks
//!
//! Cooldown clears and the return to betting fire some time after the
//! action that caused them. They are queued here against the session's
//! monotonic clock and drained on the tick, so no timer threads exist.

use glam::Vec2;

/// Work to perform once its fire time is reached
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    ClearBetCooldown,
    ClearCashoutCooldown,
    ResetToBetting,
    /// Follow-up explosion at the crash site
    SecondaryBurst { at: Vec2 },
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    fire_at: f64,
    /// Insertion order, breaks ties between equal fire times
    seq: u64,
    task: Task,
}

/// Queue of tasks keyed by fire time
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire at `fire_at`
    pub fn schedule(&mut self, fire_at: f64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled { fire_at, seq, task });
    }

    /// Remove and return the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: f64) -> Option<Task> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.fire_at <= now)
            .min_by(|(_, a), (_, b)| {
                a.fire_at
                    .partial_cmp(&b.fire_at)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|(i, _)| i)?;
        Some(self.pending.swap_remove(idx).task)
    }

    /// Drop every pending task
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether a task of this kind is waiting to fire
    pub fn is_pending(&self, task: &Task) -> bool {
        self.pending.iter().any(|s| &s.task == task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_fire_time() {
        let mut s = Scheduler::new();
        s.schedule(1.0, Task::ResetToBetting);
        assert_eq!(s.pop_due(0.99), None);
        assert_eq!(s.pop_due(1.0), Some(Task::ResetToBetting));
        assert!(s.is_empty());
    }

    #[test]
    fn test_fires_in_time_order() {
        let mut s = Scheduler::new();
        s.schedule(1.5, Task::ResetToBetting);
        s.schedule(0.5, Task::ClearBetCooldown);
        s.schedule(1.0, Task::ClearCashoutCooldown);

        assert_eq!(s.pop_due(2.0), Some(Task::ClearBetCooldown));
        assert_eq!(s.pop_due(2.0), Some(Task::ClearCashoutCooldown));
        assert_eq!(s.pop_due(2.0), Some(Task::ResetToBetting));
        assert_eq!(s.pop_due(2.0), None);
    }

    #[test]
    fn test_ties_fire_in_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(1.0, Task::ClearCashoutCooldown);
        s.schedule(1.0, Task::ResetToBetting);
        assert_eq!(s.pop_due(1.0), Some(Task::ClearCashoutCooldown));
        assert_eq!(s.pop_due(1.0), Some(Task::ResetToBetting));
    }

    #[test]
    fn test_cancel_all() {
        let mut s = Scheduler::new();
        s.schedule(0.1, Task::ClearBetCooldown);
        s.schedule(0.2, Task::SecondaryBurst { at: Vec2::ONE });
        assert!(s.is_pending(&Task::ClearBetCooldown));
        s.cancel_all();
        assert_eq!(s.len(), 0);
        assert_eq!(s.pop_due(10.0), None);
    }
}
