//! Per-entity animation queue
//!
//! Strict FIFO, one task in flight at a time. The queue never decides on its
//! own that a presentation task has finished: the owner calls
//! `complete_current` when the presentation layer reports it. Only `Delay`
//! runs out by itself, and `WaitForCue` is released by `cue`.

use std::collections::VecDeque;

use crate::anim::task::{AnimationKind, AnimationTask};

#[derive(Debug, Clone)]
struct InFlight {
    task: AnimationTask,
    elapsed: f32,
}

/// Queue of animation tasks for one entity
#[derive(Debug, Clone, Default)]
pub struct AnimationQueue {
    current: Option<InFlight>,
    queued: VecDeque<AnimationTask>,
    dead: bool,
    timeout: Option<f32>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force-finish presentation tasks that stay in flight longer than `seconds`
    pub fn with_timeout(mut self, seconds: f32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Append a task. Dead entities drop it and return `false`.
    pub fn enqueue(&mut self, task: AnimationTask) -> bool {
        if self.dead {
            return false;
        }
        self.queued.push_back(task);
        true
    }

    /// Run one scheduling tick
    ///
    /// Ages the in-flight task, then pops the head if nothing is in flight.
    /// Returns the task that started this tick, if any. Instant tasks are
    /// returned but never occupy the in-flight slot.
    pub fn advance_if_idle(&mut self, dt: f32) -> Option<AnimationTask> {
        if let Some(in_flight) = &mut self.current {
            in_flight.elapsed += dt;
            let kind = in_flight.task.kind;

            if kind == AnimationKind::Delay && in_flight.elapsed >= in_flight.task.duration() {
                self.current = None;
            } else if let Some(limit) = self.timeout {
                if kind.needs_completion_signal() && in_flight.elapsed >= limit {
                    tracing::warn!(
                        "{:?} task still in flight after {:.1}s, forcing completion",
                        kind,
                        in_flight.elapsed
                    );
                    self.current = None;
                }
            }
        }

        if self.current.is_some() {
            return None;
        }

        let task = self.queued.pop_front()?;
        if !task.kind.is_instant() {
            self.current = Some(InFlight { task, elapsed: 0.0 });
        }
        Some(task)
    }

    pub fn current(&self) -> Option<&AnimationTask> {
        self.current.as_ref().map(|in_flight| &in_flight.task)
    }

    /// Finish the in-flight task (presentation completion report)
    pub fn complete_current(&mut self) -> Option<AnimationTask> {
        self.current.take().map(|in_flight| in_flight.task)
    }

    /// Release a parked `WaitForCue`. Cues that arrive while not waiting are lost.
    pub fn cue(&mut self) -> bool {
        if self.is_waiting_for_cue() {
            self.current = None;
            true
        } else {
            tracing::debug!("cue ignored: queue is not waiting");
            false
        }
    }

    pub fn is_waiting_for_cue(&self) -> bool {
        matches!(self.current(), Some(task) if task.kind == AnimationKind::WaitForCue)
    }

    /// True while a `Cue` barrier sits in flight
    pub fn is_holding_barrier(&self) -> bool {
        matches!(self.current(), Some(task) if task.kind == AnimationKind::Cue)
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }

    /// Anything running or still waiting to run
    pub fn is_animating(&self) -> bool {
        self.current.is_some() || !self.queued.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queued.len() + usize::from(self.current.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything without running it
    pub fn clear(&mut self) {
        self.current = None;
        self.queued.clear();
    }

    /// Drop everything, queue a final task and refuse any further ones
    pub fn kill_with(&mut self, last: AnimationTask) {
        self.clear();
        self.queued.push_back(last);
        self.seal();
    }

    /// Refuse new tasks but let the queued ones play out
    pub fn seal(&mut self) {
        self.dead = true;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_fifo_one_at_a_time() {
        let mut queue = AnimationQueue::new();
        queue.enqueue(AnimationTask::march(Vec3::X));
        queue.enqueue(AnimationTask::rotate(Vec3::Z));

        let first = queue.advance_if_idle(0.016).unwrap();
        assert_eq!(first.kind, AnimationKind::March);

        // Still in flight: nothing else starts
        assert!(queue.advance_if_idle(0.016).is_none());
        assert!(queue.advance_if_idle(0.016).is_none());

        queue.complete_current();
        let second = queue.advance_if_idle(0.016).unwrap();
        assert_eq!(second.kind, AnimationKind::Rotate);
    }

    #[test]
    fn test_instant_tasks_do_not_block() {
        let mut queue = AnimationQueue::new();
        queue.enqueue(AnimationTask::idle());
        queue.enqueue(AnimationTask::march(Vec3::X));

        assert_eq!(queue.advance_if_idle(0.1).unwrap().kind, AnimationKind::Idle);
        assert!(!queue.in_flight());
        assert_eq!(queue.advance_if_idle(0.1).unwrap().kind, AnimationKind::March);
    }

    #[test]
    fn test_delay_runs_out() {
        let mut queue = AnimationQueue::new();
        queue.enqueue(AnimationTask::delay(0.5));
        queue.enqueue(AnimationTask::done());

        assert_eq!(queue.advance_if_idle(0.0).unwrap().kind, AnimationKind::Delay);
        assert!(queue.advance_if_idle(0.2).is_none());
        assert!(queue.advance_if_idle(0.2).is_none());
        // Third tick crosses 0.5s: delay ends and the next task starts
        assert_eq!(queue.advance_if_idle(0.2).unwrap().kind, AnimationKind::Done);
        assert!(!queue.is_animating());
    }

    #[test]
    fn test_wait_for_cue() {
        let mut queue = AnimationQueue::new();
        queue.enqueue(AnimationTask::wait_for_cue());
        queue.enqueue(AnimationTask::march(Vec3::X));

        queue.advance_if_idle(0.1);
        assert!(queue.is_waiting_for_cue());
        for _ in 0..10 {
            assert!(queue.advance_if_idle(0.1).is_none());
        }

        assert!(queue.cue());
        assert_eq!(queue.advance_if_idle(0.1).unwrap().kind, AnimationKind::March);
    }

    #[test]
    fn test_cue_without_waiter_is_lost() {
        let mut queue = AnimationQueue::new();
        assert!(!queue.cue());

        queue.enqueue(AnimationTask::wait_for_cue());
        queue.advance_if_idle(0.1);
        // The early cue was not buffered
        assert!(queue.is_waiting_for_cue());
    }

    #[test]
    fn test_dead_queue_drops_new_tasks() {
        let mut queue = AnimationQueue::new();
        queue.enqueue(AnimationTask::march(Vec3::X));
        queue.advance_if_idle(0.1);
        queue.enqueue(AnimationTask::block(Vec3::Z));

        queue.kill_with(AnimationTask::die());
        assert!(queue.is_dead());
        assert!(!queue.enqueue(AnimationTask::cheer()));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.advance_if_idle(0.1).unwrap().kind, AnimationKind::Die);
    }

    #[test]
    fn test_timeout_forces_completion() {
        let mut queue = AnimationQueue::new().with_timeout(1.0);
        queue.enqueue(AnimationTask::march(Vec3::X));
        queue.enqueue(AnimationTask::idle());

        queue.advance_if_idle(0.0);
        assert!(queue.advance_if_idle(0.6).is_none());
        assert_eq!(queue.advance_if_idle(0.6).unwrap().kind, AnimationKind::Idle);
    }

    #[test]
    fn test_timeout_ignores_waits() {
        let mut queue = AnimationQueue::new().with_timeout(1.0);
        queue.enqueue(AnimationTask::wait_for_cue());
        queue.advance_if_idle(0.0);
        queue.advance_if_idle(5.0);
        assert!(queue.is_waiting_for_cue());
    }
}
