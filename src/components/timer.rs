//! Per-object deferred-callback scheduler.
//!
//! A [`Timer<S>`] runs callbacks against a subject `S` as time advances:
//! - [`Timer::after`] – run once after a delay
//! - [`Timer::every`] / [`Timer::every_while`] – run periodically
//! - [`Timer::during`] – run every update for a duration, then optionally once more
//! - [`Timer::tween`] – ease an `f32` field of the subject towards a target
//!
//! Every scheduling call returns a [`TimerHandle`] usable with
//! [`Timer::cancel`]. [`Timer::clear`] drops everything.
//!
//! # Ownership
//!
//! Callbacks receive `&mut S` at update time instead of capturing the subject,
//! so a timer never outlives or aliases what it animates. When the subject
//! owns its own timer (as [`GameObject`](super::gameobject::GameObject) does),
//! use [`Timer::update_owned`]: it detaches the running jobs, so callbacks may
//! schedule, cancel or clear through the subject's timer field. Jobs scheduled
//! that way start running on the next update, never in the current one.
//!
//! Dropping the timer drops every pending callback.

use log::trace;

use super::tween::{Easing, ease, lerp_f32};

/// Most firings a periodic job makes in one update.
pub const MAX_CATCH_UP: u32 = 64;

/// Identifies a scheduled job within one timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// One-shot completion callback.
pub type Callback<S> = Box<dyn FnOnce(&mut S)>;

enum Action<S> {
    After(Option<Callback<S>>),
    Every(Box<dyn FnMut(&mut S) -> bool>),
    During {
        func: Box<dyn FnMut(&mut S, f32)>,
        after: Option<Callback<S>>,
    },
    Tween {
        field: fn(&mut S) -> &mut f32,
        /// Captured from the field on the first update.
        from: Option<f32>,
        to: f32,
        easing: Easing,
        after: Option<Callback<S>>,
    },
}

struct Job<S> {
    handle: TimerHandle,
    time: f32,
    limit: f32,
    /// Remaining firings; `None` repeats until cancelled.
    count: Option<u32>,
    action: Action<S>,
}

impl<S> Job<S> {
    fn finished(&self) -> bool {
        self.count == Some(0)
    }

    fn progress(&mut self, subject: &mut S, dt: f32) {
        let limit = self.limit;
        let time = self.time;
        match &mut self.action {
            Action::During { func, .. } => func(subject, dt),
            Action::Tween {
                field,
                from,
                to,
                easing,
                ..
            } => {
                let value = (*field)(subject);
                let start = *from.get_or_insert(*value);
                let t = if limit > 0.0 { time / limit } else { 1.0 };
                *value = lerp_f32(start, *to, ease(*easing, t.min(1.0)));
            }
            Action::After(_) | Action::Every(_) => {}
        }
    }

    /// Run the job's completion; returns `false` when a periodic job asks to stop.
    fn fire(&mut self, subject: &mut S) -> bool {
        match &mut self.action {
            Action::After(f) => {
                if let Some(f) = f.take() {
                    f(subject);
                }
                true
            }
            Action::Every(f) => f(subject),
            Action::During { after, .. } | Action::Tween { after, .. } => {
                if let Some(f) = after.take() {
                    f(subject);
                }
                true
            }
        }
    }
}

/// Deferred-callback scheduler driven by [`Timer::update`].
pub struct Timer<S> {
    jobs: Vec<Job<S>>,
    next_id: u64,
    /// Requests made while this timer stood in for a detached one.
    cancelled: Vec<TimerHandle>,
    cleared: bool,
}

impl<S> Default for Timer<S> {
    fn default() -> Self {
        Timer {
            jobs: Vec::new(),
            next_id: 0,
            cancelled: Vec::new(),
            cleared: false,
        }
    }
}

impl<S> std::fmt::Debug for Timer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("jobs", &self.jobs.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<S> Timer<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.jobs.iter().any(|j| j.handle == handle)
    }

    fn schedule(&mut self, limit: f32, count: Option<u32>, action: Action<S>) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.jobs.push(Job {
            handle,
            time: 0.0,
            limit: limit.max(0.0),
            count,
            action,
        });
        handle
    }

    /// Run `f` once, `delay` seconds from now.
    ///
    /// The callback never runs early, but it runs on the first update that
    /// crosses the delay, so it may run late by up to one frame.
    pub fn after(&mut self, delay: f32, f: impl FnOnce(&mut S) + 'static) -> TimerHandle {
        self.schedule(delay, Some(1), Action::After(Some(Box::new(f))))
    }

    /// Run `f` every `delay` seconds, `limit` times or forever when `None`.
    pub fn every(
        &mut self,
        delay: f32,
        mut f: impl FnMut(&mut S) + 'static,
        limit: Option<u32>,
    ) -> TimerHandle {
        self.every_while(
            delay,
            move |s| {
                f(s);
                true
            },
            limit,
        )
    }

    /// Like [`Timer::every`], but the job also stops as soon as `f` returns `false`.
    pub fn every_while(
        &mut self,
        delay: f32,
        f: impl FnMut(&mut S) -> bool + 'static,
        limit: Option<u32>,
    ) -> TimerHandle {
        self.schedule(delay, limit, Action::Every(Box::new(f)))
    }

    /// Call `func(subject, dt)` on every update for the next `duration`
    /// seconds, then `after` once.
    pub fn during(
        &mut self,
        duration: f32,
        func: impl FnMut(&mut S, f32) + 'static,
        after: Option<Callback<S>>,
    ) -> TimerHandle {
        self.schedule(
            duration,
            Some(1),
            Action::During {
                func: Box::new(func),
                after,
            },
        )
    }

    /// Ease the field selected by `field` from its value at the first update
    /// to `to` over `duration` seconds, then call `after` once.
    pub fn tween(
        &mut self,
        duration: f32,
        field: fn(&mut S) -> &mut f32,
        to: f32,
        easing: Easing,
        after: Option<Callback<S>>,
    ) -> TimerHandle {
        self.schedule(
            duration,
            Some(1),
            Action::Tween {
                field,
                from: None,
                to,
                easing,
                after,
            },
        )
    }

    /// Prevent a job from running again. Returns `true` if it was pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.handle != handle);
        if self.jobs.len() == before {
            self.cancelled.push(handle);
            return false;
        }
        true
    }

    /// Drop every pending job without running it.
    pub fn clear(&mut self) {
        self.jobs.clear();
        self.cleared = true;
    }

    /// Advance every job by `dt` and run the ones that are due.
    pub fn update(&mut self, dt: f32, subject: &mut S) {
        self.advance(dt, subject, |_, _| false);
    }

    /// Shared update pass. `revoked` reports jobs cancelled while the pass
    /// runs; those neither progress nor fire.
    fn advance(
        &mut self,
        dt: f32,
        subject: &mut S,
        revoked: impl Fn(&mut S, TimerHandle) -> bool,
    ) {
        self.cancelled.clear();
        self.cleared = false;
        for job in self.jobs.iter_mut() {
            if revoked(subject, job.handle) {
                job.count = Some(0);
                continue;
            }
            job.time += dt;
            job.progress(subject, dt);
            if job.time < job.limit || job.finished() {
                continue;
            }
            let due = if job.limit > 0.0 {
                ((job.time / job.limit).floor() as u32).clamp(1, MAX_CATCH_UP)
            } else {
                // zero-period jobs fire once per update
                1
            };
            for _ in 0..due {
                if revoked(subject, job.handle) || !job.fire(subject) {
                    job.count = Some(0);
                }
                if let Some(c) = job.count.as_mut() {
                    *c = c.saturating_sub(1);
                }
                if job.finished() {
                    break;
                }
            }
            // backlog beyond the catch-up cap is dropped
            job.time = if job.limit > 0.0 {
                job.time.rem_euclid(job.limit)
            } else {
                0.0
            };
        }
        let before = self.jobs.len();
        self.jobs.retain(|j| !j.finished());
        if self.jobs.len() != before {
            trace!("timer retired {} job(s)", before - self.jobs.len());
        }
    }

    /// Update a timer that lives inside its own subject.
    ///
    /// `slot` projects the subject onto its timer field. While the jobs run
    /// the field holds an empty stand-in; whatever the callbacks schedule,
    /// cancel or clear on it is merged back afterwards. Jobs cancelled or
    /// cleared that way stop at once, even when due later in the same pass.
    pub fn update_owned(subject: &mut S, slot: impl Fn(&mut S) -> &mut Timer<S>, dt: f32) {
        let mut running = slot(subject).detach();
        running.advance(dt, subject, |s, handle| {
            let stand_in = slot(s);
            stand_in.cleared || stand_in.cancelled.contains(&handle)
        });
        let stand_in = std::mem::replace(slot(subject), running);
        slot(subject).absorb(stand_in);
    }

    /// Move all jobs out, leaving an empty timer that keeps issuing fresh handles.
    fn detach(&mut self) -> Timer<S> {
        let next_id = self.next_id;
        let running = std::mem::take(self);
        self.next_id = next_id;
        running
    }

    fn absorb(&mut self, other: Timer<S>) {
        if other.cleared {
            self.jobs.clear();
        }
        for handle in &other.cancelled {
            self.jobs.retain(|j| j.handle != *handle);
        }
        self.next_id = self.next_id.max(other.next_id);
        self.jobs.extend(other.jobs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[derive(Default)]
    struct Subject {
        hits: u32,
        value: f32,
        done: bool,
        target: Option<TimerHandle>,
        timer: Timer<Subject>,
    }

    #[test]
    fn test_after_runs_once_when_delay_elapses() {
        let mut t: Timer<u32> = Timer::new();
        let mut n = 0;
        t.after(0.5, |n| *n += 1);

        t.update(0.25, &mut n);
        assert_eq!(n, 0);
        t.update(0.25, &mut n);
        assert_eq!(n, 1);
        t.update(1.0, &mut n);
        assert_eq!(n, 1);
        assert!(t.is_empty());
    }

    #[test]
    fn test_every_respects_limit() {
        let mut t: Timer<u32> = Timer::new();
        let mut n = 0;
        t.every(0.1, |n| *n += 1, Some(3));
        for _ in 0..10 {
            t.update(0.1, &mut n);
        }
        assert_eq!(n, 3);
        assert!(t.is_empty());
    }

    #[test]
    fn test_every_catches_up_on_long_frames() {
        let mut t: Timer<u32> = Timer::new();
        let mut n = 0;
        t.every(0.1, |n| *n += 1, None);
        t.update(0.35, &mut n);
        assert_eq!(n, 3);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_tiny_period_is_capped_per_update() {
        let mut t: Timer<u32> = Timer::new();
        let mut n = 0;
        t.every(1e-30, |n| *n += 1, None);
        t.update(0.016, &mut n);
        assert_eq!(n, MAX_CATCH_UP);
        t.update(0.016, &mut n);
        assert_eq!(n, 2 * MAX_CATCH_UP);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_every_while_stops_on_false() {
        let mut t: Timer<u32> = Timer::new();
        let mut n = 0;
        t.every_while(
            0.1,
            |n| {
                *n += 1;
                *n < 2
            },
            None,
        );
        for _ in 0..5 {
            t.update(0.1, &mut n);
        }
        assert_eq!(n, 2);
        assert!(t.is_empty());
    }

    #[test]
    fn test_zero_delay_every_fires_once_per_update() {
        let mut t: Timer<u32> = Timer::new();
        let mut n = 0;
        t.every(0.0, |n| *n += 1, None);
        t.update(0.016, &mut n);
        t.update(0.016, &mut n);
        assert_eq!(n, 2);
    }

    #[test]
    fn test_during_then_after() {
        let mut t: Timer<Subject> = Timer::new();
        let mut s = Subject::default();
        t.during(
            0.3,
            |s, _dt| s.hits += 1,
            Some(Box::new(|s: &mut Subject| s.done = true)),
        );
        t.update(0.1, &mut s);
        t.update(0.1, &mut s);
        assert_eq!(s.hits, 2);
        assert!(!s.done);
        t.update(0.1 + EPSILON, &mut s);
        assert_eq!(s.hits, 3);
        assert!(s.done);
        assert!(t.is_empty());
    }

    #[test]
    fn test_tween_reaches_target_and_runs_after_once() {
        let mut t: Timer<Subject> = Timer::new();
        let mut s = Subject {
            value: 1.0,
            ..Default::default()
        };
        t.tween(
            0.2,
            |s| &mut s.value,
            16.0,
            Easing::Linear,
            Some(Box::new(|s: &mut Subject| s.hits += 1)),
        );
        t.update(0.1, &mut s);
        assert!(approx_eq(s.value, 8.5));
        t.update(0.1, &mut s);
        assert!(approx_eq(s.value, 16.0));
        assert_eq!(s.hits, 1);
        t.update(0.1, &mut s);
        assert_eq!(s.hits, 1);
        assert!(approx_eq(s.value, 16.0));
    }

    #[test]
    fn test_tween_zero_duration_snaps() {
        let mut t: Timer<Subject> = Timer::new();
        let mut s = Subject::default();
        t.tween(0.0, |s| &mut s.value, 4.0, Easing::CubicOut, None);
        t.update(0.0, &mut s);
        assert!(approx_eq(s.value, 4.0));
        assert!(t.is_empty());
    }

    #[test]
    fn test_cancel_and_clear() {
        let mut t: Timer<u32> = Timer::new();
        let mut n = 0;
        let h = t.after(0.1, |n| *n += 1);
        t.after(0.1, |n| *n += 10);
        assert!(t.is_pending(h));
        assert!(t.cancel(h));
        assert!(!t.cancel(h));
        t.update(0.2, &mut n);
        assert_eq!(n, 10);

        t.every(0.1, |n| *n += 1, None);
        t.clear();
        t.update(1.0, &mut n);
        assert_eq!(n, 10);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut t: Timer<u32> = Timer::new();
        let a = t.after(1.0, |_| {});
        let b = t.after(1.0, |_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn test_owned_timer_defers_jobs_scheduled_by_callbacks() {
        let mut s = Subject::default();
        s.timer.after(0.1, |s: &mut Subject| {
            s.hits += 1;
            s.timer.after(0.0, |s: &mut Subject| s.hits += 100);
        });

        Timer::update_owned(&mut s, |s| &mut s.timer, 0.1);
        assert_eq!(s.hits, 1, "job scheduled during update must wait a frame");
        assert_eq!(s.timer.len(), 1);

        Timer::update_owned(&mut s, |s| &mut s.timer, 0.1);
        assert_eq!(s.hits, 101);
        assert!(s.timer.is_empty());
    }

    #[test]
    fn test_owned_timer_cancel_from_callback() {
        let mut s = Subject::default();
        let ticker = s.timer.every(0.1, |s: &mut Subject| s.hits += 1, None);
        s.timer.after(0.25, move |s: &mut Subject| {
            s.timer.cancel(ticker);
        });

        for _ in 0..10 {
            Timer::update_owned(&mut s, |s| &mut s.timer, 0.1);
        }
        assert_eq!(s.hits, 3);
        assert!(s.timer.is_empty());
    }

    #[test]
    fn test_owned_timer_cancel_stops_a_job_due_in_the_same_update() {
        let mut s = Subject::default();
        s.timer.after(0.1, |s: &mut Subject| {
            if let Some(h) = s.target {
                assert!(!s.timer.cancel(h));
            }
        });
        s.target = Some(s.timer.after(0.1, |s: &mut Subject| s.hits += 1));

        Timer::update_owned(&mut s, |s| &mut s.timer, 0.1);
        assert_eq!(s.hits, 0);
        assert!(s.timer.is_empty());

        Timer::update_owned(&mut s, |s| &mut s.timer, 0.1);
        assert_eq!(s.hits, 0);
    }

    #[test]
    fn test_owned_timer_clear_stops_later_jobs_in_the_same_update() {
        let mut s = Subject::default();
        s.timer.after(0.1, |s: &mut Subject| s.timer.clear());
        s.timer.every(0.1, |s: &mut Subject| s.hits += 1, None);

        Timer::update_owned(&mut s, |s| &mut s.timer, 0.1);
        assert_eq!(s.hits, 0);
        assert!(s.timer.is_empty());
    }

    #[test]
    fn test_owned_timer_clear_from_callback() {
        let mut s = Subject::default();
        s.timer.every(0.1, |s: &mut Subject| s.hits += 1, None);
        s.timer.after(0.1, |s: &mut Subject| s.timer.clear());

        Timer::update_owned(&mut s, |s| &mut s.timer, 0.1);
        assert_eq!(s.hits, 1);
        assert!(s.timer.is_empty());
    }

    #[test]
    fn test_owned_timer_keeps_handles_unique_across_detach() {
        let mut s = Subject::default();
        let first = s.timer.after(5.0, |_: &mut Subject| {});
        s.timer.after(0.0, |s: &mut Subject| {
            s.value = 1.0;
            s.timer.after(5.0, |_: &mut Subject| {});
        });
        Timer::update_owned(&mut s, |s| &mut s.timer, 0.0);
        let next = s.timer.after(5.0, |_: &mut Subject| {});
        assert_ne!(first, next);
        assert_eq!(s.timer.len(), 3);
    }
}
