// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use gadgetry_tree::{WindowId, WindowManager};
use tracing::{debug, error, trace, warn};

use crate::clock::Clock;
use crate::kind::AnimationKind;
use crate::motion::{
    AnimateRecord, MotionStrategy, Slide, SlideTuning, Spiral, SpiralTuning, TimedSlide,
    TimedTuning,
};

/// Drives the transition animations of a set of windows.
///
/// Records live in two lists: windows the caller must wait for, and free-running ones. Each
/// [`update`](Self::update) ticks the must-finish list, then the free list, forward or in
/// reverse. Ticking stops by itself once every record has reached the end of its path, and
/// resumes when a window is registered or [`reverse_animate`](Self::reverse_animate) is
/// called.
///
/// ```
/// use kurbo::{Point, Size};
/// use gadgetry_animate::{AnimateWindowManager, AnimationKind, ManualClock};
/// use gadgetry_tree::{WindowManager, WindowStatus};
///
/// let mut wm = WindowManager::new(Size::new(800.0, 600.0));
/// let (at, size) = (Point::new(100.0, 100.0), Size::new(50.0, 20.0));
/// let w = wm.create(None, WindowStatus::ENABLED, at, size, None, None).unwrap();
///
/// let clock = ManualClock::new(0);
/// let mut anim = AnimateWindowManager::new(&clock);
/// assert!(anim.register_window(&mut wm, w, AnimationKind::SlideLeft, true, 0));
/// assert_eq!(wm.position(w), Some(Point::new(-700.0, 100.0)));
///
/// while !anim.is_finished() {
///     anim.update(&mut wm);
/// }
/// assert_eq!(wm.position(w), Some(Point::new(100.0, 100.0)));
/// ```
#[derive(Debug)]
pub struct AnimateWindowManager<C: Clock> {
    clock: C,
    must_finish: Vec<AnimateRecord>,
    free: Vec<AnimateRecord>,
    needs_update: bool,
    reversed: bool,
    slide: Slide,
    spiral: Spiral,
    timed: TimedSlide,
}

impl<C: Clock> AnimateWindowManager<C> {
    /// Create an idle manager reading time from `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            must_finish: Vec::new(),
            free: Vec::new(),
            needs_update: false,
            reversed: false,
            slide: Slide::default(),
            spiral: Spiral::default(),
            timed: TimedSlide::default(),
        }
    }

    /// Replace the slide tuning. Affects records registered afterwards and running slides.
    pub fn with_slide_tuning(mut self, tuning: SlideTuning) -> Self {
        self.slide.tuning = tuning;
        self
    }

    /// Replace the spiral tuning.
    pub fn with_spiral_tuning(mut self, tuning: SpiralTuning) -> Self {
        self.spiral.tuning = tuning;
        self
    }

    /// Replace the timed slide tuning.
    pub fn with_timed_tuning(mut self, tuning: TimedTuning) -> Self {
        self.timed.tuning = tuning;
        self
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn strategy(&self, kind: AnimationKind) -> &dyn MotionStrategy {
        match kind {
            AnimationKind::Spiral => &self.spiral,
            AnimationKind::SlideBottomTimed => &self.timed,
            _ => &self.slide,
        }
    }

    /// Start animating `window` onto its current position.
    ///
    /// The window jumps to the off-screen start of its path at once and begins moving
    /// `delay_ms` later. With `needs_to_finish`, [`is_finished`](Self::is_finished) waits for
    /// it. Returns `false` for a stale or destroyed window, and for a window that is already
    /// registered.
    pub fn register_window(
        &mut self,
        wm: &mut WindowManager,
        window: WindowId,
        kind: AnimationKind,
        needs_to_finish: bool,
        delay_ms: u32,
    ) -> bool {
        let Some(rest) = wm.position(window).filter(|_| wm.is_alive(window)) else {
            warn!(?window, "register_window: stale window");
            return false;
        };
        if self.records().any(|r| r.window == window) {
            warn!(?window, "register_window: window is already animated");
            return false;
        }
        let mut rec = AnimateRecord::new(window, kind, rest, needs_to_finish, delay_ms);
        let now = self.clock.now_ms();
        let display = wm.display_size();
        self.strategy(kind).init(&mut rec, wm, display, now);
        if needs_to_finish {
            self.must_finish.push(rec);
        } else {
            self.free.push(rec);
        }
        self.needs_update = true;
        debug!(?window, ?kind, needs_to_finish, delay_ms, "window registered for animation");
        true
    }

    /// [`register_window`](Self::register_window) with a raw kind value.
    ///
    /// Values outside [`AnimationKind`] are refused and the window is left alone.
    pub fn register_window_raw(
        &mut self,
        wm: &mut WindowManager,
        window: WindowId,
        raw_kind: u32,
        needs_to_finish: bool,
        delay_ms: u32,
    ) -> bool {
        match AnimationKind::try_from(raw_kind) {
            Ok(kind) => self.register_window(wm, window, kind, needs_to_finish, delay_ms),
            Err(e) => {
                warn!(?window, %e, "register_window: refusing animation");
                false
            }
        }
    }

    /// Advance every record by one tick.
    pub fn update(&mut self, wm: &mut WindowManager) {
        if !self.needs_update {
            return;
        }
        self.needs_update = false;
        let now = self.clock.now_ms();
        let mut lists = [
            core::mem::take(&mut self.must_finish),
            core::mem::take(&mut self.free),
        ];
        for rec in lists.iter_mut().flatten() {
            if !wm.is_alive(rec.window) {
                error!(window = ?rec.window, "animated window is gone");
                continue;
            }
            let strategy = self.strategy(rec.kind);
            let done = if self.reversed {
                strategy.reverse(rec, wm, now)
            } else {
                strategy.update(rec, wm, now)
            };
            if done && !rec.finished {
                trace!(window = ?rec.window, reversed = self.reversed, "animation finished");
            }
            rec.finished = done;
            if !done {
                self.needs_update = true;
            }
        }
        let [must_finish, free] = lists;
        self.must_finish = must_finish;
        self.free = free;
    }

    /// Play every registered animation backward, from rest out to its start.
    ///
    /// Delays are mirrored against [`max_delay`](Self::max_delay): the record that started
    /// last leaves first.
    pub fn reverse_animate(&mut self, wm: &mut WindowManager) {
        let max = self.max_delay();
        let now = self.clock.now_ms();
        let display = wm.display_size();
        let mut lists = [
            core::mem::take(&mut self.must_finish),
            core::mem::take(&mut self.free),
        ];
        for rec in lists.iter_mut().flatten() {
            if !wm.is_alive(rec.window) {
                error!(window = ?rec.window, "animated window is gone");
                continue;
            }
            let delay = max - rec.delay_ms;
            self.strategy(rec.kind)
                .init_reverse(rec, wm, display, now, delay);
            rec.finished = false;
        }
        let [must_finish, free] = lists;
        self.must_finish = must_finish;
        self.free = free;
        self.reversed = true;
        self.needs_update = true;
        debug!(max_delay = max, "reversing animations");
    }

    /// Whether every must-finish record has reached the end of its path.
    pub fn is_finished(&self) -> bool {
        self.must_finish.iter().all(|r| r.finished)
    }

    /// Whether playback runs backward.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Longest start delay among the registered records.
    pub fn max_delay(&self) -> u32 {
        self.records().map(|r| r.delay_ms).max().unwrap_or(0)
    }

    /// Registered records, must-finish ones first.
    pub fn records(&self) -> impl Iterator<Item = &AnimateRecord> + '_ {
        self.must_finish.iter().chain(self.free.iter())
    }

    /// Drop every record, optionally moving each live window to its rest position.
    pub fn reset(&mut self, wm: &mut WindowManager, snap_to_rest: bool) {
        if snap_to_rest {
            for rec in self.records() {
                if wm.is_alive(rec.window) {
                    wm.set_position(rec.window, rec.rest);
                }
            }
        }
        self.must_finish.clear();
        self.free.clear();
        self.needs_update = false;
        self.reversed = false;
        debug!(snap_to_rest, "animations reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;
    use gadgetry_tree::WindowStatus;
    use kurbo::{Point, Size};

    fn window(wm: &mut WindowManager, at: Point) -> WindowId {
        wm.create(None, WindowStatus::ENABLED, at, Size::new(40.0, 20.0), None, None)
            .unwrap()
    }

    #[test]
    fn idle_manager_does_not_tick() {
        let mut wm = WindowManager::new(Size::new(800.0, 600.0));
        let w = window(&mut wm, Point::new(5.0, 5.0));
        let mut anim = AnimateWindowManager::new(ManualClock::new(0));
        anim.update(&mut wm);
        assert!(anim.is_finished());
        assert_eq!(wm.position(w), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn raw_kinds_outside_the_range_are_refused() {
        let mut wm = WindowManager::new(Size::new(800.0, 600.0));
        let w = window(&mut wm, Point::new(5.0, 5.0));
        let mut anim = AnimateWindowManager::new(ManualClock::new(0));
        assert!(!anim.register_window_raw(&mut wm, w, 0, true, 0));
        assert!(!anim.register_window_raw(&mut wm, w, 42, true, 0));
        assert_eq!(anim.records().count(), 0);
        assert_eq!(wm.position(w), Some(Point::new(5.0, 5.0)));
        assert!(anim.register_window_raw(&mut wm, w, 7, false, 0));
        assert_eq!(anim.records().next().map(AnimateRecord::kind), Some(AnimationKind::Spiral));
    }

    #[test]
    fn destroyed_window_is_skipped() {
        let mut wm = WindowManager::new(Size::new(800.0, 600.0));
        let gone = window(&mut wm, Point::new(5.0, 5.0));
        let kept = window(&mut wm, Point::new(100.0, 100.0));
        let mut anim = AnimateWindowManager::new(ManualClock::new(0));
        anim.register_window(&mut wm, gone, AnimationKind::SlideTop, false, 0);
        anim.register_window(&mut wm, kept, AnimationKind::SlideTop, true, 0);
        wm.destroy(gone);
        wm.process_destroy_list();
        for _ in 0..100 {
            anim.update(&mut wm);
        }
        assert!(anim.is_finished());
        assert_eq!(wm.position(kept), Some(Point::new(100.0, 100.0)));
    }
}
