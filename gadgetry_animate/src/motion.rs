// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion strategies.
//!
//! Each strategy moves one [`AnimateRecord`] per tick. Forward playback carries the window from
//! an off-screen start onto its rest position; reverse playback carries it from rest back out
//! to the start. Positions stay on whole pixels.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`, `ceil`, `sin`, `cos`
use kurbo::{Point, Size, Vec2};

use gadgetry_tree::{WindowId, WindowManager};

use crate::AnimationKind;

/// Tuning of the velocity slides.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlideTuning {
    /// Pixels per tick far from the target.
    pub max_speed: f64,
    /// Pixels per tick far from the target for the fast kinds.
    pub fast_speed: f64,
    /// Distance from rest inside which the slide eases.
    pub ease_distance: f64,
    /// Per-tick speed factor while easing in; its inverse while easing out.
    pub decay: f64,
    /// Slowest step, in pixels.
    pub min_speed: f64,
}

impl Default for SlideTuning {
    fn default() -> Self {
        Self {
            max_speed: 40.0,
            fast_speed: 80.0,
            ease_distance: 80.0,
            decay: 0.67,
            min_speed: 1.0,
        }
    }
}

/// Tuning of the spiral.
///
/// The spiral starts at half the display width from rest.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpiralTuning {
    /// Radians added per tick.
    pub angle_step: f64,
    /// Pixels the radius shrinks per tick.
    pub radius_step: f64,
}

impl Default for SpiralTuning {
    fn default() -> Self {
        Self {
            angle_step: 0.33,
            radius_step: 10.0,
        }
    }
}

/// Tuning of the timed slide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimedTuning {
    /// Length of the slide in milliseconds.
    pub duration_ms: u64,
}

impl Default for TimedTuning {
    fn default() -> Self {
        Self { duration_ms: 500 }
    }
}

/// One window under animation.
#[derive(Clone, Debug)]
pub struct AnimateRecord {
    pub(crate) window: WindowId,
    pub(crate) kind: AnimationKind,
    /// Off-screen end of the path.
    pub(crate) start: Point,
    pub(crate) cur: Point,
    /// Where the window belongs.
    pub(crate) rest: Point,
    pub(crate) vel: Vec2,
    pub(crate) start_ms: u64,
    pub(crate) end_ms: u64,
    pub(crate) delay_ms: u32,
    pub(crate) radius: f64,
    pub(crate) angle: f64,
    pub(crate) finished: bool,
    pub(crate) needs_finish: bool,
}

impl AnimateRecord {
    pub(crate) fn new(
        window: WindowId,
        kind: AnimationKind,
        rest: Point,
        needs_finish: bool,
        delay_ms: u32,
    ) -> Self {
        Self {
            window,
            kind,
            start: rest,
            cur: rest,
            rest,
            vel: Vec2::ZERO,
            start_ms: 0,
            end_ms: 0,
            delay_ms,
            radius: 0.0,
            angle: 0.0,
            finished: false,
            needs_finish,
        }
    }

    /// Animated window.
    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Motion kind.
    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Position the window settles at when playing forward.
    pub fn rest(&self) -> Point {
        self.rest
    }

    /// Current animated position.
    pub fn current(&self) -> Point {
        self.cur
    }

    /// Start delay in milliseconds.
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Whether the last tick reached the end of the path.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether [`AnimateWindowManager::is_finished`](crate::AnimateWindowManager::is_finished)
    /// waits for this record.
    pub fn needs_finish(&self) -> bool {
        self.needs_finish
    }

    fn place(&mut self, wm: &mut WindowManager, at: Point) {
        self.cur = at;
        wm.set_position(self.window, at);
    }
}

/// A motion strategy.
///
/// `init` and `init_reverse` snap the window to the first point of the path; `update` and
/// `reverse` advance one tick and return `true` once the path is complete.
pub(crate) trait MotionStrategy {
    fn init(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, display: Size, now: u64);
    fn update(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, now: u64) -> bool;
    fn init_reverse(
        &self,
        rec: &mut AnimateRecord,
        wm: &mut WindowManager,
        display: Size,
        now: u64,
        delay_ms: u32,
    );
    fn reverse(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, now: u64) -> bool;
}

/// Constant-speed slide that eases near rest.
#[derive(Clone, Debug, Default)]
pub(crate) struct Slide {
    pub(crate) tuning: SlideTuning,
}

impl Slide {
    /// Offset from rest to the off-screen start.
    fn offset(kind: AnimationKind, display: Size) -> Vec2 {
        match kind {
            AnimationKind::SlideRight | AnimationKind::SlideRightFast => {
                Vec2::new(display.width, 0.0)
            }
            AnimationKind::SlideLeft => Vec2::new(-display.width, 0.0),
            AnimationKind::SlideTop | AnimationKind::SlideTopFast => {
                Vec2::new(0.0, -display.height)
            }
            _ => Vec2::new(0.0, display.height),
        }
    }

    fn top_speed(&self, kind: AnimationKind) -> f64 {
        match kind {
            AnimationKind::SlideRightFast | AnimationKind::SlideTopFast => self.tuning.fast_speed,
            _ => self.tuning.max_speed,
        }
    }

    /// Move `speed` pixels toward `target`, never past it.
    fn step(
        &self,
        rec: &mut AnimateRecord,
        wm: &mut WindowManager,
        target: Point,
        speed: f64,
    ) -> bool {
        let delta = target - rec.cur;
        let remaining = delta.hypot();
        if remaining <= 0.0 {
            rec.place(wm, target);
            return true;
        }
        let dir = delta / remaining;
        rec.vel = dir * speed;
        let step = speed.floor().max(self.tuning.min_speed);
        if step >= remaining {
            rec.place(wm, target);
            return true;
        }
        let next = rec.cur + dir * step;
        rec.place(wm, next);
        false
    }
}

impl MotionStrategy for Slide {
    fn init(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, display: Size, now: u64) {
        let offset = Self::offset(rec.kind, display);
        rec.start = rec.rest + offset;
        rec.vel = Vec2::ZERO;
        rec.start_ms = now + u64::from(rec.delay_ms);
        rec.place(wm, rec.start);
    }

    fn update(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, now: u64) -> bool {
        if now < rec.start_ms {
            return false;
        }
        let remaining = (rec.rest - rec.cur).hypot();
        let top = self.top_speed(rec.kind);
        let speed = if rec.vel == Vec2::ZERO {
            top
        } else if remaining < self.tuning.ease_distance {
            (rec.vel.hypot() * self.tuning.decay).max(self.tuning.min_speed)
        } else {
            top
        };
        let rest = rec.rest;
        self.step(rec, wm, rest, speed)
    }

    fn init_reverse(
        &self,
        rec: &mut AnimateRecord,
        wm: &mut WindowManager,
        display: Size,
        now: u64,
        delay_ms: u32,
    ) {
        rec.start = rec.rest + Self::offset(rec.kind, display);
        rec.vel = Vec2::ZERO;
        rec.start_ms = now + u64::from(delay_ms);
        rec.place(wm, rec.rest);
    }

    fn reverse(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, now: u64) -> bool {
        if now < rec.start_ms {
            return false;
        }
        let traveled = (rec.cur - rec.rest).hypot();
        let top = self.top_speed(rec.kind);
        let speed = if rec.vel == Vec2::ZERO {
            self.tuning.min_speed
        } else if traveled < self.tuning.ease_distance {
            (rec.vel.hypot() / self.tuning.decay).min(top)
        } else {
            top
        };
        let start = rec.start;
        self.step(rec, wm, start, speed)
    }
}

/// Inward spiral around the rest position.
#[derive(Clone, Debug, Default)]
pub(crate) struct Spiral {
    pub(crate) tuning: SpiralTuning,
}

impl Spiral {
    fn point(rec: &AnimateRecord) -> Point {
        let (sin, cos) = (rec.angle.sin(), rec.angle.cos());
        (rec.rest + Vec2::new(rec.radius * cos, rec.radius * sin)).round()
    }

    fn start_radius(display: Size) -> f64 {
        display.width / 2.0
    }
}

impl MotionStrategy for Spiral {
    fn init(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, display: Size, now: u64) {
        rec.radius = Self::start_radius(display);
        rec.angle = 0.0;
        rec.vel = Vec2::new(rec.radius, 0.0);
        rec.start_ms = now + u64::from(rec.delay_ms);
        rec.start = Self::point(rec);
        rec.place(wm, rec.start);
    }

    fn update(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, now: u64) -> bool {
        if now < rec.start_ms {
            return false;
        }
        rec.angle += self.tuning.angle_step;
        rec.radius -= self.tuning.radius_step;
        if rec.radius <= 0.0 {
            rec.radius = 0.0;
            rec.place(wm, rec.rest);
            return true;
        }
        let at = Self::point(rec);
        rec.place(wm, at);
        false
    }

    fn init_reverse(
        &self,
        rec: &mut AnimateRecord,
        wm: &mut WindowManager,
        display: Size,
        now: u64,
        delay_ms: u32,
    ) {
        // Unwind from the angle the forward spiral ends on.
        let full = Self::start_radius(display);
        rec.vel = Vec2::new(full, 0.0);
        let ticks = if self.tuning.radius_step > 0.0 {
            (full / self.tuning.radius_step).ceil()
        } else {
            0.0
        };
        rec.angle = ticks * self.tuning.angle_step;
        rec.radius = 0.0;
        rec.start_ms = now + u64::from(delay_ms);
        rec.place(wm, rec.rest);
    }

    fn reverse(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, now: u64) -> bool {
        if now < rec.start_ms {
            return false;
        }
        let full = rec.vel.x;
        rec.angle -= self.tuning.angle_step;
        rec.radius += self.tuning.radius_step;
        let done = rec.radius >= full || self.tuning.radius_step <= 0.0;
        if done {
            rec.radius = full;
        }
        let at = Self::point(rec);
        rec.place(wm, at);
        done
    }
}

/// Slide interpolated over a fixed duration.
#[derive(Clone, Debug, Default)]
pub(crate) struct TimedSlide {
    pub(crate) tuning: TimedTuning,
}

impl TimedSlide {
    /// Fraction of the slide elapsed at `now`, in `0.0..=1.0`.
    fn progress(rec: &AnimateRecord, now: u64) -> f64 {
        if now >= rec.end_ms {
            return 1.0;
        }
        let span = rec.end_ms - rec.start_ms;
        if span == 0 {
            return 1.0;
        }
        (now.saturating_sub(rec.start_ms)) as f64 / span as f64
    }

    fn arm(&self, rec: &mut AnimateRecord, now: u64, delay_ms: u32) {
        rec.start_ms = now + u64::from(delay_ms);
        rec.end_ms = rec.start_ms + self.tuning.duration_ms;
    }
}

impl MotionStrategy for TimedSlide {
    fn init(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, display: Size, now: u64) {
        rec.start = rec.rest + Vec2::new(0.0, display.height);
        self.arm(rec, now, rec.delay_ms);
        rec.place(wm, rec.start);
    }

    fn update(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, now: u64) -> bool {
        if now < rec.start_ms {
            return false;
        }
        let t = Self::progress(rec, now);
        let at = if t >= 1.0 {
            rec.rest
        } else {
            rec.start.lerp(rec.rest, t).round()
        };
        rec.place(wm, at);
        t >= 1.0
    }

    fn init_reverse(
        &self,
        rec: &mut AnimateRecord,
        wm: &mut WindowManager,
        display: Size,
        now: u64,
        delay_ms: u32,
    ) {
        rec.start = rec.rest + Vec2::new(0.0, display.height);
        self.arm(rec, now, delay_ms);
        rec.place(wm, rec.rest);
    }

    fn reverse(&self, rec: &mut AnimateRecord, wm: &mut WindowManager, now: u64) -> bool {
        if now < rec.start_ms {
            return false;
        }
        let t = Self::progress(rec, now);
        let at = if t >= 1.0 {
            rec.start
        } else {
            rec.rest.lerp(rec.start, t).round()
        };
        rec.place(wm, at);
        t >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn setup(at: Point) -> (WindowManager, WindowId) {
        let mut wm = WindowManager::new(Size::new(800.0, 600.0));
        let w = wm
            .create(
                None,
                gadgetry_tree::WindowStatus::ENABLED,
                at,
                Size::new(50.0, 20.0),
                None,
                None,
            )
            .unwrap();
        (wm, w)
    }

    #[test]
    fn slide_eases_without_overshoot() {
        let (mut wm, w) = setup(Point::new(100.0, 100.0));
        let slide = Slide::default();
        let rest = Point::new(100.0, 100.0);
        let mut rec = AnimateRecord::new(w, AnimationKind::SlideRight, rest, true, 0);
        let display = wm.display_size();
        slide.init(&mut rec, &mut wm, display, 0);
        assert_eq!(wm.position(w), Some(Point::new(900.0, 100.0)));

        let mut xs = vec![];
        while !slide.update(&mut rec, &mut wm, 0) {
            xs.push(rec.cur.x);
            assert!(xs.len() < 100, "slide never settled");
        }
        assert_eq!(rec.cur, rest);
        assert_eq!(xs[0], 860.0);
        assert!(xs.windows(2).all(|p| p[1] < p[0]));
        assert!(xs.iter().all(|&x| x > 100.0 && x.fract() == 0.0));
        // The last steps are shorter than the cruise speed.
        assert!(xs[xs.len() - 2] - xs[xs.len() - 1] < 40.0);
    }

    #[test]
    fn spiral_closes_onto_rest() {
        let (mut wm, w) = setup(Point::new(300.0, 200.0));
        let spiral = Spiral::default();
        let rest = Point::new(300.0, 200.0);
        let mut rec = AnimateRecord::new(w, AnimationKind::Spiral, rest, false, 0);
        let display = wm.display_size();
        spiral.init(&mut rec, &mut wm, display, 0);
        assert_eq!(wm.position(w), Some(Point::new(700.0, 200.0)));
        let mut ticks = 1;
        while !spiral.update(&mut rec, &mut wm, 0) {
            ticks += 1;
        }
        assert_eq!(ticks, 40);
        assert_eq!(wm.position(w), Some(Point::new(300.0, 200.0)));

        spiral.init_reverse(&mut rec, &mut wm, display, 0, 0);
        let mut ticks = 1;
        while !spiral.reverse(&mut rec, &mut wm, 0) {
            ticks += 1;
        }
        assert_eq!(ticks, 40);
        assert_eq!(rec.radius, 400.0);
    }

    #[test]
    fn timed_slide_follows_the_clock() {
        let (mut wm, w) = setup(Point::new(10.0, 100.0));
        let timed = TimedSlide::default();
        let rest = Point::new(10.0, 100.0);
        let mut rec = AnimateRecord::new(w, AnimationKind::SlideBottomTimed, rest, true, 100);
        let display = wm.display_size();
        timed.init(&mut rec, &mut wm, display, 1000);
        assert_eq!(wm.position(w), Some(Point::new(10.0, 700.0)));
        assert!(!timed.update(&mut rec, &mut wm, 1050));
        assert_eq!(wm.position(w), Some(Point::new(10.0, 700.0)));
        assert!(!timed.update(&mut rec, &mut wm, 1350));
        assert_eq!(wm.position(w), Some(Point::new(10.0, 400.0)));
        assert!(timed.update(&mut rec, &mut wm, 1600));
        assert_eq!(wm.position(w), Some(Point::new(10.0, 100.0)));
    }
}
