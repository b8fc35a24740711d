// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forward and reverse playback through the manager.

use gadgetry_animate::{
    AnimateWindowManager, AnimationKind, ManualClock, SlideTuning, TimedTuning,
};
use gadgetry_tree::{WindowId, WindowManager, WindowStatus};
use kurbo::{Point, Size};

fn setup() -> WindowManager {
    WindowManager::new(Size::new(800.0, 600.0))
}

fn window(wm: &mut WindowManager, at: Point) -> WindowId {
    wm.create(None, WindowStatus::ENABLED, at, Size::new(40.0, 20.0), None, None)
        .unwrap()
}

fn run<C: gadgetry_animate::Clock>(anim: &mut AnimateWindowManager<C>, wm: &mut WindowManager) {
    for _ in 0..1000 {
        if anim.is_finished() {
            return;
        }
        anim.update(wm);
    }
    panic!("animation did not finish");
}

#[test]
fn slide_right_starts_off_screen_and_settles() {
    let mut wm = setup();
    let w = window(&mut wm, Point::new(100.0, 100.0));
    let mut anim = AnimateWindowManager::new(ManualClock::new(0));
    assert!(anim.register_window(&mut wm, w, AnimationKind::SlideRight, true, 0));
    assert_eq!(wm.position(w), Some(Point::new(900.0, 100.0)));
    assert!(!anim.is_finished());

    let mut last = 900.0;
    while !anim.is_finished() {
        anim.update(&mut wm);
        let x = wm.position(w).unwrap().x;
        assert!(x < last && x >= 100.0, "x went from {last} to {x}");
        last = x;
    }
    assert_eq!(wm.position(w), Some(Point::new(100.0, 100.0)));
}

#[test]
fn second_registration_of_a_window_is_refused() {
    let mut wm = setup();
    let w = window(&mut wm, Point::new(100.0, 100.0));
    let mut anim = AnimateWindowManager::new(ManualClock::new(0));
    assert!(anim.register_window(&mut wm, w, AnimationKind::SlideRight, true, 0));
    assert!(!anim.register_window(&mut wm, w, AnimationKind::SlideRight, true, 0));
    assert!(!anim.register_window(&mut wm, w, AnimationKind::Spiral, false, 0));
    assert!(!anim.register_window_raw(&mut wm, w, 3, false, 0));
    assert_eq!(anim.records().count(), 1);
    assert_eq!(wm.position(w), Some(Point::new(900.0, 100.0)));

    run(&mut anim, &mut wm);
    assert_eq!(wm.position(w), Some(Point::new(100.0, 100.0)));
}

#[test]
fn every_kind_returns_to_rest_on_immediate_reverse() {
    for kind in AnimationKind::ALL {
        let mut wm = setup();
        let rest = Point::new(120.0, 80.0);
        let w = window(&mut wm, rest);
        let mut anim = AnimateWindowManager::new(ManualClock::new(0));
        assert!(anim.register_window(&mut wm, w, kind, true, 0));
        assert_ne!(wm.position(w), Some(rest), "{kind:?} did not move off rest");
        anim.reverse_animate(&mut wm);
        assert!(anim.is_reversed());
        assert_eq!(wm.position(w), Some(rest), "{kind:?} reverse did not start at rest");
    }
}

#[test]
fn reverse_carries_windows_back_out() {
    let mut wm = setup();
    let w = window(&mut wm, Point::new(100.0, 100.0));
    let mut anim = AnimateWindowManager::new(ManualClock::new(0));
    anim.register_window(&mut wm, w, AnimationKind::SlideTopFast, true, 0);
    run(&mut anim, &mut wm);
    assert_eq!(wm.position(w), Some(Point::new(100.0, 100.0)));

    anim.reverse_animate(&mut wm);
    assert!(!anim.is_finished());
    run(&mut anim, &mut wm);
    assert_eq!(wm.position(w), Some(Point::new(100.0, -500.0)));
}

#[test]
fn delays_stagger_and_mirror_on_reverse() {
    let mut wm = setup();
    let first = window(&mut wm, Point::new(0.0, 100.0));
    let late = window(&mut wm, Point::new(0.0, 200.0));
    let clock = ManualClock::new(1000);
    let mut anim = AnimateWindowManager::new(&clock)
        .with_timed_tuning(TimedTuning { duration_ms: 200 });
    anim.register_window(&mut wm, first, AnimationKind::SlideBottomTimed, true, 0);
    anim.register_window(&mut wm, late, AnimationKind::SlideBottomTimed, true, 300);
    assert_eq!(anim.max_delay(), 300);

    clock.advance(200);
    anim.update(&mut wm);
    assert_eq!(wm.position(first), Some(Point::new(0.0, 100.0)));
    assert_eq!(wm.position(late), Some(Point::new(0.0, 800.0)));
    assert!(!anim.is_finished());

    clock.advance(300);
    anim.update(&mut wm);
    assert_eq!(wm.position(late), Some(Point::new(0.0, 200.0)));
    assert!(anim.is_finished());

    // Reversed, the late window leaves at once and the first one waits 300ms.
    anim.reverse_animate(&mut wm);
    clock.advance(200);
    anim.update(&mut wm);
    assert_eq!(wm.position(late), Some(Point::new(0.0, 800.0)));
    assert_eq!(wm.position(first), Some(Point::new(0.0, 100.0)));
    clock.advance(300);
    anim.update(&mut wm);
    assert_eq!(wm.position(first), Some(Point::new(0.0, 700.0)));
    assert!(anim.is_finished());
}

#[test]
fn free_running_records_do_not_block_is_finished() {
    let mut wm = setup();
    let w = window(&mut wm, Point::new(10.0, 10.0));
    let mut anim = AnimateWindowManager::new(ManualClock::new(0));
    anim.register_window(&mut wm, w, AnimationKind::Spiral, false, 0);
    assert!(anim.is_finished());
    anim.update(&mut wm);
    assert_ne!(wm.position(w), Some(Point::new(10.0, 10.0)));
}

#[test]
fn reset_can_snap_windows_home() {
    let mut wm = setup();
    let w = window(&mut wm, Point::new(50.0, 60.0));
    let slow = SlideTuning {
        max_speed: 2.0,
        ..SlideTuning::default()
    };
    let mut anim = AnimateWindowManager::new(ManualClock::new(0)).with_slide_tuning(slow);
    anim.register_window(&mut wm, w, AnimationKind::SlideLeft, true, 0);
    anim.update(&mut wm);
    assert_eq!(wm.position(w), Some(Point::new(-748.0, 60.0)));

    anim.reset(&mut wm, true);
    assert_eq!(wm.position(w), Some(Point::new(50.0, 60.0)));
    assert_eq!(anim.records().count(), 0);
    assert!(!anim.is_reversed());
    assert!(anim.is_finished());
}
