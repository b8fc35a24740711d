// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Left-button grab of a `DRAGABLE` window.

use kurbo::{Point, Vec2};

use crate::types::WindowId;

/// The window held by the left button and the last pointer position seen while holding it.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Grab {
    held: Option<(WindowId, Point)>,
}

impl Grab {
    pub(crate) fn window(&self) -> Option<WindowId> {
        self.held.map(|(w, _)| w)
    }

    pub(crate) fn take_hold(&mut self, window: WindowId, pointer: Point) {
        self.held = Some((window, pointer));
    }

    /// Move the pointer; returns how far the held window should follow.
    pub(crate) fn follow(&mut self, pointer: Point) -> Option<Vec2> {
        let (_, last) = self.held.as_mut()?;
        let delta = pointer - *last;
        *last = pointer;
        Some(delta)
    }

    pub(crate) fn let_go(&mut self) {
        self.held = None;
    }

    /// Drop the hold if `window` is the one held.
    pub(crate) fn forget(&mut self, window: WindowId) {
        if self.window() == Some(window) {
            self.held = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_reports_steps_between_pointer_moves() {
        let mut grab = Grab::default();
        assert_eq!(grab.follow(Point::new(3.0, 3.0)), None);

        grab.take_hold(WindowId::new(0, 1), Point::new(10.0, 10.0));
        assert_eq!(grab.follow(Point::new(14.0, 7.0)), Some(Vec2::new(4.0, -3.0)));
        assert_eq!(grab.follow(Point::new(14.0, 9.0)), Some(Vec2::new(0.0, 2.0)));
        grab.let_go();
        assert_eq!(grab.window(), None);
    }

    #[test]
    fn forget_ignores_other_windows() {
        let mut grab = Grab::default();
        grab.take_hold(WindowId::new(0, 1), Point::ZERO);
        grab.forget(WindowId::new(1, 1));
        assert_eq!(grab.window(), Some(WindowId::new(0, 1)));
        grab.forget(WindowId::new(0, 1));
        assert_eq!(grab.window(), None);
    }
}
