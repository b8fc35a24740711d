// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Motion of an animated window.
///
/// Raw values start at 1; 0 is "no animation" and is never a valid kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AnimationKind {
    /// Enter from the right edge.
    SlideRight = 1,
    /// Enter from the right edge at double speed.
    SlideRightFast,
    /// Enter from the left edge.
    SlideLeft,
    /// Drop in from the top edge.
    SlideTop,
    /// Drop in from the top edge at double speed.
    SlideTopFast,
    /// Rise from the bottom edge.
    SlideBottom,
    /// Spiral inward onto the rest position.
    Spiral,
    /// Rise from the bottom edge over a fixed duration.
    SlideBottomTimed,
}

impl AnimationKind {
    /// Every kind, in raw-value order.
    pub const ALL: [Self; 8] = [
        Self::SlideRight,
        Self::SlideRightFast,
        Self::SlideLeft,
        Self::SlideTop,
        Self::SlideTopFast,
        Self::SlideBottom,
        Self::Spiral,
        Self::SlideBottomTimed,
    ];
}

/// A raw animation value outside the known kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownAnimation(pub u32);

impl fmt::Display for UnknownAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown animation kind {}", self.0)
    }
}

impl core::error::Error for UnknownAnimation {}

impl TryFrom<u32> for AnimationKind {
    type Error = UnknownAnimation;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|&k| k as u32 == raw)
            .ok_or(UnknownAnimation(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_round_trip_and_reject_out_of_range() {
        for kind in AnimationKind::ALL {
            assert_eq!(AnimationKind::try_from(kind as u32), Ok(kind));
        }
        assert_eq!(AnimationKind::try_from(0), Err(UnknownAnimation(0)));
        assert_eq!(AnimationKind::try_from(9), Err(UnknownAnimation(9)));
    }
}
