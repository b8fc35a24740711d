// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gadgetry_animate --heading-base-level=0

//! Gadgetry Animate: transition animations for windows of a Gadgetry window tree.
//!
//! An [`AnimateWindowManager`] moves registered windows from off screen onto their current
//! position, one step per [`update`](AnimateWindowManager::update), and can play the same paths
//! backward to dismiss a screen.
//!
//! Motion kinds ([`AnimationKind`]):
//!
//! - Slides enter from one display edge at a fixed speed and ease over the last few pixels.
//!   The `Fast` variants cruise at twice the speed.
//! - The spiral circles inward from half the display width away.
//! - The timed slide rises from the bottom edge over a fixed duration read from a [`Clock`].
//!
//! Each window may carry a start delay so a group of windows can be staggered. Reverse playback
//! mirrors the delays so the last window in is the first one out.
//!
//! Tuning values live in [`SlideTuning`], [`SpiralTuning`] and [`TimedTuning`].
//!
//! This crate is `no_std` and uses `alloc`. One of the `std` or `libm` features is required for
//! the float math. `std` also provides [`SystemClock`].

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod clock;
mod kind;
mod manager;
mod motion;

#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use kind::{AnimationKind, UnknownAnimation};
pub use manager::AnimateWindowManager;
pub use motion::{AnimateRecord, SlideTuning, SpiralTuning, TimedTuning};
