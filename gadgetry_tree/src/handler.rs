// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler slots.
//!
//! Every window has four slots: system, input, draw, and tooltip. Each slot holds a shared,
//! stateless handler object; per-window state lives in the window itself (instance data and
//! the user-data payload). Handlers are reference counted so the manager can clone one out of
//! its slot before calling it, which leaves the handler free to mutate the tree, including the
//! window it was invoked for.
//!
//! Closures implement the slot traits directly:
//!
//! ```
//! use std::rc::Rc;
//! use gadgetry_tree::{InputMsg, MsgResult, WindowManager, WindowId, InputHandler};
//!
//! let block_all: Rc<dyn InputHandler> =
//!     Rc::new(|_: &mut WindowManager, _: WindowId, _: InputMsg| MsgResult::Handled);
//! # let _ = block_all;
//! ```

use alloc::rc::Rc;
use core::fmt;
use kurbo::Point;

use crate::WindowManager;
use crate::message::{InputMsg, MsgResult, SystemMsg};
use crate::paint::Painter;
use crate::types::{WindowId, WindowStyle};

/// Receives system messages.
pub trait SystemHandler {
    /// Handle `msg` for `window`.
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult;
}

/// Receives input messages.
pub trait InputHandler {
    /// Handle `msg` for `window`.
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult;
}

/// Draws a window through a [`Painter`].
pub trait DrawHandler {
    /// Paint `window`.
    fn draw(&self, wm: &WindowManager, window: WindowId, painter: &mut dyn Painter);
}

/// Shows a tooltip for a window.
pub trait TooltipHandler {
    /// Called while the pointer rests over `window` at `mouse`.
    fn tooltip(&self, wm: &mut WindowManager, window: WindowId, mouse: Point);
}

impl<F> SystemHandler for F
where
    F: Fn(&mut WindowManager, WindowId, &mut SystemMsg) -> MsgResult,
{
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        self(wm, window, msg)
    }
}

impl<F> InputHandler for F
where
    F: Fn(&mut WindowManager, WindowId, InputMsg) -> MsgResult,
{
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
        self(wm, window, msg)
    }
}

impl<F> DrawHandler for F
where
    F: Fn(&WindowManager, WindowId, &mut dyn Painter),
{
    fn draw(&self, wm: &WindowManager, window: WindowId, painter: &mut dyn Painter) {
        self(wm, window, painter);
    }
}

impl<F> TooltipHandler for F
where
    F: Fn(&mut WindowManager, WindowId, Point),
{
    fn tooltip(&self, wm: &mut WindowManager, window: WindowId, mouse: Point) {
        self(wm, window, mouse);
    }
}

/// The four handler slots of a window.
///
/// An empty slot falls back to the manager's defaults (see [`DefaultHandlers`]).
#[derive(Clone, Default)]
pub struct Handlers {
    /// System message slot.
    pub system: Option<Rc<dyn SystemHandler>>,
    /// Input message slot.
    pub input: Option<Rc<dyn InputHandler>>,
    /// Draw slot.
    pub draw: Option<Rc<dyn DrawHandler>>,
    /// Tooltip slot.
    pub tooltip: Option<Rc<dyn TooltipHandler>>,
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("system", &self.system.is_some())
            .field("input", &self.input.is_some())
            .field("draw", &self.draw.is_some())
            .field("tooltip", &self.tooltip.is_some())
            .finish()
    }
}

/// Handlers used for empty slots.
///
/// The stock defaults ignore every message and draw nothing.
#[derive(Clone, Debug, Default)]
pub struct DefaultHandlers {
    /// Fallback for empty slots.
    pub handlers: Handlers,
}

/// Supplies renderer-specific draw handlers for newly created windows.
///
/// The manager asks the factory for a draw handler whenever a window is created without one,
/// keyed by the window's style so each gadget kind can get its own look.
pub trait WindowFactory {
    /// Draw handler for a window with `style`, if the renderer has one.
    fn default_draw(&self, style: WindowStyle) -> Option<Rc<dyn DrawHandler>>;
}

/// Input handler that swallows every message.
#[derive(Copy, Clone, Debug, Default)]
pub struct BlockInput;

impl InputHandler for BlockInput {
    fn input(&self, _wm: &mut WindowManager, _window: WindowId, _msg: InputMsg) -> MsgResult {
        MsgResult::Handled
    }
}
