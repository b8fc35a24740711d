// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gadgetry_tree --heading-base-level=0

//! Gadgetry Tree: the retained window tree of a game UI.
//!
//! Gadgetry Tree owns every on-screen window of a game client's interface, from full-screen
//! menus down to single buttons, and routes system and input messages through them.
//!
//! - Windows live in an arena addressed by generational [`WindowId`]s. Each window has a
//!   parent-relative rectangle, [`WindowStatus`] and [`WindowStyle`] bits, [`InstanceData`]
//!   and four handler slots: system, input, draw and tooltip.
//! - Sibling lists are ordered front to back; the head of a list is drawn last and hit first.
//! - The [`WindowManager`] tracks focus, pointer capture, the grabbed window, the window under
//!   the cursor, a tab order, and a modal stack.
//! - Destruction is two-phase: [`WindowManager::destroy`] unlinks a window immediately and
//!   [`WindowManager::process_destroy_list`] frees it once no handler is running.
//! - [`WindowLayout`] groups the windows of one screen behind init/update/shutdown callbacks.
//!
//! ## Messages
//!
//! Handlers receive [`SystemMsg`]s (lifecycle, focus, labels, resizes and [`Notice`]s bubbled up
//! from gadgets) and [`InputMsg`]s (pointer and keyboard). They answer with a [`MsgResult`].
//! Unhandled pointer and key input climbs the parent chain; gadget notifications go to the
//! window's *owner* instead, see [`WindowManager::notify_owner`].
//!
//! ## Drawing
//!
//! The tree does not rasterize. [`WindowManager::repaint`] walks visible windows back to front
//! and calls their draw handlers with a host [`Painter`].
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Size};
//! use gadgetry_tree::{InputMsg, MsgResult, WindowId, WindowManager, WindowStatus};
//!
//! let mut wm = WindowManager::new(Size::new(800.0, 600.0));
//! let button = wm
//!     .create(None, WindowStatus::ENABLED, Point::new(10.0, 10.0), Size::new(80.0, 20.0), None, None)
//!     .unwrap();
//!
//! let clicks = Rc::new(Cell::new(0));
//! let counter = clicks.clone();
//! wm.set_input_handler(
//!     button,
//!     Some(Rc::new(move |_: &mut WindowManager, _: WindowId, msg: InputMsg| {
//!         if let InputMsg::LeftUp(_) = msg {
//!             counter.set(counter.get() + 1);
//!             return MsgResult::Handled;
//!         }
//!         MsgResult::Ignored
//!     })),
//! );
//!
//! wm.process_mouse_event(InputMsg::LeftUp(Point::new(20.0, 15.0)));
//! wm.process_mouse_event(InputMsg::LeftUp(Point::new(200.0, 200.0)));
//! assert_eq!(clicks.get(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatch;
mod drag;
mod focus;
mod handler;
mod layout;
mod manager;
mod message;
mod node;
mod paint;
mod types;

pub use handler::{
    BlockInput, DefaultHandlers, DrawHandler, Handlers, InputHandler, SystemHandler,
    TooltipHandler, WindowFactory,
};
pub use layout::{LayoutCallback, WindowLayout};
pub use manager::{Siblings, WindowManager};
pub use message::{InputMsg, MsgResult, Notice, SystemMsg};
pub use node::{InstanceData, WindowNode};
pub use paint::{PaintOp, Painter, Recorder};
pub use types::{
    DrawData, FontDesc, Key, KeyState, LayoutId, TextColors, WindowId, WindowState, WindowStatus,
    WindowStyle, make_color,
};
