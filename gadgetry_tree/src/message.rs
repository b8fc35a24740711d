// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Message protocol between the window manager, windows, and gadgets.
//!
//! Two channels exist:
//!
//! - [`SystemMsg`]: lifecycle and widget-internal notifications (create/destroy, focus,
//!   label changes, resizes) plus [`Notice`]s that gadgets bubble to their owner.
//! - [`InputMsg`]: raw pointer and keyboard events.
//!
//! Both are delivered synchronously. A handler may send further messages, create or destroy
//! windows, or change focus from inside its own call; the manager tolerates the tree changing
//! underneath it and defers freeing destroyed windows until the dispatch has unwound.

use alloc::string::String;
use kurbo::{Point, Size};

use crate::types::{Key, KeyState, WindowId};

/// Result of delivering a message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum MsgResult {
    /// The handler consumed the message.
    Handled,
    /// The handler did not act on the message.
    #[default]
    Ignored,
}

impl MsgResult {
    /// Returns `true` for [`MsgResult::Handled`].
    #[inline]
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// A system message.
#[derive(Clone, Debug, PartialEq)]
pub enum SystemMsg {
    /// The window was just created.
    Create,
    /// The window is being destroyed; it is still linked while this is delivered.
    Destroy,
    /// The layout script finished building the window.
    ScriptCreate,
    /// Keyboard focus is moving to (`gained`) or away from the window.
    ///
    /// `accepted` is an out-parameter: a handler that wants focus sets it to `true`.
    InputFocus {
        /// Focus arrives (`true`) or leaves (`false`).
        gained: bool,
        /// Written by the handler.
        accepted: bool,
    },
    /// Replace the window's text label.
    SetLabel(String),
    /// The window's size changed.
    Resized(Size),
    /// A direct child changed size.
    ChildResized(WindowId),
    /// A notification bubbled up from a gadget.
    Notify(Notice),
    /// Application-defined message carrying two opaque words.
    User {
        /// Message number.
        msg: u32,
        /// First argument.
        data1: u32,
        /// Second argument.
        data2: u32,
    },
}

/// A gadget notification delivered to the gadget's owner.
///
/// Every variant names the gadget it came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Button, check box or radio button activated.
    Selected {
        /// Sending gadget.
        from: WindowId,
    },
    /// Right-button activation.
    SelectedRight {
        /// Sending gadget.
        from: WindowId,
    },
    /// Pointer entered a mouse-tracking gadget.
    MouseEntering {
        /// Sending gadget.
        from: WindowId,
    },
    /// Pointer left a mouse-tracking gadget.
    MouseLeaving {
        /// Sending gadget.
        from: WindowId,
    },
    /// Gadget gained or lost keyboard focus.
    FocusChange {
        /// Sending gadget.
        from: WindowId,
        /// Focus gained.
        gained: bool,
    },
    /// Slider value changed while tracking.
    SliderTrack {
        /// Sending gadget.
        from: WindowId,
        /// New value.
        value: i32,
    },
    /// Slider thumb released.
    SliderDone {
        /// Sending gadget.
        from: WindowId,
        /// Final value.
        value: i32,
    },
    /// List box row clicked or moved to with the keyboard.
    ListSelected {
        /// Sending gadget.
        from: WindowId,
        /// Row, or `None` when the selection was cleared.
        row: Option<usize>,
    },
    /// List box row double-clicked.
    ListDoubleClick {
        /// Sending gadget.
        from: WindowId,
        /// Row.
        row: usize,
    },
    /// List box row right-clicked.
    ListRightClick {
        /// Sending gadget.
        from: WindowId,
        /// Row.
        row: usize,
    },
    /// Combo box selection changed.
    ComboSelected {
        /// Sending gadget.
        from: WindowId,
        /// Entry index, or `None` when cleared.
        index: Option<usize>,
    },
    /// Tab control switched panes.
    TabSelected {
        /// Sending gadget.
        from: WindowId,
        /// Active tab.
        tab: usize,
    },
    /// Text entry content changed.
    UpdateText {
        /// Sending gadget.
        from: WindowId,
    },
    /// Return pressed in a text entry.
    EditDone {
        /// Sending gadget.
        from: WindowId,
    },
}

/// An input message.
///
/// Pointer variants carry the cursor position in screen coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputMsg {
    /// Left button pressed.
    LeftDown(Point),
    /// Left button released.
    LeftUp(Point),
    /// Pointer moved with the left button held.
    LeftDrag(Point),
    /// Left button double-clicked.
    LeftDoubleClick(Point),
    /// Right button pressed.
    RightDown(Point),
    /// Right button released.
    RightUp(Point),
    /// Pointer moved with the right button held.
    RightDrag(Point),
    /// Middle button pressed.
    MiddleDown(Point),
    /// Middle button released.
    MiddleUp(Point),
    /// Pointer entered the window (synthesized by the manager).
    MouseEntering(Point),
    /// Pointer left the window (synthesized by the manager).
    MouseLeaving(Point),
    /// Pointer moved with no button held.
    MousePos(Point),
    /// Wheel scrolled up.
    WheelUp(Point),
    /// Wheel scrolled down.
    WheelDown(Point),
    /// Keyboard event.
    Char {
        /// Key.
        key: Key,
        /// Press/release and modifiers.
        state: KeyState,
    },
}

impl InputMsg {
    /// Cursor position for pointer messages.
    pub fn pos(&self) -> Option<Point> {
        match *self {
            Self::LeftDown(p)
            | Self::LeftUp(p)
            | Self::LeftDrag(p)
            | Self::LeftDoubleClick(p)
            | Self::RightDown(p)
            | Self::RightUp(p)
            | Self::RightDrag(p)
            | Self::MiddleDown(p)
            | Self::MiddleUp(p)
            | Self::MouseEntering(p)
            | Self::MouseLeaving(p)
            | Self::MousePos(p)
            | Self::WheelUp(p)
            | Self::WheelDown(p) => Some(p),
            Self::Char { .. } => None,
        }
    }

    /// Returns `true` for a key-down event.
    pub fn is_key_down(&self) -> bool {
        matches!(self, Self::Char { state, .. } if state.contains(KeyState::DOWN))
    }
}
