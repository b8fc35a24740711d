// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Check box.
//!
//! State lives entirely in the window's [`WindowState`] bits:
//!
//! - `HILITED`: the pointer is over the box (with `MOUSE_TRACK`) or the box has focus.
//! - `SELECTED`: checked.
//! - `SELECTED_RIGHT`: armed by the right button; it never changes `SELECTED`.

use gadgetry_tree::{
    InputHandler, InputMsg, Key, MsgResult, Notice, SystemHandler, SystemMsg, WindowId,
    WindowManager, WindowState,
};

use crate::common::{
    has_focus, navigate, set_label, set_state, state, take_focus, toggle_state, track_mouse,
};

/// Stock system and input handler of check boxes.
#[derive(Copy, Clone, Debug, Default)]
pub struct CheckBox;

impl CheckBox {
    fn toggle(wm: &mut WindowManager, window: WindowId) -> MsgResult {
        toggle_state(wm, window, WindowState::SELECTED);
        wm.notify_owner(window, Notice::Selected { from: window });
        MsgResult::Handled
    }
}

impl InputHandler for CheckBox {
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
        match msg {
            InputMsg::MouseEntering(_) | InputMsg::MouseLeaving(_) => track_mouse(wm, window, msg),
            // Press feedback only; the toggle happens on release.
            InputMsg::LeftDown(_) => MsgResult::Handled,
            InputMsg::LeftUp(_) => {
                if state(wm, window).contains(WindowState::HILITED) {
                    Self::toggle(wm, window)
                } else {
                    MsgResult::Ignored
                }
            }
            InputMsg::RightDown(_) => {
                set_state(wm, window, WindowState::SELECTED_RIGHT, true);
                MsgResult::Handled
            }
            InputMsg::RightUp(_) => {
                if state(wm, window).contains(WindowState::SELECTED_RIGHT) {
                    set_state(wm, window, WindowState::SELECTED_RIGHT, false);
                    wm.notify_owner(window, Notice::SelectedRight { from: window });
                    MsgResult::Handled
                } else {
                    MsgResult::Ignored
                }
            }
            InputMsg::Char { .. } if !has_focus(wm, window) => MsgResult::Ignored,
            InputMsg::Char { key, state: keys } => match key {
                Key::Return | Key::Space => {
                    if msg.is_key_down() {
                        Self::toggle(wm, window)
                    } else {
                        MsgResult::Handled
                    }
                }
                _ => navigate(wm, window, key, keys).unwrap_or(MsgResult::Ignored),
            },
            _ => MsgResult::Ignored,
        }
    }
}

impl SystemHandler for CheckBox {
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::Destroy => MsgResult::Handled,
            SystemMsg::InputFocus { gained, accepted } => take_focus(wm, window, *gained, accepted),
            SystemMsg::SetLabel(_) => set_label(wm, window, msg),
            _ => MsgResult::Ignored,
        }
    }
}

/// Whether the check box is checked.
pub fn is_checked(wm: &WindowManager, window: WindowId) -> bool {
    state(wm, window).contains(WindowState::SELECTED)
}

/// Check or uncheck without notifying the owner.
pub fn set_checked(wm: &mut WindowManager, window: WindowId, checked: bool) {
    set_state(wm, window, WindowState::SELECTED, checked);
}
