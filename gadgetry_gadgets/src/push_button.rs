// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Push button.
//!
//! A plain button shows `SELECTED` while pressed and bubbles [`Notice::Selected`] when the left
//! button is released over it. Status bits change the behavior:
//!
//! - `CHECK_LIKE`: the button latches; each activation flips `SELECTED`.
//! - `ON_MOUSE_DOWN`: the notice is sent on press instead of on release.
//! - `RIGHT_CLICK`: the right button arms `SELECTED_RIGHT` and bubbles [`Notice::SelectedRight`].

use gadgetry_tree::{
    InputHandler, InputMsg, Key, MsgResult, Notice, SystemHandler, SystemMsg, WindowId,
    WindowManager, WindowState, WindowStatus,
};

use crate::common::{
    has_focus, navigate, set_label, set_state, state, status, take_focus, toggle_state, track_mouse,
};

/// Stock system and input handler of push buttons.
#[derive(Copy, Clone, Debug, Default)]
pub struct PushButton;

impl PushButton {
    fn activate(wm: &mut WindowManager, window: WindowId) -> MsgResult {
        if status(wm, window).contains(WindowStatus::CHECK_LIKE) {
            toggle_state(wm, window, WindowState::SELECTED);
        }
        wm.notify_owner(window, Notice::Selected { from: window });
        MsgResult::Handled
    }
}

impl InputHandler for PushButton {
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
        let status = status(wm, window);
        let check_like = status.contains(WindowStatus::CHECK_LIKE);
        match msg {
            InputMsg::MouseEntering(_) => track_mouse(wm, window, msg),
            InputMsg::MouseLeaving(_) => {
                if !check_like {
                    set_state(wm, window, WindowState::SELECTED, false);
                }
                track_mouse(wm, window, msg);
                MsgResult::Handled
            }
            InputMsg::LeftDown(_) => {
                if !check_like {
                    set_state(wm, window, WindowState::SELECTED, true);
                }
                if status.contains(WindowStatus::ON_MOUSE_DOWN) {
                    return Self::activate(wm, window);
                }
                MsgResult::Handled
            }
            InputMsg::LeftUp(_) => {
                let current = state(wm, window);
                if status.contains(WindowStatus::ON_MOUSE_DOWN) {
                    if !check_like {
                        set_state(wm, window, WindowState::SELECTED, false);
                    }
                    return MsgResult::Handled;
                }
                if check_like {
                    if current.contains(WindowState::HILITED) {
                        return Self::activate(wm, window);
                    }
                    return MsgResult::Ignored;
                }
                if current.contains(WindowState::SELECTED) {
                    set_state(wm, window, WindowState::SELECTED, false);
                    return Self::activate(wm, window);
                }
                MsgResult::Ignored
            }
            InputMsg::RightDown(_) if status.contains(WindowStatus::RIGHT_CLICK) => {
                set_state(wm, window, WindowState::SELECTED_RIGHT, true);
                MsgResult::Handled
            }
            InputMsg::RightUp(_) if state(wm, window).contains(WindowState::SELECTED_RIGHT) => {
                set_state(wm, window, WindowState::SELECTED_RIGHT, false);
                wm.notify_owner(window, Notice::SelectedRight { from: window });
                MsgResult::Handled
            }
            InputMsg::Char { .. } if !has_focus(wm, window) => MsgResult::Ignored,
            InputMsg::Char { key, state: keys } => match key {
                Key::Return | Key::Space => {
                    if msg.is_key_down() {
                        Self::activate(wm, window)
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

impl SystemHandler for PushButton {
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::Destroy => MsgResult::Handled,
            SystemMsg::InputFocus { gained, accepted } => take_focus(wm, window, *gained, accepted),
            SystemMsg::SetLabel(_) => set_label(wm, window, msg),
            _ => MsgResult::Ignored,
        }
    }
}

/// Whether a check-like button is latched, or a plain button is held down.
pub fn is_selected(wm: &WindowManager, window: WindowId) -> bool {
    state(wm, window).contains(WindowState::SELECTED)
}

/// Latch or release a check-like button without notifying the owner.
pub fn set_selected(wm: &mut WindowManager, window: WindowId, selected: bool) {
    set_state(wm, window, WindowState::SELECTED, selected);
}
