// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radio button.
//!
//! Radio buttons with the same group number under the same parent are mutually exclusive.

use alloc::vec::Vec;

use gadgetry_tree::{
    InputHandler, InputMsg, Key, MsgResult, Notice, SystemHandler, SystemMsg, WindowId,
    WindowManager, WindowState, WindowStyle,
};

use crate::common::{
    has_focus, navigate, set_label, set_state, state, style, take_focus, track_mouse,
};

/// Payload of a radio button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RadioButtonData {
    /// Exclusion group.
    pub group: i32,
}

/// Stock system and input handler of radio buttons.
#[derive(Copy, Clone, Debug, Default)]
pub struct RadioButton;

impl RadioButton {
    fn activate(wm: &mut WindowManager, window: WindowId) -> MsgResult {
        select(wm, window);
        wm.notify_owner(window, Notice::Selected { from: window });
        MsgResult::Handled
    }
}

impl InputHandler for RadioButton {
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
        match msg {
            InputMsg::MouseEntering(_) | InputMsg::MouseLeaving(_) => track_mouse(wm, window, msg),
            InputMsg::LeftDown(_) => MsgResult::Handled,
            InputMsg::LeftUp(_) => {
                if state(wm, window).contains(WindowState::HILITED) {
                    Self::activate(wm, window)
                } else {
                    MsgResult::Ignored
                }
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

impl SystemHandler for RadioButton {
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::Destroy => MsgResult::Handled,
            SystemMsg::InputFocus { gained, accepted } => take_focus(wm, window, *gained, accepted),
            SystemMsg::SetLabel(_) => set_label(wm, window, msg),
            _ => MsgResult::Ignored,
        }
    }
}

/// Group number of a radio button.
pub fn group(wm: &WindowManager, window: WindowId) -> Option<i32> {
    wm.user_data::<RadioButtonData>(window).map(|d| d.group)
}

/// Whether the radio button is selected.
pub fn is_selected(wm: &WindowManager, window: WindowId) -> bool {
    state(wm, window).contains(WindowState::SELECTED)
}

/// Select `window` and clear every other radio button of its group, without notifying.
pub fn select(wm: &mut WindowManager, window: WindowId) {
    let Some(my_group) = group(wm, window) else {
        return;
    };
    let siblings: Vec<WindowId> = match wm.parent(window) {
        Some(p) => wm.children(p).collect(),
        None => wm.top_level().collect(),
    };
    for sibling in siblings {
        if sibling != window
            && style(wm, sibling).contains(WindowStyle::RADIO_BUTTON)
            && group(wm, sibling) == Some(my_group)
        {
            set_state(wm, sibling, WindowState::SELECTED, false);
        }
    }
    set_state(wm, window, WindowState::SELECTED, true);
}

/// Clear the selection of `window` alone.
pub fn clear(wm: &mut WindowManager, window: WindowId) {
    set_state(wm, window, WindowState::SELECTED, false);
}
