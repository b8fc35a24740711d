// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-line text entry.

use alloc::string::String;

use gadgetry_tree::{
    InputHandler, InputMsg, Key, KeyState, MsgResult, Notice, SystemHandler, SystemMsg, WindowId,
    WindowManager,
};

use crate::common::{take_focus, track_mouse};

/// Payload of a text entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextEntryData {
    /// Maximum number of characters, `0` for unlimited.
    pub max_len: usize,
    /// Draw the text as asterisks.
    pub secret: bool,
    /// Accept digits only.
    pub numerical: bool,
    /// Accept letters and digits only.
    pub alpha_numerical: bool,
    /// Accept ASCII only.
    pub ascii_only: bool,
}

impl TextEntryData {
    /// Whether `c` passes the character filters.
    pub fn accepts(&self, c: char) -> bool {
        !c.is_control()
            && (!self.numerical || c.is_ascii_digit())
            && (!self.alpha_numerical || c.is_alphanumeric())
            && (!self.ascii_only || c.is_ascii())
    }
}

/// Current text.
pub fn text(wm: &WindowManager, window: WindowId) -> &str {
    wm.window(window).map_or("", |n| n.text())
}

/// Text as it should be drawn: asterisks for secret entries.
pub fn display_text(wm: &WindowManager, window: WindowId) -> String {
    let text = text(wm, window);
    match wm.user_data::<TextEntryData>(window) {
        Some(d) if d.secret => text.chars().map(|_| '*').collect(),
        _ => text.into(),
    }
}

/// Replace the text, dropping characters the filters reject and truncating to `max_len`.
pub fn set_text(wm: &mut WindowManager, window: WindowId, value: &str) {
    let Some(data) = wm.user_data::<TextEntryData>(window) else {
        return;
    };
    let limit = if data.max_len == 0 {
        usize::MAX
    } else {
        data.max_len
    };
    let filtered: String = value.chars().filter(|&c| data.accepts(c)).take(limit).collect();
    if let Some(node) = wm.window_mut(window) {
        node.instance_mut().text = filtered;
    }
}

/// Stock system and input handler of text entries.
#[derive(Copy, Clone, Debug, Default)]
pub struct TextEntry;

impl TextEntry {
    fn insert(wm: &mut WindowManager, window: WindowId, c: char) -> MsgResult {
        let Some(data) = wm.user_data::<TextEntryData>(window) else {
            return MsgResult::Ignored;
        };
        if !data.accepts(c) {
            return MsgResult::Handled;
        }
        let max_len = data.max_len;
        let Some(node) = wm.window_mut(window) else {
            return MsgResult::Ignored;
        };
        let text = &mut node.instance_mut().text;
        if max_len > 0 && text.chars().count() >= max_len {
            return MsgResult::Handled;
        }
        text.push(c);
        wm.notify_owner(window, Notice::UpdateText { from: window });
        MsgResult::Handled
    }

    fn backspace(wm: &mut WindowManager, window: WindowId) -> MsgResult {
        let removed = wm
            .window_mut(window)
            .and_then(|n| n.instance_mut().text.pop())
            .is_some();
        if removed {
            wm.notify_owner(window, Notice::UpdateText { from: window });
        }
        MsgResult::Handled
    }
}

impl InputHandler for TextEntry {
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
        match msg {
            InputMsg::MouseEntering(_) | InputMsg::MouseLeaving(_) => track_mouse(wm, window, msg),
            InputMsg::LeftDown(_) | InputMsg::LeftUp(_) => MsgResult::Handled,
            InputMsg::Char { key, state } => {
                if !state.contains(KeyState::DOWN) {
                    return MsgResult::Handled;
                }
                match key {
                    Key::Char(c) => Self::insert(wm, window, c),
                    Key::Space => Self::insert(wm, window, ' '),
                    Key::Backspace => Self::backspace(wm, window),
                    Key::Return => {
                        wm.notify_owner(window, Notice::EditDone { from: window });
                        MsgResult::Handled
                    }
                    Key::Tab => {
                        if state.contains(KeyState::SHIFT) {
                            wm.prev_tab(window);
                        } else {
                            wm.next_tab(window);
                        }
                        MsgResult::Handled
                    }
                    Key::Escape => MsgResult::Ignored,
                    _ => MsgResult::Handled,
                }
            }
            _ => MsgResult::Ignored,
        }
    }
}

impl SystemHandler for TextEntry {
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::Destroy => MsgResult::Handled,
            SystemMsg::InputFocus { gained, accepted } => take_focus(wm, window, *gained, accepted),
            SystemMsg::SetLabel(text) => {
                let text = core::mem::take(text);
                set_text(wm, window, &text);
                MsgResult::Handled
            }
            _ => MsgResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_compose() {
        let numeric = TextEntryData {
            numerical: true,
            ..TextEntryData::default()
        };
        assert!(numeric.accepts('7'));
        assert!(!numeric.accepts('a'));

        let plain_ascii = TextEntryData {
            ascii_only: true,
            alpha_numerical: true,
            ..TextEntryData::default()
        };
        assert!(plain_ascii.accepts('Z'));
        assert!(!plain_ascii.accepts('é'));
        assert!(!plain_ascii.accepts('-'));
        assert!(!TextEntryData::default().accepts('\n'));
    }
}
