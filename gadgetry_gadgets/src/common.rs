// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers shared by every gadget kind.

use gadgetry_tree::{
    InputMsg, Key, KeyState, MsgResult, Notice, SystemMsg, WindowId, WindowManager, WindowState,
    WindowStatus, WindowStyle,
};

/// The widget kind of a window, decoded from its [`WindowStyle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GadgetKind {
    /// Push button.
    PushButton,
    /// Check box.
    CheckBox,
    /// Radio button.
    RadioButton,
    /// Horizontal slider.
    HorzSlider,
    /// Vertical slider.
    VertSlider,
    /// Scrolling list box.
    ListBox,
    /// Combo box.
    ComboBox,
    /// Tab control.
    TabControl,
    /// Single-line text entry.
    TextEntry,
    /// Static text label.
    StaticText,
    /// Progress bar.
    ProgressBar,
}

impl GadgetKind {
    /// Decode the kind from style bits. Returns `None` for plain user windows.
    pub fn from_style(style: WindowStyle) -> Option<Self> {
        const TABLE: [(WindowStyle, GadgetKind); 11] = [
            (WindowStyle::PUSH_BUTTON, GadgetKind::PushButton),
            (WindowStyle::CHECK_BOX, GadgetKind::CheckBox),
            (WindowStyle::RADIO_BUTTON, GadgetKind::RadioButton),
            (WindowStyle::HORZ_SLIDER, GadgetKind::HorzSlider),
            (WindowStyle::VERT_SLIDER, GadgetKind::VertSlider),
            (WindowStyle::SCROLL_LISTBOX, GadgetKind::ListBox),
            (WindowStyle::COMBO_BOX, GadgetKind::ComboBox),
            (WindowStyle::TAB_CONTROL, GadgetKind::TabControl),
            (WindowStyle::ENTRY_FIELD, GadgetKind::TextEntry),
            (WindowStyle::STATIC_TEXT, GadgetKind::StaticText),
            (WindowStyle::PROGRESS_BAR, GadgetKind::ProgressBar),
        ];
        TABLE
            .iter()
            .find(|(bit, _)| style.contains(*bit))
            .map(|&(_, kind)| kind)
    }

    /// Style bit identifying this kind.
    pub fn style(self) -> WindowStyle {
        match self {
            Self::PushButton => WindowStyle::PUSH_BUTTON,
            Self::CheckBox => WindowStyle::CHECK_BOX,
            Self::RadioButton => WindowStyle::RADIO_BUTTON,
            Self::HorzSlider => WindowStyle::HORZ_SLIDER,
            Self::VertSlider => WindowStyle::VERT_SLIDER,
            Self::ListBox => WindowStyle::SCROLL_LISTBOX,
            Self::ComboBox => WindowStyle::COMBO_BOX,
            Self::TabControl => WindowStyle::TAB_CONTROL,
            Self::TextEntry => WindowStyle::ENTRY_FIELD,
            Self::StaticText => WindowStyle::STATIC_TEXT,
            Self::ProgressBar => WindowStyle::PROGRESS_BAR,
        }
    }
}

/// Gadget sub-bits of `window`, empty for stale windows.
pub fn state(wm: &WindowManager, window: WindowId) -> WindowState {
    wm.window(window).map(|n| n.state()).unwrap_or_default()
}

/// Set or clear gadget sub-bits.
pub fn set_state(wm: &mut WindowManager, window: WindowId, bits: WindowState, on: bool) {
    if let Some(node) = wm.window_mut(window) {
        node.state_mut().set(bits, on);
    }
}

/// Flip gadget sub-bits.
pub fn toggle_state(wm: &mut WindowManager, window: WindowId, bits: WindowState) {
    if let Some(node) = wm.window_mut(window) {
        node.state_mut().toggle(bits);
    }
}

pub(crate) fn status(wm: &WindowManager, window: WindowId) -> WindowStatus {
    wm.status(window).unwrap_or_default()
}

pub(crate) fn style(wm: &WindowManager, window: WindowId) -> WindowStyle {
    wm.window(window).map(|n| n.style()).unwrap_or_default()
}

/// Mirror focus into the HILITED bit, tell the owner, and accept the focus offer.
///
/// This is the common answer of focusable gadgets to [`SystemMsg::InputFocus`].
pub(crate) fn take_focus(
    wm: &mut WindowManager,
    window: WindowId,
    gained: bool,
    accepted: &mut bool,
) -> MsgResult {
    set_state(wm, window, WindowState::HILITED, gained);
    wm.notify_owner(window, Notice::FocusChange { from: window, gained });
    *accepted = true;
    MsgResult::Handled
}

/// Handle enter/leave for `MOUSE_TRACK` gadgets: mirror hover into HILITED and bubble.
pub(crate) fn track_mouse(wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
    if !style(wm, window).contains(WindowStyle::MOUSE_TRACK) {
        return MsgResult::Ignored;
    }
    match msg {
        InputMsg::MouseEntering(_) => {
            set_state(wm, window, WindowState::HILITED, true);
            wm.notify_owner(window, Notice::MouseEntering { from: window });
            MsgResult::Handled
        }
        InputMsg::MouseLeaving(_) => {
            set_state(wm, window, WindowState::HILITED, false);
            wm.notify_owner(window, Notice::MouseLeaving { from: window });
            MsgResult::Handled
        }
        _ => MsgResult::Ignored,
    }
}

/// Whether `window` holds keyboard focus. Button-like gadgets only act on keys while it does.
pub(crate) fn has_focus(wm: &WindowManager, window: WindowId) -> bool {
    wm.focus() == Some(window)
}

/// Keyboard navigation shared by button-like gadgets.
///
/// Tab, Right and Down advance the tab order; Up and Left go back. Returns `None` for keys
/// that are not navigation keys.
pub(crate) fn navigate(
    wm: &mut WindowManager,
    window: WindowId,
    key: Key,
    state: KeyState,
) -> Option<MsgResult> {
    let forward = match key {
        Key::Tab => !state.contains(KeyState::SHIFT),
        Key::Right | Key::Down => true,
        Key::Up | Key::Left => false,
        _ => return None,
    };
    if state.contains(KeyState::DOWN) {
        if forward {
            wm.next_tab(window);
        } else {
            wm.prev_tab(window);
        }
    }
    Some(MsgResult::Handled)
}

/// Store `text` as the label for [`SystemMsg::SetLabel`].
pub(crate) fn set_label(wm: &mut WindowManager, window: WindowId, msg: &SystemMsg) -> MsgResult {
    if let SystemMsg::SetLabel(text) = msg
        && let Some(node) = wm.window_mut(window)
    {
        node.instance_mut().text.clone_from(text);
        return MsgResult::Handled;
    }
    MsgResult::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_style() {
        for kind in [
            GadgetKind::PushButton,
            GadgetKind::CheckBox,
            GadgetKind::RadioButton,
            GadgetKind::HorzSlider,
            GadgetKind::VertSlider,
            GadgetKind::ListBox,
            GadgetKind::ComboBox,
            GadgetKind::TabControl,
            GadgetKind::TextEntry,
            GadgetKind::StaticText,
            GadgetKind::ProgressBar,
        ] {
            assert_eq!(GadgetKind::from_style(kind.style()), Some(kind));
        }
        assert_eq!(GadgetKind::from_style(WindowStyle::USER), None);
        assert_eq!(
            GadgetKind::from_style(WindowStyle::CHECK_BOX | WindowStyle::MOUSE_TRACK),
            Some(GadgetKind::CheckBox)
        );
    }
}
