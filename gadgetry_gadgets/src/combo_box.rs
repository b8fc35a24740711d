// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Combo box: a label plus a drop-down list of entries.
//!
//! While the list is dropped the combo box holds pointer capture, so a click anywhere closes it;
//! a click on an entry also selects it.

use alloc::string::String;
use alloc::vec::Vec;

use gadgetry_tree::{
    InputHandler, InputMsg, Key, KeyState, MsgResult, Notice, SystemHandler, SystemMsg, WindowId,
    WindowManager,
};
use kurbo::{Point, Rect, Size};
use tracing::trace;

use crate::common::{set_label, take_focus, track_mouse};
use crate::list_box::DEFAULT_ROW_HEIGHT;

/// Payload of a combo box.
#[derive(Clone, Debug, PartialEq)]
pub struct ComboBoxData {
    /// Entries of the drop-down list.
    pub entries: Vec<String>,
    /// Selected entry.
    pub selected: Option<usize>,
    /// The list is open.
    pub dropped: bool,
    /// The label can be typed into.
    pub editable: bool,
    /// Maximum label length when editable, `0` for unlimited.
    pub max_chars: usize,
    /// Rows shown when dropped.
    pub max_display: usize,
    /// Accept only ASCII when typing.
    pub ascii_only: bool,
    /// Accept only letters and digits when typing.
    pub letters_and_numbers: bool,
    /// Height of a drop-down row.
    pub row_height: f64,
}

impl Default for ComboBoxData {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            selected: None,
            dropped: false,
            editable: false,
            max_chars: 0,
            max_display: 5,
            ascii_only: false,
            letters_and_numbers: false,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

fn data(wm: &WindowManager, window: WindowId) -> Option<&ComboBoxData> {
    wm.user_data::<ComboBoxData>(window)
}

/// Append an entry, returning its index.
pub fn add_entry(wm: &mut WindowManager, window: WindowId, text: &str) -> Option<usize> {
    let data = wm.user_data_mut::<ComboBoxData>(window)?;
    data.entries.push(text.into());
    Some(data.entries.len() - 1)
}

/// Remove every entry and the selection.
pub fn reset(wm: &mut WindowManager, window: WindowId) {
    if let Some(data) = wm.user_data_mut::<ComboBoxData>(window) {
        data.entries.clear();
        data.selected = None;
    }
}

/// Entries.
pub fn entries(wm: &WindowManager, window: WindowId) -> &[String] {
    data(wm, window).map_or(&[][..], |d| d.entries.as_slice())
}

/// Selected entry.
pub fn selected(wm: &WindowManager, window: WindowId) -> Option<usize> {
    data(wm, window)?.selected
}

/// Select an entry and copy it into the label, without notifying.
pub fn set_selected(wm: &mut WindowManager, window: WindowId, index: Option<usize>) {
    let Some(data) = wm.user_data_mut::<ComboBoxData>(window) else {
        return;
    };
    let index = index.filter(|&i| i < data.entries.len());
    data.selected = index;
    let label = index.map(|i| data.entries[i].clone()).unwrap_or_default();
    if let Some(node) = wm.window_mut(window) {
        node.instance_mut().text = label;
    }
}

/// Whether the list is open.
pub fn is_dropped(wm: &WindowManager, window: WindowId) -> bool {
    data(wm, window).is_some_and(|d| d.dropped)
}

/// Screen rectangle of the open list, directly below the combo box.
pub fn drop_rect(wm: &WindowManager, window: WindowId) -> Option<Rect> {
    let region = wm.screen_region(window)?;
    let data = data(wm, window)?;
    let rows = data.entries.len().min(data.max_display.max(1));
    Some(Rect::from_origin_size(
        Point::new(region.x0, region.y1),
        Size::new(region.width(), rows as f64 * data.row_height),
    ))
}

fn entry_at(wm: &WindowManager, window: WindowId, pos: Point) -> Option<usize> {
    let rect = drop_rect(wm, window)?;
    let data = data(wm, window)?;
    if !rect.contains(pos) || data.row_height <= 0.0 {
        return None;
    }
    #[expect(clippy::cast_possible_truncation, reason = "inside the list, so small and non-negative")]
    let row = ((pos.y - rect.y0) / data.row_height) as usize;
    (row < data.entries.len()).then_some(row)
}

/// Open the list and take pointer capture.
pub fn open(wm: &mut WindowManager, window: WindowId) {
    if let Some(data) = wm.user_data_mut::<ComboBoxData>(window) {
        data.dropped = true;
        wm.set_capture(Some(window));
    }
}

/// Close the list and release pointer capture.
pub fn close(wm: &mut WindowManager, window: WindowId) {
    if let Some(data) = wm.user_data_mut::<ComboBoxData>(window) {
        data.dropped = false;
        if wm.capture() == Some(window) {
            wm.set_capture(None);
        }
    }
}

/// Stock system and input handler of combo boxes.
#[derive(Copy, Clone, Debug, Default)]
pub struct ComboBox;

impl ComboBox {
    fn choose(wm: &mut WindowManager, window: WindowId, index: Option<usize>) {
        if selected(wm, window) == index {
            return;
        }
        set_selected(wm, window, index);
        wm.notify_owner(window, Notice::ComboSelected { from: window, index });
    }

    fn step(wm: &mut WindowManager, window: WindowId, forward: bool) -> MsgResult {
        let count = entries(wm, window).len();
        if count == 0 {
            return MsgResult::Handled;
        }
        let next = match (selected(wm, window), forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(count - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        Self::choose(wm, window, Some(next));
        MsgResult::Handled
    }

    fn type_char(wm: &mut WindowManager, window: WindowId, c: char) -> MsgResult {
        let Some(data) = data(wm, window) else {
            return MsgResult::Ignored;
        };
        if !data.editable
            || (data.ascii_only && !c.is_ascii())
            || (data.letters_and_numbers && !c.is_alphanumeric())
        {
            return MsgResult::Ignored;
        }
        let max = data.max_chars;
        let Some(node) = wm.window_mut(window) else {
            return MsgResult::Ignored;
        };
        let text = &mut node.instance_mut().text;
        if max > 0 && text.chars().count() >= max {
            trace!(?window, "combo box label is full");
            return MsgResult::Handled;
        }
        text.push(c);
        wm.notify_owner(window, Notice::UpdateText { from: window });
        MsgResult::Handled
    }
}

impl InputHandler for ComboBox {
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
        match msg {
            InputMsg::MouseEntering(_) | InputMsg::MouseLeaving(_) => track_mouse(wm, window, msg),
            InputMsg::LeftDown(pos) => {
                if is_dropped(wm, window) {
                    if let Some(index) = entry_at(wm, window, pos) {
                        Self::choose(wm, window, Some(index));
                    }
                    close(wm, window);
                } else {
                    open(wm, window);
                }
                MsgResult::Handled
            }
            InputMsg::LeftUp(_) => MsgResult::Handled,
            InputMsg::WheelUp(_) => Self::step(wm, window, false),
            InputMsg::WheelDown(_) => Self::step(wm, window, true),
            InputMsg::Char { key, state } => {
                if !state.contains(KeyState::DOWN) {
                    return MsgResult::Handled;
                }
                match key {
                    Key::Up => Self::step(wm, window, false),
                    Key::Down => Self::step(wm, window, true),
                    Key::Return | Key::Escape => {
                        close(wm, window);
                        MsgResult::Handled
                    }
                    Key::Backspace => {
                        let editable = data(wm, window).is_some_and(|d| d.editable);
                        if let Some(node) = wm.window_mut(window)
                            && editable
                        {
                            node.instance_mut().text.pop();
                            wm.notify_owner(window, Notice::UpdateText { from: window });
                        }
                        MsgResult::Handled
                    }
                    Key::Tab => {
                        close(wm, window);
                        if state.contains(KeyState::SHIFT) {
                            wm.prev_tab(window);
                        } else {
                            wm.next_tab(window);
                        }
                        MsgResult::Handled
                    }
                    Key::Char(c) => Self::type_char(wm, window, c),
                    _ => MsgResult::Ignored,
                }
            }
            _ => MsgResult::Ignored,
        }
    }
}

impl SystemHandler for ComboBox {
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::Destroy => MsgResult::Handled,
            SystemMsg::InputFocus { gained, accepted } => {
                if !*gained {
                    close(wm, window);
                }
                take_focus(wm, window, *gained, accepted)
            }
            SystemMsg::SetLabel(_) => set_label(wm, window, msg),
            _ => MsgResult::Ignored,
        }
    }
}
