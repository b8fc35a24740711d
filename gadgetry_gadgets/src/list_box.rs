// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolling list box.
//!
//! A list box holds up to `length` rows of `columns` cells. Column widths are authored as
//! percentages of the list width and converted to pixels whenever the list is sized. The
//! selection is an index array: one entry in single-select mode, any number in multi-select.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use gadgetry_tree::{
    InputHandler, InputMsg, Key, KeyState, MsgResult, Notice, SystemHandler, SystemMsg, WindowId,
    WindowManager,
};
use kurbo::Point;
use peniko::Color;
use tracing::{trace, warn};

use crate::common::{set_label, take_focus, track_mouse};

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 16.0;

/// One cell of a row.
#[derive(Clone, Debug, PartialEq)]
pub struct ListCell {
    /// Text.
    pub text: String,
    /// Text color.
    pub color: Color,
}

impl ListCell {
    /// A cell with `text` in `color`.
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Payload of a list box.
#[derive(Clone, Debug, PartialEq)]
pub struct ListBoxData {
    /// Maximum number of rows.
    pub length: usize,
    /// Number of columns.
    pub columns: usize,
    /// Authored column widths in percent of the list width.
    pub column_width_pct: Vec<i32>,
    /// Column widths in pixels, derived from the percentages.
    pub column_widths: Vec<f64>,
    /// Rows of cells.
    pub rows: Vec<Vec<ListCell>>,
    /// Selected rows, in selection order.
    pub selections: Vec<usize>,
    /// Allow more than one selected row.
    pub multi_select: bool,
    /// Keep at least one row selected while the list is not empty.
    pub force_select: bool,
    /// Drop the oldest row when adding to a full list.
    pub auto_purge: bool,
    /// Scroll to every added row.
    pub auto_scroll: bool,
    /// Scroll to an added row only if the end was already visible.
    pub scroll_if_at_end: bool,
    /// Show a scroll bar.
    pub scroll_bar: bool,
    /// First visible row.
    pub display_top: usize,
    /// Row height in pixels.
    pub row_height: f64,
}

impl Default for ListBoxData {
    fn default() -> Self {
        Self {
            length: 0,
            columns: 1,
            column_width_pct: Vec::new(),
            column_widths: Vec::new(),
            rows: Vec::new(),
            selections: Vec::new(),
            multi_select: false,
            force_select: false,
            auto_purge: false,
            auto_scroll: false,
            scroll_if_at_end: false,
            scroll_bar: false,
            display_top: 0,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

impl ListBoxData {
    /// A single-column list holding up to `length` rows.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    fn visible_rows(&self, height: f64) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        #[expect(clippy::cast_possible_truncation, reason = "row counts are small and non-negative")]
        let rows = (height / self.row_height).max(0.0) as usize;
        rows.max(1)
    }

    fn max_top(&self, height: f64) -> usize {
        self.rows.len().saturating_sub(self.visible_rows(height))
    }

    fn drop_first_row(&mut self) {
        self.rows.remove(0);
        self.selections.retain(|&r| r != 0);
        for r in &mut self.selections {
            *r -= 1;
        }
        self.display_top = self.display_top.saturating_sub(1);
    }

    fn enforce_selection(&mut self) {
        if self.force_select && self.selections.is_empty() && !self.rows.is_empty() {
            self.selections.push(0);
        }
    }
}

fn data(wm: &WindowManager, window: WindowId) -> Option<&ListBoxData> {
    wm.user_data::<ListBoxData>(window)
}

fn height(wm: &WindowManager, window: WindowId) -> f64 {
    wm.size(window).map_or(0.0, |s| s.height)
}

/// Convert the percentage widths to pixels for the list's current width.
pub fn compute_column_widths(wm: &mut WindowManager, window: WindowId) {
    let Some(width) = wm.size(window).map(|s| s.width) else {
        return;
    };
    let Some(data) = wm.user_data_mut::<ListBoxData>(window) else {
        return;
    };
    let columns = data.columns.max(1);
    data.column_widths = if data.column_width_pct.len() >= columns {
        data.column_width_pct[..columns]
            .iter()
            .map(|&pct| width * f64::from(pct) / 100.0)
            .collect()
    } else {
        vec![width / columns as f64; columns]
    };
}

/// Append a row, returning its index.
///
/// A full list drops its oldest row when `auto_purge` is set, and refuses the row otherwise.
pub fn add_row(wm: &mut WindowManager, window: WindowId, cells: Vec<ListCell>) -> Option<usize> {
    let h = height(wm, window);
    let Some(data) = wm.user_data_mut::<ListBoxData>(window) else {
        warn!(?window, "add_row: not a list box");
        return None;
    };
    if data.length > 0 && data.rows.len() >= data.length {
        if !data.auto_purge {
            trace!(?window, "add_row: list is full");
            return None;
        }
        data.drop_first_row();
    }
    let at_end = data.display_top >= data.max_top(h);
    let mut cells = cells;
    cells.resize_with(data.columns.max(1), || ListCell::new("", Color::WHITE));
    data.rows.push(cells);
    if data.auto_scroll || (data.scroll_if_at_end && at_end) {
        data.display_top = data.max_top(h);
    }
    data.enforce_selection();
    Some(data.rows.len() - 1)
}

/// Append a single-column row.
pub fn add_entry(
    wm: &mut WindowManager,
    window: WindowId,
    text: &str,
    color: Color,
) -> Option<usize> {
    add_row(wm, window, vec![ListCell::new(text, color)])
}

/// Replace one cell. Returns `false` if the row or column does not exist.
pub fn set_cell(
    wm: &mut WindowManager,
    window: WindowId,
    row: usize,
    column: usize,
    cell: ListCell,
) -> bool {
    let Some(slot) = wm
        .user_data_mut::<ListBoxData>(window)
        .and_then(|d| d.rows.get_mut(row))
        .and_then(|r| r.get_mut(column))
    else {
        return false;
    };
    *slot = cell;
    true
}

/// Text of a cell.
pub fn cell_text(wm: &WindowManager, window: WindowId, row: usize, column: usize) -> Option<&str> {
    data(wm, window)?
        .rows
        .get(row)?
        .get(column)
        .map(|c| c.text.as_str())
}

/// Remove a row, shifting selections below it.
pub fn remove_row(wm: &mut WindowManager, window: WindowId, row: usize) -> bool {
    let Some(data) = wm.user_data_mut::<ListBoxData>(window) else {
        return false;
    };
    if row >= data.rows.len() {
        return false;
    }
    data.rows.remove(row);
    data.selections.retain(|&r| r != row);
    for r in &mut data.selections {
        if *r > row {
            *r -= 1;
        }
    }
    if data.display_top >= data.rows.len() {
        data.display_top = data.rows.len().saturating_sub(1);
    }
    data.enforce_selection();
    true
}

/// Remove every row and the selection.
pub fn reset(wm: &mut WindowManager, window: WindowId) {
    if let Some(data) = wm.user_data_mut::<ListBoxData>(window) {
        data.rows.clear();
        data.selections.clear();
        data.display_top = 0;
    }
}

/// Number of rows.
pub fn len(wm: &WindowManager, window: WindowId) -> usize {
    data(wm, window).map_or(0, |d| d.rows.len())
}

/// Selected rows.
pub fn selected(wm: &WindowManager, window: WindowId) -> &[usize] {
    data(wm, window).map_or(&[][..], |d| d.selections.as_slice())
}

/// Replace the selection without notifying. Out-of-range rows are dropped; single-select lists
/// keep only the first row.
pub fn set_selected(wm: &mut WindowManager, window: WindowId, rows: &[usize]) {
    let Some(data) = wm.user_data_mut::<ListBoxData>(window) else {
        return;
    };
    data.selections.clear();
    for &r in rows {
        if r < data.rows.len() && !data.selections.contains(&r) {
            data.selections.push(r);
            if !data.multi_select {
                break;
            }
        }
    }
    data.enforce_selection();
}

/// First visible row.
pub fn display_top(wm: &WindowManager, window: WindowId) -> usize {
    data(wm, window).map_or(0, |d| d.display_top)
}

/// Scroll so `row` is the first visible row, clamped to the content.
pub fn set_display_top(wm: &mut WindowManager, window: WindowId, row: usize) {
    let h = height(wm, window);
    if let Some(data) = wm.user_data_mut::<ListBoxData>(window) {
        data.display_top = row.min(data.max_top(h));
    }
}

/// Row under the screen point, if any.
pub fn row_at(wm: &WindowManager, window: WindowId, pos: Point) -> Option<usize> {
    let region = wm.screen_region(window)?;
    let data = data(wm, window)?;
    if data.row_height <= 0.0 || !region.contains(pos) {
        return None;
    }
    #[expect(clippy::cast_possible_truncation, reason = "inside the region, so small and non-negative")]
    let offset = ((pos.y - region.y0) / data.row_height) as usize;
    let row = data.display_top + offset;
    (row < data.rows.len()).then_some(row)
}

/// Stock system and input handler of list boxes.
#[derive(Copy, Clone, Debug, Default)]
pub struct ListBox;

impl ListBox {
    fn click(wm: &mut WindowManager, window: WindowId, pos: Point) -> MsgResult {
        let row = row_at(wm, window, pos);
        let Some(data) = wm.user_data_mut::<ListBoxData>(window) else {
            return MsgResult::Ignored;
        };
        match row {
            Some(row) if data.multi_select => {
                if let Some(i) = data.selections.iter().position(|&r| r == row) {
                    data.selections.remove(i);
                } else {
                    data.selections.push(row);
                }
            }
            Some(row) => {
                data.selections.clear();
                data.selections.push(row);
            }
            None if data.force_select || data.selections.is_empty() => return MsgResult::Handled,
            None => data.selections.clear(),
        }
        wm.notify_owner(window, Notice::ListSelected { from: window, row });
        MsgResult::Handled
    }

    fn key_move(wm: &mut WindowManager, window: WindowId, delta: isize) -> MsgResult {
        let h = height(wm, window);
        let Some(data) = wm.user_data_mut::<ListBoxData>(window) else {
            return MsgResult::Ignored;
        };
        if data.rows.is_empty() {
            return MsgResult::Handled;
        }
        let current = data.selections.last().copied().unwrap_or(0);
        let row = current
            .saturating_add_signed(delta)
            .min(data.rows.len() - 1);
        data.selections.clear();
        data.selections.push(row);
        let visible = data.visible_rows(h);
        if row < data.display_top {
            data.display_top = row;
        } else if row >= data.display_top + visible {
            data.display_top = row + 1 - visible;
        }
        wm.notify_owner(window, Notice::ListSelected { from: window, row: Some(row) });
        MsgResult::Handled
    }

    fn scroll(wm: &mut WindowManager, window: WindowId, down: bool) -> MsgResult {
        let top = display_top(wm, window);
        let next = if down { top + 1 } else { top.saturating_sub(1) };
        set_display_top(wm, window, next);
        MsgResult::Handled
    }
}

impl InputHandler for ListBox {
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
        match msg {
            InputMsg::MouseEntering(_) | InputMsg::MouseLeaving(_) => track_mouse(wm, window, msg),
            InputMsg::LeftDown(pos) => Self::click(wm, window, pos),
            InputMsg::LeftUp(_) => MsgResult::Handled,
            InputMsg::LeftDoubleClick(pos) => match row_at(wm, window, pos) {
                Some(row) => {
                    wm.notify_owner(window, Notice::ListDoubleClick { from: window, row });
                    MsgResult::Handled
                }
                None => MsgResult::Ignored,
            },
            InputMsg::RightDown(pos) => match row_at(wm, window, pos) {
                Some(row) => {
                    wm.notify_owner(window, Notice::ListRightClick { from: window, row });
                    MsgResult::Handled
                }
                None => MsgResult::Ignored,
            },
            InputMsg::WheelUp(_) => Self::scroll(wm, window, false),
            InputMsg::WheelDown(_) => Self::scroll(wm, window, true),
            InputMsg::Char { key, state } => {
                if !state.contains(KeyState::DOWN) {
                    return match key {
                        Key::Up | Key::Down | Key::Return | Key::Tab => MsgResult::Handled,
                        _ => MsgResult::Ignored,
                    };
                }
                match key {
                    Key::Up => Self::key_move(wm, window, -1),
                    Key::Down => Self::key_move(wm, window, 1),
                    Key::Return => match selected(wm, window).last().copied() {
                        Some(row) => {
                            wm.notify_owner(window, Notice::ListDoubleClick { from: window, row });
                            MsgResult::Handled
                        }
                        None => MsgResult::Ignored,
                    },
                    Key::Tab => {
                        if state.contains(KeyState::SHIFT) {
                            wm.prev_tab(window);
                        } else {
                            wm.next_tab(window);
                        }
                        MsgResult::Handled
                    }
                    _ => MsgResult::Ignored,
                }
            }
            _ => MsgResult::Ignored,
        }
    }
}

impl SystemHandler for ListBox {
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::ScriptCreate | SystemMsg::Resized(_) => {
                compute_column_widths(wm, window);
                MsgResult::Handled
            }
            SystemMsg::Destroy => MsgResult::Handled,
            SystemMsg::InputFocus { gained, accepted } => take_focus(wm, window, *gained, accepted),
            SystemMsg::SetLabel(_) => set_label(wm, window, msg),
            _ => MsgResult::Ignored,
        }
    }
}
