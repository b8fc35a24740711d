// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab control.
//!
//! A strip of up to [`MAX_TAB_PANES`] tabs placed along one edge of the control, and one child
//! pane window per tab below (or beside) the strip. Only the active pane is shown.
//!
//! Tab geometry is computed from the control's size:
//!
//! - On the top and bottom edges tabs run left to right, each `tab_width` wide.
//! - On the left and right edges tabs run top to bottom, each `tab_height` high.
//! - The orientation places the strip at the start, center or end of its edge.
//! - The pane area is the rest of the control, inset by `pane_border`.

use gadgetry_tree::{
    InputHandler, InputMsg, InstanceData, Key, KeyState, MsgResult, Notice, SystemHandler,
    SystemMsg, WindowId, WindowManager, WindowStatus, WindowStyle,
};
use kurbo::{Point, Rect, Size};
use tracing::{debug, warn};

use crate::common::{status, style, take_focus, track_mouse};

/// Maximum number of tabs.
pub const MAX_TAB_PANES: usize = 8;

/// Edge of the control carrying the tab strip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TabEdge {
    /// Along the top.
    #[default]
    Top,
    /// Along the right side.
    Right,
    /// Along the bottom.
    Bottom,
    /// Along the left side.
    Left,
}

/// Placement of the strip along its edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TabOrientation {
    /// At the top or left end.
    #[default]
    TopLeft,
    /// Centered.
    Center,
    /// At the bottom or right end.
    BottomRight,
}

/// Payload of a tab control.
#[derive(Clone, Debug, PartialEq)]
pub struct TabControlData {
    /// Number of tabs, at most [`MAX_TAB_PANES`].
    pub tab_count: usize,
    /// Width of one tab.
    pub tab_width: f64,
    /// Height of one tab.
    pub tab_height: f64,
    /// Edge carrying the strip.
    pub tab_edge: TabEdge,
    /// Placement along the edge.
    pub tab_orientation: TabOrientation,
    /// Inset of the strip and the panes from the control's border.
    pub pane_border: f64,
    /// Tabs that cannot be selected.
    pub disabled: [bool; MAX_TAB_PANES],
    /// Active tab.
    pub active_tab: usize,
    /// Pane window of each tab.
    pub panes: [Option<WindowId>; MAX_TAB_PANES],
    /// Tab strip, relative to the control.
    pub strip: Rect,
    /// Pane area, relative to the control.
    pub pane_rect: Rect,
}

impl Default for TabControlData {
    fn default() -> Self {
        Self {
            tab_count: 1,
            tab_width: 60.0,
            tab_height: 20.0,
            tab_edge: TabEdge::Top,
            tab_orientation: TabOrientation::TopLeft,
            pane_border: 0.0,
            disabled: [false; MAX_TAB_PANES],
            active_tab: 0,
            panes: [None; MAX_TAB_PANES],
            strip: Rect::ZERO,
            pane_rect: Rect::ZERO,
        }
    }
}

impl TabControlData {
    fn count(&self) -> usize {
        self.tab_count.min(MAX_TAB_PANES)
    }

    fn horizontal(&self) -> bool {
        matches!(self.tab_edge, TabEdge::Top | TabEdge::Bottom)
    }

    /// Recompute the strip and pane area for a control of `size`.
    pub fn compute_regions(&mut self, size: Size) {
        let count = self.count() as f64;
        let border = self.pane_border;
        let (along, across_len) = if self.horizontal() {
            (size.width, self.tab_height)
        } else {
            (size.height, self.tab_width)
        };
        let strip_len = if self.horizontal() {
            self.tab_width * count
        } else {
            self.tab_height * count
        };
        let start = match self.tab_orientation {
            TabOrientation::TopLeft => border,
            TabOrientation::Center => (along - strip_len) / 2.0,
            TabOrientation::BottomRight => along - strip_len - border,
        };
        let (origin, strip_size) = match self.tab_edge {
            TabEdge::Top => (Point::new(start, border), Size::new(strip_len, across_len)),
            TabEdge::Bottom => (
                Point::new(start, size.height - across_len - border),
                Size::new(strip_len, across_len),
            ),
            TabEdge::Left => (Point::new(border, start), Size::new(across_len, strip_len)),
            TabEdge::Right => (
                Point::new(size.width - across_len - border, start),
                Size::new(across_len, strip_len),
            ),
        };
        self.strip = Rect::from_origin_size(origin, strip_size);

        let full = Rect::from_origin_size(Point::ZERO, size);
        let rest = match self.tab_edge {
            TabEdge::Top => Rect::new(full.x0, self.strip.y1, full.x1, full.y1),
            TabEdge::Bottom => Rect::new(full.x0, full.y0, full.x1, self.strip.y0),
            TabEdge::Left => Rect::new(self.strip.x1, full.y0, full.x1, full.y1),
            TabEdge::Right => Rect::new(full.x0, full.y0, self.strip.x0, full.y1),
        };
        self.pane_rect = rest.inset(-border).abs();
    }

    /// Rectangle of tab `index`, relative to the control.
    pub fn tab_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.count() {
            return None;
        }
        let i = index as f64;
        let size = Size::new(self.tab_width, self.tab_height);
        let origin = if self.horizontal() {
            Point::new(self.strip.x0 + i * self.tab_width, self.strip.y0)
        } else {
            Point::new(self.strip.x0, self.strip.y0 + i * self.tab_height)
        };
        Some(Rect::from_origin_size(origin, size))
    }

    /// Tab under a control-relative point.
    pub fn tab_at(&self, local: Point) -> Option<usize> {
        (0..self.count()).find(|&i| self.tab_rect(i).is_some_and(|r| r.contains(local)))
    }
}

fn data(wm: &WindowManager, window: WindowId) -> Option<&TabControlData> {
    wm.user_data::<TabControlData>(window)
}

/// Recompute the strip and pane area and fit the panes to it.
pub fn layout(wm: &mut WindowManager, window: WindowId) {
    let Some(size) = wm.size(window) else {
        return;
    };
    let Some(data) = wm.user_data_mut::<TabControlData>(window) else {
        return;
    };
    data.compute_regions(size);
    let pane_rect = data.pane_rect;
    let panes = data.panes;
    for pane in panes.into_iter().flatten() {
        wm.set_position(pane, pane_rect.origin());
        wm.set_size(pane, pane_rect.size());
    }
}

/// Give every tab a pane window.
///
/// Existing `TAB_PANE` children are adopted first, in creation order; missing panes are
/// created. Then only the active pane is shown.
pub fn ensure_panes(wm: &mut WindowManager, window: WindowId) {
    let Some(data) = data(wm, window) else {
        warn!(?window, "ensure_panes: not a tab control");
        return;
    };
    let count = data.count();
    let mut panes = data.panes;
    let pane_rect = data.pane_rect;

    // Children are front to back; the oldest is last.
    let mut adoptable: alloc::vec::Vec<WindowId> = wm
        .children(window)
        .filter(|&c| style(wm, c).contains(WindowStyle::TAB_PANE) && !panes.contains(&Some(c)))
        .collect();
    adoptable.reverse();
    let mut adoptable = adoptable.into_iter();

    for slot in panes.iter_mut().take(count) {
        if slot.is_some_and(|p| wm.is_alive(p)) {
            continue;
        }
        *slot = adoptable.next().or_else(|| {
            let inst = InstanceData {
                style: WindowStyle::TAB_PANE,
                ..InstanceData::default()
            };
            wm.create(
                Some(window),
                WindowStatus::ENABLED | WindowStatus::NO_INPUT,
                pane_rect.origin(),
                pane_rect.size(),
                None,
                Some(inst),
            )
        });
    }
    if let Some(data) = wm.user_data_mut::<TabControlData>(window) {
        data.panes = panes;
    }
    debug!(?window, count, "tab panes ready");
    show_active(wm, window);
}

fn show_active(wm: &mut WindowManager, window: WindowId) {
    let Some(data) = data(wm, window) else {
        return;
    };
    let active = data.active_tab;
    let panes = data.panes;
    for (i, pane) in panes.into_iter().enumerate() {
        if let Some(p) = pane {
            wm.hide(p, i != active);
        }
    }
}

/// Active tab.
pub fn active_tab(wm: &WindowManager, window: WindowId) -> Option<usize> {
    data(wm, window).map(|d| d.active_tab)
}

/// Pane window of tab `index`.
pub fn pane(wm: &WindowManager, window: WindowId, index: usize) -> Option<WindowId> {
    data(wm, window)?.panes.get(index).copied().flatten()
}

/// Switch to tab `index` without notifying. Disabled and out-of-range tabs are refused.
pub fn set_active_tab(wm: &mut WindowManager, window: WindowId, index: usize) -> bool {
    let Some(data) = wm.user_data_mut::<TabControlData>(window) else {
        return false;
    };
    if index >= data.count() || data.disabled[index] {
        return false;
    }
    data.active_tab = index;
    show_active(wm, window);
    true
}

/// Enable or disable tab `index`.
pub fn enable_tab(wm: &mut WindowManager, window: WindowId, index: usize, enable: bool) {
    if let Some(data) = wm.user_data_mut::<TabControlData>(window)
        && index < MAX_TAB_PANES
    {
        data.disabled[index] = !enable;
    }
}

/// Stock system and input handler of tab controls.
#[derive(Copy, Clone, Debug, Default)]
pub struct TabControl;

impl TabControl {
    fn select(wm: &mut WindowManager, window: WindowId, index: usize) -> MsgResult {
        if active_tab(wm, window) == Some(index) {
            return MsgResult::Handled;
        }
        if set_active_tab(wm, window, index) {
            wm.notify_owner(window, Notice::TabSelected { from: window, tab: index });
        }
        MsgResult::Handled
    }
}

impl InputHandler for TabControl {
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
        match msg {
            InputMsg::MouseEntering(_) | InputMsg::MouseLeaving(_) => track_mouse(wm, window, msg),
            InputMsg::LeftDown(pos) => {
                let Some(origin) = wm.screen_position(window) else {
                    return MsgResult::Ignored;
                };
                let local = Point::new(pos.x - origin.x, pos.y - origin.y);
                match data(wm, window).and_then(|d| d.tab_at(local)) {
                    Some(index) => Self::select(wm, window, index),
                    None => MsgResult::Ignored,
                }
            }
            InputMsg::Char { key, state } => {
                let Some(active) = active_tab(wm, window) else {
                    return MsgResult::Ignored;
                };
                let count = data(wm, window).map_or(0, TabControlData::count);
                if !state.contains(KeyState::DOWN) {
                    return MsgResult::Ignored;
                }
                match key {
                    Key::Right | Key::Down if active + 1 < count => {
                        Self::select(wm, window, active + 1)
                    }
                    Key::Left | Key::Up if active > 0 => Self::select(wm, window, active - 1),
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

impl SystemHandler for TabControl {
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::Destroy => MsgResult::Handled,
            SystemMsg::ScriptCreate => {
                layout(wm, window);
                ensure_panes(wm, window);
                MsgResult::Handled
            }
            SystemMsg::Resized(_) => {
                layout(wm, window);
                MsgResult::Handled
            }
            SystemMsg::InputFocus { gained, accepted } => {
                if status(wm, window).contains(WindowStatus::TAB_STOP) {
                    take_focus(wm, window, *gained, accepted)
                } else {
                    MsgResult::Ignored
                }
            }
            _ => MsgResult::Ignored,
        }
    }
}
