// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal and vertical sliders.
//!
//! The thumb is a square as thick as the slider. `ticks` is the number of pixels the thumb moves
//! per value step; it is recomputed whenever the slider or its range changes size. Vertical
//! sliders put the maximum at the top.

use gadgetry_tree::{
    InputHandler, InputMsg, Key, KeyState, MsgResult, Notice, SystemHandler, SystemMsg, WindowId,
    WindowManager, WindowStyle,
};
use kurbo::{Point, Rect, Size};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::common::{set_label, style, take_focus, track_mouse};

/// Payload of a slider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SliderData {
    /// Smallest value.
    pub min_val: i32,
    /// Largest value.
    pub max_val: i32,
    /// Current value.
    pub position: i32,
    /// Pixels of thumb travel per value step.
    pub ticks: f64,
    /// The thumb is being dragged.
    pub dragging: bool,
}

impl SliderData {
    /// A slider over `min_val..=max_val` starting at `min_val`.
    pub fn new(min_val: i32, max_val: i32) -> Self {
        Self {
            min_val,
            max_val,
            position: min_val,
            ..Self::default()
        }
    }

    fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min_val, self.max_val.max(self.min_val))
    }

    /// Number of value steps, computed in `f64` so full-range sliders do not overflow.
    fn span(&self) -> f64 {
        (f64::from(self.max_val) - f64::from(self.min_val)).max(0.0)
    }
}

fn is_vertical(wm: &WindowManager, window: WindowId) -> bool {
    style(wm, window).contains(WindowStyle::VERT_SLIDER)
}

fn thumb_extent(size: Size) -> f64 {
    size.width.min(size.height)
}

/// Recompute pixels-per-step from the current size and range.
pub fn compute_ticks(wm: &mut WindowManager, window: WindowId) {
    let Some(size) = wm.size(window) else {
        return;
    };
    let vertical = is_vertical(wm, window);
    let Some(data) = wm.user_data_mut::<SliderData>(window) else {
        return;
    };
    let length = if vertical { size.height } else { size.width };
    let travel = (length - thumb_extent(size)).max(0.0);
    data.ticks = if data.span() > 0.0 {
        travel / data.span()
    } else {
        0.0
    };
}

/// Current value.
pub fn get_value(wm: &WindowManager, window: WindowId) -> Option<i32> {
    wm.user_data::<SliderData>(window).map(|d| d.position)
}

/// Set the value, clamped to the range, without notifying.
pub fn set_value(wm: &mut WindowManager, window: WindowId, value: i32) {
    if let Some(data) = wm.user_data_mut::<SliderData>(window) {
        data.position = data.clamp(value);
    }
}

/// Change the range; the value is clamped into it.
pub fn set_range(wm: &mut WindowManager, window: WindowId, min_val: i32, max_val: i32) {
    if let Some(data) = wm.user_data_mut::<SliderData>(window) {
        data.min_val = min_val;
        data.max_val = max_val;
        data.position = data.clamp(data.position);
    }
    compute_ticks(wm, window);
}

/// Screen rectangle of the thumb.
pub fn thumb_rect(wm: &WindowManager, window: WindowId) -> Option<Rect> {
    let region = wm.screen_region(window)?;
    let data = wm.user_data::<SliderData>(window)?;
    let thumb = thumb_extent(region.size());
    let offset = (f64::from(data.position) - f64::from(data.min_val)) * data.ticks;
    let origin = if is_vertical(wm, window) {
        Point::new(region.x0, region.y1 - thumb - offset)
    } else {
        Point::new(region.x0 + offset, region.y0)
    };
    Some(Rect::from_origin_size(origin, Size::new(thumb, thumb)))
}

fn value_at(wm: &WindowManager, window: WindowId, pos: Point) -> Option<i32> {
    let region = wm.screen_region(window)?;
    let data = wm.user_data::<SliderData>(window)?;
    if data.ticks <= 0.0 {
        return Some(data.min_val);
    }
    let half = thumb_extent(region.size()) / 2.0;
    let travelled = if is_vertical(wm, window) {
        region.y1 - half - pos.y
    } else {
        pos.x - region.x0 - half
    };
    let value = f64::from(data.min_val) + (travelled / data.ticks).round();
    let max = data.max_val.max(data.min_val);
    #[expect(clippy::cast_possible_truncation, reason = "clamped to the i32 range first")]
    let value = value.clamp(f64::from(data.min_val), f64::from(max)) as i32;
    Some(value)
}

/// Stock system and input handler of sliders.
#[derive(Copy, Clone, Debug, Default)]
pub struct Slider;

impl Slider {
    fn move_to(wm: &mut WindowManager, window: WindowId, value: i32) {
        let Some(data) = wm.user_data_mut::<SliderData>(window) else {
            return;
        };
        let value = data.clamp(value);
        if value == data.position {
            return;
        }
        data.position = value;
        wm.notify_owner(window, Notice::SliderTrack { from: window, value });
    }

    fn step(wm: &mut WindowManager, window: WindowId, delta: i32) -> MsgResult {
        if let Some(value) = get_value(wm, window) {
            Self::move_to(wm, window, value.saturating_add(delta));
        }
        MsgResult::Handled
    }
}

impl InputHandler for Slider {
    fn input(&self, wm: &mut WindowManager, window: WindowId, msg: InputMsg) -> MsgResult {
        match msg {
            InputMsg::MouseEntering(_) | InputMsg::MouseLeaving(_) => track_mouse(wm, window, msg),
            InputMsg::LeftDown(pos) => {
                if let Some(data) = wm.user_data_mut::<SliderData>(window) {
                    data.dragging = true;
                }
                wm.set_capture(Some(window));
                if let Some(value) = value_at(wm, window, pos) {
                    Self::move_to(wm, window, value);
                }
                MsgResult::Handled
            }
            InputMsg::LeftDrag(pos) => {
                let dragging = wm
                    .user_data::<SliderData>(window)
                    .is_some_and(|d| d.dragging);
                if !dragging {
                    return MsgResult::Ignored;
                }
                if let Some(value) = value_at(wm, window, pos) {
                    Self::move_to(wm, window, value);
                }
                MsgResult::Handled
            }
            InputMsg::LeftUp(_) => {
                let Some(data) = wm.user_data_mut::<SliderData>(window) else {
                    return MsgResult::Ignored;
                };
                if !data.dragging {
                    return MsgResult::Ignored;
                }
                data.dragging = false;
                let value = data.position;
                if wm.capture() == Some(window) {
                    wm.set_capture(None);
                }
                wm.notify_owner(window, Notice::SliderDone { from: window, value });
                MsgResult::Handled
            }
            InputMsg::WheelUp(_) => Self::step(wm, window, 1),
            InputMsg::WheelDown(_) => Self::step(wm, window, -1),
            InputMsg::Char { key, state } => {
                let delta = match key {
                    Key::Right | Key::Up => 1,
                    Key::Left | Key::Down => -1,
                    Key::Tab => {
                        if state.contains(KeyState::DOWN) {
                            if state.contains(KeyState::SHIFT) {
                                wm.prev_tab(window);
                            } else {
                                wm.next_tab(window);
                            }
                        }
                        return MsgResult::Handled;
                    }
                    _ => return MsgResult::Ignored,
                };
                if state.contains(KeyState::DOWN) {
                    Self::step(wm, window, delta)
                } else {
                    MsgResult::Handled
                }
            }
            _ => MsgResult::Ignored,
        }
    }
}

impl SystemHandler for Slider {
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::ScriptCreate | SystemMsg::Resized(_) => {
                compute_ticks(wm, window);
                MsgResult::Handled
            }
            SystemMsg::Destroy => MsgResult::Handled,
            SystemMsg::InputFocus { gained, accepted } => take_focus(wm, window, *gained, accepted),
            SystemMsg::SetLabel(_) => set_label(wm, window, msg),
            _ => MsgResult::Ignored,
        }
    }
}
