// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Progress bar.

use gadgetry_tree::{
    InputHandler, InputMsg, MsgResult, SystemHandler, SystemMsg, WindowId, WindowManager,
};

/// Payload of a progress bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressBarData {
    /// Completion in percent, `0..=100`.
    pub percent: u8,
}

/// Completion in percent.
pub fn progress(wm: &WindowManager, window: WindowId) -> Option<u8> {
    wm.user_data::<ProgressBarData>(window).map(|d| d.percent)
}

/// Set the completion, clamped to `0..=100`.
pub fn set_progress(wm: &mut WindowManager, window: WindowId, percent: i32) {
    if let Some(data) = wm.user_data_mut::<ProgressBarData>(window) {
        data.percent = u8::try_from(percent.clamp(0, 100)).unwrap_or(100);
    }
}

/// Stock system and input handler of progress bars.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProgressBar;

impl InputHandler for ProgressBar {
    fn input(&self, _wm: &mut WindowManager, _window: WindowId, _msg: InputMsg) -> MsgResult {
        MsgResult::Ignored
    }
}

impl SystemHandler for ProgressBar {
    fn system(&self, _wm: &mut WindowManager, _window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::Destroy => MsgResult::Handled,
            _ => MsgResult::Ignored,
        }
    }
}
