// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static text label. It never takes input, so clicks fall through to the parent.

use gadgetry_tree::{
    InputHandler, InputMsg, MsgResult, SystemHandler, SystemMsg, WindowId, WindowManager,
};

use crate::common::set_label;

/// Payload of a static text label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticTextData {
    /// Center the text in the window.
    pub centered: bool,
}

/// Whether the label is centered.
pub fn is_centered(wm: &WindowManager, window: WindowId) -> bool {
    wm.user_data::<StaticTextData>(window)
        .is_some_and(|d| d.centered)
}

/// Stock system and input handler of static text.
#[derive(Copy, Clone, Debug, Default)]
pub struct StaticText;

impl InputHandler for StaticText {
    fn input(&self, _wm: &mut WindowManager, _window: WindowId, _msg: InputMsg) -> MsgResult {
        MsgResult::Ignored
    }
}

impl SystemHandler for StaticText {
    fn system(&self, wm: &mut WindowManager, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        match msg {
            SystemMsg::Create | SystemMsg::Destroy => MsgResult::Handled,
            SystemMsg::SetLabel(_) => set_label(wm, window, msg),
            _ => MsgResult::Ignored,
        }
    }
}
