// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gadgetry_gadgets --heading-base-level=0

//! Gadgetry Gadgets: stock widget behaviors for the Gadgetry window tree.
//!
//! A gadget is an ordinary [`gadgetry_tree`] window whose style carries one gadget kind bit
//! (see [`GadgetKind`]) and whose system and input slots hold that kind's stock handler. Each
//! handler is a stateless unit struct; the per-window payload (slider range, list rows, tab
//! panes and so on) lives in the window's user-data slot.
//!
//! Gadgets report what happened by sending a [`Notice`](gadgetry_tree::Notice) to their owner,
//! which defaults to the parent window.
//!
//! Each kind's module offers free functions to query and drive it, e.g.
//! [`check_box::is_checked`] or [`slider::set_value`]. Setters never notify the owner; only
//! user input does.
//!
//! [`StockDrawFactory`] supplies flat-color draw handlers for every kind.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Size};
//! use gadgetry_gadgets::{GadgetData, check_box, create_gadget};
//! use gadgetry_tree::{InputMsg, InstanceData, WindowManager, WindowStatus};
//!
//! let mut wm = WindowManager::new(Size::new(800.0, 600.0));
//! let check = create_gadget(
//!     &mut wm,
//!     None,
//!     WindowStatus::ENABLED,
//!     Point::new(10.0, 10.0),
//!     Size::new(100.0, 16.0),
//!     InstanceData::default(),
//!     GadgetData::CheckBox,
//! )
//! .unwrap();
//!
//! wm.process_mouse_event(InputMsg::LeftDown(Point::new(15.0, 15.0)));
//! wm.process_mouse_event(InputMsg::LeftUp(Point::new(15.0, 15.0)));
//! assert!(check_box::is_checked(&wm, check));
//! ```

#![no_std]

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;

use gadgetry_tree::{
    InputHandler, InstanceData, SystemHandler, SystemMsg, WindowId, WindowManager, WindowStatus,
    WindowStyle,
};
use kurbo::{Point, Size};
use tracing::debug;

pub mod check_box;
pub mod combo_box;
mod common;
mod draw;
pub mod list_box;
pub mod progress_bar;
pub mod push_button;
pub mod radio_button;
pub mod slider;
pub mod static_text;
pub mod tab_control;
pub mod text_entry;

pub use common::{GadgetKind, set_state, state, toggle_state};
pub use draw::{StockDraw, StockDrawFactory};

use combo_box::ComboBoxData;
use list_box::ListBoxData;
use progress_bar::ProgressBarData;
use radio_button::RadioButtonData;
use slider::SliderData;
use static_text::StaticTextData;
use tab_control::TabControlData;
use text_entry::TextEntryData;

/// Kind plus payload of a gadget to build.
#[derive(Clone, Debug, PartialEq)]
pub enum GadgetData {
    /// Push button.
    PushButton,
    /// Check box.
    CheckBox,
    /// Radio button.
    RadioButton(RadioButtonData),
    /// Slider; vertical when the style carries `VERT_SLIDER`, horizontal otherwise.
    Slider(SliderData),
    /// Scrolling list box.
    ListBox(ListBoxData),
    /// Combo box.
    ComboBox(ComboBoxData),
    /// Tab control.
    TabControl(TabControlData),
    /// Text entry.
    TextEntry(TextEntryData),
    /// Static text.
    StaticText(StaticTextData),
    /// Progress bar.
    ProgressBar(ProgressBarData),
}

impl GadgetData {
    /// Default payload for `kind`.
    pub fn for_kind(kind: GadgetKind) -> Self {
        match kind {
            GadgetKind::PushButton => Self::PushButton,
            GadgetKind::CheckBox => Self::CheckBox,
            GadgetKind::RadioButton => Self::RadioButton(RadioButtonData::default()),
            GadgetKind::HorzSlider | GadgetKind::VertSlider => Self::Slider(SliderData::default()),
            GadgetKind::ListBox => Self::ListBox(ListBoxData::default()),
            GadgetKind::ComboBox => Self::ComboBox(ComboBoxData::default()),
            GadgetKind::TabControl => Self::TabControl(TabControlData::default()),
            GadgetKind::TextEntry => Self::TextEntry(TextEntryData::default()),
            GadgetKind::StaticText => Self::StaticText(StaticTextData::default()),
            GadgetKind::ProgressBar => Self::ProgressBar(ProgressBarData::default()),
        }
    }

    /// Kind built from this payload, given the requested style.
    pub fn kind(&self, style: WindowStyle) -> GadgetKind {
        match self {
            Self::PushButton => GadgetKind::PushButton,
            Self::CheckBox => GadgetKind::CheckBox,
            Self::RadioButton(_) => GadgetKind::RadioButton,
            Self::Slider(_) if style.contains(WindowStyle::VERT_SLIDER) => GadgetKind::VertSlider,
            Self::Slider(_) => GadgetKind::HorzSlider,
            Self::ListBox(_) => GadgetKind::ListBox,
            Self::ComboBox(_) => GadgetKind::ComboBox,
            Self::TabControl(_) => GadgetKind::TabControl,
            Self::TextEntry(_) => GadgetKind::TextEntry,
            Self::StaticText(_) => GadgetKind::StaticText,
            Self::ProgressBar(_) => GadgetKind::ProgressBar,
        }
    }
}

fn pair<H: SystemHandler + InputHandler + 'static>(
    handler: H,
) -> (Rc<dyn SystemHandler>, Rc<dyn InputHandler>) {
    let rc = Rc::new(handler);
    (rc.clone(), rc)
}

/// Stock system and input handlers of `kind`.
pub fn stock_handlers(kind: GadgetKind) -> (Rc<dyn SystemHandler>, Rc<dyn InputHandler>) {
    match kind {
        GadgetKind::PushButton => pair(push_button::PushButton),
        GadgetKind::CheckBox => pair(check_box::CheckBox),
        GadgetKind::RadioButton => pair(radio_button::RadioButton),
        GadgetKind::HorzSlider | GadgetKind::VertSlider => pair(slider::Slider),
        GadgetKind::ListBox => pair(list_box::ListBox),
        GadgetKind::ComboBox => pair(combo_box::ComboBox),
        GadgetKind::TabControl => pair(tab_control::TabControl),
        GadgetKind::TextEntry => pair(text_entry::TextEntry),
        GadgetKind::StaticText => pair(static_text::StaticText),
        GadgetKind::ProgressBar => pair(progress_bar::ProgressBar),
    }
}

/// Create a gadget window without finishing it.
///
/// The style's gadget bits are replaced by the kind of `data`, the stock handlers are installed
/// and the payload is attached. Tab controls still lack their panes; they get them from
/// [`finish_gadget`] or from a [`SystemMsg::ScriptCreate`].
pub fn build_gadget(
    wm: &mut WindowManager,
    parent: Option<WindowId>,
    status: WindowStatus,
    origin: Point,
    size: Size,
    mut inst: InstanceData,
    data: GadgetData,
) -> Option<WindowId> {
    let kind = data.kind(inst.style);
    inst.style.remove(WindowStyle::GADGET_MASK);
    inst.style |= kind.style();
    let (system, input) = stock_handlers(kind);
    let window = wm.create(parent, status, origin, size, Some(system), Some(inst))?;
    wm.set_input_handler(window, Some(input));
    match data {
        GadgetData::PushButton | GadgetData::CheckBox => {}
        GadgetData::RadioButton(d) => wm.set_user_data(window, d),
        GadgetData::Slider(mut d) => {
            d.position = d.position.clamp(d.min_val, d.max_val.max(d.min_val));
            wm.set_user_data(window, d);
            slider::compute_ticks(wm, window);
        }
        GadgetData::ListBox(d) => {
            wm.set_user_data(window, d);
            list_box::compute_column_widths(wm, window);
        }
        GadgetData::ComboBox(d) => wm.set_user_data(window, d),
        GadgetData::TabControl(d) => {
            wm.set_user_data(window, d);
            tab_control::layout(wm, window);
        }
        GadgetData::TextEntry(d) => {
            wm.set_user_data(window, d);
            let text: String = wm.window(window).map(|n| n.text().into()).unwrap_or_default();
            text_entry::set_text(wm, window, &text);
        }
        GadgetData::StaticText(d) => wm.set_user_data(window, d),
        GadgetData::ProgressBar(mut d) => {
            d.percent = d.percent.min(100);
            wm.set_user_data(window, d);
        }
    }
    debug!(?window, ?kind, "gadget built");
    Some(window)
}

/// Complete a gadget built with [`build_gadget`], e.g. create a tab control's panes.
pub fn finish_gadget(wm: &mut WindowManager, window: WindowId) {
    wm.send_system(window, SystemMsg::ScriptCreate);
}

/// Create a ready-to-use gadget: [`build_gadget`] followed by [`finish_gadget`].
pub fn create_gadget(
    wm: &mut WindowManager,
    parent: Option<WindowId>,
    status: WindowStatus,
    origin: Point,
    size: Size,
    inst: InstanceData,
    data: GadgetData,
) -> Option<WindowId> {
    let window = build_gadget(wm, parent, status, origin, size, inst, data)?;
    finish_gadget(wm, window);
    Some(window)
}
