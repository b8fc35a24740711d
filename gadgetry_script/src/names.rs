// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Script names of status flags, style flags and window types.

use gadgetry_gadgets::GadgetKind;
use gadgetry_tree::{WindowStatus, WindowStyle};

pub(crate) const STATUS_NAMES: &[(&str, WindowStatus)] = &[
    ("ACTIVE", WindowStatus::ACTIVE),
    ("TOGGLE", WindowStatus::TOGGLE),
    ("DRAGABLE", WindowStatus::DRAGABLE),
    ("ENABLED", WindowStatus::ENABLED),
    ("HIDDEN", WindowStatus::HIDDEN),
    ("ABOVE", WindowStatus::ABOVE),
    ("BELOW", WindowStatus::BELOW),
    ("IMAGE", WindowStatus::IMAGE),
    ("TABSTOP", WindowStatus::TAB_STOP),
    ("NOINPUT", WindowStatus::NO_INPUT),
    ("NOFOCUS", WindowStatus::NO_FOCUS),
    ("DESTROYED", WindowStatus::DESTROYED),
    ("BORDER", WindowStatus::BORDER),
    ("SMOOTH_TEXT", WindowStatus::SMOOTH_TEXT),
    ("ONE_LINE", WindowStatus::ONE_LINE),
    ("NO_FLUSH", WindowStatus::NO_FLUSH),
    ("SEE_THRU", WindowStatus::SEE_THRU),
    ("RIGHT_CLICK", WindowStatus::RIGHT_CLICK),
    ("WRAP_CENTERED", WindowStatus::WRAP_CENTERED),
    ("CHECK_LIKE", WindowStatus::CHECK_LIKE),
    ("HOTKEY_TEXT", WindowStatus::HOTKEY_TEXT),
    ("USE_OVERLAY_STATES", WindowStatus::USE_OVERLAY_STATES),
    ("NOT_READY", WindowStatus::NOT_READY),
    ("FLASHING", WindowStatus::FLASHING),
    ("ALWAYS_COLOR", WindowStatus::ALWAYS_COLOR),
    ("ON_MOUSE_DOWN", WindowStatus::ON_MOUSE_DOWN),
];

pub(crate) const STYLE_NAMES: &[(&str, WindowStyle)] = &[
    ("PUSHBUTTON", WindowStyle::PUSH_BUTTON),
    ("RADIOBUTTON", WindowStyle::RADIO_BUTTON),
    ("CHECKBOX", WindowStyle::CHECK_BOX),
    ("VERTSLIDER", WindowStyle::VERT_SLIDER),
    ("HORZSLIDER", WindowStyle::HORZ_SLIDER),
    ("SCROLLLISTBOX", WindowStyle::SCROLL_LISTBOX),
    ("ENTRYFIELD", WindowStyle::ENTRY_FIELD),
    ("STATICTEXT", WindowStyle::STATIC_TEXT),
    ("PROGRESSBAR", WindowStyle::PROGRESS_BAR),
    ("USER", WindowStyle::USER),
    ("MOUSETRACK", WindowStyle::MOUSE_TRACK),
    ("ANIMATED", WindowStyle::ANIMATED),
    ("TABCONTROL", WindowStyle::TAB_CONTROL),
    ("TABPANE", WindowStyle::TAB_PANE),
    ("COMBOBOX", WindowStyle::COMBO_BOX),
];

/// Look up a flag name, ignoring ASCII case.
pub(crate) fn flag<F: Copy>(table: &[(&str, F)], name: &str) -> Option<F> {
    table
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, f)| f)
}

/// Decode a `WINDOWTYPE` value; `Some(None)` is a plain user window.
pub(crate) fn window_type(name: &str) -> Option<Option<GadgetKind>> {
    if name.eq_ignore_ascii_case("USER") {
        return Some(None);
    }
    let style = flag(STYLE_NAMES, name)?;
    GadgetKind::from_style(style).map(Some)
}
