// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the window tree: handles, status and style flags, and per-window drawing data.

use alloc::string::String;
use peniko::Color;

/// Identifier for a window in the [`WindowManager`](crate::WindowManager) arena.
///
/// This is a small, copyable handle that stays stable while the window lives
/// but becomes invalid once the window has been freed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On create, a fresh slot is allocated with generation `1`.
/// - On destroy, the window is unlinked and queued; its slot is only released when the
///   destroy queue is drained by [`WindowManager::process_destroy_list`](crate::WindowManager::process_destroy_list).
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `WindowId`.
///
/// Use [`WindowManager::is_alive`](crate::WindowManager::is_alive) to check whether a `WindowId`
/// still refers to a live (created and not destroyed) window.
/// Stale `WindowId`s never alias a different window because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WindowId(pub(crate) u32, pub(crate) u32);

impl WindowId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Identifier of a layout chain owned by the window manager.
///
/// See [`WindowLayout`](crate::WindowLayout).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LayoutId(pub(crate) u32);

bitflags::bitflags! {
    /// Window status bits.
    ///
    /// Status describes how the window participates in the tree: visibility, input,
    /// dragging, tab navigation, and lifecycle (`DESTROYED`).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WindowStatus: u32 {
        /// Window has been activated at least once.
        const ACTIVE             = 1 << 0;
        /// Window toggles when clicked.
        const TOGGLE             = 1 << 1;
        /// Window can be dragged with the left button.
        const DRAGABLE           = 1 << 2;
        /// Window receives input.
        const ENABLED            = 1 << 3;
        /// Window and its children are neither drawn nor hit.
        const HIDDEN             = 1 << 4;
        /// Window stays above its siblings.
        const ABOVE              = 1 << 5;
        /// Window stays below its siblings.
        const BELOW              = 1 << 6;
        /// Window draws with images rather than flat colors.
        const IMAGE              = 1 << 7;
        /// Window takes part in tab navigation.
        const TAB_STOP           = 1 << 8;
        /// Window is never an input target; its children still are.
        const NO_INPUT           = 1 << 9;
        /// Window refuses keyboard focus.
        const NO_FOCUS           = 1 << 10;
        /// Window was destroyed and waits in the destroy queue.
        const DESTROYED          = 1 << 11;
        /// Window draws a border.
        const BORDER             = 1 << 12;
        /// Text is drawn smoothed.
        const SMOOTH_TEXT        = 1 << 13;
        /// Text is restricted to a single line.
        const ONE_LINE           = 1 << 14;
        /// Window is not flushed on reset.
        const NO_FLUSH           = 1 << 15;
        /// Window draws nothing of its own.
        const SEE_THRU           = 1 << 16;
        /// Gadget reacts to the right button.
        const RIGHT_CLICK        = 1 << 17;
        /// Wrapped text is centered.
        const WRAP_CENTERED      = 1 << 18;
        /// Push button behaves like a check box.
        const CHECK_LIKE         = 1 << 19;
        /// Label text contains a hotkey marker.
        const HOTKEY_TEXT        = 1 << 20;
        /// Overlay images follow the gadget state.
        const USE_OVERLAY_STATES = 1 << 21;
        /// Window is still being set up.
        const NOT_READY          = 1 << 22;
        /// Window flashes.
        const FLASHING           = 1 << 23;
        /// Colors are used even when images are present.
        const ALWAYS_COLOR       = 1 << 24;
        /// Push button fires on press instead of release.
        const ON_MOUSE_DOWN      = 1 << 25;
    }
}

bitflags::bitflags! {
    /// Window style bits.
    ///
    /// The gadget kind bits are one-hot: a window carries at most one of them.
    /// The remaining bits modify how that kind behaves.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        /// Push button gadget.
        const PUSH_BUTTON    = 1 << 0;
        /// Radio button gadget.
        const RADIO_BUTTON   = 1 << 1;
        /// Check box gadget.
        const CHECK_BOX      = 1 << 2;
        /// Vertical slider gadget.
        const VERT_SLIDER    = 1 << 3;
        /// Horizontal slider gadget.
        const HORZ_SLIDER    = 1 << 4;
        /// Scrolling list box gadget.
        const SCROLL_LISTBOX = 1 << 5;
        /// Text entry gadget.
        const ENTRY_FIELD    = 1 << 6;
        /// Static text gadget.
        const STATIC_TEXT    = 1 << 7;
        /// Progress bar gadget.
        const PROGRESS_BAR   = 1 << 8;
        /// Plain user window (no gadget behavior).
        const USER           = 1 << 9;
        /// Gadget reports pointer enter/leave to its owner.
        const MOUSE_TRACK    = 1 << 10;
        /// Window is driven by an animation.
        const ANIMATED       = 1 << 11;
        /// Tab control gadget.
        const TAB_CONTROL    = 1 << 12;
        /// Pane owned by a tab control.
        const TAB_PANE       = 1 << 13;
        /// Combo box gadget.
        const COMBO_BOX      = 1 << 14;

        /// Every gadget kind bit.
        const GADGET_MASK = Self::PUSH_BUTTON.bits()
            | Self::RADIO_BUTTON.bits()
            | Self::CHECK_BOX.bits()
            | Self::VERT_SLIDER.bits()
            | Self::HORZ_SLIDER.bits()
            | Self::SCROLL_LISTBOX.bits()
            | Self::ENTRY_FIELD.bits()
            | Self::STATIC_TEXT.bits()
            | Self::PROGRESS_BAR.bits()
            | Self::TAB_CONTROL.bits()
            | Self::COMBO_BOX.bits();
    }
}

impl WindowStyle {
    /// Returns `true` if any gadget kind bit is set.
    #[inline]
    pub fn is_gadget(self) -> bool {
        self.intersects(Self::GADGET_MASK)
    }
}

bitflags::bitflags! {
    /// Interaction sub-bits owned by a gadget.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WindowState: u8 {
        /// Pointer is over the gadget, or the gadget holds focus.
        const HILITED        = 1 << 0;
        /// Checked, pressed, or selected.
        const SELECTED       = 1 << 1;
        /// Right-button counterpart of `SELECTED`.
        const SELECTED_RIGHT = 1 << 2;
    }
}

bitflags::bitflags! {
    /// State accompanying a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyState: u8 {
        /// Key went down.
        const DOWN        = 1 << 0;
        /// Key went up.
        const UP          = 1 << 1;
        /// Shift is held.
        const SHIFT       = 1 << 2;
        /// Control is held.
        const CONTROL     = 1 << 3;
        /// Alt is held.
        const ALT         = 1 << 4;
        /// Event was produced by key repeat.
        const AUTO_REPEAT = 1 << 5;
    }
}

/// A key delivered through [`InputMsg::Char`](crate::InputMsg::Char).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Tab.
    Tab,
    /// Return / Enter.
    Return,
    /// Space bar.
    Space,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Escape.
    Escape,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// A printable character.
    Char(char),
}

/// Font request carried by a window; shaping happens in the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontDesc {
    /// Face name.
    pub name: String,
    /// Point size.
    pub size: u32,
    /// Bold weight.
    pub bold: bool,
}

/// One image/color entry of a window's per-state draw data.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawData {
    /// Named image, if any.
    pub image: Option<String>,
    /// Fill color.
    pub color: Color,
    /// Border color.
    pub border_color: Color,
}

impl Default for DrawData {
    fn default() -> Self {
        Self {
            image: None,
            color: Color::TRANSPARENT,
            border_color: Color::TRANSPARENT,
        }
    }
}

/// Text colors for the three gadget visual states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextColors {
    /// Text color while enabled.
    pub enabled: Color,
    /// Text border while enabled.
    pub enabled_border: Color,
    /// Text color while disabled.
    pub disabled: Color,
    /// Text border while disabled.
    pub disabled_border: Color,
    /// Text color while hilited.
    pub hilite: Color,
    /// Text border while hilited.
    pub hilite_border: Color,
}

impl Default for TextColors {
    fn default() -> Self {
        Self {
            enabled: Color::WHITE,
            enabled_border: Color::BLACK,
            disabled: make_color(128, 128, 128, 255),
            disabled_border: Color::BLACK,
            hilite: make_color(255, 255, 0, 255),
            hilite_border: Color::BLACK,
        }
    }
}

/// Pack four 0-255 components into a color.
#[inline]
pub fn make_color(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color::from_rgba8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gadget_mask_covers_kinds_only() {
        assert!(WindowStyle::CHECK_BOX.is_gadget());
        assert!(WindowStyle::COMBO_BOX.is_gadget());
        assert!(!WindowStyle::USER.is_gadget());
        assert!(!(WindowStyle::MOUSE_TRACK | WindowStyle::TAB_PANE).is_gadget());
    }

    #[test]
    fn make_color_round_trips_components() {
        let c = make_color(10, 20, 30, 40).to_rgba8();
        assert_eq!((c.r, c.g, c.b, c.a), (10, 20, 30, 40));
    }
}
