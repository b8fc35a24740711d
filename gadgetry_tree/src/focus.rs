// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus and tab order.
//!
//! Focus is negotiated: [`WindowManager::set_focus`] offers focus to a window with
//! [`SystemMsg::InputFocus`] and the window accepts by writing `accepted = true`. A window
//! that does not accept passes the offer on to its parent.
//!
//! Tab order is a list registered with the manager, distinct from the window tree. Windows
//! that are not in the list step through their siblings instead. Both wrap at the ends.

use alloc::vec::Vec;
use tracing::{trace, warn};

use crate::WindowManager;
use crate::message::SystemMsg;
use crate::types::{WindowId, WindowStatus};

impl WindowManager {
    /// Window holding keyboard focus.
    pub fn focus(&self) -> Option<WindowId> {
        self.focus.filter(|&f| self.is_alive(f))
    }

    /// Move keyboard focus toward `window`.
    ///
    /// The previous focus window receives `InputFocus { gained: false }`. Then `window` and, if
    /// it declines, each ancestor in turn is offered focus until one accepts. Windows that are
    /// hidden, disabled, marked `NO_FOCUS` or outside the modal scope are skipped.
    ///
    /// Returns the window that ended up with focus.
    pub fn set_focus(&mut self, window: Option<WindowId>) -> Option<WindowId> {
        if let Some(old) = self.focus.take()
            && self.is_alive(old)
        {
            self.send_system(
                old,
                SystemMsg::InputFocus {
                    gained: false,
                    accepted: false,
                },
            );
        }

        let mut cur = window;
        while let Some(w) = cur {
            if !self.is_alive(w) {
                warn!(?w, "set_focus: window is not alive");
                break;
            }
            if self.can_take_focus(w) {
                let mut msg = SystemMsg::InputFocus {
                    gained: true,
                    accepted: false,
                };
                self.send_system_mut(w, &mut msg);
                if matches!(msg, SystemMsg::InputFocus { accepted: true, .. }) {
                    trace!(?w, "focus accepted");
                    self.focus = Some(w);
                    break;
                }
            }
            cur = self.parent(w);
        }
        self.focus
    }

    fn can_take_focus(&self, w: WindowId) -> bool {
        self.node(w)
            .is_some_and(|n| !n.status.contains(WindowStatus::NO_FOCUS))
            && self.is_enabled(w)
            && !self.is_hidden(w)
            && self.in_modal_scope(w)
    }

    fn is_tab_candidate(&self, w: WindowId) -> bool {
        self.is_alive(w)
            && self
                .node(w)
                .is_some_and(|n| n.status.contains(WindowStatus::TAB_STOP))
            && self.can_take_focus(w)
    }

    /// Registered tab order.
    pub fn tab_list(&self) -> &[WindowId] {
        &self.tab_list
    }

    /// Replace the tab order. Dead and repeated windows are dropped.
    pub fn set_tab_list(&mut self, list: impl IntoIterator<Item = WindowId>) {
        self.tab_list.clear();
        for w in list {
            self.add_tab_window(w);
        }
    }

    /// Append `window` to the tab order. Returns `false` if it is dead or already listed.
    pub fn add_tab_window(&mut self, window: WindowId) -> bool {
        if !self.is_alive(window) {
            warn!(?window, "add_tab_window: window is not alive");
            return false;
        }
        if self.tab_list.contains(&window) {
            return false;
        }
        self.tab_list.push(window);
        true
    }

    /// Empty the tab order.
    pub fn clear_tab_list(&mut self) {
        self.tab_list.clear();
    }

    /// Move focus to the tab stop after `from`.
    pub fn next_tab(&mut self, from: WindowId) -> Option<WindowId> {
        self.step_tab(from, true)
    }

    /// Move focus to the tab stop before `from`.
    pub fn prev_tab(&mut self, from: WindowId) -> Option<WindowId> {
        self.step_tab(from, false)
    }

    fn step_tab(&mut self, from: WindowId, forward: bool) -> Option<WindowId> {
        let ring: Vec<WindowId> = if self.tab_list.contains(&from) {
            self.tab_list.clone()
        } else {
            match self.parent(from) {
                Some(p) => self.children(p).collect(),
                None => self.top_level().collect(),
            }
        };
        let start = ring.iter().position(|&w| w == from)?;
        let len = ring.len();
        let next = (1..len)
            .map(|step| {
                if forward {
                    ring[(start + step) % len]
                } else {
                    ring[(start + len - step) % len]
                }
            })
            .find(|&w| self.is_tab_candidate(w))?;
        self.set_focus(Some(next))
    }
}
