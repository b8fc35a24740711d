// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Message delivery, hit testing and pointer/keyboard routing.
//!
//! Delivery is synchronous. Each handler is cloned out of its slot before it runs and the
//! manager counts the dispatch depth, so a handler may mutate the tree freely; destroyed
//! windows stay in the arena until [`WindowManager::process_destroy_list`] runs at depth zero.

use kurbo::{Point, Rect};
use tracing::{trace, warn};

use crate::WindowManager;
use crate::message::{InputMsg, MsgResult, Notice, SystemMsg};
use crate::paint::Painter;
use crate::types::{Key, KeyState, WindowId, WindowStatus};

impl WindowManager {
    /// Deliver a system message to `window`.
    ///
    /// Stale and destroyed windows are never visited; the call returns [`MsgResult::Ignored`].
    pub fn send_system(&mut self, window: WindowId, msg: SystemMsg) -> MsgResult {
        let mut msg = msg;
        self.send_system_mut(window, &mut msg)
    }

    /// Deliver a system message whose fields the handler may write back
    /// (see [`SystemMsg::InputFocus`]).
    pub fn send_system_mut(&mut self, window: WindowId, msg: &mut SystemMsg) -> MsgResult {
        let Some(node) = self.node(window) else {
            warn!(?window, "system message to stale window");
            return MsgResult::Ignored;
        };
        if node.is_destroyed() {
            trace!(?window, "system message to destroyed window dropped");
            return MsgResult::Ignored;
        }
        let Some(handler) = node
            .handlers
            .system
            .clone()
            .or_else(|| self.defaults.handlers.system.clone())
        else {
            return MsgResult::Ignored;
        };
        self.dispatch_depth += 1;
        let result = handler.system(self, window, msg);
        self.dispatch_depth -= 1;
        result
    }

    /// Deliver an input message to `window` without climbing to its parent.
    pub fn send_input(&mut self, window: WindowId, msg: InputMsg) -> MsgResult {
        let Some(node) = self.node(window) else {
            warn!(?window, "input message to stale window");
            return MsgResult::Ignored;
        };
        if node.is_destroyed() {
            trace!(?window, "input message to destroyed window dropped");
            return MsgResult::Ignored;
        }
        let Some(handler) = node
            .handlers
            .input
            .clone()
            .or_else(|| self.defaults.handlers.input.clone())
        else {
            return MsgResult::Ignored;
        };
        self.dispatch_depth += 1;
        let result = handler.input(self, window, msg);
        self.dispatch_depth -= 1;
        result
    }

    /// Deliver an input message to `window`, then to each ancestor until one handles it.
    ///
    /// Climbing stops at the edge of the modal scope.
    pub fn send_input_bubbling(&mut self, window: WindowId, msg: InputMsg) -> MsgResult {
        let mut cur = Some(window);
        while let Some(w) = cur {
            if self.send_input(w, msg).is_handled() {
                return MsgResult::Handled;
            }
            // A handler may have destroyed `w`; an unlinked window has no parent.
            cur = self.parent(w).filter(|&p| self.in_modal_scope(p));
        }
        MsgResult::Ignored
    }

    /// Bubble a gadget notification to the owner of `window`.
    pub fn notify_owner(&mut self, window: WindowId, notice: Notice) -> MsgResult {
        match self.node(window).and_then(|n| n.inst.owner) {
            Some(owner) => self.send_system(owner, SystemMsg::Notify(notice)),
            None => {
                trace!(?window, "notification without owner dropped");
                MsgResult::Ignored
            }
        }
    }

    /// Front-most window under `pos` that may receive input.
    ///
    /// Hidden and disabled windows are skipped together with their subtrees. `NO_INPUT` windows
    /// are transparent, but their children can still be hit. While a modal window is up only
    /// windows in its scope are candidates; a hit on an out-of-scope part of the modal window's
    /// tree, such as a sibling of a nested modal window, finds nothing.
    pub fn window_at(&self, pos: Point) -> Option<WindowId> {
        let modal_root = self.modal_root();
        self.top_level()
            .filter(|&w| Some(w) == modal_root || self.in_modal_scope(w))
            .find_map(|w| self.hit_in(w, Point::ZERO, pos))
            .filter(|&hit| self.in_modal_scope(hit))
    }

    fn hit_in(&self, id: WindowId, origin: Point, pos: Point) -> Option<WindowId> {
        let node = self.node(id)?;
        if node.status.contains(WindowStatus::HIDDEN)
            || !node.status.contains(WindowStatus::ENABLED)
        {
            return None;
        }
        let region = Rect::from_origin_size(origin + node.position.to_vec2(), node.size);
        if !region.contains(pos) {
            return None;
        }
        if let Some(hit) = self
            .children(id)
            .find_map(|c| self.hit_in(c, region.origin(), pos))
        {
            return Some(hit);
        }
        (!node.status.contains(WindowStatus::NO_INPUT)).then_some(id)
    }

    /// Route a pointer event.
    ///
    /// A live capture window receives the event directly. Otherwise the event goes to the
    /// front-most window under the cursor and climbs its parents until handled. Moving onto a
    /// different window synthesizes [`InputMsg::MouseLeaving`] and [`InputMsg::MouseEntering`].
    /// Left-down focuses the target and starts a drag on `DRAGABLE` windows; left-drag moves
    /// the grabbed window; mouse-move invokes the tooltip handler.
    pub fn process_mouse_event(&mut self, msg: InputMsg) -> MsgResult {
        let Some(pos) = msg.pos() else {
            warn!(?msg, "process_mouse_event: not a pointer message");
            return MsgResult::Ignored;
        };
        if matches!(msg, InputMsg::MouseEntering(_) | InputMsg::MouseLeaving(_)) {
            warn!(?msg, "process_mouse_event: enter/leave are synthesized by the manager");
            return MsgResult::Ignored;
        }
        self.last_mouse = pos;

        let capture = self.capture();
        if capture.is_none() {
            self.capture = None;
        }
        let target = capture.or_else(|| self.window_at(pos));
        self.track_mouse_over(target, pos);

        match msg {
            InputMsg::LeftDown(_) => {
                if let Some(t) = target {
                    if capture.is_none() {
                        self.focus_on_click(t);
                    }
                    self.begin_drag(t, pos);
                }
            }
            InputMsg::LeftDrag(_) => {
                if let Some(grab) = self.grab() {
                    if let Some(delta) = self.drag.follow(pos) {
                        self.move_by(grab, delta);
                    }
                    return MsgResult::Handled;
                }
            }
            InputMsg::LeftUp(_) => self.drag.let_go(),
            _ => {}
        }

        let Some(target) = target else {
            return MsgResult::Ignored;
        };
        let result = if capture.is_some() {
            self.send_input(target, msg)
        } else {
            self.send_input_bubbling(target, msg)
        };
        if matches!(msg, InputMsg::MousePos(_)) {
            self.show_tooltip(target, pos);
        }
        result
    }

    /// Route a key event to the focus window, climbing its parents until handled.
    pub fn process_key(&mut self, key: Key, state: KeyState) -> MsgResult {
        let Some(focus) = self.focus() else {
            trace!(?key, "key without focus dropped");
            return MsgResult::Ignored;
        };
        if !self.in_modal_scope(focus) {
            trace!(?focus, "key outside modal scope dropped");
            return MsgResult::Ignored;
        }
        self.send_input_bubbling(focus, InputMsg::Char { key, state })
    }

    fn track_mouse_over(&mut self, target: Option<WindowId>, pos: Point) {
        if self.mouse_over == target {
            return;
        }
        if let Some(old) = self.mouse_over.take() {
            self.send_input(old, InputMsg::MouseLeaving(pos));
        }
        if let Some(new) = target.filter(|&t| self.is_alive(t)) {
            self.mouse_over = Some(new);
            self.send_input(new, InputMsg::MouseEntering(pos));
        }
    }

    fn focus_on_click(&mut self, target: WindowId) {
        if self.focus == Some(target) {
            return;
        }
        self.set_focus(Some(target));
    }

    fn begin_drag(&mut self, target: WindowId, pos: Point) {
        let Some(node) = self.node(target) else {
            return;
        };
        if !node.status.contains(WindowStatus::DRAGABLE) {
            return;
        }
        let Some(origin) = self.screen_position(target) else {
            return;
        };
        if let Some(node) = self.node_mut(target) {
            node.hot_spot = pos - origin;
        }
        self.drag.take_hold(target, pos);
    }

    fn show_tooltip(&mut self, window: WindowId, pos: Point) {
        let Some(node) = self.node(window) else {
            return;
        };
        if node.is_destroyed() {
            return;
        }
        let Some(handler) = node
            .handlers
            .tooltip
            .clone()
            .or_else(|| self.defaults.handlers.tooltip.clone())
        else {
            return;
        };
        self.dispatch_depth += 1;
        handler.tooltip(self, window, pos);
        self.dispatch_depth -= 1;
    }

    /// Cursor position of the last pointer event.
    pub fn mouse_pos(&self) -> Point {
        self.last_mouse
    }

    /// Paint every visible window back to front, each parent before its children.
    pub fn repaint(&self, painter: &mut dyn Painter) {
        let mut cur = self.last_window();
        while let Some(id) = cur {
            self.paint_window(id, painter);
            cur = self.node(id).and_then(|n| n.links.prev);
        }
    }

    /// Paint one window and its visible descendants.
    pub fn paint_window(&self, id: WindowId, painter: &mut dyn Painter) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.status.contains(WindowStatus::HIDDEN) || node.is_destroyed() {
            return;
        }
        if let Some(draw) = node
            .handlers
            .draw
            .as_ref()
            .or(self.defaults.handlers.draw.as_ref())
        {
            draw.draw(self, id, painter);
        }
        let mut child = node.links.last_child;
        while let Some(c) = child {
            self.paint_window(c, painter);
            child = self.node(c).and_then(|n| n.links.prev);
        }
    }
}
