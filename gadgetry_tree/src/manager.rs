// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window manager: arena, tree links, lifecycle and the modal stack.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::drag::Grab;
use crate::handler::{
    DefaultHandlers, DrawHandler, InputHandler, SystemHandler, TooltipHandler, WindowFactory,
};
use crate::layout::LayoutChain;
use crate::message::SystemMsg;
use crate::node::{InstanceData, TreeLinks, WindowNode};
use crate::types::{LayoutId, WindowId, WindowStatus};

struct Slot {
    generation: u32,
    /// Creation order, used to scope input while a modal window is up.
    serial: u64,
    node: Option<WindowNode>,
}

/// One push of the modal stack.
///
/// Every window records a creation serial; windows whose serial is above the entry's were
/// created after the push (popups opened by the dialog) and stay reachable.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ModalEntry {
    pub(crate) window: WindowId,
    /// Value of the creation serial counter when the entry was pushed.
    pub(crate) serial: u64,
}

/// Owner of every window, the top-level list, and the input roles.
///
/// One manager exists per UI; it is passed by reference into every operation instead of being
/// ambient global state. It owns:
///
/// - the window arena, addressed by generational [`WindowId`]s,
/// - the top-level list (head is front-most) and each window's child list,
/// - the modal stack, the focus, capture and grab roles,
/// - the tab-order list,
/// - the layout chains (see [`WindowLayout`](crate::WindowLayout)),
/// - the destroy queue.
///
/// ## Lifecycle of a window
///
/// created → linked (in one tree, optionally in one layout) → any number of property changes and
/// message deliveries → unlinked by [`destroy`](Self::destroy) → freed by
/// [`process_destroy_list`](Self::process_destroy_list). Freeing never happens while a handler is
/// running, so handlers can destroy windows (including their own) without invalidating the
/// dispatch that called them.
///
/// ## Example
///
/// ```
/// use kurbo::{Point, Size};
/// use gadgetry_tree::{WindowManager, WindowStatus};
///
/// let mut wm = WindowManager::new(Size::new(800.0, 600.0));
/// let dialog = wm
///     .create(None, WindowStatus::ENABLED, Point::new(100.0, 100.0), Size::new(200.0, 100.0), None, None)
///     .unwrap();
/// let button = wm
///     .create(Some(dialog), WindowStatus::ENABLED, Point::new(10.0, 10.0), Size::new(50.0, 20.0), None, None)
///     .unwrap();
/// assert_eq!(wm.window(button).unwrap().parent(), Some(dialog));
/// assert_eq!(wm.screen_position(button), Some(Point::new(110.0, 110.0)));
///
/// wm.destroy(dialog);
/// assert!(!wm.is_alive(button));
/// assert_eq!(wm.process_destroy_list(), 2);
/// ```
pub struct WindowManager {
    slots: Vec<Slot>,
    free: Vec<u32>,
    next_serial: u64,
    top_head: Option<WindowId>,
    top_tail: Option<WindowId>,
    pub(crate) modal: SmallVec<[ModalEntry; 4]>,
    pub(crate) focus: Option<WindowId>,
    pub(crate) capture: Option<WindowId>,
    pub(crate) mouse_over: Option<WindowId>,
    pub(crate) drag: Grab,
    pub(crate) tab_list: Vec<WindowId>,
    destroy_queue: Vec<WindowId>,
    pub(crate) layouts: HashMap<LayoutId, LayoutChain>,
    next_layout: u32,
    pub(crate) defaults: DefaultHandlers,
    factory: Option<Rc<dyn WindowFactory>>,
    display_size: Size,
    name_keys: HashMap<String, i32>,
    pub(crate) dispatch_depth: u32,
    pub(crate) last_mouse: Point,
}

impl fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("windows", &self.slots.iter().filter(|s| s.node.is_some()).count())
            .field("display_size", &self.display_size)
            .field("focus", &self.focus)
            .field("capture", &self.capture)
            .field("modal", &self.modal.len())
            .field("pending_destroy", &self.destroy_queue.len())
            .finish_non_exhaustive()
    }
}

impl WindowManager {
    /// Create an empty manager for a display of `display_size` pixels.
    pub fn new(display_size: Size) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            next_serial: 0,
            top_head: None,
            top_tail: None,
            modal: SmallVec::new(),
            focus: None,
            capture: None,
            mouse_over: None,
            drag: Grab::default(),
            tab_list: Vec::new(),
            destroy_queue: Vec::new(),
            layouts: HashMap::new(),
            next_layout: 0,
            defaults: DefaultHandlers::default(),
            factory: None,
            display_size,
            name_keys: HashMap::new(),
            dispatch_depth: 0,
            last_mouse: Point::ZERO,
        }
    }

    /// Live display size; layout scripts are rescaled to it.
    pub fn display_size(&self) -> Size {
        self.display_size
    }

    /// Change the live display size.
    pub fn set_display_size(&mut self, size: Size) {
        self.display_size = size;
    }

    /// Install the renderer factory that provides default draw handlers.
    pub fn set_factory(&mut self, factory: Option<Rc<dyn WindowFactory>>) {
        self.factory = factory;
    }

    /// Handlers used for empty slots.
    pub fn default_handlers(&self) -> &DefaultHandlers {
        &self.defaults
    }

    /// Replace the handlers used for empty slots.
    pub fn set_default_handlers(&mut self, defaults: DefaultHandlers) {
        self.defaults = defaults;
    }

    /// Map a window name to its numeric id, allocating a new id for unseen names.
    ///
    /// The empty name maps to `0`.
    pub fn name_to_id(&mut self, name: &str) -> i32 {
        if name.is_empty() {
            return 0;
        }
        if let Some(&id) = self.name_keys.get(name) {
            return id;
        }
        let id = i32::try_from(self.name_keys.len() + 1).unwrap_or(i32::MAX);
        self.name_keys.insert(name.into(), id);
        id
    }

    /// Numeric id for `name` if it was seen before.
    pub fn lookup_name(&self, name: &str) -> Option<i32> {
        self.name_keys.get(name).copied()
    }

    // --- arena ---

    pub(crate) fn node(&self, id: WindowId) -> Option<&WindowNode> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    pub(crate) fn node_mut(&mut self, id: WindowId) -> Option<&mut WindowNode> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_mut()
    }

    pub(crate) fn serial(&self, id: WindowId) -> Option<u64> {
        let slot = self.slots.get(id.idx())?;
        (slot.generation == id.generation() && slot.node.is_some()).then_some(slot.serial)
    }

    fn alloc(&mut self, node: WindowNode) -> WindowId {
        self.next_serial += 1;
        let serial = self.next_serial;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.serial = serial;
            slot.node = Some(node);
            return WindowId::new(idx, slot.generation);
        }
        #[expect(clippy::cast_possible_truncation, reason = "window counts stay far below u32::MAX")]
        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            serial,
            node: Some(node),
        });
        WindowId::new(idx, 1)
    }

    /// The window behind `id`, including destroyed windows that are not freed yet.
    pub fn window(&self, id: WindowId) -> Option<&WindowNode> {
        self.node(id)
    }

    /// Mutable access to the window behind `id`.
    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowNode> {
        self.node_mut(id)
    }

    /// Whether `id` refers to a created, not yet destroyed window.
    pub fn is_alive(&self, id: WindowId) -> bool {
        self.node(id).is_some_and(|n| !n.is_destroyed())
    }

    /// Number of windows in the arena, including destroyed ones awaiting release.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Returns `true` if the arena holds no windows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- lifecycle ---

    /// Create a window.
    ///
    /// The window is linked at the front of `parent`'s child list, or at the front of the
    /// top-level list. While a modal window is up, new top-level windows are linked directly
    /// in front of the modal window's tree so they stay above it without reordering it.
    ///
    /// Empty instance data defaults the owner to `parent`. The draw slot is filled from the
    /// installed [`WindowFactory`]. A [`SystemMsg::Create`] is sent once the window is linked.
    ///
    /// Returns `None` if `parent` is stale or destroyed.
    pub fn create(
        &mut self,
        parent: Option<WindowId>,
        status: WindowStatus,
        origin: Point,
        size: Size,
        system: Option<Rc<dyn SystemHandler>>,
        inst: Option<InstanceData>,
    ) -> Option<WindowId> {
        if let Some(p) = parent {
            match self.node(p) {
                None => {
                    warn!(?p, "create: stale parent");
                    return None;
                }
                Some(n) if n.is_destroyed() => {
                    warn!(?p, "create: parent is destroyed");
                    return None;
                }
                Some(_) => {}
            }
        }

        let mut inst = inst.unwrap_or_default();
        if inst.owner.is_none() {
            inst.owner = parent;
        }
        if inst.id == 0 && !inst.name.is_empty() {
            let name = inst.name.clone();
            inst.id = self.name_to_id(&name);
        }
        let style = inst.style;
        let mut node = WindowNode::new(status - WindowStatus::DESTROYED, origin, size, inst);
        node.handlers.system = system;
        node.handlers.draw = self.factory.as_ref().and_then(|f| f.default_draw(style));
        let id = self.alloc(node);

        match (parent, self.modal_root()) {
            (None, Some(anchor)) => self.link_before(anchor, id),
            _ => self.link_front(parent, id),
        }
        debug!(?id, ?parent, "window created");

        self.send_system(id, SystemMsg::Create);
        Some(id)
    }

    /// Destroy a window and its subtree.
    ///
    /// The window receives [`SystemMsg::Destroy`] while still linked, loses focus if it had it,
    /// is marked `DESTROYED`, releases every role it held (capture, grab, modal, tab order), is
    /// unlinked from its tree and layout, and is queued for release. Destroying a destroyed or
    /// stale window is a no-op.
    pub fn destroy(&mut self, id: WindowId) {
        let Some(node) = self.node(id) else {
            warn!(?id, "destroy: stale window");
            return;
        };
        if node.is_destroyed() {
            trace!(?id, "destroy: already destroyed");
            return;
        }

        self.send_system(id, SystemMsg::Destroy);
        if !self.is_alive(id) {
            // The handler destroyed it already.
            return;
        }
        if self.focus == Some(id) {
            self.set_focus(None);
        }
        if let Some(node) = self.node_mut(id) {
            node.status |= WindowStatus::DESTROYED;
        }

        let children: Vec<WindowId> = self.children(id).collect();
        for child in children {
            self.destroy(child);
        }

        self.release_roles(id);
        self.unlink(id);
        self.layout_unlink(id);
        self.destroy_queue.push(id);
        debug!(?id, "window destroyed");
    }

    fn release_roles(&mut self, id: WindowId) {
        if self.focus == Some(id) {
            self.focus = None;
        }
        if self.capture == Some(id) {
            self.capture = None;
        }
        if self.mouse_over == Some(id) {
            self.mouse_over = None;
        }
        self.drag.forget(id);
        self.modal.retain(|m| m.window != id);
        self.tab_list.retain(|t| *t != id);
    }

    /// Free every window queued by [`destroy`](Self::destroy).
    ///
    /// Does nothing while a handler is running; the queue is then drained by the next call made
    /// outside of dispatch. Returns the number of windows freed.
    pub fn process_destroy_list(&mut self) -> usize {
        if self.dispatch_depth > 0 {
            trace!(depth = self.dispatch_depth, "destroy list deferred during dispatch");
            return 0;
        }
        let queue = core::mem::take(&mut self.destroy_queue);
        let mut freed = 0;
        for id in queue {
            if let Some(slot) = self.slots.get_mut(id.idx())
                && slot.generation == id.generation()
                && slot.node.take().is_some()
            {
                self.free.push(id.0);
                freed += 1;
            }
        }
        if freed > 0 {
            trace!(freed, "destroy list processed");
        }
        freed
    }

    /// Windows waiting in the destroy queue.
    pub fn pending_destroy(&self) -> &[WindowId] {
        &self.destroy_queue
    }

    /// Per-frame housekeeping: drains the destroy queue.
    pub fn update(&mut self) {
        self.process_destroy_list();
    }

    /// Destroy every top-level window except those marked `NO_FLUSH`, clear all roles, and
    /// drain the destroy queue. Used at level-load boundaries.
    pub fn reset(&mut self) {
        let tops: Vec<WindowId> = self
            .top_level()
            .filter(|&w| {
                self.node(w)
                    .is_some_and(|n| !n.status.contains(WindowStatus::NO_FLUSH))
            })
            .collect();
        for w in tops {
            self.destroy(w);
        }
        self.clear_roles();
        self.process_destroy_list();
    }

    /// Destroy every window, clear all roles, and release all storage.
    pub fn shutdown(&mut self) {
        let tops: Vec<WindowId> = self.top_level().collect();
        for w in tops {
            self.destroy(w);
        }
        self.clear_roles();
        self.layouts.clear();
        self.process_destroy_list();
    }

    fn clear_roles(&mut self) {
        self.modal.clear();
        self.tab_list.clear();
        self.focus = None;
        self.capture = None;
        self.mouse_over = None;
        self.drag.let_go();
    }

    // --- links ---

    fn list_ends(&self, parent: Option<WindowId>) -> (Option<WindowId>, Option<WindowId>) {
        match parent {
            None => (self.top_head, self.top_tail),
            Some(p) => self
                .node(p)
                .map(|n| (n.links.first_child, n.links.last_child))
                .unwrap_or((None, None)),
        }
    }

    fn set_head(&mut self, parent: Option<WindowId>, head: Option<WindowId>) {
        match parent {
            None => self.top_head = head,
            Some(p) => {
                if let Some(n) = self.node_mut(p) {
                    n.links.first_child = head;
                }
            }
        }
    }

    fn set_tail(&mut self, parent: Option<WindowId>, tail: Option<WindowId>) {
        match parent {
            None => self.top_tail = tail,
            Some(p) => {
                if let Some(n) = self.node_mut(p) {
                    n.links.last_child = tail;
                }
            }
        }
    }

    fn with_links(&mut self, id: WindowId, f: impl FnOnce(&mut TreeLinks)) {
        if let Some(n) = self.node_mut(id) {
            f(&mut n.links);
        }
    }

    fn is_linked(&self, id: WindowId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        node.links.prev.is_some() || self.list_ends(node.links.parent).0 == Some(id)
    }

    pub(crate) fn link_front(&mut self, parent: Option<WindowId>, id: WindowId) {
        if self.is_linked(id) {
            trace!(?id, "link: already linked");
            return;
        }
        let (head, _) = self.list_ends(parent);
        self.with_links(id, |l| {
            l.parent = parent;
            l.prev = None;
            l.next = head;
        });
        match head {
            Some(h) => self.with_links(h, |l| l.prev = Some(id)),
            None => self.set_tail(parent, Some(id)),
        }
        self.set_head(parent, Some(id));
    }

    pub(crate) fn link_back(&mut self, parent: Option<WindowId>, id: WindowId) {
        if self.is_linked(id) {
            trace!(?id, "link: already linked");
            return;
        }
        let (_, tail) = self.list_ends(parent);
        self.with_links(id, |l| {
            l.parent = parent;
            l.prev = tail;
            l.next = None;
        });
        match tail {
            Some(t) => self.with_links(t, |l| l.next = Some(id)),
            None => self.set_head(parent, Some(id)),
        }
        self.set_tail(parent, Some(id));
    }

    /// Link `id` directly in front of `anchor`, in `anchor`'s list.
    pub(crate) fn link_before(&mut self, anchor: WindowId, id: WindowId) {
        if self.is_linked(id) {
            trace!(?id, "link: already linked");
            return;
        }
        let Some(anchor_links) = self.node(anchor).map(|n| n.links) else {
            self.link_front(None, id);
            return;
        };
        self.with_links(id, |l| {
            l.parent = anchor_links.parent;
            l.prev = anchor_links.prev;
            l.next = Some(anchor);
        });
        self.with_links(anchor, |l| l.prev = Some(id));
        match anchor_links.prev {
            Some(p) => self.with_links(p, |l| l.next = Some(id)),
            None => self.set_head(anchor_links.parent, Some(id)),
        }
    }

    pub(crate) fn unlink(&mut self, id: WindowId) {
        if !self.is_linked(id) {
            return;
        }
        let Some(links) = self.node(id).map(|n| n.links) else {
            return;
        };
        match links.prev {
            Some(p) => self.with_links(p, |l| l.next = links.next),
            None => self.set_head(links.parent, links.next),
        }
        match links.next {
            Some(n) => self.with_links(n, |l| l.prev = links.prev),
            None => self.set_tail(links.parent, links.prev),
        }
        self.with_links(id, |l| {
            l.parent = None;
            l.prev = None;
            l.next = None;
        });
    }

    /// Move `id` to the front of its sibling list.
    pub fn bring_to_top(&mut self, id: WindowId) {
        if !self.is_alive(id) {
            warn!(?id, "bring_to_top: window is not alive");
            return;
        }
        let parent = self.node(id).and_then(|n| n.links.parent);
        self.unlink(id);
        match (parent, self.modal_root()) {
            (None, Some(anchor)) if anchor != id && !self.in_modal_scope(id) => {
                self.link_before(anchor, id);
            }
            _ => self.link_front(parent, id),
        }
    }

    /// Move `id` to the back of its sibling list.
    pub fn send_to_back(&mut self, id: WindowId) {
        if !self.is_alive(id) {
            warn!(?id, "send_to_back: window is not alive");
            return;
        }
        let parent = self.node(id).and_then(|n| n.links.parent);
        self.unlink(id);
        self.link_back(parent, id);
    }

    /// Re-parent `id` under `parent` (or to the top level), at the front.
    ///
    /// Refuses to create cycles or to adopt into destroyed windows.
    pub fn set_parent(&mut self, id: WindowId, parent: Option<WindowId>) -> bool {
        if !self.is_alive(id) {
            warn!(?id, "set_parent: window is not alive");
            return false;
        }
        if let Some(p) = parent {
            if !self.is_alive(p) {
                warn!(?p, "set_parent: parent is not alive");
                return false;
            }
            if p == id || self.is_ancestor(id, p) {
                warn!(?id, ?p, "set_parent: would create a cycle");
                return false;
            }
        }
        self.unlink(id);
        self.link_front(parent, id);
        true
    }

    // --- traversal ---

    /// Top-level windows, front to back.
    pub fn top_level(&self) -> Siblings<'_> {
        Siblings {
            wm: self,
            next: self.top_head,
        }
    }

    /// Front-most top-level window.
    pub fn first_window(&self) -> Option<WindowId> {
        self.top_head
    }

    /// Back-most top-level window.
    pub fn last_window(&self) -> Option<WindowId> {
        self.top_tail
    }

    /// Children of `id`, front to back.
    pub fn children(&self, id: WindowId) -> Siblings<'_> {
        Siblings {
            wm: self,
            next: self.node(id).and_then(|n| n.links.first_child),
        }
    }

    /// Parent of `id`.
    pub fn parent(&self, id: WindowId) -> Option<WindowId> {
        self.node(id).and_then(|n| n.links.parent)
    }

    /// Top-most ancestor of `id` (itself for top-level windows).
    pub fn root_of(&self, mut id: WindowId) -> WindowId {
        while let Some(p) = self.parent(id) {
            id = p;
        }
        id
    }

    /// Whether `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: WindowId, id: WindowId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Find a live window by numeric id, searching `root`'s subtree or every top-level tree.
    pub fn find_by_id(&self, root: Option<WindowId>, id: i32) -> Option<WindowId> {
        self.find(root, &|n: &WindowNode| n.inst.id == id)
    }

    /// Find a live window by name, searching `root`'s subtree or every top-level tree.
    pub fn find_by_name(&self, root: Option<WindowId>, name: &str) -> Option<WindowId> {
        self.find(root, &|n: &WindowNode| n.inst.name == name)
    }

    fn find(&self, root: Option<WindowId>, pred: &dyn Fn(&WindowNode) -> bool) -> Option<WindowId> {
        match root {
            Some(r) => self.find_in(r, pred),
            None => self.top_level().find_map(|w| self.find_in(w, pred)),
        }
    }

    fn find_in(&self, id: WindowId, pred: &dyn Fn(&WindowNode) -> bool) -> Option<WindowId> {
        let node = self.node(id)?;
        if node.is_destroyed() {
            return None;
        }
        if pred(node) {
            return Some(id);
        }
        self.children(id).find_map(|c| self.find_in(c, pred))
    }

    // --- geometry ---

    /// Parent-relative position.
    pub fn position(&self, id: WindowId) -> Option<Point> {
        self.node(id).map(|n| n.position)
    }

    /// Screen position (sum of ancestor positions).
    pub fn screen_position(&self, id: WindowId) -> Option<Point> {
        let mut pos = self.node(id)?.position;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            let node = self.node(p)?;
            pos += node.position.to_vec2();
            cur = node.links.parent;
        }
        Some(pos)
    }

    /// Screen-space region.
    pub fn screen_region(&self, id: WindowId) -> Option<Rect> {
        let size = self.node(id)?.size;
        Some(Rect::from_origin_size(self.screen_position(id)?, size))
    }

    /// Whether the screen point lies inside the window.
    pub fn contains_point(&self, id: WindowId, pt: Point) -> bool {
        self.screen_region(id).is_some_and(|r| r.contains(pt))
    }

    /// Size.
    pub fn size(&self, id: WindowId) -> Option<Size> {
        self.node(id).map(|n| n.size)
    }

    /// Set the parent-relative position.
    pub fn set_position(&mut self, id: WindowId, pos: Point) {
        match self.node_mut(id) {
            Some(n) => n.position = pos,
            None => warn!(?id, "set_position: stale window"),
        }
    }

    /// Move by `delta`.
    pub fn move_by(&mut self, id: WindowId, delta: Vec2) {
        if let Some(pos) = self.position(id) {
            self.set_position(id, pos + delta);
        }
    }

    /// Resize; sends [`SystemMsg::Resized`] to the window and [`SystemMsg::ChildResized`] to its parent.
    pub fn set_size(&mut self, id: WindowId, size: Size) {
        let Some(node) = self.node_mut(id) else {
            warn!(?id, "set_size: stale window");
            return;
        };
        node.size = size;
        let parent = node.links.parent;
        self.send_system(id, SystemMsg::Resized(size));
        if let Some(p) = parent {
            self.send_system(p, SystemMsg::ChildResized(id));
        }
    }

    // --- status ---

    /// Status bits.
    pub fn status(&self, id: WindowId) -> Option<WindowStatus> {
        self.node(id).map(|n| n.status)
    }

    /// Set status bits. `DESTROYED` cannot be set this way.
    pub fn set_status(&mut self, id: WindowId, bits: WindowStatus) {
        if let Some(n) = self.node_mut(id) {
            n.status |= bits - WindowStatus::DESTROYED;
        }
    }

    /// Clear status bits. `DESTROYED` cannot be cleared.
    pub fn clear_status(&mut self, id: WindowId, bits: WindowStatus) {
        if let Some(n) = self.node_mut(id) {
            n.status &= !(bits - WindowStatus::DESTROYED);
        }
    }

    /// Hide or show a window. Hiding drops focus held inside it.
    pub fn hide(&mut self, id: WindowId, hide: bool) {
        if hide {
            self.set_status(id, WindowStatus::HIDDEN);
            if let Some(f) = self.focus
                && (f == id || self.is_ancestor(id, f))
            {
                self.set_focus(None);
            }
        } else {
            self.clear_status(id, WindowStatus::HIDDEN);
        }
    }

    /// Enable or disable a window.
    pub fn enable(&mut self, id: WindowId, enable: bool) {
        if enable {
            self.set_status(id, WindowStatus::ENABLED);
        } else {
            self.clear_status(id, WindowStatus::ENABLED);
        }
    }

    /// Whether the window or any ancestor is hidden. Stale windows count as hidden.
    pub fn is_hidden(&self, id: WindowId) -> bool {
        let mut cur = Some(id);
        while let Some(w) = cur {
            let Some(node) = self.node(w) else {
                return true;
            };
            if node.status.contains(WindowStatus::HIDDEN) {
                return true;
            }
            cur = node.links.parent;
        }
        false
    }

    /// Whether the window is enabled.
    pub fn is_enabled(&self, id: WindowId) -> bool {
        self.node(id)
            .is_some_and(|n| n.status.contains(WindowStatus::ENABLED))
    }

    // --- instance data ---

    /// Set the label and tell the window with [`SystemMsg::SetLabel`].
    pub fn set_text(&mut self, id: WindowId, text: &str) {
        let Some(node) = self.node_mut(id) else {
            warn!(?id, "set_text: stale window");
            return;
        };
        node.inst.text = text.into();
        self.send_system(id, SystemMsg::SetLabel(text.into()));
    }

    /// Set the owner that receives bubbled notifications.
    pub fn set_owner(&mut self, id: WindowId, owner: Option<WindowId>) {
        if let Some(n) = self.node_mut(id) {
            n.inst.owner = owner;
        }
    }

    /// Replace the system handler.
    pub fn set_system_handler(&mut self, id: WindowId, handler: Option<Rc<dyn SystemHandler>>) {
        if let Some(n) = self.node_mut(id) {
            n.handlers.system = handler;
        }
    }

    /// Replace the input handler.
    pub fn set_input_handler(&mut self, id: WindowId, handler: Option<Rc<dyn InputHandler>>) {
        if let Some(n) = self.node_mut(id) {
            n.handlers.input = handler;
        }
    }

    /// Replace the draw handler.
    pub fn set_draw_handler(&mut self, id: WindowId, handler: Option<Rc<dyn DrawHandler>>) {
        if let Some(n) = self.node_mut(id) {
            n.handlers.draw = handler;
        }
    }

    /// Replace the tooltip handler.
    pub fn set_tooltip_handler(&mut self, id: WindowId, handler: Option<Rc<dyn TooltipHandler>>) {
        if let Some(n) = self.node_mut(id) {
            n.handlers.tooltip = handler;
        }
    }

    /// Store a gadget payload in the user-data slot.
    pub fn set_user_data<T: Any>(&mut self, id: WindowId, data: T) {
        if let Some(n) = self.node_mut(id) {
            n.user_data = Some(Box::new(data));
        }
    }

    /// Payload of type `T`.
    pub fn user_data<T: Any>(&self, id: WindowId) -> Option<&T> {
        self.node(id)?.user_data()
    }

    /// Mutable payload of type `T`.
    pub fn user_data_mut<T: Any>(&mut self, id: WindowId) -> Option<&mut T> {
        self.node_mut(id)?.user_data_mut()
    }

    // --- modal stack ---

    /// Push `window` onto the modal stack.
    ///
    /// While the stack is non-empty only the top modal window's tree, and top-level windows
    /// created after the push, receive pointer and keyboard input.
    pub fn set_modal(&mut self, window: WindowId) -> bool {
        if !self.is_alive(window) {
            warn!(?window, "set_modal: window is not alive");
            return false;
        }
        if self.modal.iter().any(|m| m.window == window) {
            trace!(?window, "set_modal: already modal");
            return false;
        }
        self.modal.push(ModalEntry {
            window,
            serial: self.next_serial,
        });
        true
    }

    /// Remove `window` from the modal stack.
    pub fn unset_modal(&mut self, window: WindowId) -> bool {
        match self.modal.iter().rposition(|m| m.window == window) {
            Some(idx) => {
                self.modal.remove(idx);
                true
            }
            None => {
                warn!(?window, "unset_modal: window is not modal");
                false
            }
        }
    }

    /// Top of the modal stack.
    pub fn modal_window(&self) -> Option<WindowId> {
        self.modal.last().map(|m| m.window)
    }

    pub(crate) fn modal_root(&self) -> Option<WindowId> {
        self.modal_window().map(|m| self.root_of(m))
    }

    /// Whether input may reach `id` given the modal stack.
    ///
    /// In scope are the top modal window, its descendants, and windows created after it was
    /// pushed together with their descendants. Siblings and ancestors of a nested modal window
    /// are out of scope.
    pub fn in_modal_scope(&self, id: WindowId) -> bool {
        let Some(entry) = self.modal.last() else {
            return true;
        };
        let mut cur = Some(id);
        while let Some(w) = cur {
            if w == entry.window || self.serial(w).is_some_and(|s| s > entry.serial) {
                return true;
            }
            cur = self.parent(w);
        }
        false
    }

    // --- capture ---

    /// Route every pointer event to `window` regardless of hit testing.
    pub fn set_capture(&mut self, window: Option<WindowId>) {
        if let Some(w) = window
            && !self.is_alive(w)
        {
            warn!(?w, "set_capture: window is not alive");
            return;
        }
        self.capture = window;
    }

    /// Window owning pointer capture.
    pub fn capture(&self) -> Option<WindowId> {
        self.capture.filter(|&c| self.is_alive(c))
    }

    /// Window grabbed by the left button.
    pub fn grab(&self) -> Option<WindowId> {
        self.drag.window().filter(|&g| self.is_alive(g))
    }

    /// Window under the pointer as of the last pointer event.
    pub fn mouse_over(&self) -> Option<WindowId> {
        self.mouse_over.filter(|&m| self.is_alive(m))
    }

    pub(crate) fn alloc_layout_id(&mut self) -> LayoutId {
        self.next_layout += 1;
        LayoutId(self.next_layout)
    }
}

/// Iterator over a sibling list, front to back.
#[derive(Clone, Debug)]
pub struct Siblings<'a> {
    wm: &'a WindowManager,
    next: Option<WindowId>,
}

impl Iterator for Siblings<'_> {
    type Item = WindowId;

    fn next(&mut self) -> Option<WindowId> {
        let cur = self.next?;
        self.next = self.wm.node(cur).and_then(|n| n.links.next);
        Some(cur)
    }
}
