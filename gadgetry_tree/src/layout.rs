// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window layouts: named groups of windows sharing an init/update/shutdown lifecycle.
//!
//! A layout is the usual unit of a loaded screen. Membership is stored as a second intrusive
//! chain on each window, so a window belongs to at most one layout and removal is O(1). The
//! chain headers live in the manager; a [`WindowLayout`] is a lightweight handle carrying the
//! name and callbacks.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use tracing::{debug, trace, warn};

use crate::WindowManager;
use crate::node::LayoutLink;
use crate::types::{LayoutId, WindowId, WindowStatus};

/// Lifecycle callback of a layout.
pub trait LayoutCallback {
    /// Run for `layout`.
    fn call(&self, layout: &mut WindowLayout, wm: &mut WindowManager);
}

impl<F> LayoutCallback for F
where
    F: Fn(&mut WindowLayout, &mut WindowManager),
{
    fn call(&self, layout: &mut WindowLayout, wm: &mut WindowManager) {
        self(layout, wm);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LayoutChain {
    pub(crate) head: Option<WindowId>,
    pub(crate) tail: Option<WindowId>,
    pub(crate) count: usize,
}

/// A named, ordered collection of windows.
///
/// ```
/// use kurbo::{Point, Size};
/// use gadgetry_tree::{WindowLayout, WindowManager, WindowStatus};
///
/// let mut wm = WindowManager::new(Size::new(800.0, 600.0));
/// let mut layout = WindowLayout::new(&mut wm, "Menu.wnd");
/// let w = wm
///     .create(None, WindowStatus::ENABLED, Point::ZERO, Size::new(10.0, 10.0), None, None)
///     .unwrap();
/// assert!(layout.add_window(&mut wm, w));
/// assert!(layout.add_window(&mut wm, w));
/// assert_eq!(layout.len(&wm), 1);
///
/// layout.destroy_windows(&mut wm);
/// assert_eq!(layout.len(&wm), 0);
/// ```
#[derive(Clone)]
pub struct WindowLayout {
    id: LayoutId,
    name: String,
    hidden: bool,
    /// Runs once after the layout is loaded.
    pub init: Option<Rc<dyn LayoutCallback>>,
    /// Runs every frame while the layout is active.
    pub update: Option<Rc<dyn LayoutCallback>>,
    /// Runs before the layout is torn down.
    pub shutdown: Option<Rc<dyn LayoutCallback>>,
}

impl fmt::Debug for WindowLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowLayout")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hidden", &self.hidden)
            .field("init", &self.init.is_some())
            .field("update", &self.update.is_some())
            .field("shutdown", &self.shutdown.is_some())
            .finish()
    }
}

impl WindowLayout {
    /// Register an empty layout with the manager.
    pub fn new(wm: &mut WindowManager, name: &str) -> Self {
        let id = wm.alloc_layout_id();
        wm.layouts.insert(id, LayoutChain::default());
        Self {
            id,
            name: name.into(),
            hidden: false,
            init: None,
            update: None,
            shutdown: None,
        }
    }

    /// Handle of this layout's chain.
    pub fn id(&self) -> LayoutId {
        self.id
    }

    /// Name, usually the script file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add `window` at the end of the chain.
    ///
    /// Adding a member again is a no-op. A window that belongs to another layout is refused.
    pub fn add_window(&mut self, wm: &mut WindowManager, window: WindowId) -> bool {
        wm.layout_append(self.id, window)
    }

    /// Remove `window` from the chain. Removing a non-member is a no-op.
    pub fn remove_window(&mut self, wm: &mut WindowManager, window: WindowId) -> bool {
        match wm.node(window).and_then(|n| n.layout) {
            Some(link) if link.layout == self.id => {
                wm.layout_unlink(window);
                true
            }
            _ => false,
        }
    }

    /// Number of member windows.
    pub fn len(&self, wm: &WindowManager) -> usize {
        wm.layouts.get(&self.id).map_or(0, |c| c.count)
    }

    /// Returns `true` if the layout has no members.
    pub fn is_empty(&self, wm: &WindowManager) -> bool {
        self.len(wm) == 0
    }

    /// First member in chain order.
    pub fn first_window(&self, wm: &WindowManager) -> Option<WindowId> {
        wm.layouts.get(&self.id).and_then(|c| c.head)
    }

    /// Members in chain order.
    pub fn windows(&self, wm: &WindowManager) -> Vec<WindowId> {
        let mut out = Vec::with_capacity(self.len(wm));
        let mut cur = self.first_window(wm);
        while let Some(w) = cur {
            out.push(w);
            cur = wm.node(w).and_then(|n| n.layout).and_then(|l| l.next);
        }
        out
    }

    /// Find a member, or a descendant of a member, by name.
    pub fn find_window(&self, wm: &WindowManager, name: &str) -> Option<WindowId> {
        self.windows(wm)
            .into_iter()
            .find_map(|w| wm.find_by_name(Some(w), name))
    }

    /// Whether [`hide`](Self::hide) was last called with `true`.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hide or show every member.
    pub fn hide(&mut self, wm: &mut WindowManager, hide: bool) {
        for w in self.windows(wm) {
            wm.hide(w, hide);
        }
        self.hidden = hide;
    }

    /// Bring every member to the front, keeping their relative order.
    pub fn bring_forward(&self, wm: &mut WindowManager) {
        let mut members = self.windows(wm);
        // Linking at the front reverses order, so walk back to front.
        members.reverse();
        for w in members {
            if wm.parent(w).is_none() {
                wm.bring_to_top(w);
            }
        }
    }

    /// Destroy every member.
    pub fn destroy_windows(&mut self, wm: &mut WindowManager) {
        for w in self.windows(wm) {
            wm.destroy(w);
        }
        debug!(layout = %self.name, "layout windows destroyed");
    }

    /// Run the init callback.
    pub fn run_init(&mut self, wm: &mut WindowManager) {
        if let Some(cb) = self.init.clone() {
            cb.call(self, wm);
        }
    }

    /// Run the update callback.
    pub fn run_update(&mut self, wm: &mut WindowManager) {
        if let Some(cb) = self.update.clone() {
            cb.call(self, wm);
        }
    }

    /// Run the shutdown callback.
    pub fn run_shutdown(&mut self, wm: &mut WindowManager) {
        if let Some(cb) = self.shutdown.clone() {
            cb.call(self, wm);
        }
    }

    /// Detach every member and unregister the chain. The windows themselves are kept.
    pub fn release(self, wm: &mut WindowManager) {
        for w in self.windows(wm) {
            wm.layout_unlink(w);
        }
        wm.layouts.remove(&self.id);
    }
}

impl WindowManager {
    pub(crate) fn layout_append(&mut self, layout: LayoutId, window: WindowId) -> bool {
        if !self.layouts.contains_key(&layout) {
            warn!(?layout, "add_window: layout was released");
            return false;
        }
        let Some(node) = self.node(window) else {
            warn!(?window, "add_window: stale window");
            return false;
        };
        if node.status.contains(WindowStatus::DESTROYED) {
            warn!(?window, "add_window: window is destroyed");
            return false;
        }
        match node.layout {
            Some(link) if link.layout == layout => {
                trace!(?window, "add_window: already a member");
                return true;
            }
            Some(link) => {
                warn!(?window, other = ?link.layout, "add_window: window belongs to another layout");
                return false;
            }
            None => {}
        }

        let Some(chain) = self.layouts.get_mut(&layout) else {
            return false;
        };
        let tail = chain.tail;
        chain.tail = Some(window);
        if chain.head.is_none() {
            chain.head = Some(window);
        }
        chain.count += 1;
        if let Some(t) = tail
            && let Some(n) = self.node_mut(t)
            && let Some(l) = n.layout.as_mut()
        {
            l.next = Some(window);
        }
        if let Some(n) = self.node_mut(window) {
            n.layout = Some(LayoutLink {
                layout,
                prev: tail,
                next: None,
            });
        }
        true
    }

    pub(crate) fn layout_unlink(&mut self, window: WindowId) {
        let Some(link) = self.node_mut(window).and_then(|n| n.layout.take()) else {
            return;
        };
        match link.prev {
            Some(p) => {
                if let Some(l) = self.node_mut(p).and_then(|n| n.layout.as_mut()) {
                    l.next = link.next;
                }
            }
            None => {
                if let Some(c) = self.layouts.get_mut(&link.layout) {
                    c.head = link.next;
                }
            }
        }
        match link.next {
            Some(n) => {
                if let Some(l) = self.node_mut(n).and_then(|n| n.layout.as_mut()) {
                    l.prev = link.prev;
                }
            }
            None => {
                if let Some(c) = self.layouts.get_mut(&link.layout) {
                    c.tail = link.prev;
                }
            }
        }
        if let Some(c) = self.layouts.get_mut(&link.layout) {
            c.count = c.count.saturating_sub(1);
        }
    }
}
