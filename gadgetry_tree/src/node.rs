// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window node: geometry, status, instance data, handler slots and tree links.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use kurbo::{Point, Rect, Size, Vec2};

use crate::handler::Handlers;
use crate::types::{
    DrawData, FontDesc, LayoutId, TextColors, WindowId, WindowState, WindowStatus, WindowStyle,
};

/// Per-window data that is independent of the gadget kind.
///
/// The layout script fills this from the fields of a `WINDOW` block; code that builds
/// windows by hand starts from [`InstanceData::default`].
#[derive(Clone, Debug, Default)]
pub struct InstanceData {
    /// Numeric id derived from [`name`](Self::name); see [`WindowManager::name_to_id`](crate::WindowManager::name_to_id).
    pub id: i32,
    /// Decorated name, e.g. `"MainMenu.wnd:ButtonQuit"`.
    pub name: String,
    /// Kind and behavior bits.
    pub style: WindowStyle,
    /// Gadget interaction sub-bits.
    pub state: WindowState,
    /// Receiver of bubbled notifications. Defaults to the parent at creation.
    pub owner: Option<WindowId>,
    /// Label.
    pub text: String,
    /// Tooltip text.
    pub tooltip: Option<String>,
    /// Tooltip delay in milliseconds, `-1` for the renderer default.
    pub tooltip_delay: i32,
    /// Font request.
    pub font: Option<FontDesc>,
    /// Named header template.
    pub header_template: Option<String>,
    /// Draw data used while enabled.
    pub enabled_draw: Vec<DrawData>,
    /// Draw data used while disabled.
    pub disabled_draw: Vec<DrawData>,
    /// Draw data used while hilited.
    pub hilite_draw: Vec<DrawData>,
    /// Text colors per state.
    pub text_colors: TextColors,
    /// Offset applied to images.
    pub image_offset: Vec2,
}

impl InstanceData {
    /// Draw data entry `index` for the given state, falling back to the enabled list.
    pub fn draw_data(&self, enabled: bool, hilited: bool, index: usize) -> Option<&DrawData> {
        let list = if !enabled {
            &self.disabled_draw
        } else if hilited {
            &self.hilite_draw
        } else {
            &self.enabled_draw
        };
        list.get(index).or_else(|| self.enabled_draw.get(index))
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct TreeLinks {
    pub(crate) parent: Option<WindowId>,
    /// Toward the front.
    pub(crate) prev: Option<WindowId>,
    /// Toward the back.
    pub(crate) next: Option<WindowId>,
    pub(crate) first_child: Option<WindowId>,
    pub(crate) last_child: Option<WindowId>,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct LayoutLink {
    pub(crate) layout: LayoutId,
    pub(crate) prev: Option<WindowId>,
    pub(crate) next: Option<WindowId>,
}

/// One window of the tree.
///
/// Nodes live in the [`WindowManager`](crate::WindowManager) arena and are addressed by
/// [`WindowId`]. Geometry and links are changed through the manager so that notifications
/// and tree invariants stay consistent; instance data and the user-data payload can be
/// edited directly.
pub struct WindowNode {
    pub(crate) links: TreeLinks,
    pub(crate) layout: Option<LayoutLink>,
    pub(crate) position: Point,
    pub(crate) size: Size,
    pub(crate) hot_spot: Vec2,
    pub(crate) status: WindowStatus,
    pub(crate) handlers: Handlers,
    pub(crate) inst: InstanceData,
    pub(crate) user_data: Option<Box<dyn Any>>,
}

impl WindowNode {
    pub(crate) fn new(status: WindowStatus, position: Point, size: Size, inst: InstanceData) -> Self {
        Self {
            links: TreeLinks::default(),
            layout: None,
            position,
            size,
            hot_spot: Vec2::ZERO,
            status,
            handlers: Handlers::default(),
            inst,
            user_data: None,
        }
    }

    /// Position relative to the parent (or the screen for top-level windows).
    pub fn position(&self) -> Point {
        self.position
    }

    /// Size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Parent-relative region.
    pub fn region(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Offset of the cursor inside the window recorded when a drag began.
    pub fn hot_spot(&self) -> Vec2 {
        self.hot_spot
    }

    /// Status bits.
    pub fn status(&self) -> WindowStatus {
        self.status
    }

    /// Style bits.
    pub fn style(&self) -> WindowStyle {
        self.inst.style
    }

    /// Gadget sub-bits.
    pub fn state(&self) -> WindowState {
        self.inst.state
    }

    /// Mutable gadget sub-bits.
    pub fn state_mut(&mut self) -> &mut WindowState {
        &mut self.inst.state
    }

    /// Label.
    pub fn text(&self) -> &str {
        &self.inst.text
    }

    /// Instance data.
    pub fn instance(&self) -> &InstanceData {
        &self.inst
    }

    /// Mutable instance data.
    pub fn instance_mut(&mut self) -> &mut InstanceData {
        &mut self.inst
    }

    /// Owner receiving bubbled notifications.
    pub fn owner(&self) -> Option<WindowId> {
        self.inst.owner
    }

    /// Parent window.
    pub fn parent(&self) -> Option<WindowId> {
        self.links.parent
    }

    /// Next sibling toward the back.
    pub fn next_sibling(&self) -> Option<WindowId> {
        self.links.next
    }

    /// Previous sibling toward the front.
    pub fn prev_sibling(&self) -> Option<WindowId> {
        self.links.prev
    }

    /// Front-most child.
    pub fn first_child(&self) -> Option<WindowId> {
        self.links.first_child
    }

    /// Back-most child.
    pub fn last_child(&self) -> Option<WindowId> {
        self.links.last_child
    }

    /// Layout this window belongs to.
    pub fn layout(&self) -> Option<LayoutId> {
        self.layout.map(|l| l.layout)
    }

    /// Handler slots.
    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// Payload of type `T`, if the user-data slot holds one.
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref()?.downcast_ref()
    }

    /// Mutable payload of type `T`, if the user-data slot holds one.
    pub fn user_data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.user_data.as_deref_mut()?.downcast_mut()
    }

    /// Replace the user-data payload, returning the previous one.
    pub fn set_user_data(&mut self, data: Option<Box<dyn Any>>) -> Option<Box<dyn Any>> {
        core::mem::replace(&mut self.user_data, data)
    }

    /// Whether the window is destroyed (unlinked and waiting to be freed).
    pub fn is_destroyed(&self) -> bool {
        self.status.contains(WindowStatus::DESTROYED)
    }
}

impl fmt::Debug for WindowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowNode")
            .field("name", &self.inst.name)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("status", &self.status)
            .field("style", &self.inst.style)
            .field("parent", &self.links.parent)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}
