// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named callbacks that scripts refer to.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use gadgetry_tree::{DrawHandler, InputHandler, LayoutCallback, SystemHandler, TooltipHandler};
use hashbrown::HashMap;
use tracing::debug;

/// Script value meaning "no callback".
const NONE_NAME: &str = "[None]";

/// Maps the callback names used in scripts to handlers.
///
/// Lookups of `[None]` yield nothing without complaint. Lookups of an unregistered name also
/// yield nothing, so the window keeps its default handler.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    system: HashMap<String, Rc<dyn SystemHandler>>,
    input: HashMap<String, Rc<dyn InputHandler>>,
    tooltip: HashMap<String, Rc<dyn TooltipHandler>>,
    draw: HashMap<String, Rc<dyn DrawHandler>>,
    layout: HashMap<String, Rc<dyn LayoutCallback>>,
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("system", &self.system.len())
            .field("input", &self.input.len())
            .field("tooltip", &self.tooltip.len())
            .field("draw", &self.draw.len())
            .field("layout", &self.layout.len())
            .finish()
    }
}

fn lookup<T: ?Sized>(map: &HashMap<String, Rc<T>>, what: &str, name: &str) -> Option<Rc<T>> {
    if name.eq_ignore_ascii_case(NONE_NAME) {
        return None;
    }
    let found = map.get(name).cloned();
    if found.is_none() {
        debug!(what, name, "unregistered callback");
    }
    found
}

impl CallbackRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system handler under `name`, replacing any previous one.
    pub fn register_system(&mut self, name: &str, handler: Rc<dyn SystemHandler>) {
        self.system.insert(name.into(), handler);
    }

    /// Register an input handler under `name`.
    pub fn register_input(&mut self, name: &str, handler: Rc<dyn InputHandler>) {
        self.input.insert(name.into(), handler);
    }

    /// Register a tooltip handler under `name`.
    pub fn register_tooltip(&mut self, name: &str, handler: Rc<dyn TooltipHandler>) {
        self.tooltip.insert(name.into(), handler);
    }

    /// Register a draw handler under `name`.
    pub fn register_draw(&mut self, name: &str, handler: Rc<dyn DrawHandler>) {
        self.draw.insert(name.into(), handler);
    }

    /// Register a layout lifecycle callback under `name`.
    pub fn register_layout(&mut self, name: &str, callback: Rc<dyn LayoutCallback>) {
        self.layout.insert(name.into(), callback);
    }

    /// System handler registered as `name`.
    pub fn system(&self, name: &str) -> Option<Rc<dyn SystemHandler>> {
        lookup(&self.system, "system", name)
    }

    /// Input handler registered as `name`.
    pub fn input(&self, name: &str) -> Option<Rc<dyn InputHandler>> {
        lookup(&self.input, "input", name)
    }

    /// Tooltip handler registered as `name`.
    pub fn tooltip(&self, name: &str) -> Option<Rc<dyn TooltipHandler>> {
        lookup(&self.tooltip, "tooltip", name)
    }

    /// Draw handler registered as `name`.
    pub fn draw(&self, name: &str) -> Option<Rc<dyn DrawHandler>> {
        lookup(&self.draw, "draw", name)
    }

    /// Layout callback registered as `name`.
    pub fn layout(&self, name: &str) -> Option<Rc<dyn LayoutCallback>> {
        lookup(&self.layout, "layout", name)
    }
}
