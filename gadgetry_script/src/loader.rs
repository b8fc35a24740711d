// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns parsed statements into windows.

use alloc::string::String;
use alloc::vec::Vec;

use gadgetry_gadgets::{GadgetData, GadgetKind, build_gadget};
use gadgetry_tree::{
    DrawData, InstanceData, SystemMsg, WindowId, WindowLayout, WindowManager, WindowStatus,
    WindowStyle,
};
use kurbo::{Point, Size};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::error::{LoadError, LoadErrorKind};
use crate::parser::{DrawState, Field, Parser, ScreenRect, Slot, Statement};
use crate::registry::CallbackRegistry;

/// Deepest `WINDOW` nesting a script may use.
pub const MAX_DEPTH: usize = 10;

/// Where and at what resolution a script is instantiated.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LoadOptions {
    /// Parent of the script's top-level windows; `None` links them at the top level.
    pub parent: Option<WindowId>,
    /// Resolution to rescale to. Defaults to the manager's display size.
    pub display_size: Option<Size>,
}

/// Fields collected for one `WINDOW` block.
#[derive(Clone, Debug, Default)]
struct PendingWindow {
    kind: Option<Option<GadgetKind>>,
    rect: Option<ScreenRect>,
    status: WindowStatus,
    inst: InstanceData,
    data: Option<GadgetData>,
    system: Option<String>,
    input: Option<String>,
    tooltip: Option<String>,
    draw: Option<String>,
}

#[derive(Debug)]
struct Block {
    pending: PendingWindow,
    window: Option<WindowId>,
    in_children: bool,
}

fn state_list(inst: &mut InstanceData, state: DrawState) -> &mut Vec<DrawData> {
    match state {
        DrawState::Enabled => &mut inst.enabled_draw,
        DrawState::Disabled => &mut inst.disabled_draw,
        DrawState::Hilite => &mut inst.hilite_draw,
    }
}

/// Apply a look field that may also appear outside a window as a default.
///
/// Returns the field back if it is not one of those.
fn apply_look(inst: &mut InstanceData, field: Field) -> Result<(), Field> {
    match field {
        Field::Font(font) => inst.font = Some(font),
        Field::TextColor(colors) => inst.text_colors = colors,
        Field::Color(state, color, border) => {
            let list = state_list(inst, state);
            if list.is_empty() {
                list.push(DrawData::default());
            }
            list[0].color = color;
            list[0].border_color = border;
        }
        Field::TextStateColor(state, color, border) => {
            let c = &mut inst.text_colors;
            let (text, text_border) = match state {
                DrawState::Enabled => (&mut c.enabled, &mut c.enabled_border),
                DrawState::Disabled => (&mut c.disabled, &mut c.disabled_border),
                DrawState::Hilite => (&mut c.hilite, &mut c.hilite_border),
            };
            *text = color;
            *text_border = border;
        }
        other => return Err(other),
    }
    Ok(())
}

impl PendingWindow {
    fn apply(&mut self, field: Field) {
        let Err(field) = apply_look(&mut self.inst, field) else {
            return;
        };
        match field {
            Field::WindowType(kind) => self.kind = Some(kind),
            Field::ScreenRect(rect) => self.rect = Some(rect),
            Field::Name(name) => self.inst.name = name,
            Field::Status(status) => self.status = status,
            Field::Style(style) => self.inst.style = style,
            Field::Text(text) => self.inst.text = text,
            Field::TooltipText(text) => self.inst.tooltip = Some(text),
            Field::TooltipDelay(delay) => self.inst.tooltip_delay = delay,
            Field::HeaderTemplate(name) => self.inst.header_template = Some(name),
            Field::Callback(slot, name) => {
                let target = match slot {
                    Slot::System => &mut self.system,
                    Slot::Input => &mut self.input,
                    Slot::Tooltip => &mut self.tooltip,
                    Slot::Draw => &mut self.draw,
                };
                *target = Some(name);
            }
            Field::DrawData(state, list) => *state_list(&mut self.inst, state) = list,
            Field::Data(data) => self.data = Some(data),
            Field::Font(_) | Field::TextColor(_) | Field::Color(..) | Field::TextStateColor(..) => {}
        }
    }
}

/// Map an authored coordinate to the live resolution, truncating toward zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "rescaled coordinates are whole pixels well inside i32"
)]
fn rescale(coord: i32, live: f64, authored: i32) -> f64 {
    if authored <= 0 {
        return f64::from(coord);
    }
    let scale = live / f64::from(authored);
    f64::from((f64::from(coord) * scale) as i32)
}

struct Loader<'r> {
    registry: &'r CallbackRegistry,
    options: LoadOptions,
    display: Size,
    layout: WindowLayout,
    defaults: InstanceData,
    stack: SmallVec<[Block; 4]>,
}

impl Loader<'_> {
    fn statement(
        &mut self,
        wm: &mut WindowManager,
        line: usize,
        statement: Statement,
    ) -> Result<(), LoadError> {
        let misplaced = |what| LoadError::new(line, LoadErrorKind::Misplaced(what));
        let open = self.stack.last().map(|b| !b.in_children);
        match statement {
            Statement::Version(v) => {
                if !(1..=2).contains(&v) {
                    return Err(LoadError::new(line, LoadErrorKind::UnsupportedVersion(v)));
                }
            }
            Statement::LayoutBlock {
                init,
                update,
                shutdown,
            } => {
                if open.is_some() {
                    return Err(misplaced("layout block"));
                }
                let registry = self.registry;
                let resolve = |name: Option<String>| name.and_then(|n| registry.layout(&n));
                self.layout.init = resolve(init);
                self.layout.update = resolve(update);
                self.layout.shutdown = resolve(shutdown);
            }
            Statement::Window => {
                if open == Some(true) {
                    return Err(misplaced("WINDOW inside an open window"));
                }
                if self.stack.len() >= MAX_DEPTH {
                    return Err(LoadError::new(line, LoadErrorKind::NestingTooDeep));
                }
                self.stack.push(Block {
                    pending: PendingWindow {
                        inst: self.defaults.clone(),
                        ..PendingWindow::default()
                    },
                    window: None,
                    in_children: false,
                });
            }
            Statement::Field(field) => match (open, self.stack.last_mut()) {
                (Some(true), Some(block)) => block.pending.apply(field),
                _ => {
                    if apply_look(&mut self.defaults, field).is_err() {
                        return Err(misplaced("field outside a window"));
                    }
                }
            },
            Statement::Child => {
                if open != Some(true) {
                    return Err(misplaced("CHILD"));
                }
                self.create_top(wm, line)?;
                if let Some(block) = self.stack.last_mut() {
                    block.in_children = true;
                }
            }
            Statement::EndAllChildren => match self.stack.last_mut() {
                Some(block) if block.in_children => block.in_children = false,
                _ => return Err(misplaced("ENDALLCHILDREN")),
            },
            Statement::End => {
                if open != Some(true) {
                    return Err(misplaced("END"));
                }
                let window = self.create_top(wm, line)?;
                self.stack.pop();
                wm.send_system(window, SystemMsg::ScriptCreate);
            }
        }
        Ok(())
    }

    /// Create the innermost block's window unless it already exists.
    fn create_top(&mut self, wm: &mut WindowManager, line: usize) -> Result<WindowId, LoadError> {
        let depth = self.stack.len();
        let Some(block) = self.stack.last() else {
            return Err(LoadError::new(line, LoadErrorKind::Misplaced("END")));
        };
        if let Some(window) = block.window {
            return Ok(window);
        }
        let pending = block.pending.clone();
        let script_parent = depth
            .checked_sub(2)
            .and_then(|i| self.stack.get(i))
            .and_then(|b| b.window);
        let parent = script_parent.or(self.options.parent);

        let window = self.create(wm, parent, pending, line)?;
        self.layout.add_window(wm, window);
        if let Some(block) = self.stack.last_mut() {
            block.window = Some(window);
        }
        Ok(window)
    }

    fn create(
        &self,
        wm: &mut WindowManager,
        parent: Option<WindowId>,
        pending: PendingWindow,
        line: usize,
    ) -> Result<WindowId, LoadError> {
        let rect = pending
            .rect
            .ok_or_else(|| LoadError::new(line, LoadErrorKind::Expected("SCREENRECT")))?;
        let (w, h) = (self.display.width, self.display.height);
        let left = rescale(rect.left, w, rect.width);
        let top = rescale(rect.top, h, rect.height);
        let right = rescale(rect.right, w, rect.width);
        let bottom = rescale(rect.bottom, h, rect.height);
        let mut origin = Point::new(left, top);
        if let Some(p) = parent.and_then(|p| wm.screen_position(p)) {
            origin -= p.to_vec2();
        }
        let size = Size::new((right - left).max(0.0), (bottom - top).max(0.0));

        let mut inst = pending.inst;
        let kind = match pending.kind {
            Some(kind) => kind,
            None => GadgetKind::from_style(inst.style),
        };
        let created = match kind {
            Some(kind) => {
                inst.style.remove(WindowStyle::GADGET_MASK);
                inst.style |= kind.style();
                let data = match pending.data {
                    Some(data) if data.kind(inst.style) == kind => data,
                    Some(data) => {
                        warn!(line, ?kind, ?data, "gadget data does not match window type");
                        GadgetData::for_kind(kind)
                    }
                    None => GadgetData::for_kind(kind),
                };
                build_gadget(wm, parent, pending.status, origin, size, inst, data)
            }
            None => wm.create(parent, pending.status, origin, size, None, Some(inst)),
        };
        let window = created.ok_or_else(|| LoadError::new(line, LoadErrorKind::CreateFailed))?;

        let reg = self.registry;
        if let Some(h) = pending.system.as_deref().and_then(|n| reg.system(n)) {
            wm.set_system_handler(window, Some(h));
        }
        if let Some(h) = pending.input.as_deref().and_then(|n| reg.input(n)) {
            wm.set_input_handler(window, Some(h));
        }
        if let Some(h) = pending.tooltip.as_deref().and_then(|n| reg.tooltip(n)) {
            wm.set_tooltip_handler(window, Some(h));
        }
        if let Some(h) = pending.draw.as_deref().and_then(|n| reg.draw(n)) {
            wm.set_draw_handler(window, Some(h));
        }
        trace!(?window, ?parent, ?kind, "script window created");
        Ok(window)
    }
}

/// Instantiate the windows described by `source`.
///
/// `name` becomes the layout's name. Every window of the script joins the returned layout in
/// creation order, a parent ahead of its children. Each window is sent
/// [`SystemMsg::ScriptCreate`] when its `END` is reached, after its children exist.
///
/// On failure the windows created so far are left alive and the top-level ones are listed in
/// [`LoadError::partial`].
pub fn load_layout(
    wm: &mut WindowManager,
    registry: &CallbackRegistry,
    source: &str,
    name: &str,
    options: &LoadOptions,
) -> Result<WindowLayout, LoadError> {
    let mut loader = Loader {
        registry,
        options: *options,
        display: options.display_size.unwrap_or_else(|| wm.display_size()),
        layout: WindowLayout::new(wm, name),
        defaults: InstanceData::default(),
        stack: SmallVec::new(),
    };
    let mut parser = Parser::new(source);
    let result = loop {
        match parser.next_statement() {
            Ok(Some((line, statement))) => {
                if let Err(e) = loader.statement(wm, line, statement) {
                    break Err(e);
                }
            }
            Ok(None) if loader.stack.is_empty() => break Ok(()),
            Ok(None) => break Err(LoadError::new(parser.line(), LoadErrorKind::UnexpectedEof)),
            Err(e) => break Err(e),
        }
    };

    let layout = loader.layout;
    match result {
        Ok(()) => {
            debug!(layout = name, windows = layout.len(wm), "layout loaded");
            Ok(layout)
        }
        Err(mut e) => {
            warn!(layout = name, line = e.line, kind = %e.kind, "layout load failed");
            let top = loader.options.parent;
            e.partial = layout
                .windows(wm)
                .into_iter()
                .filter(|&w| wm.parent(w) == top)
                .collect();
            layout.release(wm);
            Err(e)
        }
    }
}

/// Read and instantiate a layout file. The layout is named after the file.
#[cfg(feature = "std")]
pub fn load_layout_file(
    wm: &mut WindowManager,
    registry: &CallbackRegistry,
    path: impl AsRef<std::path::Path>,
    options: &LoadOptions,
) -> Result<WindowLayout, LoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .map_err(|e| LoadError::new(0, LoadErrorKind::Io(e.kind())))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    load_layout(wm, registry, &source, &name, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_truncates_per_axis() {
        assert_eq!(rescale(333, 800.0, 800), 333.0);
        assert_eq!(rescale(333, 1024.0, 800), 426.0);
        assert_eq!(rescale(-5, 400.0, 800), -2.0);
        assert_eq!(rescale(7, 640.0, 0), 7.0);
    }

    #[test]
    fn closest_look_field_wins() {
        let mut inst = InstanceData::default();
        let red = gadgetry_tree::make_color(255, 0, 0, 255);
        let blue = gadgetry_tree::make_color(0, 0, 255, 255);
        apply_look(&mut inst, Field::TextStateColor(DrawState::Hilite, red, blue)).unwrap();
        assert_eq!(inst.text_colors.hilite, red);
        assert_eq!(inst.text_colors.hilite_border, blue);

        apply_look(&mut inst, Field::Color(DrawState::Disabled, blue, red)).unwrap();
        apply_look(&mut inst, Field::Color(DrawState::Disabled, red, red)).unwrap();
        assert_eq!(inst.disabled_draw.len(), 1);
        assert_eq!(inst.disabled_draw[0].color, red);

        assert!(apply_look(&mut inst, Field::Name("x".into())).is_err());
    }
}
