// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stock draw handlers.
//!
//! These draw every gadget kind with flat fills, outlines and text through the [`Painter`]
//! vocabulary, using the window's per-state [`DrawData`](gadgetry_tree::DrawData) and text
//! colors. Entry 0 of the draw data is the body; gadgets with a second part (slider thumb,
//! check mark, progress fill, selected rows) use entry 1.

use alloc::rc::Rc;

use gadgetry_tree::{
    DrawHandler, InstanceData, Painter, WindowFactory, WindowId, WindowManager, WindowState,
    WindowStyle,
};
use kurbo::{Rect, Size};
use peniko::Color;

use crate::common::{GadgetKind, state};
use crate::{combo_box, list_box, progress_bar, slider, static_text, tab_control, text_entry};

struct Frame<'a> {
    rect: Rect,
    inst: &'a InstanceData,
    enabled: bool,
    hilited: bool,
}

impl<'a> Frame<'a> {
    fn new(wm: &'a WindowManager, window: WindowId) -> Option<Self> {
        let node = wm.window(window)?;
        Some(Self {
            rect: wm.screen_region(window)?,
            inst: node.instance(),
            enabled: wm.is_enabled(window),
            hilited: node.state().contains(WindowState::HILITED),
        })
    }

    fn text_color(&self) -> Color {
        let colors = &self.inst.text_colors;
        if !self.enabled {
            colors.disabled
        } else if self.hilited {
            colors.hilite
        } else {
            colors.enabled
        }
    }

    fn part(&self, painter: &mut dyn Painter, index: usize, rect: Rect, hilited: bool) {
        let Some(data) = self.inst.draw_data(self.enabled, hilited, index) else {
            return;
        };
        match &data.image {
            Some(image) => painter.draw_image(image, rect + self.inst.image_offset, data.color),
            None => painter.fill_rect(rect, data.color),
        }
        painter.open_rect(rect, 1.0, data.border_color);
    }

    fn label(&self, painter: &mut dyn Painter, text: &str, rect: Rect) {
        if !text.is_empty() {
            painter.draw_text(text, rect, self.text_color(), self.inst.font.as_ref());
        }
    }
}

/// Stock draw handler for one gadget kind, or for plain user windows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StockDraw {
    /// Kind drawn, `None` for user windows.
    pub kind: Option<GadgetKind>,
}

impl DrawHandler for StockDraw {
    fn draw(&self, wm: &WindowManager, window: WindowId, painter: &mut dyn Painter) {
        let Some(f) = Frame::new(wm, window) else {
            return;
        };
        let selected = state(wm, window).contains(WindowState::SELECTED);
        match self.kind {
            None => f.part(painter, 0, f.rect, f.hilited),
            Some(GadgetKind::PushButton) => {
                f.part(painter, 0, f.rect, f.hilited || selected);
                f.label(painter, &f.inst.text, f.rect);
            }
            Some(GadgetKind::CheckBox | GadgetKind::RadioButton) => {
                let side = f.rect.height();
                let mark = Rect::from_origin_size(f.rect.origin(), Size::new(side, side));
                f.part(painter, 0, mark, f.hilited);
                if selected {
                    f.part(painter, 1, mark.inset(-side / 4.0), f.hilited);
                }
                let text = Rect::new(mark.x1 + 2.0, f.rect.y0, f.rect.x1, f.rect.y1);
                f.label(painter, &f.inst.text, text);
            }
            Some(GadgetKind::HorzSlider | GadgetKind::VertSlider) => {
                f.part(painter, 0, f.rect, false);
                if let Some(thumb) = slider::thumb_rect(wm, window) {
                    f.part(painter, 1, thumb, f.hilited);
                }
            }
            Some(GadgetKind::ListBox) => draw_list(wm, window, &f, painter),
            Some(GadgetKind::ComboBox) => {
                f.part(painter, 0, f.rect, f.hilited);
                f.label(painter, &f.inst.text, f.rect);
                if combo_box::is_dropped(wm, window)
                    && let Some(list) = combo_box::drop_rect(wm, window)
                {
                    f.part(painter, 1, list, false);
                    let row_h = list.height() / combo_box::entries(wm, window).len().max(1) as f64;
                    for (i, entry) in combo_box::entries(wm, window).iter().enumerate() {
                        let y = list.y0 + i as f64 * row_h;
                        if y >= list.y1 {
                            break;
                        }
                        f.label(painter, entry, Rect::new(list.x0, y, list.x1, y + row_h));
                    }
                }
            }
            Some(GadgetKind::TabControl) => draw_tabs(wm, window, &f, painter),
            Some(GadgetKind::TextEntry) => {
                f.part(painter, 0, f.rect, f.hilited);
                f.label(painter, &text_entry::display_text(wm, window), f.rect);
            }
            Some(GadgetKind::StaticText) => {
                f.part(painter, 0, f.rect, false);
                let rect = if static_text::is_centered(wm, window) {
                    f.rect
                } else {
                    Rect::new(f.rect.x0 + 2.0, f.rect.y0, f.rect.x1, f.rect.y1)
                };
                f.label(painter, &f.inst.text, rect);
            }
            Some(GadgetKind::ProgressBar) => {
                f.part(painter, 0, f.rect, false);
                let percent = progress_bar::progress(wm, window).unwrap_or(0);
                if percent > 0 {
                    let width = f.rect.width() * f64::from(percent) / 100.0;
                    let fill = Rect::from_origin_size(f.rect.origin(), Size::new(width, f.rect.height()));
                    f.part(painter, 1, fill, false);
                }
            }
        }
    }
}

fn draw_list(wm: &WindowManager, window: WindowId, f: &Frame<'_>, painter: &mut dyn Painter) {
    f.part(painter, 0, f.rect, false);
    let Some(data) = wm.user_data::<list_box::ListBoxData>(window) else {
        return;
    };
    let mut y = f.rect.y0;
    for (row_index, row) in data.rows.iter().enumerate().skip(data.display_top) {
        if y + data.row_height > f.rect.y1 {
            break;
        }
        let row_rect = Rect::new(f.rect.x0, y, f.rect.x1, y + data.row_height);
        if data.selections.contains(&row_index) {
            f.part(painter, 1, row_rect, true);
        }
        let mut x = f.rect.x0;
        for (col, cell) in row.iter().enumerate() {
            let width = data
                .column_widths
                .get(col)
                .copied()
                .unwrap_or(f.rect.width());
            if !cell.text.is_empty() {
                painter.draw_text(
                    &cell.text,
                    Rect::new(x, y, x + width, y + data.row_height),
                    cell.color,
                    f.inst.font.as_ref(),
                );
            }
            x += width;
        }
        y += data.row_height;
    }
}

fn draw_tabs(wm: &WindowManager, window: WindowId, f: &Frame<'_>, painter: &mut dyn Painter) {
    let Some(data) = wm.user_data::<tab_control::TabControlData>(window) else {
        return;
    };
    let offset = f.rect.origin().to_vec2();
    for i in 0..data.tab_count.min(tab_control::MAX_TAB_PANES) {
        let Some(tab) = data.tab_rect(i) else {
            continue;
        };
        let active = i == data.active_tab;
        if data.disabled[i] {
            if let Some(d) = f.inst.draw_data(false, false, 0) {
                painter.fill_rect(tab + offset, d.color);
            }
        } else {
            f.part(painter, 0, tab + offset, active);
        }
    }
    if data.pane_border > 0.0 {
        let pane = data.pane_rect + offset;
        let color = f
            .inst
            .draw_data(f.enabled, false, 1)
            .map_or(Color::TRANSPARENT, |d| d.border_color);
        painter.open_rect(pane, data.pane_border, color);
    }
}

/// Renderer factory that hands out [`StockDraw`] handlers by style.
#[derive(Copy, Clone, Debug, Default)]
pub struct StockDrawFactory;

impl StockDrawFactory {
    /// Shared factory ready for [`WindowManager::set_factory`].
    pub fn shared() -> Rc<dyn WindowFactory> {
        Rc::new(Self)
    }
}

impl WindowFactory for StockDrawFactory {
    fn default_draw(&self, style: WindowStyle) -> Option<Rc<dyn DrawHandler>> {
        Some(Rc::new(StockDraw {
            kind: GadgetKind::from_style(style),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gadgetry_tree::{DrawData, PaintOp, Recorder, WindowStatus, make_color};
    use kurbo::Point;

    #[test]
    fn progress_bar_fill_tracks_percent() {
        let mut wm = WindowManager::new(Size::new(800.0, 600.0));
        wm.set_factory(Some(StockDrawFactory::shared()));
        let inst = InstanceData {
            enabled_draw: alloc::vec![
                DrawData::default(),
                DrawData {
                    color: make_color(0, 255, 0, 255),
                    ..DrawData::default()
                },
            ],
            ..InstanceData::default()
        };
        let bar = crate::create_gadget(
            &mut wm,
            None,
            WindowStatus::ENABLED,
            Point::new(10.0, 10.0),
            Size::new(200.0, 10.0),
            inst,
            crate::GadgetData::ProgressBar(progress_bar::ProgressBarData::default()),
        )
        .unwrap();
        progress_bar::set_progress(&mut wm, bar, 25);

        let mut rec = Recorder::new();
        wm.repaint(&mut rec);
        let fills: alloc::vec::Vec<Rect> = rec
            .ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            [
                Rect::new(10.0, 10.0, 210.0, 20.0),
                Rect::new(10.0, 10.0, 60.0, 20.0)
            ]
        );
    }

    #[test]
    fn factory_maps_styles_to_kinds() {
        let draw = StockDrawFactory.default_draw(WindowStyle::SCROLL_LISTBOX);
        assert!(draw.is_some());
        assert_eq!(GadgetKind::from_style(WindowStyle::USER), None);
    }
}
