// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing vocabulary exposed to draw handlers.
//!
//! The tree does not rasterize anything. Draw handlers issue a small, fixed set of primitives
//! through a host-provided [`Painter`]; [`Recorder`] is a painter that keeps the primitives as a
//! list, useful for tests and for replaying onto a real backend later.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect};
use peniko::Color;

use crate::types::FontDesc;

/// Backend that receives drawing primitives.
pub trait Painter {
    /// Blit a named image into `rect`, modulated by `tint`.
    fn draw_image(&mut self, image: &str, rect: Rect, tint: Color);
    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Outline `rect` with a border of `width` pixels.
    fn open_rect(&mut self, rect: Rect, width: f64, color: Color);
    /// Draw a line segment.
    fn draw_line(&mut self, from: Point, to: Point, width: f64, color: Color);
    /// Draw a text run inside `rect`; shaping and clipping are up to the backend.
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, font: Option<&FontDesc>);
}

/// A recorded drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// See [`Painter::draw_image`].
    Image {
        /// Image name.
        image: String,
        /// Destination.
        rect: Rect,
        /// Tint.
        tint: Color,
    },
    /// See [`Painter::fill_rect`].
    FillRect {
        /// Area.
        rect: Rect,
        /// Color.
        color: Color,
    },
    /// See [`Painter::open_rect`].
    OpenRect {
        /// Area.
        rect: Rect,
        /// Border width.
        width: f64,
        /// Color.
        color: Color,
    },
    /// See [`Painter::draw_line`].
    Line {
        /// Start.
        from: Point,
        /// End.
        to: Point,
        /// Stroke width.
        width: f64,
        /// Color.
        color: Color,
    },
    /// See [`Painter::draw_text`].
    Text {
        /// Text run.
        text: String,
        /// Area.
        rect: Rect,
        /// Color.
        color: Color,
    },
}

/// A [`Painter`] that records every primitive.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// Primitives in submission order.
    pub ops: Vec<PaintOp>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Painter for Recorder {
    fn draw_image(&mut self, image: &str, rect: Rect, tint: Color) {
        self.ops.push(PaintOp::Image {
            image: image.into(),
            rect,
            tint,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(PaintOp::FillRect { rect, color });
    }

    fn open_rect(&mut self, rect: Rect, width: f64, color: Color) {
        self.ops.push(PaintOp::OpenRect { rect, width, color });
    }

    fn draw_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.ops.push(PaintOp::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, _font: Option<&FontDesc>) {
        self.ops.push(PaintOp::Text {
            text: text.into(),
            rect,
            color,
        });
    }
}
