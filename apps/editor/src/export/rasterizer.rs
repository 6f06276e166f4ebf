//! Rasterisation of a measured frame into a PDF document.
//!
//! `Rasterizer` is the seam between the export flow and the drawing backend.
//! The default `PdfRasterizer` paints with printpdf's builtin Helvetica faces,
//! the same faces `layout::font_metrics` measures with.

use async_trait::async_trait;
use bytes::Bytes;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
};
use serde::Serialize;
use thiserror::Error;

use crate::layout::font_metrics::{metrics_for, FontFace};
use crate::layout::{Frame, FrameItem};
use crate::render::palette::Rgb;

const MM_PER_PX: f32 = 25.4 / 96.0;
const PT_PER_PX: f32 = 0.75;
/// Baseline offset from the top of the em box, as a fraction of font size.
const ASCENT: f32 = 0.8;

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("pdf backend error: {0}")]
    Backend(String),

    #[error("rasterizer task failed: {0}")]
    Task(String),
}

/// Page geometry in CSS px plus a uniform inset in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSpec {
    pub width_px: f32,
    pub height_px: f32,
    pub margin_in: f32,
}

impl PageSpec {
    pub const MIN_HEIGHT_PX: f32 = 600.0;
    pub const MARGIN_IN: f32 = 0.3;

    /// Portrait page sized to the content, never smaller than the minimums.
    pub fn for_frame(frame: &Frame, min_width_px: f32) -> Self {
        PageSpec {
            width_px: frame.width.max(min_width_px),
            height_px: frame.height.max(Self::MIN_HEIGHT_PX),
            margin_in: Self::MARGIN_IN,
        }
    }

    pub fn margin_mm(&self) -> f32 {
        self.margin_in * 25.4
    }

    pub fn width_mm(&self) -> f32 {
        self.width_px * MM_PER_PX + 2.0 * self.margin_mm()
    }

    pub fn height_mm(&self) -> f32 {
        self.height_px * MM_PER_PX + 2.0 * self.margin_mm()
    }
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, frame: Frame, page: PageSpec, title: String) -> Result<Bytes, RasterizeError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRasterizer;

#[async_trait]
impl Rasterizer for PdfRasterizer {
    async fn rasterize(&self, frame: Frame, page: PageSpec, title: String) -> Result<Bytes, RasterizeError> {
        tokio::task::spawn_blocking(move || paint_pdf(&frame, &page, &title))
            .await
            .map_err(|e| RasterizeError::Task(e.to_string()))?
    }
}

fn backend(e: impl std::fmt::Display) -> RasterizeError {
    RasterizeError::Backend(e.to_string())
}

fn color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.fractions();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// Maps frame px coordinates (origin top-left) onto page mm (origin bottom-left).
struct Canvas<'a> {
    layer: PdfLayerReference,
    page: &'a PageSpec,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Canvas<'_> {
    fn x(&self, px: f32) -> Mm {
        Mm(self.page.margin_mm() + px * MM_PER_PX)
    }

    fn y(&self, px: f32) -> Mm {
        Mm(self.page.height_mm() - self.page.margin_mm() - px * MM_PER_PX)
    }

    fn rect(&self, x: f32, y: f32, width: f32, height: f32, mode: PaintMode) {
        let rect = Rect::new(self.x(x), self.y(y + height), self.x(x + width), self.y(y)).with_mode(mode);
        self.layer.add_rect(rect);
    }

    fn line(&self, points: &[(f32, f32)]) {
        self.layer.add_line(Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(self.x(x), self.y(y)), false))
                .collect(),
            is_closed: false,
        });
    }

    fn paint(&self, item: &FrameItem) {
        match item {
            FrameItem::Text {
                x,
                y,
                text,
                style,
                underline,
            } => {
                let font = match FontFace::for_style(style) {
                    FontFace::Helvetica => &self.regular,
                    FontFace::HelveticaBold => &self.bold,
                };
                let baseline = y + (style.line_height() - style.size_px) / 2.0 + style.size_px * ASCENT;
                self.layer.set_fill_color(color(style.color));
                self.layer
                    .use_text(text.as_str(), style.size_px * PT_PER_PX, self.x(*x), self.y(baseline), font);
                if *underline {
                    let width = metrics_for(style).measure_px(text, style.size_px);
                    let uy = baseline + style.size_px * 0.12;
                    self.layer.set_outline_color(color(style.color));
                    self.layer.set_outline_thickness(0.75);
                    self.line(&[(*x, uy), (x + width, uy)]);
                }
            }
            FrameItem::Rule {
                x,
                y,
                width,
                thickness,
                color: rule_color,
            } => {
                self.layer.set_fill_color(color(*rule_color));
                self.rect(*x, *y, *width, *thickness, PaintMode::Fill);
            }
            FrameItem::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                if let Some(fill) = fill {
                    self.layer.set_fill_color(color(*fill));
                    self.rect(*x, *y, *width, *height, PaintMode::Fill);
                }
                if let Some(stroke) = stroke {
                    self.layer.set_outline_color(color(*stroke));
                    self.layer.set_outline_thickness(0.75);
                    self.rect(*x, *y, *width, *height, PaintMode::Stroke);
                }
            }
            FrameItem::LinkMark {
                x,
                y,
                size,
                color: mark_color,
            } => {
                let head = size * 0.45;
                self.layer.set_outline_color(color(*mark_color));
                self.layer.set_outline_thickness(0.75);
                self.line(&[(*x, y + size), (x + size, *y)]);
                self.line(&[(x + size - head, *y), (x + size, *y), (x + size, y + head)]);
            }
        }
    }
}

fn paint_pdf(frame: &Frame, page: &PageSpec, title: &str) -> Result<Bytes, RasterizeError> {
    let (doc, page_index, layer_index) =
        PdfDocument::new(title, Mm(page.width_mm()), Mm(page.height_mm()), "CV");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(backend)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(backend)?;

    let canvas = Canvas {
        layer: doc.get_page(page_index).get_layer(layer_index),
        page,
        regular,
        bold,
    };
    for item in &frame.items {
        canvas.paint(item);
    }
    drop(canvas);

    let bytes = doc.save_to_bytes().map_err(backend)?;
    Ok(Bytes::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_print_document;
    use crate::models::samples::sample_document;
    use crate::render::print::build_print_document;

    #[test]
    fn test_page_spec_respects_minimums() {
        let frame = Frame {
            width: 400.0,
            height: 100.0,
            items: Vec::new(),
        };
        let page = PageSpec::for_frame(&frame, 850.0);
        assert_eq!(page.width_px, 850.0);
        assert_eq!(page.height_px, 600.0);
        assert!((page.margin_mm() - 7.62).abs() < 1e-3);
    }

    #[test]
    fn test_page_spec_grows_with_content() {
        let frame = Frame {
            width: 1000.0,
            height: 2400.0,
            items: Vec::new(),
        };
        let page = PageSpec::for_frame(&frame, 850.0);
        assert_eq!((page.width_px, page.height_px), (1000.0, 2400.0));
        assert!(page.height_mm() > page.width_mm(), "portrait");
    }

    #[tokio::test]
    async fn test_pdf_rasterizer_produces_pdf() {
        let frame = layout_print_document(&build_print_document(&sample_document()), 850.0);
        let page = PageSpec::for_frame(&frame, 850.0);
        let bytes = PdfRasterizer
            .rasterize(frame, page, "Sarah Chen".to_string())
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }
}
