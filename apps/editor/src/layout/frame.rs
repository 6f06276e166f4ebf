//! Measures a `PrintDocument` into a fixed-width frame of positioned items.
//!
//! Coordinates are CSS px with the origin at the top-left of the frame. The
//! geometry mirrors `to_inline_html`: same paddings, column widths, card
//! chrome and text styles, so the rasterised page and the static HTML agree.

use serde::Serialize;

use crate::layout::font_metrics::{metrics_for, normalize_text};
use crate::layout::wrap::wrap_text;
use crate::render::palette::{self, Rgb};
use crate::render::print::{
    styles, Block, Card, EducationBlock, ExperienceBlock, PrintDocument, TextStyle, CARD_GAP,
    CARD_PADDING, COLUMN_GAP, HEADER_GAP, HEADER_RULE, LEFT_COLUMN_WIDTH, PAGE_PADDING,
    SEPARATOR_MARGIN,
};

/// Narrowest the right column may get.
const MIN_RIGHT_COLUMN_WIDTH: f32 = 300.0;
const BADGE_PAD_X: f32 = 8.0;
const BADGE_PAD_Y: f32 = 4.0;
const BADGE_GAP: f32 = 8.0;
const PILL_PAD_X: f32 = 8.0;
const PILL_PAD_Y: f32 = 2.0;
const BULLET_INDENT: f32 = 16.0;
const BULLET_SIZE: f32 = 4.0;
const LINK_MARK_SIZE: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum FrameItem {
    /// One line of text; `y` is the top of its line box.
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
        underline: bool,
    },
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        color: Rgb,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
    /// External-link affordance: a small arrow pointing up and right.
    LinkMark { x: f32, y: f32, size: f32, color: Rgb },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub items: Vec<FrameItem>,
}

pub fn layout_print_document(doc: &PrintDocument, min_width_px: f32) -> Frame {
    let width = min_width_px
        .max(2.0 * PAGE_PADDING + LEFT_COLUMN_WIDTH + COLUMN_GAP + MIN_RIGHT_COLUMN_WIDTH);
    let mut painter = Painter::default();
    let inner = width - 2.0 * PAGE_PADDING;

    // Header
    let mut y = PAGE_PADDING;
    y += painter.centered(PAGE_PADDING, y, inner, &doc.name, styles::NAME);
    y += 8.0;
    y += painter.centered(PAGE_PADDING, y, inner, &doc.title, styles::TITLE);
    y += 16.0;
    painter.rule(PAGE_PADDING, y, inner, HEADER_RULE, palette::BORDER);
    y += HEADER_RULE + HEADER_GAP;

    let left_x = PAGE_PADDING;
    let right_x = PAGE_PADDING + LEFT_COLUMN_WIDTH + COLUMN_GAP;
    let right_width = width - PAGE_PADDING - right_x;

    let left_end = painter.column(left_x, y, LEFT_COLUMN_WIDTH, &doc.left);
    let right_end = painter.column(right_x, y, right_width, &doc.right);

    Frame {
        width,
        height: left_end.max(right_end) + PAGE_PADDING,
        items: painter.items,
    }
}

#[derive(Default)]
struct Painter {
    items: Vec<FrameItem>,
}

impl Painter {
    fn text(&mut self, x: f32, y: f32, text: String, style: TextStyle, underline: bool) {
        self.items.push(FrameItem::Text {
            x,
            y,
            text,
            style,
            underline,
        });
    }

    fn rule(&mut self, x: f32, y: f32, width: f32, thickness: f32, color: Rgb) {
        self.items.push(FrameItem::Rule {
            x,
            y,
            width,
            thickness,
            color,
        });
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Option<Rgb>, stroke: Option<Rgb>) {
        self.items.push(FrameItem::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        });
    }

    /// Wrapped, left-aligned text. Returns the height used.
    fn paragraph(&mut self, x: f32, y: f32, width: f32, text: &str, style: TextStyle) -> f32 {
        self.paragraph_lines(x, y, width, text, style, false).0
    }

    /// Returns the height used and the end x of the last line.
    fn paragraph_lines(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        text: &str,
        style: TextStyle,
        underline: bool,
    ) -> (f32, f32) {
        let metrics = metrics_for(&style);
        let lines = wrap_text(&normalize_text(text), metrics, style.size_px, width);
        let lh = style.line_height();
        let mut end_x = x;
        for (i, line) in lines.iter().enumerate() {
            end_x = x + metrics.measure_px(line, style.size_px);
            if !line.is_empty() {
                self.text(x, y + i as f32 * lh, line.clone(), style, underline);
            }
        }
        (lines.len() as f32 * lh, end_x)
    }

    fn centered(&mut self, x: f32, y: f32, width: f32, text: &str, style: TextStyle) -> f32 {
        let metrics = metrics_for(&style);
        let lines = wrap_text(&normalize_text(text), metrics, style.size_px, width);
        let lh = style.line_height();
        for (i, line) in lines.iter().enumerate() {
            let w = metrics.measure_px(line, style.size_px);
            self.text(x + (width - w) / 2.0, y + i as f32 * lh, line.clone(), style, false);
        }
        lines.len() as f32 * lh
    }

    /// A single right-aligned line. Returns its width.
    fn right_aligned(&mut self, right: f32, y: f32, text: &str, style: TextStyle) -> f32 {
        let text = normalize_text(text);
        let text = text.trim();
        if text.is_empty() {
            return 0.0;
        }
        let w = metrics_for(&style).measure_px(text, style.size_px);
        self.text(right - w, y, text.to_string(), style, false);
        w
    }

    /// Flows badges left to right, wrapping onto new rows. Returns the height used.
    fn badges(&mut self, x: f32, y: f32, width: f32, labels: &[String], outline: bool) -> f32 {
        if labels.is_empty() {
            return 0.0;
        }
        let style = styles::BADGE;
        let metrics = metrics_for(&style);
        let height = style.line_height() + 2.0 * BADGE_PAD_Y;
        let (fill, stroke) = if outline {
            (None, Some(palette::BORDER))
        } else {
            (Some(palette::BADGE), None)
        };

        let mut bx = x;
        let mut by = y;
        for label in labels {
            let label = normalize_text(label);
            let w = (metrics.measure_px(&label, style.size_px) + 2.0 * BADGE_PAD_X).min(width);
            if bx > x && bx + w > x + width {
                bx = x;
                by += height + BADGE_GAP;
            }
            self.rect(bx, by, w, height, fill, stroke);
            self.text(bx + BADGE_PAD_X, by + BADGE_PAD_Y, label, style, false);
            bx += w + BADGE_GAP;
        }
        by + height + BADGE_GAP - y
    }

    /// Lays out a column of cards. Returns the y after the last card.
    fn column(&mut self, x: f32, y: f32, width: f32, cards: &[Card]) -> f32 {
        let mut y = y;
        for card in cards {
            y = self.card(x, y, width, card) + CARD_GAP;
        }
        y
    }

    fn card(&mut self, x: f32, top: f32, width: f32, card: &Card) -> f32 {
        let ix = x + 1.0 + CARD_PADDING;
        let iw = width - 2.0 * (1.0 + CARD_PADDING);

        let mut y = top + 1.0 + CARD_PADDING;
        y += self.paragraph(ix, y, iw, card.title, styles::CARD_TITLE);
        y += CARD_PADDING;
        self.rule(x, y, width, 1.0, palette::BORDER);
        y += 1.0 + CARD_PADDING;

        for block in &card.blocks {
            y += self.block(ix, y, iw, block);
        }

        let bottom = y + CARD_PADDING + 1.0;
        self.rect(x, top, width, bottom - top, None, Some(palette::BORDER));
        bottom
    }

    /// Returns the height used by the block, margins included.
    fn block(&mut self, x: f32, y: f32, width: f32, block: &Block) -> f32 {
        match block {
            Block::Contact { label, value } => {
                let label_style = styles::CAPTION;
                let label_w = metrics_for(&label_style).measure_px(label, label_style.size_px);
                self.text(x, y + 1.0, label.to_string(), label_style, false);
                let value_x = x + label_w + 8.0;
                let h = self.paragraph(value_x, y, width - label_w - 8.0, value, styles::BODY);
                h.max(styles::BODY.line_height()) + 8.0
            }
            Block::SkillGroup { name, skills } => {
                let mut h = self.paragraph(x, y, width, name, styles::BODY_MEDIUM);
                h += 8.0;
                h += self.badges(x, y + h, width, skills, false);
                h + 8.0
            }
            Block::Language { name, level } => {
                let pill = styles::CAPTION;
                let level = normalize_text(level);
                let pill_w = metrics_for(&pill).measure_px(&level, pill.size_px) + 2.0 * PILL_PAD_X;
                let pill_h = pill.line_height() + 2.0 * PILL_PAD_Y;
                let pill_x = x + width - pill_w;
                let name_h = self.paragraph(x, y, width - pill_w - 8.0, name, styles::BODY_MEDIUM);
                if !level.trim().is_empty() {
                    self.rect(pill_x, y, pill_w, pill_h, Some(palette::PILL), None);
                    self.text(pill_x + PILL_PAD_X, y + PILL_PAD_Y, level, pill, false);
                }
                name_h.max(pill_h) + 8.0
            }
            Block::Paragraph { text } => self.paragraph(x, y, width, text, styles::BODY),
            Block::Experience(exp) => self.experience(x, y, width, exp),
            Block::Separator => {
                self.rule(x, y + SEPARATOR_MARGIN, width, 1.0, palette::BORDER);
                2.0 * SEPARATOR_MARGIN + 1.0
            }
            Block::Education(edu) => self.education(x, y, width, edu),
        }
    }

    fn experience(&mut self, x: f32, top: f32, width: f32, exp: &ExperienceBlock) -> f32 {
        let period_w = self.right_aligned(x + width, top, &exp.period, styles::MUTED_TEXT);
        let left_w = (width - period_w - 16.0).max(width / 2.0);

        let mut y = top;
        let (h, end_x) = self.paragraph_lines(
            x,
            y,
            left_w,
            &exp.company,
            styles::ENTRY_HEADING,
            exp.link.is_some(),
        );
        if exp.link.is_some() && h > 0.0 {
            let lh = styles::ENTRY_HEADING.line_height();
            self.items.push(FrameItem::LinkMark {
                x: end_x + 4.0,
                y: y + h - lh + (lh - LINK_MARK_SIZE) / 2.0,
                size: LINK_MARK_SIZE,
                color: palette::MUTED,
            });
        }
        y += h;
        y += self.paragraph(x, y, left_w, &exp.title, styles::MUTED_TEXT);
        if let Some(category) = exp.category {
            y += self.paragraph(x, y, left_w, category, styles::CAPTION);
        }
        y = y.max(top + styles::MUTED_TEXT.line_height()) + 8.0;

        y += self.paragraph(x, y, width, &exp.description, styles::BODY);
        y += 12.0;

        if !exp.tech_stack.is_empty() {
            y += self.badges(x, y, width, &exp.tech_stack, true);
            y += 4.0;
        }

        if !exp.achievements.is_empty() {
            y += self.paragraph(x, y, width, "Key Achievements:", styles::BODY_MEDIUM);
            y += 8.0;
            let style = styles::MUTED_TEXT;
            for achievement in &exp.achievements {
                let lh = style.line_height();
                self.rect(
                    x + (BULLET_INDENT - BULLET_SIZE) / 2.0,
                    y + (lh - BULLET_SIZE) / 2.0,
                    BULLET_SIZE,
                    BULLET_SIZE,
                    Some(style.color),
                    None,
                );
                let h = self.paragraph(x + BULLET_INDENT, y, width - BULLET_INDENT, achievement, style);
                y += h.max(lh) + 4.0;
            }
            y += 12.0;
        }

        y - top
    }

    fn education(&mut self, x: f32, top: f32, width: f32, edu: &EducationBlock) -> f32 {
        let year_w = self.right_aligned(x + width, top, &edu.year, styles::MUTED_TEXT);
        let left_w = (width - year_w - 16.0).max(width / 2.0);

        let mut y = top;
        y += self.paragraph(x, y, left_w, &edu.degree, styles::ENTRY_HEADING);
        y += self.paragraph(x, y, left_w, &edu.institution, styles::MUTED_TEXT);
        if let Some(gpa) = &edu.gpa {
            y += self.paragraph(x, y, left_w, &format!("GPA: {gpa}"), styles::MUTED_TEXT);
        }
        let used = (y - top).max(if year_w > 0.0 {
            styles::MUTED_TEXT.line_height()
        } else {
            0.0
        });
        used + 16.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::Document;
    use crate::models::samples::sample_document;
    use crate::render::print::build_print_document;

    fn frame_for(doc: &Document) -> Frame {
        layout_print_document(&build_print_document(doc), 850.0)
    }

    fn texts(frame: &Frame) -> Vec<&str> {
        frame
            .items
            .iter()
            .filter_map(|i| match i {
                FrameItem::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_frame_respects_min_width() {
        let frame = frame_for(&sample_document());
        assert_eq!(frame.width, 850.0);
        let wide = layout_print_document(&build_print_document(&sample_document()), 1200.0);
        assert_eq!(wide.width, 1200.0);
        assert!(wide.height <= frame.height, "wider page should not be taller");
    }

    #[test]
    fn test_blank_document_still_has_size() {
        let frame = frame_for(&Document::blank());
        assert!(frame.width > 0.0);
        assert!(frame.height > 0.0);
    }

    #[test]
    fn test_items_stay_inside_frame() {
        let frame = frame_for(&sample_document());
        for item in &frame.items {
            match item {
                FrameItem::Text { x, y, text, style, .. } => {
                    let w = metrics_for(style).measure_px(text, style.size_px);
                    assert!(*x >= 0.0 && x + w <= frame.width + 0.5, "{text:?} overflows");
                    assert!(*y >= 0.0 && *y <= frame.height);
                }
                FrameItem::Rect { x, y, width, height, .. } => {
                    assert!(x + width <= frame.width + 0.5);
                    assert!(y + height <= frame.height + 0.5);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_link_marks_only_for_linked_companies() {
        let frame = frame_for(&sample_document());
        let marks = frame
            .items
            .iter()
            .filter(|i| matches!(i, FrameItem::LinkMark { .. }))
            .count();
        assert_eq!(marks, 3);
        let underlined: Vec<_> = frame
            .items
            .iter()
            .filter_map(|i| match i {
                FrameItem::Text { text, underline: true, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(underlined.contains(&"Microsoft"));
        assert!(!underlined.contains(&"Design Studio Pro"));
    }

    #[test]
    fn test_hidden_entries_are_not_painted() {
        let mut doc = sample_document();
        doc.experience[1].is_visible = false;
        let frame = frame_for(&doc);
        let painted = texts(&frame);
        assert!(!painted.contains(&"Airbnb"));
        assert!(painted.contains(&"Microsoft"));
    }

    #[test]
    fn test_more_content_makes_a_taller_frame() {
        let short = frame_for(&Document::blank());
        let long = frame_for(&sample_document());
        assert!(long.height > short.height);
    }

    #[test]
    fn test_accented_text_reaches_frame_intact() {
        let mut doc = sample_document();
        doc.name = "José García".to_string();
        doc.experience[0].company = "Société Générale".to_string();
        let frame = frame_for(&doc);
        let painted = texts(&frame);
        assert!(painted.contains(&"José García"), "{painted:?}");
        assert!(painted.contains(&"Société Générale"), "{painted:?}");
        assert!(!painted.iter().any(|t| t.contains('?') && t.contains("Soci")));
    }

    #[test]
    fn test_gpa_and_category_text() {
        let painted = texts(&frame_for(&sample_document()))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        assert!(painted.iter().any(|t| t == "GPA: 3.9/4.0"));
        assert!(painted.iter().any(|t| t == "Contract"));
        assert!(painted.iter().any(|t| t == "Key Achievements:"));
    }
}
