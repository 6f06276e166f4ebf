//! Greedy word-wrap over the static metric tables.
//!
//! Follows `white-space: pre-line`: runs of spaces collapse, explicit line
//! breaks are kept. A single word wider than the line is split by character.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width_px` at `size_px`.
/// Empty input yields no lines; an empty line between breaks is kept.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_px: f32,
    max_width_px: f32,
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let max_width = (max_width_px / size_px).max(0.0);
    let mut lines = Vec::new();
    for paragraph in text.trim_end().split('\n') {
        wrap_paragraph(paragraph, metrics, max_width, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, metrics: &FontMetricTable, max_width: f32, lines: &mut Vec<String>) {
    let words: Vec<&str> = paragraph.split_whitespace().collect();
    if words.is_empty() {
        lines.push(String::new());
        return;
    }

    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in words {
        let word_w = metrics.measure_str(word);
        let space_w = if current.is_empty() {
            0.0
        } else {
            metrics.space_width
        };

        if !current.is_empty() && current_width + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_w > max_width {
            // Too wide for any line: break inside the word.
            for c in word.chars() {
                let c_w = metrics.measure_str(c.encode_utf8(&mut [0; 4]));
                if !current.is_empty() && current_width + c_w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += c_w;
            }
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
            current_width += metrics.space_width;
        }
        current.push_str(word);
        current_width += word_w;
    }
    lines.push(current);
}
