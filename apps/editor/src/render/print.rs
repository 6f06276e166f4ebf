//! Export-safe projection of the document.
//!
//! `PrintDocument` is a typed, layout-ready view: cards of blocks whose text
//! styles are fixed pixel sizes and opaque colours from the palette. It is
//! serialised to static HTML (`to_inline_html`) and measured into a frame by
//! `layout::frame` for rasterisation. Nothing here depends on a theme.

use serde::Serialize;

use crate::models::document::Document;
use crate::render::palette::{self, Rgb};
use crate::render::{escape_html, safe_link, visible_experience, visible_skill_categories};

// ────────────────────────────────────────────────────────────────────────────
// Geometry (px)
// ────────────────────────────────────────────────────────────────────────────

pub const PAGE_PADDING: f32 = 24.0;
pub const LEFT_COLUMN_WIDTH: f32 = 300.0;
pub const COLUMN_GAP: f32 = 24.0;
pub const CARD_PADDING: f32 = 16.0;
pub const CARD_GAP: f32 = 20.0;
pub const CARD_RADIUS: f32 = 10.0;
pub const HEADER_GAP: f32 = 24.0;
pub const HEADER_RULE: f32 = 2.0;
pub const SEPARATOR_MARGIN: f32 = 16.0;
pub const LINE_HEIGHT: f32 = 1.5;

// ────────────────────────────────────────────────────────────────────────────
// Text styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    Regular,
    Medium,
    Semibold,
}

impl Weight {
    pub fn css(&self) -> u16 {
        match self {
            Weight::Regular => 400,
            Weight::Medium => 500,
            Weight::Semibold => 600,
        }
    }

    /// Medium and heavier are set in the bold face.
    pub fn is_bold(&self) -> bool {
        !matches!(self, Weight::Regular)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size_px: f32,
    pub weight: Weight,
    pub color: Rgb,
}

impl TextStyle {
    const fn new(size_px: f32, weight: Weight, color: Rgb) -> Self {
        TextStyle {
            size_px,
            weight,
            color,
        }
    }

    pub fn line_height(&self) -> f32 {
        self.size_px * LINE_HEIGHT
    }

    fn css(&self) -> String {
        format!(
            "font-size:{}px;font-weight:{};color:{};line-height:{};",
            self.size_px,
            self.weight.css(),
            self.color.hex(),
            LINE_HEIGHT
        )
    }
}

pub mod styles {
    use super::{TextStyle, Weight};
    use crate::render::palette::{FOREGROUND, HEADING, MUTED};

    pub const NAME: TextStyle = TextStyle::new(28.0, Weight::Semibold, HEADING);
    pub const TITLE: TextStyle = TextStyle::new(16.0, Weight::Regular, MUTED);
    pub const CARD_TITLE: TextStyle = TextStyle::new(16.0, Weight::Medium, FOREGROUND);
    pub const BODY: TextStyle = TextStyle::new(14.0, Weight::Regular, FOREGROUND);
    pub const BODY_MEDIUM: TextStyle = TextStyle::new(14.0, Weight::Medium, FOREGROUND);
    pub const MUTED_TEXT: TextStyle = TextStyle::new(14.0, Weight::Regular, MUTED);
    pub const CAPTION: TextStyle = TextStyle::new(12.0, Weight::Regular, MUTED);
    pub const ENTRY_HEADING: TextStyle = TextStyle::new(16.0, Weight::Medium, HEADING);
    pub const BADGE: TextStyle = TextStyle::new(12.0, Weight::Medium, HEADING);
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintDocument {
    pub name: String,
    pub title: String,
    pub left: Vec<Card>,
    pub right: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Contact { label: &'static str, value: String },
    SkillGroup { name: String, skills: Vec<String> },
    Language { name: String, level: String },
    /// Free text; line breaks are kept.
    Paragraph { text: String },
    Experience(ExperienceBlock),
    Separator,
    Education(EducationBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceBlock {
    pub company: String,
    pub link: Option<String>,
    pub title: String,
    pub category: Option<&'static str>,
    pub period: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationBlock {
    pub degree: String,
    pub institution: String,
    pub gpa: Option<String>,
    pub year: String,
}

pub fn build_print_document(doc: &Document) -> PrintDocument {
    let mut left = Vec::new();
    let mut right = Vec::new();

    left.push(Card {
        title: "Contact",
        blocks: doc
            .contact
            .present()
            .map(|(channel, value)| Block::Contact {
                label: channel.label(),
                value: value.to_string(),
            })
            .collect(),
    });

    left.push(Card {
        title: "Technical Skills",
        blocks: visible_skill_categories(doc)
            .into_iter()
            .map(|c| Block::SkillGroup {
                name: c.name.clone(),
                skills: c.skills.clone(),
            })
            .collect(),
    });

    if !doc.languages.is_empty() {
        left.push(Card {
            title: "Languages",
            blocks: doc
                .languages
                .iter()
                .map(|l| Block::Language {
                    name: l.name.clone(),
                    level: l.level.clone(),
                })
                .collect(),
        });
    }

    right.push(Card {
        title: "Professional Summary",
        blocks: vec![Block::Paragraph {
            text: doc.summary.clone(),
        }],
    });

    let visible = visible_experience(doc);
    if !visible.is_empty() {
        let last = visible.len() - 1;
        let mut blocks = Vec::with_capacity(visible.len() * 2);
        for (i, exp) in visible.into_iter().enumerate() {
            blocks.push(Block::Experience(ExperienceBlock {
                company: exp.company.clone(),
                link: exp.company_link.as_deref().and_then(safe_link).map(str::to_string),
                title: exp.title.clone(),
                category: exp.category.map(|c| c.label()),
                period: exp.period.clone(),
                description: exp.description.clone(),
                tech_stack: exp.tech_stack.clone(),
                achievements: exp.achievements.clone(),
            }));
            if i < last {
                blocks.push(Block::Separator);
            }
        }
        right.push(Card {
            title: "Experience",
            blocks,
        });
    }

    if !doc.education.is_empty() {
        right.push(Card {
            title: "Education",
            blocks: doc
                .education
                .iter()
                .map(|e| {
                    Block::Education(EducationBlock {
                        degree: e.degree.clone(),
                        institution: e.institution.clone(),
                        gpa: e.gpa.clone().filter(|g| !g.trim().is_empty()),
                        year: e.year.clone(),
                    })
                })
                .collect(),
        });
    }

    PrintDocument {
        name: doc.name.clone(),
        title: doc.title.clone(),
        left,
        right,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static HTML
// ────────────────────────────────────────────────────────────────────────────

/// Table-based HTML with inline styles only: no stylesheet, no CSS variables,
/// no transparency, no transitions.
pub fn to_inline_html(doc: &PrintDocument, min_width_px: u32) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>");
    out.push_str(&escape_html(&doc.name));
    out.push_str("</title></head>\n");
    out.push_str(&format!(
        "<body style=\"margin:0;background-color:{};\">\n",
        palette::PAGE.hex()
    ));
    out.push_str(&format!(
        "<div style=\"background-color:{bg};color:{fg};padding:{pad}px;min-width:{min}px;\
box-sizing:border-box;font-family:Helvetica,Arial,sans-serif;font-size:14px;line-height:{lh};\">\n",
        bg = palette::PAGE.hex(),
        fg = palette::FOREGROUND.hex(),
        pad = PAGE_PADDING,
        min = min_width_px,
        lh = LINE_HEIGHT,
    ));

    out.push_str(&format!(
        "<div style=\"text-align:center;margin-bottom:{gap}px;padding-bottom:16px;\
border-bottom:{rule}px solid {border};\">\n",
        gap = HEADER_GAP,
        rule = HEADER_RULE,
        border = palette::BORDER.hex(),
    ));
    out.push_str(&format!(
        "<h1 style=\"margin:0 0 8px 0;{}\">{}</h1>\n",
        styles::NAME.css(),
        escape_html(&doc.name)
    ));
    out.push_str(&format!(
        "<p style=\"margin:0;{}\">{}</p>\n</div>\n",
        styles::TITLE.css(),
        escape_html(&doc.title)
    ));

    out.push_str(&format!(
        "<table style=\"width:100%;table-layout:fixed;border-collapse:separate;\
border-spacing:{gap}px 0;\"><colgroup><col style=\"width:{left}px\"><col></colgroup><tbody><tr>\n",
        gap = COLUMN_GAP,
        left = LEFT_COLUMN_WIDTH,
    ));
    for column in [&doc.left, &doc.right] {
        out.push_str("<td style=\"vertical-align:top;padding:0;\">\n");
        for card in column {
            push_card(&mut out, card);
        }
        out.push_str("</td>\n");
    }
    out.push_str("</tr></tbody></table>\n</div>\n</body></html>\n");
    out
}

fn push_card(out: &mut String, card: &Card) {
    let border = palette::BORDER.hex();
    out.push_str(&format!(
        "<div style=\"background-color:{bg};border:1px solid {border};border-radius:{radius}px;\
margin-bottom:{gap}px;\">\n",
        bg = palette::PAGE.hex(),
        radius = CARD_RADIUS,
        gap = CARD_GAP,
    ));
    out.push_str(&format!(
        "<div style=\"padding:{pad}px;border-bottom:1px solid {border};\">\
<h3 style=\"margin:0;{style}\">{title}</h3></div>\n",
        pad = CARD_PADDING,
        style = styles::CARD_TITLE.css(),
        title = escape_html(card.title),
    ));
    out.push_str(&format!("<div style=\"padding:{CARD_PADDING}px;\">\n"));
    for block in &card.blocks {
        push_block(out, block);
    }
    out.push_str("</div>\n</div>\n");
}

fn badge(text: &str, outline: bool) -> String {
    let (fill, edge) = if outline {
        (palette::PAGE, palette::BORDER)
    } else {
        (palette::BADGE, palette::BADGE)
    };
    format!(
        "<span style=\"display:inline-block;margin:0 8px 8px 0;padding:4px 8px;border-radius:6px;\
background-color:{};border:1px solid {};{}\">{}</span>",
        fill.hex(),
        edge.hex(),
        styles::BADGE.css(),
        escape_html(text)
    )
}

fn push_block(out: &mut String, block: &Block) {
    match block {
        Block::Contact { label, value } => {
            out.push_str(&format!(
                "<div style=\"margin-bottom:8px;\"><span style=\"{}\">{}</span> \
<span style=\"{}\">{}</span></div>\n",
                styles::CAPTION.css(),
                escape_html(label),
                styles::BODY.css(),
                escape_html(value)
            ));
        }
        Block::SkillGroup { name, skills } => {
            out.push_str(&format!(
                "<div style=\"margin-bottom:16px;\"><h4 style=\"margin:0 0 8px 0;{}\">{}</h4><div>",
                styles::BODY_MEDIUM.css(),
                escape_html(name)
            ));
            for skill in skills {
                out.push_str(&badge(skill, false));
            }
            out.push_str("</div></div>\n");
        }
        Block::Language { name, level } => {
            out.push_str(&format!(
                "<table style=\"width:100%;margin-bottom:8px;border-collapse:collapse;\"><tr>\
<td style=\"padding:0;{}\">{}</td><td style=\"padding:0;text-align:right;\">\
<span style=\"background-color:{};padding:2px 8px;border-radius:4px;{}\">{}</span></td></tr></table>\n",
                styles::BODY_MEDIUM.css(),
                escape_html(name),
                palette::PILL.hex(),
                styles::CAPTION.css(),
                escape_html(level)
            ));
        }
        Block::Paragraph { text } => {
            out.push_str(&format!(
                "<div style=\"white-space:pre-line;{}\">{}</div>\n",
                styles::BODY.css(),
                escape_html(text)
            ));
        }
        Block::Experience(exp) => push_experience(out, exp),
        Block::Separator => {
            out.push_str(&format!(
                "<div style=\"height:1px;background-color:{};margin:{}px 0;\"></div>\n",
                palette::BORDER.hex(),
                SEPARATOR_MARGIN
            ));
        }
        Block::Education(edu) => {
            out.push_str(&format!(
                "<table style=\"width:100%;margin-bottom:16px;border-collapse:collapse;\"><tr>\
<td style=\"padding:0;vertical-align:top;\"><h3 style=\"margin:0;{}\">{}</h3>\
<p style=\"margin:0;{}\">{}</p>",
                styles::ENTRY_HEADING.css(),
                escape_html(&edu.degree),
                styles::MUTED_TEXT.css(),
                escape_html(&edu.institution)
            ));
            if let Some(gpa) = &edu.gpa {
                out.push_str(&format!(
                    "<p style=\"margin:0;{}\">GPA: {}</p>",
                    styles::MUTED_TEXT.css(),
                    escape_html(gpa)
                ));
            }
            out.push_str(&format!(
                "</td><td style=\"padding:0;vertical-align:top;text-align:right;{}\">{}</td></tr></table>\n",
                styles::MUTED_TEXT.css(),
                escape_html(&edu.year)
            ));
        }
    }
}

fn push_experience(out: &mut String, exp: &ExperienceBlock) {
    out.push_str(
        "<div><table style=\"width:100%;margin-bottom:8px;border-collapse:collapse;\"><tr>\
<td style=\"padding:0;vertical-align:top;\">",
    );
    match &exp.link {
        Some(link) => out.push_str(&format!(
            "<h3 style=\"margin:0;{}\"><a href=\"{}\" style=\"color:{};text-decoration:underline;\">{}</a> \
<span style=\"{}\">&#8599;</span></h3>",
            styles::ENTRY_HEADING.css(),
            escape_html(link),
            palette::HEADING.hex(),
            escape_html(&exp.company),
            styles::CAPTION.css()
        )),
        None => out.push_str(&format!(
            "<h3 style=\"margin:0;{}\">{}</h3>",
            styles::ENTRY_HEADING.css(),
            escape_html(&exp.company)
        )),
    }
    out.push_str(&format!(
        "<p style=\"margin:0;{}\">{}</p>",
        styles::MUTED_TEXT.css(),
        escape_html(&exp.title)
    ));
    if let Some(category) = exp.category {
        out.push_str(&format!(
            "<p style=\"margin:0;{}\">{}</p>",
            styles::CAPTION.css(),
            category
        ));
    }
    out.push_str(&format!(
        "</td><td style=\"padding:0;vertical-align:top;text-align:right;white-space:nowrap;{}\">{}</td>\
</tr></table>\n",
        styles::MUTED_TEXT.css(),
        escape_html(&exp.period)
    ));
    out.push_str(&format!(
        "<p style=\"margin:0 0 12px 0;white-space:pre-line;{}\">{}</p>\n",
        styles::BODY.css(),
        escape_html(&exp.description)
    ));
    if !exp.tech_stack.is_empty() {
        out.push_str("<div style=\"margin-bottom:4px;\">");
        for tech in &exp.tech_stack {
            out.push_str(&badge(tech, true));
        }
        out.push_str("</div>\n");
    }
    if !exp.achievements.is_empty() {
        out.push_str(&format!(
            "<h4 style=\"margin:0 0 8px 0;{}\">Key Achievements:</h4><ul style=\"margin:0 0 12px 0;padding-left:16px;\">",
            styles::BODY_MEDIUM.css()
        ));
        for achievement in &exp.achievements {
            out.push_str(&format!(
                "<li style=\"margin-bottom:4px;{}\">{}</li>",
                styles::MUTED_TEXT.css(),
                escape_html(achievement)
            ));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
}
