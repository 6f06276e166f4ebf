//! Interactive preview: a themed HTML page.
//!
//! Colours come from the theme's CSS custom properties, so the preview follows
//! whatever theme the stylesheet defines. This output is never rasterised.

use crate::models::document::{Document, Experience};
use crate::render::{
    escape_html, safe_link, separator_count, visible_experience, visible_skill_categories,
};

const THEME: &str = r#":root {
  --background: #ffffff;
  --foreground: oklch(0.145 0 0);
  --card: #ffffff;
  --primary: #030213;
  --secondary: oklch(0.95 0.0058 264.53);
  --muted: #ececf0;
  --muted-foreground: #717182;
  --border: rgba(0, 0, 0, 0.1);
  --radius: 0.625rem;
}
@media (prefers-color-scheme: dark) {
  :root {
    --background: oklch(0.145 0 0);
    --foreground: oklch(0.985 0 0);
    --card: oklch(0.145 0 0);
    --primary: oklch(0.985 0 0);
    --secondary: oklch(0.269 0 0);
    --muted: oklch(0.269 0 0);
    --muted-foreground: oklch(0.708 0 0);
    --border: oklch(0.269 0 0);
  }
}
body { margin: 0; background: var(--background); color: var(--foreground); font-family: system-ui, sans-serif; }
.cv { max-width: 56rem; min-width: 794px; margin: 0 auto; padding: 1.5rem; }
.cv-header { text-align: center; margin-bottom: 2rem; }
.cv-header h1 { font-size: 1.875rem; font-weight: 500; margin: 0 0 0.5rem; }
.cv-header p { font-size: 1.125rem; color: var(--muted-foreground); margin: 0; }
.cv-grid { display: grid; grid-template-columns: 1fr 2fr; gap: 2rem; }
.cv-column > .card + .card { margin-top: 1.5rem; }
.card { background: var(--card); border: 1px solid var(--border); border-radius: var(--radius); }
.card-title { padding: 1.5rem 1.5rem 0; font-weight: 500; }
.card-content { padding: 1.5rem; font-size: 0.875rem; }
.muted { color: var(--muted-foreground); }
.caption { font-size: 0.75rem; color: var(--muted-foreground); }
.badge { display: inline-block; margin: 0 0.5rem 0.5rem 0; padding: 0.125rem 0.5rem; border-radius: 0.375rem; font-size: 0.75rem; font-weight: 500; background: var(--secondary); }
.badge.outline { background: transparent; border: 1px solid var(--border); }
.pill { font-size: 0.75rem; color: var(--muted-foreground); background: var(--muted); padding: 0.25rem 0.5rem; border-radius: 0.25rem; }
.row { display: flex; justify-content: space-between; align-items: flex-start; }
.pre { white-space: pre-line; line-height: 1.625; }
.entry + .entry { margin-top: 1.5rem; }
hr { border: 0; height: 1px; background: var(--border); margin: 1rem 0 0; }
a { color: var(--primary); text-decoration: none; transition: color 150ms ease; }
a:hover { text-decoration: underline; }
h3, h4 { margin: 0; font-weight: 500; }
ul { margin: 0.5rem 0 0; padding-left: 1.25rem; }
"#;

pub fn render_preview(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>");
    out.push_str(&escape_html(doc.export_stem()));
    out.push_str("</title>\n<style>\n");
    out.push_str(THEME);
    out.push_str("</style></head>\n<body><div class=\"cv\">\n");

    out.push_str(&format!(
        "<header class=\"cv-header\"><h1>{}</h1><p>{}</p></header>\n",
        escape_html(&doc.name),
        escape_html(&doc.title)
    ));
    out.push_str("<div class=\"cv-grid\">\n<div class=\"cv-column\">\n");

    let mut contact = String::new();
    for (channel, value) in doc.contact.present() {
        contact.push_str(&format!(
            "<div class=\"row\" style=\"justify-content:flex-start;gap:0.5rem;margin-bottom:0.75rem\">\
<span class=\"caption\">{}</span><span>{}</span></div>",
            channel.label(),
            escape_html(value)
        ));
    }
    push_card(&mut out, "Contact", &contact);

    let mut skills = String::new();
    for category in visible_skill_categories(doc) {
        skills.push_str(&format!(
            "<div style=\"margin-bottom:1rem\"><h4 style=\"margin-bottom:0.5rem\">{}</h4><div>",
            escape_html(&category.name)
        ));
        for skill in &category.skills {
            skills.push_str(&format!("<span class=\"badge\">{}</span>", escape_html(skill)));
        }
        skills.push_str("</div></div>");
    }
    push_card(&mut out, "Technical Skills", &skills);

    if !doc.languages.is_empty() {
        let mut languages = String::new();
        for language in &doc.languages {
            languages.push_str(&format!(
                "<div class=\"row\" style=\"margin-bottom:0.5rem\"><span style=\"font-weight:500\">{}</span>\
<span class=\"pill\">{}</span></div>",
                escape_html(&language.name),
                escape_html(&language.level)
            ));
        }
        push_card(&mut out, "Languages", &languages);
    }

    out.push_str("</div>\n<div class=\"cv-column\">\n");
    push_card(
        &mut out,
        "Professional Summary",
        &format!("<div class=\"pre\">{}</div>", escape_html(&doc.summary)),
    );

    let visible = visible_experience(doc);
    if !visible.is_empty() {
        let separators = separator_count(visible.len());
        let mut experience = String::new();
        for (i, exp) in visible.iter().enumerate() {
            experience.push_str(&experience_entry(exp, i < separators));
        }
        push_card(&mut out, "Experience", &experience);
    }

    if !doc.education.is_empty() {
        let mut education = String::new();
        for edu in &doc.education {
            education.push_str(&format!(
                "<div class=\"entry row\"><div><h3>{}</h3><p class=\"muted\" style=\"margin:0\">{}</p>",
                escape_html(&edu.degree),
                escape_html(&edu.institution)
            ));
            if let Some(gpa) = edu.gpa.as_deref().filter(|g| !g.trim().is_empty()) {
                education.push_str(&format!(
                    "<p class=\"muted\" style=\"margin:0\">GPA: {}</p>",
                    escape_html(gpa)
                ));
            }
            education.push_str(&format!(
                "</div><div class=\"muted\">{}</div></div>",
                escape_html(&edu.year)
            ));
        }
        push_card(&mut out, "Education", &education);
    }

    out.push_str("</div>\n</div>\n</div></body></html>\n");
    out
}

fn push_card(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!(
        "<section class=\"card\"><div class=\"card-title\">{}</div><div class=\"card-content\">{}</div></section>\n",
        escape_html(title),
        body
    ));
}

fn experience_entry(exp: &Experience, separated: bool) -> String {
    let mut out = String::from("<div class=\"entry\"><div class=\"row\"><div>");
    match exp.company_link.as_deref().and_then(safe_link) {
        Some(link) => out.push_str(&format!(
            "<h3><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a> \
<span class=\"caption\" aria-label=\"external link\">&#8599;</span></h3>",
            escape_html(link),
            escape_html(&exp.company)
        )),
        None => out.push_str(&format!("<h3>{}</h3>", escape_html(&exp.company))),
    }
    out.push_str(&format!(
        "<p class=\"muted\" style=\"margin:0\">{}</p>",
        escape_html(&exp.title)
    ));
    if let Some(category) = exp.category {
        out.push_str(&format!(
            "<p class=\"caption\" style=\"margin:0\">{}</p>",
            category.label()
        ));
    }
    out.push_str(&format!(
        "</div><div class=\"muted\">{}</div></div>",
        escape_html(&exp.period)
    ));
    out.push_str(&format!(
        "<p class=\"pre\">{}</p>",
        escape_html(&exp.description)
    ));
    if !exp.tech_stack.is_empty() {
        out.push_str("<div>");
        for tech in &exp.tech_stack {
            out.push_str(&format!(
                "<span class=\"badge outline\">{}</span>",
                escape_html(tech)
            ));
        }
        out.push_str("</div>");
    }
    if !exp.achievements.is_empty() {
        out.push_str("<h4>Key Achievements:</h4><ul>");
        for achievement in &exp.achievements {
            out.push_str(&format!(
                "<li class=\"muted\">{}</li>",
                escape_html(achievement)
            ));
        }
        out.push_str("</ul>");
    }
    if separated {
        out.push_str("<hr>");
    }
    out.push_str("</div>");
    out
}
