//! Rendering rules shared by the interactive preview and the export-safe
//! projection. Both read the same filtered views, so they cannot disagree
//! about which items appear or in what order.

pub mod handlers;
pub mod palette;
pub mod preview;
pub mod print;

use crate::models::document::{Document, Experience, SkillCategory};

pub fn visible_experience(doc: &Document) -> Vec<&Experience> {
    doc.experience.iter().filter(|e| e.is_visible).collect()
}

pub fn visible_skill_categories(doc: &Document) -> Vec<&SkillCategory> {
    doc.skills.technical.iter().filter(|c| c.is_visible).collect()
}

/// Separators go between consecutive visible entries only.
pub fn separator_count(visible: usize) -> usize {
    visible.saturating_sub(1)
}

/// The company link if it is safe to render as an anchor: an `http`,
/// `https` or `mailto` URL, or one with no scheme at all. Anything else
/// (`javascript:`, `data:`, …) renders as plain text.
pub fn safe_link(link: &str) -> Option<&str> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    match link.find([':', '/', '?', '#']) {
        Some(i) if link[i..].starts_with(':') => {
            let scheme = link[..i].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto").then_some(link)
        }
        _ => Some(link),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_link_schemes() {
        assert_eq!(safe_link("https://microsoft.com"), Some("https://microsoft.com"));
        assert_eq!(safe_link(" HTTP://x.io "), Some("HTTP://x.io"));
        assert_eq!(safe_link("mailto:sarah@example.com"), Some("mailto:sarah@example.com"));
        assert_eq!(safe_link("acme.com/jobs?a=b:c"), Some("acme.com/jobs?a=b:c"));
        assert_eq!(safe_link("javascript:alert(1)"), None);
        assert_eq!(safe_link("  JavaScript:alert(1)"), None);
        assert_eq!(safe_link("data:text/html,<b>x</b>"), None);
        assert_eq!(safe_link("   "), None);
    }
    use crate::models::samples::sample_document;

    #[test]
    fn test_visible_experience_excludes_exactly_hidden() {
        let mut doc = sample_document();
        doc.experience[1].is_visible = false;
        doc.experience[3].is_visible = false;
        let ids: Vec<_> = visible_experience(&doc).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["exp1", "exp3"]);
        assert_eq!(doc.experience.len(), 4, "filtering must not mutate");
    }

    #[test]
    fn test_visible_skill_categories_keep_order() {
        let mut doc = sample_document();
        doc.skills.technical[0].is_visible = false;
        let names: Vec<_> = visible_skill_categories(&doc)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(names, vec!["backend", "database", "cloud", "tools"]);
    }

    #[test]
    fn test_separator_count() {
        assert_eq!(separator_count(0), 0);
        assert_eq!(separator_count(1), 0);
        assert_eq!(separator_count(4), 3);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">R&D's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;R&amp;D&#39;s&lt;/a&gt;"
        );
    }
}
