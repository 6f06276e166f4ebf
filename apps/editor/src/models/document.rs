//! The CV document: the single structure the editor mutates and both renderers read.

use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    pub title: String,
    pub summary: String,
    pub contact: ContactInfo,
    pub skills: Skills,
    #[serde(default)]
    pub languages: Vec<LanguageProficiency>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

impl Document {
    /// The empty document the editor starts with.
    pub fn blank() -> Self {
        Document {
            name: String::new(),
            title: String::new(),
            summary: String::new(),
            contact: ContactInfo::default(),
            skills: Skills::default(),
            languages: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
        }
    }

    /// File stem used for exported artifacts. Falls back to "CV" for an unnamed document.
    pub fn export_stem(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            "CV"
        } else {
            trimmed
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::blank()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub technical: Vec<SkillCategory>,
}

// ────────────────────────────────────────────────────────────────────────────
// Contact
// ────────────────────────────────────────────────────────────────────────────

/// Contact channels. Every value is optional; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, deserialize_with = "non_empty")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub upwork: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    Email,
    Location,
    Website,
    Linkedin,
    Upwork,
}

impl ContactChannel {
    /// Display order shared by both renderers.
    pub const ALL: [ContactChannel; 5] = [
        ContactChannel::Email,
        ContactChannel::Location,
        ContactChannel::Website,
        ContactChannel::Linkedin,
        ContactChannel::Upwork,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContactChannel::Email => "Email",
            ContactChannel::Location => "Location",
            ContactChannel::Website => "Website",
            ContactChannel::Linkedin => "LinkedIn",
            ContactChannel::Upwork => "Upwork",
        }
    }
}

impl ContactInfo {
    pub fn get(&self, channel: ContactChannel) -> Option<&str> {
        let value = match channel {
            ContactChannel::Email => &self.email,
            ContactChannel::Location => &self.location,
            ContactChannel::Website => &self.website,
            ContactChannel::Linkedin => &self.linkedin,
            ContactChannel::Upwork => &self.upwork,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, channel: ContactChannel, value: String) {
        let value = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        match channel {
            ContactChannel::Email => self.email = value,
            ContactChannel::Location => self.location = value,
            ContactChannel::Website => self.website = value,
            ContactChannel::Linkedin => self.linkedin = value,
            ContactChannel::Upwork => self.upwork = value,
        }
    }

    /// Channels with a value, in display order.
    pub fn present(&self) -> impl Iterator<Item = (ContactChannel, &str)> {
        ContactChannel::ALL
            .into_iter()
            .filter_map(move |channel| self.get(channel).map(|v| (channel, v)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills, experience, education, languages
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub company_link: Option<String>,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default, deserialize_with = "category_or_none", skip_serializing_if = "Option::is_none")]
    pub category: Option<EmploymentCategory>,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
}

impl Experience {
    /// A blank entry as created by "add experience".
    pub fn blank(id: String) -> Self {
        Experience {
            id,
            title: String::new(),
            company: String::new(),
            company_link: None,
            period: String::new(),
            description: String::new(),
            tech_stack: Vec::new(),
            achievements: Vec::new(),
            category: None,
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentCategory {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl EmploymentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentCategory::FullTime => "Full-time",
            EmploymentCategory::PartTime => "Part-time",
            EmploymentCategory::Contract => "Contract",
            EmploymentCategory::Freelance => "Freelance",
            EmploymentCategory::Internship => "Internship",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageProficiency {
    pub name: String,
    pub level: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Serde helpers
// ────────────────────────────────────────────────────────────────────────────

fn visible_by_default() -> bool {
    true
}

/// Stored documents write optional text as `""` when cleared.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

fn category_or_none<'de, D>(deserializer: D) -> Result<Option<EmploymentCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => serde_json::from_value(serde_json::Value::String(raw.to_string()))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_visibility_defaults_to_visible() {
        let json = r#"{"id":"frontend","name":"Frontend","skills":["React"]}"#;
        let category: SkillCategory = serde_json::from_str(json).unwrap();
        assert!(category.is_visible);
    }

    #[test]
    fn test_empty_optionals_deserialize_as_absent() {
        let json = r#"{
            "id": "exp4", "title": "Dev", "company": "Studio", "companyLink": "",
            "period": "2016", "description": "", "techStack": [], "category": ""
        }"#;
        let exp: Experience = serde_json::from_str(json).unwrap();
        assert_eq!(exp.company_link, None);
        assert_eq!(exp.category, None);
        assert!(exp.achievements.is_empty());
        assert!(exp.is_visible);
    }

    #[test]
    fn test_category_uses_display_labels_on_the_wire() {
        let json = serde_json::to_value(EmploymentCategory::FullTime).unwrap();
        assert_eq!(json, serde_json::json!("Full-time"));
        let parsed: EmploymentCategory = serde_json::from_str("\"Part-time\"").unwrap();
        assert_eq!(parsed, EmploymentCategory::PartTime);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let json = r#"{"id":"e","title":"","company":"","period":"","description":"","category":"Gig"}"#;
        assert!(serde_json::from_str::<Experience>(json).is_err());
    }

    #[test]
    fn test_contact_present_skips_blank_channels_in_order() {
        let mut contact = ContactInfo::default();
        contact.set(ContactChannel::Website, "me.dev".to_string());
        contact.set(ContactChannel::Email, "me@mail.com".to_string());
        contact.set(ContactChannel::Location, "   ".to_string());

        let present: Vec<_> = contact.present().collect();
        assert_eq!(
            present,
            vec![
                (ContactChannel::Email, "me@mail.com"),
                (ContactChannel::Website, "me.dev"),
            ]
        );
    }

    #[test]
    fn test_camel_case_field_names_on_the_wire() {
        let mut exp = Experience::blank("exp1".to_string());
        exp.company_link = Some("https://acme.io".to_string());
        let value = serde_json::to_value(&exp).unwrap();
        assert!(value.get("companyLink").is_some());
        assert!(value.get("techStack").is_some());
        assert!(value.get("isVisible").is_some());
    }

    #[test]
    fn test_export_stem_falls_back_for_unnamed_document() {
        let mut doc = Document::blank();
        assert_eq!(doc.export_stem(), "CV");
        doc.name = " Sarah Chen ".to_string();
        assert_eq!(doc.export_stem(), "Sarah Chen");
    }
}
