//! Closed set of edit commands. Each variant names exactly one field or list
//! operation, so a command can never touch a field it does not name.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::editor::ids::IdGenerator;
use crate::editor::reorder::{move_item, nudge, Direction, ReorderError};
use crate::models::document::{
    ContactChannel, Document, Education, EmploymentCategory, Experience, LanguageProficiency,
    SkillCategory,
};

#[derive(Debug, Error)]
pub enum EditError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Reorder(#[from] ReorderError),
}

// ────────────────────────────────────────────────────────────────────────────
// Field updates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ExperienceField {
    Title(String),
    Company(String),
    CompanyLink(String),
    Period(String),
    Description(String),
    Category(Option<EmploymentCategory>),
    /// Comma-separated input as typed into the tech-stack box.
    TechStack(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum EducationField {
    Degree(String),
    Institution(String),
    Year(String),
    Gpa(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum LanguageField {
    Name(String),
    Level(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Commands
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditCommand {
    SetName { value: String },
    SetTitle { value: String },
    SetSummary { value: String },
    SetContact { channel: ContactChannel, value: String },

    AddExperience,
    UpdateExperience { id: String, change: ExperienceField },
    RemoveExperience { id: String },
    MoveExperience { from: usize, to: usize },
    ToggleExperienceVisibility { id: String },

    AddAchievement { experience_id: String },
    SetAchievement { experience_id: String, index: usize, value: String },
    RemoveAchievement { experience_id: String, index: usize },

    AddSkillCategory { name: String },
    RenameSkillCategory { id: String, name: String },
    RemoveSkillCategory { id: String },
    MoveSkillCategory { from: usize, to: usize },
    ToggleSkillCategoryVisibility { id: String },

    AddSkill { category_id: String, skill: String },
    RemoveSkill { category_id: String, index: usize },
    MoveSkill { category_id: String, from: usize, to: usize },
    NudgeSkill { category_id: String, index: usize, direction: Direction },

    AddEducation,
    UpdateEducation { index: usize, change: EducationField },
    RemoveEducation { index: usize },

    AddLanguage,
    UpdateLanguage { index: usize, change: LanguageField },
    RemoveLanguage { index: usize },
}

/// Splits tech-stack input the way the editor box does: on ", ", dropping blanks.
pub fn parse_tech_stack(input: &str) -> Vec<String> {
    input
        .split(", ")
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.to_string())
        .collect()
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn experience_mut<'a>(doc: &'a mut Document, id: &str) -> Result<&'a mut Experience, EditError> {
    doc.experience
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| EditError::NotFound(format!("experience {id}")))
}

fn category_mut<'a>(doc: &'a mut Document, id: &str) -> Result<&'a mut SkillCategory, EditError> {
    doc.skills
        .technical
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| EditError::NotFound(format!("skill category {id}")))
}

fn element_mut<'a, T>(items: &'a mut [T], index: usize, what: &str) -> Result<&'a mut T, EditError> {
    items
        .get_mut(index)
        .ok_or_else(|| EditError::NotFound(format!("{what} #{index}")))
}

fn remove_at<T>(items: &mut Vec<T>, index: usize, what: &str) -> Result<(), EditError> {
    if index >= items.len() {
        return Err(EditError::NotFound(format!("{what} #{index}")));
    }
    items.remove(index);
    Ok(())
}

impl EditCommand {
    /// Applies the command to `doc`. On error the document is unchanged.
    pub fn apply(self, doc: &mut Document, ids: &mut IdGenerator) -> Result<(), EditError> {
        match self {
            EditCommand::SetName { value } => doc.name = value,
            EditCommand::SetTitle { value } => doc.title = value,
            EditCommand::SetSummary { value } => doc.summary = value,
            EditCommand::SetContact { channel, value } => doc.contact.set(channel, value),

            EditCommand::AddExperience => {
                let id = ids.next("exp", |c| doc.experience.iter().any(|e| e.id == c));
                doc.experience.push(Experience::blank(id));
            }
            EditCommand::UpdateExperience { id, change } => {
                let exp = experience_mut(doc, &id)?;
                match change {
                    ExperienceField::Title(v) => exp.title = v,
                    ExperienceField::Company(v) => exp.company = v,
                    ExperienceField::CompanyLink(v) => exp.company_link = optional(v),
                    ExperienceField::Period(v) => exp.period = v,
                    ExperienceField::Description(v) => exp.description = v,
                    ExperienceField::Category(v) => exp.category = v,
                    ExperienceField::TechStack(v) => exp.tech_stack = parse_tech_stack(&v),
                }
            }
            EditCommand::RemoveExperience { id } => {
                let index = doc
                    .experience
                    .iter()
                    .position(|e| e.id == id)
                    .ok_or_else(|| EditError::NotFound(format!("experience {id}")))?;
                doc.experience.remove(index);
            }
            EditCommand::MoveExperience { from, to } => move_item(&mut doc.experience, from, to)?,
            EditCommand::ToggleExperienceVisibility { id } => {
                let exp = experience_mut(doc, &id)?;
                exp.is_visible = !exp.is_visible;
            }

            EditCommand::AddAchievement { experience_id } => {
                experience_mut(doc, &experience_id)?.achievements.push(String::new());
            }
            EditCommand::SetAchievement {
                experience_id,
                index,
                value,
            } => {
                let exp = experience_mut(doc, &experience_id)?;
                *element_mut(&mut exp.achievements, index, "achievement")? = value;
            }
            EditCommand::RemoveAchievement {
                experience_id,
                index,
            } => {
                let exp = experience_mut(doc, &experience_id)?;
                remove_at(&mut exp.achievements, index, "achievement")?;
            }

            EditCommand::AddSkillCategory { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(EditError::Validation(
                        "Please enter a category name".to_string(),
                    ));
                }
                let id = ids.next("cat", |c| doc.skills.technical.iter().any(|cat| cat.id == c));
                doc.skills.technical.push(SkillCategory {
                    id,
                    name: name.to_string(),
                    skills: Vec::new(),
                    is_visible: true,
                });
            }
            EditCommand::RenameSkillCategory { id, name } => category_mut(doc, &id)?.name = name,
            EditCommand::RemoveSkillCategory { id } => {
                let index = doc
                    .skills
                    .technical
                    .iter()
                    .position(|c| c.id == id)
                    .ok_or_else(|| EditError::NotFound(format!("skill category {id}")))?;
                doc.skills.technical.remove(index);
            }
            EditCommand::MoveSkillCategory { from, to } => {
                move_item(&mut doc.skills.technical, from, to)?
            }
            EditCommand::ToggleSkillCategoryVisibility { id } => {
                let cat = category_mut(doc, &id)?;
                cat.is_visible = !cat.is_visible;
            }

            EditCommand::AddSkill { category_id, skill } => {
                let skill = skill.trim();
                if skill.is_empty() {
                    debug!(category_id = %category_id, "ignoring blank skill");
                    return Ok(());
                }
                category_mut(doc, &category_id)?.skills.push(skill.to_string());
            }
            EditCommand::RemoveSkill { category_id, index } => {
                remove_at(&mut category_mut(doc, &category_id)?.skills, index, "skill")?
            }
            EditCommand::MoveSkill {
                category_id,
                from,
                to,
            } => move_item(&mut category_mut(doc, &category_id)?.skills, from, to)?,
            EditCommand::NudgeSkill {
                category_id,
                index,
                direction,
            } => nudge(&mut category_mut(doc, &category_id)?.skills, index, direction)?,

            EditCommand::AddEducation => doc.education.push(Education::default()),
            EditCommand::UpdateEducation { index, change } => {
                let edu = element_mut(&mut doc.education, index, "education")?;
                match change {
                    EducationField::Degree(v) => edu.degree = v,
                    EducationField::Institution(v) => edu.institution = v,
                    EducationField::Year(v) => edu.year = v,
                    EducationField::Gpa(v) => edu.gpa = optional(v),
                }
            }
            EditCommand::RemoveEducation { index } => {
                remove_at(&mut doc.education, index, "education")?
            }

            EditCommand::AddLanguage => doc.languages.push(LanguageProficiency::default()),
            EditCommand::UpdateLanguage { index, change } => {
                let lang = element_mut(&mut doc.languages, index, "language")?;
                match change {
                    LanguageField::Name(v) => lang.name = v,
                    LanguageField::Level(v) => lang.level = v,
                }
            }
            EditCommand::RemoveLanguage { index } => {
                remove_at(&mut doc.languages, index, "language")?
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::samples::sample_document;

    fn apply(doc: &mut Document, cmd: EditCommand) -> Result<(), EditError> {
        cmd.apply(doc, &mut IdGenerator::new())
    }

    fn exp_ids(doc: &Document) -> Vec<String> {
        doc.experience.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_move_experience_scenario() {
        let mut doc = sample_document();
        doc.experience.truncate(3);
        apply(&mut doc, EditCommand::MoveExperience { from: 0, to: 2 }).unwrap();
        assert_eq!(exp_ids(&doc), vec!["exp2", "exp3", "exp1"]);
    }

    #[test]
    fn test_move_experience_out_of_range_is_rejected() {
        let mut doc = sample_document();
        let before = doc.clone();
        let err = apply(&mut doc, EditCommand::MoveExperience { from: 0, to: 9 }).unwrap_err();
        assert!(matches!(err, EditError::Reorder(_)));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_move_skill_within_category_scenario() {
        let mut doc = Document::blank();
        doc.skills.technical.push(SkillCategory {
            id: "lang".to_string(),
            name: "Languages".to_string(),
            skills: vec!["Go".to_string(), "Rust".to_string()],
            is_visible: true,
        });
        apply(
            &mut doc,
            EditCommand::MoveSkill {
                category_id: "lang".to_string(),
                from: 0,
                to: 1,
            },
        )
        .unwrap();
        assert_eq!(doc.skills.technical[0].skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_nudge_and_move_skill_agree() {
        let mut nudged = sample_document();
        let mut moved = sample_document();
        apply(
            &mut nudged,
            EditCommand::NudgeSkill {
                category_id: "backend".to_string(),
                index: 2,
                direction: Direction::Up,
            },
        )
        .unwrap();
        apply(
            &mut moved,
            EditCommand::MoveSkill {
                category_id: "backend".to_string(),
                from: 2,
                to: 1,
            },
        )
        .unwrap();
        assert_eq!(nudged, moved);
    }

    #[test]
    fn test_toggle_twice_restores_and_touches_nothing_else() {
        let original = sample_document();
        let mut doc = original.clone();
        let toggle = EditCommand::ToggleExperienceVisibility {
            id: "exp2".to_string(),
        };

        apply(&mut doc, toggle.clone()).unwrap();
        assert!(!doc.experience[1].is_visible);
        let mut expected = original.clone();
        expected.experience[1].is_visible = false;
        assert_eq!(doc, expected, "only the flag changed");

        apply(&mut doc, toggle).unwrap();
        assert_eq!(doc, original);
    }

    #[test]
    fn test_toggle_category_visibility() {
        let mut doc = sample_document();
        apply(
            &mut doc,
            EditCommand::ToggleSkillCategoryVisibility {
                id: "cloud".to_string(),
            },
        )
        .unwrap();
        assert!(!doc.skills.technical[3].is_visible);
        assert_eq!(doc.skills.technical[3].id, "cloud");
    }

    #[test]
    fn test_toggle_unknown_id_reports_not_found_without_change() {
        let mut doc = sample_document();
        let before = doc.clone();
        let err = apply(
            &mut doc,
            EditCommand::ToggleExperienceVisibility {
                id: "missing".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, EditError::NotFound(_)));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_experience_gets_fresh_unique_id() {
        let mut doc = sample_document();
        let mut ids = IdGenerator::new();
        EditCommand::AddExperience.apply(&mut doc, &mut ids).unwrap();
        EditCommand::AddExperience.apply(&mut doc, &mut ids).unwrap();

        let all = exp_ids(&doc);
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        assert_eq!(doc.experience.len(), 6);
        assert!(doc.experience[5].is_visible);
        assert_eq!(&all[..4], &["exp1", "exp2", "exp3", "exp4"]);
    }

    #[test]
    fn test_add_skill_category_rejects_blank_name() {
        let mut doc = Document::blank();
        let err = apply(
            &mut doc,
            EditCommand::AddSkillCategory {
                name: "   ".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, EditError::Validation(_)));
        assert!(doc.skills.technical.is_empty());
    }

    #[test]
    fn test_add_skill_trims_and_ignores_blank() {
        let mut doc = sample_document();
        let before = doc.skills.technical[0].skills.len();
        apply(
            &mut doc,
            EditCommand::AddSkill {
                category_id: "frontend".to_string(),
                skill: "  Svelte ".to_string(),
            },
        )
        .unwrap();
        apply(
            &mut doc,
            EditCommand::AddSkill {
                category_id: "frontend".to_string(),
                skill: "  ".to_string(),
            },
        )
        .unwrap();
        let skills = &doc.skills.technical[0].skills;
        assert_eq!(skills.len(), before + 1);
        assert_eq!(skills.last().map(String::as_str), Some("Svelte"));
    }

    #[test]
    fn test_remove_experience_keeps_others_in_order() {
        let mut doc = sample_document();
        apply(
            &mut doc,
            EditCommand::RemoveExperience {
                id: "exp2".to_string(),
            },
        )
        .unwrap();
        assert_eq!(exp_ids(&doc), vec!["exp1", "exp3", "exp4"]);
    }

    #[test]
    fn test_update_experience_touches_one_field() {
        let original = sample_document();
        let mut doc = original.clone();
        apply(
            &mut doc,
            EditCommand::UpdateExperience {
                id: "exp3".to_string(),
                change: ExperienceField::Title("Staff Engineer".to_string()),
            },
        )
        .unwrap();
        let mut expected = original;
        expected.experience[2].title = "Staff Engineer".to_string();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_clearing_company_link_makes_it_absent() {
        let mut doc = sample_document();
        apply(
            &mut doc,
            EditCommand::UpdateExperience {
                id: "exp1".to_string(),
                change: ExperienceField::CompanyLink(String::new()),
            },
        )
        .unwrap();
        assert_eq!(doc.experience[0].company_link, None);
    }

    #[test]
    fn test_tech_stack_input_splits_on_comma_space() {
        assert_eq!(
            parse_tech_stack("React, Node.js, , PostgreSQL"),
            vec!["React", "Node.js", "PostgreSQL"]
        );
        assert!(parse_tech_stack("").is_empty());
    }

    #[test]
    fn test_achievement_edits_preserve_neighbours() {
        let mut doc = sample_document();
        let id = "exp1".to_string();
        let original = doc.experience[0].achievements.clone();

        apply(&mut doc, EditCommand::AddAchievement { experience_id: id.clone() }).unwrap();
        apply(
            &mut doc,
            EditCommand::SetAchievement {
                experience_id: id.clone(),
                index: 3,
                value: "Shipped v2".to_string(),
            },
        )
        .unwrap();
        apply(
            &mut doc,
            EditCommand::RemoveAchievement {
                experience_id: id,
                index: 1,
            },
        )
        .unwrap();

        let achievements = &doc.experience[0].achievements;
        assert_eq!(
            achievements,
            &vec![original[0].clone(), original[2].clone(), "Shipped v2".to_string()]
        );
    }

    #[test]
    fn test_education_is_positional() {
        let mut doc = sample_document();
        apply(&mut doc, EditCommand::AddEducation).unwrap();
        apply(
            &mut doc,
            EditCommand::UpdateEducation {
                index: 2,
                change: EducationField::Degree("PhD".to_string()),
            },
        )
        .unwrap();
        apply(&mut doc, EditCommand::RemoveEducation { index: 0 }).unwrap();
        assert_eq!(doc.education.len(), 2);
        assert_eq!(doc.education[1].degree, "PhD");
        assert_eq!(doc.education[1].gpa, None);

        let err = apply(&mut doc, EditCommand::RemoveEducation { index: 7 }).unwrap_err();
        assert!(matches!(err, EditError::NotFound(_)));
    }

    #[test]
    fn test_language_commands() {
        let mut doc = Document::blank();
        apply(&mut doc, EditCommand::AddLanguage).unwrap();
        apply(
            &mut doc,
            EditCommand::UpdateLanguage {
                index: 0,
                change: LanguageField::Name("German".to_string()),
            },
        )
        .unwrap();
        apply(
            &mut doc,
            EditCommand::UpdateLanguage {
                index: 0,
                change: LanguageField::Level("Fluent".to_string()),
            },
        )
        .unwrap();
        assert_eq!(doc.languages[0].name, "German");
        assert_eq!(doc.languages[0].level, "Fluent");
        apply(&mut doc, EditCommand::RemoveLanguage { index: 0 }).unwrap();
        assert!(doc.languages.is_empty());
    }

    #[test]
    fn test_command_wire_format() {
        let json = r#"{"type":"update_experience","id":"exp1","change":{"field":"category","value":"Freelance"}}"#;
        let cmd: EditCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            EditCommand::UpdateExperience {
                id: "exp1".to_string(),
                change: ExperienceField::Category(Some(EmploymentCategory::Freelance)),
            }
        );

        let unit: EditCommand = serde_json::from_str(r#"{"type":"add_experience"}"#).unwrap();
        assert_eq!(unit, EditCommand::AddExperience);
    }
}
