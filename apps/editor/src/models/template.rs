use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::document::Document;

/// A named, timestamped snapshot of a document.
///
/// `data` is owned by value: saving clones the live document, so later edits
/// never reach a stored template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub data: Document,
    pub created_at: DateTime<Utc>,
}

/// Listing view of a template, without the document body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Template> for TemplateSummary {
    fn from(t: &Template) -> Self {
        TemplateSummary {
            id: t.id.clone(),
            name: t.name.clone(),
            created_at: t.created_at,
        }
    }
}
