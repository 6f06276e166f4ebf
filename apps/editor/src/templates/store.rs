//! Template Store: named document snapshots persisted under one key.
//!
//! The whole collection is stored as a JSON array and rewritten on every
//! change. Memory and the backend never diverge: when a write fails the
//! in-memory change is undone before the error is returned.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::editor::ids::IdGenerator;
use crate::models::document::Document;
use crate::models::template::{Template, TemplateSummary};
use crate::templates::kv::{KeyValueStore, KvError};

pub const TEMPLATES_KEY: &str = "cvTemplates";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Please enter a template name")]
    EmptyName,

    #[error("template {0} not found")]
    NotFound(String),

    #[error("failed to encode templates: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] KvError),
}

impl StoreError {
    /// Message shown to the user in the session notice.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::EmptyName => self.to_string(),
            StoreError::NotFound(_) => "Template not found. It may have been deleted.".to_string(),
            StoreError::Encode(_) | StoreError::Io(_) => {
                "Templates could not be saved to local storage. Please try again.".to_string()
            }
        }
    }
}

/// Recorded when the stored collection could not be decoded and was reset.
#[derive(Debug, Clone, Serialize)]
pub struct StorageDiagnostic {
    pub key: String,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

pub struct TemplateStore {
    kv: Arc<dyn KeyValueStore>,
    templates: Vec<Template>,
    ids: IdGenerator,
    diagnostics: Vec<StorageDiagnostic>,
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("templates", &self.templates.len())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl TemplateStore {
    /// Reads the stored collection once. An undecodable value yields an empty
    /// collection and a diagnostic; only backend I/O failures are errors.
    pub fn open(kv: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let mut diagnostics = Vec::new();
        let mut record = |message: String| {
            warn!(key = TEMPLATES_KEY, %message, "stored templates unreadable; starting empty");
            diagnostics.push(StorageDiagnostic {
                key: TEMPLATES_KEY.to_string(),
                message,
                recorded_at: Utc::now(),
            });
        };

        let templates = match kv.get(TEMPLATES_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Template>>(&raw) {
                Ok(templates) => templates,
                Err(e) => {
                    record(e.to_string());
                    Vec::new()
                }
            },
            Err(e @ KvError::Corrupt { .. }) => {
                record(e.to_string());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        info!(count = templates.len(), "template store opened");
        Ok(TemplateStore {
            kv,
            templates,
            ids: IdGenerator::new(),
            diagnostics,
        })
    }

    pub fn save(&mut self, name: &str, document: &Document) -> Result<Template, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let templates = &self.templates;
        let id = self.ids.next("template", |c| templates.iter().any(|t| t.id == c));
        let template = Template {
            id,
            name: name.to_string(),
            data: document.clone(),
            created_at: Utc::now(),
        };

        self.templates.push(template.clone());
        if let Err(e) = self.persist() {
            self.templates.pop();
            return Err(e);
        }
        info!(id = %template.id, name = %template.name, "template saved");
        Ok(template)
    }

    /// Returns a copy of the template's document.
    pub fn load(&self, id: &str) -> Result<Document, StoreError> {
        self.get(id)
            .map(|t| t.data.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Removes the template with `id`. Returns `false` if there was none.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(index) = self.templates.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        let removed = self.templates.remove(index);
        if let Err(e) = self.persist() {
            self.templates.insert(index, removed);
            return Err(e);
        }
        info!(id, "template deleted");
        Ok(true)
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn summaries(&self) -> Vec<TemplateSummary> {
        self.templates.iter().map(TemplateSummary::from).collect()
    }

    pub fn diagnostics(&self) -> &[StorageDiagnostic] {
        &self.diagnostics
    }

    fn persist(&self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&self.templates)?;
        self.kv.set(TEMPLATES_KEY, &encoded)?;
        Ok(())
    }
}
