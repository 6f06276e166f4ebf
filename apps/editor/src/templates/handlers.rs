use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::document::Document;
use crate::models::template::TemplateSummary;
use crate::notice::Notice;
use crate::state::AppState;
use crate::templates::store::StorageDiagnostic;

#[derive(Deserialize)]
pub struct SaveTemplateRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateSummary>,
    pub diagnostics: Vec<StorageDiagnostic>,
}

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    let store = state.templates.lock().await;
    Json(TemplateListResponse {
        templates: store.summaries(),
        diagnostics: store.diagnostics().to_vec(),
    })
}

/// POST /api/v1/templates
/// Snapshots the live document under `name`.
pub async fn handle_save_template(
    State(state): State<AppState>,
    Json(req): Json<SaveTemplateRequest>,
) -> Result<(StatusCode, Json<TemplateSummary>), AppError> {
    let document = state.session.lock().await.snapshot();
    let result = state.templates.lock().await.save(&req.name, &document);

    let mut session = state.session.lock().await;
    match result {
        Ok(template) => {
            session.notify(Notice::success("Template saved successfully!"));
            Ok((StatusCode::CREATED, Json(TemplateSummary::from(&template))))
        }
        Err(e) => {
            warn!(error = %e, "template save failed");
            session.notify(Notice::error(e.user_message()));
            Err(e.into())
        }
    }
}

/// POST /api/v1/templates/:id/load
/// Replaces the live document with the template's snapshot.
pub async fn handle_load_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let loaded = {
        let store = state.templates.lock().await;
        store.load(&id).map(|document| {
            let name = store.get(&id).map(|t| t.name.clone()).unwrap_or_default();
            (document, name)
        })
    };

    let mut session = state.session.lock().await;
    let (document, name) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            session.notify(Notice::error(e.user_message()));
            return Err(e.into());
        }
    };
    session.replace_document(document);
    session.notify(Notice::success(format!(
        "Template \"{name}\" loaded successfully!"
    )));
    info!(%id, "template loaded into session");
    Ok(Json(session.snapshot()))
}

/// DELETE /api/v1/templates/:id
pub async fn handle_delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let result = state.templates.lock().await.delete(&id);

    let mut session = state.session.lock().await;
    match result {
        Ok(_) => {
            session.notify(Notice::success("Template deleted successfully!"));
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            warn!(error = %e, %id, "template delete failed");
            session.notify(Notice::error(e.user_message()));
            Err(e.into())
        }
    }
}
