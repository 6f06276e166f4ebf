use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::editor::commands::{EditCommand, EditError};
use crate::editor::drag::DragEvent;
use crate::editor::session::{EditorSession, ViewMode};
use crate::errors::AppError;
use crate::models::document::Document;
use crate::notice::Notice;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionView {
    pub mode: ViewMode,
    pub document: Document,
    pub export_enabled: bool,
    pub notice: Option<Notice>,
}

#[derive(Deserialize)]
pub struct SetModeRequest {
    pub mode: ViewMode,
}

#[derive(Serialize)]
pub struct DragResponse {
    pub moved: bool,
    pub document: Document,
}

fn session_view(session: &EditorSession, export_enabled: bool) -> SessionView {
    SessionView {
        mode: session.mode(),
        document: session.snapshot(),
        export_enabled,
        notice: session.notice().cloned(),
    }
}

/// Missing ids and indices are ignored; everything else is reported.
fn settle(session: &mut EditorSession, result: Result<(), EditError>) -> Result<(), AppError> {
    match result {
        Ok(()) => Ok(()),
        Err(EditError::NotFound(what)) => {
            debug!(%what, "ignoring command for missing item");
            Ok(())
        }
        Err(EditError::Validation(msg)) => {
            session.notify(Notice::error(msg.clone()));
            Err(AppError::Validation(msg))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(session_view(&session, state.exporter.is_enabled()))
}

/// PUT /api/v1/session/mode
pub async fn handle_set_mode(
    State(state): State<AppState>,
    Json(req): Json<SetModeRequest>,
) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.set_mode(req.mode);
    Json(session_view(&session, state.exporter.is_enabled()))
}

/// DELETE /api/v1/session/notice
pub async fn handle_dismiss_notice(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.dismiss_notice();
    StatusCode::NO_CONTENT
}

/// POST /api/v1/document/commands
pub async fn handle_apply_command(
    State(state): State<AppState>,
    Json(command): Json<EditCommand>,
) -> Result<Json<Document>, AppError> {
    let mut session = state.session.lock().await;
    let result = session.apply(command);
    settle(&mut session, result)?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/document/sample
pub async fn handle_load_sample(State(state): State<AppState>) -> Json<Document> {
    let mut session = state.session.lock().await;
    session.load_sample();
    session.notify(Notice::success(
        "Mock data loaded successfully! Perfect for testing all features.",
    ));
    info!("sample document loaded");
    Json(session.snapshot())
}

/// POST /api/v1/document/drag
pub async fn handle_drag(
    State(state): State<AppState>,
    Json(event): Json<DragEvent>,
) -> Result<Json<DragResponse>, AppError> {
    let mut session = state.session.lock().await;
    let moved = match session.drag(event) {
        Ok(moved) => moved,
        Err(EditError::NotFound(what)) => {
            debug!(%what, "drag target no longer exists");
            false
        }
        Err(e) => return Err(e.into()),
    };
    Ok(Json(DragResponse {
        moved,
        document: session.snapshot(),
    }))
}
