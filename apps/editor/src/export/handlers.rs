use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::errors::AppError;
use crate::notice::Notice;
use crate::state::AppState;

/// Quoted-string safe `Content-Disposition` value.
fn attachment(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

/// POST /api/v1/export
/// Exports the live document as a PDF attachment.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    // A refused request never touches the notice.
    let ticket = state.exporter.begin()?;
    let document = {
        let mut session = state.session.lock().await;
        session.notify(Notice::info("Generating PDF..."));
        session.snapshot()
    };

    let result = state.exporter.export_with(ticket, document).await;

    let mut session = state.session.lock().await;
    match result {
        Ok(artifact) => {
            session.notify(Notice::success("PDF exported successfully!"));
            Ok((
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, attachment(&artifact.filename)),
                ],
                artifact.bytes,
            )
                .into_response())
        }
        Err(e) => {
            warn!(error = %e, "pdf export failed");
            session.notify(Notice::error(e.user_message()));
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;

    use crate::config::Config;
    use crate::export::rasterizer::PdfRasterizer;
    use crate::export::Exporter;
    use crate::templates::{MemoryKvStore, TemplateStore};

    fn test_state() -> AppState {
        let templates = TemplateStore::open(Arc::new(MemoryKvStore::new())).unwrap();
        let config = Config::default();
        let exporter = Exporter::new(Arc::new(PdfRasterizer), config.export_settings());
        AppState::new(config, templates, exporter)
    }

    #[tokio::test]
    async fn test_refused_export_leaves_running_notice() {
        let state = test_state();
        let _running = state.exporter.begin().unwrap();
        state
            .session
            .lock()
            .await
            .notify(Notice::info("Generating PDF..."));

        let response = handle_export(State(state.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let session = state.session.lock().await;
        assert_eq!(
            session.notice().map(|n| n.message.as_str()),
            Some("Generating PDF...")
        );
    }

    #[test]
    fn test_attachment_header_is_ascii_safe() {
        assert_eq!(attachment("CV.pdf"), "attachment; filename=\"CV.pdf\"");
        assert_eq!(
            attachment("Zoë \"Z\".pdf"),
            "attachment; filename=\"Zo_ _Z_.pdf\""
        );
    }
}
