pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session / view
        .route("/api/v1/session", get(editor::handle_get_session))
        .route("/api/v1/session/mode", put(editor::handle_set_mode))
        .route("/api/v1/session/notice", delete(editor::handle_dismiss_notice))
        // Document editing
        .route("/api/v1/document/commands", post(editor::handle_apply_command))
        .route("/api/v1/document/sample", post(editor::handle_load_sample))
        .route("/api/v1/document/drag", post(editor::handle_drag))
        // Rendering
        .route("/api/v1/preview", get(render::handle_preview))
        .route("/api/v1/preview/print", get(render::handle_print_preview))
        // Export
        .route("/api/v1/export", post(export::handle_export))
        // Templates
        .route(
            "/api/v1/templates",
            get(templates::handle_list_templates).post(templates::handle_save_template),
        )
        .route(
            "/api/v1/templates/:id/load",
            post(templates::handle_load_template),
        )
        .route(
            "/api/v1/templates/:id",
            delete(templates::handle_delete_template),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::export::rasterizer::PdfRasterizer;
    use crate::export::{ExportSettings, Exporter};
    use crate::templates::kv::KvError;
    use crate::templates::{KeyValueStore, MemoryKvStore, TemplateStore};

    /// Serves whatever it was seeded with but refuses every write.
    struct ReadOnlyKvStore {
        seeded: Option<String>,
    }

    impl KeyValueStore for ReadOnlyKvStore {
        fn get(&self, _key: &str) -> Result<Option<String>, KvError> {
            Ok(self.seeded.clone())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), KvError> {
            Err(KvError::Write {
                path: "/read-only/cv-studio.json".into(),
                source: std::io::Error::other("read-only file system"),
            })
        }
    }

    fn test_app() -> Router {
        test_app_with(Arc::new(MemoryKvStore::new()))
    }

    fn test_app_with(kv: Arc<dyn KeyValueStore>) -> Router {
        let templates = TemplateStore::open(kv).unwrap();
        let settings = ExportSettings {
            settle_delay: Duration::ZERO,
            min_width_px: 850.0,
        };
        let exporter = Exporter::new(Arc::new(PdfRasterizer), settings);
        build_router(AppState::new(Config::default(), templates, exporter))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn command(app: &Router, body: Value) -> (StatusCode, Value) {
        send_json(app, Method::POST, "/api/v1/document/commands", Some(body)).await
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let (status, body) = send_json(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_session_starts_blank_in_edit_mode() {
        let app = test_app();
        let (status, body) = send_json(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "edit");
        assert_eq!(body["export_enabled"], true);
        assert_eq!(body["document"]["name"], "");
        assert!(body["notice"].is_null());
    }

    #[tokio::test]
    async fn test_switch_mode() {
        let app = test_app();
        let (status, body) = send_json(
            &app,
            Method::PUT,
            "/api/v1/session/mode",
            Some(json!({ "mode": "preview" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "preview");
    }

    #[tokio::test]
    async fn test_commands_mutate_document() {
        let app = test_app();
        let (status, doc) = command(&app, json!({ "type": "add_skill_category", "name": "Languages" })).await;
        assert_eq!(status, StatusCode::OK);
        let category_id = doc["skills"]["technical"][0]["id"].as_str().unwrap().to_string();
        assert!(category_id.starts_with("cat"));

        for skill in ["Go", "Rust"] {
            command(
                &app,
                json!({ "type": "add_skill", "category_id": category_id, "skill": skill }),
            )
            .await;
        }
        let (_, doc) = command(
            &app,
            json!({ "type": "move_skill", "category_id": category_id, "from": 0, "to": 1 }),
        )
        .await;
        assert_eq!(doc["skills"]["technical"][0]["skills"], json!(["Rust", "Go"]));
    }

    #[tokio::test]
    async fn test_blank_category_name_is_rejected_with_notice() {
        let app = test_app();
        let (status, body) = command(&app, json!({ "type": "add_skill_category", "name": "  " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, session) = send_json(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(session["notice"]["level"], "error");
        assert_eq!(session["document"]["skills"]["technical"], json!([]));

        let (status, _) = send(&app, Method::DELETE, "/api/v1/session/notice", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, session) = send_json(&app, Method::GET, "/api/v1/session", None).await;
        assert!(session["notice"].is_null());
    }

    #[tokio::test]
    async fn test_missing_target_is_ignored_but_bad_move_is_rejected() {
        let app = test_app();
        let (status, _) = command(&app, json!({ "type": "remove_experience", "id": "exp404" })).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = command(&app, json!({ "type": "move_experience", "from": 0, "to": 3 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_drag_reorders_experience() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/document/sample", None).await;

        send(
            &app,
            Method::POST,
            "/api/v1/document/drag",
            Some(json!({ "event": "start", "list": { "kind": "experience" }, "index": 3 })),
        )
        .await;
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/v1/document/drag",
            Some(json!({ "event": "hover", "index": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["moved"], true);
        assert_eq!(body["document"]["experience"][0]["id"], "exp4");
        send(&app, Method::POST, "/api/v1/document/drag", Some(json!({ "event": "end" }))).await;
    }

    #[tokio::test]
    async fn test_template_save_edit_load_restores() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/document/sample", None).await;

        let (status, saved) = send_json(
            &app,
            Method::POST,
            "/api/v1/templates",
            Some(json!({ "name": "Backend" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = saved["id"].as_str().unwrap().to_string();

        command(&app, json!({ "type": "set_name", "value": "Someone Else" })).await;

        let (status, doc) = send_json(&app, Method::POST, &format!("/api/v1/templates/{id}/load"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["name"], "Sarah Chen");

        let (_, session) = send_json(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(session["notice"]["message"], "Template \"Backend\" loaded successfully!");

        let (_, list) = send_json(&app, Method::GET, "/api/v1/templates", None).await;
        assert_eq!(list["templates"][0]["name"], "Backend");
        assert!(list["templates"][0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_template_validation_and_not_found() {
        let app = test_app();
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/v1/templates",
            Some(json!({ "name": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please enter a template name");

        let (status, _) = send(&app, Method::POST, "/api/v1/templates/template1/load", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/api/v1/templates/template1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_template_removes_it() {
        let app = test_app();
        let (_, saved) = send_json(
            &app,
            Method::POST,
            "/api/v1/templates",
            Some(json!({ "name": "Temp" })),
        )
        .await;
        let id = saved["id"].as_str().unwrap().to_string();
        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/templates/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, list) = send_json(&app, Method::GET, "/api/v1/templates", None).await;
        assert_eq!(list["templates"], json!([]));
    }

    #[tokio::test]
    async fn test_storage_failures_raise_error_notice() {
        let seeded = json!([{
            "id": "template1",
            "name": "Kept",
            "data": crate::models::document::Document::blank(),
            "createdAt": "2024-01-01T00:00:00Z"
        }])
        .to_string();
        let app = test_app_with(Arc::new(ReadOnlyKvStore { seeded: Some(seeded) }));

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/v1/templates",
            Some(json!({ "name": "Backend" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");
        let (_, session) = send_json(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(session["notice"]["level"], "error");
        assert_eq!(
            session["notice"]["message"],
            "Templates could not be saved to local storage. Please try again."
        );

        send(&app, Method::DELETE, "/api/v1/session/notice", None).await;
        let (status, _) = send(&app, Method::DELETE, "/api/v1/templates/template1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (_, session) = send_json(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(session["notice"]["level"], "error");

        // Both failed writes were rolled back.
        let (_, list) = send_json(&app, Method::GET, "/api/v1/templates", None).await;
        assert_eq!(list["templates"].as_array().unwrap().len(), 1);
        assert_eq!(list["templates"][0]["name"], "Kept");
    }

    #[tokio::test]
    async fn test_loading_missing_template_raises_notice() {
        let app = test_app();
        let (status, _) = send(&app, Method::POST, "/api/v1/templates/template9/load", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, session) = send_json(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(session["notice"]["level"], "error");
    }

    #[tokio::test]
    async fn test_previews_render_html() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/document/sample", None).await;

        let (status, html) = send(&app, Method::GET, "/api/v1/preview", None).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(html).unwrap();
        assert!(html.contains("var(--muted-foreground)"));

        let (status, html) = send(&app, Method::GET, "/api/v1/preview/print", None).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(html).unwrap();
        assert!(html.contains("min-width:850px"));
        assert!(!html.contains("var(--"));
    }

    #[tokio::test]
    async fn test_export_returns_pdf_attachment() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/document/sample", None).await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/export")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Sarah Chen.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let (_, session) = send_json(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(session["notice"]["message"], "PDF exported successfully!");
        assert_eq!(session["export_enabled"], true);
    }
}
