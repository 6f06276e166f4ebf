use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::editor::session::EditorSession;
use crate::export::Exporter;
use crate::templates::store::TemplateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single live document plus view mode, drag and notice.
    pub session: Arc<Mutex<EditorSession>>,
    pub templates: Arc<Mutex<TemplateStore>>,
    /// Pluggable rasterizer lives inside. Default: printpdf.
    pub exporter: Arc<Exporter>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, templates: TemplateStore, exporter: Exporter) -> Self {
        AppState {
            session: Arc::new(Mutex::new(EditorSession::new())),
            templates: Arc::new(Mutex::new(templates)),
            exporter: Arc::new(exporter),
            config,
        }
    }
}
