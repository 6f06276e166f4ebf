use axum::{extract::State, response::Html};

use crate::render::preview::render_preview;
use crate::render::print::{build_print_document, to_inline_html};
use crate::state::AppState;

/// GET /api/v1/preview
pub async fn handle_preview(State(state): State<AppState>) -> Html<String> {
    let document = state.session.lock().await.snapshot();
    Html(render_preview(&document))
}

/// GET /api/v1/preview/print
/// The export-safe rendering, exactly as the exporter lays it out.
pub async fn handle_print_preview(State(state): State<AppState>) -> Html<String> {
    let document = state.session.lock().await.snapshot();
    let print = build_print_document(&document);
    Html(to_inline_html(&print, state.config.export_min_width_px))
}
