//! PDF export of the export-safe projection.
//!
//! Flow: snapshot → print projection → reveal surface → settle delay →
//! measure → validate → rasterise → restore surface. The surface is restored
//! on every exit path, and only one export may run at a time.

pub mod handlers;
pub mod rasterizer;
pub mod surface;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::export::rasterizer::{PageSpec, RasterizeError, Rasterizer};
use crate::export::surface::{Display, ExportSurface, SurfaceStyle};
use crate::layout::{layout_print_document, Frame};
use crate::models::document::Document;
use crate::render::print::build_print_document;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PreparationError {
    #[error("Invalid element for PDF export: {0}")]
    InvalidElement(String),

    #[error("export surface has no dimensions ({width}x{height})")]
    Sizing { width: f32, height: f32 },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Preparation(#[from] PreparationError),

    #[error("rasterization failed: {0}")]
    Rasterization(#[from] RasterizeError),

    #[error("an export is already running")]
    InProgress,

    #[error("export failed: {0}")]
    Other(String),
}

impl ExportError {
    /// Actionable message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::Preparation(PreparationError::InvalidElement(_)) => {
                "Invalid content for PDF export. Please ensure the CV has valid data."
            }
            ExportError::Preparation(PreparationError::Sizing { .. }) => {
                "PDF export failed due to sizing issues. Please try again."
            }
            ExportError::Rasterization(_) => {
                "PDF export failed due to canvas rendering issue. Try using a different browser or reducing content complexity."
            }
            ExportError::InProgress => "A PDF export is already in progress.",
            ExportError::Other(_) => "Failed to export PDF. Please try again.",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Exporter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ExportSettings {
    pub settle_delay: Duration,
    pub min_width_px: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            settle_delay: Duration::from_millis(500),
            min_width_px: 850.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub page: PageSpec,
    pub bytes: Bytes,
}

pub struct Exporter {
    surface: ExportSurface,
    rasterizer: Arc<dyn Rasterizer>,
    settings: ExportSettings,
    running: AtomicBool,
}

/// Held for the duration of one export; clears the running flag on drop.
pub struct ExportTicket<'a>(&'a AtomicBool);

impl Drop for ExportTicket<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Checks the revealed surface and its measured frame before rasterising.
pub fn validate_surface(style: &SurfaceStyle, frame: &Frame) -> Result<(), PreparationError> {
    if style.display == Display::None {
        return Err(PreparationError::InvalidElement("surface is display: none".to_string()));
    }
    if !(frame.width > 0.0 && frame.height > 0.0) {
        return Err(PreparationError::Sizing {
            width: frame.width,
            height: frame.height,
        });
    }
    Ok(())
}

impl Exporter {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, settings: ExportSettings) -> Self {
        Exporter {
            surface: ExportSurface::new(settings.min_width_px),
            rasterizer,
            settings,
            running: AtomicBool::new(false),
        }
    }

    /// False while an export is running; the export action is disabled then.
    pub fn is_enabled(&self) -> bool {
        !self.running.load(Ordering::Acquire)
    }

    pub fn surface(&self) -> &ExportSurface {
        &self.surface
    }

    /// Claims the single export slot, or fails with `InProgress`.
    pub fn begin(&self) -> Result<ExportTicket<'_>, ExportError> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::InProgress)?;
        Ok(ExportTicket(&self.running))
    }

    /// Exports `document`, which the caller has already snapshotted; later
    /// edits to the live document cannot reach this export.
    pub async fn export(&self, document: Document) -> Result<ExportArtifact, ExportError> {
        let ticket = self.begin()?;
        self.export_with(ticket, document).await
    }

    /// Runs an export under a slot already claimed with [`Exporter::begin`].
    pub async fn export_with(
        &self,
        _ticket: ExportTicket<'_>,
        document: Document,
    ) -> Result<ExportArtifact, ExportError> {
        let print = build_print_document(&document);

        let _revealed = self.surface.reveal_guard();
        tokio::time::sleep(self.settings.settle_delay).await;

        let min_width = self.settings.min_width_px;
        let frame = tokio::task::spawn_blocking(move || layout_print_document(&print, min_width))
            .await
            .map_err(|e| ExportError::Other(format!("layout task failed: {e}")))?;
        debug!(width = frame.width, height = frame.height, items = frame.items.len(), "export surface measured");

        validate_surface(&self.surface.style(), &frame)?;

        let page = PageSpec::for_frame(&frame, min_width);
        let title = document.export_stem().to_string();
        let filename = format!("{title}.pdf");
        let bytes = self.rasterizer.rasterize(frame, page, title).await?;

        info!(%filename, bytes = bytes.len(), "pdf exported");
        Ok(ExportArtifact {
            filename,
            page,
            bytes,
        })
    }
}
