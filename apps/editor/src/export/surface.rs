//! The export surface: the separately rendered print tree and its style state.
//!
//! At rest the surface is parked off-screen and invisible. Export reveals it
//! at the origin for measurement and must always put the original style back,
//! which `RevealGuard` does on drop whether the export succeeded, failed or
//! was cancelled.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Fixed,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Display {
    Block,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceStyle {
    pub position: Position,
    pub top_px: f32,
    pub left_px: f32,
    pub visibility: Visibility,
    pub opacity: f32,
    pub z_index: i32,
    pub display: Display,
    pub min_width_px: f32,
}

impl SurfaceStyle {
    /// Parked off-screen, invisible and behind everything.
    pub fn hidden(min_width_px: f32) -> Self {
        SurfaceStyle {
            position: Position::Fixed,
            top_px: -9999.0,
            left_px: -9999.0,
            visibility: Visibility::Hidden,
            opacity: 0.0,
            z_index: -1,
            display: Display::Block,
            min_width_px,
        }
    }

    /// Laid out at the origin, on top, fully opaque.
    pub fn revealed(min_width_px: f32) -> Self {
        SurfaceStyle {
            position: Position::Absolute,
            top_px: 0.0,
            left_px: 0.0,
            visibility: Visibility::Visible,
            opacity: 1.0,
            z_index: 9999,
            display: Display::Block,
            min_width_px,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden && self.opacity == 0.0 && self.z_index < 0
    }
}

#[derive(Debug)]
pub struct ExportSurface {
    style: Mutex<SurfaceStyle>,
    min_width_px: f32,
}

impl ExportSurface {
    pub fn new(min_width_px: f32) -> Self {
        ExportSurface {
            style: Mutex::new(SurfaceStyle::hidden(min_width_px)),
            min_width_px,
        }
    }

    pub fn style(&self) -> SurfaceStyle {
        *self.style.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes the surface measurable and returns the style it had before.
    pub fn reveal(&self) -> SurfaceStyle {
        let mut style = self.style.lock().unwrap_or_else(PoisonError::into_inner);
        let original = *style;
        *style = SurfaceStyle {
            display: original.display,
            ..SurfaceStyle::revealed(self.min_width_px)
        };
        original
    }

    pub fn restore(&self, original: SurfaceStyle) {
        *self.style.lock().unwrap_or_else(PoisonError::into_inner) = original;
    }

    pub fn set_display(&self, display: Display) {
        self.style.lock().unwrap_or_else(PoisonError::into_inner).display = display;
    }

    /// Reveals the surface until the returned guard is dropped.
    pub fn reveal_guard(&self) -> RevealGuard<'_> {
        let original = self.reveal();
        RevealGuard {
            surface: self,
            original,
        }
    }
}

pub struct RevealGuard<'a> {
    surface: &'a ExportSurface,
    original: SurfaceStyle,
}

impl Drop for RevealGuard<'_> {
    fn drop(&mut self) {
        self.surface.restore(self.original);
    }
}
