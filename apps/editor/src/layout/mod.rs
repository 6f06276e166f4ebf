// Print layout: static font metrics, greedy word-wrap and the frame measurer.
// Measuring is CPU-bound; the exporter runs it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod frame;
pub mod wrap;

pub use frame::{layout_print_document, Frame, FrameItem};
