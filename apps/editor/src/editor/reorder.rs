//! The reorder primitive shared by every reorderable list in the document.
//!
//! `move_item` is pure: it touches nothing but the slice it is given. Drag
//! handling, nudge buttons and command dispatch all route through it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("index out of range: from={from}, to={to}, len={len}")]
    OutOfRange { from: usize, to: usize, len: usize },
}

/// Direction of a single-step nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// Removes the element at `from` and reinserts it at `to` of the post-removal sequence.
///
/// Both indices must be `< len`. `from == to` leaves the sequence untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), ReorderError> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(ReorderError::OutOfRange { from, to, len });
    }
    if from == to {
        return Ok(());
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// Target index of a one-step nudge, clamped to the sequence bounds.
pub fn nudge_target(index: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Up => index.saturating_sub(1),
        Direction::Down => (index + 1).min(len.saturating_sub(1)),
    }
}

/// Moves `index` one step in `direction`. At either end this is a no-op.
pub fn nudge<T>(items: &mut Vec<T>, index: usize, direction: Direction) -> Result<(), ReorderError> {
    let to = nudge_target(index, items.len(), direction);
    move_item(items, index, to)
}
