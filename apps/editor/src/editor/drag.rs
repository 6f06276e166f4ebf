//! Drag adapter: turns a stream of hover crossings into `move_item` calls.
//!
//! Reordering happens on every crossing, not on drop, so the list always shows
//! where the dragged item would land. After each move the tracker records the
//! item's new index so the next crossing computes the right delta.

use serde::{Deserialize, Serialize};

use crate::editor::reorder::{move_item, ReorderError};

/// Which list a drag operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragList {
    Experience,
    SkillCategories,
    Skills { category_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent {
    Start {
        list: DragList,
        index: usize,
    },
    Hover {
        index: usize,
    },
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveDrag {
    pub list: DragList,
    pub index: usize,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        DragTracker { active: None }
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    pub fn start(&mut self, list: DragList, index: usize) {
        self.active = Some(ActiveDrag { list, index });
    }

    /// Handles the dragged item crossing into `target`.
    ///
    /// `items` must be the sequence named by the active drag. Returns `true` if
    /// a move was issued. Hovering the item's own position, or hovering with no
    /// drag in progress, does nothing.
    pub fn hover<T>(&mut self, items: &mut Vec<T>, target: usize) -> Result<bool, ReorderError> {
        let Some(active) = self.active.as_mut() else {
            return Ok(false);
        };
        if active.index == target {
            return Ok(false);
        }
        move_item(items, active.index, target)?;
        active.index = target;
        Ok(true)
    }

    pub fn end(&mut self) -> Option<ActiveDrag> {
        self.active.take()
    }
}
