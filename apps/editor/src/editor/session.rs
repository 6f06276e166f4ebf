//! Editor session: the explicit state container for the live document.
//!
//! Exactly one session exists per process; it sits behind a mutex in
//! `AppState`, so every mutation is applied whole under the lock.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::commands::{EditCommand, EditError};
use crate::editor::drag::{DragEvent, DragList, DragTracker};
use crate::editor::ids::IdGenerator;
use crate::models::document::Document;
use crate::models::samples::sample_document;
use crate::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Edit,
    Preview,
}

#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    mode: ViewMode,
    drag: DragTracker,
    ids: IdGenerator,
    notice: Option<Notice>,
}

impl Default for EditorSession {
    fn default() -> Self {
        EditorSession::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        EditorSession::with_document(Document::blank())
    }

    pub fn with_document(document: Document) -> Self {
        EditorSession {
            document,
            mode: ViewMode::Edit,
            drag: DragTracker::new(),
            ids: IdGenerator::new(),
            notice: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Value copy of the live document, independent of later edits.
    pub fn snapshot(&self) -> Document {
        self.document.clone()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Applies one edit. A command that changes the length or order of the
    /// list being dragged ends the drag, since its tracked index is stale.
    pub fn apply(&mut self, command: EditCommand) -> Result<(), EditError> {
        let ends_drag = self
            .drag
            .active()
            .is_some_and(|active| reshapes(&command, &active.list));
        command.apply(&mut self.document, &mut self.ids)?;
        if ends_drag {
            debug!("list changed under an active drag; drag ended");
            self.drag.end();
        }
        Ok(())
    }

    /// Feeds one pointer event to the drag adapter. Returns `true` if the
    /// document order changed.
    pub fn drag(&mut self, event: DragEvent) -> Result<bool, EditError> {
        match event {
            DragEvent::Start { list, index } => {
                self.drag.start(list, index);
                Ok(false)
            }
            DragEvent::Hover { index } => {
                let Some(active) = self.drag.active() else {
                    debug!(index, "hover without an active drag");
                    return Ok(false);
                };
                let moved = match active.list.clone() {
                    DragList::Experience => self.drag.hover(&mut self.document.experience, index)?,
                    DragList::SkillCategories => {
                        self.drag.hover(&mut self.document.skills.technical, index)?
                    }
                    DragList::Skills { category_id } => {
                        let category = self
                            .document
                            .skills
                            .technical
                            .iter_mut()
                            .find(|c| c.id == category_id)
                            .ok_or_else(|| {
                                EditError::NotFound(format!("skill category {category_id}"))
                            })?;
                        self.drag.hover(&mut category.skills, index)?
                    }
                };
                Ok(moved)
            }
            DragEvent::End => {
                self.drag.end();
                Ok(false)
            }
        }
    }

    /// Replaces the whole document. Nothing from the previous one survives.
    pub fn replace_document(&mut self, document: Document) {
        self.drag.end();
        self.document = document;
    }

    pub fn load_sample(&mut self) {
        self.replace_document(sample_document());
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

fn reshapes(command: &EditCommand, list: &DragList) -> bool {
    match (command, list) {
        (
            EditCommand::AddExperience
            | EditCommand::RemoveExperience { .. }
            | EditCommand::MoveExperience { .. },
            DragList::Experience,
        ) => true,
        (
            EditCommand::AddSkillCategory { .. }
            | EditCommand::RemoveSkillCategory { .. }
            | EditCommand::MoveSkillCategory { .. },
            DragList::SkillCategories,
        ) => true,
        (EditCommand::RemoveSkillCategory { id }, DragList::Skills { category_id }) => id == category_id,
        (
            EditCommand::AddSkill { category_id: target, .. }
            | EditCommand::RemoveSkill { category_id: target, .. }
            | EditCommand::MoveSkill { category_id: target, .. }
            | EditCommand::NudgeSkill { category_id: target, .. },
            DragList::Skills { category_id },
        ) => target == category_id,
        _ => false,
    }
}
