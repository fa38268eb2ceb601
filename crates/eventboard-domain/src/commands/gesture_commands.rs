use super::Command;
use crate::reorder::{apply_gesture, translate_gesture, DragGesture};
use crate::{TaskCriteria, Workspace};
use chrono::Local;
use eventboard_core::BoardResult;

/// Apply a completed drag gesture to the selected board.
///
/// With `criteria` set the gesture indices are read as positions in the
/// filtered view and remapped first; without it they are storage indices.
pub struct ApplyGesture {
    pub gesture: DragGesture,
    pub criteria: Option<TaskCriteria>,
}

impl ApplyGesture {
    pub fn new(gesture: DragGesture) -> Self {
        Self {
            gesture,
            criteria: None,
        }
    }

    pub fn filtered(gesture: DragGesture, criteria: TaskCriteria) -> Self {
        Self {
            gesture,
            criteria: Some(criteria),
        }
    }
}

impl Command for ApplyGesture {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        workspace.update_current(|board| {
            let gesture = match &self.criteria {
                Some(criteria) if criteria.has_active_filters() => {
                    match translate_gesture(board, criteria, &self.gesture, Local::now()) {
                        Some(gesture) => gesture,
                        None => {
                            tracing::debug!("Gesture does not match the filtered view, ignored");
                            return Ok(board.clone());
                        }
                    }
                }
                _ => self.gesture.clone(),
            };
            Ok(apply_gesture(board, &gesture))
        })
    }

    fn description(&self) -> String {
        format!(
            "Drag {:?} from '{}'[{}]",
            self.gesture.kind, self.gesture.source.container, self.gesture.source.index
        )
    }
}
