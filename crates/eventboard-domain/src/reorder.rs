//! Drag reorder engine.
//!
//! A completed drag gesture is applied to a board as a single store
//! operation. The engine works on storage indices only; gestures captured
//! against a filtered view go through [`translate_gesture`] first.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::filter::TaskCriteria;
use crate::query::{filter_tasks_indexed, IndexedTask};
use crate::Board;

/// Container name used for column gestures; columns live on the board itself.
pub const BOARD_CONTAINER: &str = "board";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Column,
    Task,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub container: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container: impl Into<String>, index: usize) -> Self {
        Self {
            container: container.into(),
            index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragGesture {
    pub kind: DragKind,
    pub source: DragLocation,
    /// `None` when the item was dropped outside any target.
    pub destination: Option<DragLocation>,
}

impl DragGesture {
    pub fn column(from: usize, to: usize) -> Self {
        Self {
            kind: DragKind::Column,
            source: DragLocation::new(BOARD_CONTAINER, from),
            destination: Some(DragLocation::new(BOARD_CONTAINER, to)),
        }
    }

    pub fn task(
        source_column: impl Into<String>,
        source_index: usize,
        dest_column: impl Into<String>,
        dest_index: usize,
    ) -> Self {
        Self {
            kind: DragKind::Task,
            source: DragLocation::new(source_column, source_index),
            destination: Some(DragLocation::new(dest_column, dest_index)),
        }
    }

    pub fn cancelled(kind: DragKind, source: DragLocation) -> Self {
        Self {
            kind,
            source,
            destination: None,
        }
    }

    /// Dropped back where it started.
    pub fn is_stationary(&self) -> bool {
        self.destination
            .as_ref()
            .is_some_and(|dest| *dest == self.source)
    }
}

/// Apply a gesture expressed in storage indices.
///
/// Cancelled and stationary gestures return an identical board, history
/// included.
pub fn apply_gesture(board: &Board, gesture: &DragGesture) -> Board {
    let Some(destination) = gesture.destination.as_ref() else {
        tracing::trace!("Drag cancelled, nothing to apply");
        return board.clone();
    };
    if gesture.is_stationary() {
        return board.clone();
    }

    match gesture.kind {
        DragKind::Column => board.reorder_column(gesture.source.index, destination.index),
        DragKind::Task => board.move_task(
            &gesture.source.container,
            gesture.source.index,
            &destination.container,
            destination.index,
        ),
    }
}

/// Remap a task gesture captured on the filtered view into storage indices.
///
/// The destination index is read as "position among the visible tasks once
/// the dragged one is lifted out". Dropping past the last visible task
/// lands right after it, or at the end of the column when nothing is
/// visible there. Returns `None` when the source index does not point at a
/// visible task or a named column does not exist. Column gestures pass
/// through unchanged.
pub fn translate_gesture<Tz>(
    board: &Board,
    criteria: &TaskCriteria,
    gesture: &DragGesture,
    now: DateTime<Tz>,
) -> Option<DragGesture>
where
    Tz: TimeZone + 'static,
{
    if gesture.kind == DragKind::Column {
        return Some(gesture.clone());
    }

    let source_column = board.column(&gesture.source.container)?;
    let source_visible = filter_tasks_indexed(&source_column.tasks, criteria, now.clone());
    let source_index = source_visible.get(gesture.source.index)?.index;
    let source = DragLocation::new(gesture.source.container.clone(), source_index);

    let Some(destination) = gesture.destination.as_ref() else {
        return Some(DragGesture::cancelled(DragKind::Task, source));
    };
    if gesture.is_stationary() {
        return Some(DragGesture {
            kind: DragKind::Task,
            destination: Some(source.clone()),
            source,
        });
    }

    let dest_column = board.column(&destination.container)?;
    let same_column = destination.container == gesture.source.container;

    let reduced: Vec<IndexedTask> = filter_tasks_indexed(&dest_column.tasks, criteria, now)
        .into_iter()
        .filter(|visible| !(same_column && visible.index == source_index))
        .collect();

    let raw_index = match reduced.get(destination.index) {
        Some(before) => before.index,
        None => reduced
            .last()
            .map_or(dest_column.tasks.len(), |last| last.index + 1),
    };
    // Storage positions past the lifted task shift down once it is removed.
    let dest_index = if same_column && raw_index > source_index {
        raw_index - 1
    } else {
        raw_index
    };

    Some(DragGesture {
        kind: DragKind::Task,
        source,
        destination: Some(DragLocation::new(destination.container.clone(), dest_index)),
    })
}
