// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use indexmap::IndexMap;
use parking_lot::Mutex;
use thiserror::Error;

use crate::domain::shared::models::{StatusKey, TaskId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("Unknown task {0}")]
    UnknownTask(TaskId),
    #[error("Unknown status column {0}")]
    UnknownStatus(StatusKey),
}

/// Everything needed to undo one optimistic move. `generation` is the task's
/// move counter at capture time; a rollback only applies while no later move
/// touched the task.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveContext {
    pub task: TaskId,
    pub from: StatusKey,
    pub from_index: usize,
    pub to: StatusKey,
    pub generation: u64,
}

#[derive(Default)]
struct BoardState {
    /// Column contents in display order. Every task lives in exactly one
    /// column.
    columns: IndexMap<StatusKey, Vec<TaskId>>,
    /// Per-task move counter, bumped on every mutation that touches the task.
    generations: HashMap<TaskId, u64>,
}

impl BoardState {
    fn position(&self, task: TaskId) -> Option<(StatusKey, usize)> {
        self.columns.iter().find_map(|(status, tasks)| {
            tasks
                .iter()
                .position(|&candidate| candidate == task)
                .map(|idx| (status.clone(), idx))
        })
    }

    fn bump(&mut self, task: TaskId) -> u64 {
        let generation = self.generations.entry(task).or_insert(0);
        *generation += 1;
        *generation
    }

    fn remove(&mut self, task: TaskId) -> Option<(StatusKey, usize)> {
        let (status, idx) = self.position(task)?;
        self.columns[&status].remove(idx);
        Some((status, idx))
    }

    fn insert(&mut self, status: &StatusKey, index: usize, task: TaskId) {
        let column = self.columns.entry(status.clone()).or_default();
        let index = index.min(column.len());
        column.insert(index, task);
    }
}

/// The task board's column model with optimistic moves. A move is applied
/// immediately, then either confirmed with the server's canonical status or
/// rolled back to the exact prior position.
#[derive(Default)]
pub struct Board {
    state: Mutex<BoardState>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the board contents, keeping the given column order.
    pub fn load(&self, columns: Vec<(StatusKey, Vec<TaskId>)>) {
        let mut state = self.state.lock();
        state.columns = columns.into_iter().collect();
        state.generations.clear();
    }

    pub fn column(&self, status: &StatusKey) -> Vec<TaskId> {
        self.state
            .lock()
            .columns
            .get(status)
            .cloned()
            .unwrap_or_default()
    }

    /// Per-column task counts, derived from column membership so they can
    /// never drift out of sync with the lists.
    pub fn counts(&self) -> IndexMap<StatusKey, usize> {
        self.state
            .lock()
            .columns
            .iter()
            .map(|(status, tasks)| (status.clone(), tasks.len()))
            .collect()
    }

    pub fn status_of(&self, task: TaskId) -> Option<StatusKey> {
        self.state.lock().position(task).map(|(status, _)| status)
    }

    /// Applies a move optimistically and returns the context needed to undo
    /// it. Returns `Ok(None)` for a drop back into the task's current column,
    /// which requires no server round-trip.
    pub fn begin_move(
        &self,
        task: TaskId,
        to: &StatusKey,
        index: usize,
    ) -> Result<Option<MoveContext>, BoardError> {
        let mut state = self.state.lock();

        if !state.columns.contains_key(to) {
            return Err(BoardError::UnknownStatus(to.clone()));
        }

        let (from, from_index) = state.position(task).ok_or(BoardError::UnknownTask(task))?;
        if &from == to {
            return Ok(None);
        }

        state.remove(task);
        state.insert(to, index, task);
        let generation = state.bump(task);

        Ok(Some(MoveContext {
            task,
            from,
            from_index,
            to: to.clone(),
            generation,
        }))
    }

    /// Confirms an optimistic move, adopting the server's canonical status
    /// when it differs from the one applied locally. Returns the statuses
    /// whose columns changed.
    pub fn confirm_move(&self, context: &MoveContext, canonical: &StatusKey) -> Vec<StatusKey> {
        let mut state = self.state.lock();

        if canonical == &context.to {
            return vec![];
        }

        let Some((current, current_idx)) = state.position(context.task) else {
            return vec![];
        };
        if current != context.to {
            // A later move already relocated the task.
            return vec![];
        }

        state.columns[&current].remove(current_idx);
        let canonical_len = state
            .columns
            .get(canonical)
            .map(|column| column.len())
            .unwrap_or_default();
        state.insert(canonical, canonical_len, context.task);
        state.bump(context.task);
        vec![current, canonical.clone()]
    }

    /// Undoes an optimistic move, restoring the task to its exact former
    /// position. Stale contexts, captured before a later move of the same
    /// task, are ignored.
    pub fn roll_back(&self, context: &MoveContext) -> bool {
        let mut state = self.state.lock();

        if state.generations.get(&context.task).copied() != Some(context.generation) {
            return false;
        }

        if state.remove(context.task).is_none() {
            return false;
        }
        state.insert(&context.from, context.from_index, context.task);
        state.bump(context.task);
        true
    }

    /// Applies a status change another client made. The task moves to the end
    /// of the target column.
    pub fn apply_remote(&self, task: TaskId, status: &StatusKey) -> Option<Vec<StatusKey>> {
        let mut state = self.state.lock();

        let (from, _) = state.position(task)?;
        if &from == status {
            return None;
        }

        state.remove(task);
        let len = state
            .columns
            .get(status)
            .map(|column| column.len())
            .unwrap_or_default();
        state.insert(status, len, task);
        state.bump(task);
        Some(vec![from, status.clone()])
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.columns.clear();
        state.generations.clear();
    }
}
