use std::future::Future;

use chrono::Utc;

use crate::client::api::TaskApi;
use crate::models::task::{CreateTaskRequest, Task, TaskPatch, TaskStatus};
use crate::Result;

/// Three disjoint columns mirroring server state. The board is a disposable
/// cache: [`Board::refresh`] rebuilds it from a full fetch, every mutation
/// is applied optimistically and rolled back if the server call fails.
#[derive(Debug, Clone, Default)]
pub struct Board {
    to_do: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut board = Board::new();
        for task in tasks {
            board.column_mut(task.status).push(task);
        }
        board
    }

    pub async fn refresh(&mut self, api: &impl TaskApi) -> Result<()> {
        *self = Board::from_tasks(api.fetch_tasks().await?);
        Ok(())
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::ToDo => &self.to_do,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::ToDo => &mut self.to_do,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.to_do
            .iter()
            .chain(self.in_progress.iter())
            .chain(self.done.iter())
    }

    pub fn len(&self) -> usize {
        self.to_do.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn locate(&self, id: &str) -> Option<(TaskStatus, usize)> {
        for status in TaskStatus::ALL {
            if let Some(index) = self.column(status).iter().position(|task| task.id == id) {
                return Some((status, index));
            }
        }
        None
    }

    fn replace(&mut self, id: &str, confirmed: Task) {
        if let Some((status, index)) = self.locate(id) {
            self.column_mut(status)[index] = confirmed;
        }
    }

    /// Snapshot, apply the tentative change, await the server; on failure
    /// the snapshot is restored.
    async fn apply_confirmed<T, Fut>(
        &mut self,
        tentative: impl FnOnce(&mut Self),
        request: Fut,
    ) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let snapshot = self.clone();
        tentative(self);
        match request.await {
            Ok(confirmed) => Ok(confirmed),
            Err(err) => {
                log::warn!("server rejected board change, rolling back: {}", err);
                *self = snapshot;
                Err(err)
            }
        }
    }

    /// Drag-initiated move. No-ops when the task is unknown or when source
    /// and destination are identical; otherwise splices the task into the
    /// destination column and confirms with a PUT carrying the new status.
    pub async fn move_task(
        &mut self,
        api: &impl TaskApi,
        id: &str,
        to_status: TaskStatus,
        to_index: usize,
    ) -> Result<()> {
        let (from_status, from_index) = match self.locate(id) {
            Some(found) => found,
            None => return Ok(()),
        };
        if from_status == to_status && from_index == to_index {
            return Ok(());
        }

        let patch = TaskPatch {
            status: Some(to_status),
            ..TaskPatch::default()
        };
        let request = api.update_task(id, &patch);
        let confirmed = self
            .apply_confirmed(
                |board| {
                    let mut task = board.column_mut(from_status).remove(from_index);
                    task.status = to_status;
                    task.updated_at = Utc::now();
                    let insert_at = to_index.min(board.column(to_status).len());
                    board.column_mut(to_status).insert(insert_at, task);
                },
                request,
            )
            .await?;
        self.replace(id, confirmed);
        Ok(())
    }

    /// Optimistically inserts a placeholder entry, then swaps in the
    /// persisted entity so the server-assigned id is never duplicated.
    pub async fn add_task(
        &mut self,
        api: &impl TaskApi,
        title: String,
        description: String,
        status: TaskStatus,
    ) -> Result<Task> {
        let placeholder_id = format!("pending-{}", uuid::Uuid::new_v4());
        let body = CreateTaskRequest {
            title: Some(title.clone()),
            description: Some(description.clone()),
            status: Some(status),
        };
        let now = Utc::now();
        let placeholder = Task {
            id: placeholder_id.clone(),
            title,
            description,
            status,
            created_at: now,
            updated_at: now,
        };

        let request = api.create_task(&body);
        let confirmed = self
            .apply_confirmed(|board| board.column_mut(status).push(placeholder), request)
            .await?;
        self.replace(&placeholder_id, confirmed.clone());
        Ok(confirmed)
    }

    pub async fn update_task(
        &mut self,
        api: &impl TaskApi,
        id: &str,
        patch: TaskPatch,
    ) -> Result<()> {
        if self.locate(id).is_none() {
            return Ok(());
        }

        let tentative = patch.clone();
        let request = api.update_task(id, &patch);
        let confirmed = self
            .apply_confirmed(
                |board| {
                    let (status, index) = match board.locate(id) {
                        Some(found) => found,
                        None => return,
                    };
                    let mut task = board.column_mut(status).remove(index);
                    if let Some(title) = tentative.title {
                        task.title = title;
                    }
                    if let Some(description) = tentative.description {
                        task.description = description;
                    }
                    if let Some(new_status) = tentative.status {
                        task.status = new_status;
                    }
                    task.updated_at = Utc::now();
                    let dest = task.status;
                    if dest == status {
                        board.column_mut(status).insert(index, task);
                    } else {
                        board.column_mut(dest).push(task);
                    }
                },
                request,
            )
            .await?;
        self.replace(id, confirmed);
        Ok(())
    }

    pub async fn delete_task(&mut self, api: &impl TaskApi, id: &str) -> Result<()> {
        if self.locate(id).is_none() {
            return Ok(());
        }

        let request = api.delete_task(id);
        self.apply_confirmed(
            |board| {
                if let Some((status, index)) = board.locate(id) {
                    board.column_mut(status).remove(index);
                }
            },
            request,
        )
        .await
    }
}
