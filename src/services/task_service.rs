use crate::models::task::{Task, TaskPatch, TaskStatus};
use crate::repository::database::{Database, DeleteOutcome};
use crate::{Result, TaskError};

/// Thin domain layer: applies default field values and existence checks,
/// passes store failures through unchanged.
#[derive(Debug, Clone)]
pub struct TaskService {
    db: Database,
}

impl TaskService {
    pub fn new(db: Database) -> Self {
        TaskService { db }
    }

    /// Status defaults to "To Do" and description to empty when absent.
    pub fn create_task(
        &self,
        title: String,
        description: Option<String>,
        status: Option<TaskStatus>,
    ) -> Result<Task> {
        if title.trim().is_empty() {
            return Err(TaskError::Validation("Title".to_string()));
        }
        self.db.create(
            title,
            description.unwrap_or_default(),
            status.unwrap_or_default(),
        )
    }

    /// Order is whatever the store returns; callers must not rely on it.
    pub fn get_all_tasks(&self) -> Result<Vec<Task>> {
        self.db.get_all()
    }

    pub fn get_task_by_id(&self, id: &str) -> Result<Option<Task>> {
        self.db.get_by_id(id)
    }

    pub fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Option<Task>> {
        self.db.update(id, patch)
    }

    pub fn delete_task(&self, id: &str) -> Result<DeleteOutcome> {
        self.db.delete(id)
    }

    pub fn delete_all_tasks(&self) -> Result<usize> {
        self.db.clear()
    }
}
