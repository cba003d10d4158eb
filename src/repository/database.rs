use std::sync::{Arc, Mutex, MutexGuard};

use chrono::prelude::*;

use crate::models::task::{Task, TaskPatch, TaskStatus};
use crate::{Result, TaskError};

/// Delete result; a missing id is not an error, store failures travel as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// In-memory task store. Stands in for the database; the mutex is the unit
/// of atomicity, last write wins.
#[derive(Debug, Clone)]
pub struct Database {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        Database {
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Task>>> {
        self.tasks
            .lock()
            .map_err(|_| TaskError::Storage("task store lock poisoned".to_string()))
    }

    pub fn create(&self, title: String, description: String, status: TaskStatus) -> Result<Task> {
        let mut tasks = self.lock()?;
        let now = Utc::now();
        let task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description,
            status,
            created_at: now,
            updated_at: now,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    pub fn get_all(&self) -> Result<Vec<Task>> {
        let tasks = self.lock()?;
        Ok(tasks.clone())
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<Task>> {
        let tasks = self.lock()?;
        Ok(tasks.iter().find(|task| task.id == id).cloned())
    }

    pub fn update(&self, id: &str, patch: TaskPatch) -> Result<Option<Task>> {
        let mut tasks = self.lock()?;
        let index = match tasks.iter().position(|task| task.id == id) {
            Some(index) => index,
            None => return Ok(None),
        };
        let task = &mut tasks[index];
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    pub fn delete(&self, id: &str) -> Result<DeleteOutcome> {
        let mut tasks = self.lock()?;
        match tasks.iter().position(|task| task.id == id) {
            Some(index) => {
                tasks.remove(index);
                Ok(DeleteOutcome::Deleted)
            }
            None => Ok(DeleteOutcome::NotFound),
        }
    }

    pub fn clear(&self) -> Result<usize> {
        let mut tasks = self.lock()?;
        let removed = tasks.len();
        tasks.clear();
        Ok(removed)
    }
}
