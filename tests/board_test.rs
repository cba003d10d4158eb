use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use taskboard::client::api::TaskApi;
use taskboard::client::board::Board;
use taskboard::models::task::{CreateTaskRequest, Task, TaskPatch, TaskStatus};
use taskboard::{Result, TaskError};

fn task(id: &str, title: &str, status: TaskStatus) -> Task {
    let now = Utc::now();
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        status,
        created_at: now,
        updated_at: now,
    }
}

fn server_down() -> TaskError {
    TaskError::Response {
        status: 500,
        message: "server unavailable".to_string(),
    }
}

/// Every call fails, as if the network were down.
struct FailingApi;

#[async_trait]
impl TaskApi for FailingApi {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        Err(server_down())
    }

    async fn create_task(&self, _request: &CreateTaskRequest) -> Result<Task> {
        Err(server_down())
    }

    async fn update_task(&self, _id: &str, _patch: &TaskPatch) -> Result<Task> {
        Err(server_down())
    }

    async fn delete_task(&self, _id: &str) -> Result<()> {
        Err(server_down())
    }
}

/// In-memory stand-in for the real server.
struct ServerApi {
    tasks: Mutex<Vec<Task>>,
}

impl ServerApi {
    fn new(tasks: Vec<Task>) -> Self {
        ServerApi {
            tasks: Mutex::new(tasks),
        }
    }
}

#[async_trait]
impl TaskApi for ServerApi {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task> {
        let mut tasks = self.tasks.lock().unwrap();
        let now = Utc::now();
        let task = Task {
            id: format!("srv-{}", tasks.len() + 1),
            title: request.title.clone().unwrap_or_default(),
            description: request.description.clone().unwrap_or_default(),
            status: request.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        if let Some(title) = patch.title.clone() {
            task.title = title;
        }
        if let Some(description) = patch.description.clone() {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter().position(|task| task.id == id) {
            Some(index) => {
                tasks.remove(index);
                Ok(())
            }
            None => Err(TaskError::NotFound(id.to_string())),
        }
    }
}

#[tokio::test]
async fn test_failed_move_reverts_to_source_column() {
    let mut board = Board::from_tasks(vec![
        task("t1", "Write report", TaskStatus::ToDo),
        task("t2", "Review PR", TaskStatus::ToDo),
    ]);

    let result = board.move_task(&FailingApi, "t1", TaskStatus::Done, 0).await;
    assert!(result.is_err());

    let to_do = board.column(TaskStatus::ToDo);
    assert_eq!(to_do.len(), 2);
    assert_eq!(to_do[0].id, "t1");
    assert_eq!(to_do[0].status, TaskStatus::ToDo);
    assert!(board.column(TaskStatus::Done).is_empty());
}

#[tokio::test]
async fn test_successful_move_lands_in_destination() {
    let tasks = vec![task("t1", "Write report", TaskStatus::ToDo)];
    let api = ServerApi::new(tasks.clone());
    let mut board = Board::from_tasks(tasks);

    board
        .move_task(&api, "t1", TaskStatus::Done, 0)
        .await
        .unwrap();

    assert!(board.column(TaskStatus::ToDo).is_empty());
    let done = board.column(TaskStatus::Done);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, "t1");
    assert_eq!(done[0].status, TaskStatus::Done);
}

#[tokio::test]
async fn test_move_to_same_position_is_a_noop() {
    let mut board = Board::from_tasks(vec![task("t1", "Write report", TaskStatus::ToDo)]);

    // No server call must happen; FailingApi would turn one into an error.
    board
        .move_task(&FailingApi, "t1", TaskStatus::ToDo, 0)
        .await
        .unwrap();

    assert_eq!(board.column(TaskStatus::ToDo).len(), 1);
}

#[tokio::test]
async fn test_move_of_unknown_task_is_a_noop() {
    let mut board = Board::new();
    board
        .move_task(&FailingApi, "ghost", TaskStatus::Done, 0)
        .await
        .unwrap();
    assert!(board.is_empty());
}

#[tokio::test]
async fn test_add_replaces_placeholder_without_duplicating() {
    let api = ServerApi::new(Vec::new());
    let mut board = Board::new();

    let created = board
        .add_task(
            &api,
            "Write report".to_string(),
            "quarterly numbers".to_string(),
            TaskStatus::ToDo,
        )
        .await
        .unwrap();

    assert_eq!(created.id, "srv-1");
    let to_do = board.column(TaskStatus::ToDo);
    assert_eq!(to_do.len(), 1);
    assert_eq!(to_do[0].id, "srv-1");
    assert!(board.tasks().all(|t| !t.id.starts_with("pending-")));
}

#[tokio::test]
async fn test_failed_add_rolls_back() {
    let mut board = Board::new();

    let result = board
        .add_task(
            &FailingApi,
            "Write report".to_string(),
            String::new(),
            TaskStatus::ToDo,
        )
        .await;

    assert!(result.is_err());
    assert!(board.is_empty());
}

#[tokio::test]
async fn test_failed_update_keeps_original_fields() {
    let mut board = Board::from_tasks(vec![task("t1", "Original title", TaskStatus::ToDo)]);

    let patch = TaskPatch {
        title: Some("Changed title".to_string()),
        ..TaskPatch::default()
    };
    let result = board.update_task(&FailingApi, "t1", patch).await;
    assert!(result.is_err());

    assert_eq!(board.column(TaskStatus::ToDo)[0].title, "Original title");
}

#[tokio::test]
async fn test_update_moving_status_changes_column() {
    let tasks = vec![task("t1", "Write report", TaskStatus::ToDo)];
    let api = ServerApi::new(tasks.clone());
    let mut board = Board::from_tasks(tasks);

    let patch = TaskPatch {
        status: Some(TaskStatus::InProgress),
        ..TaskPatch::default()
    };
    board.update_task(&api, "t1", patch).await.unwrap();

    assert!(board.column(TaskStatus::ToDo).is_empty());
    assert_eq!(board.column(TaskStatus::InProgress).len(), 1);
}

#[tokio::test]
async fn test_failed_delete_restores_the_row() {
    let mut board = Board::from_tasks(vec![
        task("t1", "Write report", TaskStatus::ToDo),
        task("t2", "Review PR", TaskStatus::ToDo),
    ]);

    let result = board.delete_task(&FailingApi, "t1").await;
    assert!(result.is_err());

    let to_do = board.column(TaskStatus::ToDo);
    assert_eq!(to_do.len(), 2);
    assert_eq!(to_do[0].id, "t1");
}

#[tokio::test]
async fn test_successful_delete_removes_the_row() {
    let tasks = vec![task("t1", "Write report", TaskStatus::ToDo)];
    let api = ServerApi::new(tasks.clone());
    let mut board = Board::from_tasks(tasks);

    board.delete_task(&api, "t1").await.unwrap();
    assert!(board.is_empty());
}

#[tokio::test]
async fn test_refresh_partitions_tasks_by_status() {
    let api = ServerApi::new(vec![
        task("t1", "Task 1", TaskStatus::ToDo),
        task("t2", "Task 2", TaskStatus::InProgress),
        task("t3", "Task 3", TaskStatus::Done),
        task("t4", "Task 4", TaskStatus::Done),
    ]);
    let mut board = Board::new();

    board.refresh(&api).await.unwrap();

    assert_eq!(board.column(TaskStatus::ToDo).len(), 1);
    assert_eq!(board.column(TaskStatus::InProgress).len(), 1);
    assert_eq!(board.column(TaskStatus::Done).len(), 2);
    assert_eq!(board.len(), 4);
}
