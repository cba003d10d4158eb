use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::models::task::{CreateTaskRequest, Task, TaskPatch};
use crate::{Result, TaskError};

/// Transport seam for the board. Production uses [`RestApi`]; tests
/// substitute stubs.
#[async_trait]
pub trait TaskApi {
    async fn fetch_tasks(&self) -> Result<Vec<Task>>;
    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task>;
    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task>;
    async fn delete_task(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct RestApi {
    base_url: String,
    client: Client,
}

impl RestApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        RestApi {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

async fn checked(response: Response, id: Option<&str>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(TaskError::NotFound(id.unwrap_or("unknown").to_string()));
    }
    let message = response
        .json::<ApiMessage>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.to_string());
    Err(TaskError::Response {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TaskApi for RestApi {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let response = self.client.get(self.tasks_url()).send().await?;
        let tasks = checked(response, None).await?.json().await?;
        Ok(tasks)
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task> {
        let response = self
            .client
            .post(self.tasks_url())
            .json(request)
            .send()
            .await?;
        let task = checked(response, None).await?.json().await?;
        Ok(task)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let response = self
            .client
            .put(self.task_url(id))
            .json(patch)
            .send()
            .await?;
        let task = checked(response, Some(id)).await?.json().await?;
        Ok(task)
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let response = self.client.delete(self.task_url(id)).send().await?;
        checked(response, Some(id)).await?;
        Ok(())
    }
}
