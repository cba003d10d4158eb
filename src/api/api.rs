use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Serialize;

use crate::models::task::{CreateTaskRequest, TaskPatch};
use crate::repository::database::DeleteOutcome;
use crate::services::task_service::TaskService;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    fn new(message: &str) -> Self {
        ErrorResponse {
            message: message.to_string(),
            error: None,
        }
    }

    fn with_error(message: &str, error: impl ToString) -> Self {
        ErrorResponse {
            message: message.to_string(),
            error: Some(error.to_string()),
        }
    }
}

#[post("/tasks")]
pub async fn create_task(
    service: web::Data<TaskService>,
    body: web::Json<CreateTaskRequest>,
) -> HttpResponse {
    let CreateTaskRequest {
        title,
        description,
        status,
    } = body.into_inner();

    let title = title.unwrap_or_default();
    if title.trim().is_empty() || status.is_none() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("Missing required fields Title-Status"));
    }

    match service.create_task(title, description, status) {
        Ok(task) => HttpResponse::Created().json(task),
        Err(err) => HttpResponse::InternalServerError()
            .json(ErrorResponse::with_error("Error creating task", err)),
    }
}

#[get("/tasks")]
pub async fn get_tasks(service: web::Data<TaskService>) -> HttpResponse {
    match service.get_all_tasks() {
        Ok(tasks) => HttpResponse::Ok().json(tasks),
        Err(err) => HttpResponse::InternalServerError()
            .json(ErrorResponse::with_error("Error retrieving tasks", err)),
    }
}

#[put("/tasks/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    id: web::Path<String>,
    patch: web::Json<TaskPatch>,
) -> HttpResponse {
    // Check if task exists
    let existing = match service.get_task_by_id(&id) {
        Ok(task) => task,
        Err(err) => {
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::with_error("Error updating task", err))
        }
    };
    if existing.is_none() {
        return HttpResponse::NotFound().json(ErrorResponse::new("Task not found"));
    }

    match service.update_task(&id, patch.into_inner()) {
        Ok(Some(task)) => HttpResponse::Ok().json(task),
        // The task vanished between the lookup and the update
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new("Task not found")),
        Err(err) => HttpResponse::InternalServerError()
            .json(ErrorResponse::with_error("Error updating task", err)),
    }
}

#[delete("/tasks/{id}")]
pub async fn delete_task(service: web::Data<TaskService>, id: web::Path<String>) -> HttpResponse {
    match service.delete_task(&id) {
        Ok(DeleteOutcome::Deleted) => HttpResponse::NoContent().finish(),
        Ok(DeleteOutcome::NotFound) => {
            HttpResponse::NotFound().json(ErrorResponse::new("Task not found"))
        }
        Err(err) => HttpResponse::InternalServerError()
            .json(ErrorResponse::with_error("Error deleting task", err)),
    }
}

#[delete("/tasks")]
pub async fn delete_all_tasks(service: web::Data<TaskService>) -> HttpResponse {
    match service.delete_all_tasks() {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => HttpResponse::InternalServerError()
            .json(ErrorResponse::with_error("Error deleting tasks", err)),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create_task)
        .service(get_tasks)
        .service(update_task)
        .service(delete_all_tasks)
        .service(delete_task);
}
