//! Kanban task board: a REST backend over an in-memory task store and a
//! board client keeping three status columns in sync with optimistic
//! updates.

/// HTTP handlers and route configuration
pub mod api;
/// Board client: transport trait and optimistic column state
pub mod client;
/// Environment-backed configuration
pub mod config;
/// Task entity and request payloads
pub mod models;
/// Task store
pub mod repository;
/// Domain layer between handlers and the store
pub mod services;

pub use config::Config;
pub use models::task::{Task, TaskStatus};
pub use repository::database::{Database, DeleteOutcome};
pub use services::task_service::TaskService;

use thiserror::Error;

/// Result type for task board operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Error types shared by the server and the board client
#[derive(Error, Debug)]
pub enum TaskError {
    /// A required input field was missing or empty
    #[error("missing required fields {0}")]
    Validation(String),

    /// No task exists with the given id
    #[error("task not found: {0}")]
    NotFound(String),

    /// The task store failed
    #[error("storage error: {0}")]
    Storage(String),

    /// The HTTP request could not be performed
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server returned {status}: {message}")]
    Response { status: u16, message: String },

    /// JSON serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
