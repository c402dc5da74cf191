//! Todo API models
//!
//! Request/response shapes of the documented business routes. The routes
//! themselves are served elsewhere; these types only feed MODEL fragments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of `POST /todo`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    /// Short title of the todo
    pub title: String,
    /// Free-form details
    pub body: String,
}

/// Response of `POST /todo`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoResponse {
    pub todo_id: Uuid,
}

/// Item of the `GET /todo` listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoSummary {
    pub todo_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /todo/{todoId}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub todo_id: Uuid,
    pub title: String,
    pub body: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
