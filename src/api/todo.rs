//! Todo Endpoints
//!
//! `/api/todos` calls and the gateway the submit flows run against.

use async_trait::async_trait;
use gloo_net::http::Request;
use todo_recurrence::flow::TodoGateway;
use todo_recurrence::{
    ApiError, CreateTodoRequest, DeleteTodoRequest, TodoId, TodoResponse, UpdateTodoRequest,
};

use super::{network_error, read_envelope, require_data};
use crate::config::api_url;

const TODOS_PATH: &str = "/api/todos";

fn todo_path(id: TodoId) -> String {
    format!("{}/{}", TODOS_PATH, id)
}

fn encode_error(err: gloo_net::Error) -> ApiError {
    ApiError::Decode(err.to_string())
}

// ========================
// Endpoints
// ========================

pub async fn list_todos() -> Result<Vec<TodoResponse>, ApiError> {
    let response = Request::get(&api_url(TODOS_PATH))
        .send()
        .await
        .map_err(network_error)?;
    let todos: Vec<TodoResponse> = read_envelope(response).await?.unwrap_or_default();
    tracing::debug!("loaded {} todos", todos.len());
    Ok(todos)
}

pub async fn get_todo(id: TodoId) -> Result<TodoResponse, ApiError> {
    let response = Request::get(&api_url(&todo_path(id)))
        .send()
        .await
        .map_err(network_error)?;
    require_data(read_envelope(response).await?)
}

pub async fn create_todo(request: &CreateTodoRequest) -> Result<TodoResponse, ApiError> {
    let response = Request::post(&api_url(TODOS_PATH))
        .json(request)
        .map_err(encode_error)?
        .send()
        .await
        .map_err(network_error)?;
    require_data(read_envelope(response).await?)
}

pub async fn update_todo(id: TodoId, request: &UpdateTodoRequest) -> Result<TodoResponse, ApiError> {
    let response = Request::patch(&api_url(&todo_path(id)))
        .json(request)
        .map_err(encode_error)?
        .send()
        .await
        .map_err(network_error)?;
    require_data(read_envelope(response).await?)
}

pub async fn delete_todo(request: &DeleteTodoRequest) -> Result<(), ApiError> {
    let response = Request::delete(&api_url(&request.path()))
        .send()
        .await
        .map_err(network_error)?;
    read_envelope::<serde_json::Value>(response).await?;
    Ok(())
}

// ========================
// Gateway
// ========================

/// Submit flows talk to the backend through this
#[derive(Debug, Clone, Copy, Default)]
pub struct RestTodoGateway;

#[async_trait(?Send)]
impl TodoGateway for RestTodoGateway {
    async fn create_todo(&self, request: &CreateTodoRequest) -> Result<TodoResponse, ApiError> {
        create_todo(request).await
    }

    async fn update_todo(&self, id: TodoId, request: &UpdateTodoRequest) -> Result<TodoResponse, ApiError> {
        update_todo(id, request).await
    }

    async fn delete_todo(&self, request: &DeleteTodoRequest) -> Result<(), ApiError> {
        delete_todo(request).await
    }
}
