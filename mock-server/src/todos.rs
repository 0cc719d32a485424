use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::{contains_ci, is_descending, is_valid_id, new_id, Db};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

#[derive(Deserialize)]
pub struct NewTodo {
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

type Rejection = (StatusCode, String);

fn bad_request(message: impl Into<String>) -> Rejection {
    (StatusCode::BAD_REQUEST, message.into())
}

/// `owner`, `category`: case-insensitive substring. `contains`: substring of
/// the body, must not be empty. `status`: exactly `true` or `false`.
/// `sortby` (default `owner`) and `sortorder` (`asc` | `desc`).
pub async fn list_todos(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Todo>>, Rejection> {
    let status = match params.get("status").map(String::as_str) {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(other) => {
            debug!(status = other, "rejecting todo query");
            return Err(bad_request("Illegal status sent"));
        }
    };
    if params.get("contains").is_some_and(|body| body.is_empty()) {
        return Err(bad_request("Illegal body filter sent"));
    }

    let store = db.read().await;
    let mut todos: Vec<Todo> = store
        .todos
        .iter()
        .filter(|t| params.get("owner").is_none_or(|o| contains_ci(&t.owner, o)))
        .filter(|t| params.get("contains").is_none_or(|b| contains_ci(&t.body, b)))
        .filter(|t| params.get("category").is_none_or(|c| contains_ci(&t.category, c)))
        .filter(|t| status.is_none_or(|s| t.status == s))
        .cloned()
        .collect();

    let sort_by = params.get("sortby").map_or("owner", String::as_str);
    todos.sort_by(|a, b| match sort_by {
        "owner" => a.owner.cmp(&b.owner),
        "body" => a.body.cmp(&b.body),
        "category" => a.category.cmp(&b.category),
        "status" => a.status.cmp(&b.status),
        _ => std::cmp::Ordering::Equal,
    });
    if is_descending(params.get("sortorder")) {
        todos.reverse();
    }
    Ok(Json(todos))
}

pub async fn get_todo(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Todo>, Rejection> {
    if !is_valid_id(&id) {
        return Err(bad_request("The requested todo id wasn't a legal id."));
    }
    let store = db.read().await;
    store
        .todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "The requested todo was not found".to_string()))
}

pub async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<NewTodo>,
) -> Result<(StatusCode, Json<Value>), Rejection> {
    if input.owner.is_empty() {
        return Err(bad_request("Todo must have a non-empty todo owner"));
    }
    if input.body.is_empty() {
        return Err(bad_request("Todo must have a non-empty todo body"));
    }
    if input.category.is_empty() {
        return Err(bad_request("Todo must have a non-empty category name"));
    }

    let todo = Todo {
        id: new_id(),
        owner: input.owner,
        status: input.status,
        body: input.body,
        category: input.category,
    };
    debug!(id = %todo.id, owner = %todo.owner, "todo created");
    let id = todo.id.clone();
    db.write().await.todos.push(todo);
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
