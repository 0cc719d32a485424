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

const ROLES: &[&str] = &["admin", "editor", "viewer"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: u32,
    pub company: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub company: String,
    pub email: String,
    pub role: String,
}

type Rejection = (StatusCode, String);

fn bad_request(message: impl Into<String>) -> Rejection {
    (StatusCode::BAD_REQUEST, message.into())
}

/// `role`: exact. `age`: exact, must be an integer. `company`:
/// case-insensitive substring. `sortby` (default `name`) and `sortorder`.
pub async fn list_users(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<User>>, Rejection> {
    let age = match params.get("age") {
        None => None,
        Some(raw) => match raw.parse::<u32>() {
            Ok(age) => Some(age),
            Err(_) => {
                debug!(age = %raw, "rejecting user query");
                return Err(bad_request(format!(
                    "Specified age '{raw}' can't be parsed to an integer"
                )));
            }
        },
    };

    let store = db.read().await;
    let mut users: Vec<User> = store
        .users
        .iter()
        .filter(|u| params.get("role").is_none_or(|r| &u.role == r))
        .filter(|u| age.is_none_or(|a| u.age == a))
        .filter(|u| params.get("company").is_none_or(|c| contains_ci(&u.company, c)))
        .cloned()
        .collect();

    let sort_by = params.get("sortby").map_or("name", String::as_str);
    users.sort_by(|a, b| match sort_by {
        "name" => a.name.cmp(&b.name),
        "age" => a.age.cmp(&b.age),
        "company" => a.company.cmp(&b.company),
        "email" => a.email.cmp(&b.email),
        "role" => a.role.cmp(&b.role),
        _ => std::cmp::Ordering::Equal,
    });
    if is_descending(params.get("sortorder")) {
        users.reverse();
    }
    Ok(Json(users))
}

pub async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<User>, Rejection> {
    if !is_valid_id(&id) {
        return Err(bad_request("The requested user id wasn't a legal id."));
    }
    let store = db.read().await;
    store
        .users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "The requested user was not found".to_string()))
}

pub async fn create_user(
    State(db): State<Db>,
    Json(input): Json<NewUser>,
) -> Result<(StatusCode, Json<Value>), Rejection> {
    if input.name.is_empty() {
        return Err(bad_request("User must have a non-empty user name"));
    }
    if input.age == 0 {
        return Err(bad_request("User's age must be greater than zero"));
    }
    if !input.email.contains('@') {
        return Err(bad_request("User must have a legal email"));
    }
    if !ROLES.contains(&input.role.as_str()) {
        return Err(bad_request("User must have a legal user role"));
    }

    let id = new_id();
    let user = User {
        avatar: Some(format!("https://gravatar.com/avatar/{id}?d=identicon")),
        id: id.clone(),
        name: input.name,
        age: input.age,
        company: input.company,
        email: input.email,
        role: input.role,
    };
    debug!(%id, name = %user.name, "user created");
    db.write().await.users.push(user);
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
