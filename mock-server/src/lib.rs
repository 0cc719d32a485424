//! In-memory stand-in for the roster store.
//!
//! Serves `/api/todos` and `/api/users` with the server-side filtering the
//! client relies on, single-record lookup and creation. Records keep their
//! insertion order; identifiers are 24 hex characters like the document ids
//! of the production store.

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use serde::de::DeserializeOwned;
use tokio::{net::TcpListener, sync::RwLock};

pub mod error;
pub mod settings;
pub mod todos;
pub mod users;

pub use error::ServerError;
pub use settings::ServerSettings;
pub use todos::Todo;
pub use users::User;

/// Everything the store holds.
#[derive(Clone, Debug, Default)]
pub struct Store {
    pub todos: Vec<Todo>,
    pub users: Vec<User>,
}

impl Store {
    /// Load `todos.json` and `users.json` from `dir`. A missing file leaves
    /// that collection empty.
    pub fn from_seed_dir(dir: impl AsRef<Path>) -> Result<Self, ServerError> {
        let dir = dir.as_ref();
        Ok(Self {
            todos: read_seed(&dir.join("todos.json"))?,
            users: read_seed(&dir.join("users.json"))?,
        })
    }
}

fn read_seed<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ServerError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ServerError::SeedRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&raw).map_err(|source| ServerError::SeedParse {
        path: path.to_path_buf(),
        source,
    })
}

pub type Db = Arc<RwLock<Store>>;

/// Router over an empty store.
pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route("/todos/{id}", get(todos::get_todo))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}", get(users::get_user));
    Router::new().nest("/api", api).with_state(db)
}

pub async fn serve(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

/// Fresh 24-hex-character identifier.
pub(crate) fn new_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(24);
    id
}

pub(crate) fn is_valid_id(id: &str) -> bool {
    id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit())
}

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `sortorder=desc` reverses; anything else is ascending.
pub(crate) fn is_descending(order: Option<&String>) -> bool {
    order.is_some_and(|o| o == "desc")
}
