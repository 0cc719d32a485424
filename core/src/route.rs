//! Static path-to-screen mapping.
//!
//! `/<collection>/new` is matched before `/<collection>/<id>`, otherwise the
//! literal `new` would be taken for a record id.

use std::fmt;

use crate::types::Resource;

const COLLECTIONS: &[&str] = &["users", "todos"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    List { collection: &'static str },
    New { collection: &'static str },
    Detail { collection: &'static str, id: String },
}

impl Route {
    pub fn detail<R: Resource>(id: impl Into<String>) -> Self {
        Route::Detail {
            collection: R::COLLECTION,
            id: id.into(),
        }
    }

    /// Resolve a navigation path. Query strings and fragments are ignored;
    /// unknown collections, empty segments and deeper paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Home);
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        let collection = *COLLECTIONS.iter().find(|c| **c == segments[0])?;

        match &segments[1..] {
            [] => Some(Route::List { collection }),
            ["new"] => Some(Route::New { collection }),
            [id] => Some(Route::Detail {
                collection,
                id: id.to_string(),
            }),
            _ => None,
        }
    }

    /// Identifier of a detail route for collection `R`.
    pub fn detail_id<R: Resource>(&self) -> Option<&str> {
        match self {
            Route::Detail { collection, id } if *collection == R::COLLECTION => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::List { collection } => format!("/{collection}"),
            Route::New { collection } => format!("/{collection}/new"),
            Route::Detail { collection, id } => format!("/{collection}/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
