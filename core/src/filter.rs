//! Remote and local filter criteria, and the local filtering pass.
//!
//! # Design
//! Criteria are split by where they are resolved. Remote criteria become query
//! parameters; a field left at `None` is omitted from the query entirely, and
//! any `Some` value is sent as-is, including `false`, `0` and the empty string.
//! Local criteria are case-insensitive substring matches applied after the
//! fetch, ANDed together, followed by an optional truncation to `limit`.

use crate::types::{Todo, User, UserRole};

/// Criteria the remote store understands.
pub trait RemoteCriteria {
    /// Query parameters for the criteria that are present, in a stable order.
    fn params(&self) -> Vec<(&'static str, String)>;
}

/// Criteria resolved on the client after the fetch.
pub trait LocalCriteria<R> {
    /// Whether `record` satisfies every present substring criterion.
    fn admits(&self, record: &R) -> bool;

    /// Maximum number of records to keep, if any.
    fn limit(&self) -> Option<usize>;
}

/// Keep the records admitted by `criteria`, in their original order, then
/// truncate to the criteria's limit. The input is left untouched.
pub fn filter_local<R, C>(records: &[R], criteria: &C) -> Vec<R>
where
    R: Clone,
    C: LocalCriteria<R>,
{
    let admitted = records.iter().filter(|record| criteria.admits(record));
    match criteria.limit() {
        Some(limit) => admitted.take(limit).cloned().collect(),
        None => admitted.cloned().collect(),
    }
}

/// Case-insensitive substring test. An absent needle admits everything.
fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

/// Server-side todo criteria: `category` and `status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoQuery {
    pub category: Option<String>,
    pub status: Option<bool>,
}

impl RemoteCriteria for TodoQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        params
    }
}

/// Client-side todo criteria: substring of `owner` and `body`, plus `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub owner: Option<String>,
    pub body: Option<String>,
    pub limit: Option<usize>,
}

impl LocalCriteria<Todo> for TodoFilter {
    fn admits(&self, todo: &Todo) -> bool {
        contains_ci(&todo.owner, self.owner.as_deref()) && contains_ci(&todo.body, self.body.as_deref())
    }

    fn limit(&self) -> Option<usize> {
        self.limit
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Server-side user criteria: exact `role` and `age`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub role: Option<UserRole>,
    pub age: Option<u32>,
}

impl RemoteCriteria for UserQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(role) = self.role {
            params.push(("role", role.to_string()));
        }
        if let Some(age) = self.age {
            params.push(("age", age.to_string()));
        }
        params
    }
}

/// Client-side user criteria: substring of `name` and `company`, plus `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub company: Option<String>,
    pub limit: Option<usize>,
}

impl LocalCriteria<User> for UserFilter {
    fn admits(&self, user: &User) -> bool {
        contains_ci(&user.name, self.name.as_deref()) && contains_ci(&user.company, self.company.as_deref())
    }

    fn limit(&self) -> Option<usize> {
        self.limit
    }
}
