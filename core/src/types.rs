//! Record types for the roster API and the `Resource` trait that binds each
//! of them to its collection, criteria and creation form.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. A fetched record
//! always carries its `_id`, so `id` is a plain `String`. A record that has not
//! been created yet is a different type (`NewTodo`, `NewUser`) with no id at all.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::FormInvalid;
use crate::filter::{LocalCriteria, RemoteCriteria, TodoFilter, TodoQuery, UserFilter, UserQuery};
use crate::form::{FieldSpec, Form, Rule};

/// A record type served by the remote store under `/<COLLECTION>`.
///
/// Services and controllers are generic over this trait, so the users and
/// todos screens share one implementation.
pub trait Resource: Clone + fmt::Debug + DeserializeOwned {
    /// Creation payload: the record minus its identifier.
    type New: Serialize + fmt::Debug;
    /// Criteria resolved by the remote store.
    type Query: RemoteCriteria + Clone + Default + fmt::Debug;
    /// Criteria resolved locally after the fetch.
    type Filter: LocalCriteria<Self> + Clone + Default + fmt::Debug;

    /// Path segment under the API root, e.g. `"todos"`.
    const COLLECTION: &'static str;
    /// Human-readable noun used in notifications, e.g. `"Todo"`.
    const NOUN: &'static str;
    /// Field rules of the creation form.
    const FIELDS: &'static [FieldSpec];

    fn id(&self) -> &str;

    /// Build a creation payload from a fully valid form.
    fn new_from_form(form: &Form) -> Result<Self::New, FormInvalid>;

    /// Short label of a payload for the "added" notification.
    fn describe(new: &Self::New) -> &str;
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

const TODO_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "owner",
        label: "Owner",
        rules: &[Rule::Required, Rule::MinLength(2), Rule::MaxLength(50)],
    },
    FieldSpec {
        name: "category",
        label: "Category",
        rules: &[Rule::Required, Rule::MinLength(1), Rule::MaxLength(50)],
    },
    FieldSpec {
        name: "body",
        label: "Body",
        rules: &[Rule::Required, Rule::MinLength(1), Rule::MaxLength(300)],
    },
    FieldSpec {
        name: "status",
        label: "Status",
        rules: &[Rule::Required, Rule::OneOf(&["true", "false"])],
    },
];

impl Resource for Todo {
    type New = NewTodo;
    type Query = TodoQuery;
    type Filter = TodoFilter;

    const COLLECTION: &'static str = "todos";
    const NOUN: &'static str = "Todo";
    const FIELDS: &'static [FieldSpec] = TODO_FIELDS;

    fn id(&self) -> &str {
        &self.id
    }

    fn new_from_form(form: &Form) -> Result<NewTodo, FormInvalid> {
        form.ensure_valid()?;
        Ok(NewTodo {
            owner: form.value("owner").to_string(),
            status: parse_field(form, "status")?,
            body: form.value("body").to_string(),
            category: form.value("category").to_string(),
        })
    }

    fn describe(new: &NewTodo) -> &str {
        &new.owner
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Access level of a user; lower-case on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
    Viewer,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Editor => "editor",
            UserRole::Viewer => "viewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "editor" => Ok(UserRole::Editor),
            "viewer" => Ok(UserRole::Viewer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A single user returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: u32,
    pub company: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Request payload for creating a new user. The store assigns the avatar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
    pub company: String,
    pub email: String,
    pub role: UserRole,
}

const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        label: "Name",
        rules: &[Rule::Required, Rule::MinLength(2), Rule::MaxLength(50)],
    },
    FieldSpec {
        name: "age",
        label: "Age",
        rules: &[Rule::Required, Rule::WholeNumber, Rule::Min(15), Rule::Max(200)],
    },
    FieldSpec {
        name: "company",
        label: "Company",
        rules: &[],
    },
    FieldSpec {
        name: "email",
        label: "Email",
        rules: &[Rule::Required, Rule::Email],
    },
    FieldSpec {
        name: "role",
        label: "Role",
        rules: &[Rule::Required, Rule::OneOf(&["admin", "editor", "viewer"])],
    },
];

impl Resource for User {
    type New = NewUser;
    type Query = UserQuery;
    type Filter = UserFilter;

    const COLLECTION: &'static str = "users";
    const NOUN: &'static str = "User";
    const FIELDS: &'static [FieldSpec] = USER_FIELDS;

    fn id(&self) -> &str {
        &self.id
    }

    fn new_from_form(form: &Form) -> Result<NewUser, FormInvalid> {
        form.ensure_valid()?;
        Ok(NewUser {
            name: form.value("name").to_string(),
            age: parse_field(form, "age")?,
            company: form.value("company").to_string(),
            email: form.value("email").to_string(),
            role: parse_field(form, "role")?,
        })
    }

    fn describe(new: &NewUser) -> &str {
        &new.name
    }
}

/// Parse a validated field into its typed value; a mismatch between rules and
/// parser is reported as that field being invalid.
fn parse_field<T: FromStr>(form: &Form, name: &'static str) -> Result<T, FormInvalid> {
    form.value(name)
        .parse()
        .map_err(|_| FormInvalid { fields: vec![name] })
}
