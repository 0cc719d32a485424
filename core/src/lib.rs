//! Client core for the roster users/todos service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and drives the three screens
//! of the front-end as plain state machines:
//!
//! - [`ListController`]: one outstanding remote fetch, local refinement of its
//!   result, card/list view mode.
//! - [`DetailController`]: one record resolved from the navigation path.
//! - [`CreateController`]: a validated draft submitted to the store.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only the API root URL.
//! - Every operation is split into `build_*` and `parse_*`, generic over the
//!   [`Resource`] (`Todo`, `User`) being addressed.
//! - Controllers return a [`PendingRequest`] and receive its outcome through
//!   `complete`; a newer request always supersedes an older one.
//! - [`RecordService`] glues builder, [`Transport`] and parser together for
//!   callers that can block.
//! - Record types are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod create;
pub mod detail;
pub mod error;
pub mod filter;
pub mod form;
pub mod http;
pub mod list;
pub mod notify;
pub mod pending;
pub mod route;
pub mod service;
pub mod settings;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use create::{CreateController, CreateState};
pub use detail::{DetailController, DetailState};
pub use error::{ApiError, FormInvalid, SubmitError};
pub use filter::{filter_local, LocalCriteria, RemoteCriteria, TodoFilter, TodoQuery, UserFilter, UserQuery};
pub use form::{FieldSpec, Form, Rule, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{ListController, ListState, ViewMode};
pub use notify::Notification;
pub use pending::{Completion, PendingRequest, Ticket};
pub use route::Route;
pub use service::RecordService;
pub use settings::ClientSettings;
pub use transport::{Transport, UreqTransport};
pub use types::{NewTodo, NewUser, Resource, Todo, User, UserRole};
