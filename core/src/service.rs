//! Blocking record service: build, execute, parse in one call.
//!
//! `RecordService` is the convenience face of the core for callers that are
//! happy to block on the network, such as scripts and the end-to-end suite.
//! Controllers do not use it; they hand their requests to the host instead so
//! that late results can be discarded.

use tracing::warn;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::filter;
use crate::transport::Transport;
use crate::types::Resource;

#[derive(Debug, Clone)]
pub struct RecordService<T> {
    client: ApiClient,
    transport: T,
}

impl<T: Transport> RecordService<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// One remote query with the given server-side criteria. Not retried.
    pub fn fetch<R: Resource>(&self, query: &R::Query) -> Result<Vec<R>, ApiError> {
        let request = self.client.build_list::<R>(query);
        let response = self.transport.execute(request)?;
        self.client.parse_list(response).inspect_err(|e| {
            warn!(collection = R::COLLECTION, error = %e, "fetch failed");
        })
    }

    /// `Ok(None)` when the store has no record with that id.
    pub fn fetch_by_id<R: Resource>(&self, id: &str) -> Result<Option<R>, ApiError> {
        let request = self.client.build_get::<R>(id);
        let response = self.transport.execute(request)?;
        self.client.parse_get(response)
    }

    /// Submit a new record and return the identifier the store assigned.
    pub fn create<R: Resource>(&self, input: &R::New) -> Result<String, ApiError> {
        let request = self.client.build_create::<R>(input)?;
        let response = self.transport.execute(request)?;
        self.client.parse_create(response).inspect_err(|e| {
            warn!(collection = R::COLLECTION, error = %e, "create rejected");
        })
    }

    pub fn filter_local<R: Resource>(&self, records: &[R], criteria: &R::Filter) -> Vec<R> {
        filter::filter_local(records, criteria)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::filter::{TodoFilter, TodoQuery};
    use crate::http::{HttpRequest, HttpResponse};
    use crate::types::{NewTodo, Todo};

    /// Replays canned responses and records what it was asked to do.
    struct Canned {
        responses: RefCell<Vec<Result<HttpResponse, ApiError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for &Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.responses.borrow_mut().remove(0)
        }
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    const TODOS: &str = r#"[
        {"_id":"arthur_id","owner":"Arthur","status":false,"body":"Dutch needs more money","category":"Camp Task"},
        {"_id":"daniel_id","owner":"Daniel","status":false,"body":"Need to work on lab 3","category":"Homework"}
    ]"#;

    #[test]
    fn fetch_sends_only_present_criteria() {
        let canned = Canned::new(vec![ok(200, TODOS)]);
        let service = RecordService::new(ApiClient::new("http://store/api"), &canned);
        let query = TodoQuery {
            category: None,
            status: Some(false),
        };
        let todos: Vec<Todo> = service.fetch(&query).unwrap();
        assert_eq!(todos.len(), 2);
        let seen = canned.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].query, vec![("status".to_string(), "false".to_string())]);
    }

    #[test]
    fn fetch_is_not_retried() {
        let canned = Canned::new(vec![ok(503, "down"), ok(200, TODOS)]);
        let service = RecordService::new(ApiClient::new("http://store/api"), &canned);
        let err = service.fetch::<Todo>(&TodoQuery::default()).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 503, .. }));
        assert_eq!(canned.seen.borrow().len(), 1);
    }

    #[test]
    fn transport_failure_propagates() {
        let canned = Canned::new(vec![Err(ApiError::Transport("refused".to_string()))]);
        let service = RecordService::new(ApiClient::new("http://store/api"), &canned);
        let err = service.fetch_by_id::<Todo>("x").unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn fetch_by_id_not_found_is_none() {
        let canned = Canned::new(vec![ok(404, "")]);
        let service = RecordService::new(ApiClient::new("http://store/api"), &canned);
        assert_eq!(service.fetch_by_id::<Todo>("nobody").unwrap(), None);
        assert_eq!(canned.seen.borrow()[0].url, "http://store/api/todos/nobody");
    }

    #[test]
    fn create_returns_assigned_id() {
        let canned = Canned::new(vec![ok(201, r#"{"id":"abc123"}"#)]);
        let service = RecordService::new(ApiClient::new("http://store/api"), &canned);
        let input = NewTodo {
            owner: "Daniel".to_string(),
            status: true,
            body: "Can I add this?".to_string(),
            category: "Test".to_string(),
        };
        assert_eq!(service.create::<Todo>(&input).unwrap(), "abc123");
    }

    #[test]
    fn filter_local_delegates() {
        let canned = Canned::new(vec![ok(200, TODOS)]);
        let service = RecordService::new(ApiClient::new("http://store/api"), &canned);
        let todos: Vec<Todo> = service.fetch(&TodoQuery::default()).unwrap();
        let criteria = TodoFilter {
            body: Some("WORK".to_string()),
            ..Default::default()
        };
        let kept = service.filter_local(&todos, &criteria);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].owner, "Daniel");
    }
}
