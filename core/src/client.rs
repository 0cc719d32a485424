//! Stateless HTTP request builder and response parser for the roster API.
//!
//! # Design
//! `ApiClient` holds only the API root URL and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`, both
//! generic over the [`Resource`] being addressed. Whoever executes the
//! round-trip in between (a `Transport`, or the host driving a controller)
//! stays outside the core, which keeps it deterministic.

use serde::Deserialize;

use crate::error::ApiError;
use crate::filter::RemoteCriteria;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Resource;

/// Body of a successful create: the identifier the store assigned.
#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

/// Synchronous, stateless client for the roster API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_url: String,
}

impl ApiClient {
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}/{}", self.api_url, R::COLLECTION)
    }

    pub fn build_list<R: Resource>(&self, query: &R::Query) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.collection_url::<R>(),
            query: query
                .params()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get<R: Resource>(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/{id}", self.collection_url::<R>()),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create<R: Resource>(&self, input: &R::New) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.collection_url::<R>(),
            query: Vec::new(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_list<R: Resource>(&self, response: HttpResponse) -> Result<Vec<R>, ApiError> {
        ensure_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// A 404 is an answer, not a failure: it yields `Ok(None)`.
    pub fn parse_get<R: Resource>(&self, response: HttpResponse) -> Result<Option<R>, ApiError> {
        match ensure_success(&response) {
            Ok(()) => serde_json::from_str(&response.body)
                .map(Some)
                .map_err(|e| ApiError::DeserializationError(e.to_string())),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<String, ApiError> {
        ensure_success(&response)?;
        let created: Created =
            serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(created.id)
    }
}

/// Any 2xx is success: stores differ on 200 vs 201 for a create. A 404 is
/// `NotFound`; every other status keeps its code and body in `HttpError`.
fn ensure_success(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{TodoQuery, UserQuery};
    use crate::types::{NewTodo, Todo, User, UserRole};

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:4567/api")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_without_criteria_has_no_query() {
        let req = client().build_list::<Todo>(&TodoQuery::default());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:4567/api/todos");
        assert!(req.query.is_empty());
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_with_status() {
        let query = TodoQuery {
            category: None,
            status: Some(true),
        };
        let req = client().build_list::<Todo>(&query);
        assert_eq!(req.query_param("status"), Some("true"));
        assert_eq!(req.query_param("category"), None);
    }

    #[test]
    fn build_list_with_multiple_criteria() {
        let query = TodoQuery {
            category: Some("Dog Stuff".to_string()),
            status: Some(false),
        };
        let req = client().build_list::<Todo>(&query);
        assert_eq!(req.query_param("category"), Some("Dog Stuff"));
        assert_eq!(req.query_param("status"), Some("false"));
    }

    #[test]
    fn build_list_users() {
        let query = UserQuery {
            role: Some(UserRole::Editor),
            age: None,
        };
        let req = client().build_list::<User>(&query);
        assert_eq!(req.url, "http://localhost:4567/api/users");
        assert_eq!(req.query, vec![("role".to_string(), "editor".to_string())]);
    }

    #[test]
    fn build_get_appends_id() {
        let req = client().build_get::<Todo>("daniel_id");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:4567/api/todos/daniel_id");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_sends_json_without_id() {
        let input = NewTodo {
            owner: "Daniel".to_string(),
            status: true,
            body: "Can I add this?".to_string(),
            category: "Test".to_string(),
        };
        let req = client().build_create::<Todo>(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:4567/api/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["owner"], "Daniel");
        assert_eq!(body["status"], true);
        assert!(body.get("_id").is_none());
    }

    #[test]
    fn parse_list_success() {
        let todos = client()
            .parse_list::<Todo>(response(
                200,
                r#"[{"_id":"a","owner":"Fry","status":true,"body":"lorem ipsum","category":"video games"}]"#,
            ))
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].owner, "Fry");
    }

    #[test]
    fn parse_list_server_error() {
        let err = client().parse_list::<Todo>(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client().parse_list::<Todo>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_get_found() {
        let todo = client()
            .parse_get::<Todo>(response(
                200,
                r#"{"_id":"daniel_id","owner":"Daniel","status":false,"body":"Need to work on lab 3","category":"Homework"}"#,
            ))
            .unwrap();
        assert_eq!(todo.map(|t| t.id), Some("daniel_id".to_string()));
    }

    #[test]
    fn parse_get_not_found_is_none() {
        let todo = client().parse_get::<Todo>(response(404, "")).unwrap();
        assert!(todo.is_none());
    }

    #[test]
    fn parse_get_bad_request_is_error() {
        let err = client().parse_get::<Todo>(response(400, "bad id")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    }

    #[test]
    fn parse_create_returns_id() {
        let id = client()
            .parse_create(response(201, r#"{"id":"5f2b6d7e8a9b0c1d2e3f4a5b"}"#))
            .unwrap();
        assert_eq!(id, "5f2b6d7e8a9b0c1d2e3f4a5b");
    }

    #[test]
    fn parse_create_rejected() {
        let err = client().parse_create(response(400, "Todo must have a non-empty owner")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    }

    #[test]
    fn parse_create_accepts_ok_and_created() {
        for status in [200, 201] {
            let id = client().parse_create(response(status, r#"{"id":"abc"}"#)).unwrap();
            assert_eq!(id, "abc", "status {status}");
        }
    }

    #[test]
    fn parse_create_redirect_is_error() {
        let err = client().parse_create(response(302, "")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 302, .. }));
    }

    #[test]
    fn parse_list_accepts_any_2xx() {
        let todos = client().parse_list::<Todo>(response(203, "[]")).unwrap();
        assert!(todos.is_empty());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:4567/api/");
        let req = client.build_list::<User>(&UserQuery::default());
        assert_eq!(req.url, "http://localhost:4567/api/users");
    }
}
