//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use roster_core::{
    ApiClient, ApiError, HttpMethod, HttpRequest, HttpResponse, Resource, Todo, TodoQuery, User, UserQuery,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:4567/api";

fn client() -> ApiClient {
    ApiClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_target(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");
}

fn assert_expected_error(name: &str, err: ApiError, expected: &Value) {
    match expected.as_str().unwrap() {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
        "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn todo_query(value: &Value) -> TodoQuery {
    TodoQuery {
        category: value.get("category").map(|c| c.as_str().unwrap().to_string()),
        status: value.get("status").map(|s| s.as_bool().unwrap()),
    }
}

fn user_query(value: &Value) -> UserQuery {
    UserQuery {
        role: value.get("role").map(|r| r.as_str().unwrap().parse().unwrap()),
        age: value.get("age").map(|a| a.as_u64().unwrap() as u32),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

fn check_list<R>(name: &str, case: &Value, query: &R::Query)
where
    R: Resource + PartialEq,
{
    let c = client();
    let expected_req = &case["expected_request"];

    // Verify build
    let req = c.build_list::<R>(query);
    assert_target(name, &req, expected_req);
    assert_eq!(req.query, pairs(&expected_req["query"]), "{name}: query");
    assert!(req.body.is_none(), "{name}: body should be None");

    // Verify parse
    let records = c.parse_list::<R>(simulated(case)).unwrap();
    let expected: Vec<R> = serde_json::from_value(case["expected_result"].clone()).unwrap();
    assert_eq!(records, expected, "{name}: parsed result");
}

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        match case["resource"].as_str().unwrap() {
            "todos" => check_list::<Todo>(name, case, &todo_query(&case["query"])),
            "users" => check_list::<User>(name, case, &user_query(&case["query"])),
            other => panic!("{name}: unknown resource: {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

fn check_get<R>(name: &str, case: &Value)
where
    R: Resource + PartialEq,
{
    let c = client();
    let id = case["input_id"].as_str().unwrap();

    // Verify build
    let req = c.build_get::<R>(id);
    assert_target(name, &req, &case["expected_request"]);
    assert!(req.query.is_empty(), "{name}: query should be empty");
    assert!(req.body.is_none(), "{name}: body should be None");

    // Verify parse
    let result = c.parse_get::<R>(simulated(case));
    if let Some(expected_error) = case.get("expected_error") {
        assert_expected_error(name, result.unwrap_err(), expected_error);
    } else {
        let expected: Option<R> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(result.unwrap(), expected, "{name}: parsed result");
    }
}

#[test]
fn get_test_vectors() {
    let raw = include_str!("../../test-vectors/get.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        match case["resource"].as_str().unwrap() {
            "todos" => check_get::<Todo>(name, case),
            "users" => check_get::<User>(name, case),
            other => panic!("{name}: unknown resource: {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

fn check_create<R>(name: &str, case: &Value)
where
    R: Resource,
    R::New: DeserializeOwned,
{
    let c = client();
    let input: R::New = serde_json::from_value(case["input"].clone()).unwrap();
    let expected_req = &case["expected_request"];

    // Verify build
    let req = c.build_create::<R>(&input).unwrap();
    assert_target(name, &req, expected_req);
    assert_eq!(req.headers, pairs(&expected_req["headers"]), "{name}: headers");
    let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(req_body, expected_req["body"], "{name}: body");

    // Verify parse
    let result = c.parse_create(simulated(case));
    if let Some(expected_error) = case.get("expected_error") {
        assert_expected_error(name, result.unwrap_err(), expected_error);
    } else {
        assert_eq!(result.unwrap(), case["expected_result"].as_str().unwrap(), "{name}: parsed id");
    }
}

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        match case["resource"].as_str().unwrap() {
            "todos" => check_create::<Todo>(name, case),
            "users" => check_create::<User>(name, case),
            other => panic!("{name}: unknown resource: {other}"),
        }
    }
}
