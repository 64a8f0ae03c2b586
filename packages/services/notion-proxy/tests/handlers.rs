mod common;

use std::collections::HashMap;

use common::StubNotion;
use notion_client::NotionClientError;
use notion_proxy::handlers::{self, ProxyRequest, RequestBody};
use notion_proxy::routes::route_table;
use notion_proxy::{map_error, NormalizedError};
use serde_json::{json, Value};

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn with_params(pairs: &[(&str, &str)]) -> ProxyRequest {
    ProxyRequest::new(params(pairs), Vec::new(), RequestBody::Empty)
}

#[tokio::test]
async fn missing_path_params_are_bad_requests_without_remote_call() {
    let stub = StubNotion::ok(json!({"object": "page"}));
    let ctx = stub.context();

    for route in route_table().into_iter().filter(|r| !r.handler.params.is_empty()) {
        let res = handlers::handle(&ctx, route.handler, with_params(&[])).await;
        assert_eq!(res, Err(NormalizedError::bad_request()), "{} {}", route.method, route.path);

        let blanks: Vec<(&str, &str)> = route.handler.params.iter().map(|b| (b.route, "  ")).collect();
        let res = handlers::handle(&ctx, route.handler, with_params(&blanks)).await;
        assert_eq!(res, Err(NormalizedError::bad_request()), "{} {}", route.method, route.path);
    }
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn provider_errors_are_mapped_like_the_error_mapper() {
    let stub = StubNotion::not_found();
    let ctx = stub.context();

    let res = handlers::handle(&ctx, &handlers::blocks::RETRIEVE, with_params(&[("id", "missing")])).await;
    let expected = map_error(&NotionClientError::Api {
        status: 404,
        code: notion_client::ApiErrorCode::ObjectNotFound,
        message: "Not found".into(),
    });
    assert_eq!(res, Err(expected));
    assert_eq!(res, Err(NormalizedError::new(404, "Not found")));
}

#[tokio::test]
async fn unknown_http_response_keeps_its_status() {
    let stub = StubNotion::replying(|_| {
        Err(NotionClientError::UnknownHttpResponse { status: 502, message: "Request to Notion API failed with status: 502".into() })
    });
    let res = handlers::handle(&stub.context(), &handlers::users::LIST, with_params(&[])).await;
    assert_eq!(res, Err(NormalizedError::new(502, "Request to Notion API failed with status: 502")));
}

#[tokio::test]
async fn other_errors_are_internal() {
    let stub = StubNotion::replying(|_| Err(NotionClientError::InvalidArgument("boom".into())));
    let res = handlers::handle(&stub.context(), &handlers::search::SEARCH, with_params(&[])).await;
    assert_eq!(res, Err(NormalizedError::new(500, "Internal Server Error")));

    let stub = StubNotion::replying(|_| Err(NotionClientError::InvalidResponse(serde_json::from_str::<Value>("{").unwrap_err())));
    let res = handlers::handle(&stub.context(), &handlers::users::RETRIEVE, with_params(&[("id", "u1")])).await;
    assert_eq!(res, Err(NormalizedError::internal()));
}

#[tokio::test]
async fn timeout_is_gateway_timeout() {
    let stub = StubNotion::replying(|_| Err(NotionClientError::RequestTimeout));
    let res = handlers::handle(&stub.context(), &handlers::pages::RETRIEVE, with_params(&[("id", "p1")])).await;
    assert_eq!(res, Err(NormalizedError::new(504, "Request to Notion API timed out")));
}

#[tokio::test]
async fn success_returns_remote_object_verbatim() {
    let remote = json!({"object": "block", "id": "abc123", "type": "paragraph", "paragraph": {"rich_text": []}});
    let stub = StubNotion::ok(remote.clone());
    let res = handlers::handle(&stub.context(), &handlers::blocks::RETRIEVE, with_params(&[("id", "abc123")])).await;
    assert_eq!(res, Ok(remote));
    assert_eq!(stub.calls(), vec![("blocks.retrieve", json!({"block_id": "abc123"}))]);
}

#[tokio::test]
async fn path_params_are_renamed_and_win_over_body() {
    let stub = StubNotion::echo();
    let req = ProxyRequest::new(
        params(&[("id", "db1")]),
        Vec::new(),
        RequestBody::Json(json!({"database_id": "other", "title": [{"text": {"content": "Tasks"}}]})),
    );
    let res = handlers::handle(&stub.context(), &handlers::databases::UPDATE, req).await.unwrap();
    assert_eq!(res, json!({"database_id": "db1", "title": [{"text": {"content": "Tasks"}}]}));
}

#[tokio::test]
async fn page_property_binds_both_params() {
    let stub = StubNotion::echo();
    let req = ProxyRequest::new(
        params(&[("id", "p1"), ("property_id", "title")]),
        vec![("page_size".into(), "5".into())],
        RequestBody::Empty,
    );
    let res = handlers::handle(&stub.context(), &handlers::pages::RETRIEVE_PROPERTY, req).await.unwrap();
    assert_eq!(res, json!({"page_id": "p1", "property_id": "title", "page_size": "5"}));
}

#[tokio::test]
async fn body_that_is_not_an_object_is_rejected() {
    let stub = StubNotion::echo();
    for body in [RequestBody::Malformed, RequestBody::Json(json!([1, 2])), RequestBody::Json(json!("text"))] {
        let req = ProxyRequest::new(params(&[("id", "b1")]), Vec::new(), body);
        let res = handlers::handle(&stub.context(), &handlers::blocks::APPEND_CHILDREN, req).await;
        assert_eq!(res, Err(NormalizedError::bad_request()));
    }
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn empty_body_is_an_empty_argument_object() {
    let stub = StubNotion::echo();
    let res = handlers::handle(&stub.context(), &handlers::search::SEARCH, with_params(&[])).await.unwrap();
    assert_eq!(res, json!({}));
}

#[tokio::test]
async fn query_input_ignores_body_and_body_input_ignores_query() {
    let stub = StubNotion::echo();
    let req = ProxyRequest::new(
        params(&[("id", "b1")]),
        vec![("start_cursor".into(), "c1".into())],
        RequestBody::Json(json!({"children": []})),
    );
    let res = handlers::handle(&stub.context(), &handlers::blocks::LIST_CHILDREN, req.clone()).await.unwrap();
    assert_eq!(res, json!({"block_id": "b1", "start_cursor": "c1"}));

    let res = handlers::handle(&stub.context(), &handlers::blocks::APPEND_CHILDREN, req).await.unwrap();
    assert_eq!(res, json!({"block_id": "b1", "children": []}));
}
