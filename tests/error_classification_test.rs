//! Mock API tests for the failure taxonomy: every HTTP outcome maps to one
//! variant of [`restbound::RestError`].

mod support;

use restbound::prelude::*;
use serde_json::json;
use std::time::Duration;
use support::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_status(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

async fn call(server: &MockServer) -> Result<serde_json::Value, RestError> {
    let builder = builder_for(&server.uri());
    let provider = ApiProvider::builder::<SearchAdapter>()
        .config_name("billing")
        .build();
    builder.send_request(&provider, json!({"q": "x"})).await
}

#[tokio::test]
async fn not_found_is_its_own_variant() {
    let server = MockServer::start().await;
    mock_status(&server, 404, r#"{"message":"no such order"}"#).await;

    let err = call(&server).await.unwrap_err();
    match &err {
        RestError::NotFound { service, body } => {
            assert!(service.ends_with("search_adapter"), "{service}");
            assert!(body.contains("no such order"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.category(), ErrorCategory::External);
}

#[tokio::test]
async fn client_errors_with_a_body_are_business_failures() {
    let server = MockServer::start().await;
    mock_status(&server, 422, r#"{"errors":["quantity must be positive"]}"#).await;

    let err = call(&server).await.unwrap_err();
    match &err {
        RestError::Business { status, body, .. } => {
            assert_eq!(*status, 422);
            assert!(body.contains("quantity must be positive"));
        }
        other => panic!("expected Business, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn client_errors_without_a_body_are_service_failures() {
    let server = MockServer::start().await;
    mock_status(&server, 403, "").await;

    let err = call(&server).await.unwrap_err();
    assert!(
        matches!(&err, RestError::Service { status: Some(403), .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn server_errors_are_service_failures() {
    let server = MockServer::start().await;
    mock_status(&server, 503, r#"{"message":"maintenance"}"#).await;

    let err = call(&server).await.unwrap_err();
    match &err {
        RestError::Service { status, .. } => assert_eq!(*status, Some(503)),
        other => panic!("expected Service, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn a_timeout_is_a_service_failure_without_a_status() {
    let server = MockServer::start().await;
    // The billing config caps the call at 500ms.
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = call(&server).await.unwrap_err();
    assert!(
        matches!(&err, RestError::Service { status: None, .. }),
        "got {err:?}"
    );
    assert_eq!(err.category(), ErrorCategory::External);
}

#[tokio::test]
async fn an_unparsable_success_body_is_an_unserialize_failure() {
    let server = MockServer::start().await;
    mock_status(&server, 200, "<html>upstream proxy</html>").await;

    let err = call(&server).await.unwrap_err();
    assert!(
        matches!(&err, RestError::Unserialize { .. }),
        "got {err:?}"
    );
    assert_eq!(err.category(), ErrorCategory::External);
    assert!(err.status_code().is_none());
}
