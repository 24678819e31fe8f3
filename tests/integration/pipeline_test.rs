//! End-to-end send pipeline tests.
//!
//! Templates go through secret resolution, scope merging, assembly, the
//! reqwest transport against a local mock server, and the JSONL history.

use super::{demo_workspace, environment, init_test_env};
use rest_workbench::config::WorkbenchConfig;
use rest_workbench::executor::{ExecutionConfig, HttpTransport, TransportError};
use rest_workbench::history::{HistoryStore, StatusFilter};
use rest_workbench::models::{
    ApiKeyLocation, AuthConfig, HttpMethod, KeyValue, RawContentType, RequestBody,
    RequestTemplate, SecretRef, Variable,
};
use rest_workbench::variables::{MemorySecretStore, SecretStore};
use rest_workbench::{ClientError, RequestClient, SendContext};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> HttpTransport {
    HttpTransport::new(ExecutionConfig::from_config(&WorkbenchConfig::default())).unwrap()
}

fn history() -> (TempDir, Arc<HistoryStore>) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(HistoryStore::new(dir.path().join("history.jsonl")));
    (dir, store)
}

#[tokio::test]
async fn test_get_with_query_and_bearer_secret() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(query_param("page", "2"))
        .and(query_param("q", "ada lovelace"))
        .and(header("authorization", "Bearer live-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"users":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let secrets = MemorySecretStore::new();
    let token_ref = SecretRef::generate();
    secrets.store(&token_ref, "live-token").unwrap();

    let workspace = demo_workspace(&server.uri());
    let env = {
        let mut env = environment("dev", &[("page", "2")]);
        env.variables.push(Variable::secret("token", token_ref));
        env
    };

    let template = RequestTemplate::new("Search users", HttpMethod::GET, "{{baseUrl}}/{{apiVersion}}/users")
        .with_query_param("page", "{{page}}")
        .with_query_param("q", "ada lovelace")
        .with_auth(AuthConfig::Bearer {
            token: "{{token}}".to_string(),
        });

    let (_dir, store) = history();
    let client = RequestClient::new(transport(), store.clone(), Arc::new(secrets));
    let ctx = SendContext::new(&template, &workspace).with_environment(&env);

    let response = client.send(&ctx).await.unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_text(), Some(r#"{"users":[]}"#));

    let entries = store.fetch_for_workspace(&workspace.id, 10).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status_code, Some(200));
    assert_eq!(entries[0].request_name, "Search users");
    assert!(!entries[0].url.contains("live-token"));
}

#[tokio::test]
async fn test_post_json_body_and_api_key_header() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/items"))
        .and(header("content-type", "application/json"))
        .and(header("x-api-key", "k-123"))
        .and(body_string(r#"{"name":"widget","qty":3}"#))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = demo_workspace(&server.uri());
    let env = environment("dev", &[("key", "k-123"), ("qty", "3")]);
    let template = RequestTemplate::new("Create item", HttpMethod::POST, "{{baseUrl}}/{{apiVersion}}/items")
        .with_auth(AuthConfig::ApiKey {
            key: "X-Api-Key".to_string(),
            value: "{{key}}".to_string(),
            location: ApiKeyLocation::Header,
        })
        .with_body(RequestBody::Raw {
            content: r#"{"name":"widget","qty":{{qty}}}"#.to_string(),
            content_type: RawContentType::Json,
        });

    let (_dir, store) = history();
    let client = RequestClient::new(transport(), store, Arc::new(MemorySecretStore::new()));
    let response = client
        .send(&SendContext::new(&template, &workspace).with_environment(&env))
        .await
        .unwrap();
    assert_eq!(response.status_code, 201);
}

#[tokio::test]
async fn test_form_body_and_basic_auth() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("authorization", "Basic YWRhOnB3"))
        .and(body_string("user=ada&note=hi+there"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = demo_workspace(&server.uri());
    let template = RequestTemplate::new("Login", HttpMethod::PUT, "{{baseUrl}}/login")
        .with_auth(AuthConfig::Basic {
            username: "ada".to_string(),
            password: "pw".to_string(),
        })
        .with_body(RequestBody::FormUrlEncoded {
            fields: vec![
                KeyValue::new("user", "ada"),
                KeyValue::disabled("debug", "1"),
                KeyValue::new("note", "hi there"),
            ],
        });

    let (_dir, store) = history();
    let client = RequestClient::new(transport(), store, Arc::new(MemorySecretStore::new()));
    let response = client
        .send(&SendContext::new(&template, &workspace))
        .await
        .unwrap();
    assert_eq!(response.status_code, 204);
}

#[tokio::test]
async fn test_error_status_recorded_and_searchable() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let workspace = demo_workspace(&server.uri());
    let template = RequestTemplate::new("Remove widget", HttpMethod::DELETE, "{{baseUrl}}/items/9");

    let (_dir, store) = history();
    let client = RequestClient::new(transport(), store.clone(), Arc::new(MemorySecretStore::new()));
    let response = client
        .send(&SendContext::new(&template, &workspace))
        .await
        .unwrap();
    assert!(response.is_client_error());

    let errors = store
        .search("widget", &workspace.id, Some(StatusFilter::ClientError), None)
        .unwrap();
    assert_eq!(errors.len(), 1);
    assert!(store
        .search("widget", &workspace.id, Some(StatusFilter::Success), None)
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_timeout_is_recorded_without_status() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let workspace = demo_workspace(&server.uri());
    let template = RequestTemplate::new("Slow", HttpMethod::GET, "{{baseUrl}}/slow");

    let config = WorkbenchConfig {
        timeout_ms: 50,
        ..Default::default()
    };
    let transport = HttpTransport::new(ExecutionConfig::from_config(&config)).unwrap();
    let (_dir, store) = history();
    let client = RequestClient::new(transport, store.clone(), Arc::new(MemorySecretStore::new()));

    let result = client.send(&SendContext::new(&template, &workspace)).await;
    assert_eq!(result, Err(ClientError::Transport(TransportError::Timeout)));

    let entries = store.load().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status_code, None);
}

#[tokio::test]
async fn test_missing_secret_leaves_placeholder_and_fails_fast() {
    init_test_env();
    let server = MockServer::start().await;

    let mut workspace = demo_workspace("unused");
    workspace.variables = vec![Variable::secret("baseUrl", SecretRef::new("gone"))];
    let template = RequestTemplate::new("Needs secret", HttpMethod::GET, "{{baseUrl}}/x");

    let (_dir, store) = history();
    let client = RequestClient::new(transport(), store.clone(), Arc::new(MemorySecretStore::new()));
    let result = client.send(&SendContext::new(&template, &workspace)).await;

    assert!(matches!(result, Err(ClientError::Assembly(_))));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
    assert_eq!(store.load().unwrap().len(), 1);
}
