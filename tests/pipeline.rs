//
//  sonar-cli
//  tests/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request pipeline behaviour against a mock server: validation gates,
//! encoding, authentication headers and response classification.

mod support;

use mockito::Matcher;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use sonar_cli::api::common::PaginationArgs;
use sonar_cli::api::services::analysis_cache::ClearCacheOptions;
use sonar_cli::api::services::projects::{CreateProjectOptions, SearchProjectsOptions};
use sonar_cli::api::services::user_tokens::RevokeTokenOptions;
use sonar_cli::api::validate::ValidationError;
use sonar_cli::api::{ApiError, SonarClient};

use support::{anonymous, basic_header, encoded, error_body, with_basic, with_token, FORM};

const PROJECT_JSON: &str = r#"{"project": {"key": "my-app", "name": "My App", "qualifier": "TRK", "visibility": "private"}}"#;

fn create(name: &str, key: &str) -> CreateProjectOptions {
    CreateProjectOptions {
        name: name.to_string(),
        project: key.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn missing_options_for_required_fields_send_nothing() {
    let mut server = support::start().await;
    let mock = server
        .mock("POST", "/api/projects/create")
        .expect(0)
        .create_async()
        .await;

    let client = anonymous(&server);
    let err = client.projects().create(None).await.unwrap_err();

    assert!(err.is_validation());
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::MissingOptions)
    ));
    assert!(err.to_string().contains("required"));
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_options_without_required_fields_are_sent() {
    let mut server = support::start().await;
    let mock = server
        .mock("POST", "/api/analysis_cache/clear")
        .with_status(204)
        .create_async()
        .await;

    let response = anonymous(&server).analysis_cache().clear(None).await.unwrap();

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn length_limit_is_inclusive() {
    let mut server = support::start().await;
    let longest = "n".repeat(500);
    let accepted = server
        .mock("POST", "/api/projects/create")
        .match_body(encoded(&[("name", longest.as_str())]))
        .with_status(200)
        .with_body(PROJECT_JSON)
        .expect(1)
        .create_async()
        .await;

    let client = anonymous(&server);
    client
        .projects()
        .create(&create(&longest, "my-app"))
        .await
        .unwrap();

    let err = client
        .projects()
        .create(&create(&"n".repeat(501), "my-app"))
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("name"));
    accepted.assert_async().await;
}

#[tokio::test]
async fn enum_values_are_checked_locally() {
    let mut server = support::start().await;
    let mock = server
        .mock("POST", "/api/projects/create")
        .expect(0)
        .create_async()
        .await;

    let mut options = create("My App", "my-app");
    options.visibility = Some("secret".to_string());
    let err = anonymous(&server).projects().create(&options).await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::InvalidEnum { field: "visibility", .. })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn page_size_ceiling() {
    let mut server = support::start().await;
    let mut accepted = Vec::new();
    for ps in ["5", "10", "500"] {
        accepted.push(
            server
                .mock("GET", "/api/projects/search")
                .match_query(encoded(&[("ps", ps)]))
                .with_status(200)
                .with_body(r#"{"paging": {"pageIndex": 1, "pageSize": 5, "total": 0}, "components": []}"#)
                .expect(1)
                .create_async()
                .await,
        );
    }
    let rejected = server
        .mock("GET", "/api/projects/search")
        .match_query(encoded(&[("ps", "1000")]))
        .expect(0)
        .create_async()
        .await;

    let client = anonymous(&server);
    for size in [5, 10, 500] {
        let options = SearchProjectsOptions {
            pagination: PaginationArgs::with_size(size),
            ..Default::default()
        };
        client.projects().search(&options).await.unwrap();
    }

    let options = SearchProjectsOptions {
        pagination: PaginationArgs::with_size(1000),
        ..Default::default()
    };
    let err = client.projects().search(&options).await.unwrap_err();
    assert_eq!(err.field(), Some("ps"));

    for mock in accepted {
        mock.assert_async().await;
    }
    rejected.assert_async().await;
}

#[tokio::test]
async fn post_parameters_are_form_encoded() {
    let mut server = support::start().await;
    let mock = server
        .mock("POST", "/api/projects/create")
        .match_header("content-type", FORM)
        .match_body(encoded(&[
            ("name", "My App"),
            ("project", "my-app"),
            ("visibility", "private"),
        ]))
        .with_status(200)
        .with_body(PROJECT_JSON)
        .create_async()
        .await;

    let mut options = create("My App", "my-app");
    options.visibility = Some("private".to_string());
    let created = anonymous(&server)
        .projects()
        .create(&options)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(created.project.key, "my-app");
    assert_eq!(created.project.visibility.as_deref(), Some("private"));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_parameters_go_in_the_query() {
    let mut server = support::start().await;
    let mock = server
        .mock("GET", "/api/projects/search")
        .match_query(encoded(&[("q", "pay ments"), ("qualifiers", "TRK,APP"), ("p", "2")]))
        .with_status(200)
        .with_body(r#"{"paging": {"pageIndex": 2, "pageSize": 100, "total": 101}, "components": []}"#)
        .create_async()
        .await;

    let options = SearchProjectsOptions {
        q: Some("pay ments".to_string()),
        qualifiers: vec!["TRK".to_string(), "APP".to_string()],
        pagination: PaginationArgs {
            page: Some(2),
            page_size: None,
        },
        ..Default::default()
    };
    let result = anonymous(&server)
        .projects()
        .search(&options)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert!(!result.paging.has_next());
    mock.assert_async().await;
}

#[tokio::test]
async fn bearer_and_basic_headers() {
    let mut server = support::start().await;
    let bearer = server
        .mock("GET", "/api/authentication/validate")
        .match_header("authorization", "Bearer squ_abc")
        .with_status(200)
        .with_body(r#"{"valid": true}"#)
        .create_async()
        .await;

    let valid = with_token(&server, "squ_abc")
        .authentication()
        .validate()
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert!(valid.valid);
    bearer.assert_async().await;
    bearer.remove_async().await;

    let basic = server
        .mock("GET", "/api/authentication/validate")
        .match_header("authorization", basic_header("admin", "s3cret").as_str())
        .with_status(200)
        .with_body(r#"{"valid": true}"#)
        .create_async()
        .await;
    with_basic(&server, "admin", "s3cret")
        .authentication()
        .validate()
        .await
        .unwrap();
    basic.assert_async().await;
}

#[tokio::test]
async fn anonymous_requests_have_no_authorization() {
    let mut server = support::start().await;
    let mock = server
        .mock("GET", "/api/system/status")
        .match_header("authorization", Matcher::Missing)
        .match_header("user-agent", format!("sq/{}", sonar_cli::VERSION).as_str())
        .with_status(200)
        .with_body(r#"{"id": "abc", "version": "10.4.1", "status": "UP"}"#)
        .create_async()
        .await;

    let status = anonymous(&server).system().status().await.unwrap().into_data().unwrap();
    assert!(status.is_up());
    mock.assert_async().await;
}

#[tokio::test]
async fn absent_target_is_success_only_where_declared() {
    let mut server = support::start().await;
    server
        .mock("POST", "/api/user_tokens/revoke")
        .with_status(404)
        .with_body(error_body("Token 'ci' not found"))
        .create_async()
        .await;
    server
        .mock("POST", "/api/projects/delete")
        .with_status(404)
        .with_body(error_body("Project 'gone' not found"))
        .create_async()
        .await;

    let client = anonymous(&server);
    let revoke = RevokeTokenOptions {
        name: "ci".to_string(),
        login: None,
    };
    let response = client.user_tokens().revoke(&revoke).await.unwrap();
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.is_empty());

    let delete = sonar_cli::api::services::projects::DeleteProjectOptions {
        project: "gone".to_string(),
    };
    let err = client.projects().delete(&delete).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.response().and_then(|r| r.message()), Some("Project 'gone' not found"));
}

#[tokio::test]
async fn clearing_the_cache_twice_succeeds() {
    let mut server = support::start().await;
    let mock = server
        .mock("POST", "/api/analysis_cache/clear")
        .match_body(encoded(&[("project", "my-app")]))
        .with_status(204)
        .expect(2)
        .create_async()
        .await;

    let client = anonymous(&server);
    let options = ClearCacheOptions {
        project: Some("my-app".to_string()),
        branch: None,
    };
    client.analysis_cache().clear(&options).await.unwrap();
    client.analysis_cache().clear(&options).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn service_unavailable_is_surfaced() {
    let mut server = support::start().await;
    server
        .mock("GET", "/api/projects/search")
        .with_status(503)
        .with_body(error_body("Server is starting"))
        .create_async()
        .await;

    let err = anonymous(&server).projects().search(None).await.unwrap_err();
    assert!(err.is_unavailable());
    assert_eq!(err.to_string(), "API error (503 Service Unavailable): Server is starting");
}

const CUT_OFF_502: &str = "HTTP/1.1 502 Bad Gateway\r\n\
    content-type: application/json\r\n\
    content-length: 200\r\n\r\n\
    {\"errors\": [{\"m";

#[tokio::test]
async fn cut_off_error_body_keeps_the_status() {
    let url = support::raw_server(CUT_OFF_502).await;
    let client = SonarClient::new(&url).unwrap();

    let err = client.projects().search(None).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    let ApiError::Http(http) = &err else {
        panic!("expected an HTTP error, got {err:?}");
    };
    assert!(http.messages.is_empty());
}

#[tokio::test]
async fn cut_off_stream_rejection_keeps_the_status() {
    let url = support::raw_server(CUT_OFF_502).await;
    let client = SonarClient::new(&url).unwrap();
    let options = sonar_cli::api::services::push::SonarLintEventsOptions {
        project_keys: vec!["p1".to_string()],
        languages: vec!["java".to_string()],
    };

    let err = client.push().sonarlint_events(&options).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let mut server = support::start().await;
    server
        .mock("GET", "/api/system/status")
        .with_status(200)
        .with_body("<html>proxy login</html>")
        .create_async()
        .await;

    let err = anonymous(&server).system().status().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { status, .. } if status == StatusCode::OK));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = SonarClient::new("http://127.0.0.1:9").unwrap();
    let err = client.system().status().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn context_path_is_kept() {
    let mut server = support::start().await;
    let mock = server
        .mock("GET", "/sonarqube/api/system/health")
        .with_status(200)
        .with_body(r#"{"health": "GREEN", "causes": []}"#)
        .create_async()
        .await;

    let client = SonarClient::new(&format!("{}/sonarqube", server.url())).unwrap();
    let health = client.system().health().await.unwrap().into_data().unwrap();
    assert_eq!(health.health, "GREEN");
    mock.assert_async().await;
}

#[tokio::test]
async fn raw_requests_share_the_session() {
    let mut server = support::start().await;
    let version = server
        .mock("GET", "/api/server/version")
        .match_header("authorization", "Bearer squ_abc")
        .with_status(200)
        .with_body("10.4.1.88267")
        .create_async()
        .await;
    let tags = server
        .mock("POST", "/api/project_tags/set")
        .match_body(encoded(&[("project", "my-app"), ("tags", "backend,java")]))
        .with_status(204)
        .create_async()
        .await;
    server
        .mock("GET", "/api/languages/list")
        .match_query(encoded(&[("ps", "1")]))
        .with_status(200)
        .with_body(r#"{"languages": [{"key": "java", "name": "Java"}]}"#)
        .create_async()
        .await;

    let client = with_token(&server, "squ_abc");

    let response = client.raw(Method::GET, "api/server/version", Vec::new()).await.unwrap();
    assert_eq!(response.data, Some(Value::String("10.4.1.88267".to_string())));

    let response = client
        .raw(
            Method::POST,
            "/api/project_tags/set",
            vec![
                ("project".to_string(), "my-app".to_string()),
                ("tags".to_string(), "backend,java".to_string()),
            ],
        )
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = client
        .raw(Method::GET, "api/languages/list", vec![("ps".to_string(), "1".to_string())])
        .await
        .unwrap();
    assert_eq!(response.data.unwrap()["languages"][0]["key"], "java");

    version.assert_async().await;
    tags.assert_async().await;
}
