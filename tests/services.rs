//
//  sonar-cli
//  tests/services.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Multi-step flows through the service handles against a mock server.

mod support;

use mockito::Matcher;
use reqwest::StatusCode;
use sonar_cli::api::services::hotspots::ChangeStatusOptions;
use sonar_cli::api::services::new_code_periods::SetPeriodOptions;
use sonar_cli::api::services::project_branches::{DeleteBranchOptions, ListBranchesOptions};
use sonar_cli::api::services::projects::{
    CreateProjectOptions, DeleteProjectOptions, SearchProjectsOptions,
};
use sonar_cli::api::services::push::SonarLintEventsOptions;
use sonar_cli::api::services::user_tokens::{GenerateTokenOptions, RevokeTokenOptions};
use sonar_cli::api::services::users::CreateUserOptions;
use sonar_cli::api::ApiError;

use support::{anonymous, basic_header, encoded, error_body, with_basic, with_token};

fn search_body(keys: &[&str]) -> String {
    let components: Vec<_> = keys
        .iter()
        .map(|k| serde_json::json!({ "key": k, "name": k, "qualifier": "TRK", "visibility": "public" }))
        .collect();
    serde_json::json!({
        "paging": { "pageIndex": 1, "pageSize": 100, "total": keys.len() },
        "components": components,
    })
    .to_string()
}

#[tokio::test]
async fn created_project_is_searchable_until_deleted() {
    let mut server = support::start().await;
    let client = with_token(&server, "squ_admin");
    let search = SearchProjectsOptions {
        projects: vec!["flow-app".to_string()],
        ..Default::default()
    };

    let create = server
        .mock("POST", "/api/projects/create")
        .match_body(encoded(&[("name", "Flow App"), ("project", "flow-app")]))
        .with_body(r#"{"project": {"key": "flow-app", "name": "Flow App", "qualifier": "TRK"}}"#)
        .create_async()
        .await;
    let found = server
        .mock("GET", "/api/projects/search")
        .match_query(encoded(&[("projects", "flow-app")]))
        .with_body(search_body(&["flow-app"]))
        .create_async()
        .await;

    let created = client
        .projects()
        .create(&CreateProjectOptions {
            name: "Flow App".to_string(),
            project: "flow-app".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.data.unwrap().project.key, "flow-app");

    let result = client.projects().search(&search).await.unwrap().data.unwrap();
    assert_eq!(result.components.len(), 1);
    assert_eq!(result.components[0].key, "flow-app");
    create.assert_async().await;
    found.assert_async().await;
    found.remove_async().await;

    let delete = server
        .mock("POST", "/api/projects/delete")
        .match_body(encoded(&[("project", "flow-app")]))
        .with_status(204)
        .create_async()
        .await;
    let empty = server
        .mock("GET", "/api/projects/search")
        .match_query(encoded(&[("projects", "flow-app")]))
        .with_body(search_body(&[]))
        .create_async()
        .await;

    let deleted = client
        .projects()
        .delete(&DeleteProjectOptions {
            project: "flow-app".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.is_empty());

    let result = client.projects().search(&search).await.unwrap().data.unwrap();
    assert!(result.components.is_empty());
    assert_eq!(result.paging.total, 0);
    delete.assert_async().await;
    empty.assert_async().await;
}

#[tokio::test]
async fn revoking_a_token_twice_succeeds() {
    let mut server = support::start().await;
    let first = server
        .mock("POST", "/api/user_tokens/revoke")
        .match_body(encoded(&[("name", "ci")]))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = with_token(&server, "squ_admin");
    let options = RevokeTokenOptions {
        name: "ci".to_string(),
        login: None,
    };
    assert_eq!(
        client.user_tokens().revoke(&options).await.unwrap().status,
        StatusCode::NO_CONTENT
    );
    first.assert_async().await;
    first.remove_async().await;

    let second = server
        .mock("POST", "/api/user_tokens/revoke")
        .with_status(404)
        .with_body(error_body("User token 'ci' not found"))
        .create_async()
        .await;
    let response = client.user_tokens().revoke(&options).await.unwrap();
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.is_empty());
    second.assert_async().await;
}

#[tokio::test]
async fn main_branch_cannot_be_deleted() {
    let mut server = support::start().await;
    let list = server
        .mock("GET", "/api/project_branches/list")
        .match_query(encoded(&[("project", "my-app")]))
        .with_body(
            r#"{"branches": [
                {"name": "main", "isMain": true, "type": "BRANCH", "excludedFromPurge": true},
                {"name": "feature/login", "isMain": false, "type": "BRANCH"}
            ]}"#,
        )
        .create_async()
        .await;
    let delete = server
        .mock("POST", "/api/project_branches/delete")
        .match_body(encoded(&[("project", "my-app"), ("branch", "main")]))
        .with_status(400)
        .with_body(error_body("Cannot delete main branch of project 'my-app'"))
        .create_async()
        .await;

    let client = with_token(&server, "squ_admin");
    let branches = client
        .project_branches()
        .list(&ListBranchesOptions {
            project: "my-app".to_string(),
        })
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(branches.branches.iter().filter(|b| b.is_main).count(), 1);
    let main = branches.main().unwrap();
    assert_eq!(main.name, "main");
    assert!(main.excluded_from_purge);

    let err = client
        .project_branches()
        .delete(&DeleteBranchOptions {
            project: "my-app".to_string(),
            branch: main.name.clone(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    let ApiError::Http(http) = &err else {
        panic!("expected an HTTP error, got {err:?}");
    };
    assert!(http.message().unwrap().contains("main branch"));
    list.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn generated_token_opens_a_valid_session() {
    let mut server = support::start().await;
    let generate = server
        .mock("POST", "/api/user_tokens/generate")
        .match_header("authorization", basic_header("admin", "secret").as_str())
        .match_body(encoded(&[("name", "ci"), ("type", "GLOBAL_ANALYSIS_TOKEN")]))
        .with_body(
            r#"{"login": "admin", "name": "ci", "token": "squ_generated", "type": "GLOBAL_ANALYSIS_TOKEN", "createdAt": "2025-03-01T10:00:00+0000"}"#,
        )
        .create_async()
        .await;
    let validate = server
        .mock("GET", "/api/authentication/validate")
        .match_header("authorization", "Bearer squ_generated")
        .with_body(r#"{"valid": true}"#)
        .create_async()
        .await;

    let admin = with_basic(&server, "admin", "secret");
    let token = admin
        .user_tokens()
        .generate(&GenerateTokenOptions {
            name: "ci".to_string(),
            token_type: Some("GLOBAL_ANALYSIS_TOKEN".to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(token.token, "squ_generated");
    assert!(token.created_at.is_some());

    let session = with_token(&server, &token.token);
    let validation = session.authentication().validate().await.unwrap().data.unwrap();
    assert!(validation.valid);
    generate.assert_async().await;
    validate.assert_async().await;
}

#[tokio::test]
async fn conditional_rules_stop_requests() {
    let mut server = support::start().await;
    let hotspots = server
        .mock("POST", "/api/hotspots/change_status")
        .expect(0)
        .create_async()
        .await;
    let periods = server
        .mock("POST", "/api/new_code_periods/set")
        .expect(0)
        .create_async()
        .await;
    let users = server
        .mock("POST", "/api/users/create")
        .expect(0)
        .create_async()
        .await;

    let client = with_token(&server, "squ_admin");

    let err = client
        .hotspots()
        .change_status(&ChangeStatusOptions {
            hotspot: "AX1".to_string(),
            status: "REVIEWED".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("resolution"));

    let err = client
        .new_code_periods()
        .set(&SetPeriodOptions {
            project: Some("my-app".to_string()),
            period_type: "NUMBER_OF_DAYS".to_string(),
            value: Some("91".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("value"));

    let err = client
        .users()
        .create(&CreateUserOptions {
            login: "jdoe".to_string(),
            name: "Jane Doe".to_string(),
            local: Some(true),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("password"));

    hotspots.assert_async().await;
    periods.assert_async().await;
    users.assert_async().await;
}

#[tokio::test]
async fn reviewed_hotspot_with_resolution_is_sent() {
    let mut server = support::start().await;
    let mock = server
        .mock("POST", "/api/hotspots/change_status")
        .match_body(encoded(&[
            ("hotspot", "AX1"),
            ("status", "REVIEWED"),
            ("resolution", "SAFE"),
        ]))
        .with_status(204)
        .create_async()
        .await;

    let client = with_token(&server, "squ_admin");
    let response = client
        .hotspots()
        .change_status(&ChangeStatusOptions {
            hotspot: "AX1".to_string(),
            status: "REVIEWED".to_string(),
            resolution: Some("SAFE".to_string()),
            comment: None,
        })
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    mock.assert_async().await;
}

#[tokio::test]
async fn quality_gate_list_marks_default() {
    let mut server = support::start().await;
    let mock = server
        .mock("GET", "/api/qualitygates/list")
        .with_body(
            r#"{"qualitygates": [
                {"name": "Sonar way", "isDefault": true, "isBuiltIn": true},
                {"name": "Strict", "isDefault": false, "isBuiltIn": false}
            ]}"#,
        )
        .create_async()
        .await;

    let client = anonymous(&server);
    let gates = client.qualitygates().list().await.unwrap().data.unwrap();

    assert_eq!(gates.qualitygates.len(), 2);
    assert_eq!(gates.default_gate().unwrap().name, "Sonar way");
    mock.assert_async().await;
}

#[tokio::test]
async fn sonarlint_events_stream_until_closed() {
    let mut server = support::start().await;
    let mock = server
        .mock("GET", "/api/push/sonarlint_events")
        .match_query(encoded(&[("projectKeys", "p1,p2"), ("languages", "java")]))
        .with_header("content-type", "text/event-stream")
        .with_body(
            ": keep-alive\n\n\
             event: RuleSetChanged\ndata: {\"projects\":[\"p1\"]}\n\n\
             event: IssueChanged\ndata: {\"projectKey\":\"p2\"}\n\n",
        )
        .create_async()
        .await;

    let client = with_token(&server, "squ_dev");
    let mut events = client
        .push()
        .sonarlint_events(&SonarLintEventsOptions {
            project_keys: vec!["p1".to_string(), "p2".to_string()],
            languages: vec!["java".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(events.status(), StatusCode::OK);

    let first = events.next_event().await.unwrap().unwrap();
    assert_eq!(first.event, "RuleSetChanged");
    assert_eq!(first.data, r#"{"projects":["p1"]}"#);

    let second = events.next_event().await.unwrap().unwrap();
    assert_eq!(second.event, "IssueChanged");

    assert_eq!(events.next_event().await.unwrap(), None);
    assert_eq!(events.next_event().await.unwrap(), None);
    mock.assert_async().await;
}

#[tokio::test]
async fn stream_rejection_is_an_http_error() {
    let mut server = support::start().await;
    let mock = server
        .mock("GET", "/api/push/sonarlint_events")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(error_body("Insufficient privileges"))
        .create_async()
        .await;

    let client = with_token(&server, "squ_dev");
    let err = client
        .push()
        .sonarlint_events(&SonarLintEventsOptions {
            project_keys: vec!["p1".to_string()],
            languages: vec!["java".to_string()],
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(err.to_string().contains("Insufficient privileges"));
    mock.assert_async().await;
}
