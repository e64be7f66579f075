//
//  sonar-cli
//  tests/streaming.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Event streams over slow, split and long-lived response bodies.

mod support;

use std::time::Duration;

use sonar_cli::api::client::ClientOptions;
use sonar_cli::api::services::push::SonarLintEventsOptions;
use sonar_cli::api::SonarClient;

use support::{event_server, with_token};

fn watch() -> SonarLintEventsOptions {
    SonarLintEventsOptions {
        project_keys: vec!["p1".to_string()],
        languages: vec!["java".to_string()],
    }
}

fn short_timeout(url: &str) -> SonarClient {
    SonarClient::with_options(
        url,
        ClientOptions {
            timeout: Some(Duration::from_millis(500)),
            ..Default::default()
        },
    )
    .unwrap()
}

#[tokio::test]
async fn stream_outlives_the_session_timeout() {
    let (url, server) = event_server(
        vec![
            (Duration::ZERO, "data: one\n\n"),
            (Duration::from_millis(1200), "data: two\n\n"),
        ],
        true,
    )
    .await;

    let client = short_timeout(&url);
    let mut events = client.push().sonarlint_events(&watch()).await.unwrap();

    assert_eq!(events.next_event().await.unwrap().unwrap().data, "one");
    assert_eq!(events.next_event().await.unwrap().unwrap().data, "two");
    assert_eq!(events.next_event().await.unwrap(), None);
    assert!(!server.await.unwrap());
}

#[tokio::test]
async fn event_split_across_chunks_is_joined() {
    let (url, _server) = event_server(
        vec![
            (Duration::ZERO, "event: IssueChanged\ndata: {\"proj"),
            (Duration::from_millis(100), "ectKey\":\"p1\"}\n"),
            (Duration::from_millis(50), "\n"),
        ],
        true,
    )
    .await;

    let client = short_timeout(&url);
    let mut events = client.push().sonarlint_events(&watch()).await.unwrap();

    let event = events.next_event().await.unwrap().unwrap();
    assert_eq!(event.event, "IssueChanged");
    assert_eq!(event.data, r#"{"projectKey":"p1"}"#);
    assert_eq!(events.next_event().await.unwrap(), None);
}

#[tokio::test]
async fn carriage_returns_end_lines() {
    let mut server = support::start().await;
    let mock = server
        .mock("GET", "/api/push/sonarlint_events")
        .match_query(mockito::Matcher::Any)
        .with_header("content-type", "text/event-stream")
        .with_body("data: one\r\rdata: two\r\n\r\ndata: three\n\n")
        .create_async()
        .await;

    let client = with_token(&server, "squ_dev");
    let mut events = client.push().sonarlint_events(&watch()).await.unwrap();

    let mut data = Vec::new();
    while let Some(event) = events.next_event().await.unwrap() {
        data.push(event.data);
    }
    assert_eq!(data, ["one", "two", "three"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn dropping_the_stream_closes_the_connection() {
    let (url, server) = event_server(vec![(Duration::ZERO, "data: one\n\n")], false).await;

    let client = short_timeout(&url);
    let mut events = client.push().sonarlint_events(&watch()).await.unwrap();
    assert_eq!(events.next_event().await.unwrap().unwrap().data, "one");

    drop(events);
    let closed = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server saw the connection close")
        .unwrap();
    assert!(closed);
    drop(client);
}

#[tokio::test]
async fn raw_chunks_cover_the_whole_body() {
    let (url, _server) = event_server(
        vec![
            (Duration::ZERO, ": keep-alive\n\n"),
            (Duration::from_millis(50), "data: one\n\n"),
        ],
        true,
    )
    .await;

    let client = short_timeout(&url);
    let mut events = client.push().sonarlint_events(&watch()).await.unwrap();

    let mut body = Vec::new();
    while let Some(chunk) = events.next_chunk().await.unwrap() {
        body.extend(chunk);
    }
    assert_eq!(body, b": keep-alive\n\ndata: one\n\n");
    assert_eq!(events.next_event().await.unwrap(), None);
}
