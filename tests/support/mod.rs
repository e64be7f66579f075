//
//  sonar-cli
//  tests/support/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shared helpers for tests that talk to a mockito server.

#![allow(dead_code)]

use std::time::Duration;

use base64::Engine;
use mockito::{Matcher, Server, ServerGuard};
use sonar_cli::api::SonarClient;
use sonar_cli::auth::AuthCredential;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub const FORM: &str = "application/x-www-form-urlencoded";

/// Starts an async mock server.
pub async fn start() -> ServerGuard {
    Server::new_async().await
}

/// Anonymous session against `server`.
pub fn anonymous(server: &ServerGuard) -> SonarClient {
    SonarClient::new(&server.url()).expect("mock server URL is valid")
}

/// Token session against `server`.
pub fn with_token(server: &ServerGuard, token: &str) -> SonarClient {
    anonymous(server).with_auth(AuthCredential::token(token))
}

/// Basic session against `server`.
pub fn with_basic(server: &ServerGuard, user: &str, password: &str) -> SonarClient {
    anonymous(server).with_auth(AuthCredential::basic(user, password))
}

/// Expected `Authorization` header for a Basic credential.
pub fn basic_header(user: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
    format!("Basic {encoded}")
}

/// Matches every `key=value` pair, in a query string or a form body.
pub fn encoded(pairs: &[(&str, &str)]) -> Matcher {
    Matcher::AllOf(
        pairs
            .iter()
            .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
            .collect(),
    )
}

/// SonarQube error document with one message.
pub fn error_body(msg: &str) -> String {
    serde_json::json!({ "errors": [{ "msg": msg }] }).to_string()
}

/// Serves one chunked `text/event-stream` response, writing each part after
/// its delay. Returns the server URL.
///
/// With `finish` the body ends after the last part. Otherwise the server
/// holds the connection and the handle resolves to `true` once the client
/// hangs up.
pub async fn event_server(
    parts: Vec<(Duration, &'static str)>,
    finish: bool,
) -> (String, JoinHandle<bool>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_head(&mut socket).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\n\
                  content-type: text/event-stream\r\n\
                  transfer-encoding: chunked\r\n\r\n",
            )
            .await
            .unwrap();

        for (delay, part) in parts {
            tokio::time::sleep(delay).await;
            let chunk = format!("{:x}\r\n{}\r\n", part.len(), part);
            if socket.write_all(chunk.as_bytes()).await.is_err() {
                return true;
            }
        }
        if finish {
            let _ = socket.write_all(b"0\r\n\r\n").await;
            return false;
        }

        let mut buf = [0u8; 64];
        matches!(socket.read(&mut buf).await, Ok(0) | Err(_))
    });

    (url, handle)
}

/// Answers one request with `response` as-is, then closes the connection.
/// Returns the server URL.
pub async fn raw_server(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_head(&mut socket).await;
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    url
}

async fn read_head(socket: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}
