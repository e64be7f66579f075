//
//  sonar-cli
//  api/stream.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Streaming Responses
//!
//! Long-lived operations such as `api/push/sonarlint_events` return as soon
//! as the response headers arrive. The body stays open and is handed to the
//! caller as an [`EventStream`], which owns the connection: dropping it closes
//! the connection, on every path.
//!
//! The stream exposes raw chunks via [`EventStream::next_chunk`] and parsed
//! server-sent events via [`EventStream::next_event`]. Use one or the other:
//! once events have been read, the raw body belongs to the event parser.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sonar_cli::api::SonarClient;
//! use sonar_cli::api::services::push::SonarLintEventsOptions;
//!
//! # async fn example(client: SonarClient) -> Result<(), sonar_cli::api::ApiError> {
//! let options = SonarLintEventsOptions {
//!     project_keys: vec!["my-project".to_string()],
//!     languages: vec!["java".to_string()],
//! };
//! let mut events = client.push().sonarlint_events(&options).await?;
//! while let Some(event) = events.next_event().await? {
//!     println!("{}: {}", event.event, event.data);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::pin::Pin;
use std::time::Duration;

use eventsource_stream::{Event, EventStream as SseParser, EventStreamError, Eventsource};
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use reqwest::{Response, StatusCode};
use serde::Serialize;

use super::common::ApiError;

type Body = BoxStream<'static, Result<Vec<u8>, reqwest::Error>>;

/// One server-sent event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerEvent {
    /// Event type; `message` when the server names none.
    pub event: String,
    /// Payload; multiple `data:` lines are joined with `\n`.
    pub data: String,
    /// Last event id, if the server sent one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Reconnection delay requested by the server.
    #[serde(skip)]
    pub retry: Option<Duration>,
}

impl From<Event> for ServerEvent {
    fn from(event: Event) -> Self {
        Self {
            event: event.event,
            data: event.data,
            id: Some(event.id).filter(|id| !id.is_empty()),
            retry: event.retry,
        }
    }
}

enum Reader {
    Chunks(Body),
    Events(Pin<Box<SseParser<Body>>>),
}

/// Open response body of a streaming operation.
pub struct EventStream {
    status: StatusCode,
    reader: Option<Reader>,
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reader = match self.reader {
            Some(Reader::Chunks(_)) => "chunks",
            Some(Reader::Events(_)) => "events",
            None => "closed",
        };
        f.debug_struct("EventStream")
            .field("status", &self.status)
            .field("reader", &reader)
            .finish()
    }
}

impl EventStream {
    pub(crate) fn new(response: Response) -> Self {
        let status = response.status();
        let body: Body = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .boxed();
        Self {
            status,
            reader: Some(Reader::Chunks(body)),
        }
    }

    /// Status the stream was opened with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reads the next raw chunk of the body; `None` once the server closes it,
    /// or once [`next_event`](Self::next_event) has taken over the body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the connection fails mid-stream.
    pub async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, ApiError> {
        let Some(Reader::Chunks(body)) = self.reader.as_mut() else {
            return Ok(None);
        };
        match body.next().await {
            Some(chunk) => Ok(Some(chunk?)),
            None => {
                self.reader = None;
                Ok(None)
            }
        }
    }

    /// Waits for the next complete server-sent event.
    ///
    /// Comments (keep-alives) and blocks without data are skipped. An event
    /// the server did not terminate with a blank line is discarded when the
    /// body ends.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the connection fails mid-stream and
    /// [`ApiError::Stream`] if the body is not valid UTF-8 event text.
    pub async fn next_event(&mut self) -> Result<Option<ServerEvent>, ApiError> {
        if let Some(Reader::Chunks(_)) = self.reader {
            if let Some(Reader::Chunks(body)) = self.reader.take() {
                self.reader = Some(Reader::Events(Box::pin(body.eventsource())));
            }
        }
        let Some(Reader::Events(events)) = self.reader.as_mut() else {
            return Ok(None);
        };

        match events.next().await {
            Some(Ok(event)) => Ok(Some(event.into())),
            Some(Err(EventStreamError::Transport(e))) => Err(ApiError::Transport(e)),
            Some(Err(e)) => Err(ApiError::Stream(e.to_string())),
            None => {
                tracing::debug!("Event stream closed by the server");
                self.reader = None;
                Ok(None)
            }
        }
    }
}
