// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Socket server and connection handling.

use tokio::net::UnixStream;
use tracing::{debug, error};

use jot_core::{Authenticator, EntryDate, EntryDraft, ServiceError, UserId};

use crate::lifecycle::DaemonState;
use crate::protocol::{
    self, EntryDetail, ErrorKind, Query, Request, Response, StreakSummary, DEFAULT_TIMEOUT,
    PROTOCOL_VERSION,
};

/// Handle a single client connection
pub async fn handle_connection(
    daemon: &mut DaemonState,
    stream: UnixStream,
) -> Result<(), ServerError> {
    // Split stream for reading/writing
    let (mut reader, mut writer) = stream.into_split();

    // Read request with timeout
    let request = match protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await {
        Ok(req) => req,
        Err(protocol::ProtocolError::Timeout) => {
            error!("Request read timeout");
            return Err(ServerError::Timeout);
        }
        Err(protocol::ProtocolError::ConnectionClosed) => {
            debug!("Client disconnected before sending request");
            return Ok(());
        }
        Err(e) => {
            error!("Failed to read request: {}", e);
            return Err(ServerError::Protocol(e));
        }
    };

    debug!("Received request: {:?}", request);

    // Handle request
    let response = handle_request(daemon, request);

    debug!("Sending response: {:?}", response);

    // Write response with timeout
    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT)
        .await
        .map_err(ServerError::Protocol)?;

    Ok(())
}

/// Handle a single request and return a response
fn handle_request(daemon: &mut DaemonState, request: Request) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version: _ } => Response::Hello {
            version: PROTOCOL_VERSION.to_string(),
        },

        Request::Status => {
            let state = daemon.service.store().state();
            Response::Status {
                uptime_secs: daemon.start_time.elapsed().as_secs(),
                users: state.user_count(),
                entries: state.entry_count(),
            }
        }

        Request::Shutdown => {
            daemon.shutdown_requested = true;
            Response::ShuttingDown
        }

        Request::CreateEntry {
            token,
            title,
            content,
            date,
        } => {
            let Some(user_id) = authenticate(daemon, &token) else {
                return unauthenticated();
            };
            let entry_date = match parse_optional_date(date.as_deref()) {
                Ok(d) => d,
                Err(resp) => return resp,
            };

            match daemon
                .service
                .create(&user_id, EntryDraft::new(title, content), entry_date)
            {
                Ok(entry) => Response::Entry {
                    entry: EntryDetail::from(&entry),
                },
                Err(e) => service_error(e),
            }
        }

        Request::UpdateEntry {
            token,
            date,
            title,
            content,
        } => {
            let Some(user_id) = authenticate(daemon, &token) else {
                return unauthenticated();
            };
            let entry_date: EntryDate = match date.parse() {
                Ok(d) => d,
                Err(e) => return invalid_request(e),
            };

            match daemon
                .service
                .update(&user_id, entry_date, EntryDraft::new(title, content))
            {
                Ok(entry) => Response::Entry {
                    entry: EntryDetail::from(&entry),
                },
                Err(e) => service_error(e),
            }
        }

        Request::Query { token, query } => {
            let Some(user_id) = authenticate(daemon, &token) else {
                return unauthenticated();
            };
            handle_query(daemon, &user_id, query)
        }
    }
}

/// Handle query requests
fn handle_query(daemon: &DaemonState, user_id: &UserId, query: Query) -> Response {
    match query {
        Query::ListEntries { date } => {
            let entry_date = match parse_optional_date(date.as_deref()) {
                Ok(d) => d,
                Err(resp) => return resp,
            };

            match daemon.service.list(user_id, entry_date) {
                Ok(entries) => Response::Entries {
                    entries: entries.iter().map(EntryDetail::from).collect(),
                },
                Err(e) => service_error(e),
            }
        }

        Query::GetStreak => match daemon.service.streak(user_id) {
            Ok(Some(record)) => Response::Streak {
                streak: StreakSummary::from(&record),
            },
            Ok(None) => Response::Streak {
                streak: StreakSummary::zero(),
            },
            Err(e) => service_error(e),
        },
    }
}

fn authenticate(daemon: &DaemonState, token: &str) -> Option<UserId> {
    daemon.auth.authenticate(token)
}

fn unauthenticated() -> Response {
    Response::Error {
        kind: ErrorKind::Unauthenticated,
        message: "unknown or missing token".to_string(),
    }
}

fn invalid_request(e: impl std::fmt::Display) -> Response {
    Response::Error {
        kind: ErrorKind::InvalidRequest,
        message: e.to_string(),
    }
}

fn parse_optional_date(date: Option<&str>) -> Result<Option<EntryDate>, Response> {
    match date {
        None => Ok(None),
        Some(s) => s.parse().map(Some).map_err(invalid_request),
    }
}

/// Map a service failure onto the wire taxonomy
fn service_error(e: ServiceError) -> Response {
    let kind = match &e {
        ServiceError::Conflict(_) => ErrorKind::Conflict,
        ServiceError::NotFound(_) => ErrorKind::NotFound,
        ServiceError::Forbidden(_) => ErrorKind::Forbidden,
        ServiceError::InvalidDraft(_) | ServiceError::FutureDate(_) => ErrorKind::InvalidRequest,
        ServiceError::Storage(_) => ErrorKind::Internal,
    };

    if kind == ErrorKind::Internal {
        error!("Storage failure: {}", e);
        // Do not leak backend details to the client
        return Response::Error {
            kind,
            message: "internal error".to_string(),
        };
    }

    Response::Error {
        kind,
        message: e.to_string(),
    }
}

/// Server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),

    #[error("Request timeout")]
    Timeout,
}
