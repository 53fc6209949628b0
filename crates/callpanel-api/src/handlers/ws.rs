//! WebSocket dashboard feed
//!
//! Each connection runs its own dashboard poller and forwards every
//! published snapshot. The session is re-checked before each push, so a
//! logout or a block ends the feed.

use crate::dto::DashboardResponse;
use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::{CloseCode, CloseReason, Message, Session};
use callpanel_auth::{middleware::extract_token_from_request, AuthenticatedExtension, SessionGuard};
use callpanel_services::{CdrQueryService, DashboardPoller, SnapshotReceiver};
use futures::StreamExt;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Keepalive ping period
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// WebSocket message types
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsMessage {
    /// Fresh dashboard data
    #[serde(rename = "dashboard")]
    Dashboard(DashboardResponse),
    /// Error message
    #[serde(rename = "error")]
    Error { code: String, message: String },
    /// Ping/pong for keepalive
    #[serde(rename = "pong")]
    Pong,
}

/// WebSocket connection handler
///
/// GET /ws
pub async fn ws_handler(
    req: HttpRequest,
    body: web::Payload,
    session: AuthenticatedExtension,
    service: web::Data<Arc<CdrQueryService>>,
    guard: web::Data<Arc<SessionGuard>>,
) -> Result<HttpResponse, actix_web::Error> {
    // The extractor already validated this token
    let token = extract_token_from_request(&req).unwrap_or_default();
    let (response, ws_session, msg_stream) = actix_ws::handle(&req, body)?;

    let extension = session.extension_number().to_string();
    info!(extension = %extension, "WebSocket connection established");

    let service = service.get_ref().clone();
    let tz = service.tz();
    let cancel = CancellationToken::new();
    let (snapshots, poller) =
        DashboardPoller::new(service, session.into_inner()).spawn(cancel.clone());

    let feed = Feed {
        guard: guard.get_ref().clone(),
        token,
        extension,
        tz,
    };

    actix_web::rt::spawn(async move {
        feed.run(ws_session, msg_stream, snapshots, cancel.clone()).await;
        cancel.cancel();
        if let Err(e) = poller.await {
            error!("Dashboard poller task failed: {}", e);
        }
    });

    Ok(response)
}

struct Feed {
    guard: Arc<SessionGuard>,
    token: String,
    extension: String,
    tz: chrono_tz::Tz,
}

impl Feed {
    async fn send(&self, session: &mut Session, msg: &WsMessage) -> bool {
        match serde_json::to_string(msg) {
            Ok(json) => session.text(json).await.is_ok(),
            Err(e) => {
                error!(extension = %self.extension, "Failed to serialize message: {}", e);
                true
            }
        }
    }

    async fn run(
        &self,
        mut session: Session,
        mut msg_stream: actix_ws::MessageStream,
        mut snapshots: SnapshotReceiver,
        cancel: CancellationToken,
    ) {
        let mut ping_interval = interval(PING_INTERVAL);
        let mut close_reason = None;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,

                msg = msg_stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            debug!(extension = %self.extension, "Received text: {}", text);
                            if text.contains("ping") && !self.send(&mut session, &WsMessage::Pong).await {
                                break;
                            }
                        }
                        Some(Ok(Message::Ping(bytes))) => {
                            if session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(reason))) => {
                            info!(extension = %self.extension, "Client closed connection: {:?}", reason);
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            error!(extension = %self.extension, "WebSocket error: {}", e);
                            break;
                        }
                        None => break,
                    }
                }

                changed = snapshots.changed() => {
                    if changed.is_err() {
                        warn!(extension = %self.extension, "Dashboard poller stopped unexpectedly");
                        break;
                    }

                    if let Err(e) = self.guard.current_session(&self.token).await {
                        info!(extension = %self.extension, "Ending feed: {}", e);
                        let msg = WsMessage::Error {
                            code: e.error_code().to_string(),
                            message: e.to_string(),
                        };
                        self.send(&mut session, &msg).await;
                        close_reason = Some(CloseReason {
                            code: CloseCode::Policy,
                            description: Some(e.error_code().to_string()),
                        });
                        break;
                    }

                    let snapshot = snapshots.borrow_and_update().clone();
                    if let Some(snapshot) = snapshot {
                        let msg = WsMessage::Dashboard(DashboardResponse::new(snapshot, self.tz));
                        if !self.send(&mut session, &msg).await {
                            warn!(extension = %self.extension, "Failed to send update, closing connection");
                            break;
                        }
                    }
                }

                _ = ping_interval.tick() => {
                    if session.ping(b"").await.is_err() {
                        warn!(extension = %self.extension, "Failed to send ping, closing connection");
                        break;
                    }
                }
            }
        }

        info!(extension = %self.extension, "WebSocket connection closed");
        let _ = session.close(close_reason).await;
    }
}

/// Configure WebSocket route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(ws_handler));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_message_tags() {
        let json = serde_json::to_value(WsMessage::Pong).unwrap();
        assert_eq!(json, serde_json::json!({"type": "pong"}));

        let json = serde_json::to_value(WsMessage::Error {
            code: "session_revoked".to_string(),
            message: "Session revoked".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["data"]["code"], "session_revoked");
    }
}
