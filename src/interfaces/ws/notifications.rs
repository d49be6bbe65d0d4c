//! WebSocket handler for dashboard notification clients
//!
//! Streams fleet events to clients in real time. Clients authenticate
//! during the handshake and then manage their channel subscriptions
//! with JSON messages.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::select;
use tracing::{debug, error, info, warn};

use crate::application::events::SharedEventBus;
use crate::domain::events::Channel;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};
use crate::interfaces::http::middleware::extract_token;

use super::registry::{ClientRegistry, SharedClientRegistry};

/// Handshake query parameters
///
/// Browser WebSocket clients cannot set request headers, so the bearer
/// token may arrive as `?token=` instead of an `Authorization` header.
#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    pub token: Option<String>,
}

/// Subscription commands sent by clients after the handshake
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ClientMessage {
    Subscribe { channel: String },
    Unsubscribe { channel: String },
}

/// State for the notification WebSocket handler
#[derive(Clone)]
pub struct NotificationState {
    pub event_bus: SharedEventBus,
    pub clients: SharedClientRegistry,
    pub jwt_config: JwtConfig,
}

/// WebSocket upgrade handler for notifications
///
/// The bearer credential is verified before the upgrade; a missing or
/// invalid token is rejected with 401 while the request is still plain
/// HTTP.
pub async fn ws_notifications_handler(
    ws: WebSocketUpgrade,
    State(state): State<NotificationState>,
    headers: HeaderMap,
    Query(auth): Query<WsAuthQuery>,
) -> Response {
    let header_token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token);
    let token = header_token.or(auth.token.as_deref());

    let Some(token) = token else {
        return unauthorized("Missing authentication token");
    };

    let claims = match verify_token(token, &state.jwt_config) {
        Ok(claims) if !claims.is_expired() => claims,
        _ => return unauthorized("Invalid authentication token"),
    };

    info!(
        user = %claims.username,
        "New notification WebSocket connection"
    );

    ws.on_upgrade(move |socket| handle_notification_socket(socket, state))
}

fn unauthorized(message: &str) -> Response {
    let body = Json(json!({
        "success": false,
        "message": message
    }));
    (StatusCode::UNAUTHORIZED, body).into_response()
}

/// Handle a WebSocket connection for notifications
async fn handle_notification_socket(socket: WebSocket, state: NotificationState) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscriber = state.event_bus.subscribe();
    let client_id = state.clients.register();

    // Send welcome message listing the channels a client may subscribe to
    let welcome = serde_json::json!({
        "type": "connected",
        "message": "Connected to fleet event stream",
        "channels": Channel::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>()
    });

    if let Err(e) = sender
        .send(Message::Text(welcome.to_string().into()))
        .await
    {
        error!("Failed to send welcome message: {}", e);
        state.clients.unregister(&client_id);
        return;
    }

    info!("Notification WebSocket client connected: {}", client_id);

    loop {
        select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!("Received text message: {}", text);
                        let reply = handle_client_message(&state.clients, &client_id, &text);
                        if let Err(e) = sender.send(Message::Text(reply.to_string().into())).await {
                            error!("Failed to send reply: {}", e);
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = sender.send(Message::Pong(data)).await {
                            error!("Failed to send pong: {}", e);
                            break;
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {
                        debug!("Received pong");
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Client sent close");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    None => {
                        info!("WebSocket stream ended");
                        break;
                    }
                    _ => {}
                }
            }

            event = subscriber.recv() => {
                match event {
                    Some(event_msg) => {
                        let channel = event_msg.event.channel();
                        if !state.clients.is_subscribed(&client_id, channel) {
                            continue;
                        }

                        match serde_json::to_string(&event_msg) {
                            Ok(json) => {
                                if let Err(e) = sender.send(Message::Text(json.into())).await {
                                    error!("Failed to send event: {}", e);
                                    break;
                                }
                                debug!("Event sent to client: {}", event_msg.event.event_type());
                            }
                            Err(e) => {
                                error!("Failed to serialize event: {}", e);
                            }
                        }
                    }
                    None => {
                        warn!("Event bus closed");
                        break;
                    }
                }
            }
        }
    }

    state.clients.unregister(&client_id);
    info!("Notification WebSocket client disconnected: {}", client_id);
}

/// Apply a client message to the registry and build the reply
///
/// A bad message never closes the connection; the client gets an
/// `error` reply and its subscriptions stay as they were.
fn handle_client_message(
    clients: &ClientRegistry,
    client_id: &str,
    text: &str,
) -> serde_json::Value {
    let parsed: Result<ClientMessage, _> = serde_json::from_str(text);

    match parsed {
        Ok(ClientMessage::Subscribe { channel }) => match Channel::parse(&channel) {
            Some(channel) => {
                clients.subscribe(client_id, channel);
                json!({ "type": "subscribed", "channel": channel.as_str() })
            }
            None => json!({
                "type": "error",
                "message": format!("Unknown channel: {}", channel)
            }),
        },
        Ok(ClientMessage::Unsubscribe { channel }) => match Channel::parse(&channel) {
            Some(channel) => {
                clients.unsubscribe(client_id, channel);
                json!({ "type": "unsubscribed", "channel": channel.as_str() })
            }
            None => json!({
                "type": "error",
                "message": format!("Unknown channel: {}", channel)
            }),
        },
        Err(_) => json!({
            "type": "error",
            "message": "Malformed message, expected subscribe or unsubscribe with a channel"
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_acks_and_updates_the_registry() {
        let registry = ClientRegistry::new();
        let id = registry.register();

        let reply = handle_client_message(
            &registry,
            &id,
            r#"{"type":"subscribe","channel":"truck-updates"}"#,
        );

        assert_eq!(reply["type"], "subscribed");
        assert_eq!(reply["channel"], "truck-updates");
        assert!(registry.is_subscribed(&id, Channel::TruckUpdates));
        assert!(!registry.is_subscribed(&id, Channel::Alerts));
    }

    #[test]
    fn unsubscribe_acks_even_when_not_subscribed() {
        let registry = ClientRegistry::new();
        let id = registry.register();

        let reply = handle_client_message(
            &registry,
            &id,
            r#"{"type":"unsubscribe","channel":"alerts"}"#,
        );

        assert_eq!(reply["type"], "unsubscribed");
        assert_eq!(reply["channel"], "alerts");
    }

    #[test]
    fn unknown_channel_gets_an_error_reply() {
        let registry = ClientRegistry::new();
        let id = registry.register();

        let reply = handle_client_message(
            &registry,
            &id,
            r#"{"type":"subscribe","channel":"trucks"}"#,
        );

        assert_eq!(reply["type"], "error");
        assert!(reply["message"]
            .as_str()
            .unwrap()
            .contains("Unknown channel: trucks"));
        assert!(!registry.is_subscribed(&id, Channel::TruckUpdates));
    }

    #[test]
    fn malformed_message_gets_an_error_reply() {
        let registry = ClientRegistry::new();
        let id = registry.register();

        for bad in [
            "not json",
            r#"{"channel":"alerts"}"#,
            r#"{"type":"ping"}"#,
            r#"{"type":"subscribe"}"#,
        ] {
            let reply = handle_client_message(&registry, &id, bad);
            assert_eq!(reply["type"], "error", "input: {}", bad);
        }

        assert!(!registry.is_subscribed(&id, Channel::Alerts));
    }
}
