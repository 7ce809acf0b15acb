//! Sequential CDP command channel over a DevTools WebSocket.
//!
//! The protocol use here is deliberately minimal: one command is written as a
//! JSON text frame, then the channel waits for the next inbound frame and
//! returns it as the reply. Correlation is positional — at most one command
//! is outstanding at a time, so no id matching or reader task is needed.

use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::{json, Value};
use tabclick_core::{Error, Result};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

/// Fixed request identifier sent with every command.
///
/// The channel never has more than one command in flight, so replies are
/// matched by position rather than by id.
pub const COMMAND_ID: u64 = 1;

/// A CDP command as it goes out on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    pub id: u64,
    pub method: String,
    pub params: Value,
}

/// Build the outbound message for a method/params pair.
pub fn build_command(method: &str, params: Value) -> Command {
    Command {
        id: COMMAND_ID,
        method: method.to_string(),
        params,
    }
}

/// A channel that can issue one CDP command at a time and hand back the reply.
///
/// The production implementation is [`CdpChannel`]; tests drive the workflow
/// with scripted doubles instead.
#[async_trait]
pub trait CommandChannel: Send {
    /// Send a command and wait for the next inbound message as its reply.
    async fn send(&mut self, method: &str, params: Value) -> Result<Value>;

    /// Enable a CDP domain (e.g. "DOM", "Runtime").
    ///
    /// Domains must be enabled before their features can be used.
    async fn enable_domain(&mut self, domain: &str) -> Result<()> {
        self.send(&format!("{domain}.enable"), json!({})).await?;
        Ok(())
    }
}

/// Command channel over a real DevTools WebSocket connection.
///
/// Owns the stream exclusively; dropping the channel releases the underlying
/// connection on every exit path.
pub struct CdpChannel {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    reply_timeout: Duration,
}

impl CdpChannel {
    /// Connect to a target's `webSocketDebuggerUrl`.
    pub async fn connect(ws_url: &str, reply_timeout: Duration) -> Result<Self> {
        info!(url = ws_url, "connecting to DevTools WebSocket");

        let (ws, _) = connect_async(ws_url).await.map_err(|e| {
            Error::Connection(format!("failed to connect to {}: {}", ws_url, e))
        })?;

        Ok(Self { ws, reply_timeout })
    }

    /// Gracefully close the WebSocket. Best effort; dropping the channel
    /// also tears the connection down.
    pub async fn close(&mut self) {
        if let Err(e) = self.ws.close(None).await {
            debug!("WebSocket close failed (may already be closed): {}", e);
        }
    }

    /// Wait for the next data frame and parse it as JSON.
    async fn recv_reply(&mut self) -> Result<Value> {
        loop {
            let msg = match self.ws.next().await {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    return Err(Error::Connection(format!("WebSocket read error: {}", e)));
                }
                None => {
                    return Err(Error::Connection(
                        "channel closed before a reply arrived".to_string(),
                    ));
                }
            };

            let text = match msg {
                Message::Text(t) => t,
                Message::Binary(b) => match String::from_utf8(b) {
                    Ok(s) => s,
                    Err(_) => {
                        warn!("discarding non-UTF-8 binary frame");
                        continue;
                    }
                },
                Message::Close(_) => {
                    return Err(Error::Connection(
                        "channel closed before a reply arrived".to_string(),
                    ));
                }
                // Ping/pong and raw frames are not replies.
                _ => continue,
            };

            return serde_json::from_str(&text)
                .map_err(|e| Error::Protocol(format!("reply is not valid JSON: {}", e)));
        }
    }
}

#[async_trait]
impl CommandChannel for CdpChannel {
    async fn send(&mut self, method: &str, params: Value) -> Result<Value> {
        let cmd = build_command(method, params);
        let text = serde_json::to_string(&cmd)?;

        debug!(method = method, "sending CDP command");

        self.ws
            .send(Message::Text(text))
            .await
            .map_err(|e| Error::Connection(format!("failed to send command: {}", e)))?;

        match tokio::time::timeout(self.reply_timeout, self.recv_reply()).await {
            Ok(reply) => reply,
            Err(_) => Err(Error::Timeout(format!(
                "no reply to '{}' within {:?}",
                method, self.reply_timeout
            ))),
        }
    }
}
