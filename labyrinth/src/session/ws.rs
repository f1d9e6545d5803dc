//! WsSession: maze session over WebSocket.
//!
//! One I/O task owns the socket. The session handle sends it commands over an `mpsc` queue;
//! every command carries a `oneshot` sender that receives exactly one reply, so each move is
//! paired with the next inbound location message and nothing else.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message, WebSocketStream};
use tracing::{debug, info, warn};

use super::{SessionChannel, SessionError};
use crate::direction::Direction;
use crate::protocol::{LocationView, MoveRequest};

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Max time to wait for the response to one move.
const DEFAULT_MOVE_TIMEOUT_SECS: u64 = 300;

/// Timeouts for a WebSocket session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub connect_timeout: Duration,
    /// `None` waits for a response indefinitely.
    pub move_timeout: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            move_timeout: Some(Duration::from_secs(DEFAULT_MOVE_TIMEOUT_SECS)),
        }
    }
}

type Reply = oneshot::Sender<Result<LocationView, SessionError>>;

enum Command {
    /// Read the unsolicited start location.
    Greeting(Reply),
    Move(Direction, Reply),
}

pub struct WsSession {
    commands: mpsc::Sender<Command>,
    opened: bool,
}

impl WsSession {
    /// Dials `url` and starts the I/O task. The greeting is read lazily by [`SessionChannel::open`].
    pub async fn connect(url: &str, options: SessionOptions) -> Result<Self, SessionError> {
        let (ws, _) = tokio::time::timeout(options.connect_timeout, connect_async(url))
            .await
            .map_err(|_| {
                SessionError::Connect(format!("connect timeout after {:?}", options.connect_timeout))
            })?
            .map_err(|e| SessionError::Connect(e.to_string()))?;
        info!(url = %url, "connected to maze session");
        Ok(Self::from_stream(ws, options))
    }

    /// Wraps an established WebSocket stream.
    pub fn from_stream<T>(ws: WebSocketStream<T>, options: SessionOptions) -> Self
    where
        T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(drive(ws, rx, options.move_timeout));
        Self {
            commands: tx,
            opened: false,
        }
    }

    async fn request(
        &self,
        command: Command,
        rx: oneshot::Receiver<Result<LocationView, SessionError>>,
    ) -> Result<LocationView, SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }
}

#[async_trait]
impl SessionChannel for WsSession {
    async fn open(&mut self) -> Result<LocationView, SessionError> {
        if self.opened {
            return Err(SessionError::Protocol(
                "start location already received".to_string(),
            ));
        }
        let (tx, rx) = oneshot::channel();
        let start = self.request(Command::Greeting(tx), rx).await?;
        self.opened = true;
        Ok(start)
    }

    async fn move_to(&mut self, direction: Direction) -> Result<LocationView, SessionError> {
        if !self.opened {
            return Err(SessionError::NotOpen);
        }
        let (tx, rx) = oneshot::channel();
        self.request(Command::Move(direction, tx), rx).await
    }
}

/// I/O task: serves commands strictly in order until the handle is dropped or the link fails.
async fn drive<T>(
    mut ws: WebSocketStream<T>,
    mut commands: mpsc::Receiver<Command>,
    move_timeout: Option<Duration>,
) where
    T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    while let Some(command) = commands.recv().await {
        let (reply, result) = match command {
            Command::Greeting(reply) => (reply, receive(&mut ws, move_timeout).await),
            Command::Move(direction, reply) => {
                let result = match send_move(&mut ws, direction).await {
                    Ok(()) => receive(&mut ws, move_timeout).await,
                    Err(e) => Err(e),
                };
                (reply, result)
            }
        };
        // After a lost or late response the stream can no longer be paired with requests.
        let broken = matches!(
            result,
            Err(SessionError::Closed | SessionError::Transport(_) | SessionError::Timeout(_))
        );
        if reply.send(result).is_err() {
            debug!("move reply dropped by caller");
        }
        if broken {
            break;
        }
    }
    if let Err(e) = ws.close(None).await {
        debug!("close: {}", e);
    }
}

async fn send_move<T>(ws: &mut WebSocketStream<T>, direction: Direction) -> Result<(), SessionError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let json = serde_json::to_string(&MoveRequest::go(direction))
        .map_err(|e| SessionError::Protocol(e.to_string()))?;
    ws.send(Message::Text(json))
        .await
        .map_err(|e| SessionError::Transport(e.to_string()))
}

async fn receive<T>(
    ws: &mut WebSocketStream<T>,
    timeout: Option<Duration>,
) -> Result<LocationView, SessionError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, next_location(ws))
            .await
            .map_err(|_| SessionError::Timeout(limit))?,
        None => next_location(ws).await,
    }
}

/// Next location message; control frames are skipped.
async fn next_location<T>(ws: &mut WebSocketStream<T>) -> Result<LocationView, SessionError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(frame) = ws.next().await {
        let msg = frame.map_err(|e| SessionError::Transport(e.to_string()))?;
        match msg {
            Message::Text(text) => return LocationView::from_json(&text),
            Message::Binary(bytes) => return location_from_bytes(&bytes),
            Message::Close(frame) => {
                warn!(?frame, "maze session closed the connection");
                return Err(SessionError::Closed);
            }
            _ => continue,
        }
    }
    Err(SessionError::Closed)
}

/// Binary frames must hold UTF-8 JSON; invalid bytes are a protocol violation.
fn location_from_bytes(bytes: &[u8]) -> Result<LocationView, SessionError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| SessionError::Protocol(format!("invalid binary location message: {}", e)))?;
    LocationView::from_value(value)
}
