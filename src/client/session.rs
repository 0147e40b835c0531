//! Module `session`
//!
//! A [`Session`] owns one TCP connection and enforces strict turn-taking with
//! the peer: one outbound line, then one inbound line (or the reverse, per the
//! session's [`TurnOrder`]).

use log::{debug, info, warn};
use std::io::ErrorKind;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::client::state::{SessionState, TurnOrder};
use crate::config::DEFAULT_READ_BUFFER_SIZE;
use crate::error::{ConnectError, RecvError, SendError};
use crate::protocol::framing::{LineBuffer, encode_line};

/// Settings fixed at connect time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub turn_order: TurnOrder,
    /// Bytes requested per socket read. This bounds a single read, not a line.
    pub read_buffer_size: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            turn_order: TurnOrder::ServerFirst,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

/// One connection to a remote peer, from connect until close.
pub struct Session {
    stream: Option<TcpStream>,
    buffer: LineBuffer,
    state: SessionState,
    options: SessionOptions,
    peer: String,
    failure: Option<String>,
}

/// Error kinds meaning the peer is gone for good.
fn is_peer_gone(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::BrokenPipe
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
    )
}

impl Session {
    /// Opens a connection to `host:port`.
    ///
    /// There is no connect timeout beyond the operating system's, and no retry.
    pub async fn connect(
        host: &str,
        port: u16,
        options: SessionOptions,
    ) -> Result<Session, ConnectError> {
        if host.is_empty() {
            return Err(ConnectError::EmptyHost);
        }
        if port == 0 {
            return Err(ConnectError::InvalidPort(port));
        }

        let peer = format!("{}:{}", host, port);
        let mut session = Session {
            stream: None,
            buffer: LineBuffer::new(),
            state: SessionState::Connecting,
            options,
            peer,
            failure: None,
        };

        debug!("Connecting to {} ({:?})", session.peer, options.turn_order);

        match TcpStream::connect((host, port)).await {
            Ok(stream) => {
                info!("Connected to {}", session.peer);
                session.stream = Some(stream);
                session.transition(SessionState::Ready);
                Ok(session)
            }
            Err(source) => {
                warn!("Failed to connect to {}: {}", session.peer, source);
                Err(ConnectError::Io {
                    target: session.peer,
                    source,
                })
            }
        }
    }

    /// Sends `text` followed by a single newline.
    ///
    /// Fails with [`SendError::NotReady`] if it is the peer's turn, and with
    /// [`SendError::EmbeddedDelimiter`] (before writing anything) if `text`
    /// contains a newline.
    pub async fn send_line(&mut self, text: &str) -> Result<(), SendError> {
        if !self.state.may_send(self.options.turn_order) {
            return Err(SendError::NotReady(self.state.clone()));
        }
        let frame = encode_line(text).ok_or(SendError::EmbeddedDelimiter)?;

        let Some(stream) = self.stream.as_mut() else {
            return Err(SendError::NotReady(self.state.clone()));
        };

        let result = match stream.write_all(&frame).await {
            Ok(()) => stream.flush().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                debug!("Sent {} bytes to {}", frame.len(), self.peer);
                self.transition(SessionState::AwaitingPeer);
                Ok(())
            }
            Err(e) => {
                let err = if is_peer_gone(e.kind()) {
                    SendError::BrokenPipe
                } else {
                    SendError::Io(e)
                };
                self.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// Waits for the next complete line from the peer.
    ///
    /// Bytes are buffered across reads until a newline arrives; anything after
    /// the newline is kept for the following call.
    pub async fn receive_line(&mut self) -> Result<String, RecvError> {
        if !self.state.may_receive(self.options.turn_order) {
            return Err(RecvError::NotReady(self.state.clone()));
        }
        if self.state == SessionState::Ready {
            self.transition(SessionState::AwaitingPeer);
        }

        let mut chunk = vec![0u8; self.options.read_buffer_size.max(1)];

        loop {
            if let Some(line) = self.buffer.next_line() {
                self.transition(SessionState::AwaitingUser);
                return Ok(line);
            }

            let Some(stream) = self.stream.as_mut() else {
                return Err(RecvError::NotReady(self.state.clone()));
            };

            match stream.read(&mut chunk).await {
                Ok(0) => {
                    if self.buffer.pending_len() > 0 {
                        warn!(
                            "{} closed with {} bytes of unterminated line; discarding",
                            self.peer,
                            self.buffer.pending_len()
                        );
                        self.buffer.clear();
                    }
                    info!("Connection closed by {}", self.peer);
                    self.fail("peer closed the connection".to_string());
                    return Err(RecvError::PeerClosed);
                }
                Ok(n) => {
                    debug!("Read {} bytes from {}", n, self.peer);
                    self.buffer.extend(&chunk[..n]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("Failed to read from {}: {}", self.peer, e);
                    self.fail(e.to_string());
                    return Err(RecvError::ConnectionLost(e));
                }
            }
        }
    }

    /// Releases the connection. Calling it again is a no-op.
    pub async fn close(&mut self) {
        if self.state == SessionState::Closed {
            debug!("Session with {} already closed", self.peer);
            return;
        }

        self.transition(SessionState::Closing);

        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                debug!("Shutdown of {} failed: {}", self.peer, e);
            }
            info!("Connection to {} closed", self.peer);
        }
        self.buffer.clear();

        self.transition(SessionState::Closed);
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn turn_order(&self) -> TurnOrder {
        self.options.turn_order
    }

    /// The `host:port` this session connected to.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Why the session failed, if it did. Kept after close.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Returns whether the socket is still held.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn fail(&mut self, reason: String) {
        self.failure = Some(reason.clone());
        self.transition(SessionState::Failed(reason));
    }

    fn transition(&mut self, next: SessionState) {
        if self.state.can_transition(&next) {
            debug!("Session {}: {} -> {}", self.peer, self.state, next);
            self.state = next;
        } else {
            warn!(
                "Session {}: ignoring transition {} -> {}",
                self.peer, self.state, next
            );
        }
    }
}
