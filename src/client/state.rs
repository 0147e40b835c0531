//! Module `state`
//!
//! Session lifecycle states and the turn order a session commits to when it is
//! created.

use serde::Deserialize;
use std::fmt;

/// Who speaks first once the connection is up.
///
/// The order is fixed for the life of a session; after the first turn the user
/// and the peer strictly alternate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    /// Wait for the peer's line (typically a greeting), then prompt.
    ServerFirst,
    /// Prompt immediately and send, then wait for the reply.
    ClientFirst,
}

/// Lifecycle of one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Ready,
    AwaitingPeer,
    AwaitingUser,
    Closing,
    Closed,
    Failed(String),
}

impl SessionState {
    /// Returns whether the session may move from `self` to `next`.
    pub fn can_transition(&self, next: &SessionState) -> bool {
        use SessionState::*;

        match (self, next) {
            (Connecting, Ready) => true,
            (Connecting, Failed(_)) => true,
            (Ready | AwaitingUser, AwaitingPeer) => true,
            (Ready | AwaitingPeer, AwaitingUser) => true,
            (Ready | AwaitingPeer | AwaitingUser, Failed(_)) => true,
            (Ready | AwaitingPeer | AwaitingUser | Failed(_), Closing) => true,
            (Closing, Closed) => true,
            _ => false,
        }
    }

    /// Returns whether a line may be sent now under the given turn order.
    pub fn may_send(&self, order: TurnOrder) -> bool {
        match self {
            SessionState::Ready => order == TurnOrder::ClientFirst,
            SessionState::AwaitingUser => true,
            _ => false,
        }
    }

    /// Returns whether a line may be received now under the given turn order.
    pub fn may_receive(&self, order: TurnOrder) -> bool {
        match self {
            SessionState::Ready => order == TurnOrder::ServerFirst,
            SessionState::AwaitingPeer => true,
            _ => false,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Connecting => write!(f, "connecting"),
            SessionState::Ready => write!(f, "ready"),
            SessionState::AwaitingPeer => write!(f, "awaiting peer"),
            SessionState::AwaitingUser => write!(f, "awaiting user"),
            SessionState::Closing => write!(f, "closing"),
            SessionState::Closed => write!(f, "closed"),
            SessionState::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}
