use log::{error, info, warn};
use std::future::Future;
use std::io;

use crate::client::session::Session;
use crate::client::state::TurnOrder;
use crate::error::RecvError;
use crate::protocol::{UserInput, parse_user_input};

pub const CLOSING_NOTICE: &str = "Closing connection...";
pub const PEER_CLOSED_NOTICE: &str = "[Server closed the connection]";
pub const CONNECTION_LOST_NOTICE: &str = "[Connection lost]";
pub const INTERRUPTED_NOTICE: &str = "[Interrupted, closing connection...]";

/// Where outbound lines come from, e.g. a terminal prompt.
#[allow(async_fn_in_trait)]
pub trait LineSource {
    /// Returns the next line without its terminator, or `None` at end of input.
    async fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Where inbound lines and status notices go, e.g. the terminal.
pub trait LineSink {
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    fn write_notice(&mut self, text: &str) -> io::Result<()>;
}

/// How an interactive loop ended.
#[derive(Debug, PartialEq)]
pub enum LoopOutcome {
    /// The user typed an exit keyword.
    UserExit,
    /// The line source ran dry.
    InputClosed,
    PeerClosed,
    ConnectionLost,
    SendFailed,
    InputFailed,
    OutputFailed,
    Interrupted,
}

impl LoopOutcome {
    /// Returns whether the user ended the session on purpose.
    pub fn is_graceful(&self) -> bool {
        matches!(self, LoopOutcome::UserExit | LoopOutcome::InputClosed)
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_graceful() { 0 } else { 1 }
    }
}

/// Runs the turn-taking loop until the user leaves, the peer goes away, or
/// Ctrl-C is pressed. The session is closed on every path.
pub async fn run_interactive_loop<S, K>(
    session: &mut Session,
    source: &mut S,
    sink: &mut K,
) -> LoopOutcome
where
    S: LineSource,
    K: LineSink,
{
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    run_interactive_loop_until(session, source, sink, interrupt).await
}

/// Same as [`run_interactive_loop`], with `interrupt` standing in for Ctrl-C.
pub async fn run_interactive_loop_until<S, K, F>(
    session: &mut Session,
    source: &mut S,
    sink: &mut K,
    interrupt: F,
) -> LoopOutcome
where
    S: LineSource,
    K: LineSink,
    F: Future<Output = ()>,
{
    let outcome = {
        let turns = take_turns(session, source, sink);
        tokio::select! {
            outcome = turns => outcome,
            _ = interrupt => LoopOutcome::Interrupted,
        }
    };

    if outcome == LoopOutcome::Interrupted {
        let _ = sink.write_notice(INTERRUPTED_NOTICE);
    }

    session.close().await;
    info!("Session with {} ended: {:?}", session.peer(), outcome);
    outcome
}

async fn take_turns<S, K>(session: &mut Session, source: &mut S, sink: &mut K) -> LoopOutcome
where
    S: LineSource,
    K: LineSink,
{
    if session.turn_order() == TurnOrder::ServerFirst {
        if let Err(outcome) = peer_turn(session, sink).await {
            return outcome;
        }
    }

    loop {
        let line = match source.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("Input closed");
                let _ = sink.write_notice(CLOSING_NOTICE);
                return LoopOutcome::InputClosed;
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                let _ = sink.write_notice(&format!("[Error]: {}", e));
                return LoopOutcome::InputFailed;
            }
        };

        let text = match parse_user_input(&line) {
            UserInput::Terminate => {
                let _ = sink.write_notice(CLOSING_NOTICE);
                return LoopOutcome::UserExit;
            }
            UserInput::Line(text) => text,
        };

        if let Err(e) = session.send_line(&text).await {
            warn!("Failed to send to {}: {}", session.peer(), e);
            let _ = sink.write_notice(&format!("[Error]: {}", e));
            return LoopOutcome::SendFailed;
        }

        if let Err(outcome) = peer_turn(session, sink).await {
            return outcome;
        }
    }
}

async fn peer_turn<K: LineSink>(session: &mut Session, sink: &mut K) -> Result<(), LoopOutcome> {
    match session.receive_line().await {
        Ok(line) => sink.write_line(&line).map_err(|e| {
            error!("Failed to write output: {}", e);
            LoopOutcome::OutputFailed
        }),
        Err(RecvError::PeerClosed) => {
            let _ = sink.write_notice(PEER_CLOSED_NOTICE);
            Err(LoopOutcome::PeerClosed)
        }
        Err(e) => {
            warn!("Lost connection to {}: {}", session.peer(), e);
            let _ = sink.write_notice(CONNECTION_LOST_NOTICE);
            Err(LoopOutcome::ConnectionLost)
        }
    }
}
