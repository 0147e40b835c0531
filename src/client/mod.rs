//! Interactive client
//!
//! Session lifecycle, the turn-taking loop, and the terminal it talks to.

pub mod core;
pub mod handler;
pub mod session;
pub mod state;
pub mod terminal;

pub use self::core::LineClient;
pub use handler::{
    LineSink, LineSource, LoopOutcome, run_interactive_loop, run_interactive_loop_until,
};
pub use session::{Session, SessionOptions};
pub use state::{SessionState, TurnOrder};
pub use terminal::{TerminalSink, TerminalSource};
