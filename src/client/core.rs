use log::info;

use crate::client::handler::{LineSink, LineSource, LoopOutcome, run_interactive_loop};
use crate::client::session::Session;
use crate::client::terminal::{TerminalSink, TerminalSource};
use crate::config::ClientConfig;
use crate::error::{ClientError, ConnectError};
use crate::protocol::{Address, Command};

/// Interactive line client: connects to one peer and runs the prompt loop.
pub struct LineClient {
    config: ClientConfig,
}

impl LineClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Opens a session using this client's turn order and buffer size.
    pub async fn connect(&self, address: &Address) -> Result<Session, ConnectError> {
        Session::connect(&address.host, address.port, self.config.session_options()).await
    }

    /// Executes a parsed command against the terminal.
    pub async fn execute(&self, command: Command) -> Result<LoopOutcome, ClientError> {
        match command {
            Command::Connect(address) => {
                let mut source = TerminalSource::new(self.config.prompt.clone());
                let mut sink = TerminalSink;
                self.run(&address, &mut source, &mut sink).await
            }
        }
    }

    /// Connects to `address` and drives the loop until it ends.
    ///
    /// Only connecting can fail; problems once the session is up end the loop
    /// and are reported through the returned outcome.
    pub async fn run<S, K>(
        &self,
        address: &Address,
        source: &mut S,
        sink: &mut K,
    ) -> Result<LoopOutcome, ClientError>
    where
        S: LineSource,
        K: LineSink,
    {
        let mut session = self.connect(address).await?;
        info!(
            "Session with {} started ({:?})",
            session.peer(),
            session.turn_order()
        );

        Ok(run_interactive_loop(&mut session, source, sink).await)
    }
}
