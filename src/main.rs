//! creek - Entry Point
//!
//! Interactive line client: `creek connect <host>:<port>`.

use log::info;
use std::process::ExitCode;

use creek::client::LoopOutcome;
use creek::error::ClientError;
use creek::error::handlers::{error_to_exit_code, handle_error};
use creek::protocol::parse_args;
use creek::utils::logging::setup_logging;
use creek::{ClientConfig, LineClient};

async fn run(args: &[String]) -> Result<LoopOutcome, ClientError> {
    let command = parse_args(args)?;
    let config = ClientConfig::load()?;
    let client = LineClient::new(config);
    client.execute(command).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args).await {
        Ok(outcome) => {
            info!("Exiting after {:?}", outcome);
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            handle_error(&e);
            println!("{}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}
