use std::io;
use thiserror::Error;
use whispervault::client::ClientError;
use whispervault::config::ConfigError;
use whispervault::gateway::GatewayError;
use whispervault::item::ItemIdError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not find home directory")]
    NoHomeDir,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("REPL Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid item id: {0}")]
    InvalidId(#[from] ItemIdError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Gateway(#[from] GatewayError),
}
