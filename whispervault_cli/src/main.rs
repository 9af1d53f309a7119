mod cli;
pub mod errors;
mod handlers;
mod repl;
mod ui;

use crate::cli::{Cli, TopLevelCommands};
use crate::errors::CliError;
use crate::repl::run_repl;
use crate::repl::state::AppState;
use crate::ui::printer::print_notices;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use whispervault::client::{Client, ClientError};
use whispervault::config::ClientConfig;
use whispervault::gateway::HttpGateway;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // 1. 加载配置：文件 -> 环境变量 -> 命令行
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = ClientConfig::load(&config_path)?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    config.validate()?;
    tracing::debug!("Using {:?} from {:?}", config, config_path);

    // 2. 分发顶层命令
    match cli.command {
        TopLevelCommands::Login { email } => {
            handlers::auth::handle_login(config, &config_path, email).await
        }
        TopLevelCommands::Register { name, email } => {
            handlers::auth::handle_register(config, &config_path, name, email).await
        }
        TopLevelCommands::ResetPassword { email } => {
            handlers::auth::handle_reset_password(&config, email).await
        }
        TopLevelCommands::Open => handle_open_command(&config).await,
    }
}

async fn handle_open_command(config: &ClientConfig) -> Result<(), CliError> {
    let gateway = HttpGateway::new(config)?;
    if !gateway.has_token() {
        println!("No session token configured. Run 'whispervault login' first.");
    }
    println!("Connecting to {}", gateway.base_url());

    let mut app_state = AppState::new(Client::new(gateway), io::stdout().is_terminal());
    // 首次加载失败不是致命错误，提示后仍然进入交互模式
    match app_state.client.refresh().await {
        Ok(()) => println!("Loaded {} item(s).", app_state.client.collection().len()),
        Err(ClientError::Gateway(e)) if e.is_auth() => {
            println!("The service rejected the session token. Run 'whispervault login'.");
        }
        Err(_) => {}
    }
    let notices = app_state.client.take_notices();
    print_notices(&notices, app_state.colors_enabled);

    println!("Type 'help' for commands or 'exit' to quit.");
    run_repl(&mut app_state).await
}

fn default_config_path() -> Result<PathBuf, CliError> {
    let home = dirs::home_dir().ok_or(CliError::NoHomeDir)?;
    Ok(home.join(".whispervault").join("config.json"))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
