use std::path::Path;
use secrecy::ExposeSecret;
use tracing::info;
use crate::errors::CliError;
use crate::ui::prompt::{read_secret, value_or_prompt};
use whispervault::auth::{Credentials, Registration};
use whispervault::config::ClientConfig;
use whispervault::gateway::HttpGateway;

/// 登录并把 token 写回配置文件
pub async fn handle_login(
    mut config: ClientConfig,
    config_path: &Path,
    email: Option<String>,
) -> Result<(), CliError> {
    let email = value_or_prompt(email, "Email: ")?;
    let password = read_secret("Password: ")?;

    let gateway = HttpGateway::new(&config)?;
    let token = gateway.login(&Credentials::new(email, password)).await?;
    save_token(&mut config, config_path, token.expose_secret())?;

    println!("Logged in. Token saved to {:?}.", config_path);
    Ok(())
}

/// 注册新账户。表单在发送前先在本地校验。
pub async fn handle_register(
    mut config: ClientConfig,
    config_path: &Path,
    name: Option<String>,
    email: Option<String>,
) -> Result<(), CliError> {
    let name = value_or_prompt(name, "Name: ")?;
    let email = value_or_prompt(email, "Email: ")?;
    let password = read_secret("Password: ")?;
    let confirm = read_secret("Confirm password: ")?;

    let registration = Registration::new(name, email, password, confirm);
    let gateway = HttpGateway::new(&config)?;
    let token = gateway.register(&registration).await?;
    save_token(&mut config, config_path, token.expose_secret())?;

    println!("Account created. Token saved to {:?}.", config_path);
    Ok(())
}

/// 请求重置密码。不需要登录，也不修改配置文件。
pub async fn handle_reset_password(config: &ClientConfig, email: Option<String>) -> Result<(), CliError> {
    let email = value_or_prompt(email, "Email: ")?;

    let gateway = HttpGateway::new(config)?;
    gateway.reset_password(&email).await?;

    println!("If an account exists for {}, reset instructions have been sent.", email.trim());
    Ok(())
}

fn save_token(config: &mut ClientConfig, config_path: &Path, token: &str) -> Result<(), CliError> {
    config.token = Some(token.to_string());
    config.save(config_path)?;
    info!("Saved session token to {:?}", config_path);
    Ok(())
}
