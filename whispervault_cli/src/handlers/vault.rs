use crate::errors::CliError;
use crate::handlers::reported;
use crate::repl::state::AppState;
use crate::ui::prompt::read_secret;
use whispervault::client::ClientError;
use whispervault::common::EncryptionAlgorithm;

/// 打开加密/解密对话框并打印对应的提示文本
pub fn handle_open_dialog(app_state: &mut AppState) -> Result<(), CliError> {
    let action = app_state.client.open_vault_dialog()?;
    println!("{}", action.title());
    println!("{}", action.key_hint());
    if action.uses_algorithm() {
        let choices: Vec<&str> = EncryptionAlgorithm::ALL.iter().map(|a| a.as_str()).collect();
        println!(
            "Algorithm: {} (change with 'algo <{}>')",
            EncryptionAlgorithm::default(),
            choices.join("|")
        );
    }
    println!("Set the key with 'key', then 'submit' or 'cancel'.");
    Ok(())
}

/// 密钥只从隐藏提示读取，不出现在命令行或历史记录中
pub fn handle_key(app_state: &mut AppState) -> Result<(), CliError> {
    // 先检查对话框状态，避免无意义地提示输入密钥
    app_state.client.session().dialog().map_err(ClientError::from)?;
    let key = read_secret("Encryption key: ")?;
    app_state.client.set_vault_key(key)?;
    Ok(())
}

pub fn handle_algorithm(app_state: &mut AppState, algorithm: EncryptionAlgorithm) -> Result<(), CliError> {
    app_state.client.set_vault_algorithm(algorithm)?;
    println!("Algorithm set to {}.", algorithm.label());
    Ok(())
}

pub async fn handle_submit(app_state: &mut AppState) -> Result<(), CliError> {
    reported(app_state.client.submit_vault().await)?;
    Ok(())
}

pub fn handle_cancel(app_state: &mut AppState) -> Result<(), CliError> {
    app_state.client.cancel_vault_dialog()?;
    println!("Cancelled.");
    Ok(())
}
