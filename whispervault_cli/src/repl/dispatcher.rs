use crate::cli::ReplCommand;
use crate::errors::CliError;
use crate::handlers;
use crate::repl::state::AppState;

/// REPL 命令处理器
pub async fn handle_repl_command(command: ReplCommand, app_state: &mut AppState) -> Result<(), CliError> {
    match command {
        ReplCommand::List { view, search, long } => {
            if let Some(view) = view {
                app_state.presentation = view;
            }
            handlers::list::handle_list(app_state, search.as_deref(), long);
        }
        ReplCommand::Search { query } => {
            handlers::list::handle_search(app_state, query.unwrap_or_default());
        }
        ReplCommand::Menu { id } => {
            handlers::menu::handle_open_menu(app_state, &id)?;
        }
        ReplCommand::Close => {
            app_state.client.close_menu();
        }
        ReplCommand::Favorite => {
            handlers::menu::handle_favorite(app_state).await?;
        }
        ReplCommand::Delete => {
            handlers::menu::handle_delete(app_state).await?;
        }
        ReplCommand::Restore => {
            handlers::menu::handle_restore(app_state).await?;
        }
        ReplCommand::Rename { name } => {
            handlers::menu::handle_rename(app_state, &name.join(" ")).await?;
        }
        ReplCommand::Mkdir { name } => {
            handlers::menu::handle_mkdir(app_state, &name.join(" ")).await?;
        }
        ReplCommand::Share { expires } => {
            handlers::menu::handle_share(app_state, expires).await?;
        }
        ReplCommand::Download { path } => {
            handlers::menu::handle_download(app_state, path).await?;
        }
        ReplCommand::Vault => {
            handlers::vault::handle_open_dialog(app_state)?;
        }
        ReplCommand::Key => {
            handlers::vault::handle_key(app_state)?;
        }
        ReplCommand::Algo { algorithm } => {
            handlers::vault::handle_algorithm(app_state, algorithm)?;
        }
        ReplCommand::Submit => {
            handlers::vault::handle_submit(app_state).await?;
        }
        ReplCommand::Cancel => {
            handlers::vault::handle_cancel(app_state)?;
        }
        ReplCommand::Refresh => {
            // 失败已作为提示输出
            if app_state.client.refresh().await.is_ok() {
                println!("Loaded {} item(s).", app_state.client.collection().len());
            }
        }
        ReplCommand::Status => {
            handlers::status::handle_status(app_state);
        }
        ReplCommand::Exit => {
            app_state.running = false;
        }
    }
    Ok(())
}
