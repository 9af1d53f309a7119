pub mod dispatcher;
pub mod state;

use crate::cli::ReplCommand;
use crate::errors::CliError;
use crate::repl::dispatcher::handle_repl_command;
use crate::repl::state::AppState;
use crate::ui::printer::print_notices;
use clap::Parser;
use rustyline::DefaultEditor;

pub async fn run_repl(app_state: &mut AppState) -> Result<(), CliError> {
    let mut rl = DefaultEditor::new()?;

    while app_state.running {
        let readline = rl.readline(&app_state.prompt());
        match readline {
            Ok(line) => {
                let args = shlex::split(line.as_str()).unwrap_or_default();
                if args.is_empty() {
                    continue;
                }
                // 与密钥相关的输入不进入历史记录
                if !is_key_entry(&args) {
                    rl.add_history_entry(line.as_str())?;
                }

                match ReplCommand::try_parse_from(args) {
                    Ok(command) => {
                        if let Err(e) = handle_repl_command(command, app_state).await {
                            eprintln!("Error: {}", e);
                        }
                    }
                    Err(e) => {
                        e.print()?;
                    }
                }
                // 每条命令之后输出客户端积累的提示
                let notices = app_state.client.take_notices();
                print_notices(&notices, app_state.colors_enabled);
            }
            Err(_) => {
                break;
            }
        }
    }
    println!("Goodbye!");
    Ok(())
}

fn is_key_entry(args: &[String]) -> bool {
    args.first().is_some_and(|first| first == "key")
}
