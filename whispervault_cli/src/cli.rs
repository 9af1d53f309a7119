use std::path::PathBuf;
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand};
use whispervault::collection::Presentation;
use whispervault::common::EncryptionAlgorithm;
use whispervault::utils::time::parse_rfc3339_string;

#[derive(Parser, Debug)]
#[command(author, version, about = "Command-line client for a WhisperVault document service", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.whispervault/config.json)
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API root, overriding the config file and environment
    #[arg(short = 's', long = "server", global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: TopLevelCommands,
}

#[derive(Subcommand, Debug)]
pub enum TopLevelCommands {
    /// Log in and store the session token in the config file
    Login {
        #[arg(short = 'e', long = "email")]
        email: Option<String>,
    },
    /// Create a new account and store its token
    Register {
        #[arg(short = 'n', long = "name")]
        name: Option<String>,
        #[arg(short = 'e', long = "email")]
        email: Option<String>,
    },
    /// Ask the service to send password reset instructions
    ResetPassword {
        #[arg(short = 'e', long = "email")]
        email: Option<String>,
    },
    /// Load the collection and enter interactive mode
    Open,
}

// --- REPL (交互式) 命令定义 ---
#[derive(Parser, Debug)]
#[command(no_binary_name = true, about = "REPL commands")]
pub enum ReplCommand {
    /// 按视图列出条目
    #[command(visible_alias = "ls")]
    List {
        /// 视图: all, favorites, recent, vault
        #[arg(short = 'v', long = "view")]
        view: Option<Presentation>,

        /// 仅本次列表使用的搜索词
        #[arg(short = 's', long = "search")]
        search: Option<String>,

        /// 显示每个条目的详细信息
        #[arg(short = 'l', long = "long")]
        long: bool,
    },
    /// 设置持续生效的搜索词 (不带参数则清除)
    Search { query: Option<String> },
    /// 为指定 id 的条目打开菜单
    Menu { id: String },
    /// 关闭菜单或对话框
    Close,
    /// 切换收藏状态
    #[command(visible_alias = "fav")]
    Favorite,
    /// 删除菜单中的条目
    #[command(visible_alias = "rm")]
    Delete,
    /// 恢复最近一次删除的条目
    #[command(visible_alias = "undo")]
    Restore,
    /// 重命名菜单中的条目
    Rename {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// 新建文件夹
    Mkdir {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// 为菜单中的文件创建分享链接
    Share {
        /// 过期时间 (RFC 3339，例如 2030-01-01T00:00:00Z)
        #[arg(short = 'e', long = "expires", value_parser = parse_rfc3339_string)]
        expires: Option<DateTime<Utc>>,
    },
    /// 下载菜单中的文件 (默认保存到当前目录)
    #[command(visible_alias = "get")]
    Download { path: Option<PathBuf> },
    /// 为菜单中的条目打开加密/解密对话框
    Vault,
    /// 以隐藏方式输入密钥
    Key,
    /// 选择加密算法
    Algo { algorithm: EncryptionAlgorithm },
    /// 提交对话框
    Submit,
    /// 取消对话框
    Cancel,
    /// 重新拉取条目
    Refresh,
    /// 显示当前会话状态
    Status,
    /// 退出交互式会话
    #[command(visible_alias = "quit")]
    Exit,
}
