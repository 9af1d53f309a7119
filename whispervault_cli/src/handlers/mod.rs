pub mod auth;
pub mod list;
pub mod menu;
pub mod status;
pub mod vault;

use crate::errors::CliError;
use whispervault::client::ClientError;

/// 将客户端结果转换为 CLI 结果。
///
/// 客户端已经为网关、校验等失败生成了提示，这里只把没有提示的错误
/// （非法状态转换、未知 id）继续向上传递，避免同一失败输出两次。
pub(crate) fn reported<T>(result: Result<T, ClientError>) -> Result<Option<T>, CliError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e @ (ClientError::Session(_) | ClientError::UnknownItem(_))) => Err(e.into()),
        Err(_) => Ok(None),
    }
}
