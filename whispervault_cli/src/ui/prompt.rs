//! Functions for user interaction: plain and hidden input.

use std::io::{self, BufRead, IsTerminal, Write};

/// 读取一行普通输入
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// 读取密码或密钥。终端下隐藏输入；标准输入被重定向时按普通行读取。
pub fn read_secret(prompt: &str) -> io::Result<String> {
    if io::stdin().is_terminal() {
        rpassword::prompt_password(prompt)
    } else {
        read_line(prompt)
    }
}

/// 命令行未提供时交互式补全某个字段
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> io::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => read_line(prompt),
    }
}
