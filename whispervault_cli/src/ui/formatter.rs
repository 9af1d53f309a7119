//! UI-related string formatting, like colorization.

use chrono::{DateTime, Local, Utc};
use whispervault::item::{Item, ItemKind};

/// 使用 ANSI 代码为字符串着色
pub fn colorize_string(s: &str, color: &str) -> String {
    let code = match color {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        _ => return s.to_string(),
    };
    format!("{}{}\x1b[0m", code, s)
}

/// 条目类型标签，文件夹以蓝色显示
pub fn kind_label(kind: ItemKind, colors_enabled: bool) -> String {
    let label = format!("{:<6}", kind.as_str());
    match kind {
        ItemKind::Folder if colors_enabled => colorize_string(&label, "blue"),
        _ => label,
    }
}

/// 收藏与加密标记，例如 "[fav] [locked]"
pub fn item_markers(item: &Item) -> String {
    let mut markers = Vec::new();
    if item.is_favorite() {
        markers.push("[fav]");
    }
    if item.is_encrypted() {
        markers.push("[locked]");
    }
    markers.join(" ")
}

/// 以本地时区显示时间戳
pub fn format_local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
