//! Functions for printing items, notices and status to the console.

use crate::ui::formatter::{colorize_string, format_local_time, item_markers, kind_label};
use whispervault::client::Notice;
use whispervault::collection::Presentation;
use whispervault::item::Item;
use whispervault::utils::time::format_last_accessed;

/// 打印列表中的单个条目
/// 格式: {id} {类型} {名称} {标记}
pub fn print_item_row(item: &Item, presentation: Presentation, colors_enabled: bool) {
    let mut line = format!(
        "{:<26} {} {}",
        item.id(),
        kind_label(item.kind(), colors_enabled),
        item.name()
    );
    let markers = item_markers(item);
    if !markers.is_empty() {
        line.push(' ');
        line.push_str(&markers);
    }
    // 最近视图额外显示相对访问时间
    if presentation == Presentation::Recent {
        let when = item
            .last_accessed()
            .map(format_last_accessed)
            .unwrap_or_else(|| "Never".to_string());
        line.push_str(&format!("  ({})", when));
    }
    println!("{}", line);
}

/// 打印单个条目的详细信息
pub fn print_item_details(item: &Item) {
    println!("----------------------------------------");
    println!("  Name:            {}", item.name());
    println!("  Type:            {}", item.kind());
    println!("  ID:              {}", item.id());
    println!("  Favorite:        {}", if item.is_favorite() { "yes" } else { "no" });
    println!("  Encrypted:       {}", if item.is_encrypted() { "yes" } else { "no" });
    match item.last_accessed() {
        Some(at) => println!(
            "  Last accessed:   {} ({})",
            format_local_time(at),
            format_last_accessed(at)
        ),
        None => println!("  Last accessed:   Never"),
    }
    // 服务端返回的其他字段原样显示
    for (key, value) in &item.entry().extra {
        println!("  {:<16} {}", format!("{}:", key), value);
    }
}

pub fn print_items(items: &[&Item], presentation: Presentation, long: bool, colors_enabled: bool) {
    if items.is_empty() {
        println!("No items.");
        return;
    }
    if long {
        for item in items {
            print_item_details(item);
        }
        println!("----------------------------------------");
    } else {
        for item in items {
            print_item_row(item, presentation, colors_enabled);
        }
    }
}

/// 打印客户端产生的提示。错误提示为红色。
pub fn print_notices(notices: &[Notice], colors_enabled: bool) {
    for notice in notices {
        if notice.is_error() {
            let text = format!("✗ {}", notice.message);
            if colors_enabled {
                println!("{}", colorize_string(&text, "red"));
            } else {
                println!("{}", text);
            }
        } else if colors_enabled {
            println!("{}", colorize_string(&format!("✓ {}", notice.message), "green"));
        } else {
            println!("✓ {}", notice.message);
        }
    }
}
