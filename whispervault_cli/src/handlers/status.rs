use crate::repl::state::AppState;
use whispervault::item::ItemKind;

/// 显示当前连接与会话状态
pub fn handle_status(app_state: &AppState) {
    let client = &app_state.client;
    let collection = client.collection();
    let session = client.session();

    println!("--- Session Status ---");
    println!("  Server:          {}", client.gateway().base_url());
    println!("  Logged in:       {}", if client.gateway().has_token() { "yes" } else { "no" });
    println!("  View:            {}", app_state.presentation);
    if !client.search_query().is_empty() {
        println!("  Search:          '{}'", client.search_query());
    }
    println!(
        "  Items:           {} ({} folder(s), {} file(s))",
        collection.len(),
        collection.count_kind(ItemKind::Folder),
        collection.count_kind(ItemKind::File)
    );
    println!("  Refreshes:       {}", client.store().generation());
    match session.target() {
        Some(item) => println!("  Selection:       {} '{}' ({})", item.kind(), item.name(), session.phase()),
        None => println!("  Selection:       none"),
    }
    if let Ok((_, draft)) = session.dialog() {
        println!("  Algorithm:       {}", draft.algorithm().label());
        println!("  Key entered:     {}", if draft.has_key() { "yes" } else { "no" });
    }
}
