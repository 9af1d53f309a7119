use crate::repl::state::AppState;
use crate::ui::printer::print_items;

/// 列出当前视图。`search` 仅对本次列表生效，不改变持续的搜索词。
pub fn handle_list(app_state: &AppState, search: Option<&str>, long: bool) {
    let client = &app_state.client;
    let presentation = app_state.presentation;
    let items = match search {
        Some(query) => presentation.view(client.store().collection(), query),
        None => client.view(presentation),
    };
    print_items(&items, presentation, long, app_state.colors_enabled);
}

pub fn handle_search(app_state: &mut AppState, query: String) {
    if query.is_empty() {
        println!("Search cleared.");
    } else {
        println!("Searching for '{}'.", query);
    }
    app_state.client.set_search_query(query);
    handle_list(app_state, None, false);
}
