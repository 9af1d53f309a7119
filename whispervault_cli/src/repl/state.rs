use whispervault::client::Client;
use whispervault::collection::Presentation;
use whispervault::gateway::HttpGateway;

pub struct AppState {
    pub client: Client<HttpGateway>,
    /// 当前视图，`ls -v` 会切换它
    pub presentation: Presentation,
    pub colors_enabled: bool,
    pub running: bool,
}

impl AppState {
    pub fn new(client: Client<HttpGateway>, colors_enabled: bool) -> Self {
        Self {
            client,
            presentation: Presentation::default(),
            colors_enabled,
            running: true,
        }
    }

    /// 提示符，例如 `whispervault[favorites|menu:photo.png]> `
    pub fn prompt(&self) -> String {
        let session = self.client.session();
        match session.target() {
            Some(item) => format!(
                "whispervault[{}|{}:{}]> ",
                self.presentation,
                session.phase(),
                item.name()
            ),
            None => format!("whispervault[{}]> ", self.presentation),
        }
    }
}
