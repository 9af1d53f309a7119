/// The API root used when no server is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000/api";

/// Request timeout applied by the HTTP gateway, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimum accepted password length for registration.
pub const MIN_PASSWORD_LEN: usize = 6;

// --- 环境变量 ---
/// Overrides `serverUrl` from the config file.
pub const ENV_SERVER_URL: &str = "WHISPERVAULT_SERVER_URL";

/// Overrides `token` from the config file.
pub const ENV_TOKEN: &str = "WHISPERVAULT_TOKEN";
