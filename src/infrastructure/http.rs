use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("ticketkb/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pooled client shared by every call an adapter makes. Safe to use concurrently.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// Strip a trailing slash so paths can be appended with `format!`.
pub fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
