//! User-Agent header sent by the REST transport.

use std::sync::OnceLock;

const CLIENT_NAME: &str = "shopdesk";

const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent for REST requests.
///
/// Format: `shopdesk/0.1.0 (rust/1.92; linux/x86_64)`. Backend access logs
/// use it to tell back-office traffic from storefront traffic.
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} (rust/{}; {}/{})",
            CLIENT_NAME,
            CLIENT_VERSION,
            env!("CARGO_PKG_RUST_VERSION"),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}
