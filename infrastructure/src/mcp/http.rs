//! HTTP client used underneath both MCP transports

use mcpmap_application::GatewayError;
use mcpmap_domain::ConnectionConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;

/// Build the reqwest client for one connection.
///
/// The proxy (if any) applies to every scheme; the bearer token is sent on
/// every request as a default header.
pub(crate) fn build_http_client(
    config: &ConnectionConfig,
    connect_timeout: Duration,
) -> Result<reqwest::Client, GatewayError> {
    let mut builder = reqwest::Client::builder().connect_timeout(connect_timeout);

    if let Some(proxy_url) = non_empty(config.proxy.as_deref()) {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| GatewayError::Transport(format!("invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    if let Some(token) = non_empty(config.token.as_deref()) {
        builder = builder.default_headers(auth_headers(token)?);
    }

    builder
        .build()
        .map_err(|e| GatewayError::Transport(format!("build HTTP client: {e}")))
}

fn auth_headers(token: &str) -> Result<HeaderMap, GatewayError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| GatewayError::Transport(format!("auth token: {e}")))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
