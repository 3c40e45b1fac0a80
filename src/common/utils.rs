//! Utility functions for quorum-counter

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Largest accepted request body; a counter fits in far fewer bytes.
pub const MAX_BODY_BYTES: usize = 1024;

/// Parse a counter value from a request or response body.
///
/// Accepts a decimal non-negative integer, ignoring surrounding ASCII
/// whitespace. Anything else (empty, negative, non-numeric) is rejected.
pub fn parse_counter(body: &[u8]) -> crate::Result<u64> {
    std::str::from_utf8(body)
        .ok()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or(crate::Error::InvalidBody)
}

/// Parse a comma-separated list of vault addresses.
///
/// Empty entries and entries that are not `host:port` are dropped.
pub fn parse_vault_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| is_vault_addr(entry))
        .map(str::to_string)
        .collect()
}

fn is_vault_addr(entry: &str) -> bool {
    match entry.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

/// Fallback handler: only the root path is served.
pub async fn invalid_path(uri: Uri) -> crate::Error {
    crate::Error::InvalidPath(uri.path().to_string())
}

/// Response mapper for the body limit layer.
///
/// A body over `MAX_BODY_BYTES` cannot hold a counter, so it is answered like
/// any other malformed body instead of with 413.
pub async fn reject_oversized_body(response: Response) -> Response {
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
        crate::Error::InvalidBody.into_response()
    } else {
        response
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counter() {
        assert_eq!(parse_counter(b"42").unwrap(), 42);
        assert_eq!(parse_counter(b"0").unwrap(), 0);
        assert_eq!(parse_counter(b" 7\n").unwrap(), 7);
    }

    #[test]
    fn test_parse_counter_rejects_garbage() {
        assert!(parse_counter(b"").is_err());
        assert!(parse_counter(b"   ").is_err());
        assert!(parse_counter(b"-3").is_err());
        assert!(parse_counter(b"12abc").is_err());
        assert!(parse_counter(b"1.5").is_err());
        assert!(parse_counter(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_parse_vault_list() {
        assert_eq!(
            parse_vault_list("vault1:8001,vault2:8002"),
            vec!["vault1:8001", "vault2:8002"]
        );
        assert_eq!(
            parse_vault_list(" a:1 ,, b:2,"),
            vec!["a:1", "b:2"]
        );
        assert_eq!(
            parse_vault_list("nohost,:80,host:notaport,host:99999,[::1]:8001"),
            vec!["[::1]:8001"]
        );
        assert!(parse_vault_list("").is_empty());
    }
}
