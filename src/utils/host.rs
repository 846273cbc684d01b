//! Host extraction from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Extracts the request host from the `Host` header.
///
/// The result is lowercased with any port and trailing dot removed, so it can
/// be compared directly against configured domain hostnames:
///
/// - `WWW.Example.CA:8080` becomes `www.example.ca`
/// - `[::1]:3000` becomes `[::1]`
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the `Host` header is missing, is not
/// valid UTF-8 or is empty.
pub fn extract_host_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let raw = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?;

    let host = normalize_host(raw);
    if host.is_empty() {
        return Err(AppError::bad_request(
            "Invalid Host header",
            serde_json::json!({ "host": raw }),
        ));
    }

    Ok(host)
}

/// Lowercases a host and strips its port and trailing dot.
pub fn normalize_host(raw: &str) -> String {
    let raw = raw.trim();
    let host = if raw.starts_with('[') {
        // IPv6 literal, keep the brackets
        match raw.find(']') {
            Some(end) => &raw[..=end],
            None => raw,
        }
    } else {
        raw.split(':').next().unwrap_or(raw)
    };

    host.trim_end_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn headers_with_host(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_host_simple() {
        let host = extract_host_from_headers(&headers_with_host("www.example.com")).unwrap();
        assert_eq!(host, "www.example.com");
    }

    #[test]
    fn test_extract_host_strips_port_and_lowercases() {
        let host = extract_host_from_headers(&headers_with_host("WWW.Example.CA:8080")).unwrap();
        assert_eq!(host, "www.example.ca");
    }

    #[test]
    fn test_extract_host_trailing_dot() {
        let host = extract_host_from_headers(&headers_with_host("www.example.ca.")).unwrap();
        assert_eq!(host, "www.example.ca");
    }

    #[test]
    fn test_extract_host_ipv6_with_port() {
        let host = extract_host_from_headers(&headers_with_host("[::1]:8080")).unwrap();
        assert_eq!(host, "[::1]");
    }

    #[test]
    fn test_extract_host_missing_header() {
        assert!(extract_host_from_headers(&HeaderMap::new()).is_err());
    }

    #[test]
    fn test_extract_host_empty_value() {
        assert!(extract_host_from_headers(&headers_with_host(":3000")).is_err());
    }

    #[test]
    fn test_extract_host_invalid_utf8() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE, 0xFD]) {
            headers.insert(header::HOST, value);
            assert!(extract_host_from_headers(&headers).is_err());
        }
    }
}
