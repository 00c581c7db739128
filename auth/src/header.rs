use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

pub const BEARER_SCHEME: &str = "Bearer ";
pub const API_KEY_SCHEME: &str = "ApiKey ";

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Invalid Authorization header format. Expected: {expected}<credential>")]
    MalformedScheme { expected: &'static str },
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-sensitively with exactly one space; the
/// remainder is returned untouched.
///
/// # Errors
/// * `Missing` - Header absent or empty
/// * `MalformedScheme` - Header does not start with `Bearer `
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_credential(headers, BEARER_SCHEME)
}

/// Extract the key from an `Authorization: ApiKey <key>` header.
///
/// # Errors
/// * `Missing` - Header absent or empty
/// * `MalformedScheme` - Header does not start with `ApiKey `
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_credential(headers, API_KEY_SCHEME)
}

fn extract_credential<'a>(
    headers: &'a HeaderMap,
    scheme: &'static str,
) -> Result<&'a str, HeaderError> {
    let value = headers.get(AUTHORIZATION).ok_or(HeaderError::Missing)?;

    if value.is_empty() {
        return Err(HeaderError::Missing);
    }

    value
        .to_str()
        .ok()
        .and_then(|raw| raw.strip_prefix(scheme))
        .ok_or(HeaderError::MalformedScheme { expected: scheme })
}

/// Compare two credentials without short-circuiting on the first differing byte.
///
/// Only the length comparison leaks timing.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(extract_bearer_token(&headers), Ok("abc123"));
    }

    #[test]
    fn test_extract_bearer_token_keeps_remainder_verbatim() {
        let headers = headers_with("Bearer  abc 123 ");
        assert_eq!(extract_bearer_token(&headers), Ok(" abc 123 "));
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let headers = headers_with("Token abc123");
        assert_eq!(
            extract_bearer_token(&headers),
            Err(HeaderError::MalformedScheme {
                expected: BEARER_SCHEME
            })
        );
    }

    #[test]
    fn test_extract_bearer_token_is_case_sensitive() {
        let headers = headers_with("bearer abc123");
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(HeaderError::MalformedScheme { .. })
        ));
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        assert_eq!(
            extract_bearer_token(&HeaderMap::new()),
            Err(HeaderError::Missing)
        );
    }

    #[test]
    fn test_extract_bearer_token_empty() {
        let headers = headers_with("");
        assert_eq!(extract_bearer_token(&headers), Err(HeaderError::Missing));
    }

    #[test]
    fn test_extract_bearer_token_non_ascii() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(HeaderError::MalformedScheme { .. })
        ));
    }

    #[test]
    fn test_extract_api_key() {
        let headers = headers_with("ApiKey f271c81ff7084ee5b99a5091b42d486e");
        assert_eq!(
            extract_api_key(&headers),
            Ok("f271c81ff7084ee5b99a5091b42d486e")
        );
    }

    #[test]
    fn test_extract_api_key_rejects_bearer() {
        let headers = headers_with("Bearer f271c81ff7084ee5b99a5091b42d486e");
        assert_eq!(
            extract_api_key(&headers),
            Err(HeaderError::MalformedScheme {
                expected: API_KEY_SCHEME
            })
        );
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"f271c81f", b"f271c81f"));
        assert!(!constant_time_eq(b"f271c81f", b"f271c81e"));
        assert!(!constant_time_eq(b"f271c81f", b"f271c81f00"));
        assert!(constant_time_eq(b"", b""));
    }
}
