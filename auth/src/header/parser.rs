use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::HeaderError;

/// Scheme keyword for signed access and opaque refresh tokens.
pub const BEARER: &str = "Bearer";

/// Scheme keyword for the webhook API key.
pub const API_KEY: &str = "ApiKey";

/// Extract the credential from a raw `Authorization` header value.
///
/// The value is split on whitespace; the first field must equal `scheme`
/// exactly and the second is returned. Anything after the credential is
/// ignored.
///
/// # Errors
/// * `MissingHeader` - Header is absent or blank
/// * `MalformedHeader` - Fewer than two fields or a different scheme
pub fn extract<'a>(header: Option<&'a str>, scheme: &str) -> Result<&'a str, HeaderError> {
    let header = header
        .filter(|value| !value.trim().is_empty())
        .ok_or(HeaderError::MissingHeader)?;

    let mut fields = header.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(keyword), Some(credential)) if keyword == scheme => Ok(credential.trim()),
        _ => Err(HeaderError::MalformedHeader),
    }
}

/// Extract the credential for `scheme` from a request's headers.
///
/// A header value that is not visible ASCII counts as malformed.
pub fn from_headers<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, HeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| HeaderError::MalformedHeader))
        .transpose()?;

    extract(value, scheme)
}

/// `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, HeaderError> {
    from_headers(headers, BEARER)
}

/// `Authorization: ApiKey <key>`
pub fn api_key(headers: &HeaderMap) -> Result<&str, HeaderError> {
    from_headers(headers, API_KEY)
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
    fn test_extract_trims_extra_spacing() {
        assert_eq!(extract(Some("Bearer   token  "), BEARER), Ok("token"));
    }

    #[test]
    fn test_extract_without_scheme() {
        assert_eq!(
            extract(Some("token"), BEARER),
            Err(HeaderError::MalformedHeader)
        );
    }

    #[test]
    fn test_extract_scheme_without_credential() {
        assert_eq!(
            extract(Some("Bearer"), BEARER),
            Err(HeaderError::MalformedHeader)
        );
    }

    #[test]
    fn test_extract_empty_or_absent() {
        assert_eq!(extract(Some(""), BEARER), Err(HeaderError::MissingHeader));
        assert_eq!(
            extract(Some("   "), BEARER),
            Err(HeaderError::MissingHeader)
        );
        assert_eq!(extract(None, BEARER), Err(HeaderError::MissingHeader));
    }

    #[test]
    fn test_extract_scheme_is_case_sensitive() {
        assert_eq!(
            extract(Some("bearer token"), BEARER),
            Err(HeaderError::MalformedHeader)
        );
        assert_eq!(
            extract(Some("Bearer key"), API_KEY),
            Err(HeaderError::MalformedHeader)
        );
    }

    #[test]
    fn test_extract_ignores_trailing_fields() {
        assert_eq!(extract(Some("ApiKey abc def"), API_KEY), Ok("abc"));
    }

    #[test]
    fn test_bearer_token_from_headers() {
        assert_eq!(
            bearer_token(&headers_with("Bearer abc.def.ghi")),
            Ok("abc.def.ghi")
        );
        assert_eq!(
            bearer_token(&HeaderMap::new()),
            Err(HeaderError::MissingHeader)
        );
    }

    #[test]
    fn test_api_key_from_headers() {
        assert_eq!(
            api_key(&headers_with("ApiKey f271c81ff7084ee5")),
            Ok("f271c81ff7084ee5")
        );
        assert_eq!(
            api_key(&headers_with("Bearer f271c81ff7084ee5")),
            Err(HeaderError::MalformedHeader)
        );
    }

    #[test]
    fn test_non_ascii_header_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );

        assert_eq!(bearer_token(&headers), Err(HeaderError::MalformedHeader));
    }
}
