//! Browser request headers.
//!
//! The portals reject or degrade requests that do not look like they come from
//! a desktop browser, so every client installs these as default headers.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Accept header sent with every request
pub const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
/// Accept-Language header; the portals are Spanish-only
pub const ACCEPT_LANGUAGE_VALUE: &str = "es-AR,es;q=0.9,en;q=0.8";

/// Returns the default header map installed on every client.
///
/// `Accept-Encoding` is left to reqwest so that it only advertises encodings it
/// can actually decode.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static(ACCEPT_VALUE),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        reqwest::header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_headers_contain_language() {
        let headers = browser_headers();
        assert_eq!(
            headers.get(reqwest::header::ACCEPT_LANGUAGE).unwrap(),
            ACCEPT_LANGUAGE_VALUE
        );
        assert!(headers.get(reqwest::header::ACCEPT_ENCODING).is_none());
    }
}
