//! Browser profile the eligibility API expects to see.
//!
//! The claim site at `claim.pudgypenguins.com` calls the API cross-origin
//! from Chrome; requests without the matching fetch metadata get blocked as
//! bot traffic, and so do connections whose TLS ClientHello is not a
//! browser's.

use rquest::header::{HeaderMap, HeaderName, HeaderValue};
use rquest_util::Emulation;

pub const CLAIM_ORIGIN: &str = "https://claim.pudgypenguins.com";

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Static request headers, attached verbatim to every eligibility query.
pub const BROWSER_HEADERS: &[(&str, &str)] = &[
    ("accept", "*/*"),
    ("accept-language", "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7"),
    ("origin", CLAIM_ORIGIN),
    ("priority", "u=1, i"),
    ("referer", "https://claim.pudgypenguins.com/"),
    (
        "sec-ch-ua",
        r#""Google Chrome";v="131", "Chromium";v="131", "Not_A Brand";v="24""#,
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""macOS""#),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "cross-site"),
    ("user-agent", USER_AGENT),
];

/// TLS and HTTP/2 handshake profile, matching the Chrome 131 user agent
/// below.
pub fn emulation() -> Emulation {
    Emulation::Chrome131
}

pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(BROWSER_HEADERS.len());
    for &(name, value) in BROWSER_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers
}
