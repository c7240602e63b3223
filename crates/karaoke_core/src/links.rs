//! Hand-off between the upload and result pages.
//!
//! The upload page navigates to `{result_page}?video=<location>` and the result
//! page turns the location back into an absolute URL on the server origin.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Name of the query parameter carrying the server-relative video location.
pub const VIDEO_QUERY_PARAM: &str = "video";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, matching a browser's
/// `encodeURIComponent`. Spaces become `%20`, never `+`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the result view URL with `video_location` percent-encoded into the query.
///
/// Any query already present on `result_page` is replaced.
pub fn result_view_url(result_page: &Url, video_location: &str) -> Url {
    let mut url = result_page.clone();
    url.set_fragment(None);
    let encoded = utf8_percent_encode(video_location, URI_COMPONENT);
    url.set_query(Some(&format!("{VIDEO_QUERY_PARAM}={encoded}")));
    url
}

/// Reads the decoded video location from a result view URL.
///
/// Decoding follows the query-string rules a browser page uses, so both
/// `%20` and `+` read back as a space. A missing or empty parameter yields `None`.
pub fn video_location(page_url: &Url) -> Option<String> {
    page_url
        .query_pairs()
        .find(|(key, _)| key == VIDEO_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Concatenates the server origin and a server-relative location.
pub fn resolve_video_url(origin: &Url, location: &str) -> Result<Url, url::ParseError> {
    let base = origin.as_str().trim_end_matches('/');
    if location.starts_with('/') {
        Url::parse(&format!("{base}{location}"))
    } else {
        Url::parse(&format!("{base}/{location}"))
    }
}
