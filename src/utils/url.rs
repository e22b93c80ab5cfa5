use crate::constants::DEFAULT_REQUEST_PATH;

/// Components of a URL, borrowed from the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlParts<'a> {
    pub scheme: &'a str,
    pub netloc: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

/// Split a URL into its components without ever failing.
///
/// A scheme is only recognised as a leading `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`,
/// and a network location only after `//`. Anything that does not fit is left in the path.
pub fn split_url(url: &str) -> UrlParts<'_> {
    let mut parts = UrlParts::default();
    let mut rest = url;

    if let Some(colon_pos) = rest.find(':')
        && colon_pos > 0
        && is_scheme(&rest[..colon_pos])
    {
        parts.scheme = &rest[..colon_pos];
        rest = &rest[colon_pos + 1..];
    }

    if let Some(after_slashes) = rest.strip_prefix("//") {
        let end = after_slashes
            .find(['/', '?', '#'])
            .unwrap_or(after_slashes.len());
        parts.netloc = &after_slashes[..end];
        rest = &after_slashes[end..];
    }

    if let Some((before, fragment)) = rest.split_once('#') {
        parts.fragment = fragment;
        rest = before;
    }
    if let Some((before, query)) = rest.split_once('?') {
        parts.query = query;
        rest = before;
    }
    parts.path = rest;

    parts
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Build the URL requested for a network location and path over `scheme`.
///
/// Returns `None` when there is no network location to connect to.
pub fn request_target(scheme: &str, netloc: &str, path: &str) -> Option<String> {
    if netloc.is_empty() {
        return None;
    }
    let path = if path.is_empty() {
        DEFAULT_REQUEST_PATH
    } else {
        path
    };
    Some(format!("{}://{}{}", scheme, netloc, path))
}
