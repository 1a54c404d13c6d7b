use reqwest::header::{HeaderMap, LINK};

/// Extracts the `rel="next"` URL from a `Link` response header, if present.
///
/// Listing endpoints page their results and advertise the next page through
/// `Link: <url>; rel="next", <url>; rel="last"`. Returns `None` once the
/// final page has been reached, or when the header is missing or malformed.
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    parse_next_link(link)
}

/// Parses a raw `Link` header value and returns the `rel="next"` target
fn parse_next_link(link: &str) -> Option<String> {
    for part in link.split(',') {
        let mut sections = part.split(';');

        let url = match sections.next() {
            Some(url) => url.trim(),
            None => continue,
        };

        // The URL is wrapped in angle brackets and must not be empty
        if url.len() <= 2 || !url.starts_with('<') || !url.ends_with('>') {
            continue;
        }

        let is_next = sections.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });

        if is_next {
            return Some(url[1..url.len() - 1].to_string());
        }
    }

    None
}
