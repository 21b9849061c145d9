//! URL helpers for site-relative listing paths and detail-page addresses.

/// Turns a site-relative path such as `/geocache/GC8ABCD` into an absolute URL
/// on `site_host`.
///
/// Already-absolute URLs are returned unchanged. An empty or whitespace-only
/// path yields an empty string so the record can be dropped at cleanup rather
/// than pointing at the site root.
#[must_use]
pub fn absolute_site_url(site_host: &str, path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }
    if path.starts_with("https://") || path.starts_with("http://") {
        return path.to_owned();
    }
    let host = site_host.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{host}{path}")
    } else {
        format!("{host}/{path}")
    }
}

/// Detail page address: the cache code appended directly to `base_url`.
#[must_use]
pub fn detail_page_url(base_url: &str, code: &str) -> String {
    format!("{base_url}{code}")
}
