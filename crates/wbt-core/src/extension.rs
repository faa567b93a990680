//! File suffix inference for stored snapshots.
//!
//! Prefers the suffix already present in the snapshot URL's path; falls back
//! to a media-type lookup on the Content-Type header; defaults to `.html`.
//! Total: every input resolves to some non-empty suffix.

/// Suffix used when neither the URL path nor the content type resolves.
const DEFAULT_EXTENSION: &str = ".html";

/// Resolve the file suffix (including the leading dot) for a snapshot.
///
/// `content_type` is the raw header value; parameters after `;` (e.g.
/// `charset=utf-8`) are ignored.
pub fn resolve(snapshot_url: &str, content_type: Option<&str>) -> String {
    if let Some(ext) = extension_from_url_path(snapshot_url) {
        return ext;
    }
    if let Some(ext) = content_type.and_then(extension_for_content_type) {
        return ext;
    }
    DEFAULT_EXTENSION.to_string()
}

/// Suffix of the last path segment of `url`, if it has one.
///
/// A leading-dot segment like `.htaccess` has no suffix, matching the usual
/// splitext convention.
fn extension_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(".{ext}"))
}

/// Map a Content-Type header value to a suffix via the mime_guess tables.
///
/// Among the known suffixes for a type, one equal to the subtype wins
/// (`text/html` → `.html`, not `.htm`); otherwise the first listed is used.
fn extension_for_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let candidates = mime_guess::get_mime_extensions_str(&essence)?;
    let first = candidates.first()?;
    let subtype = essence.split('/').nth(1)?;
    let chosen = candidates.iter().find(|e| **e == subtype).unwrap_or(first);
    Some(format!(".{chosen}"))
}
