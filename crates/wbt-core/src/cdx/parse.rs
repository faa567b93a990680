//! CDX response body parsing.
//!
//! With `output=json` the index returns an array of string arrays. Row 0
//! names the requested fields and is discarded; a header-only body is a
//! valid zero-snapshot result.

/// Parse the JSON body into `(timestamp, original)` pairs, index order
/// preserved. Rows with fewer than two fields are dropped.
pub(super) fn parse_rows(body: &[u8]) -> Result<Vec<(String, String)>, serde_json::Error> {
    let rows: Vec<Vec<String>> = serde_json::from_slice(body)?;
    Ok(rows
        .into_iter()
        .skip(1)
        .filter_map(|row| {
            let mut fields = row.into_iter();
            let timestamp = fields.next()?;
            let original = fields.next()?;
            Some((timestamp, original))
        })
        .collect())
}
