use reqwest::header::HeaderMap;

use crate::types::HeaderRecord;

/// Convert a response header map into name/value records.
///
/// `HeaderMap` keeps values of one name together, so records come out grouped
/// by name in first-seen order rather than in the order they were received.
pub fn header_records(headers: &HeaderMap) -> Vec<HeaderRecord> {
    headers
        .iter()
        .map(|(name, value)| {
            HeaderRecord::new(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}
