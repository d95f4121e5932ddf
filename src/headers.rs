use crate::constants::header;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use indexmap::IndexMap;

pub type Headers = IndexMap<String, String>;

#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn new() -> Self {
        Self {
            headers: IndexMap::with_capacity(2),
        }
    }

    /// Sets a non-`Vary` header, replacing any previous value.
    pub(crate) fn push(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    pub(crate) fn add_vary<S: Into<String>>(&mut self, value: S) {
        let existing = self.headers.get(header::VARY).map(String::as_str);
        match merge_vary(existing, &value.into()) {
            Some(merged) => {
                self.headers.insert(header::VARY.to_string(), merged);
            }
            None => {
                self.headers.shift_remove(header::VARY);
            }
        }
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }
}

/// Joins `incoming` into a comma separated `Vary` value, dropping blanks and
/// case-insensitive duplicates. `None` when nothing is left.
pub(crate) fn merge_vary(existing: Option<&str>, incoming: &str) -> Option<String> {
    let mut entries: Vec<&str> = Vec::new();
    for entry in existing
        .into_iter()
        .flat_map(|value| value.split(','))
        .chain(incoming.split(','))
    {
        let entry = entry.trim();
        if entry.is_empty()
            || entries
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(entry))
        {
            continue;
        }
        entries.push(entry);
    }

    if entries.is_empty() {
        None
    } else {
        Some(entries.join(", "))
    }
}

/// Writes `headers` onto an `http` header map.
///
/// `Vary` is merged with whatever the response already carries; every other
/// entry replaces the existing value. Entries that are not valid header
/// names or values are skipped.
pub fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers {
        let Ok(header_name) = HeaderName::try_from(name.as_str()) else {
            tracing::warn!(header = %name, "skipping invalid header name");
            continue;
        };

        let value = if header_name == http::header::VARY {
            let existing = map
                .get_all(http::header::VARY)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .collect::<Vec<_>>()
                .join(",");
            let existing = (!existing.is_empty()).then_some(existing.as_str());
            match merge_vary(existing, value) {
                Some(merged) => merged,
                None => continue,
            }
        } else {
            value.clone()
        };

        match HeaderValue::from_str(&value) {
            Ok(header_value) => {
                map.insert(header_name, header_value);
            }
            Err(_) => {
                tracing::warn!(header = %name, "skipping header with a value that cannot be encoded");
            }
        }
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
