use crate::error::{Error, Result};

/// Split a comma-separated attribute list into trimmed names.
///
/// Order is preserved exactly: the position of each name pairs it with the
/// attribute at the same position on the other side of a dependency.
pub fn split_attributes(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(|name| {
            let name = name.trim();
            if name.is_empty() {
                Err(Error::EmptyAttribute {
                    raw: raw.to_string(),
                })
            } else {
                Ok(name.to_string())
            }
        })
        .collect()
}
