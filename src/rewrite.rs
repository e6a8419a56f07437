use crate::error::{Error, Result};

/// Re-root every entry of a colon-separated classpath from `original_root`
/// to `new_root`.
///
/// All or nothing: if any entry lies outside `original_root` the whole call
/// fails with [`Error::PathNotUnderRoot`].
pub fn rewrite_classpath(original_root: &str, new_root: &str, classpath: &str) -> Result<String> {
    if classpath.is_empty() {
        return Ok(String::new());
    }

    let prefix = format!("{}/", original_root);

    classpath
        .split(':')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            if entry == original_root || entry.starts_with(&prefix) {
                Ok(entry.replacen(original_root, new_root, 1))
            } else {
                Err(Error::PathNotUnderRoot {
                    entry: entry.to_string(),
                    root: original_root.to_string(),
                })
            }
        })
        .collect::<Result<Vec<_>>>()
        .map(|entries| entries.join(":"))
}
