//! Tolerant reader for `.properties`-style `key=value` content.

/// Parse properties content into key/value entries in file order.
///
/// Blank lines and `#`/`!` comment lines are skipped. Keys and values are
/// trimmed. A line with no `=` is a key with an empty value. Duplicate keys
/// are kept in order; the overlay step decides which one wins.
pub fn parse_properties(content: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if !key.is_empty() {
                    entries.push((key.to_string(), value.trim().to_string()));
                }
            }
            None => entries.push((line.to_string(), String::new())),
        }
    }

    entries
}
