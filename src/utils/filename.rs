//! File name helpers for decoded payloads

/// Longest payload fragment embedded in a file name
const MAX_COMPONENT_LEN: usize = 80;

/// Make decoded text safe to embed in a single path component
///
/// ASCII letters, digits and `-_.{}` are kept; everything else becomes `_`.
/// Long payloads are truncated and an empty payload becomes `empty`.
pub fn sanitize_component(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .take(MAX_COMPONENT_LEN)
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '{' | '}') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "empty".to_string()
    } else {
        cleaned
    }
}
