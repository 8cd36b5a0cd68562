//! SQL utility functions

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Use with `LIKE ? ESCAPE '\'` so that filter values match literally.
///
/// # Example
///
/// ```
/// use belaymatch_server::utils::sql::escape_like_pattern;
///
/// let pattern = format!("%{}%", escape_like_pattern("5.10_a 100%"));
/// assert_eq!(pattern, "%5.10\\_a 100\\%%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern_plain() {
        assert_eq!(escape_like_pattern("Red River Gorge"), "Red River Gorge");
    }

    #[test]
    fn test_escape_like_pattern_metacharacters() {
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("top_rope"), "top\\_rope");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
        assert_eq!(escape_like_pattern("%_\\"), "\\%\\_\\\\");
    }

    #[test]
    fn test_escape_like_pattern_empty() {
        assert_eq!(escape_like_pattern(""), "");
    }
}
