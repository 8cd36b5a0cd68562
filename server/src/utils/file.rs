//! Path helpers

use std::path::PathBuf;

/// Expand a user-supplied path into an absolute path.
///
/// `~` and `~/...` resolve against the home directory; relative paths
/// (including bare names) resolve against the current working directory;
/// absolute paths pass through. Surrounding whitespace is ignored and an
/// empty input yields the current directory.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(path),
        },
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_unchanged() {
        assert_eq!(expand_path("/srv/belaymatch"), PathBuf::from("/srv/belaymatch"));
    }

    #[test]
    fn test_relative_path_joins_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("./data"), cwd.join("./data"));
        assert_eq!(expand_path("data.db"), cwd.join("data.db"));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let result = expand_path("~/.belaymatch");
        assert!(result.is_absolute());
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".belaymatch"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
        }
    }

    #[test]
    fn test_tilde_user_form_is_relative() {
        // `~other` is not a home reference
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("~other"), cwd.join("~other"));
    }

    #[test]
    fn test_whitespace_trimmed_and_empty() {
        assert_eq!(expand_path("  /tmp/x  "), PathBuf::from("/tmp/x"));
        assert!(expand_path("   ").is_absolute());
    }
}
