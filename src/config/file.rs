//! Dotenv file loading
//!
//! Handles locating and parsing `KEY=VALUE` files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Dotenv file handler
pub struct EnvFile;

impl EnvFile {
    /// File name searched for
    pub const FILE_NAME: &'static str = ".env";

    /// Directories examined: the start directory plus four ancestors
    pub const SEARCH_DEPTH: usize = 5;

    /// Find the dotenv file by walking up from `start`
    pub fn locate(start: &Path) -> Result<PathBuf, ConfigError> {
        start
            .ancestors()
            .take(Self::SEARCH_DEPTH)
            .map(|dir| dir.join(Self::FILE_NAME))
            .find(|candidate| candidate.is_file())
            .ok_or(ConfigError::NotFound)
    }

    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let pairs = Self::parse(&content);
        log::debug!("Read {} variable(s) from {}", pairs.len(), path.display());

        Ok(Config::from_pairs(pairs).with_source(path))
    }

    /// Parse dotenv content into ordered key/value pairs
    ///
    /// Blank lines, `#` comments and lines without `=` are skipped. Keys and
    /// values are trimmed and one layer of matching quotes is removed from the
    /// value.
    pub fn parse(content: &str) -> Vec<(String, String)> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .filter_map(|(key, value)| {
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), unquote(value.trim()).to_string()))
            })
            .collect()
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let pairs = EnvFile::parse("# header\n\n   # indented comment\nKEY=value\nnot a pair\n");
        assert_eq!(pairs, vec![("KEY".to_string(), "value".to_string())]);
    }

    #[test]
    fn test_parse_trims_and_unquotes() {
        let pairs = EnvFile::parse(
            "  A = spaced  \nB=\"double quoted\"\nC='single quoted'\nD=\"mismatched'\nE=a=b\n",
        );
        let get = |k: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("A"), Some("spaced"));
        assert_eq!(get("B"), Some("double quoted"));
        assert_eq!(get("C"), Some("single quoted"));
        assert_eq!(get("D"), Some("\"mismatched'"));
        assert_eq!(get("E"), Some("a=b"));
    }

    #[test]
    fn test_parse_strips_one_layer_only() {
        let pairs = EnvFile::parse("K=\"'inner'\"\nL=\"\"\nM=\"\n");
        assert_eq!(pairs[0].1, "'inner'");
        assert_eq!(pairs[1].1, "");
        assert_eq!(pairs[2].1, "\"");
    }

    #[test]
    fn test_parse_skips_empty_key() {
        assert!(EnvFile::parse("=orphan\n").is_empty());
    }

    #[test]
    fn test_load_duplicate_keys_last_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "REGION=us-east-1\nREGION=\"eu-west-1\"\n").unwrap();

        let config = EnvFile::load(&path).unwrap();
        assert_eq!(config.get("REGION").as_deref(), Some("eu-west-1"));
        assert_eq!(config.source(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_file() {
        let result = EnvFile::load("/nonexistent/path/.env");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_locate_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c/d");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".env"), "A=1\n").unwrap();

        let found = EnvFile::locate(&nested).unwrap();
        assert_eq!(found, dir.path().join(".env"));
    }

    #[test]
    fn test_locate_stops_after_four_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c/d/e");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".env"), "A=1\n").unwrap();

        assert!(matches!(EnvFile::locate(&nested), Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_locate_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("project");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".env"), "A=outer\n").unwrap();
        fs::write(nested.join(".env"), "A=inner\n").unwrap();

        assert_eq!(EnvFile::locate(&nested).unwrap(), nested.join(".env"));
    }

    #[test]
    fn test_locate_ignores_directory_named_env() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c/d/e");
        fs::create_dir_all(nested.join(".env")).unwrap();

        assert!(matches!(EnvFile::locate(&nested), Err(ConfigError::NotFound)));
    }
}
