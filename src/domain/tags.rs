//! Resource tags and labels
//!
//! Parses repeated `key=value` CLI arguments into a mapping.

use std::collections::BTreeMap;
use std::fmt;

/// Tag (AWS/Azure) or label (GCP) mapping, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    /// Split each entry on its first `=`
    ///
    /// Returns the parsed tags plus the entries that had no `=`. Keys and
    /// values are trimmed; a repeated key keeps its last value.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> (Self, Vec<String>) {
        let mut tags = BTreeMap::new();
        let mut rejected = Vec::new();

        for entry in entries {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((key, value)) => {
                    tags.insert(key.trim().to_string(), value.trim().to_string());
                }
                None => rejected.push(entry.to_string()),
            }
        }

        (Self(tags), rejected)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as `key=value` strings
    pub fn to_pairs(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        f.write_str("}")
    }
}

/// Parse tag arguments, warning about malformed entries
pub fn parse_tags<S: AsRef<str>>(entries: &[S]) -> Tags {
    let (tags, rejected) = Tags::parse(entries);
    for entry in rejected {
        log::warn!("Invalid tag format '{}', expected 'key=value'", entry);
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_malformed() {
        let (tags, rejected) = Tags::parse(&["k1=v1", "bad", "k2=v2"]);
        assert_eq!(rejected.len(), 1);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("k1"), Some("v1"));
        assert_eq!(tags.get("k2"), Some("v2"));
        assert_eq!(rejected, vec!["bad".to_string()]);
    }

    #[test]
    fn test_parse_last_wins_and_trims() {
        let (tags, rejected) = Tags::parse(&[" env = dev ", "env=prod"]);
        assert!(rejected.is_empty());
        assert_eq!(tags.get("env"), Some("prod"));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let (tags, _) = Tags::parse(&["query=a=b"]);
        assert_eq!(tags.get("query"), Some("a=b"));
    }

    #[test]
    fn test_parse_empty_input() {
        let entries: [&str; 0] = [];
        let tags = parse_tags(&entries);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_display_and_pairs() {
        let tags: Tags = [("team", "infra"), ("env", "dev")].into_iter().collect();
        assert_eq!(tags.to_string(), "{env: dev, team: infra}");
        assert_eq!(tags.to_pairs(), vec!["env=dev", "team=infra"]);
    }
}
