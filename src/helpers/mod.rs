//! Small helpers shared across modules

use serde::{Deserialize, Deserializer};

/// Treat an explicit YAML `null` (e.g. `title:` with no value) like an absent key
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Return the first non-empty value, or `fallback`
pub fn first_non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Simple HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        count: i64,
    }

    #[test]
    fn test_null_values_become_defaults() {
        let sample: Sample = serde_yaml::from_str("name:\ncount: ~\n").unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn test_present_values_are_kept() {
        let sample: Sample = serde_yaml::from_str("name: Acme\ncount: 3\n").unwrap();
        assert_eq!(sample.name, "Acme");
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty("", "Day 1"), "Day 1");
        assert_eq!(first_non_empty("Welcome", "Day 1"), "Welcome");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
    }
}
