//! Type definitions for the text store.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// How a producer's chunk is applied to the stored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace the whole value.
    #[default]
    Set,
    /// Concatenate onto the current value.
    Append,
}

impl WriteMode {
    /// Interprets the `mode` field of a producer request.
    ///
    /// Absent or `"set"` replaces. Any other value present in the request,
    /// `null` and non-strings included, appends.
    pub fn from_request(mode: Option<&Value>) -> Self {
        match mode {
            None => WriteMode::Set,
            Some(value) if value.as_str() == Some("set") => WriteMode::Set,
            Some(_) => WriteMode::Append,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WriteMode::Set => "set",
            WriteMode::Append => "append",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length of a text chunk as reported to clients (characters, not bytes).
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_mode_defaults_to_set() {
        assert_eq!(WriteMode::from_request(None), WriteMode::Set);
        assert_eq!(WriteMode::from_request(Some(&json!("set"))), WriteMode::Set);
        assert_eq!(WriteMode::default(), WriteMode::Set);
    }

    #[test]
    fn test_unknown_mode_appends() {
        for mode in [json!("append"), json!("add"), json!(""), json!("SET")] {
            assert_eq!(WriteMode::from_request(Some(&mode)), WriteMode::Append);
        }
    }

    #[test]
    fn test_present_non_string_mode_appends() {
        for mode in [json!(null), json!(5), json!(true), json!(["set"])] {
            assert_eq!(WriteMode::from_request(Some(&mode)), WriteMode::Append);
        }
    }

    #[test]
    fn test_text_len_counts_chars() {
        assert_eq!(text_len(""), 0);
        assert_eq!(text_len("abc"), 3);
        assert_eq!(text_len("héllo"), 5);
        assert_eq!(text_len("日本"), 2);
    }
}
