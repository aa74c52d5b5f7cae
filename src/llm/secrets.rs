use std::env;

use crate::utils::trim_line;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Reads the Gemini key from `GEMINI_API_KEY`. A blank value counts as unset.
pub fn api_key_from_env() -> Option<String> {
    normalize_key(env::var(API_KEY_ENV).ok().as_deref())
}

fn normalize_key(raw: Option<&str>) -> Option<String> {
    raw.and_then(trim_line).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_is_none() {
        assert_eq!(normalize_key(None), None);
    }

    #[test]
    fn blank_value_is_none() {
        assert_eq!(normalize_key(Some("  \n\t")), None);
    }

    #[test]
    fn value_is_trimmed() {
        assert_eq!(normalize_key(Some("  abc123\n")), Some("abc123".to_string()));
    }
}
