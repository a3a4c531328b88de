use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

/// Collapses every run of whitespace (including newlines and `&nbsp;`) into one space.
pub fn remove_excess_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"));
    re.replace_all(s.trim(), " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_excess_whitespace() {
        assert_eq!(remove_excess_whitespace("  Soep\n   van de   dag "), "Soep van de dag");
        assert_eq!(remove_excess_whitespace("Pasta\u{a0}pesto"), "Pasta pesto");
        assert!(matches!(remove_excess_whitespace("Friet"), Cow::Borrowed("Friet")));
    }
}
