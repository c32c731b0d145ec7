//! Prefix autocomplete over registered command names.

use crate::registry::Registry;

impl Registry {
    /// Command names that start with the text typed so far.
    ///
    /// Only the part before the first whitespace is matched, so this
    /// completes command names, never arguments. Matching is
    /// case-sensitive and the result follows registration order; an empty
    /// prefix yields nothing. Cycling through the result is the caller's
    /// business.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        let prefix = partial.split(char::is_whitespace).next().unwrap_or("");
        if prefix.is_empty() {
            return Vec::new();
        }

        self.names()
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandDefinition;

    fn registry(names: &[&str]) -> Registry {
        let registry = Registry::new();
        for name in names {
            registry
                .register(name, CommandDefinition::builder().action(|_| Ok(())).build())
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_prefix_matches_in_registration_order() {
        let registry = registry(&["height", "clear", "help"]);
        assert_eq!(registry.suggest("he"), ["height", "help"]);
        assert_eq!(registry.suggest("c"), ["clear"]);
    }

    #[test]
    fn test_empty_and_unmatched() {
        let registry = registry(&["help"]);
        assert!(registry.suggest("").is_empty());
        assert!(registry.suggest("zz").is_empty());
        assert!(registry.suggest(" help").is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        let registry = registry(&["con_fontSize"]);
        assert!(registry.suggest("con_fonts").is_empty());
        assert_eq!(registry.suggest("con_font"), ["con_fontSize"]);
    }

    #[test]
    fn test_only_first_token_matters() {
        let registry = registry(&["help", "height"]);
        assert_eq!(registry.suggest("hel extra words"), ["help"]);
        assert_eq!(registry.suggest("help"), ["help"]);
    }

    #[test]
    fn test_stable_across_calls() {
        let registry = registry(&["aa", "ab", "ac"]);
        assert_eq!(registry.suggest("a"), registry.suggest("a"));
    }
}
