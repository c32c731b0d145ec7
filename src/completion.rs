//! Autocomplete cycling.
//!
//! The registry answers "which names start with this?" statelessly; which
//! suggestion is currently shown belongs to the input side and lives here.

use devconsole_core::Registry;

/// Cycles through the suggestions for the text typed so far.
#[derive(Debug, Default)]
pub struct SuggestionCycle {
    partial: String,
    suggestions: Vec<String>,
    next: usize,
}

impl SuggestionCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current input text. A change recomputes the suggestions
    /// and restarts the cycle.
    pub fn update(&mut self, partial: &str, registry: &Registry) {
        if partial == self.partial {
            return;
        }
        self.partial = partial.to_owned();
        self.suggestions = registry.suggest(partial);
        self.next = 0;
    }

    /// Next suggestion, wrapping around at the end.
    pub fn advance(&mut self) -> Option<&str> {
        if self.suggestions.is_empty() {
            return None;
        }
        let index = self.next % self.suggestions.len();
        self.next = index + 1;
        self.suggestions.get(index).map(String::as_str)
    }

    /// Forget the current input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
