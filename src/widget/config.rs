use std::time::Duration;

pub const DEFAULT_PLACEHOLDER: &str = "Search...";
pub const DEFAULT_MIN_CHARS: usize = 2;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Host-supplied widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteConfig {
    /// Shown in the input while the query is empty.
    pub placeholder: String,
    /// Minimum query length before any lookup fires.
    pub min_chars: usize,
    /// Quiet period between the last keystroke and the lookup.
    pub debounce: Duration,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            min_chars: DEFAULT_MIN_CHARS,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl AutocompleteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let config = AutocompleteConfig::default();
        assert_eq!(config.placeholder, "Search...");
        assert_eq!(config.min_chars, 2);
        assert_eq!(config.debounce, Duration::from_millis(300));
    }
}
