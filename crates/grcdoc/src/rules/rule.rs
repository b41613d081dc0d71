//! Rule and Filter types for line classification.

use grcdoc_core::Node;
use regex::Regex;

use crate::Result;

/// Type alias for replacement functions. `None` means the line emits nothing.
pub type ReplacementFn = Box<dyn Fn(&str) -> Option<Node> + Send + Sync>;

/// A filter determines which lines a rule applies to
pub enum Filter {
    /// Match lines against a regular expression
    Pattern(Regex),
    /// Match using a predicate function
    Predicate(Box<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Filter {
    /// Create a filter from a regular expression
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Filter::Pattern(Regex::new(pattern)?))
    }

    /// Create a filter from an already compiled regular expression
    pub fn regex(regex: Regex) -> Self {
        Filter::Pattern(regex)
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches a trimmed line
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Filter::Pattern(re) => re.is_match(line),
            Filter::Predicate(f) => f(line),
        }
    }
}

/// A rule defines how a matched line becomes a node
pub struct Rule {
    /// Filter to determine which lines this rule applies to
    pub filter: Filter,
    /// Replacement function that builds the node
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&str) -> Option<Node> + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that drops every matching line
    pub fn skip(filter: Filter) -> Self {
        Self::new(filter, |_| None)
    }

    /// Apply this rule's replacement
    pub fn replace(&self, line: &str) -> Option<Node> {
        (self.replacement)(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_filter() {
        let filter = Filter::pattern(r"^>\s").unwrap();
        assert!(filter.matches("> quoted"));
        assert!(!filter.matches("plain"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Filter::pattern("(unclosed").is_err());
    }

    #[test]
    fn test_skip_rule() {
        let rule = Rule::skip(Filter::predicate(|line| line == "---"));
        assert!(rule.filter.matches("---"));
        assert_eq!(rule.replace("---"), None);
    }
}
