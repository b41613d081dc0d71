//! Rule system for line classification.

mod markdown;
mod rule;

pub use markdown::markdown_rules;
pub use rule::{Filter, ReplacementFn, Rule};

use grcdoc_core::Node;
use indexmap::IndexMap;

/// Ordered collection of line rules. The first matching rule wins.
pub struct Rules {
    /// Custom rules added by the caller (checked first, in insertion order)
    custom_rules: IndexMap<String, Rule>,
    /// Built-in markdown rules
    markdown_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in markdown rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            markdown_rules: markdown_rules(),
        }
    }

    /// Add a custom rule. Re-using a key replaces the rule in place.
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Remove a custom rule
    pub fn remove(&mut self, key: &str) -> Option<Rule> {
        self.custom_rules.shift_remove(key)
    }

    /// Find the rule for a trimmed line
    pub fn for_line(&self, line: &str) -> Option<&Rule> {
        self.custom_rules
            .values()
            .chain(self.markdown_rules.iter())
            .find(|rule| rule.filter.matches(line))
    }

    /// Classify a trimmed line. Lines no rule claims become paragraphs.
    pub fn classify_line(&self, line: &str) -> Option<Node> {
        match self.for_line(line) {
            Some(rule) => rule.replace(line),
            None => Some(Node::paragraph(line)),
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fallback_is_paragraph() {
        let rules = Rules::new();
        assert_eq!(
            rules.classify_line("Plain prose."),
            Some(Node::paragraph("Plain prose."))
        );
    }

    #[test]
    fn test_custom_rules_run_first() {
        let mut rules = Rules::new();
        rules.add(
            "dash-label",
            Rule::new(Filter::predicate(|line| line.starts_with("- Note")), |line| {
                Some(Node::bold_paragraph(line.trim_start_matches("- ")))
            }),
        );
        assert_eq!(
            rules.classify_line("- Note this"),
            Some(Node::bold_paragraph("Note this"))
        );
        assert_eq!(rules.classify_line("- other"), Some(Node::bullet("other")));
    }

    #[test]
    fn test_remove_custom_rule() {
        let mut rules = Rules::new();
        rules.add("drop-all", Rule::skip(Filter::predicate(|_| true)));
        assert_eq!(rules.classify_line("text"), None);

        assert!(rules.remove("drop-all").is_some());
        assert_eq!(rules.classify_line("text"), Some(Node::paragraph("text")));
    }
}
