//! Built-in markdown line rules.

use grcdoc_core::Node;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Filter, Rule};

static BLANK_OR_LONE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[*-]?$").unwrap());

/// One to six hashes, whitespace, then the heading text
static HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})[ \t]+(.*)$").unwrap());

/// `* `, `- ` or `N. ` followed by the item text
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[*-]|\d+\.)[ \t]+(.*)$").unwrap());

/// Create all built-in rules, in the order they are tried
pub fn markdown_rules() -> Vec<Rule> {
    vec![skip_rule(), header_rule(), bullet_rule()]
}

fn skip_rule() -> Rule {
    Rule::skip(Filter::regex(BLANK_OR_LONE_MARKER.clone()))
}

fn header_rule() -> Rule {
    Rule::new(Filter::regex(HEADER.clone()), |line| {
        let caps = HEADER.captures(line)?;
        let level = caps[1].len() as u8;
        Some(Node::header(level, caps[2].trim()))
    })
}

fn bullet_rule() -> Rule {
    Rule::new(Filter::regex(BULLET.clone()), |line| {
        let caps = BULLET.captures(line)?;
        Some(Node::bullet(&caps[1]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(line: &str) -> Option<Option<Node>> {
        markdown_rules()
            .iter()
            .find(|rule| rule.filter.matches(line))
            .map(|rule| rule.replace(line))
    }

    #[test]
    fn test_skip_rule() {
        assert_eq!(first_match(""), Some(None));
        assert_eq!(first_match("*"), Some(None));
        assert_eq!(first_match("-"), Some(None));
    }

    #[test]
    fn test_header_levels() {
        for level in 1..=6u8 {
            let line = format!("{} Title", "#".repeat(level as usize));
            assert_eq!(first_match(&line), Some(Some(Node::header(level, "Title"))));
        }
        assert_eq!(first_match("####### Title"), None);
        assert_eq!(first_match("#Title"), None);
    }

    #[test]
    fn test_bullet_markers() {
        assert_eq!(first_match("* one"), Some(Some(Node::bullet("one"))));
        assert_eq!(first_match("- two"), Some(Some(Node::bullet("two"))));
        assert_eq!(first_match("12. three"), Some(Some(Node::bullet("three"))));
        assert_eq!(first_match("**bold** lead"), None);
        assert_eq!(first_match("1.5 million"), None);
    }
}
