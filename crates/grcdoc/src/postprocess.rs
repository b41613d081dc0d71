//! Structural post-processing of classified nodes.

use grcdoc_core::Node;

use crate::utilities::strip_asterisks;

/// Decides whether a bullet is really a section label such as
/// `* **Owner:**` and should render as a bold paragraph instead.
///
/// The default policy promotes any bullet shorter than 100 characters that
/// ends with `:` (optionally followed by `**` or `*`), or that starts with
/// `**` and contains a colon anywhere. Short bullets with an incidental colon,
/// such as `**Hours:** 9:00-17:00`, are promoted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPolicy {
    pub enabled: bool,
    /// Bullets with this many characters or more are never labels
    pub max_len: usize,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_len: 100,
        }
    }
}

impl LabelPolicy {
    /// A policy that never promotes bullets
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Check if trimmed bullet text looks like a label
    pub fn is_label(&self, text: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let ends_with_colon = text.ends_with(':') || text.ends_with(":**") || text.ends_with(":*");
        let has_colon = text.contains(':');
        let is_short = text.chars().count() < self.max_len;

        is_short && (ends_with_colon || (has_colon && text.starts_with("**")))
    }
}

/// Promote label-like bullets to bold paragraphs. Order is preserved and
/// every other node passes through unchanged.
pub fn post_process(nodes: Vec<Node>, policy: &LabelPolicy) -> Vec<Node> {
    nodes
        .into_iter()
        .map(|node| match node {
            Node::Bullet { content } => {
                let text = content.trim();
                if policy.is_label(text) {
                    log::debug!("promoted bullet label {text:?}");
                    Node::bold_paragraph(strip_asterisks(text))
                } else {
                    Node::Bullet { content }
                }
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(nodes: Vec<Node>) -> Vec<Node> {
        post_process(nodes, &LabelPolicy::default())
    }

    #[test]
    fn test_bold_label_promoted() {
        assert_eq!(
            run(vec![Node::bullet("**Owner:**")]),
            vec![Node::bold_paragraph("Owner:")]
        );
    }

    #[test]
    fn test_colon_endings() {
        let policy = LabelPolicy::default();
        assert!(policy.is_label("Contacts:"));
        assert!(policy.is_label("*Scope:*"));
        assert!(policy.is_label("**Scope:**"));
        assert!(policy.is_label("**Owner:** IT operations"));
        assert!(!policy.is_label("Owner: IT operations"));
    }

    #[test]
    fn test_plain_bullet_passes_through() {
        assert_eq!(
            run(vec![Node::bullet("Review logs weekly")]),
            vec![Node::bullet("Review logs weekly")]
        );
    }

    #[test]
    fn test_long_bullet_is_not_a_label() {
        let long = format!("{}:", "x".repeat(120));
        assert_eq!(run(vec![Node::bullet(long.clone())]), vec![Node::bullet(long)]);

        let policy = LabelPolicy::default();
        assert!(policy.is_label(&format!("{}:", "x".repeat(98))));
        assert!(!policy.is_label(&format!("{}:", "x".repeat(99))));
    }

    #[test]
    fn test_all_asterisks_removed() {
        assert_eq!(
            run(vec![Node::bullet("  **Hours:** *9:00-17:00*  ")]),
            vec![Node::bold_paragraph("Hours: 9:00-17:00")]
        );
    }

    #[test]
    fn test_disabled_policy() {
        assert_eq!(
            post_process(vec![Node::bullet("Owner:")], &LabelPolicy::disabled()),
            vec![Node::bullet("Owner:")]
        );
    }

    #[test]
    fn test_other_nodes_untouched() {
        let nodes = vec![
            Node::header(2, "Scope:"),
            Node::paragraph("Owner:"),
            Node::TableBlock {
                rows: vec![vec!["Owner:".to_string()]],
            },
        ];
        assert_eq!(run(nodes.clone()), nodes);
    }
}
