//! DocumentService - the main entry point for text to document conversion.

use grcdoc_core::{Node, Primitive, Theme};

use crate::classify::classify;
use crate::postprocess::{post_process, LabelPolicy};
use crate::render::render;
use crate::rules::{Rule, Rules};

/// Options for DocumentService
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Bullet-to-label promotion heuristic
    pub label_policy: LabelPolicy,

    /// Split headers and bullets glued onto the previous line
    pub repair_stuck_markers: bool,

    /// Styling consumed by the renderer
    pub theme: Theme,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            label_policy: LabelPolicy::default(),
            repair_stuck_markers: true,
            theme: Theme::default(),
        }
    }
}

/// The main service for converting markdown-ish text to document primitives.
///
/// Every method is total: any input, including `None`, produces a (possibly
/// empty) result.
pub struct DocumentService {
    options: DocumentOptions,
    rules: Rules,
}

impl DocumentService {
    /// Create a new DocumentService with default options
    pub fn new() -> Self {
        Self {
            options: DocumentOptions::default(),
            rules: Rules::new(),
        }
    }

    /// Create a DocumentService with custom options
    pub fn with_options(options: DocumentOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Classify text into raw nodes, before label promotion
    pub fn classify<'a>(&self, input: impl Into<Option<&'a str>>) -> Vec<Node> {
        let text = input.into().unwrap_or_default();
        classify(text, &self.rules, self.options.repair_stuck_markers)
    }

    /// Apply label promotion to classified nodes
    pub fn post_process(&self, nodes: Vec<Node>) -> Vec<Node> {
        post_process(nodes, &self.options.label_policy)
    }

    /// Classify and post-process text
    pub fn parse<'a>(&self, input: impl Into<Option<&'a str>>) -> Vec<Node> {
        self.post_process(self.classify(input))
    }

    /// Render nodes to document primitives
    pub fn render(&self, nodes: &[Node]) -> Vec<Primitive> {
        render(nodes, &self.options.theme)
    }

    /// Convert text straight to document primitives
    pub fn convert<'a>(&self, input: impl Into<Option<&'a str>>) -> Vec<Primitive> {
        let nodes = self.parse(input);
        log::trace!("converted text into {} nodes", nodes.len());
        self.render(&nodes)
    }

    /// Add a custom line rule, tried before the built-in ones
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Remove a custom line rule
    pub fn remove_rule(&mut self, key: &str) -> &mut Self {
        self.rules.remove(key);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut DocumentOptions {
        &mut self.options
    }

    /// The theme used for rendering
    pub fn theme(&self) -> &Theme {
        &self.options.theme
    }
}

impl Default for DocumentService {
    fn default() -> Self {
        Self::new()
    }
}
