//! Styling theme for generated documents
//!
//! Colours are hex strings without a leading `#`. Font sizes are in
//! half-points, as WordprocessingML expects them.

use serde::Deserialize;

/// Brand and table colours
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Colors {
    /// Headings, cover title, table header fill
    pub primary: String,
    /// Cover subtitle and second-tier headings
    pub secondary: String,
    /// Body text
    pub text: String,
    /// Placeholder and metadata text
    pub muted: String,
    pub table_header_fill: String,
    pub table_header_text: String,
    /// Fill for even data rows
    pub table_stripe_fill: String,
    pub table_border: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            primary: "1F4E79".to_string(),
            secondary: "2E75B6".to_string(),
            text: "262626".to_string(),
            muted: "7F7F7F".to_string(),
            table_header_fill: "1F4E79".to_string(),
            table_header_text: "FFFFFF".to_string(),
            table_stripe_fill: "EAF1F8".to_string(),
            table_border: "BFBFBF".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Fonts {
    pub body: String,
    pub heading: String,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            body: "Calibri".to_string(),
            heading: "Calibri Light".to_string(),
        }
    }
}

/// Font sizes in half-points
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Sizes {
    pub body: u32,
    pub heading1: u32,
    pub heading2: u32,
    pub heading3: u32,
    pub table: u32,
    pub cover_title: u32,
    pub cover_subtitle: u32,
}

impl Default for Sizes {
    fn default() -> Self {
        Self {
            body: 22,
            heading1: 32,
            heading2: 28,
            heading3: 24,
            table: 20,
            cover_title: 56,
            cover_subtitle: 32,
        }
    }
}

impl Sizes {
    pub fn heading(&self, level: u8) -> u32 {
        match level {
            1 => self.heading1,
            2 => self.heading2,
            _ => self.heading3,
        }
    }
}

/// Style ids of the named paragraph styles written to `styles.xml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleNames {
    pub table_header: String,
    pub table_cell: String,
    pub cover_title: String,
    pub cover_subtitle: String,
    pub muted: String,
}

impl Default for StyleNames {
    fn default() -> Self {
        Self {
            table_header: "TableHeader".to_string(),
            table_cell: "TableCell".to_string(),
            cover_title: "CoverTitle".to_string(),
            cover_subtitle: "CoverSubtitle".to_string(),
            muted: "Muted".to_string(),
        }
    }
}

/// Fixed styling configuration consumed by the renderer and the serializer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: Colors,
    pub fonts: Fonts,
    pub sizes: Sizes,
    pub styles: StyleNames,

    /// Table border width in eighths of a point
    pub border_size: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: Colors::default(),
            fonts: Fonts::default(),
            sizes: Sizes::default(),
            styles: StyleNames::default(),
            border_size: 4,
        }
    }
}

impl Theme {
    /// Uniform cell border, applied to all four sides
    pub fn cell_border(&self) -> crate::Border {
        crate::Border {
            size: self.border_size,
            color: self.colors.table_border.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.colors.table_header_text, "FFFFFF");
        assert_eq!(theme.sizes.heading(5), theme.sizes.heading3);
        assert_eq!(theme.styles.table_header, "TableHeader");
    }

    #[test]
    fn test_cell_border() {
        let theme = Theme::default();
        assert_eq!(theme.cell_border().size, 4);
        assert_eq!(theme.cell_border().color, "BFBFBF");

        let theme = Theme {
            border_size: 8,
            ..Default::default()
        };
        assert_eq!(theme.cell_border().size, 8);
    }
}
