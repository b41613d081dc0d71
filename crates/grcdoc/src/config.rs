//! Theme configuration loading.
//!
//! A theme file is TOML. Every key is optional; missing keys keep the
//! built-in defaults.
//!
//! ```toml
//! border_size = 6
//!
//! [colors]
//! primary = "0B3D2E"
//! table_header_fill = "0B3D2E"
//!
//! [fonts]
//! body = "Arial"
//! ```

use std::fs;
use std::path::Path;

use grcdoc_core::Theme;

use crate::{DocError, Result};

/// Parse a theme from TOML text
pub fn theme_from_str(content: &str) -> Result<Theme> {
    let theme: Theme = toml::from_str(content)?;
    validate_colors(&theme)?;
    Ok(theme)
}

/// Colors go straight into `w:color`/`w:fill` attributes and must be
/// six hex digits without a leading `#`.
fn validate_colors(theme: &Theme) -> Result<()> {
    let c = &theme.colors;
    for (name, value) in [
        ("primary", &c.primary),
        ("secondary", &c.secondary),
        ("text", &c.text),
        ("muted", &c.muted),
        ("table_header_fill", &c.table_header_fill),
        ("table_header_text", &c.table_header_text),
        ("table_stripe_fill", &c.table_stripe_fill),
        ("table_border", &c.table_border),
    ] {
        if value.len() != 6 || !value.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(DocError::InvalidColor {
                name: name.to_string(),
                value: value.clone(),
            });
        }
    }
    Ok(())
}

/// Load a theme from a TOML file
pub fn load_theme(path: &Path) -> Result<Theme> {
    let content = fs::read_to_string(path)?;
    let theme = theme_from_str(&content)?;
    log::debug!("loaded theme from {}", path.display());
    Ok(theme)
}

/// Load a theme if a path is given, the default theme otherwise
pub fn load_theme_or_default(path: Option<&Path>) -> Result<Theme> {
    match path {
        Some(path) => load_theme(path),
        None => Ok(Theme::default()),
    }
}
