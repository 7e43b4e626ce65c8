//! Model-wide configuration.
//!
//! A [`ListConfig`] holds the defaults a [`ListModel`](crate::model::ListModel)
//! falls back to: the header and footer shown for sections that specify none,
//! and the animation hint each convenience mutator uses.
//!
//! Configuration can be built in code or loaded from TOML. Every field is
//! optional in TOML; missing fields take their defaults.
//!
//! ```
//! use rowbox::config::ListConfig;
//! use rowbox::model::RowAnimation;
//!
//! let config = ListConfig::from_toml_str(r#"
//! [default-header]
//! tag = "plain-header"
//! height = 28.0
//!
//! [animations]
//! insert = "fade"
//! "#)?;
//!
//! assert_eq!(config.default_header.as_ref().map(|h| h.height), Some(28.0));
//! assert_eq!(config.animations.insert, RowAnimation::Fade);
//! assert_eq!(config.animations.remove, RowAnimation::SlideFromLeft);
//! # Ok::<(), rowbox::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use rowbox_core::logging::targets;

use crate::error::{Error, Result};
use crate::model::{ReuseTag, RowAnimation};

/// A reusable header/footer view used when a section provides none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultHeaderFooter {
    /// Reuse tag of the view class the adapter registers.
    pub tag: String,
    /// Height of the slot.
    pub height: f64,
}

impl DefaultHeaderFooter {
    /// Creates a default slot.
    pub fn new(tag: impl Into<String>, height: f64) -> Self {
        Self {
            tag: tag.into(),
            height,
        }
    }

    /// The tag as a [`ReuseTag`].
    pub fn reuse_tag(&self) -> ReuseTag {
        ReuseTag::new(self.tag.as_str())
    }

    pub(crate) fn validate(&self, slot: &'static str) -> Result<()> {
        if self.height.is_finite() && self.height > 0.0 {
            Ok(())
        } else {
            Err(Error::invalid_height(slot, self.height))
        }
    }
}

/// Animation hints used by mutators that do not take one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AnimationDefaults {
    /// Inserting and appending rows.
    pub insert: RowAnimation,
    /// Prepending rows.
    pub prepend: RowAnimation,
    /// Removing rows by position or by match.
    pub remove: RowAnimation,
    /// Removing the first row of a section.
    pub remove_first: RowAnimation,
    /// Removing the last row of a section.
    pub remove_last: RowAnimation,
    /// Inserting sections.
    pub insert_section: RowAnimation,
    /// Removing sections.
    pub remove_section: RowAnimation,
    /// The outgoing row or section of a replacement.
    pub replace_out: RowAnimation,
    /// The incoming row or section of a replacement.
    pub replace_in: RowAnimation,
}

impl Default for AnimationDefaults {
    fn default() -> Self {
        Self {
            insert: RowAnimation::SlideFromTop,
            prepend: RowAnimation::SlideFromBottom,
            remove: RowAnimation::SlideFromLeft,
            remove_first: RowAnimation::SlideFromBottom,
            remove_last: RowAnimation::SlideFromTop,
            insert_section: RowAnimation::SlideFromTop,
            remove_section: RowAnimation::SlideFromLeft,
            replace_out: RowAnimation::SlideFromTop,
            replace_in: RowAnimation::SlideFromTop,
        }
    }
}

/// Configuration for a [`ListModel`](crate::model::ListModel).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ListConfig {
    /// Header shown for sections without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_header: Option<DefaultHeaderFooter>,
    /// Footer shown for sections without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_footer: Option<DefaultHeaderFooter>,
    /// Per-operation animation hints.
    pub animations: AnimationDefaults,
}

impl ListConfig {
    /// Creates the default configuration: no default header or footer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default header.
    pub fn with_default_header(mut self, tag: impl Into<String>, height: f64) -> Self {
        self.default_header = Some(DefaultHeaderFooter::new(tag, height));
        self
    }

    /// Sets the default footer.
    pub fn with_default_footer(mut self, tag: impl Into<String>, height: f64) -> Self {
        self.default_footer = Some(DefaultHeaderFooter::new(tag, height));
        self
    }

    /// Sets the animation defaults.
    pub fn with_animations(mut self, animations: AnimationDefaults) -> Self {
        self.animations = animations;
        self
    }

    /// Checks that every configured height is renderable.
    pub fn validate(&self) -> Result<()> {
        if let Some(header) = &self.default_header {
            header.validate("default header")?;
        }
        if let Some(footer) = &self.default_footer {
            footer.validate("default footer")?;
        }
        Ok(())
    }

    /// Parses and validates a configuration from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        tracing::debug!(
            target: targets::CONFIG,
            default_header = config.default_header.is_some(),
            default_footer = config.default_footer.is_some(),
            "loaded list configuration"
        );
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = ListConfig::from_toml_str("").unwrap();
        assert_eq!(config, ListConfig::default());
        assert_eq!(config.animations.insert, RowAnimation::SlideFromTop);
        assert_eq!(config.animations.prepend, RowAnimation::SlideFromBottom);
        assert_eq!(config.animations.remove_first, RowAnimation::SlideFromBottom);
        assert_eq!(config.animations.remove_last, RowAnimation::SlideFromTop);
        assert_eq!(config.animations.remove_section, RowAnimation::SlideFromLeft);
        assert_eq!(config.animations.replace_out, RowAnimation::SlideFromTop);
        assert_eq!(config.animations.replace_in, RowAnimation::SlideFromTop);
    }

    #[test]
    fn test_parse_defaults_and_animations() {
        let config = ListConfig::from_toml_str(
            r#"
            [default-footer]
            tag = "note"
            height = 12.5

            [animations]
            remove = "none"
            insert-section = "middle"
            replace-in = "fade"
            "#,
        )
        .unwrap();

        assert!(config.default_header.is_none());
        assert_eq!(
            config.default_footer,
            Some(DefaultHeaderFooter::new("note", 12.5))
        );
        assert_eq!(config.animations.remove, RowAnimation::None);
        assert_eq!(config.animations.insert_section, RowAnimation::Middle);
        assert_eq!(config.animations.insert, RowAnimation::SlideFromTop);
        assert_eq!(config.animations.replace_in, RowAnimation::Fade);
        assert_eq!(config.animations.replace_out, RowAnimation::SlideFromTop);
    }

    #[test]
    fn test_rejects_non_positive_height() {
        let err = ListConfig::from_toml_str(
            r#"
            [default-header]
            tag = "h"
            height = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidHeight { slot: "default header", .. }));
    }

    #[test]
    fn test_rejects_unknown_animation() {
        let err = ListConfig::from_toml_str("[animations]\ninsert = \"spin\"").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ListConfig::new()
            .with_default_header("section-header", 30.0)
            .with_default_footer("section-footer", 18.0);
        let text = config.to_toml_string().unwrap();
        assert_eq!(ListConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ListConfig::from_toml_file("/nonexistent/rowbox/list.toml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
