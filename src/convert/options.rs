//! Conversion options and configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::TrackedChangesMode;

/// Options for converting a document tree into flow blocks.
///
/// Cached flow blocks depend on these options; clear any
/// [`FlowBlockCache`](super::FlowBlockCache) when they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Font family for runs that specify none
    pub default_font: String,

    /// Font size in pixels for runs that specify none
    pub default_font_size: f64,

    /// Tracked changes filtering
    pub tracked_changes: Option<TrackedChangesConfig>,

    /// Hyperlink handling
    pub hyperlinks: HyperlinkConfig,

    /// Carry comment annotations on runs
    pub comments_enabled: bool,

    /// Merge adjacent compatible text runs
    pub merge_runs: bool,

    /// Imprecise source-format heuristics
    pub heuristics: Heuristics,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_font: "Arial".to_string(),
            default_font_size: 16.0,
            tracked_changes: None,
            hyperlinks: HyperlinkConfig::default(),
            comments_enabled: true,
            merge_runs: true,
            heuristics: Heuristics::default(),
        }
    }
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the default font family.
    pub fn with_default_font(mut self, font: impl Into<String>) -> Self {
        self.default_font = font.into();
        self
    }

    /// Set the default font size in pixels.
    pub fn with_default_font_size(mut self, size: f64) -> Self {
        self.default_font_size = size;
        self
    }

    /// Enable tracked changes filtering in the given mode.
    pub fn with_tracked_changes(mut self, mode: TrackedChangesMode) -> Self {
        self.tracked_changes = Some(TrackedChangesConfig {
            enabled: true,
            mode,
        });
        self
    }

    /// Set the tracked changes configuration.
    pub fn with_tracked_changes_config(mut self, config: Option<TrackedChangesConfig>) -> Self {
        self.tracked_changes = config;
        self
    }

    /// Enable or disable rich hyperlink metadata.
    pub fn with_rich_hyperlinks(mut self, enable: bool) -> Self {
        self.hyperlinks.enable_rich_hyperlinks = enable;
        self
    }

    /// Enable or disable comment annotations.
    pub fn with_comments(mut self, enable: bool) -> Self {
        self.comments_enabled = enable;
        self
    }

    /// Enable or disable run merging.
    pub fn with_merge_runs(mut self, merge: bool) -> Self {
        self.merge_runs = merge;
        self
    }

    /// Set the heuristics.
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Tracked changes mode when filtering is active.
    pub fn active_tracked_mode(&self) -> Option<TrackedChangesMode> {
        self.tracked_changes
            .filter(|config| config.enabled)
            .map(|config| config.mode)
    }
}

/// Tracked changes configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackedChangesConfig {
    /// Whether filtering runs at all
    pub enabled: bool,
    /// View to produce
    pub mode: TrackedChangesMode,
}

/// Hyperlink configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HyperlinkConfig {
    /// Carry tooltip, target, anchor and history on runs; otherwise only
    /// the href is kept
    pub enable_rich_hyperlinks: bool,
}

/// Heuristics for ambiguous source data.
///
/// Both are known to misjudge some inputs and are configurable for that
/// reason.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Heuristics {
    /// Honour the `shouldCover` image hint
    pub image_cover_hint: bool,

    /// Indent values up to this magnitude are taken as pixels, larger
    /// values as twips
    pub indent_pixel_threshold: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            image_cover_hint: true,
            indent_pixel_threshold: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ConvertOptions::new()
            .with_default_font("Calibri")
            .with_default_font_size(14.0)
            .with_tracked_changes(TrackedChangesMode::Original)
            .with_merge_runs(false);

        assert_eq!(options.default_font, "Calibri");
        assert_eq!(options.default_font_size, 14.0);
        assert_eq!(options.active_tracked_mode(), Some(TrackedChangesMode::Original));
        assert!(!options.merge_runs);
    }

    #[test]
    fn test_disabled_tracking_is_inactive() {
        let options = ConvertOptions::new().with_tracked_changes_config(Some(TrackedChangesConfig {
            enabled: false,
            mode: TrackedChangesMode::Final,
        }));
        assert_eq!(options.active_tracked_mode(), None);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options = ConvertOptions::from_json(
            r#"{"trackedChanges": {"enabled": true, "mode": "all"}, "heuristics": {"indentPixelThreshold": 30}}"#,
        )
        .unwrap();

        assert_eq!(options.default_font, "Arial");
        assert_eq!(options.active_tracked_mode(), Some(TrackedChangesMode::Review));
        assert_eq!(options.heuristics.indent_pixel_threshold, 30.0);
        assert!(options.heuristics.image_cover_hint);
    }
}
