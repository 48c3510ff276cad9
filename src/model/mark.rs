//! Marks: formatting and annotation overlays attached to inline nodes.
//!
//! Marks are inherited strictly from a node to its descendants during
//! conversion; siblings never see each other's marks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RunProperties, UnderlineStyle, VerticalAlign};

/// A mark applied to an inline node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    /// Bold text
    Bold,
    /// Italic text
    Italic,
    /// Underlined text
    Underline(UnderlineAttrs),
    /// Struck-through text
    Strike,
    /// Font, size, color and spacing
    TextStyle(TextStyleAttrs),
    /// Highlighted background
    Highlight(HighlightAttrs),
    /// Hyperlink
    Link(LinkAttrs),
    /// Tracked insertion
    TrackInsert(TrackedChangeAttrs),
    /// Tracked deletion
    TrackDelete(TrackedChangeAttrs),
    /// Tracked formatting change
    TrackFormat(TrackFormatAttrs),
    /// Comment range
    CommentMark(CommentAttrs),
}

impl Mark {
    /// Check whether this mark records a tracked change.
    pub fn is_tracked_change(&self) -> bool {
        matches!(
            self,
            Mark::TrackInsert(_) | Mark::TrackDelete(_) | Mark::TrackFormat(_)
        )
    }
}

/// Attributes of [`Mark::Underline`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnderlineAttrs {
    /// Underline style, single when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<UnderlineStyle>,
}

/// Attributes of [`Mark::TextStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyleAttrs {
    /// Hex color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Theme color name, used when `color` is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    /// Font family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Letter spacing in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// Superscript / subscript
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
}

/// Attributes of [`Mark::Highlight`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightAttrs {
    /// Highlight color
    pub color: String,
}

/// Attributes of [`Mark::Link`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkAttrs {
    /// External target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Internal bookmark target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// Tooltip text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Target frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Whether the link is recorded in history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<bool>,
}

/// Attributes of insertion and deletion marks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackedChangeAttrs {
    /// Revision id
    pub id: String,
    /// Author display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Author email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    /// Revision timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Attributes of [`Mark::TrackFormat`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackFormatAttrs {
    /// Revision id
    pub id: String,
    /// Author display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Revision timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Formatting before the change
    pub before: RunProperties,
    /// Formatting after the change
    pub after: RunProperties,
}

/// Attributes of [`Mark::CommentMark`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentAttrs {
    /// Comment thread id
    pub comment_id: String,
    /// Internal (not exported) comment
    pub internal: bool,
}
