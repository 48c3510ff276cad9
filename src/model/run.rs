//! Inline runs: the content units of a paragraph block.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BoxSpacing, Indent, LinkAttrs, RunProperties, SdtMetadata, TabLeader, TabStop, TokenKind,
    UnderlineStyle, VerticalAlign,
};

/// A span in the flat document coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PmRange {
    /// Start offset
    pub start: u32,
    /// End offset (exclusive)
    pub end: u32,
}

impl PmRange {
    /// Create a new range.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Collapsed range at `pos`.
    pub fn caret(pos: u32) -> Self {
        Self::new(pos, pos)
    }

    /// Translate by `delta`, saturating at zero.
    pub fn shifted(&self, delta: i64) -> Self {
        let shift = |v: u32| (i64::from(v) + delta).clamp(0, i64::from(u32::MAX)) as u32;
        Self {
            start: shift(self.start),
            end: shift(self.end),
        }
    }

    /// Length of the span.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check whether the span is collapsed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolved character formatting of a run. Sizes are pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStyle {
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f64,
    /// Bold
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    /// Italic
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    /// Underline style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<UnderlineStyle>,
    /// Strikethrough
    #[serde(default, skip_serializing_if = "is_false")]
    pub strike: bool,
    /// Text color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Highlight color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    /// Letter spacing in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// Superscript / subscript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    /// Hyperlink
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkAttrs>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl RunStyle {
    /// Base style from a font family and size.
    pub fn new(font_family: impl Into<String>, font_size: f64) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            bold: false,
            italic: false,
            underline: None,
            strike: false,
            color: None,
            highlight: None,
            letter_spacing: None,
            vertical_align: None,
            link: None,
        }
    }
}

/// Kind of editorial change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedChangeKind {
    /// Inserted content
    Insert,
    /// Deleted content
    Delete,
    /// Formatting change
    Format,
}

/// Tracked change carried by a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedChangeMeta {
    /// Change kind
    pub kind: TrackedChangeKind,
    /// Revision id
    pub id: String,
    /// Author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Author email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    /// Timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Formatting before a format change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<RunProperties>,
    /// Formatting after a format change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<RunProperties>,
}

/// Comment thread a run belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAnnotation {
    /// Comment thread id
    pub comment_id: String,
    /// Internal comment
    #[serde(default)]
    pub internal: bool,
}

/// Target of a page reference field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRefMetadata {
    /// Bookmark the field points at
    pub bookmark_id: String,
    /// Raw field instruction
    pub instruction: String,
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// The text
    pub text: String,
    /// Formatting
    #[serde(flatten)]
    pub style: RunStyle,
    /// Document span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_range: Option<PmRange>,
    /// Enclosing structured content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdt: Option<SdtMetadata>,
    /// Placeholder for a value resolved after layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenKind>,
    /// Page reference target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_ref_metadata: Option<PageRefMetadata>,
    /// Tracked change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_change: Option<TrackedChangeMeta>,
    /// Comment threads
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CommentAnnotation>,
    /// Forwarded `data-*` attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data_attrs: BTreeMap<String, String>,
    /// Styling came from a token's stored marks
    #[serde(default, skip_serializing_if = "is_false")]
    pub marks_from_attrs: bool,
}

impl TextRun {
    /// Create a plain text run.
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
            pm_range: None,
            sdt: None,
            token: None,
            page_ref_metadata: None,
            tracked_change: None,
            comments: Vec::new(),
            data_attrs: BTreeMap::new(),
            marks_from_attrs: false,
        }
    }

    /// Check whether this is plain text (not a token placeholder).
    pub fn is_plain(&self) -> bool {
        self.token.is_none() && self.page_ref_metadata.is_none()
    }
}

/// A tab character with the context needed to lay it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRun {
    /// 0-based index of this tab within the paragraph
    pub ordinal: u32,
    /// Paragraph tab stops (px)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tab_stops: Vec<TabStop>,
    /// Paragraph indent (px)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<Indent>,
    /// Leader character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<TabLeader>,
    /// Formatting
    #[serde(flatten)]
    pub style: RunStyle,
    /// Document span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_range: Option<PmRange>,
    /// Enclosing structured content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdt: Option<SdtMetadata>,
    /// Tracked change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_change: Option<TrackedChangeMeta>,
}

/// Vertical alignment of an inline image against the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageVerticalAlign {
    /// Image bottom sits on the baseline
    #[default]
    Bottom,
    /// Centered on the line
    Middle,
    /// Top of the line
    Top,
}

/// An image flowing with the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRun {
    /// Image source
    pub src: String,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
    /// Alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Line alignment
    pub vertical_align: ImageVerticalAlign,
    /// Distances from surrounding text, as authored
    pub distances: BoxSpacing,
    /// Rotation in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Horizontal flip
    #[serde(default, skip_serializing_if = "is_false")]
    pub flip_h: bool,
    /// Vertical flip
    #[serde(default, skip_serializing_if = "is_false")]
    pub flip_v: bool,
    /// Document span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_range: Option<PmRange>,
    /// Enclosing structured content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdt: Option<SdtMetadata>,
    /// Tracked change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_change: Option<TrackedChangeMeta>,
}

/// Formatting of a field annotation label. `None` means unspecified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldStyle {
    /// Font family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Highlight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_highlight: Option<String>,
    /// Bold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Italic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Underline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
}

/// A form field rendered as an inline pill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAnnotationRun {
    /// Displayed label
    pub label: String,
    /// Field id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    /// Field type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Rendering variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Field color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_color: Option<String>,
    /// Border color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Highlighted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
    /// Image source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    /// HTML content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    /// Link URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Field size in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<(f64, f64)>,
    /// Label formatting
    #[serde(default)]
    pub style: FieldStyle,
    /// Document span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_range: Option<PmRange>,
    /// Enclosing structured content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdt: Option<SdtMetadata>,
    /// Tracked change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_change: Option<TrackedChangeMeta>,
}

/// A soft line break.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakRun {
    /// Document span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_range: Option<PmRange>,
    /// Enclosing structured content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdt: Option<SdtMetadata>,
    /// Tracked change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_change: Option<TrackedChangeMeta>,
}

/// An inline content unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Run {
    /// Text
    Text(TextRun),
    /// Tab
    Tab(TabRun),
    /// Inline image
    Image(ImageRun),
    /// Field annotation
    FieldAnnotation(FieldAnnotationRun),
    /// Line break
    LineBreak(LineBreakRun),
}

impl Run {
    /// Document span of the run.
    pub fn pm_range(&self) -> Option<PmRange> {
        match self {
            Run::Text(r) => r.pm_range,
            Run::Tab(r) => r.pm_range,
            Run::Image(r) => r.pm_range,
            Run::FieldAnnotation(r) => r.pm_range,
            Run::LineBreak(r) => r.pm_range,
        }
    }

    fn pm_range_mut(&mut self) -> &mut Option<PmRange> {
        match self {
            Run::Text(r) => &mut r.pm_range,
            Run::Tab(r) => &mut r.pm_range,
            Run::Image(r) => &mut r.pm_range,
            Run::FieldAnnotation(r) => &mut r.pm_range,
            Run::LineBreak(r) => &mut r.pm_range,
        }
    }

    /// Translate the document span by `delta`.
    pub fn shift(&mut self, delta: i64) {
        let range = self.pm_range_mut();
        *range = range.map(|r| r.shifted(delta));
    }

    /// Tracked change carried by the run.
    pub fn tracked_change(&self) -> Option<&TrackedChangeMeta> {
        match self {
            Run::Text(r) => r.tracked_change.as_ref(),
            Run::Tab(r) => r.tracked_change.as_ref(),
            Run::Image(r) => r.tracked_change.as_ref(),
            Run::FieldAnnotation(r) => r.tracked_change.as_ref(),
            Run::LineBreak(r) => r.tracked_change.as_ref(),
        }
    }

    /// Mutable access to the tracked change slot.
    pub fn tracked_change_mut(&mut self) -> &mut Option<TrackedChangeMeta> {
        match self {
            Run::Text(r) => &mut r.tracked_change,
            Run::Tab(r) => &mut r.tracked_change,
            Run::Image(r) => &mut r.tracked_change,
            Run::FieldAnnotation(r) => &mut r.tracked_change,
            Run::LineBreak(r) => &mut r.tracked_change,
        }
    }

    /// Text content as it reads in plain text.
    pub fn plain_text(&self) -> &str {
        match self {
            Run::Text(r) => &r.text,
            Run::Tab(_) => "\t",
            Run::Image(_) => "",
            Run::FieldAnnotation(r) => &r.label,
            Run::LineBreak(_) => "\n",
        }
    }

    /// Text run, if this is one.
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Run::Text(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_saturates() {
        let range = PmRange::new(3, 8);
        assert_eq!(range.shifted(10), PmRange::new(13, 18));
        assert_eq!(range.shifted(-5), PmRange::new(0, 3));
        assert_eq!(range.len(), 5);
        assert!(PmRange::caret(4).is_empty());
    }

    #[test]
    fn test_run_json_shape() {
        let mut run = TextRun::new("Hi", RunStyle::new("Arial", 16.0));
        run.style.bold = true;
        run.pm_range = Some(PmRange::new(1, 3));

        let value = serde_json::to_value(Run::Text(run)).unwrap();
        assert_eq!(value["kind"], "text");
        assert_eq!(value["text"], "Hi");
        assert_eq!(value["bold"], true);
        assert_eq!(value["fontFamily"], "Arial");
        assert_eq!(value["pmRange"]["start"], 1);
        assert!(value.get("italic").is_none());
    }

    #[test]
    fn test_run_shift() {
        let mut run = Run::LineBreak(LineBreakRun {
            pm_range: Some(PmRange::new(5, 6)),
            ..Default::default()
        });
        run.shift(2);
        assert_eq!(run.pm_range(), Some(PmRange::new(7, 8)));
        assert_eq!(run.plain_text(), "\n");
    }
}
