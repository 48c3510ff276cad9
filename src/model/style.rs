//! Paragraph and run formatting primitives shared by the input tree and the
//! flow block output.
//!
//! Lengths carried by these types are twips when they come straight from a
//! node's attributes and pixels once a [`StyleResolver`](crate::convert::StyleResolver)
//! has resolved them.

use serde::{Deserialize, Serialize};

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

/// Line spacing rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineRule {
    /// `line` is a multiple of single spacing (in 240ths)
    #[default]
    Auto,
    /// `line` is an exact height
    Exact,
    /// `line` is a minimum height
    AtLeast,
}

/// Paragraph spacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spacing {
    /// Space before the paragraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<f64>,
    /// Space after the paragraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<f64>,
    /// Line spacing value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<f64>,
    /// How `line` is interpreted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_rule: Option<LineRule>,
}

/// Paragraph indentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Indent {
    /// Left (start) indent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    /// Right (end) indent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    /// First line indent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_line: Option<f64>,
    /// Hanging indent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hanging: Option<f64>,
}

impl Indent {
    /// Apply `f` to every present value.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            left: self.left.map(&f),
            right: self.right.map(&f),
            first_line: self.first_line.map(&f),
            hanging: self.hanging.map(&f),
        }
    }

    /// Check whether every value is absent or zero.
    pub fn is_zero(&self) -> bool {
        [self.left, self.right, self.first_line, self.hanging]
            .iter()
            .all(|v| v.unwrap_or(0.0) == 0.0)
    }
}

/// Alignment of text at a tab stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabAlignment {
    /// Text starts at the stop
    #[default]
    #[serde(alias = "left")]
    Start,
    /// Text is centered on the stop
    Center,
    /// Text ends at the stop
    #[serde(alias = "right")]
    End,
    /// Decimal separator aligns on the stop
    Decimal,
    /// Vertical bar drawn at the stop
    Bar,
}

/// Character filling the space before a tab stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabLeader {
    /// No leader
    None,
    /// `.....`
    Dot,
    /// `-----`
    Hyphen,
    /// `_____`
    Underscore,
    /// Heavy line
    Heavy,
    /// `·····`
    MiddleDot,
}

impl TabLeader {
    /// The character drawn for this leader, if any.
    pub fn fill_char(&self) -> Option<char> {
        match self {
            TabLeader::None => None,
            TabLeader::Dot => Some('.'),
            TabLeader::Hyphen => Some('-'),
            TabLeader::Underscore | TabLeader::Heavy => Some('_'),
            TabLeader::MiddleDot => Some('\u{b7}'),
        }
    }
}

/// A paragraph tab stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStop {
    /// Position from the paragraph start edge
    pub position: f64,
    /// Alignment at the stop
    #[serde(default)]
    pub alignment: TabAlignment,
    /// Leader character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<TabLeader>,
}

/// Underline style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnderlineStyle {
    /// Single line (default)
    #[default]
    Single,
    /// Double line
    Double,
    /// Thick line
    Thick,
    /// Dotted line
    Dotted,
    /// Dashed line
    Dashed,
    /// Wavy line
    Wave,
    /// Underline words only
    Words,
    /// Explicitly no underline
    None,
}

/// Vertical text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalAlign {
    /// Regular baseline
    Baseline,
    /// Raised, smaller text
    Superscript,
    /// Lowered, smaller text
    Subscript,
}

/// Run formatting as authored or as resolved through the style cascade.
///
/// Every field is tri-state: `None` means "not specified here", so an
/// overlay only replaces what it actually specifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunProperties {
    /// Character style id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    /// Bold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Italic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Underline style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<UnderlineStyle>,
    /// Strikethrough
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike: Option<bool>,
    /// Text color, hex (`#RRGGBB`) or a theme color name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Highlight color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
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
    /// Hidden text (`w:vanish`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vanish: Option<bool>,
}

impl RunProperties {
    /// Layer `top` over `self`; fields specified in `top` win.
    pub fn overlay(&self, top: &RunProperties) -> RunProperties {
        RunProperties {
            style_id: top.style_id.clone().or_else(|| self.style_id.clone()),
            bold: top.bold.or(self.bold),
            italic: top.italic.or(self.italic),
            underline: top.underline.or(self.underline),
            strike: top.strike.or(self.strike),
            color: top.color.clone().or_else(|| self.color.clone()),
            highlight: top.highlight.clone().or_else(|| self.highlight.clone()),
            font_family: top.font_family.clone().or_else(|| self.font_family.clone()),
            font_size: top.font_size.or(self.font_size),
            letter_spacing: top.letter_spacing.or(self.letter_spacing),
            vertical_align: top.vertical_align.or(self.vertical_align),
            vanish: top.vanish.or(self.vanish),
        }
    }

    /// Check whether these properties hide the text.
    pub fn is_hidden(&self) -> bool {
        self.vanish == Some(true)
    }

    /// Check whether nothing is specified.
    pub fn is_empty(&self) -> bool {
        *self == RunProperties::default()
    }
}

/// Reference to a numbering definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberingRef {
    /// Numbering instance id
    pub num_id: u32,
    /// List level (0-based)
    #[serde(default)]
    pub level: u8,
}
