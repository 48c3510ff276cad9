//! Section layout types.

use serde::{Deserialize, Serialize};

/// How a section starts relative to the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    /// Start on a new page (default)
    #[default]
    NextPage,
    /// Continue on the same page
    Continuous,
    /// Start on the next even page
    EvenPage,
    /// Start on the next odd page
    OddPage,
    /// Start in the next column
    NextColumn,
}

impl SectionType {
    /// Check whether this section type always starts a new page.
    pub fn forces_page(&self) -> bool {
        matches!(
            self,
            SectionType::NextPage | SectionType::EvenPage | SectionType::OddPage
        )
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Portrait (default)
    #[default]
    Portrait,
    /// Landscape
    Landscape,
}

/// Page size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// Page margins in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMargins {
    /// Top margin
    pub top: f64,
    /// Right margin
    pub right: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
    /// Header distance
    pub header: f64,
    /// Footer distance
    pub footer: f64,
}

/// Column layout of a section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayout {
    /// Number of columns
    pub count: u32,
    /// Gap between columns in pixels
    #[serde(default)]
    pub gap: f64,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            count: 1,
            gap: 0.0,
        }
    }
}

/// Section properties (`w:sectPr`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionProperties {
    /// Section start type
    #[serde(rename = "type")]
    pub section_type: SectionType,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
    /// Page orientation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Page margins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<PageMargins>,
    /// Column layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnLayout>,
    /// Different first page header/footer
    pub title_page: bool,
}

impl SectionProperties {
    /// Effective column layout (one column when unspecified).
    pub fn column_layout(&self) -> ColumnLayout {
        self.columns.unwrap_or_default()
    }

    /// Effective orientation (portrait when unspecified).
    pub fn effective_orientation(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }
}

/// A run of body paragraphs sharing one set of section properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRange {
    /// 0-based section index
    pub section_index: usize,
    /// Index of the first paragraph in the section
    pub start_paragraph_index: usize,
    /// Index of the last paragraph in the section (inclusive)
    pub end_paragraph_index: usize,
    /// Section properties
    pub properties: SectionProperties,
}

impl SectionRange {
    /// Number of paragraphs in the section.
    pub fn paragraph_count(&self) -> usize {
        self.end_paragraph_index + 1 - self.start_paragraph_index
    }
}
