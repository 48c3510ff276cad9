//! Flow blocks: the flat, ordered output of a conversion.
//!
//! Blocks are immutable once emitted. Every block carries an id; blocks
//! produced while converting a paragraph also carry the id of that
//! paragraph so the pagination stage can anchor them.

use serde::{Deserialize, Serialize};

use super::{
    Alignment, BoxSpacing, ColumnLayout, Indent, NumberingRef, Orientation, PageMargins,
    PageSize, PmRange, Run, SdtMetadata, SectionType, Spacing, TabStop,
};

/// Editorial view applied to tracked changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedChangesMode {
    /// Show the document before any change
    Original,
    /// Show the document with all changes accepted
    #[default]
    Final,
    /// Show every change with its metadata
    #[serde(alias = "all")]
    Review,
}

impl std::str::FromStr for TrackedChangesMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "original" => Ok(TrackedChangesMode::Original),
            "final" => Ok(TrackedChangesMode::Final),
            "review" | "all" => Ok(TrackedChangesMode::Review),
            other => Err(format!("unknown tracked changes mode: {other}")),
        }
    }
}

/// Kind of a flow block, used for bookkeeping callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    /// Paragraph
    Paragraph,
    /// Image
    Image,
    /// Table
    Table,
    /// Drawing
    Drawing,
    /// Page break
    PageBreak,
    /// Column break
    ColumnBreak,
    /// Section break
    SectionBreak,
}

impl BlockKind {
    /// All kinds, in display order.
    pub const ALL: [BlockKind; 7] = [
        BlockKind::Paragraph,
        BlockKind::Image,
        BlockKind::Table,
        BlockKind::Drawing,
        BlockKind::PageBreak,
        BlockKind::ColumnBreak,
        BlockKind::SectionBreak,
    ];

    /// Short name used in generated ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Image => "image",
            BlockKind::Table => "table",
            BlockKind::Drawing => "drawing",
            BlockKind::PageBreak => "page-break",
            BlockKind::ColumnBreak => "column-break",
            BlockKind::SectionBreak => "section-break",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paragraph-level attributes of a paragraph block. Lengths are pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphBlockAttrs {
    /// Paragraph style id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    /// Alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Spacing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    /// Indentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<Indent>,
    /// Tab stops
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<TabStop>,
    /// Keep with next
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub keep_next: bool,
    /// Keep lines together
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub keep_lines: bool,
    /// Right to left
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub rtl: bool,
    /// List numbering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingRef>,
    /// Enclosing block-level structured content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdt: Option<SdtMetadata>,
    /// Tracked changes view the runs were filtered for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracked_changes_mode: Option<TrackedChangesMode>,
    /// Whether tracked changes filtering was enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracked_changes_enabled: Option<bool>,
}

/// A paragraph of runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphBlock {
    /// Block id
    pub id: String,
    /// Runs in order
    pub runs: Vec<Run>,
    /// Paragraph attributes
    #[serde(default)]
    pub attrs: ParagraphBlockAttrs,
}

/// How text wraps around a floating object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapType {
    /// No wrapping, object floats over text
    None,
    /// Square bounding box
    Square,
    /// Tight to the outline
    Tight,
    /// Through the outline
    Through,
    /// Text above and below only
    TopAndBottom,
    /// Flows as a character
    Inline,
}

impl WrapType {
    /// Parse an authored value against the allow-list.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "None" => Some(WrapType::None),
            "Square" => Some(WrapType::Square),
            "Tight" => Some(WrapType::Tight),
            "Through" => Some(WrapType::Through),
            "TopAndBottom" => Some(WrapType::TopAndBottom),
            "Inline" => Some(WrapType::Inline),
            _ => None,
        }
    }
}

/// Sides text may flow around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WrapText {
    /// Both sides
    BothSides,
    /// Left only
    Left,
    /// Right only
    Right,
    /// The larger side
    Largest,
}

impl WrapText {
    /// Parse an authored value against the allow-list.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bothSides" => Some(WrapText::BothSides),
            "left" => Some(WrapText::Left),
            "right" => Some(WrapText::Right),
            "largest" => Some(WrapText::Largest),
            _ => None,
        }
    }
}

/// Validated wrapping of a floating object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectWrap {
    /// Wrap type
    #[serde(rename = "type")]
    pub wrap_type: WrapType,
    /// Sides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<WrapText>,
    /// Distances from text
    pub distances: BoxSpacing,
    /// Drawn behind the text
    #[serde(default)]
    pub behind_doc: bool,
}

/// Horizontal reference frame of an anchored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalFrame {
    /// Page margin
    Margin,
    /// Page edge
    Page,
    /// Text column
    Column,
    /// Character position
    Character,
    /// Left margin area
    LeftMargin,
    /// Right margin area
    RightMargin,
    /// Inside margin
    InsideMargin,
    /// Outside margin
    OutsideMargin,
}

impl HorizontalFrame {
    /// Parse an authored value against the allow-list.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "margin" => Some(Self::Margin),
            "page" => Some(Self::Page),
            "column" => Some(Self::Column),
            "character" => Some(Self::Character),
            "leftMargin" => Some(Self::LeftMargin),
            "rightMargin" => Some(Self::RightMargin),
            "insideMargin" => Some(Self::InsideMargin),
            "outsideMargin" => Some(Self::OutsideMargin),
            _ => None,
        }
    }
}

/// Vertical reference frame of an anchored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalFrame {
    /// Page margin
    Margin,
    /// Page edge
    Page,
    /// Anchoring paragraph
    Paragraph,
    /// Anchoring line
    Line,
    /// Top margin area
    TopMargin,
    /// Bottom margin area
    BottomMargin,
    /// Inside margin
    InsideMargin,
    /// Outside margin
    OutsideMargin,
}

impl VerticalFrame {
    /// Parse an authored value against the allow-list.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "margin" => Some(Self::Margin),
            "page" => Some(Self::Page),
            "paragraph" => Some(Self::Paragraph),
            "line" => Some(Self::Line),
            "topMargin" => Some(Self::TopMargin),
            "bottomMargin" => Some(Self::BottomMargin),
            "insideMargin" => Some(Self::InsideMargin),
            "outsideMargin" => Some(Self::OutsideMargin),
            _ => None,
        }
    }
}

/// Alignment of an anchored object inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameAlign {
    /// Left or top
    Start,
    /// Centered
    Center,
    /// Right or bottom
    End,
    /// Inside edge
    Inside,
    /// Outside edge
    Outside,
}

impl FrameAlign {
    /// Parse an authored value against the allow-list.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" | "top" => Some(Self::Start),
            "center" => Some(Self::Center),
            "right" | "bottom" => Some(Self::End),
            "inside" => Some(Self::Inside),
            "outside" => Some(Self::Outside),
            _ => None,
        }
    }
}

/// Validated anchor placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectAnchor {
    /// Horizontal frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_relative_from: Option<HorizontalFrame>,
    /// Vertical frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_relative_from: Option<VerticalFrame>,
    /// Horizontal alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_h: Option<FrameAlign>,
    /// Vertical alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_v: Option<FrameAlign>,
    /// Horizontal offset in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_h: Option<f64>,
    /// Vertical offset in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_v: Option<f64>,
}

/// How an image fills its frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    /// Scale to fit inside, keeping aspect ratio
    #[default]
    Contain,
    /// Scale to cover, cropping overflow
    Cover,
    /// Stretch
    Fill,
    /// Like contain but never enlarge
    ScaleDown,
}

impl ObjectFit {
    /// Parse an authored value against the allow-list.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contain" => Some(Self::Contain),
            "cover" => Some(Self::Cover),
            "fill" => Some(Self::Fill),
            "scale-down" => Some(Self::ScaleDown),
            _ => None,
        }
    }
}

/// An image placed as its own block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    /// Block id
    pub id: String,
    /// Paragraph the image is anchored to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_paragraph_id: Option<String>,
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
    /// Wrapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<ObjectWrap>,
    /// Anchor placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<ObjectAnchor>,
    /// Stacking order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    /// Fit inside the frame
    pub object_fit: ObjectFit,
    /// Rotation in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Horizontal flip
    #[serde(default)]
    pub flip_h: bool,
    /// Vertical flip
    #[serde(default)]
    pub flip_v: bool,
    /// Document span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_range: Option<PmRange>,
    /// Enclosing structured content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdt: Option<SdtMetadata>,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellBlock {
    /// Cell id
    pub id: String,
    /// Columns spanned
    pub colspan: u32,
    /// Rows spanned
    pub rowspan: u32,
    /// Width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Background color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Vertical alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<String>,
    /// Cell content
    pub blocks: Vec<FlowBlock>,
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRowBlock {
    /// Row id
    pub id: String,
    /// Height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Repeats on each page
    #[serde(default)]
    pub is_header: bool,
    /// Cells
    pub cells: Vec<TableCellBlock>,
}

/// A table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    /// Block id
    pub id: String,
    /// Paragraph the table is anchored to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_paragraph_id: Option<String>,
    /// Rows
    pub rows: Vec<TableRowBlock>,
    /// Column widths in pixels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_widths: Vec<f64>,
    /// Table style id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    /// Table alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<Alignment>,
    /// Document span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_range: Option<PmRange>,
    /// Enclosing structured content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdt: Option<SdtMetadata>,
}

/// What a drawing depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawingKind {
    /// A single vector shape
    VectorShape,
    /// A group of shapes
    ShapeGroup,
    /// A text box
    TextBox,
    /// A horizontal rule
    HorizontalRule,
    /// Any other fixed content block
    ContentBlock,
}

/// Horizontal inset of a drawing, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inset {
    /// Left inset
    pub left: f64,
    /// Right inset
    pub right: f64,
}

/// A vector drawing, shape or rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingBlock {
    /// Block id
    pub id: String,
    /// Paragraph the drawing is anchored to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_paragraph_id: Option<String>,
    /// Drawing kind
    pub drawing_kind: DrawingKind,
    /// Width in pixels; `None` spans the available width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in pixels
    pub height: f64,
    /// Fill color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Stroke color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Stroke width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Rotation in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Horizontal flip
    #[serde(default)]
    pub flip_h: bool,
    /// Vertical flip
    #[serde(default)]
    pub flip_v: bool,
    /// Wrapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<ObjectWrap>,
    /// Anchor placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<ObjectAnchor>,
    /// Stacking order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    /// Horizontal inset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inset: Option<Inset>,
    /// Document span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_range: Option<PmRange>,
    /// Enclosing structured content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdt: Option<SdtMetadata>,
}

/// A forced page or column break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakBlock {
    /// Block id
    pub id: String,
    /// Paragraph the break belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_paragraph_id: Option<String>,
    /// Break classification as authored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_type: Option<String>,
    /// Document span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_range: Option<PmRange>,
}

/// Boundary between two sections. Describes the section that starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBreakBlock {
    /// Block id
    pub id: String,
    /// Index of the section that starts here
    pub section_index: usize,
    /// Start type of the new section
    pub section_type: SectionType,
    /// Page size of the new section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
    /// Orientation of the new section
    pub orientation: Orientation,
    /// Margins of the new section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margins: Option<PageMargins>,
    /// Column layout of the new section
    pub columns: ColumnLayout,
    /// Different first page
    #[serde(default)]
    pub title_page: bool,
    /// The new section must start on a new page
    pub requires_page_boundary: bool,
    /// The column layout changes at this boundary
    pub columns_changed: bool,
}

/// A unit of flow output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FlowBlock {
    /// Paragraph
    Paragraph(ParagraphBlock),
    /// Image
    Image(ImageBlock),
    /// Table
    Table(TableBlock),
    /// Drawing
    Drawing(DrawingBlock),
    /// Page break
    PageBreak(BreakBlock),
    /// Column break
    ColumnBreak(BreakBlock),
    /// Section break
    SectionBreak(SectionBreakBlock),
}

impl FlowBlock {
    /// Block id.
    pub fn id(&self) -> &str {
        match self {
            FlowBlock::Paragraph(b) => &b.id,
            FlowBlock::Image(b) => &b.id,
            FlowBlock::Table(b) => &b.id,
            FlowBlock::Drawing(b) => &b.id,
            FlowBlock::PageBreak(b) | FlowBlock::ColumnBreak(b) => &b.id,
            FlowBlock::SectionBreak(b) => &b.id,
        }
    }

    /// Block kind.
    pub fn kind(&self) -> BlockKind {
        match self {
            FlowBlock::Paragraph(_) => BlockKind::Paragraph,
            FlowBlock::Image(_) => BlockKind::Image,
            FlowBlock::Table(_) => BlockKind::Table,
            FlowBlock::Drawing(_) => BlockKind::Drawing,
            FlowBlock::PageBreak(_) => BlockKind::PageBreak,
            FlowBlock::ColumnBreak(_) => BlockKind::ColumnBreak,
            FlowBlock::SectionBreak(_) => BlockKind::SectionBreak,
        }
    }

    /// Id of the paragraph this block is anchored to.
    pub fn anchor_paragraph_id(&self) -> Option<&str> {
        match self {
            FlowBlock::Image(b) => b.anchor_paragraph_id.as_deref(),
            FlowBlock::Table(b) => b.anchor_paragraph_id.as_deref(),
            FlowBlock::Drawing(b) => b.anchor_paragraph_id.as_deref(),
            FlowBlock::PageBreak(b) | FlowBlock::ColumnBreak(b) => b.anchor_paragraph_id.as_deref(),
            FlowBlock::Paragraph(_) | FlowBlock::SectionBreak(_) => None,
        }
    }

    /// Tag the block with its anchoring paragraph. Paragraph and section
    /// break blocks are never anchored.
    pub fn set_anchor_paragraph_id(&mut self, paragraph_id: &str) {
        let slot = match self {
            FlowBlock::Image(b) => &mut b.anchor_paragraph_id,
            FlowBlock::Table(b) => &mut b.anchor_paragraph_id,
            FlowBlock::Drawing(b) => &mut b.anchor_paragraph_id,
            FlowBlock::PageBreak(b) | FlowBlock::ColumnBreak(b) => &mut b.anchor_paragraph_id,
            FlowBlock::Paragraph(_) | FlowBlock::SectionBreak(_) => return,
        };
        *slot = Some(paragraph_id.to_string());
    }

    /// Translate every document position in the block by `delta`.
    pub fn shift_positions(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }
        let shift = |range: &mut Option<PmRange>| *range = range.map(|r| r.shifted(delta));
        match self {
            FlowBlock::Paragraph(b) => b.runs.iter_mut().for_each(|run| run.shift(delta)),
            FlowBlock::Image(b) => shift(&mut b.pm_range),
            FlowBlock::Drawing(b) => shift(&mut b.pm_range),
            FlowBlock::PageBreak(b) | FlowBlock::ColumnBreak(b) => shift(&mut b.pm_range),
            FlowBlock::Table(b) => {
                shift(&mut b.pm_range);
                for cell in b.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
                    cell.blocks.iter_mut().for_each(|block| block.shift_positions(delta));
                }
            }
            FlowBlock::SectionBreak(_) => {}
        }
    }

    /// Paragraph block, if this is one.
    pub fn as_paragraph(&self) -> Option<&ParagraphBlock> {
        match self {
            FlowBlock::Paragraph(b) => Some(b),
            _ => None,
        }
    }

    /// Mutable paragraph block, if this is one.
    pub fn as_paragraph_mut(&mut self) -> Option<&mut ParagraphBlock> {
        match self {
            FlowBlock::Paragraph(b) => Some(b),
            _ => None,
        }
    }

    /// Check whether this is a paragraph block.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, FlowBlock::Paragraph(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineBreakRun, RunStyle, TextRun};

    fn paragraph_with_range(start: u32) -> FlowBlock {
        let mut run = TextRun::new("abc", RunStyle::new("Arial", 16.0));
        run.pm_range = Some(PmRange::new(start, start + 3));
        FlowBlock::Paragraph(ParagraphBlock {
            id: "p".into(),
            runs: vec![Run::Text(run), Run::LineBreak(LineBreakRun::default())],
            attrs: ParagraphBlockAttrs::default(),
        })
    }

    #[test]
    fn test_shift_positions_paragraph() {
        let mut block = paragraph_with_range(4);
        block.shift_positions(6);

        let para = block.as_paragraph().unwrap();
        assert_eq!(para.runs[0].pm_range(), Some(PmRange::new(10, 13)));
        assert_eq!(para.runs[1].pm_range(), None);
    }

    #[test]
    fn test_shift_positions_table_cells() {
        let mut table = FlowBlock::Table(TableBlock {
            id: "t".into(),
            anchor_paragraph_id: None,
            rows: vec![TableRowBlock {
                id: "t-0".into(),
                height: None,
                is_header: false,
                cells: vec![TableCellBlock {
                    id: "t-0-0".into(),
                    colspan: 1,
                    rowspan: 1,
                    width: None,
                    background: None,
                    vertical_align: None,
                    blocks: vec![paragraph_with_range(3)],
                }],
            }],
            column_widths: vec![],
            style_id: None,
            justification: None,
            pm_range: Some(PmRange::new(0, 9)),
            sdt: None,
        });
        table.shift_positions(-1);

        let FlowBlock::Table(table) = table else {
            panic!("expected table");
        };
        assert_eq!(table.pm_range, Some(PmRange::new(0, 8)));
        let inner = table.rows[0].cells[0].blocks[0].as_paragraph().unwrap();
        assert_eq!(inner.runs[0].pm_range(), Some(PmRange::new(2, 5)));
    }

    #[test]
    fn test_anchor_id_skips_paragraphs() {
        let mut block = paragraph_with_range(0);
        block.set_anchor_paragraph_id("x");
        assert_eq!(block.anchor_paragraph_id(), None);

        let mut brk = FlowBlock::PageBreak(BreakBlock {
            id: "b".into(),
            anchor_paragraph_id: None,
            break_type: Some("page".into()),
            pm_range: None,
        });
        brk.set_anchor_paragraph_id("x");
        assert_eq!(brk.anchor_paragraph_id(), Some("x"));
        assert_eq!(brk.kind(), BlockKind::PageBreak);
    }

    #[test]
    fn test_enum_allow_lists() {
        assert_eq!(WrapType::parse("Square"), Some(WrapType::Square));
        assert_eq!(WrapType::parse("square"), None);
        assert_eq!(ObjectFit::parse("scale-down"), Some(ObjectFit::ScaleDown));
        assert_eq!(FrameAlign::parse("bottom"), Some(FrameAlign::End));
        assert_eq!("all".parse::<TrackedChangesMode>(), Ok(TrackedChangesMode::Review));
    }
}
