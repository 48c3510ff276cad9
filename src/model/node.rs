//! The input document tree.
//!
//! Nodes are a closed set of tagged variants. Attributes are typed per
//! variant; values that the engine validates (wrap types, anchor enums,
//! object fit) stay as raw strings here so that invalid values can be
//! dropped during conversion instead of failing deserialisation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    Alignment, Indent, Mark, NumberingRef, RunProperties, SectionProperties, Spacing, TabLeader,
    TabStop,
};

/// Identity of a node in the host editor.
///
/// Used for position lookups only; it is not a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Host identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,

    /// Variant and attributes
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Marks applied to this node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,

    /// Ordered children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Create a node without id, marks or children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: None,
            kind,
            marks: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(TextAttrs { text: text.into() }))
    }

    /// Create a paragraph node.
    pub fn paragraph(attrs: ParagraphAttrs, children: Vec<DocumentNode>) -> Self {
        Self::new(NodeKind::Paragraph(attrs)).with_children(children)
    }

    /// Create a run container node.
    pub fn run(run_properties: Option<RunProperties>, children: Vec<DocumentNode>) -> Self {
        Self::new(NodeKind::Run(RunAttrs {
            run_properties,
            ..Default::default()
        }))
        .with_children(children)
    }

    /// Set the node id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(NodeId(id));
        self
    }

    /// Add a mark.
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Replace the children.
    pub fn with_children(mut self, children: Vec<DocumentNode>) -> Self {
        self.children = children;
        self
    }

    /// The variant tag.
    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    /// Check whether this is a leaf that occupies a single position.
    pub fn is_atom(&self) -> bool {
        self.children.is_empty() && self.kind.tag().is_atom()
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeKind::Text(attrs) = &self.kind {
            out.push_str(&attrs.text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Paragraph attributes if this is a paragraph.
    pub fn as_paragraph(&self) -> Option<&ParagraphAttrs> {
        match &self.kind {
            NodeKind::Paragraph(attrs) => Some(attrs),
            _ => None,
        }
    }
}

/// Node variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    /// Paragraph
    Paragraph(ParagraphAttrs),
    /// Run container carrying run properties
    Run(RunAttrs),
    /// Literal text
    Text(TextAttrs),
    /// Tab character
    Tab(TabAttrs),
    /// Image
    Image(ImageAttrs),
    /// Table
    Table(TableAttrs),
    /// Table row
    TableRow(TableRowAttrs),
    /// Table cell
    TableCell(TableCellAttrs),
    /// Vector shape, shape group or text box
    Shape(ShapeAttrs),
    /// Form field annotation
    FieldAnnotation(FieldAnnotationAttrs),
    /// Bookmark start
    BookmarkStart(BookmarkAttrs),
    /// `PAGEREF` field
    PageReference(PageReferenceAttrs),
    /// Footnote reference mark
    FootnoteReference(FootnoteReferenceAttrs),
    /// Inline structured content
    StructuredContent(SdtAttrs),
    /// Block-level structured content
    StructuredContentBlock(SdtAttrs),
    /// Page number or similar late-resolved token
    Token(TokenAttrs),
    /// Line, page or column break
    LineBreak(LineBreakAttrs),
    /// Horizontal rule or other fixed content block
    ContentBlock(ContentBlockAttrs),
    /// Document part object (e.g. table of contents)
    DocumentPartObject(SdtAttrs),
    /// Index block
    Index(SdtAttrs),
}

impl NodeKind {
    /// The variant tag.
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Paragraph(_) => NodeTag::Paragraph,
            NodeKind::Run(_) => NodeTag::Run,
            NodeKind::Text(_) => NodeTag::Text,
            NodeKind::Tab(_) => NodeTag::Tab,
            NodeKind::Image(_) => NodeTag::Image,
            NodeKind::Table(_) => NodeTag::Table,
            NodeKind::TableRow(_) => NodeTag::TableRow,
            NodeKind::TableCell(_) => NodeTag::TableCell,
            NodeKind::Shape(_) => NodeTag::Shape,
            NodeKind::FieldAnnotation(_) => NodeTag::FieldAnnotation,
            NodeKind::BookmarkStart(_) => NodeTag::BookmarkStart,
            NodeKind::PageReference(_) => NodeTag::PageReference,
            NodeKind::FootnoteReference(_) => NodeTag::FootnoteReference,
            NodeKind::StructuredContent(_) => NodeTag::StructuredContent,
            NodeKind::StructuredContentBlock(_) => NodeTag::StructuredContentBlock,
            NodeKind::Token(_) => NodeTag::Token,
            NodeKind::LineBreak(_) => NodeTag::LineBreak,
            NodeKind::ContentBlock(_) => NodeTag::ContentBlock,
            NodeKind::DocumentPartObject(_) => NodeTag::DocumentPartObject,
            NodeKind::Index(_) => NodeTag::Index,
        }
    }
}

/// Fieldless mirror of [`NodeKind`], used as the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeTag {
    /// Paragraph
    Paragraph,
    /// Run container
    Run,
    /// Text
    Text,
    /// Tab
    Tab,
    /// Image
    Image,
    /// Table
    Table,
    /// Table row
    TableRow,
    /// Table cell
    TableCell,
    /// Shape
    Shape,
    /// Field annotation
    FieldAnnotation,
    /// Bookmark start
    BookmarkStart,
    /// Page reference
    PageReference,
    /// Footnote reference
    FootnoteReference,
    /// Inline structured content
    StructuredContent,
    /// Block structured content
    StructuredContentBlock,
    /// Token
    Token,
    /// Line break
    LineBreak,
    /// Content block
    ContentBlock,
    /// Document part object
    DocumentPartObject,
    /// Index
    Index,
}

impl NodeTag {
    /// Check whether nodes with this tag are single-position leaves.
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            NodeTag::Tab
                | NodeTag::Image
                | NodeTag::Shape
                | NodeTag::FieldAnnotation
                | NodeTag::FootnoteReference
                | NodeTag::Token
                | NodeTag::LineBreak
                | NodeTag::ContentBlock
        )
    }

    /// Check whether this tag is a block-level container of paragraphs.
    pub fn is_block_container(&self) -> bool {
        matches!(
            self,
            NodeTag::StructuredContentBlock | NodeTag::DocumentPartObject | NodeTag::Index
        )
    }
}

/// Paragraph attributes. Lengths are twips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphAttrs {
    /// Stable identity supplied by the host; the cache key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable_id: Option<String>,
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
    /// Keep with next paragraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_next: Option<bool>,
    /// Keep lines together
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_lines: Option<bool>,
    /// Start on a new page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_break_before: Option<bool>,
    /// Right-to-left paragraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    /// List numbering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingRef>,
    /// Paragraph mark run properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_properties: Option<RunProperties>,
    /// Properties of the section this paragraph ends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_properties: Option<SectionProperties>,
}

/// Run container attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunAttrs {
    /// Direct run properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_properties: Option<RunProperties>,
    /// `data-*` attributes forwarded to the renderer
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data_attrs: BTreeMap<String, String>,
}

/// Text attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextAttrs {
    /// The literal text
    pub text: String,
}

/// Tab attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabAttrs {
    /// Leader drawn before the next stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<TabLeader>,
}

/// Width/height pair. Values may be missing or non-finite in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSize {
    /// Width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Distances around a floating object, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSpacing {
    /// Top distance
    pub top: f64,
    /// Right distance
    pub right: f64,
    /// Bottom distance
    pub bottom: f64,
    /// Left distance
    pub left: f64,
}

/// Wrap settings as authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WrapSpec {
    /// Wrap type (`Inline`, `Square`, `Tight`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub wrap_type: Option<String>,
    /// Wrap details
    pub attrs: WrapSpecAttrs,
}

/// Wrap details as authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WrapSpecAttrs {
    /// Which sides text flows around
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<String>,
    /// Top distance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_top: Option<f64>,
    /// Bottom distance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_bottom: Option<f64>,
    /// Left distance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_left: Option<f64>,
    /// Right distance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_right: Option<f64>,
    /// Drawn behind the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behind_doc: Option<bool>,
}

/// Anchor placement as authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnchorSpec {
    /// Horizontal reference frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_relative_from: Option<String>,
    /// Vertical reference frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_relative_from: Option<String>,
    /// Horizontal alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_h: Option<String>,
    /// Vertical alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_v: Option<String>,
    /// Horizontal offset in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_h: Option<f64>,
    /// Vertical offset in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_v: Option<f64>,
}

/// Image attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageAttrs {
    /// Image source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Alternative text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Display size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    /// Wrapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<WrapSpec>,
    /// Anchor placement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_data: Option<AnchorSpec>,
    /// Legacy inline flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
    /// Legacy display mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Explicitly hidden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// CSS-like visibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Stacking counter from the source format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_height: Option<i64>,
    /// Distances as authored, before any normalisation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_padding: Option<BoxSpacing>,
    /// Hint that the image should cover its frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_cover: Option<bool>,
    /// Explicit object fit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
    /// Rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Horizontal flip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_h: Option<bool>,
    /// Vertical flip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_v: Option<bool>,
}

impl ImageAttrs {
    /// Check whether the image is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden == Some(true) || self.visibility.as_deref() == Some("hidden")
    }
}

/// Table attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableAttrs {
    /// Column widths in twips
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub column_widths: Vec<f64>,
    /// Table style id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    /// Table alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Alignment>,
}

/// Table row attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableRowAttrs {
    /// Row height in twips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Repeat as header row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_header: Option<bool>,
}

/// Table cell attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableCellAttrs {
    /// Columns spanned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u32>,
    /// Rows spanned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<u32>,
    /// Cell width in twips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Background color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Vertical alignment (`top`, `center`, `bottom`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<String>,
}

/// Shape attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeAttrs {
    /// Shape kind (`vectorShape`, `shapeGroup`, `textbox`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Display size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    /// Fill color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Stroke color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Stroke width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Horizontal flip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_h: Option<bool>,
    /// Vertical flip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_v: Option<bool>,
    /// Wrapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<WrapSpec>,
    /// Anchor placement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_data: Option<AnchorSpec>,
    /// Stacking counter from the source format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_height: Option<i64>,
}

/// Field annotation attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldAnnotationAttrs {
    /// Field id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    /// Field type (`TEXTINPUT`, `CHECKBOXINPUT`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Rendering variant (`text`, `image`, `signature`, `checkbox`, `html`, `link`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Label shown in the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    /// Label used when `display_label` is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_display_label: Option<String>,
    /// Friendly name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Field color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_color: Option<String>,
    /// Border color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Highlighted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
    /// Hidden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// CSS-like visibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Image for image/signature fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    /// HTML for html fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    /// URL for link fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Field size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    /// Font family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Text highlight
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
    /// Field definition metadata, consulted for anything unset above
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FieldMetadata>,
}

/// Field definition metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldMetadata {
    /// Field type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Rendering variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    /// Default label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_display_label: Option<String>,
    /// Friendly name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Field color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_color: Option<String>,
    /// Border color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Highlighted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
    /// Image source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    /// HTML content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    /// Link URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Font family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Text highlight
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

/// Bookmark start attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmarkAttrs {
    /// Bookmark name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bookmark id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Page reference attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageReferenceAttrs {
    /// Raw field instruction, e.g. `PAGEREF _Toc123 \h`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

/// Footnote reference attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootnoteReferenceAttrs {
    /// Footnote id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Structured content attributes (inline and block wrappers).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SdtAttrs {
    /// Control id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Control type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_type: Option<String>,
    /// Developer tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Friendly name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Document part gallery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<String>,
    /// Document part unique id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// Field instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Lock value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<String>,
}

/// Late-resolved token kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// Current page number
    #[default]
    PageNumber,
    /// Total number of pages
    TotalPageCount,
    /// Number of pages in the current section
    SectionPageCount,
    /// Page number of a bookmark
    PageReference,
}

impl TokenKind {
    /// Character(s) reserving space until the value is known.
    pub fn placeholder(&self) -> &'static str {
        match self {
            TokenKind::PageReference => "??",
            _ => "0",
        }
    }
}

/// Token attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenAttrs {
    /// Token kind
    pub token_type: TokenKind,
    /// Marks stored as attributes when the host cannot attach real marks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub marks_as_attrs: Vec<Mark>,
}

/// Line break attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineBreakAttrs {
    /// Break classification (`page`, `column`, `textWrapping`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_type: Option<String>,
}

/// Content block attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentBlockAttrs {
    /// Render as a horizontal rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_rule: Option<bool>,
    /// Display size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    /// Fill color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_json_round_shape() {
        let json = r#"{
            "type": "paragraph",
            "id": 1,
            "stableId": "p-1",
            "children": [
                {"type": "text", "id": 2, "text": "Hello", "marks": [{"type": "bold"}]},
                {"type": "tab", "id": 3}
            ]
        }"#;
        let node: DocumentNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.id, Some(NodeId(1)));
        assert_eq!(node.tag(), NodeTag::Paragraph);
        assert_eq!(node.as_paragraph().unwrap().stable_id.as_deref(), Some("p-1"));
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].marks, vec![Mark::Bold]);
        assert!(node.children[1].is_atom());
        assert_eq!(node.text_content(), "Hello");
    }

    #[test]
    fn test_image_hidden() {
        let visible = ImageAttrs::default();
        assert!(!visible.is_hidden());

        let hidden = ImageAttrs {
            visibility: Some("hidden".to_string()),
            ..Default::default()
        };
        assert!(hidden.is_hidden());
    }

    #[test]
    fn test_token_placeholder() {
        assert_eq!(TokenKind::PageNumber.placeholder(), "0");
        assert_eq!(TokenKind::PageReference.placeholder(), "??");
    }

    #[test]
    fn test_block_container_tags() {
        assert!(NodeTag::DocumentPartObject.is_block_container());
        assert!(!NodeTag::StructuredContent.is_block_container());
    }
}
