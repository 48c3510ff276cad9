//! Document model types.
//!
//! Two halves: the input tree ([`DocumentNode`] with its [`Mark`]s) as
//! supplied by the format translator, and the flat output ([`FlowBlock`]s
//! made of [`Run`]s) consumed by the pagination stage.

mod block;
mod document;
mod mark;
mod node;
mod run;
mod sdt;
mod section;
mod style;

pub use block::{
    BlockKind, BreakBlock, DrawingBlock, DrawingKind, FlowBlock, FrameAlign, HorizontalFrame,
    ImageBlock, Inset, ObjectAnchor, ObjectFit, ObjectWrap, ParagraphBlock, ParagraphBlockAttrs,
    SectionBreakBlock, TableBlock, TableCellBlock, TableRowBlock, TrackedChangesMode,
    VerticalFrame, WrapText, WrapType,
};
pub use document::Document;
pub use mark::{
    CommentAttrs, HighlightAttrs, LinkAttrs, Mark, TextStyleAttrs, TrackFormatAttrs,
    TrackedChangeAttrs, UnderlineAttrs,
};
pub use node::{
    AnchorSpec, BookmarkAttrs, BoxSpacing, ContentBlockAttrs, DocumentNode, FieldAnnotationAttrs,
    FieldMetadata, FootnoteReferenceAttrs, ImageAttrs, ImageSize, LineBreakAttrs, NodeId,
    NodeKind, NodeTag, PageReferenceAttrs, ParagraphAttrs, RunAttrs, SdtAttrs, ShapeAttrs,
    TabAttrs, TableAttrs, TableCellAttrs, TableRowAttrs, TextAttrs, TokenAttrs, TokenKind,
    WrapSpec, WrapSpecAttrs,
};
pub use run::{
    CommentAnnotation, FieldAnnotationRun, FieldStyle, ImageRun, ImageVerticalAlign,
    LineBreakRun, PageRefMetadata, PmRange, Run, RunStyle, TabRun, TextRun, TrackedChangeKind,
    TrackedChangeMeta,
};
pub use sdt::{SdtKind, SdtLock, SdtMetadata};
pub use section::{
    ColumnLayout, Orientation, PageMargins, PageSize, SectionProperties, SectionRange,
    SectionType,
};
pub use style::{
    Alignment, Indent, LineRule, NumberingRef, RunProperties, Spacing, TabAlignment, TabLeader,
    TabStop, UnderlineStyle, VerticalAlign,
};
