//! Section boundaries.
//!
//! Body paragraphs are numbered in document order (top level and inside
//! block-level structured content, not inside tables). A paragraph carrying
//! section properties ends its section; the document's body section closes
//! the last one.

use log::trace;

use crate::model::{
    Document, DocumentNode, FlowBlock, NodeKind, SectionBreakBlock, SectionProperties, SectionRange,
};

/// Split the body into section ranges.
pub fn analyze_section_ranges(document: &Document) -> Vec<SectionRange> {
    fn walk(
        nodes: &[DocumentNode],
        index: &mut usize,
        start: &mut usize,
        out: &mut Vec<SectionRange>,
    ) {
        for node in nodes {
            match &node.kind {
                NodeKind::Paragraph(attrs) => {
                    if let Some(props) = &attrs.section_properties {
                        out.push(SectionRange {
                            section_index: out.len(),
                            start_paragraph_index: *start,
                            end_paragraph_index: *index,
                            properties: props.clone(),
                        });
                        *start = *index + 1;
                    }
                    *index += 1;
                }
                _ if node.tag().is_block_container() => walk(&node.children, index, start, out),
                _ => {}
            }
        }
    }

    let mut ranges = Vec::new();
    let (mut index, mut start) = (0, 0);
    walk(&document.content, &mut index, &mut start, &mut ranges);

    if index > start {
        ranges.push(SectionRange {
            section_index: ranges.len(),
            start_paragraph_index: start,
            end_paragraph_index: index - 1,
            properties: document.body_section.clone().unwrap_or_default(),
        });
    }
    ranges
}

/// Whether the next section must start on a new page.
pub fn requires_page_boundary(current: &SectionProperties, next: &SectionProperties) -> bool {
    next.section_type.forces_page()
        || current.page_size != next.page_size
        || current.effective_orientation() != next.effective_orientation()
}

/// Emits section breaks as body paragraphs are consumed.
///
/// Call [`before_paragraph`](Self::before_paragraph) and
/// [`after_paragraph`](Self::after_paragraph) around every body paragraph,
/// in document order. Each boundary fires once, immediately before the
/// first paragraph of the section that starts.
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    ranges: Vec<SectionRange>,
    current_section: usize,
    current_paragraph: usize,
}

impl SectionTracker {
    /// Create a tracker over `ranges`.
    pub fn new(ranges: Vec<SectionRange>) -> Self {
        Self {
            ranges,
            current_section: 0,
            current_paragraph: 0,
        }
    }

    /// Section break to emit before the current paragraph, if one starts
    /// a new section.
    pub fn before_paragraph(&mut self) -> Option<FlowBlock> {
        let next = self.ranges.get(self.current_section + 1)?;
        if next.start_paragraph_index != self.current_paragraph {
            return None;
        }
        let current = &self.ranges[self.current_section];
        let (current, next) = (&current.properties, &next.properties);
        let section_index = self.current_section + 1;
        trace!("section {section_index} starts at paragraph {}", self.current_paragraph);

        let block = SectionBreakBlock {
            id: format!("section-break-{section_index}"),
            section_index,
            section_type: next.section_type,
            page_size: next.page_size,
            orientation: next.effective_orientation(),
            margins: next.margins,
            columns: next.column_layout(),
            title_page: next.title_page,
            requires_page_boundary: requires_page_boundary(current, next),
            columns_changed: current.column_layout() != next.column_layout(),
        };
        self.current_section = section_index;
        Some(FlowBlock::SectionBreak(block))
    }

    /// Advance past the current paragraph.
    pub fn after_paragraph(&mut self) {
        self.current_paragraph += 1;
    }

    /// Index of the active section.
    pub fn current_section(&self) -> usize {
        self.current_section
    }

    /// Index of the next paragraph to be consumed.
    pub fn paragraph_index(&self) -> usize {
        self.current_paragraph
    }

    /// Section ranges being tracked.
    pub fn ranges(&self) -> &[SectionRange] {
        &self.ranges
    }
}
