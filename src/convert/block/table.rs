//! Table converter.
//!
//! Rows and cells get ids derived from the table id (`{table}-{r}` and
//! `{table}-{r}-{c}`). Cell content is converted recursively: paragraphs
//! through the paragraph assembler, anything else through its block
//! converter.

use log::debug;

use super::super::paragraph::assemble;
use super::super::registry::BlockInput;
use super::super::units::twips_to_px;
use super::super::visitor::{Inherited, Session};
use crate::model::{
    DocumentNode, FlowBlock, NodeKind, SdtKind, SdtMetadata, TableBlock, TableCellBlock,
    TableRowBlock,
};

/// Table with its rows and cells.
pub(crate) fn convert_table(input: &BlockInput<'_>, session: &mut Session<'_>) -> Vec<FlowBlock> {
    let NodeKind::Table(attrs) = &input.node.kind else {
        return Vec::new();
    };
    let table_id = input.id.as_str();
    let sdt = input.inherited.sdt.as_ref();

    let rows = input
        .node
        .children
        .iter()
        .filter(|row| matches!(row.kind, NodeKind::TableRow(_)))
        .enumerate()
        .map(|(r, row)| convert_row(session, row, &format!("{table_id}-{r}"), sdt))
        .collect();

    vec![FlowBlock::Table(TableBlock {
        id: input.id.clone(),
        anchor_paragraph_id: None,
        rows,
        column_widths: attrs.column_widths.iter().copied().map(twips_to_px).collect(),
        style_id: attrs.style_id.clone(),
        justification: attrs.justification,
        pm_range: session.position(input.node),
        sdt: sdt.cloned(),
    })]
}

fn convert_row(
    session: &mut Session<'_>,
    row: &DocumentNode,
    row_id: &str,
    sdt: Option<&SdtMetadata>,
) -> TableRowBlock {
    let (height, is_header) = match &row.kind {
        NodeKind::TableRow(attrs) => (
            attrs.height.map(twips_to_px),
            attrs.is_header.unwrap_or(false),
        ),
        _ => (None, false),
    };
    let cells = row
        .children
        .iter()
        .filter(|cell| matches!(cell.kind, NodeKind::TableCell(_)))
        .enumerate()
        .map(|(c, cell)| convert_cell(session, cell, format!("{row_id}-{c}"), sdt))
        .collect();

    TableRowBlock {
        id: row_id.to_string(),
        height,
        is_header,
        cells,
    }
}

fn convert_cell(
    session: &mut Session<'_>,
    cell: &DocumentNode,
    cell_id: String,
    sdt: Option<&SdtMetadata>,
) -> TableCellBlock {
    let blocks = convert_cell_content(session, &cell.children, &cell_id, sdt);
    let NodeKind::TableCell(attrs) = &cell.kind else {
        return TableCellBlock {
            id: cell_id,
            colspan: 1,
            rowspan: 1,
            width: None,
            background: None,
            vertical_align: None,
            blocks,
        };
    };

    TableCellBlock {
        id: cell_id,
        colspan: attrs.colspan.unwrap_or(1).max(1),
        rowspan: attrs.rowspan.unwrap_or(1).max(1),
        width: attrs.width.map(twips_to_px),
        background: attrs.background.clone(),
        vertical_align: attrs.vertical_align.clone(),
        blocks,
    }
}

/// Metadata kind of a block-level wrapper.
pub(crate) fn sdt_kind(kind: &NodeKind) -> SdtKind {
    match kind {
        NodeKind::DocumentPartObject(_) => SdtKind::DocumentPartObject,
        NodeKind::Index(_) => SdtKind::Index,
        _ => SdtKind::StructuredContent,
    }
}

/// Convert the block-level children of a cell.
fn convert_cell_content(
    session: &mut Session<'_>,
    children: &[DocumentNode],
    prefix: &str,
    sdt: Option<&SdtMetadata>,
) -> Vec<FlowBlock> {
    let mut blocks = Vec::new();

    for (i, child) in children.iter().enumerate() {
        let id = format!("{prefix}-{i}");
        match &child.kind {
            NodeKind::Paragraph(attrs) => {
                let base_id = attrs.stable_id.clone().unwrap_or(id);
                blocks.extend(assemble(session, child, sdt, &base_id));
            }
            NodeKind::StructuredContentBlock(attrs)
            | NodeKind::DocumentPartObject(attrs)
            | NodeKind::Index(attrs) => {
                let own = SdtMetadata::from_attrs(sdt_kind(&child.kind), attrs);
                let resolved = SdtMetadata::resolve(own, sdt);
                blocks.extend(convert_cell_content(
                    session,
                    &child.children,
                    &id,
                    resolved.as_ref(),
                ));
            }
            _ => {
                let Some(convert) = session.registry.get(child.tag()).and_then(|e| e.block) else {
                    debug!("no block converter for {:?} in table cell, dropping", child.tag());
                    continue;
                };
                let inherited = Inherited::with_sdt(sdt.cloned());
                let input = BlockInput {
                    node: child,
                    inherited: &inherited,
                    paragraph: None,
                    id,
                };
                blocks.extend(convert(&input, session));
            }
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::super::super::inline::testing::Fixture;
    use super::*;
    use crate::model::{ParagraphAttrs, SdtAttrs, TableAttrs, TableCellAttrs, TableRowAttrs};

    fn cell(children: Vec<DocumentNode>) -> DocumentNode {
        DocumentNode::new(NodeKind::TableCell(TableCellAttrs {
            width: Some(1500.0),
            ..Default::default()
        }))
        .with_children(children)
    }

    fn text_paragraph(text: &str) -> DocumentNode {
        DocumentNode::paragraph(ParagraphAttrs::default(), vec![DocumentNode::text(text)])
    }

    #[test]
    fn test_table_structure_and_ids() {
        let mut fixture = Fixture::new();
        let table = DocumentNode::new(NodeKind::Table(TableAttrs {
            column_widths: vec![1500.0, 3000.0],
            ..Default::default()
        }))
        .with_children(vec![DocumentNode::new(NodeKind::TableRow(TableRowAttrs {
            height: Some(300.0),
            is_header: Some(true),
        }))
        .with_children(vec![
            cell(vec![text_paragraph("a")]),
            cell(vec![text_paragraph("b"), text_paragraph("c")]),
        ])]);
        let inherited = Inherited::default();
        let input = BlockInput {
            node: &table,
            inherited: &inherited,
            paragraph: None,
            id: "t".into(),
        };

        let blocks = convert_table(&input, &mut fixture.session());
        let FlowBlock::Table(table) = &blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(table.column_widths, vec![100.0, 200.0]);
        let row = &table.rows[0];
        assert_eq!(row.id, "t-0");
        assert_eq!(row.height, Some(20.0));
        assert!(row.is_header);
        assert_eq!(row.cells[1].id, "t-0-1");
        assert_eq!(row.cells[1].width, Some(100.0));
        let ids: Vec<_> = row.cells[1].blocks.iter().map(FlowBlock::id).collect();
        assert_eq!(ids, vec!["t-0-1-0", "t-0-1-1"]);
    }

    #[test]
    fn test_cell_paragraphs_inherit_block_sdt() {
        let mut fixture = Fixture::new();
        let sdt_block = DocumentNode::new(NodeKind::StructuredContentBlock(SdtAttrs {
            tag: Some("terms".into()),
            ..Default::default()
        }))
        .with_children(vec![text_paragraph("x")]);
        let table = DocumentNode::new(NodeKind::Table(TableAttrs::default())).with_children(vec![
            DocumentNode::new(NodeKind::TableRow(TableRowAttrs::default()))
                .with_children(vec![cell(vec![sdt_block])]),
        ]);
        let inherited = Inherited::default();
        let input = BlockInput {
            node: &table,
            inherited: &inherited,
            paragraph: None,
            id: "t".into(),
        };

        let blocks = convert_table(&input, &mut fixture.session());
        let FlowBlock::Table(table) = &blocks[0] else {
            panic!("expected table");
        };
        let paragraph = table.rows[0].cells[0].blocks[0].as_paragraph().unwrap();
        let sdt = paragraph.attrs.sdt.as_ref().unwrap();
        assert_eq!(sdt.tag.as_deref(), Some("terms"));
        assert_eq!(paragraph.id, "t-0-0-0");
    }
}
