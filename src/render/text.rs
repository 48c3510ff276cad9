//! Plain text rendering of flow blocks.

use crate::model::{DrawingKind, FlowBlock, Run};

/// Placeholder written for images.
const IMAGE_PLACEHOLDER: &str = "[image]";

/// Placeholder written for drawings other than rules.
const DRAWING_PLACEHOLDER: &str = "[drawing]";

/// Convert flow blocks to plain text, one line per paragraph block.
///
/// Table cells are separated by ` | `, one line per row. Page and section
/// breaks produce no text.
pub fn to_text(blocks: &[FlowBlock]) -> String {
    let mut lines = Vec::new();
    for block in blocks {
        render_block(block, &mut lines);
    }
    lines.join("\n")
}

fn render_block(block: &FlowBlock, lines: &mut Vec<String>) {
    match block {
        FlowBlock::Paragraph(paragraph) => {
            lines.push(paragraph.runs.iter().map(run_text).collect());
        }
        FlowBlock::Image(image) => match &image.alt {
            Some(alt) if !alt.is_empty() => lines.push(format!("[image: {alt}]")),
            _ => lines.push(IMAGE_PLACEHOLDER.to_string()),
        },
        FlowBlock::Drawing(drawing) => match drawing.drawing_kind {
            DrawingKind::HorizontalRule => lines.push("---".to_string()),
            _ => lines.push(DRAWING_PLACEHOLDER.to_string()),
        },
        FlowBlock::Table(table) => {
            for row in &table.rows {
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .map(|cell| {
                        let mut inner = Vec::new();
                        for block in &cell.blocks {
                            render_block(block, &mut inner);
                        }
                        inner.join(" ")
                    })
                    .collect();
                lines.push(cells.join(" | "));
            }
        }
        FlowBlock::PageBreak(_) | FlowBlock::ColumnBreak(_) | FlowBlock::SectionBreak(_) => {}
    }
}

fn run_text(run: &Run) -> String {
    match run {
        Run::Image(_) => IMAGE_PLACEHOLDER.to_string(),
        other => other.plain_text().to_string(),
    }
}
