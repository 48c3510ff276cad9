//! Page and column break converter.

use super::super::registry::BlockInput;
use super::super::visitor::Session;
use crate::model::{BreakBlock, FlowBlock, NodeKind};

/// Forced break. Column breaks become column break blocks, everything else
/// a page break; the authored classification is kept.
pub(crate) fn convert_break(input: &BlockInput<'_>, session: &mut Session<'_>) -> Vec<FlowBlock> {
    let NodeKind::LineBreak(attrs) = &input.node.kind else {
        return Vec::new();
    };
    let block = BreakBlock {
        id: input.id.clone(),
        anchor_paragraph_id: None,
        break_type: attrs.break_type.clone(),
        pm_range: session.position(input.node),
    };
    match attrs.break_type.as_deref() {
        Some("column") => vec![FlowBlock::ColumnBreak(block)],
        _ => vec![FlowBlock::PageBreak(block)],
    }
}
