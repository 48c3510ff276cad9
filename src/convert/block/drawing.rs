//! Drawing converters: vector shapes and fixed content blocks.

use super::super::registry::BlockInput;
use super::super::units::{dimension_or_default, normalize_indent, z_index};
use super::super::visitor::Session;
use super::{validate_anchor, validate_wrap};
use crate::model::{
    BoxSpacing, DrawingBlock, DrawingKind, FlowBlock, Inset, NodeKind, ParagraphAttrs,
};

fn shape_kind(kind: Option<&str>) -> DrawingKind {
    match kind {
        Some("shapeGroup") => DrawingKind::ShapeGroup,
        Some("textbox") => DrawingKind::TextBox,
        _ => DrawingKind::VectorShape,
    }
}

/// Horizontal inset from the host paragraph's indentation.
fn paragraph_inset(paragraph: Option<&ParagraphAttrs>, threshold: f64) -> Option<Inset> {
    let indent = paragraph?.indent?;
    let inset = Inset {
        left: normalize_indent(indent.left.unwrap_or(0.0), threshold),
        right: normalize_indent(indent.right.unwrap_or(0.0), threshold),
    };
    (inset.left != 0.0 || inset.right != 0.0).then_some(inset)
}

/// Vector shape, shape group or text box.
pub(crate) fn convert_shape(input: &BlockInput<'_>, session: &mut Session<'_>) -> Vec<FlowBlock> {
    let NodeKind::Shape(attrs) = &input.node.kind else {
        return Vec::new();
    };
    let size = attrs.size.unwrap_or_default();
    let wrap = validate_wrap(attrs.wrap.as_ref(), BoxSpacing::default());
    let behind_doc = wrap.as_ref().is_some_and(|w| w.behind_doc);

    vec![FlowBlock::Drawing(DrawingBlock {
        id: input.id.clone(),
        anchor_paragraph_id: None,
        drawing_kind: shape_kind(attrs.kind.as_deref()),
        width: Some(dimension_or_default(size.width)),
        height: dimension_or_default(size.height),
        fill_color: attrs.fill_color.clone(),
        stroke_color: attrs.stroke_color.clone(),
        stroke_width: attrs.stroke_width,
        rotation: attrs.rotation,
        flip_h: attrs.flip_h.unwrap_or(false),
        flip_v: attrs.flip_v.unwrap_or(false),
        wrap,
        anchor: validate_anchor(attrs.anchor_data.as_ref()),
        z_index: z_index(attrs.relative_height, behind_doc),
        inset: None,
        pm_range: session.position(input.node),
        sdt: input.inherited.sdt.clone(),
    })]
}

/// Horizontal rule or other fixed content block.
///
/// A rule without an explicit width spans the available width, inset by
/// the host paragraph's indentation.
pub(crate) fn convert_content_block(
    input: &BlockInput<'_>,
    session: &mut Session<'_>,
) -> Vec<FlowBlock> {
    let NodeKind::ContentBlock(attrs) = &input.node.kind else {
        return Vec::new();
    };
    let size = attrs.size.unwrap_or_default();
    let rule = attrs.horizontal_rule.unwrap_or(false);
    let threshold = session.options.heuristics.indent_pixel_threshold;

    let (drawing_kind, width, height, inset) = if rule {
        (
            DrawingKind::HorizontalRule,
            size.width.filter(|w| w.is_finite() && *w > 0.0),
            size.height.filter(|h| h.is_finite() && *h > 0.0).unwrap_or(1.0),
            paragraph_inset(input.paragraph, threshold),
        )
    } else {
        (
            DrawingKind::ContentBlock,
            Some(dimension_or_default(size.width)),
            dimension_or_default(size.height),
            None,
        )
    };

    vec![FlowBlock::Drawing(DrawingBlock {
        id: input.id.clone(),
        anchor_paragraph_id: None,
        drawing_kind,
        width,
        height,
        fill_color: attrs.background.clone(),
        stroke_color: None,
        stroke_width: None,
        rotation: None,
        flip_h: false,
        flip_v: false,
        wrap: None,
        anchor: None,
        z_index: None,
        inset,
        pm_range: session.position(input.node),
        sdt: input.inherited.sdt.clone(),
    })]
}
