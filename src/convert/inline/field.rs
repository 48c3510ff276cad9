//! Field annotation converter.
//!
//! Every attribute prefers the node's own value and falls back to the
//! field definition metadata. Formatting flags are tri-state: an explicit
//! `false` on the node suppresses a `true` in the metadata.

use log::trace;

use super::super::registry::{InlineInput, InlineOutcome};
use super::super::units::{dimension_or_default, pt_to_px};
use super::super::visitor::Session;
use super::apply_marks;
use crate::model::{
    FieldAnnotationAttrs, FieldAnnotationRun, FieldMetadata, FieldStyle, NodeKind, Run,
};

/// Label shown in the field.
///
/// Fallback chain: display label, default label, metadata label, metadata
/// default label, alias, metadata alias, empty.
pub(crate) fn field_label(attrs: &FieldAnnotationAttrs) -> String {
    let meta = attrs.metadata.as_ref();
    attrs
        .display_label
        .as_ref()
        .or(attrs.default_display_label.as_ref())
        .or_else(|| meta.and_then(|m| m.display_label.as_ref()))
        .or_else(|| meta.and_then(|m| m.default_display_label.as_ref()))
        .or(attrs.alias.as_ref())
        .or_else(|| meta.and_then(|m| m.alias.as_ref()))
        .cloned()
        .unwrap_or_default()
}

fn pick<T: Clone>(
    own: &Option<T>,
    meta: Option<&FieldMetadata>,
    get: impl Fn(&FieldMetadata) -> &Option<T>,
) -> Option<T> {
    own.clone().or_else(|| meta.and_then(|m| get(m).clone()))
}

fn is_hidden(attrs: &FieldAnnotationAttrs) -> bool {
    attrs.hidden == Some(true) || attrs.visibility.as_deref() == Some("hidden")
}

/// Form field rendered as an inline annotation.
pub(crate) fn convert_field_annotation(
    input: &InlineInput<'_>,
    session: &mut Session<'_>,
) -> InlineOutcome {
    let NodeKind::FieldAnnotation(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    if is_hidden(attrs) {
        trace!("hidden field annotation dropped");
        return InlineOutcome::Done;
    }
    let meta = attrs.metadata.as_ref();

    let style = FieldStyle {
        font_family: pick(&attrs.font_family, meta, |m| &m.font_family),
        font_size: pick(&attrs.font_size, meta, |m| &m.font_size).map(pt_to_px),
        text_color: pick(&attrs.text_color, meta, |m| &m.text_color)
            .map(|color| session.context.resolve_color(&color)),
        text_highlight: pick(&attrs.text_highlight, meta, |m| &m.text_highlight),
        bold: pick(&attrs.bold, meta, |m| &m.bold),
        italic: pick(&attrs.italic, meta, |m| &m.italic),
        underline: pick(&attrs.underline, meta, |m| &m.underline),
    };
    let size = attrs.size.map(|size| {
        (
            dimension_or_default(size.width),
            dimension_or_default(size.height),
        )
    });

    let mut mark_style = super::default_style(session);
    let effects = apply_marks(&mut mark_style, input.inherited.marks_for(input.node), session);

    InlineOutcome::Run(Run::FieldAnnotation(FieldAnnotationRun {
        label: field_label(attrs),
        field_id: attrs.field_id.clone(),
        field_type: pick(&attrs.field_type, meta, |m| &m.field_type),
        variant: pick(&attrs.variant, meta, |m| &m.variant),
        field_color: pick(&attrs.field_color, meta, |m| &m.field_color),
        border_color: pick(&attrs.border_color, meta, |m| &m.border_color),
        highlighted: pick(&attrs.highlighted, meta, |m| &m.highlighted),
        image_src: pick(&attrs.image_src, meta, |m| &m.image_src),
        raw_html: pick(&attrs.raw_html, meta, |m| &m.raw_html),
        link_url: pick(&attrs.link_url, meta, |m| &m.link_url),
        size,
        style,
        pm_range: session.position(input.node),
        sdt: input.inherited.sdt.clone(),
        tracked_change: effects.tracked_change,
    }))
}
