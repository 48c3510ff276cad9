//! Image block converter.

use log::debug;

use super::super::inline::image::{authored_distances, image_dimensions};
use super::super::registry::BlockInput;
use super::super::units::z_index;
use super::super::visitor::Session;
use super::{validate_anchor, validate_wrap};
use crate::model::{DocumentNode, FlowBlock, ImageAttrs, ImageBlock, NodeKind, ObjectFit};

/// Hidden images never take the block path.
pub(crate) fn is_block_eligible(node: &DocumentNode, _session: &Session<'_>) -> bool {
    match &node.kind {
        NodeKind::Image(attrs) => !attrs.is_hidden(),
        _ => false,
    }
}

/// Object fit: an explicit valid value wins, then the cover hint (when
/// enabled), then `scale-down` for legacy inline images and `contain`
/// otherwise.
pub(crate) fn object_fit(attrs: &ImageAttrs, cover_hint: bool) -> ObjectFit {
    if let Some(explicit) = attrs.object_fit.as_deref() {
        match ObjectFit::parse(explicit) {
            Some(fit) => return fit,
            None => debug!("dropping invalid object fit {explicit:?}"),
        }
    }
    if cover_hint && attrs.should_cover == Some(true) {
        return ObjectFit::Cover;
    }
    if attrs.inline == Some(true) {
        ObjectFit::ScaleDown
    } else {
        ObjectFit::Contain
    }
}

/// Image placed as its own block.
pub(crate) fn convert_image_block(input: &BlockInput<'_>, session: &mut Session<'_>) -> Vec<FlowBlock> {
    let NodeKind::Image(attrs) = &input.node.kind else {
        return Vec::new();
    };
    let (width, height) = image_dimensions(attrs);
    let wrap = validate_wrap(attrs.wrap.as_ref(), authored_distances(attrs));
    let behind_doc = wrap.as_ref().is_some_and(|w| w.behind_doc);

    vec![FlowBlock::Image(ImageBlock {
        id: input.id.clone(),
        anchor_paragraph_id: None,
        src: attrs.src.clone().unwrap_or_default(),
        width,
        height,
        alt: attrs.alt.clone(),
        title: attrs.title.clone(),
        wrap,
        anchor: validate_anchor(attrs.anchor_data.as_ref()),
        z_index: z_index(attrs.relative_height, behind_doc),
        object_fit: object_fit(attrs, session.options.heuristics.image_cover_hint),
        rotation: attrs.rotation,
        flip_h: attrs.flip_h.unwrap_or(false),
        flip_v: attrs.flip_v.unwrap_or(false),
        pm_range: session.position(input.node),
        sdt: input.inherited.sdt.clone(),
    })]
}
