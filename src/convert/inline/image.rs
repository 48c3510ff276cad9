//! Inline image converter.

use log::trace;

use super::super::registry::{InlineInput, InlineOutcome};
use super::super::units::dimension_or_default;
use super::super::visitor::Session;
use super::{apply_marks, default_style};
use crate::model::{BoxSpacing, ImageAttrs, ImageRun, ImageVerticalAlign, NodeKind, Run};

/// Whether an image flows with the text.
///
/// An explicit wrap type decides first (`Inline` flows, anything else
/// floats); then the legacy inline flag or `display: inline`; images
/// without any of these float.
pub(crate) fn is_inline_image(attrs: &ImageAttrs) -> bool {
    if let Some(wrap_type) = attrs.wrap.as_ref().and_then(|w| w.wrap_type.as_deref()) {
        return wrap_type == "Inline";
    }
    attrs.inline == Some(true) || attrs.display.as_deref() == Some("inline")
}

/// Distances around the image as authored, before any normalisation.
pub(crate) fn authored_distances(attrs: &ImageAttrs) -> BoxSpacing {
    if let Some(padding) = attrs.original_padding {
        return padding;
    }
    let Some(wrap) = &attrs.wrap else {
        return BoxSpacing::default();
    };
    BoxSpacing {
        top: wrap.attrs.dist_top.unwrap_or(0.0),
        right: wrap.attrs.dist_right.unwrap_or(0.0),
        bottom: wrap.attrs.dist_bottom.unwrap_or(0.0),
        left: wrap.attrs.dist_left.unwrap_or(0.0),
    }
}

/// Width and height, defaulting unusable values.
pub(crate) fn image_dimensions(attrs: &ImageAttrs) -> (f64, f64) {
    let size = attrs.size.unwrap_or_default();
    (
        dimension_or_default(size.width),
        dimension_or_default(size.height),
    )
}

/// Image flowing with the text, or `NotInline` for floating images.
/// Hidden images are dropped.
pub(crate) fn convert_image(input: &InlineInput<'_>, session: &mut Session<'_>) -> InlineOutcome {
    let NodeKind::Image(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    if attrs.is_hidden() {
        trace!("hidden image dropped");
        return InlineOutcome::Done;
    }
    if !is_inline_image(attrs) {
        return InlineOutcome::NotInline;
    }

    let (width, height) = image_dimensions(attrs);
    let mut style = default_style(session);
    let effects = apply_marks(&mut style, input.inherited.marks_for(input.node), session);

    InlineOutcome::Run(Run::Image(ImageRun {
        src: attrs.src.clone().unwrap_or_default(),
        width,
        height,
        alt: attrs.alt.clone(),
        title: attrs.title.clone(),
        vertical_align: ImageVerticalAlign::Bottom,
        distances: authored_distances(attrs),
        rotation: attrs.rotation,
        flip_h: attrs.flip_h.unwrap_or(false),
        flip_v: attrs.flip_v.unwrap_or(false),
        pm_range: session.position(input.node),
        sdt: input.inherited.sdt.clone(),
        tracked_change: effects.tracked_change,
    }))
}
