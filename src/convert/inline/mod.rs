//! Inline converters: node to run.
//!
//! Text-bearing runs are styled in three layers: document defaults, then
//! marks (inherited first, then the node's own), then the resolved run
//! properties of the enclosing run container. A layer only replaces what
//! it specifies, so a run container without a color keeps a mark color.

pub(crate) mod container;
pub(crate) mod field;
pub(crate) mod image;
pub(crate) mod reference;
pub(crate) mod tab;
pub(crate) mod text;

use super::units::pt_to_px;
use super::visitor::Session;
use crate::model::{
    CommentAnnotation, LinkAttrs, Mark, RunProperties, RunStyle, TrackedChangeKind,
    TrackedChangeMeta, UnderlineStyle,
};

/// Non-style information carried by marks.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MarkEffects {
    pub tracked_change: Option<TrackedChangeMeta>,
    pub comments: Vec<CommentAnnotation>,
}

/// Style from document defaults.
pub(crate) fn default_style(session: &Session<'_>) -> RunStyle {
    let mut style = RunStyle::new(
        session.options.default_font.clone(),
        session.options.default_font_size,
    );
    apply_properties(&mut style, &session.context.default_run_properties, session);
    style
}

/// Apply marks in order onto `style`, collecting tracked changes and
/// comments.
pub(crate) fn apply_marks<'m>(
    style: &mut RunStyle,
    marks: impl IntoIterator<Item = &'m Mark>,
    session: &Session<'_>,
) -> MarkEffects {
    let mut effects = MarkEffects::default();

    for mark in marks {
        match mark {
            Mark::Bold => style.bold = true,
            Mark::Italic => style.italic = true,
            Mark::Strike => style.strike = true,
            Mark::Underline(attrs) => {
                style.underline = match attrs.style.unwrap_or_default() {
                    UnderlineStyle::None => None,
                    other => Some(other),
                };
            }
            Mark::TextStyle(attrs) => {
                if let Some(color) = attrs.color.as_ref().or(attrs.theme_color.as_ref()) {
                    style.color = Some(session.context.resolve_color(color));
                }
                if let Some(font) = &attrs.font_family {
                    style.font_family = font.clone();
                }
                if let Some(size) = attrs.font_size {
                    style.font_size = pt_to_px(size);
                }
                if let Some(spacing) = attrs.letter_spacing {
                    style.letter_spacing = Some(pt_to_px(spacing));
                }
                if let Some(align) = attrs.vertical_align {
                    style.vertical_align = Some(align);
                }
            }
            Mark::Highlight(attrs) => style.highlight = Some(attrs.color.clone()),
            Mark::Link(attrs) => style.link = link_for(attrs, session),
            Mark::TrackInsert(attrs) | Mark::TrackDelete(attrs) => {
                let kind = if matches!(mark, Mark::TrackInsert(_)) {
                    TrackedChangeKind::Insert
                } else {
                    TrackedChangeKind::Delete
                };
                effects.tracked_change = Some(TrackedChangeMeta {
                    kind,
                    id: attrs.id.clone(),
                    author: attrs.author.clone(),
                    author_email: attrs.author_email.clone(),
                    date: attrs.date,
                    before: None,
                    after: None,
                });
            }
            Mark::TrackFormat(attrs) => {
                // Insertions and deletions take precedence over formatting.
                if effects.tracked_change.is_none() {
                    effects.tracked_change = Some(TrackedChangeMeta {
                        kind: TrackedChangeKind::Format,
                        id: attrs.id.clone(),
                        author: attrs.author.clone(),
                        author_email: None,
                        date: attrs.date,
                        before: Some(attrs.before.clone()),
                        after: Some(attrs.after.clone()),
                    });
                }
            }
            Mark::CommentMark(attrs) => {
                if session.options.comments_enabled
                    && !effects.comments.iter().any(|c| c.comment_id == attrs.comment_id)
                {
                    effects.comments.push(CommentAnnotation {
                        comment_id: attrs.comment_id.clone(),
                        internal: attrs.internal,
                    });
                }
            }
        }
    }

    effects
}

fn link_for(attrs: &LinkAttrs, session: &Session<'_>) -> Option<LinkAttrs> {
    if session.options.hyperlinks.enable_rich_hyperlinks {
        return Some(attrs.clone());
    }
    attrs.href.as_ref().map(|href| LinkAttrs {
        href: Some(href.clone()),
        ..Default::default()
    })
}

/// Overlay run properties onto `style`; only specified fields change.
pub(crate) fn apply_properties(style: &mut RunStyle, props: &RunProperties, session: &Session<'_>) {
    if let Some(bold) = props.bold {
        style.bold = bold;
    }
    if let Some(italic) = props.italic {
        style.italic = italic;
    }
    if let Some(underline) = props.underline {
        style.underline = match underline {
            UnderlineStyle::None => None,
            other => Some(other),
        };
    }
    if let Some(strike) = props.strike {
        style.strike = strike;
    }
    if let Some(color) = &props.color {
        style.color = Some(session.context.resolve_color(color));
    }
    if let Some(highlight) = &props.highlight {
        style.highlight = Some(highlight.clone());
    }
    if let Some(font) = &props.font_family {
        style.font_family = font.clone();
    }
    if let Some(size) = props.font_size {
        style.font_size = pt_to_px(size);
    }
    if let Some(spacing) = props.letter_spacing {
        style.letter_spacing = Some(pt_to_px(spacing));
    }
    if let Some(align) = props.vertical_align {
        style.vertical_align = Some(align);
    }
}
