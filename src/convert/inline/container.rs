//! Transparent containers: inline structured content and run containers.

use super::super::registry::{InlineInput, InlineOutcome};
use super::super::visitor::Session;
use crate::model::{NodeKind, SdtKind, SdtMetadata};

/// Inline structured content. Never produces a run itself; its children
/// inherit the resolved metadata.
pub(crate) fn convert_structured_content(
    input: &InlineInput<'_>,
    _session: &mut Session<'_>,
) -> InlineOutcome {
    let NodeKind::StructuredContent(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    let own = SdtMetadata::from_attrs(SdtKind::StructuredContent, attrs);
    let mut next = input.inherited.descend(input.node);
    next.sdt = SdtMetadata::resolve(own, input.inherited.sdt.as_ref());
    InlineOutcome::Descend(next)
}

/// Run container carrying run properties.
///
/// Its own `vanish` hides the whole subtree. Otherwise the effective
/// properties (enclosing container, then own, through the style resolver)
/// become the active run properties of its children.
pub(crate) fn convert_run_container(
    input: &InlineInput<'_>,
    session: &mut Session<'_>,
) -> InlineOutcome {
    let NodeKind::Run(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    if attrs.run_properties.as_ref().is_some_and(|p| p.is_hidden()) {
        return InlineOutcome::HiddenByVanish;
    }

    let mut next = input.inherited.descend(input.node);
    if let Some(own) = &attrs.run_properties {
        let merged = match &input.inherited.run_properties {
            Some(outer) => outer.overlay(own),
            None => own.clone(),
        };
        let resolved = session
            .styles
            .resolve_run(&merged, input.paragraph, session.context);
        next.hidden = next.hidden || resolved.is_hidden();
        next.run_properties = Some(resolved);
    }
    next.data_attrs
        .extend(attrs.data_attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
    InlineOutcome::Descend(next)
}
