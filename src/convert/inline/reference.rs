//! Cross-reference converters: page references and bookmark starts.

use std::sync::OnceLock;

use regex::Regex;

use super::super::registry::{InlineInput, InlineOutcome};
use super::super::visitor::Session;
use super::text::styled_text_run;
use crate::model::{NodeKind, PageRefMetadata, Run, TokenKind};

/// Text shown until the referenced page number is known.
const PAGE_REF_FALLBACK: &str = "??";

fn pageref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"PAGEREF\s+(?:"([^"]+)"|([^\s\\"]+))"#).expect("valid PAGEREF pattern")
    })
}

/// Bookmark name targeted by a `PAGEREF` instruction.
pub(crate) fn pageref_target(instruction: &str) -> Option<&str> {
    let caps = pageref_regex().captures(instruction)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Page reference field.
///
/// With a resolvable target this becomes a token run whose text is the
/// materialised field result (or `??`), reserving width until pagination
/// fills in the page number. Otherwise the node is transparent and its
/// children are converted in place.
pub(crate) fn convert_page_reference(
    input: &InlineInput<'_>,
    session: &mut Session<'_>,
) -> InlineOutcome {
    let NodeKind::PageReference(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    let instruction = attrs.instruction.as_deref().unwrap_or_default();
    let Some(bookmark_id) = pageref_target(instruction) else {
        return InlineOutcome::Descend(input.inherited.descend(input.node));
    };

    let materialised = input.node.text_content();
    let text = if materialised.is_empty() {
        PAGE_REF_FALLBACK.to_string()
    } else {
        materialised
    };

    let marks = input.inherited.marks_for(input.node);
    let mut run = styled_text_run(input, session, text, marks, true);
    run.token = Some(TokenKind::PageReference);
    run.page_ref_metadata = Some(PageRefMetadata {
        bookmark_id: bookmark_id.to_string(),
        instruction: instruction.to_string(),
    });
    InlineOutcome::Run(Run::Text(run))
}

/// Bookmark start: registers the bookmark when it has a name and a
/// position, then converts its children.
pub(crate) fn convert_bookmark_start(
    input: &InlineInput<'_>,
    session: &mut Session<'_>,
) -> InlineOutcome {
    let NodeKind::BookmarkStart(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    if let (Some(name), Some(range)) = (&attrs.name, session.position(input.node)) {
        session.bookmarks.register(name.clone(), range.start);
    }
    InlineOutcome::Descend(input.inherited.descend(input.node))
}
