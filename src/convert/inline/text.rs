//! Text, token, footnote reference and line break converters.

use super::super::registry::{InlineInput, InlineOutcome};
use super::super::units::superscript_digits;
use super::super::visitor::Session;
use super::{apply_marks, apply_properties, default_style};
use crate::model::{LineBreakRun, Mark, NodeKind, Run, TextRun};

/// Build a text run for `input.node` styled from defaults, the given marks
/// and (unless `overlay` is false) the enclosing run properties.
pub(crate) fn styled_text_run<'m>(
    input: &InlineInput<'_>,
    session: &Session<'_>,
    text: String,
    marks: impl IntoIterator<Item = &'m Mark>,
    overlay: bool,
) -> TextRun {
    let mut style = default_style(session);
    let effects = apply_marks(&mut style, marks, session);
    if overlay {
        if let Some(props) = &input.inherited.run_properties {
            apply_properties(&mut style, props, session);
        }
    }

    let mut run = TextRun::new(text, style);
    run.pm_range = session.position(input.node);
    run.sdt = input.inherited.sdt.clone();
    run.data_attrs = input.inherited.data_attrs.clone();
    run.tracked_change = effects.tracked_change;
    run.comments = effects.comments;
    run
}

/// Literal text.
pub(crate) fn convert_text(input: &InlineInput<'_>, session: &mut Session<'_>) -> InlineOutcome {
    let NodeKind::Text(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    if attrs.text.is_empty() {
        return InlineOutcome::Done;
    }
    let marks = input.inherited.marks_for(input.node);
    let run = styled_text_run(input, session, attrs.text.clone(), marks, true);
    InlineOutcome::Run(Run::Text(run))
}

/// Page number and similar tokens resolved after layout.
///
/// Styling comes from the node's marks, or from the marks stored in its
/// attributes when it has none. Stored marks are final: the enclosing run
/// properties are not layered over them.
pub(crate) fn convert_token(input: &InlineInput<'_>, session: &mut Session<'_>) -> InlineOutcome {
    let NodeKind::Token(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    let from_attrs = input.node.marks.is_empty() && !attrs.marks_as_attrs.is_empty();
    let text = attrs.token_type.placeholder().to_string();

    let mut run = if from_attrs {
        let marks = input.inherited.marks.iter().chain(attrs.marks_as_attrs.iter());
        styled_text_run(input, session, text, marks, false)
    } else {
        let marks = input.inherited.marks_for(input.node);
        styled_text_run(input, session, text, marks, true)
    };
    run.token = Some(attrs.token_type);
    run.marks_from_attrs = from_attrs;
    InlineOutcome::Run(Run::Text(run))
}

/// Footnote reference rendered as superscript digits.
pub(crate) fn convert_footnote_reference(
    input: &InlineInput<'_>,
    session: &mut Session<'_>,
) -> InlineOutcome {
    let NodeKind::FootnoteReference(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    let label = match attrs.id.as_deref() {
        Some(id) => match session.context.footnote_number(id) {
            Some(number) => number.to_string(),
            None => id.to_string(),
        },
        None => "*".to_string(),
    };

    let marks = input.inherited.marks_for(input.node);
    let run = styled_text_run(input, session, superscript_digits(&label), marks, true);
    InlineOutcome::Run(Run::Text(run))
}

/// Soft line break; page and column breaks take the block path.
pub(crate) fn convert_line_break(
    input: &InlineInput<'_>,
    session: &mut Session<'_>,
) -> InlineOutcome {
    let NodeKind::LineBreak(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    match attrs.break_type.as_deref() {
        Some("page") | Some("column") => InlineOutcome::NotInline,
        _ => {
            let mut style = default_style(session);
            let effects = apply_marks(&mut style, input.inherited.marks_for(input.node), session);
            InlineOutcome::Run(Run::LineBreak(LineBreakRun {
                pm_range: session.position(input.node),
                sdt: input.inherited.sdt.clone(),
                tracked_change: effects.tracked_change,
            }))
        }
    }
}
