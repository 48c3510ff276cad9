//! Tab converter.

use log::trace;

use super::super::registry::{InlineInput, InlineOutcome};
use super::super::visitor::Session;
use super::{apply_marks, apply_properties, default_style};
use crate::model::{NodeKind, Run, TabLeader, TabRun};

/// Tab character. Tabs without a document position cannot be laid out and
/// produce nothing.
pub(crate) fn convert_tab(input: &InlineInput<'_>, session: &mut Session<'_>) -> InlineOutcome {
    let NodeKind::Tab(attrs) = &input.node.kind else {
        return InlineOutcome::NotInline;
    };
    let Some(pm_range) = session.position(input.node) else {
        trace!("tab without position skipped");
        return InlineOutcome::Done;
    };

    let mut style = default_style(session);
    let effects = apply_marks(&mut style, input.inherited.marks_for(input.node), session);
    if let Some(props) = &input.inherited.run_properties {
        apply_properties(&mut style, props, session);
    }

    InlineOutcome::Run(Run::Tab(TabRun {
        ordinal: input.tab_ordinal,
        tab_stops: input.paragraph.tabs.clone(),
        indent: input.paragraph.indent,
        leader: attrs.leader.filter(|leader| *leader != TabLeader::None),
        style,
        pm_range: Some(pm_range),
        sdt: input.inherited.sdt.clone(),
        tracked_change: effects.tracked_change,
    }))
}
