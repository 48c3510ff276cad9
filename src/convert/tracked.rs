//! Tracked changes filtering.

use super::units::pt_to_px;
use crate::model::{
    Run, RunProperties, RunStyle, TrackedChangeKind, TrackedChangesMode, UnderlineStyle,
};

/// Filter and transform runs for a tracked changes view.
///
/// - `Final`: deletions are removed, insertion and format metadata is
///   stripped.
/// - `Original`: insertions are removed, deletion metadata is stripped and
///   format changes revert to their previous formatting.
/// - `Review`: runs are kept with their metadata.
pub fn filter_runs(runs: Vec<Run>, mode: TrackedChangesMode) -> Vec<Run> {
    if mode == TrackedChangesMode::Review {
        return runs;
    }
    runs.into_iter()
        .filter_map(|mut run| {
            let Some(kind) = run.tracked_change().map(|change| change.kind) else {
                return Some(run);
            };
            match (mode, kind) {
                (TrackedChangesMode::Final, TrackedChangeKind::Delete)
                | (TrackedChangesMode::Original, TrackedChangeKind::Insert) => None,
                (TrackedChangesMode::Original, TrackedChangeKind::Format) => {
                    if let Some(change) = run.tracked_change_mut().take() {
                        if let Some(style) = style_mut(&mut run) {
                            revert_style(
                                style,
                                change.before.as_ref(),
                                change.after.as_ref(),
                            );
                        }
                    }
                    Some(run)
                }
                _ => {
                    *run.tracked_change_mut() = None;
                    Some(run)
                }
            }
        })
        .collect()
}

fn style_mut(run: &mut Run) -> Option<&mut RunStyle> {
    match run {
        Run::Text(r) => Some(&mut r.style),
        Run::Tab(r) => Some(&mut r.style),
        _ => None,
    }
}

/// Restore the formatting a format change replaced.
///
/// Fields the change switched on without a recorded previous value are
/// switched off again.
fn revert_style(style: &mut RunStyle, before: Option<&RunProperties>, after: Option<&RunProperties>) {
    let empty = RunProperties::default();
    let before = before.unwrap_or(&empty);
    let after = after.unwrap_or(&empty);

    if let Some(bold) = before.bold.or(after.bold.map(|_| false)) {
        style.bold = bold;
    }
    if let Some(italic) = before.italic.or(after.italic.map(|_| false)) {
        style.italic = italic;
    }
    if let Some(strike) = before.strike.or(after.strike.map(|_| false)) {
        style.strike = strike;
    }
    match before.underline {
        Some(UnderlineStyle::None) => style.underline = None,
        Some(underline) => style.underline = Some(underline),
        None if after.underline.is_some() => style.underline = None,
        None => {}
    }
    if before.color.is_some() || after.color.is_some() {
        style.color = before.color.clone();
    }
    if before.highlight.is_some() || after.highlight.is_some() {
        style.highlight = before.highlight.clone();
    }
    if let Some(font) = &before.font_family {
        style.font_family = font.clone();
    }
    if let Some(size) = before.font_size {
        style.font_size = pt_to_px(size);
    }
    if before.letter_spacing.is_some() || after.letter_spacing.is_some() {
        style.letter_spacing = before.letter_spacing.map(pt_to_px);
    }
    if before.vertical_align.is_some() || after.vertical_align.is_some() {
        style.vertical_align = before.vertical_align;
    }
}
