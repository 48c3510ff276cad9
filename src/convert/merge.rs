//! Run merging.
//!
//! Adjacent text runs that would render identically are joined into one.
//! Merging only reduces the number of runs; the visible result is the same.

use std::collections::BTreeSet;

use crate::model::{Run, TextRun};

/// Check whether `b` can be appended to `a`.
pub fn can_merge(a: &TextRun, b: &TextRun) -> bool {
    if !a.is_plain() || !b.is_plain() || a.marks_from_attrs || b.marks_from_attrs {
        return false;
    }
    let contiguous = matches!((a.pm_range, b.pm_range), (Some(x), Some(y)) if x.end == y.start);
    contiguous
        && a.style == b.style
        && a.sdt == b.sdt
        && a.tracked_change == b.tracked_change
        && a.data_attrs == b.data_attrs
        && comments(a) == comments(b)
}

fn comments(run: &TextRun) -> BTreeSet<(&str, bool)> {
    run.comments
        .iter()
        .map(|c| (c.comment_id.as_str(), c.internal))
        .collect()
}

fn append(a: &mut TextRun, b: TextRun) {
    a.text.push_str(&b.text);
    if let (Some(range), Some(next)) = (a.pm_range.as_mut(), b.pm_range) {
        range.end = next.end;
    }
}

/// Merge adjacent compatible text runs.
pub fn merge_runs(runs: Vec<Run>) -> Vec<Run> {
    let mut merged: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs {
        let mergeable = match (merged.last(), &run) {
            (Some(Run::Text(last)), Run::Text(next)) => can_merge(last, next),
            _ => false,
        };
        if !mergeable {
            merged.push(run);
        } else if let (Some(Run::Text(last)), Run::Text(next)) = (merged.last_mut(), run) {
            append(last, next);
        }
    }
    merged
}
