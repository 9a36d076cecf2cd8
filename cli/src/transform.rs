use svcpatch::{
    AddOptions, AddReport, DedupPolicy, RemoveOptions, RemoveReport, add_method, count, patch::METHOD_NAME,
    remove_duplicate,
};
use tracing_attributes::instrument;

use crate::{CLIOpts, Command};

/// Runs the selected patch and returns the lines to print.
#[instrument(skip_all, fields(file = %opts.file.display()))]
pub fn run(opts: &CLIOpts) -> svcpatch::Result<Vec<String>> {
    let path = opts.file.as_path();
    Ok(match &opts.command {
        Command::AddMethod(add) => {
            let report = add_method(path, AddOptions { strict: add.strict })?;
            vec![added_line(&report)]
        }
        Command::RemoveDuplicate(remove) => {
            let policy = if remove.all {
                DedupPolicy::AllAfterFirst
            } else {
                DedupPolicy::SecondOnly
            };
            let report = remove_duplicate(path, RemoveOptions { policy })?;
            removal_lines(&report)
        }
        Command::Count => vec![found_line(count(path)?)],
    })
}

fn added_line(report: &AddReport) -> String {
    match report.anchors {
        1 => format!("OK: {METHOD_NAME} method added"),
        n => format!("OK: {METHOD_NAME} method added ({n} toRad anchors matched)"),
    }
}

fn found_line(found: usize) -> String {
    format!("Found {found} {METHOD_NAME} methods")
}

fn removal_lines(report: &RemoveReport) -> Vec<String> {
    let first = match (report.removed, report.first_removed_at) {
        (1, Some(at)) => format!("OK: Removed duplicate {METHOD_NAME} method at position {at}"),
        (n, Some(at)) => {
            format!("OK: Removed {n} duplicate {METHOD_NAME} methods, first at position {at}")
        }
        (_, None) => found_line(report.found),
    };
    vec![first, "OK: File updated".to_string()]
}
