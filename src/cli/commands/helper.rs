use super::{CommandResult, CommandSummary};
use crate::issues::{Issue, Severity};

pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>) -> CommandResult {
    // Stable: issues of one rule keep their discovery order.
    issues.sort_by_key(|i| i.rule());

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();

    CommandResult {
        summary,
        error_count,
        warning_count: issues.len() - error_count,
        issues,
    }
}
