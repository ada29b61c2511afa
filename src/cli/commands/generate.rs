use anyhow::{Ok, Result};
use colored::Colorize;

use super::super::args::GenerateCommand;
use super::{CommandResult, CommandSummary, GenerateSummary, GeneratedArtifact, helper::finish};
use crate::{
    core::{
        Collection, FsFiler, MemoryFiler, collect_bindings, context::GenerateContext,
        emit_bindings,
    },
    issues::{DroppedMarkerIssue, Issue, Severity, WriteFailureIssue},
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let mut ctx = GenerateContext::new(&args.common)?;
    if args.strict {
        ctx.config.strict_markers = true;
    }

    let round = ctx.load_round()?;
    let collection = collect_bindings(&round.model);

    if ctx.verbose {
        eprintln!(
            "{} Collected {} binding(s) from {} class(es)",
            "note:".bold(),
            collection.records.len(),
            round.model.classes().len()
        );
    }

    let mut issues: Vec<Issue> = round
        .parse_errors
        .iter()
        .cloned()
        .map(Issue::ParseError)
        .collect();
    issues.extend(dropped_marker_issues(&collection, ctx.config.strict_markers));

    let mut fs_filer = FsFiler::new(&ctx.output_dir);
    let report = if args.dry_run {
        emit_bindings(&round.model, &collection.records, &mut MemoryFiler::new())
    } else {
        emit_bindings(&round.model, &collection.records, &mut fs_filer)
    };

    issues.extend(report.failures.iter().map(|failure| {
        Issue::WriteFailure(WriteFailureIssue {
            artifact: failure.artifact.clone(),
            error: format!("{:#}", failure.error),
        })
    }));

    // Dry runs report the path each artifact would have.
    let artifacts = report
        .written
        .into_iter()
        .map(|name| GeneratedArtifact {
            path: fs_filer.path_for(&name),
            name,
        })
        .collect();

    Ok(finish(
        CommandSummary::Generate(GenerateSummary {
            artifacts,
            model_files: round.files_loaded,
            output_dir: ctx.output_dir.clone(),
            is_dry_run: args.dry_run,
        }),
        issues,
    ))
}

fn dropped_marker_issues(collection: &Collection<'_>, strict: bool) -> Vec<Issue> {
    let severity = if strict {
        Severity::Error
    } else {
        Severity::Warning
    };

    collection
        .dropped
        .iter()
        .map(|dropped| {
            Issue::DroppedMarker(DroppedMarkerIssue {
                marker: dropped.marker,
                element: dropped.element_name.to_string(),
                enclosing_class: dropped.enclosing_class.to_string(),
                severity,
            })
        })
        .collect()
}
