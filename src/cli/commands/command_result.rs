use std::path::PathBuf;

use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Generate(GenerateSummary),
    Init(InitSummary),
}

/// A binding source written (or, in a dry run, rendered) by `generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Qualified type name, e.g. `com.example.Main_ViewBinding`.
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub artifacts: Vec<GeneratedArtifact>,
    pub model_files: usize,
    pub output_dir: PathBuf,
    pub is_dry_run: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running viewbind commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found during the run, grouped by rule in discovery order.
    pub issues: Vec<Issue>,
}
