use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};
use colored::Colorize;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        file_scanner::scan_model_files,
        parsers::model::{LoadedModel, ProgramModel, parse_model_file},
    },
    issues::ParseErrorIssue,
};

/// Element model of one round, built from every model file that parsed.
pub struct ModelRound {
    pub model: ProgramModel,
    /// Files that could not be read or parsed. They are not part of `model`.
    pub parse_errors: Vec<ParseErrorIssue>,
    /// Number of model files that contributed to `model`.
    pub files_loaded: usize,
}

/// Everything a generation run needs before it touches the model files.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--output-root gen`)
/// 2. `.viewbindrc.json` config file
/// 3. Built-in defaults
pub struct GenerateContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    pub output_dir: PathBuf,

    /// Model files of this round, sorted.
    pub files: Vec<String>,

    pub verbose: bool,
}

impl GenerateContext {
    /// Load configuration, apply CLI overrides and discover model files.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or the model directory does not exist.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;

        if verbose {
            match &config_result.path {
                Some(path) => eprintln!("{} Using {}", "note:".bold(), path.display()),
                None => eprintln!(
                    "{} No {} found, using default configuration",
                    "note:".bold(),
                    CONFIG_FILE_NAME
                ),
            }
        }

        let mut config = config_result.config;

        if let Some(ref model_root) = common_args.model_root {
            config.model_root = model_root.to_string_lossy().to_string();
        }
        if let Some(ref output_root) = common_args.output_root {
            config.output_root = output_root.to_string_lossy().to_string();
        }

        let model_dir = resolve_dir(&root_dir, &config.model_root);
        let output_dir = resolve_dir(&root_dir, &config.output_root);

        if !model_dir.is_dir() {
            bail!("Model directory does not exist: {}", model_dir.display());
        }

        let scan_result = scan_model_files(&model_dir, &config.includes, &config.ignores, verbose);

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        if verbose {
            eprintln!(
                "{} Found {} model file(s) in {}",
                "note:".bold(),
                scan_result.files.len(),
                model_dir.display()
            );
        }

        Ok(Self {
            config,
            output_dir,
            files: scan_result.files,
            verbose,
        })
    }

    /// Parse every model file and resolve them into one round.
    ///
    /// A file that fails to parse becomes a [`ParseErrorIssue`] and is left out.
    /// Duplicate classes fail the round as a whole; the returned error then also
    /// names the files that did not parse.
    pub fn load_round(&self) -> Result<ModelRound> {
        let mut loaded = Vec::with_capacity(self.files.len());
        let mut parse_errors = Vec::new();

        for file_path in &self.files {
            match parse_model_file(Path::new(file_path)) {
                Ok(model) => loaded.push(LoadedModel {
                    path: file_path.clone(),
                    model,
                }),
                Err(e) => {
                    if self.verbose {
                        eprintln!(
                            "{} Skipping {}: {:#}",
                            "warning:".bold().yellow(),
                            file_path,
                            e
                        );
                    }
                    parse_errors.push(ParseErrorIssue {
                        file_path: file_path.clone(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        let files_loaded = loaded.len();
        let model = ProgramModel::build(loaded).map_err(|e| {
            if parse_errors.is_empty() {
                e
            } else {
                let files: Vec<&str> =
                    parse_errors.iter().map(|p| p.file_path.as_str()).collect();
                e.context(format!(
                    "{} model file(s) also failed to parse: {}",
                    files.len(),
                    files.join(", ")
                ))
            }
        })?;

        Ok(ModelRound {
            model,
            parse_errors,
            files_loaded,
        })
    }
}

/// Resolve a configured directory against the project root.
///
/// Absolute paths are kept. When the root is the current directory the path is
/// returned as written, so reported paths stay short.
fn resolve_dir(root_dir: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        return p.to_path_buf();
    }

    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}
