//! Source emission: render each [`BindingRecord`] and persist it through a [`Filer`].
//!
//! Failures are isolated per artifact. One record that cannot be written is
//! reported in the [`EmitReport`] and the remaining records are still emitted.

pub mod filer;
pub mod render;

use std::io::Write;

use anyhow::{Context, Result, anyhow};

pub use filer::{Filer, FsFiler, MemoryFiler};
pub use render::{BINDER_INTERFACE, BINDING_SUFFIX, GeneratedSource, qualify, render};

use super::{collect::BindingRecord, element::RoundEnvironment};

/// An artifact that could not be produced.
#[derive(Debug)]
pub struct EmitFailure {
    /// Qualified name of the artifact that was being generated.
    pub artifact: String,
    pub error: anyhow::Error,
}

/// Outcome of emitting one round.
#[derive(Debug, Default)]
pub struct EmitReport {
    /// Qualified names of the artifacts written, in record order.
    pub written: Vec<String>,
    pub failures: Vec<EmitFailure>,
}

impl EmitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolve the owner's package through the environment and render its binding.
pub fn render_binding<E: RoundEnvironment + ?Sized>(
    env: &E,
    record: &BindingRecord<'_>,
) -> Result<GeneratedSource> {
    let package = env.package_of(record.owner).ok_or_else(|| {
        anyhow!(
            "Cannot resolve the package enclosing {}",
            record.owner.canonical_name()
        )
    })?;
    Ok(render(record, package))
}

/// Render and write one artifact per record.
pub fn emit_bindings<E, F>(env: &E, records: &[BindingRecord<'_>], filer: &mut F) -> EmitReport
where
    E: RoundEnvironment + ?Sized,
    F: Filer,
{
    let mut report = EmitReport::default();

    for record in records {
        let source = match render_binding(env, record) {
            Ok(source) => source,
            Err(error) => {
                report.failures.push(EmitFailure {
                    artifact: format!("{}{}", record.owner.canonical_name(), BINDING_SUFFIX),
                    error,
                });
                continue;
            }
        };

        let artifact = source.qualified_name();
        match write_source(filer, &artifact, &source.text) {
            Ok(()) => report.written.push(artifact),
            Err(error) => report.failures.push(EmitFailure { artifact, error }),
        }
    }

    report
}

/// The writer lives only inside this function, so it is closed on every path.
fn write_source<F: Filer>(filer: &mut F, artifact: &str, text: &str) -> Result<()> {
    let mut writer = filer
        .create_source_file(artifact)
        .with_context(|| format!("Failed to create source file {}", artifact))?;
    writer
        .write_all(text.as_bytes())
        .with_context(|| format!("Failed to write source file {}", artifact))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush source file {}", artifact))?;
    Ok(())
}
