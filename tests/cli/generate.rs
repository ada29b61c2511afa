use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, OUTPUT_DIR};

const SAMPLE: &str = r#"{
  "classes": [
    {
      "name": "Sample",
      "package": "com.example",
      "contentView": 100,
      "fields": [{ "name": "title", "type": "TextView", "viewId": 200 }],
      "methods": [{ "name": "onSave", "onClick": [300, 301] }]
    }
  ]
}"#;

const HELPER: &str = r#"{
  "classes": [
    { "name": "Main", "package": "app", "contentView": 1 },
    {
      "name": "Helper",
      "package": "app",
      "fields": [{ "name": "label", "type": "android.widget.TextView", "viewId": 5 }]
    }
  ]
}"#;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_generates_sample_binding() -> Result<()> {
    let test = CliTest::with_model("sample", SAMPLE)?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Generated 1 binding(s) from 1 model file\n"
    );
    assert_eq!(stderr(&output), "");

    assert_snapshot!(test.read_generated("com.example.Sample_ViewBinding")?, @r"
    // Generated by viewbind. Do not modify.
    package com.example;

    import android.view.View;
    import com.viewbind.ViewBinder;

    public class Sample_ViewBinding implements ViewBinder<com.example.Sample> {
        @Override
        public void bind(final com.example.Sample target) {
            target.setContentView(100);
            target.title = (TextView) target.findViewById(200);
            target.findViewById(300).setOnClickListener(new View.OnClickListener() {
                @Override
                public void onClick(View v) {
                    target.onSave(v);
                }
            });
            target.findViewById(301).setOnClickListener(new View.OnClickListener() {
                @Override
                public void onClick(View v) {
                    target.onSave(v);
                }
            });
        }
    }
    ");

    Ok(())
}

#[test]
fn test_rerun_produces_identical_output() -> Result<()> {
    let test = CliTest::with_model("sample", SAMPLE)?;

    test.generate_command().output()?;
    let first = test.read_generated("com.example.Sample_ViewBinding")?;
    let output = test.generate_command().output()?;
    let second = test.read_generated("com.example.Sample_ViewBinding")?;

    assert!(output.status.success());
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_nested_class_binding_lives_in_outer_package() -> Result<()> {
    let test = CliTest::with_model(
        "nested",
        r#"{
          "classes": [
            { "name": "Outer", "package": "app" },
            { "name": "Inner", "enclosingClass": "app.Outer", "contentView": 7 }
          ]
        }"#,
    )?;

    let output = test.generate_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let source = test.read_generated("app.Inner_ViewBinding")?;
    assert!(source.contains("package app;"));
    assert!(source.contains("public class Inner_ViewBinding implements ViewBinder<app.Outer.Inner> {"));
    assert!(source.contains("public void bind(final app.Outer.Inner target) {"));

    Ok(())
}

#[test]
fn test_models_across_files_form_one_round() -> Result<()> {
    let test = CliTest::with_model(
        "a",
        r#"{ "classes": [{ "name": "Main", "package": "app", "contentView": 1 }] }"#,
    )?;
    test.write_file(
        "build/viewbind/b.viewbind.json",
        r#"{ "classes": [{ "name": "Dialog", "enclosingClass": "app.Main", "contentView": 2 }] }"#,
    )?;

    let output = test.generate_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Generated 2 binding(s) from 2 model files\n"
    );
    assert!(test.read_generated("app.Main_ViewBinding").is_ok());
    assert!(test.read_generated("app.Dialog_ViewBinding").is_ok());

    Ok(())
}

#[test]
fn test_dropped_marker_is_a_warning() -> Result<()> {
    let test = CliTest::with_model("helper", HELPER)?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    let err = stderr(&output);
    assert!(err.contains(
        "warning: view-id marker ignored: app.Helper has no content-view marker  dropped-marker"
    ));
    assert!(err.contains("--> app.Helper#label"));
    assert!(err.contains("1 problem (0 errors, 1 warning)"));
    assert!(test.read_generated("app.Main_ViewBinding").is_ok());
    assert!(test.read_generated("app.Helper_ViewBinding").is_err());

    Ok(())
}

#[test]
fn test_strict_flag_makes_dropped_markers_errors() -> Result<()> {
    let test = CliTest::with_model("helper", HELPER)?;

    let output = test.generate_command().arg("--strict").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: view-id marker ignored"));
    // Bound classes are still generated.
    assert!(test.read_generated("app.Main_ViewBinding").is_ok());

    Ok(())
}

#[test]
fn test_strict_markers_from_config() -> Result<()> {
    let test = CliTest::with_model("helper", HELPER)?;
    test.write_file(".viewbindrc.json", r#"{ "strictMarkers": true }"#)?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_model("sample", SAMPLE)?;

    let output = test.generate_command().arg("--dry-run").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Would generate 1 binding(s) into"));
    assert!(out.contains("  - com.example.Sample_ViewBinding\n"));
    assert!(!test.root().join(OUTPUT_DIR).exists());

    Ok(())
}

#[test]
fn test_parse_error_skips_file() -> Result<()> {
    let test = CliTest::with_model(
        "good",
        r#"{ "classes": [{ "name": "Main", "package": "app", "contentView": 1 }] }"#,
    )?;
    test.write_file("build/viewbind/bad.viewbind.json", "{ \"classes\": [")?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("parse-error"));
    assert!(err.contains("bad.viewbind.json"));
    assert!(test.read_generated("app.Main_ViewBinding").is_ok());

    Ok(())
}

#[test]
fn test_unparsed_outer_class_fails_only_the_nested_binding() -> Result<()> {
    let test = CliTest::with_model(
        "good",
        r#"{
          "classes": [
            { "name": "Main", "package": "app", "contentView": 1 },
            { "name": "Dialog", "enclosingClass": "app.Outer", "contentView": 2 }
          ]
        }"#,
    )?;
    test.write_file("build/viewbind/outer.viewbind.json", "{ \"classes\": [")?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("parse-error"));
    assert!(err.contains("outer.viewbind.json"));
    assert!(err.contains("write-failure"));
    assert!(err.contains("--> app.Outer.Dialog_ViewBinding"));
    assert!(err.contains("2 problems (2 errors, 0 warnings)"));
    assert!(test.read_generated("app.Main_ViewBinding").is_ok());

    Ok(())
}

#[test]
fn test_unicode_names_and_generic_field_types() -> Result<()> {
    let test = CliTest::with_model(
        "unicode",
        r#"{
          "classes": [
            {
              "name": "Café",
              "package": "app",
              "contentView": 1,
              "fields": [
                { "name": "list", "type": "android.widget.AdapterView<?>", "viewId": 2 },
                { "name": "icons", "type": "android.widget.ImageView[]", "viewId": 3 }
              ]
            }
          ]
        }"#,
    )?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let source = test.read_generated("app.Café_ViewBinding")?;
    assert!(source.contains("public class Café_ViewBinding implements ViewBinder<app.Café> {"));
    assert!(source.contains("target.list = (android.widget.AdapterView<?>) target.findViewById(2);"));
    assert!(source.contains("target.icons = (android.widget.ImageView[]) target.findViewById(3);"));

    Ok(())
}

#[test]
fn test_invalid_name_is_a_parse_error() -> Result<()> {
    let test = CliTest::with_model(
        "invalid",
        r#"{ "classes": [{ "name": "Not-A-Class", "package": "app", "contentView": 1 }] }"#,
    )?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid class name"));
    assert!(!test.root().join(OUTPUT_DIR).exists());

    Ok(())
}

#[test]
fn test_duplicate_class_is_fatal() -> Result<()> {
    let class = r#"{ "classes": [{ "name": "Main", "package": "app", "contentView": 1 }] }"#;
    let test = CliTest::with_model("a", class)?;
    test.write_file("build/viewbind/b.viewbind.json", class)?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Class 'app.Main' is declared more than once"));
    assert!(!test.root().join(OUTPUT_DIR).exists());

    Ok(())
}

#[test]
fn test_missing_model_dir_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Model directory does not exist"));

    Ok(())
}

#[test]
fn test_write_failure_is_reported() -> Result<()> {
    let test = CliTest::with_model("sample", SAMPLE)?;
    // A file where the output directory should be.
    test.write_file(OUTPUT_DIR, "")?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("write-failure"));
    assert!(err.contains("--> com.example.Sample_ViewBinding"));
    assert!(err.contains("Failed to create source file com.example.Sample_ViewBinding"));

    Ok(())
}

#[test]
fn test_cli_roots_override_config() -> Result<()> {
    let test = CliTest::with_file(
        "models/sample.viewbind.json",
        SAMPLE,
    )?;
    test.write_file(
        ".viewbindrc.json",
        r#"{ "modelRoot": "does-not-exist", "outputRoot": "gen" }"#,
    )?;

    let output = test
        .generate_command()
        .args(["--model-root", "models", "--output-root", "out"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        test.read_file("out/com/example/Sample_ViewBinding.java")
            .is_ok()
    );
    assert!(!test.root().join("gen").exists());

    Ok(())
}

#[test]
fn test_ignores_skip_model_files() -> Result<()> {
    let test = CliTest::with_model("sample", SAMPLE)?;
    test.write_file("build/viewbind/fixtures/broken.viewbind.json", "not json")?;
    test.write_file(".viewbindrc.json", r#"{ "ignores": ["fixtures"] }"#)?;

    let output = test.generate_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_verbose_lists_written_files() -> Result<()> {
    let test = CliTest::with_model("sample", SAMPLE)?;

    let output = test.generate_command().arg("-v").output()?;

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("note: No .viewbindrc.json found, using default configuration"));
    assert!(err.contains("note: Found 1 model file(s)"));
    assert!(err.contains("wrote com.example.Sample_ViewBinding -> "));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage: viewbind"));
    assert!(out.contains("generate"));
    assert!(out.contains("init"));

    Ok(())
}
