//! Resolved-element model files exported by the host compiler.
//!
//! Each `*.viewbind.json` file lists classes with their fields, methods and
//! marker values. All files of one run form a single round, resolved into a
//! [`ProgramModel`] that serves as the [`RoundEnvironment`].

use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::LazyLock,
};

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Deserialize;

use crate::core::{
    element::{ClassElement, ClassId, Enclosing, FieldElement, MethodElement, RoundEnvironment},
    emit::qualify,
};

/// Suffix identifying model files during scanning.
pub const MODEL_FILE_SUFFIX: &str = ".viewbind.json";

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*$").unwrap());

static QUALIFIED_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*(\.[\p{L}_$][\p{L}\p{N}_$]*)*$").unwrap()
});

/// Declared types as the host prints them: qualified names with optional
/// type arguments, wildcards and array suffixes (`java.util.List<? extends T>[]`).
static DECLARED_TYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$.<>?,&\[\] ]*$").unwrap());

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelFile {
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub enclosing_class: Option<String>,
    #[serde(default)]
    pub content_view: Option<i32>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: String,
    #[serde(default)]
    pub view_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub on_click: Option<Vec<i32>>,
    #[serde(default)]
    pub on_long_click: Option<Vec<i32>>,
}

impl ModelFile {
    /// Check every name is something the generated source can spell.
    pub fn validate(&self) -> Result<()> {
        for class in &self.classes {
            check_identifier(&class.name, "class name")?;
            match (&class.package, &class.enclosing_class) {
                (Some(_), Some(_)) => bail!(
                    "Class '{}' declares both 'package' and 'enclosingClass'",
                    class.name
                ),
                (Some(package), None) if !package.is_empty() => {
                    check_qualified(package, "package")?
                }
                (None, Some(outer)) => check_qualified(outer, "enclosingClass")?,
                _ => {}
            }
            for field in &class.fields {
                check_identifier(&field.name, "field name")
                    .with_context(|| format!("in class '{}'", class.name))?;
                check_declared_type(&field.declared_type)
                    .with_context(|| format!("in field '{}.{}'", class.name, field.name))?;
            }
            for method in &class.methods {
                check_identifier(&method.name, "method name")
                    .with_context(|| format!("in class '{}'", class.name))?;
            }
        }
        Ok(())
    }
}

fn check_identifier(name: &str, what: &str) -> Result<()> {
    if !IDENTIFIER_REGEX.is_match(name) {
        bail!("Invalid {}: \"{}\"", what, name);
    }
    Ok(())
}

fn check_declared_type(name: &str) -> Result<()> {
    if !DECLARED_TYPE_REGEX.is_match(name) || name.ends_with(' ') {
        bail!("Invalid field type: \"{}\"", name);
    }
    Ok(())
}

fn check_qualified(name: &str, what: &str) -> Result<()> {
    if !QUALIFIED_NAME_REGEX.is_match(name) {
        bail!("Invalid {}: \"{}\"", what, name);
    }
    Ok(())
}

pub fn parse_model_file(path: &Path) -> Result<ModelFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file: {}", path.display()))?;

    parse_model_content(&content)
        .with_context(|| format!("Failed to parse model file: {}", path.display()))
}

pub fn parse_model_content(content: &str) -> Result<ModelFile> {
    let model: ModelFile = serde_json::from_str(content).context("Invalid model JSON")?;
    model.validate()?;
    Ok(model)
}

/// A parsed model file and where it came from.
#[derive(Debug)]
pub struct LoadedModel {
    pub path: String,
    pub model: ModelFile,
}

/// All elements of one round, in discovery order.
#[derive(Debug, Default)]
pub struct ProgramModel {
    classes: Vec<ClassElement>,
    fields: Vec<FieldElement>,
    methods: Vec<MethodElement>,
    index: HashMap<ClassId, usize>,
}

impl ProgramModel {
    /// Index the classes of all files of the round by canonical name.
    ///
    /// Fails on duplicate classes. An enclosing class that is not part of the
    /// round is kept as written; [`RoundEnvironment::package_of`] then finds no
    /// package for the nested class and only its binding fails.
    pub fn build(files: Vec<LoadedModel>) -> Result<Self> {
        let decls: Vec<(&str, &ClassDecl)> = files
            .iter()
            .flat_map(|f| f.model.classes.iter().map(move |c| (f.path.as_str(), c)))
            .collect();

        let mut model = ProgramModel::default();
        for (path, decl) in decls {
            let id = canonical_name(decl);
            if model.index.contains_key(&id) {
                bail!("Class '{}' is declared more than once (again in {})", id, path);
            }

            let enclosing = match &decl.enclosing_class {
                Some(outer) => Enclosing::Class(ClassId::new(outer.as_str())),
                None => Enclosing::Package(decl.package.clone().unwrap_or_default()),
            };

            for field in &decl.fields {
                model.fields.push(FieldElement {
                    simple_name: field.name.clone(),
                    enclosing_class: id.clone(),
                    declared_type: field.declared_type.clone(),
                    view_id: field.view_id,
                });
            }
            for method in &decl.methods {
                model.methods.push(MethodElement {
                    simple_name: method.name.clone(),
                    enclosing_class: id.clone(),
                    on_click: method.on_click.clone(),
                    on_long_click: method.on_long_click.clone(),
                });
            }

            model.index.insert(id.clone(), model.classes.len());
            model.classes.push(ClassElement {
                id,
                simple_name: decl.name.clone(),
                enclosing,
                content_view: decl.content_view,
            });
        }

        Ok(model)
    }

    pub fn classes(&self) -> &[ClassElement] {
        &self.classes
    }
}

/// Nested classes name their outer class canonically, so the canonical name
/// never depends on other declarations.
fn canonical_name(decl: &ClassDecl) -> ClassId {
    match &decl.enclosing_class {
        Some(outer) => ClassId::new(format!("{}.{}", outer, decl.name)),
        None => ClassId::new(qualify(
            decl.package.as_deref().unwrap_or_default(),
            &decl.name,
        )),
    }
}

impl RoundEnvironment for ProgramModel {
    fn content_view_classes(&self) -> Vec<&ClassElement> {
        self.classes
            .iter()
            .filter(|c| c.content_view.is_some())
            .collect()
    }

    fn view_id_fields(&self) -> Vec<&FieldElement> {
        self.fields.iter().filter(|f| f.view_id.is_some()).collect()
    }

    fn click_methods(&self) -> Vec<&MethodElement> {
        self.methods
            .iter()
            .filter(|m| m.on_click.is_some())
            .collect()
    }

    fn long_click_methods(&self) -> Vec<&MethodElement> {
        self.methods
            .iter()
            .filter(|m| m.on_long_click.is_some())
            .collect()
    }

    fn class(&self, id: &ClassId) -> Option<&ClassElement> {
        self.index.get(id).and_then(|&idx| self.classes.get(idx))
    }
}
