//! Program elements handed to the generator by the host compiler.
//!
//! The host owns a fully resolved symbol table. The generator never builds one
//! itself: it only reads elements through [`RoundEnvironment`], which keeps the
//! collector and emitter independent of any particular host toolchain and lets
//! tests substitute a hand-built environment.

use std::{collections::HashSet, fmt};

/// The four markers the generator recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Marker {
    /// Layout id on a class.
    ContentView,
    /// View id on a field.
    ViewId,
    /// Click ids on a method.
    OnClick,
    /// Long-click ids on a method.
    OnLongClick,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::ContentView => write!(f, "content-view"),
            Marker::ViewId => write!(f, "view-id"),
            Marker::OnClick => write!(f, "on-click"),
            Marker::OnLongClick => write!(f, "on-long-click"),
        }
    }
}

/// Identity of a class within one round: its canonical name
/// (e.g. `com.example.Outer.Inner`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self(canonical_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The element that directly encloses a class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enclosing {
    /// Top-level class. An empty name is the unnamed package.
    Package(String),
    /// Nested class.
    Class(ClassId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassElement {
    pub id: ClassId,
    pub simple_name: String,
    pub enclosing: Enclosing,
    /// Layout id from the content-view marker.
    pub content_view: Option<i32>,
}

impl ClassElement {
    /// Canonical name, as written in source that refers to this class.
    pub fn canonical_name(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement {
    pub simple_name: String,
    pub enclosing_class: ClassId,
    /// Declared type, fully qualified (e.g. `android.widget.TextView`).
    pub declared_type: String,
    pub view_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodElement {
    pub simple_name: String,
    pub enclosing_class: ClassId,
    pub on_click: Option<Vec<i32>>,
    pub on_long_click: Option<Vec<i32>>,
}

/// Element-resolution service for one processing round.
///
/// Each query returns elements in discovery order. Implementations return only
/// elements that actually carry the marker in question.
pub trait RoundEnvironment {
    /// Classes carrying a content-view marker.
    fn content_view_classes(&self) -> Vec<&ClassElement>;

    /// Fields carrying a view-id marker.
    fn view_id_fields(&self) -> Vec<&FieldElement>;

    /// Methods carrying an on-click marker.
    fn click_methods(&self) -> Vec<&MethodElement>;

    /// Methods carrying an on-long-click marker.
    fn long_click_methods(&self) -> Vec<&MethodElement>;

    /// Look up any class of the round by identity.
    fn class(&self, id: &ClassId) -> Option<&ClassElement>;

    /// Resolve the package that ultimately encloses `class`.
    ///
    /// Walks enclosing classes outwards until a package element is reached.
    /// Returns `None` if the chain leaves the round or loops.
    fn package_of<'a>(&'a self, class: &'a ClassElement) -> Option<&'a str> {
        let mut current = class;
        let mut visited: HashSet<&ClassId> = HashSet::new();

        loop {
            match &current.enclosing {
                Enclosing::Package(name) => return Some(name),
                Enclosing::Class(outer) => {
                    if !visited.insert(outer) {
                        return None;
                    }
                    current = self.class(outer)?;
                }
            }
        }
    }
}
