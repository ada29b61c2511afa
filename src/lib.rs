//! viewbind - compile-time view binding generator
//!
//! viewbind reads the resolved element model exported by a host compiler, collects
//! the view-binding markers on each class, and writes one `<Class>_ViewBinding`
//! source per bound class. The generated class inflates the layout, looks up each
//! marked view, and registers click and long-click listeners.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Generation engine (collection and emission)
//! - `issues`: Issue type definitions for reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
