//! Core generation engine.
//!
//! A round runs in two phases over one [`RoundEnvironment`]:
//!
//! 1. **Collection** (`collect`): fold markers into one [`BindingRecord`] per bound class
//! 2. **Emission** (`emit`): render each record and write it through a [`Filer`]
//!
//! `context`, `file_scanner` and `parsers` build the environment from model files on disk.

pub mod collect;
pub mod context;
pub mod element;
pub mod emit;
pub mod file_scanner;
pub mod parsers;

pub use collect::{BindingRecord, Collection, DroppedMarker, collect_bindings};
pub use element::{ClassElement, ClassId, Marker, RoundEnvironment};
pub use emit::{EmitReport, Filer, FsFiler, MemoryFiler, emit_bindings};
