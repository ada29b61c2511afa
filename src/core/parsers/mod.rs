//! Parsers for the element models exported by the host compiler.

pub mod model;
