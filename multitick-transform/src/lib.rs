//! # multitick
//!
//! Compile-time rewriting of over-delimited template literals.
//!
//! A host grammar that only knows a single delimiter character parses a literal opened with
//! a longer delimiter run as a nested chain of tagged empty literals. This crate unwinds such
//! chains back into one literal (keeping any prefix tag) and strips the visual indentation
//! margin from its text.
//!
//! Layout
//!
//! src/multitick
//!   ├── ast           Node model handed over by the host toolchain
//!   ├── resolving     Chain Resolver: recovers the real tag and literal
//!   ├── normalizing   Margin Normalizer: dedents and trims the recovered literal
//!   ├── rewriting     The single top-down pass over a program
//!   ├── transforms    Composable pipelines over the stages above
//!   ├── loader        Reading serialized programs from files or strings
//!   └── testing       Builders for the chain shapes a host parser emits
//!
//! For most callers [`rewrite_program`](multitick::rewriting::rewrite_program) or the
//! [`ProgramLoader`](multitick::loader::ProgramLoader) shortcuts are the entry points.

pub mod multitick;

pub use multitick::ast::{
    Expression, LiteralShapeError, Program, TaggedTemplate, TemplateLiteral, TextSegment,
};
pub use multitick::normalizing::{normalize, MalformedLiteralError};
pub use multitick::resolving::{resolve, resolve_spine, Resolution, SpineStop};
pub use multitick::rewriting::{
    diagnose_program, rewrite_expression, rewrite_program, Diagnostic, RewriteError,
};
