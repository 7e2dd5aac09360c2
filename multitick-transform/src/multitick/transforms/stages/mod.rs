//! Individual transformation stages
//!
//! Each stage implements the `Runnable` trait and can be composed into pipelines.

pub mod normalization;
pub mod parsing;
pub mod resolution;
pub mod rewrite;

pub use normalization::NormalizeMargins;
pub use parsing::{ParseProgram, SerializeProgram, SourceFormat};
pub use resolution::{ResolveChain, ResolvedLiteral};
pub use rewrite::RewriteProgram;
