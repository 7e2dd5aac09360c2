//! Over-delimited literal rewriting
//!
//! The modules are applied in order for each candidate node: [`resolving`] decides whether
//! a tagged node is really an over-delimited literal, and [`normalizing`] rewrites the
//! recovered literal's text. [`rewriting`] drives both over a whole program.

pub mod ast;
pub mod loader;
pub mod normalizing;
pub mod resolving;
pub mod rewriting;
pub mod testing;
pub mod transforms;
