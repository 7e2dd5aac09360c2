//! Node model
//!
//! The structures the host toolchain hands over for rewriting. They are transient: built by
//! the upstream parser for one compilation unit and dropped once the rewritten node has been
//! spliced back in.
//!
//! - [`TemplateLiteral`]: alternating text segments and placeholders, always one more
//!   segment than placeholders.
//! - [`TaggedTemplate`]: a prefix expression applied to a following literal.
//! - [`Expression`]: the host expressions that can appear as tags, placeholders, or anywhere
//!   else in a [`Program`].

mod error;
mod expression;
mod literal;

pub use error::LiteralShapeError;
pub use expression::{Expression, Program, TaggedTemplate};
pub use literal::{TemplateLiteral, TextSegment};
