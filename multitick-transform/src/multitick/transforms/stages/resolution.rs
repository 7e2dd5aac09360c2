//! Chain resolution stage
//!
//! Owned wrapper around [`resolve`](crate::multitick::resolving::resolve) for use inside
//! pipelines.

use crate::multitick::ast::{Expression, TaggedTemplate, TemplateLiteral};
use crate::multitick::resolving::{resolve, Resolution};
use crate::multitick::transforms::{Runnable, TransformError};

/// Tag and payload recovered from an over-delimited chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLiteral {
    pub tag: Option<Expression>,
    pub literal: TemplateLiteral,
    pub depth: usize,
}

/// Chain resolution stage
///
/// # Input
/// - `TaggedTemplate` - a candidate node
///
/// # Output
/// - `Option<ResolvedLiteral>` - `None` when the node is not an over-delimited literal
pub struct ResolveChain;

impl ResolveChain {
    pub fn new() -> Self {
        ResolveChain
    }
}

impl Default for ResolveChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<TaggedTemplate, Option<ResolvedLiteral>> for ResolveChain {
    fn run(&self, input: TaggedTemplate) -> Result<Option<ResolvedLiteral>, TransformError> {
        Ok(match resolve(&input) {
            Resolution::Matched {
                tag,
                literal,
                depth,
            } => Some(ResolvedLiteral {
                tag: tag.cloned(),
                literal: literal.clone(),
                depth,
            }),
            Resolution::NoMatch => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multitick::testing::over_delimited_tagged;

    #[test]
    fn test_resolve_stage() {
        let body = TemplateLiteral::from_text("\n  q\n");
        let Expression::TaggedTemplate(node) =
            over_delimited_tagged(Expression::identifier("gql"), 5, body.clone())
        else {
            panic!("chain should be tagged");
        };
        let resolved = ResolveChain::new().run(node).unwrap();
        assert_eq!(
            resolved,
            Some(ResolvedLiteral {
                tag: Some(Expression::identifier("gql")),
                literal: body,
                depth: 2,
            })
        );
    }

    #[test]
    fn test_resolve_stage_no_match() {
        let node = TaggedTemplate::new(
            Expression::identifier("gql"),
            TemplateLiteral::from_text("q"),
        );
        assert_eq!(ResolveChain::new().run(node).unwrap(), None);
    }
}
