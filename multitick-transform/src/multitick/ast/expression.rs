//! Host expressions and programs

use super::literal::TemplateLiteral;
use serde::{Deserialize, Serialize};

/// A prefix expression applied to a following literal, e.g. `sql` in front of a query.
///
/// The tag may itself be a `TaggedTemplate`; that nesting is how a host parser represents a
/// literal opened with more than the minimal delimiter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedTemplate {
    pub tag: Box<Expression>,
    pub literal: TemplateLiteral,
}

impl TaggedTemplate {
    pub fn new(tag: impl Into<Expression>, literal: TemplateLiteral) -> Self {
        Self {
            tag: Box::new(tag.into()),
            literal,
        }
    }
}

/// The subset of host expressions the rewrite pass needs to walk through.
///
/// Serialized with a `type` discriminator so trees can be exchanged as JSON or YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier {
        name: String,
    },
    StringLiteral {
        value: String,
    },
    TemplateLiteral(TemplateLiteral),
    TaggedTemplate(TaggedTemplate),
    Call {
        callee: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    Member {
        object: Box<Expression>,
        property: String,
    },
    Array {
        #[serde(default)]
        elements: Vec<Expression>,
    },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::StringLiteral {
            value: value.into(),
        }
    }

    pub fn call(callee: impl Into<Expression>, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Box::new(callee.into()),
            arguments,
        }
    }

    pub fn member(object: impl Into<Expression>, property: impl Into<String>) -> Self {
        Expression::Member {
            object: Box::new(object.into()),
            property: property.into(),
        }
    }

    pub fn tagged(tag: impl Into<Expression>, literal: TemplateLiteral) -> Self {
        Expression::TaggedTemplate(TaggedTemplate::new(tag, literal))
    }

    /// A bare literal with one empty segment: what a delimiter pair closing against itself
    /// parses to.
    pub fn is_trivial_literal(&self) -> bool {
        matches!(self, Expression::TemplateLiteral(literal) if literal.is_trivial())
    }

    /// A tagged node whose literal is trivial.
    pub fn is_trivially_tagged(&self) -> bool {
        matches!(self, Expression::TaggedTemplate(node) if node.literal.is_trivial())
    }
}

impl From<TemplateLiteral> for Expression {
    fn from(literal: TemplateLiteral) -> Self {
        Expression::TemplateLiteral(literal)
    }
}

impl From<TaggedTemplate> for Expression {
    fn from(node: TaggedTemplate) -> Self {
        Expression::TaggedTemplate(node)
    }
}

/// One compilation unit as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub body: Vec<Expression>,
}

impl Program {
    pub fn new(body: Vec<Expression>) -> Self {
        Self { body }
    }
}
