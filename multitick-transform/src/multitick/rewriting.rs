//! Rewrite pass
//!
//! One top-down walk over a program. Each tagged node is handed to the Chain Resolver; on a
//! match the whole chain is replaced by the normalized literal, re-tagged with the recovered
//! tag when there is one. The replacement itself is not resolved again, but its tag and
//! placeholders are still walked, as are the children of every node left untouched.
//!
//! Closing-side padding layers are resolved together by [`resolve_spine`], and the walk
//! steps over them in a loop, so a long delimiter run costs one frame and one pass.
//!
//! [`rewrite_program`] stops at the first malformed literal and returns no output.
//! [`diagnose_program`] walks the same nodes without rewriting and collects every problem.

use crate::multitick::ast::{Expression, Program};
use crate::multitick::normalizing::{normalize, MalformedLiteralError};
use crate::multitick::resolving::{resolve_spine, Resolution};
use std::fmt;
use thiserror::Error;

/// A malformed literal, located by its path inside the program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {source}")]
pub struct RewriteError {
    pub path: String,
    pub source: MalformedLiteralError,
}

/// One problem reported by [`diagnose_program`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    pub error: MalformedLiteralError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Body(usize),
    Tag,
    Placeholder(usize),
    Callee,
    Argument(usize),
    Object,
    Element(usize),
}

/// Breadcrumbs from the program root to the node being visited.
#[derive(Debug, Default)]
struct NodePath {
    steps: Vec<Step>,
}

impl NodePath {
    fn within<T>(&mut self, step: Step, f: impl FnOnce(&mut Self) -> T) -> T {
        self.steps.push(step);
        let result = f(self);
        self.steps.pop();
        result
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "<root>");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match step {
                Step::Body(n) => write!(f, "body[{}]", n)?,
                Step::Tag => write!(f, "tag")?,
                Step::Placeholder(n) => write!(f, "placeholders[{}]", n)?,
                Step::Callee => write!(f, "callee")?,
                Step::Argument(n) => write!(f, "arguments[{}]", n)?,
                Step::Object => write!(f, "object")?,
                Step::Element(n) => write!(f, "elements[{}]", n)?,
            }
        }
        Ok(())
    }
}

/// Rewrite every over-delimited literal in a program.
pub fn rewrite_program(mut program: Program) -> Result<Program, RewriteError> {
    let mut path = NodePath::default();
    for (index, expr) in program.body.iter_mut().enumerate() {
        path.within(Step::Body(index), |path| rewrite_in_place(expr, path))?;
    }
    Ok(program)
}

/// Rewrite every over-delimited literal in and under one expression.
pub fn rewrite_expression(mut expr: Expression) -> Result<Expression, RewriteError> {
    rewrite_in_place(&mut expr, &mut NodePath::default())?;
    Ok(expr)
}

/// Replacement for a resolved layer, if it is an over-delimited literal.
fn replacement_for(
    resolution: Resolution<'_>,
) -> Option<Result<Expression, MalformedLiteralError>> {
    match resolution {
        Resolution::Matched { tag, literal, .. } => Some(normalize(literal).map(|literal| {
            match tag {
                Some(tag) => Expression::tagged(tag.clone(), literal),
                None => Expression::TemplateLiteral(literal),
            }
        })),
        Resolution::NoMatch => None,
    }
}

fn rewrite_in_place(expr: &mut Expression, path: &mut NodePath) -> Result<(), RewriteError> {
    let stop = match &*expr {
        Expression::TaggedTemplate(node) => {
            let stop = resolve_spine(node);
            Some((stop.offset, replacement_for(stop.resolution)))
        }
        _ => None,
    };
    let Some((offset, replacement)) = stop else {
        return rewrite_children(expr, path);
    };

    let depth = path.steps.len();
    let mut target = expr;
    for _ in 0..offset {
        match target {
            Expression::TaggedTemplate(layer) => {
                path.steps.push(Step::Tag);
                target = layer.tag.as_mut();
            }
            _ => break,
        }
    }

    let result = match replacement {
        Some(Ok(replacement)) => {
            *target = replacement;
            rewrite_children(target, path)
        }
        Some(Err(source)) => Err(RewriteError {
            path: path.to_string(),
            source,
        }),
        None => rewrite_children(target, path),
    };
    path.steps.truncate(depth);
    result
}

fn rewrite_children(expr: &mut Expression, path: &mut NodePath) -> Result<(), RewriteError> {
    match expr {
        Expression::Identifier { .. } | Expression::StringLiteral { .. } => Ok(()),
        Expression::TemplateLiteral(literal) => {
            for (index, placeholder) in literal.placeholders_mut().iter_mut().enumerate() {
                path.within(Step::Placeholder(index), |path| {
                    rewrite_in_place(placeholder, path)
                })?;
            }
            Ok(())
        }
        Expression::TaggedTemplate(node) => {
            path.within(Step::Tag, |path| rewrite_in_place(&mut node.tag, path))?;
            for (index, placeholder) in node.literal.placeholders_mut().iter_mut().enumerate() {
                path.within(Step::Placeholder(index), |path| {
                    rewrite_in_place(placeholder, path)
                })?;
            }
            Ok(())
        }
        Expression::Call { callee, arguments } => {
            path.within(Step::Callee, |path| rewrite_in_place(callee, path))?;
            for (index, argument) in arguments.iter_mut().enumerate() {
                path.within(Step::Argument(index), |path| rewrite_in_place(argument, path))?;
            }
            Ok(())
        }
        Expression::Member { object, .. } => {
            path.within(Step::Object, |path| rewrite_in_place(object, path))
        }
        Expression::Array { elements } => {
            for (index, element) in elements.iter_mut().enumerate() {
                path.within(Step::Element(index), |path| rewrite_in_place(element, path))?;
            }
            Ok(())
        }
    }
}

/// Report every malformed over-delimited literal in a program.
///
/// Visits the same nodes [`rewrite_program`] would: for a matched chain, the recovered tag
/// and the payload's placeholders; for anything else, its ordinary children.
pub fn diagnose_program(program: &Program) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut path = NodePath::default();
    for (index, expr) in program.body.iter().enumerate() {
        path.within(Step::Body(index), |path| {
            diagnose(expr, path, &mut diagnostics)
        });
    }
    diagnostics
}

fn diagnose(expr: &Expression, path: &mut NodePath, diagnostics: &mut Vec<Diagnostic>) {
    match expr {
        Expression::Identifier { .. } | Expression::StringLiteral { .. } => {}
        Expression::TemplateLiteral(literal) => {
            for (index, placeholder) in literal.placeholders().iter().enumerate() {
                path.within(Step::Placeholder(index), |path| {
                    diagnose(placeholder, path, diagnostics)
                });
            }
        }
        Expression::TaggedTemplate(node) => {
            let stop = resolve_spine(node);
            let depth = path.steps.len();
            path.steps.extend(std::iter::repeat(Step::Tag).take(stop.offset));
            let (tag, literal) = match stop.resolution {
                Resolution::Matched { tag, literal, .. } => {
                    if let Err(error) = normalize(literal) {
                        diagnostics.push(Diagnostic {
                            path: path.to_string(),
                            error,
                        });
                    }
                    (tag, literal)
                }
                Resolution::NoMatch => (Some(stop.node.tag.as_ref()), &stop.node.literal),
            };
            if let Some(tag) = tag {
                path.within(Step::Tag, |path| diagnose(tag, path, diagnostics));
            }
            for (index, placeholder) in literal.placeholders().iter().enumerate() {
                path.within(Step::Placeholder(index), |path| {
                    diagnose(placeholder, path, diagnostics)
                });
            }
            path.steps.truncate(depth);
        }
        Expression::Call { callee, arguments } => {
            path.within(Step::Callee, |path| diagnose(callee, path, diagnostics));
            for (index, argument) in arguments.iter().enumerate() {
                path.within(Step::Argument(index), |path| {
                    diagnose(argument, path, diagnostics)
                });
            }
        }
        Expression::Member { object, .. } => {
            path.within(Step::Object, |path| diagnose(object, path, diagnostics));
        }
        Expression::Array { elements } => {
            for (index, element) in elements.iter().enumerate() {
                path.within(Step::Element(index), |path| {
                    diagnose(element, path, diagnostics)
                });
            }
        }
    }
}
