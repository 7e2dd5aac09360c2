//! Transform pipeline infrastructure
//!
//! Each processing step of the rewrite is a stage implementing [`Runnable`]. Stages are
//! chained into a [`Transform`] with `.then()`, and the compiler checks that each stage's
//! output feeds the next stage's input:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(ParseProgram::new(SourceFormat::Json))   // String  → Program
//!     .then(RewriteProgram::new());                  // Program → Program
//! ```
//!
//! Common pipelines are pre-built as `once_cell::sync::Lazy` statics in [`standard`].
//!
//! - [`stages`]: individual stages (chain resolution, margin normalization, whole-program
//!   rewriting, parsing and serializing programs)
//! - [`standard`]: the pre-built combinations used by the loader and the CLI

pub mod stages;
pub mod standard;

use thiserror::Error;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Stage failed with specific error
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },
}

impl TransformError {
    pub fn stage(stage: &str, error: impl std::fmt::Display) -> Self {
        TransformError::StageFailed {
            stage: stage.to_string(),
            message: error.to_string(),
        }
    }
}

/// Trait for anything that can transform an input to an output
///
/// This is implemented by individual transformation stages.
/// The `Transform` struct composes multiple `Runnable` implementations.
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform, returning a transform with the stage's output
    /// type.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a pre-built transform after this one.
    ///
    /// The referenced transform must have a static lifetime (typically one of the
    /// [`standard`] statics).
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

// Transforms can be used as stages of other transforms
impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multitick::ast::{Expression, Program, TemplateLiteral};
    use crate::multitick::testing::over_delimited;
    use crate::multitick::transforms::stages::{NormalizeMargins, RewriteProgram};

    struct CountBody;
    impl Runnable<Program, usize> for CountBody {
        fn run(&self, input: Program) -> Result<usize, TransformError> {
            Ok(input.body.len())
        }
    }

    struct FailingStage;
    impl Runnable<Program, Program> for FailingStage {
        fn run(&self, _input: Program) -> Result<Program, TransformError> {
            Err(TransformError::stage("FailingStage", "intentional failure"))
        }
    }

    fn program() -> Program {
        Program::new(vec![over_delimited(
            3,
            TemplateLiteral::from_text("\n  a\n"),
        )])
    }

    #[test]
    fn test_transform_from_fn() {
        let transform = Transform::from_fn(|p: Program| Ok(p.body.len()));
        assert_eq!(transform.run(program()).unwrap(), 1);
    }

    #[test]
    fn test_single_stage() {
        let transform = Transform::from_fn(Ok).then(RewriteProgram::new());
        let rewritten = transform.run(program()).unwrap();
        assert_eq!(rewritten.body[0], TemplateLiteral::from_text("a").into());
    }

    #[test]
    fn test_type_changing_stage() {
        let transform = Transform::from_fn(Ok)
            .then(RewriteProgram::new())
            .then(CountBody);
        assert_eq!(transform.run(program()).unwrap(), 1);
    }

    #[test]
    fn test_error_propagation() {
        let transform = Transform::from_fn(Ok)
            .then(FailingStage)
            .then(RewriteProgram::new());
        assert_eq!(
            transform.run(program()).unwrap_err(),
            TransformError::StageFailed {
                stage: "FailingStage".to_string(),
                message: "intentional failure".to_string(),
            }
        );
    }

    #[test]
    fn test_stage_failure_is_labelled() {
        let transform = Transform::from_fn(Ok).then(NormalizeMargins::new());
        let err = transform
            .run(TemplateLiteral::from_text("flush"))
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::StageFailed {
                stage: "NormalizeMargins".to_string(),
                message: "over-delimited literals must start with a newline".to_string(),
            }
        );
    }

    #[test]
    fn test_transform_as_stage() {
        let inner = Transform::from_fn(Ok).then(RewriteProgram::new());
        let outer = Transform::from_fn(Ok).then(inner).then(CountBody);
        assert_eq!(outer.run(Program::new(vec![Expression::identifier("x")])).unwrap(), 1);
    }

    #[test]
    fn test_error_display() {
        let stage_err = TransformError::StageFailed {
            stage: "ParseProgram".to_string(),
            message: "invalid type".to_string(),
        };
        assert_eq!(
            format!("{}", stage_err),
            "Stage 'ParseProgram' failed: invalid type"
        );
    }
}
