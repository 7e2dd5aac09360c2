//! Chain Resolver
//!
//! A host grammar with a single-character delimiter reads an over-delimited literal as a
//! chain of tagged nodes. For three delimiters around `body`:
//!
//! ~~~text
//! ``` body ```   parses as   Tagged(Tagged(Literal(""), `body`), ``)
//! ~~~
//!
//! Every extra delimiter pair adds one trivially-tagged layer on each side. The closing
//! side shows up as trivial literals wrapping the payload (the *tail*); the opening side
//! shows up as trivial layers inside the payload node's tag. [`resolve`] unwinds the tail,
//! then checks that the opening side has exactly as many layers, and hands back the real
//! tag (if any) and the payload literal.
//!
//! Both walks are loops with explicit depth counters, so pathological delimiter runs do not
//! grow the stack.

use crate::multitick::ast::{Expression, TaggedTemplate, TemplateLiteral};

/// Outcome of resolving one tagged node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The node is an over-delimited literal.
    Matched {
        /// The prefix expression, absent when the delimiter run had no tag in front of it.
        tag: Option<&'a Expression>,
        /// The literal between the delimiter runs.
        literal: &'a TemplateLiteral,
        /// Number of trivial layers unwound from the closing side.
        depth: usize,
    },
    /// An ordinary literal, or a chain whose two sides do not mirror each other.
    NoMatch,
}

impl<'a> Resolution<'a> {
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Matched { .. })
    }
}

/// Recover the real tag and literal from a possibly over-delimited tagged node.
pub fn resolve(node: &TaggedTemplate) -> Resolution<'_> {
    let (payload_node, tail_length) = unwind_tail(node);
    if tail_length == 0 {
        return Resolution::NoMatch;
    }

    match balance(&payload_node.tag, tail_length - 1) {
        Some(tag) => {
            tracing::debug!(
                depth = tail_length,
                tagged = tag.is_some(),
                "resolved over-delimited literal"
            );
            Resolution::Matched {
                tag,
                literal: &payload_node.literal,
                depth: tail_length,
            }
        }
        None => {
            tracing::trace!(depth = tail_length, "delimiter chain does not balance");
            Resolution::NoMatch
        }
    }
}

/// Descend through trivially-tagged layers on the closing side.
///
/// Returns the node whose literal is the payload and the number of layers passed.
fn unwind_tail(node: &TaggedTemplate) -> (&TaggedTemplate, usize) {
    let mut current = node;
    let mut depth = 0;
    while current.literal.is_trivial() {
        match current.tag.as_ref() {
            Expression::TaggedTemplate(inner) => {
                current = inner;
                depth += 1;
            }
            _ => break,
        }
    }
    (current, depth)
}

/// Match `steps` trivial layers on the opening side, then the terminal padding.
///
/// `None` means the chain is asymmetric. `Some(None)` is a balanced chain with no tag;
/// `Some(Some(tag))` is a balanced chain whose innermost layer carried `tag`.
fn balance(start: &Expression, steps: usize) -> Option<Option<&Expression>> {
    let mut stack = start;
    for _ in 0..steps {
        match stack {
            Expression::TaggedTemplate(layer) if layer.literal.is_trivial() => {
                stack = &layer.tag;
            }
            _ => return None,
        }
    }
    terminal(stack)
}

fn terminal(stack: &Expression) -> Option<Option<&Expression>> {
    match stack {
        Expression::TemplateLiteral(literal) if literal.is_trivial() => Some(None),
        Expression::TaggedTemplate(layer) if layer.literal.is_trivial() => {
            let tag = layer.tag.as_ref();
            // padding left over past the innermost layer means more delimiters opened
            // than closed
            if tag.is_trivial_literal() || tag.is_trivially_tagged() || closes_under_padding(tag) {
                None
            } else {
                Some(Some(tag))
            }
        }
        _ => None,
    }
}

/// Whether `tag` followed by an empty literal would itself resolve.
///
/// Such a tag ends in an unclosed delimiter run of its own, so emitting it in front of the
/// rewritten literal would hand the next pass a different chain.
fn closes_under_padding(tag: &Expression) -> bool {
    let Expression::TaggedTemplate(node) = tag else {
        return false;
    };
    let (payload_node, tail_length) = unwind_tail(node);
    balance(&payload_node.tag, tail_length).is_some()
}

/// Where [`resolve_spine`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpineStop<'a> {
    /// Closing-side layers descended from the starting node.
    pub offset: usize,
    /// The layer at `offset`.
    pub node: &'a TaggedTemplate,
    /// What [`resolve`] reports for `node`.
    pub resolution: Resolution<'a>,
}

/// Resolve a node and every closing-side layer beneath it in one walk.
///
/// Stops at the outermost layer that matches. When none does, stops at the payload node,
/// which never matches on its own. Layers passed over carry empty literals, so they have
/// no children besides the next layer.
pub fn resolve_spine(node: &TaggedTemplate) -> SpineStop<'_> {
    let (payload_node, tail_length) = unwind_tail(node);

    let mut opening = Vec::new();
    if tail_length > 0 {
        let mut stack = payload_node.tag.as_ref();
        loop {
            opening.push(stack);
            if opening.len() == tail_length {
                break;
            }
            match stack {
                Expression::TaggedTemplate(layer) if layer.literal.is_trivial() => {
                    stack = &layer.tag;
                }
                _ => break,
            }
        }
    }

    // the layer `offset` below `node` balances `tail_length - offset - 1` opening layers
    for (steps, stack) in opening.into_iter().enumerate().rev() {
        if let Some(tag) = terminal(stack) {
            let depth = steps + 1;
            let offset = tail_length - depth;
            tracing::debug!(depth, offset, "resolved over-delimited literal on spine");
            return SpineStop {
                offset,
                node: layer_below(node, offset),
                resolution: Resolution::Matched {
                    tag,
                    literal: &payload_node.literal,
                    depth,
                },
            };
        }
    }

    SpineStop {
        offset: tail_length,
        node: payload_node,
        resolution: Resolution::NoMatch,
    }
}

fn layer_below(node: &TaggedTemplate, offset: usize) -> &TaggedTemplate {
    let mut current = node;
    for _ in 0..offset {
        match current.tag.as_ref() {
            Expression::TaggedTemplate(inner) => current = inner,
            _ => break,
        }
    }
    current
}
