//! Testing utilities
//!
//!     Hosts never show us source text, only the node chains their parser built from it. Tests
//!     that hand-assemble those chains tend to get the nesting slightly wrong, and a chain
//!     that is off by one layer silently turns into a "no match" case. So tests build chains
//!     through [over_delimited] and [over_delimited_tagged], which produce exactly what a
//!     single-delimiter parser emits for a given delimiter run, and read results back with
//!     [render], which prints nodes in delimiter notation.
//!
//!     ~~~rust,ignore
//!     let chain = over_delimited(3, TemplateLiteral::from_text("\n  body\n"));
//!     assert_eq!(render(&chain), "```\n  body\n```");
//!     ~~~

use crate::multitick::ast::{Expression, TemplateLiteral};

/// The chain a parser builds for `literal` opened and closed by `delimiters` delimiters.
///
/// `delimiters` must be odd and at least three: the host grammar pairs delimiters up, so an
/// even run never reaches us as a single literal.
pub fn over_delimited(delimiters: usize, literal: TemplateLiteral) -> Expression {
    build_chain(None, delimiters, literal)
}

/// Same as [over_delimited], with `tag` written directly in front of the opening run.
pub fn over_delimited_tagged(
    tag: Expression,
    delimiters: usize,
    literal: TemplateLiteral,
) -> Expression {
    build_chain(Some(tag), delimiters, literal)
}

fn build_chain(tag: Option<Expression>, delimiters: usize, literal: TemplateLiteral) -> Expression {
    assert!(
        delimiters >= 3 && delimiters % 2 == 1,
        "over-delimited literals use an odd run of at least three delimiters, got {}",
        delimiters
    );
    let pairs = delimiters / 2;

    // opening side: the first pair closes against itself, each further pair is tagged by
    // everything before it
    let mut chain = match tag {
        Some(tag) => Expression::tagged(tag, TemplateLiteral::trivial()),
        None => Expression::TemplateLiteral(TemplateLiteral::trivial()),
    };
    for _ in 1..pairs {
        chain = Expression::tagged(chain, TemplateLiteral::trivial());
    }

    chain = Expression::tagged(chain, literal);

    // closing side
    for _ in 0..pairs {
        chain = Expression::tagged(chain, TemplateLiteral::trivial());
    }
    chain
}

/// Print an expression the way it would be written with a backtick delimiter.
///
/// Literals show their raw text, so a chain renders back to its over-delimited source form.
pub fn render(expr: &Expression) -> String {
    let mut out = String::new();
    render_into(expr, &mut out);
    out
}

fn render_into(expr: &Expression, out: &mut String) {
    match expr {
        Expression::Identifier { name } => out.push_str(name),
        Expression::StringLiteral { value } => out.push_str(&format!("{:?}", value)),
        Expression::TemplateLiteral(literal) => render_literal(literal, out),
        Expression::TaggedTemplate(node) => {
            render_into(&node.tag, out);
            render_literal(&node.literal, out);
        }
        Expression::Call { callee, arguments } => {
            render_into(callee, out);
            out.push('(');
            render_list(arguments, out);
            out.push(')');
        }
        Expression::Member { object, property } => {
            render_into(object, out);
            out.push('.');
            out.push_str(property);
        }
        Expression::Array { elements } => {
            out.push('[');
            render_list(elements, out);
            out.push(']');
        }
    }
}

fn render_list(items: &[Expression], out: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render_into(item, out);
    }
}

fn render_literal(literal: &TemplateLiteral, out: &mut String) {
    out.push('`');
    for (i, segment) in literal.segments().iter().enumerate() {
        if i > 0 {
            out.push_str("${");
            render_into(&literal.placeholders()[i - 1], out);
            out.push('}');
        }
        out.push_str(&segment.raw);
    }
    out.push('`');
}
