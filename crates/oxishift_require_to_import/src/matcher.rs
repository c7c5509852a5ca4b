use log::trace;
use oxc_ast::ast::Expression;

/// Result of recognizing a require-derived expression.
///
/// `Unsupported` means the expression *is* a call of `require`, but not one
/// that can be rewritten (wrong arity, or a specifier that is not a string
/// literal). Callers must treat it as a hard stop, not as "not a require".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequireMatch {
    Module { specifier: String, member: Option<String> },
    Unsupported,
}

/// Recognize `require('m')` or `require('m').member`, or a require call that
/// is almost one of those shapes.
///
/// Returns `None` for anything else, including member chains more than one
/// level deep: the accessed object must be the require call itself. This is
/// the single source of truth for "is this a require" used by every rewrite
/// rule.
pub fn extract_require(expression: &Expression<'_>) -> Option<RequireMatch> {
    match unwrap_parens(expression) {
        Expression::CallExpression(call) => {
            let Expression::Identifier(callee) = unwrap_parens(&call.callee) else {
                return None;
            };
            if callee.name != "require" {
                return None;
            }

            if call.arguments.len() != 1 {
                return Some(RequireMatch::Unsupported);
            }
            match call.arguments[0].as_expression().map(unwrap_parens) {
                Some(Expression::StringLiteral(lit)) => {
                    trace!("Matched require('{}')", lit.value);
                    Some(RequireMatch::Module { specifier: lit.value.to_string(), member: None })
                }
                _ => Some(RequireMatch::Unsupported),
            }
        }
        Expression::StaticMemberExpression(member) => {
            // One level only: the accessed object must be the call itself,
            // not a further member access.
            if !matches!(unwrap_parens(&member.object), Expression::CallExpression(_)) {
                return None;
            }

            match extract_require(&member.object)? {
                RequireMatch::Module { specifier, .. } => Some(RequireMatch::Module {
                    specifier,
                    member: Some(member.property.name.to_string()),
                }),
                RequireMatch::Unsupported => Some(RequireMatch::Unsupported),
            }
        }
        _ => None,
    }
}

fn unwrap_parens<'b, 'a>(mut expr: &'b Expression<'a>) -> &'b Expression<'a> {
    while let Expression::ParenthesizedExpression(p) = expr {
        expr = &p.expression;
    }
    expr
}
