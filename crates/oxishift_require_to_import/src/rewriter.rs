use log::trace;
use oxc_allocator::{Allocator, Box as ArenaBox, CloneIn, Vec as ArenaVec};
use oxc_ast::ast::*;
use oxc_ast_visit::Visit;
use oxc_span::{SPAN, Span};

use crate::matcher::{RequireMatch, extract_require};
use crate::types::TransformOptions;

/// One planned change, keyed by the span of the original statement.
pub(crate) enum PlannedChange<'a> {
    /// Replace the statement with freshly built statements.
    Replace(Span, ArenaVec<'a, Statement<'a>>),
    /// Leave the statement unchanged and flag it for manual conversion.
    Flag(Span),
}

/// Outcome of classifying one variable declaration statement.
enum DeclarationPlan<'a> {
    /// No declarator is require-initialized; not this codemod's business.
    NotApplicable,
    /// Every declarator handled; commit the replacement statements.
    Convert(ArenaVec<'a, Statement<'a>>),
    /// Some part of the statement cannot be rewritten safely. The whole
    /// statement stays untouched; proposed replacements are discarded.
    Bail,
}

/// Classify every top-level statement of `program` and build replacement
/// nodes for the convertible ones.
///
/// The parsed tree is never mutated: replacements are fresh nodes in the same
/// arena, and the caller decides how to apply them. Statements below module
/// top level are never rewritten (an import declaration is a static,
/// top-level-only construct; lifting a lazy require would change load order),
/// but nested require-initialized declarations are still located so they can
/// be flagged.
pub(crate) fn plan_program<'a>(
    allocator: &'a Allocator,
    program: &Program<'a>,
    options: &TransformOptions,
) -> Vec<PlannedChange<'a>> {
    let mut changes = Vec::new();

    for statement in &program.body {
        match plan_statement(allocator, statement, options) {
            Some(change) => changes.push(change),
            None => collect_nested_require_declarations(statement, &mut changes),
        }
    }

    changes
}

fn plan_statement<'a>(
    allocator: &'a Allocator,
    statement: &Statement<'a>,
    options: &TransformOptions,
) -> Option<PlannedChange<'a>> {
    match statement {
        Statement::ExpressionStatement(es) => {
            if !options.convert_bare_requires {
                return None;
            }
            match extract_require(&es.expression)? {
                RequireMatch::Module { specifier, .. } => {
                    trace!("Converting bare require('{}')", specifier);
                    let mut body = ArenaVec::new_in(allocator);
                    body.push(import_statement(allocator, None, &specifier));
                    Some(PlannedChange::Replace(es.span, body))
                }
                // No binding is at risk, so an unconvertible bare require is
                // left alone without a marker.
                RequireMatch::Unsupported => None,
            }
        }
        Statement::VariableDeclaration(declaration) => {
            match plan_variable_declaration(allocator, declaration) {
                DeclarationPlan::NotApplicable => None,
                DeclarationPlan::Convert(body) => {
                    Some(PlannedChange::Replace(declaration.span, body))
                }
                DeclarationPlan::Bail => Some(PlannedChange::Flag(declaration.span)),
            }
        }
        _ => None,
    }
}

/// Per-declarator processing. Every declarator is visited even once a bail
/// has been seen; the buffered replacements are only committed when none of
/// them bailed, so a statement is converted in full or not at all.
fn plan_variable_declaration<'a>(
    allocator: &'a Allocator,
    declaration: &VariableDeclaration<'a>,
) -> DeclarationPlan<'a> {
    // `using`/`await using` bindings carry disposal semantics an import
    // cannot express.
    let supported_kind = matches!(
        declaration.kind,
        VariableDeclarationKind::Var
            | VariableDeclarationKind::Let
            | VariableDeclarationKind::Const
    );

    let mut matched_any = false;
    let mut bail = false;
    let mut replacements = ArenaVec::new_in(allocator);

    for declarator in &declaration.declarations {
        let matched = declarator.init.as_ref().and_then(|init| extract_require(init));

        let Some(matched) = matched else {
            // Not require-derived: keep it as a standalone declaration of the
            // original kind. This is what splits mixed statements like
            // `const a = require('x'), b = 5;` apart.
            replacements.push(standalone_declaration(allocator, declaration, declarator));
            continue;
        };

        matched_any = true;

        match matched {
            RequireMatch::Unsupported => bail = true,
            RequireMatch::Module { specifier, member } => {
                if !supported_kind {
                    bail = true;
                    continue;
                }
                let member = member.as_deref();
                match import_for_binding(allocator, &declarator.id, &specifier, member) {
                    Some(import) => replacements.push(import),
                    None => bail = true,
                }
            }
        }
    }

    if !matched_any {
        return DeclarationPlan::NotApplicable;
    }
    if bail {
        trace!("Bailing on declaration at {:?}", declaration.span);
        return DeclarationPlan::Bail;
    }
    DeclarationPlan::Convert(replacements)
}

/// Build the import declaration for one declarator, or `None` when the
/// binding shape cannot be expressed as import specifiers.
fn import_for_binding<'a>(
    allocator: &'a Allocator,
    id: &BindingPattern<'a>,
    specifier: &str,
    member: Option<&str>,
) -> Option<Statement<'a>> {
    let mut specifiers = ArenaVec::new_in(allocator);

    match &id.kind {
        BindingPatternKind::BindingIdentifier(local) => {
            let local = local.name.as_str();
            match member {
                // const x = require('m').y  ->  import { y as x } from 'm'
                Some(member) => specifiers.push(named_specifier(allocator, member, local)),
                // const x = require('m')  ->  import x from 'm'
                None => specifiers.push(default_specifier(allocator, local)),
            }
        }
        BindingPatternKind::ObjectPattern(pattern) => {
            // A member access to the right of a destructuring pattern would
            // be silently dropped by specifier expansion; refuse instead.
            if member.is_some() || pattern.rest.is_some() {
                return None;
            }
            for property in &pattern.properties {
                let PropertyKey::StaticIdentifier(key) = &property.key else {
                    return None;
                };
                let BindingPatternKind::BindingIdentifier(local) = &property.value.kind else {
                    return None;
                };
                let (imported, local) = (key.name.as_str(), local.name.as_str());
                specifiers.push(named_specifier(allocator, imported, local));
            }
        }
        _ => return None,
    }

    Some(import_statement(allocator, Some(specifiers), specifier))
}

/// A declarator carried over unchanged, as its own declaration.
fn standalone_declaration<'a>(
    allocator: &'a Allocator,
    declaration: &VariableDeclaration<'a>,
    declarator: &VariableDeclarator<'a>,
) -> Statement<'a> {
    let mut declarations = ArenaVec::new_in(allocator);
    declarations.push(declarator.clone_in(allocator));
    Statement::VariableDeclaration(ArenaBox::new_in(
        VariableDeclaration {
            span: SPAN,
            kind: declaration.kind,
            declarations,
            declare: declaration.declare,
        },
        allocator,
    ))
}

pub(crate) fn import_statement<'a>(
    allocator: &'a Allocator,
    specifiers: Option<ArenaVec<'a, ImportDeclarationSpecifier<'a>>>,
    module_specifier: &str,
) -> Statement<'a> {
    Statement::ImportDeclaration(ArenaBox::new_in(
        ImportDeclaration {
            span: SPAN,
            specifiers,
            source: StringLiteral {
                span: SPAN,
                value: allocator.alloc_str(module_specifier).into(),
                raw: None,
                lone_surrogates: false,
            },
            phase: None,
            with_clause: None,
            import_kind: ImportOrExportKind::Value,
        },
        allocator,
    ))
}

fn named_specifier<'a>(
    allocator: &'a Allocator,
    imported: &str,
    local: &str,
) -> ImportDeclarationSpecifier<'a> {
    ImportDeclarationSpecifier::ImportSpecifier(ArenaBox::new_in(
        ImportSpecifier {
            span: SPAN,
            imported: ModuleExportName::IdentifierName(IdentifierName {
                span: SPAN,
                name: allocator.alloc_str(imported).into(),
            }),
            local: binding_identifier(allocator, local),
            import_kind: ImportOrExportKind::Value,
        },
        allocator,
    ))
}

fn default_specifier<'a>(allocator: &'a Allocator, local: &str) -> ImportDeclarationSpecifier<'a> {
    ImportDeclarationSpecifier::ImportDefaultSpecifier(ArenaBox::new_in(
        ImportDefaultSpecifier { span: SPAN, local: binding_identifier(allocator, local) },
        allocator,
    ))
}

fn binding_identifier<'a>(allocator: &'a Allocator, name: &str) -> BindingIdentifier<'a> {
    BindingIdentifier {
        span: SPAN,
        name: allocator.alloc_str(name).into(),
        symbol_id: Default::default(),
    }
}

/// Flag require-initialized variable declarations nested below module top
/// level. Runs on every top-level statement the rewrite rules did not claim;
/// a declaration the rules already classified never reaches this scan.
fn collect_nested_require_declarations<'a>(
    statement: &Statement<'a>,
    changes: &mut Vec<PlannedChange<'a>>,
) {
    struct NestedRequireScan<'c, 'a> {
        changes: &'c mut Vec<PlannedChange<'a>>,
    }

    impl<'c, 'a> Visit<'a> for NestedRequireScan<'c, 'a> {
        fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration<'a>) {
            let has_require = declaration
                .declarations
                .iter()
                .any(|d| d.init.as_ref().is_some_and(|init| extract_require(init).is_some()));
            if has_require {
                trace!("Flagging nested require declaration at {:?}", declaration.span);
                self.changes.push(PlannedChange::Flag(declaration.span));
            }
            oxc_ast_visit::walk::walk_variable_declaration(self, declaration);
        }
    }

    let mut scan = NestedRequireScan { changes };
    scan.visit_statement(statement);
}
