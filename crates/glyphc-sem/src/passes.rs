//! The three fixed-order semantic passes: scope, symbol, type.
//!
//! The order is load-bearing and never varies. Scope assignment (BF) runs
//! first so every node knows which scope it belongs to; symbol resolution
//! (BF, with function names hoisted ahead of any body) runs second so
//! every reference node knows which declaration it names; type resolution
//! (DFPO, bottom-up) runs last since a node's type is a function of its
//! already-resolved children and symbols.

use std::collections::{HashSet, VecDeque};

use glyphc_par::ast;
use glyphc_util::{DiagnosticBuilder, DiagnosticCode, Handler};

use crate::node::{self, Ast, NodeId, NodeKind};
use crate::scope::{ScopeKind, ScopeTable, SymbolKind};
use crate::types::{FunctionSignature, Type, TypeRegistry, TypeTrait};

/// Runs lowering and all three passes in order. Returns `None` (after
/// reporting through `handler`) as soon as a pass leaves errors behind;
/// later passes assume everything before them succeeded, so there is no
/// value in running them over a tree with unresolved scopes or symbols.
pub fn analyze(
    program: &ast::Program,
    handler: &mut Handler,
) -> Option<(Ast, ScopeTable, TypeRegistry)> {
    let ast = node::lower_program(program, handler);
    if handler.has_errors() {
        return None;
    }

    let mut scopes = ScopeTable::new();
    scope_pass(&ast, &mut scopes);

    symbol_pass(&ast, &mut scopes, handler);
    if handler.has_errors() {
        return None;
    }

    type_pass(&ast, &scopes, handler);
    if handler.has_errors() {
        return None;
    }

    let mut registry = TypeRegistry::new();
    populate_registry(&ast, &scopes, &mut registry);
    Some((ast, scopes, registry))
}

fn symbol_error(handler: &mut Handler, span: glyphc_util::Span, message: String) {
    DiagnosticBuilder::error(message)
        .code(DiagnosticCode::E_SEMANTIC_UNDEFINED_VAR)
        .span(span)
        .emit(handler);
}

fn type_error(handler: &mut Handler, span: glyphc_util::Span, message: String) {
    DiagnosticBuilder::error(message)
        .code(DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH)
        .span(span)
        .emit(handler);
}

fn range_error(handler: &mut Handler, span: glyphc_util::Span, message: String) {
    DiagnosticBuilder::error(message).span(span).emit(handler);
}

fn scope_kind_for(ast: &Ast, id: NodeId) -> ScopeKind {
    match ast.kind(id) {
        NodeKind::Function { name, .. } => ScopeKind::Function(*name),
        NodeKind::Block { .. } => ScopeKind::Block,
        NodeKind::For { .. } => ScopeKind::For,
        NodeKind::While { .. } => ScopeKind::While,
        other => unreachable!("{:?} is not a scope owner", other),
    }
}

/// Breadth-first: assigns every node the [`crate::scope::ScopeId`] it
/// belongs to. A scope-owning node gets a freshly opened child scope of
/// its enclosing scope; every other node simply inherits its parent's.
pub fn scope_pass(ast: &Ast, scopes: &mut ScopeTable) {
    let mut queue: VecDeque<(NodeId, crate::scope::ScopeId)> = VecDeque::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    for &func in &ast.functions {
        queue.push_back((func, scopes.root()));
    }
    while let Some((id, enclosing)) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        let node = ast.get(id);
        let this_scope = if node::is_scope_owner(&node.kind) {
            let kind = scope_kind_for(ast, id);
            let s = scopes.enter(enclosing, kind);
            node.scope.set(Some(s));
            s
        } else {
            node.scope.set(Some(enclosing));
            enclosing
        };
        for child in ast.children(id) {
            queue.push_back((child, this_scope));
        }
    }
}

/// Breadth-first: declares every symbol and resolves every reference.
/// Function names are declared before the walk proper begins so a
/// function may call another declared later in the source, or itself.
pub fn symbol_pass(ast: &Ast, scopes: &mut ScopeTable, handler: &mut Handler) {
    for &func in &ast.functions {
        let node = ast.get(func);
        if let NodeKind::Function { name, .. } = &node.kind {
            let root = scopes.root();
            if scopes.declare(root, *name, SymbolKind::Function).is_err() {
                symbol_error(handler, node.span, format!("duplicate function `{}`", name.as_str()));
            }
        }
    }

    let mut queue: VecDeque<NodeId> = ast.functions.iter().copied().collect();
    let mut visited: HashSet<NodeId> = HashSet::new();
    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        let node = ast.get(id);
        match &node.kind {
            NodeKind::Function { params, body, .. } => {
                let fn_scope = node.scope.get().expect("scope pass must run first");
                for (pname, _ty) in params {
                    if scopes.exists_on_same_scope(fn_scope, *pname) {
                        symbol_error(
                            handler,
                            node.span,
                            format!("duplicate parameter `{}`", pname.as_str()),
                        );
                    } else {
                        scopes.declare(fn_scope, *pname, SymbolKind::FunctionArgument).ok();
                    }
                }
                queue.push_back(*body);
            },
            NodeKind::Let { name, init } => {
                let scope = node.scope.get().expect("scope pass must run first");
                if scopes.exists_on_same_scope(scope, *name) {
                    symbol_error(handler, node.span, format!("duplicate variable `{}`", name.as_str()));
                } else if let Ok(sid) = scopes.declare(scope, *name, SymbolKind::LocalVariable) {
                    node.symbol.set(Some(sid));
                }
                queue.push_back(*init);
            },
            NodeKind::Ident(name) => {
                let scope = node.scope.get().expect("scope pass must run first");
                match scopes.find(scope, *name) {
                    Some(sid) => node.symbol.set(Some(sid)),
                    None => symbol_error(handler, node.span, format!("undefined name `{}`", name.as_str())),
                }
            },
            _ => {
                for child in ast.children(id) {
                    queue.push_back(child);
                }
            },
        }
    }
}

/// Depth-first post-order, one function at a time: computes the type of
/// every typed node, tracks the function's inferred (or declared) return
/// type, and records it on the function's own symbol.
pub fn type_pass(ast: &Ast, scopes: &ScopeTable, handler: &mut Handler) {
    for &func in &ast.functions {
        type_check_function(ast, scopes, func, handler);
    }
}

fn type_check_function(ast: &Ast, scopes: &ScopeTable, func_id: NodeId, handler: &mut Handler) {
    let node = ast.get(func_id);
    let (name, params, declared_ret, body) = match &node.kind {
        NodeKind::Function {
            name,
            params,
            ret_type,
            body,
        } => (*name, params.clone(), ret_type.clone(), *body),
        _ => unreachable!(),
    };

    let fn_scope = node.scope.get().expect("scope pass must run first");
    for (pname, ty) in &params {
        if let Some(sid) = scopes.find(fn_scope, *pname) {
            scopes.set_symbol_type(sid, ty.clone());
        }
    }

    let mut ret_acc: Option<Type> = None;
    check_stmt(ast, scopes, body, &mut ret_acc, declared_ret.as_ref(), handler);

    let ret_ty = declared_ret.clone().or(ret_acc).unwrap_or(Type::Void);
    if let Some(sid) = scopes.find(scopes.root(), name) {
        scopes.set_symbol_type(
            sid,
            Type::Function(FunctionSignature {
                params: params.iter().map(|(_, t)| t.clone()).collect(),
                ret: Box::new(ret_ty.clone()),
            }),
        );
    }
    *node.ty.borrow_mut() = Some(Type::Function(FunctionSignature {
        params: params.into_iter().map(|(_, t)| t).collect(),
        ret: Box::new(ret_ty),
    }));
}

fn check_stmt(
    ast: &Ast,
    scopes: &ScopeTable,
    id: NodeId,
    ret_acc: &mut Option<Type>,
    declared: Option<&Type>,
    handler: &mut Handler,
) -> bool {
    let node = ast.get(id);
    match &node.kind {
        NodeKind::Let { init, .. } => {
            let Some(ity) = check_expr(ast, scopes, *init, handler) else {
                return false;
            };
            if let Some(sid) = node.symbol.get() {
                scopes.set_symbol_type(sid, ity);
            }
            true
        },
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            let cok = check_condition(ast, scopes, *cond, handler);
            let tok = check_stmt(ast, scopes, *then_branch, ret_acc, declared, handler);
            let eok = else_branch
                .map(|e| check_stmt(ast, scopes, e, ret_acc, declared, handler))
                .unwrap_or(true);
            cok && tok && eok
        },
        NodeKind::For {
            init,
            cond,
            update,
            body,
        } => {
            let iok = init
                .map(|i| check_stmt(ast, scopes, i, ret_acc, declared, handler))
                .unwrap_or(true);
            let cok = check_condition(ast, scopes, *cond, handler);
            let uok = check_expr(ast, scopes, *update, handler).is_some();
            let bok = check_stmt(ast, scopes, *body, ret_acc, declared, handler);
            iok && cok && uok && bok
        },
        NodeKind::While { cond, body } => {
            let cok = check_condition(ast, scopes, *cond, handler);
            let bok = check_stmt(ast, scopes, *body, ret_acc, declared, handler);
            cok && bok
        },
        NodeKind::Block { stmts } => {
            let mut ok = true;
            for &s in stmts {
                ok &= check_stmt(ast, scopes, s, ret_acc, declared, handler);
            }
            ok
        },
        NodeKind::Return { value } => {
            let ty = match value {
                Some(v) => match check_expr(ast, scopes, *v, handler) {
                    Some(t) => t,
                    None => return false,
                },
                None => Type::Void,
            };
            if let Some(decl) = declared {
                if ty != *decl {
                    type_error(
                        handler,
                        node.span,
                        format!("function declared to return {:?}, found return of {:?}", decl, ty),
                    );
                    return false;
                }
            } else {
                match ret_acc {
                    None => *ret_acc = Some(ty),
                    Some(prev) if *prev == ty => {},
                    Some(prev) => {
                        type_error(
                            handler,
                            node.span,
                            format!("inconsistent return types: expected {:?}, found {:?}", prev, ty),
                        );
                        return false;
                    },
                }
            }
            true
        },
        NodeKind::Break | NodeKind::Continue => true,
        NodeKind::ExprStmt(e) => check_expr(ast, scopes, *e, handler).is_some(),
        _ => check_expr(ast, scopes, id, handler).is_some(),
    }
}

fn check_condition(ast: &Ast, scopes: &ScopeTable, id: NodeId, handler: &mut Handler) -> bool {
    match check_expr(ast, scopes, id, handler) {
        Some(Type::Boolean) => true,
        Some(other) => {
            type_error(handler, ast.get(id).span, format!("condition must be boolean, found {:?}", other));
            false
        },
        None => false,
    }
}

/// Is `id` a place that `++`, `--`, or assignment may write through?
/// Every local/argument is a mutable substance in Glyph (promoted on
/// declaration), so any identifier qualifies, as does indexing into one.
fn is_mutable_place(ast: &Ast, id: NodeId) -> bool {
    match ast.kind(id) {
        NodeKind::Ident(_) => true,
        NodeKind::Index { base, .. } => is_mutable_place(ast, *base),
        _ => false,
    }
}

fn check_expr(ast: &Ast, scopes: &ScopeTable, id: NodeId, handler: &mut Handler) -> Option<Type> {
    let node = ast.get(id);
    if let Some(ty) = node.ty.borrow().clone() {
        return Some(ty);
    }

    let ty = match &node.kind {
        NodeKind::Literal(lit) => Some(match lit {
            ast::Literal::Integer(_) => Type::Integer,
            ast::Literal::Double(_) => Type::Double,
            ast::Literal::Boolean(_) => Type::Boolean,
            ast::Literal::String(_) => Type::String,
        }),
        NodeKind::Ident(name) => match node.symbol.get() {
            Some(sid) => scopes.symbol_type(sid),
            None => {
                symbol_error(handler, node.span, format!("undefined name `{}`", name.as_str()));
                None
            },
        },
        NodeKind::Unary { op, operand } => {
            let oty = check_expr(ast, scopes, *operand, handler)?;
            if oty.has_trait(TypeTrait::Ordered) {
                Some(oty)
            } else {
                let symbol = match op {
                    ast::UnOp::Neg => "-",
                    ast::UnOp::Plus => "+",
                };
                type_error(handler, node.span, format!("`{}` requires an ordered type, found {:?}", symbol, oty));
                None
            }
        },
        NodeKind::Binary { op, left, right } => {
            let lty = check_expr(ast, scopes, *left, handler)?;
            let rty = check_expr(ast, scopes, *right, handler)?;
            check_binary(*op, &lty, &rty, node.span, handler)
        },
        NodeKind::PostIncrement(operand) | NodeKind::PostDecrement(operand) => {
            let oty = check_expr(ast, scopes, *operand, handler)?;
            if !is_mutable_place(ast, *operand) {
                type_error(handler, node.span, "`++`/`--` require a mutable variable".to_string());
                None
            } else if !oty.has_trait(TypeTrait::Field) {
                type_error(handler, node.span, format!("`++`/`--` require a field type, found {:?}", oty));
                None
            } else {
                Some(oty)
            }
        },
        NodeKind::Assign { place, value } => {
            let pty = check_expr(ast, scopes, *place, handler)?;
            let vty = check_expr(ast, scopes, *value, handler)?;
            if !is_mutable_place(ast, *place) {
                type_error(handler, node.span, "left-hand side of `=` must be a mutable variable".to_string());
                None
            } else if pty != vty {
                type_error(handler, node.span, format!("cannot assign {:?} to {:?}", vty, pty));
                None
            } else {
                Some(pty)
            }
        },
        NodeKind::Index { base, index } => {
            let bty = check_expr(ast, scopes, *base, handler)?;
            let ity = check_expr(ast, scopes, *index, handler)?;
            if ity != Type::Integer {
                type_error(handler, node.span, format!("array index must be integer, found {:?}", ity));
                return None;
            }
            if !bty.has_trait(TypeTrait::Indexable) {
                type_error(handler, node.span, format!("{:?} is not indexable", bty));
                return None;
            }
            if let NodeKind::Literal(ast::Literal::Integer(i)) = ast.kind(*index) {
                if let Type::Array(_, size) = &bty {
                    if *i < 0 || *i as u32 >= *size {
                        range_error(
                            handler,
                            node.span,
                            format!("index {} out of bounds for array of size {}", i, size),
                        );
                        return None;
                    }
                }
            }
            bty.element_type()
        },
        NodeKind::Call { callee, args } => {
            let cty = check_expr(ast, scopes, *callee, handler)?;
            let mut arg_tys = Vec::with_capacity(args.len());
            for &a in args {
                arg_tys.push(check_expr(ast, scopes, a, handler)?);
            }
            match cty {
                Type::Function(sig) => {
                    if sig.params.len() != arg_tys.len() {
                        type_error(
                            handler,
                            node.span,
                            format!("expected {} argument(s), found {}", sig.params.len(), arg_tys.len()),
                        );
                        None
                    } else if sig.params != arg_tys {
                        type_error(handler, node.span, "argument types do not match the function's parameters".to_string());
                        None
                    } else {
                        Some(*sig.ret)
                    }
                },
                other => {
                    type_error(handler, node.span, format!("{:?} is not callable", other));
                    None
                },
            }
        },
        NodeKind::ArrayLiteral { elements } => {
            if elements.is_empty() {
                type_error(handler, node.span, "array literal must not be empty".to_string());
                return None;
            }
            let mut tys = Vec::with_capacity(elements.len());
            for &e in elements {
                tys.push(check_expr(ast, scopes, e, handler)?);
            }
            let first = tys[0].clone();
            if tys.iter().any(|t| *t != first) {
                type_error(handler, node.span, "array elements must all have the same type".to_string());
                None
            } else {
                Some(Type::Array(Box::new(first), tys.len() as u32))
            }
        },
        _ => None,
    };

    if let Some(t) = &ty {
        *node.ty.borrow_mut() = Some(t.clone());
    }
    ty
}

fn check_binary(
    op: ast::BinOp,
    lty: &Type,
    rty: &Type,
    span: glyphc_util::Span,
    handler: &mut Handler,
) -> Option<Type> {
    use ast::BinOp::*;
    match op {
        Add | Sub | Mul | Div => {
            if lty != rty {
                type_error(handler, span, format!("arithmetic operands must match, found {:?} and {:?}", lty, rty));
                None
            } else if !lty.has_trait(TypeTrait::Field) {
                type_error(handler, span, format!("{:?} does not support arithmetic", lty));
                None
            } else {
                Some(lty.clone())
            }
        },
        Eq | Ne => {
            if lty != rty {
                type_error(handler, span, format!("cannot compare {:?} with {:?}", lty, rty));
                None
            } else if !lty.has_trait(TypeTrait::Boolean) {
                type_error(handler, span, format!("{:?} does not support `==`/`!=`", lty));
                None
            } else {
                Some(Type::Boolean)
            }
        },
        Lt | Le | Gt | Ge => {
            if lty != rty {
                type_error(handler, span, format!("cannot compare {:?} with {:?}", lty, rty));
                None
            } else if !lty.has_trait(TypeTrait::Ordered) {
                type_error(handler, span, format!("{:?} does not support ordering", lty));
                None
            } else {
                Some(Type::Boolean)
            }
        },
    }
}

/// Interns every type resolved onto a node or a symbol, so `glyphc-mir`
/// can look up the structurally-interned `TypeId` for any `Type` it sees
/// without re-deriving identity itself.
fn populate_registry(ast: &Ast, scopes: &ScopeTable, registry: &mut TypeRegistry) {
    for &func in &ast.functions {
        node::walk_bf(ast, &[func], |ast, id| {
            let node = ast.get(id);
            if let Some(ty) = node.ty.borrow().clone() {
                registry.intern(ty);
            }
            if let Some(sid) = node.symbol.get() {
                if let Some(ty) = scopes.symbol_type(sid) {
                    registry.intern(ty);
                }
            }
        });
    }
}
