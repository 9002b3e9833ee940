//! Arena-indexed AST.
//!
//! Each AST node lives in a flat [`Ast`] arena and is referenced by
//! [`NodeId`] rather than by `Box`. This sidesteps the cyclic-ownership
//! problems a tree of capability-mixing trait objects would run into, and
//! makes the visited-set walks the semantic passes need (see [`walk_bf`]
//! and [`walk_dfpo`]) a matter of tracking a `HashSet<NodeId>` instead of
//! threading parent pointers through trait objects.
//!
//! A node's capabilities are not expressed as traits it implements but as
//! free functions that ask "does this variant behave like a scope owner /
//! symbol site / typed expression". [`is_scope_owner`], [`is_symbol_decl`]
//! and [`is_type_semantic`] are the three capability queries the semantic
//! passes dispatch through.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};

use glyphc_par::ast;
use glyphc_util::{DiagnosticBuilder, Handler, Idx, IndexVec, Span, Symbol};

use crate::scope::{ScopeId, SymbolId};
use crate::types::{FunctionSignature, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl Idx for NodeId {
    fn from_usize(idx: usize) -> Self {
        NodeId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The shape of a single AST node. Structurally this mirrors
/// [`glyphc_par::ast`], but children are [`NodeId`]s into the same arena
/// instead of boxed subtrees, and function parameters carry their
/// annotated type directly since they never themselves need to be
/// revisited as an independent tree node.
#[derive(Debug)]
pub enum NodeKind {
    Function {
        name: Symbol,
        params: Vec<(Symbol, Type)>,
        ret_type: Option<Type>,
        body: NodeId,
    },
    Block {
        stmts: Vec<NodeId>,
    },
    Let {
        name: Symbol,
        init: NodeId,
    },
    If {
        cond: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    For {
        init: Option<NodeId>,
        cond: NodeId,
        update: NodeId,
        body: NodeId,
    },
    While {
        cond: NodeId,
        body: NodeId,
    },
    Break,
    Continue,
    Return {
        value: Option<NodeId>,
    },
    ExprStmt(NodeId),
    Literal(ast::Literal),
    Ident(Symbol),
    Unary {
        op: ast::UnOp,
        operand: NodeId,
    },
    Binary {
        op: ast::BinOp,
        left: NodeId,
        right: NodeId,
    },
    Assign {
        place: NodeId,
        value: NodeId,
    },
    PostIncrement(NodeId),
    PostDecrement(NodeId),
    Index {
        base: NodeId,
        index: NodeId,
    },
    Call {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    ArrayLiteral {
        elements: Vec<NodeId>,
    },
}

/// A single arena slot: the node's shape plus the mutable annotations the
/// semantic passes attach to it in place. `scope` is set by the scope
/// pass, `symbol` by the symbol pass (declaration or resolved reference),
/// `ty` by the type pass.
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub scope: Cell<Option<ScopeId>>,
    pub symbol: Cell<Option<SymbolId>>,
    pub ty: RefCell<Option<Type>>,
}

impl Node {
    fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            scope: Cell::new(None),
            symbol: Cell::new(None),
            ty: RefCell::new(None),
        }
    }
}

/// The arena itself, plus the set of top-level function roots.
pub struct Ast {
    nodes: IndexVec<NodeId, Node>,
    pub functions: Vec<NodeId>,
}

impl Ast {
    fn new() -> Self {
        Self {
            nodes: IndexVec::new(),
            functions: Vec::new(),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        self.nodes.get(id).expect("dangling NodeId")
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    /// Structural children of a node, used by the generic BF/DFPO walkers.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match &self.get(id).kind {
            NodeKind::Function { body, .. } => vec![*body],
            NodeKind::Block { stmts } => stmts.clone(),
            NodeKind::Let { init, .. } => vec![*init],
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let mut c = vec![*cond, *then_branch];
                if let Some(e) = else_branch {
                    c.push(*e);
                }
                c
            },
            NodeKind::For {
                init,
                cond,
                update,
                body,
            } => {
                let mut c = Vec::new();
                if let Some(i) = init {
                    c.push(*i);
                }
                c.push(*cond);
                c.push(*update);
                c.push(*body);
                c
            },
            NodeKind::While { cond, body } => vec![*cond, *body],
            NodeKind::Break | NodeKind::Continue => vec![],
            NodeKind::Return { value } => value.iter().copied().collect(),
            NodeKind::ExprStmt(e) => vec![*e],
            NodeKind::Literal(_) | NodeKind::Ident(_) => vec![],
            NodeKind::Unary { operand, .. } => vec![*operand],
            NodeKind::Binary { left, right, .. } => vec![*left, *right],
            NodeKind::Assign { place, value } => vec![*place, *value],
            NodeKind::PostIncrement(e) | NodeKind::PostDecrement(e) => vec![*e],
            NodeKind::Index { base, index } => vec![*base, *index],
            NodeKind::Call { callee, args } => {
                let mut c = vec![*callee];
                c.extend(args.iter().copied());
                c
            },
            NodeKind::ArrayLiteral { elements } => elements.clone(),
        }
    }
}

/// Does this node introduce a new scope for its descendants?
pub fn is_scope_owner(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Function { .. } | NodeKind::Block { .. } | NodeKind::For { .. } | NodeKind::While { .. }
    )
}

/// Does this node declare a symbol (as opposed to referencing one)?
/// Function parameters are declared as part of processing the enclosing
/// `Function` node rather than through this predicate.
pub fn is_symbol_decl(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::Function { .. } | NodeKind::Let { .. })
}

/// Does this node reference a bound name?
pub fn is_symbol_ref(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::Ident(_))
}

/// Does this node compute a type?
pub fn is_type_semantic(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Function { .. }
            | NodeKind::Literal(_)
            | NodeKind::Ident(_)
            | NodeKind::Unary { .. }
            | NodeKind::Binary { .. }
            | NodeKind::Assign { .. }
            | NodeKind::PostIncrement(_)
            | NodeKind::PostDecrement(_)
            | NodeKind::Index { .. }
            | NodeKind::Call { .. }
            | NodeKind::ArrayLiteral { .. }
    )
}

/// Breadth-first, self-first traversal with an explicit visited set.
/// Scope and symbol resolution use this order because outer scopes (and
/// function declarations, for hoisting) must be established before any
/// inner node is visited.
pub fn walk_bf(ast: &Ast, roots: &[NodeId], mut visit: impl FnMut(&Ast, NodeId)) {
    let mut queue: VecDeque<NodeId> = roots.iter().copied().collect();
    let mut visited: HashSet<NodeId> = roots.iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        visit(ast, id);
        for child in ast.children(id) {
            if visited.insert(child) {
                queue.push_back(child);
            }
        }
    }
}

/// Depth-first, post-order traversal with an explicit visited set. Type
/// resolution uses this order because an expression's type is a function
/// of its operands' types.
pub fn walk_dfpo(ast: &Ast, root: NodeId, visit: &mut impl FnMut(&Ast, NodeId)) {
    fn go(ast: &Ast, id: NodeId, visited: &mut HashSet<NodeId>, visit: &mut impl FnMut(&Ast, NodeId)) {
        if !visited.insert(id) {
            return;
        }
        for child in ast.children(id) {
            go(ast, child, visited, visit);
        }
        visit(ast, id);
    }
    let mut visited = HashSet::new();
    go(ast, root, &mut visited, visit);
}

/// Lowers a `glyphc_par` AST into the arena. Type annotations
/// (`function(...)`'s parameter and return types) are resolved eagerly
/// here since they are structural, not inferred; an annotation naming an
/// undeclared type (Glyph has no nominal type declarations, so this means
/// any bare identifier used where a type was expected) is reported
/// immediately and the annotation falls back to `Type::Void` so lowering
/// can still produce a complete tree for the caller to inspect.
pub fn lower_program(program: &ast::Program, handler: &mut Handler) -> Ast {
    let mut ast = Ast::new();
    for function in program {
        let id = lower_function(&mut ast, function, handler);
        ast.functions.push(id);
    }
    ast
}

fn lower_function(ast: &mut Ast, function: &ast::Function, handler: &mut Handler) -> NodeId {
    let params = function
        .params
        .iter()
        .map(|p| (p.name, lower_type(&p.ty, p.span, handler)))
        .collect();
    let ret_type = function
        .ret_type
        .as_ref()
        .map(|t| lower_type(t, function.span, handler));
    let body = lower_block(ast, &function.body);
    ast.push(Node::new(
        NodeKind::Function {
            name: function.name,
            params,
            ret_type,
            body,
        },
        function.span,
    ))
}

fn lower_type(ty: &ast::Type, span: Span, handler: &mut Handler) -> Type {
    match ty {
        ast::Type::Integer => Type::Integer,
        ast::Type::Double => Type::Double,
        ast::Type::Boolean => Type::Boolean,
        ast::Type::Char => Type::Char,
        ast::Type::Void => Type::Void,
        ast::Type::String => Type::String,
        ast::Type::Array(elem, size) => Type::Array(Box::new(lower_type(elem, span, handler)), *size),
        ast::Type::Function(params, ret) => Type::Function(FunctionSignature {
            params: params.iter().map(|p| lower_type(p, span, handler)).collect(),
            ret: Box::new(lower_type(ret, span, handler)),
        }),
        ast::Type::Named(name) => {
            DiagnosticBuilder::error(format!(
                "unknown type `{}`: Glyph has no user-declared types",
                name
            ))
            .span(span)
            .emit(handler);
            Type::Void
        },
    }
}

fn lower_block(ast: &mut Ast, block: &ast::Block) -> NodeId {
    let stmts = block.stmts.iter().map(|s| lower_stmt(ast, s)).collect();
    ast.push(Node::new(NodeKind::Block { stmts }, block.span))
}

fn lower_stmt(ast: &mut Ast, stmt: &ast::Stmt) -> NodeId {
    match stmt {
        ast::Stmt::Let(l) => lower_let(ast, l),
        ast::Stmt::If(i) => lower_if(ast, i),
        ast::Stmt::For(f) => lower_for(ast, f),
        ast::Stmt::While(w) => lower_while(ast, w),
        ast::Stmt::Break(span) => ast.push(Node::new(NodeKind::Break, *span)),
        ast::Stmt::Continue(span) => ast.push(Node::new(NodeKind::Continue, *span)),
        ast::Stmt::Return(r) => {
            let value = r.value.as_ref().map(|e| lower_expr(ast, e));
            ast.push(Node::new(NodeKind::Return { value }, r.span))
        },
        ast::Stmt::Block(b) => lower_block(ast, b),
        ast::Stmt::Expr(e) => {
            let span = e.span();
            let expr_id = lower_expr(ast, e);
            ast.push(Node::new(NodeKind::ExprStmt(expr_id), span))
        },
    }
}

fn lower_let(ast: &mut Ast, l: &ast::LetStmt) -> NodeId {
    let init = lower_expr(ast, &l.init);
    ast.push(Node::new(
        NodeKind::Let {
            name: l.name,
            init,
        },
        l.span,
    ))
}

fn lower_if(ast: &mut Ast, i: &ast::IfStmt) -> NodeId {
    let cond = lower_expr(ast, &i.cond);
    let then_branch = lower_stmt(ast, &i.then_branch);
    let else_branch = i.else_branch.as_ref().map(|e| lower_stmt(ast, e));
    ast.push(Node::new(
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        },
        i.span,
    ))
}

fn lower_for(ast: &mut Ast, f: &ast::ForStmt) -> NodeId {
    let init = f.init.as_ref().map(|i| match i {
        ast::ForInit::Let(l) => lower_let(ast, l),
        ast::ForInit::Expr(e) => {
            let span = e.span();
            let expr_id = lower_expr(ast, e);
            ast.push(Node::new(NodeKind::ExprStmt(expr_id), span))
        },
    });
    let cond = lower_expr(ast, &f.cond);
    let update = lower_expr(ast, &f.update);
    let body = lower_stmt(ast, &f.body);
    ast.push(Node::new(
        NodeKind::For {
            init,
            cond,
            update,
            body,
        },
        f.span,
    ))
}

fn lower_while(ast: &mut Ast, w: &ast::WhileStmt) -> NodeId {
    let cond = lower_expr(ast, &w.cond);
    let body = lower_stmt(ast, &w.body);
    ast.push(Node::new(NodeKind::While { cond, body }, w.span))
}

fn lower_expr(ast: &mut Ast, expr: &ast::Expr) -> NodeId {
    let span = expr.span();
    match expr {
        ast::Expr::Literal(lit, _) => ast.push(Node::new(NodeKind::Literal(lit.clone()), span)),
        ast::Expr::Ident(name, _) => ast.push(Node::new(NodeKind::Ident(*name), span)),
        ast::Expr::Unary(u) => {
            let operand = lower_expr(ast, &u.operand);
            ast.push(Node::new(
                NodeKind::Unary {
                    op: u.op,
                    operand,
                },
                span,
            ))
        },
        ast::Expr::Binary(b) => {
            let left = lower_expr(ast, &b.left);
            let right = lower_expr(ast, &b.right);
            ast.push(Node::new(
                NodeKind::Binary {
                    op: b.op,
                    left,
                    right,
                },
                span,
            ))
        },
        ast::Expr::Assign(a) => {
            let place = lower_expr(ast, &a.place);
            let value = lower_expr(ast, &a.value);
            ast.push(Node::new(NodeKind::Assign { place, value }, span))
        },
        ast::Expr::PostIncrement(e, _) => {
            let inner = lower_expr(ast, e);
            ast.push(Node::new(NodeKind::PostIncrement(inner), span))
        },
        ast::Expr::PostDecrement(e, _) => {
            let inner = lower_expr(ast, e);
            ast.push(Node::new(NodeKind::PostDecrement(inner), span))
        },
        ast::Expr::Index(i) => {
            let base = lower_expr(ast, &i.base);
            let index = lower_expr(ast, &i.index);
            ast.push(Node::new(NodeKind::Index { base, index }, span))
        },
        ast::Expr::Call(c) => {
            let callee = lower_expr(ast, &c.callee);
            let args = c.args.iter().map(|a| lower_expr(ast, a)).collect();
            ast.push(Node::new(NodeKind::Call { callee, args }, span))
        },
        ast::Expr::ArrayLiteral(a) => {
            let elements = a.elements.iter().map(|e| lower_expr(ast, e)).collect();
            ast.push(Node::new(NodeKind::ArrayLiteral { elements }, span))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphc_util::Handler;

    fn lower(source: &str) -> (Ast, Handler) {
        let mut handler = Handler::new();
        let program = {
            let mut parser = glyphc_par::Parser::new(source, &mut handler);
            parser.parse_program().expect("should parse")
        };
        let ast = lower_program(&program, &mut handler);
        (ast, handler)
    }

    #[test]
    fn test_lower_single_function() {
        let (ast, h) = lower("function main() { return 1; }");
        assert_eq!(ast.functions.len(), 1);
        assert!(!h.has_errors());
    }

    #[test]
    fn test_lower_children_function_is_body_only() {
        let (ast, _) = lower("function main() { let x = 1; }");
        let f = ast.functions[0];
        let children = ast.children(f);
        assert_eq!(children.len(), 1);
        assert!(matches!(ast.kind(children[0]), NodeKind::Block { .. }));
    }

    #[test]
    fn test_lower_block_children_are_stmts() {
        let (ast, _) = lower("function main() { let a = 1; let b = 2; }");
        let f = ast.functions[0];
        let body = ast.children(f)[0];
        assert_eq!(ast.children(body).len(), 2);
    }

    #[test]
    fn test_lower_named_type_is_an_error() {
        let (_, h) = lower("function main(x: Foo) { return; }");
        assert!(h.has_errors());
    }

    #[test]
    fn test_walk_bf_visits_every_node_once() {
        let (ast, _) = lower("function main() { if (true) { let x = 1; } else { let y = 2; } }");
        let mut seen = Vec::new();
        walk_bf(&ast, &ast.functions, |_, id| seen.push(id));
        let unique: HashSet<_> = seen.iter().collect();
        assert_eq!(seen.len(), unique.len());
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_walk_dfpo_visits_children_before_parent() {
        let (ast, _) = lower("function main() { return 1 + 2; }");
        let f = ast.functions[0];
        let mut order = Vec::new();
        walk_dfpo(&ast, f, &mut |_, id| order.push(id));
        // the function node itself must be last
        assert_eq!(*order.last().unwrap(), f);
    }

    #[test]
    fn test_is_scope_owner() {
        let (ast, _) = lower("function main() { while (true) { break; } }");
        let f = ast.functions[0];
        assert!(is_scope_owner(ast.kind(f)));
    }

    #[test]
    fn test_is_type_semantic_excludes_control_flow() {
        let (ast, _) = lower("function main() { for (;true;) { break; } }");
        let f = ast.functions[0];
        let body = match ast.kind(f) {
            NodeKind::Function { body, .. } => *body,
            _ => unreachable!(),
        };
        let for_stmt = ast.children(body)[0];
        assert!(!is_type_semantic(ast.kind(for_stmt)));
    }
}
