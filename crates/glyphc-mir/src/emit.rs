//! Tree-walking code generation.
//!
//! Drives an [`IrBuilder`] directly over a fully analyzed
//! [`glyphc_sem::Ast`] — no intermediate MIR is built. Function
//! signatures are declared in a first pass so forward and mutually
//! recursive calls resolve, then each body is emitted in a second pass.
//!
//! Block creation for loops and the function return slot follows
//! spec.md's §4.7/§4.8 protocol: the blocks a construct needs are
//! created before its body is walked, so a `return`/`break`/`continue`
//! anywhere inside always finds its target already in scope. Because
//! the walk here is a single top-down pass over one function at a time
//! (never executed before that function's own header is processed),
//! creating those blocks at the point the construct is first visited
//! is equivalent to a separate pre-pass and needs no DFPO pre-walk of
//! its own.
//!
//! Local variable storage is different: spec.md §4.7 step 4 requires a
//! DFPO pre-walk that hoists every `let`'s alloca into the entry block
//! before the body is emitted, so a loop body's locals get one static
//! stack slot instead of a fresh, re-executing alloca on every
//! iteration. [`Emitter::emit_function`] runs that walk
//! ([`Emitter::collect_lets`]) right after the entry block is set up
//! and still current, so every hoisted alloca lands there with no need
//! to save and restore the insertion point afterward.

use std::collections::HashMap;

use glyphc_par::ast::{BinOp, Literal, UnOp};
use glyphc_sem::{Ast, NodeId, NodeKind, ScopeTable, SymbolId, Type};
use glyphc_util::Symbol;

use crate::builder::{CodeGenError, CodeGenResult, FloatPredicate, IntPredicate, IrBuilder};

/// Declares every function's signature, then emits every body. Returns
/// the backend function handle for each top-level function, keyed by
/// name, for callers that need to invoke one directly (e.g. the JIT
/// driver looking up an entry point).
pub fn emit_program<B: IrBuilder>(
    ast: &Ast,
    scopes: &ScopeTable,
    builder: &mut B,
) -> CodeGenResult<HashMap<Symbol, B::Function>> {
    let mut functions = HashMap::new();

    for &func_id in &ast.functions {
        let (name, params, ret) = function_signature(ast, scopes, func_id);
        let param_types: Vec<B::Type> = params.iter().map(|t| builder.type_of(t)).collect();
        let ret_type = builder.type_of(&ret);
        let handle = builder.create_function(name.as_str(), &param_types, ret_type);
        functions.insert(name, handle);
    }

    for &func_id in &ast.functions {
        let mut emitter = Emitter::new(ast, scopes, builder, &functions);
        emitter.emit_function(func_id)?;
    }

    Ok(functions)
}

fn function_signature(ast: &Ast, scopes: &ScopeTable, func_id: NodeId) -> (Symbol, Vec<Type>, Type) {
    match &ast.get(func_id).kind {
        NodeKind::Function { name, params, .. } => {
            let param_types = params.iter().map(|(_, ty)| ty.clone()).collect();
            let sid = scopes
                .find(scopes.root(), *name)
                .expect("every function name is pre-declared into the root scope");
            let ret = match scopes.symbol_type(sid) {
                Some(Type::Function(sig)) => *sig.ret,
                other => unreachable!("function symbol carries a non-function type: {:?}", other),
            };
            (*name, param_types, ret)
        }
        other => unreachable!("not a function node: {:?}", other),
    }
}

struct LoopTargets<Blk> {
    continue_target: Blk,
    break_target: Blk,
}

struct Emitter<'a, B: IrBuilder> {
    ast: &'a Ast,
    scopes: &'a ScopeTable,
    builder: &'a mut B,
    functions: &'a HashMap<Symbol, B::Function>,
    locals: HashMap<SymbolId, (B::Value, B::Type)>,
    loop_stack: Vec<LoopTargets<B::Block>>,
    function: Option<B::Function>,
    current_block: Option<B::Block>,
    return_slot: Option<B::Value>,
    return_type: Type,
    return_block: Option<B::Block>,
    terminated: bool,
}

impl<'a, B: IrBuilder> Emitter<'a, B> {
    fn new(
        ast: &'a Ast,
        scopes: &'a ScopeTable,
        builder: &'a mut B,
        functions: &'a HashMap<Symbol, B::Function>,
    ) -> Self {
        Self {
            ast,
            scopes,
            builder,
            functions,
            locals: HashMap::new(),
            loop_stack: Vec::new(),
            function: None,
            current_block: None,
            return_slot: None,
            return_type: Type::Void,
            return_block: None,
            terminated: false,
        }
    }

    fn node_type(&self, id: NodeId) -> Type {
        self.ast
            .get(id)
            .ty
            .borrow()
            .clone()
            .expect("the type pass resolves every semantic node before code generation runs")
    }

    fn backend_type(&mut self, ty: &Type) -> B::Type {
        self.builder.type_of(ty)
    }

    fn func(&self) -> B::Function {
        self.function.expect("emit_function sets the current function first")
    }

    fn set_block(&mut self, block: B::Block) {
        self.builder.set_insertion_point(block);
        self.current_block = Some(block);
        self.terminated = false;
    }

    /// Branch the current block to `target` unless it has already been
    /// terminated (by a nested `return`/`break`/`continue`).
    fn branch_to_if_open(&mut self, target: B::Block) {
        if !self.terminated {
            self.builder.br(target);
            self.terminated = true;
        }
    }

    fn emit_function(&mut self, func_id: NodeId) -> CodeGenResult<()> {
        let (name, params, body) = match &self.ast.get(func_id).kind {
            NodeKind::Function { name, params, body, .. } => (*name, params.clone(), *body),
            other => unreachable!("not a function node: {:?}", other),
        };
        let func = *self
            .functions
            .get(&name)
            .ok_or_else(|| CodeGenError::UnknownFunction(name.as_str().to_string()))?;
        self.function = Some(func);

        let (_, _, ret_type) = function_signature(self.ast, self.scopes, func_id);
        self.return_type = ret_type.clone();

        let entry = self.builder.create_block(func, "entry");
        self.builder.append_block(func, entry);
        self.set_block(entry);

        let ret_block = self.builder.create_block(func, "ret");
        self.return_block = Some(ret_block);

        self.return_slot = if ret_type != Type::Void {
            let backend_ty = self.backend_type(&ret_type);
            Some(self.builder.alloca(backend_ty, "ret.slot"))
        } else {
            None
        };

        let fn_scope = self
            .ast
            .get(func_id)
            .scope
            .get()
            .expect("the scope pass assigns a scope to every function node");
        for (index, (pname, pty)) in params.iter().enumerate() {
            let sid = self
                .scopes
                .find(fn_scope, *pname)
                .expect("the symbol pass declares every parameter in the function scope");
            let backend_ty = self.backend_type(pty);
            let slot = self.builder.alloca(backend_ty, pname.as_str());
            let incoming = self.builder.function_param(func, index);
            self.builder.store(incoming, slot);
            self.locals.insert(sid, (slot, backend_ty));
        }

        let mut let_ids = Vec::new();
        self.collect_lets(body, &mut let_ids);
        for let_id in let_ids {
            self.hoist_let(let_id);
        }

        self.emit_stmt(body)?;

        if let Some(cur) = self.current_block {
            self.builder.remove_terminator(cur);
            self.builder.br(ret_block);
        }

        self.builder.append_block(func, ret_block);
        self.builder.set_insertion_point(ret_block);
        match self.return_slot {
            Some(slot) => {
                let ret_ty = self.return_type.clone();
                let backend_ty = self.backend_type(&ret_ty);
                let value = self.builder.load(backend_ty, slot, "ret.val");
                self.builder.ret(value);
            }
            None => self.builder.ret_void(),
        }

        self.locals.clear();
        Ok(())
    }

    fn emit_stmt(&mut self, id: NodeId) -> CodeGenResult<()> {
        match &self.ast.get(id).kind {
            NodeKind::Block { stmts } => {
                let stmts = stmts.clone();
                for stmt in stmts {
                    if self.terminated {
                        break;
                    }
                    self.emit_stmt(stmt)?;
                }
                Ok(())
            }
            NodeKind::Let { .. } => self.emit_let(id),
            NodeKind::ExprStmt(expr) => {
                let expr = *expr;
                self.emit_expr(expr)?;
                Ok(())
            }
            NodeKind::If { cond, then_branch, else_branch } => {
                let (cond, then_branch, else_branch) = (*cond, *then_branch, *else_branch);
                self.emit_if(cond, then_branch, else_branch)
            }
            NodeKind::For { init, cond, update, body } => {
                let (init, cond, update, body) = (*init, *cond, *update, *body);
                self.emit_for(init, cond, update, body)
            }
            NodeKind::While { cond, body } => {
                let (cond, body) = (*cond, *body);
                self.emit_while(cond, body)
            }
            NodeKind::Break => {
                let target = self
                    .loop_stack
                    .last()
                    .ok_or(CodeGenError::LoopControlOutsideLoop)?
                    .break_target;
                self.builder.br(target);
                self.terminated = true;
                Ok(())
            }
            NodeKind::Continue => {
                let target = self
                    .loop_stack
                    .last()
                    .ok_or(CodeGenError::LoopControlOutsideLoop)?
                    .continue_target;
                self.builder.br(target);
                self.terminated = true;
                Ok(())
            }
            NodeKind::Return { value } => {
                let value = *value;
                if let Some(v) = value {
                    let result = self.emit_expr(v)?;
                    if let Some(slot) = self.return_slot {
                        self.builder.store(result, slot);
                    }
                }
                let ret_block = self
                    .return_block
                    .expect("emit_function sets the return block before the body is emitted");
                self.builder.br(ret_block);
                self.terminated = true;
                Ok(())
            }
            other => unreachable!("not a statement node: {:?}", other),
        }
    }

    /// Collects every `Let` node reachable in `id`'s statement subtree, in
    /// the order spec.md §4.7 step 4 hoists them. Glyph has no closures, so
    /// a statement's only nested statements are blocks, `if` branches, and
    /// loop bodies (including a `for`'s `init`, which may itself be a
    /// `Let`) — expressions never contain a `Let`.
    fn collect_lets(&self, id: NodeId, out: &mut Vec<NodeId>) {
        match &self.ast.get(id).kind {
            NodeKind::Block { stmts } => {
                for &stmt in stmts {
                    self.collect_lets(stmt, out);
                }
            }
            NodeKind::Let { .. } => out.push(id),
            NodeKind::If { then_branch, else_branch, .. } => {
                self.collect_lets(*then_branch, out);
                if let Some(else_branch) = else_branch {
                    self.collect_lets(*else_branch, out);
                }
            }
            NodeKind::For { init, body, .. } => {
                if let Some(init) = init {
                    self.collect_lets(*init, out);
                }
                self.collect_lets(*body, out);
            }
            NodeKind::While { body, .. } => {
                self.collect_lets(*body, out);
            }
            _ => {}
        }
    }

    /// Allocates a `let`'s stack slot in the entry block (the current
    /// insertion point whenever this runs) and records it in `locals`,
    /// without emitting its initializer — that happens later, in place,
    /// when [`Emitter::emit_let`] reaches the `let` during the body walk.
    fn hoist_let(&mut self, id: NodeId) {
        let (name, init) = match &self.ast.get(id).kind {
            NodeKind::Let { name, init } => (*name, *init),
            other => unreachable!("not a let node: {:?}", other),
        };
        let sid = self
            .ast
            .get(id)
            .symbol
            .get()
            .expect("the symbol pass assigns every let binding a SymbolId");
        let ty = self.node_type(init);
        let backend_ty = self.backend_type(&ty);
        let ptr = self.builder.alloca(backend_ty, name.as_str());
        self.locals.insert(sid, (ptr, backend_ty));
    }

    fn emit_let(&mut self, id: NodeId) -> CodeGenResult<()> {
        let init = match &self.ast.get(id).kind {
            NodeKind::Let { init, .. } => *init,
            other => unreachable!("not a let node: {:?}", other),
        };
        let sid = self
            .ast
            .get(id)
            .symbol
            .get()
            .expect("the symbol pass assigns every let binding a SymbolId");
        let (ptr, _backend_ty) = *self
            .locals
            .get(&sid)
            .expect("emit_function hoists every let's alloca before the body is emitted");
        let ty = self.node_type(init);
        self.emit_init_into(&ty, init, ptr)
    }

    /// Stores `init`'s value into the already-allocated slot `ptr`. Shared
    /// between a `let`'s initializer and materializing a temporary for a
    /// non-place index base (see [`Emitter::materialize_temp`]): both need
    /// "evaluate this expression into that address", with the array-literal
    /// element-wise GEP-and-store sequence as the one special case.
    fn emit_init_into(&mut self, ty: &Type, init: NodeId, ptr: B::Value) -> CodeGenResult<()> {
        if let (Type::Array(elem_ty, _), NodeKind::ArrayLiteral { elements }) =
            (ty, &self.ast.get(init).kind)
        {
            let elem_ty = (**elem_ty).clone();
            let elements = elements.clone();
            let elem_backend_ty = self.backend_type(&elem_ty);
            let index_ty = self.backend_type(&Type::Integer);
            for (i, element) in elements.into_iter().enumerate() {
                let value = self.emit_expr(element)?;
                let index = self.builder.const_int(index_ty, i as i64);
                let slot = self.builder.gep(elem_backend_ty, ptr, index, "elem");
                self.builder.store(value, slot);
            }
        } else {
            let value = self.emit_expr(init)?;
            self.builder.store(value, ptr);
        }
        Ok(())
    }

    fn emit_if(
        &mut self,
        cond: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    ) -> CodeGenResult<()> {
        let cond_v = self.emit_expr(cond)?;
        let func = self.func();
        let then_blk = self.builder.create_block(func, "then");
        let merge_blk = self.builder.create_block(func, "merge");

        self.builder.append_block(func, then_blk);
        match else_branch {
            Some(else_branch) => {
                let else_blk = self.builder.create_block(func, "else");
                self.builder.append_block(func, else_blk);
                self.builder.cond_br(cond_v, then_blk, else_blk);

                self.set_block(then_blk);
                self.emit_stmt(then_branch)?;
                self.branch_to_if_open(merge_blk);

                self.set_block(else_blk);
                self.emit_stmt(else_branch)?;
                self.branch_to_if_open(merge_blk);
            }
            None => {
                self.builder.cond_br(cond_v, then_blk, merge_blk);

                self.set_block(then_blk);
                self.emit_stmt(then_branch)?;
                self.branch_to_if_open(merge_blk);
            }
        }

        self.builder.append_block(func, merge_blk);
        self.set_block(merge_blk);
        Ok(())
    }

    fn emit_for(
        &mut self,
        init: Option<NodeId>,
        cond: NodeId,
        update: NodeId,
        body: NodeId,
    ) -> CodeGenResult<()> {
        if let Some(init) = init {
            self.emit_stmt(init)?;
        }
        let func = self.func();
        let cond_blk = self.builder.create_block(func, "for.cond");
        let body_blk = self.builder.create_block(func, "for.body");
        let update_blk = self.builder.create_block(func, "for.update");
        let merge_blk = self.builder.create_block(func, "for.merge");

        self.builder.append_block(func, cond_blk);
        self.branch_to_if_open(cond_blk);

        self.set_block(cond_blk);
        let cond_v = self.emit_expr(cond)?;
        self.builder.append_block(func, body_blk);
        self.builder.cond_br(cond_v, body_blk, merge_blk);

        self.loop_stack.push(LoopTargets {
            continue_target: update_blk,
            break_target: merge_blk,
        });
        self.set_block(body_blk);
        self.emit_stmt(body)?;
        self.branch_to_if_open(update_blk);
        self.loop_stack.pop();

        self.builder.append_block(func, update_blk);
        self.set_block(update_blk);
        self.emit_expr(update)?;
        self.branch_to_if_open(cond_blk);

        self.builder.append_block(func, merge_blk);
        self.set_block(merge_blk);
        Ok(())
    }

    fn emit_while(&mut self, cond: NodeId, body: NodeId) -> CodeGenResult<()> {
        let func = self.func();
        let cond_blk = self.builder.create_block(func, "while.cond");
        let body_blk = self.builder.create_block(func, "while.body");
        let merge_blk = self.builder.create_block(func, "while.merge");

        self.builder.append_block(func, cond_blk);
        self.branch_to_if_open(cond_blk);

        self.set_block(cond_blk);
        let cond_v = self.emit_expr(cond)?;
        self.builder.append_block(func, body_blk);
        self.builder.cond_br(cond_v, body_blk, merge_blk);

        self.loop_stack.push(LoopTargets {
            continue_target: cond_blk,
            break_target: merge_blk,
        });
        self.set_block(body_blk);
        self.emit_stmt(body)?;
        self.branch_to_if_open(cond_blk);
        self.loop_stack.pop();

        self.builder.append_block(func, merge_blk);
        self.set_block(merge_blk);
        Ok(())
    }

    /// True for an expression the type pass accepts as a mutable place
    /// (an `Ident`, or an `Index` chain rooted in one) — mirrors
    /// `glyphc_sem`'s `is_mutable_place`. Assignment and `++`/`--` targets
    /// are always one of these; a general index *read* is not restricted
    /// this way, since the grammar allows indexing any primary.
    fn is_place_expr(&self, id: NodeId) -> bool {
        match &self.ast.get(id).kind {
            NodeKind::Ident(_) => true,
            NodeKind::Index { base, .. } => self.is_place_expr(*base),
            _ => false,
        }
    }

    /// Resolves an assignable place (`Ident`, or `Index` rooted in one) to
    /// a pointer and the backend type stored there. Only ever called on
    /// `Assign`/`PostIncrement`/`PostDecrement` targets, which the type
    /// pass already restricts to this shape via `is_mutable_place` — so
    /// the `other` arm below is genuinely unreachable, unlike a general
    /// index read (see [`Emitter::emit_index_address`], which does not
    /// route through here).
    fn resolve_place(&mut self, id: NodeId) -> CodeGenResult<(B::Value, B::Type)> {
        match &self.ast.get(id).kind {
            NodeKind::Ident(name) => {
                let sid = self
                    .ast
                    .get(id)
                    .symbol
                    .get()
                    .expect("the symbol pass resolves every identifier reference");
                self.locals
                    .get(&sid)
                    .copied()
                    .ok_or_else(|| CodeGenError::UnresolvedLocal(name.as_str().to_string()))
            }
            NodeKind::Index { base, index } => {
                let (base, index) = (*base, *index);
                let (base_ptr, _) = self.resolve_place(base)?;
                let base_ty = self.node_type(base);
                let elem_ty = base_ty
                    .element_type()
                    .expect("the type pass requires an Indexable base");
                let elem_backend_ty = self.backend_type(&elem_ty);
                let index_v = self.emit_expr(index)?;
                let ptr = self.builder.gep(elem_backend_ty, base_ptr, index_v, "idx");
                Ok((ptr, elem_backend_ty))
            }
            other => unreachable!("not a place expression: {:?}", other),
        }
    }

    /// Evaluates a non-place expression into a fresh stack slot and
    /// returns its address, so a GEP has something to index off of.
    /// `Call` results and directly-written array literals reach here: a
    /// Glyph `primary "[" expr "]"` allows indexing either, but neither
    /// one has a pre-existing address the way a local variable does.
    fn materialize_temp(&mut self, id: NodeId) -> CodeGenResult<B::Value> {
        let ty = self.node_type(id);
        let backend_ty = self.backend_type(&ty);
        let ptr = self.builder.alloca(backend_ty, "tmp");
        self.emit_init_into(&ty, id, ptr)?;
        Ok(ptr)
    }

    /// Resolves an `Index`'s base to an address for reading, without
    /// requiring the base to be an assignable place: a place base (`Ident`
    /// or a nested `Index` rooted in one) resolves through
    /// [`Emitter::resolve_place`] as before; anything else (a `Call`
    /// result, an array literal) is materialized to a temporary first.
    fn emit_index_address(&mut self, base: NodeId, index: NodeId) -> CodeGenResult<(B::Value, B::Type)> {
        let base_ptr = if self.is_place_expr(base) {
            self.resolve_place(base)?.0
        } else {
            self.materialize_temp(base)?
        };
        let base_ty = self.node_type(base);
        let elem_ty = base_ty
            .element_type()
            .expect("the type pass requires an Indexable base");
        let elem_backend_ty = self.backend_type(&elem_ty);
        let index_v = self.emit_expr(index)?;
        let ptr = self.builder.gep(elem_backend_ty, base_ptr, index_v, "idx");
        Ok((ptr, elem_backend_ty))
    }

    fn emit_expr(&mut self, id: NodeId) -> CodeGenResult<B::Value> {
        match &self.ast.get(id).kind {
            NodeKind::Literal(lit) => {
                let lit = lit.clone();
                self.emit_literal(&lit)
            }
            NodeKind::Ident(_) => {
                let (ptr, ty) = self.resolve_place(id)?;
                Ok(self.builder.load(ty, ptr, "load"))
            }
            NodeKind::Unary { op, operand } => {
                let (op, operand) = (*op, *operand);
                self.emit_unary(op, operand)
            }
            NodeKind::Binary { op, left, right } => {
                let (op, left, right) = (*op, *left, *right);
                self.emit_binary(op, left, right)
            }
            NodeKind::Assign { place, value } => {
                let (place, value) = (*place, *value);
                let result = self.emit_expr(value)?;
                let (ptr, _) = self.resolve_place(place)?;
                self.builder.store(result, ptr);
                Ok(result)
            }
            NodeKind::PostIncrement(operand) => {
                let operand = *operand;
                self.emit_post_step(operand, true)
            }
            NodeKind::PostDecrement(operand) => {
                let operand = *operand;
                self.emit_post_step(operand, false)
            }
            NodeKind::Index { base, index } => {
                let (base, index) = (*base, *index);
                let (ptr, ty) = self.emit_index_address(base, index)?;
                Ok(self.builder.load(ty, ptr, "idx"))
            }
            NodeKind::Call { callee, args } => {
                let (callee, args) = (*callee, args.clone());
                self.emit_call(id, callee, &args)
            }
            NodeKind::ArrayLiteral { .. } => Err(CodeGenError::BuilderRejected(
                "array literals may only appear as a let initializer or an index base".to_string(),
            )),
            other => unreachable!("not an expression node: {:?}", other),
        }
    }

    fn emit_literal(&mut self, lit: &Literal) -> CodeGenResult<B::Value> {
        Ok(match lit {
            Literal::Integer(n) => {
                let ty = self.backend_type(&Type::Integer);
                self.builder.const_int(ty, *n as i64)
            }
            Literal::Double(f) => {
                let ty = self.backend_type(&Type::Double);
                self.builder.const_double(ty, *f)
            }
            Literal::Boolean(b) => self.builder.const_bool(*b),
            Literal::String(s) => self.builder.global_string(s.as_str(), "str"),
        })
    }

    fn emit_unary(&mut self, op: UnOp, operand: NodeId) -> CodeGenResult<B::Value> {
        let ty = self.node_type(operand);
        let v = self.emit_expr(operand)?;
        Ok(match op {
            UnOp::Plus => v,
            UnOp::Neg => match ty {
                Type::Integer => self.builder.ineg(v, "neg"),
                Type::Double => self.builder.fneg(v, "neg"),
                other => unreachable!("the type pass only allows Ordered types under unary -: {:?}", other),
            },
        })
    }

    fn emit_binary(&mut self, op: BinOp, left: NodeId, right: NodeId) -> CodeGenResult<B::Value> {
        let ty = self.node_type(left);
        let lv = self.emit_expr(left)?;
        let rv = self.emit_expr(right)?;
        Ok(match (&ty, op) {
            (Type::Integer, BinOp::Add) => self.builder.iadd(lv, rv, "add"),
            (Type::Integer, BinOp::Sub) => self.builder.isub(lv, rv, "sub"),
            (Type::Integer, BinOp::Mul) => self.builder.imul(lv, rv, "mul"),
            (Type::Integer, BinOp::Div) => self.builder.sdiv(lv, rv, "div"),
            (Type::Double, BinOp::Add) => self.builder.fadd(lv, rv, "add"),
            (Type::Double, BinOp::Sub) => self.builder.fsub(lv, rv, "sub"),
            (Type::Double, BinOp::Mul) => self.builder.fmul(lv, rv, "mul"),
            (Type::Double, BinOp::Div) => self.builder.fdiv(lv, rv, "div"),

            (Type::Integer, BinOp::Lt) => self.builder.icmp(IntPredicate::Slt, lv, rv, "cmp"),
            (Type::Integer, BinOp::Le) => self.builder.icmp(IntPredicate::Sle, lv, rv, "cmp"),
            (Type::Integer, BinOp::Gt) => self.builder.icmp(IntPredicate::Sgt, lv, rv, "cmp"),
            (Type::Integer, BinOp::Ge) => self.builder.icmp(IntPredicate::Sge, lv, rv, "cmp"),
            (Type::Double, BinOp::Lt) => self.builder.fcmp(FloatPredicate::Olt, lv, rv, "cmp"),
            (Type::Double, BinOp::Le) => self.builder.fcmp(FloatPredicate::Ole, lv, rv, "cmp"),
            (Type::Double, BinOp::Gt) => self.builder.fcmp(FloatPredicate::Ogt, lv, rv, "cmp"),
            (Type::Double, BinOp::Ge) => self.builder.fcmp(FloatPredicate::Oge, lv, rv, "cmp"),

            (Type::Integer, BinOp::Eq) => self.builder.icmp(IntPredicate::Eq, lv, rv, "cmp"),
            (Type::Integer, BinOp::Ne) => self.builder.icmp(IntPredicate::Ne, lv, rv, "cmp"),
            (Type::Boolean, BinOp::Eq) | (Type::Char, BinOp::Eq) => {
                self.builder.icmp(IntPredicate::Eq, lv, rv, "cmp")
            }
            (Type::Boolean, BinOp::Ne) | (Type::Char, BinOp::Ne) => {
                self.builder.icmp(IntPredicate::Ne, lv, rv, "cmp")
            }
            (Type::Double, BinOp::Eq) => self.builder.fcmp(FloatPredicate::Oeq, lv, rv, "cmp"),
            (Type::Double, BinOp::Ne) => self.builder.fcmp(FloatPredicate::One, lv, rv, "cmp"),

            (other, op) => unreachable!(
                "the type pass never permits {:?} on a non-matching type {:?}",
                op, other
            ),
        })
    }

    fn emit_post_step(&mut self, operand: NodeId, increment: bool) -> CodeGenResult<B::Value> {
        let ty = self.node_type(operand);
        let (ptr, backend_ty) = self.resolve_place(operand)?;
        let old = self.builder.load(backend_ty, ptr, "old");
        let new = match (ty.field_unit(), increment) {
            (Some(glyphc_sem::FieldUnit::Integer(one)), true) => {
                let unit = self.builder.const_int(backend_ty, one as i64);
                self.builder.iadd(old, unit, "inc")
            }
            (Some(glyphc_sem::FieldUnit::Integer(one)), false) => {
                let unit = self.builder.const_int(backend_ty, one as i64);
                self.builder.isub(old, unit, "dec")
            }
            (Some(glyphc_sem::FieldUnit::Double(one)), true) => {
                let unit = self.builder.const_double(backend_ty, one);
                self.builder.fadd(old, unit, "inc")
            }
            (Some(glyphc_sem::FieldUnit::Double(one)), false) => {
                let unit = self.builder.const_double(backend_ty, one);
                self.builder.fsub(old, unit, "dec")
            }
            (None, _) => unreachable!("the type pass only allows Field types under ++/--: {:?}", ty),
        };
        self.builder.store(new, ptr);
        Ok(old)
    }

    fn emit_call(&mut self, id: NodeId, callee: NodeId, args: &[NodeId]) -> CodeGenResult<B::Value> {
        let name = match &self.ast.get(callee).kind {
            NodeKind::Ident(name) => *name,
            other => {
                return Err(CodeGenError::BuilderRejected(format!(
                    "unsupported callee expression: {:?}",
                    other
                )))
            }
        };
        let func = *self
            .functions
            .get(&name)
            .ok_or_else(|| CodeGenError::UnknownFunction(name.as_str().to_string()))?;

        let mut arg_values = Vec::with_capacity(args.len());
        for &arg in args {
            arg_values.push(self.emit_expr(arg)?);
        }

        let result = self.builder.call(func, &arg_values, "call")?;
        match result {
            Some(v) => Ok(v),
            // Void-returning call used in an expression position (e.g. as a
            // statement, or as the tail of a void-returning `return`). The
            // type pass guarantees a Void-typed value is never read, since
            // Void carries no trait, so this placeholder is never observed.
            None => {
                debug_assert_eq!(self.node_type(id), Type::Void);
                Ok(self.builder.const_bool(false))
            }
        }
    }
}
