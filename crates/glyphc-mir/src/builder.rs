//! The `IrBuilder` collaborator contract.
//!
//! The core never touches LLVM (or any other backend) directly. It drives
//! an abstract builder through this trait, the way the teacher's emitter
//! drove its own `Builder`; `glyphc-gen` supplies the concrete
//! `inkwell`-backed implementation. Every handle type is opaque to this
//! crate — `Self::Value`/`Self::Block`/`Self::Function`/`Self::Type` carry
//! no meaning here beyond "something the backend produced."

use thiserror::Error;

use glyphc_sem::Type;

/// Integer comparison kinds the core needs (signed, since Glyph's only
/// integer type is signed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntPredicate {
    Eq,
    Ne,
    Slt,
    Sle,
    Sgt,
    Sge,
}

/// Floating comparison kinds the core needs (ordered, per spec.md §6.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatPredicate {
    Oeq,
    One,
    Olt,
    Ole,
    Ogt,
    Oge,
}

/// Failures a backend can report while building IR. Matches spec.md §7's
/// `CodeGenError`/`CastError` kinds: these are internal-bug conditions, not
/// user source errors, so they get a closed `thiserror` enum rather than
/// the free-text `Handler`/`DiagnosticBuilder` idiom `glyphc-sem` uses for
/// source diagnostics.
#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("code generation failed: {0}")]
    BuilderRejected(String),

    #[error("internal: unresolved local for symbol in function '{0}'")]
    UnresolvedLocal(String),

    #[error("internal: call to unknown function '{0}'")]
    UnknownFunction(String),

    #[error("internal: narrowing failure converting {from:?} to {to:?}")]
    CastFailed { from: Type, to: Type },

    #[error("internal: break/continue used outside a loop")]
    LoopControlOutsideLoop,
}

pub type CodeGenResult<T> = std::result::Result<T, CodeGenError>;

/// The abstract builder the emitter (`crate::emit`) drives. One method per
/// primitive spec.md §6.3 names; `type_of` is the one addition beyond the
/// literal contract, needed because type handles are opaque to the core
/// (spec.md §3's Type) but the emitter still has to ask for one when it
/// creates a local or a function signature.
pub trait IrBuilder {
    type Value: Copy;
    type Block: Copy + Eq;
    type Function: Copy;
    type Type: Copy;

    /// Map a resolved Glyph `Type` to this backend's type handle.
    fn type_of(&mut self, ty: &Type) -> Self::Type;

    fn create_function(
        &mut self,
        name: &str,
        param_types: &[Self::Type],
        ret_type: Self::Type,
    ) -> Self::Function;

    fn function_param(&mut self, func: Self::Function, index: usize) -> Self::Value;

    fn get_function(&mut self, name: &str) -> Option<Self::Function>;

    /// Create a basic block, not yet appended to any function's layout.
    fn create_block(&mut self, func: Self::Function, name: &str) -> Self::Block;

    /// Insert a previously-created block at the end of its function's
    /// layout. Mirrors spec.md §6.3's "insert basic block into function" —
    /// block creation and insertion are separate steps so the return block
    /// can be created early and appended only after the body is emitted
    /// (spec.md §4.7).
    fn append_block(&mut self, func: Self::Function, block: Self::Block);

    fn set_insertion_point(&mut self, block: Self::Block);

    fn alloca(&mut self, ty: Self::Type, name: &str) -> Self::Value;
    fn load(&mut self, ty: Self::Type, ptr: Self::Value, name: &str) -> Self::Value;
    fn store(&mut self, value: Self::Value, ptr: Self::Value);

    fn const_int(&mut self, ty: Self::Type, value: i64) -> Self::Value;
    fn const_double(&mut self, ty: Self::Type, value: f64) -> Self::Value;
    fn const_bool(&mut self, value: bool) -> Self::Value;
    fn const_char(&mut self, value: char) -> Self::Value;
    fn global_string(&mut self, value: &str, name: &str) -> Self::Value;

    fn iadd(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value;
    fn isub(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value;
    fn imul(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value;
    fn sdiv(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value;
    fn ineg(&mut self, value: Self::Value, name: &str) -> Self::Value;

    fn fadd(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value;
    fn fsub(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value;
    fn fmul(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value;
    fn fdiv(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value;
    fn fneg(&mut self, value: Self::Value, name: &str) -> Self::Value;

    fn icmp(
        &mut self,
        pred: IntPredicate,
        lhs: Self::Value,
        rhs: Self::Value,
        name: &str,
    ) -> Self::Value;
    fn fcmp(
        &mut self,
        pred: FloatPredicate,
        lhs: Self::Value,
        rhs: Self::Value,
        name: &str,
    ) -> Self::Value;

    /// Get-element-pointer against `base` (an alloca'd array/string) at the
    /// given index, for array/string indexing (spec.md §4.5's `Indexable`).
    fn gep(
        &mut self,
        elem_ty: Self::Type,
        base: Self::Value,
        index: Self::Value,
        name: &str,
    ) -> Self::Value;

    fn br(&mut self, target: Self::Block);
    fn cond_br(&mut self, cond: Self::Value, then_block: Self::Block, else_block: Self::Block);
    fn ret(&mut self, value: Self::Value);
    fn ret_void(&mut self);

    /// Remove the current terminator of a block, if any (spec.md §6.3's
    /// "remove terminator of a block" — needed when splicing the body's
    /// final block onto the return block, per §4.7).
    fn remove_terminator(&mut self, block: Self::Block);

    fn call(
        &mut self,
        func: Self::Function,
        args: &[Self::Value],
        name: &str,
    ) -> CodeGenResult<Option<Self::Value>>;
}
