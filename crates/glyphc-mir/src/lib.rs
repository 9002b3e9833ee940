//! Code generation core.
//!
//! Bridges a fully analyzed [`glyphc_sem::Ast`] to whatever backend
//! implements [`IrBuilder`]: this crate never touches LLVM itself. It
//! owns the backend-agnostic contract (`builder`) and the tree-walking
//! emitter that drives it (`emit`); `glyphc-gen` provides the concrete,
//! `inkwell`-backed implementor.

pub mod builder;
pub mod emit;

pub use builder::{CodeGenError, CodeGenResult, FloatPredicate, IntPredicate, IrBuilder};
pub use emit::emit_program;
