//! The concrete code generation backend: an `inkwell`-backed implementor
//! of `glyphc_mir::IrBuilder`.
//!
//! This crate owns everything LLVM-specific — the `Context`/`Module`
//! wiring, the `Type` to LLVM-type mapping, and writing the compiled
//! module out as IR text, an object file, or assembly. It never walks the
//! AST itself; `glyphc-mir::emit_program` drives it.

pub mod error;
pub mod llvm;
pub mod types;

pub use error::{CodeGenError, Result};
pub use llvm::LlvmBackend;
pub use types::{glyph_type_to_llvm, GenType};
