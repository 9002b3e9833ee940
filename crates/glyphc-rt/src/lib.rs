//! JIT execution for compiled Glyph modules.
//!
//! A thin wrapper over `inkwell::execution_engine::ExecutionEngine`: the
//! driver hands it the module a `glyphc_gen::LlvmBackend` built, this crate
//! JIT-compiles it and calls `entry` with no arguments. Glyph has no other
//! runtime surface — no GC, no string library, nothing a compiled program
//! calls back into — so `entry`'s i32 result is the entire interface.

mod error;
mod jit;

pub use error::{Result, RuntimeError};
pub use jit::{run_entry, ENTRY_FN_NAME};
