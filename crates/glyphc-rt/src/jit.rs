//! Calls `entry` through an `inkwell` JIT execution engine.

use std::sync::Once;

use inkwell::execution_engine::JitFunction;
use inkwell::module::Module;
use inkwell::targets::{InitializationConfig, Target};
use inkwell::OptimizationLevel;

use crate::error::{Result, RuntimeError};

/// The only function the driver ever calls into a compiled module: a
/// zero-argument `entry(): integer` (spec.md §4.12).
pub const ENTRY_FN_NAME: &str = "entry";

type EntryFn = unsafe extern "C" fn() -> i32;

static INIT_NATIVE_TARGET: Once = Once::new();

fn ensure_native_target() {
    INIT_NATIVE_TARGET.call_once(|| {
        Target::initialize_native(&InitializationConfig::default())
            .expect("failed to initialize native JIT target");
    });
}

/// JIT-compiles `module` and calls its `entry` function, returning the i32
/// it produced.
pub fn run_entry(module: &Module<'_>) -> Result<i32> {
    ensure_native_target();

    let engine = module
        .create_jit_execution_engine(OptimizationLevel::None)
        .map_err(|e| RuntimeError::EngineUnavailable(e.to_string()))?;

    let entry: JitFunction<EntryFn> = unsafe {
        engine
            .get_function(ENTRY_FN_NAME)
            .map_err(|_| RuntimeError::EntryNotFound(ENTRY_FN_NAME.to_string()))?
    };

    Ok(unsafe { entry.call() })
}
