//! Errors for backend concerns outside the `IrBuilder` contract: target
//! setup, and writing the compiled module to disk. Failures inside the
//! `IrBuilder` methods themselves are reported as `glyphc_mir::CodeGenError`
//! instead, since those are the errors the core (`glyphc-mir`) already
//! knows how to format — this enum only covers what `glyphc-mir` has no
//! vocabulary for.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("failed to initialize LLVM target: {0}")]
    TargetInitFailed(String),

    #[error("failed to create target machine for triple '{0}'")]
    TargetMachineUnavailable(String),

    #[error("failed to write object file: {0}")]
    ObjectWriteFailed(String),

    #[error("failed to write assembly file: {0}")]
    AssemblyWriteFailed(String),

    #[error("failed to write IR file: {0}")]
    IrWriteFailed(String),

    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
