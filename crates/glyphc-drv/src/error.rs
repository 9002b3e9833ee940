//! The driver's own error type, covering everything outside the compiler
//! passes themselves: argument parsing and reading the input file. A
//! failure inside a pass is reported through its `Handler` instead and
//! never reaches this type — see [`crate::run`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("usage: glyphc <input-path> [<ir-output-path>]")]
    Usage,

    #[error("could not read '{path}': {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write IR to '{path}': {source}")]
    WriteIr {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("compilation failed")]
    CompilationFailed,

    #[error("code generation failed: {0}")]
    CodeGen(#[from] glyphc_mir::CodeGenError),

    #[error("execution failed: {0}")]
    Runtime(#[from] glyphc_rt::RuntimeError),
}

pub type Result<T> = std::result::Result<T, DriverError>;
