//! The `glyphc` driver: wires the parser, the semantic passes, the LLVM
//! backend, and the JIT runtime into the single fixed pipeline described
//! by the CLI contract `glyphc <input-path> [<ir-output-path>]`.
//!
//! There is no configuration surface beyond the two positional
//! arguments — no optimization levels, no multi-file compilation, no
//! incremental cache. Every pass reports through one [`Handler`]; the
//! first pass that leaves it non-empty stops the pipeline and the
//! driver prints every diagnostic with its source context before
//! exiting nonzero. No partial IR is ever emitted on failure.

mod diagnostics;
mod error;

pub use error::{DriverError, Result};

use std::path::{Path, PathBuf};

use inkwell::context::Context;
use inkwell::targets::TargetMachine;

use glyphc_gen::LlvmBackend;
use glyphc_util::{Handler, SourceMap};

/// Compiles `input_path` and JIT-executes its `entry` function, returning
/// the i32 it produced. If `ir_output_path` is given, the textual LLVM IR
/// is written there as a side effect of a successful compile.
pub fn run(input_path: &Path, ir_output_path: Option<&Path>) -> Result<i32> {
    let source = std::fs::read_to_string(input_path).map_err(|source| DriverError::ReadInput {
        path: input_path.to_path_buf(),
        source,
    })?;

    let mut sources = SourceMap::new();
    sources.add_file(input_path.display().to_string(), source.clone());

    let mut handler = Handler::new();

    let program = glyphc_par::Parser::new(&source, &mut handler).parse_program();
    if handler.has_errors() || program.is_none() {
        diagnostics::report(&handler, &sources);
        return Err(DriverError::CompilationFailed);
    }
    let program = program.expect("checked above");

    let Some((ast, scopes, _types)) = glyphc_sem::analyze(&program, &mut handler) else {
        diagnostics::report(&handler, &sources);
        return Err(DriverError::CompilationFailed);
    };
    if handler.has_errors() {
        diagnostics::report(&handler, &sources);
        return Err(DriverError::CompilationFailed);
    }

    let context = Context::create();
    let module_name = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "glyph_module".to_string());
    let target_triple = TargetMachine::get_default_triple()
        .as_str()
        .to_string_lossy()
        .to_string();
    let mut backend = LlvmBackend::new(&context, &module_name, target_triple, inkwell::OptimizationLevel::None);

    glyphc_mir::emit_program(&ast, &scopes, &mut backend)?;

    if let Some(ir_path) = ir_output_path {
        backend
            .write_ir_to_file(ir_path)
            .map_err(|source| DriverError::WriteIr {
                path: ir_path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, source.to_string()),
            })?;
    }

    let result = glyphc_rt::run_entry(backend.get_module())?;
    Ok(result)
}

/// Parses the process arguments into an input path and an optional IR
/// output path. The only accepted shape is `glyphc <input> [<ir-out>]`.
pub fn parse_args(args: &[String]) -> Result<(PathBuf, Option<PathBuf>)> {
    match args {
        [input] => Ok((PathBuf::from(input), None)),
        [input, ir_out] => Ok((PathBuf::from(input), Some(PathBuf::from(ir_out)))),
        _ => Err(DriverError::Usage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args_accepts_single_input() {
        let args = vec!["main.glyph".to_string()];
        let (input, ir) = parse_args(&args).expect("should parse");
        assert_eq!(input, PathBuf::from("main.glyph"));
        assert!(ir.is_none());
    }

    #[test]
    fn parse_args_accepts_ir_output() {
        let args = vec!["main.glyph".to_string(), "out.ll".to_string()];
        let (input, ir) = parse_args(&args).expect("should parse");
        assert_eq!(input, PathBuf::from("main.glyph"));
        assert_eq!(ir, Some(PathBuf::from("out.ll")));
    }

    #[test]
    fn parse_args_rejects_no_arguments() {
        let args: Vec<String> = vec![];
        assert!(matches!(parse_args(&args), Err(DriverError::Usage)));
    }

    #[test]
    fn parse_args_rejects_too_many_arguments() {
        let args = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(matches!(parse_args(&args), Err(DriverError::Usage)));
    }

    #[test]
    fn run_reports_missing_file() {
        let result = run(Path::new("/nonexistent/path/to/a/file.glyph"), None);
        assert!(matches!(result, Err(DriverError::ReadInput { .. })));
    }

    #[test]
    fn run_executes_a_simple_entry_function() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("main.glyph");
        std::fs::write(&path, "function entry():integer { return 1 + 2 * 3; }").unwrap();

        let result = run(&path, None).expect("should compile and run");
        assert_eq!(result, 7);
    }

    #[test]
    fn run_reports_symbol_errors_without_panicking() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("main.glyph");
        std::fs::write(
            &path,
            "function entry():integer { let a = 1; let a = 2; return a; }",
        )
        .unwrap();

        let result = run(&path, None);
        assert!(matches!(result, Err(DriverError::CompilationFailed)));
    }
}
