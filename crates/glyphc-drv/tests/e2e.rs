//! End-to-end tests driving the `glyphc` binary itself: write a source
//! file, run the binary against it, check stdout (the JIT return value)
//! or stderr (a compile error) and the exit code.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn glyphc_file(source: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("main.glyph");
    std::fs::write(&path, source).expect("write source");
    (dir, path)
}

fn expect_entry_value(source: &str, expected: i32) {
    let (_dir, path) = glyphc_file(source);
    Command::cargo_bin("glyphc")
        .expect("binary builds")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::trim().eq(expected.to_string()));
}

#[test]
fn arithmetic_precedence() {
    expect_entry_value("function entry():integer { return 1 + 2 * 3; }", 7);
}

#[test]
fn if_else_branch() {
    expect_entry_value(
        "function entry():integer { let x = 10; let y = 3; if (x > y) { return x - y; } else { return y - x; } }",
        7,
    );
}

#[test]
fn for_loop_accumulation() {
    expect_entry_value(
        "function entry():integer { let s = 0; for (let i = 0; i < 5; i++) { s = s + i; } return s; }",
        10,
    );
}

#[test]
fn while_loop_break() {
    expect_entry_value(
        "function entry():integer { let i = 0; while (i < 3) { i++; if (i == 2) { break; } } return i; }",
        2,
    );
}

#[test]
fn array_indexing() {
    expect_entry_value(
        "function entry():integer { let a = [10, 20, 30]; return a[2]; }",
        30,
    );
}

#[test]
fn function_call() {
    expect_entry_value(
        "function add(x:integer, y:integer):integer { return x+y; } function entry():integer { return add(40, 2); }",
        42,
    );
}

fn expect_compile_error(source: &str) {
    let (_dir, path) = glyphc_file(source);
    Command::cargo_bin("glyphc")
        .expect("binary builds")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn duplicate_declaration_is_a_symbol_error() {
    expect_compile_error(
        "function entry():integer { let a = 1; let a = 2; return a; }",
    );
}

#[test]
fn mismatched_return_types_are_a_type_error() {
    expect_compile_error(
        "function entry():integer { if (true) { return 1; } return true; }",
    );
}

#[test]
fn out_of_bounds_constant_index_is_a_range_error() {
    expect_compile_error(
        "function entry():integer { let a = [1, 2]; return a[5]; }",
    );
}

#[test]
fn non_boolean_condition_is_a_type_error() {
    expect_compile_error("function entry():integer { if (1) { } return 0; }");
}

#[test]
fn missing_input_path_is_a_usage_error() {
    Command::cargo_bin("glyphc")
        .expect("binary builds")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn missing_file_is_a_compile_error() {
    Command::cargo_bin("glyphc")
        .expect("binary builds")
        .arg("/nonexistent/path/to/a/file.glyph")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn ir_output_path_writes_textual_ir() {
    let (dir, path) = glyphc_file("function entry():integer { return 1; }");
    let ir_path = dir.path().join("out.ll");
    Command::cargo_bin("glyphc")
        .expect("binary builds")
        .arg(&path)
        .arg(&ir_path)
        .assert()
        .success();

    let ir = std::fs::read_to_string(&ir_path).expect("ir file written");
    assert!(ir.contains("define i32 @entry()"));
}
