//! CLI end-to-end tests.
//!
//! Each test drives the `minicc` binary against a temp working directory
//! and checks exit status, standard error, and the written `output.ll`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn minicc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_minicc"))
}

/// Compile a fixture inside a temp dir and return the output.ll text.
fn compile_fixture(name: &str) -> String {
    let temp_dir = TempDir::new().expect("temp dir");
    minicc()
        .current_dir(temp_dir.path())
        .arg(fixtures_dir().join(name))
        .assert()
        .success();

    let output = temp_dir.path().join("output.ll");
    assert!(output.exists(), "output.ll should be written");
    std::fs::read_to_string(output).expect("read output.ll")
}

#[test]
fn no_arguments_prints_usage() {
    minicc()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: minicc <input file>"));
}

#[test]
fn extra_arguments_print_usage() {
    minicc()
        .args(["a.c", "b.c"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: minicc <input file>"));
}

#[test]
fn missing_file_fails_with_error() {
    let temp_dir = TempDir::new().expect("temp dir");
    minicc()
        .current_dir(temp_dir.path())
        .arg("no_such_file.c")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no_such_file.c"));
    assert!(!temp_dir.path().join("output.ll").exists());
}

#[test]
fn factorial_compiles_to_ir() {
    let ir = compile_fixture("factorial.c");
    assert!(ir.contains("declare void @print_int(i32)"));
    assert!(ir.contains("define i32 @factorial(i32 %n) {"));
    assert!(ir.contains("define void @runner() {"));
    assert!(ir.contains("mul i32"));
    assert!(ir.contains("call void @print_int(i32"));
}

#[test]
fn fibonacci_compiles_to_ir() {
    let ir = compile_fixture("fibonacci.c");
    assert!(ir.contains("define i32 @fibonacci(i32 %n) {"));
    // The driver assigns inside the loop condition.
    assert!(ir.contains("icmp sle i32"));
    assert!(ir.contains("call i32 @fibonacci(i32"));
}

#[test]
fn cosine_compiles_to_float_ir() {
    let ir = compile_fixture("cosine.c");
    assert!(ir.contains("declare void @print_float(float)"));
    assert!(ir.contains("define float @cosine(float %x) {"));
    assert!(ir.contains("fmul float"));
    assert!(ir.contains("fdiv float"));
    assert!(ir.contains("fcmp ogt float"));
    assert!(ir.contains("fneg float"));
}

#[test]
fn palindrome_compiles_with_int_division() {
    let ir = compile_fixture("palindrome.c");
    assert!(ir.contains("declare void @print_bool(i1)"));
    assert!(ir.contains("define i1 @palindrome(i32 %number) {"));
    assert!(ir.contains("srem i32"));
    assert!(ir.contains("sdiv i32"));
}

#[test]
fn recurse_compiles_with_self_call() {
    let ir = compile_fixture("recurse.c");
    assert!(ir.contains("call i32 @addNumbers(i32"));
    assert!(ir.contains("define i32 @recursion_driver(i32 %num) {"));
}

#[test]
fn rfact_compiles_with_self_call() {
    let ir = compile_fixture("rfact.c");
    assert!(ir.contains("call i32 @multiplyNumbers(i32"));
    assert!(ir.contains("define i32 @rfact(i32 %n) {"));
}

#[test]
fn every_block_in_every_fixture_is_terminated() {
    for name in [
        "factorial.c",
        "fibonacci.c",
        "cosine.c",
        "palindrome.c",
        "recurse.c",
        "rfact.c",
    ] {
        let ir = compile_fixture(name);
        // Textual check: a label line is always eventually followed by a
        // terminator before the function closes.
        for function in ir.split("define").skip(1) {
            let body = function
                .split_once('{')
                .map(|(_, b)| b)
                .unwrap_or("");
            for block in body.split(':').skip(1) {
                let has_terminator = block.contains("br ")
                    || block.contains("ret")
                    || block.contains("unreachable");
                assert!(has_terminator, "unterminated block in {}", name);
            }
        }
    }
}

#[test]
fn semantic_error_is_reported_with_position() {
    let temp_dir = TempDir::new().expect("temp dir");
    let source = temp_dir.path().join("narrow.c");
    std::fs::write(&source, "void f(void) {\n  int x;\n  x = 1.5;\n}\n").expect("write");

    minicc()
        .current_dir(temp_dir.path())
        .arg(&source)
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("semantic error")
                .and(predicate::str::contains("at line 3 column")),
        );
    // Partial IR is not flushed on error.
    assert!(!temp_dir.path().join("output.ll").exists());
}

#[test]
fn only_the_first_syntax_error_is_reported() {
    let temp_dir = TempDir::new().expect("temp dir");
    let source = temp_dir.path().join("broken.c");
    std::fs::write(&source, "int f( { }\nint g( { }\n").expect("write");

    let output = minicc()
        .current_dir(temp_dir.path())
        .arg(&source)
        .assert()
        .failure()
        .code(1)
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    let count = stderr.matches("syntax error").count();
    assert_eq!(count, 1, "expected one syntax error, stderr: {}", stderr);
}

#[test]
fn empty_source_compiles_to_empty_module() {
    let temp_dir = TempDir::new().expect("temp dir");
    let source = temp_dir.path().join("empty.c");
    std::fs::write(&source, "").expect("write");

    minicc()
        .current_dir(temp_dir.path())
        .arg(&source)
        .assert()
        .success();

    let ir = std::fs::read_to_string(temp_dir.path().join("output.ll")).expect("read");
    assert!(!ir.contains("define"));
    assert!(!ir.contains("global"));
}
