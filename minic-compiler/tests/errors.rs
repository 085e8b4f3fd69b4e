use minic_compiler::{compile_to_ir, CompileError, SemanticErrorKind};

// ── Semantic error detection ─────────────────────────────────────────────
// Each test verifies that an invalid program produces the correct error kind.

#[test]
fn missing_main() {
    let source = "int f() { return 0; }";
    assert_semantic_error(source, SemanticErrorKind::MainFunction);
}

#[test]
fn missing_main_wins_over_body_errors() {
    // The entry-point check runs right after registration, before any body
    // is verified, so the undeclared variable never gets a chance to report.
    let source = "int f() { return undeclared; }";
    assert_semantic_error(source, SemanticErrorKind::MainFunction);
}

#[test]
fn empty_program_has_no_main() {
    assert_semantic_error("", SemanticErrorKind::MainFunction);
}

#[test]
fn void_variable_declaration() {
    let source = "int main() { void x; return 0; }";
    assert_semantic_error(source, SemanticErrorKind::TypeDecl);
}

#[test]
fn void_parameter() {
    let source = r#"
        void f(void a) { }
        int main() { return 0; }
    "#;
    assert_semantic_error(source, SemanticErrorKind::TypeDecl);
}

#[test]
fn duplicate_function_definition() {
    let source = "void f(int a) { }\nvoid f(int a) { }\nint main() { return 0; }";
    match compile_to_ir(source) {
        Err(CompileError::Semantic { kind, line, .. }) => {
            assert_eq!(kind, SemanticErrorKind::DuplicateDecl);
            assert_eq!(line, 2, "error should point at the second definition");
        }
        other => panic!("expected duplicate_decl, got {other:?}"),
    }
}

#[test]
fn prototype_then_definition_is_a_duplicate() {
    // One registration per name; a declaration followed by a definition of
    // the same function counts as a redeclaration.
    let source = "int f(int a); int f(int a) { return a; } int main() { return 0; }";
    assert_semantic_error(source, SemanticErrorKind::DuplicateDecl);
}

#[test]
fn duplicate_variable_in_block() {
    let source = "int main() { int x; int x; return 0; }";
    assert_semantic_error(source, SemanticErrorKind::DuplicateDecl);
}

#[test]
fn duplicate_parameter() {
    let source = "int f(int a, int a) { return 0; } int main() { return 0; }";
    assert_semantic_error(source, SemanticErrorKind::DuplicateDecl);
}

#[test]
fn redeclaration_in_inner_block_is_allowed() {
    // Duplicate checks are per block; an inner block may reuse a name.
    let source = "int main() { int x; if (true) { int x; } return 0; }";
    assert!(compile_to_ir(source).is_ok());
}

// ── Type rules ───────────────────────────────────────────────────────────

#[test]
fn binary_operand_mismatch() {
    let source = "int main() { return 1 + 1.5; }";
    assert_semantic_error(source, SemanticErrorKind::TypeMismatch);
}

#[test]
fn relational_operand_mismatch() {
    let source = "int main() { bool b = 1 < 1.5; return 0; }";
    assert_semantic_error(source, SemanticErrorKind::TypeMismatch);
}

#[test]
fn same_type_operands_are_accepted() {
    let source = "int main() { int x = 1 + 2; bool b = 1 < 2; return x; }";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn if_condition_must_be_bool() {
    let source = "int main() { if (1) { } return 0; }";
    assert_semantic_error(source, SemanticErrorKind::TypeBool);
}

#[test]
fn while_condition_must_be_bool() {
    let source = "int main() { while (1.5) { } return 0; }";
    assert_semantic_error(source, SemanticErrorKind::TypeBool);
}

#[test]
fn for_condition_must_be_bool_when_present() {
    let source = "int main() { for (int i = 0; i; i += 1) { } return 0; }";
    assert_semantic_error(source, SemanticErrorKind::TypeBool);
}

#[test]
fn absent_for_condition_is_not_an_error() {
    let source = "int main() { for (int i = 0; ; i += 1) { break; } return 0; }";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn ternary_condition_is_not_bool_checked() {
    // Only if/while/for conditions carry the bool requirement.
    let source = "int main() { return 1 ? 2 : 3; }";
    assert!(compile_to_ir(source).is_ok());
}

// ── Name resolution ──────────────────────────────────────────────────────

#[test]
fn undeclared_variable() {
    let source = "int main() { return x; }";
    assert_semantic_error(source, SemanticErrorKind::NotDecl);
}

#[test]
fn assignment_to_undeclared_variable() {
    let source = "int main() { x = 1; return 0; }";
    assert_semantic_error(source, SemanticErrorKind::NotDecl);
}

#[test]
fn call_to_undeclared_function() {
    let source = "int main() { return foo(); }";
    assert_semantic_error(source, SemanticErrorKind::NotDecl);
}

// ── Calls ────────────────────────────────────────────────────────────────

#[test]
fn argument_count_mismatch() {
    let source = "void foo(int a) { }\nint main() {\n  foo(1, 2);\n  return 0;\n}";
    match compile_to_ir(source) {
        Err(CompileError::Semantic { kind, line, .. }) => {
            assert_eq!(kind, SemanticErrorKind::TypeArg);
            assert_eq!(line, 3, "error should cite the call site");
        }
        other => panic!("expected type_arg, got {other:?}"),
    }
}

#[test]
fn too_few_arguments() {
    let source = "int add(int a, int b) { return a + b; } int main() { return add(1); }";
    assert_semantic_error(source, SemanticErrorKind::TypeArg);
}

#[test]
fn argument_type_mismatch() {
    let source = "void foo(int a) { } int main() { foo(1.5); return 0; }";
    assert_semantic_error(source, SemanticErrorKind::TypeArg);
}

// ── Returns ──────────────────────────────────────────────────────────────

#[test]
fn return_types_disagree_within_block() {
    let source = "int main() { return 0; return true; }";
    assert_semantic_error(source, SemanticErrorKind::TypeReturn);
}

#[test]
fn bool_returned_from_int_function() {
    let source = "int main() { return true; }";
    assert_semantic_error(source, SemanticErrorKind::TypeReturn);
}

#[test]
fn bare_return_in_int_function() {
    let source = "int main() { return; }";
    assert_semantic_error(source, SemanticErrorKind::TypeReturn);
}

#[test]
fn value_returned_from_void_function() {
    let source = "void f() { return 1; } int main() { return 0; }";
    assert_semantic_error(source, SemanticErrorKind::ReturnStatement);
}

#[test]
fn void_return_in_void_function_is_accepted() {
    let source = "void f() { return; } int main() { return 0; }";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn missing_return_is_accepted() {
    // A body with no return statement passes the return check even when the
    // function declares a non-void type.
    let source = "int main() { bool x; x = 1; }";
    assert!(compile_to_ir(source).is_ok());
}

// ── Error location accuracy ──────────────────────────────────────────────

#[test]
fn error_location_multiline() {
    let source = "int main() {\n  int x = 1;\n  y = 2;\n  return x;\n}";
    match compile_to_ir(source) {
        Err(CompileError::Semantic { kind, line, col, .. }) => {
            assert_eq!(kind, SemanticErrorKind::NotDecl);
            assert_eq!(line, 3, "error should be on line 3, got {line}");
            assert!(col >= 1, "error column should be >= 1, got {col}");
        }
        other => panic!("expected semantic error, got {other:?}"),
    }
}

// ── Helper ───────────────────────────────────────────────────────────────

fn assert_semantic_error(source: &str, expected: SemanticErrorKind) {
    match compile_to_ir(source) {
        Ok(_) => panic!("expected {expected:?} error, but compilation succeeded"),
        Err(CompileError::Semantic { kind, .. }) => {
            assert_eq!(kind, expected);
        }
        Err(other) => panic!("expected {expected:?} semantic error, got: {other:?}"),
    }
}
