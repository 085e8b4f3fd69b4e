use minic_compiler::{compile_to_ast, compile_to_ir, sema, CompileError, SemanticErrorKind};

// ── Whole-program acceptance ─────────────────────────────────────────────

#[test]
fn minimal_program() {
    assert!(compile_to_ir("int main() { return 0; }").is_ok());
}

#[test]
fn forward_calls_resolve() {
    // Registration runs before body checks, so definition order is free.
    let source = "int main() { return helper(); } int helper() { return 7; }";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn declared_function_is_callable() {
    let source = "int f(int a); int main() { return f(1); }";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn loop_variable_stays_visible_after_the_loop() {
    // Flat per-block naming: a for-clause declaration lands in the
    // enclosing block's scope.
    let source = "int main() { for (int i = 0; i < 3; i += 1) { } return i; }";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn euclid_remainder_loop() {
    let source = "
        int gcd(int a, int b) {
            while (b != 0) {
                int t = b;
                b = a - a / b * b;
                a = t;
            }
            return a;
        }
        int main() { return gcd(12, 18); }
    ";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn nested_loops_with_break_and_continue() {
    let source = "
        int main() {
            int count = 0;
            for (int i = 0; i < 10; i += 1) {
                int j = 0;
                while (j < 10) {
                    j += 1;
                    if (j == 5) { continue; }
                    if (j == 8) { break; }
                    count += 1;
                }
            }
            return count;
        }
    ";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn mixed_types_with_casts() {
    let source = "
        float average(int total, int n) {
            return (float) total / (float) n;
        }
        int main() {
            float a = average(7, 2);
            return (int) a;
        }
    ";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn ternary_and_short_circuit_in_one_expression() {
    let source = "
        int clamp(int x, int lo, int hi) {
            return x < lo ? lo : x > hi ? hi : x;
        }
        int main() {
            bool strict = true;
            if (strict && clamp(5, 0, 3) == 3) { return 1; }
            return 0;
        }
    ";
    assert!(compile_to_ir(source).is_ok());
}

#[test]
fn statements_after_a_return_still_compile() {
    let source = "int main() { while (true) { return 0; break; } return 1; }";
    assert!(compile_to_ir(source).is_ok());
}

// ── Verifier idempotence ─────────────────────────────────────────────────
// Symbol tables are rebuilt per run, so a second pass over the same tree
// reports exactly the same outcome.

#[test]
fn verify_twice_on_a_valid_tree() {
    let program = compile_to_ast("int main() { int x = 0; return x; }").unwrap();
    assert!(sema::verify(&program).is_ok());
    assert!(sema::verify(&program).is_ok());
}

#[test]
fn verify_twice_reports_the_same_error() {
    let program = compile_to_ast("int main() { return ghost; }").unwrap();
    let first = error_kind(sema::verify(&program));
    let second = error_kind(sema::verify(&program));
    assert_eq!(first, SemanticErrorKind::NotDecl);
    assert_eq!(first, second);
}

#[test]
fn verify_twice_does_not_invent_duplicates() {
    // Re-running must not double-insert declarations and fire a spurious
    // duplicate_decl.
    let program = compile_to_ast("void f(int a) { int x; } int main() { return 0; }").unwrap();
    assert!(sema::verify(&program).is_ok());
    assert!(sema::verify(&program).is_ok());
}

fn error_kind(result: Result<(), CompileError>) -> SemanticErrorKind {
    match result {
        Err(CompileError::Semantic { kind, .. }) => kind,
        other => panic!("expected a semantic error, got {other:?}"),
    }
}
