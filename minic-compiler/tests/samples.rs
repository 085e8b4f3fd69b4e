use minic_compiler::compile_to_ir;

// ── Sample program compilation ───────────────────────────────────────────
// Verify that the sample .mn files compile to IR without errors.

#[test]
fn compile_gcd_mn() {
    let source =
        std::fs::read_to_string("../samples/gcd.mn").expect("Failed to read samples/gcd.mn");
    let module = compile_to_ir(&source).expect("gcd.mn should compile");
    assert!(module.get_function("gcd").is_some());
    assert!(module.get_function("main").is_some());
}

#[test]
fn compile_clamp_mn() {
    let source =
        std::fs::read_to_string("../samples/clamp.mn").expect("Failed to read samples/clamp.mn");
    let module = compile_to_ir(&source).expect("clamp.mn should compile");
    // The ternary chain in clamp produces value merges.
    let text = module.to_lines().join("\n");
    assert!(text.contains("phi"));
}

#[test]
fn compile_loops_mn() {
    let source =
        std::fs::read_to_string("../samples/loops.mn").expect("Failed to read samples/loops.mn");
    let module = compile_to_ir(&source).expect("loops.mn should compile");
    assert!(!module.to_lines().is_empty());
}
