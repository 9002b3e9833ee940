//! Edge case tests for glyphc-sem
//!
//! Covers the end-to-end analysis of every literal program named in the
//! language's testable-properties scenarios, plus the designated
//! compile-error scenarios.

#[cfg(test)]
mod tests {
    use crate::passes::analyze;
    use crate::types::Type;
    use glyphc_util::Handler;

    fn analyze_source(source: &str) -> (bool, Handler) {
        let mut handler = Handler::new();
        let program = {
            let mut parser = glyphc_par::Parser::new(source, &mut handler);
            parser.parse_program().expect("should parse")
        };
        let result = analyze(&program, &mut handler);
        (result.is_some(), handler)
    }

    fn entry_return_type(source: &str) -> Type {
        let mut handler = Handler::new();
        let program = {
            let mut parser = glyphc_par::Parser::new(source, &mut handler);
            parser.parse_program().expect("should parse")
        };
        let (_ast, scopes, _registry) = analyze(&program, &mut handler).expect("should analyze cleanly");
        let sid = scopes.find(scopes.root(), glyphc_util::Symbol::intern("entry")).unwrap();
        match scopes.symbol_type(sid) {
            Some(Type::Function(sig)) => *sig.ret,
            other => panic!("entry should resolve to a function type, found {:?}", other),
        }
    }

    // ==================== END-TO-END SCENARIOS ====================

    #[test]
    fn test_scenario_arithmetic_precedence() {
        let source = "function entry():integer { return 1 + 2 * 3; }";
        let (ok, h) = analyze_source(source);
        assert!(ok, "{:?}", h.diagnostics());
        assert_eq!(entry_return_type(source), Type::Integer);
    }

    #[test]
    fn test_scenario_if_else_comparison() {
        let source = "function entry():integer { let x = 10; let y = 3; if (x > y) { return x - y; } else { return y - x; } }";
        let (ok, h) = analyze_source(source);
        assert!(ok, "{:?}", h.diagnostics());
    }

    #[test]
    fn test_scenario_for_loop_accumulator() {
        let source = "function entry():integer { let s = 0; for (let i = 0; i < 5; i++) { s = s + i; } return s; }";
        let (ok, h) = analyze_source(source);
        assert!(ok, "{:?}", h.diagnostics());
    }

    #[test]
    fn test_scenario_while_loop_with_break() {
        let source = "function entry():integer { let i = 0; while (i < 3) { i++; if (i == 2) { break; } } return i; }";
        let (ok, h) = analyze_source(source);
        assert!(ok, "{:?}", h.diagnostics());
    }

    #[test]
    fn test_scenario_array_index() {
        let source = "function entry():integer { let a = [10, 20, 30]; return a[2]; }";
        let (ok, h) = analyze_source(source);
        assert!(ok, "{:?}", h.diagnostics());
    }

    #[test]
    fn test_scenario_function_call() {
        let source = "function add(x:integer, y:integer):integer { return x+y; } function entry():integer { return add(40, 2); }";
        let (ok, h) = analyze_source(source);
        assert!(ok, "{:?}", h.diagnostics());
    }

    // ==================== COMPILE-ERROR SCENARIOS ====================

    #[test]
    fn test_error_duplicate_let_is_symbol_error() {
        let source = "function main() { let a = 1; let a = 2; }";
        let (ok, h) = analyze_source(source);
        assert!(!ok);
        assert!(h.has_errors());
    }

    #[test]
    fn test_error_inconsistent_return_types_is_type_error() {
        let source = "function main() { if (true) { return 1; } else { return true; } }";
        let (ok, h) = analyze_source(source);
        assert!(!ok);
        assert!(h.has_errors());
    }

    #[test]
    fn test_error_out_of_bounds_constant_index_is_range_error() {
        let source = "function main() { let a = [1, 2]; a[5]; }";
        let (ok, h) = analyze_source(source);
        assert!(!ok);
        assert!(h.has_errors());
    }

    #[test]
    fn test_error_non_boolean_if_condition_is_type_error() {
        let source = "function main() { if (1) { } }";
        let (ok, h) = analyze_source(source);
        assert!(!ok);
        assert!(h.has_errors());
    }

    // ==================== ADDITIONAL EDGE CASES ====================

    #[test]
    fn test_edge_empty_function_body_infers_void() {
        let source = "function main() { }";
        let mut handler = Handler::new();
        let program = {
            let mut parser = glyphc_par::Parser::new(source, &mut handler);
            parser.parse_program().expect("should parse")
        };
        let (_, scopes, _) = analyze(&program, &mut handler).expect("should analyze cleanly");
        let sid = scopes.find(scopes.root(), glyphc_util::Symbol::intern("main")).unwrap();
        match scopes.symbol_type(sid) {
            Some(Type::Function(sig)) => assert_eq!(*sig.ret, Type::Void),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_edge_mutually_recursive_functions_resolve() {
        let source = "function is_even(n:integer):integer { return is_odd(n); } function is_odd(n:integer):integer { return is_even(n); }";
        let (ok, h) = analyze_source(source);
        assert!(ok, "{:?}", h.diagnostics());
    }

    #[test]
    fn test_edge_deeply_nested_scopes_resolve_outer_names() {
        let source = "function main() { let x = 1; { { { { return x; } } } } }";
        let (ok, h) = analyze_source(source);
        assert!(ok, "{:?}", h.diagnostics());
    }

    #[test]
    fn test_edge_array_of_arrays_type_mismatch() {
        // heterogeneous array literal: different-sized arrays are different types.
        let source = "function main() { let a = [[1, 2], [3, 4, 5]]; }";
        let (ok, _) = analyze_source(source);
        assert!(!ok);
    }

    #[test]
    fn test_edge_assigning_mismatched_type_is_an_error() {
        let source = "function main() { let x = 1; x = true; }";
        let (ok, _) = analyze_source(source);
        assert!(!ok);
    }

    #[test]
    fn test_edge_calling_a_non_function_is_an_error() {
        let source = "function main() { let x = 1; x(); }";
        let (ok, _) = analyze_source(source);
        assert!(!ok);
    }

    #[test]
    fn test_edge_undefined_function_call_is_an_error() {
        let source = "function main() { undefined_fn(); }";
        let (ok, h) = analyze_source(source);
        assert!(!ok);
        assert!(h.has_errors());
    }

    #[test]
    fn test_edge_string_indexing_yields_char() {
        let source = "function main() { let s = \"hi\"; let c = s[0]; }";
        let (ok, h) = analyze_source(source);
        assert!(ok, "{:?}", h.diagnostics());
    }
}
