//! Fuzz tests for lexer and parser crash resistance.
//!
//! Property-based tests checking that the lexer and parser never panic,
//! whatever the input looks like.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::token::TokenKind;
    use crate::{Lexer, parse_module, parse_type};

    fn tokenize_all(input: &str) {
        let mut lexer = Lexer::new(input);
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::Eof {
                break;
            }
        }
    }

    // ==========================================================================
    // Generators
    // ==========================================================================

    /// Completely random strings.
    fn arbitrary_string() -> impl Strategy<Value = String> {
        prop::collection::vec(any::<char>(), 0..500).prop_map(|chars| chars.into_iter().collect())
    }

    /// Strings assembled from TypeScript-looking fragments.
    fn typescript_like_string() -> impl Strategy<Value = String> {
        let fragment = prop_oneof![
            "[a-zA-Z_][a-zA-Z0-9_]*".prop_map(String::from),
            "[0-9]+(\\.[0-9]+)?".prop_map(String::from),
            r#""[^"\\\n]*""#.prop_map(String::from),
            "'[^'\\\\\n]*'".prop_map(String::from),
            Just("class".to_string()),
            Just("extends".to_string()),
            Just("import".to_string()),
            Just("from".to_string()),
            Just("static".to_string()),
            Just("Realm.Object".to_string()),
            Just("Types.List<".to_string()),
            Just("@index".to_string()),
            Just("`t${x}`".to_string()),
            Just("=>".to_string()),
        ];
        let punct = prop_oneof![
            Just("{".to_string()),
            Just("}".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just("<".to_string()),
            Just(">".to_string()),
            Just(":".to_string()),
            Just(";".to_string()),
            Just("?".to_string()),
            Just("!".to_string()),
            Just("=".to_string()),
            Just("|".to_string()),
            Just(",".to_string()),
            Just(" ".to_string()),
            Just("\n".to_string()),
            Just("/".to_string()),
        ];
        prop::collection::vec(prop_oneof![fragment, punct], 0..120).prop_map(|parts| parts.join(""))
    }

    /// Well-formed model classes with random property names.
    fn model_class() -> impl Strategy<Value = String> {
        let ty = prop_oneof![
            Just("string".to_string()),
            Just("number".to_string()),
            Just("Types.Int".to_string()),
            Just("Types.List<string>".to_string()),
            Just("Realm.Dictionary<Types.Mixed>".to_string()),
            Just("Date | undefined".to_string()),
        ];
        prop::collection::vec(("[a-z][a-zA-Z0-9]{0,8}", ty), 0..12).prop_map(|props| {
            let body: String = props
                .into_iter()
                .map(|(name, ty)| format!("  {name}!: {ty};\n"))
                .collect();
            format!("import Realm from \"realm\";\nclass Model extends Realm.Object {{\n{body}}}\n")
        })
    }

    /// Nested parentheses inside a property initializer.
    fn deeply_nested() -> impl Strategy<Value = String> {
        (1..100usize).prop_map(|depth| {
            let open: String = std::iter::repeat_n('(', depth).collect();
            let close: String = std::iter::repeat_n(')', depth).collect();
            format!("class A extends Object {{ a = {open}1{close}; }}")
        })
    }

    // ==========================================================================
    // Lexer
    // ==========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Lexer never panics on arbitrary input.
        #[test]
        fn lexer_never_panics_on_arbitrary_input(input in arbitrary_string()) {
            tokenize_all(&input);
        }

        /// Lexer never panics on TypeScript-like input.
        #[test]
        fn lexer_never_panics_on_typescript_like_input(input in typescript_like_string()) {
            tokenize_all(&input);
        }

        /// Token spans always lie on character boundaries.
        #[test]
        fn token_spans_are_sliceable(input in arbitrary_string()) {
            for token in Lexer::tokenize_all(&input) {
                prop_assert!(input.get(token.span.start..token.span.end).is_some());
            }
        }
    }

    // ==========================================================================
    // Parser
    // ==========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Parser never panics on arbitrary input.
        #[test]
        fn parser_never_panics_on_arbitrary_input(input in arbitrary_string()) {
            let _ = parse_module(&input);
        }

        /// Parser never panics on TypeScript-like input.
        #[test]
        fn parser_never_panics_on_typescript_like_input(input in typescript_like_string()) {
            let _ = parse_module(&input);
            let _ = parse_type(&input);
        }

        /// Parser handles deeply nested initializers.
        #[test]
        fn parser_handles_deep_nesting(input in deeply_nested()) {
            prop_assert!(parse_module(&input).is_ok());
        }

        /// Well-formed model classes always parse with every property.
        #[test]
        fn model_classes_parse(input in model_class()) {
            let module = parse_module(&input);
            prop_assert!(module.is_ok(), "failed to parse: {}", input);
            let module = module.unwrap();
            let class = module.classes().next();
            prop_assert!(class.is_some());
            let expected = input.matches("!:").count();
            prop_assert_eq!(class.unwrap().properties().count(), expected);
        }
    }

    // ==========================================================================
    // Edge cases
    // ==========================================================================

    #[test]
    fn parser_handles_empty_input() {
        let module = parse_module("").unwrap();
        assert!(module.items.is_empty());
    }

    #[test]
    fn parser_handles_only_comments() {
        let module = parse_module("// a comment\n/* another */").unwrap();
        assert!(module.items.is_empty());
    }

    #[test]
    fn parser_handles_mismatched_delimiters() {
        let _ = parse_module("(])([}({)]");
        assert!(parse_module("class A extends Object { a = ; }").is_err());
    }

    #[test]
    fn parser_handles_very_long_identifier() {
        let name = "x".repeat(10_000);
        let source = format!("class A extends Object {{ {name} = 1 }}");
        let module = parse_module(&source).unwrap();
        assert_eq!(module.classes().next().unwrap().properties().count(), 1);
    }

    #[test]
    fn lexer_handles_unterminated_constructs() {
        for input in ["\"", "'", "`", "`${", "/*", "/[", "#", "0x", "1e", "\\u"] {
            tokenize_all(input);
            let _ = parse_module(input);
        }
    }
}
