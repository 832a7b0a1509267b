//! Position fidelity property.
//!
//! For every token the scanner produces, the recorded span identifies the
//! token's first character: re-scanning the source from that byte offset
//! reproduces the same token.

use minicc_lex::{Lexer, TokenKind};
use proptest::prelude::*;

/// One arbitrary Mini-C lexeme.
fn lexeme() -> impl Strategy<Value = String> {
    prop_oneof![
        // identifiers and keywords
        "[a-z_][a-z0-9_]{0,8}",
        // integer literals
        (0u32..=99_999u32).prop_map(|n| n.to_string()),
        // float literals
        (0u32..=999u32, 0u32..=999u32).prop_map(|(a, b)| format!("{}.{}", a, b)),
        // operators and punctuation
        prop_oneof![
            Just("=="), Just("!="), Just("<="), Just(">="), Just("&&"), Just("||"),
            Just("="), Just("!"), Just("<"), Just(">"),
            Just("+"), Just("-"), Just("*"), Just("/"), Just("%"),
            Just("{"), Just("}"), Just("("), Just(")"), Just(";"), Just(","),
        ]
        .prop_map(|s: &str| s.to_string()),
    ]
}

/// A source line assembled from space-separated lexemes.
fn source() -> impl Strategy<Value = String> {
    proptest::collection::vec(lexeme(), 0..40).prop_map(|parts| parts.join(" "))
}

fn lex_to_end(source: &str) -> Vec<minicc_lex::Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        if tok.kind == TokenKind::Eof {
            break;
        }
        tokens.push(tok);
    }
    tokens
}

proptest! {
    #[test]
    fn rescanning_from_token_start_reproduces_the_token(src in source()) {
        for tok in lex_to_end(&src) {
            let mut rescan = Lexer::new(&src[tok.span.start..]);
            let again = rescan.next_token();
            prop_assert_eq!(again.kind, tok.kind);
            prop_assert_eq!(again.lexeme, tok.lexeme);
        }
    }

    #[test]
    fn spans_cover_the_exact_lexeme(src in source()) {
        for tok in lex_to_end(&src) {
            prop_assert_eq!(&src[tok.span.start..tok.span.end], tok.lexeme.as_str());
        }
    }
}
