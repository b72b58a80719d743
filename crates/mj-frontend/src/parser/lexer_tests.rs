use super::lexer::{TokenKind, lex};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|t| t.kind).collect()
}

#[test]
fn keywords_match_any_case() {
    assert_eq!(
        kinds("program PROGRAM Program pRoGrAm"),
        vec![TokenKind::KwProgram; 4]
    );
    assert_eq!(
        kinds("CLASS Method VAL ref INT void IF Else WHILE Return"),
        vec![
            TokenKind::KwClass,
            TokenKind::KwMethod,
            TokenKind::KwVal,
            TokenKind::KwRef,
            TokenKind::KwInt,
            TokenKind::KwVoid,
            TokenKind::KwIf,
            TokenKind::KwElse,
            TokenKind::KwWhile,
            TokenKind::KwReturn,
        ]
    );
}

#[test]
fn keyword_prefix_is_an_identifier() {
    assert_eq!(kinds("classes interval"), vec![TokenKind::Ident; 2]);
}

#[test]
fn identifier_text_keeps_source_case() {
    let source = "Foo bar_2";
    let tokens = lex(source);
    assert_eq!(tokens[0].text(source), "Foo");
    assert_eq!(tokens[1].text(source), "bar_2");
}

#[test]
fn operators_and_punctuation() {
    assert_eq!(
        kinds(":= = == != <= >= < > + - * / && || ! ( ) { } [ ] ; , ."),
        vec![
            TokenKind::Assign,
            TokenKind::Eq,
            TokenKind::EqEq,
            TokenKind::BangEq,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Bang,
            TokenKind::ParenOpen,
            TokenKind::ParenClose,
            TokenKind::BraceOpen,
            TokenKind::BraceClose,
            TokenKind::BracketOpen,
            TokenKind::BracketClose,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Dot,
        ]
    );
}

#[test]
fn literals() {
    let source = r#"42 'x' "hello""#;
    let tokens = lex(source);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::IntLiteral,
            TokenKind::CharLiteral,
            TokenKind::StringLiteral,
        ]
    );
    assert_eq!(tokens[1].text(source), "'x'");
    assert_eq!(tokens[2].text(source), "\"hello\"");
}

#[test]
fn line_numbers_are_one_based() {
    let tokens = lex("a\nb\n\n  c");
    assert_eq!(
        tokens.iter().map(|t| t.line).collect::<Vec<_>>(),
        vec![1, 2, 4]
    );
}

#[test]
fn comments_are_skipped() {
    let source = "a // trailing\n/* block\n comment */ b";
    let tokens = lex(source);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Ident, TokenKind::Ident]
    );
    assert_eq!(tokens[1].line, 3);
}

#[test]
fn garbage_coalesces_error_runs() {
    let tokens = lex("a @#@ b");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Ident, TokenKind::Garbage, TokenKind::Ident]
    );
}

#[test]
fn garbage_at_end_of_input() {
    let tokens = lex("a @@");
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Garbage));
}
