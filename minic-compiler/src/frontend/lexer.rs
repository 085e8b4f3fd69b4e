use crate::ast::Loc;
use logos::Logos;
use std::fmt;
use thiserror::Error;

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n]+")] // Whitespace
#[logos(skip r"//[^\n]*")] // Line comments
pub enum Token {
    // --- Keywords ---
    #[token("if")]
    If,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,

    #[token("true")]
    True,
    #[token("false")]
    False,

    #[token("void")]
    Void,
    #[token("bool")]
    Bool,
    #[token("int")]
    Int,
    #[token("float")]
    Float,

    // --- Identifiers and literals ---
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+", |lex| lex.slice().parse().ok())]
    FloatLit(f32),

    #[regex(r"[0-9]+", |lex| lex.slice().parse().ok())]
    IntLit(i32),

    // --- Operators ---
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LessEq,
    #[token(">=")]
    GreaterEq,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,

    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("=")]
    Assign,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // --- Punctuation ---
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::If => write!(f, "if"),
            Token::While => write!(f, "while"),
            Token::For => write!(f, "for"),
            Token::Break => write!(f, "break"),
            Token::Continue => write!(f, "continue"),
            Token::Return => write!(f, "return"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Void => write!(f, "void"),
            Token::Bool => write!(f, "bool"),
            Token::Int => write!(f, "int"),
            Token::Float => write!(f, "float"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::FloatLit(v) => write!(f, "{v}"),
            Token::IntLit(v) => write!(f, "{v}"),
            Token::EqEq => write!(f, "=="),
            Token::NotEq => write!(f, "!="),
            Token::LessEq => write!(f, "<="),
            Token::GreaterEq => write!(f, ">="),
            Token::Less => write!(f, "<"),
            Token::Greater => write!(f, ">"),
            Token::AndAnd => write!(f, "&&"),
            Token::OrOr => write!(f, "||"),
            Token::PlusAssign => write!(f, "+="),
            Token::MinusAssign => write!(f, "-="),
            Token::StarAssign => write!(f, "*="),
            Token::SlashAssign => write!(f, "/="),
            Token::Assign => write!(f, "="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Question => write!(f, "?"),
            Token::Colon => write!(f, ":"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected character '{ch}' at {line}:{col}")]
pub struct LexicalError {
    pub ch: char,
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets to 1-based line/column positions.
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                starts.push(i + 1);
            }
        }
        Self { line_starts: starts }
    }

    pub fn locate(&self, byte: usize) -> Loc {
        match self.line_starts.binary_search(&byte) {
            Ok(line_idx) => Loc {
                line: line_idx as u32 + 1,
                column: 1,
            },
            Err(insert_pos) => {
                let line_idx = insert_pos - 1;
                Loc {
                    line: line_idx as u32 + 1,
                    column: (byte - self.line_starts[line_idx]) as u32 + 1,
                }
            }
        }
    }
}

/// Tokenize source text, pairing each token with its position.
pub fn lex(source: &str) -> Result<Vec<(Token, Loc)>, LexicalError> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let loc = index.locate(span.start);
        match result {
            Ok(token) => tokens.push((token, loc)),
            Err(()) => {
                let ch = source[span.start..].chars().next().unwrap_or('\0');
                return Err(LexicalError {
                    ch,
                    line: loc.line,
                    col: loc.column,
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_idents() {
        let tokens = lex("int main intx").unwrap();
        assert_eq!(tokens[0].0, Token::Int);
        assert_eq!(tokens[1].0, Token::Ident("main".to_string()));
        assert_eq!(tokens[2].0, Token::Ident("intx".to_string()));
    }

    #[test]
    fn number_literals() {
        let tokens = lex("42 3.5 .25 7.").unwrap();
        assert_eq!(tokens[0].0, Token::IntLit(42));
        assert_eq!(tokens[1].0, Token::FloatLit(3.5));
        assert_eq!(tokens[2].0, Token::FloatLit(0.25));
        assert_eq!(tokens[3].0, Token::FloatLit(7.0));
    }

    #[test]
    fn compound_operators() {
        let tokens = lex("+= == = <=").unwrap();
        assert_eq!(tokens[0].0, Token::PlusAssign);
        assert_eq!(tokens[1].0, Token::EqEq);
        assert_eq!(tokens[2].0, Token::Assign);
        assert_eq!(tokens[3].0, Token::LessEq);
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = lex("int\n  x").unwrap();
        assert_eq!(tokens[0].1, Loc { line: 1, column: 1 });
        assert_eq!(tokens[1].1, Loc { line: 2, column: 3 });
    }

    #[test]
    fn rejects_unknown_character() {
        let err = lex("int @").unwrap_err();
        assert_eq!(err.ch, '@');
        assert_eq!(err.line, 1);
        assert_eq!(err.col, 5);
    }
}
