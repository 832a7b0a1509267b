//! Token definitions for the Mini-C scanner.

use minicc_util::{Span, Symbol};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// The classification of a lexeme.
///
/// This is a closed enumeration: every byte sequence the scanner accepts
/// maps to exactly one of these kinds. Unrecognized bytes become
/// [`TokenKind::Unknown`] and are rejected by the parser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    /// "int" type keyword
    Int,
    /// "float" type keyword
    Float,
    /// "bool" type keyword
    Bool,
    /// "void" type keyword
    Void,
    /// "extern" declaration keyword
    Extern,
    /// "if" keyword
    If,
    /// "else" keyword
    Else,
    /// "while" keyword
    While,
    /// "return" keyword
    Return,

    // Identifiers and literals
    /// Identifier: `[A-Za-z_][A-Za-z0-9_]*`
    Ident(Symbol),
    /// Integer literal: a run of digits
    IntLit(i32),
    /// Float literal: digits with an embedded or leading decimal point
    FloatLit(f32),
    /// Boolean literal: `true` or `false`
    BoolLit(bool),

    // Punctuation
    /// "{"
    LBrace,
    /// "}"
    RBrace,
    /// "("
    LParen,
    /// ")"
    RParen,
    /// ";"
    Semi,
    /// ","
    Comma,

    // Operators
    /// "=" assignment
    Assign,
    /// "+"
    Plus,
    /// "-"
    Minus,
    /// "*"
    Star,
    /// "/"
    Slash,
    /// "%"
    Percent,
    /// "!" logical not
    Bang,
    /// "<"
    Lt,
    /// ">"
    Gt,
    /// "<="
    LtEq,
    /// ">="
    GtEq,
    /// "=="
    EqEq,
    /// "!="
    NotEq,
    /// "&&" logical and
    AndAnd,
    /// "||" logical or
    OrOr,

    // Bare `&` and `|` are lexed as punctuation; the grammar has no use
    // for them, so the parser rejects them.
    /// "&"
    Ampersand,
    /// "|"
    Pipe,

    /// End of file; returned repeatedly once the input is exhausted.
    Eof,

    /// A byte that does not begin any token.
    Unknown(char),
}

impl TokenKind {
    /// True for the three scalar type keywords (`int`, `float`, `bool`).
    pub fn is_var_type(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::Bool)
    }

    /// True for any type keyword, including `void`.
    pub fn is_type_spec(&self) -> bool {
        self.is_var_type() || matches!(self, TokenKind::Void)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Float => write!(f, "'float'"),
            TokenKind::Bool => write!(f, "'bool'"),
            TokenKind::Void => write!(f, "'void'"),
            TokenKind::Extern => write!(f, "'extern'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Ident(sym) => write!(f, "identifier '{}'", sym),
            TokenKind::IntLit(v) => write!(f, "integer literal '{}'", v),
            TokenKind::FloatLit(v) => write!(f, "float literal '{}'", v),
            TokenKind::BoolLit(v) => write!(f, "bool literal '{}'", v),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Semi => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::LtEq => write!(f, "'<='"),
            TokenKind::GtEq => write!(f, "'>='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
            TokenKind::Ampersand => write!(f, "'&'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Unknown(c) => write!(f, "character '{}'", c),
        }
    }
}

/// A classified lexeme with its exact source spelling and position.
///
/// `span` records the position of the lexeme's first character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    /// The token's classification.
    pub kind: TokenKind,
    /// The exact source spelling.
    pub lexeme: Symbol,
    /// Position of the first character.
    pub span: Span,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, lexeme: Symbol, span: Span) -> Self {
        Self { kind, lexeme, span }
    }
}

/// Look up the token kind for an identifier-shaped lexeme.
///
/// Returns the keyword kind for reserved words, `BoolLit` for `true` and
/// `false`, and `None` for ordinary identifiers.
pub fn keyword_from_ident(ident: &str) -> Option<TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    let table = KEYWORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("bool", TokenKind::Bool);
        map.insert("void", TokenKind::Void);
        map.insert("extern", TokenKind::Extern);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::BoolLit(true));
        map.insert("false", TokenKind::BoolLit(false));
        map
    });
    table.get(ident).copied()
}
