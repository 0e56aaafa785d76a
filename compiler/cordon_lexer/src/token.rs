//! Cooked tokens.

use cordon_ir::Span;
use std::fmt;

/// A token with its location.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds.
///
/// Identifier text is recovered from the source through the token span;
/// unescaped string contents live in [`TokenList::strings`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    // Literals
    Ident,
    Int(i64),
    /// Float stored as bits so the kind stays `Eq + Hash`.
    Float(u64),
    /// Index into [`TokenList::strings`].
    Str(u32),

    // Keywords
    And,
    As,
    Assert,
    Break,
    Continue,
    Def,
    Del,
    Elif,
    Else,
    Except,
    Exec,
    Finally,
    For,
    From,
    Global,
    If,
    Import,
    In,
    Is,
    Lambda,
    Not,
    Or,
    Pass,
    Raise,
    Return,
    Try,
    While,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
    Semicolon,

    // Operators
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    Shl,
    Shr,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    Eq,

    // Augmented assignment
    PlusEq,
    MinusEq,
    StarEq,
    DoubleStarEq,
    SlashEq,
    DoubleSlashEq,
    PercentEq,
    ShlEq,
    ShrEq,
    AmpEq,
    PipeEq,
    CaretEq,

    // Layout
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl TokenKind {
    /// Human-readable description for "expected X, found Y" messages.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Ident => "identifier",
            Self::Int(_) => "integer literal",
            Self::Float(_) => "float literal",
            Self::Str(_) => "string literal",
            Self::And => "'and'",
            Self::As => "'as'",
            Self::Assert => "'assert'",
            Self::Break => "'break'",
            Self::Continue => "'continue'",
            Self::Def => "'def'",
            Self::Del => "'del'",
            Self::Elif => "'elif'",
            Self::Else => "'else'",
            Self::Except => "'except'",
            Self::Exec => "'exec'",
            Self::Finally => "'finally'",
            Self::For => "'for'",
            Self::From => "'from'",
            Self::Global => "'global'",
            Self::If => "'if'",
            Self::Import => "'import'",
            Self::In => "'in'",
            Self::Is => "'is'",
            Self::Lambda => "'lambda'",
            Self::Not => "'not'",
            Self::Or => "'or'",
            Self::Pass => "'pass'",
            Self::Raise => "'raise'",
            Self::Return => "'return'",
            Self::Try => "'try'",
            Self::While => "'while'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::Dot => "'.'",
            Self::Semicolon => "';'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::DoubleStar => "'**'",
            Self::Slash => "'/'",
            Self::DoubleSlash => "'//'",
            Self::Percent => "'%'",
            Self::Shl => "'<<'",
            Self::Shr => "'>>'",
            Self::Amp => "'&'",
            Self::Pipe => "'|'",
            Self::Caret => "'^'",
            Self::Tilde => "'~'",
            Self::Lt => "'<'",
            Self::Gt => "'>'",
            Self::LtEq => "'<='",
            Self::GtEq => "'>='",
            Self::EqEq => "'=='",
            Self::NotEq => "'!='",
            Self::Eq => "'='",
            Self::PlusEq => "'+='",
            Self::MinusEq => "'-='",
            Self::StarEq => "'*='",
            Self::DoubleStarEq => "'**='",
            Self::SlashEq => "'/='",
            Self::DoubleSlashEq => "'//='",
            Self::PercentEq => "'%='",
            Self::ShlEq => "'<<='",
            Self::ShrEq => "'>>='",
            Self::AmpEq => "'&='",
            Self::PipeEq => "'|='",
            Self::CaretEq => "'^='",
            Self::Newline => "newline",
            Self::Indent => "indent",
            Self::Dedent => "dedent",
            Self::Eof => "end of input",
        }
    }

    /// Check discriminant equality, ignoring literal payloads.
    #[inline]
    pub fn same_kind(self, other: TokenKind) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Lexer output.
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    /// Tokens, always terminated by `Eof`.
    pub tokens: Vec<Token>,
    /// Unescaped string literal contents referenced by `TokenKind::Str`.
    pub strings: Vec<String>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Contents of a string literal token.
    pub fn string(&self, index: u32) -> &str {
        self.strings.get(index as usize).map_or("", String::as_str)
    }

    /// Token kinds only, for tests and debugging.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}
