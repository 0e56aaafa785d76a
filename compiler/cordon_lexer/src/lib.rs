//! Lexer for Cordon source text using logos.
//!
//! Produces a [`TokenList`] terminated by `Eof`, with indentation already
//! resolved into `Newline`/`Indent`/`Dedent` tokens. Literal values are
//! cooked here: integers are range-checked, floats parsed, strings
//! unescaped.

mod escape;
mod layout;
mod lex_error;
mod raw_token;
mod token;

use cordon_ir::Span;
use logos::Logos;
use tracing::trace;

use layout::Layout;
use raw_token::RawToken;

pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenKind, TokenList};

/// Tokenize `source`.
///
/// Stops at the first malformed token.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut lexer = RawToken::lexer(source);
    let mut layout = Layout::new(source);
    let mut strings = Vec::new();

    while let Some(raw) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let slice = lexer.slice();

        let Ok(raw) = raw else {
            return Err(unexpected(slice, span));
        };

        if raw == RawToken::Newline {
            layout.newline(span);
            continue;
        }

        let kind = convert(raw, slice, span, &mut strings)?;
        layout.token(Token::new(kind, span))?;
    }

    let tokens = layout.finish();
    trace!(count = tokens.len(), "lexed");
    Ok(TokenList { tokens, strings })
}

fn unexpected(slice: &str, span: Span) -> LexError {
    match slice.chars().next() {
        Some('"' | '\'') => LexError::new(LexErrorKind::UnterminatedString, span),
        Some(c) => LexError::new(LexErrorKind::UnexpectedCharacter(c), span),
        None => LexError::new(LexErrorKind::UnexpectedCharacter('\0'), span),
    }
}

fn parse_int(digits: &str, radix: u32, span: Span) -> Result<TokenKind, LexError> {
    let clean: String = digits.chars().filter(|&c| c != '_').collect();
    i64::from_str_radix(&clean, radix)
        .map(TokenKind::Int)
        .map_err(|_| LexError::new(LexErrorKind::IntOverflow, span))
}

/// Convert a raw token to a cooked `TokenKind`.
fn convert(
    raw: RawToken,
    slice: &str,
    span: Span,
    strings: &mut Vec<String>,
) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Newline => TokenKind::Newline,

        // Keywords
        RawToken::And => TokenKind::And,
        RawToken::As => TokenKind::As,
        RawToken::Assert => TokenKind::Assert,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Def => TokenKind::Def,
        RawToken::Del => TokenKind::Del,
        RawToken::Elif => TokenKind::Elif,
        RawToken::Else => TokenKind::Else,
        RawToken::Except => TokenKind::Except,
        RawToken::Exec => TokenKind::Exec,
        RawToken::Finally => TokenKind::Finally,
        RawToken::For => TokenKind::For,
        RawToken::From => TokenKind::From,
        RawToken::Global => TokenKind::Global,
        RawToken::If => TokenKind::If,
        RawToken::Import => TokenKind::Import,
        RawToken::In => TokenKind::In,
        RawToken::Is => TokenKind::Is,
        RawToken::Lambda => TokenKind::Lambda,
        RawToken::Not => TokenKind::Not,
        RawToken::Or => TokenKind::Or,
        RawToken::Pass => TokenKind::Pass,
        RawToken::Raise => TokenKind::Raise,
        RawToken::Return => TokenKind::Return,
        RawToken::Try => TokenKind::Try,
        RawToken::While => TokenKind::While,

        // Literals
        RawToken::Ident => TokenKind::Ident,
        RawToken::Int => parse_int(slice, 10, span)?,
        RawToken::HexInt => parse_int(&slice[2..], 16, span)?,
        RawToken::OctInt => parse_int(&slice[2..], 8, span)?,
        RawToken::BinInt => parse_int(&slice[2..], 2, span)?,
        RawToken::Float => {
            let clean: String = slice.chars().filter(|&c| c != '_').collect();
            let value: f64 = clean
                .parse()
                .map_err(|_| LexError::new(LexErrorKind::FloatParseError, span))?;
            TokenKind::Float(value.to_bits())
        }
        RawToken::Str => {
            let content = &slice[1..slice.len() - 1];
            let text = escape::unescape(content, span.start + 1)?;
            let index = u32::try_from(strings.len()).unwrap_or(u32::MAX);
            strings.push(text);
            TokenKind::Str(index)
        }

        // Delimiters
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Semicolon => TokenKind::Semicolon,

        // Operators
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::DoubleStar => TokenKind::DoubleStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::DoubleSlash => TokenKind::DoubleSlash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::DoubleStarEq => TokenKind::DoubleStarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::DoubleSlashEq => TokenKind::DoubleSlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::ShlEq => TokenKind::ShlEq,
        RawToken::ShrEq => TokenKind::ShrEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,
    };
    Ok(kind)
}
