//! String literal unescaping.
//!
//! Recognised escapes: `\n` `\t` `\r` `\\` `\'` `\"` `\0` `\xHH` `\u{H..}`.
//! Any other backslash sequence is kept verbatim, backslash included.

use crate::lex_error::{LexError, LexErrorKind};
use cordon_ir::Span;

/// Unescape the contents of a string literal (quotes already stripped).
///
/// `base` is the byte offset of `content` in the source, used to locate
/// malformed escapes.
pub(crate) fn unescape(content: &str, base: u32) -> Result<String, LexError> {
    if !content.contains('\\') {
        return Ok(content.to_owned());
    }

    let mut out = String::with_capacity(content.len());
    let mut chars = content.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'x' => {
                let digits: String = (0..2)
                    .map_while(|_| chars.next_if(|(_, d)| d.is_ascii_hexdigit()).map(|(_, d)| d))
                    .collect();
                let decoded = (digits.len() == 2)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => out.push(ch),
                    None => return Err(bad_escape(content, base, i, 2 + digits.len())),
                }
            }
            'u' => {
                if chars.next_if(|&(_, d)| d == '{').is_none() {
                    return Err(bad_escape(content, base, i, 2));
                }
                let mut digits = String::new();
                let mut closed = false;
                while let Some((_, d)) = chars.next() {
                    if d == '}' {
                        closed = true;
                        break;
                    }
                    digits.push(d);
                }
                let decoded = (closed && !digits.is_empty() && digits.len() <= 6)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => out.push(ch),
                    None => {
                        let len = 3 + digits.len() + usize::from(closed);
                        return Err(bad_escape(content, base, i, len));
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets are bounded by u32"
)]
fn bad_escape(content: &str, base: u32, at: usize, len: usize) -> LexError {
    let end = (at + len).min(content.len());
    let mut end = end;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    let text = content[at..end].to_owned();
    let span = Span::new(base + at as u32, base + end as u32);
    LexError::new(LexErrorKind::InvalidEscape(text), span)
}
