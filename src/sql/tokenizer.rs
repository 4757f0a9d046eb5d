use crate::sql::{function::Builtin, keyword::Keyword, token::Token, token_kind::TokenKind};

/// Lenient SQL tokenizer producing a flat stream of `Token`s.
///
/// Scope / Intent:
/// - Designed for live syntax highlighting of SQL while it is still
///   streaming in from the backend.
/// - Accepts incomplete / syntactically invalid SQL (e.g. `SELECT FROM`,
///   a string literal cut off mid‑stream).
/// - Classifies against the fixed vocabularies in `keyword.rs` and
///   `function.rs`, with a call‑site heuristic for unknown function names.
///
/// Behavior, in priority order at each position:
/// - Aggregates whitespace runs into one token (highlighters must emit them,
///   not skip them, so rendering preserves layout).
/// - `--` line comments run to the end of the line, newline excluded.
/// - `'` strings run to the next `'`; no escape handling, and an
///   unterminated literal absorbs the rest of the input.
/// - Digit‑led runs of digits and `.` are numbers (multi‑dot runs accepted;
///   this is a highlighter, not a validator).
/// - `[A-Za-z_][A-Za-z0-9_]*` words classify as keyword, builtin function,
///   heuristic function (next non‑whitespace char is `(`), or identifier.
/// - Single characters from `= < > ! + - * / , ; ( ) .` are operators;
///   everything else is `Plain(char)`.
///
/// Guarantees:
/// - Never panics on valid UTF‑8; spans always fall on char boundaries.
/// - Never returns an error (malformed constructs still yield tokens).
/// - Tokens are contiguous and cover the input: concatenating their `text()`
///   reconstructs the input exactly.
/// - Pure and stateless, so re‑running on a grown buffer is always safe.
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = sql.as_bytes();
    let mut i = 0;

    while let Some(c) = sql[i..].chars().next() {
        let start = i;

        // Whitespace run
        if c.is_whitespace() {
            i += c.len_utf8();
            while let Some(w) = sql[i..].chars().next() {
                if !w.is_whitespace() {
                    break;
                }
                i += w.len_utf8();
            }
            out.push(Token::new(TokenKind::Whitespace, start, i));
            continue;
        }

        // Line comment: `--` to end of line, newline excluded
        if c == '-' && bytes.get(i + 1) == Some(&b'-') {
            i += 2;
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            out.push(Token::new(TokenKind::Comment, start, i));
            continue;
        }

        // String literal: stops at the first subsequent quote, no escapes
        if c == '\'' {
            i += 1;
            while i < bytes.len() && bytes[i] != b'\'' {
                i += 1;
            }
            if i < bytes.len() {
                i += 1; // closing quote
            }
            out.push(Token::new(TokenKind::Str, start, i));
            continue;
        }

        // Numeric literal
        if c.is_ascii_digit() {
            i += 1;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            out.push(Token::new(TokenKind::Number, start, i));
            continue;
        }

        // Word path: keyword / builtin / called-like-a-function / identifier
        if c.is_ascii_alphabetic() || c == '_' {
            i += 1;
            while i < bytes.len() {
                let w = bytes[i];
                if w.is_ascii_alphanumeric() || w == b'_' {
                    i += 1;
                } else {
                    break;
                }
            }
            let lower = sql[start..i].to_ascii_lowercase();
            let kind = if let Some(kw) = Keyword::from_lower(&lower) {
                TokenKind::Keyword(kw)
            } else if let Some(f) = Builtin::from_lower(&lower) {
                TokenKind::Function(Some(f))
            } else if call_follows(sql, i) {
                TokenKind::Function(None)
            } else {
                TokenKind::Ident
            };
            out.push(Token::new(kind, start, i));
            continue;
        }

        // Operator / punctuation characters
        if matches!(
            c,
            '=' | '<' | '>' | '!' | '+' | '-' | '*' | '/' | ',' | ';' | '(' | ')' | '.'
        ) {
            i += 1;
            out.push(Token::new(TokenKind::Operator(c), start, i));
            continue;
        }

        // Fallback: single unclassified character
        i += c.len_utf8();
        out.push(Token::new(TokenKind::Plain(c), start, i));
    }

    out
}

/// True if the next non-whitespace character at or after `i` is `(`.
fn call_follows(sql: &str, mut i: usize) -> bool {
    while let Some(c) = sql[i..].chars().next() {
        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }
        return c == '(';
    }
    false
}
