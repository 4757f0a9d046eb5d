//! Token kind definitions for the highlighting SQL tokenizer.
//!
//! Each `TokenKind` variant represents a syntactic atom discovered during the
//! lenient scanning phase. The tokenizer avoids strict SQL rules; anything
//! unrecognized becomes `Plain(char)`.
//!
//! Design goals:
//! - One variant per display treatment: the renderer maps kinds to colors
//!   without inspecting token text.
//! - Carry payloads only where a consumer needs them (`Keyword`, the known
//!   `Builtin` behind `Function`, and the raw char for operators/fallback).
//! - Provide ergonomic helpers (`is_keyword`, `is_function`) to avoid verbose
//!   pattern matches at call sites.
//!
//! See `keyword.rs` / `function.rs` for the vocabularies and `tokenizer.rs`
//! for tokenization.

use crate::sql::{function::Builtin, keyword::Keyword};

/// Classification for a token produced by the tokenizer.
///
/// Not a full SQL lexeme set; intentionally small and pragmatic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Maximal run of whitespace characters.
    Whitespace,
    /// `--` line comment, up to but not including the terminating newline.
    Comment,
    /// `'`‑delimited string literal. No escape handling; an unterminated
    /// literal absorbs the rest of the input.
    Str,
    /// Digit‑led numeric literal (lenient: multiple dots are accepted).
    Number,
    /// Recognized SQL keyword.
    Keyword(Keyword),
    /// Function name: a known builtin, or `None` for an unknown word that is
    /// immediately called (next non‑whitespace char is `(`).
    Function(Option<Builtin>),
    /// Table / alias / column / generic identifier.
    Ident,
    /// Single operator or punctuation character from the fixed set.
    Operator(char),
    /// Any other single character we do not specially classify.
    Plain(char),
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// True if this token classifies as a function name, builtin or heuristic.
    pub fn is_function(&self) -> bool {
        matches!(self, TokenKind::Function(_))
    }

    /// Convenience: returns true if this token represents any identifier.
    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident)
    }

    /// True for tokens that carry no visible glyphs.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::function::Builtin;
    use crate::sql::keyword::Keyword;

    #[test]
    fn keyword_detection() {
        let tk = TokenKind::Keyword(Keyword::Select);
        assert!(tk.is_keyword(Keyword::Select));
        assert!(!tk.is_keyword(Keyword::From));
        assert!(!tk.is_ident());
    }

    #[test]
    fn function_detection() {
        assert!(TokenKind::Function(Some(Builtin::Count)).is_function());
        assert!(TokenKind::Function(None).is_function());
        assert!(!TokenKind::Ident.is_function());
    }

    #[test]
    fn whitespace_detection() {
        assert!(TokenKind::Whitespace.is_whitespace());
        assert!(!TokenKind::Comment.is_whitespace());
        assert!(!TokenKind::Operator(',').is_whitespace());
    }
}
