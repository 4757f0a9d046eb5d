//! Lightweight, lenient SQL tokenization / highlighting module.
//!
//! This module groups the building blocks used to colorize generated SQL as
//! it streams in from the backend, without requiring a full parser. The
//! components are intentionally pragmatic:
//!
//! Modules:
//! - `keyword`    : Enum of the SQL reserved words the highlighter styles.
//! - `function`   : Enum of builtin function names, plus room for the
//!   call‑site heuristic in the tokenizer.
//! - `token_kind` : Classification of lexical atoms.
//! - `token`      : Token struct pairing a `TokenKind` with source span offsets.
//! - `tokenizer`  : Single pass O(n) tokenizer producing a `Vec<Token>` from raw SQL.
//! - `highlight`  : Fixed kind → color mapping and an ANSI renderer.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid SQL (robust while the
//!    statement is still arriving).
//! 2. Tokens carry spans, not copies; concatenated they cover the input
//!    exactly, so rendering preserves layout byte for byte.
//! 3. Re‑tokenize from scratch on every update. Inputs are single
//!    statements, small enough that incremental state is not worth having.
//! 4. Never fail: worst case everything classifies as operator/plain.
//!
//! NOTE: This is **not** a SQL parser and intentionally ignores constructs
//! that do not change how text is colored.

pub mod function;
pub mod highlight;
pub mod keyword;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use function::Builtin;
pub use highlight::{Rgb, color, render_ansi};
pub use keyword::Keyword;
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;

/// Convenience prelude re‑exporting the most commonly used items.
pub mod prelude {
    pub use super::{Builtin, Keyword, Token, TokenKind, render_ansi, tokenize};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_and_access() {
        let sql = "SELECT col FROM tbl";
        let tokens = tokenize(sql);
        assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
        assert!(tokens.iter().any(|t| t.is_keyword(Keyword::From)));
        assert!(
            tokens
                .iter()
                .any(|t| t.kind == TokenKind::Ident && t.text(sql) == "col")
        );
    }

    #[test]
    fn prelude_import_works() {
        use super::prelude::*;
        let toks = tokenize("FROM X");
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::From)));
    }
}
