//! Fixed display mapping from `TokenKind` to colors, plus an ANSI renderer.
//!
//! The palette is the client's Tokyo‑Night scheme. The mapping is cosmetic
//! and total: every kind has a defined treatment (`None` means "inherit the
//! surrounding color", used for whitespace).

use crate::sql::{token_kind::TokenKind, tokenizer::tokenize};
use derive_more::Display;

/// 24‑bit display color, shown as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

const KEYWORD: Rgb = Rgb::new(0xbb, 0x9a, 0xf7);
const FUNCTION: Rgb = Rgb::new(0x7a, 0xa2, 0xf7);
const STRING: Rgb = Rgb::new(0x9e, 0xce, 0x6a);
const NUMBER: Rgb = Rgb::new(0xff, 0x9e, 0x64);
const OPERATOR: Rgb = Rgb::new(0x89, 0xdd, 0xff);
const COMMENT: Rgb = Rgb::new(0x56, 0x5f, 0x89);
const IDENT: Rgb = Rgb::new(0xe0, 0xaf, 0x68);
const PLAIN: Rgb = Rgb::new(0xc0, 0xca, 0xf5);

/// Display color for a token kind; `None` inherits the surrounding color.
pub const fn color(kind: &TokenKind) -> Option<Rgb> {
    match kind {
        TokenKind::Whitespace => None,
        TokenKind::Comment => Some(COMMENT),
        TokenKind::Str => Some(STRING),
        TokenKind::Number => Some(NUMBER),
        TokenKind::Keyword(_) => Some(KEYWORD),
        TokenKind::Function(_) => Some(FUNCTION),
        TokenKind::Ident => Some(IDENT),
        TokenKind::Operator(_) => Some(OPERATOR),
        TokenKind::Plain(_) => Some(PLAIN),
    }
}

/// Tokenize `sql` and render it with ANSI truecolor escapes for a terminal.
/// Comments additionally render italic.
pub fn render_ansi(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() * 2);
    for token in tokenize(sql) {
        let text = token.text(sql);
        match color(&token.kind) {
            None => out.push_str(text),
            Some(Rgb { r, g, b }) => {
                let italic = if matches!(token.kind, TokenKind::Comment) {
                    "\x1b[3m"
                } else {
                    ""
                };
                out.push_str(&format!("{italic}\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_treatment() {
        // `color` is a total const match, so this just pins the palette.
        assert_eq!(color(&TokenKind::Whitespace), None);
        assert_eq!(
            color(&TokenKind::Keyword(crate::sql::Keyword::Select)),
            Some(KEYWORD)
        );
        assert_eq!(color(&TokenKind::Function(None)), Some(FUNCTION));
        assert_eq!(color(&TokenKind::Plain('?')), Some(PLAIN));
    }

    #[test]
    fn rgb_displays_as_hex() {
        assert_eq!(KEYWORD.to_string(), "#bb9af7");
        assert_eq!(COMMENT.to_string(), "#565f89");
    }

    #[test]
    fn rendered_output_contains_the_input_text() {
        let sql = "SELECT 1 -- one";
        let rendered = render_ansi(sql);
        // Stripping escapes must give back the input; cheap check: every
        // token text appears in order.
        assert!(rendered.contains("SELECT"));
        assert!(rendered.contains("-- one"));
        assert!(rendered.contains("\x1b[3m"), "comment renders italic");
    }

    #[test]
    fn whitespace_passes_through_unstyled() {
        let rendered = render_ansi("a b");
        assert!(rendered.contains(" "));
    }
}
