//! SQL keyword model used by the highlighting tokenizer.
//!
//! This module defines the set of SQL reserved words the highlighter
//! recognizes. It covers the statements the backend actually generates
//! (queries plus basic DML/DDL) and nothing more. Extend only when the
//! backend starts emitting a construct that renders unstyled.
//!
//! Design notes:
//! - Keywords are matched case‑insensitively via `from_lower` using a
//!   pre‑lower‑cased string slice.
//! - `as_str` provides a canonical lowercase representation (useful for
//!   display or debugging).
//! - The derived traits make it easy to compare, copy, and log values.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Where,
    Join,
    Left,
    Right,
    Inner,
    Outer,
    On,
    And,
    Or,
    Not,
    In,
    Exists,
    As,
    Group,
    By,
    Order,
    Having,
    Limit,
    Offset,
    Distinct,
    Union,
    All,
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Create,
    Table,
    Index,
    Drop,
    Alter,
    Add,
    Column,
    With,
    Case,
    When,
    Then,
    Else,
    End,
    Is,
    Null,
    Between,
    Like,
    Asc,
    Desc,
    Returning,
}

impl Keyword {
    /// Attempt to classify a *lower‑cased* word slice into a `Keyword`.
    /// Returns `None` if the word is not a recognized keyword.
    ///
    /// NOTE: The caller is responsible for lower‑casing the input. This avoids
    /// allocating new strings for each token; `to_ascii_lowercase` is typically
    /// performed once per word lexeme outside this function.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "select" => Select,
            "from" => From,
            "where" => Where,
            "join" => Join,
            "left" => Left,
            "right" => Right,
            "inner" => Inner,
            "outer" => Outer,
            "on" => On,
            "and" => And,
            "or" => Or,
            "not" => Not,
            "in" => In,
            "exists" => Exists,
            "as" => As,
            "group" => Group,
            "by" => By,
            "order" => Order,
            "having" => Having,
            "limit" => Limit,
            "offset" => Offset,
            "distinct" => Distinct,
            "union" => Union,
            "all" => All,
            "insert" => Insert,
            "into" => Into,
            "values" => Values,
            "update" => Update,
            "set" => Set,
            "delete" => Delete,
            "create" => Create,
            "table" => Table,
            "index" => Index,
            "drop" => Drop,
            "alter" => Alter,
            "add" => Add,
            "column" => Column,
            "with" => With,
            "case" => Case,
            "when" => When,
            "then" => Then,
            "else" => Else,
            "end" => End,
            "is" => Is,
            "null" => Null,
            "between" => Between,
            "like" => Like,
            "asc" => Asc,
            "desc" => Desc,
            "returning" => Returning,
            _ => return None,
        };
        Some(kw)
    }

    /// Canonical lowercase string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "select",
            From => "from",
            Where => "where",
            Join => "join",
            Left => "left",
            Right => "right",
            Inner => "inner",
            Outer => "outer",
            On => "on",
            And => "and",
            Or => "or",
            Not => "not",
            In => "in",
            Exists => "exists",
            As => "as",
            Group => "group",
            By => "by",
            Order => "order",
            Having => "having",
            Limit => "limit",
            Offset => "offset",
            Distinct => "distinct",
            Union => "union",
            All => "all",
            Insert => "insert",
            Into => "into",
            Values => "values",
            Update => "update",
            Set => "set",
            Delete => "delete",
            Create => "create",
            Table => "table",
            Index => "index",
            Drop => "drop",
            Alter => "alter",
            Add => "add",
            Column => "column",
            With => "with",
            Case => "case",
            When => "when",
            Then => "then",
            Else => "else",
            End => "end",
            Is => "is",
            Null => "null",
            Between => "between",
            Like => "like",
            Asc => "asc",
            Desc => "desc",
            Returning => "returning",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_keywords() {
        for w in [
            "select",
            "from",
            "where",
            "join",
            "left",
            "right",
            "inner",
            "outer",
            "on",
            "and",
            "or",
            "not",
            "in",
            "exists",
            "as",
            "group",
            "by",
            "order",
            "having",
            "limit",
            "offset",
            "distinct",
            "union",
            "all",
            "insert",
            "into",
            "values",
            "update",
            "set",
            "delete",
            "create",
            "table",
            "index",
            "drop",
            "alter",
            "add",
            "column",
            "with",
            "case",
            "when",
            "then",
            "else",
            "end",
            "is",
            "null",
            "between",
            "like",
            "asc",
            "desc",
            "returning",
        ] {
            assert!(Keyword::from_lower(w).is_some(), "{w} should be recognized");
        }
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["foo", "bar", "users", "cross", "lateral", "count"] {
            assert!(
                Keyword::from_lower(w).is_none(),
                "{w} should NOT be recognized"
            );
        }
    }

    #[test]
    fn display_matches_as_str() {
        for kw in [
            Keyword::Select,
            Keyword::From,
            Keyword::Where,
            Keyword::Join,
            Keyword::Returning,
        ] {
            assert_eq!(kw.to_string(), kw.as_str());
        }
    }
}
