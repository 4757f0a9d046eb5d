//! Built‑in SQL function vocabulary.
//!
//! Mirrors `keyword.rs` for the function names the highlighter styles
//! specially. Words outside this set can still classify as functions via the
//! call‑site heuristic in `tokenizer.rs` (next non‑whitespace char is `(`).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Count,
    Sum,
    Avg,
    Max,
    Min,
    Coalesce,
    Nullif,
    Cast,
    Extract,
    DateTrunc,
    Now,
    CurrentDate,
    Length,
    Lower,
    Upper,
    Trim,
    Concat,
    Round,
    Floor,
    Ceil,
}

impl Builtin {
    /// Attempt to classify a *lower‑cased* word slice into a `Builtin`.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Builtin::*;
        let f = match word {
            "count" => Count,
            "sum" => Sum,
            "avg" => Avg,
            "max" => Max,
            "min" => Min,
            "coalesce" => Coalesce,
            "nullif" => Nullif,
            "cast" => Cast,
            "extract" => Extract,
            "date_trunc" => DateTrunc,
            "now" => Now,
            "current_date" => CurrentDate,
            "length" => Length,
            "lower" => Lower,
            "upper" => Upper,
            "trim" => Trim,
            "concat" => Concat,
            "round" => Round,
            "floor" => Floor,
            "ceil" => Ceil,
            _ => return None,
        };
        Some(f)
    }

    /// Canonical lowercase string form of the function name.
    pub const fn as_str(self) -> &'static str {
        use Builtin::*;
        match self {
            Count => "count",
            Sum => "sum",
            Avg => "avg",
            Max => "max",
            Min => "min",
            Coalesce => "coalesce",
            Nullif => "nullif",
            Cast => "cast",
            Extract => "extract",
            DateTrunc => "date_trunc",
            Now => "now",
            CurrentDate => "current_date",
            Length => "length",
            Lower => "lower",
            Upper => "upper",
            Trim => "trim",
            Concat => "concat",
            Round => "round",
            Floor => "floor",
            Ceil => "ceil",
        }
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
