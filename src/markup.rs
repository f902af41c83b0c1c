//! Math-markup spans
//!
//! Question prompts and explanations embed formulas between `$` delimiters.
//! The core only splits the text; typesetting belongs to the host.

use serde::Serialize;

/// A run of text, either plain or a formula to typeset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment<'a> {
    Plain(&'a str),
    Math(&'a str),
}

/// Split `text` on `$...$` pairs (non-greedy, left to right).
///
/// A trailing unmatched `$` stays in the plain text. Empty plain runs are omitted.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('$') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('$') else {
            break;
        };
        if open > 0 {
            out.push(Segment::Plain(&rest[..open]));
        }
        out.push(Segment::Math(&after[..close]));
        rest = &after[close + 1..];
    }

    if !rest.is_empty() {
        out.push(Segment::Plain(rest));
    }
    out
}
